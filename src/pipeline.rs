//! Load-then-render workflow shared by the window and the tests.
//!
//! The shell calls `run` on every render request and matches on the outcome:
//! a figure to display, or an error message to show in its place.

use crate::charts::{render, FourPanelFigure, RenderError};
use crate::data::{LoadCache, LoaderError, SunspotTable};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error(transparent)]
    Load(#[from] LoaderError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Table and figure from a successful render request.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    pub table: Arc<SunspotTable>,
    pub figure: FourPanelFigure,
}

/// Load `path` through the cache, then build the figure for `column`.
pub fn run(
    cache: &mut LoadCache,
    path: &str,
    column: Option<&str>,
) -> Result<RenderOutput, DashboardError> {
    let table = cache.load(path)?;
    let figure = render(&table, column)?;
    Ok(RenderOutput { table, figure })
}
