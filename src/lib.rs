//! Sunspot Dashboard - CSV loading and four-panel sunspot analysis
//!
//! The binary is a thin egui shell around this library:
//!
//! - [`data`] loads the CSV into a date-keyed [`data::SunspotTable`] behind a path-keyed cache
//! - [`stats`] holds the histogram, boxplot, density and trend computations
//! - [`charts`] builds the [`charts::FourPanelFigure`] and draws it (egui_plot or plotters)
//! - [`pipeline`] is the load-then-render entry point used by the shell

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod pipeline;
pub mod stats;
