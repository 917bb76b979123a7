//! Stats module - Histogram, boxplot, density and trend computations

mod calculator;
mod density;
mod trend;

pub use calculator::{
    min_max, BoxSummary, DensityHistogram, StatsCalculator, HISTOGRAM_BINS, IQR_WHISKER_FACTOR,
};
pub use density::{gaussian_kde, linspace, scott_bandwidth, KdeCurve, KDE_GRID_POINTS};
pub use trend::{fit_linear, LinearFit};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    #[error("Insufficient data for {statistic}: need at least {required} {unit}, found {found}")]
    InsufficientData {
        statistic: &'static str,
        required: usize,
        found: usize,
        unit: &'static str,
    },
    #[error("Insufficient data for {0}: values have zero variance")]
    ZeroVariance(&'static str),
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl StatsError {
    pub(crate) fn insufficient(statistic: &'static str, required: usize, found: usize) -> Self {
        StatsError::InsufficientData {
            statistic,
            required,
            found,
            unit: "non-null values",
        }
    }

    /// True when the data cannot support the statistic (too few points or no spread).
    pub fn is_insufficient_data(&self) -> bool {
        matches!(
            self,
            StatsError::InsufficientData { .. } | StatsError::ZeroVariance(_)
        )
    }
}
