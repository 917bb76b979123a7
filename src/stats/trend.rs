//! Least-squares linear trend.
//!
//! Closed-form normal-equations solution for y = intercept + slope · x:
//!
//! ```text
//! slope     = Σ(x - x̄)(y - ȳ) / Σ(x - x̄)²
//! intercept = ȳ - slope · x̄
//! ```
//!
//! Centering before summing keeps the result exact for year-sized x values.

use crate::stats::StatsError;
use statrs::statistics::Statistics;

/// Fitted line y = intercept + slope · x.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    pub n: usize,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Ordinary least squares of `y` against `x`.
///
/// Needs at least two distinct x values.
pub fn fit_linear(x: &[f64], y: &[f64]) -> Result<LinearFit, StatsError> {
    if x.len() != y.len() {
        return Err(StatsError::InvalidParameter(format!(
            "x has {} values but y has {}",
            x.len(),
            y.len()
        )));
    }

    let n = x.len();
    let distinct = count_distinct(x);
    if distinct < 2 {
        return Err(StatsError::InsufficientData {
            statistic: "trend fit",
            required: 2,
            found: distinct,
            unit: "distinct x values",
        });
    }

    let x_mean = x.iter().mean();
    let y_mean = y.iter().mean();

    let (sxy, sxx) = x
        .iter()
        .zip(y.iter())
        .fold((0.0, 0.0), |(sxy, sxx), (&xi, &yi)| {
            let dx = xi - x_mean;
            (sxy + dx * (yi - y_mean), sxx + dx * dx)
        });

    let slope = sxy / sxx;
    let intercept = y_mean - slope * x_mean;

    Ok(LinearFit {
        slope,
        intercept,
        n,
    })
}

fn count_distinct(values: &[f64]) -> usize {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    sorted.dedup();
    sorted.len()
}
