//! Statistics Calculator Module
//! Histogram binning and boxplot summaries.

use crate::stats::StatsError;

/// Default histogram bin count for the distribution panel.
pub const HISTOGRAM_BINS: usize = 30;

/// Whisker reach in multiples of the interquartile range.
pub const IQR_WHISKER_FACTOR: f64 = 1.5;

/// Histogram normalized so the bar areas sum to one.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityHistogram {
    /// `bins + 1` ascending bin edges.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
    /// Probability density per bin: `count / (n * width)`.
    pub densities: Vec<f64>,
}

impl DensityHistogram {
    pub fn bin_width(&self) -> f64 {
        match self.edges.as_slice() {
            [first, second, ..] => second - first,
            _ => 0.0,
        }
    }
}

/// Five-number summary plus IQR whiskers and outliers.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSummary {
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    /// Smallest value not below `q1 - 1.5 * iqr`.
    pub whisker_low: f64,
    /// Largest value not above `q3 + 1.5 * iqr`.
    pub whisker_high: f64,
    /// Values outside the whiskers, ascending.
    pub outliers: Vec<f64>,
}

impl BoxSummary {
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Handles descriptive statistics on plain value slices.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Calculate percentile using linear interpolation (NumPy compatible).
    pub fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }

    /// Equal-width histogram over the observed `[min, max]`, normalized to density.
    ///
    /// The last bin is closed on the right. A zero-width range is widened to
    /// `[v - 0.5, v + 0.5]`.
    pub fn density_histogram(values: &[f64], bins: usize) -> Result<DensityHistogram, StatsError> {
        if values.is_empty() {
            return Err(StatsError::insufficient("histogram", 1, 0));
        }
        if bins == 0 {
            return Err(StatsError::InvalidParameter(
                "histogram needs at least one bin".to_string(),
            ));
        }

        let (mut lo, mut hi) = min_max(values);
        if hi - lo == 0.0 {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins).map(|i| lo + i as f64 * width).collect();

        let mut counts = vec![0usize; bins];
        for &v in values {
            let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }

        let n = values.len() as f64;
        let densities = counts.iter().map(|&c| c as f64 / (n * width)).collect();

        Ok(DensityHistogram {
            edges,
            counts,
            densities,
        })
    }

    /// Boxplot statistics with the 1.5 x IQR outlier rule.
    pub fn box_summary(values: &[f64]) -> Result<BoxSummary, StatsError> {
        if values.is_empty() {
            return Err(StatsError::insufficient("boxplot", 1, 0));
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let q1 = Self::percentile(&sorted, 25.0);
        let median = Self::percentile(&sorted, 50.0);
        let q3 = Self::percentile(&sorted, 75.0);
        let iqr = q3 - q1;
        let low_fence = q1 - IQR_WHISKER_FACTOR * iqr;
        let high_fence = q3 + IQR_WHISKER_FACTOR * iqr;

        let whisker_low = sorted
            .iter()
            .copied()
            .find(|&v| v >= low_fence)
            .unwrap_or(q1);
        let whisker_high = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= high_fence)
            .unwrap_or(q3);

        let outliers = sorted
            .iter()
            .copied()
            .filter(|&v| v < whisker_low || v > whisker_high)
            .collect();

        Ok(BoxSummary {
            count: sorted.len(),
            min: sorted[0],
            q1,
            median,
            q3,
            max: sorted[sorted.len() - 1],
            whisker_low,
            whisker_high,
            outliers,
        })
    }
}

/// Smallest and largest value of a non-empty slice.
pub fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentile_matches_numpy_linear() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert!((StatsCalculator::percentile(&sorted, 25.0) - 1.75).abs() < 1e-12);
        assert!((StatsCalculator::percentile(&sorted, 50.0) - 2.5).abs() < 1e-12);
        assert!((StatsCalculator::percentile(&sorted, 75.0) - 3.25).abs() < 1e-12);
    }

    #[test]
    fn histogram_density_integrates_to_one() {
        let values: Vec<f64> = (0..100).map(|i| (i as f64 * 0.37).sin() * 50.0 + 60.0).collect();
        let hist = StatsCalculator::density_histogram(&values, HISTOGRAM_BINS).unwrap();
        assert_eq!(hist.edges.len(), HISTOGRAM_BINS + 1);
        assert_eq!(hist.counts.iter().sum::<usize>(), 100);

        let area: f64 = hist.densities.iter().map(|d| d * hist.bin_width()).sum();
        assert!((area - 1.0).abs() < 1e-9);
    }

    #[test]
    fn histogram_max_lands_in_last_bin() {
        let hist = StatsCalculator::density_histogram(&[0.0, 10.0], 10).unwrap();
        assert_eq!(hist.counts[0], 1);
        assert_eq!(hist.counts[9], 1);
        assert_eq!(hist.edges[0], 0.0);
        assert!((hist.edges[10] - 10.0).abs() < 1e-12);
    }

    #[test]
    fn histogram_constant_values_widen_range() {
        let hist = StatsCalculator::density_histogram(&[5.0, 5.0, 5.0], 30).unwrap();
        assert!((hist.edges[0] - 4.5).abs() < 1e-12);
        assert!((hist.edges[30] - 5.5).abs() < 1e-12);
        assert_eq!(hist.counts.iter().sum::<usize>(), 3);
    }

    #[test]
    fn histogram_empty_is_insufficient() {
        let err = StatsCalculator::density_histogram(&[], 30).unwrap_err();
        assert!(err.is_insufficient_data());
    }

    #[test]
    fn box_summary_flags_outliers() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 100.0];
        let summary = StatsCalculator::box_summary(&values).unwrap();

        assert_eq!(summary.count, 9);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 100.0);
        assert!((summary.q1 - 3.0).abs() < 1e-12);
        assert!((summary.median - 5.0).abs() < 1e-12);
        assert!((summary.q3 - 7.0).abs() < 1e-12);
        assert_eq!(summary.whisker_low, 1.0);
        assert_eq!(summary.whisker_high, 8.0);
        assert_eq!(summary.outliers, vec![100.0]);
    }

    #[test]
    fn box_summary_single_value() {
        let summary = StatsCalculator::box_summary(&[42.0]).unwrap();
        assert_eq!(summary.q1, 42.0);
        assert_eq!(summary.q3, 42.0);
        assert!(summary.outliers.is_empty());
    }
}
