//! Gaussian kernel density estimation.
//!
//! f̂(x) = (1/nh) Σᵢ K((x - xᵢ)/h), with K the standard normal density.
//!
//! The bandwidth follows Scott's factor: h = σ · n^(-1/5), where σ is the
//! sample standard deviation (n - 1 denominator).

use crate::stats::calculator::min_max;
use crate::stats::StatsError;
use statrs::distribution::{Continuous, Normal};
use statrs::statistics::Statistics;

/// Number of evaluation points for the distribution panel.
pub const KDE_GRID_POINTS: usize = 200;

/// Density curve sampled on an evenly spaced grid.
#[derive(Debug, Clone, PartialEq)]
pub struct KdeCurve {
    pub xs: Vec<f64>,
    pub density: Vec<f64>,
    pub bandwidth: f64,
}

/// Scott's rule bandwidth for `values`.
pub fn scott_bandwidth(values: &[f64]) -> Result<f64, StatsError> {
    let n = values.len();
    if n < 2 {
        return Err(StatsError::insufficient("density estimate", 2, n));
    }

    let sd = values.iter().std_dev();
    if !sd.is_finite() || sd <= 0.0 {
        return Err(StatsError::ZeroVariance("density estimate"));
    }

    Ok(sd * (n as f64).powf(-0.2))
}

/// Evenly spaced grid of `points` values spanning `[lo, hi]` inclusive.
pub fn linspace(lo: f64, hi: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![lo],
        _ => {
            let step = (hi - lo) / (points - 1) as f64;
            (0..points)
                .map(|i| if i == points - 1 { hi } else { lo + i as f64 * step })
                .collect()
        }
    }
}

/// Gaussian KDE evaluated at `points` evenly spaced values over the data's `[min, max]`.
pub fn gaussian_kde(values: &[f64], points: usize) -> Result<KdeCurve, StatsError> {
    let bandwidth = scott_bandwidth(values)?;
    let kernel = Normal::new(0.0, 1.0).map_err(|e| StatsError::InvalidParameter(e.to_string()))?;

    let (lo, hi) = min_max(values);
    let xs = linspace(lo, hi, points);

    let inv_h = 1.0 / bandwidth;
    let inv_nh = inv_h / values.len() as f64;

    let density = xs
        .iter()
        .map(|&x| {
            let sum: f64 = values.iter().map(|&xi| kernel.pdf((x - xi) * inv_h)).sum();
            sum * inv_nh
        })
        .collect();

    Ok(KdeCurve {
        xs,
        density,
        bandwidth,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_hits_both_ends() {
        let grid = linspace(0.0, 1.0, 5);
        assert_eq!(grid, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace(3.0, 9.0, 200).len(), 200);
    }

    #[test]
    fn scott_bandwidth_matches_formula() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        // sample sd = sqrt(2.5)
        let expected = 2.5f64.sqrt() * 5f64.powf(-0.2);
        assert!((scott_bandwidth(&values).unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn kde_is_symmetric_for_symmetric_data() {
        let values = [-2.0, -1.0, 0.0, 1.0, 2.0];
        let curve = gaussian_kde(&values, 201).unwrap();
        assert_eq!(curve.xs.len(), 201);
        assert_eq!(curve.xs[0], -2.0);
        assert_eq!(curve.xs[200], 2.0);

        for i in 0..100 {
            assert!((curve.density[i] - curve.density[200 - i]).abs() < 1e-12);
        }
        // Peak at the center
        let peak = curve.density.iter().cloned().fold(f64::MIN, f64::max);
        assert!((curve.density[100] - peak).abs() < 1e-12);
    }

    #[test]
    fn kde_single_point_value_matches_hand_computation() {
        let values = [0.0, 1.0];
        let curve = gaussian_kde(&values, 2).unwrap();
        let h = curve.bandwidth;
        let phi = |u: f64| (-0.5 * u * u).exp() / (2.0 * std::f64::consts::PI).sqrt();
        let expected = (phi(0.0) + phi(1.0 / h)) / (2.0 * h);
        assert!((curve.density[0] - expected).abs() < 1e-12);
    }

    #[test]
    fn kde_requires_two_points_and_spread() {
        assert!(gaussian_kde(&[1.0], 10).unwrap_err().is_insufficient_data());
        assert!(gaussian_kde(&[], 10).unwrap_err().is_insufficient_data());
        assert!(matches!(
            gaussian_kde(&[3.0, 3.0, 3.0], 10),
            Err(StatsError::ZeroVariance(_))
        ));
    }
}
