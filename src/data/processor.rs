//! Data Processor Module
//! Pulls a value column out of the table and drops missing entries.

use crate::data::table::{is_numeric, SunspotTable};
use polars::prelude::*;
use std::ops::RangeInclusive;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Column '{0}' not found")]
    ColumnNotFound(String),
    #[error("Column '{column}' is not numeric ({dtype})")]
    ColumnNotNumeric { column: String, dtype: String },
}

/// Handles value extraction and cleaning.
pub struct DataProcessor;

impl DataProcessor {
    /// Get a value column as `f64`, in table order. Nulls and NaN become `None`.
    pub fn column_values(
        table: &SunspotTable,
        column: &str,
    ) -> Result<Vec<Option<f64>>, ProcessorError> {
        if !table.is_value_column(column) {
            return Err(ProcessorError::ColumnNotFound(column.to_string()));
        }

        let series = table.dataframe().column(column)?;

        // An all-empty CSV column carries no numeric type; treat it as all missing
        if series.null_count() == series.len() {
            return Ok(vec![None; series.len()]);
        }

        if !is_numeric(series.dtype()) {
            return Err(ProcessorError::ColumnNotNumeric {
                column: column.to_string(),
                dtype: series.dtype().to_string(),
            });
        }

        let value_f64 = series.cast(&DataType::Float64)?;
        let value_ca = value_f64.f64()?;

        Ok(value_ca
            .into_iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect())
    }

    /// Keep only present values.
    pub fn drop_missing(values: &[Option<f64>]) -> Vec<f64> {
        values.iter().filter_map(|v| *v).collect()
    }

    /// Pair each present value with its year. Output order follows table order.
    pub fn year_value_pairs(years: &[i32], values: &[Option<f64>]) -> (Vec<f64>, Vec<f64>) {
        years
            .iter()
            .zip(values.iter())
            .filter_map(|(&year, v)| v.map(|v| (year as f64, v)))
            .unzip()
    }

    /// Present values whose year falls inside `range` (inclusive on both ends).
    pub fn values_in_years(
        years: &[i32],
        values: &[Option<f64>],
        range: RangeInclusive<i32>,
    ) -> Vec<f64> {
        years
            .iter()
            .zip(values.iter())
            .filter(|(year, _)| range.contains(year))
            .filter_map(|(_, v)| *v)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drop_missing_keeps_order() {
        let values = [Some(3.0), None, Some(1.0), None, Some(2.0)];
        assert_eq!(DataProcessor::drop_missing(&values), vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn year_value_pairs_skip_nulls() {
        let years = [1900, 1901, 1902];
        let values = [Some(5.0), None, Some(7.0)];
        let (x, y) = DataProcessor::year_value_pairs(&years, &values);
        assert_eq!(x, vec![1900.0, 1902.0]);
        assert_eq!(y, vec![5.0, 7.0]);
    }

    #[test]
    fn year_range_is_inclusive() {
        let years = [1899, 1900, 1950, 2000, 2001];
        let values = [Some(999.0), Some(1.0), Some(2.0), Some(3.0), Some(-999.0)];
        let kept = DataProcessor::values_in_years(&years, &values, 1900..=2000);
        assert_eq!(kept, vec![1.0, 2.0, 3.0]);
    }
}
