//! Sunspot Table Module
//! Read-only, date-keyed view over the loaded DataFrame.

use crate::data::loader::date_from_epoch_days;
use chrono::NaiveDate;
use polars::prelude::*;

/// Name of the derived date key column.
pub const DATE_COLUMN: &str = "DATE";

/// Loaded dataset: one row per input line, keyed by January 1 of its year.
///
/// Rows keep input file order. The table is never mutated after construction.
#[derive(Debug, Clone)]
pub struct SunspotTable {
    df: DataFrame,
    year_column: String,
    years: Vec<i32>,
    dates: Vec<NaiveDate>,
}

impl SunspotTable {
    pub(crate) fn new(
        df: DataFrame,
        year_column: String,
        years: Vec<i32>,
        dates: Vec<NaiveDate>,
    ) -> Self {
        Self {
            df,
            year_column,
            years,
            dates,
        }
    }

    /// Get a reference to the underlying DataFrame (DATE column first).
    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    pub fn year_column(&self) -> &str {
        &self.year_column
    }

    /// Integer year per row, in table order.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Date key per row, in table order.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Date keys decoded from the stored DATE column.
    pub fn date_keys(&self) -> PolarsResult<Vec<Option<NaiveDate>>> {
        let days = self.df.column(DATE_COLUMN)?.cast(&DataType::Int32)?;
        Ok(days
            .i32()?
            .into_iter()
            .map(|d| d.and_then(date_from_epoch_days))
            .collect())
    }

    /// Get list of column names, DATE first.
    pub fn column_names(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// True when `column` names a plottable value column (not the key columns).
    pub fn is_value_column(&self, column: &str) -> bool {
        column != DATE_COLUMN && column != self.year_column && self.df.column(column).is_ok()
    }

    /// Get list of numeric value columns, excluding the DATE and year keys.
    pub fn numeric_columns(&self) -> Vec<String> {
        self.df
            .get_columns()
            .iter()
            .filter(|col| is_numeric(col.dtype()))
            .map(|col| col.name().to_string())
            .filter(|name| name != DATE_COLUMN && name != &self.year_column)
            .collect()
    }
}

impl PartialEq for SunspotTable {
    fn eq(&self, other: &Self) -> bool {
        self.year_column == other.year_column
            && self.years == other.years
            && self.dates == other.dates
            && self.df.equals_missing(&other.df)
    }
}

pub(crate) fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float32
            | DataType::Float64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}
