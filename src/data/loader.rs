//! CSV Data Loader Module
//! Reads the sunspot CSV with Polars, coerces the year column and derives the date key.

use crate::data::table::{SunspotTable, DATE_COLUMN};
use chrono::{Datelike, NaiveDate};
use polars::prelude::*;
use std::path::Path;
use thiserror::Error;

/// Days between 0001-01-01 (CE day 1) and 1970-01-01, the Polars `Date` epoch.
pub const EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Cell values read as missing, matching the usual pandas defaults.
pub const NULL_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[derive(Error, Debug)]
pub enum LoaderError {
    /// File missing, unreadable, not parseable as CSV, or lacking a required column.
    #[error("Failed to load '{path}': {reason}")]
    DataLoad {
        path: String,
        reason: String,
        #[source]
        source: Option<PolarsError>,
    },
    #[error("Invalid year in column '{column}' at row {row}: '{value}' is not a whole number")]
    DataFormat {
        column: String,
        row: usize,
        value: String,
    },
    #[error("Failed to build the date-keyed table: {0}")]
    Frame(#[source] PolarsError),
}

impl LoaderError {
    /// True for the "file missing, unreadable or malformed" family.
    pub fn is_data_load(&self) -> bool {
        matches!(self, LoaderError::DataLoad { .. })
    }

    /// True when the year column could not be coerced to integers.
    pub fn is_data_format(&self) -> bool {
        matches!(self, LoaderError::DataFormat { .. })
    }
}

/// Column names the loader requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderOptions {
    pub year_column: String,
    pub activity_column: String,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            year_column: "YEAR".to_string(),
            activity_column: "SUNACTIVITY".to_string(),
        }
    }
}

/// Handles CSV file loading with Polars.
#[derive(Debug, Clone, Default)]
pub struct DataLoader {
    options: LoaderOptions,
}

impl DataLoader {
    pub fn new(options: LoaderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &LoaderOptions {
        &self.options
    }

    /// Read and validate a CSV file. Never consults a cache.
    pub fn load_csv(&self, file_path: &str) -> Result<SunspotTable, LoaderError> {
        let path = Path::new(file_path);
        let metadata = std::fs::metadata(path).map_err(|e| LoaderError::DataLoad {
            path: file_path.to_string(),
            reason: e.to_string(),
            source: None,
        })?;
        if !metadata.is_file() {
            return Err(LoaderError::DataLoad {
                path: file_path.to_string(),
                reason: "not a regular file".to_string(),
                source: None,
            });
        }

        let csv_err = |source: PolarsError| LoaderError::DataLoad {
            path: file_path.to_string(),
            reason: source.to_string(),
            source: Some(source),
        };

        let null_values =
            NullValues::AllColumns(NULL_MARKERS.iter().map(|m| (*m).into()).collect());

        // Infer over the whole file so a stray value cannot slip past the schema
        let df = LazyCsvReader::new(file_path)
            .with_has_header(true)
            .with_infer_schema_length(None)
            .with_null_values(Some(null_values))
            .finish()
            .map_err(csv_err)?
            .collect()
            .map_err(csv_err)?;

        for required in [&self.options.year_column, &self.options.activity_column] {
            if df.column(required).is_err() {
                return Err(LoaderError::DataLoad {
                    path: file_path.to_string(),
                    reason: format!("missing required column '{}'", required),
                    source: None,
                });
            }
        }

        let years = self.coerce_years(file_path, &df)?;
        let dates = years
            .iter()
            .enumerate()
            .map(|(row, &year)| {
                NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(|| LoaderError::DataFormat {
                    column: self.options.year_column.clone(),
                    row,
                    value: year.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let df = self
            .attach_date_key(df, &years, &dates)
            .map_err(LoaderError::Frame)?;

        log::info!(
            "Loaded '{}': {} rows, {} columns",
            file_path,
            df.height(),
            df.width()
        );

        Ok(SunspotTable::new(
            df,
            self.options.year_column.clone(),
            years,
            dates,
        ))
    }

    /// Cast the year column to whole years, rejecting anything that does not round-trip.
    fn coerce_years(&self, file_path: &str, df: &DataFrame) -> Result<Vec<i32>, LoaderError> {
        let column_name = &self.options.year_column;
        let format_err = |row: usize, value: String| LoaderError::DataFormat {
            column: column_name.clone(),
            row,
            value,
        };
        let load_err = |e: PolarsError| LoaderError::DataLoad {
            path: file_path.to_string(),
            reason: e.to_string(),
            source: Some(e),
        };

        let year_col = df.column(column_name).map_err(load_err)?;

        let raw: Vec<Result<i64, String>> = match year_col.dtype() {
            DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64 => {
                let as_i64 = year_col.cast(&DataType::Int64).map_err(load_err)?;
                let ca = as_i64.i64().map_err(load_err)?;
                ca.into_iter()
                    .map(|v| v.ok_or_else(|| "null".to_string()))
                    .collect()
            }
            DataType::Float32 | DataType::Float64 => {
                let as_f64 = year_col.cast(&DataType::Float64).map_err(load_err)?;
                let ca = as_f64.f64().map_err(load_err)?;
                ca.into_iter()
                    .map(|v| match v {
                        Some(x) if x.is_finite() && x.fract() == 0.0 => Ok(x as i64),
                        Some(x) => Err(x.to_string()),
                        None => Err("null".to_string()),
                    })
                    .collect()
            }
            DataType::String => {
                let ca = year_col.as_materialized_series().str().map_err(load_err)?;
                ca.into_iter()
                    .map(|v| match v {
                        Some(s) => s.trim().parse::<i64>().map_err(|_| s.to_string()),
                        None => Err("null".to_string()),
                    })
                    .collect()
            }
            other => {
                return Err(format_err(0, format!("<{}>", other)));
            }
        };

        raw.into_iter()
            .enumerate()
            .map(|(row, value)| {
                let year = value.map_err(|v| format_err(row, v))?;
                i32::try_from(year).map_err(|_| format_err(row, year.to_string()))
            })
            .collect()
    }

    /// Replace the year column with Int32 years and put the DATE key first.
    fn attach_date_key(
        &self,
        mut df: DataFrame,
        years: &[i32],
        dates: &[NaiveDate],
    ) -> PolarsResult<DataFrame> {
        let days: Vec<i32> = dates
            .iter()
            .map(|d| d.num_days_from_ce() - EPOCH_DAYS_FROM_CE)
            .collect();
        let date_col = Column::new(DATE_COLUMN.into(), days).cast(&DataType::Date)?;
        let year_col = Column::new(self.options.year_column.as_str().into(), years.to_vec());

        df.with_column(year_col)?;
        df.with_column(date_col)?;

        let mut order: Vec<String> = vec![DATE_COLUMN.to_string()];
        order.extend(
            df.get_column_names()
                .iter()
                .map(|s| s.to_string())
                .filter(|name| name != DATE_COLUMN),
        );
        df.select(order)
    }
}

/// Convert a Polars `Date` physical value (days since 1970-01-01) back to a calendar date.
pub fn date_from_epoch_days(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days.checked_add(EPOCH_DAYS_FROM_CE)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_days_round_trip() {
        let date = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        assert_eq!(date.num_days_from_ce() - EPOCH_DAYS_FROM_CE, 0);

        let date = NaiveDate::from_ymd_opt(1749, 1, 1).unwrap();
        let days = date.num_days_from_ce() - EPOCH_DAYS_FROM_CE;
        assert!(days < 0);
        assert_eq!(date_from_epoch_days(days), Some(date));
    }

    #[test]
    fn missing_file_is_data_load_error() {
        let err = DataLoader::default()
            .load_csv("definitely/not/here/sunspots.csv")
            .unwrap_err();
        assert!(err.is_data_load());
        assert!(err.to_string().contains("definitely/not/here"));
    }

    #[test]
    fn common_missing_markers_are_null() {
        for marker in ["", "NA", "N/A", "null", "NULL", "NaN", "nan", "None"] {
            assert!(NULL_MARKERS.contains(&marker), "{marker:?} should read as missing");
        }
    }

    #[test]
    fn default_options_match_dataset_headers() {
        let options = LoaderOptions::default();
        assert_eq!(options.year_column, "YEAR");
        assert_eq!(options.activity_column, "SUNACTIVITY");
    }
}
