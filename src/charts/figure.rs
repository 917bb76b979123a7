//! Four-panel figure model.
//!
//! `render` turns a loaded table into the data behind the 2x2 dashboard:
//!
//! | A. time series | B. distribution |
//! |----------------|-----------------|
//! | C. boxplot     | D. trend        |
//!
//! Panels B-D are computed independently. When one of them lacks data it
//! carries its own `StatsError` and the rest of the figure is still returned.

use crate::data::{DataProcessor, ProcessorError, SunspotTable};
use crate::stats::{
    fit_linear, gaussian_kde, BoxSummary, DensityHistogram, KdeCurve, LinearFit, StatsCalculator,
    StatsError, HISTOGRAM_BINS, KDE_GRID_POINTS,
};
use chrono::{Datelike, NaiveDate};
use polars::prelude::PolarsError;
use std::ops::RangeInclusive;
use thiserror::Error;

/// Column plotted when the caller does not pick one.
pub const DEFAULT_VALUE_COLUMN: &str = "SUNACTIVITY";

/// Years covered by the boxplot panel, inclusive.
pub const BOXPLOT_YEARS: RangeInclusive<i32> = 1900..=2000;

pub const FIGURE_TITLE: &str = "Sunspots Data Advanced Visualization";

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Column '{0}' not found")]
    ColumnNotFound(String),
    #[error("Column '{column}' is not numeric ({dtype})")]
    ColumnNotNumeric { column: String, dtype: String },
    #[error(transparent)]
    InsufficientData(StatsError),
    #[error("Failed to read table: {0}")]
    Table(#[from] PolarsError),
}

impl From<ProcessorError> for RenderError {
    fn from(err: ProcessorError) -> Self {
        match err {
            ProcessorError::ColumnNotFound(column) => RenderError::ColumnNotFound(column),
            ProcessorError::ColumnNotNumeric { column, dtype } => {
                RenderError::ColumnNotNumeric { column, dtype }
            }
            ProcessorError::PolarsError(e) => RenderError::Table(e),
        }
    }
}

/// Title and axis labels of one panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelLabels {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
}

pub const TIME_SERIES_LABELS: PanelLabels = PanelLabels {
    title: "Sunspot Activity Over Time",
    x_label: "Year",
    y_label: "Sunspot Count",
};

pub const DISTRIBUTION_LABELS: PanelLabels = PanelLabels {
    title: "Distribution of Sunspot Activity",
    x_label: "Sunspot Count",
    y_label: "Density",
};

pub const BOXPLOT_LABELS: PanelLabels = PanelLabels {
    title: "Boxplot of Sunspot Activity (1900-2000)",
    x_label: "Sunspot Count",
    y_label: "",
};

pub const TREND_LABELS: PanelLabels = PanelLabels {
    title: "Trend of Sunspot Activity",
    x_label: "Year",
    y_label: "Sunspot Count",
};

/// Panel A: raw values against the date key, in table order.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesPanel {
    pub points: Vec<(NaiveDate, Option<f64>)>,
}

impl TimeSeriesPanel {
    /// Runs of consecutive present values. A missing value ends the current run.
    pub fn segments(&self) -> Vec<Vec<(NaiveDate, f64)>> {
        let mut segments = Vec::new();
        let mut current = Vec::new();

        for &(date, value) in &self.points {
            match value {
                Some(v) => current.push((date, v)),
                None => {
                    if !current.is_empty() {
                        segments.push(std::mem::take(&mut current));
                    }
                }
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }

        segments
    }

    /// Bounds over present values as `(x_min, x_max, y_min, y_max)` in decimal years.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let mut bounds: Option<(f64, f64, f64, f64)> = None;
        for &(date, value) in &self.points {
            let Some(v) = value else { continue };
            let x = decimal_year(date);
            bounds = Some(match bounds {
                None => (x, x, v, v),
                Some((x0, x1, y0, y1)) => (x0.min(x), x1.max(x), y0.min(v), y1.max(v)),
            });
        }
        bounds
    }
}

/// Panel B: density histogram overlaid with the KDE curve.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionPanel {
    pub histogram: DensityHistogram,
    pub kde: KdeCurve,
    pub sample_size: usize,
}

/// Panel C: horizontal boxplot over a year window.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxplotPanel {
    pub years: RangeInclusive<i32>,
    pub summary: BoxSummary,
}

/// Panel D: scatter of (year, value) with the least-squares line.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPanel {
    pub years: Vec<f64>,
    pub values: Vec<f64>,
    pub fit: LinearFit,
    /// Fitted line evaluated at each entry of `years`.
    pub fitted: Vec<f64>,
}

/// Data for the 2x2 dashboard. Starved panels hold the reason instead of data.
#[derive(Debug, Clone, PartialEq)]
pub struct FourPanelFigure {
    pub title: String,
    pub column: String,
    pub time_series: TimeSeriesPanel,
    pub distribution: Result<DistributionPanel, StatsError>,
    pub boxplot: Result<BoxplotPanel, StatsError>,
    pub trend: Result<TrendPanel, StatsError>,
}

impl FourPanelFigure {
    /// Titles of panels that could not be computed.
    pub fn starved_panels(&self) -> Vec<&'static str> {
        let mut starved = Vec::new();
        if self.distribution.is_err() {
            starved.push(DISTRIBUTION_LABELS.title);
        }
        if self.boxplot.is_err() {
            starved.push(BOXPLOT_LABELS.title);
        }
        if self.trend.is_err() {
            starved.push(TREND_LABELS.title);
        }
        starved
    }

    pub fn is_complete(&self) -> bool {
        self.distribution.is_ok() && self.boxplot.is_ok() && self.trend.is_ok()
    }
}

/// Build the four-panel figure for `column` (default `SUNACTIVITY`).
pub fn render(table: &SunspotTable, column: Option<&str>) -> Result<FourPanelFigure, RenderError> {
    let column = column.unwrap_or(DEFAULT_VALUE_COLUMN);
    let values = DataProcessor::column_values(table, column)?;

    if table.is_empty() {
        return Err(RenderError::InsufficientData(StatsError::InsufficientData {
            statistic: "time series",
            required: 1,
            found: 0,
            unit: "rows",
        }));
    }

    let years = table.years();

    let time_series = TimeSeriesPanel {
        points: table.dates().iter().copied().zip(values.iter().copied()).collect(),
    };

    let present = DataProcessor::drop_missing(&values);
    let distribution = distribution_panel(&present);

    let in_window = DataProcessor::values_in_years(years, &values, BOXPLOT_YEARS);
    let boxplot = StatsCalculator::box_summary(&in_window).map(|summary| BoxplotPanel {
        years: BOXPLOT_YEARS,
        summary,
    });

    let (trend_x, trend_y) = DataProcessor::year_value_pairs(years, &values);
    let trend = trend_panel(trend_x, trend_y);

    let figure = FourPanelFigure {
        title: FIGURE_TITLE.to_string(),
        column: column.to_string(),
        time_series,
        distribution,
        boxplot,
        trend,
    };

    for title in figure.starved_panels() {
        log::warn!("Panel '{}' has insufficient data for column '{}'", title, column);
    }

    Ok(figure)
}

fn distribution_panel(present: &[f64]) -> Result<DistributionPanel, StatsError> {
    let kde = gaussian_kde(present, KDE_GRID_POINTS)?;
    let histogram = StatsCalculator::density_histogram(present, HISTOGRAM_BINS)?;
    Ok(DistributionPanel {
        histogram,
        kde,
        sample_size: present.len(),
    })
}

fn trend_panel(years: Vec<f64>, values: Vec<f64>) -> Result<TrendPanel, StatsError> {
    let fit = fit_linear(&years, &values)?;
    let fitted = years.iter().map(|&x| fit.predict(x)).collect();
    Ok(TrendPanel {
        years,
        values,
        fit,
        fitted,
    })
}

/// Date as a fractional year, e.g. 1900-07-02 is roughly 1900.5.
pub fn decimal_year(date: NaiveDate) -> f64 {
    let days_in_year = if NaiveDate::from_ymd_opt(date.year(), 2, 29).is_some() {
        366.0
    } else {
        365.0
    };
    date.year() as f64 + date.ordinal0() as f64 / days_in_year
}
