//! Charts module - Figure model and chart rendering

mod figure;
mod plotter;
mod renderer;

pub use figure::{
    decimal_year, render, BoxplotPanel, DistributionPanel, FourPanelFigure, PanelLabels,
    RenderError, TimeSeriesPanel, TrendPanel, BOXPLOT_LABELS, BOXPLOT_YEARS,
    DEFAULT_VALUE_COLUMN, DISTRIBUTION_LABELS, FIGURE_TITLE, TIME_SERIES_LABELS, TREND_LABELS,
};
pub use plotter::ChartPlotter;
pub use renderer::{ExportError, ImageFormat, StaticChartRenderer};
