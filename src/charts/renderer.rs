//! Static Chart Renderer
//! Draws the four-panel figure with plotters for PNG/SVG export.
//!
//! Layout:
//! 1. Title: "Sunspots Data Advanced Visualization" centered
//! 2. 2x2 grid:
//!    - Top left: time series (blue line, broken at gaps)
//!    - Top right: density histogram (grey) + KDE (red) with legend
//!    - Bottom left: horizontal boxplot for 1900-2000 with outlier markers
//!    - Bottom right: scatter (sky blue) + trend line (red) with legend
//!
//! Starved panels keep their title and show the reason instead of a chart.

use crate::charts::figure::{
    decimal_year, BoxplotPanel, DistributionPanel, FourPanelFigure, PanelLabels, TimeSeriesPanel,
    TrendPanel, BOXPLOT_LABELS, DISTRIBUTION_LABELS, TIME_SERIES_LABELS, TREND_LABELS,
};
use crate::stats::{min_max, StatsError};
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;
use thiserror::Error;

// Colors
const GRAY: RGBColor = RGBColor(128, 128, 128);
const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);
const MEDIAN_ORANGE: RGBColor = RGBColor(255, 127, 14);
const NOTE_RED: RGBColor = RGBColor(156, 0, 6);

const FONT: &str = "sans-serif";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Unsupported image format '{0}' (use .png or .svg)")]
    UnsupportedFormat(String),
    #[error("Drawing failed: {0}")]
    Drawing(String),
}

fn drawing_err<E: std::error::Error + Send + Sync>(err: DrawingAreaErrorKind<E>) -> ExportError {
    ExportError::Drawing(err.to_string())
}

/// Output encodings supported by `export`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    /// Pick the encoding from the file extension.
    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match ext.as_str() {
            "png" => Ok(ImageFormat::Png),
            "svg" => Ok(ImageFormat::Svg),
            other => Err(ExportError::UnsupportedFormat(other.to_string())),
        }
    }
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Write the figure to `path` as PNG or SVG.
    pub fn export(
        figure: &FourPanelFigure,
        path: &Path,
        size: (u32, u32),
    ) -> Result<(), ExportError> {
        match ImageFormat::from_path(path)? {
            ImageFormat::Png => {
                let root = BitMapBackend::new(path, size).into_drawing_area();
                Self::draw_figure(&root, figure)?;
                root.present().map_err(drawing_err)?;
            }
            ImageFormat::Svg => {
                let root = SVGBackend::new(path, size).into_drawing_area();
                Self::draw_figure(&root, figure)?;
                root.present().map_err(drawing_err)?;
            }
        }

        log::info!("Figure exported to {}", path.display());
        Ok(())
    }

    /// Draw the titled 2x2 grid onto any plotters backend.
    pub fn draw_figure<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        figure: &FourPanelFigure,
    ) -> Result<(), ExportError> {
        root.fill(&WHITE).map_err(drawing_err)?;
        let body = root
            .titled(&figure.title, (FONT, 36))
            .map_err(drawing_err)?;
        let panels = body.split_evenly((2, 2));

        Self::draw_time_series(&panels[0], &figure.time_series)?;

        match &figure.distribution {
            Ok(panel) => Self::draw_distribution(&panels[1], panel)?,
            Err(e) => Self::draw_starved(&panels[1], &DISTRIBUTION_LABELS, e)?,
        }
        match &figure.boxplot {
            Ok(panel) => Self::draw_boxplot(&panels[2], panel)?,
            Err(e) => Self::draw_starved(&panels[2], &BOXPLOT_LABELS, e)?,
        }
        match &figure.trend {
            Ok(panel) => Self::draw_trend(&panels[3], panel)?,
            Err(e) => Self::draw_starved(&panels[3], &TREND_LABELS, e)?,
        }

        Ok(())
    }

    fn draw_time_series<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        panel: &TimeSeriesPanel,
    ) -> Result<(), ExportError> {
        let labels = &TIME_SERIES_LABELS;
        // All values missing: axes only, no line
        let (x0, x1, y0, y1) = panel.bounds().unwrap_or((0.0, 1.0, 0.0, 1.0));

        let mut chart = ChartBuilder::on(area)
            .caption(labels.title, (FONT, 22))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d(padded(x0, x1, 0.02), padded(y0, y1, 0.05))
            .map_err(drawing_err)?;

        chart
            .configure_mesh()
            .x_desc(labels.x_label)
            .y_desc(labels.y_label)
            .x_label_formatter(&|v| format!("{:.0}", v))
            .draw()
            .map_err(drawing_err)?;

        for segment in panel.segments() {
            chart
                .draw_series(LineSeries::new(
                    segment.into_iter().map(|(date, v)| (decimal_year(date), v)),
                    BLUE.stroke_width(1),
                ))
                .map_err(drawing_err)?;
        }

        Ok(())
    }

    fn draw_distribution<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        panel: &DistributionPanel,
    ) -> Result<(), ExportError> {
        let labels = &DISTRIBUTION_LABELS;
        let edges = &panel.histogram.edges;
        let x0 = edges.first().copied().unwrap_or(0.0);
        let x1 = edges.last().copied().unwrap_or(1.0);
        let y_max = panel
            .histogram
            .densities
            .iter()
            .chain(panel.kde.density.iter())
            .fold(0.0f64, |acc, &d| acc.max(d));

        let mut chart = ChartBuilder::on(area)
            .caption(labels.title, (FONT, 22))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(70)
            .build_cartesian_2d(padded(x0, x1, 0.02), 0.0..(y_max * 1.1).max(f64::MIN_POSITIVE))
            .map_err(drawing_err)?;

        chart
            .configure_mesh()
            .x_desc(labels.x_label)
            .y_desc(labels.y_label)
            .y_label_formatter(&|v| format!("{:.4}", v))
            .draw()
            .map_err(drawing_err)?;

        chart
            .draw_series(
                panel
                    .histogram
                    .densities
                    .iter()
                    .zip(edges.windows(2))
                    .map(|(&d, edge)| {
                        Rectangle::new([(edge[0], 0.0), (edge[1], d)], GRAY.mix(0.6).filled())
                    }),
            )
            .map_err(drawing_err)?
            .label("Histogram")
            .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], GRAY.mix(0.6).filled()));

        chart
            .draw_series(LineSeries::new(
                panel
                    .kde
                    .xs
                    .iter()
                    .copied()
                    .zip(panel.kde.density.iter().copied()),
                RED.stroke_width(2),
            ))
            .map_err(drawing_err)?
            .label("Density")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(drawing_err)?;

        Ok(())
    }

    fn draw_boxplot<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        panel: &BoxplotPanel,
    ) -> Result<(), ExportError> {
        let labels = &BOXPLOT_LABELS;
        let s = &panel.summary;

        let mut chart = ChartBuilder::on(area)
            .caption(labels.title, (FONT, 22))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(30)
            .build_cartesian_2d(padded(s.min, s.max, 0.05), 0.0..1.0)
            .map_err(drawing_err)?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .x_desc(labels.x_label)
            .y_label_formatter(&|_| String::new())
            .draw()
            .map_err(drawing_err)?;

        let (lo, hi, cap_lo, cap_hi) = (0.35, 0.65, 0.44, 0.56);

        // Box (Q1..Q3)
        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(s.q1, lo), (s.q3, hi)],
                BLACK.stroke_width(1),
            )))
            .map_err(drawing_err)?;

        // Whiskers and caps
        let whisker_lines = vec![
            vec![(s.whisker_low, 0.5), (s.q1, 0.5)],
            vec![(s.q3, 0.5), (s.whisker_high, 0.5)],
            vec![(s.whisker_low, cap_lo), (s.whisker_low, cap_hi)],
            vec![(s.whisker_high, cap_lo), (s.whisker_high, cap_hi)],
        ];
        chart
            .draw_series(
                whisker_lines
                    .into_iter()
                    .map(|pts| PathElement::new(pts, BLACK.stroke_width(1))),
            )
            .map_err(drawing_err)?;

        // Median
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(s.median, lo), (s.median, hi)],
                MEDIAN_ORANGE.stroke_width(2),
            )))
            .map_err(drawing_err)?;

        // Outliers
        chart
            .draw_series(
                s.outliers
                    .iter()
                    .map(|&v| Circle::new((v, 0.5), 4, BLACK.stroke_width(1))),
            )
            .map_err(drawing_err)?;

        Ok(())
    }

    fn draw_trend<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        panel: &TrendPanel,
    ) -> Result<(), ExportError> {
        let labels = &TREND_LABELS;
        let (x0, x1) = min_max(&panel.years);
        let (v0, v1) = min_max(&panel.values);
        let (f0, f1) = min_max(&panel.fitted);

        let mut chart = ChartBuilder::on(area)
            .caption(labels.title, (FONT, 22))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d(
                padded(x0, x1, 0.02),
                padded(v0.min(f0), v1.max(f1), 0.05),
            )
            .map_err(drawing_err)?;

        chart
            .configure_mesh()
            .x_desc(labels.x_label)
            .y_desc(labels.y_label)
            .x_label_formatter(&|v| format!("{:.0}", v))
            .draw()
            .map_err(drawing_err)?;

        chart
            .draw_series(
                panel
                    .years
                    .iter()
                    .zip(panel.values.iter())
                    .map(|(&x, &y)| Circle::new((x, y), 3, SKY_BLUE.mix(0.5).filled())),
            )
            .map_err(drawing_err)?
            .label("Data Points")
            .legend(|(x, y)| Circle::new((x + 7, y), 3, SKY_BLUE.filled()));

        chart
            .draw_series(LineSeries::new(
                panel
                    .years
                    .iter()
                    .copied()
                    .zip(panel.fitted.iter().copied()),
                RED.stroke_width(2),
            ))
            .map_err(drawing_err)?
            .label("Trend Line")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(drawing_err)?;

        Ok(())
    }

    fn draw_starved<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        labels: &PanelLabels,
        reason: &StatsError,
    ) -> Result<(), ExportError> {
        let body = area.titled(labels.title, (FONT, 22)).map_err(drawing_err)?;
        let (_, h) = body.dim_in_pixel();
        body.draw(&Text::new(
            format!("Insufficient data: {}", reason),
            (20, (h / 2) as i32),
            (FONT, 16).into_font().color(&NOTE_RED),
        ))
        .map_err(drawing_err)?;
        Ok(())
    }
}

/// Axis range around `[lo, hi]` with `frac` of the span added on each side.
fn padded(lo: f64, hi: f64, frac: f64) -> Range<f64> {
    let span = hi - lo;
    if span <= 0.0 || !span.is_finite() {
        let pad = if lo.abs() > 0.0 { lo.abs() * 0.05 } else { 1.0 };
        return (lo - pad)..(hi + pad);
    }
    (lo - span * frac)..(hi + span * frac)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_extension() {
        assert_eq!(
            ImageFormat::from_path(Path::new("out/figure.PNG")).unwrap(),
            ImageFormat::Png
        );
        assert_eq!(
            ImageFormat::from_path(Path::new("figure.svg")).unwrap(),
            ImageFormat::Svg
        );
        assert!(matches!(
            ImageFormat::from_path(Path::new("figure.pptx")),
            Err(ExportError::UnsupportedFormat(ext)) if ext == "pptx"
        ));
        assert!(ImageFormat::from_path(Path::new("figure")).is_err());
    }

    #[test]
    fn padded_widens_degenerate_ranges() {
        let r = padded(5.0, 5.0, 0.05);
        assert!(r.start < 5.0 && r.end > 5.0);

        let r = padded(0.0, 0.0, 0.05);
        assert_eq!(r, -1.0..1.0);

        let r = padded(0.0, 100.0, 0.1);
        assert_eq!(r, -10.0..110.0);
    }
}
