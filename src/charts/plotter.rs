//! Chart Plotter Module
//! Interactive versions of the four panels using egui_plot.

use crate::charts::figure::{
    decimal_year, BoxplotPanel, DistributionPanel, PanelLabels, TimeSeriesPanel, TrendPanel,
    BOXPLOT_LABELS, DISTRIBUTION_LABELS, TIME_SERIES_LABELS, TREND_LABELS,
};
use crate::stats::StatsError;
use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Line, Plot, PlotPoints, Points};

/// Panel colors
pub const SERIES_COLOR: Color32 = Color32::from_rgb(31, 119, 180); // Blue
pub const HISTOGRAM_COLOR: Color32 = Color32::from_rgb(128, 128, 128); // Gray
pub const FIT_COLOR: Color32 = Color32::from_rgb(214, 39, 40); // Red
pub const SCATTER_COLOR: Color32 = Color32::from_rgb(135, 206, 235); // Sky blue
pub const MEDIAN_COLOR: Color32 = Color32::from_rgb(255, 127, 14); // Orange
pub const WARNING_COLOR: Color32 = Color32::from_rgb(220, 53, 69);

/// Creates the dashboard panels using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Panel title in the card header.
    fn draw_title(ui: &mut egui::Ui, labels: &PanelLabels) {
        ui.label(RichText::new(labels.title).size(15.0).strong());
    }

    /// Panel A: line per run of present values.
    pub fn draw_time_series(ui: &mut egui::Ui, panel: &TimeSeriesPanel, height: f32) {
        let labels = &TIME_SERIES_LABELS;
        Self::draw_title(ui, labels);

        Plot::new("time_series")
            .height(height)
            .x_axis_label(labels.x_label)
            .y_axis_label(labels.y_label)
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                for segment in panel.segments() {
                    let points: PlotPoints = segment
                        .iter()
                        .map(|&(date, v)| [decimal_year(date), v])
                        .collect();
                    plot_ui.line(Line::new(points).color(SERIES_COLOR).width(1.2));
                }
            });
    }

    /// Panel B: density histogram with KDE overlay.
    pub fn draw_distribution(
        ui: &mut egui::Ui,
        panel: &Result<DistributionPanel, StatsError>,
        height: f32,
    ) {
        let labels = &DISTRIBUTION_LABELS;
        let panel = match panel {
            Ok(panel) => panel,
            Err(reason) => return Self::draw_starved(ui, labels, reason, height),
        };
        Self::draw_title(ui, labels);

        let width = panel.histogram.bin_width();
        let bars: Vec<Bar> = panel
            .histogram
            .densities
            .iter()
            .zip(panel.histogram.edges.iter())
            .map(|(&d, &left)| Bar::new(left + width / 2.0, d).width(width))
            .collect();

        Plot::new("distribution")
            .height(height)
            .x_axis_label(labels.x_label)
            .y_axis_label(labels.y_label)
            .legend(Legend::default())
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .color(HISTOGRAM_COLOR.gamma_multiply(0.6))
                        .name("Histogram"),
                );

                let curve: PlotPoints = panel
                    .kde
                    .xs
                    .iter()
                    .zip(panel.kde.density.iter())
                    .map(|(&x, &y)| [x, y])
                    .collect();
                plot_ui.line(Line::new(curve).color(FIT_COLOR).width(2.0).name("Density"));
            });
    }

    /// Panel C: horizontal box with outlier points.
    pub fn draw_boxplot(ui: &mut egui::Ui, panel: &Result<BoxplotPanel, StatsError>, height: f32) {
        let labels = &BOXPLOT_LABELS;
        let panel = match panel {
            Ok(panel) => panel,
            Err(reason) => return Self::draw_starved(ui, labels, reason, height),
        };
        Self::draw_title(ui, labels);

        let s = &panel.summary;
        let box_elem = BoxElem::new(
            0.0,
            BoxSpread::new(s.whisker_low, s.q1, s.median, s.q3, s.whisker_high),
        )
        .box_width(0.5)
        .whisker_width(0.25)
        .fill(SERIES_COLOR.gamma_multiply(0.2))
        .stroke(egui::Stroke::new(1.5, SERIES_COLOR))
        .name(format!("n = {}", s.count));

        let outliers: PlotPoints = s.outliers.iter().map(|&v| [v, 0.0]).collect();

        Plot::new("boxplot")
            .height(height)
            .x_axis_label(labels.x_label)
            .show_y(false)
            .include_y(-1.0)
            .include_y(1.0)
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                plot_ui.box_plot(BoxPlot::new(vec![box_elem]).horizontal().name("1900-2000"));
                plot_ui.points(
                    Points::new(outliers)
                        .radius(3.0)
                        .color(MEDIAN_COLOR)
                        .name("Outliers"),
                );
            });
    }

    /// Panel D: scatter plus least-squares line.
    pub fn draw_trend(ui: &mut egui::Ui, panel: &Result<TrendPanel, StatsError>, height: f32) {
        let labels = &TREND_LABELS;
        let panel = match panel {
            Ok(panel) => panel,
            Err(reason) => return Self::draw_starved(ui, labels, reason, height),
        };
        Self::draw_title(ui, labels);

        let scatter: PlotPoints = panel
            .years
            .iter()
            .zip(panel.values.iter())
            .map(|(&x, &y)| [x, y])
            .collect();
        let line: PlotPoints = panel
            .years
            .iter()
            .zip(panel.fitted.iter())
            .map(|(&x, &y)| [x, y])
            .collect();

        Plot::new("trend")
            .height(height)
            .x_axis_label(labels.x_label)
            .y_axis_label(labels.y_label)
            .legend(Legend::default())
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                plot_ui.points(
                    Points::new(scatter)
                        .radius(2.0)
                        .color(SCATTER_COLOR.gamma_multiply(0.7))
                        .name("Data Points"),
                );
                plot_ui.line(
                    Line::new(line)
                        .color(FIT_COLOR)
                        .width(2.0)
                        .name(format!(
                            "Trend Line (slope {:.4}/yr)",
                            panel.fit.slope
                        )),
                );
            });
    }

    /// Title plus an "insufficient data" note in place of the chart.
    fn draw_starved(ui: &mut egui::Ui, labels: &PanelLabels, reason: &StatsError, height: f32) {
        Self::draw_title(ui, labels);
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.set_min_height(height - 16.0);
                ui.centered_and_justified(|ui| {
                    ui.label(
                        RichText::new(format!("Insufficient data: {}", reason))
                            .size(13.0)
                            .color(WARNING_COLOR),
                    );
                });
            });
    }
}
