//! Chart Viewer Widget
//! Central panel showing the 2x2 figure, or an error banner in its place.

use crate::charts::{ChartPlotter, FourPanelFigure};
use egui::{Color32, RichText};

const PANEL_SPACING: f32 = 12.0;
const TITLE_ROOM: f32 = 30.0;
const MIN_PLOT_HEIGHT: f32 = 180.0;

/// What the central panel currently shows.
#[derive(Default)]
pub enum ViewerContent {
    #[default]
    Empty,
    Figure(Box<FourPanelFigure>),
    Error(String),
}

/// Central figure display.
#[derive(Default)]
pub struct ChartViewer {
    pub content: ViewerContent,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_figure(&mut self, figure: FourPanelFigure) {
        self.content = ViewerContent::Figure(Box::new(figure));
    }

    /// Replace any figure with an error message.
    pub fn set_error(&mut self, message: String) {
        self.content = ViewerContent::Error(message);
    }

    pub fn figure(&self) -> Option<&FourPanelFigure> {
        match &self.content {
            ViewerContent::Figure(figure) => Some(figure.as_ref()),
            _ => None,
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        match &self.content {
            ViewerContent::Empty => {
                ui.centered_and_justified(|ui| {
                    ui.label(RichText::new("No Data").size(20.0));
                });
            }
            ViewerContent::Error(message) => Self::draw_error_banner(ui, message),
            ViewerContent::Figure(figure) => Self::draw_figure(ui, figure),
        }
    }

    fn draw_error_banner(ui: &mut egui::Ui, message: &str) {
        let color = Color32::from_rgb(220, 53, 69);
        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(2.0, color))
            .fill(color.gamma_multiply(0.1))
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new("⚠ Error").size(18.0).strong().color(color));
                ui.add_space(4.0);
                ui.label(RichText::new(message).size(14.0));
            });
    }

    fn draw_figure(ui: &mut egui::Ui, figure: &FourPanelFigure) {
        ui.vertical_centered(|ui| {
            ui.label(RichText::new(&figure.title).size(20.0).strong());
            ui.label(
                RichText::new(format!("Column: {}", figure.column))
                    .size(12.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(PANEL_SPACING);

        let plot_height =
            ((ui.available_height() - 2.0 * TITLE_ROOM - 2.0 * PANEL_SPACING) / 2.0)
                .max(MIN_PLOT_HEIGHT);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.columns(2, |cols| {
                    ChartPlotter::draw_time_series(&mut cols[0], &figure.time_series, plot_height);
                    ChartPlotter::draw_distribution(&mut cols[1], &figure.distribution, plot_height);
                });
                ui.add_space(PANEL_SPACING);
                ui.columns(2, |cols| {
                    ChartPlotter::draw_boxplot(&mut cols[0], &figure.boxplot, plot_height);
                    ChartPlotter::draw_trend(&mut cols[1], &figure.trend, plot_height);
                });
            });
    }
}
