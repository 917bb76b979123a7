//! Sunspot Dashboard Main Application
//! Main window with control panel and four-panel chart viewer.

use crate::charts::StaticChartRenderer;
use crate::config::DashboardSettings;
use crate::data::LoadCache;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use crate::pipeline::{self, DashboardError};
use egui::SidePanel;

/// Main application window.
pub struct SunspotDashboardApp {
    cache: LoadCache,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
}

impl SunspotDashboardApp {
    pub fn new(settings: DashboardSettings) -> Self {
        let cache = LoadCache::new(settings.loader_options());
        let mut app = Self {
            cache,
            control_panel: ControlPanel::new(settings),
            chart_viewer: ChartViewer::new(),
        };
        app.refresh();
        app
    }

    /// Load (through the cache) and render the current path and column.
    fn refresh(&mut self) {
        let path = self.control_panel.settings.csv_path.clone();
        let column = self.control_panel.settings.value_column.clone();

        match pipeline::run(&mut self.cache, &path, Some(&column)) {
            Ok(output) => {
                self.control_panel.sync_columns(&output.table);

                let starved = output.figure.starved_panels();
                if starved.is_empty() {
                    self.control_panel
                        .set_status(&format!("Rendered '{}' from {}", column, path));
                } else {
                    self.control_panel.set_status(&format!(
                        "Rendered '{}' ({} panel(s) without enough data)",
                        column,
                        starved.len()
                    ));
                }
                self.control_panel.export_enabled = true;
                self.chart_viewer.set_figure(output.figure);
            }
            Err(DashboardError::Load(e)) => {
                log::error!("Load failed: {}", e);
                self.control_panel.update_columns(Vec::new(), 0);
                self.control_panel.set_error("Error: could not load data");
                self.chart_viewer.set_error(e.to_string());
            }
            Err(DashboardError::Render(e)) => {
                log::error!("Render failed: {}", e);
                // The file itself loaded; offer its columns so another one can be picked
                if let Ok(table) = self.cache.load(&path) {
                    self.control_panel.sync_columns(&table);
                }
                self.control_panel.set_error("Error: could not render charts");
                self.chart_viewer.set_error(e.to_string());
            }
        }
    }

    /// Handle CSV file selection
    fn handle_browse_csv(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.control_panel.settings.csv_path = path.to_string_lossy().to_string();
            self.refresh();
        }
    }

    /// Drop the cached table for the current path and read it again
    fn handle_reload(&mut self) {
        let path = &self.control_panel.settings.csv_path;
        if self.cache.invalidate(path) {
            log::info!("Invalidated cached table for '{}'", path);
        }
        self.refresh();
    }

    /// Handle image export - render with plotters and open the result
    fn handle_export_image(&mut self) {
        let Some(figure) = self.chart_viewer.figure() else {
            self.control_panel.set_status("No chart to export");
            return;
        };

        // Ask user for output location
        let output_path = match rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .add_filter("SVG Image", &["svg"])
            .set_file_name("sunspot_dashboard.png")
            .save_file()
        {
            Some(path) => path,
            None => return, // User cancelled
        };

        let size = self.control_panel.settings.export_size();
        match StaticChartRenderer::export(figure, &output_path, size) {
            Ok(()) => {
                self.control_panel
                    .set_status(&format!("Exported {}", output_path.display()));
                if let Err(e) = open::that(&output_path) {
                    log::warn!("Could not open {}: {}", output_path.display(), e);
                }
            }
            Err(e) => {
                log::error!("Export failed: {}", e);
                self.control_panel.set_error(&format!("Export error: {}", e));
                // Figure stays valid; only the export failed
                self.control_panel.export_enabled = true;
            }
        }
    }
}

impl eframe::App for SunspotDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(330.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                        ControlPanelAction::Reload => self.handle_reload(),
                        ControlPanelAction::ColumnChanged => self.refresh(),
                        ControlPanelAction::ExportImage => self.handle_export_image(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}
