//! Control Panel Widget
//! Left side panel with data source, column selection and export controls.

use crate::config::DashboardSettings;
use crate::data::SunspotTable;
use egui::{Color32, ComboBox, RichText};
use std::path::Path;

/// Left side control panel.
pub struct ControlPanel {
    pub settings: DashboardSettings,
    pub columns: Vec<String>,
    pub row_count: usize,
    pub status: String,
    pub has_error: bool,
    pub export_enabled: bool,
}

impl ControlPanel {
    pub fn new(settings: DashboardSettings) -> Self {
        Self {
            settings,
            columns: Vec::new(),
            row_count: 0,
            status: "Ready".to_string(),
            has_error: false,
            export_enabled: false,
        }
    }

    /// Update available value columns after a load
    pub fn update_columns(&mut self, columns: Vec<String>, row_count: usize) {
        self.columns = columns;
        self.row_count = row_count;
    }

    /// Offer the value columns of `table`, the most recently loaded file.
    pub fn sync_columns(&mut self, table: &SunspotTable) {
        self.update_columns(table.numeric_columns(), table.height());
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
        self.has_error = false;
    }

    pub fn set_error(&mut self, status: &str) {
        self.status = status.to_string();
        self.has_error = true;
        self.export_enabled = false;
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🌞 Sunspot Dashboard")
                    .size(22.0)
                    .color(Color32::from_rgb(243, 156, 18)),
            );
            ui.label(
                RichText::new("Yearly sunspot activity")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = Path::new(&self.settings.csv_path)
                        .file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| self.settings.csv_path.clone());

                    ui.label(RichText::new(&path_text).size(12.0))
                        .on_hover_text(&self.settings.csv_path);

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Browse").clicked() {
                            action = ControlPanelAction::BrowseCsv;
                        }
                    });
                });

                if self.row_count > 0 {
                    ui.label(
                        RichText::new(format!("{} rows", self.row_count))
                            .size(11.0)
                            .color(Color32::GRAY),
                    );
                }
            });

        ui.add_space(8.0);
        ui.vertical_centered(|ui| {
            if ui
                .button("🔄 Reload")
                .on_hover_text("Drop the cached table and read the file again")
                .clicked()
            {
                action = ControlPanelAction::Reload;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Column Section =====
        ui.label(RichText::new("🔧 Plotted Column").size(14.0).strong());
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            ui.add_sized([90.0, 20.0], egui::Label::new("Value Column:"));
            ComboBox::from_id_salt("value_col")
                .width(160.0)
                .selected_text(&self.settings.value_column)
                .show_ui(ui, |ui| {
                    for col in &self.columns {
                        if ui
                            .selectable_label(self.settings.value_column == *col, col)
                            .clicked()
                            && self.settings.value_column != *col
                        {
                            self.settings.value_column = col.clone();
                            action = ControlPanelAction::ColumnChanged;
                        }
                    }
                });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Export =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.export_enabled, |ui| {
                let button = egui::Button::new(RichText::new("🖼 Export Image").size(14.0))
                    .min_size(egui::vec2(170.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ExportImage;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status =====
        let status_color = if self.has_error {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
    Reload,
    ColumnChanged,
    ExportImage,
}
