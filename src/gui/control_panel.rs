//! Control Panel Widget
//! Left side panel: data source, chart profile and export.

use armory_glyphs::config::{ChartConfig, LayoutConfig};
use egui::{Color32, ComboBox, RichText};
use std::path::PathBuf;

/// Left side control panel with file selection and profile controls.
pub struct ControlPanel {
    pub csv_path: Option<PathBuf>,
    pub profiles: Vec<ChartConfig>,
    pub selected: usize,
    pub status: String,
    pub export_enabled: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            csv_path: None,
            profiles: ChartConfig::profiles(),
            selected: 0,
            status: "Ready".to_string(),
            export_enabled: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Profile the next encoding should use.
    pub fn current_config(&self) -> ChartConfig {
        self.profiles
            .get(self.selected)
            .cloned()
            .unwrap_or_default()
    }

    /// Add a profile loaded from disk and select it. A profile with the
    /// same name is replaced.
    pub fn add_profile(&mut self, config: ChartConfig) {
        match self.profiles.iter().position(|p| p.name == config.name) {
            Some(i) => {
                self.profiles[i] = config;
                self.selected = i;
            }
            None => {
                self.profiles.push(config);
                self.selected = self.profiles.len() - 1;
            }
        }
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🗡 Armory Glyphs")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Item durability at a glance")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== CSV File Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .csv_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file selected".to_string());

                    ui.label(RichText::new(&path_text).size(12.0).color(
                        if self.csv_path.is_some() {
                            Color32::WHITE
                        } else {
                            Color32::GRAY
                        },
                    ));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Browse").clicked() {
                            action = ControlPanelAction::BrowseCsv;
                        }
                        ui.add_enabled_ui(self.csv_path.is_some(), |ui| {
                            if ui.button("🔄").on_hover_text("Reload file").clicked() {
                                action = ControlPanelAction::Reload;
                            }
                        });
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Profile Section =====
        ui.label(RichText::new("⚙️ Chart Profile").size(14.0).strong());
        ui.add_space(5.0);

        let label_width = 110.0;
        let combo_width = 150.0;

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Profile:"));
            let selected_name = self
                .profiles
                .get(self.selected)
                .map(|p| p.name.clone())
                .unwrap_or_default();
            ComboBox::from_id_salt("profile")
                .width(combo_width)
                .selected_text(selected_name)
                .show_ui(ui, |ui| {
                    for (i, profile) in self.profiles.iter().enumerate() {
                        if ui
                            .selectable_label(self.selected == i, &profile.name)
                            .clicked()
                            && self.selected != i
                        {
                            self.selected = i;
                            action = ControlPanelAction::ProfileChanged;
                        }
                    }
                });
        });

        ui.add_space(5.0);

        if let Some(LayoutConfig::Grid { columns, .. }) = self
            .profiles
            .get_mut(self.selected)
            .map(|p| &mut p.layout)
        {
            ui.horizontal(|ui| {
                ui.add_sized([label_width, 20.0], egui::Label::new("Columns:"));
                if ui
                    .add(egui::DragValue::new(columns).range(1..=40))
                    .changed()
                {
                    action = ControlPanelAction::ProfileChanged;
                }
            });
            ui.add_space(5.0);
        }

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new(""));
            if ui.small_button("Load profile JSON…").clicked() {
                action = ControlPanelAction::LoadProfile;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.export_enabled, |ui| {
                let button = egui::Button::new(RichText::new("💾 Export SVG").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ExportSvg;
                }
                ui.add_space(4.0);
                let button = egui::Button::new(RichText::new("🖼 Export PNG").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ExportPng;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status Section =====
        ui.label(RichText::new("📊 Status").size(14.0).strong());
        ui.add_space(5.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Encoded") || self.status.contains("Exported") {
            Color32::from_rgb(40, 167, 69)
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
    ProfileChanged,
    LoadProfile,
    ExportSvg,
    ExportPng,
}
