//! Armory Glyphs Main Application
//! Main window with control panel and chart viewer.

use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use anyhow::Context;
use armory_glyphs::charts::{export_png, export_svg};
use armory_glyphs::data::{load_in_background, CsvSource, LoadResult};
use armory_glyphs::{ChartConfig, Encoding, Pipeline, PipelineError, RawRecord};
use egui::SidePanel;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, TryRecvError};
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq)]
enum ExportFormat {
    Svg,
    Png,
}

impl ExportFormat {
    fn extension(self) -> &'static str {
        match self {
            ExportFormat::Svg => "svg",
            ExportFormat::Png => "png",
        }
    }
}

/// Main application window.
pub struct ArmoryApp {
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
    records: Vec<RawRecord>,

    // Async CSV loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl ArmoryApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(),
            records: Vec::new(),
            load_rx: None,
            is_loading: false,
        }
    }

    /// Handle CSV file selection
    fn handle_browse_csv(&mut self) {
        if self.is_loading {
            return;
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.start_loading(path);
        }
    }

    fn handle_reload(&mut self) {
        if self.is_loading {
            return;
        }
        if let Some(path) = self.control_panel.csv_path.clone() {
            self.start_loading(path);
        }
    }

    fn start_loading(&mut self, path: PathBuf) {
        self.chart_viewer.clear();
        self.control_panel.export_enabled = false;
        self.control_panel.csv_path = Some(path.clone());
        self.control_panel.set_status("Loading CSV file...");
        self.is_loading = true;
        self.load_rx = Some(load_in_background(CsvSource::new(path)));
    }

    /// Check for CSV loading results
    fn check_load_results(&mut self) {
        let Some(rx) = self.load_rx.take() else {
            return;
        };

        match rx.try_recv() {
            Ok(Ok(records)) => {
                self.is_loading = false;
                self.records = records;
                self.encode();
            }
            Ok(Err(e)) => {
                self.is_loading = false;
                self.records.clear();
                error!(error = %e, "CSV load failed");
                self.control_panel.set_status(&format!("Error: {}", e));
            }
            Err(TryRecvError::Empty) => self.load_rx = Some(rx),
            Err(TryRecvError::Disconnected) => {
                self.is_loading = false;
                self.control_panel
                    .set_status("Error: loader stopped before sending a result");
            }
        }
    }

    /// Run the selected profile over the loaded records.
    fn encode(&mut self) {
        if self.control_panel.csv_path.is_none() {
            return;
        }

        let config = self.control_panel.current_config();
        match Pipeline::new(config).encode_records(&self.records) {
            Ok(encoding) => {
                self.control_panel.set_status(&encoded_status(&encoding));
                self.control_panel.export_enabled = true;
                self.chart_viewer.set_encoding(encoding);
            }
            Err(PipelineError::EmptyDataset { total }) => {
                self.chart_viewer.clear();
                self.control_panel.export_enabled = false;
                self.control_panel.set_status(&format!(
                    "No items with a numeric durability ({} rows read)",
                    total
                ));
            }
            Err(e) => {
                self.chart_viewer.clear();
                self.control_panel.export_enabled = false;
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }

    fn handle_load_profile(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Profile", &["json"])
            .pick_file()
        else {
            return;
        };

        match ChartConfig::from_json_file(&path) {
            Ok(config) => {
                info!(profile = %config.name, path = %path.display(), "Loaded profile");
                self.control_panel.add_profile(config);
                self.encode();
            }
            Err(e) => self.control_panel.set_status(&format!("Error: {}", e)),
        }
    }

    fn handle_export(&mut self, format: ExportFormat) {
        let Some(encoding) = self.chart_viewer.encoding() else {
            self.control_panel.set_status("No chart to export");
            return;
        };

        let extension = format.extension();
        let Some(path) = rfd::FileDialog::new()
            .add_filter(extension.to_uppercase(), &[extension])
            .set_file_name(format!("{}.{}", encoding.profile, extension))
            .save_file()
        else {
            return;
        };

        match write_export(encoding, &path, format) {
            Ok(()) => {
                self.control_panel
                    .set_status(&format!("Exported {}", path.display()));
                if let Err(e) = open::that(&path) {
                    error!(error = %e, "Could not open exported chart");
                }
            }
            Err(e) => {
                error!(error = ?e, "Export failed");
                self.control_panel.set_status(&format!("Error: {:#}", e));
            }
        }
    }
}

fn encoded_status(encoding: &Encoding) -> String {
    if encoding.dropped > 0 {
        format!(
            "Encoded {} items ({} without durability skipped)",
            encoding.marks.len(),
            encoding.dropped
        )
    } else {
        format!("Encoded {} items", encoding.marks.len())
    }
}

fn write_export(encoding: &Encoding, path: &Path, format: ExportFormat) -> anyhow::Result<()> {
    match format {
        ExportFormat::Svg => export_svg(encoding, path),
        ExportFormat::Png => export_png(encoding, path),
    }
    .with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), ?format, "Exported chart");
    Ok(())
}

impl eframe::App for ArmoryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                        ControlPanelAction::Reload => self.handle_reload(),
                        ControlPanelAction::ProfileChanged => {
                            if !self.is_loading {
                                self.encode();
                            }
                        }
                        ControlPanelAction::LoadProfile => self.handle_load_profile(),
                        ControlPanelAction::ExportSvg => self.handle_export(ExportFormat::Svg),
                        ControlPanelAction::ExportPng => self.handle_export(ExportFormat::Png),
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
