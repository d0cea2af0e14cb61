//! Armory Glyphs - item table to glyph chart viewer
//!
//! Desktop front end: pick a CSV of items, choose a chart profile, hover
//! glyphs for details and export the chart as SVG or PNG.

mod gui;

use armory_glyphs::logging::init_logging;
use eframe::egui;
use gui::ArmoryApp;

fn main() -> eframe::Result<()> {
    init_logging();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1000.0, 700.0])
            .with_title("Armory Glyphs"),
        ..Default::default()
    };

    eframe::run_native(
        "Armory Glyphs",
        options,
        Box::new(|cc| Ok(Box::new(ArmoryApp::new(cc)))),
    )
}
