#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use clarity_timeline::{app::TimelineApp, logging};

fn main() -> eframe::Result<()> {
    // Without a platform data directory the app still runs, just unlogged.
    if let Err(e) = logging::init() {
        eprintln!("file logging unavailable: {e}");
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 760.0])
            .with_min_inner_size([800.0, 480.0])
            .with_title("Clarity Timeline"),
        ..Default::default()
    };

    eframe::run_native(
        "Clarity Timeline",
        options,
        Box::new(|cc| Ok(Box::new(TimelineApp::new(cc)))),
    )
}
