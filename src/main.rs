mod app;
mod color;
mod state;
mod ui;

use std::path::PathBuf;

use app::DoeViewerApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    // Optional: a table to open on start-up.
    let startup_file = std::env::args_os().nth(1).map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "DOE Viewer – Synthetic Experiment Data",
        options,
        Box::new(move |_cc| {
            let mut app = DoeViewerApp::default();
            if let Some(path) = &startup_file {
                ui::panels::open_startup_file(&mut app.state, path);
            }
            Ok(Box::new(app))
        }),
    )
}
