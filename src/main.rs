//! Five-in-a-row GUI
//!
//! Play against the computer or another player on a 13x13 board.

use fiveinrow::ui::FiveInRowApp;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), eframe::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 680.0])
            .with_min_inner_size([720.0, 560.0])
            .with_title("Five in a Row"),
        ..Default::default()
    };

    eframe::run_native(
        "fiveinrow",
        options,
        Box::new(|cc| Ok(Box::new(FiveInRowApp::new(cc)))),
    )
}
