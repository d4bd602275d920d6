use eframe::egui;

use wandcut::app::WandcutApp;
use wandcut::{cli, logger};

fn main() -> Result<(), eframe::Error> {
    // -- CLI / headless mode ---------------------------------------------
    if cli::CliArgs::is_cli_mode() {
        use clap::Parser;
        let args = cli::CliArgs::parse();
        std::process::exit(cli::run(args));
    }

    // -- GUI mode --------------------------------------------------------

    // Initialize session log (overwrites previous session log)
    logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title("wandcut"),
        ..Default::default()
    };

    eframe::run_native(
        "wandcut",
        options,
        Box::new(|cc| Box::new(WandcutApp::new(cc))),
    )
}
