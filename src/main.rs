use log::{LevelFilter, error, info};
use spinwheel::app;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // --- Logging Setup ---
    env_logger::Builder::from_default_env()
        .filter_level(LevelFilter::Info)
        .filter_module("spinwheel::core::engine", LevelFilter::Debug)
        .filter_module("spinwheel::core::sheet", LevelFilter::Debug)
        .init();

    let opts = match app::parse_args(std::env::args().skip(1)) {
        Ok(opts) => opts,
        Err(msg) => {
            eprintln!("{}", msg);
            std::process::exit(2);
        }
    };

    info!("Spinwheel starting...");
    if let Err(e) = app::run(opts) {
        error!("Raffle aborted: {}", e);
        return Err(e);
    }
    info!("Raffle finished.");
    Ok(())
}
