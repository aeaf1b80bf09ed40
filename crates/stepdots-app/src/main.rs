//! Main application entry point.

use clap::Parser;
use stepdots_app::AppConfig;

fn main() {
    env_logger::init();
    log::info!("Starting StepDots");

    let config = AppConfig::parse();
    if let Err(e) = pollster::block_on(stepdots_app::run(&config)) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
