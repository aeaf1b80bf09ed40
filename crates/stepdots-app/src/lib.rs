//! StepDots command-line application.
//!
//! Renders a step indicator to a PNG file without opening a window.

pub mod app;
pub mod cli;

pub use app::{AppError, AppResult, build_widget, load_config, run};
pub use cli::AppConfig;
