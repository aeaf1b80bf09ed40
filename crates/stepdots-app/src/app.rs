//! Headless rendering pipeline: load config, build widget, write PNG.

use std::fs;
use std::path::Path;

use stepdots_core::config::StepDotsConfig;
use stepdots_core::error::StepDotsError;
use stepdots_core::measure::MeasureSpec;
use stepdots_core::widget::StepDotsWidget;
use stepdots_render::{ExportOptions, HeadlessRenderer, RendererError, VelloSurface};
use thiserror::Error;

use crate::cli::AppConfig;

/// Errors that end the application.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Widget(#[from] StepDotsError),
    #[error(transparent)]
    Render(#[from] RendererError),
}

pub type AppResult<T> = Result<T, AppError>;

fn read_file(path: &Path) -> AppResult<Vec<u8>> {
    fs::read(path).map_err(|source| AppError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Load the widget configuration, falling back to defaults.
pub fn load_config(path: Option<&Path>) -> AppResult<StepDotsConfig> {
    let Some(path) = path else {
        return Ok(StepDotsConfig::default());
    };
    let bytes = read_file(path)?;
    let json = String::from_utf8_lossy(&bytes);
    let config = StepDotsConfig::from_json(&json)?;
    log::info!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Build the widget and apply command-line overrides.
pub fn build_widget(app: &AppConfig) -> AppResult<StepDotsWidget> {
    let config = load_config(app.config_path.as_deref())?;
    let mut widget = StepDotsWidget::new(config)?;
    if let Some(labels) = &app.labels {
        widget.set_content(labels.clone())?;
    }
    if let Some(position) = app.select {
        widget.set_position(position)?;
    }
    Ok(widget)
}

fn size_spec(size: Option<f64>) -> MeasureSpec {
    size.map(MeasureSpec::exactly).unwrap_or_default()
}

/// Render the configured widget to `app.output`.
pub async fn run(app: &AppConfig) -> AppResult<()> {
    let mut widget = build_widget(app)?;

    let mut surface = VelloSurface::new();
    if let Some(font) = &app.font {
        let data = read_file(font)?;
        match surface.register_font(data) {
            Some(family) => log::info!("Using font family '{}'", family),
            None => log::warn!("No usable font in {}, using system fonts", font.display()),
        }
    }

    let size = widget.measure(size_spec(app.width), size_spec(app.height), &mut surface);
    log::info!(
        "Rendering {} dots at {}x{}, position {}",
        widget.dots_num(),
        size.width,
        size.height,
        widget.position()
    );

    let mut renderer = HeadlessRenderer::new().await?;
    let palette = *widget.palette();
    let options = ExportOptions::new()
        .with_scale(app.scale)
        .with_base_color(palette.background);
    let mut png = renderer.render_widget_png(&mut surface, &mut widget, &palette, options)?;

    // Label heights from real fonts can differ from the estimate
    if widget.needs_remeasure() {
        log::debug!("Text height changed during render, measuring again");
        widget.measure(size_spec(app.width), size_spec(app.height), &mut surface);
        png = renderer.render_widget_png(&mut surface, &mut widget, &palette, options)?;
    }

    fs::write(&app.output, &png).map_err(|source| AppError::Io {
        path: app.output.display().to_string(),
        source,
    })?;
    log::info!("Wrote {} ({} bytes)", app.output.display(), png.len());
    Ok(())
}
