//! Render errors and export options.

use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Initialization failed: {0}")]
    InitFailed(String),
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Surface error: {0}")]
    Surface(String),
    #[error("PNG encoding failed: {0}")]
    Encode(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Options for rendering a widget offscreen.
#[derive(Debug, Clone, Copy)]
pub struct ExportOptions {
    /// Resolution multiplier (1 = 1x, 2 = 2x, ...).
    pub scale: f64,
    /// Color the target is cleared to before the widget paints.
    pub base_color: Color,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            base_color: Color::WHITE,
        }
    }
}

impl ExportOptions {
    /// Create export options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the resolution multiplier.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Set the clear color.
    pub fn with_base_color(mut self, color: Color) -> Self {
        self.base_color = color;
        self
    }

    /// Pixel dimensions of a target holding `width` x `height` logical pixels.
    pub fn target_size(&self, width: f64, height: f64) -> (u32, u32) {
        let scale = if self.scale.is_finite() && self.scale > 0.0 { self.scale } else { 1.0 };
        (
            (width * scale).ceil().max(0.0) as u32,
            (height * scale).ceil().max(0.0) as u32,
        )
    }
}
