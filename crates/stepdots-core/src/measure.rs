//! Measurement constraints and text metrics.

use serde::{Deserialize, Serialize};

/// How a host constrains one dimension of the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeasureMode {
    /// The widget must be exactly this size.
    Exactly,
    /// The widget may be at most this size.
    AtMost,
    /// The widget may pick any size.
    Unspecified,
}

/// A constraint for one dimension: a mode and a size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasureSpec {
    pub mode: MeasureMode,
    pub size: f64,
}

impl MeasureSpec {
    pub fn exactly(size: f64) -> Self {
        Self {
            mode: MeasureMode::Exactly,
            size,
        }
    }

    pub fn at_most(size: f64) -> Self {
        Self {
            mode: MeasureMode::AtMost,
            size,
        }
    }

    pub fn unspecified() -> Self {
        Self {
            mode: MeasureMode::Unspecified,
            size: 0.0,
        }
    }

    /// Whether the size is dictated by the host.
    pub fn is_exact(&self) -> bool {
        self.mode == MeasureMode::Exactly
    }

    /// Resolve the final size given the widget's natural size.
    pub fn resolve(&self, natural: f64) -> f64 {
        match self.mode {
            MeasureMode::Exactly => self.size,
            MeasureMode::AtMost => natural.min(self.size),
            MeasureMode::Unspecified => natural,
        }
    }
}

impl Default for MeasureSpec {
    fn default() -> Self {
        Self::unspecified()
    }
}

/// Vertical font metrics relative to the baseline (y grows downwards).
///
/// `top` and `ascent` are negative, `descent` and `bottom` positive.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FontMetrics {
    pub top: f64,
    pub ascent: f64,
    pub descent: f64,
    pub bottom: f64,
}

impl FontMetrics {
    /// Total line height, `bottom - top`.
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// Source of font metrics for a given text size.
pub trait TextMetrics {
    fn font_metrics(&mut self, size: f32) -> FontMetrics;
}

/// Font metrics estimated from the text size alone.
///
/// Proportions follow a typical sans-serif face, good enough for a first
/// measure pass before a real text engine is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimatedMetrics;

impl TextMetrics for EstimatedMetrics {
    fn font_metrics(&mut self, size: f32) -> FontMetrics {
        let size = size as f64;
        FontMetrics {
            top: -1.06 * size,
            ascent: -0.93 * size,
            descent: 0.24 * size,
            bottom: 0.27 * size,
        }
    }
}
