//! StepDots Core Library
//!
//! Platform-agnostic layout, selection and drawing logic for a step
//! indicator: a row of dots joined by segments with a label under each dot.
//! Hosts supply measurement constraints, a drawing surface and a color
//! resolver; the widget does the rest.

pub mod config;
pub mod display;
pub mod error;
pub mod geometry;
pub mod input;
pub mod measure;
pub mod palette;
pub mod surface;
pub mod widget;

pub use config::{Insets, StepDotsConfig};
pub use display::{DisplayItem, DisplayList};
pub use error::{StepDotsError, StepDotsResult};
pub use geometry::DotsGeometry;
pub use input::PointerEvent;
pub use measure::{EstimatedMetrics, FontMetrics, MeasureMode, MeasureSpec, TextMetrics};
pub use palette::{ColorResolver, ColorToken, Palette};
pub use surface::{DrawCommand, DrawSurface, RecordingSurface};
pub use widget::{SelectionListener, StepDotsWidget};
