//! StepDots Render Library
//!
//! Vello drawing surface for the step dots widget, with Parley text shaping
//! and headless PNG export.

mod export;
mod renderer;
mod vello_impl;

pub use export::{HeadlessRenderer, PngRenderResult, encode_png, render_scene_to_png};
pub use renderer::{ExportOptions, RenderResult, RendererError};
pub use vello_impl::VelloSurface;
