//! The step dots widget.
//!
//! The widget owns its configuration, selection and labels. A host drives it
//! through three calls:
//! - `measure` with the host's width/height constraints
//! - `render` onto any [`DrawSurface`](crate::surface::DrawSurface)
//! - `on_pointer_down` for taps, which may notify a [`SelectionListener`]

mod listener;
mod step_dots;

pub use listener::SelectionListener;
pub use step_dots::StepDotsWidget;
