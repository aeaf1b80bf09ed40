//! egui front end for the StepDots progress indicator.
//!
//! - **View**: [`StepDotsView`] measures, paints and routes presses
//! - **Painter**: [`EguiSurface`] draws widget primitives with `egui::Painter`
//! - **Colors**: conversions and a palette that follows egui visuals

pub mod colors;
pub mod painter;
pub mod step_dots;

pub use colors::{from_color32, palette_from_visuals, to_color32};
pub use painter::EguiSurface;
pub use step_dots::{StepDotsResponse, StepDotsView};
