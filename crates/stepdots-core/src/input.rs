//! Pointer events delivered by the host.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Pointer event type for unified mouse/touch handling.
///
/// Positions are in widget-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point },
    Up { position: Point },
    Move { position: Point },
}

impl PointerEvent {
    /// Position of the event.
    pub fn position(&self) -> Point {
        match self {
            PointerEvent::Down { position }
            | PointerEvent::Up { position }
            | PointerEvent::Move { position } => *position,
        }
    }
}
