use crate::core::geo::Point;
use serde::{Deserialize, Serialize};

/// Input events that the page or a UI backend feeds to the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Pointer pressed on the canvas
    PointerDown { position: Point },
    /// Pointer moved over the canvas
    PointerMove { position: Point },
    /// Pointer released
    PointerUp,
    /// The platform took the pointer away
    PointerCancel,
    /// Zoom buttons
    ZoomIn,
    ZoomOut,
    /// Locate button
    Locate,
    /// Recenter button
    Recenter,
    /// "Focus on map" on an animal row
    Focus { id: String },
    /// Canvas size changed, in CSS pixels
    Resize { size: Point, device_pixel_ratio: f64 },
}

/// Whether an event was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventHandled {
    Handled,
    NotHandled,
}

impl InputEvent {
    /// Gets the pointer position associated with this event, if any
    pub fn position(&self) -> Option<Point> {
        match self {
            InputEvent::PointerDown { position } | InputEvent::PointerMove { position } => {
                Some(*position)
            }
            _ => None,
        }
    }

    /// Checks if this is a canvas pointer event
    pub fn is_pointer_event(&self) -> bool {
        matches!(
            self,
            InputEvent::PointerDown { .. }
                | InputEvent::PointerMove { .. }
                | InputEvent::PointerUp
                | InputEvent::PointerCancel
        )
    }
}
