use crate::{
    core::{geo::Point, map::Map},
    input::events::{EventHandled, InputEvent},
};

/// Pointer-drag bookkeeping, reset on pointer up or cancel
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragState {
    pub active: bool,
    pub last_pointer: Option<Point>,
}

/// Turns UI actions and pointer gestures into map operations.
///
/// Panning follows the pointer one-to-one and stops the moment the pointer
/// is released; there is no inertia.
#[derive(Debug)]
pub struct InputHandler {
    pub enabled: bool,
    drag: DragState,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            enabled: true,
            drag: DragState::default(),
        }
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn handle_event(&mut self, map: &mut Map, event: InputEvent) -> EventHandled {
        if !self.enabled {
            return EventHandled::NotHandled;
        }

        match event {
            InputEvent::PointerDown { position } => {
                self.drag = DragState {
                    active: true,
                    last_pointer: Some(position),
                };
            }
            InputEvent::PointerMove { position } => {
                let (true, Some(last)) = (self.drag.active, self.drag.last_pointer) else {
                    return EventHandled::NotHandled;
                };
                self.drag.last_pointer = Some(position);
                map.pan_by_pixels(position.subtract(&last));
            }
            InputEvent::PointerUp | InputEvent::PointerCancel => {
                self.drag = DragState::default();
            }
            InputEvent::ZoomIn => map.zoom_by(1),
            InputEvent::ZoomOut => map.zoom_by(-1),
            InputEvent::Locate => map.request_location(),
            InputEvent::Recenter => map.recenter(),
            InputEvent::Focus { id } => {
                if !map.focus(&id) {
                    return EventHandled::NotHandled;
                }
            }
            InputEvent::Resize {
                size,
                device_pixel_ratio,
            } => map.resize(size, device_pixel_ratio),
        }

        EventHandled::Handled
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::builder::MapBuilder;
    use crate::tiles::loader::test_support::MemoryFetcher;
    use std::sync::Arc;

    fn map() -> Map {
        MapBuilder::new()
            .fetcher(Arc::new(MemoryFetcher::default()))
            .build()
            .unwrap()
    }

    #[test]
    fn test_move_without_press_does_nothing() {
        let mut map = map();
        let mut handler = InputHandler::new();
        let before = map.view();

        let handled = handler.handle_event(
            &mut map,
            InputEvent::PointerMove {
                position: Point::new(10.0, 10.0),
            },
        );
        assert_eq!(handled, EventHandled::NotHandled);
        assert_eq!(map.view(), before);
    }

    #[test]
    fn test_drag_pans_then_stops() {
        let mut map = map();
        let mut handler = InputHandler::new();
        let start = map.center();

        handler.handle_event(&mut map, InputEvent::PointerDown { position: Point::new(100.0, 100.0) });
        handler.handle_event(&mut map, InputEvent::PointerMove { position: Point::new(100.0, 140.0) });
        let dragged = map.center();
        assert!(dragged.lat > start.lat);

        handler.handle_event(&mut map, InputEvent::PointerCancel);
        assert_eq!(handler.drag_state(), DragState::default());

        handler.handle_event(&mut map, InputEvent::PointerMove { position: Point::new(300.0, 300.0) });
        assert_eq!(map.center(), dragged);
    }

    #[test]
    fn test_drag_uses_delta_since_last_move() {
        let mut map = map();
        let mut handler = InputHandler::new();
        let zoom = map.zoom();
        let start_x = map.center().project(zoom).x;

        handler.handle_event(&mut map, InputEvent::PointerDown { position: Point::new(0.0, 0.0) });
        for x in [10.0, 20.0, 30.0] {
            handler.handle_event(&mut map, InputEvent::PointerMove { position: Point::new(x, 0.0) });
        }

        let moved = start_x - map.center().project(zoom).x;
        assert!((moved - 30.0 / 256.0).abs() < 1e-9);
    }

    #[test]
    fn test_buttons() {
        let mut map = map();
        let mut handler = InputHandler::new();

        handler.handle_event(&mut map, InputEvent::ZoomIn);
        handler.handle_event(&mut map, InputEvent::ZoomIn);
        handler.handle_event(&mut map, InputEvent::ZoomOut);
        assert_eq!(map.zoom(), 15);

        handler.handle_event(&mut map, InputEvent::Locate);
        assert_eq!(map.status().location, "Location: not supported");

        let handled = handler.handle_event(&mut map, InputEvent::Focus { id: "ghost".into() });
        assert_eq!(handled, EventHandled::NotHandled);
    }

    #[test]
    fn test_disabled_handler_ignores_events() {
        let mut map = map();
        let mut handler = InputHandler::new();
        handler.enabled = false;
        assert_eq!(
            handler.handle_event(&mut map, InputEvent::ZoomIn),
            EventHandled::NotHandled
        );
        assert_eq!(map.zoom(), 14);
    }
}
