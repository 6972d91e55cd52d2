//! Input Bridge - crossterm mouse events to engine pointer events
//!
//! Lets a terminal host drive the stack: left-button down/drag/up become the
//! engine's pointer stream, with terminal rows scaled to layout units.
//! Conversion and routing only; this module never owns the terminal.

use crossterm::event::{MouseButton, MouseEvent as CrosstermMouseEvent, MouseEventKind};

use crate::engine::CardStack;

// =============================================================================
// POINTER EVENTS
// =============================================================================

/// Default scale from terminal rows to layout units (an 800-unit viewport on
/// a 24-row terminal).
pub const DEFAULT_ROW_UNITS: f32 = 800.0 / 24.0;

/// One phase of the single pointer the engine understands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { y: f32 },
    Move { y: f32 },
    Up { y: f32 },
}

impl PointerEvent {
    pub fn y(self) -> f32 {
        match self {
            Self::Down { y } | Self::Move { y } | Self::Up { y } => y,
        }
    }
}

// =============================================================================
// CONVERSION
// =============================================================================

/// Convert a crossterm mouse event into a pointer event.
///
/// Only the left button participates; everything else (other buttons, plain
/// moves, wheel scroll) returns `None`.
pub fn convert_mouse_event(event: CrosstermMouseEvent, row_units: f32) -> Option<PointerEvent> {
    let y = event.row as f32 * row_units;
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(PointerEvent::Down { y }),
        MouseEventKind::Drag(MouseButton::Left) => Some(PointerEvent::Move { y }),
        MouseEventKind::Up(MouseButton::Left) => Some(PointerEvent::Up { y }),
        _ => None,
    }
}

/// Feed a pointer event into the stack.
pub fn route_pointer_event(stack: &mut CardStack, event: PointerEvent, now_ms: u64) {
    match event {
        PointerEvent::Down { y } => stack.pointer_down(y, now_ms),
        PointerEvent::Move { y } => stack.pointer_move(y, now_ms),
        PointerEvent::Up { y } => stack.pointer_up(y, now_ms),
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn mouse(kind: MouseEventKind, row: u16) -> CrosstermMouseEvent {
        CrosstermMouseEvent {
            kind,
            column: 0,
            row,
            modifiers: KeyModifiers::empty(),
        }
    }

    #[test]
    fn test_left_button_phases_convert() {
        let down = convert_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 6), 10.0);
        assert_eq!(down, Some(PointerEvent::Down { y: 60.0 }));

        let drag = convert_mouse_event(mouse(MouseEventKind::Drag(MouseButton::Left), 5), 10.0);
        assert_eq!(drag, Some(PointerEvent::Move { y: 50.0 }));

        let up = convert_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), 5), 10.0);
        assert_eq!(up, Some(PointerEvent::Up { y: 50.0 }));
    }

    #[test]
    fn test_other_events_ignored() {
        for kind in [
            MouseEventKind::Down(MouseButton::Right),
            MouseEventKind::Moved,
            MouseEventKind::ScrollUp,
            MouseEventKind::ScrollDown,
        ] {
            assert_eq!(convert_mouse_event(mouse(kind, 3), 10.0), None);
        }
    }

    #[test]
    fn test_route_drives_stack() {
        use crate::types::{ImageHandle, ItemKind, StackItem};

        let items = (0..10)
            .map(|i| {
                StackItem::new(
                    format!("card-{i}"),
                    ItemKind::Card,
                    ImageHandle::new("img"),
                    240.0,
                )
            })
            .collect();
        let (mut stack, _n) = CardStack::mount(items, 800.0).unwrap();

        route_pointer_event(&mut stack, PointerEvent::Down { y: 600.0 }, 0);
        route_pointer_event(&mut stack, PointerEvent::Move { y: 560.0 }, 16);
        assert_eq!(stack.scroll_position(), 40.0);
    }
}
