//! Scroll Controller - Single owner of the stack's scroll position
//!
//! Binds the pan gesture to one scalar scroll position:
//! - Gesture begin cancels any in-flight decay so a new touch takes
//!   immediate authority
//! - Gesture change tracks the finger 1:1 with range clamping (content moves
//!   opposite to the finger, so the delta sign is inverted)
//! - Gesture end launches a clamped decay seeded with the release velocity
//!
//! The position is published through a `Signal<f32>` read by every item
//! reactor. Nothing else writes it.

use std::cell::Cell;
use std::rc::Rc;

use spark_signals::{signal, Signal};

use super::animate::AnimatedValue;
use super::gesture::GestureEvent;

// =============================================================================
// SCROLL CONTROLLER
// =============================================================================

pub struct ScrollController {
    position: AnimatedValue,
    position_signal: Signal<f32>,
    /// Untracked mirror, for readers that must not subscribe.
    position_cell: Rc<Cell<f32>>,
    max_scroll: f32,
}

impl ScrollController {
    /// Create a controller for the given scroll range. A `max_scroll` of
    /// zero keeps the pan gesture legal but positionally inert.
    pub fn new(max_scroll: f32) -> Self {
        Self {
            position: AnimatedValue::new(0.0),
            position_signal: signal(0.0),
            position_cell: Rc::new(Cell::new(0.0)),
            max_scroll,
        }
    }

    /// The reactive scroll position, for subscribers.
    pub fn position_signal(&self) -> Signal<f32> {
        self.position_signal.clone()
    }

    /// Untracked handle to the current position, for closures that read it
    /// without creating a dependency.
    pub(crate) fn position_cell(&self) -> Rc<Cell<f32>> {
        self.position_cell.clone()
    }

    /// Current scroll position.
    pub fn position(&self) -> f32 {
        self.position.get()
    }

    pub fn max_scroll(&self) -> f32 {
        self.max_scroll
    }

    /// Feed one recognized gesture event. Tap events are not ours and are
    /// ignored.
    pub fn handle(&mut self, event: GestureEvent, now_ms: u64) {
        match event {
            GestureEvent::PanBegan => {
                // New touch takes authority over any in-flight decay
                self.position.cancel();
                ctrace!("pan began at position {}", self.position.get());
            }
            GestureEvent::PanChanged { delta_y } => {
                let next = (self.position.get() - delta_y).clamp(0.0, self.max_scroll);
                self.position.set(next);
                self.publish();
            }
            GestureEvent::PanEnded { velocity_y } => {
                ctrace!("pan ended, velocity {velocity_y}");
                self.position.decay(-velocity_y, 0.0, self.max_scroll, now_ms);
            }
            GestureEvent::Tap { .. } => {}
        }
    }

    /// Advance the decay, publishing new positions. Returns `true` while
    /// the decay is still running.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let animating = self.position.tick(now_ms);
        self.publish();
        animating
    }

    fn publish(&self) {
        let value = self.position.get();
        self.position_cell.set(value);
        if self.position_signal.get() != value {
            self.position_signal.set(value);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn drag(controller: &mut ScrollController, deltas: &[f32], start_ms: u64) -> u64 {
        let mut now = start_ms;
        controller.handle(GestureEvent::PanBegan, now);
        for &d in deltas {
            now += 16;
            controller.handle(GestureEvent::PanChanged { delta_y: d }, now);
        }
        now
    }

    fn settle(controller: &mut ScrollController, mut now: u64) -> u64 {
        while controller.tick(now) {
            now += 16;
        }
        now
    }

    #[test]
    fn test_drag_moves_content_opposite_to_finger() {
        let mut c = ScrollController::new(102.0);
        drag(&mut c, &[-30.0], 0); // finger up => scroll increases
        assert_eq!(c.position(), 30.0);
    }

    #[test]
    fn test_drag_clamps_to_range() {
        let mut c = ScrollController::new(102.0);
        drag(&mut c, &[-500.0], 0);
        assert_eq!(c.position(), 102.0);

        drag(&mut c, &[500.0], 100);
        assert_eq!(c.position(), 0.0);
    }

    #[test]
    fn test_zero_range_pan_is_positional_noop() {
        let mut c = ScrollController::new(0.0);
        let now = drag(&mut c, &[-50.0, -50.0, 20.0], 0);
        assert_eq!(c.position(), 0.0);

        c.handle(GestureEvent::PanEnded { velocity_y: -3.0 }, now);
        settle(&mut c, now);
        assert_eq!(c.position(), 0.0);
    }

    #[test]
    fn test_release_decays_and_stays_in_range() {
        let mut c = ScrollController::new(102.0);
        let now = drag(&mut c, &[-10.0, -10.0], 0);
        c.handle(GestureEvent::PanEnded { velocity_y: -0.8 }, now);

        let mut t = now;
        while c.tick(t) {
            t += 16;
            assert!(c.position() >= 0.0 && c.position() <= 102.0);
        }
        // Fling had enough energy to reach the far bound and stop there
        assert_eq!(c.position(), 102.0);
    }

    #[test]
    fn test_new_touch_cancels_decay() {
        let mut c = ScrollController::new(102.0);
        let now = drag(&mut c, &[-10.0], 0);
        c.handle(GestureEvent::PanEnded { velocity_y: -0.8 }, now);
        c.tick(now + 16);
        let mid = c.position();
        assert!(mid < 102.0);

        // New touch: decay must stop dead
        c.handle(GestureEvent::PanBegan, now + 32);
        assert!(!c.tick(now + 500));
        assert_eq!(c.position(), mid);
    }

    #[test]
    fn test_signal_tracks_position() {
        let mut c = ScrollController::new(102.0);
        let sig = c.position_signal();
        drag(&mut c, &[-25.0], 0);
        assert_eq!(sig.get(), 25.0);
    }

    #[test]
    fn test_position_invariant_after_arbitrary_sequences() {
        let mut c = ScrollController::new(102.0);
        let mut now = 0;
        for (i, velocity) in [(-4.0f32), 2.5, -0.3, 9.0].iter().enumerate() {
            let deltas = [-37.0, 81.0, -12.0 * (i as f32 + 1.0)];
            now = drag(&mut c, &deltas, now);
            c.handle(GestureEvent::PanEnded { velocity_y: *velocity }, now);
            now = settle(&mut c, now);
            assert!(
                c.position() >= 0.0 && c.position() <= 102.0,
                "position {} escaped range",
                c.position()
            );
        }
    }
}
