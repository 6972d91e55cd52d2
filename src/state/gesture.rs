//! Gesture Recognizers - Pan and tap state machines
//!
//! Each recognizer is a small state machine (Idle -> Tracking -> Ended or
//! Cancelled) fed by raw pointer events. Tracking emits incremental deltas;
//! Ended emits a release velocity used to seed the scroll decay.
//!
//! The pan and tap recognizers coexist on one pointer stream: pan deltas
//! always flow, while a tap is recognized only when total travel stays within
//! a small slop threshold. A drag past the threshold suppresses the tap -
//! standard drag-vs-tap disambiguation.

use std::collections::VecDeque;

// =============================================================================
// GESTURE CONSTANTS
// =============================================================================

/// Maximum total travel (units) for a press to still count as a tap.
pub const TAP_SLOP: f32 = 10.0;

/// Window of recent samples used for release-velocity estimation.
pub const VELOCITY_WINDOW_MS: u64 = 100;

// =============================================================================
// EVENTS
// =============================================================================

/// Recognized gesture output, consumed by the stack engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    PanBegan,
    /// Incremental drag delta since the previous change event.
    PanChanged { delta_y: f32 },
    /// Release with estimated velocity in units per millisecond.
    PanEnded { velocity_y: f32 },
    /// A press that stayed within [`TAP_SLOP`]. Carries the press position.
    Tap { y: f32 },
}

/// Recognizer lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Tracking,
    Ended,
    Cancelled,
}

// =============================================================================
// PAN RECOGNIZER
// =============================================================================

/// Continuous pointer-drag recognizer.
///
/// Emits incremental deltas while tracking and a velocity estimate on
/// release, computed from the samples of the last [`VELOCITY_WINDOW_MS`].
#[derive(Debug)]
pub struct PanRecognizer {
    phase: Phase,
    last_y: f32,
    samples: VecDeque<(u64, f32)>,
}

impl PanRecognizer {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            last_y: 0.0,
            samples: VecDeque::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Pointer down. Always begins tracking.
    pub fn begin(&mut self, y: f32, now_ms: u64) -> GestureEvent {
        self.phase = Phase::Tracking;
        self.last_y = y;
        self.samples.clear();
        self.samples.push_back((now_ms, y));
        GestureEvent::PanBegan
    }

    /// Pointer move. Returns the incremental delta, or `None` when not
    /// tracking (stray moves are ignored).
    pub fn change(&mut self, y: f32, now_ms: u64) -> Option<GestureEvent> {
        if self.phase != Phase::Tracking {
            return None;
        }
        let delta_y = y - self.last_y;
        self.last_y = y;
        self.push_sample(now_ms, y);
        Some(GestureEvent::PanChanged { delta_y })
    }

    /// Pointer up. Ends tracking with a velocity estimate.
    pub fn end(&mut self, y: f32, now_ms: u64) -> Option<GestureEvent> {
        if self.phase != Phase::Tracking {
            return None;
        }
        self.phase = Phase::Ended;
        self.push_sample(now_ms, y);
        Some(GestureEvent::PanEnded {
            velocity_y: self.estimate_velocity(),
        })
    }

    /// Abort tracking without emitting a release.
    pub fn cancel(&mut self) {
        if self.phase == Phase::Tracking {
            self.phase = Phase::Cancelled;
        }
        self.samples.clear();
    }

    fn push_sample(&mut self, now_ms: u64, y: f32) {
        self.samples.push_back((now_ms, y));
        let cutoff = now_ms.saturating_sub(VELOCITY_WINDOW_MS);
        while let Some(&(t, _)) = self.samples.front() {
            if t < cutoff && self.samples.len() > 2 {
                self.samples.pop_front();
            } else {
                break;
            }
        }
    }

    /// Velocity over the retained sample window, in units per millisecond.
    fn estimate_velocity(&self) -> f32 {
        let (Some(&(t0, y0)), Some(&(t1, y1))) = (self.samples.front(), self.samples.back())
        else {
            return 0.0;
        };
        let dt = t1.saturating_sub(t0);
        if dt == 0 {
            return 0.0;
        }
        (y1 - y0) / dt as f32
    }
}

impl Default for PanRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TAP RECOGNIZER
// =============================================================================

/// Discrete tap recognizer. Recognizes on release when total travel stayed
/// within [`TAP_SLOP`]; any larger movement cancels it.
#[derive(Debug)]
pub struct TapRecognizer {
    phase: Phase,
    origin_y: f32,
    travel: f32,
}

impl TapRecognizer {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            origin_y: 0.0,
            travel: 0.0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn press(&mut self, y: f32) {
        self.phase = Phase::Tracking;
        self.origin_y = y;
        self.travel = 0.0;
    }

    pub fn moved(&mut self, y: f32) {
        if self.phase != Phase::Tracking {
            return;
        }
        self.travel = self.travel.max((y - self.origin_y).abs());
        if self.travel > TAP_SLOP {
            self.phase = Phase::Cancelled;
        }
    }

    /// Pointer up. Returns the tap event if the press qualified.
    pub fn release(&mut self) -> Option<GestureEvent> {
        match self.phase {
            Phase::Tracking => {
                self.phase = Phase::Ended;
                Some(GestureEvent::Tap { y: self.origin_y })
            }
            _ => {
                self.phase = Phase::Idle;
                None
            }
        }
    }
}

impl Default for TapRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// ARBITER
// =============================================================================

/// Feeds one pointer stream to both recognizers.
///
/// The pan never consumes taps: a press that moves negligibly still registers
/// as a tap, and a drag past [`TAP_SLOP`] suppresses it.
#[derive(Debug, Default)]
pub struct GestureArbiter {
    pan: PanRecognizer,
    tap: TapRecognizer,
}

impl GestureArbiter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pointer_down(&mut self, y: f32, now_ms: u64) -> GestureEvent {
        self.tap.press(y);
        self.pan.begin(y, now_ms)
    }

    pub fn pointer_move(&mut self, y: f32, now_ms: u64) -> Option<GestureEvent> {
        self.tap.moved(y);
        self.pan.change(y, now_ms)
    }

    /// Pointer up yields the pan release and, when the press qualified, the
    /// tap - in that order.
    pub fn pointer_up(&mut self, y: f32, now_ms: u64) -> Vec<GestureEvent> {
        let mut events = Vec::with_capacity(2);
        if let Some(end) = self.pan.end(y, now_ms) {
            events.push(end);
        }
        if let Some(tap) = self.tap.release() {
            events.push(tap);
        }
        events
    }
}

// =============================================================================
// TESTS
// =============================================================================
