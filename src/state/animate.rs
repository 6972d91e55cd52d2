//! Animated Values - Timed tweens and clamped decay
//!
//! Every animated scalar owns at most one trajectory. Installing a new
//! trajectory (or writing the value directly) tears down the previous one
//! atomically - the "last write wins" cancellation model. There is no
//! out-of-band cancel visible to callers beyond [`AnimatedValue::cancel`],
//! which the gesture path uses before 1:1 tracking.
//!
//! Time is an explicit `now_ms` parameter rather than a hidden clock so the
//! whole system is deterministic under test.

// =============================================================================
// ANIMATION CONSTANTS
// =============================================================================

/// Velocity decay rate per millisecond for inertial scrolling.
pub const DECAY_RATE: f32 = 0.998;

/// Velocity magnitude (units/ms) below which a decay is considered settled.
pub const REST_VELOCITY: f32 = 0.005;

// =============================================================================
// EASING
// =============================================================================

/// Easing curves for timed transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    /// Decelerating quadratic, no overshoot. The stack's activation curve.
    OutQuad,
}

impl Easing {
    pub fn sample(self, t: f32) -> f32 {
        match self {
            Self::Linear => t,
            Self::OutQuad => {
                let u = 1.0 - t;
                1.0 - u * u
            }
        }
    }
}

// =============================================================================
// TIMED TWEEN
// =============================================================================

/// A fixed-duration eased transition between two values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    pub from: f32,
    pub to: f32,
    pub start_ms: u64,
    pub duration_ms: u64,
    pub easing: Easing,
}

impl Timing {
    pub fn new(from: f32, to: f32, start_ms: u64, duration_ms: u64, easing: Easing) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms: duration_ms.max(1),
            easing,
        }
    }

    pub fn is_done(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.start_ms) >= self.duration_ms
    }

    pub fn sample(&self, now_ms: u64) -> f32 {
        let elapsed = now_ms.saturating_sub(self.start_ms);
        let t = (elapsed as f32 / self.duration_ms as f32).clamp(0.0, 1.0);
        self.from + (self.to - self.from) * self.easing.sample(t)
    }
}

// =============================================================================
// CLAMPED DECAY
// =============================================================================

/// A velocity-seeded deceleration whose trajectory is continuously bounded.
///
/// The simulation does not overshoot and rebound: it decelerates toward
/// whichever bound it reaches and stops there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decay {
    /// Current velocity in units per millisecond.
    pub velocity: f32,
    pub min: f32,
    pub max: f32,
    last_ms: u64,
}

impl Decay {
    pub fn new(velocity: f32, min: f32, max: f32, start_ms: u64) -> Self {
        Self {
            velocity,
            min,
            max,
            last_ms: start_ms,
        }
    }

    /// Advance the simulation to `now_ms`, returning the new position and
    /// whether the decay has settled.
    pub fn step(&mut self, position: f32, now_ms: u64) -> (f32, bool) {
        let dt = now_ms.saturating_sub(self.last_ms);
        self.last_ms = now_ms;
        if dt == 0 {
            return (position, self.velocity.abs() < REST_VELOCITY);
        }

        let next = position + self.velocity * dt as f32;
        self.velocity *= DECAY_RATE.powi(dt as i32);

        if next <= self.min {
            return (self.min, true);
        }
        if next >= self.max {
            return (self.max, true);
        }
        (next, self.velocity.abs() < REST_VELOCITY)
    }
}

// =============================================================================
// ANIMATED VALUE
// =============================================================================

/// The single in-flight trajectory of an [`AnimatedValue`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trajectory {
    Timing(Timing),
    Decay(Decay),
}

/// A scalar with at most one active trajectory converging toward a target.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatedValue {
    value: f32,
    trajectory: Option<Trajectory>,
}

impl AnimatedValue {
    pub fn new(value: f32) -> Self {
        Self {
            value,
            trajectory: None,
        }
    }

    /// Current rendered value.
    pub fn get(&self) -> f32 {
        self.value
    }

    /// Write the value directly, superseding any in-flight trajectory.
    pub fn set(&mut self, value: f32) {
        self.trajectory = None;
        self.value = value;
    }

    /// Tear down the current trajectory without moving the value. Required
    /// before gesture-driven 1:1 tracking so stale decay motion cannot fight
    /// the new input.
    pub fn cancel(&mut self) {
        self.trajectory = None;
    }

    pub fn is_animating(&self) -> bool {
        self.trajectory.is_some()
    }

    /// Target of the in-flight timing trajectory, if any.
    pub fn timing_target(&self) -> Option<f32> {
        match self.trajectory {
            Some(Trajectory::Timing(t)) => Some(t.to),
            _ => None,
        }
    }

    /// Install a timed ease toward `target`.
    ///
    /// Re-targeting to the value already in flight is a no-op, so redundant
    /// recomputations never restart an animation.
    pub fn animate_to(&mut self, target: f32, duration_ms: u64, easing: Easing, now_ms: u64) {
        if let Some(Trajectory::Timing(t)) = &self.trajectory {
            if t.to == target && t.easing == easing {
                return;
            }
        }
        if self.trajectory.is_none() && self.value == target {
            return;
        }
        self.trajectory = Some(Trajectory::Timing(Timing::new(
            self.value,
            target,
            now_ms,
            duration_ms,
            easing,
        )));
    }

    /// Install a clamped decay seeded with `velocity` (units/ms).
    pub fn decay(&mut self, velocity: f32, min: f32, max: f32, now_ms: u64) {
        self.trajectory = Some(Trajectory::Decay(Decay::new(velocity, min, max, now_ms)));
    }

    /// Advance the trajectory. Returns `true` while still animating.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        match &mut self.trajectory {
            None => false,
            Some(Trajectory::Timing(t)) => {
                self.value = t.sample(now_ms);
                if t.is_done(now_ms) {
                    self.trajectory = None;
                    false
                } else {
                    true
                }
            }
            Some(Trajectory::Decay(d)) => {
                let (next, done) = d.step(self.value, now_ms);
                self.value = next;
                if done {
                    self.trajectory = None;
                    false
                } else {
                    true
                }
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_endpoints() {
        for easing in [Easing::Linear, Easing::OutQuad] {
            assert_eq!(easing.sample(0.0), 0.0);
            assert_eq!(easing.sample(1.0), 1.0);
        }
    }

    #[test]
    fn test_out_quad_decelerates() {
        // First half of the curve covers more ground than the second
        let first = Easing::OutQuad.sample(0.5);
        assert!(first > 0.5);
    }

    #[test]
    fn test_timing_sample_bounds() {
        let t = Timing::new(0.0, 100.0, 1000, 500, Easing::Linear);
        assert_eq!(t.sample(500), 0.0); // before start
        assert_eq!(t.sample(1000), 0.0);
        assert_eq!(t.sample(1250), 50.0);
        assert_eq!(t.sample(1500), 100.0);
        assert_eq!(t.sample(9999), 100.0); // past end
        assert!(t.is_done(1500));
        assert!(!t.is_done(1499));
    }

    #[test]
    fn test_animate_to_reaches_target() {
        let mut v = AnimatedValue::new(0.0);
        v.animate_to(100.0, 500, Easing::OutQuad, 0);
        assert!(v.is_animating());

        let mut now = 0;
        while v.tick(now) {
            now += 16;
        }
        assert_eq!(v.get(), 100.0);
        assert!(!v.is_animating());
    }

    #[test]
    fn test_animate_to_same_target_is_noop() {
        let mut v = AnimatedValue::new(0.0);
        v.animate_to(100.0, 500, Easing::OutQuad, 0);
        v.tick(100);
        let mid = v.get();
        let trajectory_before = v.trajectory;

        // Re-installing the same target must not restart from `mid`
        v.animate_to(100.0, 500, Easing::OutQuad, 100);
        assert_eq!(v.trajectory, trajectory_before);
        assert_eq!(v.get(), mid);
    }

    #[test]
    fn test_animate_to_current_value_without_trajectory_is_noop() {
        let mut v = AnimatedValue::new(42.0);
        v.animate_to(42.0, 500, Easing::OutQuad, 0);
        assert!(!v.is_animating());
    }

    #[test]
    fn test_set_supersedes_trajectory() {
        let mut v = AnimatedValue::new(0.0);
        v.animate_to(100.0, 500, Easing::OutQuad, 0);
        v.set(7.0);
        assert!(!v.is_animating());
        assert_eq!(v.get(), 7.0);
        assert!(!v.tick(250));
        assert_eq!(v.get(), 7.0);
    }

    #[test]
    fn test_retarget_tears_down_previous_trajectory() {
        let mut v = AnimatedValue::new(0.0);
        v.animate_to(100.0, 500, Easing::OutQuad, 0);
        v.tick(100);
        v.animate_to(-50.0, 500, Easing::OutQuad, 100);

        let mut now = 100;
        while v.tick(now) {
            now += 16;
        }
        assert_eq!(v.get(), -50.0);
    }

    #[test]
    fn test_decay_settles_within_bounds() {
        let mut v = AnimatedValue::new(0.0);
        // 1.2 units/ms downward-content velocity
        v.decay(1.2, 0.0, 102.0, 0);

        let mut now = 0;
        while v.tick(now) {
            now += 16;
            assert!(v.get() >= 0.0 && v.get() <= 102.0);
        }
        assert!(v.get() >= 0.0 && v.get() <= 102.0);
    }

    #[test]
    fn test_decay_stops_at_bound_without_rebound() {
        let mut v = AnimatedValue::new(50.0);
        v.decay(10.0, 0.0, 102.0, 0); // strong fling upward-content

        let mut now = 0;
        while v.tick(now) {
            now += 16;
        }
        assert_eq!(v.get(), 102.0);
    }

    #[test]
    fn test_decay_negative_velocity_stops_at_lower_bound() {
        let mut v = AnimatedValue::new(50.0);
        v.decay(-10.0, 0.0, 102.0, 0);

        let mut now = 0;
        while v.tick(now) {
            now += 16;
        }
        assert_eq!(v.get(), 0.0);
    }

    #[test]
    fn test_decay_tiny_velocity_rests_immediately() {
        let mut v = AnimatedValue::new(50.0);
        v.decay(0.001, 0.0, 102.0, 0);
        assert!(!v.tick(16));
        assert!((v.get() - 50.0).abs() < 0.1);
    }
}
