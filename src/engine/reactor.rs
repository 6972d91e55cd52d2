//! Item Position Reactor - One per item, owns that item's translation
//!
//! Each reactor continuously maintains a target vertical translation and
//! converges the rendered translation toward it:
//!
//! - While no item is active, the translation tracks the scroll position 1:1
//!   (no easing), clamped so an item can never rise past its per-index
//!   ceiling or sink below its resting offset.
//! - When the active selector changes, the reactor installs a timed ease-out:
//!   to the focal offset if this item activated, below the viewport
//!   (staggered by index) if another item did, or back to the idle formula
//!   when everything deactivated.
//!
//! Selector transitions are edge-triggered: an evaluation that sees the
//! selector unchanged performs no work, so unrelated updates never restart
//! an animation. A reactor writes only its own translation - never the
//! scroll position or the selector.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use spark_signals::{effect, Signal};

use crate::layout::base_offset;
use crate::state::animate::{AnimatedValue, Easing};

use super::stack::StackGeometry;

// =============================================================================
// TRANSITION CONSTANTS
// =============================================================================

/// Duration of the activation ease (item to focal, others off-screen).
pub const ACTIVATE_DURATION_MS: u64 = 500;

/// Duration of the ease back to stack positions on deactivation.
pub const DEACTIVATE_DURATION_MS: u64 = 450;

/// Non-active items park below this fraction of the viewport...
pub const OFFSCREEN_VIEWPORT_FACTOR: f32 = 0.75;

/// ...staggered by this much per index so they don't overlap identically.
pub const OFFSCREEN_STAGGER: f32 = 12.0;

// =============================================================================
// TARGET FORMULAS
// =============================================================================

/// Idle-branch translation for an item at the given scroll position.
///
/// The lower bound is the item's individual ceiling: it may rise at most
/// `index * item_height` above the stack top, so earlier items cannot be
/// scrolled past later ones.
pub fn idle_target(index: usize, item_height: f32, scroll: f32, peek: f32) -> f32 {
    let base = base_offset(index, peek);
    (base - scroll).clamp(-(index as f32) * item_height, base)
}

/// Parking position for a non-active item while another item is active.
pub fn offscreen_target(index: usize, viewport_height: f32) -> f32 {
    viewport_height * OFFSCREEN_VIEWPORT_FACTOR + index as f32 * OFFSCREEN_STAGGER
}

// =============================================================================
// REACTOR
// =============================================================================

pub struct ItemPositionReactor {
    index: usize,
    translation: Rc<RefCell<AnimatedValue>>,
    stop_follow: Option<Box<dyn FnOnce()>>,
    stop_transition: Option<Box<dyn FnOnce()>>,
}

impl ItemPositionReactor {
    /// Mount the reactor: install the scroll-follow effect and the
    /// edge-triggered selector effect.
    ///
    /// `scroll_now` and `selector_now` are untracked mirrors; reading them
    /// inside an effect does not subscribe it. `clock` supplies the start
    /// time for transition tweens.
    #[allow(clippy::too_many_arguments)]
    pub fn mount(
        index: usize,
        item_height: f32,
        geometry: &StackGeometry,
        scroll_signal: Signal<f32>,
        scroll_now: Rc<Cell<f32>>,
        selector_signal: Signal<Option<usize>>,
        selector_now: Rc<Cell<Option<usize>>>,
        clock: Rc<Cell<u64>>,
    ) -> Self {
        let peek = geometry.peek;
        let viewport_height = geometry.viewport_height;
        let focal_offset = geometry.focal_offset;

        let translation = Rc::new(RefCell::new(AnimatedValue::new(base_offset(index, peek))));

        // 1:1 follow of the scroll position while nothing is active. Runs
        // once at mount, pinning the translation to the resting offset.
        let stop_follow = {
            let translation = translation.clone();
            let selector_now = selector_now.clone();
            effect(move || {
                let scroll = scroll_signal.get();
                if selector_now.get().is_some() {
                    return;
                }
                translation
                    .borrow_mut()
                    .set(idle_target(index, item_height, scroll, peek));
            })
        };

        // Edge-triggered selector transitions.
        let stop_transition = {
            let translation = translation.clone();
            let mut prev: Option<Option<usize>> = None;
            effect(move || {
                let current = selector_signal.get();
                let first = prev.is_none();
                let unchanged = prev == Some(current);
                prev = Some(current);
                if first || unchanged {
                    return;
                }

                let now_ms = clock.get();
                let target = match current {
                    Some(active) if active == index => focal_offset,
                    Some(_) => offscreen_target(index, viewport_height),
                    None => idle_target(index, item_height, scroll_now.get(), peek),
                };
                let duration = if current.is_none() {
                    DEACTIVATE_DURATION_MS
                } else {
                    ACTIVATE_DURATION_MS
                };
                ctrace!("item {index} easing to {target} over {duration}ms");
                translation
                    .borrow_mut()
                    .animate_to(target, duration, Easing::OutQuad, now_ms);
            })
        };

        Self {
            index,
            translation,
            stop_follow: Some(Box::new(stop_follow)),
            stop_transition: Some(Box::new(stop_transition)),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Current rendered translation.
    pub fn translation(&self) -> f32 {
        self.translation.borrow().get()
    }

    pub fn is_animating(&self) -> bool {
        self.translation.borrow().is_animating()
    }

    /// Advance an in-flight transition. Returns `true` while animating.
    pub fn tick(&self, now_ms: u64) -> bool {
        self.translation.borrow_mut().tick(now_ms)
    }

    /// Tear down both effects.
    pub fn unmount(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        if let Some(stop) = self.stop_follow.take() {
            stop();
        }
        if let Some(stop) = self.stop_transition.take() {
            stop();
        }
    }
}

impl Drop for ItemPositionReactor {
    fn drop(&mut self) {
        self.stop();
    }
}

// =============================================================================
// TESTS
// =============================================================================
