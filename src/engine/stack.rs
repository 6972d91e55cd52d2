//! Card Stack - Construction, pointer routing, and the tick loop
//!
//! Composes the whole engine: validates the item sequence, computes the
//! stack geometry, builds the scroll controller and the activation
//! coordinator, mounts one reactor per item, and routes raw pointer events
//! through the gesture arbiter.
//!
//! The stack lives on the gesture/animation context. The only thing that
//! crosses back to the application context is the activation notification
//! channel returned from [`CardStack::mount`].

use std::cell::Cell;
use std::collections::HashSet;
use std::rc::Rc;

use crate::layout::{self, CARD_PEEK, SCROLL_SLACK};
use crate::state::activation::{ActivationCoordinator, ActivationNotifications};
use crate::state::gesture::{GestureArbiter, GestureEvent};
use crate::state::scroll::ScrollController;
use crate::types::{Result, StackError, StackItem};

use super::reactor::ItemPositionReactor;

// =============================================================================
// GEOMETRY & OPTIONS
// =============================================================================

/// Focal offset an activated item eases to (top of the viewport).
pub const FOCAL_OFFSET: f32 = -80.0;

/// Focal offset for the compact layout variant (shallower header).
pub const FOCAL_OFFSET_COMPACT: f32 = -20.0;

/// Resolved geometry of a mounted stack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackGeometry {
    pub peek: f32,
    pub viewport_height: f32,
    pub content_extent: f32,
    pub max_scroll: f32,
    pub focal_offset: f32,
}

/// Tunables for [`CardStack::mount_with`]. The defaults are the reference
/// wallet layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackOptions {
    pub peek: f32,
    pub scroll_slack: f32,
    pub focal_offset: f32,
}

impl Default for StackOptions {
    fn default() -> Self {
        Self {
            peek: CARD_PEEK,
            scroll_slack: SCROLL_SLACK,
            focal_offset: FOCAL_OFFSET,
        }
    }
}

// =============================================================================
// CARD STACK
// =============================================================================

pub struct CardStack {
    items: Vec<StackItem>,
    geometry: StackGeometry,
    scroll: ScrollController,
    coordinator: ActivationCoordinator,
    arbiter: GestureArbiter,
    reactors: Vec<ItemPositionReactor>,
    /// Shared clock for transition tweens, updated on every entry point.
    clock: Rc<Cell<u64>>,
}

impl CardStack {
    /// Mount a stack with the reference layout options.
    ///
    /// Returns the stack and the control-thread end of the activation
    /// channel. Fails fast on contract violations: empty or duplicate ids,
    /// non-positive heights, a non-finite viewport.
    pub fn mount(
        items: Vec<StackItem>,
        viewport_height: f32,
    ) -> Result<(Self, ActivationNotifications)> {
        Self::mount_with(items, viewport_height, StackOptions::default())
    }

    /// Mount with explicit layout options.
    pub fn mount_with(
        items: Vec<StackItem>,
        viewport_height: f32,
        options: StackOptions,
    ) -> Result<(Self, ActivationNotifications)> {
        validate(&items, viewport_height)?;

        let content_extent = layout::content_extent(&items, options.peek);
        let geometry = StackGeometry {
            peek: options.peek,
            viewport_height,
            content_extent,
            max_scroll: layout::max_scroll(content_extent, viewport_height, options.scroll_slack),
            focal_offset: options.focal_offset,
        };
        cdebug!(
            "mounting stack: {} items, extent {}, max scroll {}",
            items.len(),
            geometry.content_extent,
            geometry.max_scroll
        );

        let scroll = ScrollController::new(geometry.max_scroll);
        let (coordinator, notifications) = ActivationCoordinator::new();
        let clock = Rc::new(Cell::new(0));

        let reactors = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                ItemPositionReactor::mount(
                    index,
                    item.height,
                    &geometry,
                    scroll.position_signal(),
                    scroll.position_cell(),
                    coordinator.selector_signal(),
                    coordinator.current_cell(),
                    clock.clone(),
                )
            })
            .collect();

        Ok((
            Self {
                items,
                geometry,
                scroll,
                coordinator,
                arbiter: GestureArbiter::new(),
                reactors,
                clock,
            },
            notifications,
        ))
    }

    // -------------------------------------------------------------------------
    // Pointer entry points
    // -------------------------------------------------------------------------

    pub fn pointer_down(&mut self, y: f32, now_ms: u64) {
        self.clock.set(now_ms);
        let event = self.arbiter.pointer_down(y, now_ms);
        self.scroll.handle(event, now_ms);
    }

    pub fn pointer_move(&mut self, y: f32, now_ms: u64) {
        self.clock.set(now_ms);
        if let Some(event) = self.arbiter.pointer_move(y, now_ms) {
            self.scroll.handle(event, now_ms);
        }
    }

    pub fn pointer_up(&mut self, y: f32, now_ms: u64) {
        self.clock.set(now_ms);
        for event in self.arbiter.pointer_up(y, now_ms) {
            match event {
                GestureEvent::Tap { y } => {
                    if let Some(index) = self.hit_test(y) {
                        self.coordinator.toggle(index);
                    }
                }
                other => self.scroll.handle(other, now_ms),
            }
        }
    }

    // -------------------------------------------------------------------------
    // Frame loop
    // -------------------------------------------------------------------------

    /// Advance the scroll decay and every in-flight transition. Returns
    /// `true` while anything is still animating.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        self.clock.set(now_ms);
        let mut animating = self.scroll.tick(now_ms);
        for reactor in &self.reactors {
            animating |= reactor.tick(now_ms);
        }
        animating
    }

    // -------------------------------------------------------------------------
    // Snapshots
    // -------------------------------------------------------------------------

    /// Current rendered translation per item, in sequence order.
    pub fn translations(&self) -> Vec<f32> {
        self.reactors.iter().map(|r| r.translation()).collect()
    }

    pub fn translation(&self, index: usize) -> Option<f32> {
        self.reactors.get(index).map(|r| r.translation())
    }

    pub fn active(&self) -> Option<usize> {
        self.coordinator.current()
    }

    pub fn scroll_position(&self) -> f32 {
        self.scroll.position()
    }

    pub fn geometry(&self) -> &StackGeometry {
        &self.geometry
    }

    pub fn items(&self) -> &[StackItem] {
        &self.items
    }

    /// Topmost item whose band contains `y`, at the current translations.
    /// Later items draw above earlier ones, so the highest index wins.
    pub fn hit_test(&self, y: f32) -> Option<usize> {
        self.items
            .iter()
            .enumerate()
            .rev()
            .find(|(index, item)| {
                let top = self.reactors[*index].translation();
                y >= top && y < top + item.height
            })
            .map(|(index, _)| index)
    }

    /// Tear down all effects. Dropping the stack does the same.
    pub fn unmount(self) {
        for reactor in self.reactors {
            reactor.unmount();
        }
    }
}

// =============================================================================
// VALIDATION
// =============================================================================

fn validate(items: &[StackItem], viewport_height: f32) -> Result<()> {
    if !viewport_height.is_finite() || viewport_height < 0.0 {
        return Err(StackError::InvalidViewport(viewport_height));
    }
    let mut seen = HashSet::new();
    for item in items {
        if item.id.is_empty() {
            return Err(StackError::EmptyId);
        }
        if !seen.insert(item.id.as_str()) {
            return Err(StackError::DuplicateId(item.id.clone()));
        }
        if !(item.height > 0.0) || !item.height.is_finite() {
            return Err(StackError::NonPositiveHeight {
                id: item.id.clone(),
                height: item.height,
            });
        }
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
