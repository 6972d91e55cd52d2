//! # cardstack
//!
//! Reactive stacked-card interaction engine.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! fine-grained reactivity.
//!
//! ## Architecture
//!
//! A stack of heterogeneous-height items is laid out as an overlapping deck
//! (each card "peeks" above the next). One pan gesture drives a single
//! scroll position with inertial deceleration and boundary clamping; one tap
//! per item toggles the active-item selector. Every item owns a reactor that
//! recomputes its vertical translation whenever the scroll position or the
//! selector changes:
//!
//! ```text
//! pan gesture -> ScrollController.position -> per-item reactors -> translations
//! tap on item -> ActivationCoordinator.toggle -> reactors ease focal/off-screen
//!                                             -> notification channel -> app
//! ```
//!
//! The engine lives on the gesture/animation context; the activation
//! notification channel is the only crossing back to the application
//! context, and it never blocks.
//!
//! ## Modules
//!
//! - [`types`] - Item model ([`StackItem`]) and construction errors
//! - [`layout`] - Pure stack geometry (peek offsets, content extent, scroll range)
//! - [`state`] - Animated values, gesture recognizers, scroll, activation
//! - [`engine`] - Per-item reactors and the composed [`CardStack`]
//! - [`input`] - crossterm mouse events to pointer events

#[macro_use]
mod macros;

pub mod engine;
pub mod input;
pub mod layout;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::{ImageHandle, ItemKind, ItemWidth, Result, StackError, StackItem};

pub use layout::{base_offset, content_extent, max_scroll, CARD_PEEK, SCROLL_SLACK};

pub use state::{
    activation::{ActivationCoordinator, ActivationNotifications},
    animate::{AnimatedValue, Easing, Timing},
    gesture::{GestureArbiter, GestureEvent, PanRecognizer, Phase, TapRecognizer, TAP_SLOP},
    scroll::ScrollController,
};

pub use engine::{
    idle_target, CardStack, ItemPositionReactor, StackGeometry, StackOptions,
};

pub use input::{convert_mouse_event, route_pointer_event, PointerEvent};
