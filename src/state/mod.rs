//! Reactive state for the card stack engine.
//!
//! - [`animate`] - Animated values (timed tweens, clamped decay)
//! - [`gesture`] - Pan/tap recognizer state machines
//! - [`scroll`] - The single scroll position and its pan binding
//! - [`activation`] - The active-item selector and its notifications

pub mod activation;
pub mod animate;
pub mod gesture;
pub mod scroll;
