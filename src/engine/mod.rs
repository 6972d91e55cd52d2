//! Stack Engine - Per-item reactors and the composed card stack
//!
//! - [`reactor`] - One translation reactor per item
//! - [`stack`] - Construction, pointer routing, and the tick loop

pub mod reactor;
pub mod stack;

pub use reactor::{idle_target, ItemPositionReactor};
pub use stack::{CardStack, StackGeometry, StackOptions};
