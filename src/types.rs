//! Core types for the card stack engine.
//!
//! A stack is built once from an ordered sequence of [`StackItem`]s and a
//! viewport height. Items are immutable after construction; replacing the
//! set means rebuilding the stack.

use thiserror::Error;

// =============================================================================
// ITEM MODEL
// =============================================================================

/// What kind of wallet item this is. Passes are typically taller than cards;
/// layout treats both uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Card,
    Pass,
}

/// Horizontal sizing for an item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ItemWidth {
    /// Span the full stack width.
    Fill,
    /// Fixed width in layout units.
    Fixed(f32),
}

/// Opaque reference to the item's artwork. The engine never dereferences it;
/// it is carried through so the rendering layer can resolve it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHandle(pub String);

impl ImageHandle {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }
}

/// One item in the stack. Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct StackItem {
    /// Unique id within the stack.
    pub id: String,
    pub kind: ItemKind,
    pub image: ImageHandle,
    /// Item height in layout units. Must be positive.
    pub height: f32,
    pub width: ItemWidth,
}

impl StackItem {
    /// Create a full-width item.
    pub fn new(id: impl Into<String>, kind: ItemKind, image: ImageHandle, height: f32) -> Self {
        Self {
            id: id.into(),
            kind,
            image,
            height,
            width: ItemWidth::Fill,
        }
    }

    /// Override the horizontal sizing.
    pub fn with_width(mut self, width: ItemWidth) -> Self {
        self.width = width;
        self
    }
}

// =============================================================================
// ERRORS
// =============================================================================

/// Construction contract violations. The engine fails fast on these; there
/// are no recoverable error paths once a stack is built.
#[derive(Error, Debug)]
pub enum StackError {
    #[error("item id must not be empty")]
    EmptyId,

    #[error("duplicate item id: {0}")]
    DuplicateId(String),

    #[error("item {id} has non-positive height {height}")]
    NonPositiveHeight { id: String, height: f32 },

    #[error("viewport height must be finite and non-negative, got {0}")]
    InvalidViewport(f32),
}

pub type Result<T> = std::result::Result<T, StackError>;

// =============================================================================
// TESTS
// =============================================================================
