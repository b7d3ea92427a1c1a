//! Error types for pattern construction and dispatch.

use thiserror::Error;

/// Errors reported by the contour crate.
///
/// Structural mismatch is never an error: a pattern that does not match a
/// value yields `matched: false` on [`crate::MatchResult`]. The variants
/// here cover malformed construction and unhandled dispatch only.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A caller-chosen selection name collides with the reserved anonymous key.
    #[error("selection name '{name}' is reserved for anonymous selections")]
    ReservedSelectionName {
        /// The rejected name.
        name: String,
    },

    /// Value nesting exceeded the conversion depth limit.
    #[error("value nesting depth exceeded: {current} levels, limit: {limit}")]
    DepthExceeded {
        /// Current nesting depth.
        current: usize,
        /// Maximum allowed depth.
        limit: usize,
    },

    /// No case arm matched the dispatched value.
    #[error("no case arm matched a value of kind {value_kind}")]
    Unhandled {
        /// Kind of the value that fell through every arm.
        value_kind: &'static str,
    },
}

impl Error {
    /// Create a reserved-selection-name error.
    pub fn reserved_name(name: impl Into<String>) -> Self {
        Self::ReservedSelectionName { name: name.into() }
    }
}
