//! The matcher capability protocol.

use crate::value::Value;
use std::fmt::Debug;
use std::sync::Arc;

/// Reserved key under which anonymous selections are bound.
///
/// User-chosen selection names may not collide with it; `select_as` rejects
/// the key at construction.
pub const ANONYMOUS_SELECTION: &str = "@contour/anonymous";

/// Variant tag identifying which built-in behavior a matcher applies.
///
/// Pure custom guards report [`MatcherKind::Default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatcherKind {
    /// Negation of a sub-pattern.
    Not,
    /// Key-presence relaxer and standalone optionality.
    Optional,
    /// Union of alternatives, first match wins.
    Or,
    /// Intersection, all sub-patterns must match.
    And,
    /// Variadic element matcher over ordered sequences.
    Array,
    /// Existence matcher over key-value collections.
    Map,
    /// Variadic member matcher over set-like collections.
    Set,
    /// Named or anonymous selection binder.
    Select,
    /// Custom guard predicate.
    Default,
}

/// A named binding extracted during a successful match.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Selection name; [`ANONYMOUS_SELECTION`] when the caller gave none.
    pub name: Arc<str>,
    /// The bound sub-value.
    pub value: Value,
}

impl Selection {
    /// Create a new selection.
    pub fn new(name: impl Into<Arc<str>>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Result of a match operation.
///
/// Invariant: `matched == false` implies `selections` is empty; failures are
/// only ever constructed through [`MatchResult::not_matched`], so partial
/// selections of a failing branch never escape.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    /// Whether the match was successful.
    pub matched: bool,
    /// Selections discovered, in depth-first discovery order.
    pub selections: Vec<Selection>,
}

impl MatchResult {
    /// Create a successful match result with no selections.
    pub fn matched() -> Self {
        Self {
            matched: true,
            selections: Vec::new(),
        }
    }

    /// Create a failed match result.
    pub fn not_matched() -> Self {
        Self {
            matched: false,
            selections: Vec::new(),
        }
    }

    /// Create a successful match result carrying selections.
    pub fn with_selections(selections: Vec<Selection>) -> Self {
        Self {
            matched: true,
            selections,
        }
    }
}

/// Capability contract implemented by every composite pattern object.
///
/// Matchers are immutable value objects: `matches` reads only its arguments
/// and returns a fresh result, so a matcher is safe to call repeatedly and
/// concurrently.
pub trait Matcher: Debug + Send + Sync {
    /// Decide success for `value` and produce selections local to this
    /// matcher and its descendants.
    fn matches(&self, value: &Value) -> MatchResult;

    /// Statically enumerate the names this matcher and its sub-patterns can
    /// bind, without running a match.
    fn selection_keys(&self) -> Vec<String> {
        Vec::new()
    }

    /// The variant tag for this matcher.
    fn kind(&self) -> MatcherKind;

    /// Marker for matchers that apply one sub-pattern across every element
    /// of a collection. Kept for interoperability with static inference
    /// layers; the engine itself does not branch on it.
    fn variadic(&self) -> bool {
        false
    }

    /// Human-readable description of the matcher.
    fn describe(&self) -> String;
}
