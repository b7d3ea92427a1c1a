//! Runtime structural pattern matching with named selections.
//!
//! Given an arbitrary [`Value`] and a nested [`Pattern`] (literals,
//! wildcards, composite matchers), the engine decides whether the pattern
//! matches and extracts named selections: sub-values bound by name for
//! further processing. Patterns describe a minimum required shape, so
//! multi-way branching over deeply nested, heterogeneous data needs no
//! manual field-by-field destructuring.
//!
//! # Example
//!
//! ```
//! use contour::pattern::{array, select_as, string};
//! use contour::{match_select, Pattern, Value};
//!
//! let pattern = Pattern::record([
//!     ("kind", Pattern::from("alert")),
//!     ("tags", array(select_as("tag", string()).expect("name is not reserved"))),
//! ]);
//!
//! let value = Value::from_json(&serde_json::json!({
//!     "kind": "alert",
//!     "tags": ["network", "dns"],
//!     "severity": 3
//! }));
//!
//! let selections = match_select(&pattern, &value).expect("pattern matches");
//! assert_eq!(
//!     selections.get("tag"),
//!     Some(&Value::Array(vec![Value::from("network"), Value::from("dns")]))
//! );
//! ```
//!
//! Matching is pure and synchronous: patterns and matchers are immutable
//! value objects, safe to share across threads and reuse across
//! invocations. Structural mismatch is an ordinary negative result, never
//! an error.

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]

// Re-export commonly used items
pub use dispatch::Cases;
pub use engine::{is_match, match_pattern, match_select, selection_keys};
pub use error::Error;
pub use pattern::{
    MatchResult, Matcher, MatcherKind, Pattern, Selection, ANONYMOUS_SELECTION,
};
pub use selection::SelectionMap;
pub use value::Value;

/// First-match case dispatcher.
pub mod dispatch;

/// Structural match engine.
pub mod engine;

/// Error types.
pub mod error;

/// Pattern model, matcher protocol, and built-in matcher library.
pub mod pattern;

/// Selection accumulator.
pub mod selection;

/// Dynamic value model.
pub mod value;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the tracing subscriber with default settings
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().json())
        .init();
}
