//! Pattern data model, the matcher protocol, and the built-in matcher
//! library.

pub mod combinators;
pub mod matchers;
pub mod traits;

pub use combinators::*;
pub use matchers::*;
pub use traits::*;

use crate::value::Value;
use std::sync::Arc;

/// A description of required value shape, possibly containing matchers.
///
/// Patterns are immutable: constructed once, reused across many match
/// invocations, never mutated by the engine. The variants are resolved once
/// per node by the engine's dispatch; anything behind [`Pattern::Matcher`]
/// is opaque to structural recursion and delegated to entirely.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// A literal value, compared by same-value equality.
    Literal(Value),
    /// Fixed-length tuple pattern, matched positionally.
    Seq(Vec<Pattern>),
    /// Keyed pattern describing a minimum required shape. Pairs are ordered
    /// so selection discovery order is deterministic.
    Record(Vec<(String, Pattern)>),
    /// A composite matcher implementing the matcher protocol.
    Matcher(Arc<dyn Matcher>),
}

impl Pattern {
    /// Build a keyed record pattern from ordered pairs.
    pub fn record<K, I>(pairs: I) -> Pattern
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Pattern)>,
    {
        Pattern::Record(pairs.into_iter().map(|(k, p)| (k.into(), p)).collect())
    }

    /// Build a literal pattern.
    pub fn literal(value: impl Into<Value>) -> Pattern {
        Pattern::Literal(value.into())
    }

    /// Human-readable description of the pattern.
    pub fn describe(&self) -> String {
        match self {
            Pattern::Literal(v) => format!("{v:?}"),
            Pattern::Seq(ps) => {
                let parts: Vec<String> = ps.iter().map(Pattern::describe).collect();
                format!("[{}]", parts.join(", "))
            }
            Pattern::Record(pairs) => {
                let parts: Vec<String> = pairs
                    .iter()
                    .map(|(k, p)| format!("{k}: {}", p.describe()))
                    .collect();
                format!("{{{}}}", parts.join(", "))
            }
            Pattern::Matcher(m) => m.describe(),
        }
    }

    /// True when this node is an `optional` matcher; record matching uses
    /// this to relax key presence.
    pub(crate) fn is_optional(&self) -> bool {
        matches!(self, Pattern::Matcher(m) if m.kind() == MatcherKind::Optional)
    }
}

impl From<Arc<dyn Matcher>> for Pattern {
    fn from(matcher: Arc<dyn Matcher>) -> Self {
        Pattern::Matcher(matcher)
    }
}

impl From<Vec<Pattern>> for Pattern {
    fn from(patterns: Vec<Pattern>) -> Self {
        Pattern::Seq(patterns)
    }
}

// A composite Value decomposes into structural pattern nodes so that
// object-shaped patterns keep minimum-shape semantics instead of exact
// literal equality. Map and Set values stay literal and compare by
// same-value existence.
impl From<Value> for Pattern {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => {
                Pattern::Seq(items.into_iter().map(Pattern::from).collect())
            }
            Value::Object(fields) => {
                // HashMap iteration order is unspecified; sort for a stable
                // discovery order.
                let mut pairs: Vec<(String, Pattern)> = fields
                    .into_iter()
                    .map(|(k, v)| (k, Pattern::from(v)))
                    .collect();
                pairs.sort_by(|a, b| a.0.cmp(&b.0));
                Pattern::Record(pairs)
            }
            other => Pattern::Literal(other),
        }
    }
}

impl From<serde_json::Value> for Pattern {
    fn from(json: serde_json::Value) -> Self {
        Pattern::from(Value::from(json))
    }
}

impl From<bool> for Pattern {
    fn from(b: bool) -> Self {
        Pattern::Literal(Value::Bool(b))
    }
}

impl From<i64> for Pattern {
    fn from(i: i64) -> Self {
        Pattern::Literal(Value::Int(i))
    }
}

impl From<i32> for Pattern {
    fn from(i: i32) -> Self {
        Pattern::Literal(Value::Int(i64::from(i)))
    }
}

impl From<f64> for Pattern {
    fn from(f: f64) -> Self {
        Pattern::Literal(Value::Float(f))
    }
}

impl From<&str> for Pattern {
    fn from(s: &str) -> Self {
        Pattern::Literal(Value::from(s))
    }
}

impl From<String> for Pattern {
    fn from(s: String) -> Self {
        Pattern::Literal(Value::from(s))
    }
}
