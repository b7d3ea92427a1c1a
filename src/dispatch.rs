//! First-match case dispatcher over an ordered list of patterns.

use crate::engine::match_select;
use crate::error::Error;
use crate::pattern::Pattern;
use crate::selection::SelectionMap;
use crate::value::Value;
use std::fmt;
use tracing::debug;

type Handler<T> = Box<dyn Fn(&SelectionMap, &Value) -> T + Send + Sync>;

struct Arm<T> {
    pattern: Pattern,
    handler: Handler<T>,
}

/// An ordered set of pattern arms evaluated against a value, first match
/// wins.
///
/// Exhaustiveness is not checked: [`Cases::evaluate`] returns `None` when no
/// arm matches, and [`Cases::try_evaluate`] reports it as
/// [`Error::Unhandled`].
pub struct Cases<T> {
    arms: Vec<Arm<T>>,
}

impl<T> Cases<T> {
    /// Create an empty case list.
    pub fn new() -> Self {
        Self { arms: Vec::new() }
    }

    /// Append an arm. Arms are tried in insertion order.
    pub fn case(
        mut self,
        pattern: impl Into<Pattern>,
        handler: impl Fn(&SelectionMap, &Value) -> T + Send + Sync + 'static,
    ) -> Self {
        self.arms.push(Arm {
            pattern: pattern.into(),
            handler: Box::new(handler),
        });
        self
    }

    /// Evaluate arms in order; the first matching arm's handler runs with
    /// the committed selections.
    pub fn evaluate(&self, value: &Value) -> Option<T> {
        for (index, arm) in self.arms.iter().enumerate() {
            if let Some(selections) = match_select(&arm.pattern, value) {
                debug!(arm = index, pattern = %arm.pattern.describe(), "case arm matched");
                return Some((arm.handler)(&selections, value));
            }
        }
        debug!(arms = self.arms.len(), "no case arm matched");
        None
    }

    /// Evaluate, falling back to `fallback` when no arm matches.
    pub fn evaluate_or(&self, value: &Value, fallback: impl FnOnce(&Value) -> T) -> T {
        match self.evaluate(value) {
            Some(output) => output,
            None => fallback(value),
        }
    }

    /// Evaluate, reporting a fall-through as [`Error::Unhandled`].
    pub fn try_evaluate(&self, value: &Value) -> Result<T, Error> {
        self.evaluate(value).ok_or(Error::Unhandled {
            value_kind: value.kind_str(),
        })
    }

    /// Number of arms.
    pub fn len(&self) -> usize {
        self.arms.len()
    }

    /// True when no arms were added.
    pub fn is_empty(&self) -> bool {
        self.arms.is_empty()
    }
}

impl<T> Default for Cases<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Cases<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let patterns: Vec<String> =
            self.arms.iter().map(|arm| arm.pattern.describe()).collect();
        f.debug_struct("Cases").field("arms", &patterns).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::combinators::{any, int, select_as, string};
    use pretty_assertions::assert_eq;

    fn cases() -> Cases<&'static str> {
        Cases::new()
            .case(int(), |_, _| "int")
            .case(string(), |_, _| "string")
            .case(any(), |_, _| "anything")
    }

    #[test]
    fn test_first_match_wins() {
        let cases = cases();
        assert_eq!(cases.evaluate(&Value::Int(1)), Some("int"));
        assert_eq!(cases.evaluate(&Value::from("s")), Some("string"));
        assert_eq!(cases.evaluate(&Value::Bool(true)), Some("anything"));
        assert_eq!(cases.len(), 3);
        assert!(!cases.is_empty());
    }

    #[test]
    fn test_fall_through() {
        let cases: Cases<&'static str> = Cases::new().case(int(), |_, _| "int");
        assert_eq!(cases.evaluate(&Value::from("s")), None);
        assert_eq!(cases.evaluate_or(&Value::from("s"), |_| "fallback"), "fallback");
        assert_eq!(
            cases.try_evaluate(&Value::from("s")),
            Err(Error::Unhandled {
                value_kind: "string"
            })
        );
    }

    #[test]
    fn test_handler_receives_selections() {
        let cases: Cases<i64> = Cases::new().case(
            Pattern::record([(
                "n",
                select_as("n", int()).expect("name is not reserved"),
            )]),
            |selections, _| selections.get("n").and_then(Value::as_int).unwrap_or(0),
        );
        let value = Value::from_json(&serde_json::json!({"n": 41, "extra": true}));
        assert_eq!(cases.evaluate(&value), Some(41));
    }
}
