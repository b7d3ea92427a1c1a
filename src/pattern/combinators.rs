//! Free-function combinators for constructing patterns and refinement
//! guards.
//!
//! Every function here returns an immutable [`Pattern`] wrapping one of the
//! built-in matchers; composing them never mutates an existing pattern.

use crate::error::Error;
use crate::pattern::matchers::{
    AndMatcher, ArrayMatcher, GuardMatcher, MapMatcher, NotMatcher, OptionalMatcher,
    OrMatcher, SelectMatcher, SetMatcher,
};
use crate::pattern::{Pattern, ANONYMOUS_SELECTION};
use crate::value::Value;
use std::ops::RangeInclusive;
use std::sync::Arc;

/// Negate a pattern. Succeeds when the sub-pattern fails; binds nothing.
pub fn not(pattern: impl Into<Pattern>) -> Pattern {
    Pattern::Matcher(Arc::new(NotMatcher::new(pattern.into())))
}

/// Accept the absent value or a matching sub-pattern. In keyed patterns
/// this relaxes key presence.
pub fn optional(pattern: impl Into<Pattern>) -> Pattern {
    Pattern::Matcher(Arc::new(OptionalMatcher::new(pattern.into())))
}

/// Require every pattern in the list to match. An empty list is vacuously
/// true.
pub fn all_of(patterns: impl IntoIterator<Item = Pattern>) -> Pattern {
    Pattern::Matcher(Arc::new(AndMatcher::new(patterns.into_iter().collect())))
}

/// Try alternatives left-to-right, stopping at the first match. An empty
/// list never matches.
pub fn any_of(patterns: impl IntoIterator<Item = Pattern>) -> Pattern {
    Pattern::Matcher(Arc::new(OrMatcher::new(patterns.into_iter().collect())))
}

/// Match an ordered sequence where every element matches `element`.
pub fn array(element: impl Into<Pattern>) -> Pattern {
    Pattern::Matcher(Arc::new(ArrayMatcher::new(element.into())))
}

/// Match a set-like collection where every member matches `member`.
pub fn set_of(member: impl Into<Pattern>) -> Pattern {
    Pattern::Matcher(Arc::new(SetMatcher::new(member.into())))
}

/// Match a key-value collection containing some entry whose key and value
/// match the given patterns. First qualifying entry wins.
pub fn map_entries(key: impl Into<Pattern>, value: impl Into<Pattern>) -> Pattern {
    Pattern::Matcher(Arc::new(MapMatcher::new(key.into(), value.into())))
}

/// Anonymously select the matched value.
pub fn select() -> Pattern {
    Pattern::Matcher(Arc::new(SelectMatcher::anonymous(any())))
}

/// Anonymously select the matched value when `pattern` matches it.
pub fn select_matching(pattern: impl Into<Pattern>) -> Pattern {
    Pattern::Matcher(Arc::new(SelectMatcher::anonymous(pattern.into())))
}

/// Select the matched value under `name` when `pattern` matches it.
///
/// Rejects the reserved anonymous key.
pub fn select_as(
    name: impl Into<String>,
    pattern: impl Into<Pattern>,
) -> Result<Pattern, Error> {
    let name = name.into();
    if name == ANONYMOUS_SELECTION {
        return Err(Error::reserved_name(name));
    }
    Ok(Pattern::Matcher(Arc::new(SelectMatcher::new(
        name.as_str(),
        pattern.into(),
    ))))
}

/// Guard on an arbitrary predicate. Binds nothing; a panicking predicate
/// propagates to the caller.
pub fn when<F>(predicate: F) -> Pattern
where
    F: Fn(&Value) -> bool + Send + Sync + 'static,
{
    Pattern::Matcher(Arc::new(GuardMatcher::new("custom", predicate)))
}

/// Wildcard: matches any value, binds nothing.
pub fn any() -> Pattern {
    Pattern::Matcher(Arc::new(GuardMatcher::new("any", |_| true)))
}

/// Match any string value.
pub fn string() -> Pattern {
    Pattern::Matcher(Arc::new(GuardMatcher::new("string", |v| {
        matches!(v, Value::String(_))
    })))
}

/// Match any integer value.
pub fn int() -> Pattern {
    Pattern::Matcher(Arc::new(GuardMatcher::new("int", |v| {
        matches!(v, Value::Int(_))
    })))
}

/// Match any floating point value.
pub fn float() -> Pattern {
    Pattern::Matcher(Arc::new(GuardMatcher::new("float", |v| {
        matches!(v, Value::Float(_))
    })))
}

/// Match any numeric value, integer or float.
pub fn number() -> Pattern {
    Pattern::Matcher(Arc::new(GuardMatcher::new("number", |v| {
        matches!(v, Value::Int(_) | Value::Float(_))
    })))
}

/// Match any boolean value.
pub fn boolean() -> Pattern {
    Pattern::Matcher(Arc::new(GuardMatcher::new("boolean", |v| {
        matches!(v, Value::Bool(_))
    })))
}

/// Match the null/absent value.
pub fn nullish() -> Pattern {
    Pattern::Matcher(Arc::new(GuardMatcher::new("nullish", |v| {
        matches!(v, Value::Null)
    })))
}

/// Match a string value satisfying `predicate`.
pub fn string_matching<F>(predicate: F) -> Pattern
where
    F: Fn(&str) -> bool + Send + Sync + 'static,
{
    Pattern::Matcher(Arc::new(GuardMatcher::new("string refinement", move |v| {
        v.as_str().is_some_and(&predicate)
    })))
}

/// Match an integer value within the inclusive range.
pub fn int_in(range: RangeInclusive<i64>) -> Pattern {
    Pattern::Matcher(Arc::new(GuardMatcher::new("int range", move |v| {
        v.as_int().is_some_and(|i| range.contains(&i))
    })))
}

/// Match a finite floating point value.
pub fn float_finite() -> Pattern {
    Pattern::Matcher(Arc::new(GuardMatcher::new("finite float", |v| {
        matches!(v, Value::Float(f) if f.is_finite())
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::is_match;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_select_as_rejects_reserved_name() {
        let result = select_as(ANONYMOUS_SELECTION, any());
        assert_eq!(
            result.err(),
            Some(Error::reserved_name(ANONYMOUS_SELECTION))
        );
    }

    #[test]
    fn test_type_guards() {
        assert!(is_match(&string(), &Value::from("s")));
        assert!(!is_match(&string(), &Value::Int(1)));
        assert!(is_match(&int(), &Value::Int(1)));
        assert!(!is_match(&int(), &Value::Float(1.0)));
        assert!(is_match(&float(), &Value::Float(1.0)));
        assert!(is_match(&number(), &Value::Int(1)));
        assert!(is_match(&number(), &Value::Float(1.0)));
        assert!(!is_match(&number(), &Value::from("1")));
        assert!(is_match(&boolean(), &Value::Bool(false)));
        assert!(is_match(&nullish(), &Value::Null));
        assert!(!is_match(&nullish(), &Value::Bool(false)));
    }

    #[test]
    fn test_refinements() {
        assert!(is_match(
            &string_matching(|s| s.starts_with("pre")),
            &Value::from("prefix")
        ));
        assert!(!is_match(
            &string_matching(|s| s.starts_with("pre")),
            &Value::from("suffix")
        ));
        assert!(is_match(&int_in(1..=10), &Value::Int(5)));
        assert!(!is_match(&int_in(1..=10), &Value::Int(11)));
        assert!(is_match(&float_finite(), &Value::Float(1.5)));
        assert!(!is_match(&float_finite(), &Value::Float(f64::NAN)));
        assert!(!is_match(&float_finite(), &Value::Int(1)));
    }

    #[test]
    fn test_when_guard() {
        let even = when(|v| v.as_int().is_some_and(|i| i % 2 == 0));
        assert!(is_match(&even, &Value::Int(4)));
        assert!(!is_match(&even, &Value::Int(5)));
    }
}
