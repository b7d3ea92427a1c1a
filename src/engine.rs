//! Structural match engine.
//!
//! The recursive comparison at the heart of the crate: dispatch on the
//! pattern node kind, recurse into children, aggregate boolean success and
//! selections. Matcher nodes are opaque here; they own any recursion into
//! their sub-patterns.

use crate::pattern::{MatchResult, Pattern};
use crate::selection::SelectionMap;
use crate::value::Value;
use std::collections::HashSet;

/// Match `pattern` against `value`.
///
/// Selections travel inside the returned [`MatchResult`] in depth-first,
/// left-to-right discovery order. A failed result never carries selections,
/// so partial bindings of a failing branch are discarded structurally.
/// Structural mismatch is an ordinary `matched: false`, never an error; the
/// only panics that can escape originate in caller-supplied guard
/// predicates and are intentionally not caught.
pub fn match_pattern(pattern: &Pattern, value: &Value) -> MatchResult {
    match pattern {
        Pattern::Matcher(matcher) => matcher.matches(value),
        Pattern::Seq(positions) => {
            // Fixed tuple semantics: exact length, positional sub-patterns.
            // Variadic behavior belongs to the array/set matchers.
            let items = match value {
                Value::Array(items) if items.len() == positions.len() => items,
                _ => return MatchResult::not_matched(),
            };
            let mut selections = Vec::new();
            for (sub, item) in positions.iter().zip(items) {
                let result = match_pattern(sub, item);
                if !result.matched {
                    return MatchResult::not_matched();
                }
                selections.extend(result.selections);
            }
            MatchResult::with_selections(selections)
        }
        Pattern::Record(pairs) => {
            if !value.is_composite() {
                return MatchResult::not_matched();
            }
            let mut selections = Vec::new();
            for (key, sub) in pairs {
                let field = match value {
                    Value::Object(fields) => fields.get(key),
                    _ => None,
                };
                let result = match field {
                    Some(present) => match_pattern(sub, present),
                    // A missing key is only acceptable under an optional
                    // sub-pattern, which is probed with the absent value so
                    // its selections still bind.
                    None if sub.is_optional() => match_pattern(sub, &Value::Null),
                    None => return MatchResult::not_matched(),
                };
                if !result.matched {
                    return MatchResult::not_matched();
                }
                selections.extend(result.selections);
            }
            MatchResult::with_selections(selections)
        }
        Pattern::Literal(literal) => {
            if literal.same_value_eq(value) {
                MatchResult::matched()
            } else {
                MatchResult::not_matched()
            }
        }
    }
}

/// True when `pattern` matches `value`.
pub fn is_match(pattern: &Pattern, value: &Value) -> bool {
    match_pattern(pattern, value).matched
}

/// Match and commit selections only on overall success.
///
/// Returns `None` on failure, so bindings made by branches of an
/// ultimately-failing match are never exposed to the caller.
pub fn match_select(pattern: &Pattern, value: &Value) -> Option<SelectionMap> {
    let result = match_pattern(pattern, value);
    if result.matched {
        Some(SelectionMap::from_selections(result.selections))
    } else {
        None
    }
}

/// Statically enumerate the selection names `pattern` can bind, without
/// running a match. Deduplicated, in discovery order.
pub fn selection_keys(pattern: &Pattern) -> Vec<String> {
    let keys = match pattern {
        Pattern::Matcher(matcher) => matcher.selection_keys(),
        Pattern::Seq(positions) => positions.iter().flat_map(selection_keys).collect(),
        Pattern::Record(pairs) => pairs
            .iter()
            .flat_map(|(_, sub)| selection_keys(sub))
            .collect(),
        Pattern::Literal(_) => Vec::new(),
    };
    let mut seen = HashSet::new();
    keys.into_iter().filter(|k| seen.insert(k.clone())).collect()
}
