//! Built-in matcher library.

use crate::engine::{match_pattern, selection_keys};
use crate::pattern::{
    MatchResult, Matcher, MatcherKind, Pattern, Selection, ANONYMOUS_SELECTION,
};
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// Matcher that succeeds when its sub-pattern fails.
///
/// A negated branch binds nothing: selections produced while probing the
/// sub-pattern are discarded, and the matcher advertises no selection keys.
#[derive(Debug, Clone)]
pub struct NotMatcher {
    pattern: Pattern,
}

impl NotMatcher {
    /// Create a new negation matcher.
    pub fn new(pattern: Pattern) -> Self {
        Self { pattern }
    }
}

impl Matcher for NotMatcher {
    fn matches(&self, value: &Value) -> MatchResult {
        if match_pattern(&self.pattern, value).matched {
            MatchResult::not_matched()
        } else {
            MatchResult::matched()
        }
    }

    fn kind(&self) -> MatcherKind {
        MatcherKind::Not
    }

    fn describe(&self) -> String {
        format!("not {}", self.pattern.describe())
    }
}

/// Matcher that accepts the absent value or a matching sub-pattern.
///
/// In keyed patterns it relaxes key presence: the engine probes a missing
/// key by matching this node against `Null`. On the absent path every inner
/// selection key is bound to `Null`, so handler binding maps keep a stable
/// shape whether or not the key was present.
#[derive(Debug, Clone)]
pub struct OptionalMatcher {
    pattern: Pattern,
}

impl OptionalMatcher {
    /// Create a new optional matcher.
    pub fn new(pattern: Pattern) -> Self {
        Self { pattern }
    }
}

impl Matcher for OptionalMatcher {
    fn matches(&self, value: &Value) -> MatchResult {
        if matches!(value, Value::Null) {
            let selections = selection_keys(&self.pattern)
                .into_iter()
                .map(|key| Selection::new(key, Value::Null))
                .collect();
            return MatchResult::with_selections(selections);
        }
        match_pattern(&self.pattern, value)
    }

    fn selection_keys(&self) -> Vec<String> {
        selection_keys(&self.pattern)
    }

    fn kind(&self) -> MatcherKind {
        MatcherKind::Optional
    }

    fn describe(&self) -> String {
        format!("optional {}", self.pattern.describe())
    }
}

/// Matcher requiring every sub-pattern to match the same value.
#[derive(Debug, Clone)]
pub struct AndMatcher {
    patterns: Vec<Pattern>,
}

impl AndMatcher {
    /// Create a new intersection matcher. An empty list is vacuously true.
    pub fn new(patterns: Vec<Pattern>) -> Self {
        Self { patterns }
    }
}

impl Matcher for AndMatcher {
    fn matches(&self, value: &Value) -> MatchResult {
        let mut selections = Vec::new();
        for pattern in &self.patterns {
            let result = match_pattern(pattern, value);
            if !result.matched {
                return MatchResult::not_matched();
            }
            selections.extend(result.selections);
        }
        MatchResult::with_selections(selections)
    }

    fn selection_keys(&self) -> Vec<String> {
        self.patterns.iter().flat_map(selection_keys).collect()
    }

    fn kind(&self) -> MatcherKind {
        MatcherKind::And
    }

    fn describe(&self) -> String {
        let parts: Vec<String> = self.patterns.iter().map(Pattern::describe).collect();
        format!("({})", parts.join(" AND "))
    }
}

/// Matcher trying alternatives left-to-right, stopping at the first match.
///
/// Only the first matching alternative's selections are kept; later
/// alternatives are not attempted. An empty list never matches.
#[derive(Debug, Clone)]
pub struct OrMatcher {
    patterns: Vec<Pattern>,
}

impl OrMatcher {
    /// Create a new union matcher.
    pub fn new(patterns: Vec<Pattern>) -> Self {
        Self { patterns }
    }
}

impl Matcher for OrMatcher {
    fn matches(&self, value: &Value) -> MatchResult {
        for pattern in &self.patterns {
            let result = match_pattern(pattern, value);
            if result.matched {
                return result;
            }
        }
        MatchResult::not_matched()
    }

    fn selection_keys(&self) -> Vec<String> {
        self.patterns.iter().flat_map(selection_keys).collect()
    }

    fn kind(&self) -> MatcherKind {
        MatcherKind::Or
    }

    fn describe(&self) -> String {
        let parts: Vec<String> = self.patterns.iter().map(Pattern::describe).collect();
        format!("({})", parts.join(" OR "))
    }
}

/// Variadic matcher applying one element pattern to every element of an
/// ordered sequence.
///
/// Element selections accumulate under their names as ordered sequences,
/// one slot per matched element in index order. An empty sequence matches
/// trivially and binds nothing.
#[derive(Debug, Clone)]
pub struct ArrayMatcher {
    element: Pattern,
}

impl ArrayMatcher {
    /// Create a new array matcher.
    pub fn new(element: Pattern) -> Self {
        Self { element }
    }
}

/// Group per-element selections by name, preserving first-seen name order
/// and element order within each name.
fn collect_variadic<'a>(
    pattern: &Pattern,
    items: impl Iterator<Item = &'a Value>,
) -> MatchResult {
    let mut groups: Vec<(Arc<str>, Vec<Value>)> = Vec::new();
    for item in items {
        let result = match_pattern(pattern, item);
        if !result.matched {
            return MatchResult::not_matched();
        }
        for selection in result.selections {
            match groups.iter_mut().find(|(name, _)| *name == selection.name) {
                Some((_, slots)) => slots.push(selection.value),
                None => groups.push((selection.name, vec![selection.value])),
            }
        }
    }
    let selections = groups
        .into_iter()
        .map(|(name, slots)| Selection::new(name, Value::Array(slots)))
        .collect();
    MatchResult::with_selections(selections)
}

impl Matcher for ArrayMatcher {
    fn matches(&self, value: &Value) -> MatchResult {
        let items = match value {
            Value::Array(items) => items,
            _ => return MatchResult::not_matched(),
        };
        collect_variadic(&self.element, items.iter())
    }

    fn selection_keys(&self) -> Vec<String> {
        selection_keys(&self.element)
    }

    fn kind(&self) -> MatcherKind {
        MatcherKind::Array
    }

    fn variadic(&self) -> bool {
        true
    }

    fn describe(&self) -> String {
        format!("array of {}", self.element.describe())
    }
}

/// Variadic matcher applying one member pattern to every member of a
/// set-like collection.
///
/// Analogous to [`ArrayMatcher`]; member selections accumulate in the host
/// collection's iteration order.
#[derive(Debug, Clone)]
pub struct SetMatcher {
    member: Pattern,
}

impl SetMatcher {
    /// Create a new set matcher.
    pub fn new(member: Pattern) -> Self {
        Self { member }
    }
}

impl Matcher for SetMatcher {
    fn matches(&self, value: &Value) -> MatchResult {
        let members = match value {
            Value::Set(members) => members,
            _ => return MatchResult::not_matched(),
        };
        collect_variadic(&self.member, members.iter())
    }

    fn selection_keys(&self) -> Vec<String> {
        selection_keys(&self.member)
    }

    fn kind(&self) -> MatcherKind {
        MatcherKind::Set
    }

    fn variadic(&self) -> bool {
        true
    }

    fn describe(&self) -> String {
        format!("set of {}", self.member.describe())
    }
}

/// Existence matcher over key-value collections.
///
/// Succeeds when some entry's key matches the key pattern and value matches
/// the value pattern. First-match-wins: only the first qualifying entry in
/// iteration order contributes selections; later qualifying entries are not
/// consulted. An empty collection never matches.
#[derive(Debug, Clone)]
pub struct MapMatcher {
    key: Pattern,
    value: Pattern,
}

impl MapMatcher {
    /// Create a new map entry matcher.
    pub fn new(key: Pattern, value: Pattern) -> Self {
        Self { key, value }
    }
}

impl Matcher for MapMatcher {
    fn matches(&self, value: &Value) -> MatchResult {
        let entries = match value {
            Value::Map(entries) => entries,
            _ => return MatchResult::not_matched(),
        };
        for (entry_key, entry_value) in entries {
            let key_result = match_pattern(&self.key, entry_key);
            if !key_result.matched {
                continue;
            }
            let value_result = match_pattern(&self.value, entry_value);
            if !value_result.matched {
                continue;
            }
            let mut selections = key_result.selections;
            selections.extend(value_result.selections);
            return MatchResult::with_selections(selections);
        }
        MatchResult::not_matched()
    }

    fn selection_keys(&self) -> Vec<String> {
        let mut keys = selection_keys(&self.key);
        keys.extend(selection_keys(&self.value));
        keys
    }

    fn kind(&self) -> MatcherKind {
        MatcherKind::Map
    }

    fn describe(&self) -> String {
        format!(
            "map entry ({} -> {})",
            self.key.describe(),
            self.value.describe()
        )
    }
}

/// Matcher binding the matched value under a name.
///
/// Matches whenever the inner pattern matches, emits the inner pattern's
/// selections first, then binds the whole value under the configured name
/// (the reserved anonymous key when the caller gave none).
#[derive(Debug, Clone)]
pub struct SelectMatcher {
    name: Arc<str>,
    pattern: Pattern,
}

impl SelectMatcher {
    /// Create a selection matcher binding under `name`. Name validity is the
    /// caller's concern; the `select_as` combinator rejects the reserved key.
    pub fn new(name: impl Into<Arc<str>>, pattern: Pattern) -> Self {
        Self {
            name: name.into(),
            pattern,
        }
    }

    /// Create an anonymous selection matcher.
    pub fn anonymous(pattern: Pattern) -> Self {
        Self::new(ANONYMOUS_SELECTION, pattern)
    }
}

impl Matcher for SelectMatcher {
    fn matches(&self, value: &Value) -> MatchResult {
        let result = match_pattern(&self.pattern, value);
        if !result.matched {
            return MatchResult::not_matched();
        }
        let mut selections = result.selections;
        selections.push(Selection::new(self.name.clone(), value.clone()));
        MatchResult::with_selections(selections)
    }

    fn selection_keys(&self) -> Vec<String> {
        let mut keys = selection_keys(&self.pattern);
        keys.push(self.name.to_string());
        keys
    }

    fn kind(&self) -> MatcherKind {
        MatcherKind::Select
    }

    fn describe(&self) -> String {
        format!("select '{}' from {}", self.name, self.pattern.describe())
    }
}

/// Custom guard matcher over a caller-supplied predicate.
///
/// Binds nothing. A panicking predicate propagates to the caller; the
/// engine performs no recovery.
#[derive(Clone)]
pub struct GuardMatcher {
    label: &'static str,
    predicate: Arc<dyn Fn(&Value) -> bool + Send + Sync>,
}

impl GuardMatcher {
    /// Create a new guard matcher. `label` names the guard in descriptions
    /// and debug output.
    pub fn new(
        label: &'static str,
        predicate: impl Fn(&Value) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            label,
            predicate: Arc::new(predicate),
        }
    }
}

impl fmt::Debug for GuardMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuardMatcher")
            .field("label", &self.label)
            .finish()
    }
}

impl Matcher for GuardMatcher {
    fn matches(&self, value: &Value) -> MatchResult {
        if (self.predicate)(value) {
            MatchResult::matched()
        } else {
            MatchResult::not_matched()
        }
    }

    fn kind(&self) -> MatcherKind {
        MatcherKind::Default
    }

    fn describe(&self) -> String {
        self.label.to_string()
    }
}
