//! Caller-level selection accumulator.

use crate::pattern::{Selection, ANONYMOUS_SELECTION};
use crate::value::Value;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;

/// Insertion-ordered accumulator of name→value bindings committed by a
/// successful match.
///
/// The first binding under a name stores the raw value. A second binding
/// under the same name converts the slot into an ordered sequence and
/// appends; order equals discovery order. Variadic shaping (one sequence
/// slot per array/set element) is done by the variadic matchers themselves,
/// so the convert-on-second-binding rule here only fires for genuine
/// duplicate names, e.g. two selections of one name under an intersection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionMap {
    entries: Vec<(Arc<str>, Value)>,
    // Names whose slot has been converted to a sequence.
    repeated: HashSet<Arc<str>>,
}

impl SelectionMap {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an accumulator from selections in discovery order.
    pub fn from_selections(selections: Vec<Selection>) -> Self {
        let mut map = Self::new();
        for selection in selections {
            map.insert(selection.name, selection.value);
        }
        map
    }

    /// Record one binding, accumulating duplicates into an ordered sequence.
    pub fn insert(&mut self, name: Arc<str>, value: Value) {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => {
                if self.repeated.contains(&name) {
                    if let Value::Array(slots) = existing {
                        slots.push(value);
                    }
                } else {
                    let first = std::mem::take(existing);
                    *existing = Value::Array(vec![first, value]);
                    self.repeated.insert(name);
                }
            }
            None => self.entries.push((name, value)),
        }
    }

    /// Look up a binding by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(n, _)| n.as_ref() == name)
            .map(|(_, v)| v)
    }

    /// Look up the anonymous binding.
    pub fn anonymous(&self) -> Option<&Value> {
        self.get(ANONYMOUS_SELECTION)
    }

    /// Number of distinct bound names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing was bound.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate bindings in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(n, v)| (n.as_ref(), v))
    }

    /// Consume the accumulator, yielding bindings in discovery order.
    pub fn into_inner(self) -> Vec<(Arc<str>, Value)> {
        self.entries
    }
}

// Serializes as an object keyed by selection name, in discovery order.
impl Serialize for SelectionMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name.as_ref(), value)?;
        }
        map.end()
    }
}

impl<'a> IntoIterator for &'a SelectionMap {
    type Item = (&'a str, &'a Value);
    type IntoIter = std::vec::IntoIter<(&'a str, &'a Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries
            .iter()
            .map(|(n, v)| (n.as_ref(), v))
            .collect::<Vec<_>>()
            .into_iter()
    }
}
