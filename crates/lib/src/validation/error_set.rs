//! Per-field validation error tracking

use std::collections::BTreeMap;

use super::Field;

/// Mapping from field to its current error message.
///
/// Absence of a key means the field is currently valid. Entries are set and
/// cleared one field at a time; updating one field never clears another
/// field's stale error. Submission is allowed exactly when the set is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrorSet {
    errors: BTreeMap<Field, &'static str>,
}

impl ValidationErrorSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the outcome of a validation pass over one field: a message
    /// sets (or replaces) the field's error, `None` clears it.
    pub fn apply(&mut self, field: Field, outcome: Option<&'static str>) {
        match outcome {
            Some(message) => {
                self.errors.insert(field, message);
            }
            None => {
                self.errors.remove(&field);
            }
        }
    }

    /// The current error message for `field`, if any.
    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    /// True when no field currently has an error; gates submission.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of fields currently in error.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterates over `(field, message)` pairs in form order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.errors.iter().map(|(field, message)| (*field, *message))
    }
}
