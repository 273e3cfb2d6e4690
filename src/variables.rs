//! Session variable store.
//!
//! Maps identifier names to the last value assigned to them. Keys are owned
//! copies of the name, so a stored variable never borrows from the node arena
//! that produced the assignment.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

use crate::Real;

/// Variables assigned during a session.
///
/// # Examples
///
/// ```
/// use calc_rs::variables::VariableStore;
///
/// let mut vars = VariableStore::new();
/// vars.set("x", 42.0);
/// assert_eq!(vars.get("x"), 42.0);
/// assert!(vars.get("y").is_nan());
/// ```
#[derive(Debug, Clone, Default)]
pub struct VariableStore {
    values: BTreeMap<String, Real>,
}

impl VariableStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Returns the value last assigned to `name`, or NaN if it was never assigned.
    pub fn get(&self, name: &str) -> Real {
        self.values.get(name).copied().unwrap_or(Real::NAN)
    }

    /// Inserts or overwrites `name`.
    pub fn set(&mut self, name: &str, value: Real) {
        match self.values.get_mut(name) {
            Some(slot) => *slot = value,
            None => {
                self.values.insert(name.to_string(), value);
            }
        }
    }

    /// Whether `name` has ever been assigned.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of distinct names assigned so far.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over all variables in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Real)> {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumpalo::Bump;
    use std::vec::Vec;

    #[test]
    fn test_get_unassigned_is_nan() {
        let vars = VariableStore::new();
        assert!(vars.get("nothing").is_nan());
        assert!(!vars.contains("nothing"));
        assert!(vars.is_empty());
    }

    #[test]
    fn test_set_then_get() {
        let mut vars = VariableStore::new();
        vars.set("x", 1.5);
        assert_eq!(vars.get("x"), 1.5);
        assert!(vars.contains("x"));
        assert_eq!(vars.len(), 1);
    }

    #[test]
    fn test_overwrite_keeps_one_entry() {
        let mut vars = VariableStore::new();
        vars.set("x", 1.0);
        vars.set("x", 2.0);
        vars.set("x", -3.0);
        assert_eq!(vars.get("x"), -3.0);
        assert_eq!(vars.len(), 1);
    }

    #[test]
    fn test_special_values_round_trip() {
        let mut vars = VariableStore::new();
        vars.set("inf", Real::INFINITY);
        vars.set("neg_zero", -0.0);
        vars.set("nan", Real::NAN);

        assert_eq!(vars.get("inf"), Real::INFINITY);
        assert!(vars.get("neg_zero").is_sign_negative());
        assert!(vars.get("nan").is_nan());
        // An assigned NaN is still an assigned variable
        assert!(vars.contains("nan"));
    }

    #[test]
    fn test_key_outlives_source_text() {
        let mut vars = VariableStore::new();
        {
            let arena = Bump::new();
            let name: &str = arena.alloc_str("temporary");
            vars.set(name, 7.0);
        }
        assert_eq!(vars.get("temporary"), 7.0);
    }

    #[test]
    fn test_iter_in_name_order() {
        let mut vars = VariableStore::new();
        vars.set("b", 2.0);
        vars.set("a", 1.0);
        vars.set("c", 3.0);
        let names: Vec<&str> = vars.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }
}
