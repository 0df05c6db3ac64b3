//! The ordered rule store.
//!
//! Array order is priority order: index 0 outranks everything after it.
//! The store never reorders on its own; every priority change goes through
//! one of the explicit mutations below.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::StoreError;
use crate::rule::{Rule, RuleKind};

/// Ordered collection of rules, persisted as a plain JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleStore {
    rules: Vec<Rule>,
}

impl RuleStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Rule> {
        self.rules.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Rule] {
        &self.rules
    }

    fn check(&self, index: usize) -> Result<(), StoreError> {
        if index < self.rules.len() {
            Ok(())
        } else {
            Err(StoreError::IndexOutOfRange {
                index,
                len: self.rules.len(),
            })
        }
    }

    /// Mutable access for in-place edits of icon or pattern.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IndexOutOfRange`] if `index` is past the end.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut Rule, StoreError> {
        let len = self.rules.len();
        self.rules
            .get_mut(index)
            .ok_or(StoreError::IndexOutOfRange { index, len })
    }

    /// Replace the rule at `index` without moving it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IndexOutOfRange`] if `index` is past the end.
    pub fn update(&mut self, index: usize, rule: Rule) -> Result<Rule, StoreError> {
        let slot = self.get_mut(index)?;
        Ok(std::mem::replace(slot, rule))
    }

    /// Prepend `rule`, so the newest rule outranks all existing ones.
    pub fn insert_at_highest_priority(&mut self, rule: Rule) {
        info!(kind = %rule.kind, pattern = %rule.pattern, "rule added at top priority");
        self.rules.insert(0, rule);
    }

    /// Remove the rule at `rule_index` and reinsert it at `target_index`.
    ///
    /// Indices refer to positions before the move; moving a rule onto the
    /// index of a higher-priority rule places it directly above that rule.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IndexOutOfRange`] if either index is past the end.
    pub fn move_to(&mut self, rule_index: usize, target_index: usize) -> Result<(), StoreError> {
        self.check(rule_index)?;
        self.check(target_index)?;
        if rule_index != target_index {
            let rule = self.rules.remove(rule_index);
            self.rules.insert(target_index, rule);
            info!(from = rule_index, to = target_index, "rule moved");
        }
        Ok(())
    }

    /// Swap the rule with its higher-priority neighbour. No-op at the top.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IndexOutOfRange`] if `index` is past the end.
    pub fn move_up(&mut self, index: usize) -> Result<(), StoreError> {
        self.check(index)?;
        if index > 0 {
            self.rules.swap(index - 1, index);
        }
        Ok(())
    }

    /// Swap the rule with its lower-priority neighbour. No-op at the bottom.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IndexOutOfRange`] if `index` is past the end.
    pub fn move_down(&mut self, index: usize) -> Result<(), StoreError> {
        self.check(index)?;
        if index + 1 < self.rules.len() {
            self.rules.swap(index, index + 1);
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`StoreError::IndexOutOfRange`] if `index` is past the end.
    pub fn remove_at(&mut self, index: usize) -> Result<Rule, StoreError> {
        self.check(index)?;
        let rule = self.rules.remove(index);
        info!(index, kind = %rule.kind, pattern = %rule.pattern, "rule removed");
        Ok(rule)
    }

    /// Copy the rule at `index` and insert the copy right after it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IndexOutOfRange`] if `index` is past the end.
    pub fn duplicate_at(&mut self, index: usize) -> Result<(), StoreError> {
        self.check(index)?;
        let copy = self.rules[index].clone();
        self.rules.insert(index + 1, copy);
        Ok(())
    }

    /// Assign `icon` to the note named `basename` through an exact rule.
    ///
    /// An existing exact rule for that name keeps its position and gets the
    /// new icon; otherwise a new exact rule is prepended. An empty `icon`
    /// removes the existing exact rule. Returns the index the rule now
    /// occupies, or `None` when it was removed or never existed.
    pub fn set_exact_icon(&mut self, basename: &str, icon: &str) -> Option<usize> {
        let existing = self
            .rules
            .iter()
            .position(|r| r.kind == RuleKind::Exact && r.pattern == basename);

        match (existing, icon.is_empty()) {
            (Some(index), false) => {
                self.rules[index].icon = icon.to_string();
                Some(index)
            }
            (None, false) => {
                self.insert_at_highest_priority(Rule::new(RuleKind::Exact, basename, icon));
                Some(0)
            }
            (Some(index), true) => {
                self.rules.remove(index);
                None
            }
            (None, true) => None,
        }
    }
}

impl From<Vec<Rule>> for RuleStore {
    fn from(rules: Vec<Rule>) -> Self {
        Self { rules }
    }
}

impl FromIterator<Rule> for RuleStore {
    fn from_iter<T: IntoIterator<Item = Rule>>(iter: T) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RuleStore {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
