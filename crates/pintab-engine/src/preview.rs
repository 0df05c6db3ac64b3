//! Pattern preview: which notes a pattern would match before it becomes a rule.

use pintab_core::{Entity, RuleKind};

use crate::matcher::matches_pattern;

/// Every entity `pattern` matches under `kind`, in input order.
#[must_use]
pub fn preview<'e>(kind: &RuleKind, pattern: &str, entities: &'e [Entity]) -> Vec<&'e Entity> {
    entities
        .iter()
        .filter(|entity| matches_pattern(kind, pattern, entity))
        .collect()
}
