//! Rule predicate evaluation.
//!
//! Every function here is pure and total. A pattern that cannot be
//! evaluated (empty, malformed regex, unknown rule kind) is a non-match.

use regex::Regex;
use tracing::debug;

use pintab_core::entity::normalize_tag;
use pintab_core::{Entity, Rule, RuleKind};

/// Whether `rule`'s pattern matches `entity`.
///
/// Ignores the rule's icon; see [`crate::resolver::claims`] for the
/// predicate resolution actually uses.
#[must_use]
pub fn matches(entity: &Entity, rule: &Rule) -> bool {
    matches_pattern(&rule.kind, &rule.pattern, entity)
}

/// The rule predicate without a rule, for previewing a pattern.
#[must_use]
pub fn matches_pattern(kind: &RuleKind, pattern: &str, entity: &Entity) -> bool {
    if pattern.is_empty() {
        return false;
    }

    match kind {
        RuleKind::Exact => entity.basename == pattern,
        RuleKind::Folder => in_folder(&entity.path, pattern),
        RuleKind::StartsWith => entity.basename.starts_with(pattern),
        RuleKind::EndsWith => entity.basename.ends_with(pattern),
        RuleKind::Contains => entity.basename.contains(pattern),
        RuleKind::Regex => regex_matches(pattern, &entity.basename),
        RuleKind::Tag => entity.tags.contains(&normalize_tag(pattern)),
        RuleKind::Unknown(tag) => {
            debug!(kind = %tag, "unsupported rule type never matches");
            false
        }
    }
}

/// `path` is the folder itself or lies anywhere beneath it.
fn in_folder(path: &str, folder: &str) -> bool {
    match path.strip_prefix(folder) {
        Some("") => true,
        Some(rest) => rest.starts_with('/'),
        None => false,
    }
}

fn regex_matches(pattern: &str, haystack: &str) -> bool {
    match Regex::new(pattern) {
        Ok(re) => re.is_match(haystack),
        Err(e) => {
            debug!(pattern, error = %e, "invalid regex treated as no match");
            false
        }
    }
}
