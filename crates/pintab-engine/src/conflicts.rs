//! Conflict (shadowing) analysis.
//!
//! A rule is shadowed for an entity when an earlier rule already claims
//! that entity, so the later rule can never supply its icon. The analysis
//! runs on demand, costs O(rules × entities) per rule, and never changes
//! resolution.

use serde::Serialize;

use pintab_core::{Entity, RuleStore, StoreError};

use crate::resolver::{claims, first_claiming_rule};

/// An entity the analyzed rule matches but an earlier rule wins.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conflict<'e> {
    #[serde(serialize_with = "serialize_entity_path")]
    pub entity: &'e Entity,
    pub shadowing_rule_index: usize,
}

fn serialize_entity_path<S: serde::Serializer>(
    entity: &&Entity,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&entity.path)
}

/// Per-rule summary over a whole entity set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleReport<'e> {
    pub rule_index: usize,
    /// Entities the rule claims, shadowed or not.
    pub matched: usize,
    pub conflicts: Vec<Conflict<'e>>,
    /// The rule claims at least one entity and loses every one of them.
    pub unreachable: bool,
}

/// Every entity the rule at `rule_index` claims that an earlier rule
/// claims first, paired with that earlier rule's index.
///
/// # Errors
///
/// Returns [`StoreError::IndexOutOfRange`] if `rule_index` is past the end.
pub fn find_conflicts<'e>(
    store: &RuleStore,
    rule_index: usize,
    entities: &'e [Entity],
) -> Result<Vec<Conflict<'e>>, StoreError> {
    let rules = store.as_slice();
    let rule = rules.get(rule_index).ok_or(StoreError::IndexOutOfRange {
        index: rule_index,
        len: rules.len(),
    })?;

    let earlier = &rules[..rule_index];
    Ok(entities
        .iter()
        .filter(|entity| claims(rule, entity))
        .filter_map(|entity| {
            first_claiming_rule(earlier, entity).map(|shadowing_rule_index| Conflict {
                entity,
                shadowing_rule_index,
            })
        })
        .collect())
}

/// Analyze every rule in the store.
#[must_use]
pub fn analyze<'e>(store: &RuleStore, entities: &'e [Entity]) -> Vec<RuleReport<'e>> {
    let rules = store.as_slice();
    rules
        .iter()
        .enumerate()
        .map(|(rule_index, rule)| {
            let earlier = &rules[..rule_index];
            let mut matched = 0;
            let mut conflicts = Vec::new();
            for entity in entities.iter().filter(|e| claims(rule, e)) {
                matched += 1;
                if let Some(shadowing_rule_index) = first_claiming_rule(earlier, entity) {
                    conflicts.push(Conflict {
                        entity,
                        shadowing_rule_index,
                    });
                }
            }
            RuleReport {
                rule_index,
                matched,
                unreachable: matched > 0 && conflicts.len() == matched,
                conflicts,
            }
        })
        .collect()
}

/// Move the rule at `rule_index` directly above `shadowing_rule_index`.
///
/// # Errors
///
/// Returns [`StoreError::IndexOutOfRange`] if either index is past the end.
pub fn promote(
    store: &mut RuleStore,
    rule_index: usize,
    shadowing_rule_index: usize,
) -> Result<(), StoreError> {
    store.move_to(rule_index, shadowing_rule_index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::resolve;
    use pintab_core::{IconToken, Rule, RuleKind, Settings};

    fn work_home() -> RuleStore {
        RuleStore::from(vec![
            Rule::new(RuleKind::Folder, "Work", "💼"),
            Rule::new(RuleKind::Exact, "Home", "🏠"),
        ])
    }

    #[test]
    fn exact_rule_is_shadowed_inside_folder() {
        let store = work_home();
        let entities = vec![Entity::new("Work/Home.md"), Entity::new("Home.md")];
        let conflicts = find_conflicts(&store, 1, &entities).unwrap();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].entity.path, "Work/Home.md");
        assert_eq!(conflicts[0].shadowing_rule_index, 0);
    }

    #[test]
    fn first_rule_has_no_conflicts() {
        let store = work_home();
        let entities = vec![Entity::new("Work/Home.md")];
        assert!(find_conflicts(&store, 0, &entities).unwrap().is_empty());
    }

    #[test]
    fn reports_first_shadowing_rule_only() {
        let store = RuleStore::from(vec![
            Rule::new(RuleKind::StartsWith, "Ho", "1"),
            Rule::new(RuleKind::Contains, "om", "2"),
            Rule::new(RuleKind::Exact, "Home", "3"),
        ]);
        let entities = vec![Entity::new("Home.md")];
        let conflicts = find_conflicts(&store, 2, &entities).unwrap();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].shadowing_rule_index, 0);
    }

    #[test]
    fn iconless_earlier_rule_does_not_shadow() {
        let store = RuleStore::from(vec![
            Rule::new(RuleKind::Exact, "Home", ""),
            Rule::new(RuleKind::Exact, "Home", "🏠"),
        ]);
        let entities = vec![Entity::new("Home.md")];
        assert!(find_conflicts(&store, 1, &entities).unwrap().is_empty());
    }

    #[test]
    fn duplicate_rule_is_fully_shadowed() {
        let mut store = work_home();
        store.duplicate_at(1).unwrap();
        let entities = vec![Entity::new("Home.md"), Entity::new("Work/Home.md")];
        let reports = analyze(&store, &entities);
        assert_eq!(reports.len(), 3);
        assert!(!reports[1].unreachable);
        assert_eq!(reports[1].matched, 2);
        assert!(reports[2].unreachable);
        assert_eq!(reports[2].conflicts.len(), 2);
    }

    #[test]
    fn rule_matching_nothing_is_not_unreachable() {
        let store = RuleStore::from(vec![Rule::new(RuleKind::Exact, "Nope", "x")]);
        let entities = vec![Entity::new("Home.md")];
        let reports = analyze(&store, &entities);
        assert_eq!(reports[0].matched, 0);
        assert!(!reports[0].unreachable);
    }

    #[test]
    fn out_of_range_rule_index_is_an_error() {
        let store = work_home();
        assert_eq!(
            find_conflicts(&store, 2, &[]),
            Err(StoreError::IndexOutOfRange { index: 2, len: 2 })
        );
    }

    #[test]
    fn promote_resolves_the_conflict() {
        let mut store = work_home();
        let entities = vec![Entity::new("Work/Home.md")];
        let conflict = find_conflicts(&store, 1, &entities).unwrap()[0].clone();
        promote(&mut store, 1, conflict.shadowing_rule_index).unwrap();

        assert_eq!(store.get(0).unwrap().kind, RuleKind::Exact);
        assert!(find_conflicts(&store, 1, &entities).unwrap().is_empty());
        let settings = Settings {
            icon_mappings: store,
            ..Settings::default()
        };
        assert_eq!(
            resolve(&entities[0], &settings),
            Some(IconToken::Literal("🏠".to_string()))
        );
    }

    #[test]
    fn conflicts_serialize_entity_as_path() {
        let store = work_home();
        let entities = vec![Entity::new("Work/Home.md")];
        let conflicts = find_conflicts(&store, 1, &entities).unwrap();
        let json = serde_json::to_value(&conflicts).unwrap();
        assert_eq!(json[0]["entity"], "Work/Home.md");
        assert_eq!(json[0]["shadowing_rule_index"], 0);
    }
}
