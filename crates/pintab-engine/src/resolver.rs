//! Icon resolution: metadata override, then first claiming rule, then the
//! configured default.
//!
//! Resolution holds no state. Every call recomputes the answer from the
//! current settings and entity, so callers re-run [`reevaluate`] whenever
//! the vault, the rules, or the settings change.

use serde::Serialize;
use tracing::debug;

use pintab_core::{Entity, IconToken, Rule, Settings};

use crate::matcher::matches;

/// Where a resolved icon came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum IconSource {
    /// The entity's own frontmatter property.
    Frontmatter,
    /// The rule at this index of the rule store.
    Rule { index: usize },
    /// The configured fallback icon.
    Default,
}

/// A resolved icon together with its origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedIcon {
    pub icon: IconToken,
    pub source: IconSource,
}

/// The resolution outcome for one entity.
///
/// `resolved` is `None` when the entity gets no icon and any previously
/// applied marker should be removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub path: String,
    #[serde(flatten)]
    pub resolved: Option<ResolvedIcon>,
}

/// Whether `rule` takes `entity` during resolution: the rule has an icon
/// and its pattern matches.
///
/// The conflict analyzer uses the same predicate so its diagnostics always
/// agree with what resolution does.
#[must_use]
pub fn claims(rule: &Rule, entity: &Entity) -> bool {
    !rule.icon.is_empty() && matches(entity, rule)
}

/// Index of the first rule that claims `entity`.
#[must_use]
pub fn first_claiming_rule(rules: &[Rule], entity: &Entity) -> Option<usize> {
    rules.iter().position(|rule| claims(rule, entity))
}

/// Resolve the icon for `entity`, reporting where it came from.
#[must_use]
pub fn explain(entity: &Entity, settings: &Settings) -> Option<ResolvedIcon> {
    if settings.enable_frontmatter {
        if let Some(raw) = entity.metadata_value(&settings.frontmatter_property) {
            debug!(path = %entity.path, "icon from frontmatter");
            return Some(ResolvedIcon {
                icon: IconToken::parse(&raw),
                source: IconSource::Frontmatter,
            });
        }
    }

    let rules = settings.icon_mappings.as_slice();
    if let Some(index) = first_claiming_rule(rules, entity) {
        debug!(path = %entity.path, index, "icon from rule");
        return Some(ResolvedIcon {
            icon: rules[index].icon_token(),
            source: IconSource::Rule { index },
        });
    }

    settings.default_icon_token().map(|icon| ResolvedIcon {
        icon,
        source: IconSource::Default,
    })
}

/// The icon `entity` should display, if any.
#[must_use]
pub fn resolve(entity: &Entity, settings: &Settings) -> Option<IconToken> {
    explain(entity, settings).map(|r| r.icon)
}

/// Resolve every entity, preserving input order.
#[must_use]
pub fn reevaluate(entities: &[Entity], settings: &Settings) -> Vec<Resolution> {
    entities
        .iter()
        .map(|entity| Resolution {
            path: entity.path.clone(),
            resolved: explain(entity, settings),
        })
        .collect()
}
