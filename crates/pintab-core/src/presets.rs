//! Built-in pattern presets for common note naming schemes.

use crate::error::PintabError;
use crate::rule::{Rule, RuleKind};

/// A ready-made rule with a human-readable name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preset {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: RuleKind,
    pub pattern: &'static str,
    pub icon: &'static str,
}

impl Preset {
    #[must_use]
    pub fn to_rule(&self) -> Rule {
        Rule::new(self.kind.clone(), self.pattern, self.icon)
    }
}

/// The built-in preset catalogue.
#[must_use]
pub fn builtin() -> Vec<Preset> {
    vec![
        Preset {
            name: "Daily notes",
            description: "YYYY-MM-DD format (2024-01-15)",
            kind: RuleKind::Regex,
            pattern: r"^\d{4}-\d{2}-\d{2}$",
            icon: "📅",
        },
        Preset {
            name: "Weekly notes",
            description: "YYYY-Www format (2024-W03)",
            kind: RuleKind::Regex,
            pattern: r"^\d{4}-W\d{2}$",
            icon: "📆",
        },
        Preset {
            name: "Monthly notes",
            description: "YYYY-MM format (2024-01)",
            kind: RuleKind::Regex,
            pattern: r"^\d{4}-\d{2}$",
            icon: "🗓️",
        },
        Preset {
            name: "Quarterly notes",
            description: "YYYY-Qn format (2024-Q1)",
            kind: RuleKind::Regex,
            pattern: r"^\d{4}-Q[1-4]$",
            icon: "📊",
        },
        Preset {
            name: "Meeting notes",
            description: "Files starting with \"Meeting\"",
            kind: RuleKind::StartsWith,
            pattern: "Meeting",
            icon: "👥",
        },
        Preset {
            name: "Index files",
            description: "Files named \"Index\" or \"index\"",
            kind: RuleKind::Regex,
            pattern: "^[Ii]ndex$",
            icon: "📑",
        },
        Preset {
            name: "README files",
            description: "Files named README",
            kind: RuleKind::Exact,
            pattern: "README",
            icon: "📖",
        },
        Preset {
            name: "Templates",
            description: "Files starting with \"Template\"",
            kind: RuleKind::StartsWith,
            pattern: "Template",
            icon: "📋",
        },
        Preset {
            name: "Archive files",
            description: "Files containing \"archive\"",
            kind: RuleKind::Contains,
            pattern: "archive",
            icon: "🗃️",
        },
        Preset {
            name: "Todo/Task files",
            description: "Files with TODO or Task",
            kind: RuleKind::Regex,
            pattern: "(TODO|[Tt]ask)",
            icon: "✅",
        },
    ]
}

/// Look up a preset by name, ignoring ASCII case.
///
/// # Errors
///
/// Returns [`PintabError::UnknownPreset`] if no preset has that name.
pub fn find(name: &str) -> Result<Preset, PintabError> {
    builtin()
        .into_iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| PintabError::UnknownPreset(name.to_string()))
}
