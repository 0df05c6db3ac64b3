//! Rule types: a match kind, a pattern, and the icon it assigns.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::icon::IconToken;

/// How a rule's pattern is tested against an entity.
///
/// Persisted as its kebab-case tag (`"starts-with"`, `"regex"`, ...). A tag
/// this version does not know deserializes into [`RuleKind::Unknown`] with
/// the raw tag preserved, so settings written by a newer version survive a
/// load/save cycle and the rule simply never matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RuleKind {
    /// Basename equals the pattern.
    Exact,
    /// Path is the folder itself or lies beneath it.
    Folder,
    StartsWith,
    EndsWith,
    Contains,
    /// Regular expression searched in the basename.
    Regex,
    /// Normalized tag equality.
    Tag,
    Unknown(String),
}

impl RuleKind {
    /// Every kind this version can evaluate, in display order.
    pub const KNOWN: [RuleKind; 7] = [
        RuleKind::Exact,
        RuleKind::Folder,
        RuleKind::StartsWith,
        RuleKind::EndsWith,
        RuleKind::Contains,
        RuleKind::Regex,
        RuleKind::Tag,
    ];

    /// The persisted tag for this kind.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Exact => "exact",
            Self::Folder => "folder",
            Self::StartsWith => "starts-with",
            Self::EndsWith => "ends-with",
            Self::Contains => "contains",
            Self::Regex => "regex",
            Self::Tag => "tag",
            Self::Unknown(tag) => tag,
        }
    }

    /// Short label shown next to a rule in listings.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Exact => "Exact match",
            Self::Folder => "Folder",
            Self::StartsWith => "Starts with",
            Self::EndsWith => "Ends with",
            Self::Contains => "Contains",
            Self::Regex => "Regex (advanced)",
            Self::Tag => "Tag",
            Self::Unknown(_) => "Unsupported",
        }
    }

    #[must_use]
    pub fn description(&self) -> &str {
        match self {
            Self::Exact => "Matches file names exactly (case-sensitive)",
            Self::Folder => "Matches all files in a folder and subfolders",
            Self::StartsWith => "Matches files that start with this text",
            Self::EndsWith => "Matches files that end with this text",
            Self::Contains => "Matches files containing this text anywhere",
            Self::Regex => "Use a regular expression for complex patterns",
            Self::Tag => "Matches files carrying this tag",
            Self::Unknown(_) => "Not supported by this version; never matches",
        }
    }

    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl From<String> for RuleKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "exact" => Self::Exact,
            "folder" => Self::Folder,
            "starts-with" => Self::StartsWith,
            "ends-with" => Self::EndsWith,
            "contains" => Self::Contains,
            "regex" => Self::Regex,
            "tag" => Self::Tag,
            _ => Self::Unknown(tag),
        }
    }
}

impl From<RuleKind> for String {
    fn from(kind: RuleKind) -> Self {
        match kind {
            RuleKind::Unknown(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

/// Strict parsing for user input: unknown tags are rejected instead of
/// being carried as [`RuleKind::Unknown`].
impl FromStr for RuleKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match RuleKind::from(s.to_string()) {
            RuleKind::Unknown(tag) => {
                let known: Vec<&str> = RuleKind::KNOWN.iter().map(RuleKind::as_str).collect();
                Err(format!(
                    "unknown rule type '{tag}': expected one of {}",
                    known.join(", ")
                ))
            }
            kind => Ok(kind),
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single icon mapping. Position in the rule store is its priority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(rename = "type")]
    pub kind: RuleKind,
    #[serde(rename = "match", default)]
    pub pattern: String,
    #[serde(default)]
    pub icon: String,
}

impl Rule {
    pub fn new(kind: RuleKind, pattern: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            kind,
            pattern: pattern.into(),
            icon: icon.into(),
        }
    }

    /// A rule takes part in resolution only with both a pattern and an icon.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.pattern.is_empty() && !self.icon.is_empty()
    }

    #[must_use]
    pub fn icon_token(&self) -> IconToken {
        IconToken::parse(&self.icon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_kind_serializes_as_kebab_case_tag() {
        let json = serde_json::to_string(&RuleKind::StartsWith).expect("serialize");
        assert_eq!(json, "\"starts-with\"");
        let back: RuleKind = serde_json::from_str("\"ends-with\"").expect("deserialize");
        assert_eq!(back, RuleKind::EndsWith);
    }

    #[test]
    fn unknown_rule_kind_survives_roundtrip() {
        let rule: Rule =
            serde_json::from_str(r#"{"type":"glob","match":"*.md","icon":"x"}"#).expect("parse");
        assert_eq!(rule.kind, RuleKind::Unknown("glob".to_string()));

        let json = serde_json::to_string(&rule).expect("serialize");
        assert!(json.contains(r#""type":"glob""#));
    }

    #[test]
    fn from_str_rejects_unknown_tags() {
        assert_eq!("tag".parse::<RuleKind>(), Ok(RuleKind::Tag));
        let err = "glob".parse::<RuleKind>().unwrap_err();
        assert!(err.contains("glob"));
        assert!(err.contains("starts-with"));
    }

    #[test]
    fn rule_uses_persisted_field_names() {
        let rule = Rule::new(RuleKind::Folder, "Work", "💼");
        let json = serde_json::to_value(&rule).expect("serialize");
        assert_eq!(json["type"], "folder");
        assert_eq!(json["match"], "Work");
        assert_eq!(json["icon"], "💼");
    }

    #[test]
    fn missing_match_and_icon_default_to_empty() {
        let rule: Rule = serde_json::from_str(r#"{"type":"exact"}"#).expect("parse");
        assert!(rule.pattern.is_empty());
        assert!(!rule.is_active());
    }
}
