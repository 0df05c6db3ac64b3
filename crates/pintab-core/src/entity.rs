//! Entity type: a note as seen by the rules engine.

use serde::Serialize;
use serde_yaml::{Mapping, Value};
use std::collections::BTreeSet;

/// A note being evaluated. Supplied by the vault index; the engine only
/// reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Entity {
    /// File name without directory or extension (`"Home"` for `Work/Home.md`).
    pub basename: String,
    /// Vault-relative path with `/` separators.
    pub path: String,
    /// Frontmatter and inline tags, normalized with [`normalize_tag`].
    pub tags: BTreeSet<String>,
    /// Parsed YAML frontmatter; empty when the note has none.
    #[serde(skip)]
    pub frontmatter: Mapping,
}

impl Entity {
    /// Build an entity from its vault-relative path, deriving the basename.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            basename: basename_of(&path).to_string(),
            path,
            tags: BTreeSet::new(),
            frontmatter: Mapping::new(),
        }
    }

    /// Add tags, normalizing each one.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tags
            .extend(tags.into_iter().map(|t| normalize_tag(t.as_ref())));
        self
    }

    #[must_use]
    pub fn with_frontmatter(mut self, frontmatter: Mapping) -> Self {
        self.frontmatter = frontmatter;
        self
    }

    /// Set a single frontmatter string property.
    #[must_use]
    pub fn with_property(mut self, key: &str, value: impl Into<String>) -> Self {
        self.frontmatter
            .insert(Value::String(key.to_string()), Value::String(value.into()));
        self
    }

    /// Whether the entity carries `tag` after normalization.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(&normalize_tag(tag))
    }

    /// The metadata override stored under `key`.
    ///
    /// Non-empty strings are returned as-is and non-zero numbers in their
    /// display form. Everything else (booleans, null, lists, maps, empty
    /// strings, zero) counts as absent.
    #[must_use]
    pub fn metadata_value(&self, key: &str) -> Option<String> {
        match self.frontmatter.get(key)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => number_override(n),
            _ => None,
        }
    }
}

/// Display form of a numeric override, written the way the host prints
/// numbers: whole floats drop their fraction (`7.0` is `"7"`). Zero and NaN
/// count as absent.
fn number_override(n: &serde_yaml::Number) -> Option<String> {
    if !n.is_f64() {
        return (n.as_f64() != Some(0.0)).then(|| n.to_string());
    }
    let f = n.as_f64()?;
    if f == 0.0 || f.is_nan() {
        None
    } else if f.is_infinite() {
        Some(if f > 0.0 { "Infinity" } else { "-Infinity" }.to_string())
    } else if f.fract() == 0.0 && f.abs() < 1e21 {
        Some(format!("{f:.0}"))
    } else {
        Some(f.to_string())
    }
}

/// Strip one leading `#` and fold to lowercase.
#[must_use]
pub fn normalize_tag(tag: &str) -> String {
    tag.strip_prefix('#').unwrap_or(tag).to_lowercase()
}

/// Last path segment with its extension removed.
///
/// Dotfiles keep their full name (`.hidden` stays `.hidden`).
#[must_use]
pub fn basename_of(path: &str) -> &str {
    let file = path.rsplit('/').next().unwrap_or(path);
    match file.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => file,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basename_strips_folders_and_extension() {
        assert_eq!(basename_of("Work/Home.md"), "Home");
        assert_eq!(basename_of("Home.md"), "Home");
        assert_eq!(basename_of("a/b/2024-01-15.md"), "2024-01-15");
        assert_eq!(basename_of("v1.2 notes.md"), "v1.2 notes");
        assert_eq!(basename_of("README"), "README");
        assert_eq!(basename_of(".hidden"), ".hidden");
    }

    #[test]
    fn new_derives_basename() {
        let e = Entity::new("Projects/Alpha/Plan.md");
        assert_eq!(e.basename, "Plan");
        assert_eq!(e.path, "Projects/Alpha/Plan.md");
    }

    #[test]
    fn tags_are_normalized_on_insert_and_lookup() {
        let e = Entity::new("a.md").with_tags(["#Work", "urgent"]);
        assert!(e.tags.contains("work"));
        assert!(e.has_tag("WORK"));
        assert!(e.has_tag("#Urgent"));
        assert!(!e.has_tag("project"));
    }

    #[test]
    fn normalize_strips_only_one_hash() {
        assert_eq!(normalize_tag("##x"), "#x");
        assert_eq!(normalize_tag("Project/Alpha"), "project/alpha");
    }

    #[test]
    fn metadata_value_ignores_empty_and_non_scalar_values() {
        let yaml = "pinned-icon: ''\ncount: 0\nflag: true\nlist: [a]\nnum: 7\n";
        let fm: Mapping = serde_yaml::from_str(yaml).expect("yaml");
        let e = Entity::new("a.md").with_frontmatter(fm);
        assert_eq!(e.metadata_value("pinned-icon"), None);
        assert_eq!(e.metadata_value("count"), None);
        assert_eq!(e.metadata_value("flag"), None);
        assert_eq!(e.metadata_value("list"), None);
        assert_eq!(e.metadata_value("missing"), None);
        assert_eq!(e.metadata_value("num"), Some("7".to_string()));
    }

    #[test]
    fn metadata_value_prints_whole_floats_without_fraction() {
        let yaml = "whole: 7.0\nneg: -3.0\nfrac: 2.5\nzero: 0.0\nnan: .nan\ninf: .inf\n";
        let fm: Mapping = serde_yaml::from_str(yaml).expect("yaml");
        let e = Entity::new("a.md").with_frontmatter(fm);
        assert_eq!(e.metadata_value("whole"), Some("7".to_string()));
        assert_eq!(e.metadata_value("neg"), Some("-3".to_string()));
        assert_eq!(e.metadata_value("frac"), Some("2.5".to_string()));
        assert_eq!(e.metadata_value("zero"), None);
        assert_eq!(e.metadata_value("nan"), None);
        assert_eq!(e.metadata_value("inf"), Some("Infinity".to_string()));
    }

    #[test]
    fn metadata_value_returns_string_property() {
        let e = Entity::new("a.md").with_property("pinned-icon", "🔥");
        assert_eq!(e.metadata_value("pinned-icon"), Some("🔥".to_string()));
    }
}
