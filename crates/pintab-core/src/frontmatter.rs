//! YAML frontmatter and tag extraction for markdown notes.
//!
//! Handles the `---` delimited YAML frontmatter in markdown files.
//! Format:
//! ```markdown
//! ---
//! pinned-icon: "🔥"
//! tags: [project, "#urgent"]
//! ---
//!
//! Body with #inline tags.
//! ```
//!
//! Unlike strict document formats, notes are free to omit frontmatter;
//! a missing block yields an empty mapping.

use serde_yaml::{Mapping, Value};
use tracing::warn;

use crate::entity::{normalize_tag, Entity};
use crate::error::PintabError;

/// Split a markdown file into frontmatter YAML and body content.
///
/// Returns `None` when the file does not open with a `---` block or the
/// block is never closed; the whole file is then body.
#[must_use]
pub fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    let content = content.trim_start_matches('\u{feff}');
    let after_first = content.strip_prefix("---")?;
    let after_first = after_first
        .strip_prefix("\r\n")
        .or_else(|| after_first.strip_prefix('\n'))?;

    // An empty block closes immediately.
    if let Some(rest) = after_first.strip_prefix("---") {
        return Some(("", strip_line_end(rest)));
    }

    let close_pos = after_first.find("\n---")?;
    let yaml = &after_first[..close_pos];
    let rest = &after_first[close_pos + 4..]; // skip \n---

    Some((yaml, strip_line_end(rest)))
}

fn strip_line_end(rest: &str) -> &str {
    let rest = rest.strip_prefix('\r').unwrap_or(rest);
    rest.strip_prefix('\n').unwrap_or(rest)
}

/// Parse a frontmatter block into a YAML mapping.
///
/// # Errors
///
/// Returns [`PintabError::Serialization`] if the YAML is malformed or is
/// not a mapping.
pub fn parse_frontmatter(yaml: &str) -> Result<Mapping, PintabError> {
    if yaml.trim().is_empty() {
        return Ok(Mapping::new());
    }
    match serde_yaml::from_str::<Value>(yaml) {
        Ok(Value::Mapping(map)) => Ok(map),
        Ok(Value::Null) => Ok(Mapping::new()),
        Ok(other) => Err(PintabError::Serialization(format!(
            "frontmatter must be a mapping, got {}",
            value_kind(&other)
        ))),
        Err(e) => Err(PintabError::Serialization(e.to_string())),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// Tags declared in the frontmatter `tags` property.
///
/// Accepts a list or a single string; a single string is taken whole.
#[must_use]
pub fn frontmatter_tags(frontmatter: &Mapping) -> Vec<String> {
    match frontmatter.get("tags") {
        Some(Value::Sequence(items)) => items.iter().filter_map(scalar_to_string).collect(),
        Some(value) => scalar_to_string(value).into_iter().collect(),
        None => Vec::new(),
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Inline `#tags` found in a note body.
///
/// A tag starts with `#` at the beginning of a line or after whitespace and
/// runs over letters, digits, `_`, `-` and `/`. Purely numeric runs
/// (`#123`) are not tags, and fenced code blocks are skipped.
#[must_use]
pub fn inline_tags(body: &str) -> Vec<String> {
    let mut tags = Vec::new();
    let mut in_fence = false;

    for line in body.lines() {
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }

        let mut prev: Option<char> = None;
        let mut chars = line.char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            let boundary = prev.is_none_or(char::is_whitespace);
            prev = Some(c);
            if c != '#' || !boundary {
                continue;
            }
            let start = i + 1;
            let mut end = start;
            while let Some(&(j, next)) = chars.peek() {
                if next.is_alphanumeric() || matches!(next, '_' | '-' | '/') {
                    end = j + next.len_utf8();
                    prev = Some(next);
                    chars.next();
                } else {
                    break;
                }
            }
            let tag = &line[start..end];
            if !tag.is_empty() && !tag.chars().all(|c| c.is_ascii_digit()) {
                tags.push(tag.to_string());
            }
        }
    }

    tags
}

/// Build an [`Entity`] from a note's vault-relative path and its content.
///
/// Malformed frontmatter is logged and treated as empty so a single bad
/// note never blocks resolution for the rest of the vault.
#[must_use]
pub fn entity_from_markdown(path: &str, content: &str) -> Entity {
    let (frontmatter, body) = match split_frontmatter(content) {
        Some((yaml, body)) => match parse_frontmatter(yaml) {
            Ok(map) => (map, body),
            Err(e) => {
                warn!(path, error = %e, "ignoring malformed frontmatter");
                (Mapping::new(), body)
            }
        },
        None => (Mapping::new(), content),
    };

    let mut entity = Entity::new(path);
    entity
        .tags
        .extend(frontmatter_tags(&frontmatter).iter().map(|t| normalize_tag(t)));
    entity
        .tags
        .extend(inline_tags(body).iter().map(|t| normalize_tag(t)));
    entity.frontmatter = frontmatter;
    entity
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_frontmatter_extracts_yaml_and_body() {
        let content = "---\npinned-icon: x\ntags: [a]\n---\n\n## Hello\n";
        let (yaml, body) = split_frontmatter(content).unwrap();
        assert!(yaml.contains("pinned-icon: x"));
        assert!(yaml.contains("tags: [a]"));
        assert!(body.contains("## Hello"));
    }

    #[test]
    fn split_frontmatter_requires_opener_at_start() {
        assert!(split_frontmatter("# Title\n---\na: b\n---\n").is_none());
        assert!(split_frontmatter("---not yaml\n").is_none());
    }

    #[test]
    fn split_frontmatter_requires_closer() {
        assert!(split_frontmatter("---\na: b\n").is_none());
    }

    #[test]
    fn split_frontmatter_handles_empty_block_and_crlf() {
        let (yaml, body) = split_frontmatter("---\n---\nbody").unwrap();
        assert_eq!(yaml, "");
        assert_eq!(body, "body");

        let (yaml, body) = split_frontmatter("---\r\na: b\r\n---\r\nbody").unwrap();
        assert!(yaml.contains("a: b"));
        assert_eq!(body, "body");
    }

    #[test]
    fn parse_frontmatter_rejects_non_mapping() {
        assert!(parse_frontmatter("- a\n- b").is_err());
        assert!(parse_frontmatter("a: [unclosed").is_err());
        assert!(parse_frontmatter("   ").unwrap().is_empty());
    }

    #[test]
    fn frontmatter_tags_accepts_list_or_string() {
        let map: Mapping = serde_yaml::from_str("tags: [Work, '#Urgent', 2024]").unwrap();
        assert_eq!(frontmatter_tags(&map), ["Work", "#Urgent", "2024"]);

        let map: Mapping = serde_yaml::from_str("tags: project").unwrap();
        assert_eq!(frontmatter_tags(&map), ["project"]);

        let map: Mapping = serde_yaml::from_str("title: x").unwrap();
        assert!(frontmatter_tags(&map).is_empty());
    }

    #[test]
    fn inline_tags_follow_word_boundaries() {
        let body = "Intro #alpha and #Beta/child.\nissue#3 is not a tag, #123 neither\n# Heading\n";
        assert_eq!(inline_tags(body), ["alpha", "Beta/child"]);
    }

    #[test]
    fn inline_tags_skip_fenced_code() {
        let body = "#real\n```\n#fake\n```\n#after";
        assert_eq!(inline_tags(body), ["real", "after"]);
    }

    #[test]
    fn entity_combines_frontmatter_and_inline_tags() {
        let content = "---\npinned-icon: \"🔥\"\ntags: [Work]\n---\nSee #Urgent\n";
        let entity = entity_from_markdown("Projects/Plan.md", content);
        assert_eq!(entity.basename, "Plan");
        assert!(entity.has_tag("work"));
        assert!(entity.has_tag("urgent"));
        assert_eq!(entity.metadata_value("pinned-icon"), Some("🔥".to_string()));
    }

    #[test]
    fn entity_survives_malformed_frontmatter() {
        let content = "---\ntags: [unclosed\n---\nbody #ok\n";
        let entity = entity_from_markdown("a.md", content);
        assert!(entity.frontmatter.is_empty());
        assert!(entity.has_tag("ok"));
    }
}
