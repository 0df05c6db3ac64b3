//! Vault scanning: markdown files on disk to [`Entity`] values.

use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, info, warn};

use pintab_core::error::PintabError;
use pintab_core::frontmatter::entity_from_markdown;
use pintab_core::Entity;

/// Whether `name` is a hidden entry (`.obsidian`, `.git`, `.trash`, ...).
pub(crate) fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Vault-relative path of `path` with `/` separators.
///
/// Returns `None` for paths outside `root` and for paths with `..`
/// components.
#[must_use]
pub fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<&str> = rel
        .components()
        .map(|c| match c {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .collect::<Option<_>>()?;
    Some(parts.join("/"))
}

fn is_markdown(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("md")
}

/// Scan every markdown note under `root`, sorted by vault-relative path.
///
/// Hidden directories are skipped. A note that cannot be read is logged and
/// left out; invalid UTF-8 is replaced rather than rejected.
///
/// # Errors
///
/// Returns [`PintabError::Vault`] if `root` is not a directory and
/// [`PintabError::Io`] if a directory cannot be listed.
pub fn scan_vault(root: &Path) -> Result<Vec<Entity>, PintabError> {
    if !root.is_dir() {
        return Err(PintabError::Vault(format!(
            "{} is not a directory",
            root.display()
        )));
    }

    let mut files = Vec::new();
    collect_markdown(root, &mut files)?;

    let mut entities: Vec<Entity> = files
        .iter()
        .filter_map(|path| match scan_entity(root, path) {
            Ok(entity) => Some(entity),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping unreadable note");
                None
            }
        })
        .collect();
    entities.sort_by(|a, b| a.path.cmp(&b.path));

    info!(root = %root.display(), notes = entities.len(), "vault scanned");
    Ok(entities)
}

fn collect_markdown(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), PintabError> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let hidden = entry.file_name().to_str().is_none_or(is_hidden);
        if hidden {
            debug!(path = %path.display(), "skipping hidden entry");
            continue;
        }
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            collect_markdown(&path, files)?;
        } else if file_type.is_file() && is_markdown(&path) {
            files.push(path);
        }
    }
    Ok(())
}

/// Load a single note as an entity.
///
/// `path` may be absolute or relative to `root`.
///
/// # Errors
///
/// Returns [`PintabError::Vault`] if the path lies outside the vault, has
/// `..` components, or is not valid UTF-8, and [`PintabError::Io`] if the
/// file cannot be read or its content is not UTF-8.
pub fn load_entity(root: &Path, path: &Path) -> Result<Entity, PintabError> {
    let full = if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    };
    let rel = relative_path(root, &full).ok_or_else(|| {
        PintabError::Vault(format!(
            "{} is not inside the vault at {}",
            full.display(),
            root.display()
        ))
    })?;

    let content = fs::read_to_string(&full)?;
    Ok(entity_from_markdown(&rel, &content))
}

/// Read a note found by [`collect_markdown`]; `path` already includes `root`.
fn scan_entity(root: &Path, path: &Path) -> Result<Entity, PintabError> {
    let rel = relative_path(root, path)
        .ok_or_else(|| PintabError::Vault(format!("{} has no vault path", path.display())))?;
    let bytes = fs::read(path)?;
    Ok(entity_from_markdown(&rel, &String::from_utf8_lossy(&bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn scan_finds_nested_markdown_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, "Work/Home.md", "# Home at work");
        write(root, "Home.md", "# Home");
        write(root, "Work/Clients/Acme.md", "");
        write(root, "notes.txt", "not markdown");

        let entities = scan_vault(root).unwrap();
        let paths: Vec<&str> = entities.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, ["Home.md", "Work/Clients/Acme.md", "Work/Home.md"]);
        assert_eq!(entities[2].basename, "Home");
    }

    #[test]
    fn scan_skips_hidden_directories() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, ".obsidian/workspace.md", "");
        write(root, ".trash/Old.md", "");
        write(root, "Visible.md", "");

        let entities = scan_vault(root).unwrap();
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].path, "Visible.md");
    }

    #[test]
    fn scan_reads_tags_and_frontmatter() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(
            root,
            "Plan.md",
            "---\npinned-icon: \"🚀\"\ntags: [Project]\n---\nBody #Urgent\n",
        );

        let entities = scan_vault(root).unwrap();
        let plan = &entities[0];
        assert!(plan.has_tag("project"));
        assert!(plan.has_tag("urgent"));
        assert_eq!(plan.metadata_value("pinned-icon"), Some("🚀".to_string()));
    }

    #[test]
    fn scan_rejects_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let result = scan_vault(&dir.path().join("missing"));
        assert!(matches!(result, Err(PintabError::Vault(_))));
    }

    #[test]
    fn load_entity_accepts_relative_and_absolute_paths() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, "Work/Home.md", "");

        let rel = load_entity(root, Path::new("Work/Home.md")).unwrap();
        let abs = load_entity(root, &root.join("Work").join("Home.md")).unwrap();
        assert_eq!(rel.path, "Work/Home.md");
        assert_eq!(rel, abs);
    }

    #[test]
    fn scan_accepts_relative_root() {
        let dir = tempfile::Builder::new()
            .prefix("vault")
            .tempdir_in(".")
            .unwrap();
        let root = Path::new(dir.path().file_name().unwrap());
        assert!(root.is_relative());
        write(root, "Home.md", "# Home");
        write(root, "Work/Home.md", "# Home at work");

        let entities = scan_vault(root).unwrap();
        let paths: Vec<&str> = entities.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, ["Home.md", "Work/Home.md"]);
    }

    #[test]
    fn scan_keeps_going_past_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, "Good.md", "#ok");
        fs::write(root.join("Latin1.md"), b"caf\xe9 #menu\n").unwrap();

        let entities = scan_vault(root).unwrap();
        let paths: Vec<&str> = entities.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, ["Good.md", "Latin1.md"]);
        assert!(entities[1].has_tag("menu"));

        assert!(load_entity(root, Path::new("Latin1.md")).is_err());
    }

    #[test]
    fn load_entity_rejects_parent_components() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, "Home.md", "");
        write(root, "Work/Notes.md", "");

        let result = load_entity(root, Path::new("Work/../Home.md"));
        assert!(matches!(result, Err(PintabError::Vault(_))));
        assert_eq!(relative_path(root, &root.join("Work/../Home.md")), None);
    }

    #[test]
    fn load_entity_rejects_paths_outside_vault() {
        let vault = tempfile::tempdir().unwrap();
        let other = tempfile::tempdir().unwrap();
        write(other.path(), "Stray.md", "");
        let result = load_entity(vault.path(), &other.path().join("Stray.md"));
        assert!(matches!(result, Err(PintabError::Vault(_))));
    }
}
