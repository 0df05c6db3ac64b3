//! Recently used icons, most recent first.

use serde::{Deserialize, Serialize};

/// Maximum number of recent icons to keep.
pub const MAX_RECENT_ICONS: usize = 12;

/// Bounded, duplicate-free list of the icons picked most recently.
///
/// Advisory only: it feeds icon pickers and never affects resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct RecentIcons {
    icons: Vec<String>,
}

impl RecentIcons {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Move `icon` to the front, dropping any earlier occurrence and
    /// anything past [`MAX_RECENT_ICONS`].
    pub fn record_use(&mut self, icon: &str) {
        if icon.is_empty() {
            return;
        }
        self.icons.retain(|i| i != icon);
        self.icons.insert(0, icon.to_string());
        self.icons.truncate(MAX_RECENT_ICONS);
    }

    #[must_use]
    pub fn list(&self) -> &[String] {
        &self.icons
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.icons.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }
}

/// Persisted lists are normalized on load: the first occurrence of an icon
/// wins and the tail past the limit is dropped.
impl From<Vec<String>> for RecentIcons {
    fn from(icons: Vec<String>) -> Self {
        let mut recent = Self::new();
        for icon in icons.iter().rev() {
            recent.record_use(icon);
        }
        recent
    }
}

impl From<RecentIcons> for Vec<String> {
    fn from(recent: RecentIcons) -> Self {
        recent.icons
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_use_dedups_most_recent_first() {
        let mut recent = RecentIcons::new();
        for icon in ["a", "b", "a", "c"] {
            recent.record_use(icon);
        }
        assert_eq!(recent.list(), ["c", "a", "b"]);
    }

    #[test]
    fn oldest_entries_are_dropped_past_the_limit() {
        let mut recent = RecentIcons::new();
        for i in 0..15 {
            recent.record_use(&i.to_string());
        }
        assert_eq!(recent.len(), MAX_RECENT_ICONS);
        assert_eq!(recent.list()[0], "14");
        assert_eq!(recent.list()[MAX_RECENT_ICONS - 1], "3");
        assert!(!recent.list().contains(&"2".to_string()));
    }

    #[test]
    fn empty_icon_is_not_recorded() {
        let mut recent = RecentIcons::new();
        recent.record_use("");
        assert!(recent.is_empty());
    }

    #[test]
    fn loading_normalizes_persisted_list() {
        let loaded: RecentIcons =
            serde_json::from_str(r#"["x","y","x","z"]"#).expect("deserialize");
        assert_eq!(loaded.list(), ["x", "y", "z"]);

        let json = serde_json::to_string(&loaded).expect("serialize");
        assert_eq!(json, r#"["x","y","z"]"#);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn list_stays_bounded_and_unique(icons in proptest::collection::vec("[a-p]", 0..40)) {
            let mut recent = RecentIcons::new();
            for icon in &icons {
                recent.record_use(icon);
            }
            let list = recent.list();
            prop_assert!(list.len() <= MAX_RECENT_ICONS);
            for (i, icon) in list.iter().enumerate() {
                prop_assert!(!list[i + 1..].contains(icon));
            }
            if let Some(last) = icons.last() {
                prop_assert_eq!(&list[0], last);
            }
        }
    }
}
