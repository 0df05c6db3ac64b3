//! Persisted plugin settings.
//!
//! The settings blob holds every behaviour switch plus the rule store and
//! the recent-icon list. Keys are camelCase on disk; any key missing from
//! a loaded file takes its default.

use serde::{Deserialize, Serialize};

use crate::icon::IconToken;
use crate::recent::RecentIcons;
use crate::store::RuleStore;

/// Default frontmatter key for the per-note icon override.
pub const DEFAULT_FRONTMATTER_PROPERTY: &str = "pinned-icon";

/// Default pinned tab width in pixels.
pub const DEFAULT_PINNED_TAB_WIDTH: u32 = 40;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub shrink_pinned_tabs: bool,
    /// Width in pixels applied when pinned tabs are shrunk.
    pub pinned_tab_width: u32,
    pub show_default_icon: bool,
    /// Empty means the host's native pin glyph.
    pub default_icon: String,
    pub enable_frontmatter: bool,
    pub frontmatter_property: String,
    /// Priority order is array order.
    pub icon_mappings: RuleStore,
    pub recent_icons: RecentIcons,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            shrink_pinned_tabs: false,
            pinned_tab_width: DEFAULT_PINNED_TAB_WIDTH,
            show_default_icon: true,
            default_icon: String::new(),
            enable_frontmatter: true,
            frontmatter_property: DEFAULT_FRONTMATTER_PROPERTY.to_string(),
            icon_mappings: RuleStore::new(),
            recent_icons: RecentIcons::new(),
        }
    }
}

impl Settings {
    /// The fallback icon, or `None` when the default icon is switched off.
    #[must_use]
    pub fn default_icon_token(&self) -> Option<IconToken> {
        if !self.show_default_icon {
            return None;
        }
        if self.default_icon.is_empty() {
            Some(IconToken::NativePin)
        } else {
            Some(IconToken::parse(&self.default_icon))
        }
    }
}
