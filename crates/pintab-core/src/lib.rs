//! # pintab-core
//!
//! Core types for the pintab icon rules engine.
//!
//! This crate defines the data model shared by every other pintab crate:
//! - [`Rule`] and [`RuleKind`]: a pattern bound to an icon
//! - [`RuleStore`]: the ordered, priority-bearing rule list
//! - [`Entity`]: a note as seen by the matcher
//! - [`IconToken`]: literal / Lucide / native-pin icon encodings
//! - [`Settings`]: the persisted settings blob
//! - [`RecentIcons`]: bounded recently-used icon list
//! - Pattern presets ([`presets`])
//! - Frontmatter and tag extraction ([`frontmatter`])
//! - Error hierarchy ([`PintabError`], [`StoreError`])

pub mod entity;
pub mod error;
pub mod frontmatter;
pub mod icon;
pub mod presets;
pub mod recent;
pub mod rule;
pub mod settings;
pub mod store;

pub use entity::Entity;
pub use error::{PintabError, Result, StoreError};
pub use icon::IconToken;
pub use presets::Preset;
pub use recent::RecentIcons;
pub use rule::{Rule, RuleKind};
pub use settings::Settings;
pub use store::RuleStore;
