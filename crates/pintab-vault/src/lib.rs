//! # pintab-vault
//!
//! File system collaborators for the pintab engine.
//!
//! The vault on disk is the source of truth for notes. This crate turns
//! it into [`Entity`](pintab_core::Entity) values, persists the settings
//! blob, and watches both for changes so callers know when to
//! re-evaluate.

pub mod scanner;
pub mod settings_file;
pub mod watcher;

pub use scanner::{load_entity, relative_path, scan_vault};
pub use settings_file::{load_settings, save_settings};
pub use watcher::{VaultEvent, VaultWatcher};
