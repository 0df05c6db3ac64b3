//! # pintab-engine
//!
//! The icon rules engine. Everything here is a pure function of the rule
//! store, the entity set, and the settings; nothing is cached between
//! calls.
//!
//! Includes:
//! - Pattern matcher ([`matcher`])
//! - Icon resolver with the override → rule → default chain ([`resolver`])
//! - Conflict analyzer for shadowed rules ([`conflicts`])
//! - Pattern preview for rule authoring ([`preview`])
//! - Result formatter (JSON, Table, Markdown)

pub mod conflicts;
pub mod formatter;
pub mod matcher;
pub mod preview;
pub mod resolver;

pub use conflicts::{analyze, find_conflicts, promote, Conflict, RuleReport};
pub use formatter::{format_records, OutputFormat};
pub use matcher::{matches, matches_pattern};
pub use preview::preview;
pub use resolver::{explain, reevaluate, resolve, IconSource, Resolution, ResolvedIcon};
