//! Icon token encoding.
//!
//! An icon is stored as a plain string and comes in three shapes, told
//! apart by inspection alone:
//! - `__native_pin__` asks the host to draw its own pin glyph
//! - `lucide:<name>` names an icon from the Lucide set
//! - anything else is literal text (usually an emoji) drawn verbatim

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel for "render the host's built-in pin indicator".
pub const NATIVE_PIN_ICON: &str = "__native_pin__";

/// Prefix marking a reference into the Lucide icon set.
pub const LUCIDE_PREFIX: &str = "lucide:";

/// Fallback glyph when the host cannot supply its native pin.
pub const FALLBACK_PIN_GLYPH: &str = "📌";

/// A classified icon string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IconToken {
    /// The host's native pin glyph.
    NativePin,
    /// A named icon from the Lucide set (prefix stripped).
    Named(String),
    /// Literal text rendered as-is.
    Literal(String),
}

impl IconToken {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw == NATIVE_PIN_ICON {
            Self::NativePin
        } else if let Some(name) = raw.strip_prefix(LUCIDE_PREFIX) {
            Self::Named(name.to_string())
        } else {
            Self::Literal(raw.to_string())
        }
    }

    /// The persisted string form.
    #[must_use]
    pub fn to_raw(&self) -> String {
        match self {
            Self::NativePin => NATIVE_PIN_ICON.to_string(),
            Self::Named(name) => format!("{LUCIDE_PREFIX}{name}"),
            Self::Literal(text) => text.clone(),
        }
    }

    /// Kind label used in machine-readable output.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NativePin => "native-pin",
            Self::Named(_) => "lucide",
            Self::Literal(_) => "literal",
        }
    }
}

impl From<String> for IconToken {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<IconToken> for String {
    fn from(token: IconToken) -> Self {
        token.to_raw()
    }
}

impl fmt::Display for IconToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_raw())
    }
}
