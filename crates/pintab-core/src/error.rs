//! Error types for pintab.

use thiserror::Error;

/// Top-level result type for pintab operations.
pub type Result<T> = std::result::Result<T, PintabError>;

/// Top-level error type for pintab.
///
/// Malformed user data (bad regex, empty pattern, unknown rule type) is
/// never an error; it degrades to "no match". Errors are reserved for
/// caller contract violations and I/O.
#[derive(Debug, Error)]
pub enum PintabError {
    #[error("rule store error: {0}")]
    Store(#[from] StoreError),

    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    #[error("vault error: {0}")]
    Vault(String),

    #[error("settings error: {0}")]
    Settings(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Errors raised by explicit rule store mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("rule index {index} is out of range (store holds {len} rules)")]
    IndexOutOfRange { index: usize, len: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_display_human_readable_messages() {
        let err = StoreError::IndexOutOfRange { index: 4, len: 2 };
        let msg = err.to_string();
        assert!(msg.contains('4'));
        assert!(msg.contains("2 rules"));

        let err: PintabError = err.into();
        assert!(err.to_string().starts_with("rule store error"));

        let err = PintabError::UnknownPreset("Nightly notes".to_string());
        assert!(err.to_string().contains("Nightly notes"));
    }
}
