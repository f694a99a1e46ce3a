//! Error types for the weatherwise-core crate.

use std::path::PathBuf;

/// Returned when a string does not name one of the known weather states.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown weather state '{0}'")]
pub struct UnknownStateName(pub String);

/// Errors raised while loading or validating a weather state table.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// The table source is not valid TOML or does not match the table layout.
    #[error("failed to parse weather state table: {0}")]
    Parse(#[from] toml::de::Error),

    /// The table file could not be read.
    #[error("failed to read weather state table {}: {source}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A table key is not a known weather state.
    #[error("table entry '{name}' is not a known weather state")]
    UnknownState {
        /// The offending key.
        name: String,
    },

    /// A transition points at a state that has no entry in the table.
    #[error("transition {from} -> '{to}' points at a state missing from the table")]
    DanglingTransition {
        /// State owning the transition.
        from: String,
        /// Target that could not be resolved.
        to: String,
    },
}
