use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the roadatlas library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Border adjacency source could not be opened or read.
    #[error("failed to read border data from {path}")]
    BorderSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Capital distance source could not be opened or read.
    #[error("failed to read capital distance data from {path}")]
    DistanceSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// State identity source could not be opened or read.
    #[error("failed to read state identity data from {path}")]
    IdentitySource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Raised when an alias table entry redefines an already-mapped alias key.
    #[error("duplicate alias key {alias:?} (already maps to {existing:?})")]
    DuplicateAlias { alias: String, existing: String },

    /// Raised when a country name could not be resolved to a canonical country.
    #[error("unknown country name: {name}{}", format_suggestions(.suggestions))]
    UnknownCountry {
        name: String,
        suggestions: Vec<String>,
    },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Wrapper for CSV parsing errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
