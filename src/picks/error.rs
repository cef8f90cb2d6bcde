use std::path::PathBuf;

/// Errors of pick persistence and bulk mutation. The store is left unchanged.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    /// File could not be read, written or replaced
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Malformed CSV structure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header
    #[error("missing column '{0}'")]
    MissingColumn(&'static str),

    /// Timestamp cell that does not parse
    #[error("line {line}: invalid time '{text}'")]
    InvalidTime {
        /// 1-based line in the file
        line: u64,
        /// Offending cell
        text: String,
    },

    /// Distance cell that is not a finite number
    #[error("line {line}: invalid distance '{text}'")]
    InvalidDistance {
        /// 1-based line in the file
        line: u64,
        /// Offending cell
        text: String,
    },

    /// Pick distance that is NaN or infinite
    #[error("pick distance must be finite, got {0}")]
    NonFiniteDistance(f64),

    /// Phase label absent from the registry
    #[error("line {line}: unknown phase '{label}'")]
    UnknownPhase {
        /// 1-based line in the file
        line: u64,
        /// Offending label
        label: String,
    },

    /// The store changed after the selection was captured
    #[error("selection is stale (captured at generation {captured}, store is at {current})")]
    StaleSelection {
        /// Generation the selection was taken at
        captured: u64,
        /// Current generation of the store
        current: u64,
    },
}

impl PersistenceError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| PersistenceError::Io { path, source }
    }
}
