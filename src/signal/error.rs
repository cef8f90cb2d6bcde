/// Errors raised while resolving or reading a signal source
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SourceError {
    /// The resolved range selection holds no sample
    #[error("Empty selection: no samples of '{source_id}' inside the requested bounds")]
    EmptySelection {
        /// Identifier the selection was made on
        source_id: String,
    },

    /// No array is reachable under the given identifier
    #[error("Unknown source: '{0}'")]
    UnknownSource(String),

    /// The path ends on a mapping instead of a leaf array
    #[error("Source path '{0}' addresses a collection, not an array")]
    NotALeaf(String),

    /// The path reaches more than one leaf array
    #[error("Source path '{path}' is ambiguous: it resolves to {leaves} arrays")]
    AmbiguousPath {
        /// The offending dotted path
        path: String,
        /// Number of leaf arrays reached
        leaves: usize,
    },

    /// Array shape or axis metadata is inconsistent
    #[error("Invalid data array: {0}")]
    InvalidArray(String),
}
