/// Errors of the phase registry
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PhaseError {
    /// No label was configured
    #[error("at least one phase label is required")]
    NoLabels,

    /// A label is empty or only whitespace
    #[error("phase labels must not be empty")]
    EmptyLabel,

    /// The same label appears twice
    #[error("duplicate phase label '{0}'")]
    DuplicateLabel(String),

    /// Color text is not `#RRGGBB`
    #[error("invalid color '{0}', expected #RRGGBB")]
    InvalidColor(String),

    /// No phase carries this label
    #[error("unknown phase '{0}'")]
    UnknownLabel(String),
}

/// Label and color lists of different lengths.
///
/// Not fatal: every label falls back to the default color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{labels} phase labels but {colors} colors, using the default color for every phase")]
pub struct ConfigMismatch {
    /// Number of labels configured
    pub labels: usize,
    /// Number of colors configured
    pub colors: usize,
}
