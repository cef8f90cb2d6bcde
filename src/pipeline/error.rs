use super::Stage;
use crate::params::ParameterError;
use crate::signal::SourceError;

/// Failure of one pipeline stage. The cache keeps its last good values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PipelineError {
    /// The signal source could not provide the selection
    #[error("{stage} failed: {source}")]
    Source {
        /// Failing stage
        stage: Stage,
        /// Underlying source error
        source: SourceError,
    },

    /// A parameter of the stage is malformed or out of range
    #[error("{stage} failed: {source}")]
    Parameter {
        /// Failing stage
        stage: Stage,
        /// Underlying parameter error
        source: ParameterError,
    },

    /// The stage input has never been computed
    #[error("{stage} has no input, {upstream} never succeeded")]
    MissingInput {
        /// Stage that could not run
        stage: Stage,
        /// Stage whose output is missing
        upstream: Stage,
    },
}

impl PipelineError {
    /// Stage that failed
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::Source { stage, .. }
            | PipelineError::Parameter { stage, .. }
            | PipelineError::MissingInput { stage, .. } => *stage,
        }
    }

    /// Whether Load found no sample inside the bounds
    pub fn is_empty_selection(&self) -> bool {
        matches!(
            self,
            PipelineError::Source {
                source: SourceError::EmptySelection { .. },
                ..
            }
        )
    }

    pub(crate) fn parameter(stage: Stage) -> impl FnOnce(ParameterError) -> Self {
        move |source| PipelineError::Parameter { stage, source }
    }
}

impl From<SourceError> for PipelineError {
    fn from(source: SourceError) -> Self {
        PipelineError::Source {
            stage: Stage::Load,
            source,
        }
    }
}
