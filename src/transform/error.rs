/// Errors raised by numeric transforms on otherwise well-formed parameters
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransformError {
    /// Filter corner at or above the Nyquist frequency of the axis
    #[error("cutoff {cutoff} Hz must be below the Nyquist frequency ({nyquist} Hz)")]
    AboveNyquist {
        /// Requested corner frequency
        cutoff: f64,
        /// Half the sampling rate of the axis
        nyquist: f64,
    },

    /// Window length that is not a positive finite number
    #[error("window length must be positive, got {0}")]
    InvalidWindow(f64),

    /// Filter coefficients could not be designed
    #[error("filter design failed: {0}")]
    FilterDesign(String),
}
