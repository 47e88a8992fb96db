//! Common error types for Warpcap components.

use thiserror::Error;

/// Result alias used by every Warpcap library function
pub type Result<T> = std::result::Result<T, WarpcapError>;

/// Errors raised while synthesizing a CAPTCHA image
#[derive(Debug, Error)]
pub enum WarpcapError {
    /// Challenge strings need at least one character
    #[error("Invalid challenge length: {0} (must be at least 1)")]
    InvalidChallengeLength(usize),

    /// Font bytes could not be read or parsed
    #[error("Font error: {0}")]
    Font(String),

    /// The source or destination quad collapsed, no projection exists
    #[error("Degenerate perspective transform: {0}")]
    DegenerateTransform(String),

    /// Two canvases that must share dimensions do not
    #[error("Canvas dimension mismatch: {left:?} vs {right:?}")]
    DimensionMismatch { left: (u32, u32), right: (u32, u32) },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// PNG encoding failed
    #[error("Image encoding error: {0}")]
    Encode(String),
}

impl WarpcapError {
    /// Returns true if the error comes from caller input rather than the pipeline
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidChallengeLength(_) | Self::Config(_) | Self::Font(_)
        )
    }
}
