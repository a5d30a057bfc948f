//! Load-time failures
//!
//! None of these ever reach the frame loop: the session logs them and
//! swaps in the synthetic signal or the "Unknown" stage label instead.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("HTTP {0}")]
    Http(u16),
    #[error("request failed: {0}")]
    Fetch(String),
    #[error("malformed JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("JSON has empty values array")]
    EmptySignal,
    #[error("all EEG samples are zero")]
    SilentSignal,
    #[error("non-finite sample at index {0}")]
    NonFiniteSample(usize),
    #[error("no segments in stages JSON")]
    NoSegments,
}

impl LoadError {
    /// Degenerate data rather than a transport or syntax problem
    pub fn is_degenerate(&self) -> bool {
        matches!(
            self,
            LoadError::EmptySignal | LoadError::SilentSignal | LoadError::NoSegments
        )
    }
}
