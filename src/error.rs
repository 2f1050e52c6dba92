//! Error types for the analyser engine

use std::fmt;

/// Errors that can occur while configuring or driving an analyser
#[derive(Debug, Clone, PartialEq)]
pub enum AnalyserError {
    /// Caller-supplied buffer length does not match the configuration
    ShapeMismatch {
        /// Length required by the current configuration
        expected: usize,
        /// Length actually supplied
        actual: usize,
    },

    /// Ingested block is larger than the history capacity
    BlockTooLarge {
        /// Length of the rejected block
        block: usize,
        /// History capacity of the ring buffer
        capacity: usize,
    },

    /// Configuration parameters are out of range
    InvalidConfiguration(String),

    /// Invalid input parameters (e.g. an empty channel set)
    InvalidInput(String),
}

impl fmt::Display for AnalyserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalyserError::ShapeMismatch { expected, actual } => write!(
                f,
                "Shape mismatch: expected buffer of length {}, got {}",
                expected, actual
            ),
            AnalyserError::BlockTooLarge { block, capacity } => write!(
                f,
                "Block too large: {} samples exceeds history capacity {}",
                block, capacity
            ),
            AnalyserError::InvalidConfiguration(msg) => {
                write!(f, "Invalid configuration: {}", msg)
            }
            AnalyserError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for AnalyserError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = AnalyserError::ShapeMismatch {
            expected: 512,
            actual: 100,
        };
        assert_eq!(
            err.to_string(),
            "Shape mismatch: expected buffer of length 512, got 100"
        );

        let err = AnalyserError::BlockTooLarge {
            block: 4096,
            capacity: 2048,
        };
        assert!(err.to_string().contains("4096"));
        assert!(err.to_string().contains("2048"));

        let err = AnalyserError::InvalidConfiguration("fft_size must be a power of two".into());
        assert!(err.to_string().starts_with("Invalid configuration"));
    }
}
