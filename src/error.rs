//! Error types for string and fretboard construction.

use thiserror::Error;

/// Errors raised while building strings, fretboards or loading configs.
#[derive(Debug, Error)]
pub enum FretboardError {
    #[error("{parameter} = {value} is out of range [{min}, {max}]")]
    ConfigurationRange {
        parameter: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
    #[error("tuning list is empty")]
    EmptyTuning,
    #[error("tuning list has {count} strings (max {max})")]
    TooManyStrings { count: usize, max: usize },
    #[error("invalid pitch name '{0}'")]
    InvalidPitchName(String),
    #[error("harmonic ratio {k}/{h} is not a reduced fraction with 1 <= k < h")]
    ArithmeticInvariant { k: u32, h: u32 },
    #[error("invalid instrument config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl FretboardError {
    /// True for every error caused by construction parameters outside
    /// the instrument family bounds (tuning list included).
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            FretboardError::ConfigurationRange { .. }
                | FretboardError::EmptyTuning
                | FretboardError::TooManyStrings { .. }
        )
    }

    pub(crate) fn out_of_range(parameter: &'static str, value: i64, min: i64, max: i64) -> Self {
        FretboardError::ConfigurationRange {
            parameter,
            value,
            min,
            max,
        }
    }
}

pub type Result<T> = std::result::Result<T, FretboardError>;
