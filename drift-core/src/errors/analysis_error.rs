//! Top-level error aggregation for driver-facing entry points.

use super::error_code::{self, DriftErrorCode};
use super::ConfigError;

/// Errors that can surface from a complete taint analysis run.
/// Aggregates subsystem errors via `From` conversions, the way
/// `PipelineError` aggregates detection/storage/scan errors.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("analysis cancelled")]
    Cancelled,
}

impl DriftErrorCode for AnalysisError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Cancelled => error_code::CANCELLED,
        }
    }
}
