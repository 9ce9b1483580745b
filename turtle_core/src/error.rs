use thiserror::Error;

/// A configuration value that would break a turtle invariant.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be a positive number, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("scale factor must be greater than 1, got {0}")]
    ScaleFactor(f64),

    #[error("confidence threshold must lie in [0, 1], got {0}")]
    Threshold(f32),
}
