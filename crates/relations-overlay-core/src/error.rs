//! Error types for the relations overlay.

use thiserror::Error;

/// Result type alias for overlay operations that can fail.
pub type OverlayResult<T> = Result<T, OverlayError>;

/// Errors raised while building an overlay.
///
/// Runtime interaction (show/hide/select/dispatch/frames) never fails; only
/// configuration is validated.
#[derive(Debug, Error)]
pub enum OverlayError {
    /// The configuration document could not be parsed.
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The horizontal anchor calibration is not a finite number.
    #[error("invalid anchor calibration: {value} (must be finite)")]
    InvalidCalibration { value: f32 },
}
