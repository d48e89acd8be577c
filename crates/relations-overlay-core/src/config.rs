//! Overlay configuration.
//!
//! Loaded from TOML; every field has a default so an empty document is valid.
//!
//! ```toml
//! snap_to_targets = true
//!
//! [anchor]
//! x_calibration = 199.5
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{OverlayError, OverlayResult};

/// Horizontal calibration applied to every anchor point: half of the fixed
/// connector width the drawing surface is laid out against.
pub const DEFAULT_X_CALIBRATION: f32 = 199.5;

/// Coordinate-mapping parameters for anchor computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnchorConfig {
    /// Subtracted from the rounded horizontal midpoint of a region.
    pub x_calibration: f32,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            x_calibration: DEFAULT_X_CALIBRATION,
        }
    }
}

/// Top-level overlay configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Anchor coordinate mapping.
    pub anchor: AnchorConfig,

    /// Snap the connection endpoint to a hovered target region.
    /// When off, the endpoint keeps following the pointer over targets.
    pub snap_to_targets: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            anchor: AnchorConfig::default(),
            snap_to_targets: true,
        }
    }
}

impl OverlayConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> OverlayResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the anchor math cannot work with.
    pub fn validate(&self) -> OverlayResult<()> {
        let value = self.anchor.x_calibration;
        if !value.is_finite() {
            return Err(OverlayError::InvalidCalibration { value });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = OverlayConfig::from_toml_str("").unwrap();
        assert_eq!(config, OverlayConfig::default());
        assert_eq!(config.anchor.x_calibration, 199.5);
        assert!(config.snap_to_targets);
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let config = OverlayConfig::from_toml_str("snap_to_targets = false").unwrap();
        assert!(!config.snap_to_targets);
        assert_eq!(config.anchor.x_calibration, DEFAULT_X_CALIBRATION);
    }

    #[test]
    fn calibration_override_is_read() {
        let config = OverlayConfig::from_toml_str("[anchor]\nx_calibration = 120.0").unwrap();
        assert_eq!(config.anchor.x_calibration, 120.0);
    }

    #[test]
    fn malformed_document_is_a_parse_error() {
        let err = OverlayConfig::from_toml_str("snap_to_targets = \"yes\"").unwrap_err();
        assert!(matches!(err, OverlayError::ConfigParse(_)));
    }

    #[test]
    fn non_finite_calibration_is_rejected() {
        let config = OverlayConfig {
            anchor: AnchorConfig {
                x_calibration: f32::NAN,
            },
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(OverlayError::InvalidCalibration { .. })
        ));
    }
}
