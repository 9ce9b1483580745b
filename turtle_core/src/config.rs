//! Core configuration: play area, step and pen geometry, scale factor and
//! the confidence gate.

use serde::Deserialize;

use crate::error::ConfigError;

/// Tunables for the turtle and the dispatcher.
///
/// Every field has a default, so a partial settings file only overrides
/// what it names.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct TurtleConfig {
    /// Play-area width in canvas units.
    pub width:  f64,
    /// Play-area height in canvas units.
    pub height: f64,
    /// Distance covered by one FORWARD/BACK at scale 1.
    pub step: f64,
    /// Pen thickness at scale 1.
    pub pen_thickness: f64,
    /// Multiplier applied by BIGGER (and divided out by SMALLER).
    pub scale_factor: f64,
    /// Recognitions below this confidence are ignored.
    pub confidence_threshold: f32,
    /// Whether the pen starts down.
    pub pen_down: bool,
}

impl Default for TurtleConfig {
    fn default() -> Self {
        TurtleConfig {
            width:                800.0,
            height:               600.0,
            step:                 60.0,
            pen_thickness:        2.0,
            scale_factor:         1.5,
            confidence_threshold: 0.7,
            pen_down:             true,
        }
    }
}

impl TurtleConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("width", self.width),
            ("height", self.height),
            ("step", self.step),
            ("pen_thickness", self.pen_thickness),
        ] {
            // `!(v > 0)` also rejects NaN
            if !(value > 0.0) || !value.is_finite() {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        if !(self.scale_factor > 1.0) || !self.scale_factor.is_finite() {
            return Err(ConfigError::ScaleFactor(self.scale_factor));
        }
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(ConfigError::Threshold(self.confidence_threshold));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(TurtleConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_zero_width() {
        let cfg = TurtleConfig { width: 0.0, ..TurtleConfig::default() };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::NotPositive { field: "width", value: 0.0 })
        );
    }

    #[test]
    fn rejects_nan_step() {
        let cfg = TurtleConfig { step: f64::NAN, ..TurtleConfig::default() };
        assert!(matches!(cfg.validate(), Err(ConfigError::NotPositive { field: "step", .. })));
    }

    #[test]
    fn rejects_shrinking_scale_factor() {
        let cfg = TurtleConfig { scale_factor: 0.5, ..TurtleConfig::default() };
        assert_eq!(cfg.validate(), Err(ConfigError::ScaleFactor(0.5)));
    }

    #[test]
    fn rejects_threshold_out_of_range() {
        let cfg = TurtleConfig { confidence_threshold: 1.5, ..TurtleConfig::default() };
        assert_eq!(cfg.validate(), Err(ConfigError::Threshold(1.5)));
    }
}
