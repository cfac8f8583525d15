use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Per-extruder standoff distances used to bracket every traversal.
///
/// Field names follow the slicer's JSON profile (`leadIn` / `leadOut` are
/// accepted as aliases). Missing fields default to zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolpathConfig {
    /// Distance (mm) before the first point where the head starts moving.
    #[serde(alias = "leadIn")]
    pub lead_in: f64,
    /// Distance (mm) past the last point where the head stops.
    #[serde(alias = "leadOut")]
    pub lead_out: f64,
}

impl ToolpathConfig {
    #[must_use]
    pub fn new(lead_in: f64, lead_out: f64) -> Self {
        Self { lead_in, lead_out }
    }

    /// Checks that both distances are finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("lead_in", self.lead_in), ("lead_out", self.lead_out)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a non-negative distance, got {value}"
                ))
                .into());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ToolpathError;

    #[test]
    fn deserializes_profile_keys() {
        let cfg: ToolpathConfig = serde_json::from_str(r#"{"leadIn": 0.5, "leadOut": 1.25}"#).unwrap();
        assert_eq!(cfg, ToolpathConfig::new(0.5, 1.25));
        cfg.validate().unwrap();
    }

    #[test]
    fn missing_fields_default_to_zero() {
        let cfg: ToolpathConfig = serde_json::from_str(r#"{"lead_out": 2.0}"#).unwrap();
        assert_eq!(cfg, ToolpathConfig::new(0.0, 2.0));
    }

    #[test]
    fn negative_distance_is_rejected() {
        let err = ToolpathConfig::new(-1.0, 0.0).validate().unwrap_err();
        assert!(matches!(err, ToolpathError::Config(ConfigError::Invalid(_))));
        assert!(ToolpathConfig::new(0.0, f64::NAN).validate().is_err());
    }
}
