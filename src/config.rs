//! TOML-based operating-conditions configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Top-level conditions configuration parsed from TOML.
///
/// All fields have defaults matching standard test conditions. Load from
/// TOML with [`ConditionsConfig::from_toml_file`] or use
/// [`ConditionsConfig::stc`] for the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConditionsConfig {
    /// Irradiance and temperature the module is evaluated at.
    #[serde(default)]
    pub conditions: OperatingConditions,
    /// I-V curve sampling parameters.
    #[serde(default)]
    pub sweep: SweepConfig,
}

/// Irradiance and temperature the module is evaluated at.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OperatingConditions {
    /// Incident irradiance (W/m2; 1000 is the reference condition).
    pub irradiance_w_m2: f64,
    /// Cell temperature (Celsius).
    pub temperature_c: f64,
}

impl Default for OperatingConditions {
    fn default() -> Self {
        Self {
            irradiance_w_m2: 1000.0,
            temperature_c: 25.0,
        }
    }
}

/// I-V curve sampling parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SweepConfig {
    /// Number of curve samples between short circuit and open circuit
    /// (endpoints included, must be >= 2).
    pub points: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self { points: 120 }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"conditions.irradiance_w_m2"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {} — {}", self.field, self.message)
    }
}

impl ConditionsConfig {
    /// Returns standard test conditions (1000 W/m2, 25 C).
    pub fn stc() -> Self {
        Self {
            conditions: OperatingConditions::default(),
            sweep: SweepConfig::default(),
        }
    }

    /// Returns nominal-operating conditions: reduced irradiance, hot cell.
    pub fn noct() -> Self {
        Self {
            conditions: OperatingConditions {
                irradiance_w_m2: 800.0,
                temperature_c: 45.0,
            },
            sweep: SweepConfig::default(),
        }
    }

    /// Returns the low-light preset: overcast sky at moderate temperature.
    pub fn low_light() -> Self {
        Self {
            conditions: OperatingConditions {
                irradiance_w_m2: 200.0,
                temperature_c: 25.0,
            },
            sweep: SweepConfig::default(),
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["stc", "noct", "low_light"];

    /// Loads conditions from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "stc" => Ok(Self::stc()),
            "noct" => Ok(Self::noct()),
            "low_light" => Ok(Self::low_light()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses conditions from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "conditions".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses conditions from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let c = &self.conditions;

        if !c.irradiance_w_m2.is_finite() || c.irradiance_w_m2 < 0.0 {
            errors.push(ConfigError {
                field: "conditions.irradiance_w_m2".into(),
                message: "must be finite and >= 0".into(),
            });
        }
        if !c.temperature_c.is_finite() || c.temperature_c <= -273.0 {
            errors.push(ConfigError {
                field: "conditions.temperature_c".into(),
                message: "must be finite and above absolute zero (-273 C)".into(),
            });
        }

        if self.sweep.points < 2 {
            errors.push(ConfigError {
                field: "sweep.points".into(),
                message: "must be >= 2".into(),
            });
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stc_preset_valid() {
        let cfg = ConditionsConfig::stc();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "stc should be valid: {errors:?}");
    }

    #[test]
    fn all_presets_are_valid() {
        for name in ConditionsConfig::PRESETS {
            let cfg = ConditionsConfig::from_preset(name);
            assert!(cfg.is_ok(), "preset \"{name}\" should load");
            let errors = cfg.as_ref().map(|c| c.validate()).unwrap_or_default();
            assert!(
                errors.is_empty(),
                "preset \"{name}\" should be valid: {errors:?}"
            );
        }
    }

    #[test]
    fn from_preset_unknown() {
        let err = ConditionsConfig::from_preset("nonexistent");
        assert!(err.is_err());
        let e = err.unwrap_err();
        assert!(e.message.contains("unknown preset"));
    }

    #[test]
    fn noct_is_dimmer_and_hotter_than_stc() {
        let stc = ConditionsConfig::stc();
        let noct = ConditionsConfig::noct();
        assert!(noct.conditions.irradiance_w_m2 < stc.conditions.irradiance_w_m2);
        assert!(noct.conditions.temperature_c > stc.conditions.temperature_c);
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[conditions]
irradiance_w_m2 = 650.0
temperature_c = 38.5

[sweep]
points = 40
"#;
        let cfg = ConditionsConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.ok();
        assert_eq!(
            cfg.as_ref().map(|c| c.conditions.irradiance_w_m2),
            Some(650.0)
        );
        assert_eq!(cfg.as_ref().map(|c| c.sweep.points), Some(40));
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[conditions]
irradiance_w_m2 = 1000.0
bogus_field = true
"#;
        let result = ConditionsConfig::from_toml_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml = r#"
[conditions]
temperature_c = 40.0
"#;
        let cfg = ConditionsConfig::from_toml_str(toml);
        assert!(cfg.is_ok());
        let cfg = cfg.ok();
        // temperature overridden
        assert_eq!(cfg.as_ref().map(|c| c.conditions.temperature_c), Some(40.0));
        // irradiance kept default
        assert_eq!(
            cfg.as_ref().map(|c| c.conditions.irradiance_w_m2),
            Some(1000.0)
        );
        // sweep kept default
        assert_eq!(cfg.as_ref().map(|c| c.sweep.points), Some(120));
    }

    #[test]
    fn validation_catches_negative_irradiance() {
        let mut cfg = ConditionsConfig::stc();
        cfg.conditions.irradiance_w_m2 = -5.0;
        let errors = cfg.validate();
        assert!(
            errors
                .iter()
                .any(|e| e.field == "conditions.irradiance_w_m2")
        );
    }

    #[test]
    fn validation_catches_temperature_below_absolute_zero() {
        let mut cfg = ConditionsConfig::stc();
        cfg.conditions.temperature_c = -280.0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "conditions.temperature_c"));
    }

    #[test]
    fn validation_catches_single_point_sweep() {
        let mut cfg = ConditionsConfig::stc();
        cfg.sweep.points = 1;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "sweep.points"));
    }
}
