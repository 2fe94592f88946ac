//! Solver configuration, loadable from YAML.

use std::path::Path;

use serde::{Deserialize, Serialize};
use steam_core::Tolerances;

use crate::error::{SolverError, SolverResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Half-width of the two-phase band around Tsat, in °C.
    pub saturation_tolerance: f64,
    /// Half-width of the two-phase band around Psat, in kPa.
    pub saturation_pressure_tolerance: f64,
    /// Used when checking overdetermined knowns against the resolved state.
    pub consistency: Tolerances,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            saturation_tolerance: 0.25,
            saturation_pressure_tolerance: 0.5,
            consistency: Tolerances::default(),
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> SolverResult<()> {
        let fields = [
            ("saturation_tolerance", self.saturation_tolerance),
            (
                "saturation_pressure_tolerance",
                self.saturation_pressure_tolerance,
            ),
            ("consistency.abs", self.consistency.abs),
            ("consistency.rel", self.consistency.rel),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(SolverError::Config {
                    what: format!("{name} must be finite and non-negative, got {value}"),
                });
            }
        }
        Ok(())
    }
}

pub fn load_yaml(path: &Path) -> SolverResult<SolverConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: SolverConfig = serde_yaml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

pub fn save_yaml(path: &Path, config: &SolverConfig) -> SolverResult<()> {
    config.validate()?;
    let content = serde_yaml::to_string(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = SolverConfig::default();
        assert_eq!(c.saturation_tolerance, 0.25);
        assert_eq!(c.consistency, Tolerances::default());
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let c: SolverConfig = serde_yaml::from_str("saturation_tolerance: 0.1\n").unwrap();
        assert_eq!(c.saturation_tolerance, 0.1);
        assert_eq!(c.saturation_pressure_tolerance, 0.5);
    }

    #[test]
    fn negative_tolerance_rejected() {
        let c = SolverConfig {
            saturation_tolerance: -1.0,
            ..SolverConfig::default()
        };
        assert!(matches!(c.validate(), Err(SolverError::Config { .. })));
    }

    #[test]
    fn file_round_trip() {
        let path = std::env::temp_dir().join(format!("steam-solver-{}.yaml", std::process::id()));
        let c = SolverConfig {
            saturation_tolerance: 0.05,
            ..SolverConfig::default()
        };
        save_yaml(&path, &c).unwrap();
        assert_eq!(load_yaml(&path).unwrap(), c);
        let _ = std::fs::remove_file(path);
    }
}
