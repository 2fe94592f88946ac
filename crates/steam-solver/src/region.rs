//! Phase region classification against the saturation dome.

use std::fmt;

use serde::{Deserialize, Serialize};
use steam_core::ensure_finite;
use steam_tables::TableStore;
use tracing::trace;

use crate::error::SolverResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    /// Below saturation temperature where no compressed-liquid data covers
    /// the pressure; properties are the saturated-liquid values at T.
    SubcooledLiquid,
    /// On the dome, within the saturation tolerance.
    TwoPhase,
    SuperheatedVapor,
    /// Below saturation temperature, inside the compressed-liquid table.
    CompressedLiquid,
}

impl Region {
    pub fn name(self) -> &'static str {
        match self {
            Region::SubcooledLiquid => "subcooled_liquid",
            Region::TwoPhase => "two_phase",
            Region::SuperheatedVapor => "superheated_vapor",
            Region::CompressedLiquid => "compressed_liquid",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classify `(pressure, temperature)` using Tsat(P).
///
/// `|T - Tsat| <= epsilon` is the two-phase boundary.
pub fn classify_region(
    store: &TableStore,
    pressure: f64,
    temperature: f64,
    epsilon: f64,
) -> SolverResult<Region> {
    ensure_finite(pressure, "pressure")?;
    ensure_finite(temperature, "temperature")?;

    let tsat = store.saturation().tsat(pressure)?;
    let region = if (temperature - tsat).abs() <= epsilon {
        Region::TwoPhase
    } else if temperature > tsat {
        Region::SuperheatedVapor
    } else {
        liquid_region(store, pressure)
    };
    trace!(pressure, temperature, tsat, %region, "classified by temperature");
    Ok(region)
}

/// Classify `(temperature, pressure)` using Psat(T).
///
/// `|P - Psat| <= epsilon_p` is the two-phase boundary; higher pressure is
/// the liquid side.
pub fn classify_region_by_pressure(
    store: &TableStore,
    temperature: f64,
    pressure: f64,
    epsilon_p: f64,
) -> SolverResult<Region> {
    ensure_finite(pressure, "pressure")?;
    ensure_finite(temperature, "temperature")?;

    let psat = store.saturation().psat(temperature)?;
    let region = if (pressure - psat).abs() <= epsilon_p {
        Region::TwoPhase
    } else if pressure > psat {
        liquid_region(store, pressure)
    } else {
        Region::SuperheatedVapor
    };
    trace!(pressure, temperature, psat, %region, "classified by pressure");
    Ok(region)
}

fn liquid_region(store: &TableStore, pressure: f64) -> Region {
    if store.compressed().covers_pressure(pressure) {
        Region::CompressedLiquid
    } else {
        Region::SubcooledLiquid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SolverError;
    use steam_tables::steam_tables;

    #[test]
    fn temperature_rule() {
        let store = steam_tables().unwrap();
        assert_eq!(
            classify_region(&store, 1000.0, 400.0, 0.25).unwrap(),
            Region::SuperheatedVapor
        );
        assert_eq!(
            classify_region(&store, 1000.0, 179.88, 0.25).unwrap(),
            Region::TwoPhase
        );
        assert_eq!(
            classify_region(&store, 1000.0, 180.1, 0.25).unwrap(),
            Region::TwoPhase
        );
        assert_eq!(
            classify_region(&store, 1000.0, 100.0, 0.25).unwrap(),
            Region::SubcooledLiquid
        );
        assert_eq!(
            classify_region(&store, 10000.0, 100.0, 0.25).unwrap(),
            Region::CompressedLiquid
        );
    }

    #[test]
    fn atmospheric_boiling_point_is_on_the_dome() {
        let store = steam_tables().unwrap();
        assert_eq!(
            classify_region(&store, 101.325, 100.0, 0.25).unwrap(),
            Region::TwoPhase
        );
    }

    #[test]
    fn pressure_rule_mirrors_temperature_rule() {
        let store = steam_tables().unwrap();
        assert_eq!(
            classify_region_by_pressure(&store, 150.0, 100.0, 0.5).unwrap(),
            Region::SuperheatedVapor
        );
        assert_eq!(
            classify_region_by_pressure(&store, 179.88, 1000.2, 0.5).unwrap(),
            Region::TwoPhase
        );
        assert_eq!(
            classify_region_by_pressure(&store, 100.0, 1000.0, 0.5).unwrap(),
            Region::SubcooledLiquid
        );
        assert_eq!(
            classify_region_by_pressure(&store, 100.0, 15000.0, 0.5).unwrap(),
            Region::CompressedLiquid
        );
    }

    #[test]
    fn outside_saturation_domain_is_out_of_range() {
        let store = steam_tables().unwrap();
        let err = classify_region(&store, 30000.0, 400.0, 0.25).unwrap_err();
        assert!(err.is_out_of_range());
        let err = classify_region_by_pressure(&store, 380.0, 100.0, 0.5).unwrap_err();
        assert!(err.is_out_of_range());
    }

    #[test]
    fn non_finite_inputs_are_rejected() {
        let store = steam_tables().unwrap();
        let err = classify_region(&store, f64::NAN, 100.0, 0.25).unwrap_err();
        assert!(matches!(err, SolverError::Core(_)));
    }
}
