//! State solver: resolve a full property state from a partial set of knowns.
//!
//! Routes are tried in a fixed priority order. The first route whose two
//! inputs are both known resolves the state. Any further knowns are checked
//! against the resolved state and a disagreement is reported, never
//! averaged away. When no route is complete the result lists the properties
//! that would complete one.

use std::collections::BTreeSet;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use steam_core::{ensure_finite, nearly_equal};
use steam_tables::{Column, PropertyColumns, SaturationState, TableStore};
use tracing::{debug, trace};

use crate::config::SolverConfig;
use crate::error::{SolverError, SolverResult};
use crate::property::{PropertyId, PropertyVector, StateQuery};
use crate::region::{Region, classify_region};

/// A pair of knowns the solver can resolve directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    PressureTemperature,
    TemperatureQuality,
    PressureQuality,
    PressureProperty(Column),
    TemperatureProperty(Column),
}

impl Route {
    pub fn inputs(self) -> (PropertyId, PropertyId) {
        match self {
            Route::PressureTemperature => (PropertyId::Pressure, PropertyId::Temperature),
            Route::TemperatureQuality => (PropertyId::Temperature, PropertyId::Quality),
            Route::PressureQuality => (PropertyId::Pressure, PropertyId::Quality),
            Route::PressureProperty(c) => (PropertyId::Pressure, PropertyId::from(c)),
            Route::TemperatureProperty(c) => (PropertyId::Temperature, PropertyId::from(c)),
        }
    }

    fn is_complete(self, query: &StateQuery) -> bool {
        let (a, b) = self.inputs();
        query.contains(a) && query.contains(b)
    }
}

/// Recognized routes in priority order.
pub const ROUTES: [Route; 11] = [
    Route::PressureTemperature,
    Route::TemperatureQuality,
    Route::PressureQuality,
    Route::PressureProperty(Column::SpecificVolume),
    Route::PressureProperty(Column::InternalEnergy),
    Route::PressureProperty(Column::Enthalpy),
    Route::PressureProperty(Column::Entropy),
    Route::TemperatureProperty(Column::SpecificVolume),
    Route::TemperatureProperty(Column::InternalEnergy),
    Route::TemperatureProperty(Column::Enthalpy),
    Route::TemperatureProperty(Column::Entropy),
];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StateResult {
    Resolved {
        region: Region,
        properties: PropertyVector,
        /// Saturated liquid and vapor ends for two-phase states.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        saturation: Option<SaturationState>,
    },
    /// Not enough knowns; any one of `properties` would complete a route.
    Needs { properties: Vec<PropertyId> },
}

impl StateResult {
    pub fn resolved(&self) -> Option<(Region, &PropertyVector)> {
        match self {
            StateResult::Resolved {
                region, properties, ..
            } => Some((*region, properties)),
            StateResult::Needs { .. } => None,
        }
    }
}

/// Resolved state plus the route that actually produced it.
struct Resolution {
    route: Route,
    region: Region,
    properties: PropertyVector,
    saturation: Option<SaturationState>,
}

impl Resolution {
    fn new(route: Route, region: Region, p: f64, t: f64, cols: &PropertyColumns, quality: Option<f64>) -> Self {
        Self {
            route,
            region,
            properties: PropertyVector::from_columns(p, t, cols, quality),
            saturation: None,
        }
    }

    fn on_dome(route: Route, sat: SaturationState, cols: &PropertyColumns, quality: f64) -> Self {
        Self {
            route,
            region: Region::TwoPhase,
            properties: PropertyVector::from_columns(sat.pressure, sat.temperature, cols, Some(quality)),
            saturation: Some(sat),
        }
    }
}

/// Stateless solver over an immutable table store.
#[derive(Clone, Copy, Debug)]
pub struct Solver<'a> {
    store: &'a TableStore,
    config: SolverConfig,
}

impl<'a> Solver<'a> {
    pub fn new(store: &'a TableStore) -> Self {
        Self::with_config(store, SolverConfig::default())
    }

    pub fn with_config(store: &'a TableStore, config: SolverConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &'a TableStore {
        self.store
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn solve(&self, query: &StateQuery) -> SolverResult<StateResult> {
        for (id, value) in query.iter() {
            ensure_finite(value, id.name())?;
        }

        let Some(route) = ROUTES.iter().copied().find(|r| r.is_complete(query)) else {
            let properties = needs(query);
            debug!(?properties, "underdetermined query");
            return Ok(StateResult::Needs { properties });
        };

        debug!(?route, knowns = query.len(), "resolving state");
        let resolution = self.resolve(route, query)?;
        self.verify(query, &resolution)?;
        trace!(region = %resolution.region, route = ?resolution.route, "resolved");

        Ok(StateResult::Resolved {
            region: resolution.region,
            properties: resolution.properties,
            saturation: resolution.saturation,
        })
    }

    /// Solve many queries in parallel. Results keep the input order.
    pub fn solve_batch(&self, queries: &[StateQuery]) -> Vec<SolverResult<StateResult>> {
        queries.par_iter().map(|q| self.solve(q)).collect()
    }

    /// One property at `(pressure, temperature)` with automatic region
    /// selection. `Ok(None)` for quality outside the two-phase region.
    pub fn property_pt(&self, id: PropertyId, pressure: f64, temperature: f64) -> SolverResult<Option<f64>> {
        let query = StateQuery::new()
            .with(PropertyId::Pressure, pressure)
            .with(PropertyId::Temperature, temperature);
        match self.solve(&query)? {
            StateResult::Resolved { properties, .. } => Ok(properties.get(id)),
            StateResult::Needs { .. } => Ok(None),
        }
    }

    fn resolve(&self, route: Route, query: &StateQuery) -> SolverResult<Resolution> {
        let known = |id: PropertyId| query.get(id).unwrap_or(f64::NAN);
        match route {
            Route::PressureTemperature => self.solve_pt(
                known(PropertyId::Pressure),
                known(PropertyId::Temperature),
                query,
            ),
            Route::TemperatureQuality => self.solve_tx(
                known(PropertyId::Temperature),
                known(PropertyId::Quality),
            ),
            Route::PressureQuality => {
                self.solve_px(known(PropertyId::Pressure), known(PropertyId::Quality))
            }
            Route::PressureProperty(c) => self.solve_py(
                known(PropertyId::Pressure),
                c,
                known(PropertyId::from(c)),
            ),
            Route::TemperatureProperty(c) => self.solve_ty(
                known(PropertyId::Temperature),
                c,
                known(PropertyId::from(c)),
            ),
        }
    }

    fn solve_pt(&self, p: f64, t: f64, query: &StateQuery) -> SolverResult<Resolution> {
        let route = Route::PressureTemperature;
        let region = classify_region(self.store, p, t, self.config.saturation_tolerance)?;
        match region {
            Region::SuperheatedVapor => {
                let cols = self.store.superheated().interpolate(p, t)?;
                Ok(Resolution::new(route, region, p, t, &cols, None))
            }
            Region::CompressedLiquid => {
                let cols = self.store.compressed().interpolate(p, t)?;
                Ok(Resolution::new(route, region, p, t, &cols, None))
            }
            Region::SubcooledLiquid => {
                let cols = self.store.saturation().liquid_at_temperature(t)?;
                Ok(Resolution::new(route, region, p, t, &cols, None))
            }
            Region::TwoPhase => {
                // T cannot locate a state on the dome; use a further known
                // when there is one, otherwise take the saturated vapor.
                if let Some(x) = query.get(PropertyId::Quality) {
                    trace!(p, t, x, "boundary resolved through quality");
                    return self.solve_px(p, x);
                }
                if let Some(c) = Column::ALL
                    .into_iter()
                    .find(|c| query.contains(PropertyId::from(*c)))
                {
                    trace!(p, t, column = c.name(), "boundary resolved through property");
                    return self.solve_py(p, c, query.get(PropertyId::from(c)).unwrap_or(f64::NAN));
                }
                let sat = self.store.saturation().at_pressure(p)?;
                debug!(p, t, tsat = sat.temperature, "saturation boundary, using vapor side");
                Ok(Resolution::on_dome(route, sat, &sat.vapor, 1.0))
            }
        }
    }

    fn solve_tx(&self, t: f64, x: f64) -> SolverResult<Resolution> {
        check_quality(x)?;
        let sat = self.store.saturation().at_temperature(t)?;
        Ok(Resolution::on_dome(Route::TemperatureQuality, sat, &sat.mix(x), x))
    }

    fn solve_px(&self, p: f64, x: f64) -> SolverResult<Resolution> {
        check_quality(x)?;
        let sat = self.store.saturation().at_pressure(p)?;
        Ok(Resolution::on_dome(Route::PressureQuality, sat, &sat.mix(x), x))
    }

    fn solve_py(&self, p: f64, column: Column, y: f64) -> SolverResult<Resolution> {
        let route = Route::PressureProperty(column);
        let sat = self.store.saturation().at_pressure(p)?;
        let x = sat.quality(column, y)?;

        if (0.0..=1.0).contains(&x) {
            trace!(p, x, "inside the dome");
            return Ok(Resolution::on_dome(route, sat, &sat.mix(x), x));
        }

        if x > 1.0 {
            let table = self.store.superheated();
            let t = table.temperature_at(p, column, y)?;
            trace!(p, t, "superheated inverse in temperature");
            let cols = table.interpolate(p, t)?;
            return Ok(Resolution::new(route, Region::SuperheatedVapor, p, t, &cols, None));
        }

        let compressed = self.store.compressed();
        if compressed.covers_pressure(p) {
            let t = compressed.temperature_at(p, column, y)?;
            trace!(p, t, "compressed inverse in temperature");
            let cols = compressed.interpolate(p, t)?;
            Ok(Resolution::new(route, Region::CompressedLiquid, p, t, &cols, None))
        } else {
            let saturation = self.store.saturation();
            let t = saturation.liquid_temperature_at(column, y)?;
            trace!(p, t, "subcooled inverse on saturated liquid");
            let cols = saturation.liquid_at_temperature(t)?;
            Ok(Resolution::new(route, Region::SubcooledLiquid, p, t, &cols, None))
        }
    }

    fn solve_ty(&self, t: f64, column: Column, y: f64) -> SolverResult<Resolution> {
        let route = Route::TemperatureProperty(column);
        let (_, t_top) = self.store.saturation().temperature_domain();

        // Above the last tabulated saturation temperature only vapor remains.
        let vapor_side = if t > t_top {
            true
        } else {
            let sat = self.store.saturation().at_temperature(t)?;
            let x = sat.quality(column, y)?;
            if (0.0..=1.0).contains(&x) {
                trace!(t, x, "inside the dome");
                return Ok(Resolution::on_dome(route, sat, &sat.mix(x), x));
            }
            x > 1.0
        };

        let (table, region) = if vapor_side {
            (self.store.superheated(), Region::SuperheatedVapor)
        } else {
            (self.store.compressed(), Region::CompressedLiquid)
        };
        let p = table.pressure_at(t, column, y)?;
        trace!(t, p, %region, "inverse in pressure");
        let cols = table.interpolate(p, t)?;
        Ok(Resolution::new(route, region, p, t, &cols, None))
    }

    /// Check every known that did not take part in resolution.
    ///
    /// Temperature on the dome is compared within the saturation tolerance;
    /// everything else within the consistency tolerances. A quality for a
    /// single-phase state is always inconsistent.
    fn verify(&self, query: &StateQuery, resolution: &Resolution) -> SolverResult<()> {
        let (a, b) = resolution.route.inputs();
        let state = &resolution.properties;

        for (id, given) in query.iter().filter(|(id, _)| *id != a && *id != b) {
            let resolved = state.get(id);
            let consistent = match (id, resolved) {
                (_, None) => false,
                (PropertyId::Temperature, Some(r)) if resolution.region == Region::TwoPhase => {
                    (given - r).abs() <= self.config.saturation_tolerance
                }
                (_, Some(r)) => nearly_equal(given, r, self.config.consistency),
            };
            if !consistent {
                debug!(property = %id, given, ?resolved, "inconsistent known");
                return Err(SolverError::InconsistentKnowns {
                    property: id,
                    given,
                    resolved,
                });
            }
        }
        Ok(())
    }
}

/// Properties that would complete a route given what is already known.
pub fn needs(query: &StateQuery) -> Vec<PropertyId> {
    if query.is_empty() {
        return vec![PropertyId::Pressure, PropertyId::Temperature];
    }
    let mut missing = BTreeSet::new();
    for route in ROUTES {
        let (a, b) = route.inputs();
        match (query.contains(a), query.contains(b)) {
            (true, false) => {
                missing.insert(b);
            }
            (false, true) => {
                missing.insert(a);
            }
            _ => {}
        }
    }
    missing.into_iter().collect()
}

fn check_quality(x: f64) -> SolverResult<()> {
    if (0.0..=1.0).contains(&x) {
        Ok(())
    } else {
        Err(SolverError::QualityOutOfRange { quality: x })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use steam_tables::steam_tables;

    fn query(pairs: &[(PropertyId, f64)]) -> StateQuery {
        pairs.iter().copied().collect()
    }

    #[test]
    fn routes_are_unique() {
        let set: BTreeSet<_> = ROUTES.iter().map(|r| r.inputs()).collect();
        assert_eq!(set.len(), ROUTES.len());
    }

    #[test]
    fn pressure_alone_lists_every_companion() {
        let q = query(&[(PropertyId::Pressure, 1000.0)]);
        assert_eq!(
            needs(&q),
            vec![
                PropertyId::Temperature,
                PropertyId::SpecificVolume,
                PropertyId::InternalEnergy,
                PropertyId::Enthalpy,
                PropertyId::Entropy,
                PropertyId::Quality,
            ]
        );
    }

    #[test]
    fn lone_dependent_properties_need_an_anchor() {
        let q = query(&[(PropertyId::Enthalpy, 2800.0), (PropertyId::Entropy, 6.5)]);
        assert_eq!(needs(&q), vec![PropertyId::Pressure, PropertyId::Temperature]);
        assert_eq!(
            needs(&StateQuery::new()),
            vec![PropertyId::Pressure, PropertyId::Temperature]
        );
        let q = query(&[(PropertyId::Quality, 0.5)]);
        assert_eq!(needs(&q), vec![PropertyId::Pressure, PropertyId::Temperature]);
    }

    #[test]
    fn solve_reports_needs() {
        let store = steam_tables().unwrap();
        let solver = Solver::new(&store);
        let r = solver.solve(&query(&[(PropertyId::Temperature, 150.0)])).unwrap();
        match r {
            StateResult::Needs { properties } => {
                assert_eq!(properties[0], PropertyId::Pressure);
                assert!(properties.contains(&PropertyId::Quality));
                assert!(!properties.contains(&PropertyId::Temperature));
            }
            other => panic!("expected Needs, got {other:?}"),
        }
    }

    #[test]
    fn non_finite_known_is_rejected() {
        let store = steam_tables().unwrap();
        let solver = Solver::new(&store);
        let err = solver
            .solve(&query(&[(PropertyId::Pressure, f64::INFINITY)]))
            .unwrap_err();
        assert!(matches!(err, SolverError::Core(_)));
    }

    #[test]
    fn quality_outside_unit_interval() {
        let store = steam_tables().unwrap();
        let solver = Solver::new(&store);
        for x in [-0.01, 1.01] {
            let err = solver
                .solve(&query(&[(PropertyId::Pressure, 500.0), (PropertyId::Quality, x)]))
                .unwrap_err();
            assert!(matches!(err, SolverError::QualityOutOfRange { quality } if quality == x));
        }
    }

    #[test]
    fn property_pt_picks_region() {
        let store = steam_tables().unwrap();
        let solver = Solver::new(&store);
        assert_eq!(
            solver.property_pt(PropertyId::Enthalpy, 1000.0, 400.0).unwrap(),
            Some(3264.5)
        );
        assert_eq!(
            solver.property_pt(PropertyId::Quality, 1000.0, 400.0).unwrap(),
            None
        );
        assert_eq!(
            solver.property_pt(PropertyId::Quality, 1000.0, 179.88).unwrap(),
            Some(1.0)
        );
        // Liquid below the compressed table: saturated liquid at T.
        assert_eq!(
            solver.property_pt(PropertyId::Enthalpy, 1000.0, 100.0).unwrap(),
            Some(419.17)
        );
    }
}
