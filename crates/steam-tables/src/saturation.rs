//! Saturation table: the liquid-vapor dome boundary.
//!
//! One row per tabulated saturation point. Both the pressure and temperature
//! columns are strictly increasing, so the same row order serves lookups by
//! either coordinate.

use serde::{Deserialize, Serialize};

use crate::error::{TableError, TableResult};
use crate::grid::{Axis, Column, PropertyColumns};

/// One saturation point: liquid (`f`) and vapor (`g`) properties at a
/// matching `(pressure, temperature)` pair.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SaturationRow {
    /// kPa
    pub pressure: f64,
    /// °C
    pub temperature: f64,
    pub liquid: PropertyColumns,
    pub vapor: PropertyColumns,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SaturationTable {
    pressure: Axis,
    temperature: Axis,
    liquid: [Vec<f64>; 4],
    vapor: [Vec<f64>; 4],
}

impl SaturationTable {
    /// Build from rows in any order; rows are sorted by pressure and the
    /// temperature column must then be strictly increasing too.
    pub fn new(mut rows: Vec<SaturationRow>) -> TableResult<Self> {
        for row in &rows {
            let finite = row.pressure.is_finite()
                && row.temperature.is_finite()
                && row.liquid.is_finite()
                && row.vapor.is_finite();
            if !finite {
                return Err(TableError::malformed(format!(
                    "non-finite saturation row at P={}, T={}",
                    row.pressure, row.temperature
                )));
            }
        }
        rows.sort_by(|a, b| a.pressure.total_cmp(&b.pressure));

        let pressure = Axis::new(
            "pressure",
            rows.iter().map(|r| r.pressure).collect(),
        )?;
        let temperature = Axis::new(
            "temperature",
            rows.iter().map(|r| r.temperature).collect(),
        )
        .map_err(|e| {
            TableError::integrity(format!(
                "saturation temperature does not rise with pressure: {e}"
            ))
        })?;

        let liquid = Column::ALL.map(|c| rows.iter().map(|r| r.liquid.get(c)).collect::<Vec<_>>());
        let vapor = Column::ALL.map(|c| rows.iter().map(|r| r.vapor.get(c)).collect::<Vec<_>>());

        Ok(Self {
            pressure,
            temperature,
            liquid,
            vapor,
        })
    }

    pub fn len(&self) -> usize {
        self.pressure.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pressure.is_empty()
    }

    pub fn pressure_domain(&self) -> (f64, f64) {
        self.pressure.domain()
    }

    pub fn temperature_domain(&self) -> (f64, f64) {
        self.temperature.domain()
    }

    pub fn row(&self, i: usize) -> SaturationRow {
        SaturationRow {
            pressure: self.pressure.breakpoints()[i],
            temperature: self.temperature.breakpoints()[i],
            liquid: PropertyColumns::from_fn(|c| self.liquid[c.index()][i]),
            vapor: PropertyColumns::from_fn(|c| self.vapor[c.index()][i]),
        }
    }

    pub fn rows(&self) -> Vec<SaturationRow> {
        (0..self.len()).map(|i| self.row(i)).collect()
    }

    /// Saturation temperature at pressure `p`.
    pub fn tsat(&self, p: f64) -> TableResult<f64> {
        self.pressure.interpolate(self.temperature.breakpoints(), p)
    }

    /// Saturation pressure at temperature `t`.
    pub fn psat(&self, t: f64) -> TableResult<f64> {
        self.temperature.interpolate(self.pressure.breakpoints(), t)
    }

    pub fn at_pressure(&self, p: f64) -> TableResult<SaturationState> {
        let b = self.pressure.bracket(p)?;
        Ok(SaturationState {
            pressure: p,
            temperature: b.blend(self.temperature.breakpoints()),
            liquid: PropertyColumns::from_fn(|c| b.blend(&self.liquid[c.index()])),
            vapor: PropertyColumns::from_fn(|c| b.blend(&self.vapor[c.index()])),
        })
    }

    pub fn at_temperature(&self, t: f64) -> TableResult<SaturationState> {
        let b = self.temperature.bracket(t)?;
        Ok(SaturationState {
            pressure: b.blend(self.pressure.breakpoints()),
            temperature: t,
            liquid: PropertyColumns::from_fn(|c| b.blend(&self.liquid[c.index()])),
            vapor: PropertyColumns::from_fn(|c| b.blend(&self.vapor[c.index()])),
        })
    }

    /// Saturated-liquid properties at temperature `t`; the subcooled-liquid
    /// approximation when no compressed data covers the pressure.
    pub fn liquid_at_temperature(&self, t: f64) -> TableResult<PropertyColumns> {
        Ok(self.at_temperature(t)?.liquid)
    }

    /// Temperature at which the saturated-liquid `column` equals `target`.
    pub fn liquid_temperature_at(&self, column: Column, target: f64) -> TableResult<f64> {
        self.temperature
            .invert(column, &self.liquid[column.index()], target)
    }
}

/// Liquid and vapor end states at one point on the dome.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SaturationState {
    pub pressure: f64,
    pub temperature: f64,
    pub liquid: PropertyColumns,
    pub vapor: PropertyColumns,
}

impl SaturationState {
    /// Quality-weighted mixture `f + x (g - f)` for every column.
    ///
    /// `x` is not range-checked here.
    pub fn mix(&self, x: f64) -> PropertyColumns {
        PropertyColumns::lerp(x, &self.liquid, &self.vapor)
    }

    /// Quality implied by `value` of `column`. May fall outside `[0, 1]`,
    /// which places the state off the dome.
    pub fn quality(&self, column: Column, value: f64) -> TableResult<f64> {
        let f = self.liquid.get(column);
        let g = self.vapor.get(column);
        if f == g {
            return Err(TableError::integrity(format!(
                "saturated liquid and vapor {} coincide ({f}) at P={}, T={}",
                column.name(),
                self.pressure,
                self.temperature
            )));
        }
        if value == f {
            return Ok(0.0);
        }
        if value == g {
            return Ok(1.0);
        }
        Ok((value - f) / (g - f))
    }
}
