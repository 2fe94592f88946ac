//! Rectangular pressure x temperature grids carrying the four dependent
//! property columns.

use serde::{Deserialize, Serialize};

use crate::error::{TableError, TableResult};
use crate::interp::{self, Bracket};
use steam_core::numeric::lerp;

/// Dependent property column stored at every table node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    SpecificVolume,
    InternalEnergy,
    Enthalpy,
    Entropy,
}

impl Column {
    pub const ALL: [Column; 4] = [
        Column::SpecificVolume,
        Column::InternalEnergy,
        Column::Enthalpy,
        Column::Entropy,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Column::SpecificVolume => "specific_volume",
            Column::InternalEnergy => "internal_energy",
            Column::Enthalpy => "enthalpy",
            Column::Entropy => "entropy",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// The four dependent properties of one node or interpolated point.
///
/// Units: m^3/kg, kJ/kg, kJ/kg, kJ/(kg K).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyColumns {
    pub specific_volume: f64,
    pub internal_energy: f64,
    pub enthalpy: f64,
    pub entropy: f64,
}

impl PropertyColumns {
    pub fn new(specific_volume: f64, internal_energy: f64, enthalpy: f64, entropy: f64) -> Self {
        Self {
            specific_volume,
            internal_energy,
            enthalpy,
            entropy,
        }
    }

    pub fn get(&self, column: Column) -> f64 {
        match column {
            Column::SpecificVolume => self.specific_volume,
            Column::InternalEnergy => self.internal_energy,
            Column::Enthalpy => self.enthalpy,
            Column::Entropy => self.entropy,
        }
    }

    pub(crate) fn from_fn(mut f: impl FnMut(Column) -> f64) -> Self {
        Self {
            specific_volume: f(Column::SpecificVolume),
            internal_energy: f(Column::InternalEnergy),
            enthalpy: f(Column::Enthalpy),
            entropy: f(Column::Entropy),
        }
    }

    /// Component-wise affine blend; exact at `w = 0` and `w = 1`.
    pub fn lerp(w: f64, a: &Self, b: &Self) -> Self {
        Self::from_fn(|c| lerp(w, a.get(c), b.get(c)))
    }

    pub fn is_finite(&self) -> bool {
        Column::ALL.iter().all(|c| self.get(*c).is_finite())
    }
}

/// A named, strictly increasing breakpoint sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    name: &'static str,
    breakpoints: Vec<f64>,
}

impl Axis {
    pub fn new(name: &'static str, breakpoints: Vec<f64>) -> TableResult<Self> {
        if breakpoints.len() < 2 {
            return Err(TableError::malformed(format!(
                "{name} axis needs at least two breakpoints, got {}",
                breakpoints.len()
            )));
        }
        interp::check_increasing(name, &breakpoints)?;
        Ok(Self { name, breakpoints })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn breakpoints(&self) -> &[f64] {
        &self.breakpoints
    }

    pub fn len(&self) -> usize {
        self.breakpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.breakpoints.is_empty()
    }

    pub fn first(&self) -> f64 {
        self.breakpoints[0]
    }

    pub fn last(&self) -> f64 {
        self.breakpoints[self.breakpoints.len() - 1]
    }

    pub fn domain(&self) -> (f64, f64) {
        (self.first(), self.last())
    }

    pub fn contains(&self, x: f64) -> bool {
        x >= self.first() && x <= self.last()
    }

    pub fn bracket(&self, x: f64) -> TableResult<Bracket> {
        interp::bracket(&self.breakpoints, x)
            .ok_or_else(|| TableError::out_of_range(self.name, x, self.domain()))
    }

    pub fn interpolate(&self, values: &[f64], x: f64) -> TableResult<f64> {
        interp::lookup(self.name, &self.breakpoints, values, x)
    }

    /// Inverse lookup of `target` in `values` laid out along this axis.
    pub fn invert(&self, column: Column, values: &[f64], target: f64) -> TableResult<f64> {
        interp::invert(column.name(), &self.breakpoints, values, target)
    }
}

/// Rectangular grid over `pressure x temperature`.
///
/// Nodes are stored per column, pressure-major, so each isobar is a
/// contiguous slice.
#[derive(Clone, Debug, PartialEq)]
pub struct GridTable {
    pressure: Axis,
    temperature: Axis,
    columns: [Vec<f64>; 4],
}

impl GridTable {
    /// `nodes[ip][it]` holds the properties at `(pressure[ip], temperature[it])`.
    pub fn new(pressure: Axis, temperature: Axis, nodes: Vec<Vec<PropertyColumns>>) -> TableResult<Self> {
        let (np, nt) = (pressure.len(), temperature.len());
        if nodes.len() != np {
            return Err(TableError::malformed(format!(
                "grid has {} isobars but {np} pressure breakpoints",
                nodes.len()
            )));
        }

        let mut columns: [Vec<f64>; 4] = Default::default();
        for col in columns.iter_mut() {
            col.reserve(np * nt);
        }

        for (ip, row) in nodes.iter().enumerate() {
            if row.len() != nt {
                return Err(TableError::malformed(format!(
                    "isobar {} has {} nodes but {nt} temperature breakpoints",
                    pressure.breakpoints()[ip],
                    row.len()
                )));
            }
            for (it, node) in row.iter().enumerate() {
                if !node.is_finite() {
                    return Err(TableError::malformed(format!(
                        "non-finite node at P={}, T={}",
                        pressure.breakpoints()[ip],
                        temperature.breakpoints()[it]
                    )));
                }
                for c in Column::ALL {
                    columns[c.index()].push(node.get(c));
                }
            }
        }

        Ok(Self {
            pressure,
            temperature,
            columns,
        })
    }

    pub fn pressure(&self) -> &Axis {
        &self.pressure
    }

    pub fn temperature(&self) -> &Axis {
        &self.temperature
    }

    pub fn contains(&self, p: f64, t: f64) -> bool {
        self.pressure.contains(p) && self.temperature.contains(t)
    }

    pub fn value(&self, column: Column, ip: usize, it: usize) -> f64 {
        self.columns[column.index()][ip * self.temperature.len() + it]
    }

    pub fn node(&self, ip: usize, it: usize) -> PropertyColumns {
        PropertyColumns::from_fn(|c| self.value(c, ip, it))
    }

    /// Stored values of one column along isobar `ip`.
    pub fn isobar(&self, column: Column, ip: usize) -> &[f64] {
        let nt = self.temperature.len();
        &self.columns[column.index()][ip * nt..(ip + 1) * nt]
    }

    /// Stored values of one column along isotherm `it`.
    pub fn isotherm(&self, column: Column, it: usize) -> Vec<f64> {
        (0..self.pressure.len())
            .map(|ip| self.value(column, ip, it))
            .collect()
    }

    /// Bilinear interpolation of all four columns at `(p, t)`.
    pub fn interpolate(&self, p: f64, t: f64) -> TableResult<PropertyColumns> {
        let bp = self.pressure.bracket(p)?;
        let bt = self.temperature.bracket(t)?;
        Ok(PropertyColumns::from_fn(|c| self.blend(c, bp, bt)))
    }

    pub fn interpolate_column(&self, column: Column, p: f64, t: f64) -> TableResult<f64> {
        let bp = self.pressure.bracket(p)?;
        let bt = self.temperature.bracket(t)?;
        Ok(self.blend(column, bp, bt))
    }

    /// Column values along the temperature axis at pressure `p`, each node
    /// blended between its two neighbouring isobars.
    pub fn isobar_at(&self, column: Column, p: f64) -> TableResult<Vec<f64>> {
        let bp = self.pressure.bracket(p)?;
        let lo = self.isobar(column, bp.index);
        let hi = self.isobar(column, bp.index + 1);
        Ok(lo
            .iter()
            .zip(hi.iter())
            .map(|(a, b)| lerp(bp.weight, *a, *b))
            .collect())
    }

    /// Column values along the pressure axis at temperature `t`.
    pub fn isotherm_at(&self, column: Column, t: f64) -> TableResult<Vec<f64>> {
        let bt = self.temperature.bracket(t)?;
        Ok((0..self.pressure.len())
            .map(|ip| bt.blend(self.isobar(column, ip)))
            .collect())
    }

    // Weighted average of the four corners, written as two nested lerps so
    // that a point on a grid line reduces exactly to the 1D interpolation
    // along that line.
    fn blend(&self, column: Column, bp: Bracket, bt: Bracket) -> f64 {
        let lo = bt.blend(self.isobar(column, bp.index));
        let hi = bt.blend(self.isobar(column, bp.index + 1));
        lerp(bp.weight, lo, hi)
    }
}
