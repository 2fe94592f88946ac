//! Piecewise tables: a pressure-ordered stack of rectangular grid blocks.
//!
//! Superheated and compressed-liquid data are not rectangular; the set of
//! tabulated temperatures changes with pressure. Each run of isobars that
//! shares one temperature list becomes a [`GridTable`] block. Adjacent blocks
//! share their boundary isobar, and on the temperatures both blocks cover the
//! shared isobar must carry identical nodes. That makes the surface
//! continuous at every seam.

use tracing::trace;

use crate::error::{TableError, TableResult};
use crate::grid::{Column, GridTable, PropertyColumns};

/// One rectangular run of isobars inside a piecewise table.
pub type PiecewiseBlock = GridTable;

#[derive(Clone, Debug, PartialEq)]
pub struct PiecewiseTable {
    name: String,
    blocks: Vec<GridTable>,
}

impl PiecewiseTable {
    pub fn new(name: impl Into<String>, blocks: Vec<GridTable>) -> TableResult<Self> {
        let name = name.into();
        if blocks.is_empty() {
            return Err(TableError::malformed(format!("{name} table has no blocks")));
        }
        for (k, pair) in blocks.windows(2).enumerate() {
            check_seam(&name, k, &pair[0], &pair[1])?;
        }
        Ok(Self { name, blocks })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn blocks(&self) -> &[GridTable] {
        &self.blocks
    }

    pub fn pressure_domain(&self) -> (f64, f64) {
        let first = &self.blocks[0];
        let last = &self.blocks[self.blocks.len() - 1];
        (first.pressure().first(), last.pressure().last())
    }

    pub fn covers_pressure(&self, p: f64) -> bool {
        let (lo, hi) = self.pressure_domain();
        p >= lo && p <= hi
    }

    /// Temperature span covered at pressure `p` (union over blocks).
    pub fn temperature_domain_at(&self, p: f64) -> Option<(f64, f64)> {
        self.blocks
            .iter()
            .filter(|b| b.pressure().contains(p))
            .map(|b| b.temperature().domain())
            .reduce(|a, b| (a.0.min(b.0), a.1.max(b.1)))
    }

    /// First block whose pressure and temperature ranges both contain the
    /// point.
    pub fn block_index(&self, p: f64, t: f64) -> TableResult<usize> {
        if let Some(k) = self.blocks.iter().position(|b| b.contains(p, t)) {
            return Ok(k);
        }
        match self.temperature_domain_at(p) {
            Some(domain) => Err(TableError::out_of_range("temperature", t, domain)),
            None => Err(TableError::out_of_range(
                "pressure",
                p,
                self.pressure_domain(),
            )),
        }
    }

    /// Property columns at `(p, t)`.
    pub fn interpolate(&self, p: f64, t: f64) -> TableResult<PropertyColumns> {
        let k = self.block_index(p, t)?;
        trace!(table = %self.name, block = k, p, t, "piecewise lookup");
        self.blocks[k].interpolate(p, t)
    }

    /// Evaluate in one specific block. Used to compare both sides of a seam.
    pub fn interpolate_in_block(&self, block: usize, p: f64, t: f64) -> TableResult<PropertyColumns> {
        let grid = self.blocks.get(block).ok_or_else(|| {
            TableError::malformed(format!(
                "{} table has {} blocks, asked for block {block}",
                self.name,
                self.blocks.len()
            ))
        })?;
        grid.interpolate(p, t)
    }

    /// Temperature at which `column` equals `target` along the isobar `p`.
    ///
    /// Searches blocks in pressure order; the first block whose column range
    /// contains the target answers.
    pub fn temperature_at(&self, p: f64, column: Column, target: f64) -> TableResult<f64> {
        let mut span: Option<(f64, f64)> = None;
        for (k, grid) in self.blocks.iter().enumerate() {
            if !grid.pressure().contains(p) {
                continue;
            }
            let nodes = grid.isobar_at(column, p)?;
            match grid.temperature().invert(column, &nodes, target) {
                Ok(t) => {
                    trace!(table = %self.name, block = k, p, target, t, "inverse in temperature");
                    return Ok(t);
                }
                Err(TableError::OutOfRange { min, max, .. }) => {
                    span = Some(widen(span, (min, max)));
                }
                Err(other) => return Err(other),
            }
        }
        Err(self.miss("pressure", p, column, target, span))
    }

    /// Pressure at which `column` equals `target` along the isotherm `t`.
    pub fn pressure_at(&self, t: f64, column: Column, target: f64) -> TableResult<f64> {
        let mut span: Option<(f64, f64)> = None;
        for (k, grid) in self.blocks.iter().enumerate() {
            if !grid.temperature().contains(t) {
                continue;
            }
            let nodes = grid.isotherm_at(column, t)?;
            match grid.pressure().invert(column, &nodes, target) {
                Ok(p) => {
                    trace!(table = %self.name, block = k, t, target, p, "inverse in pressure");
                    return Ok(p);
                }
                Err(TableError::OutOfRange { min, max, .. }) => {
                    span = Some(widen(span, (min, max)));
                }
                Err(other) => return Err(other),
            }
        }
        match span {
            Some(_) => Err(self.miss("temperature", t, column, target, span)),
            None => Err(TableError::out_of_range(
                "temperature",
                t,
                self.temperature_span(),
            )),
        }
    }

    fn temperature_span(&self) -> (f64, f64) {
        self.blocks
            .iter()
            .map(|b| b.temperature().domain())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |a, b| {
                (a.0.min(b.0), a.1.max(b.1))
            })
    }

    fn miss(
        &self,
        axis: &'static str,
        at: f64,
        column: Column,
        target: f64,
        span: Option<(f64, f64)>,
    ) -> TableError {
        match span {
            Some(range) => TableError::out_of_range(column.name(), target, range),
            None => TableError::out_of_range(axis, at, self.pressure_domain()),
        }
    }
}

/// Free-function form of [`PiecewiseTable::interpolate`].
pub fn interpolate_2d_piecewise(table: &PiecewiseTable, p: f64, t: f64) -> TableResult<PropertyColumns> {
    table.interpolate(p, t)
}

fn widen(span: Option<(f64, f64)>, next: (f64, f64)) -> (f64, f64) {
    match span {
        Some((lo, hi)) => (lo.min(next.0), hi.max(next.1)),
        None => next,
    }
}

fn check_seam(name: &str, k: usize, lower: &GridTable, upper: &GridTable) -> TableResult<()> {
    let p_hi = lower.pressure().last();
    let p_lo = upper.pressure().first();
    if p_hi != p_lo {
        return Err(TableError::malformed(format!(
            "{name} blocks {k} and {} must share a boundary isobar ({p_hi} vs {p_lo})",
            k + 1
        )));
    }

    let t_lo = lower.temperature().first().max(upper.temperature().first());
    let t_hi = lower.temperature().last().min(upper.temperature().last());
    let in_overlap = |t: &f64| *t >= t_lo && *t <= t_hi;

    let below: Vec<(usize, f64)> = lower
        .temperature()
        .breakpoints()
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, t)| in_overlap(t))
        .collect();
    let above: Vec<(usize, f64)> = upper
        .temperature()
        .breakpoints()
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, t)| in_overlap(t))
        .collect();

    let seam_breakpoints_match = below.len() == above.len()
        && below.iter().zip(above.iter()).all(|(a, b)| a.1 == b.1);
    if !seam_breakpoints_match {
        return Err(TableError::integrity(format!(
            "{name} seam at P={p_hi}: blocks {k} and {} tabulate different temperatures",
            k + 1
        )));
    }

    let ip_lower = lower.pressure().len() - 1;
    for ((it_lo, t), (it_up, _)) in below.iter().zip(above.iter()) {
        if lower.node(ip_lower, *it_lo) != upper.node(0, *it_up) {
            return Err(TableError::integrity(format!(
                "{name} seam at P={p_hi}, T={t}: blocks {k} and {} disagree",
                k + 1
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Axis;

    fn node(h: f64) -> PropertyColumns {
        PropertyColumns::new(1000.0 / h, h - 150.0, h, h / 400.0)
    }

    fn block(ps: &[f64], ts: &[f64], h: impl Fn(f64, f64) -> f64) -> GridTable {
        GridTable::new(
            Axis::new("pressure", ps.to_vec()).unwrap(),
            Axis::new("temperature", ts.to_vec()).unwrap(),
            ps.iter()
                .map(|p| ts.iter().map(|t| node(h(*p, *t))).collect())
                .collect(),
        )
        .unwrap()
    }

    fn h(p: f64, t: f64) -> f64 {
        2500.0 + 2.0 * t - 0.01 * p
    }

    fn two_blocks() -> PiecewiseTable {
        PiecewiseTable::new(
            "test",
            vec![
                block(&[10.0, 100.0], &[100.0, 200.0, 300.0], h),
                block(&[100.0, 400.0], &[200.0, 300.0, 400.0], h),
            ],
        )
        .unwrap()
    }

    #[test]
    fn rejects_gap_between_blocks() {
        let err = PiecewiseTable::new(
            "test",
            vec![
                block(&[10.0, 100.0], &[100.0, 200.0], h),
                block(&[200.0, 400.0], &[100.0, 200.0], h),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, TableError::Malformed { .. }));
    }

    #[test]
    fn rejects_mismatched_seam_nodes() {
        let err = PiecewiseTable::new(
            "test",
            vec![
                block(&[10.0, 100.0], &[100.0, 200.0, 300.0], h),
                block(&[100.0, 400.0], &[200.0, 300.0], |p, t| h(p, t) + 0.1),
            ],
        )
        .unwrap_err();
        assert!(err.is_data_integrity());
    }

    #[test]
    fn rejects_mismatched_seam_temperatures() {
        let err = PiecewiseTable::new(
            "test",
            vec![
                block(&[10.0, 100.0], &[100.0, 200.0, 300.0], h),
                block(&[100.0, 400.0], &[200.0, 250.0, 300.0], h),
            ],
        )
        .unwrap_err();
        assert!(err.is_data_integrity());
    }

    #[test]
    fn seam_is_continuous() {
        let table = two_blocks();
        for t in [200.0, 225.0, 250.0, 287.5, 300.0] {
            let below = table.interpolate_in_block(0, 100.0, t).unwrap();
            let above = table.interpolate_in_block(1, 100.0, t).unwrap();
            assert_eq!(below, above, "seam mismatch at T={t}");
        }
    }

    #[test]
    fn picks_block_covering_temperature() {
        let table = two_blocks();
        assert_eq!(table.block_index(50.0, 150.0).unwrap(), 0);
        assert_eq!(table.block_index(100.0, 250.0).unwrap(), 0);
        assert_eq!(table.block_index(100.0, 350.0).unwrap(), 1);
        assert_eq!(table.block_index(200.0, 350.0).unwrap(), 1);
    }

    #[test]
    fn out_of_range_reports_axis() {
        let table = two_blocks();
        let err = table.interpolate(500.0, 300.0).unwrap_err();
        assert!(matches!(err, TableError::OutOfRange { axis: "pressure", .. }));

        let err = table.interpolate(200.0, 150.0).unwrap_err();
        match err {
            TableError::OutOfRange { axis, min, max, .. } => {
                assert_eq!(axis, "temperature");
                assert_eq!((min, max), (200.0, 400.0));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn temperature_inverse_round_trips() {
        let table = two_blocks();
        for (p, t) in [(50.0, 150.0), (100.0, 260.0), (250.0, 380.0)] {
            let target = table.interpolate(p, t).unwrap().enthalpy;
            let back = table.temperature_at(p, Column::Enthalpy, target).unwrap();
            assert!((back - t).abs() < 1e-9, "p={p} t={t} back={back}");
        }
    }

    #[test]
    fn pressure_inverse_round_trips() {
        let table = two_blocks();
        for (p, t) in [(50.0, 150.0), (300.0, 350.0)] {
            let target = table.interpolate(p, t).unwrap().enthalpy;
            let back = table.pressure_at(t, Column::Enthalpy, target).unwrap();
            assert!((back - p).abs() < 1e-6, "p={p} t={t} back={back}");
        }
    }

    #[test]
    fn inverse_target_outside_all_blocks() {
        let table = two_blocks();
        let err = table
            .temperature_at(100.0, Column::Enthalpy, 9000.0)
            .unwrap_err();
        assert!(matches!(err, TableError::OutOfRange { axis: "enthalpy", .. }));
    }

    fn bumpy() -> PiecewiseTable {
        // h along each isobar: 2900, 3200, 3100.
        PiecewiseTable::new(
            "bumpy",
            vec![block(&[10.0, 100.0], &[100.0, 200.0, 300.0], |_, t| {
                if t == 200.0 { 3200.0 } else { 2800.0 + t }
            })],
        )
        .unwrap()
    }

    #[test]
    fn inverse_with_two_roots_is_integrity_fault() {
        let err = bumpy()
            .temperature_at(50.0, Column::Enthalpy, 3150.0)
            .unwrap_err();
        assert!(err.is_data_integrity());
    }

    #[test]
    fn inverse_with_one_root_on_a_turning_isobar_resolves() {
        let t = bumpy().temperature_at(50.0, Column::Enthalpy, 2950.0).unwrap();
        assert!((t - (100.0 + 100.0 / 6.0)).abs() < 1e-9);
    }
}
