use proptest::prelude::*;
use steam_tables::{Column, PiecewiseTable, TableError, steam_tables};

fn seam_pressures(table: &PiecewiseTable) -> Vec<(usize, f64)> {
    table
        .blocks()
        .windows(2)
        .enumerate()
        .map(|(k, pair)| (k, pair[0].pressure().last()))
        .collect()
}

fn check_seams(table: &PiecewiseTable) {
    for (k, p) in seam_pressures(table) {
        let lower = &table.blocks()[k];
        let upper = &table.blocks()[k + 1];
        let t_lo = lower.temperature().first().max(upper.temperature().first());
        let t_hi = lower.temperature().last().min(upper.temperature().last());
        for i in 0..=20 {
            let t = t_lo + (t_hi - t_lo) * f64::from(i) / 20.0;
            let below = table.interpolate_in_block(k, p, t).unwrap();
            let above = table.interpolate_in_block(k + 1, p, t).unwrap();
            assert_eq!(below, above, "{} seam P={p} T={t}", table.name());
        }
    }
}

#[test]
fn superheated_seams_are_continuous() {
    let store = steam_tables().unwrap();
    assert_eq!(
        seam_pressures(store.superheated())
            .iter()
            .map(|(_, p)| *p)
            .collect::<Vec<_>>(),
        vec![100.0, 400.0, 1400.0, 3000.0]
    );
    check_seams(store.superheated());
}

#[test]
fn compressed_seams_are_continuous() {
    let store = steam_tables().unwrap();
    check_seams(store.compressed());
}

#[test]
fn approaching_a_seam_from_both_sides_converges() {
    let store = steam_tables().unwrap();
    let table = store.superheated();
    let t = 275.0;
    let at = table.interpolate(400.0, t).unwrap();
    let below = table.interpolate(400.0 - 1e-9, t).unwrap();
    let above = table.interpolate(400.0 + 1e-9, t).unwrap();
    for c in Column::ALL {
        assert!((below.get(c) - at.get(c)).abs() < 1e-9);
        assert!((above.get(c) - at.get(c)).abs() < 1e-9);
    }
}

#[test]
fn pressure_inverse_hits_stored_isobar() {
    let store = steam_tables().unwrap();
    let p = store
        .superheated()
        .pressure_at(400.0, Column::SpecificVolume, 0.30661)
        .unwrap();
    assert_eq!(p, 1000.0);
}

#[test]
fn temperature_gap_in_sparse_block_is_reported() {
    let store = steam_tables().unwrap();
    // 2 MPa rows start at 250 °C.
    let err = store.superheated().interpolate(2000.0, 220.0).unwrap_err();
    match err {
        TableError::OutOfRange { axis, min, .. } => {
            assert_eq!(axis, "temperature");
            assert_eq!(min, 250.0);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn first_block_containing_the_target_answers() {
    let store = steam_tables().unwrap();
    // h is 1134.0 at both 15 and 20 MPa on the 260 °C isotherm; the
    // 10-15 MPa block reaches it first.
    let p = store
        .compressed()
        .pressure_at(260.0, Column::Enthalpy, 1134.0)
        .unwrap();
    assert_eq!(p, 15000.0);
}

proptest! {
    #[test]
    fn superheated_temperature_inverse_round_trips(p in 10.0_f64..5000.0, frac in 0.0_f64..=1.0) {
        let store = steam_tables().unwrap();
        let table = store.superheated();
        let (t_lo, t_hi) = table.temperature_domain_at(p).unwrap();
        let t = t_lo + frac * (t_hi - t_lo);
        prop_assume!(table.block_index(p, t).is_ok());

        for column in Column::ALL {
            let value = table.interpolate(p, t).unwrap().get(column);
            let back = table.temperature_at(p, column, value).unwrap();
            prop_assert!((back - t).abs() < 1e-6, "{column:?} p={p} t={t} back={back}");
        }
    }

    #[test]
    fn compressed_interpolation_stays_within_cell(p in 5000.0_f64..20000.0, t in 0.0_f64..260.0) {
        let store = steam_tables().unwrap();
        let table = store.compressed();
        let k = table.block_index(p, t).unwrap();
        let grid = &table.blocks()[k];
        let bp = grid.pressure().bracket(p).unwrap();
        let bt = grid.temperature().bracket(t).unwrap();
        let h = table.interpolate(p, t).unwrap().enthalpy;

        let corners = [
            grid.value(Column::Enthalpy, bp.index, bt.index),
            grid.value(Column::Enthalpy, bp.index, bt.index + 1),
            grid.value(Column::Enthalpy, bp.index + 1, bt.index),
            grid.value(Column::Enthalpy, bp.index + 1, bt.index + 1),
        ];
        let lo = corners.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = corners.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(h >= lo - 1e-9 && h <= hi + 1e-9);
    }
}
