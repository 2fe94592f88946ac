//! One-dimensional linear interpolation and its closed-form inverse.
//!
//! Everything here works on plain slices so the same kernels serve the
//! saturation table, the rows and columns of a [`GridTable`], and callers that
//! hold their own breakpoint arrays.
//!
//! [`GridTable`]: crate::grid::GridTable

use crate::error::{TableError, TableResult};
use steam_core::numeric::{lerp, weight};

/// Interval `[xs[index], xs[index + 1]]` containing a query point, plus the
/// linear weight of the point inside it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    pub index: usize,
    pub weight: f64,
}

impl Bracket {
    /// Blend the two values of `values` addressed by this bracket.
    #[inline]
    pub fn blend(&self, values: &[f64]) -> f64 {
        lerp(self.weight, values[self.index], values[self.index + 1])
    }
}

/// Locate `x` in a strictly increasing breakpoint sequence.
///
/// Binary search; returns `None` when `x` is NaN or outside
/// `[xs[0], xs[n - 1]]`. A stored breakpoint yields weight exactly `0.0`
/// (or `1.0` for the last breakpoint).
pub fn bracket(breakpoints: &[f64], x: f64) -> Option<Bracket> {
    let n = breakpoints.len();
    if n < 2 || x.is_nan() || x < breakpoints[0] || x > breakpoints[n - 1] {
        return None;
    }

    // Number of breakpoints <= x; at least one because x >= xs[0].
    let k = breakpoints.partition_point(|&b| b <= x);
    if k == n {
        return Some(Bracket {
            index: n - 2,
            weight: 1.0,
        });
    }

    let index = k - 1;
    Some(Bracket {
        index,
        weight: weight(x, breakpoints[index], breakpoints[index + 1]),
    })
}

/// Linear interpolation of `values` over `breakpoints` at `x`.
///
/// The breakpoints must be strictly increasing. Points outside the covered
/// domain are an [`TableError::OutOfRange`] failure; nothing is extrapolated.
pub fn interpolate_1d(breakpoints: &[f64], values: &[f64], x: f64) -> TableResult<f64> {
    check_shape(breakpoints, values)?;
    check_increasing("breakpoints", breakpoints)?;
    lookup("x", breakpoints, values, x)
}

/// Solve `interpolate_1d(breakpoints, values, x) == target` for `x`.
///
/// The column may have flat or turning stretches elsewhere; only the
/// intervals that enclose `target` matter. A target that lands on a flat
/// interval or on more than one interval is a [`TableError::DataIntegrity`]
/// fault; it is never resolved by picking one of several roots.
pub fn invert_1d(breakpoints: &[f64], values: &[f64], target: f64) -> TableResult<f64> {
    check_shape(breakpoints, values)?;
    check_increasing("breakpoints", breakpoints)?;
    invert("value", breakpoints, values, target)
}

/// Interpolation over breakpoints that are already known to be valid.
pub(crate) fn lookup(
    axis: &'static str,
    breakpoints: &[f64],
    values: &[f64],
    x: f64,
) -> TableResult<f64> {
    if breakpoints.len() == 1 {
        return if x == breakpoints[0] {
            Ok(values[0])
        } else {
            Err(TableError::out_of_range(
                axis,
                x,
                (breakpoints[0], breakpoints[0]),
            ))
        };
    }

    bracket(breakpoints, x)
        .map(|b| b.blend(values))
        .ok_or_else(|| TableError::out_of_range(axis, x, domain(breakpoints)))
}

/// Inverse lookup over breakpoints that are already known to be valid.
///
/// `label` names the dependent column for error reporting.
pub(crate) fn invert(
    label: &'static str,
    breakpoints: &[f64],
    values: &[f64],
    target: f64,
) -> TableResult<f64> {
    let n = values.len();
    if n == 1 {
        return if target == values[0] {
            Ok(breakpoints[0])
        } else {
            Err(TableError::out_of_range(label, target, (values[0], values[0])))
        };
    }

    let mut root: Option<f64> = None;
    for i in 0..n - 1 {
        let (a, b) = (values[i], values[i + 1]);
        if !(a.min(b) <= target && target <= a.max(b)) {
            continue;
        }
        if a == b {
            return Err(TableError::integrity(format!(
                "{label} column is flat at {target} between {} and {}",
                breakpoints[i],
                breakpoints[i + 1]
            )));
        }
        let x = if target == a {
            breakpoints[i]
        } else if target == b {
            breakpoints[i + 1]
        } else {
            lerp((target - a) / (b - a), breakpoints[i], breakpoints[i + 1])
        };
        match root {
            // Adjacent intervals meet at a shared node.
            Some(prev) if prev == x => {}
            Some(prev) => {
                return Err(TableError::integrity(format!(
                    "{label} column reaches {target} more than once (at {prev} and {x})"
                )));
            }
            None => root = Some(x),
        }
    }

    root.ok_or_else(|| TableError::out_of_range(label, target, value_span(values)))
}

fn value_span(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

pub(crate) fn domain(breakpoints: &[f64]) -> (f64, f64) {
    (breakpoints[0], breakpoints[breakpoints.len() - 1])
}

pub(crate) fn check_increasing(what: &str, breakpoints: &[f64]) -> TableResult<()> {
    if let Some(bad) = breakpoints.iter().find(|b| !b.is_finite()) {
        return Err(TableError::malformed(format!(
            "{what} contain non-finite value {bad}"
        )));
    }
    if let Some(i) = breakpoints.windows(2).position(|w| w[0] >= w[1]) {
        return Err(TableError::malformed(format!(
            "{what} must be strictly increasing ({} >= {} at index {})",
            breakpoints[i],
            breakpoints[i + 1],
            i
        )));
    }
    Ok(())
}

fn check_shape(breakpoints: &[f64], values: &[f64]) -> TableResult<()> {
    if breakpoints.is_empty() {
        return Err(TableError::malformed("interpolation needs at least one breakpoint"));
    }
    if breakpoints.len() != values.len() {
        return Err(TableError::malformed(format!(
            "breakpoint/value length mismatch ({} vs {})",
            breakpoints.len(),
            values.len()
        )));
    }
    Ok(())
}
