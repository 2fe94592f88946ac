use crate::CoreError;

/// Floating point type used throughout system
pub type Real = f64;

/// Absolute/relative tolerance pair used for consistency checks.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-9,
            rel: 1e-6,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Linear weight of `x` inside `[x0, x1]`.
///
/// Returns exactly `0.0` at `x0` and exactly `1.0` at `x1`.
#[inline]
pub fn weight(x: Real, x0: Real, x1: Real) -> Real {
    if x == x0 {
        0.0
    } else if x == x1 {
        1.0
    } else {
        (x - x0) / (x1 - x0)
    }
}

/// Affine blend `y0 + w * (y1 - y0)` that reproduces the end points exactly.
#[inline]
pub fn lerp(w: Real, y0: Real, y1: Real) -> Real {
    if w == 0.0 {
        y0
    } else if w == 1.0 {
        y1
    } else {
        y0 + w * (y1 - y0)
    }
}
