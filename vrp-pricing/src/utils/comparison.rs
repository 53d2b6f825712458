use crate::utils::Float;
use std::cmp::Ordering;

/// Compares floating point numbers, NaN is treated as the greatest value.
#[inline]
pub fn compare_floats(a: Float, b: Float) -> Ordering {
    match a.partial_cmp(&b) {
        Some(ordering) => ordering,
        None => match (a.is_nan(), b.is_nan()) {
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            _ => Ordering::Equal,
        },
    }
}

/// Tolerance used when float resources are compared against limits.
pub const EPSILON: Float = 1E-9;

/// Checks whether `value` exceeds `limit` taking into account float tolerance.
#[inline]
pub fn exceeds(value: Float, limit: Float) -> bool {
    value > limit + EPSILON
}
