// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Numeric guard for scores.
//!
//! A search must keep receiving a comparable signal even in pathological
//! environments, so scores are never allowed to become `NaN` or infinite.
//! Instead of raising, `guard_finite` clamps every score into
//! `[0, SCORE_CEILING]`.

/// Largest score a candidate can receive.
pub const SCORE_CEILING: f64 = 1e12;

/// Returns `true` if `value` would be altered by `guard_finite`.
#[inline]
pub fn needs_guard(value: f64) -> bool {
    !value.is_finite() || !(0.0..=SCORE_CEILING).contains(&value)
}

/// Clamps `value` into `[0, SCORE_CEILING]`, mapping `NaN` and `+inf` to the ceiling.
#[inline]
pub fn guard_finite(value: f64) -> f64 {
    if value.is_nan() {
        return SCORE_CEILING;
    }
    value.clamp(0.0, SCORE_CEILING)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_maps_non_finite_to_ceiling() {
        assert_eq!(guard_finite(f64::NAN), SCORE_CEILING);
        assert_eq!(guard_finite(f64::INFINITY), SCORE_CEILING);
        assert_eq!(guard_finite(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_guard_keeps_regular_values() {
        assert_eq!(guard_finite(3.5), 3.5);
        assert!(!needs_guard(3.5));
        assert!(needs_guard(-1.0));
        assert!(needs_guard(SCORE_CEILING * 2.0));
        assert!(needs_guard(f64::NAN));
    }
}
