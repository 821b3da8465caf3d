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

//! Configuration errors.
//!
//! Every invalid input of the workbench is rejected before a search starts and
//! surfaces as a `ConfigurationError`. Numeric trouble during a search is never
//! reported through this type; scores are clamped instead so a run always
//! produces a comparable signal.

/// The error type for invalid environment, fitness, or algorithm settings.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    /// A count that must be strictly positive was zero.
    #[error("invalid {name}: must be greater than zero")]
    ZeroCount { name: &'static str },

    /// A probability or rate lies outside `[0, 1]` or is not finite.
    #[error("invalid {name}: {value} is not a probability in [0, 1]")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },

    /// A value that must be finite and non-negative is negative or not finite.
    #[error("invalid {name}: {value} must be finite and non-negative")]
    Negative { name: &'static str, value: f64 },

    /// A value that must be finite and strictly positive is not.
    #[error("invalid {name}: {value} must be finite and greater than zero")]
    NonPositive { name: &'static str, value: f64 },

    /// A sampling range is empty, inverted, or not finite.
    #[error("invalid {name} range: [{min}, {max}]")]
    InvalidRange {
        name: &'static str,
        min: f64,
        max: f64,
    },
}

impl ConfigurationError {
    /// Fails with `ZeroCount` when `value == 0`.
    #[inline]
    pub fn ensure_non_zero(name: &'static str, value: usize) -> Result<(), Self> {
        if value == 0 {
            return Err(Self::ZeroCount { name });
        }
        Ok(())
    }

    /// Fails with `ProbabilityOutOfRange` unless `value` is a finite number in `[0, 1]`.
    #[inline]
    pub fn ensure_probability(name: &'static str, value: f64) -> Result<(), Self> {
        if !(0.0..=1.0).contains(&value) {
            return Err(Self::ProbabilityOutOfRange { name, value });
        }
        Ok(())
    }

    /// Fails with `Negative` unless `value` is finite and `>= 0`.
    #[inline]
    pub fn ensure_non_negative(name: &'static str, value: f64) -> Result<(), Self> {
        if !value.is_finite() || value < 0.0 {
            return Err(Self::Negative { name, value });
        }
        Ok(())
    }

    /// Fails with `NonPositive` unless `value` is finite and `> 0`.
    #[inline]
    pub fn ensure_positive(name: &'static str, value: f64) -> Result<(), Self> {
        if !value.is_finite() || value <= 0.0 {
            return Err(Self::NonPositive { name, value });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probability_bounds_are_inclusive() {
        assert!(ConfigurationError::ensure_probability("p", 0.0).is_ok());
        assert!(ConfigurationError::ensure_probability("p", 1.0).is_ok());
        assert_eq!(
            ConfigurationError::ensure_probability("p", 1.5),
            Err(ConfigurationError::ProbabilityOutOfRange {
                name: "p",
                value: 1.5
            })
        );
        assert!(ConfigurationError::ensure_probability("p", f64::NAN).is_err());
    }

    #[test]
    fn test_positive_and_non_negative_reject_non_finite() {
        assert!(ConfigurationError::ensure_positive("x", f64::INFINITY).is_err());
        assert!(ConfigurationError::ensure_positive("x", 0.0).is_err());
        assert!(ConfigurationError::ensure_non_negative("x", 0.0).is_ok());
        assert!(ConfigurationError::ensure_non_negative("x", -1e-9).is_err());
    }

    #[test]
    fn test_display_names_the_offending_setting() {
        let err = ConfigurationError::ZeroCount { name: "node_count" };
        assert_eq!(err.to_string(), "invalid node_count: must be greater than zero");
    }
}
