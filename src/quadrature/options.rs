//! This module defines configuration options for the adaptive quadrature routines.
//!
//! It provides the `QuadratureOptions` struct, which controls the accuracy requested from
//! every integration and the subdivision budget that bounds its cost. These options trade
//! computational effort against the reliability of the returned estimate.

use crate::error::VirialError;
use crate::math::constants::{
    DEFAULT_SUBDIVISION_LIMIT, DEFAULT_TOLERANCE, MACHINE_EPSILON, MAX_SUBDIVISION_LIMIT,
};
use serde::Serialize;

/// Configuration parameters for the adaptive Gauss-Kronrod integrators.
///
/// An integration stops as soon as the estimated absolute error falls below
/// `max(abs_tolerance, rel_tolerance * |integral|)`, or when `max_subdivisions` subintervals
/// have been created. In the latter case the best estimate is still returned together with a
/// [`QuadratureWarning`](super::QuadratureWarning).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuadratureOptions {
    /// The requested absolute accuracy.
    pub abs_tolerance: f64,
    /// The requested relative accuracy.
    ///
    /// If `abs_tolerance` is not positive, this must be at least `50` machine epsilons.
    pub rel_tolerance: f64,
    /// The maximum number of subintervals in the partition of the integration range.
    ///
    /// Must lie in `1..=MAX_SUBDIVISION_LIMIT`.
    ///
    /// For double integrals the same budget applies to the outer integration and to every
    /// inner one.
    pub max_subdivisions: usize,
}

impl Default for QuadratureOptions {
    fn default() -> Self {
        Self {
            abs_tolerance: DEFAULT_TOLERANCE,
            rel_tolerance: DEFAULT_TOLERANCE,
            max_subdivisions: DEFAULT_SUBDIVISION_LIMIT,
        }
    }
}

impl QuadratureOptions {
    /// Checks that the options describe an achievable request.
    ///
    /// # Errors
    ///
    /// Returns `VirialError::InvalidTolerance` when neither tolerance can ever be met, and
    /// `VirialError::InvalidSubdivisionLimit` when no subinterval is allowed or the budget
    /// exceeds `MAX_SUBDIVISION_LIMIT`.
    pub fn validate(&self) -> Result<(), VirialError> {
        let min_rel_tolerance = (50.0 * MACHINE_EPSILON).max(0.5e-28);
        if self.abs_tolerance.is_nan()
            || self.rel_tolerance.is_nan()
            || (self.abs_tolerance <= 0.0 && self.rel_tolerance < min_rel_tolerance)
        {
            return Err(VirialError::InvalidTolerance {
                abs_tolerance: self.abs_tolerance,
                rel_tolerance: self.rel_tolerance,
            });
        }
        if self.max_subdivisions == 0 || self.max_subdivisions > MAX_SUBDIVISION_LIMIT {
            return Err(VirialError::InvalidSubdivisionLimit(self.max_subdivisions));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_are_valid() {
        let options = QuadratureOptions::default();
        assert_eq!(options.max_subdivisions, 50);
        assert_eq!(options.abs_tolerance, 1.49e-8);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn relative_only_tolerance_is_accepted_when_resolvable() {
        let options = QuadratureOptions {
            abs_tolerance: 0.0,
            rel_tolerance: 1e-10,
            ..Default::default()
        };
        assert!(options.validate().is_ok());
    }

    #[test]
    fn unreachable_tolerance_is_rejected() {
        let options = QuadratureOptions {
            abs_tolerance: 0.0,
            rel_tolerance: 1e-16,
            ..Default::default()
        };
        assert!(matches!(
            options.validate(),
            Err(VirialError::InvalidTolerance { .. })
        ));
    }

    #[test]
    fn zero_subdivisions_is_rejected() {
        let options = QuadratureOptions {
            max_subdivisions: 0,
            ..Default::default()
        };
        assert!(matches!(
            options.validate(),
            Err(VirialError::InvalidSubdivisionLimit(0))
        ));
    }

    #[test]
    fn oversized_subdivision_budget_is_rejected() {
        let at_cap = QuadratureOptions {
            max_subdivisions: MAX_SUBDIVISION_LIMIT,
            ..Default::default()
        };
        assert!(at_cap.validate().is_ok());

        let options = QuadratureOptions {
            max_subdivisions: usize::MAX,
            ..Default::default()
        };
        assert!(matches!(
            options.validate(),
            Err(VirialError::InvalidSubdivisionLimit(usize::MAX))
        ));
    }
}
