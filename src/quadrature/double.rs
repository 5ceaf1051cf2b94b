//! Iterated integration over two variables.
//!
//! The outer variable runs between constant bounds; the inner bounds may depend on the outer
//! variable. Every evaluation of the outer integrand is itself an adaptive integration, so the
//! warnings of the inner integrations are tallied separately from the outer one.

use super::{QuadratureOptions, QuadratureResult, QuadratureWarning, integrate_between};
use crate::error::VirialError;
use serde::Serialize;
use std::collections::BTreeMap;

/// The outcome of a double integration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoubleQuadratureResult {
    /// The outer integration. Its value and error estimate are those of the double integral.
    pub outer: QuadratureResult,
    /// How many inner integrations were performed (one per outer integrand evaluation).
    pub inner_integrations: usize,
    /// Total number of evaluations of the two-variable integrand.
    pub inner_evaluations: usize,
    /// Number of inner integrations that ended with each kind of warning.
    pub inner_warnings: BTreeMap<QuadratureWarning, usize>,
}

impl DoubleQuadratureResult {
    /// The estimated value of the double integral.
    pub fn value(&self) -> f64 {
        self.outer.value
    }

    /// The estimated absolute error, as reported by the outer integration.
    pub fn abs_error(&self) -> f64 {
        self.outer.abs_error
    }

    /// Every distinct kind of warning raised by the outer or any inner integration.
    pub fn warnings(&self) -> Vec<QuadratureWarning> {
        let mut kinds: Vec<QuadratureWarning> = self.inner_warnings.keys().copied().collect();
        if let Some(outer) = self.outer.warning {
            if !kinds.contains(&outer) {
                kinds.push(outer);
                kinds.sort();
            }
        }
        kinds
    }

    /// Whether neither the outer nor any inner integration raised a warning.
    pub fn is_converged(&self) -> bool {
        self.outer.is_converged() && self.inner_warnings.is_empty()
    }
}

/// Computes `∫_{outer_lower}^{outer_upper} ∫_{inner_lower(y)}^{inner_upper(y)} f(z, y) dz dy`.
///
/// `f` receives the inner variable first. Bounds may be infinite. Each inner integration and
/// the outer one use the same `options`.
///
/// # Errors
///
/// Returns an error if `options` are invalid or a bound is NaN (including inner bounds
/// produced during the integration).
///
/// # Examples
///
/// ```
/// use virial::quadrature::{QuadratureOptions, integrate_double};
///
/// // Area of the unit quarter disc.
/// let result = integrate_double(
///     |_, _| 1.0,
///     0.0,
///     1.0,
///     |_| 0.0,
///     |y| (1.0 - y * y).max(0.0).sqrt(),
///     &QuadratureOptions::default(),
/// )
/// .unwrap();
/// assert!((result.value() - std::f64::consts::FRAC_PI_4).abs() < 1e-8);
/// ```
pub fn integrate_double<F, L, U>(
    mut f: F,
    outer_lower: f64,
    outer_upper: f64,
    inner_lower: L,
    inner_upper: U,
    options: &QuadratureOptions,
) -> Result<DoubleQuadratureResult, VirialError>
where
    F: FnMut(f64, f64) -> f64,
    L: Fn(f64) -> f64,
    U: Fn(f64) -> f64,
{
    options.validate()?;

    let mut inner_integrations = 0;
    let mut inner_evaluations = 0;
    let mut inner_warnings: BTreeMap<QuadratureWarning, usize> = BTreeMap::new();
    let mut failure: Option<VirialError> = None;

    let outer = integrate_between(
        |y| {
            if failure.is_some() {
                return f64::NAN;
            }
            let inner = integrate_between(|z| f(z, y), inner_lower(y), inner_upper(y), options);
            match inner {
                Ok(inner) => {
                    inner_integrations += 1;
                    inner_evaluations += inner.evaluations;
                    if let Some(warning) = inner.warning {
                        *inner_warnings.entry(warning).or_insert(0) += 1;
                    }
                    inner.value
                }
                Err(error) => {
                    failure = Some(error);
                    f64::NAN
                }
            }
        },
        outer_lower,
        outer_upper,
        options,
    )?;

    if let Some(error) = failure {
        return Err(error);
    }

    tracing::debug!(
        value = outer.value,
        abs_error = outer.abs_error,
        inner_integrations,
        inner_evaluations,
        "double integration finished"
    );

    Ok(DoubleQuadratureResult {
        outer,
        inner_integrations,
        inner_evaluations,
        inner_warnings,
    })
}
