//! This module contains the adaptive quadrature engine used by every virial integral.
//!
//! Finite ranges are integrated with the 21-point Gauss-Kronrod rule, (semi-)infinite ranges
//! with the 15-point rule after mapping the range onto `(0, 1]`. Both share a globally adaptive
//! driver with epsilon-algorithm extrapolation. Nested integration over two variables is
//! provided by [`integrate_double`].
//!
//! Failure to reach the requested accuracy is not an error: the result carries the best
//! estimate found together with a [`QuadratureWarning`].

mod adaptive;
mod double;
mod extrapolation;
mod options;
mod rules;

pub use double::{DoubleQuadratureResult, integrate_double};
pub use options::QuadratureOptions;

use crate::error::VirialError;
use rules::{Kronrod15Infinite, Kronrod21};
use serde::Serialize;
use std::fmt;

/// An integration range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Range {
    /// `[a, b]` with both ends finite. `a > b` integrates in the negative direction.
    Finite(f64, f64),
    /// `[a, ∞)`.
    UpperInfinite(f64),
    /// `(-∞, b]`.
    LowerInfinite(f64),
    /// `(-∞, ∞)`.
    Infinite,
}

impl Range {
    /// Builds the range between two bounds, either of which may be infinite.
    ///
    /// Returns the range together with the sign to apply to its integral, which is `-1` when the
    /// bounds run from an infinite upper end down to a lower one (e.g. `∞` to `0`).
    ///
    /// # Errors
    ///
    /// Returns `VirialError::InvalidBounds` if a bound is NaN or both bounds are the same
    /// infinity.
    pub fn between(lower: f64, upper: f64) -> Result<(Self, f64), VirialError> {
        let invalid = || VirialError::InvalidBounds { lower, upper };
        if lower.is_nan() || upper.is_nan() {
            return Err(invalid());
        }
        match (lower.is_finite(), upper.is_finite()) {
            (true, true) => Ok((Range::Finite(lower, upper), 1.0)),
            (true, false) if upper > 0.0 => Ok((Range::UpperInfinite(lower), 1.0)),
            (true, false) => Ok((Range::LowerInfinite(lower), -1.0)),
            (false, true) if lower < 0.0 => Ok((Range::LowerInfinite(upper), 1.0)),
            (false, true) => Ok((Range::UpperInfinite(upper), -1.0)),
            (false, false) if lower < upper => Ok((Range::Infinite, 1.0)),
            (false, false) if lower > upper => Ok((Range::Infinite, -1.0)),
            (false, false) => Err(invalid()),
        }
    }
}

/// A non-fatal diagnostic raised when an adaptive integration could not certify its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuadratureWarning {
    /// The maximum number of subdivisions was reached before the tolerance was met.
    MaxSubdivisions,
    /// Roundoff error prevents the requested tolerance from being achieved.
    RoundoffError,
    /// The integrand behaves badly (e.g. a non-integrable singularity) somewhere in the range.
    BadIntegrandBehavior,
    /// Roundoff error was detected in the extrapolation table.
    ExtrapolationRoundoff,
    /// The integral is probably divergent, or slowly convergent.
    Divergent,
}

impl QuadratureWarning {
    /// A short machine-readable name, identical to the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            QuadratureWarning::MaxSubdivisions => "max-subdivisions",
            QuadratureWarning::RoundoffError => "roundoff-error",
            QuadratureWarning::BadIntegrandBehavior => "bad-integrand-behavior",
            QuadratureWarning::ExtrapolationRoundoff => "extrapolation-roundoff",
            QuadratureWarning::Divergent => "divergent",
        }
    }
}

impl fmt::Display for QuadratureWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            QuadratureWarning::MaxSubdivisions => "maximum number of subdivisions achieved",
            QuadratureWarning::RoundoffError => {
                "roundoff error prevents the requested tolerance from being achieved"
            }
            QuadratureWarning::BadIntegrandBehavior => {
                "extremely bad integrand behavior occurs at some points of the integration interval"
            }
            QuadratureWarning::ExtrapolationRoundoff => {
                "roundoff error is detected in the extrapolation table"
            }
            QuadratureWarning::Divergent => {
                "the integral is probably divergent or slowly convergent"
            }
        };
        f.write_str(message)
    }
}

/// The outcome of a one-dimensional adaptive integration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuadratureResult {
    /// The estimated value of the integral.
    pub value: f64,
    /// The estimated absolute error of `value`.
    pub abs_error: f64,
    /// The number of integrand evaluations performed.
    pub evaluations: usize,
    /// The number of subintervals in the final partition.
    pub subintervals: usize,
    /// Set when the requested accuracy could not be certified.
    pub warning: Option<QuadratureWarning>,
}

impl QuadratureResult {
    /// Whether the integration met its tolerance without any warning.
    pub fn is_converged(&self) -> bool {
        self.warning.is_none()
    }

    fn negated(mut self) -> Self {
        self.value = -self.value;
        self
    }

    fn empty() -> Self {
        Self {
            value: 0.0,
            abs_error: 0.0,
            evaluations: 0,
            subintervals: 0,
            warning: None,
        }
    }
}

/// Integrates `f` over `range`.
///
/// # Errors
///
/// Returns an error only when `options` are invalid. Convergence problems are reported through
/// [`QuadratureResult::warning`].
///
/// # Examples
///
/// ```
/// use virial::quadrature::{QuadratureOptions, Range, integrate};
///
/// let result = integrate(|x| (-x).exp(), Range::UpperInfinite(0.0), &QuadratureOptions::default())
///     .unwrap();
/// assert!((result.value - 1.0).abs() < 1e-10);
/// assert!(result.is_converged());
/// ```
pub fn integrate<F>(
    mut f: F,
    range: Range,
    options: &QuadratureOptions,
) -> Result<QuadratureResult, VirialError>
where
    F: FnMut(f64) -> f64,
{
    let result = match range {
        Range::Finite(a, b) => adaptive::integrate(&mut f, &Kronrod21, a, b, options)?,
        Range::UpperInfinite(a) => {
            let rule = Kronrod15Infinite {
                bound: a,
                direction: 1.0,
                two_sided: false,
            };
            adaptive::integrate(&mut f, &rule, 0.0, 1.0, options)?
        }
        Range::LowerInfinite(b) => {
            let rule = Kronrod15Infinite {
                bound: b,
                direction: -1.0,
                two_sided: false,
            };
            adaptive::integrate(&mut f, &rule, 0.0, 1.0, options)?
        }
        Range::Infinite => {
            let rule = Kronrod15Infinite {
                bound: 0.0,
                direction: 1.0,
                two_sided: true,
            };
            adaptive::integrate(&mut f, &rule, 0.0, 1.0, options)?
        }
    };
    tracing::trace!(
        ?range,
        value = result.value,
        abs_error = result.abs_error,
        subintervals = result.subintervals,
        "integration finished"
    );
    Ok(result)
}

/// Integrates `f` from `lower` to `upper`, either of which may be infinite.
///
/// # Errors
///
/// Returns `VirialError::InvalidBounds` for NaN or degenerate infinite bounds and propagates
/// invalid `options`.
pub fn integrate_between<F>(
    f: F,
    lower: f64,
    upper: f64,
    options: &QuadratureOptions,
) -> Result<QuadratureResult, VirialError>
where
    F: FnMut(f64) -> f64,
{
    let (range, sign) = Range::between(lower, upper)?;
    if lower == upper {
        options.validate()?;
        return Ok(QuadratureResult::empty());
    }
    let result = integrate(f, range, options)?;
    Ok(if sign < 0.0 { result.negated() } else { result })
}
