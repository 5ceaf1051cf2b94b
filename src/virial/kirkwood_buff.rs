//! The Kirkwood-Buff integral `G = 4π ∫₀^∞ (g(r) - 1) r² dr` of a dilute fluid.
//!
//! At vanishing density the radial distribution function reduces to the Boltzmann factor
//! `g(r) = exp(-U(r)/kT)`, so `g - 1` is the Mayer function and `G = -2 B₂`.

use super::integrand::SecondVirialIntegrand;
use crate::error::VirialError;
use crate::potential::PairPotential;
use crate::quadrature::{QuadratureOptions, integrate_between};
use crate::types::KirkwoodBuffResult;
use std::f64::consts::PI;

/// Rescales the radial integral `∫₀^∞ r² (g(r) - 1) dr` into `G`.
pub fn kirkwood_buff_integral(integral: f64) -> f64 {
    4.0 * PI * integral
}

/// Computes the dilute-limit Kirkwood-Buff integral by one semi-infinite adaptive quadrature.
///
/// # Errors
///
/// Returns an error only for invalid `options`.
pub fn kirkwood_buff<P: PairPotential>(
    potential: &P,
    temperature: f64,
    options: &QuadratureOptions,
) -> Result<KirkwoodBuffResult, VirialError> {
    let integrand = SecondVirialIntegrand::new(potential, temperature);
    let quadrature = integrate_between(|r| integrand.evaluate(r), 0.0, f64::INFINITY, options)?;

    Ok(KirkwoodBuffResult {
        value: kirkwood_buff_integral(quadrature.value),
        integral: quadrature.value,
        abs_error: kirkwood_buff_integral(quadrature.abs_error),
        quadrature,
    })
}
