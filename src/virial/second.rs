//! The second virial coefficient `B₂(T) = -2π ∫₀^∞ r² (exp(-U(r)/kT) - 1) dr`.

use super::integrand::SecondVirialIntegrand;
use crate::error::VirialError;
use crate::potential::PairPotential;
use crate::quadrature::{QuadratureOptions, integrate_between};
use crate::types::SecondVirialResult;
use std::f64::consts::PI;

/// Rescales the radial integral `∫₀^∞ r² f(r) dr` into `B₂`.
pub fn second_virial_coefficient(integral: f64) -> f64 {
    -2.0 * PI * integral
}

/// Computes `B₂` by one semi-infinite adaptive quadrature.
///
/// # Errors
///
/// Returns an error only for invalid `options`.
pub fn second_virial<P: PairPotential>(
    potential: &P,
    temperature: f64,
    options: &QuadratureOptions,
) -> Result<SecondVirialResult, VirialError> {
    let integrand = SecondVirialIntegrand::new(potential, temperature);
    let quadrature = integrate_between(|r| integrand.evaluate(r), 0.0, f64::INFINITY, options)?;

    Ok(SecondVirialResult {
        coefficient: second_virial_coefficient(quadrature.value),
        integral: quadrature.value,
        abs_error: quadrature.abs_error,
        quadrature,
    })
}
