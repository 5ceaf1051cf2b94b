//! The third-virial-like coefficient.
//!
//! The coefficient is a linear rescaling of the double integral
//! `I = ∫₀^∞ ∫₀^∞ y² (F/y)³ dz dy`, `F = z f(z) sin(yz)`:
//!
//! `C = -2/3 · (4πσ)² / π · I`.
//!
//! Two routes to `I` are offered. [`third_virial`] evaluates the double integral numerically;
//! the oscillating weight makes the outer integral slowly convergent, so its result normally
//! carries convergence warnings. [`reduced_third_virial`] integrates the weight over `y` in
//! closed form and needs only one well-behaved radial quadrature.

use super::integrand::ThirdVirialIntegrand;
use crate::error::VirialError;
use crate::math::constants::SINE_CUBED_INTEGRAL;
use crate::potential::PairPotential;
use crate::quadrature::{QuadratureOptions, integrate_between, integrate_double};
use crate::types::{ReducedThirdVirialResult, ThirdVirialResult};
use std::f64::consts::PI;

/// The factor `-2/3 · (4πσ)² / π` relating the double integral to the coefficient.
pub fn third_virial_scale(sigma: f64) -> f64 {
    let four_pi_sigma = 4.0 * PI * sigma;
    -2.0 / 3.0 * (four_pi_sigma * four_pi_sigma) / PI
}

/// Rescales a double integral into the coefficient.
///
/// Linear in `integral`; non-finite input propagates.
pub fn third_virial_coefficient(integral: f64, sigma: f64) -> f64 {
    third_virial_scale(sigma) * integral
}

/// Computes the coefficient by nested adaptive quadrature over `z, y ∈ [0, ∞)`.
///
/// # Errors
///
/// Returns an error only for invalid `options`.
pub fn third_virial<P: PairPotential>(
    potential: &P,
    sigma: f64,
    temperature: f64,
    options: &QuadratureOptions,
) -> Result<ThirdVirialResult, VirialError> {
    let integrand = ThirdVirialIntegrand::new(potential, temperature);
    let quadrature = integrate_double(
        |z, y| integrand.evaluate(z, y),
        0.0,
        f64::INFINITY,
        |_| 0.0,
        |_| f64::INFINITY,
        options,
    )?;

    let integral = quadrature.value();
    Ok(ThirdVirialResult {
        coefficient: third_virial_coefficient(integral, sigma),
        integral,
        abs_error: quadrature.abs_error(),
        quadrature,
    })
}

/// Computes the coefficient from the radial integral `π/4 · ∫₀^∞ z³ f(z)³ dz`.
///
/// # Errors
///
/// Returns an error only for invalid `options`.
pub fn reduced_third_virial<P: PairPotential>(
    potential: &P,
    sigma: f64,
    temperature: f64,
    options: &QuadratureOptions,
) -> Result<ReducedThirdVirialResult, VirialError> {
    let integrand = ThirdVirialIntegrand::new(potential, temperature);
    let quadrature = integrate_between(|z| integrand.radial(z), 0.0, f64::INFINITY, options)?;

    let integral = SINE_CUBED_INTEGRAL * quadrature.value;
    Ok(ReducedThirdVirialResult {
        coefficient: third_virial_coefficient(integral, sigma),
        integral,
        radial_integral: quadrature.value,
        abs_error: SINE_CUBED_INTEGRAL * quadrature.abs_error,
        quadrature,
    })
}
