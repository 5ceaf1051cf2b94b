//! This module defines the result types returned by the virial coefficient calculations.
//!
//! Every result keeps the raw integral alongside the coefficient derived from it, and the
//! quadrature diagnostics that produced it, so callers can judge how far to trust the number.

use crate::quadrature::{DoubleQuadratureResult, QuadratureResult};
use serde::Serialize;

/// The third-virial-like coefficient computed by full double quadrature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThirdVirialResult {
    /// The coefficient `C = -2/3 (4πσ)²/π · integral`.
    pub coefficient: f64,
    /// The double integral `∫₀^∞ ∫₀^∞ y² (F/y)³ dz dy`.
    pub integral: f64,
    /// The absolute error estimate of `integral`, as reported by the outer integration.
    ///
    /// When the outer integration stops at its subdivision limit this estimate is large; see
    /// the warnings in `quadrature`.
    pub abs_error: f64,
    /// Diagnostics of the nested integration.
    pub quadrature: DoubleQuadratureResult,
}

/// The second virial coefficient `B₂ = -2π ∫₀^∞ r² f(r) dr`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SecondVirialResult {
    pub coefficient: f64,
    /// The radial integral `∫₀^∞ r² f(r) dr`.
    pub integral: f64,
    pub abs_error: f64,
    pub quadrature: QuadratureResult,
}

/// The third-virial-like coefficient obtained after integrating the oscillatory weight in closed
/// form.
///
/// Since `∫₀^∞ sin³(yz)/y dy = π/4` for every `z > 0`, the double integral equals
/// `π/4 · ∫₀^∞ z³ f(z)³ dz`. This single radial integral converges where the double quadrature
/// does not, which makes it a useful cross-check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReducedThirdVirialResult {
    /// The coefficient, with the same scaling as [`ThirdVirialResult::coefficient`].
    pub coefficient: f64,
    /// `π/4 · radial_integral`, the exact value of the double integral.
    pub integral: f64,
    /// `∫₀^∞ z³ f(z)³ dz`.
    pub radial_integral: f64,
    /// The absolute error estimate of `integral`.
    pub abs_error: f64,
    /// Diagnostics of the radial integration.
    pub quadrature: QuadratureResult,
}

/// The dilute-limit Kirkwood-Buff integral `G = 4π ∫₀^∞ (g(r) - 1) r² dr` with
/// `g(r) = exp(-U(r)/kT)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KirkwoodBuffResult {
    /// `G`, in units of `sigma³`.
    pub value: f64,
    /// The radial integral `∫₀^∞ r² (g(r) - 1) dr`.
    pub integral: f64,
    /// The absolute error estimate of `value`.
    pub abs_error: f64,
    pub quadrature: QuadratureResult,
}
