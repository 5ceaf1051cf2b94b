//! Numerical and physical constants used throughout the virial library.

use std::f64::consts::PI;

/// Relative spacing of double precision numbers (`2^-52`).
pub const MACHINE_EPSILON: f64 = f64::EPSILON;

/// The smallest positive normal double precision number.
pub const UNDERFLOW: f64 = f64::MIN_POSITIVE;

/// The largest finite double precision number.
///
/// Also serves as the "no estimate yet" sentinel for extrapolated error estimates.
pub const OVERFLOW: f64 = f64::MAX;

/// Default absolute and relative tolerance of the adaptive integrators.
///
/// Roughly the square root of the machine epsilon.
pub const DEFAULT_TOLERANCE: f64 = 1.49e-8;

/// Default bound on the number of subintervals an adaptive integration may create.
pub const DEFAULT_SUBDIVISION_LIMIT: usize = 50;

/// Largest accepted subdivision budget.
///
/// The partition is allocated up front at the full budget, five words per subinterval.
pub const MAX_SUBDIVISION_LIMIT: usize = 1 << 20;

/// Value of `∫₀^∞ sin³(a y) / y dy` for any `a > 0`.
///
/// Integrating the oscillatory weight of the third-coefficient integrand analytically over `y`
/// reduces the double integral to a single radial one.
pub const SINE_CUBED_INTEGRAL: f64 = PI / 4.0;

/// Distance, in units of `sigma`, of the Lennard-Jones minimum (`2^(1/6)`).
///
/// The 12-6 WCA potential is truncated here.
pub const LJ_MINIMUM_RATIO: f64 = 1.122_462_048_309_373;
