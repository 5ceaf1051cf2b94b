use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for all fallible operations in the `virial` library.
///
/// Convergence trouble inside an adaptive quadrature is deliberately *not* represented here:
/// it is reported as a [`QuadratureWarning`](crate::quadrature::QuadratureWarning) attached to
/// the result, because the integrator still produces a best-effort estimate. This enum covers
/// the conditions under which no meaningful estimate can be produced at all.
#[derive(Error, Debug)]
pub enum VirialError {
    /// A physical model parameter is outside its admissible range.
    ///
    /// Energies, lengths, and temperatures must be finite and strictly positive. WCA exponents
    /// must satisfy `m > n > 0`.
    #[error("Invalid parameter '{name}': {value} (outside the physical range)")]
    InvalidParameter {
        /// The name of the offending parameter, as it appears in the parameter file.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The requested quadrature accuracy can never be met.
    ///
    /// Raised when the absolute tolerance is not positive and the relative tolerance is below
    /// what double precision can resolve.
    #[error(
        "Invalid quadrature tolerances: epsabs = {abs_tolerance:.2e}, epsrel = {rel_tolerance:.2e}"
    )]
    InvalidTolerance {
        /// The absolute tolerance that was requested.
        abs_tolerance: f64,
        /// The relative tolerance that was requested.
        rel_tolerance: f64,
    },

    /// The subdivision budget of an adaptive quadrature must allow at least one interval and
    /// at most `MAX_SUBDIVISION_LIMIT`.
    #[error(
        "Invalid subdivision limit: {0} (must be between 1 and {max})",
        max = crate::math::constants::MAX_SUBDIVISION_LIMIT
    )]
    InvalidSubdivisionLimit(usize),

    /// The bounds of an integration range do not describe a range.
    #[error("Invalid integration bounds: [{lower}, {upper}]")]
    InvalidBounds {
        /// The requested lower bound.
        lower: f64,
        /// The requested upper bound.
        upper: f64,
    },

    /// An I/O error that occurred while attempting to read a parameter file.
    #[error("I/O error at path '{path}': {source}")]
    IoError {
        /// The path of the file that caused the I/O error.
        path: PathBuf,
        /// The underlying `std::io::Error`.
        #[source]
        source: std::io::Error,
    },

    /// An error that occurred while parsing a parameter file, typically indicating
    /// invalid TOML or a structural mismatch with the expected `Parameters` format.
    #[error("Failed to deserialize TOML parameters: {0}")]
    DeserializationError(#[from] toml::de::Error),
}
