//! This module provides the numerical constants shared by the quadrature engine and the
//! virial coefficient formulas.

/// Machine characteristics of IEEE-754 double precision and closed-form prefactors.
///
/// The machine constants are the ones QUADPACK-style integrators test against when deciding
/// whether an interval can still be bisected or whether roundoff dominates an error estimate.
pub mod constants;
