//! This module contains the virial coefficient calculations.
//!
//! It includes the integrands, the free functions computing each coefficient for any
//! [`PairPotential`](crate::potential::PairPotential), and the `VirialCalculator`, which binds
//! them to a set of `Parameters` and `QuadratureOptions`.

mod implementation;
pub mod integrand;
pub mod kirkwood_buff;
pub mod second;
pub mod third;

pub use implementation::VirialCalculator;
pub use kirkwood_buff::{kirkwood_buff, kirkwood_buff_integral};
pub use second::{second_virial, second_virial_coefficient};
pub use third::{reduced_third_virial, third_virial, third_virial_coefficient, third_virial_scale};
