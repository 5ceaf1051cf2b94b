//! This module defines the spherically symmetric pair potentials the virial integrals are built on.
//!
//! Every potential implements [`PairPotential`], which supplies the pair energy `U(r)` and the
//! Mayer function `f(r) = exp(-U(r)/kT) - 1` derived from it. The [`Potential`] enum is the
//! serializable form used in parameter files and dispatches to the concrete models.

mod lennard_jones;
mod wca;

pub use lennard_jones::LennardJones;
pub use wca::Wca;

use serde::{Deserialize, Serialize};

/// A pair potential between two identical, spherically symmetric particles.
pub trait PairPotential {
    /// Returns the interaction energy at separation `r`, in units of the potential's `epsilon`
    /// scale.
    ///
    /// Separations `r <= 0` lie inside the repulsive core and must yield `+∞`, never `NaN`.
    fn energy(&self, r: f64) -> f64;

    /// Returns the Mayer function `exp(-U(r)/kT) - 1` at separation `r` and reduced
    /// temperature `temperature`.
    ///
    /// Inside the repulsive core the Mayer function tends to `-1`.
    #[inline]
    fn mayer(&self, r: f64, temperature: f64) -> f64 {
        (-self.energy(r) / temperature).exp() - 1.0
    }
}

/// The pair potential of a model fluid, as named in a parameter file.
///
/// ```toml
/// [potential]
/// type = "lennard-jones"
/// epsilon = 1.0
/// sigma = 1.0
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Potential {
    /// The full 12-6 Lennard-Jones potential.
    LennardJones(LennardJones),
    /// The Weeks-Chandler-Andersen potential (repulsive part of an `m`-`n` potential, 12-6 by
    /// default).
    Wca(Wca),
}

impl Potential {
    /// The energy scale `epsilon`.
    pub fn epsilon(&self) -> f64 {
        match self {
            Potential::LennardJones(lj) => lj.epsilon,
            Potential::Wca(wca) => wca.epsilon,
        }
    }

    /// The length scale `sigma`.
    pub fn sigma(&self) -> f64 {
        match self {
            Potential::LennardJones(lj) => lj.sigma,
            Potential::Wca(wca) => wca.sigma,
        }
    }

    /// A human readable name of the model.
    pub fn name(&self) -> &'static str {
        match self {
            Potential::LennardJones(_) => "Lennard-Jones",
            Potential::Wca(_) => "WCA",
        }
    }

    /// Returns the same model with its energy scale replaced.
    pub fn with_epsilon(self, epsilon: f64) -> Self {
        match self {
            Potential::LennardJones(lj) => {
                Potential::LennardJones(LennardJones::new(epsilon, lj.sigma))
            }
            Potential::Wca(wca) => Potential::Wca(Wca { epsilon, ..wca }),
        }
    }

    /// Returns the same model with its length scale replaced.
    pub fn with_sigma(self, sigma: f64) -> Self {
        match self {
            Potential::LennardJones(lj) => {
                Potential::LennardJones(LennardJones::new(lj.epsilon, sigma))
            }
            Potential::Wca(wca) => Potential::Wca(Wca { sigma, ..wca }),
        }
    }
}

impl Default for Potential {
    fn default() -> Self {
        Potential::LennardJones(LennardJones::default())
    }
}

impl PairPotential for Potential {
    #[inline]
    fn energy(&self, r: f64) -> f64 {
        match self {
            Potential::LennardJones(lj) => lj.energy(r),
            Potential::Wca(wca) => wca.energy(r),
        }
    }
}

/// A rule combining the parameters of two species into a cross-interaction parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MixingRule {
    /// `(a + b) / 2`; the Lorentz rule for `sigma`.
    Arithmetic,
    /// `sqrt(a b)`; the Berthelot rule for `epsilon`.
    Geometric,
}

impl MixingRule {
    /// Combines two like-pair parameters.
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            MixingRule::Arithmetic => 0.5 * (a + b),
            MixingRule::Geometric => (a * b).sqrt(),
        }
    }
}
