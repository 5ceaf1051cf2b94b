use super::{MixingRule, PairPotential};
use crate::math::constants::LJ_MINIMUM_RATIO;
use serde::{Deserialize, Serialize};

/// The 12-6 Lennard-Jones potential `U(r) = 4ε[(σ/r)¹² - (σ/r)⁶]`.
///
/// The well depth is `epsilon`, reached at `r = 2^(1/6) σ`; the potential crosses zero at
/// `r = σ`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LennardJones {
    /// Depth of the potential well.
    pub epsilon: f64,
    /// Separation at which the potential vanishes.
    pub sigma: f64,
}

impl LennardJones {
    /// Creates a Lennard-Jones potential.
    pub fn new(epsilon: f64, sigma: f64) -> Self {
        Self { epsilon, sigma }
    }

    /// Separation of the potential minimum, `2^(1/6) σ`.
    pub fn minimum(&self) -> f64 {
        LJ_MINIMUM_RATIO * self.sigma
    }

    /// Builds the cross interaction between two species from the given mixing rules.
    ///
    /// # Examples
    ///
    /// ```
    /// use virial::{LennardJones, MixingRule};
    ///
    /// let argon = LennardJones::new(1.0, 1.0);
    /// let krypton = LennardJones::new(1.4, 1.08);
    /// let cross = argon.mixed(&krypton, MixingRule::Geometric, MixingRule::Arithmetic);
    /// assert!((cross.sigma - 1.04).abs() < 1e-12);
    /// ```
    pub fn mixed(&self, other: &Self, epsilon_rule: MixingRule, sigma_rule: MixingRule) -> Self {
        Self {
            epsilon: epsilon_rule.apply(self.epsilon, other.epsilon),
            sigma: sigma_rule.apply(self.sigma, other.sigma),
        }
    }

    /// The Lorentz-Berthelot cross interaction: geometric `epsilon`, arithmetic `sigma`.
    pub fn lorentz_berthelot(&self, other: &Self) -> Self {
        self.mixed(other, MixingRule::Geometric, MixingRule::Arithmetic)
    }
}

impl Default for LennardJones {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

impl PairPotential for LennardJones {
    #[inline]
    fn energy(&self, r: f64) -> f64 {
        if r <= 0.0 {
            return f64::INFINITY;
        }
        let sr = self.sigma / r;
        let sr3 = sr * sr * sr;
        let sr6 = sr3 * sr3;
        // sr6 overflows to +∞ close to the origin, so the product stays +∞ rather than NaN.
        4.0 * self.epsilon * sr6 * (sr6 - 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_energy_landmarks() {
        let lj = LennardJones::new(2.0, 1.5);
        assert_eq!(lj.energy(1.5), 0.0);
        assert_relative_eq!(lj.energy(lj.minimum()), -2.0, max_relative = 1e-12);
        assert!(lj.energy(1.4) > 0.0);
        assert!(lj.energy(3.0) < 0.0);
    }

    #[test]
    fn test_energy_matches_textbook_form() {
        let lj = LennardJones::new(1.0, 1.0);
        for r in [0.9_f64, 1.1, 1.5, 2.5] {
            let expected = 4.0 * (r.powi(-12) - r.powi(-6));
            assert_relative_eq!(lj.energy(r), expected, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_core_is_infinite_not_nan() {
        let lj = LennardJones::default();
        assert_eq!(lj.energy(0.0), f64::INFINITY);
        assert_eq!(lj.energy(-1.0), f64::INFINITY);
        assert_eq!(lj.energy(1.0e-40), f64::INFINITY);
        assert_eq!(lj.mayer(1.0e-40, 1.0), -1.0);
    }

    #[test]
    fn test_lorentz_berthelot() {
        let a = LennardJones::new(1.0, 1.0);
        let b = LennardJones::new(4.0, 2.0);
        let ab = a.lorentz_berthelot(&b);
        assert_relative_eq!(ab.epsilon, 2.0);
        assert_relative_eq!(ab.sigma, 1.5);
        assert_eq!(a.lorentz_berthelot(&a), a);
    }
}
