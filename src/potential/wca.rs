use super::PairPotential;
use serde::{Deserialize, Serialize};

fn default_repulsive_exponent() -> f64 {
    12.0
}

fn default_attractive_exponent() -> f64 {
    6.0
}

/// The Weeks-Chandler-Andersen potential.
///
/// The `m`-`n` potential `4ε((σ/r)^m - (σ/r)^n)` truncated at its minimum
/// `r_c = σ (m/n)^(1/(m-n))` and shifted up so that it vanishes there. The result is purely
/// repulsive and continuous, and zero for `r >= r_c`. With the default exponents `m = 12`,
/// `n = 6` this is Lennard-Jones cut at `2^(1/6) σ` and shifted by `+ε`.
///
/// Exponents are optional in parameter files:
///
/// ```toml
/// [potential]
/// type = "wca"
/// epsilon = 1.0
/// sigma = 1.0
/// m = 50
/// n = 49
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wca {
    pub epsilon: f64,
    pub sigma: f64,
    /// The repulsive exponent.
    #[serde(default = "default_repulsive_exponent")]
    pub m: f64,
    /// The attractive exponent, smaller than `m`.
    #[serde(default = "default_attractive_exponent")]
    pub n: f64,
}

impl Wca {
    /// The 12-6 WCA potential.
    pub fn new(epsilon: f64, sigma: f64) -> Self {
        Self {
            epsilon,
            sigma,
            m: default_repulsive_exponent(),
            n: default_attractive_exponent(),
        }
    }

    /// Returns the same potential built on the `m`-`n` form.
    pub fn with_exponents(self, m: f64, n: f64) -> Self {
        Self { m, n, ..self }
    }

    /// The truncation distance `σ (m/n)^(1/(m-n))`.
    pub fn cutoff(&self) -> f64 {
        self.sigma * (self.m / self.n).powf(1.0 / (self.m - self.n))
    }

    /// The untruncated `m`-`n` energy at `r > 0`.
    fn untruncated(&self, r: f64) -> f64 {
        let sr = self.sigma / r;
        let srn = sr.powf(self.n);
        // srn overflows to +∞ close to the origin, so the product stays +∞ rather than NaN.
        4.0 * self.epsilon * srn * (sr.powf(self.m - self.n) - 1.0)
    }
}

impl Default for Wca {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

impl PairPotential for Wca {
    #[inline]
    fn energy(&self, r: f64) -> f64 {
        if r <= 0.0 {
            return f64::INFINITY;
        }
        let cutoff = self.cutoff();
        if r >= cutoff {
            return 0.0;
        }
        self.untruncated(r) - self.untruncated(cutoff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::potential::LennardJones;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_repulsive_everywhere() {
        let wca = Wca::new(1.0, 1.0);
        for i in 1..200 {
            let r = 0.05 * i as f64;
            assert!(wca.energy(r) >= 0.0, "negative energy at r = {r}");
        }
        assert!(wca.mayer(0.9, 1.0) < 0.0);
        assert_eq!(wca.mayer(2.0, 1.0), 0.0);
    }

    #[test]
    fn test_continuous_at_cutoff() {
        let wca = Wca::new(1.3, 0.9);
        assert_abs_diff_eq!(wca.energy(wca.cutoff() * (1.0 - 1e-9)), 0.0, epsilon = 1e-9);
        assert_eq!(wca.energy(wca.cutoff()), 0.0);
    }

    #[test]
    fn test_shift_inside_core() {
        let wca = Wca::new(1.0, 1.0);
        assert_abs_diff_eq!(wca.energy(1.0), 1.0, epsilon = 1e-14);
        assert_eq!(wca.energy(0.0), f64::INFINITY);
        assert_eq!(wca.energy(-1.0), f64::INFINITY);
        assert_eq!(wca.energy(1.0e-300), f64::INFINITY);
    }

    #[test]
    fn test_default_exponents_match_shifted_lennard_jones() {
        let wca = Wca::new(1.5, 0.8);
        let lj = LennardJones::new(1.5, 0.8);
        assert_relative_eq!(wca.cutoff(), lj.minimum(), max_relative = 1e-14);
        for r in [0.6, 0.7, 0.8, 0.85, 0.89] {
            assert_abs_diff_eq!(wca.energy(r), lj.energy(r) + 1.5, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_custom_exponents() {
        let wca = Wca::new(1.0, 1.0).with_exponents(50.0, 49.0);
        assert_relative_eq!(wca.cutoff(), 50.0 / 49.0, max_relative = 1e-14);
        assert!(wca.cutoff() < Wca::default().cutoff());
        // The steeper wall is still zero at the cutoff and repulsive inside it.
        assert_eq!(wca.energy(wca.cutoff()), 0.0);
        assert!(wca.energy(0.99) > 0.0);
        assert!(wca.energy(0.9) > wca.energy(0.99));
        assert_abs_diff_eq!(wca.energy(wca.cutoff() * (1.0 - 1e-9)), 0.0, epsilon = 1e-9);
    }
}
