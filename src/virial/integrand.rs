//! Integrands of the virial coefficient integrals.

use crate::potential::PairPotential;

/// The integrand of the third-coefficient double integral, `y² (F/y)³` with
/// `F(z, y) = z f(z) sin(y z)` and `f` the Mayer function.
#[derive(Debug, Clone, Copy)]
pub struct ThirdVirialIntegrand<'a, P: PairPotential> {
    potential: &'a P,
    temperature: f64,
}

impl<'a, P: PairPotential> ThirdVirialIntegrand<'a, P> {
    pub fn new(potential: &'a P, temperature: f64) -> Self {
        Self {
            potential,
            temperature,
        }
    }

    /// Evaluates the integrand at inner variable `z` and outer variable `y`.
    ///
    /// The removable singularity at `y = 0` evaluates to its limit `0`.
    #[inline]
    pub fn evaluate(&self, z: f64, y: f64) -> f64 {
        if y == 0.0 {
            return 0.0;
        }
        let f = z * self.potential.mayer(z, self.temperature) * (y * z).sin();
        let q = f / y;
        y * y * (q * q * q)
    }

    /// Evaluates `z³ f(z)³`, the integrand left after integrating `sin³(yz)/y` over `y`.
    #[inline]
    pub fn radial(&self, z: f64) -> f64 {
        let zf = z * self.potential.mayer(z, self.temperature);
        zf * zf * zf
    }
}

/// The integrand `r² f(r)` of the second virial coefficient.
#[derive(Debug, Clone, Copy)]
pub struct SecondVirialIntegrand<'a, P: PairPotential> {
    potential: &'a P,
    temperature: f64,
}

impl<'a, P: PairPotential> SecondVirialIntegrand<'a, P> {
    pub fn new(potential: &'a P, temperature: f64) -> Self {
        Self {
            potential,
            temperature,
        }
    }

    #[inline]
    pub fn evaluate(&self, r: f64) -> f64 {
        r * r * self.potential.mayer(r, self.temperature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::potential::LennardJones;
    use approx::assert_relative_eq;

    #[test]
    fn test_vanishes_where_potential_vanishes() {
        let lj = LennardJones::default();
        let integrand = ThirdVirialIntegrand::new(&lj, 1.0);
        assert_eq!(integrand.evaluate(1.0, 1.0), 0.0);
        assert_eq!(integrand.radial(1.0), 0.0);
    }

    #[test]
    fn test_finite_at_singular_points() {
        let lj = LennardJones::default();
        let integrand = ThirdVirialIntegrand::new(&lj, 1.0);
        assert_eq!(integrand.evaluate(0.0, 0.0), 0.0);
        assert_eq!(integrand.evaluate(1.5, 0.0), 0.0);
        assert_eq!(integrand.evaluate(0.0, 2.0), 0.0);
        assert!(integrand.evaluate(1.0e-300, 1.0).is_finite());
        assert_eq!(integrand.radial(0.0), 0.0);
    }

    #[test]
    fn test_matches_closed_form() {
        let lj = LennardJones::default();
        let integrand = ThirdVirialIntegrand::new(&lj, 1.0);
        let (z, y): (f64, f64) = (0.9, 0.7);
        let u = 4.0 * (z.powi(-12) - z.powi(-6));
        let big_f = z * ((-u).exp() - 1.0) * (y * z).sin();
        let expected = y.powi(2) * (big_f / y).powi(3);
        assert_relative_eq!(integrand.evaluate(z, y), expected, max_relative = 1e-12);
    }

    #[test]
    fn test_second_integrand_sign() {
        let lj = LennardJones::default();
        let integrand = SecondVirialIntegrand::new(&lj, 1.0);
        assert!(integrand.evaluate(0.9) < 0.0);
        assert!(integrand.evaluate(1.2) > 0.0);
        assert_relative_eq!(integrand.evaluate(0.5), -0.25, max_relative = 1e-12);
    }
}
