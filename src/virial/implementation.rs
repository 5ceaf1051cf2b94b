//! This module implements the `VirialCalculator`, the entry point for computing virial
//! coefficients of a model fluid.
//!
//! The calculator borrows a set of `Parameters`, carries the `QuadratureOptions` shared by every
//! integration it performs, validates both before integrating, and reports convergence trouble
//! through `tracing` in addition to the warnings attached to each result.

use super::{kirkwood_buff, second, third};
use crate::{
    error::VirialError,
    params::Parameters,
    quadrature::{QuadratureOptions, QuadratureResult},
    types::{KirkwoodBuffResult, ReducedThirdVirialResult, SecondVirialResult, ThirdVirialResult},
};

/// Computes the virial coefficients of one model fluid.
pub struct VirialCalculator<'p> {
    /// Reference to the model being evaluated.
    parameters: &'p Parameters,
    /// Tolerances and subdivision budget for every integration.
    options: QuadratureOptions,
}

impl<'p> VirialCalculator<'p> {
    /// Creates a new `VirialCalculator` with default quadrature options.
    ///
    /// # Examples
    ///
    /// ```
    /// use virial::{VirialCalculator, get_default_parameters};
    ///
    /// let calculator = VirialCalculator::new(get_default_parameters());
    /// ```
    pub fn new(parameters: &'p Parameters) -> Self {
        Self {
            parameters,
            options: QuadratureOptions::default(),
        }
    }

    /// Configures the calculator with custom quadrature options.
    ///
    /// # Examples
    ///
    /// ```
    /// use virial::{QuadratureOptions, VirialCalculator, get_default_parameters};
    ///
    /// let options = QuadratureOptions {
    ///     max_subdivisions: 200,
    ///     ..Default::default()
    /// };
    ///
    /// let calculator = VirialCalculator::new(get_default_parameters()).with_options(options);
    /// ```
    pub fn with_options(mut self, options: QuadratureOptions) -> Self {
        self.options = options;
        self
    }

    pub fn parameters(&self) -> &Parameters {
        self.parameters
    }

    pub fn options(&self) -> &QuadratureOptions {
        &self.options
    }

    /// Computes the third-virial-like coefficient by double quadrature over `z, y ∈ [0, ∞)`.
    ///
    /// The outer integral converges slowly, so with the default options the result carries a
    /// `MaxSubdivisions` warning on the outer integration and `Divergent` warnings on some of
    /// the inner ones. The estimate is still returned; see
    /// [`reduced_third_coefficient`](Self::reduced_third_coefficient) for a converged
    /// alternative.
    ///
    /// # Errors
    ///
    /// Returns `VirialError::InvalidParameter` for an unphysical model and
    /// `VirialError::InvalidTolerance` or `VirialError::InvalidSubdivisionLimit` for unusable
    /// options.
    ///
    /// # Examples
    ///
    /// ```
    /// use virial::{VirialCalculator, get_default_parameters};
    ///
    /// let result = VirialCalculator::new(get_default_parameters())
    ///     .third_coefficient()
    ///     .unwrap();
    ///
    /// assert!((result.coefficient + 32.7955).abs() < 1e-3);
    /// assert!(!result.quadrature.warnings().is_empty());
    /// ```
    pub fn third_coefficient(&self) -> Result<ThirdVirialResult, VirialError> {
        self.prepare("third")?;
        let potential = &self.parameters.potential;

        let result = third::third_virial(
            potential,
            potential.sigma(),
            self.parameters.temperature,
            &self.options,
        )?;

        let quadrature = &result.quadrature;
        if let Some(warning) = quadrature.outer.warning {
            tracing::warn!(
                %warning,
                subintervals = quadrature.outer.subintervals,
                "outer integration did not converge"
            );
        }
        for (warning, count) in &quadrature.inner_warnings {
            tracing::warn!(
                %warning,
                count,
                total = quadrature.inner_integrations,
                "inner integrations did not converge"
            );
        }
        tracing::info!(
            coefficient = result.coefficient,
            integral = result.integral,
            abs_error = result.abs_error,
            "third virial coefficient computed"
        );
        Ok(result)
    }

    /// Computes the third-virial-like coefficient from the exact single radial integral.
    ///
    /// # Errors
    ///
    /// Same as [`third_coefficient`](Self::third_coefficient).
    pub fn reduced_third_coefficient(&self) -> Result<ReducedThirdVirialResult, VirialError> {
        self.prepare("reduced third")?;
        let potential = &self.parameters.potential;

        let result = third::reduced_third_virial(
            potential,
            potential.sigma(),
            self.parameters.temperature,
            &self.options,
        )?;

        report_single(&result.quadrature, "radial");
        tracing::info!(
            coefficient = result.coefficient,
            integral = result.integral,
            "reduced third virial coefficient computed"
        );
        Ok(result)
    }

    /// Computes the second virial coefficient `B₂`.
    ///
    /// # Errors
    ///
    /// Same as [`third_coefficient`](Self::third_coefficient).
    ///
    /// # Examples
    ///
    /// ```
    /// use virial::{Parameters, Potential, VirialCalculator};
    ///
    /// // Above the Boyle temperature (kT ≈ 3.42) repulsion wins.
    /// let hot = Parameters::new(Potential::default(), 5.0);
    /// let b2 = VirialCalculator::new(&hot).second_coefficient().unwrap();
    /// assert!(b2.coefficient > 0.0);
    /// ```
    pub fn second_coefficient(&self) -> Result<SecondVirialResult, VirialError> {
        self.prepare("second")?;

        let result = second::second_virial(
            &self.parameters.potential,
            self.parameters.temperature,
            &self.options,
        )?;

        report_single(&result.quadrature, "second virial");
        tracing::info!(
            coefficient = result.coefficient,
            abs_error = result.abs_error,
            "second virial coefficient computed"
        );
        Ok(result)
    }

    /// Computes the Kirkwood-Buff integral `G` of the fluid at infinite dilution.
    ///
    /// # Errors
    ///
    /// Same as [`third_coefficient`](Self::third_coefficient).
    pub fn kirkwood_buff_integral(&self) -> Result<KirkwoodBuffResult, VirialError> {
        self.prepare("kirkwood-buff")?;

        let result = kirkwood_buff::kirkwood_buff(
            &self.parameters.potential,
            self.parameters.temperature,
            &self.options,
        )?;

        report_single(&result.quadrature, "Kirkwood-Buff");
        tracing::info!(
            value = result.value,
            abs_error = result.abs_error,
            "Kirkwood-Buff integral computed"
        );
        Ok(result)
    }

    fn prepare(&self, coefficient: &str) -> Result<(), VirialError> {
        self.parameters.validate()?;
        self.options.validate()?;
        tracing::debug!(
            coefficient,
            potential = self.parameters.potential.name(),
            epsilon = self.parameters.potential.epsilon(),
            sigma = self.parameters.potential.sigma(),
            temperature = self.parameters.temperature,
            epsabs = self.options.abs_tolerance,
            epsrel = self.options.rel_tolerance,
            limit = self.options.max_subdivisions,
            "starting integration"
        );
        Ok(())
    }
}

fn report_single(quadrature: &QuadratureResult, label: &str) {
    if let Some(warning) = quadrature.warning {
        tracing::warn!(
            %warning,
            subintervals = quadrature.subintervals,
            "{label} integration did not converge"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::potential::Potential;

    #[test]
    fn test_invalid_parameters_are_rejected_before_integrating() {
        let params = Parameters::new(Potential::default(), -1.0);
        let calculator = VirialCalculator::new(&params);
        assert!(matches!(
            calculator.second_coefficient(),
            Err(VirialError::InvalidParameter {
                name: "temperature",
                ..
            })
        ));
        assert!(calculator.third_coefficient().is_err());
        assert!(calculator.reduced_third_coefficient().is_err());
        assert!(calculator.kirkwood_buff_integral().is_err());
    }

    #[test]
    fn test_kirkwood_buff_tracks_second_coefficient() {
        let params = Parameters::new(Potential::default(), 1.5);
        let calculator = VirialCalculator::new(&params);
        let g = calculator.kirkwood_buff_integral().unwrap();
        let b2 = calculator.second_coefficient().unwrap();
        assert_eq!(g.integral, b2.integral);
        approx::assert_relative_eq!(g.value, -2.0 * b2.coefficient, max_relative = 1e-14);
    }

    #[test]
    fn test_invalid_options_are_rejected() {
        let params = Parameters::default();
        let calculator = VirialCalculator::new(&params).with_options(QuadratureOptions {
            max_subdivisions: 0,
            ..Default::default()
        });
        assert!(matches!(
            calculator.third_coefficient(),
            Err(VirialError::InvalidSubdivisionLimit(0))
        ));
    }

    #[test]
    fn test_with_options_replaces_defaults() {
        let params = Parameters::default();
        let options = QuadratureOptions {
            abs_tolerance: 1e-10,
            rel_tolerance: 1e-10,
            max_subdivisions: 100,
        };
        let calculator = VirialCalculator::new(&params).with_options(options);
        assert_eq!(calculator.options(), &options);
        assert_eq!(calculator.parameters(), &params);
    }
}
