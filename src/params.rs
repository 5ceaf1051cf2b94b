//! This module provides the physical model parameters and utilities for loading them from TOML
//! files.
//!
//! A model fluid is described by its pair potential and the reduced temperature `kT` at which its
//! virial coefficients are evaluated. Parameters are validated on load, so every `Parameters`
//! obtained from a file or string describes a physically meaningful model.

use super::error::VirialError;
use crate::potential::Potential;
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_temperature() -> f64 {
    1.0
}

/// The model fluid whose virial coefficients are computed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Parameters {
    /// The reduced temperature `kT`, in the same energy units as the potential's `epsilon`.
    ///
    /// Defaults to `1.0` when omitted from a parameter file.
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// The pair potential between two particles of the fluid.
    pub potential: Potential,
}

impl Parameters {
    /// Creates parameters for `potential` at reduced temperature `temperature`.
    ///
    /// No validation happens here; see [`Parameters::validate`].
    pub fn new(potential: Potential, temperature: f64) -> Self {
        Self {
            temperature,
            potential,
        }
    }

    /// Loads model parameters from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the TOML file containing the parameter data.
    ///
    /// # Errors
    ///
    /// Returns a `VirialError::IoError` if the file cannot be read, a
    /// `VirialError::DeserializationError` if the TOML content is malformed, or a
    /// `VirialError::InvalidParameter` if a value is out of range.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use virial::Parameters;
    /// use std::path::Path;
    ///
    /// let params = Parameters::load_from_file(Path::new("argon.toml")).unwrap();
    /// ```
    pub fn load_from_file(path: &Path) -> Result<Self, VirialError> {
        let content = std::fs::read_to_string(path).map_err(|io_error| VirialError::IoError {
            path: path.to_path_buf(),
            source: io_error,
        })?;

        Self::load_from_str(&content)
    }

    /// Parses model parameters from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `VirialError::DeserializationError` if the TOML content is malformed or names an
    /// unknown potential, or a `VirialError::InvalidParameter` if a value is out of range.
    ///
    /// # Examples
    ///
    /// ```
    /// use virial::{Parameters, Potential};
    ///
    /// let toml_data = r#"
    /// temperature = 2.0
    ///
    /// [potential]
    /// type = "wca"
    /// epsilon = 1.0
    /// sigma = 1.0
    /// "#;
    ///
    /// let params = Parameters::load_from_str(toml_data).unwrap();
    /// assert_eq!(params.temperature, 2.0);
    /// assert!(matches!(params.potential, Potential::Wca(_)));
    /// ```
    pub fn load_from_str(toml_str: &str) -> Result<Self, VirialError> {
        let params: Self = toml::from_str(toml_str).map_err(VirialError::from)?;
        params.validate()?;
        Ok(params)
    }

    /// Checks that `epsilon`, `sigma`, and `temperature` are finite and strictly positive, and
    /// that WCA exponents satisfy `m > n > 0`.
    ///
    /// # Errors
    ///
    /// Returns `VirialError::InvalidParameter` naming the first offending value.
    pub fn validate(&self) -> Result<(), VirialError> {
        let checks = [
            ("epsilon", self.potential.epsilon()),
            ("sigma", self.potential.sigma()),
            ("temperature", self.temperature),
        ];
        for (name, value) in checks {
            if !(value.is_finite() && value > 0.0) {
                return Err(VirialError::InvalidParameter { name, value });
            }
        }
        if let Potential::Wca(wca) = self.potential {
            if !(wca.n.is_finite() && wca.n > 0.0) {
                return Err(VirialError::InvalidParameter {
                    name: "n",
                    value: wca.n,
                });
            }
            if !(wca.m.is_finite() && wca.m > wca.n) {
                return Err(VirialError::InvalidParameter {
                    name: "m",
                    value: wca.m,
                });
            }
        }
        Ok(())
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self::new(Potential::default(), default_temperature())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::potential::{LennardJones, Wca};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_toml_string() -> String {
        r#"
        temperature = 1.35

        [potential]
        type = "lennard-jones"
        epsilon = 0.996
        sigma = 3.405
        "#
        .to_string()
    }

    fn get_expected_parameters() -> Parameters {
        Parameters::new(
            Potential::LennardJones(LennardJones::new(0.996, 3.405)),
            1.35,
        )
    }

    #[test]
    fn test_load_from_str_valid() {
        let params = Parameters::load_from_str(&create_test_toml_string()).unwrap();
        assert_eq!(params, get_expected_parameters());
    }

    #[test]
    fn test_load_from_str_default_temperature() {
        let toml_str = r#"
        [potential]
        type = "wca"
        epsilon = 1.0
        sigma = 1.0
        "#;
        let params = Parameters::load_from_str(toml_str).unwrap();
        assert_eq!(params.temperature, 1.0);
        assert_eq!(params.potential, Potential::Wca(Wca::new(1.0, 1.0)));
    }

    #[test]
    fn test_load_from_str_invalid_toml() {
        let result = Parameters::load_from_str("this is not valid toml");
        assert!(matches!(result, Err(VirialError::DeserializationError(_))));
    }

    #[test]
    fn test_load_from_str_missing_field() {
        let toml_str = r#"
        [potential]
        type = "lennard-jones"
        epsilon = 1.0
        "#;
        let result = Parameters::load_from_str(toml_str);
        assert!(matches!(result, Err(VirialError::DeserializationError(_))));
    }

    #[test]
    fn test_load_from_str_unknown_key() {
        let toml_str = r#"
        temprature = 2.0

        [potential]
        type = "lennard-jones"
        epsilon = 1.0
        sigma = 1.0
        "#;
        let result = Parameters::load_from_str(toml_str);
        assert!(matches!(result, Err(VirialError::DeserializationError(_))));
    }

    #[test]
    fn test_load_from_str_rejects_non_positive_values() {
        let toml_str = r#"
        temperature = 1.0

        [potential]
        type = "lennard-jones"
        epsilon = 1.0
        sigma = -2.0
        "#;
        let error = Parameters::load_from_str(toml_str).unwrap_err();
        assert!(matches!(
            error,
            VirialError::InvalidParameter { name: "sigma", .. }
        ));
        assert!(error.to_string().contains("sigma"));
    }

    #[test]
    fn test_load_from_str_wca_exponents() {
        let toml_str = r#"
        [potential]
        type = "wca"
        epsilon = 1.0
        sigma = 1.0
        m = 50
        n = 49
        "#;
        let params = Parameters::load_from_str(toml_str).unwrap();
        assert_eq!(
            params.potential,
            Potential::Wca(Wca::new(1.0, 1.0).with_exponents(50.0, 49.0))
        );

        let swapped = toml_str.replace("m = 50", "m = 48");
        assert!(matches!(
            Parameters::load_from_str(&swapped),
            Err(VirialError::InvalidParameter { name: "m", .. })
        ));
        let negative = toml_str.replace("n = 49", "n = -6");
        assert!(matches!(
            Parameters::load_from_str(&negative),
            Err(VirialError::InvalidParameter { name: "n", .. })
        ));
    }

    #[test]
    fn test_validate_rejects_non_finite_temperature() {
        for temperature in [0.0, f64::NAN, f64::INFINITY] {
            let params = Parameters::new(Potential::default(), temperature);
            assert!(matches!(
                params.validate(),
                Err(VirialError::InvalidParameter {
                    name: "temperature",
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_load_from_file_valid() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", create_test_toml_string()).unwrap();

        let params = Parameters::load_from_file(temp_file.path()).unwrap();
        assert_eq!(params, get_expected_parameters());
    }

    #[test]
    fn test_load_from_file_not_found() {
        let path = Path::new("non_existent_file.toml");
        let result = Parameters::load_from_file(path);
        assert!(matches!(result, Err(VirialError::IoError { .. })));
    }

    #[test]
    fn test_default_matches_reduced_units() {
        let params = Parameters::default();
        assert_eq!(params.temperature, 1.0);
        assert_eq!(params.potential.epsilon(), 1.0);
        assert_eq!(params.potential.sigma(), 1.0);
        assert!(params.validate().is_ok());
    }
}
