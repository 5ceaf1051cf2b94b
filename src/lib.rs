//! Virial coefficients of simple model fluids by adaptive numerical quadrature.
//!
//! The library evaluates the Mayer-function integrals behind the virial equation of state
//! for spherically symmetric pair potentials (Lennard-Jones and its purely repulsive WCA
//! variant). Integrals over semi-infinite ranges are handled by a globally adaptive
//! Gauss-Kronrod integrator with epsilon-algorithm extrapolation; when an integral refuses to
//! converge within its subdivision budget the best estimate is still returned, together with a
//! [`QuadratureWarning`] describing what went wrong.
//!
//! ```
//! use virial::{VirialCalculator, get_default_parameters};
//!
//! let calculator = VirialCalculator::new(get_default_parameters());
//! let b2 = calculator.second_coefficient().unwrap();
//! assert!((b2.coefficient + 5.3157).abs() < 1e-3);
//! ```

pub mod error;
pub mod math;
pub mod params;
pub mod potential;
pub mod quadrature;
pub mod types;
pub mod virial;

pub use error::VirialError;
pub use params::Parameters;
pub use potential::{LennardJones, MixingRule, PairPotential, Potential, Wca};
pub use quadrature::{
    DoubleQuadratureResult, QuadratureOptions, QuadratureResult, QuadratureWarning, Range,
};
pub use types::{
    KirkwoodBuffResult, ReducedThirdVirialResult, SecondVirialResult, ThirdVirialResult,
};
pub use virial::VirialCalculator;

use std::sync::OnceLock;

static DEFAULT_PARAMETERS: OnceLock<Parameters> = OnceLock::new();

/// Returns the built-in model: a Lennard-Jones fluid with `epsilon = sigma = kT = 1`.
pub fn get_default_parameters() -> &'static Parameters {
    DEFAULT_PARAMETERS.get_or_init(|| {
        const DEFAULT_PARAMS_TOML: &str = include_str!("../resources/virial.data.toml");
        Parameters::load_from_str(DEFAULT_PARAMS_TOML)
            .expect("Failed to parse embedded default parameters. This is a library bug.")
    })
}
