use approx::assert_abs_diff_eq;
use virial::{
    LennardJones, Parameters, Potential, QuadratureOptions, QuadratureWarning, VirialCalculator,
    VirialError, get_default_parameters,
};

const EXPECTED_COEFFICIENT: f64 = -32.795_497_245_347_235;
const EXPECTED_INTEGRAL: f64 = 0.978_668_530_828_808_6;
const EXPECTED_REDUCED_COEFFICIENT: f64 = -30.412_433_905_442_157;

#[test]
fn test_default_model_double_quadrature() {
    let result = VirialCalculator::new(get_default_parameters())
        .third_coefficient()
        .unwrap();

    println!(
        "C = {:.12}, integral = {:.12} +/- {:.6}",
        result.coefficient, result.integral, result.abs_error
    );

    assert_abs_diff_eq!(result.coefficient, EXPECTED_COEFFICIENT, epsilon = 1e-6);
    assert_abs_diff_eq!(result.integral, EXPECTED_INTEGRAL, epsilon = 1e-7);
    assert!(result.abs_error > 0.5 && result.abs_error < 0.6);
    assert_eq!(result.abs_error, result.quadrature.abs_error());
}

#[test]
fn test_default_model_reports_convergence_warnings() {
    let result = VirialCalculator::new(get_default_parameters())
        .third_coefficient()
        .unwrap();
    let quadrature = &result.quadrature;

    assert_eq!(
        quadrature.outer.warning,
        Some(QuadratureWarning::MaxSubdivisions)
    );
    assert_eq!(quadrature.outer.subintervals, 50);
    assert_eq!(quadrature.outer.evaluations, 15 * 99);
    assert_eq!(quadrature.inner_integrations, quadrature.outer.evaluations);
    assert!(quadrature.inner_warnings.contains_key(&QuadratureWarning::Divergent));
    assert!(
        quadrature
            .inner_warnings
            .values()
            .sum::<usize>()
            < quadrature.inner_integrations
    );
    assert_eq!(
        quadrature.warnings(),
        vec![QuadratureWarning::MaxSubdivisions, QuadratureWarning::Divergent]
    );
    assert!(!quadrature.is_converged());
}

#[test]
fn test_reduced_form_lies_within_reported_error() {
    let calculator = VirialCalculator::new(get_default_parameters());
    let double = calculator.third_coefficient().unwrap();
    let reduced = calculator.reduced_third_coefficient().unwrap();

    assert!(reduced.quadrature.is_converged());
    assert_abs_diff_eq!(
        reduced.coefficient,
        EXPECTED_REDUCED_COEFFICIENT,
        epsilon = 1e-6
    );
    assert!((reduced.integral - double.integral).abs() < double.abs_error);
    assert!(reduced.abs_error < 1e-7);
}

#[test]
fn test_reduced_form_matches_explicit_scaling() {
    let params = Parameters::new(Potential::LennardJones(LennardJones::new(1.0, 1.3)), 1.2);
    let reduced = VirialCalculator::new(&params)
        .reduced_third_coefficient()
        .unwrap();
    let expected = virial::virial::third_virial_coefficient(
        std::f64::consts::FRAC_PI_4 * reduced.radial_integral,
        1.3,
    );
    assert_abs_diff_eq!(reduced.coefficient, expected, epsilon = 1e-12);
    assert_abs_diff_eq!(
        reduced.integral,
        std::f64::consts::FRAC_PI_4 * reduced.radial_integral,
        epsilon = 1e-15
    );
}

#[test]
fn test_larger_budget_still_returns_an_estimate() {
    let options = QuadratureOptions {
        max_subdivisions: 100,
        ..Default::default()
    };
    let result = VirialCalculator::new(get_default_parameters())
        .with_options(options)
        .third_coefficient()
        .unwrap();
    assert!(result.coefficient.is_finite());
    assert!(result.quadrature.outer.subintervals <= 100);
}

#[test]
fn test_invalid_tolerance_is_a_hard_error() {
    let options = QuadratureOptions {
        abs_tolerance: 0.0,
        rel_tolerance: 1e-20,
        ..Default::default()
    };
    let outcome = VirialCalculator::new(get_default_parameters())
        .with_options(options)
        .third_coefficient();
    assert!(matches!(outcome, Err(VirialError::InvalidTolerance { .. })));
}
