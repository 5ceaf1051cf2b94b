use approx::assert_abs_diff_eq;
use std::f64::consts::PI;
use virial::quadrature::{integrate, integrate_between, integrate_double};
use virial::{QuadratureOptions, QuadratureWarning, Range};

struct KnownIntegral {
    name: &'static str,
    f: fn(f64) -> f64,
    lower: f64,
    upper: f64,
    expected: f64,
}

#[test]
fn test_known_integrals() {
    let cases = [
        KnownIntegral {
            name: "exp(-x) on [0, inf)",
            f: |x| (-x).exp(),
            lower: 0.0,
            upper: f64::INFINITY,
            expected: 1.0,
        },
        KnownIntegral {
            name: "1/(1+x^2) on [0, inf)",
            f: |x| 1.0 / (1.0 + x * x),
            lower: 0.0,
            upper: f64::INFINITY,
            expected: PI / 2.0,
        },
        KnownIntegral {
            name: "exp(-x^2) on [0, inf)",
            f: |x| (-x * x).exp(),
            lower: 0.0,
            upper: f64::INFINITY,
            expected: 0.886_226_925_452_757_9,
        },
        KnownIntegral {
            name: "x^-1/2 on [0, 1]",
            f: |x| 1.0 / x.sqrt(),
            lower: 0.0,
            upper: 1.0,
            expected: 2.0,
        },
        KnownIntegral {
            name: "exp(-x^2) on (-inf, inf)",
            f: |x| (-x * x).exp(),
            lower: f64::NEG_INFINITY,
            upper: f64::INFINITY,
            expected: PI.sqrt(),
        },
        KnownIntegral {
            name: "cos(x) on [pi, 0]",
            f: f64::cos,
            lower: PI,
            upper: 0.0,
            expected: 0.0,
        },
    ];

    let options = QuadratureOptions::default();
    for case in cases {
        let result = integrate_between(case.f, case.lower, case.upper, &options).unwrap();
        println!(
            "{:<28} {:>20.15} (err {:.2e}, {} subintervals)",
            case.name, result.value, result.abs_error, result.subintervals
        );
        assert!(result.is_converged(), "{} did not converge", case.name);
        assert_abs_diff_eq!(result.value, case.expected, epsilon = 1e-8);
        assert!(result.abs_error <= 1.49e-8 * case.expected.abs().max(1.0));
    }
}

#[test]
fn test_subdivision_limit_is_reported() {
    let options = QuadratureOptions {
        max_subdivisions: 3,
        ..Default::default()
    };
    let result = integrate(
        |x| (x * x).sin() / (1.0 + x),
        Range::UpperInfinite(0.0),
        &options,
    )
    .unwrap();
    assert!(result.warning.is_some());
    assert!(result.subintervals <= 3);
    assert!(result.value.is_finite());
}

#[test]
fn test_divergent_integral_is_flagged() {
    // The integral diverges logarithmically at 0, so bisecting the leftmost subinterval never
    // meets the tolerance and the subdivision budget runs out.
    let result = integrate_between(|x| 1.0 / x, 0.0, 1.0, &QuadratureOptions::default()).unwrap();
    assert_eq!(result.warning, Some(QuadratureWarning::MaxSubdivisions));
    assert_eq!(result.subintervals, 50);
    assert_abs_diff_eq!(result.value, 41.676_840_675_388_09, epsilon = 1e-6);
    assert!(result.abs_error > 1.0);
}

#[test]
fn test_double_integral_over_disc_quadrant() {
    let result = integrate_double(
        |z, y| z * y,
        0.0,
        1.0,
        |_| 0.0,
        |y| (1.0 - y * y).max(0.0).sqrt(),
        &QuadratureOptions::default(),
    )
    .unwrap();
    assert_abs_diff_eq!(result.value(), 1.0 / 8.0, epsilon = 1e-10);
    assert!(result.is_converged());
}
