use approx::{assert_abs_diff_eq, assert_relative_eq};
use gaussquad::quadrature::integrator::{GaussLegendre, Integrator, integrate, try_integrate};
use gaussquad::quadrature::legendre::legendre_rule;
use gaussquad::quadrature::quadratureerror::QuadratureError;
use gaussquad::quadrature::quadraturerule::scale_to_interval;
use gaussquad::quadrature::rulecache::{RefCellRuleCache, RuleCache};
use gaussquad::reference::gausskronrod::AdaptiveGaussKronrod;

fn polynomial(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}

fn polynomial_integral(coefficients: &[f64], a: f64, b: f64) -> f64 {
    coefficients
        .iter()
        .enumerate()
        .map(|(k, c)| {
            let power = (k + 1) as i32;
            c * (b.powi(power) - a.powi(power)) / (k + 1) as f64
        })
        .sum()
}

#[test]
fn polynomials_up_to_degree_2n_minus_1_are_exact() {
    let (a, b) = (-0.5, 2.0);
    for n in 1..=12 {
        let degree = 2 * n - 1;
        let coefficients: Vec<f64> = (0..=degree)
            .map(|k| if k % 2 == 0 { 1.0 / (k + 1) as f64 } else { -0.5 })
            .collect();
        let exact = polynomial_integral(&coefficients, a, b);
        let value = integrate(|x| polynomial(&coefficients, x), a, b, n).unwrap();
        assert_relative_eq!(value, exact, max_relative = 1e-10);
    }
}

#[test]
fn degree_2n_is_not_exact() {
    // x⁴ 以 2 點規則：∫_{-1}^{1} x⁴ = 2/5，但 2·(1/3)² = 2/9
    let value = integrate(|x| x.powi(4), -1.0, 1.0, 2).unwrap();
    assert_relative_eq!(value, 2.0 / 9.0, max_relative = 1e-14);
}

#[test]
fn scaling_to_reference_interval_is_identity() {
    for n in 1..=30 {
        let rule = legendre_rule(n).unwrap();
        let scaled = scale_to_interval(&rule, -1.0, 1.0).unwrap();
        assert_eq!(scaled.points(), rule.points());
    }
}

#[test]
fn scaled_weights_sum_to_interval_length() {
    for n in [1, 2, 5, 17, 40] {
        let scaled = legendre_rule(n).unwrap().scale(1.0, 3.0).unwrap();
        assert_abs_diff_eq!(scaled.weight_sum(), 2.0, epsilon = 1e-12);
        assert!(scaled.nodes().iter().all(|&x| x > 1.0 && x < 3.0));
    }
}

#[test]
fn square_on_zero_two_with_three_points() {
    let value = integrate(|x| x * x, 0.0, 2.0, 3).unwrap();
    assert!((value - 8.0 / 3.0).abs() < 1e-10, "value = {}", value);
}

#[test]
fn zero_points_is_invalid_argument() {
    assert!(matches!(legendre_rule(0), Err(QuadratureError::InvalidArgument(_))));
    assert!(matches!(GaussLegendre::new(0), Err(QuadratureError::InvalidArgument(_))));
}

#[test]
fn cached_rules_integrate_like_fresh_ones() {
    let cache = RefCellRuleCache::new();
    for n in 1..=10 {
        let cached = cache.rule(n).unwrap();
        let engine = GaussLegendre::from_rule((*cached).clone());
        let lhs = engine.integral(f64::cos, 0.0, 1.0).unwrap();
        let rhs = integrate(f64::cos, 0.0, 1.0, n).unwrap();
        assert_eq!(lhs, rhs);
    }
    assert_eq!(cache.len(), 10);
}

#[test]
fn gauss_legendre_and_reference_agree_on_smooth_integrand() {
    let f = |x: f64| (-x * x).exp();
    let reference = AdaptiveGaussKronrod::default().integral(f, 0.0, 2.0).unwrap();
    let value = GaussLegendre::new(20).unwrap().integral(f, 0.0, 2.0).unwrap();
    assert_relative_eq!(value, reference, max_relative = 1e-13);
}

#[test]
fn failing_integrand_error_reaches_caller_unchanged() {
    #[derive(Debug, PartialEq)]
    enum EvalError {
        NotANumber,
        Quadrature(QuadratureError),
    }

    impl From<QuadratureError> for EvalError {
        fn from(error: QuadratureError) -> Self {
            EvalError::Quadrature(error)
        }
    }

    let result = try_integrate(
        |x: f64| {
            let y = x.ln();
            if y.is_nan() { Err(EvalError::NotANumber) } else { Ok(y) }
        },
        -1.0,
        1.0,
        6,
    );
    assert_eq!(result, Err(EvalError::NotANumber));
}
