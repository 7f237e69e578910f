//! Property-based tests for return statistics and quantiles.
//!
//! These tests verify properties that should hold for every valid input:
//! - n prices give n - 1 log returns that telescope to ln(last / first)
//! - Variance is non-negative and invariant to a common price scale
//! - Multipliers grow as the tail deepens
//! - Student-t multipliers exceed the normal one
//! - GARCH conditional variances stay above ω

use parvar_math::prelude::*;
use proptest::prelude::*;

// =============================================================================
// GENERATORS
// =============================================================================

fn prices() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.01f64..1e6, 2..200)
}

proptest! {
    #[test]
    fn log_returns_length_and_sum(prices in prices()) {
        let returns = log_returns(&prices).unwrap();
        prop_assert_eq!(returns.len(), prices.len() - 1);

        let total: f64 = returns.iter().sum();
        let expected = (prices[prices.len() - 1] / prices[0]).ln();
        prop_assert!((total - expected).abs() < 1e-9 * (1.0 + expected.abs()) * prices.len() as f64);
    }

    #[test]
    fn variance_is_non_negative(prices in prices()) {
        let stats = ReturnStats::from_prices(&prices).unwrap();
        prop_assert!(stats.variance >= 0.0);
        prop_assert!(stats.volatility >= 0.0);
        prop_assert_eq!(stats.volatility, stats.variance.sqrt());
    }

    #[test]
    fn volatility_ignores_price_scale(prices in prices(), scale in 0.01f64..100.0) {
        let scaled: Vec<f64> = prices.iter().map(|p| p * scale).collect();
        let a = ReturnStats::from_prices(&prices).unwrap().volatility;
        let b = ReturnStats::from_prices(&scaled).unwrap().volatility;
        prop_assert!((a - b).abs() < 1e-9);
    }

    #[test]
    fn non_positive_price_is_located(
        mut prices in prices(),
        slot in any::<prop::sample::Index>(),
        bad in -100.0f64..=0.0,
    ) {
        let index = slot.index(prices.len());
        prices[index] = bad;
        prop_assert_eq!(
            log_returns(&prices).unwrap_err(),
            MathError::NonPositiveValue { index, value: bad }
        );
    }

    #[test]
    fn normal_multiplier_grows_with_tail_depth(a in 0.0001f64..0.5, b in 0.0001f64..0.5) {
        let (deep, shallow) = if a <= b { (a, b) } else { (b, a) };
        let z_deep = QuantileModel::Normal.multiplier(deep).unwrap();
        let z_shallow = QuantileModel::Normal.multiplier(shallow).unwrap();
        prop_assert!(z_deep >= z_shallow);
        prop_assert!(z_shallow >= -1e-12);
    }

    #[test]
    fn student_t_multiplier_exceeds_normal(alpha in 0.001f64..0.2, dof in 1.0f64..200.0) {
        let z_t = QuantileModel::student_t(dof).multiplier(alpha).unwrap();
        let z_n = QuantileModel::Normal.multiplier(alpha).unwrap();
        prop_assert!(z_t > z_n);
    }

    #[test]
    fn garch_variances_stay_above_omega(
        returns in prop::collection::vec(-10.0f64..10.0, 1..100),
        omega in 0.001f64..1.0,
        alpha in 0.0f64..0.5,
        beta in 0.0f64..0.49,
    ) {
        let params = GarchParams { mu: 0.0, omega, alpha, beta };
        let variances = params.conditional_variances(&returns);
        prop_assert_eq!(variances.len(), returns.len() + 1);
        for v in &variances[1..] {
            prop_assert!(*v >= omega);
        }

        let long_run = params.long_run_variance().unwrap();
        prop_assert!(long_run >= omega);
    }
}
