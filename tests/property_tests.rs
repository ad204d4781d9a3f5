//! Property tests for the stack-up calculator

use proptest::prelude::*;
use tolchain::core::{compute, report, variance_contributions};
use tolchain::entities::{Contributor, Direction, ToleranceChain};

fn contributor_strategy() -> impl Strategy<Value = (f64, f64, f64, bool)> {
    (
        -1000.0..1000.0f64,
        0.0..5.0f64,
        0.0..5.0f64,
        any::<bool>(),
    )
}

fn chain_strategy() -> impl Strategy<Value = ToleranceChain> {
    proptest::collection::vec(contributor_strategy(), 1..12).prop_map(|parts| {
        let contributors = parts
            .into_iter()
            .enumerate()
            .map(|(i, (nominal, plus, minus, positive))| {
                let direction = if positive {
                    Direction::Positive
                } else {
                    Direction::Negative
                };
                Contributor::new(format!("C{}", i), nominal, plus, minus, direction)
            })
            .collect();
        ToleranceChain::new(contributors).expect("generated chain is valid")
    })
}

proptest! {
    #[test]
    fn property_rss_never_exceeds_worst_case(chain in chain_strategy()) {
        let r = compute(&chain).unwrap();
        // RSS <= linear sum for non-negative terms; allow rounding slack
        prop_assert!(r.statistical_plus <= r.worst_case_plus * (1.0 + 1e-12) + 1e-15);
        prop_assert!(r.statistical_minus <= r.worst_case_minus * (1.0 + 1e-12) + 1e-15);
        prop_assert!(r.statistical_plus >= 0.0);
        prop_assert!(r.statistical_minus >= 0.0);
    }

    #[test]
    fn property_compute_is_deterministic(chain in chain_strategy()) {
        let a = compute(&chain).unwrap();
        let b = compute(&chain).unwrap();
        prop_assert_eq!(a.nominal_resultant.to_bits(), b.nominal_resultant.to_bits());
        prop_assert_eq!(a.worst_case_plus.to_bits(), b.worst_case_plus.to_bits());
        prop_assert_eq!(a.statistical_minus.to_bits(), b.statistical_minus.to_bits());
    }

    #[test]
    fn property_single_contributor_collapses((nominal, plus, minus, positive) in contributor_strategy()) {
        let direction = if positive { Direction::Positive } else { Direction::Negative };
        let chain = ToleranceChain::new(vec![
            Contributor::new("Only", nominal, plus, minus, direction),
        ]).unwrap();
        let r = compute(&chain).unwrap();
        prop_assert!((r.statistical_plus - r.worst_case_plus).abs() <= 1e-12);
        prop_assert!((r.statistical_minus - r.worst_case_minus).abs() <= 1e-12);
        prop_assert_eq!(r.nominal_resultant, direction.sign() * nominal);
    }

    #[test]
    fn property_intervals_contain_nominal(chain in chain_strategy()) {
        let r = compute(&chain).unwrap();
        let report = report::format(&chain, &r);
        prop_assert_eq!(report.contributor_count, chain.len());
        prop_assert!(report.worst_case.min <= report.statistical.min + 1e-9);
        prop_assert!(report.statistical.min <= r.nominal_resultant);
        prop_assert!(r.nominal_resultant <= report.statistical.max);
        prop_assert!(report.statistical.max <= report.worst_case.max + 1e-9);
    }

    #[test]
    fn property_variance_contributions_sum(chain in chain_strategy()) {
        let pct = variance_contributions(&chain);
        prop_assert_eq!(pct.len(), chain.len());
        let total: f64 = pct.iter().sum();
        prop_assert!(total == 0.0 || (total - 100.0).abs() < 1e-6);
    }
}
