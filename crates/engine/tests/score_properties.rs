//! Property tests for scoring invariants over arbitrary clause mixes.

use lockscan_engine::{Clause, RiskLevel, RiskTier, Scorer};
use lockscan_rules::{Category, RuleSet};
use proptest::prelude::*;

fn arb_clause() -> impl Strategy<Value = Clause> {
    (0usize..Category::ALL.len(), any::<bool>(), 0usize..64).prop_map(
        |(category_idx, high, source_index)| Clause {
            text: String::new(),
            category: Category::ALL[category_idx],
            tier: if high { RiskTier::High } else { RiskTier::Medium },
            matched_keywords: Vec::new(),
            mechanisms: Vec::new(),
            char_len: 0,
            source_index,
        },
    )
}

proptest! {
    #[test]
    fn total_score_stays_in_range_and_sums_categories(
        clauses in proptest::collection::vec(arb_clause(), 0..40)
    ) {
        let scorer = Scorer::new(RuleSet::builtin());
        let assessment = scorer.score(clauses, "Vendor");

        prop_assert!(assessment.total_score >= 0.0);
        prop_assert!(assessment.total_score <= 100.0);

        let sum: f64 = assessment.category_scores.iter().map(|s| s.raw).sum();
        let rounded = (sum * 10.0).round() / 10.0;
        prop_assert!((assessment.total_score - rounded).abs() < 1e-9);

        for score in &assessment.category_scores {
            prop_assert!(score.raw >= 0.0);
            prop_assert!(score.raw <= f64::from(score.weight));
        }
    }

    #[test]
    fn risk_level_is_a_pure_function_of_total_score(
        clauses in proptest::collection::vec(arb_clause(), 0..40)
    ) {
        let scorer = Scorer::new(RuleSet::builtin());
        let assessment = scorer.score(clauses, "Vendor");
        prop_assert_eq!(
            assessment.risk_level,
            RiskLevel::from_score(assessment.total_score)
        );
    }

    #[test]
    fn critical_issue_count_matches_high_tier_clauses(
        clauses in proptest::collection::vec(arb_clause(), 0..40)
    ) {
        let high = clauses.iter().filter(|c| c.tier == RiskTier::High).count();
        let scorer = Scorer::new(RuleSet::builtin());
        let assessment = scorer.score(clauses, "Vendor");
        prop_assert_eq!(assessment.critical_issues.len(), high);
    }
}
