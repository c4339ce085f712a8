use crate::types::{
    Assessment, CategoryScore, CategoryStatus, Clause, CriticalIssue, IssuePriority, RiskLevel,
    RiskTier,
};
use lockscan_rules::{Category, RuleSet};

/// Contribution of a Medium-tier clause relative to a High-tier one.
const MEDIUM_TIER_WEIGHT: f64 = 0.6;

/// Fraction of the category weight assigned when no clause was found.
///
/// Absence of any detectable clause in a risk-bearing category is itself
/// a risk signal, scored more leniently than a confirmed finding.
const MISSING_CATEGORY_FACTOR: f64 = 0.5;

/// Category weight at or above which an issue is High priority.
const HIGH_PRIORITY_WEIGHT: u32 = 20;

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Aggregates classified clauses into a per-document assessment.
pub struct Scorer<'a> {
    rules: &'a RuleSet,
}

impl<'a> Scorer<'a> {
    /// Create a scorer over an immutable rule set.
    #[must_use]
    pub fn new(rules: &'a RuleSet) -> Self {
        Self { rules }
    }

    /// Score a document's clauses into an `Assessment`.
    ///
    /// Never fails: zero clauses produces the all-missing penalty
    /// assessment (total 50.0, Medium) with `manual_review` set.
    pub fn score(&self, clauses: Vec<Clause>, document_id: impl Into<String>) -> Assessment {
        let document_id = document_id.into();

        let category_scores: Vec<CategoryScore> = Category::ALL
            .into_iter()
            .map(|category| self.score_category(category, &clauses))
            .collect();

        let total_score = round1(category_scores.iter().map(|s| s.raw).sum());
        let risk_level = RiskLevel::from_score(total_score);
        let critical_issues = self.collect_critical_issues(&clauses);
        let manual_review = clauses.is_empty();

        if manual_review {
            log::warn!("{document_id}: no clauses extracted, flagging for manual review");
        }
        log::info!(
            "{document_id}: {} clauses, score {total_score:.1}, {risk_level:?} risk",
            clauses.len()
        );

        Assessment {
            document_id,
            clauses,
            category_scores,
            total_score,
            risk_level,
            critical_issues,
            manual_review,
        }
    }

    fn score_category(&self, category: Category, clauses: &[Clause]) -> CategoryScore {
        let rule = self.rules.rule(category);
        let weight = f64::from(rule.weight);

        let clause_count = clauses.iter().filter(|c| c.category == category).count();
        let high_risk_count = clauses
            .iter()
            .filter(|c| c.category == category && c.tier == RiskTier::High)
            .count();

        let (raw, status) = if clause_count == 0 {
            (weight * MISSING_CATEGORY_FACTOR, CategoryStatus::NotFound)
        } else {
            let medium_count = clause_count - high_risk_count;
            let base = high_risk_count as f64 + medium_count as f64 * MEDIUM_TIER_WEIGHT;
            let normalized = weight * base / rule.expected_clauses;
            (normalized.clamp(0.0, weight), CategoryStatus::Found)
        };

        CategoryScore {
            category,
            raw: round2(raw),
            weight: rule.weight,
            clause_count,
            high_risk_count,
            status,
        }
    }

    fn collect_critical_issues(&self, clauses: &[Clause]) -> Vec<CriticalIssue> {
        let mut issues: Vec<CriticalIssue> = clauses
            .iter()
            .filter(|c| c.tier == RiskTier::High)
            .map(|c| {
                let weight = self.rules.weight(c.category);
                let priority = if weight >= HIGH_PRIORITY_WEIGHT {
                    IssuePriority::High
                } else {
                    IssuePriority::Medium
                };
                CriticalIssue {
                    category: c.category,
                    mechanisms: c.mechanisms.clone(),
                    priority,
                    source_index: c.source_index,
                }
            })
            .collect();

        // Priority first, then heavier categories, then source order;
        // downstream recommendation display relies on this being stable.
        issues.sort_by(|a, b| {
            a.priority
                .cmp(&b.priority)
                .then_with(|| self.rules.weight(b.category).cmp(&self.rules.weight(a.category)))
                .then_with(|| a.source_index.cmp(&b.source_index))
        });
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn clause(category: Category, tier: RiskTier, source_index: usize) -> Clause {
        Clause {
            text: String::new(),
            category,
            tier,
            matched_keywords: Vec::new(),
            mechanisms: Vec::new(),
            char_len: 0,
            source_index,
        }
    }

    #[test]
    fn zero_clauses_scores_the_missing_penalty_everywhere() {
        let scorer = Scorer::new(RuleSet::builtin());
        let assessment = scorer.score(Vec::new(), "Empty Vendor");

        for score in &assessment.category_scores {
            assert_eq!(score.raw, f64::from(score.weight) * 0.5);
            assert_eq!(score.status, CategoryStatus::NotFound);
            assert_eq!(score.clause_count, 0);
        }
        assert_eq!(assessment.total_score, 50.0);
        assert_eq!(assessment.risk_level, RiskLevel::Medium);
        assert!(assessment.manual_review);
        assert!(assessment.critical_issues.is_empty());
    }

    #[test]
    fn total_is_the_sum_of_category_raws() {
        let scorer = Scorer::new(RuleSet::builtin());
        let clauses = vec![
            clause(Category::PricingTerms, RiskTier::High, 0),
            clause(Category::PricingTerms, RiskTier::Medium, 1),
            clause(Category::ServiceLevel, RiskTier::High, 2),
        ];
        let assessment = scorer.score(clauses, "Vendor");

        let sum: f64 = assessment.category_scores.iter().map(|s| s.raw).sum();
        assert!((assessment.total_score - (sum * 10.0).round() / 10.0).abs() < 1e-9);
        assert!(assessment.total_score >= 0.0 && assessment.total_score <= 100.0);
    }

    #[test]
    fn category_raw_is_capped_at_weight() {
        let scorer = Scorer::new(RuleSet::builtin());
        // Far more high-risk pricing clauses than the expected count.
        let clauses: Vec<Clause> = (0..20)
            .map(|i| clause(Category::PricingTerms, RiskTier::High, i))
            .collect();
        let assessment = scorer.score(clauses, "Vendor");

        let pricing = assessment.category_score(Category::PricingTerms);
        assert_eq!(pricing.raw, 25.0);
        assert_eq!(pricing.high_risk_count, 20);
    }

    #[test]
    fn normalized_base_uses_tier_weights() {
        let scorer = Scorer::new(RuleSet::builtin());
        // pricing_terms: weight 25, expected 3.0; one High + one Medium
        // gives 25 * (1.0 + 0.6) / 3.0 = 13.33.
        let clauses = vec![
            clause(Category::PricingTerms, RiskTier::High, 0),
            clause(Category::PricingTerms, RiskTier::Medium, 1),
        ];
        let assessment = scorer.score(clauses, "Vendor");
        assert_eq!(assessment.category_score(Category::PricingTerms).raw, 13.33);
    }

    #[test]
    fn critical_issue_priority_follows_category_weight() {
        let scorer = Scorer::new(RuleSet::builtin());
        let clauses = vec![
            clause(Category::DataPortability, RiskTier::High, 0),
            clause(Category::TerminationExit, RiskTier::High, 1),
        ];
        let assessment = scorer.score(clauses, "Vendor");

        // termination_exit (weight 20) outranks data_portability (15).
        assert_eq!(assessment.critical_issues.len(), 2);
        assert_eq!(assessment.critical_issues[0].category, Category::TerminationExit);
        assert_eq!(assessment.critical_issues[0].priority, IssuePriority::High);
        assert_eq!(assessment.critical_issues[1].category, Category::DataPortability);
        assert_eq!(assessment.critical_issues[1].priority, IssuePriority::Medium);
    }

    #[test]
    fn issue_ordering_breaks_ties_by_source_order() {
        let scorer = Scorer::new(RuleSet::builtin());
        let clauses = vec![
            clause(Category::PricingTerms, RiskTier::High, 5),
            clause(Category::PricingTerms, RiskTier::High, 2),
            clause(Category::PricingTerms, RiskTier::Medium, 1),
        ];
        let assessment = scorer.score(clauses, "Vendor");

        let indices: Vec<usize> = assessment
            .critical_issues
            .iter()
            .map(|i| i.source_index)
            .collect();
        assert_eq!(indices, vec![2, 5]);
    }

    #[test]
    fn scoring_is_idempotent() {
        let scorer = Scorer::new(RuleSet::builtin());
        let clauses = vec![
            clause(Category::ServiceLevel, RiskTier::High, 0),
            clause(Category::SupportObligations, RiskTier::Medium, 1),
        ];
        let a = scorer.score(clauses.clone(), "Vendor");
        let b = scorer.score(clauses, "Vendor");
        assert_eq!(a, b);
    }
}
