use lockscan_rules::Category;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Risk tier of an individual clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    High,
    Medium,
}

/// Overall risk level of a scored document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Classify a total score with the fixed cut points.
    ///
    /// Low covers [0, 33], High covers [67, 100], Medium everything in
    /// between, so 33.9 and 66.9 are both Medium. These exact boundaries
    /// keep results compatible with recorded historical assessments.
    #[must_use]
    pub fn from_score(total_score: f64) -> Self {
        if total_score >= 67.0 {
            RiskLevel::High
        } else if total_score > 33.0 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

/// A unit of extracted evidence: one text block classified into a
/// category with a risk tier.
///
/// Immutable once produced; owned by the assessment run that created it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clause {
    /// Source text of the block.
    pub text: String,

    /// Assigned category (at most one per clause).
    pub category: Category,

    /// Risk tier from the negative-keyword scan.
    pub tier: RiskTier,

    /// Positive keywords that matched, for explainability.
    pub matched_keywords: Vec<String>,

    /// Names of lock-in mechanisms detected in the block.
    pub mechanisms: Vec<String>,

    /// Character length of the source text.
    pub char_len: usize,

    /// Position of the source block in the input sequence.
    pub source_index: usize,
}

/// Whether any clause was found for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryStatus {
    Found,
    NotFound,
}

/// Score contribution of one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    /// The category this score belongs to.
    pub category: Category,

    /// Raw points in [0, weight].
    pub raw: f64,

    /// Maximum attainable points for this category.
    pub weight: u32,

    /// Number of clauses assigned to this category.
    pub clause_count: usize,

    /// Number of those clauses at tier High.
    pub high_risk_count: usize,

    /// Found vs. not-found; a not-found category scored the partial
    /// penalty, which may mean genuinely absent or defeated extraction.
    pub status: CategoryStatus,
}

/// Priority of a critical issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssuePriority {
    High,
    Medium,
}

/// A High-tier clause surfaced for negotiation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticalIssue {
    /// Category of the offending clause.
    pub category: Category,

    /// Lock-in mechanisms matched in the clause, in table order.
    pub mechanisms: Vec<String>,

    /// High when the category weight is 20 or more.
    pub priority: IssuePriority,

    /// Source block position, the final ordering tie-break.
    pub source_index: usize,
}

/// Complete assessment of one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    /// Vendor or contract identifier.
    pub document_id: String,

    /// Extracted clauses in source order.
    pub clauses: Vec<Clause>,

    /// Per-category scores in category declaration order.
    pub category_scores: Vec<CategoryScore>,

    /// Sum of category raw scores, rounded to one decimal.
    pub total_score: f64,

    /// Risk level derived from the total score.
    pub risk_level: RiskLevel,

    /// Critical issues ordered by (priority, category weight, source).
    pub critical_issues: Vec<CriticalIssue>,

    /// True when no clause was extracted in any category. The score is
    /// still valid (all categories at the partial penalty), but the
    /// document should be reviewed by hand.
    pub manual_review: bool,
}

impl Assessment {
    /// Score entry for a category.
    #[must_use]
    pub fn category_score(&self, category: Category) -> &CategoryScore {
        &self.category_scores[category.index()]
    }

    /// How often each mechanism was detected across all clauses.
    ///
    /// Explainability statistic; does not feed back into scoring.
    #[must_use]
    pub fn mechanism_frequencies(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for clause in &self.clauses {
            for mechanism in &clause.mechanisms {
                *counts.entry(mechanism.clone()).or_insert(0) += 1;
            }
        }
        counts
    }
}

/// A critical issue paired with its best-matching template, if any.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    /// The issue being addressed.
    pub issue: CriticalIssue,

    /// Matched template; `None` when the category has no templates.
    pub template: Option<lockscan_rules::NegotiationTemplate>,
}

/// Risk level counts across a set of assessments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskDistribution {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

/// One vendor's position in a ranked comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedVendor {
    pub document_id: String,
    pub total_score: f64,
    pub risk_level: RiskLevel,
}

/// One vendor's per-category raw scores, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixRow {
    pub document_id: String,
    pub scores: Vec<f64>,
}

/// Ranked comparison across N assessed documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comparison {
    /// Number of vendors compared.
    pub vendor_count: usize,

    /// Mean total score, rounded to one decimal.
    pub average_score: f64,

    /// Risk level counts.
    pub distribution: RiskDistribution,

    /// Ascending by score: first entry is the lowest-risk vendor.
    pub ranked: Vec<RankedVendor>,

    /// Highest-scoring High-risk vendors, descending, at most top-k.
    pub worst: Vec<RankedVendor>,

    /// Per-vendor category score rows for display, in ranked order.
    pub matrix: Vec<MatrixRow>,

    /// Mean raw score per category across vendors, declaration order.
    pub category_averages: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_level_boundaries() {
        assert_eq!(RiskLevel::from_score(0.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(33.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(33.9), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(34.0), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(66.9), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(67.0), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(100.0), RiskLevel::High);
    }
}
