//! Report assembly: glue between file text and the engine API.

use crate::blocks::split_blocks;
use lockscan_engine::{Assessment, ClauseExtractor, Recommendation, Scorer, TemplateMatcher};
use lockscan_rules::{RuleSet, TemplateLibrary};
use serde::Serialize;
use std::collections::BTreeMap;

/// Documents shorter than this rarely segment into usable blocks; they
/// are assessed as zero-clause and flagged for manual review.
const MIN_DOCUMENT_LEN: usize = 1000;

/// Assessment plus matched negotiation recommendations for one document.
#[derive(Debug, Serialize)]
pub struct AssessmentReport {
    pub assessment: Assessment,
    pub recommendations: Vec<Recommendation>,

    /// How often each lock-in mechanism appeared across the clauses.
    pub mechanism_frequencies: BTreeMap<String, usize>,
}

/// Assess raw contract text under a rule set and template library.
pub fn assess_text(
    rules: &RuleSet,
    library: &TemplateLibrary,
    document_id: &str,
    text: &str,
) -> AssessmentReport {
    let blocks = if text.chars().count() < MIN_DOCUMENT_LEN {
        log::warn!(
            "{document_id}: document too short ({} chars), assessing as zero-clause",
            text.chars().count()
        );
        Vec::new()
    } else {
        split_blocks(text)
    };

    let clauses = ClauseExtractor::new(rules).extract(&blocks);
    let assessment = Scorer::new(rules).score(clauses, document_id);
    let recommendations = TemplateMatcher::new(library).match_templates(&assessment);
    let mechanism_frequencies = assessment.mechanism_frequencies();

    AssessmentReport {
        assessment,
        recommendations,
        mechanism_frequencies,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lockscan_engine::RiskLevel;

    #[test]
    fn short_documents_are_flagged_for_manual_review() {
        let report = assess_text(
            RuleSet::builtin(),
            TemplateLibrary::builtin(),
            "Tiny Vendor",
            "too short to assess",
        );

        assert!(report.assessment.manual_review);
        assert_eq!(report.assessment.total_score, 50.0);
        assert_eq!(report.assessment.risk_level, RiskLevel::Medium);
        assert!(report.recommendations.is_empty());
    }

    #[test]
    fn recommendations_track_critical_issues() {
        let section = "Pricing and fees for the subscription may be modified at the \
            provider's sole discretion at any time, and the revised billing schedule \
            takes effect without notice on the next invoice date for every customer.";
        let text = vec![section; 6].join("\n\n");

        let report = assess_text(
            RuleSet::builtin(),
            TemplateLibrary::builtin(),
            "Acme",
            &text,
        );

        assert!(!report.assessment.clauses.is_empty());
        assert_eq!(
            report.recommendations.len(),
            report.assessment.critical_issues.len()
        );
    }
}
