use crate::types::{Clause, RiskTier};
use lockscan_rules::{Category, RuleSet};

/// Minimum block length considered worth classifying, in characters.
///
/// Very short fragments (headings, page furniture) produce spurious
/// keyword hits; the cutoff matches the calibration corpus.
const DEFAULT_MIN_BLOCK_LEN: usize = 100;

/// Segments text blocks into classified clauses using a rule set.
///
/// Extraction never fails: malformed or empty input yields an empty
/// clause list, which downstream scoring treats as a valid state.
pub struct ClauseExtractor<'a> {
    rules: &'a RuleSet,
    min_block_len: usize,
}

impl<'a> ClauseExtractor<'a> {
    /// Create an extractor over an immutable rule set.
    #[must_use]
    pub fn new(rules: &'a RuleSet) -> Self {
        Self {
            rules,
            min_block_len: DEFAULT_MIN_BLOCK_LEN,
        }
    }

    /// Override the minimum block length (0 disables the cutoff).
    #[must_use]
    pub fn with_min_block_len(mut self, min_block_len: usize) -> Self {
        self.min_block_len = min_block_len;
        self
    }

    /// Extract classified clauses from an ordered sequence of plain-text
    /// blocks. Source order is preserved; blocks matching no category are
    /// dropped; no deduplication is performed.
    pub fn extract<S: AsRef<str>>(&self, blocks: &[S]) -> Vec<Clause> {
        let mut clauses = Vec::new();

        for (source_index, block) in blocks.iter().enumerate() {
            let text = block.as_ref();
            if text.trim().chars().count() < self.min_block_len {
                continue;
            }

            let lower = text.to_lowercase();
            if let Some(clause) = self.classify_block(text, &lower, source_index) {
                clauses.push(clause);
            }
        }

        log::debug!("extracted {} clauses from {} blocks", clauses.len(), blocks.len());
        clauses
    }

    /// Classify one block; `None` when no category reaches its threshold.
    fn classify_block(&self, text: &str, lower: &str, source_index: usize) -> Option<Clause> {
        let mut best: Option<(Category, usize)> = None;

        for category in Category::ALL {
            let rule = self.rules.rule(category);

            if !rule.required_phrases.is_empty()
                && !rule.required_phrases.iter().any(|p| lower.contains(p.as_str()))
            {
                continue;
            }

            let count: usize = rule
                .keywords
                .iter()
                .map(|kw| lower.matches(kw.as_str()).count())
                .sum();
            if count < rule.min_matches {
                continue;
            }

            // Highest count wins; ties keep the earlier declaration.
            match best {
                Some((_, best_count)) if count <= best_count => {}
                _ => best = Some((category, count)),
            }
        }

        let (category, _) = best?;
        let rule = self.rules.rule(category);

        let matched_keywords: Vec<String> = rule
            .keywords
            .iter()
            .filter(|kw| lower.contains(kw.as_str()))
            .cloned()
            .collect();

        let has_red_flag = rule
            .negative_keywords
            .iter()
            .any(|nkw| lower.contains(nkw.as_str()));
        let tier = if has_red_flag {
            RiskTier::High
        } else {
            RiskTier::Medium
        };

        let mechanisms: Vec<String> = self
            .rules
            .mechanisms()
            .iter()
            .filter(|m| m.patterns.iter().any(|p| lower.contains(p.as_str())))
            .map(|m| m.name.clone())
            .collect();

        Some(Clause {
            text: text.to_string(),
            category,
            tier,
            matched_keywords,
            mechanisms,
            char_len: text.chars().count(),
            source_index,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn extractor(rules: &RuleSet) -> ClauseExtractor<'_> {
        ClauseExtractor::new(rules)
    }

    const PRICING_BLOCK: &str = "Pricing for the subscription is reviewed annually. \
        Provider may revise the pricing schedule and associated fees at its sole \
        discretion, and changes to the pricing take effect on the next billing cycle.";

    #[test]
    fn empty_input_yields_empty_clause_list() {
        let rules = RuleSet::builtin();
        let blocks: Vec<String> = Vec::new();
        assert_eq!(extractor(rules).extract(&blocks), Vec::new());
    }

    #[test]
    fn short_blocks_are_skipped() {
        let rules = RuleSet::builtin();
        let blocks = ["pricing fees billing"];
        assert!(extractor(rules).extract(&blocks).is_empty());
    }

    #[test]
    fn pricing_block_with_red_flag_is_high_tier() {
        // 3+ pricing keyword occurrences and one negative keyword.
        let rules = RuleSet::builtin();
        let clauses = extractor(rules).extract(&[PRICING_BLOCK]);

        assert_eq!(clauses.len(), 1);
        let clause = &clauses[0];
        assert_eq!(clause.category, Category::PricingTerms);
        assert_eq!(clause.tier, RiskTier::High);
        assert!(clause.matched_keywords.contains(&"pricing".to_string()));
        assert!(clause.mechanisms.contains(&"unilateral_pricing".to_string()));
    }

    #[test]
    fn block_without_red_flags_is_medium_tier() {
        let rules = RuleSet::builtin();
        let block = "Technical support is available through the help desk during \
            business hours. Support requests receive a response time commitment of \
            one business day, and maintenance updates ship quarterly.";
        let clauses = extractor(rules).extract(&[block]);

        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].category, Category::SupportObligations);
        assert_eq!(clauses[0].tier, RiskTier::Medium);
    }

    #[test]
    fn irrelevant_blocks_are_dropped() {
        let rules = RuleSet::builtin();
        let block = "This agreement is governed by the laws of the State of Delaware, \
            and the parties consent to the exclusive jurisdiction of the courts located \
            in New Castle County for any dispute arising out of this agreement.";
        assert!(extractor(rules).extract(&[block]).is_empty());
    }

    #[test]
    fn highest_match_count_wins_category_ties() {
        // Mentions termination once but is dominated by pricing language.
        let rules = RuleSet::builtin();
        let block = "Upon renewal, pricing and fees may change; the updated payment \
            terms, subscription charges, and billing schedule apply for the renewed \
            term unless the customer elects to cancel before the renewal date.";
        let clauses = extractor(rules).extract(&[block]);

        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].category, Category::PricingTerms);
    }

    #[test]
    fn source_order_is_preserved_without_dedup() {
        let rules = RuleSet::builtin();
        let blocks = [PRICING_BLOCK, PRICING_BLOCK];
        let clauses = extractor(rules).extract(&blocks);

        assert_eq!(clauses.len(), 2);
        assert_eq!(clauses[0].source_index, 0);
        assert_eq!(clauses[1].source_index, 1);
    }

    #[test]
    fn extraction_is_deterministic() {
        let rules = RuleSet::builtin();
        let blocks = [PRICING_BLOCK];
        let first = extractor(rules).extract(&blocks);
        let second = extractor(rules).extract(&blocks);
        assert_eq!(first, second);
    }
}
