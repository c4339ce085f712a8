use serde::{Deserialize, Serialize};
use std::fmt;

/// Risk category for extracted contract clauses.
///
/// Declaration order is significant: it is the tie-break order for
/// category assignment and the output order for per-category scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    ServiceLevel,
    PricingTerms,
    TerminationExit,
    DataPortability,
    SupportObligations,
}

impl Category {
    /// All categories in declaration order.
    pub const ALL: [Category; 5] = [
        Category::ServiceLevel,
        Category::PricingTerms,
        Category::TerminationExit,
        Category::DataPortability,
        Category::SupportObligations,
    ];

    /// Stable snake_case identifier, matching the serde representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Category::ServiceLevel => "service_level",
            Category::PricingTerms => "pricing_terms",
            Category::TerminationExit => "termination_exit",
            Category::DataPortability => "data_portability",
            Category::SupportObligations => "support_obligations",
        }
    }

    /// Human-readable label for log lines and CLI summaries.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Category::ServiceLevel => "Service Level",
            Category::PricingTerms => "Pricing Terms",
            Category::TerminationExit => "Termination & Exit",
            Category::DataPortability => "Data Portability",
            Category::SupportObligations => "Support Obligations",
        }
    }

    /// Position in declaration order.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Category::ServiceLevel => 0,
            Category::PricingTerms => 1,
            Category::TerminationExit => 2,
            Category::DataPortability => 3,
            Category::SupportObligations => 4,
        }
    }

    /// Parse a snake_case identifier.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Category::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_all_categories() {
        for category in Category::ALL {
            assert_eq!(Category::parse(category.as_str()), Some(category));
        }
        assert_eq!(Category::parse("liability"), None);
    }

    #[test]
    fn index_matches_declaration_order() {
        for (i, category) in Category::ALL.into_iter().enumerate() {
            assert_eq!(category.index(), i);
        }
    }
}
