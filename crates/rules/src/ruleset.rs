use crate::category::Category;
use crate::error::{ConfigError, Result};
use crate::mechanism::{Mechanism, MechanismTable};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Detection and scoring rules for a single category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRule {
    /// Maximum points (of 100) this category contributes to the total.
    pub weight: u32,

    /// Minimum positive-keyword occurrences for a block to be relevant.
    #[serde(default = "default_min_matches")]
    pub min_matches: usize,

    /// Reference clause count used to normalize category base scores.
    ///
    /// Calibrated against the training corpus; tune here, not in the
    /// scoring code.
    pub expected_clauses: f64,

    /// Positive keywords indicating the block addresses this category.
    pub keywords: Vec<String>,

    /// Red-flag keywords; any occurrence raises the clause to tier High.
    pub negative_keywords: Vec<String>,

    /// Cheap pre-filter: at least one must appear before keywords are
    /// counted. An empty list disables the pre-filter.
    #[serde(default)]
    pub required_phrases: Vec<String>,
}

const fn default_min_matches() -> usize {
    2
}

/// Immutable rule configuration for the whole engine.
///
/// Holds one `CategoryRule` per category (in declaration order) plus the
/// lock-in mechanism table. Validated on construction; no mutation API.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<CategoryRule>,
    mechanisms: MechanismTable,
}

#[derive(Debug, Deserialize)]
struct RuleSetDoc {
    categories: HashMap<String, CategoryRule>,
    #[serde(default)]
    mechanisms: Vec<Mechanism>,
}

impl RuleSet {
    /// Build a rule set from per-category rules in declaration order.
    pub fn new(rules: Vec<CategoryRule>, mechanisms: MechanismTable) -> Result<Self> {
        let ruleset = Self { rules, mechanisms };
        ruleset.validate()?;
        Ok(ruleset)
    }

    /// Parse and validate a rule set from a TOML document.
    ///
    /// Every category must appear exactly once under `[categories.*]`.
    /// A `[[mechanisms]]` array replaces the built-in mechanism table;
    /// omitting it keeps the built-in one.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let mut doc: RuleSetDoc = toml::from_str(input)?;

        for key in doc.categories.keys() {
            if Category::parse(key).is_none() {
                return Err(ConfigError::UnknownCategory(key.clone()));
            }
        }

        let mut rules = Vec::with_capacity(Category::ALL.len());
        for category in Category::ALL {
            let rule = doc
                .categories
                .remove(category.as_str())
                .ok_or(ConfigError::MissingCategory(category.as_str()))?;
            rules.push(rule);
        }

        let mechanisms = if doc.mechanisms.is_empty() {
            MechanismTable::builtin()
        } else {
            MechanismTable::new(doc.mechanisms)?
        };

        Self::new(rules, mechanisms)
    }

    /// The rule for a category.
    #[must_use]
    pub fn rule(&self, category: Category) -> &CategoryRule {
        &self.rules[category.index()]
    }

    /// Maximum points for a category.
    #[must_use]
    pub fn weight(&self, category: Category) -> u32 {
        self.rule(category).weight
    }

    /// The lock-in mechanism table.
    #[must_use]
    pub fn mechanisms(&self) -> &MechanismTable {
        &self.mechanisms
    }

    /// The corpus-calibrated built-in rule set.
    #[must_use]
    pub fn builtin() -> &'static RuleSet {
        static BUILTIN: Lazy<RuleSet> = Lazy::new(builtin_ruleset);
        &BUILTIN
    }

    fn validate(&self) -> Result<()> {
        if self.rules.len() != Category::ALL.len() {
            // Constructor callers must supply one rule per category.
            return Err(ConfigError::MissingCategory(
                Category::ALL[self.rules.len().min(Category::ALL.len() - 1)].as_str(),
            ));
        }

        let weight_sum: u32 = self.rules.iter().map(|r| r.weight).sum();
        if weight_sum != 100 {
            return Err(ConfigError::WeightSum(weight_sum));
        }

        for category in Category::ALL {
            let rule = self.rule(category);
            if rule.keywords.is_empty() {
                return Err(ConfigError::EmptyKeywords(category.as_str()));
            }
            if rule.min_matches == 0 {
                return Err(ConfigError::ZeroThreshold(category.as_str()));
            }
            if rule.expected_clauses <= 0.0 {
                return Err(ConfigError::NonPositiveExpected(category.as_str()));
            }
        }

        log::debug!(
            "rule set validated: {} categories, {} mechanisms",
            self.rules.len(),
            self.mechanisms.len()
        );
        Ok(())
    }
}

fn words(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn builtin_ruleset() -> RuleSet {
    let rules = vec![
        // service_level: 25 points
        CategoryRule {
            weight: 25,
            min_matches: 2,
            expected_clauses: 3.0,
            keywords: words(&[
                "sla",
                "service level",
                "uptime",
                "availability",
                "performance",
                "guarantee",
                "commitment",
                "downtime",
                "credits",
                "compensation",
                "reliability",
                "service credit",
                "remedies",
                "service performance",
                "service guarantee",
                "warranty",
                "service quality",
            ]),
            negative_keywords: words(&[
                "no sla",
                "no guarantee",
                "best effort",
                "as is",
                "no warranty",
                "sole remedy",
                "exclusive remedy",
                "no liability",
                "no compensation",
                "service credits only",
                "as available",
                "without warranty",
            ]),
            required_phrases: words(&["sla", "uptime", "availability", "guarantee", "service level"]),
        },
        // pricing_terms: 25 points
        CategoryRule {
            weight: 25,
            min_matches: 2,
            expected_clauses: 3.0,
            keywords: words(&[
                "pricing",
                "fees",
                "payment",
                "cost",
                "subscription",
                "charges",
                "price increase",
                "rate change",
                "fee change",
                "pricing change",
                "billing",
                "invoice",
                "payment terms",
                "price adjustment",
                "renewal fee",
                "price lock",
                "pricing guarantee",
                "price modification",
            ]),
            negative_keywords: words(&[
                "increase prices",
                "raise fees",
                "modify pricing",
                "change fees",
                "at our discretion",
                "sole discretion",
                "without notice",
                "unilateral",
                "at any time",
                "right to change",
                "may increase",
            ]),
            required_phrases: words(&["pric", "fee", "cost", "payment", "subscription"]),
        },
        // termination_exit: 20 points
        CategoryRule {
            weight: 20,
            min_matches: 2,
            expected_clauses: 2.5,
            keywords: words(&[
                "termination",
                "terminate",
                "cancel",
                "cancellation",
                "exit",
                "end of term",
                "contract end",
                "notice period",
                "termination fee",
                "early termination",
                "wind down",
                "transition",
                "off-boarding",
                "data deletion",
                "account closure",
                "suspension",
                "renewal",
            ]),
            negative_keywords: words(&[
                "termination fee",
                "penalty",
                "early termination fee",
                "cannot terminate",
                "must continue",
                "auto-renew",
                "automatic renewal",
                "no refund",
                "immediately delete",
                "forfeit",
                "early cancellation fee",
            ]),
            required_phrases: words(&["terminat", "cancel", "exit", "renewal", "end"]),
        },
        // data_portability: 15 points
        CategoryRule {
            weight: 15,
            min_matches: 2,
            expected_clauses: 2.0,
            keywords: words(&[
                "data export",
                "data portability",
                "data migration",
                "export data",
                "data transfer",
                "download data",
                "retrieve data",
                "data extraction",
                "data backup",
                "api access",
                "bulk export",
                "data ownership",
                "portable format",
                "standard format",
                "data retrieval",
            ]),
            negative_keywords: words(&[
                "no obligation to provide",
                "may not export",
                "cannot export",
                "prohibit export",
                "restrict export",
                "no portability",
                "proprietary format only",
                "no api access",
                "limited export",
            ]),
            required_phrases: words(&["export", "portability", "migration", "api", "retrieval"]),
        },
        // support_obligations: 15 points
        CategoryRule {
            weight: 15,
            min_matches: 2,
            expected_clauses: 2.0,
            keywords: words(&[
                "support",
                "technical support",
                "customer support",
                "assistance",
                "help desk",
                "support hours",
                "support availability",
                "support level",
                "maintenance",
                "updates",
                "patches",
                "bug fixes",
                "response time",
                "support tier",
                "support plan",
                "customer service",
                "service availability",
            ]),
            negative_keywords: words(&[
                "no support",
                "no obligation to support",
                "may discontinue support",
                "at our discretion",
                "no guarantee",
                "best effort",
                "as is",
                "no commitment",
                "may suspend",
                "right to discontinue",
            ]),
            required_phrases: words(&["support", "maintenance", "assistance", "service"]),
        },
    ];

    RuleSet::new(rules, MechanismTable::builtin()).expect("builtin rule set is valid")
}
