//! # Lockscan Engine
//!
//! Deterministic risk assessment for vendor/service contracts.
//!
//! ## Architecture
//!
//! ```text
//! Text Blocks (from external document parser)
//!     │
//!     ├──> ClauseExtractor ── keyword relevance, tier, mechanisms
//!     │         │
//!     │         └──> Clause[]
//!     │
//!     ├──> Scorer ── weighted category aggregation
//!     │         │
//!     │         └──> Assessment (scores, risk level, critical issues)
//!     │
//!     ├──> TemplateMatcher ── issue → negotiation template
//!     │         │
//!     │         └──> Recommendation[]
//!     │
//!     └──> compare(Assessment[]) ── ranked multi-vendor comparison
//! ```
//!
//! Every operation is a synchronous pure computation over immutable
//! inputs: no I/O, no shared mutable state, no retries. Concurrent
//! assessment of independent documents needs no coordination.
//!
//! ## Example
//!
//! ```rust
//! use lockscan_engine::{ClauseExtractor, Scorer, TemplateMatcher};
//! use lockscan_rules::{RuleSet, TemplateLibrary};
//!
//! let rules = RuleSet::builtin();
//! let extractor = ClauseExtractor::new(rules);
//! let scorer = Scorer::new(rules);
//!
//! let blocks = vec![
//!     "Pricing and fees: provider may increase prices for the subscription \
//!      at any time at our sole discretion, with changes to payment terms \
//!      taking effect without notice on the next billing cycle."
//!         .to_string(),
//! ];
//!
//! let clauses = extractor.extract(&blocks);
//! let assessment = scorer.score(clauses, "Example Vendor");
//! let matcher = TemplateMatcher::new(TemplateLibrary::builtin());
//! let recommendations = matcher.match_templates(&assessment);
//! assert!(assessment.total_score <= 100.0);
//! assert_eq!(recommendations.len(), assessment.critical_issues.len());
//! ```

mod compare;
mod error;
mod extract;
mod matcher;
mod score;
mod types;

pub use compare::{compare, DEFAULT_WORST_LIMIT};
pub use error::{EngineError, Result};
pub use extract::ClauseExtractor;
pub use matcher::TemplateMatcher;
pub use score::Scorer;
pub use types::{
    Assessment, CategoryScore, CategoryStatus, Clause, Comparison, CriticalIssue, IssuePriority,
    MatrixRow, RankedVendor, Recommendation, RiskDistribution, RiskLevel, RiskTier,
};
