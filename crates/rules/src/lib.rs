//! # Lockscan Rules
//!
//! Static rule configuration for contract lock-in risk assessment:
//! the five risk categories, their keyword rules and scoring weights,
//! the lock-in mechanism pattern table, and the negotiation template
//! library.
//!
//! All configuration is validated at construction and immutable
//! afterwards. The built-in rule set carries the corpus-calibrated
//! defaults; custom rule sets can be loaded from TOML and validated
//! with the same fail-fast checks.

mod category;
mod error;
mod mechanism;
mod ruleset;
mod template;

pub use category::Category;
pub use error::{ConfigError, Result};
pub use mechanism::{Mechanism, MechanismTable, Severity};
pub use ruleset::{CategoryRule, RuleSet};
pub use template::{NegotiationTemplate, TemplateLibrary, TemplatePriority};
