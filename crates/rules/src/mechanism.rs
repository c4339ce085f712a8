use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Severity of a lock-in mechanism, with its scoring multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    /// Empirical penalty multiplier for this severity band.
    #[must_use]
    pub const fn multiplier(self) -> f64 {
        match self {
            Severity::High => 1.0,
            Severity::Medium => 0.7,
            Severity::Low => 0.5,
        }
    }
}

/// A named lock-in pattern, detected by case-insensitive substring match.
///
/// Mechanisms are scanned independently of category assignment: a clause
/// records every mechanism whose pattern appears in its text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mechanism {
    /// Stable snake_case name, also the template lookup key.
    pub name: String,

    /// Severity band for this mechanism.
    pub severity: Severity,

    /// Lowercase substrings that indicate this mechanism.
    pub patterns: Vec<String>,
}

/// Ordered table of lock-in mechanisms.
///
/// Declaration order is preserved; clause mechanism lists follow it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MechanismTable {
    mechanisms: Vec<Mechanism>,
}

impl MechanismTable {
    /// Build a table from a mechanism list, validating names and patterns.
    pub fn new(mechanisms: Vec<Mechanism>) -> Result<Self> {
        let mut seen = HashSet::new();
        for mechanism in &mechanisms {
            if !seen.insert(mechanism.name.clone()) {
                return Err(ConfigError::DuplicateMechanism(mechanism.name.clone()));
            }
            if mechanism.patterns.iter().all(|p| p.trim().is_empty()) {
                return Err(ConfigError::EmptyMechanismPatterns(mechanism.name.clone()));
            }
        }
        Ok(Self { mechanisms })
    }

    /// Iterate mechanisms in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Mechanism> {
        self.mechanisms.iter()
    }

    /// Number of mechanisms in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mechanisms.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mechanisms.is_empty()
    }

    /// Severity of a mechanism by name, if present.
    #[must_use]
    pub fn severity_of(&self, name: &str) -> Option<Severity> {
        self.mechanisms
            .iter()
            .find(|m| m.name == name)
            .map(|m| m.severity)
    }

    /// The corpus-calibrated built-in mechanism table.
    pub(crate) fn builtin() -> Self {
        fn mech(name: &str, severity: Severity, patterns: &[&str]) -> Mechanism {
            Mechanism {
                name: name.to_string(),
                severity,
                patterns: patterns.iter().map(|p| (*p).to_string()).collect(),
            }
        }

        let mechanisms = vec![
            // High severity: full penalty weight
            mech(
                "no_compensation",
                Severity::High,
                &["no compensation", "no liability", "sole remedy"],
            ),
            mech(
                "price_increase_risk",
                Severity::High,
                &["increase prices", "raise fees", "price increase", "fee increase"],
            ),
            mech(
                "data_restriction",
                Severity::High,
                &["proprietary format", "no export", "cannot export", "restrict export"],
            ),
            mech(
                "unilateral_pricing",
                Severity::High,
                &["sole discretion", "unilateral", "at our discretion", "right to change"],
            ),
            mech("no_sla", Severity::High, &["no sla", "no service level"]),
            // Medium severity
            mech(
                "discontinuation_risk",
                Severity::Medium,
                &["may discontinue", "right to discontinue", "may suspend"],
            ),
            mech(
                "automatic_renewal",
                Severity::Medium,
                &["auto-renew", "automatic renewal", "automatically renew"],
            ),
            mech(
                "limited_remedies",
                Severity::Medium,
                &["sole remedy", "exclusive remedy", "only remedy", "service credits only"],
            ),
            mech(
                "no_commitment",
                Severity::Medium,
                &["best effort", "no commitment", "as is"],
            ),
            mech(
                "no_guarantee",
                Severity::Medium,
                &["no guarantee", "without warranty", "no warranty"],
            ),
            // Low severity
            mech(
                "cancellation_penalty",
                Severity::Low,
                &["penalty", "forfeit", "early cancellation"],
            ),
            mech(
                "no_support_guarantee",
                Severity::Low,
                &["no support", "no obligation to support"],
            ),
            mech(
                "exit_fees",
                Severity::Low,
                &["termination fee", "early termination fee", "cancellation fee"],
            ),
            mech(
                "no_notice_changes",
                Severity::Low,
                &["without notice", "immediate effect", "no advance notice"],
            ),
            mech(
                "no_api_access",
                Severity::Low,
                &["no api", "limited api", "no programmatic access"],
            ),
            mech(
                "export_restriction",
                Severity::Low,
                &["export restriction", "limited export", "no bulk export"],
            ),
        ];

        Self::new(mechanisms).expect("builtin mechanism table is valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_exposes_severities() {
        let table = MechanismTable::builtin();
        assert_eq!(table.severity_of("unilateral_pricing"), Some(Severity::High));
        assert_eq!(table.severity_of("automatic_renewal"), Some(Severity::Medium));
        assert_eq!(table.severity_of("exit_fees"), Some(Severity::Low));
        assert_eq!(table.severity_of("arbitration"), None);
    }

    #[test]
    fn multipliers_follow_severity_bands() {
        assert_eq!(Severity::High.multiplier(), 1.0);
        assert_eq!(Severity::Medium.multiplier(), 0.7);
        assert_eq!(Severity::Low.multiplier(), 0.5);
    }

    #[test]
    fn duplicate_mechanism_names_are_rejected() {
        let dup = vec![
            Mechanism {
                name: "exit_fees".into(),
                severity: Severity::Low,
                patterns: vec!["termination fee".into()],
            },
            Mechanism {
                name: "exit_fees".into(),
                severity: Severity::High,
                patterns: vec!["cancellation fee".into()],
            },
        ];
        assert!(matches!(
            MechanismTable::new(dup),
            Err(ConfigError::DuplicateMechanism(_))
        ));
    }
}
