use crate::category::Category;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Priority label carried by a template in the library.
///
/// This is library data, not recomputed at match time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplatePriority {
    High,
    Medium,
    Low,
}

/// Recommended negotiation language for a known lock-in issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NegotiationTemplate {
    /// Category this template addresses.
    pub category: Category,

    /// Mechanism key for exact lookup; `None` for category-generic
    /// templates that only serve as fallbacks.
    pub mechanism: Option<String>,

    /// Short issue title.
    pub issue: String,

    /// Exemplar of the problematic contract language.
    pub problematic_language: String,

    /// Recommended replacement language.
    pub recommended_language: String,

    /// Talking points, in the order they should be raised.
    pub negotiation_points: Vec<String>,

    /// Library priority label.
    pub priority: TemplatePriority,
}

/// Fixed library of negotiation templates.
///
/// Lookup is exact on (category, mechanism); per-category declaration
/// order is preserved so the first registered template serves as the
/// deterministic fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateLibrary {
    templates: Vec<NegotiationTemplate>,
}

impl TemplateLibrary {
    /// Build a library from templates in declaration order.
    #[must_use]
    pub fn new(templates: Vec<NegotiationTemplate>) -> Self {
        Self { templates }
    }

    /// Templates registered for a category, in declaration order.
    pub fn for_category(&self, category: Category) -> impl Iterator<Item = &NegotiationTemplate> {
        self.templates.iter().filter(move |t| t.category == category)
    }

    /// Exact (category, mechanism) lookup.
    #[must_use]
    pub fn lookup(&self, category: Category, mechanism: &str) -> Option<&NegotiationTemplate> {
        self.templates.iter().find(|t| {
            t.category == category && t.mechanism.as_deref() == Some(mechanism)
        })
    }

    /// First template declared for a category, the fallback choice.
    #[must_use]
    pub fn first_for(&self, category: Category) -> Option<&NegotiationTemplate> {
        self.for_category(category).next()
    }

    /// Number of templates in the library.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether the library is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// The built-in template library.
    #[must_use]
    pub fn builtin() -> &'static TemplateLibrary {
        static BUILTIN: Lazy<TemplateLibrary> = Lazy::new(builtin_library);
        &BUILTIN
    }
}

fn template(
    category: Category,
    mechanism: Option<&str>,
    issue: &str,
    problematic: &str,
    recommended: &str,
    points: &[&str],
    priority: TemplatePriority,
) -> NegotiationTemplate {
    NegotiationTemplate {
        category,
        mechanism: mechanism.map(str::to_string),
        issue: issue.to_string(),
        problematic_language: problematic.to_string(),
        recommended_language: recommended.to_string(),
        negotiation_points: points.iter().map(|p| (*p).to_string()).collect(),
        priority,
    }
}

fn builtin_library() -> TemplateLibrary {
    let templates = vec![
        template(
            Category::ServiceLevel,
            Some("no_sla"),
            "No SLA provisions",
            "Services are provided as available, without any service level commitment.",
            "Provider shall maintain 99.9% monthly uptime, measured and reported monthly, \
             with service credits of 5% of monthly fees per 0.1% below the commitment.",
            &[
                "Request a numeric uptime commitment with a defined measurement window",
                "Tie service credits to the shortfall, not a flat token amount",
                "Require monthly availability reporting",
                "Add termination rights after repeated SLA breaches",
            ],
            TemplatePriority::High,
        ),
        template(
            Category::ServiceLevel,
            Some("no_compensation"),
            "Service credits as sole remedy",
            "Service credits are customer's sole and exclusive remedy for any service failure.",
            "Service credits are in addition to, not in lieu of, other remedies available \
             to customer, including termination for material breach.",
            &[
                "Strike 'sole and exclusive remedy' language",
                "Preserve termination rights for chronic underperformance",
                "Negotiate liability carve-outs for data loss",
            ],
            TemplatePriority::High,
        ),
        template(
            Category::PricingTerms,
            Some("unilateral_pricing"),
            "Unilateral price changes",
            "Provider may modify pricing at any time at its sole discretion.",
            "Fees are fixed for the initial term; increases at renewal are capped at the \
             lesser of 5% or CPI and require 90 days' written notice.",
            &[
                "Lock pricing for the initial term",
                "Cap renewal increases at a fixed percentage or CPI",
                "Require 90 days' advance written notice of any change",
                "Add a termination-without-penalty right if increases exceed the cap",
            ],
            TemplatePriority::High,
        ),
        template(
            Category::PricingTerms,
            Some("price_increase_risk"),
            "Uncapped price increases",
            "Provider reserves the right to increase prices upon renewal.",
            "Any fee increase is capped at 5% per renewal term and must be communicated \
             at least 60 days before the renewal date.",
            &[
                "Negotiate a renewal increase cap",
                "Align the notice period with your budgeting cycle",
                "Benchmark against competing vendor pricing",
            ],
            TemplatePriority::High,
        ),
        template(
            Category::PricingTerms,
            Some("automatic_renewal"),
            "Automatic renewal with price exposure",
            "This agreement automatically renews for successive one-year terms at \
             then-current rates.",
            "Renewal requires mutual written agreement; if auto-renewal is retained, the \
             cancellation window is at least 30 days and renewal rates are capped.",
            &[
                "Convert auto-renewal to opt-in renewal",
                "Shorten the non-cancellation window",
                "Require renewal-rate notice before the opt-out deadline",
            ],
            TemplatePriority::Medium,
        ),
        template(
            Category::TerminationExit,
            Some("exit_fees"),
            "Early termination fees",
            "Customer shall pay all remaining fees for the full committed term upon early \
             termination.",
            "Early termination for convenience requires 60 days' notice and payment of no \
             more than 25% of remaining committed fees; termination for cause carries no fee.",
            &[
                "Cap early termination fees as a percentage of remaining fees",
                "Exclude termination for cause from any fee",
                "Add a fee-free termination right on SLA breach or price increase",
            ],
            TemplatePriority::High,
        ),
        template(
            Category::TerminationExit,
            Some("automatic_renewal"),
            "Auto-renewal lock-in",
            "The contract automatically renews unless cancelled 90 days in advance.",
            "The contract renews only upon written confirmation; any auto-renewal window \
             is no longer than 30 days with an email reminder 60 days before the deadline.",
            &[
                "Reduce the cancellation notice window",
                "Require the vendor to send a renewal reminder",
                "Negotiate month-to-month continuation instead of a full-term renewal",
            ],
            TemplatePriority::Medium,
        ),
        template(
            Category::TerminationExit,
            Some("cancellation_penalty"),
            "Cancellation penalties and forfeiture",
            "All prepaid fees are forfeited upon cancellation for any reason.",
            "Prepaid fees covering periods after the effective termination date are \
             refunded pro rata within 30 days.",
            &[
                "Require pro-rata refunds of prepaid fees",
                "Strike forfeiture language",
                "Define a wind-down period with continued service access",
            ],
            TemplatePriority::Medium,
        ),
        template(
            Category::DataPortability,
            Some("data_restriction"),
            "Data export restrictions",
            "Customer data may be exported only in provider's proprietary format.",
            "Customer may export all customer data at any time in documented, \
             non-proprietary formats (CSV, JSON) at no additional charge.",
            &[
                "Require export in open, documented formats",
                "Prohibit per-export charges",
                "Guarantee export availability for 90 days after termination",
                "Require deletion certification after the retrieval window",
            ],
            TemplatePriority::High,
        ),
        template(
            Category::DataPortability,
            Some("no_api_access"),
            "No programmatic data access",
            "Provider does not offer API access to customer data.",
            "Provider shall maintain a documented API permitting bulk retrieval of all \
             customer data, with rate limits no stricter than those of the web interface.",
            &[
                "Require documented bulk-export API access",
                "Pin API deprecation to a 12-month notice period",
                "Include API availability in the SLA",
            ],
            TemplatePriority::Medium,
        ),
        template(
            Category::SupportObligations,
            Some("no_support_guarantee"),
            "No support commitment",
            "Support is provided at provider's discretion with no response time commitment.",
            "Provider shall respond to severity-1 issues within 1 hour and severity-2 \
             issues within 4 business hours, with named escalation contacts.",
            &[
                "Define severity levels with response and resolution targets",
                "Attach service credits to missed response targets",
                "Name an escalation path in the contract",
            ],
            TemplatePriority::High,
        ),
        template(
            Category::SupportObligations,
            Some("discontinuation_risk"),
            "Support discontinuation risk",
            "Provider may discontinue support for any feature at any time.",
            "Provider shall support all generally-available features for the contract term \
             and give 12 months' notice before discontinuing any feature in production use.",
            &[
                "Require end-of-life notice periods",
                "Tie feature discontinuation to a termination-without-penalty right",
                "Request a feature roadmap commitment for the initial term",
            ],
            TemplatePriority::Medium,
        ),
    ];

    TemplateLibrary::new(templates)
}
