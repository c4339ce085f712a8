use crate::types::{Assessment, Recommendation};
use lockscan_rules::TemplateLibrary;

/// Maps critical issues to entries in the negotiation template library.
pub struct TemplateMatcher<'a> {
    library: &'a TemplateLibrary,
}

impl<'a> TemplateMatcher<'a> {
    /// Create a matcher over an immutable template library.
    #[must_use]
    pub fn new(library: &'a TemplateLibrary) -> Self {
        Self { library }
    }

    /// Produce one recommendation per critical issue, in issue order.
    ///
    /// Matching is an exact (category, mechanism) lookup over the
    /// issue's mechanisms in recorded order; when none matches, the
    /// category's first declared template is the fallback. Issues whose
    /// category has no templates at all are surfaced with no template,
    /// never dropped.
    pub fn match_templates(&self, assessment: &Assessment) -> Vec<Recommendation> {
        assessment
            .critical_issues
            .iter()
            .map(|issue| {
                let exact = issue
                    .mechanisms
                    .iter()
                    .find_map(|m| self.library.lookup(issue.category, m));
                let template = exact.or_else(|| self.library.first_for(issue.category));

                if template.is_none() {
                    log::debug!(
                        "no template registered for category {}",
                        issue.category
                    );
                }

                Recommendation {
                    issue: issue.clone(),
                    template: template.cloned(),
                }
            })
            .collect()
    }
}
