//! File-to-report flow over temporary contract files.

use lockscan_cli::blocks::vendor_id_from_path;
use lockscan_cli::report::assess_text;
use lockscan_engine::RiskLevel;
use lockscan_rules::{RuleSet, TemplateLibrary};
use pretty_assertions::assert_eq;
use std::fs;
use std::io::Write;

fn sample_contract() -> String {
    let sections = [
        "Service level: provider maintains 99.9% uptime measured monthly and \
         publishes availability reports. Downtime below the service level earns \
         service credit compensation as the sole remedy under this agreement.",
        "Pricing and fees for the subscription may be revised at the provider's \
         sole discretion, and updated billing rates take effect without notice \
         at the start of the next invoice period for all customer accounts.",
        "Either party may terminate with sixty days notice before the end of \
         term; early termination by customer incurs an early termination fee, \
         and the agreement will otherwise auto-renew for successive terms.",
        "Customer data export is available through the api access endpoints in \
         standard format; bulk export requests and data retrieval are completed \
         within thirty days of a written request to the provider's support team.",
        "Technical support through the help desk is offered on a best effort \
         basis with no commitment to response time; the provider may suspend \
         maintenance and updates at its discretion during any contract term.",
        "This agreement is governed by the laws of the State of New York, and \
         any dispute arising under this agreement will be resolved exclusively \
         in the state or federal courts located in New York County.",
    ];
    sections.join("\n\n")
}

#[test]
fn assessing_a_contract_file_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("acme_cloud_tos.txt");
    let mut file = fs::File::create(&path).unwrap();
    write!(file, "{}", sample_contract()).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let document_id = vendor_id_from_path(&path);
    assert_eq!(document_id, "Acme Cloud");

    let report = assess_text(
        RuleSet::builtin(),
        TemplateLibrary::builtin(),
        &document_id,
        &text,
    );

    assert_eq!(report.assessment.document_id, "Acme Cloud");
    assert!(!report.assessment.manual_review);
    assert!(report.assessment.clauses.len() >= 4);
    assert!((0.0..=100.0).contains(&report.assessment.total_score));
    assert_eq!(
        report.recommendations.len(),
        report.assessment.critical_issues.len()
    );
}

#[test]
fn a_nearly_empty_file_is_flagged_for_manual_review() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stub_terms.txt");
    fs::write(&path, "placeholder").unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let report = assess_text(
        RuleSet::builtin(),
        TemplateLibrary::builtin(),
        &vendor_id_from_path(&path),
        &text,
    );

    assert!(report.assessment.manual_review);
    assert_eq!(report.assessment.total_score, 50.0);
    assert_eq!(report.assessment.risk_level, RiskLevel::Medium);
}
