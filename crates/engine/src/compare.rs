use crate::error::{EngineError, Result};
use crate::types::{Assessment, Comparison, MatrixRow, RankedVendor, RiskDistribution, RiskLevel};
use lockscan_rules::Category;
use std::cmp::Ordering;

/// Default size of the worst-vendors short list.
pub const DEFAULT_WORST_LIMIT: usize = 3;

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn by_score_then_id(a: &RankedVendor, b: &RankedVendor) -> Ordering {
    a.total_score
        .partial_cmp(&b.total_score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.document_id.cmp(&b.document_id))
}

/// Rank N assessed documents against each other.
///
/// Requires at least two assessments. Pure function of its inputs:
/// the result is identical under any reordering of `assessments`
/// (ties break on document id).
pub fn compare(assessments: &[Assessment], worst_limit: usize) -> Result<Comparison> {
    if assessments.len() < 2 {
        return Err(EngineError::InsufficientInput(assessments.len()));
    }

    let mut ranked: Vec<RankedVendor> = assessments
        .iter()
        .map(|a| RankedVendor {
            document_id: a.document_id.clone(),
            total_score: a.total_score,
            risk_level: a.risk_level,
        })
        .collect();
    ranked.sort_by(by_score_then_id);

    let mut distribution = RiskDistribution::default();
    for assessment in assessments {
        match assessment.risk_level {
            RiskLevel::Low => distribution.low += 1,
            RiskLevel::Medium => distribution.medium += 1,
            RiskLevel::High => distribution.high += 1,
        }
    }

    let average_score = round1(
        assessments.iter().map(|a| a.total_score).sum::<f64>() / assessments.len() as f64,
    );

    // Worst list: highest-scoring High-risk vendors only; shorter than
    // the limit when fewer qualify, never padded with Medium vendors.
    let mut worst: Vec<RankedVendor> = ranked
        .iter()
        .filter(|v| v.risk_level == RiskLevel::High)
        .cloned()
        .collect();
    worst.sort_by(|a, b| by_score_then_id(b, a));
    worst.truncate(worst_limit);

    let matrix: Vec<MatrixRow> = ranked
        .iter()
        .map(|vendor| {
            let assessment = assessments
                .iter()
                .find(|a| a.document_id == vendor.document_id)
                .expect("ranked vendor originates from assessments");
            MatrixRow {
                document_id: vendor.document_id.clone(),
                scores: Category::ALL
                    .into_iter()
                    .map(|c| assessment.category_score(c).raw)
                    .collect(),
            }
        })
        .collect();

    let category_averages: Vec<f64> = Category::ALL
        .into_iter()
        .map(|category| {
            let sum: f64 = assessments
                .iter()
                .map(|a| a.category_score(category).raw)
                .sum();
            round1(sum / assessments.len() as f64)
        })
        .collect();

    log::info!(
        "compared {} vendors: best {}, average {average_score:.1}",
        assessments.len(),
        ranked[0].document_id
    );

    Ok(Comparison {
        vendor_count: assessments.len(),
        average_score,
        distribution,
        ranked,
        worst,
        matrix,
        category_averages,
    })
}
