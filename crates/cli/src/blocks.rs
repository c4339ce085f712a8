//! Plain-text contract segmentation and vendor-id derivation.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

/// Sections shorter than this are headings or page furniture.
const MIN_SECTION_LEN: usize = 100;

/// When structural splitting finds fewer sections than this, fall back
/// to plain line-based paragraphs.
const MIN_SECTION_COUNT: usize = 5;

/// Section boundaries: blank lines, numbered headings, ALL-CAPS headings.
static SECTION_BREAK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n\s*\n+|\n\d+\.\s|\n[A-Z][A-Z\s]{3,}\n").expect("section break regex is valid")
});

/// Split raw contract text into candidate text blocks.
///
/// Tries structural markers first; when the document has too little
/// structure, falls back to treating each sufficiently long line as a
/// block. Order follows the source document.
#[must_use]
pub fn split_blocks(text: &str) -> Vec<String> {
    let sections: Vec<String> = SECTION_BREAK
        .split(text)
        .map(str::trim)
        .filter(|s| s.chars().count() > MIN_SECTION_LEN)
        .map(ToString::to_string)
        .collect();

    if sections.len() >= MIN_SECTION_COUNT {
        return sections;
    }

    let lines: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|l| l.chars().count() > MIN_SECTION_LEN)
        .map(ToString::to_string)
        .collect();

    if lines.len() > sections.len() {
        lines
    } else {
        sections
    }
}

/// Derive a vendor identifier from a contract file path.
///
/// Strips `_tos` / `_terms` suffixes from the stem, spaces out
/// underscores and hyphens, and title-cases each word, so
/// `acme_cloud_tos.txt` becomes `Acme Cloud`.
#[must_use]
pub fn vendor_id_from_path(path: &Path) -> String {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("contract");

    let stem = stem
        .strip_suffix("_tos")
        .or_else(|| stem.strip_suffix("_terms"))
        .unwrap_or(stem);

    stem.split(['_', '-'])
        .filter(|w| !w.is_empty())
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
