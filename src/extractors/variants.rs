// src/extractors/variants.rs

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::extractors::section;
use crate::report::models::{
    DocumentKeys, TechnicalSummaryRecord, VariantSummaryRecord, VusRecord,
};

// --- Section headings (Lazy Static) ---
static VUS_HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"VARIANTS\s+OF\s+UNCERTAIN\s+SIGNIFICANCE")
        .expect("Failed to compile VUS_HEADING_RE")
});

static TECHNICAL_HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"TECHNICAL\s+SUMMARY").expect("Failed to compile TECHNICAL_HEADING_RE")
});

// --- Row patterns (Lazy Static) ---
// One multi-group pattern per report subsection. The physical layout uses
// fixed-order tokens: an uppercase/alphanumeric gene code, a "p." protein
// change, an "NM_" transcript accession, a "c." coding change, optionally
// a "chr" locus and free-text classification, and a "VAF:" percentage.
// Character classes deliberately admit newlines inside captured spans
// (PDF text flow breaks lines mid-field); groups are cleaned afterwards.
static RESULT_ROW_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?P<variant>[A-Z0-9]+)\s*(?P<protein>p\.[^,]*),\s*(?P<transcript>NM_[^,]+?)\s*,\s*(?P<coding>c\.[\s\S]*?)\s*VAF:\s*(?P<vaf>[^%]+%)",
    )
    .expect("Failed to compile RESULT_ROW_RE")
});

// Same row shape as the result summary, but rows may carry a free-text
// "Interpretation:" block between the gene code and the protein change.
// The block is consumed, not captured.
static CLINICAL_ROW_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?P<variant>[A-Z0-9]+)\s*(?:Interpretation:[\s\S]*?)?(?P<protein>p\.[^,]*),\s*(?P<transcript>NM_[^,]+?)\s*,\s*(?P<coding>c\.[\s\S]*?)\s*VAF:\s*(?P<vaf>[^%]+%)",
    )
    .expect("Failed to compile CLINICAL_ROW_RE")
});

static VUS_ROW_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?P<variant>[A-Z0-9]+)\s*(?P<protein>p\.[^,]*),\s*(?P<transcript>NM_[^,]+?)\s*,\s*(?P<coding>c\.\S+)\s+(?P<locus>chr\S+)\s+VAF:\s*(?P<vaf>[^%]+%)",
    )
    .expect("Failed to compile VUS_ROW_RE")
});

// Technical-summary rows put the transcript accession last, after the
// free-text classification and coverage columns.
static TECHNICAL_ROW_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?P<variant>[A-Z0-9]+)\s+(?P<protein>p\.\S+)\s+(?P<coding>c\.\S+)\s+(?P<locus>chr\S+)\s+(?P<classification>[\s\S]*?)\s*VAF:\s*(?P<coverage>[\s\S]*?)\s*(?P<transcript>NM_\S+)",
    )
    .expect("Failed to compile TECHNICAL_ROW_RE")
});

/// Strips embedded line breaks from a captured span and trims it, making
/// the value usable as a single table cell.
fn clean(raw: &str) -> String {
    raw.replace('\n', "").replace('\r', "").trim().to_string()
}

fn group(caps: &Captures<'_>, name: &str) -> String {
    caps.name(name).map(|m| clean(m.as_str())).unwrap_or_default()
}

/// Extracts the result-summary variant listing from the full document.
pub fn extract_result_summary(text: &str, keys: &DocumentKeys) -> Vec<VariantSummaryRecord> {
    summary_rows(text, &RESULT_ROW_RE, keys)
}

/// Extracts the clinically-relevant-results listing from the full
/// document. Rows match even when preceded by an interpretation block.
pub fn extract_clinical_results(text: &str, keys: &DocumentKeys) -> Vec<VariantSummaryRecord> {
    summary_rows(text, &CLINICAL_ROW_RE, keys)
}

fn summary_rows(text: &str, row: &Regex, keys: &DocumentKeys) -> Vec<VariantSummaryRecord> {
    row.captures_iter(text)
        .map(|caps| VariantSummaryRecord {
            keys: keys.clone(),
            variant_name: group(&caps, "variant"),
            protein_change: group(&caps, "protein"),
            transcript: group(&caps, "transcript"),
            coding_change: group(&caps, "coding"),
            vaf: group(&caps, "vaf"),
        })
        .collect()
}

/// Extracts the variants-of-uncertain-significance listing. Rows are only
/// matched inside the span between the VUS heading and the
/// technical-summary heading; a document without the section yields no
/// records.
pub fn extract_vus(text: &str, keys: &DocumentKeys) -> Vec<VusRecord> {
    let span = section::isolate(text, &VUS_HEADING_RE, &TECHNICAL_HEADING_RE);

    VUS_ROW_RE
        .captures_iter(span)
        .map(|caps| VusRecord {
            keys: keys.clone(),
            variant_name: group(&caps, "variant"),
            protein_change: group(&caps, "protein"),
            transcript: group(&caps, "transcript"),
            coding_change: group(&caps, "coding"),
            locus: group(&caps, "locus"),
            vaf: group(&caps, "vaf"),
        })
        .collect()
}

/// Extracts the technical-summary listing from the span between the
/// technical-summary heading and the end of the document.
pub fn extract_technical_summary(text: &str, keys: &DocumentKeys) -> Vec<TechnicalSummaryRecord> {
    let span = section::isolate_to_end(text, &TECHNICAL_HEADING_RE);

    TECHNICAL_ROW_RE
        .captures_iter(span)
        .map(|caps| TechnicalSummaryRecord {
            keys: keys.clone(),
            variant_name: group(&caps, "variant"),
            protein_change: group(&caps, "protein"),
            coding_change: group(&caps, "coding"),
            locus: group(&caps, "locus"),
            classification: group(&caps, "classification"),
            coverage: group(&caps, "coverage"),
            transcript: group(&caps, "transcript"),
        })
        .collect()
}
