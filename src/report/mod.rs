// src/report/mod.rs
pub mod models;

use crate::extractors::{fields, variants};
use models::DocumentExtraction;

/// Runs the full extraction cascade over one document's flattened text.
///
/// The scalar record is extracted first; its specimen id and dates are
/// then copied into every variant row, so all rows of a document carry
/// the keys of that same document by construction. Extraction is pure:
/// the same text always yields the same result, and a document with no
/// recognizable fields or rows yields an all-empty result rather than an
/// error.
pub fn process_document(text: &str) -> DocumentExtraction {
    let patient = fields::extract_patient_record(text);
    let keys = patient.keys();

    DocumentExtraction {
        result_summary: variants::extract_result_summary(text, &keys),
        clinical_results: variants::extract_clinical_results(text, &keys),
        vus: variants::extract_vus(text, &keys),
        technical_summary: variants::extract_technical_summary(text, &keys),
        patient,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::ReportBatch;

    const DOC_A: &str = "\
Name: DOE, JANE   Surg-Path #: SP-21-0042   Patient ID: MRN-44821
Specimen ID: A-1
Date Collected: 2021-01-05   Date Reported: 2021-01-10
RESULT SUMMARY
EGFR p.L858R, NM_005228, c.2573T>A VAF: 12%
KRAS p.G12D, NM_004985, c.35G>A VAF: 8%
";

    const DOC_B: &str = "\
Name: ROE, RICHARD   Surg-Path #: SP-21-0077   Patient ID: MRN-90155
Specimen ID: B-1
Date Collected: 2021-02-01   Date Reported: 2021-02-06
No reportable variants were identified in this specimen.
";

    #[test]
    fn variant_rows_carry_the_document_scalar_keys() {
        let extraction = process_document(DOC_A);
        let expected = extraction.patient.keys();

        assert_eq!(expected.specimen_id.as_deref(), Some("A-1"));
        for rec in &extraction.result_summary {
            assert_eq!(rec.keys, expected);
        }
        for rec in &extraction.clinical_results {
            assert_eq!(rec.keys, expected);
        }
    }

    #[test]
    fn processing_is_deterministic() {
        assert_eq!(process_document(DOC_A), process_document(DOC_A));
    }

    #[test]
    fn batch_preserves_document_order_and_match_order() {
        let mut batch = ReportBatch::default();
        batch.merge(process_document(DOC_A));
        batch.merge(process_document(DOC_B));

        assert_eq!(batch.patients.len(), 2);
        assert_eq!(batch.patients[0].specimen_id.as_deref(), Some("A-1"));
        assert_eq!(batch.patients[1].specimen_id.as_deref(), Some("B-1"));

        // Doc A contributes both rows in match order; doc B contributes none.
        assert_eq!(batch.result_summary.len(), 2);
        assert_eq!(batch.result_summary[0].variant_name, "EGFR");
        assert_eq!(batch.result_summary[1].variant_name, "KRAS");
        assert!(batch
            .result_summary
            .iter()
            .all(|rec| rec.keys.specimen_id.as_deref() == Some("A-1")));
    }

    #[test]
    fn document_without_sections_yields_empty_variant_lists() {
        let extraction = process_document(DOC_B);

        assert!(extraction.result_summary.is_empty());
        assert!(extraction.vus.is_empty());
        assert!(extraction.technical_summary.is_empty());
        assert_eq!(extraction.patient.specimen_id.as_deref(), Some("B-1"));
    }
}
