// src/report/models.rs
use serde::Serialize;

/// Categorical flag derived from the assay-name phrase on the report
/// header. The chronic-myeloid phrase maps to `No`, the acute-leukemia
/// phrase to `Yes`; a report carrying neither phrase has no flag at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PanelFlag {
    Yes,
    No,
}

impl PanelFlag {
    pub fn as_str(self) -> &'static str {
        match self {
            PanelFlag::Yes => "Yes",
            PanelFlag::No => "No",
        }
    }
}

/// Scalar patient/specimen attributes extracted once per report.
///
/// Every field is optional: a label that never appears in the document
/// text is a valid outcome, rendered as an empty cell on export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientRecord {
    pub patient_name: Option<String>,
    pub aml_ngs_panel: Option<PanelFlag>,
    pub patient_id: Option<String>,
    pub dob: Option<String>,
    pub sex: Option<String>,
    pub date_collected: Option<String>,
    pub date_reported: Option<String>,
    pub surg_path: Option<String>,
    pub specimen_id: Option<String>,
    pub specimen_source: Option<String>,
    pub ordering_physician: Option<String>,
    pub date_received: Option<String>,
    pub facility: Option<String>,
}

impl PatientRecord {
    /// The document-level keys copied into every variant row extracted
    /// from the same report text.
    pub fn keys(&self) -> DocumentKeys {
        DocumentKeys {
            specimen_id: self.specimen_id.clone(),
            date_collected: self.date_collected.clone(),
            date_reported: self.date_reported.clone(),
        }
    }
}

/// Specimen id plus collection/report dates, cloned once per document.
///
/// Variant rows never re-derive these from the text; they are copied from
/// the scalar record, so all rows of one document carry identical keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DocumentKeys {
    pub specimen_id: Option<String>,
    pub date_collected: Option<String>,
    pub date_reported: Option<String>,
}

/// One variant row from the result-summary or clinically-relevant
/// listings (both expose the same sub-fields).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantSummaryRecord {
    pub keys: DocumentKeys,
    pub variant_name: String,
    pub protein_change: String,
    pub transcript: String,
    pub coding_change: String,
    pub vaf: String,
}

/// One row from the variants-of-uncertain-significance section, which
/// additionally exposes the chromosome locus.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VusRecord {
    pub keys: DocumentKeys,
    pub variant_name: String,
    pub protein_change: String,
    pub transcript: String,
    pub coding_change: String,
    pub locus: String,
    pub vaf: String,
}

/// One row from the technical-summary section. The physical layout puts
/// the transcript accession last and adds free-text classification and
/// coverage columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechnicalSummaryRecord {
    pub keys: DocumentKeys,
    pub variant_name: String,
    pub protein_change: String,
    pub coding_change: String,
    pub locus: String,
    pub classification: String,
    pub coverage: String,
    pub transcript: String,
}

/// The immutable result of extracting one document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentExtraction {
    pub patient: PatientRecord,
    pub result_summary: Vec<VariantSummaryRecord>,
    pub clinical_results: Vec<VariantSummaryRecord>,
    pub vus: Vec<VusRecord>,
    pub technical_summary: Vec<TechnicalSummaryRecord>,
}

/// Batch-level accumulation across all documents of a run.
///
/// Merging preserves order: documents in input order, rows within a
/// document in match order. The exported sheets reproduce this order.
#[derive(Debug, Default)]
pub struct ReportBatch {
    pub patients: Vec<PatientRecord>,
    pub result_summary: Vec<VariantSummaryRecord>,
    pub clinical_results: Vec<VariantSummaryRecord>,
    pub vus: Vec<VusRecord>,
    pub technical_summary: Vec<TechnicalSummaryRecord>,
}

impl ReportBatch {
    /// Folds one document's extraction into the batch.
    pub fn merge(&mut self, doc: DocumentExtraction) {
        self.patients.push(doc.patient);
        self.result_summary.extend(doc.result_summary);
        self.clinical_results.extend(doc.clinical_results);
        self.vus.extend(doc.vus);
        self.technical_summary.extend(doc.technical_summary);
    }
}
