// src/extractors/fields.rs

use once_cell::sync::Lazy;
use regex::Regex;

use crate::report::models::{PanelFlag, PatientRecord};

// --- Label-anchor patterns (Lazy Static) ---
// One rule per scalar field, all in one place. Values are delimited by
// trailing whitespace, a newline, or a known next-label token ("Surg",
// "Patient", "Date Collected:") where whitespace alone would over-capture
// into the adjacent field.
static PATIENT_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Name:\s+(.*?)\s+Surg").expect("Failed to compile PATIENT_NAME_RE")
});

static PATIENT_ID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Patient\s*ID:\s+(.*?)\s+").expect("Failed to compile PATIENT_ID_RE")
});

static DOB_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"DOB:\s+(.*?)\s+").expect("Failed to compile DOB_RE"));

static SEX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Sex:\s+(.*?)\s+").expect("Failed to compile SEX_RE"));

static DATE_COLLECTED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Date\s*Collected:\s+(.*?)\s+").expect("Failed to compile DATE_COLLECTED_RE")
});

static DATE_REPORTED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Date\s*Reported:\s+(.*?)\s+").expect("Failed to compile DATE_REPORTED_RE")
});

static SURG_PATH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Surg.*Path #:\s+(.*?)\s+Patient").expect("Failed to compile SURG_PATH_RE")
});

static SPECIMEN_ID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Specimen\s*ID:\s+([^\n]+)\s+").expect("Failed to compile SPECIMEN_ID_RE")
});

static SPECIMEN_SOURCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Specimen\s*Source:\s+([^\n]+)\s+").expect("Failed to compile SPECIMEN_SOURCE_RE")
});

static ORDERING_PHYSICIAN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Ordering\s*Physician:\s+(.*?)\s*Date\s*Collected:")
        .expect("Failed to compile ORDERING_PHYSICIAN_RE")
});

static DATE_RECEIVED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Date\s*Received:\s+(.*?)\s+").expect("Failed to compile DATE_RECEIVED_RE")
});

static FACILITY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Facility:\s+([^\n]+)\s+").expect("Failed to compile FACILITY_RE")
});

// Panel flag phrases. Mutually exclusive in practice; the chronic phrase
// is tested first and wins if both somehow appear.
static CHRONIC_PANEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Chronic\s*Myeloid\s*Neoplasm\s*Next\s*Generation\s*Sequencing\s*Panel")
        .expect("Failed to compile CHRONIC_PANEL_RE")
});

static ACUTE_PANEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Acute\s*Leukemia\s*Next\s*Generation\s*Sequencing\s*Panel")
        .expect("Failed to compile ACUTE_PANEL_RE")
});

/// Applies `pattern` once to `text` and returns the first capture group,
/// trimmed. A miss is `None` - absence is a valid terminal state of the
/// match attempt, not an error.
pub fn first_capture(text: &str, pattern: &Regex) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

fn panel_flag(text: &str) -> Option<PanelFlag> {
    if CHRONIC_PANEL_RE.is_match(text) {
        return Some(PanelFlag::No);
    }
    if ACUTE_PANEL_RE.is_match(text) {
        return Some(PanelFlag::Yes);
    }
    None
}

/// Builds the patient/specimen record from flattened report text.
///
/// The field matches are independent of each other; there is no
/// cross-field validation, and any subset of them may come back empty.
pub fn extract_patient_record(text: &str) -> PatientRecord {
    PatientRecord {
        patient_name: first_capture(text, &PATIENT_NAME_RE),
        aml_ngs_panel: panel_flag(text),
        patient_id: first_capture(text, &PATIENT_ID_RE),
        dob: first_capture(text, &DOB_RE),
        sex: first_capture(text, &SEX_RE),
        date_collected: first_capture(text, &DATE_COLLECTED_RE),
        date_reported: first_capture(text, &DATE_REPORTED_RE),
        surg_path: first_capture(text, &SURG_PATH_RE),
        specimen_id: first_capture(text, &SPECIMEN_ID_RE),
        specimen_source: first_capture(text, &SPECIMEN_SOURCE_RE),
        ordering_physician: first_capture(text, &ORDERING_PHYSICIAN_RE),
        date_received: first_capture(text, &DATE_RECEIVED_RE),
        facility: first_capture(text, &FACILITY_RE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HEADER: &str = "\
Name: DOE, JANE   Surg-Path #: SP-21-0042   Patient ID: MRN-44821
DOB: 04/12/1961   Sex: F
Ordering Physician: Dr. A. Rivera Date Collected: 01/05/2021
Date Received: 01/06/2021   Date Reported: 01/10/2021
Specimen ID: S-100
Specimen Source: Bone Marrow
Facility: General Hospital
Acute Leukemia Next Generation Sequencing Panel
";

    #[test]
    fn extracts_all_scalar_fields() {
        let record = extract_patient_record(SAMPLE_HEADER);

        assert_eq!(record.patient_name.as_deref(), Some("DOE, JANE"));
        assert_eq!(record.surg_path.as_deref(), Some("SP-21-0042"));
        assert_eq!(record.patient_id.as_deref(), Some("MRN-44821"));
        assert_eq!(record.dob.as_deref(), Some("04/12/1961"));
        assert_eq!(record.sex.as_deref(), Some("F"));
        assert_eq!(record.ordering_physician.as_deref(), Some("Dr. A. Rivera"));
        assert_eq!(record.date_collected.as_deref(), Some("01/05/2021"));
        assert_eq!(record.date_received.as_deref(), Some("01/06/2021"));
        assert_eq!(record.date_reported.as_deref(), Some("01/10/2021"));
        assert_eq!(record.specimen_id.as_deref(), Some("S-100"));
        assert_eq!(record.specimen_source.as_deref(), Some("Bone Marrow"));
        assert_eq!(record.facility.as_deref(), Some("General Hospital"));
        assert_eq!(record.aml_ngs_panel, Some(PanelFlag::Yes));
    }

    #[test]
    fn missing_label_yields_absent_field() {
        let text = "Patient ID: MRN-1   Sex: M\n";
        let record = extract_patient_record(text);

        assert_eq!(record.patient_id.as_deref(), Some("MRN-1"));
        assert_eq!(record.dob, None);
        assert_eq!(record.facility, None);
    }

    #[test]
    fn panel_flag_categories() {
        let chronic = "Chronic Myeloid Neoplasm Next Generation Sequencing Panel";
        let acute = "Acute Leukemia Next Generation Sequencing Panel";

        assert_eq!(panel_flag(chronic), Some(PanelFlag::No));
        assert_eq!(panel_flag(acute), Some(PanelFlag::Yes));
        assert_eq!(panel_flag("no assay phrase here"), None);
    }

    #[test]
    fn extraction_is_deterministic() {
        let first = extract_patient_record(SAMPLE_HEADER);
        let second = extract_patient_record(SAMPLE_HEADER);
        assert_eq!(first, second);
    }

    #[test]
    fn first_capture_takes_first_occurrence_only() {
        let re = Regex::new(r"Sex:\s+(.*?)\s+").unwrap();
        let text = "Sex: F\nSex: M\n";
        assert_eq!(first_capture(text, &re).as_deref(), Some("F"));
    }
}
