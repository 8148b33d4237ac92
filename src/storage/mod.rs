// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, Workbook, Worksheet};

use crate::report::models::{
    PatientRecord, ReportBatch, TechnicalSummaryRecord, VariantSummaryRecord, VusRecord,
};
use crate::utils::error::StorageError;

// Sheet and column names are a compatibility contract with downstream
// spreadsheet consumers and must stay verbatim.
const PATIENT_SHEET: &str = "PatientRecords";
const RESULT_SUMMARY_SHEET: &str = "ResultSummary";
const CLINICAL_SHEET: &str = "ClinicalRelevantResults";
const VUS_SHEET: &str = "VariantsOfUncertainSignificance";
const TECHNICAL_SHEET: &str = "TechnicalSummary";

const PATIENT_COLUMNS: [&str; 13] = [
    "Patient Name",
    "AML NGS Panel",
    "Patient ID",
    "Date of Birth",
    "Sex",
    "Date Collected",
    "Date Reported",
    "Surg-Path #",
    "Specimen ID",
    "Specimen Source",
    "Ordering Physician",
    "Date Received",
    "Facility",
];

const SUMMARY_COLUMNS: [&str; 8] = [
    "Specimen Id",
    "Date Collected",
    "Date Reported",
    "Variant Name",
    "p.",
    "NM_",
    "c.",
    "VAF",
];

const VUS_COLUMNS: [&str; 9] = [
    "Specimen Id",
    "Date Collected",
    "Date Reported",
    "Variant Name",
    "p.",
    "NM_",
    "c.",
    "chr",
    "VAF",
];

const TECHNICAL_COLUMNS: [&str; 10] = [
    "Specimen Id",
    "Date Collected",
    "Date Reported",
    "Variant Name",
    "p.",
    "c.",
    "chr",
    "Classification",
    "Coverage/VAF",
    "NM_",
];

pub struct StorageManager {
    output_path: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager writing to the given workbook path.
    /// Missing parent directories are created up front.
    pub fn new<P: AsRef<Path>>(output_path: P) -> Result<Self, StorageError> {
        let path = output_path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        Ok(Self { output_path: path })
    }

    /// Renders the batch into the five-sheet workbook.
    ///
    /// Row order equals batch insertion order; this method does no
    /// extraction or reordering of its own.
    pub fn save_workbook(&self, batch: &ReportBatch) -> Result<PathBuf, StorageError> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();

        write_patient_sheet(workbook.add_worksheet(), &header_format, &batch.patients)?;
        write_summary_sheet(
            workbook.add_worksheet(),
            &header_format,
            RESULT_SUMMARY_SHEET,
            &batch.result_summary,
        )?;
        write_summary_sheet(
            workbook.add_worksheet(),
            &header_format,
            CLINICAL_SHEET,
            &batch.clinical_results,
        )?;
        write_vus_sheet(workbook.add_worksheet(), &header_format, &batch.vus)?;
        write_technical_sheet(
            workbook.add_worksheet(),
            &header_format,
            &batch.technical_summary,
        )?;

        workbook.save(&self.output_path)?;
        tracing::info!("Saved workbook to {}", self.output_path.display());

        Ok(self.output_path.clone())
    }

    /// Saves a JSON summary of the run next to the workbook.
    pub fn save_run_metadata(
        &self,
        batch: &ReportBatch,
        unreadable_count: usize,
    ) -> Result<PathBuf, StorageError> {
        let file_path = self.output_path.with_extension("json");

        let metadata = serde_json::json!({
            "documents": batch.patients.len(),
            "result_summary_rows": batch.result_summary.len(),
            "clinical_relevant_rows": batch.clinical_results.len(),
            "vus_rows": batch.vus.len(),
            "technical_summary_rows": batch.technical_summary.len(),
            "unreadable_documents": unreadable_count,
            "export_timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        fs::write(&file_path, metadata_str)?;
        tracing::info!("Saved run metadata to {}", file_path.display());

        Ok(file_path)
    }
}

fn write_header(
    sheet: &mut Worksheet,
    name: &str,
    format: &Format,
    columns: &[&str],
) -> Result<(), StorageError> {
    sheet.set_name(name)?;
    for (col, title) in columns.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *title, format)?;
    }
    Ok(())
}

fn write_cells(sheet: &mut Worksheet, row: u32, cells: &[&str]) -> Result<(), StorageError> {
    for (col, value) in cells.iter().enumerate() {
        sheet.write_string(row, col as u16, *value)?;
    }
    Ok(())
}

fn cell(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

fn write_patient_sheet(
    sheet: &mut Worksheet,
    format: &Format,
    records: &[PatientRecord],
) -> Result<(), StorageError> {
    write_header(sheet, PATIENT_SHEET, format, &PATIENT_COLUMNS)?;

    for (i, rec) in records.iter().enumerate() {
        let panel = rec.aml_ngs_panel.map(|flag| flag.as_str()).unwrap_or("");
        let cells: [&str; 13] = [
            cell(&rec.patient_name),
            panel,
            cell(&rec.patient_id),
            cell(&rec.dob),
            cell(&rec.sex),
            cell(&rec.date_collected),
            cell(&rec.date_reported),
            cell(&rec.surg_path),
            cell(&rec.specimen_id),
            cell(&rec.specimen_source),
            cell(&rec.ordering_physician),
            cell(&rec.date_received),
            cell(&rec.facility),
        ];
        write_cells(sheet, (i + 1) as u32, &cells)?;
    }

    Ok(())
}

fn write_summary_sheet(
    sheet: &mut Worksheet,
    format: &Format,
    name: &str,
    records: &[VariantSummaryRecord],
) -> Result<(), StorageError> {
    write_header(sheet, name, format, &SUMMARY_COLUMNS)?;

    for (i, rec) in records.iter().enumerate() {
        let cells: [&str; 8] = [
            cell(&rec.keys.specimen_id),
            cell(&rec.keys.date_collected),
            cell(&rec.keys.date_reported),
            &rec.variant_name,
            &rec.protein_change,
            &rec.transcript,
            &rec.coding_change,
            &rec.vaf,
        ];
        write_cells(sheet, (i + 1) as u32, &cells)?;
    }

    Ok(())
}

fn write_vus_sheet(
    sheet: &mut Worksheet,
    format: &Format,
    records: &[VusRecord],
) -> Result<(), StorageError> {
    write_header(sheet, VUS_SHEET, format, &VUS_COLUMNS)?;

    for (i, rec) in records.iter().enumerate() {
        let cells: [&str; 9] = [
            cell(&rec.keys.specimen_id),
            cell(&rec.keys.date_collected),
            cell(&rec.keys.date_reported),
            &rec.variant_name,
            &rec.protein_change,
            &rec.transcript,
            &rec.coding_change,
            &rec.locus,
            &rec.vaf,
        ];
        write_cells(sheet, (i + 1) as u32, &cells)?;
    }

    Ok(())
}

fn write_technical_sheet(
    sheet: &mut Worksheet,
    format: &Format,
    records: &[TechnicalSummaryRecord],
) -> Result<(), StorageError> {
    write_header(sheet, TECHNICAL_SHEET, format, &TECHNICAL_COLUMNS)?;

    for (i, rec) in records.iter().enumerate() {
        let cells: [&str; 10] = [
            cell(&rec.keys.specimen_id),
            cell(&rec.keys.date_collected),
            cell(&rec.keys.date_reported),
            &rec.variant_name,
            &rec.protein_change,
            &rec.coding_change,
            &rec.locus,
            &rec.classification,
            &rec.coverage,
            &rec.transcript,
        ];
        write_cells(sheet, (i + 1) as u32, &cells)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report;
    use crate::report::models::ReportBatch;

    #[test]
    fn writes_workbook_and_metadata_files() {
        let text = "Specimen ID: S-100   Date Collected: 2021-01-05   Date Reported: 2021-01-10\n\
                    EGFR p.L858R, NM_005228, c.2573T>A VAF: 12%\n";
        let mut batch = ReportBatch::default();
        batch.merge(report::process_document(text));

        let dir = std::env::temp_dir().join("ngs_extractor_storage_test");
        let output = dir.join("patient_details.xlsx");
        let storage = StorageManager::new(&output).unwrap();

        let workbook_path = storage.save_workbook(&batch).unwrap();
        let metadata_path = storage.save_run_metadata(&batch, 0).unwrap();

        assert!(workbook_path.exists());
        assert!(metadata_path.exists());

        let metadata: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&metadata_path).unwrap()).unwrap();
        assert_eq!(metadata["documents"], 1);
        assert_eq!(metadata["result_summary_rows"], 1);

        fs::remove_dir_all(&dir).ok();
    }
}
