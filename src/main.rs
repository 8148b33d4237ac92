// src/main.rs
mod extractors;
mod pdf;
mod report;
mod storage;
mod utils;

use std::path::PathBuf;

use clap::Parser;

use report::models::ReportBatch;
use storage::StorageManager;
use utils::AppError;

/// Command Line Interface for the NGS pathology-report extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory containing the pathology-report PDF files
    #[arg(short, long)]
    input_dir: PathBuf,

    /// Output workbook path
    #[arg(short, long, default_value = "patient_details.xlsx")]
    output: PathBuf,

    /// Skip documents whose text cannot be extracted instead of aborting
    /// the whole batch on the first unreadable one
    #[arg(long)]
    skip_unreadable: bool,
}

fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting processing for args: {:?}", args);

    // 3. Find report PDFs (sorted by name = batch input order)
    let pdf_files = pdf::find_pdf_files(&args.input_dir)?;
    if pdf_files.is_empty() {
        return Err(AppError::Config(format!(
            "No PDF files found in the directory: {}",
            args.input_dir.display()
        )));
    }
    tracing::info!("Found {} report PDF(s)", pdf_files.len());

    // 4. Initialize storage
    let storage = StorageManager::new(&args.output)?;

    // 5. Process each document in input order
    let mut batch = ReportBatch::default();
    let mut success_count = 0;
    let mut failure_count = 0;

    for pdf_file in &pdf_files {
        tracing::info!("Processing report: {}", pdf_file.display());

        let text = match pdf::extract_text(pdf_file) {
            Ok(text) => text,
            Err(e) => {
                failure_count += 1;
                if args.skip_unreadable {
                    tracing::error!("Skipping unreadable document {}: {}", pdf_file.display(), e);
                    continue;
                }
                tracing::error!("Failed to read document {}: {}", pdf_file.display(), e);
                return Err(e.into());
            }
        };

        let extraction = report::process_document(&text);
        tracing::info!(
            "Extracted {} result-summary, {} clinically-relevant, {} VUS and {} technical-summary row(s)",
            extraction.result_summary.len(),
            extraction.clinical_results.len(),
            extraction.vus.len(),
            extraction.technical_summary.len()
        );

        batch.merge(extraction);
        success_count += 1;
    }

    tracing::info!(
        "Processing finished. Success: {}, Failures: {}",
        success_count,
        failure_count
    );

    if success_count == 0 {
        return Err(AppError::Processing(format!(
            "Failed to extract text from all {} document(s)",
            failure_count
        )));
    }

    // 6. Export the batch once, after all documents are processed
    let workbook_path = storage.save_workbook(&batch)?;
    tracing::info!("Patient details written to {}", workbook_path.display());

    storage.save_run_metadata(&batch, failure_count)?;

    Ok(())
}
