//! CSV transcript built from the local store, laid out like the server's
//! spreadsheet report: grade rows grouped by semester, a GPA row after each
//! semester and an overall row at the end.

use chrono::NaiveDate;
use csv::WriterBuilder;

use crate::core::store::GradeStore;
use crate::utils::error::{Result, TrackerError};

pub const HEADER: [&str; 5] = ["Semester", "Subject", "Credits", "Grade10", "Grade4"];

pub fn build_transcript(store: &GradeStore, exported_on: NaiveDate) -> Result<Vec<u8>> {
    if store.is_empty() {
        return Err(TrackerError::EmptyDataError);
    }

    let mut writer = WriterBuilder::new().flexible(true).from_writer(Vec::new());
    writer.write_record([
        "Exported".to_string(),
        exported_on.format("%d/%m/%Y").to_string(),
    ])?;
    writer.write_record(HEADER)?;

    for (semester, entries) in store.buckets() {
        if entries.is_empty() {
            continue;
        }

        for entry in entries {
            writer.write_record([
                semester.to_string(),
                entry.subject().to_string(),
                entry.credits().to_string(),
                entry.grade10().to_string(),
                format!("{:.1}", entry.grade4()),
            ])?;
        }

        let summary = store.semester_summary(semester);
        writer.write_record([
            format!("GPA semester {}", semester),
            String::new(),
            summary.total_credits.to_string(),
            String::new(),
            format!("{:.2}", summary.gpa),
        ])?;
    }

    let overall = store.overall_summary();
    writer.write_record([
        "Overall GPA".to_string(),
        String::new(),
        overall.total_credits.to_string(),
        String::new(),
        format!("{:.2}", overall.gpa),
    ])?;

    writer
        .into_inner()
        .map_err(|e| TrackerError::IoError(std::io::Error::other(e.to_string())))
}
