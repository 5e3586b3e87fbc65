//! Pure projection of the grade store into what the page displays.
//!
//! Nothing here reads back from a view; re-rendering after every mutation
//! is how the displayed GPA stays in step with the store.

use std::collections::HashMap;
use std::fmt::Write;

use crate::core::gpa::{format_gpa, GpaSummary};
use crate::core::store::GradeStore;
use crate::domain::model::{GradeEntry, Semester, SubjectId};

pub const TOTAL_GPA_ID: &str = "totalGPA";
pub const TOTAL_CREDITS_ID: &str = "totalCredits";
pub const TOTAL_RESULT_ID: &str = "totalGPAResult";

/// Element ids of one semester section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemesterIds {
    pub subject_input: String,
    pub credits_input: String,
    pub grade_input: String,
    pub rows: String,
    pub gpa: String,
}

impl SemesterIds {
    pub fn for_semester(semester: Semester) -> Self {
        Self {
            subject_input: format!("subject-{}", semester),
            credits_input: format!("credits-{}", semester),
            grade_input: format!("grade-{}", semester),
            rows: format!("grades-{}", semester),
            gpa: format!("gpa-{}", semester),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub subject: String,
    pub credits: String,
    pub grade10: String,
    pub grade4: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemesterView {
    pub semester: Semester,
    pub ids: SemesterIds,
    pub rows: Vec<RowView>,
    pub gpa: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotalView {
    pub gpa: String,
    pub credits: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub semesters: Vec<SemesterView>,
    /// `None` keeps `#totalGPAResult` hidden.
    pub total: Option<TotalView>,
}

impl PageView {
    pub fn semester(&self, semester: Semester) -> Option<&SemesterView> {
        self.semesters.iter().find(|s| s.semester == semester)
    }
}

pub fn render_row(entry: &GradeEntry, subject_names: &HashMap<SubjectId, String>) -> RowView {
    let subject = subject_names
        .get(entry.subject())
        .cloned()
        .unwrap_or_else(|| entry.subject().to_string());

    RowView {
        subject,
        credits: entry.credits().to_string(),
        grade10: format!("{:.1}", entry.grade10()),
        grade4: format!("{:.1}", entry.grade4()),
    }
}

pub fn render_total(summary: &GpaSummary) -> TotalView {
    TotalView {
        gpa: format!("{:.2}", summary.gpa),
        credits: summary.total_credits.to_string(),
    }
}

pub fn render(
    store: &GradeStore,
    subject_names: &HashMap<SubjectId, String>,
    total: Option<&GpaSummary>,
) -> PageView {
    let semesters = store
        .buckets()
        .map(|(semester, entries)| SemesterView {
            semester,
            ids: SemesterIds::for_semester(semester),
            rows: entries
                .iter()
                .map(|entry| render_row(entry, subject_names))
                .collect(),
            gpa: format_gpa(&store.semester_summary(semester)),
        })
        .collect();

    PageView {
        semesters,
        total: total.map(render_total),
    }
}

/// Plain-text layout of a page for terminals.
pub fn to_text(page: &PageView) -> String {
    let mut out = String::new();

    for section in &page.semesters {
        let _ = writeln!(out, "Semester {}  (GPA {})", section.semester, section.gpa);
        if section.rows.is_empty() {
            let _ = writeln!(out, "  (no grades)");
        }
        for (index, row) in section.rows.iter().enumerate() {
            let _ = writeln!(
                out,
                "  [{}] {:<24} {:>6} cr  {:>5} / 10  {:>4} / 4",
                index, row.subject, row.credits, row.grade10, row.grade4
            );
        }
    }

    if let Some(total) = &page.total {
        let _ = writeln!(
            out,
            "Overall GPA {} over {} credits",
            total.gpa, total.credits
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::SubjectId;

    fn store() -> GradeStore {
        let mut store = GradeStore::with_semesters([Semester(1), Semester(2)]);
        store.append(
            Semester(1),
            GradeEntry::new(SubjectId::new("MATH101"), 3.0, 8.7),
        );
        store.append(
            Semester(1),
            GradeEntry::new(SubjectId::new("PHY101"), 2.0, 7.5),
        );
        store
    }

    #[test]
    fn test_semester_ids() {
        let ids = SemesterIds::for_semester(Semester(3));
        assert_eq!(ids.subject_input, "subject-3");
        assert_eq!(ids.credits_input, "credits-3");
        assert_eq!(ids.grade_input, "grade-3");
        assert_eq!(ids.rows, "grades-3");
        assert_eq!(ids.gpa, "gpa-3");
        assert_eq!(
            [TOTAL_GPA_ID, TOTAL_CREDITS_ID, TOTAL_RESULT_ID],
            ["totalGPA", "totalCredits", "totalGPAResult"]
        );
    }

    #[test]
    fn test_render_rows_and_gpa() {
        let mut names = HashMap::new();
        names.insert(SubjectId::new("MATH101"), "Calculus".to_string());

        let page = render(&store(), &names, None);
        let first = page.semester(Semester(1)).unwrap();

        assert_eq!(first.rows.len(), 2);
        assert_eq!(
            first.rows[0],
            RowView {
                subject: "Calculus".to_string(),
                credits: "3".to_string(),
                grade10: "8.7".to_string(),
                grade4: "4.0".to_string(),
            }
        );
        assert_eq!(first.rows[1].subject, "PHY101");
        assert_eq!(first.gpa, "3.60");

        let second = page.semester(Semester(2)).unwrap();
        assert!(second.rows.is_empty());
        assert_eq!(second.gpa, "0");
        assert!(page.total.is_none());
    }

    #[test]
    fn test_render_total_and_text() {
        let store = store();
        let summary = store.overall_summary();
        let page = render(&store, &HashMap::new(), Some(&summary));

        assert_eq!(
            page.total,
            Some(TotalView {
                gpa: "3.60".to_string(),
                credits: "5".to_string(),
            })
        );

        let text = to_text(&page);
        assert!(text.contains("Semester 1  (GPA 3.60)"));
        assert!(text.contains("Semester 2  (GPA 0)"));
        assert!(text.contains("Overall GPA 3.60 over 5 credits"));
    }
}
