use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

use crate::core::scale::to_four_point;

/// Academic term. Matches the `data-semester` attribute of a semester form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Semester(pub u32);

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId(pub String);

impl SubjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One item of `GET /api/subjects`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
}

/// A grade held in a semester bucket.
///
/// `grade4` is derived from `grade10` at construction and cannot be set on
/// its own, so the two scales never disagree.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeEntry {
    subject: SubjectId,
    credits: f64,
    grade10: f64,
    grade4: f64,
}

impl GradeEntry {
    pub fn new(subject: SubjectId, credits: f64, grade10: f64) -> Self {
        Self {
            subject,
            credits,
            grade10,
            grade4: to_four_point(grade10),
        }
    }

    pub fn subject(&self) -> &SubjectId {
        &self.subject
    }

    pub fn credits(&self) -> f64 {
        self.credits
    }

    pub fn grade10(&self) -> f64 {
        self.grade10
    }

    pub fn grade4(&self) -> f64 {
        self.grade4
    }

    pub fn to_record(&self, semester: Semester) -> GradeRecord {
        GradeRecord {
            id: None,
            semester,
            subject: self.subject.clone(),
            credits: self.credits,
            grade10: self.grade10,
            grade4: self.grade4,
        }
    }
}

/// Wire shape of a grade: the `POST /api/grades` body and the items of
/// `GET /api/grades`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub semester: Semester,
    pub subject: SubjectId,
    pub credits: f64,
    pub grade10: f64,
    pub grade4: f64,
}

impl From<GradeRecord> for GradeEntry {
    /// The server's `grade4` is discarded and recomputed.
    fn from(record: GradeRecord) -> Self {
        GradeEntry::new(record.subject, record.credits, record.grade10)
    }
}

/// Raw text of the three inputs of a semester form, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub subject: String,
    pub credits: String,
    pub grade10: String,
}

impl FormInput {
    pub fn new(
        subject: impl Into<String>,
        credits: impl Into<String>,
        grade10: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            credits: credits.into(),
            grade10: grade10.into(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.subject.is_empty() && self.credits.is_empty() && self.grade10.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// Transient user-visible message.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub raised_at: Instant,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_derives_grade4() {
        let entry = GradeEntry::new(SubjectId::new("Math"), 3.0, 8.7);
        assert_eq!(entry.grade4(), 4.0);
        assert_eq!(entry.credits(), 3.0);
        assert_eq!(entry.subject().as_str(), "Math");
    }

    #[test]
    fn test_record_body_shape() {
        let entry = GradeEntry::new(SubjectId::new("Math"), 3.0, 8.7);
        let body = serde_json::to_value(entry.to_record(Semester(1))).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "semester": 1,
                "subject": "Math",
                "credits": 3.0,
                "grade10": 8.7,
                "grade4": 4.0
            })
        );
    }

    #[test]
    fn test_record_from_server_recomputes_grade4() {
        let record: GradeRecord = serde_json::from_value(serde_json::json!({
            "id": 7,
            "semester": 2,
            "subject": "PHY101",
            "credits": 2,
            "grade10": 7.2,
            "grade4": 1.0
        }))
        .unwrap();
        assert_eq!(record.id, Some(7));

        let entry = GradeEntry::from(record);
        assert_eq!(entry.grade4(), 3.0);
    }
}
