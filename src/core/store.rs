use std::collections::BTreeMap;

use crate::core::gpa::{summarize, GpaSummary};
use crate::domain::model::{GradeEntry, Semester};

/// Semester → ordered grade entries. The only source of truth for what the
/// page shows; GPAs are computed from it on demand and never cached.
#[derive(Debug, Clone, Default)]
pub struct GradeStore {
    buckets: BTreeMap<Semester, Vec<GradeEntry>>,
}

impl GradeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with an empty bucket for each semester, so every section
    /// renders even before it has grades.
    pub fn with_semesters(semesters: impl IntoIterator<Item = Semester>) -> Self {
        Self {
            buckets: semesters.into_iter().map(|s| (s, Vec::new())).collect(),
        }
    }

    pub fn append(&mut self, semester: Semester, entry: GradeEntry) {
        self.buckets.entry(semester).or_default().push(entry);
    }

    /// Removes the entry at `index` of the semester's bucket.
    pub fn remove(&mut self, semester: Semester, index: usize) -> Option<GradeEntry> {
        let bucket = self.buckets.get_mut(&semester)?;
        if index < bucket.len() {
            Some(bucket.remove(index))
        } else {
            None
        }
    }

    pub fn bucket(&self, semester: Semester) -> &[GradeEntry] {
        self.buckets
            .get(&semester)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn semesters(&self) -> impl Iterator<Item = Semester> + '_ {
        self.buckets.keys().copied()
    }

    pub fn buckets(&self) -> impl Iterator<Item = (Semester, &[GradeEntry])> {
        self.buckets.iter().map(|(s, entries)| (*s, entries.as_slice()))
    }

    /// Union of all buckets, in semester order.
    pub fn entries(&self) -> impl Iterator<Item = &GradeEntry> {
        self.buckets.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn semester_summary(&self, semester: Semester) -> GpaSummary {
        summarize(self.bucket(semester))
    }

    pub fn overall_summary(&self) -> GpaSummary {
        summarize(self.entries())
    }

    /// Drops every entry while keeping the semester sections.
    pub fn clear(&mut self) {
        for bucket in self.buckets.values_mut() {
            bucket.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::SubjectId;

    fn entry(subject: &str, credits: f64, grade10: f64) -> GradeEntry {
        GradeEntry::new(SubjectId::new(subject), credits, grade10)
    }

    #[test]
    fn test_append_keeps_order() {
        let mut store = GradeStore::with_semesters([Semester(1), Semester(2)]);
        store.append(Semester(1), entry("Math", 3.0, 8.7));
        store.append(Semester(1), entry("Physics", 2.0, 7.5));

        let subjects: Vec<_> = store
            .bucket(Semester(1))
            .iter()
            .map(|e| e.subject().as_str())
            .collect();
        assert_eq!(subjects, vec!["Math", "Physics"]);
        assert!(store.bucket(Semester(2)).is_empty());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut store = GradeStore::with_semesters([Semester(1)]);
        store.append(Semester(1), entry("Math", 3.0, 8.7));

        assert!(store.remove(Semester(1), 3).is_none());
        assert!(store.remove(Semester(9), 0).is_none());
        assert_eq!(store.remove(Semester(1), 0).unwrap().subject().as_str(), "Math");
        assert!(store.is_empty());
        assert_eq!(store.semester_summary(Semester(1)).gpa, 0.0);
    }

    #[test]
    fn test_summaries() {
        let mut store = GradeStore::with_semesters([Semester(1), Semester(2)]);
        store.append(Semester(1), entry("Math", 3.0, 8.7));
        store.append(Semester(2), entry("Physics", 2.0, 7.5));

        assert_eq!(store.semester_summary(Semester(1)).gpa, 4.0);
        assert_eq!(store.semester_summary(Semester(2)).gpa, 3.0);

        let overall = store.overall_summary();
        assert_eq!(overall.gpa, 3.6);
        assert_eq!(overall.total_credits, 5.0);
    }

    #[test]
    fn test_clear_keeps_sections() {
        let mut store = GradeStore::with_semesters([Semester(1), Semester(2)]);
        store.append(Semester(2), entry("Math", 3.0, 8.7));
        store.clear();

        assert!(store.is_empty());
        assert_eq!(store.semesters().count(), 2);
    }
}
