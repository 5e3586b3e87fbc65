//! Command dispatch for the grade entry page.
//!
//! Every user action is a [`Command`]. Failures never escape `dispatch`:
//! they become an error notification plus an [`Outcome::Failed`], and the
//! store is left exactly as it was.

use std::collections::{BTreeMap, HashMap};

use chrono::Local;

use crate::core::gpa::GpaSummary;
use crate::core::notify::Notifier;
use crate::core::render::{self, PageView};
use crate::core::store::GradeStore;
use crate::core::transcript::build_transcript;
use crate::domain::model::{FormInput, GradeEntry, GradeRecord, Semester, Subject, SubjectId};
use crate::domain::ports::{ConfigProvider, GradeApi, Storage};
use crate::utils::error::{ErrorKind, Result, TrackerError};
use crate::utils::validation::{
    parse_non_negative_number, parse_positive_number, validate_non_empty_string,
};

pub const MSG_INVALID_FORM: &str = "Please fill in all fields";
pub const MSG_GRADE_ADDED: &str = "Grade added successfully";
pub const MSG_SAVE_FAILED: &str = "Failed to save grade";
pub const MSG_GRADE_DELETED: &str = "Grade deleted";
pub const MSG_NO_DATA: &str = "No grade data yet";
pub const MSG_SUBJECTS_FAILED: &str = "Failed to load subject list";
pub const MSG_EXPORTED: &str = "Excel file exported successfully";
pub const MSG_EXPORT_FAILED: &str = "Failed to export Excel file";
pub const MSG_TRANSCRIPT_SAVED: &str = "Transcript saved";
pub const MSG_TRANSCRIPT_FAILED: &str = "Failed to save transcript";
pub const MSG_SYNCED: &str = "Grades loaded from server";
pub const MSG_SYNC_FAILED: &str = "Failed to load grades from server";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormState {
    #[default]
    Idle,
    Validating,
    Submitting,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Submit { semester: Semester, input: FormInput },
    /// Removes a row locally. Nothing happens unless `confirmed` is set.
    Delete {
        semester: Semester,
        index: usize,
        confirmed: bool,
    },
    ComputeAggregate,
    LoadSubjects,
    Sync,
    ExportReport,
    ExportTranscript,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Submitted { semester: Semester, gpa: GpaSummary },
    Deleted {
        semester: Semester,
        entry: GradeEntry,
        gpa: GpaSummary,
    },
    Cancelled,
    Aggregated(GpaSummary),
    SubjectsLoaded(usize),
    Synced(usize),
    Exported(String),
    Failed { kind: ErrorKind, message: String },
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed { .. })
    }
}

/// A validated entry whose persistence call has not resolved yet.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSubmission {
    pub semester: Semester,
    pub entry: GradeEntry,
}

impl PendingSubmission {
    pub fn record(&self) -> GradeRecord {
        self.entry.to_record(self.semester)
    }
}

#[derive(Debug, Clone, Default)]
struct FormSlot {
    state: FormState,
    in_flight: usize,
    draft: FormInput,
}

pub struct GradeEntryCoordinator<A: GradeApi, S: Storage, C: ConfigProvider> {
    api: A,
    storage: S,
    config: C,
    store: GradeStore,
    forms: BTreeMap<Semester, FormSlot>,
    subjects: Vec<Subject>,
    total: Option<GpaSummary>,
    notifier: Notifier,
}

impl<A: GradeApi, S: Storage, C: ConfigProvider> GradeEntryCoordinator<A, S, C> {
    pub fn new(
        api: A,
        storage: S,
        config: C,
        semesters: impl IntoIterator<Item = Semester>,
        notifier: Notifier,
    ) -> Self {
        let store = GradeStore::with_semesters(semesters);
        let forms = store.semesters().map(|s| (s, FormSlot::default())).collect();
        Self {
            api,
            storage,
            config,
            store,
            forms,
            subjects: Vec::new(),
            total: None,
            notifier,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn store(&self) -> &GradeStore {
        &self.store
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut Notifier {
        &mut self.notifier
    }

    pub fn form_state(&self, semester: Semester) -> Option<FormState> {
        self.forms.get(&semester).map(|slot| slot.state)
    }

    pub fn draft(&self, semester: Semester) -> Option<&FormInput> {
        self.forms.get(&semester).map(|slot| &slot.draft)
    }

    /// Current page, rendered from the store.
    pub fn page(&self) -> PageView {
        let names: HashMap<SubjectId, String> = self
            .subjects
            .iter()
            .map(|s| (s.id.clone(), s.name.clone()))
            .collect();
        render::render(&self.store, &names, self.total.as_ref())
    }

    pub async fn dispatch(&mut self, command: Command) -> Outcome {
        tracing::debug!("Dispatching {:?}", command);
        match command {
            Command::Submit { semester, input } => self.submit(semester, input).await,
            Command::Delete {
                semester,
                index,
                confirmed,
            } => self.delete(semester, index, confirmed),
            Command::ComputeAggregate => self.compute_aggregate(),
            Command::LoadSubjects => self.load_subjects().await,
            Command::Sync => self.sync().await,
            Command::ExportReport => self.export_report().await,
            Command::ExportTranscript => self.export_transcript().await,
        }
    }

    async fn submit(&mut self, semester: Semester, input: FormInput) -> Outcome {
        let pending = match self.begin_submit(semester, input) {
            Ok(pending) => pending,
            Err(outcome) => return outcome,
        };
        let result = self.api.submit_grade(&pending.record()).await;
        self.complete_submit(pending, result)
    }

    /// Validates the form and converts the grade. On success the semester's
    /// form is left in `Submitting` until [`Self::complete_submit`] runs.
    pub fn begin_submit(
        &mut self,
        semester: Semester,
        input: FormInput,
    ) -> std::result::Result<PendingSubmission, Outcome> {
        let Some(slot) = self.forms.get_mut(&semester) else {
            let err = TrackerError::validation(format!("Unknown semester {}", semester));
            return Err(self.fail(err, MSG_INVALID_FORM));
        };

        slot.state = FormState::Validating;
        slot.draft = input;

        match Self::validate_form(&slot.draft) {
            Ok(entry) => {
                slot.state = FormState::Submitting;
                slot.in_flight += 1;
                tracing::debug!(
                    "Semester {}: {} ({} credits) {} -> {}",
                    semester,
                    entry.subject(),
                    entry.credits(),
                    entry.grade10(),
                    entry.grade4()
                );
                Ok(PendingSubmission { semester, entry })
            }
            Err(err) => {
                slot.state = if slot.in_flight > 0 {
                    FormState::Submitting
                } else {
                    FormState::Idle
                };
                Err(self.fail(err, MSG_INVALID_FORM))
            }
        }
    }

    /// Applies the persistence result. Only a successful call touches the
    /// store.
    pub fn complete_submit(&mut self, pending: PendingSubmission, result: Result<()>) -> Outcome {
        let PendingSubmission { semester, entry } = pending;

        if let Some(slot) = self.forms.get_mut(&semester) {
            slot.in_flight = slot.in_flight.saturating_sub(1);
            if slot.in_flight == 0 {
                slot.state = FormState::Idle;
            }
        }

        match result {
            Ok(()) => {
                self.store.append(semester, entry);
                if let Some(slot) = self.forms.get_mut(&semester) {
                    slot.draft = FormInput::default();
                }
                let gpa = self.store.semester_summary(semester);
                tracing::info!("Semester {} GPA is now {:.2}", semester, gpa.gpa);
                self.notifier.success(MSG_GRADE_ADDED);
                Outcome::Submitted { semester, gpa }
            }
            Err(err) => self.fail(err, MSG_SAVE_FAILED),
        }
    }

    fn validate_form(input: &FormInput) -> Result<GradeEntry> {
        validate_non_empty_string("Subject", &input.subject)?;
        let credits = parse_positive_number("Credits", &input.credits)?;
        let grade10 = parse_non_negative_number("Grade", &input.grade10)?;
        Ok(GradeEntry::new(
            SubjectId::new(input.subject.trim()),
            credits,
            grade10,
        ))
    }

    fn delete(&mut self, semester: Semester, index: usize, confirmed: bool) -> Outcome {
        if !confirmed {
            return Outcome::Cancelled;
        }

        // Local only; the backend keeps its copy.
        match self.store.remove(semester, index) {
            Some(entry) => {
                let gpa = self.store.semester_summary(semester);
                tracing::info!(
                    "Removed {} from semester {}, GPA is now {:.2}",
                    entry.subject(),
                    semester,
                    gpa.gpa
                );
                self.notifier.success(MSG_GRADE_DELETED);
                Outcome::Deleted {
                    semester,
                    entry,
                    gpa,
                }
            }
            None => {
                let err = TrackerError::validation(format!(
                    "Semester {} has no row {}",
                    semester, index
                ));
                self.fail(err, MSG_INVALID_FORM)
            }
        }
    }

    fn compute_aggregate(&mut self) -> Outcome {
        if self.store.is_empty() {
            return self.fail(TrackerError::EmptyDataError, MSG_NO_DATA);
        }

        let summary = self.store.overall_summary();
        tracing::info!(
            "Overall GPA {:.2} over {} credits ({} grades)",
            summary.gpa,
            summary.total_credits,
            summary.entries
        );
        self.total = Some(summary);
        Outcome::Aggregated(summary)
    }

    async fn load_subjects(&mut self) -> Outcome {
        match self.api.fetch_subjects().await {
            Ok(subjects) => {
                tracing::info!("Loaded {} subjects", subjects.len());
                self.subjects = subjects;
                Outcome::SubjectsLoaded(self.subjects.len())
            }
            Err(err) => self.fail(err, MSG_SUBJECTS_FAILED),
        }
    }

    async fn sync(&mut self) -> Outcome {
        let records = match self.api.fetch_grades().await {
            Ok(records) => records,
            Err(err) => return self.fail(err, MSG_SYNC_FAILED),
        };

        self.store.clear();
        self.total = None;
        let mut loaded = 0;
        for record in records {
            let semester = record.semester;
            if !self.forms.contains_key(&semester) {
                tracing::warn!(
                    "⚠️ Skipping {} from unknown semester {}",
                    record.subject,
                    semester
                );
                continue;
            }
            self.store.append(semester, GradeEntry::from(record));
            loaded += 1;
        }

        self.notifier.success(MSG_SYNCED);
        Outcome::Synced(loaded)
    }

    async fn export_report(&mut self) -> Outcome {
        match self.download_report().await {
            Ok(path) => {
                self.notifier.success(MSG_EXPORTED);
                Outcome::Exported(path)
            }
            Err(err) => self.fail(err, MSG_EXPORT_FAILED),
        }
    }

    async fn download_report(&self) -> Result<String> {
        let payload = self.api.export_report().await?;
        tracing::debug!("Received report payload ({} bytes)", payload.len());

        // An .xlsx is a zip package; reject error pages served with 200.
        zip::ZipArchive::new(std::io::Cursor::new(payload.as_slice()))?;

        self.storage
            .write_file(self.config.report_filename(), &payload)
            .await
    }

    async fn export_transcript(&mut self) -> Outcome {
        let result = match build_transcript(&self.store, Local::now().date_naive()) {
            Ok(data) => {
                self.storage
                    .write_file(self.config.transcript_filename(), &data)
                    .await
            }
            Err(err) => Err(err),
        };

        match result {
            Ok(path) => {
                self.notifier.success(MSG_TRANSCRIPT_SAVED);
                Outcome::Exported(path)
            }
            Err(TrackerError::EmptyDataError) => self.fail(TrackerError::EmptyDataError, MSG_NO_DATA),
            Err(err) => self.fail(err, MSG_TRANSCRIPT_FAILED),
        }
    }

    fn fail(&mut self, err: TrackerError, message: &str) -> Outcome {
        tracing::error!("{}: {}", message, err);
        self.notifier.error(message);
        Outcome::Failed {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}
