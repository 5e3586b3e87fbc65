use gpa_tracker::config::TrackerConfig;
use gpa_tracker::core::coordinator::{FormState, MSG_GRADE_ADDED, MSG_NO_DATA, MSG_SAVE_FAILED};
use gpa_tracker::core::Semester;
use gpa_tracker::domain::model::{FormInput, NotificationKind};
use gpa_tracker::utils::error::ErrorKind;
use gpa_tracker::{build_coordinator, Command, Outcome};
use httpmock::prelude::*;
use std::io::Write;
use tempfile::TempDir;

fn config_for(server: &MockServer, output_path: &str) -> TrackerConfig {
    let mut config = TrackerConfig::default();
    config.api.base_url = server.base_url();
    config.semesters.ids = vec![1, 2];
    config.export.output_path = output_path.to_string();
    config
}

fn workbook_bytes() -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    zip.start_file::<_, ()>("[Content_Types].xml", zip::write::FileOptions::default())
        .unwrap();
    zip.write_all(b"<Types/>").unwrap();
    zip.finish().unwrap().into_inner()
}

#[tokio::test]
async fn test_submit_math_grade_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start_async().await;

    let post_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/grades").json_body(serde_json::json!({
                "semester": 1,
                "subject": "Math",
                "credits": 3.0,
                "grade10": 8.7,
                "grade4": 4.0
            }));
            then.status(201).json_body(serde_json::json!({"success": true, "id": 42}));
        })
        .await;

    let config = config_for(&server, temp_dir.path().to_str().unwrap());
    let mut coordinator = build_coordinator(config).unwrap();

    let outcome = coordinator
        .dispatch(Command::Submit {
            semester: Semester(1),
            input: FormInput::new("Math", "3", "8.7"),
        })
        .await;

    post_mock.assert_async().await;
    assert!(matches!(outcome, Outcome::Submitted { .. }));

    let page = coordinator.page();
    let section = page.semester(Semester(1)).unwrap();
    assert_eq!(section.ids.rows, "grades-1");
    assert_eq!(section.rows.len(), 1);
    assert_eq!(section.rows[0].grade4, "4.0");
    assert_eq!(section.gpa, "4.00");
    assert_eq!(coordinator.form_state(Semester(1)), Some(FormState::Idle));
    assert_eq!(coordinator.notifier().last().unwrap().message, MSG_GRADE_ADDED);
}

#[tokio::test]
async fn test_server_error_adds_nothing_locally() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start_async().await;

    let post_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/grades");
            then.status(500).json_body(serde_json::json!({"error": "database locked"}));
        })
        .await;

    let config = config_for(&server, temp_dir.path().to_str().unwrap());
    let mut coordinator = build_coordinator(config).unwrap();

    let outcome = coordinator
        .dispatch(Command::Submit {
            semester: Semester(2),
            input: FormInput::new("Physics", "2", "7.5"),
        })
        .await;

    post_mock.assert_hits_async(1).await;
    assert!(matches!(
        outcome,
        Outcome::Failed {
            kind: ErrorKind::Network,
            ..
        }
    ));
    assert!(coordinator.store().is_empty());
    assert_eq!(coordinator.page().semester(Semester(2)).unwrap().gpa, "0");

    let last = coordinator.notifier().last().unwrap();
    assert_eq!(last.kind, NotificationKind::Error);
    assert_eq!(last.message, MSG_SAVE_FAILED);
}

#[tokio::test]
async fn test_sync_then_aggregate_across_semesters() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start_async().await;

    let grades_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/grades");
            then.status(200).json_body(serde_json::json!([
                {"id": 1, "semester": 1, "subject": "MATH101", "credits": 3, "grade10": 8.7, "grade4": 4.0},
                {"id": 2, "semester": 2, "subject": "PHY101", "credits": 2, "grade10": 7.5, "grade4": 3.0}
            ]));
        })
        .await;

    let config = config_for(&server, temp_dir.path().to_str().unwrap());
    let mut coordinator = build_coordinator(config).unwrap();

    assert_eq!(coordinator.dispatch(Command::Sync).await, Outcome::Synced(2));
    grades_mock.assert_async().await;

    match coordinator.dispatch(Command::ComputeAggregate).await {
        Outcome::Aggregated(summary) => {
            assert_eq!(summary.gpa, 3.6);
            assert_eq!(summary.total_credits, 5.0);
        }
        other => panic!("unexpected outcome {:?}", other),
    }

    let total = coordinator.page().total.unwrap();
    assert_eq!(total.gpa, "3.60");
    assert_eq!(total.credits, "5");
}

#[tokio::test]
async fn test_aggregate_with_no_entries_notifies_error() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start_async().await;
    let config = config_for(&server, temp_dir.path().to_str().unwrap());
    let mut coordinator = build_coordinator(config).unwrap();

    let outcome = coordinator.dispatch(Command::ComputeAggregate).await;

    assert!(matches!(
        outcome,
        Outcome::Failed {
            kind: ErrorKind::EmptyData,
            ..
        }
    ));
    assert!(coordinator.page().total.is_none());
    let last = coordinator.notifier().last().unwrap();
    assert_eq!(last.kind, NotificationKind::Error);
    assert_eq!(last.message, MSG_NO_DATA);
}

#[tokio::test]
async fn test_export_report_writes_workbook() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start_async().await;
    let payload = workbook_bytes();

    let export_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/export-excel");
            then.status(200)
                .header(
                    "Content-Type",
                    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
                )
                .body(payload.clone());
        })
        .await;

    let config = config_for(&server, temp_dir.path().to_str().unwrap());
    let mut coordinator = build_coordinator(config).unwrap();

    let outcome = coordinator.dispatch(Command::ExportReport).await;
    export_mock.assert_async().await;

    let expected_path = temp_dir.path().join("GPA_Report.xlsx");
    assert_eq!(
        outcome,
        Outcome::Exported(expected_path.display().to_string())
    );
    assert_eq!(std::fs::read(&expected_path).unwrap(), payload);
}

#[tokio::test]
async fn test_export_failure_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/export-excel");
            then.status(404);
        })
        .await;

    let config = config_for(&server, temp_dir.path().to_str().unwrap());
    let mut coordinator = build_coordinator(config).unwrap();

    let outcome = coordinator.dispatch(Command::ExportReport).await;
    assert!(outcome.is_failure());
    assert!(!temp_dir.path().join("GPA_Report.xlsx").exists());
}

#[tokio::test]
async fn test_transcript_from_synced_grades() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/grades");
            then.status(200).json_body(serde_json::json!([
                {"semester": 1, "subject": "MATH101", "credits": 3, "grade10": 8.7, "grade4": 4.0}
            ]));
        })
        .await;

    let config = config_for(&server, temp_dir.path().to_str().unwrap());
    let mut coordinator = build_coordinator(config).unwrap();

    coordinator.dispatch(Command::Sync).await;
    let outcome = coordinator.dispatch(Command::ExportTranscript).await;
    assert!(matches!(outcome, Outcome::Exported(_)));

    let csv = std::fs::read_to_string(temp_dir.path().join("GPA_Transcript.csv")).unwrap();
    assert!(csv.contains("1,MATH101,3,8.7,4.0"));
    assert!(csv.contains("Overall GPA,,3,,4.00"));
}
