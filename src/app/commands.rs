//! One-shot command-line actions. Each returns whether it succeeded so the
//! binary can pick an exit code.

use std::io::Write;
use std::time::Instant;

use crate::app::session::{run_session, write_notifications, write_outcome};
use crate::core::coordinator::{Command, GradeEntryCoordinator, Outcome};
use crate::core::gpa::{summarize, CreditGrade};
use crate::core::render::to_text;
use crate::core::scale::to_four_point;
use crate::core::{ConfigProvider, GradeApi, Semester, Storage};
use crate::domain::model::FormInput;
use crate::utils::error::{Result, TrackerError};
use crate::utils::validation::{parse_non_negative_number, parse_number};

pub fn convert<W: Write>(grade10: f64, out: &mut W) -> Result<bool> {
    writeln!(out, "{} -> {:.1}", grade10, to_four_point(grade10))?;
    Ok(true)
}

/// Parses `CREDITS:GRADE4`.
pub fn parse_credit_grade(raw: &str) -> Result<CreditGrade> {
    let (credits, grade4) = raw.split_once(':').ok_or_else(|| {
        TrackerError::validation(format!("expected CREDITS:GRADE4, got '{}'", raw))
    })?;
    Ok(CreditGrade::new(
        parse_non_negative_number("Credits", credits)?,
        parse_number("Grade4", grade4)?,
    ))
}

pub fn gpa<W: Write>(pairs: &[String], out: &mut W) -> Result<bool> {
    let grades = pairs
        .iter()
        .map(|raw| parse_credit_grade(raw))
        .collect::<Result<Vec<_>>>()?;
    let summary = summarize(&grades);
    writeln!(
        out,
        "GPA {:.2} over {} credits ({} grades)",
        summary.gpa, summary.total_credits, summary.entries
    )?;
    Ok(true)
}

async fn run_one<A, S, C, W>(
    coordinator: &mut GradeEntryCoordinator<A, S, C>,
    command: Command,
    out: &mut W,
) -> Result<Outcome>
where
    A: GradeApi,
    S: Storage,
    C: ConfigProvider,
    W: Write,
{
    let started = Instant::now();
    let outcome = coordinator.dispatch(command).await;
    write_outcome(out, &outcome, &coordinator.page())?;
    write_notifications(coordinator, started, out)?;
    Ok(outcome)
}

pub async fn subjects<A, S, C, W>(
    coordinator: &mut GradeEntryCoordinator<A, S, C>,
    out: &mut W,
) -> Result<bool>
where
    A: GradeApi,
    S: Storage,
    C: ConfigProvider,
    W: Write,
{
    let started = Instant::now();
    let outcome = coordinator.dispatch(Command::LoadSubjects).await;
    for subject in coordinator.subjects() {
        writeln!(out, "{:<12} {}", subject.id, subject.name)?;
    }
    write_notifications(coordinator, started, out)?;
    Ok(!outcome.is_failure())
}

pub async fn add<A, S, C, W>(
    coordinator: &mut GradeEntryCoordinator<A, S, C>,
    semester: u32,
    input: FormInput,
    out: &mut W,
) -> Result<bool>
where
    A: GradeApi,
    S: Storage,
    C: ConfigProvider,
    W: Write,
{
    let command = Command::Submit {
        semester: Semester(semester),
        input,
    };
    Ok(!run_one(coordinator, command, out).await?.is_failure())
}

/// Loads every grade from the server and prints the whole page with the
/// overall GPA.
pub async fn report<A, S, C, W>(
    coordinator: &mut GradeEntryCoordinator<A, S, C>,
    out: &mut W,
) -> Result<bool>
where
    A: GradeApi,
    S: Storage,
    C: ConfigProvider,
    W: Write,
{
    let started = Instant::now();
    if coordinator.dispatch(Command::Sync).await.is_failure() {
        write_notifications(coordinator, started, out)?;
        return Ok(false);
    }
    // Names are cosmetic; rows fall back to subject ids.
    coordinator.dispatch(Command::LoadSubjects).await;
    let aggregate = coordinator.dispatch(Command::ComputeAggregate).await;

    write!(out, "{}", to_text(&coordinator.page()))?;
    write_notifications(coordinator, started, out)?;
    Ok(!aggregate.is_failure())
}

pub async fn export<A, S, C, W>(
    coordinator: &mut GradeEntryCoordinator<A, S, C>,
    out: &mut W,
) -> Result<bool>
where
    A: GradeApi,
    S: Storage,
    C: ConfigProvider,
    W: Write,
{
    Ok(!run_one(coordinator, Command::ExportReport, out)
        .await?
        .is_failure())
}

pub async fn transcript<A, S, C, W>(
    coordinator: &mut GradeEntryCoordinator<A, S, C>,
    out: &mut W,
) -> Result<bool>
where
    A: GradeApi,
    S: Storage,
    C: ConfigProvider,
    W: Write,
{
    if run_one(coordinator, Command::Sync, out).await?.is_failure() {
        return Ok(false);
    }
    Ok(!run_one(coordinator, Command::ExportTranscript, out)
        .await?
        .is_failure())
}

pub async fn session<A, S, C, W>(
    coordinator: &mut GradeEntryCoordinator<A, S, C>,
    out: &mut W,
) -> Result<bool>
where
    A: GradeApi,
    S: Storage,
    C: ConfigProvider,
    W: Write,
{
    let started = Instant::now();
    coordinator.dispatch(Command::LoadSubjects).await;
    write_notifications(coordinator, started, out)?;

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    run_session(coordinator, stdin, out).await?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_credit_grade() {
        assert_eq!(
            parse_credit_grade("3:4.0").unwrap(),
            CreditGrade::new(3.0, 4.0)
        );
        assert!(parse_credit_grade("3").is_err());
        assert!(parse_credit_grade("x:4").is_err());
    }

    #[test]
    fn test_gpa_output() {
        let mut out = Vec::new();
        let pairs = vec!["3:4.0".to_string(), "2:3.0".to_string()];
        assert!(gpa(&pairs, &mut out).unwrap());
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "GPA 3.60 over 5 credits (2 grades)\n"
        );
    }

    #[test]
    fn test_convert_output() {
        let mut out = Vec::new();
        let succeeded = tokio_test::assert_ok!(convert(8.7, &mut out));
        assert!(succeeded);
        assert_eq!(String::from_utf8(out).unwrap(), "8.7 -> 4.0\n");
    }
}
