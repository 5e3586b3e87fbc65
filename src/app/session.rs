//! Line-oriented front end for the coordinator.
//!
//! Each input line becomes one [`Command`]; after it runs, the affected part
//! of the page and any notification it raised are written out.

use std::io::Write;
use std::time::Instant;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::core::coordinator::{Command, GradeEntryCoordinator, Outcome};
use crate::core::render::{to_text, PageView};
use crate::core::{ConfigProvider, GradeApi, Semester, Storage};
use crate::domain::model::{FormInput, NotificationKind};
use crate::utils::error::Result;

pub const HELP: &str = "\
Commands:
  add <semester> <subject> <credits> <grade10>   submit a grade
  del <semester> <row>                           remove a row (asks first)
  total                                          overall GPA
  show                                           print every semester
  subjects                                       list subjects from the server
  sync                                           reload grades from the server
  export                                         download the Excel report
  transcript                                     write the CSV transcript
  help                                           this text
  quit                                           leave";

#[derive(Debug, Clone, PartialEq)]
pub enum SessionInput {
    Run(Command),
    Delete { semester: Semester, index: usize },
    Show,
    Subjects,
    Help,
    Quit,
    Empty,
    Invalid(String),
}

pub fn parse_line(line: &str) -> SessionInput {
    let mut parts = line.split_whitespace();
    let Some(verb) = parts.next() else {
        return SessionInput::Empty;
    };
    let args: Vec<&str> = parts.collect();

    match verb.to_ascii_lowercase().as_str() {
        "add" => {
            let Some(semester) = args.first().and_then(|s| s.parse().ok()) else {
                return SessionInput::Invalid("usage: add <semester> <subject> <credits> <grade10>".into());
            };
            let field = |i: usize| args.get(i).copied().unwrap_or_default();
            SessionInput::Run(Command::Submit {
                semester: Semester(semester),
                input: FormInput::new(field(1), field(2), field(3)),
            })
        }
        "del" | "delete" => match (
            args.first().and_then(|s| s.parse().ok()),
            args.get(1).and_then(|s| s.parse().ok()),
        ) {
            (Some(semester), Some(index)) => SessionInput::Delete {
                semester: Semester(semester),
                index,
            },
            _ => SessionInput::Invalid("usage: del <semester> <row>".into()),
        },
        "total" => SessionInput::Run(Command::ComputeAggregate),
        "sync" => SessionInput::Run(Command::Sync),
        "export" => SessionInput::Run(Command::ExportReport),
        "transcript" => SessionInput::Run(Command::ExportTranscript),
        "show" => SessionInput::Show,
        "subjects" => SessionInput::Subjects,
        "help" | "?" => SessionInput::Help,
        "quit" | "exit" => SessionInput::Quit,
        other => SessionInput::Invalid(format!("unknown command '{}', try 'help'", other)),
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Text of a single semester section.
pub fn semester_text(page: &PageView, semester: Semester) -> String {
    let section = PageView {
        semesters: page.semester(semester).cloned().into_iter().collect(),
        total: None,
    };
    to_text(&section)
}

/// Writes the page fragment an outcome changed.
pub fn write_outcome<W: Write>(out: &mut W, outcome: &Outcome, page: &PageView) -> Result<()> {
    match outcome {
        Outcome::Submitted { semester, .. } | Outcome::Deleted { semester, .. } => {
            write!(out, "{}", semester_text(page, *semester))?;
        }
        Outcome::Aggregated(summary) => {
            writeln!(
                out,
                "Overall GPA {:.2} over {} credits",
                summary.gpa, summary.total_credits
            )?;
        }
        Outcome::SubjectsLoaded(count) => writeln!(out, "{} subjects", count)?,
        Outcome::Synced(count) => writeln!(out, "{} grades loaded", count)?,
        Outcome::Exported(path) => writeln!(out, "Saved {}", path)?,
        Outcome::Cancelled => writeln!(out, "Cancelled")?,
        Outcome::Failed { message, .. } => writeln!(out, "  ({})", message)?,
    }
    Ok(())
}

/// Writes the notifications raised since `since` that are still showing.
pub fn write_notifications<A, S, C, W>(
    coordinator: &mut GradeEntryCoordinator<A, S, C>,
    since: Instant,
    out: &mut W,
) -> Result<()>
where
    A: GradeApi,
    S: Storage,
    C: ConfigProvider,
    W: Write,
{
    for notification in coordinator
        .notifier_mut()
        .active(Instant::now())
        .into_iter()
        .filter(|n| n.raised_at >= since)
    {
        let tag = match notification.kind {
            NotificationKind::Success => "ok",
            NotificationKind::Error => "error",
        };
        writeln!(out, "[{}] {}", tag, notification.message)?;
    }
    Ok(())
}

pub async fn run_session<A, S, C, R, W>(
    coordinator: &mut GradeEntryCoordinator<A, S, C>,
    input: R,
    out: &mut W,
) -> Result<()>
where
    A: GradeApi,
    S: Storage,
    C: ConfigProvider,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let started = Instant::now();
        let command = match parse_line(&line) {
            SessionInput::Empty => continue,
            SessionInput::Quit => break,
            SessionInput::Help => {
                writeln!(out, "{}", HELP)?;
                continue;
            }
            SessionInput::Show => {
                write!(out, "{}", to_text(&coordinator.page()))?;
                continue;
            }
            SessionInput::Invalid(message) => {
                writeln!(out, "{}", message)?;
                continue;
            }
            SessionInput::Subjects => {
                let outcome = coordinator.dispatch(Command::LoadSubjects).await;
                if !outcome.is_failure() {
                    for subject in coordinator.subjects() {
                        writeln!(out, "  {:<12} {}", subject.id, subject.name)?;
                    }
                }
                write_notifications(coordinator, started, out)?;
                continue;
            }
            SessionInput::Delete { semester, index } => {
                write!(out, "Delete row {} of semester {}? [y/N] ", index, semester)?;
                out.flush()?;
                let answer = lines.next_line().await?.unwrap_or_default();
                Command::Delete {
                    semester,
                    index,
                    confirmed: is_yes(&answer),
                }
            }
            SessionInput::Run(command) => command,
        };

        let outcome = coordinator.dispatch(command).await;
        write_outcome(out, &outcome, &coordinator.page())?;
        write_notifications(coordinator, started, out)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add() {
        assert_eq!(
            parse_line("add 1 MATH101 3 8.7"),
            SessionInput::Run(Command::Submit {
                semester: Semester(1),
                input: FormInput::new("MATH101", "3", "8.7"),
            })
        );
    }

    #[test]
    fn test_parse_add_with_missing_fields_defers_to_validation() {
        assert_eq!(
            parse_line("add 2 MATH101"),
            SessionInput::Run(Command::Submit {
                semester: Semester(2),
                input: FormInput::new("MATH101", "", ""),
            })
        );
        assert!(matches!(parse_line("add x"), SessionInput::Invalid(_)));
    }

    #[test]
    fn test_parse_other_commands() {
        assert_eq!(parse_line("   "), SessionInput::Empty);
        assert_eq!(
            parse_line("del 1 0"),
            SessionInput::Delete {
                semester: Semester(1),
                index: 0
            }
        );
        assert!(matches!(parse_line("del 1"), SessionInput::Invalid(_)));
        assert_eq!(parse_line("TOTAL"), SessionInput::Run(Command::ComputeAggregate));
        assert_eq!(parse_line("export"), SessionInput::Run(Command::ExportReport));
        assert_eq!(parse_line("quit"), SessionInput::Quit);
        assert!(matches!(parse_line("frobnicate"), SessionInput::Invalid(_)));
    }

    #[test]
    fn test_confirmation_answers() {
        assert!(is_yes("y"));
        assert!(is_yes(" YES "));
        assert!(!is_yes(""));
        assert!(!is_yes("n"));
    }
}
