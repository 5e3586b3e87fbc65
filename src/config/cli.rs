use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "gpa-tracker")]
#[command(about = "Track semester grades and GPA against a grade server")]
pub struct CliConfig {
    /// Path to TOML configuration file (default: gpa-tracker.toml if present)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override the grade server base URL
    #[arg(long)]
    pub api_base_url: Option<String>,

    /// Override the export directory
    #[arg(long)]
    pub output_path: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// Convert a 10-point grade to the 4-point scale
    Convert {
        #[arg(allow_negative_numbers = true)]
        grade10: f64,
    },
    /// Credit-weighted GPA of CREDITS:GRADE4 pairs
    Gpa {
        #[arg(required = true)]
        grades: Vec<String>,
    },
    /// List subjects offered by the server
    Subjects,
    /// Submit one grade
    Add {
        semester: u32,
        subject: String,
        credits: String,
        grade10: String,
    },
    /// Load all grades from the server and print every semester
    Report,
    /// Download the server's Excel report
    Export,
    /// Load grades from the server and write a CSV transcript
    Transcript,
    /// Interactive session
    Session,
}
