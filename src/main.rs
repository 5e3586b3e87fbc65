use clap::Parser;
use gpa_tracker::app::commands;
use gpa_tracker::config::load_settings;
use gpa_tracker::domain::model::FormInput;
use gpa_tracker::utils::error::ErrorKind;
use gpa_tracker::utils::logger;
use gpa_tracker::{build_coordinator, CliCommand, CliConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::debug!("CLI config: {:?}", cli);

    let mut stdout = std::io::stdout();

    // Pure computations need no server or configuration.
    let offline = match &cli.command {
        CliCommand::Convert { grade10 } => Some(commands::convert(*grade10, &mut stdout)),
        CliCommand::Gpa { grades } => Some(commands::gpa(grades, &mut stdout)),
        _ => None,
    };
    if let Some(result) = offline {
        return finish(result);
    }

    let config = match load_settings(
        cli.config.as_deref(),
        cli.api_base_url.as_deref(),
        cli.output_path.as_deref(),
    ) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    let mut coordinator = build_coordinator(config)?;

    let result = match cli.command {
        CliCommand::Subjects => commands::subjects(&mut coordinator, &mut stdout).await,
        CliCommand::Add {
            semester,
            subject,
            credits,
            grade10,
        } => {
            let input = FormInput::new(subject, credits, grade10);
            commands::add(&mut coordinator, semester, input, &mut stdout).await
        }
        CliCommand::Report => commands::report(&mut coordinator, &mut stdout).await,
        CliCommand::Export => commands::export(&mut coordinator, &mut stdout).await,
        CliCommand::Transcript => commands::transcript(&mut coordinator, &mut stdout).await,
        CliCommand::Session => commands::session(&mut coordinator, &mut stdout).await,
        CliCommand::Convert { .. } | CliCommand::Gpa { .. } => Ok(true),
    };

    finish(result)
}

fn finish(result: gpa_tracker::Result<bool>) -> anyhow::Result<()> {
    match result {
        Ok(true) => Ok(()),
        Ok(false) => std::process::exit(2),
        Err(e) => {
            tracing::error!("❌ {} (kind: {:?})", e, e.kind());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = match e.kind() {
                ErrorKind::Internal => 1,
                ErrorKind::Validation | ErrorKind::Network | ErrorKind::EmptyData => 2,
            };
            std::process::exit(exit_code);
        }
    }
}
