//! tasklift - Action items and deadlines from meeting transcripts
//!
//! Entry point for the tasklift CLI application.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tasklift::cli::{Cli, Commands};
use tasklift::config::Settings;

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    match cli.command {
        Commands::Completions { shell } => {
            init_logging(if cli.verbose { "debug" } else { "info" });
            tasklift::cli::completions::print(shell);
        }
        command => {
            // Load configuration only for runtime commands.
            let mut settings = Settings::load()?;
            init_logging(settings.general.log_filter(cli.verbose));

            if let Some(person) = cli.person {
                settings.extraction.tracked_person = person;
            }

            // Execute command
            match command {
                Commands::Extract {
                    file,
                    today,
                    format,
                    output,
                    save_pending,
                } => {
                    tasklift::cli::commands::extract_tasks(
                        &settings,
                        &file,
                        today,
                        format,
                        output,
                        save_pending,
                    )?;
                }
                Commands::Report {
                    file,
                    today,
                    output,
                } => {
                    tasklift::cli::commands::render_report(&settings, &file, today, output)?;
                }
                Commands::Events {
                    file,
                    today,
                    output,
                } => {
                    tasklift::cli::commands::calendar_events(&settings, &file, today, output)?;
                }
                Commands::Pending => {
                    tasklift::cli::commands::show_pending(&settings)?;
                }
                Commands::Config(config_cmd) => {
                    tasklift::cli::commands::config_command(&settings, config_cmd)?;
                }
                Commands::Completions { .. } => unreachable!(),
            }
        }
    }

    Ok(())
}

/// Install the stderr subscriber; `RUST_LOG` overrides `default_directive`
fn init_logging(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
