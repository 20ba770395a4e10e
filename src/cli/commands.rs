//! CLI command implementations

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use std::path::{Path, PathBuf};

use crate::cli::args::{ConfigCommand, OutputFormat};
use crate::config::Settings;
use crate::extraction::{ExtractionResult, Extractor, TaskRecord};
use crate::report::{build_events, render_summary, summary_subject};
use crate::storage::PendingSnapshot;
use crate::TaskliftError;

/// Extract tasks and print them as text or JSON
pub fn extract_tasks(
    settings: &Settings,
    file: &Path,
    today: Option<NaiveDate>,
    format: OutputFormat,
    output: Option<PathBuf>,
    save_pending: bool,
) -> Result<()> {
    let result = run_extraction(settings, file, today)?;

    let content = match format {
        OutputFormat::Text => format_as_text(&result),
        OutputFormat::Json => serde_json::to_string_pretty(&result)? + "\n",
    };
    write_output(&content, output)?;

    if save_pending {
        let snapshot = PendingSnapshot::from_result(&result, file.display().to_string());
        let path = settings.pending_path();
        snapshot
            .save(&path)
            .with_context(|| format!("Failed to save pending tasks: {}", path.display()))?;
        eprintln!(
            "Saved {} pending task(s) to: {}",
            snapshot.tasks.len(),
            path.display()
        );
    }

    Ok(())
}

/// Render the HTML summary for a transcript
pub fn render_report(
    settings: &Settings,
    file: &Path,
    today: Option<NaiveDate>,
    output: Option<PathBuf>,
) -> Result<()> {
    let result = run_extraction(settings, file, today)?;
    let now = Local::now().naive_local();
    let today = today.unwrap_or_else(|| now.date());

    tracing::info!("{}", summary_subject(&result, today));
    let html = render_summary(&result, &file.display().to_string(), today, now);
    write_output(&html, output)
}

/// Print calendar events for the tasks that have deadlines
pub fn calendar_events(
    settings: &Settings,
    file: &Path,
    today: Option<NaiveDate>,
    output: Option<PathBuf>,
) -> Result<()> {
    let result = run_extraction(settings, file, today)?;
    let events = build_events(&result, &settings.calendar)?;
    let content = serde_json::to_string_pretty(&events)? + "\n";
    write_output(&content, output)
}

/// Show the tasks stored by `extract --save-pending`
pub fn show_pending(settings: &Settings) -> Result<()> {
    let path = settings.pending_path();
    let snapshot = match PendingSnapshot::load(&path) {
        Ok(snapshot) => snapshot,
        Err(TaskliftError::NotFound(_)) => {
            println!("No pending tasks");
            return Ok(());
        }
        Err(e) => {
            return Err(anyhow::Error::from(e).context(format!("Failed to read {}", path.display())));
        }
    };

    println!("Source: {}", snapshot.source);
    println!(
        "Saved: {}",
        snapshot
            .created_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
    );
    println!();

    if snapshot.is_empty() {
        println!("(No tasks with deadlines)");
        return Ok(());
    }

    for (i, task) in snapshot.tasks.iter().enumerate() {
        print!("{}", format_task(i + 1, task));
    }

    Ok(())
}

/// Handle config subcommands
pub fn config_command(settings: &Settings, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            let toml = toml::to_string_pretty(settings)?;
            println!("{}", toml);
        }
        ConfigCommand::Path => {
            let path = Settings::config_path()?;
            println!("{}", path.display());
        }
        ConfigCommand::Init { force } => {
            let path = Settings::config_path()?;
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            Settings::write_default(&path)?;
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

fn run_extraction(
    settings: &Settings,
    file: &Path,
    today: Option<NaiveDate>,
) -> Result<ExtractionResult> {
    let text = read_transcript(file)?;
    let extractor = match today {
        Some(today) => Extractor::with_today(&settings.extraction, today)?,
        None => Extractor::new(&settings.extraction)?,
    };

    tracing::info!(
        "Extracting tasks for {} from {}",
        settings.extraction.tracked_person,
        file.display()
    );
    Ok(extractor.extract(&text))
}

fn read_transcript(path: &Path) -> Result<String> {
    if !path.exists() {
        anyhow::bail!("Transcript not found: {}", path.display());
    }
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read transcript: {}", path.display()))
}

fn write_output(content: &str, output: Option<PathBuf>) -> Result<()> {
    if let Some(path) = output {
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Written to: {}", path.display());
    } else {
        print!("{}", content);
    }
    Ok(())
}

fn format_as_text(result: &ExtractionResult) -> String {
    let mut output = String::new();
    output.push_str(&format!("Reference date: {}\n", result.reference_date));
    output.push_str(&format!(
        "Tasks: {} ({} with deadline, {} without)\n",
        result.total, result.with_deadline, result.without_deadline
    ));

    if result.is_empty() {
        output.push_str("\n(No tasks found)\n");
        return output;
    }

    output.push('\n');
    for (i, task) in result.tasks.iter().enumerate() {
        output.push_str(&format_task(i + 1, task));
    }

    output
}

fn format_task(number: usize, task: &TaskRecord) -> String {
    let mut output = format!(
        "{}. [{}] {} (line {})\n",
        number,
        task.kind.as_str(),
        task.text,
        task.source_line
    );
    if let Some(deadline) = &task.deadline {
        let time = deadline
            .time_label()
            .map(|t| format!(" {}", t))
            .unwrap_or_default();
        output.push_str(&format!(
            "   Due: {}{} (\"{}\")\n",
            deadline.date, time, deadline.original_text
        ));
    }
    output.push_str(&format!("   Owner: {}\n", task.responsible.as_str()));
    if !task.context.is_empty() {
        output.push_str(&format!("   Context: {}\n", task.context));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::{Deadline, TaskKind};

    #[test]
    fn text_format_lists_tasks_with_deadlines() {
        let kind = TaskKind::SelfCommitment;
        let reference = NaiveDate::from_ymd_opt(2025, 10, 22).unwrap();
        let result = ExtractionResult::from_tasks(
            reference,
            vec![TaskRecord {
                text: "Enviar proposta comercial".to_string(),
                source_line: 4,
                context: "Precisamos dos valores".to_string(),
                deadline: Some(Deadline::on(
                    NaiveDate::from_ymd_opt(2025, 10, 24).unwrap(),
                    "sexta",
                )),
                kind,
                responsible: kind.responsible(),
            }],
        );

        let text = format_as_text(&result);
        assert!(text.contains("Reference date: 2025-10-22"));
        assert!(text.contains("1. [self_commitment] Enviar proposta comercial (line 4)"));
        assert!(text.contains("Due: 2025-10-24 (\"sexta\")"));
        assert!(text.contains("Owner: tracked_person"));
        assert!(text.contains("Context: Precisamos dos valores"));
    }

    #[test]
    fn text_format_for_empty_result() {
        let reference = NaiveDate::from_ymd_opt(2025, 10, 22).unwrap();
        let text = format_as_text(&ExtractionResult::from_tasks(reference, Vec::new()));
        assert!(text.contains("Tasks: 0"));
        assert!(text.contains("(No tasks found)"));
    }

    #[test]
    fn missing_transcript_is_reported() {
        let err = read_transcript(Path::new("/nonexistent/reuniao.txt")).unwrap_err();
        assert_eq!(err.to_string(), "Transcript not found: /nonexistent/reuniao.txt");
    }
}
