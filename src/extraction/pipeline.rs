//! Extraction pipeline orchestration

use chrono::{Local, NaiveDate};
use std::collections::HashSet;

use crate::config::ExtractionSettings;
use crate::extraction::classifier::LineClassifier;
use crate::extraction::context::Transcript;
use crate::extraction::deadline::resolve;
use crate::extraction::models::{ExtractionResult, TaskKind, TaskRecord};
use crate::extraction::normalizer::{clean_line, dedupe_key, is_substantive};
use crate::extraction::patterns::infer_specific_task;
use crate::extraction::reference_date::infer_reference_date;

/// Lines shorter than this are never candidates
const MIN_LINE_CHARS: usize = 15;

/// Number of context lines kept on a task record
const CONTEXT_LINES_SHOWN: usize = 3;

/// Extracts tasks for one tracked person.
///
/// Holds only compiled tables and the date treated as today, so one
/// extractor can serve any number of transcripts.
#[derive(Debug, Clone)]
pub struct Extractor {
    classifier: LineClassifier,
    direct_context_window: usize,
    commitment_context_window: usize,
    deadline_search_radius: usize,
    today: NaiveDate,
}

impl Extractor {
    /// Create an extractor that treats the current local date as today
    pub fn new(settings: &ExtractionSettings) -> crate::Result<Self> {
        Self::with_today(settings, Local::now().date_naive())
    }

    /// Create an extractor with an explicit "today"
    pub fn with_today(settings: &ExtractionSettings, today: NaiveDate) -> crate::Result<Self> {
        Ok(Self {
            classifier: LineClassifier::new(settings)?,
            direct_context_window: settings.direct_context_window,
            commitment_context_window: settings.commitment_context_window,
            deadline_search_radius: settings.deadline_search_radius,
            today,
        })
    }

    /// Extract tasks from a transcript
    pub fn extract(&self, text: &str) -> ExtractionResult {
        let transcript = Transcript::new(text);
        let reference = infer_reference_date(&transcript, self.today);

        tracing::debug!(
            "Analyzing {} lines (reference date {})",
            transcript.len(),
            reference
        );

        let candidates: Vec<TaskRecord> = transcript
            .iter()
            .filter_map(|(index, line)| self.candidate(&transcript, index, line, reference))
            .collect();
        let found = candidates.len();
        let tasks = deduplicate(candidates);

        let result = ExtractionResult::from_tasks(reference, tasks);
        tracing::info!(
            "Extracted {} task(s) ({} with deadline, {} duplicate(s) dropped)",
            result.total,
            result.with_deadline,
            found - result.total
        );
        result
    }

    fn candidate(
        &self,
        transcript: &Transcript<'_>,
        index: usize,
        line: &str,
        reference: NaiveDate,
    ) -> Option<TaskRecord> {
        if line.chars().count() < MIN_LINE_CHARS {
            return None;
        }

        let kind = self.classifier.classify(line)?;
        let window = match kind {
            TaskKind::DirectAssignment => self.direct_context_window,
            TaskKind::SelfCommitment | TaskKind::CounterpartCommitment => {
                self.commitment_context_window
            }
        };
        let context = transcript.context(index, window);

        if !self.classifier.is_action(line, &context) {
            tracing::trace!("Line {} is not an action: {}", index + 1, line);
            return None;
        }

        let cleaned = clean_line(line);
        let text = if kind.is_commitment() {
            infer_specific_task(line, &context)
                .map(str::to_string)
                .unwrap_or_else(|| cleaned.clone())
        } else {
            cleaned.clone()
        };
        if !is_substantive(&text) {
            return None;
        }

        let deadline = resolve(&cleaned, &context, reference).or_else(|| {
            let surrounding = transcript.surrounding_text(index, self.deadline_search_radius);
            resolve(&surrounding, &[], reference)
        });

        let record = TaskRecord {
            text,
            source_line: u32::try_from(index + 1).unwrap_or(u32::MAX),
            context: context
                .iter()
                .take(CONTEXT_LINES_SHOWN)
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(" | "),
            deadline,
            kind,
            responsible: kind.responsible(),
        };

        tracing::debug!(
            "Task found on line {} ({}): {}{}",
            record.source_line,
            kind.as_str(),
            record.text,
            record
                .deadline
                .as_ref()
                .map(|d| format!(" [due {} '{}']", d.date, d.original_text))
                .unwrap_or_default()
        );

        Some(record)
    }
}

/// Drop records whose normalized text was already seen, keeping order
fn deduplicate(records: Vec<TaskRecord>) -> Vec<TaskRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(dedupe_key(&record.text)))
        .collect()
}
