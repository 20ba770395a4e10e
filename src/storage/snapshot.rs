//! Pending calendar snapshot: tasks with deadlines waiting to be scheduled

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::extraction::{ExtractionResult, TaskRecord};
use crate::{Result, TaskliftError};

/// Tasks from one run that still need calendar events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingSnapshot {
    /// Unique identifier (UUID)
    pub id: String,

    /// When the snapshot was taken
    pub created_at: DateTime<Utc>,

    /// Transcript the tasks came from
    pub source: String,

    /// Reference date the deadlines were resolved against
    pub reference_date: NaiveDate,

    /// Tasks with a deadline, in result order
    pub tasks: Vec<TaskRecord>,
}

impl PendingSnapshot {
    /// Keep the tasks of `result` that have a deadline
    pub fn from_result(result: &ExtractionResult, source: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            source: source.into(),
            reference_date: result.reference_date,
            tasks: result.with_deadlines().cloned().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Write the snapshot as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        tracing::debug!(
            "Saved {} pending task(s) to {}",
            self.tasks.len(),
            path.display()
        );
        Ok(())
    }

    /// Read a snapshot written by [`PendingSnapshot::save`]
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(TaskliftError::NotFound(format!(
                "No pending snapshot at {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::{Deadline, TaskKind};

    fn result() -> ExtractionResult {
        let reference = NaiveDate::from_ymd_opt(2025, 10, 22).unwrap();
        let kind = TaskKind::DirectAssignment;
        let record = |text: &str, deadline: Option<Deadline>| TaskRecord {
            text: text.to_string(),
            source_line: 1,
            context: String::new(),
            deadline,
            kind,
            responsible: kind.responsible(),
        };
        ExtractionResult::from_tasks(
            reference,
            vec![
                record("Revisar contrato do cliente", None),
                record(
                    "Enviar proposta comercial",
                    Some(Deadline::on(NaiveDate::from_ymd_opt(2025, 10, 24).unwrap(), "sexta")),
                ),
            ],
        )
    }

    #[test]
    fn keeps_only_tasks_with_deadlines() {
        let snapshot = PendingSnapshot::from_result(&result(), "reuniao.txt");
        assert_eq!(snapshot.tasks.len(), 1);
        assert_eq!(snapshot.tasks[0].text, "Enviar proposta comercial");
        assert_eq!(snapshot.source, "reuniao.txt");
        assert!(uuid::Uuid::parse_str(&snapshot.id).is_ok());
    }

    #[test]
    fn snapshots_get_distinct_ids() {
        let a = PendingSnapshot::from_result(&result(), "a.txt");
        let b = PendingSnapshot::from_result(&result(), "a.txt");
        assert_ne!(a.id, b.id);
    }
}
