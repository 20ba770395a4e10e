//! Data models produced by an extraction run

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// How a task was found in the transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    /// Someone asked the tracked person to do something
    DirectAssignment,
    /// The tracked person volunteered to do something
    SelfCommitment,
    /// The counterpart volunteered to do something
    CounterpartCommitment,
}

impl TaskKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DirectAssignment => "direct_assignment",
            Self::SelfCommitment => "self_commitment",
            Self::CounterpartCommitment => "counterpart_commitment",
        }
    }

    /// Who owns a task of this kind
    pub fn responsible(&self) -> Responsible {
        match self {
            Self::DirectAssignment | Self::SelfCommitment => Responsible::TrackedPerson,
            Self::CounterpartCommitment => Responsible::Counterpart,
        }
    }

    pub fn is_commitment(&self) -> bool {
        !matches!(self, Self::DirectAssignment)
    }
}

/// Party responsible for delivering a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Responsible {
    TrackedPerson,
    Counterpart,
}

impl Responsible {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TrackedPerson => "tracked_person",
            Self::Counterpart => "counterpart",
        }
    }
}

/// A resolved due date and the phrase it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deadline {
    /// Calendar date the task is due
    pub date: NaiveDate,

    /// Phrase that produced the date
    pub original_text: String,

    /// Optional time of day, serialized as `HH:MM`
    #[serde(default, with = "hhmm")]
    pub time: Option<NaiveTime>,
}

impl Deadline {
    pub fn on(date: NaiveDate, original_text: impl Into<String>) -> Self {
        Self {
            date,
            original_text: original_text.into(),
            time: None,
        }
    }

    pub fn at(date: NaiveDate, time: NaiveTime, original_text: impl Into<String>) -> Self {
        Self {
            date,
            original_text: original_text.into(),
            time: Some(time),
        }
    }

    /// Time formatted as `HH:MM`, if any
    pub fn time_label(&self) -> Option<String> {
        self.time.map(|t| t.format("%H:%M").to_string())
    }
}

/// A single extracted action item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Normalized task text
    pub text: String,

    /// 1-based line number in the transcript
    pub source_line: u32,

    /// Up to three neighbouring lines joined with " | "
    pub context: String,

    /// Resolved due date
    pub deadline: Option<Deadline>,

    pub kind: TaskKind,

    pub responsible: Responsible,
}

impl TaskRecord {
    pub fn has_deadline(&self) -> bool {
        self.deadline.is_some()
    }
}

/// Outcome of one extraction run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Date used as "today" for relative deadlines
    pub reference_date: NaiveDate,

    /// Tasks in first-seen order, deduplicated
    pub tasks: Vec<TaskRecord>,

    pub total: usize,

    pub with_deadline: usize,

    pub without_deadline: usize,
}

impl ExtractionResult {
    /// Build a result and its aggregate counts from the final task list
    pub fn from_tasks(reference_date: NaiveDate, tasks: Vec<TaskRecord>) -> Self {
        let with_deadline = tasks.iter().filter(|t| t.has_deadline()).count();
        Self {
            reference_date,
            total: tasks.len(),
            with_deadline,
            without_deadline: tasks.len() - with_deadline,
            tasks,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Tasks that carry a deadline, in result order
    pub fn with_deadlines(&self) -> impl Iterator<Item = &TaskRecord> {
        self.tasks.iter().filter(|t| t.has_deadline())
    }

    /// Tasks without a deadline, in result order
    pub fn without_deadlines(&self) -> impl Iterator<Item = &TaskRecord> {
        self.tasks.iter().filter(|t| !t.has_deadline())
    }
}

/// Serde adapter for `Option<NaiveTime>` as `"HH:MM"`
mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S>(value: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(time) => serializer.serialize_str(&time.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|s| NaiveTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom))
            .transpose()
    }
}
