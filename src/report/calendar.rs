//! Calendar event payloads for tasks with deadlines.
//!
//! Events follow the Google Calendar v3 shape so the JSON can be posted to
//! the events endpoint as-is.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::config::CalendarSettings;
use crate::extraction::{ExtractionResult, TaskRecord};

const TITLE_PREFIX: &str = "📋 ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub summary: String,
    pub description: String,
    pub start: EventTime,
    pub end: EventTime,
    pub reminders: Reminders,
}

/// Either an all-day `date` or a `dateTime` with its time zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTime {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<NaiveDateTime>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl EventTime {
    pub fn all_day(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            date_time: None,
            time_zone: None,
        }
    }

    pub fn timed(date_time: NaiveDateTime, time_zone: Tz) -> Self {
        Self {
            date: None,
            date_time: Some(date_time),
            time_zone: Some(time_zone.name().to_string()),
        }
    }

    pub fn is_all_day(&self) -> bool {
        self.date.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminders {
    pub use_default: bool,
    pub overrides: Vec<ReminderOverride>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderOverride {
    pub method: String,
    pub minutes: u32,
}

/// One event per task that has a deadline, in result order.
///
/// Fails when `calendar.timezone` is not a known IANA zone.
pub fn build_events(
    result: &ExtractionResult,
    settings: &CalendarSettings,
) -> crate::Result<Vec<CalendarEvent>> {
    let time_zone = settings.time_zone()?;
    let events: Vec<CalendarEvent> = result
        .with_deadlines()
        .filter_map(|task| build_event(task, settings, time_zone))
        .collect();
    tracing::debug!("Built {} calendar event(s) in {}", events.len(), time_zone.name());
    Ok(events)
}

/// Build the event for a single task; `None` when it has no deadline
pub fn build_event(
    task: &TaskRecord,
    settings: &CalendarSettings,
    time_zone: Tz,
) -> Option<CalendarEvent> {
    let deadline = task.deadline.as_ref()?;

    let (start, end) = match deadline.time {
        Some(time) => {
            let start = deadline.date.and_time(time);
            (
                EventTime::timed(start, time_zone),
                EventTime::timed(start + Duration::hours(1), time_zone),
            )
        }
        None => (
            EventTime::all_day(deadline.date),
            EventTime::all_day(deadline.date),
        ),
    };

    let context = if task.context.is_empty() {
        "N/A"
    } else {
        task.context.as_str()
    };

    Some(CalendarEvent {
        summary: format!(
            "{}{}",
            TITLE_PREFIX,
            truncate_chars(&task.text, settings.title_max_chars)
        ),
        description: format!(
            "Tarefa da reunião:\n\n{}\n\nContexto: {}",
            task.text, context
        ),
        start,
        end,
        reminders: Reminders {
            use_default: false,
            overrides: settings
                .reminder_minutes
                .iter()
                .map(|&minutes| ReminderOverride {
                    method: "popup".to_string(),
                    minutes,
                })
                .collect(),
        },
    })
}

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}
