//! Deadline urgency bands

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How close a deadline is, relative to today
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    /// Past due or due today
    Overdue,
    Tomorrow,
    /// Two or three days out
    Soon,
    Later,
}

impl Urgency {
    pub fn classify(deadline: NaiveDate, today: NaiveDate) -> Self {
        match days_remaining(deadline, today) {
            i64::MIN..=0 => Self::Overdue,
            1 => Self::Tomorrow,
            2..=3 => Self::Soon,
            _ => Self::Later,
        }
    }

    pub fn is_urgent(&self) -> bool {
        !matches!(self, Self::Later)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overdue => "overdue",
            Self::Tomorrow => "tomorrow",
            Self::Soon => "soon",
            Self::Later => "later",
        }
    }
}

/// Signed number of days from `today` until `deadline`
pub fn days_remaining(deadline: NaiveDate, today: NaiveDate) -> i64 {
    (deadline - today).num_days()
}
