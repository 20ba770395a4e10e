//! Meeting-date inference from transcript content

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::extraction::context::Transcript;

/// Only the end of a transcript is scanned for the meeting date
pub const REFERENCE_SCAN_LINES: usize = 50;

static MEETING_DAY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:estamos|está)\s+(?:no\s+)?dia\s+(\d{1,2})\b").expect("valid meeting day regex")
});

/// Date the meeting took place, or `today` when the transcript does not say.
///
/// Looks for "estamos no dia N" in the last lines. A day earlier in the month
/// than `today` is taken to be in the following month.
pub fn infer_reference_date(transcript: &Transcript<'_>, today: NaiveDate) -> NaiveDate {
    for line in transcript.tail(REFERENCE_SCAN_LINES) {
        let lowered = line.to_lowercase();
        let Some(caps) = MEETING_DAY_RE.captures(&lowered) else {
            continue;
        };
        let Ok(day) = caps[1].parse::<u32>() else {
            continue;
        };

        match meeting_date(day, today) {
            Some(date) => {
                tracing::debug!("Inferred meeting date {} from '{}'", date, line);
                return date;
            }
            None => {
                tracing::debug!("Ignoring impossible meeting day {} in '{}'", day, line);
            }
        }
    }

    today
}

fn meeting_date(day: u32, today: NaiveDate) -> Option<NaiveDate> {
    if day < today.day() {
        let (year, month) = if today.month() == 12 {
            (today.year() + 1, 1)
        } else {
            (today.year(), today.month() + 1)
        };
        NaiveDate::from_ymd_opt(year, month, day)
    } else {
        NaiveDate::from_ymd_opt(today.year(), today.month(), day)
    }
}
