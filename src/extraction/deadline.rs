//! Deadline phrase resolution
//!
//! Turns phrases such as "até sexta", "até o dia 7 de novembro" or
//! "dentro de 2 semanas" into calendar dates relative to a reference date.
//! Rules are tried in a fixed order and the first one that produces a valid
//! date wins. A phrase that names an impossible date does not match.

use chrono::{Datelike, Days, NaiveDate, NaiveTime, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::extraction::models::Deadline;
use crate::extraction::patterns::{month_number, WEEKDAYS};

/// A single resolution rule over lowercased text
pub type RuleFn = fn(&str, NaiveDate) -> Option<Deadline>;

/// Resolution rules in priority order
pub const DEADLINE_RULES: &[(&str, RuleFn)] = &[
    ("today", today),
    ("tomorrow", tomorrow),
    ("weekday", weekday),
    ("day_of_month", day_of_month),
    ("first_week_of_month", first_week_of_month),
    ("next_week", next_week),
    ("within_period", within_period),
    ("end_of_week", end_of_week),
    ("clock_time", clock_time),
    ("end_of_month", end_of_month),
];

static TODAY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bhoje\b").expect("valid today regex"));
static TOMORROW_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bamanh[ãa]\b").expect("valid tomorrow regex"));
static WEEKDAY_RES: Lazy<Vec<(Regex, &'static str, Weekday)>> = Lazy::new(|| {
    WEEKDAYS
        .iter()
        .map(|&(name, day)| {
            let re = Regex::new(&format!(r"\b{}\b", name)).expect("valid weekday regex");
            (re, name, day)
        })
        .collect()
});
static DAY_OF_MONTH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\baté|\bpara|\bantes\s+d[eo])\s+(?:o\s+)?(?:dia\s+)?(\d{1,2})\b(?:\s+de\s+(\w+))?")
        .expect("valid day of month regex")
});
static FIRST_WEEK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"primeira\s+semana\s+de\s+(\w+)").expect("valid first week regex")
});
static NEXT_WEEK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"semana\s+que\s+vem").expect("valid next week regex"));
static WITHIN_PERIOD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\bem|\bdentro\s+de)\s+(\d+)\s+(dias?|semanas?)\b")
        .expect("valid period regex")
});
static END_OF_WEEK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:final|fim)\s+(?:de|da)\s+semana").expect("valid end of week regex")
});
static CLOCK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:às|as)\s+(\d{1,2})(?:[h:](\d{2})?)?\b").expect("valid clock regex")
});
static END_OF_MONTH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:final|fim)\s+(?:de|do)\s+mês").expect("valid end of month regex")
});

/// Resolve a deadline from a candidate line and its context.
///
/// Returns `None` when no rule matches; that is a normal outcome.
pub fn resolve(candidate: &str, context: &[String], reference: NaiveDate) -> Option<Deadline> {
    let text = format!("{} {}", candidate, context.join(" ")).to_lowercase();

    DEADLINE_RULES.iter().find_map(|(name, rule)| {
        let deadline = rule(&text, reference)?;
        tracing::trace!(
            "Deadline rule '{}' matched '{}' -> {}",
            name,
            deadline.original_text,
            deadline.date
        );
        Some(deadline)
    })
}

fn today(text: &str, reference: NaiveDate) -> Option<Deadline> {
    TODAY_RE
        .is_match(text)
        .then(|| Deadline::on(reference, "hoje"))
}

fn tomorrow(text: &str, reference: NaiveDate) -> Option<Deadline> {
    if !TOMORROW_RE.is_match(text) {
        return None;
    }
    Some(Deadline::on(reference.checked_add_days(Days::new(1))?, "amanhã"))
}

fn weekday(text: &str, reference: NaiveDate) -> Option<Deadline> {
    let (_, name, day) = WEEKDAY_RES.iter().find(|(re, _, _)| re.is_match(text))?;
    let date = reference.checked_add_days(Days::new(days_until(reference, *day)))?;
    Some(Deadline::on(date, *name))
}

fn day_of_month(text: &str, reference: NaiveDate) -> Option<Deadline> {
    let caps = DAY_OF_MONTH_RE.captures(text)?;
    let day: u32 = caps[1].parse().ok()?;

    let (year, month) = match caps.get(2).and_then(|m| month_number(m.as_str())) {
        Some(month) => (year_for_month(reference, month), month),
        None if day < reference.day() => following_month(reference),
        None => (reference.year(), reference.month()),
    };

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    Some(Deadline::on(date, &caps[0]))
}

fn first_week_of_month(text: &str, reference: NaiveDate) -> Option<Deadline> {
    let caps = FIRST_WEEK_RE.captures(text)?;
    let month = month_number(&caps[1])?;
    let date = NaiveDate::from_ymd_opt(year_for_month(reference, month), month, 7)?;
    Some(Deadline::on(date, &caps[0]))
}

// Lands on the Sunday closing the week that starts next Monday. Kept as the
// long-standing behaviour even though "semana que vem" usually means earlier.
fn next_week(text: &str, reference: NaiveDate) -> Option<Deadline> {
    if !NEXT_WEEK_RE.is_match(text) {
        return None;
    }
    let offset = days_until(reference, Weekday::Mon) + 6;
    let date = reference.checked_add_days(Days::new(offset))?;
    Some(Deadline::on(date, "semana que vem"))
}

fn within_period(text: &str, reference: NaiveDate) -> Option<Deadline> {
    let caps = WITHIN_PERIOD_RE.captures(text)?;
    let quantity: u64 = caps[1].parse().ok()?;
    let days = if caps[2].starts_with("semana") {
        quantity.checked_mul(7)?
    } else {
        quantity
    };
    let date = reference.checked_add_days(Days::new(days))?;
    Some(Deadline::on(date, &caps[0]))
}

fn end_of_week(text: &str, reference: NaiveDate) -> Option<Deadline> {
    if !END_OF_WEEK_RE.is_match(text) {
        return None;
    }
    let date = reference.checked_add_days(Days::new(days_until(reference, Weekday::Fri)))?;
    Some(Deadline::on(date, "final da semana"))
}

fn clock_time(text: &str, reference: NaiveDate) -> Option<Deadline> {
    let caps = CLOCK_RE.captures(text)?;
    let hour: u32 = caps[1].parse().ok()?;
    let minute: u32 = match caps.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };
    let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
    Some(Deadline::at(reference, time, &caps[0]))
}

fn end_of_month(text: &str, reference: NaiveDate) -> Option<Deadline> {
    let m = END_OF_MONTH_RE.find(text)?;
    let (year, month) = following_month(reference);
    let date = NaiveDate::from_ymd_opt(year, month, 1)?.pred_opt()?;
    Some(Deadline::on(date, m.as_str()))
}

/// Days until the next `target` weekday, never zero
fn days_until(reference: NaiveDate, target: Weekday) -> u64 {
    let from = reference.weekday().num_days_from_monday();
    let to = target.num_days_from_monday();
    match (to + 7 - from) % 7 {
        0 => 7,
        n => u64::from(n),
    }
}

/// Year of the next occurrence of `month`, counting the reference month as current
fn year_for_month(reference: NaiveDate, month: u32) -> i32 {
    if month < reference.month() {
        reference.year() + 1
    } else {
        reference.year()
    }
}

/// (year, month) of the month after the reference month
fn following_month(reference: NaiveDate) -> (i32, u32) {
    if reference.month() == 12 {
        (reference.year() + 1, 1)
    } else {
        (reference.year(), reference.month() + 1)
    }
}
