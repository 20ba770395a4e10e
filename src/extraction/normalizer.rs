//! Cleanup of raw transcript lines into display text

use once_cell::sync::Lazy;
use regex::Regex;

/// Normalized text must be longer than this to count as a task
pub const MIN_TASK_CHARS: usize = 10;

static TIMESTAMP_PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{1,2}:\d{2}(?::\d{2})?\s*[-–]\s*").expect("valid timestamp regex")
});
// A label is a short name: no digits or sentence punctuation before the colon,
// so "às 14:30" inside a sentence is not read as a speaker.
static SPEAKER_PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([^:,.?!\d]{1,40}):(?:\s+|$)").expect("valid speaker regex")
});
static LIST_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\s\-*•\d.)]+").expect("valid list marker regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));
static PUNCTUATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s]").expect("valid punctuation regex"));

/// Strip timestamp, speaker label and list markers, then capitalize.
///
/// Each step is best effort. The result may be empty.
pub fn clean_line(raw: &str) -> String {
    let text = strip_timestamp(raw.trim());
    let text = SPEAKER_PREFIX_RE.replace(text, "");
    let text = LIST_MARKER_RE.replace(text.trim(), "");
    capitalize_first(text.trim())
}

/// Whether normalized text is long enough to be a task
pub fn is_substantive(text: &str) -> bool {
    text.chars().count() > MIN_TASK_CHARS
}

/// Speaker label of a line (`"Victor Gutierrez"` in `"10:02 - Victor Gutierrez: ok"`)
pub fn speaker_label(raw: &str) -> Option<&str> {
    let text = strip_timestamp(raw.trim());
    SPEAKER_PREFIX_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|label| label.as_str().trim())
}

/// Key used to detect duplicate tasks
pub fn dedupe_key(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    let collapsed = WHITESPACE_RE.replace_all(&lowered, " ");
    PUNCTUATION_RE.replace_all(&collapsed, "").into_owned()
}

fn strip_timestamp(text: &str) -> &str {
    match TIMESTAMP_PREFIX_RE.find(text) {
        Some(m) => text[m.end()..].trim(),
        None => text,
    }
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
