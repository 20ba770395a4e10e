//! Presentation of extraction results: urgency, HTML summary, calendar events

pub mod calendar;
pub mod html;
pub mod urgency;

pub use calendar::{build_events, CalendarEvent};
pub use html::{escape_html, render_summary, summary_subject};
pub use urgency::Urgency;
