//! Rule-based task extraction from meeting transcripts
//!
//! Finds action items assigned to the tracked person, commitments the tracked
//! person or the counterpart volunteer, and the deadlines mentioned around
//! them. Everything here is pure: text in, [`ExtractionResult`] out.

mod classifier;
mod context;
mod deadline;
mod models;
mod normalizer;
pub mod patterns;
mod pipeline;
mod reference_date;

pub use classifier::LineClassifier;
pub use context::Transcript;
pub use deadline::{resolve, RuleFn, DEADLINE_RULES};
pub use models::{Deadline, ExtractionResult, Responsible, TaskKind, TaskRecord};
pub use normalizer::{clean_line, dedupe_key, is_substantive, speaker_label};
pub use pipeline::Extractor;
pub use reference_date::infer_reference_date;
