//! Line classification: direct assignments and volunteered commitments

use crate::config::ExtractionSettings;
use crate::extraction::models::TaskKind;
use crate::extraction::normalizer::speaker_label;
use crate::extraction::patterns::{
    RuleTable, ACTION_VERB_RE, COUNTERPART_COMMITMENT, DIRECT_ASSIGNMENT, EXCLUSION,
    PRODUCT_DESCRIPTION, PRODUCT_HAS_TEMPLATE, SELF_COMMITMENT, SELF_CONFIRMATION, SPEAKER,
};

/// Classifier for one tracked person and, optionally, one counterpart
#[derive(Debug, Clone)]
pub struct LineClassifier {
    direct_assignment: RuleTable,
    tracked_speaker: RuleTable,
    counterpart_speaker: Option<RuleTable>,
    product_has: Vec<RuleTable>,
}

impl LineClassifier {
    /// Compile the name-dependent tables for the configured people
    pub fn new(settings: &ExtractionSettings) -> crate::Result<Self> {
        let tracked = settings.tracked_person.trim();
        if tracked.is_empty() {
            return Err(crate::TaskliftError::Config(
                "extraction.tracked_person must not be empty".to_string(),
            ));
        }

        let counterpart_speaker = match settings.counterpart.trim() {
            "" => None,
            name => Some(RuleTable::compile_for("counterpart_speaker", SPEAKER, name)?),
        };

        let product_has = settings
            .product_names
            .iter()
            .filter(|p| !p.trim().is_empty())
            .map(|product| {
                RuleTable::compile_for(
                    "product_has",
                    &[("product_has", PRODUCT_HAS_TEMPLATE)],
                    product,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            direct_assignment: RuleTable::compile_for(
                "direct_assignment",
                DIRECT_ASSIGNMENT,
                tracked,
            )?,
            tracked_speaker: RuleTable::compile_for("tracked_speaker", SPEAKER, tracked)?,
            counterpart_speaker,
            product_has,
        })
    }

    /// Decide what kind of task a line expresses, if any
    pub fn classify(&self, line: &str) -> Option<TaskKind> {
        if self.is_direct_assignment(line) {
            Some(TaskKind::DirectAssignment)
        } else if self.is_self_commitment(line) {
            Some(TaskKind::SelfCommitment)
        } else if self.is_counterpart_commitment(line) {
            Some(TaskKind::CounterpartCommitment)
        } else {
            None
        }
    }

    /// Someone asks the tracked person to do something.
    ///
    /// When the tracked person is the speaker, only explicit acceptances
    /// count.
    pub fn is_direct_assignment(&self, line: &str) -> bool {
        let lowered = line.to_lowercase();

        if self.spoken_by_tracked_person(line) {
            return SELF_CONFIRMATION.is_match(&lowered);
        }

        match self.direct_assignment.first_match(&lowered) {
            Some(rule) => {
                if let Some(excluded) = EXCLUSION.first_match(&lowered) {
                    tracing::trace!(
                        "Rule {}/{} overridden by {}/{}",
                        self.direct_assignment.name(),
                        rule.name,
                        EXCLUSION.name(),
                        excluded.name
                    );
                    return false;
                }
                true
            }
            None => false,
        }
    }

    /// The tracked person volunteers to do something
    pub fn is_self_commitment(&self, line: &str) -> bool {
        if !self.spoken_by_tracked_person(line) {
            return false;
        }
        let lowered = line.to_lowercase();
        SELF_COMMITMENT.is_match(&lowered) && !EXCLUSION.is_match(&lowered)
    }

    /// The counterpart promises to do something
    pub fn is_counterpart_commitment(&self, line: &str) -> bool {
        let Some(speaker) = &self.counterpart_speaker else {
            return false;
        };
        if !Self::spoken_by(speaker, line) {
            return false;
        }
        COUNTERPART_COMMITMENT.is_match(&line.to_lowercase())
    }

    /// Whether a candidate line describes work rather than product features.
    ///
    /// A product-description match rejects the line outright; otherwise the
    /// line or its context must contain an action verb.
    pub fn is_action(&self, line: &str, context: &[String]) -> bool {
        let text = format!("{} {}", line, context.join(" ")).to_lowercase();

        let description = PRODUCT_DESCRIPTION
            .first_match(&text)
            .or_else(|| self.product_has.iter().find_map(|t| t.first_match(&text)));
        if let Some(rule) = description {
            tracing::trace!("Rejected as product description ('{}'): {}", rule.name, line);
            return false;
        }

        ACTION_VERB_RE.is_match(&text)
    }

    pub fn spoken_by_tracked_person(&self, line: &str) -> bool {
        Self::spoken_by(&self.tracked_speaker, line)
    }

    fn spoken_by(speaker: &RuleTable, line: &str) -> bool {
        speaker_label(line)
            .map(|label| speaker.is_match(&label.to_lowercase()))
            .unwrap_or(false)
    }
}
