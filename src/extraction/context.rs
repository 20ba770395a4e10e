//! Transcript line store and neighbouring-line context windows

use crate::extraction::normalizer::{clean_line, is_substantive};

/// Raw transcript split into lines
#[derive(Debug, Clone)]
pub struct Transcript<'a> {
    lines: Vec<&'a str>,
}

impl<'a> Transcript<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.split('\n').collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|l| l.trim().is_empty())
    }

    /// Trimmed lines with their 0-based index
    pub fn iter(&self) -> impl Iterator<Item = (usize, &'a str)> + '_ {
        self.lines.iter().enumerate().map(|(i, l)| (i, l.trim()))
    }

    /// The final `count` lines, trimmed
    pub fn tail(&self, count: usize) -> impl Iterator<Item = &'a str> + '_ {
        let start = self.lines.len().saturating_sub(count);
        self.lines[start..].iter().map(|l| l.trim())
    }

    /// Normalized neighbours within `window` lines of `index`.
    ///
    /// Skips the line itself, blank lines, and neighbours whose normalized
    /// text is too short to carry meaning.
    pub fn context(&self, index: usize, window: usize) -> Vec<String> {
        self.neighbours(index, window)
            .map(clean_line)
            .filter(|cleaned| is_substantive(cleaned))
            .collect()
    }

    /// Raw neighbours within `radius` lines of `index`, joined by spaces
    pub fn surrounding_text(&self, index: usize, radius: usize) -> String {
        self.neighbours(index, radius).collect::<Vec<_>>().join(" ")
    }

    fn neighbours(&self, index: usize, window: usize) -> impl Iterator<Item = &'a str> + '_ {
        let start = index.saturating_sub(window);
        let end = index.saturating_add(window).saturating_add(1).min(self.lines.len());
        (start..end)
            .filter(move |&i| i != index)
            .map(move |i| self.lines[i].trim())
            .filter(|l| !l.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Fabiana: bom dia, tudo bem com você?
Victor: tudo ótimo, obrigado

Fabiana: precisamos da proposta comercial
Victor: ok
Victor: vou te mandar a proposta até sexta
Fabiana: perfeito, aguardo o material
Fabiana: depois marcamos uma reunião";

    #[test]
    fn context_excludes_target_blank_and_short_lines() {
        let transcript = Transcript::new(SAMPLE);
        let context = transcript.context(5, 3);

        assert_eq!(
            context,
            vec![
                "Precisamos da proposta comercial".to_string(),
                "Perfeito, aguardo o material".to_string(),
                "Depois marcamos uma reunião".to_string(),
            ]
        );
    }

    #[test]
    fn context_clamps_to_transcript_bounds() {
        let transcript = Transcript::new(SAMPLE);
        let context = transcript.context(0, 8);

        assert_eq!(context.first().map(String::as_str), Some("Tudo ótimo, obrigado"));
        assert_eq!(context.len(), 5);
    }

    #[test]
    fn surrounding_text_keeps_raw_lines() {
        let transcript = Transcript::new(SAMPLE);
        let text = transcript.surrounding_text(1, 1);

        assert_eq!(text, "Fabiana: bom dia, tudo bem com você?");
    }

    #[test]
    fn tail_returns_last_lines() {
        let transcript = Transcript::new(SAMPLE);
        let tail: Vec<_> = transcript.tail(2).collect();
        assert_eq!(
            tail,
            vec![
                "Fabiana: perfeito, aguardo o material",
                "Fabiana: depois marcamos uma reunião"
            ]
        );
        assert_eq!(transcript.tail(100).count(), transcript.len());
    }

    #[test]
    fn empty_text_is_empty_transcript() {
        assert!(Transcript::new("").is_empty());
        assert!(Transcript::new("\n  \n").is_empty());
        assert!(!Transcript::new(SAMPLE).is_empty());
    }
}
