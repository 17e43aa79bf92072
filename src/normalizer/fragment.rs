use std::collections::HashSet;

use super::error::NormalizerError;
use super::line::{default_speech_verbs, Line};
use super::unit::{NameSet, TextUnit};

/// A paragraph: lines separated by single newlines
#[derive(Debug, Clone)]
pub struct Fragment {
    lines: Vec<Line>,
    original: String,
}

impl Fragment {
    pub fn parse(text: &str) -> Result<Self, NormalizerError> {
        Self::parse_with(text, &default_speech_verbs())
    }

    /// Split `text` on `\n`, dropping blank lines
    pub fn parse_with(text: &str, speech_verbs: &HashSet<String>) -> Result<Self, NormalizerError> {
        let lines = text
            .split('\n')
            .filter(|line| !line.trim().is_empty())
            .map(|line| Line::parse_with(line, speech_verbs))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            lines,
            original: text.to_string(),
        })
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    /// Normalize every line, sharing `seen` so first-name markers stay document-wide
    pub fn normalize_tracking(&mut self, names: &NameSet, seen: &mut NameSet) {
        for line in &mut self.lines {
            line.normalize_tracking(names, seen);
        }
    }
}

impl TextUnit for Fragment {
    fn collect_names(&self) -> NameSet {
        self.lines.iter().flat_map(Line::collect_names).collect()
    }

    fn normalize(&mut self, names: &NameSet) {
        self.normalize_tracking(names, &mut NameSet::new());
    }

    fn render(&self) -> String {
        self.lines
            .iter()
            .map(Line::render)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
