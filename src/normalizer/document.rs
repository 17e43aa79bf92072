use std::collections::HashSet;

use tracing::debug;

use super::error::NormalizerError;
use super::fragment::Fragment;
use super::line::default_speech_verbs;
use super::unit::{NameSet, TextUnit};

/// Pseudo-markup tags and their Markdown replacements
const MARKDOWN_TAGS: &[(&str, &str)] = &[
    ("<i>", "*"),
    ("</i>", "*"),
    ("<b>", "**"),
    ("</b>", "**"),
];

/// One split of an e-book: paragraphs separated by blank lines
#[derive(Debug, Clone)]
pub struct Document {
    fragments: Vec<Fragment>,
    original: String,
}

impl Document {
    pub fn parse(text: &str) -> Result<Self, NormalizerError> {
        Self::parse_with(text, &default_speech_verbs())
    }

    /// Split `text` on `\n\n`, dropping blank paragraphs
    pub fn parse_with(text: &str, speech_verbs: &HashSet<String>) -> Result<Self, NormalizerError> {
        let fragments = text
            .split("\n\n")
            .filter(|paragraph| !paragraph.trim().is_empty())
            .map(|paragraph| Fragment::parse_with(paragraph, speech_verbs))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            fragments,
            original: text.to_string(),
        })
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    /// Collect names across the whole document, then normalize with the names and
    /// their possessive forms exempt. Returns the names that were detected.
    pub fn run_normalization_pass(&mut self) -> NameSet {
        let names = self.collect_names();
        let extended = extend_names(&names);

        debug!(
            names = names.len(),
            paragraphs = self.fragments.len(),
            "running normalization pass"
        );
        self.normalize(&extended);

        names
    }

    /// Paragraphs joined with blank lines, inline tags still in pseudo-markup form
    pub fn render_pseudo_markdown(&self) -> String {
        self.fragments
            .iter()
            .map(Fragment::render)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl TextUnit for Document {
    fn collect_names(&self) -> NameSet {
        self.fragments.iter().flat_map(Fragment::collect_names).collect()
    }

    fn normalize(&mut self, names: &NameSet) {
        let mut seen = NameSet::new();
        for fragment in &mut self.fragments {
            fragment.normalize_tracking(names, &mut seen);
        }
    }

    fn render(&self) -> String {
        MARKDOWN_TAGS
            .iter()
            .fold(self.render_pseudo_markdown(), |content, (tag, markdown)| {
                content.replace(tag, markdown)
            })
    }
}

/// Every name plus its possessive form (`Max’s`, or `James’` for names ending in `s`)
pub fn extend_names(names: &NameSet) -> NameSet {
    let mut extended = NameSet::with_capacity(names.len() * 2);

    for name in names {
        let possessive = if name.ends_with('s') {
            format!("{name}\u{2019}")
        } else {
            format!("{name}\u{2019}s")
        };

        extended.insert(name.clone());
        extended.insert(possessive);
    }

    extended
}
