// WHY: orchestrates prepare -> parse -> two-pass normalize -> render for each split
// Each split becomes an independent Document; nothing is shared between them

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Instant;
use tracing::{debug, info};

use crate::config::NormalizerConfig;
use crate::normalizer::{Document, TextUnit};

/// Supplier of pseudo-markdown splits, one string per document section
///
/// Implemented by whatever unpacks the e-book and flattens its HTML; the
/// normalizer only ever sees the resulting strings.
pub trait SplitSource {
    fn extract_pseudo_markdown_splits(&self) -> Result<Vec<String>>;
}

impl SplitSource for Vec<String> {
    fn extract_pseudo_markdown_splits(&self) -> Result<Vec<String>> {
        Ok(self.clone())
    }
}

impl SplitSource for [String] {
    fn extract_pseudo_markdown_splits(&self) -> Result<Vec<String>> {
        Ok(self.to_vec())
    }
}

/// A normalized split, ready to be written out
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NormalizedDocument {
    /// Position of the split in the source
    pub index: usize,
    /// Markdown output
    pub content: String,
    /// Names detected in the split, sorted
    pub names: Vec<String>,
    /// Characters in the split before preparation
    pub chars_in: u64,
    /// Characters in the rendered output
    pub chars_out: u64,
    /// Time spent preparing, parsing and normalizing
    pub processing_time_ms: u64,
}

/// Entry point for normalizing splits with a given configuration
#[derive(Debug, Clone)]
pub struct Normalizer {
    config: NormalizerConfig,
    speech_verbs: HashSet<String>,
}

impl Normalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        let speech_verbs = config.speech_verb_set();
        Self { config, speech_verbs }
    }

    pub fn with_default_config() -> Self {
        Self::new(NormalizerConfig::default())
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Normalize one split into Markdown
    pub fn normalize_split(&self, index: usize, split: &str) -> Result<NormalizedDocument> {
        let start_time = Instant::now();

        let prepared = self.config.prepare(split);
        let mut document = Document::parse_with(&prepared, &self.speech_verbs)
            .with_context(|| format!("Failed to parse split {index}"))?;

        let detected = document.run_normalization_pass();
        let content = document.render();

        let mut names: Vec<String> = detected.into_iter().collect();
        names.sort();

        let processing_time_ms = start_time.elapsed().as_millis() as u64;
        debug!(
            "Normalized split {}: {} paragraphs, {} names in {}ms",
            index,
            document.fragments().len(),
            names.len(),
            processing_time_ms
        );

        Ok(NormalizedDocument {
            index,
            chars_in: split.chars().count() as u64,
            chars_out: content.chars().count() as u64,
            content,
            names,
            processing_time_ms,
        })
    }

    /// Normalize every split `source` yields, in order; stops at the first failure
    pub fn normalize_source<S: SplitSource + ?Sized>(&self, source: &S) -> Result<Vec<NormalizedDocument>> {
        self.normalize_each(source)?.collect()
    }

    /// Lazily normalize each split `source` yields, one result per split
    ///
    /// A failing split does not affect the ones after it.
    pub fn normalize_each<'a, S: SplitSource + ?Sized>(
        &'a self,
        source: &S,
    ) -> Result<impl Iterator<Item = Result<NormalizedDocument>> + 'a> {
        let splits = source.extract_pseudo_markdown_splits()?;
        info!("Normalizing {} splits", splits.len());

        Ok(splits
            .into_iter()
            .enumerate()
            .map(move |(index, split)| self.normalize_split(index, &split)))
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::with_default_config()
    }
}

/// Wrap a rendered document in a bare HTML page, one `<p>` per paragraph
pub fn render_debug_html(document: &str) -> String {
    let body = document
        .split("\n\n")
        .map(|paragraph| format!("<p>{paragraph}</p>"))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("<html><head></head><body>{body}</body></html>")
}
