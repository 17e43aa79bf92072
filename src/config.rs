// WHY: the preparation table and speech verbs are data, passed into the pipeline
// explicitly instead of living in statics

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

use crate::normalizer::DEFAULT_SPEECH_VERBS;

/// A literal find/replace applied to a split before it is parsed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    pub from: String,
    pub to: String,
}

impl Replacement {
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

/// Configuration for a normalization run
///
/// # Example
/// ```
/// use prose_normalizer::config::NormalizerConfig;
///
/// let config = NormalizerConfig::from_toml_str(r#"
/// speech_verbs = ["said", "asked", "whispered"]
///
/// [[replacements]]
/// from = "..."
/// to = "…"
/// "#).unwrap();
///
/// assert_eq!(config.prepare("Wait..."), "Wait…");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Applied in order; later entries see the output of earlier ones
    pub replacements: Vec<Replacement>,
    /// Verbs that mark `?`/`!` as the end of speech rather than of the sentence
    pub speech_verbs: Vec<String>,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            replacements: default_replacements(),
            speech_verbs: DEFAULT_SPEECH_VERBS.iter().map(|verb| verb.to_string()).collect(),
        }
    }
}

impl NormalizerConfig {
    /// Parse a TOML config; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Invalid normalizer config")?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Failed to load config file {}", path.display()))?;

        debug!(
            "Loaded config from {}: {} replacements, {} speech verbs",
            path.display(),
            config.replacements.len(),
            config.speech_verbs.len()
        );
        Ok(config)
    }

    /// Reject entries that would corrupt the text
    pub fn validate(&self) -> Result<()> {
        if let Some(position) = self.replacements.iter().position(|r| r.from.is_empty()) {
            anyhow::bail!("Replacement #{} has an empty `from` pattern", position + 1);
        }
        if self.speech_verbs.iter().any(|verb| verb.contains(' ')) {
            anyhow::bail!("Speech verbs must be single words");
        }
        Ok(())
    }

    /// Run the replacement table over `text`
    pub fn prepare(&self, text: &str) -> String {
        self.replacements
            .iter()
            .fold(text.to_string(), |prepared, replacement| {
                prepared.replace(&replacement.from, &replacement.to)
            })
    }

    pub fn speech_verb_set(&self) -> HashSet<String> {
        self.speech_verbs.iter().cloned().collect()
    }
}

/// Dash, ellipsis and spacing clean-up applied to every split by default
pub fn default_replacements() -> Vec<Replacement> {
    vec![
        Replacement::new("\u{00A0}", " "),
        Replacement::new("\u{2014}", " -- "),
        Replacement::new("-- \u{201D}", "--.\u{201D}"),
        Replacement::new("\u{2013}", " -- "),
        Replacement::new("  ", " "),
        Replacement::new(" . . . .", "\u{2026}."),
        Replacement::new(" . . .", "\u{2026}"),
        Replacement::new("....", "\u{2026}."),
        Replacement::new("...", "\u{2026}"),
        Replacement::new("\u{2026} \u{201D}", "\u{2026}.\u{201D}"),
        Replacement::new("\u{2026}\u{201D}", "\u{2026}.\u{201D}"),
        // Closing tags that drifted across a space
        Replacement::new(" </i>", "</i> "),
        Replacement::new(" </b>", "</b> "),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = NormalizerConfig::default();
        assert_eq!(config.replacements.len(), 13);
        assert_eq!(config.speech_verbs, vec!["said", "asked"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_prepare_dashes_and_ellipses() {
        let config = NormalizerConfig::default();

        assert_eq!(config.prepare("yes\u{2014}no"), "yes -- no");
        assert_eq!(config.prepare("well . . . maybe"), "well… maybe");
        assert_eq!(config.prepare("wait...."), "wait….");
        assert_eq!(config.prepare("“Oh…”"), "“Oh….”");
        assert_eq!(config.prepare("a\u{00A0}b"), "a b");
    }

    #[test]
    fn test_prepare_moves_drifted_closing_tags() {
        let config = NormalizerConfig::default();
        assert_eq!(config.prepare("<i>very </i>tired"), "<i>very</i> tired");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = NormalizerConfig::from_toml_str("speech_verbs = [\"said\", \"cried\"]").unwrap();
        assert_eq!(config.speech_verbs, vec!["said", "cried"]);
        assert_eq!(config.replacements, default_replacements());
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = NormalizerConfig::from_toml_str("").unwrap();
        assert_eq!(config, NormalizerConfig::default());
    }

    #[test]
    fn test_replacements_from_toml_replace_defaults() {
        let config = NormalizerConfig::from_toml_str(
            "[[replacements]]\nfrom = \"--\"\nto = \"\u{2014}\"\n",
        )
        .unwrap();
        assert_eq!(config.replacements, vec![Replacement::new("--", "\u{2014}")]);
        assert_eq!(config.prepare("a--b"), "a\u{2014}b");
    }

    #[test]
    fn test_invalid_configs_rejected() {
        assert!(NormalizerConfig::from_toml_str("[[replacements]]\nfrom = \"\"\nto = \"x\"\n").is_err());
        assert!(NormalizerConfig::from_toml_str("speech_verbs = [\"went on\"]").is_err());
        assert!(NormalizerConfig::from_toml_str("speech_verbs = 3").is_err());
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = NormalizerConfig::load(Path::new("/definitely/not/here.toml"));
        assert!(result.is_err());
    }
}
