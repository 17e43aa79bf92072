// WHY: name detection and sentence-end repair need neighbouring words, so they
// live at line level; lookahead never crosses into the next line

use std::collections::HashSet;

use tracing::debug;

use super::error::NormalizerError;
use super::unit::{NameSet, TextUnit};
use super::word::{Word, WordMarker, WordOption};

/// Speech-tag verbs that mark a preceding `?`/`!` as the end of speech, not of the sentence
pub const DEFAULT_SPEECH_VERBS: &[&str] = &["said", "asked"];

/// How many following words are searched for a speech verb
const SPEECH_VERB_LOOKAHEAD: usize = 3;

/// Speech verbs as an owned set
pub fn default_speech_verbs() -> HashSet<String> {
    DEFAULT_SPEECH_VERBS.iter().map(|verb| verb.to_string()).collect()
}

/// A run of words up to the next newline
#[derive(Debug, Clone)]
pub struct Line {
    words: Vec<Word>,
    original: String,
    speech_verbs: HashSet<String>,
}

impl Line {
    /// Split `text` on spaces using the default speech verbs
    pub fn parse(text: &str) -> Result<Self, NormalizerError> {
        Self::parse_with(text, &default_speech_verbs())
    }

    /// Split `text` on spaces; every word gets British speech marks converted
    pub fn parse_with(text: &str, speech_verbs: &HashSet<String>) -> Result<Self, NormalizerError> {
        let words = text
            .split(' ')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(|token| Word::with_options(token, &[WordOption::ConvertUkSpeech]))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            words,
            original: text.to_string(),
            speech_verbs: speech_verbs.clone(),
        })
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn speech_verbs(&self) -> &HashSet<String> {
        &self.speech_verbs
    }

    /// Copy `words`, giving every word that ends in `?`/`!` without a period a stabilizer.
    ///
    /// A comma goes in when the sentence carries on (the next word is lowercase, or a
    /// speech verb follows closely); otherwise a period. `words` is left untouched.
    pub fn insert_sentence_ends(&self, words: &[Word]) -> Vec<Word> {
        let mut stabilized = Vec::with_capacity(words.len());

        for (index, word) in words.iter().enumerate() {
            let mut copy = word.clone();

            if copy.tail_has_emotional_punctuation() && !copy.is_sentence_end() {
                let continues = words.get(index + 1).is_some_and(|next| {
                    next.has_all_lowercase_body() || self.speech_verb_ahead(words, index + 1)
                });

                if continues {
                    copy.insert_comma();
                } else {
                    copy.insert_period();
                }
            }

            stabilized.push(copy);
        }

        stabilized
    }

    /// Normalize with `seen` carrying the names already met earlier in the document;
    /// only a name's first occurrence gets [`WordMarker::FirstName`]
    pub fn normalize_tracking(&mut self, names: &NameSet, seen: &mut NameSet) {
        self.words = self.insert_sentence_ends(&self.words);

        for word in &mut self.words {
            let body = word.body();

            if names.contains(&body) {
                if seen.insert(body) {
                    word.add_marker(WordMarker::FirstName);
                }
                continue;
            }

            word.normalize(names);
        }
    }

    fn speech_verb_ahead(&self, words: &[Word], start: usize) -> bool {
        words
            .iter()
            .skip(start)
            .take(SPEECH_VERB_LOOKAHEAD)
            .any(|word| self.speech_verbs.contains(&word.body()))
    }
}

impl TextUnit for Line {
    fn collect_names(&self) -> NameSet {
        let words = self.insert_sentence_ends(&self.words);
        let mut names = NameSet::new();

        for pair in words.windows(2) {
            let (previous, current) = (&pair[0], &pair[1]);

            if current.has_all_lowercase_body() {
                continue;
            }

            // Capitalised because a sentence (or speech) starts here
            if previous.is_sentence_end() || current.might_be_sentence_start() {
                continue;
            }
            if previous.might_be_sentence_end() {
                continue;
            }

            names.insert(current.body());
        }

        if !names.is_empty() {
            debug!(line = %self.original, ?names, "detected names");
        }
        names
    }

    fn normalize(&mut self, names: &NameSet) {
        self.normalize_tracking(names, &mut NameSet::new());
    }

    fn render(&self) -> String {
        self.words
            .iter()
            .map(Word::render)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::word::WordOperation;

    fn line(text: &str) -> Line {
        Line::parse(text).expect("line should parse")
    }

    fn names(list: &[&str]) -> NameSet {
        list.iter().map(|name| name.to_string()).collect()
    }

    fn stabilized(text: &str) -> String {
        let line = line(text);
        line.insert_sentence_ends(line.words())
            .iter()
            .map(Word::render)
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_split_on_spaces() {
        let line = line("this  is <i>line</i> one.");
        let words: Vec<_> = line.words().iter().map(Word::render).collect();
        assert_eq!(words, vec!["this", "is", "<i>line</i>", "one."]);
        assert_eq!(line.original(), "this  is <i>line</i> one.");
    }

    #[test]
    fn test_words_get_uk_speech_converted() {
        let line = line("‘Come here,’ he said.");
        assert_eq!(line.render(), "“Come here,” he said.");
    }

    #[test]
    fn test_name_exemption() {
        let mut line = line("The dog barked. Max ran.");
        line.normalize(&names(&["Max"]));
        assert_eq!(line.render(), "the dog barked. Max ran.");
    }

    #[test]
    fn test_first_name_marker() {
        let mut line = line("Max saw Max.");
        line.normalize(&names(&["Max"]));

        assert_eq!(line.words()[0].markers(), &[WordMarker::FirstName]);
        assert!(line.words()[2].markers().is_empty());
        assert_eq!(line.words()[1].operations(), &[WordOperation::Normalized]);
    }

    #[test]
    fn test_first_name_marker_respects_names_seen_earlier() {
        let mut seen = names(&["Max"]);
        let mut line = line("Then Max saw Ada.");
        line.normalize_tracking(&names(&["Max", "Ada"]), &mut seen);

        assert!(line.words()[1].markers().is_empty());
        assert_eq!(line.words()[3].markers(), &[WordMarker::FirstName]);
        assert_eq!(seen, names(&["Max", "Ada"]));
    }

    #[test]
    fn test_comma_before_lowercase_continuation() {
        assert_eq!(stabilized("“Stop!” she said."), "“Stop!,” she said.");
    }

    #[test]
    fn test_comma_before_nearby_speech_verb() {
        assert_eq!(stabilized("“Stop!” Max said."), "“Stop!,” Max said.");
        assert_eq!(stabilized("“Why?” Old Tom asked."), "“Why?,” Old Tom asked.");
    }

    #[test]
    fn test_period_when_speech_verb_is_out_of_reach() {
        assert_eq!(
            stabilized("“Run!” Tom and Ann said."),
            "“Run!.” Tom and Ann said."
        );
    }

    #[test]
    fn test_period_before_new_sentence() {
        assert_eq!(stabilized("What? Nothing."), "What?. Nothing.");
        assert_eq!(stabilized("Really?"), "Really?.");
        assert_eq!(stabilized("Done?. Yes."), "Done?. Yes.");
    }

    #[test]
    fn test_insert_sentence_ends_leaves_original_words() {
        let line = line("What? Nothing.");
        let copies = line.insert_sentence_ends(line.words());

        assert_eq!(copies[0].unwrapped(), "What?.");
        assert_eq!(line.words()[0].unwrapped(), "What?");
        assert!(line.words()[0].operations().is_empty());
    }

    #[test]
    fn test_collect_names_mid_sentence() {
        let line = line("I met Alice and Bob today.");
        assert_eq!(line.collect_names(), names(&["Alice", "Bob"]));
    }

    #[test]
    fn test_collect_names_skips_sentence_starts() {
        assert_eq!(line("He left. Then Tom came.").collect_names(), names(&["Tom"]));
        assert!(line("She asked: Why not?").collect_names().is_empty());
        assert!(line("He said “Hello there.”").collect_names().is_empty());
    }

    #[test]
    fn test_collect_names_sees_inferred_sentence_ends() {
        let line = line("“Run!” Tom shouted.");
        assert!(line.collect_names().is_empty());
        assert_eq!(line.render(), "“Run!” Tom shouted.");
    }

    #[test]
    fn test_collect_names_uses_body_without_markup() {
        let line = line("It was <i>Watson</i>, of course.");
        assert_eq!(line.collect_names(), names(&["Watson"]));
    }

    #[test]
    fn test_normalize_inserts_sentence_ends() {
        let mut line = line("“Stop!” She ran. Why? Nobody knew!");
        line.normalize(&NameSet::new());
        assert_eq!(line.render(), "“stop!.” she ran. why?. nobody knew!.");
    }

    #[test]
    fn test_custom_speech_verbs() {
        let verbs: HashSet<String> = ["whispered".to_string()].into_iter().collect();
        let line = Line::parse_with("“Hush!” Ann whispered.", &verbs).unwrap();
        let stabilized: Vec<_> = line
            .insert_sentence_ends(line.words())
            .iter()
            .map(Word::render)
            .collect();
        assert_eq!(stabilized[0], "“Hush!,”");
    }
}
