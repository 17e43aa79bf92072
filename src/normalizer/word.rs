// WHY: a word is the smallest unit the punctuation heuristics reason about;
// head/body/tail are recomputed from the current text because inserts move them

use tracing::trace;

use super::error::NormalizerError;
use super::tagged_text::{InsertMode, TaggedText};
use super::unit::{NameSet, TextUnit};

/// Leading delimiters that make up a word's head
pub const HEAD_DELIMITERS: &[char] = &['\'', '"', '\u{2018}', '\u{201C}', '('];

/// Trailing delimiters that make up a word's tail
pub const TAIL_DELIMITERS: &[char] = &[
    '\'', '"', '\u{2019}', '\u{201D}', '\u{2026}', ')', '?', '!', '.', ',', ':', ';',
];

/// Emotional punctuation
pub const EMOTIONAL_PUNCTUATION: &[char] = &['?', '!'];

/// Quote glyphs that can open or close speech
pub const SPEECH_MARKERS: &[char] = &['\u{201C}', '\u{201D}', '"', '\''];

/// Tail chars hinting that a sentence may end here
pub const SOFT_SENTENCE_ENDS: &[char] = &[':', '?', '\u{2026}', '!'];

/// Tail chars that put a closing single quote after the end of a sentence or clause
const CLAUSE_STOPS: &[char] = &['\u{2026}', '.', ','];

const OPEN_SINGLE_CURLY: char = '\u{2018}';
const CLOSE_SINGLE_CURLY: char = '\u{2019}';
const OPEN_DOUBLE_CURLY: char = '\u{201C}';
const CLOSE_DOUBLE_CURLY: char = '\u{201D}';

/// Processing requested when a word is built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordOption {
    /// Rewrite British single-quote speech marks into international double quotes
    ConvertUkSpeech,
}

/// Edits applied to a word, in the order they happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordOperation {
    InsertedSentenceEnd,
    InsertedComma,
    Normalized,
}

/// Annotations attached to a word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordMarker {
    /// First occurrence of a detected name in its line
    FirstName,
}

/// A single space-delimited token with its inline markup
#[derive(Debug, Clone)]
pub struct Word {
    text: TaggedText,
    original: String,
    operations: Vec<WordOperation>,
    markers: Vec<WordMarker>,
}

impl Word {
    /// Build a word without any extra processing
    pub fn new(raw: &str) -> Result<Self, NormalizerError> {
        Self::with_options(raw, &[])
    }

    /// Build a word, applying `options` to the tag-free text before the tags go back on
    pub fn with_options(raw: &str, options: &[WordOption]) -> Result<Self, NormalizerError> {
        let source = TaggedText::new(raw);
        let mut unwrapped = source.text().to_string();

        for option in options {
            match option {
                WordOption::ConvertUkSpeech => {
                    unwrapped = convert_uk_speech(&unwrapped);
                }
            }
        }

        let rewrapped = source.impress_tags_onto(&unwrapped)?;

        Ok(Self {
            text: TaggedText::new(&rewrapped),
            original: raw.to_string(),
            operations: Vec::new(),
            markers: Vec::new(),
        })
    }

    /// Current text without markup
    pub fn unwrapped(&self) -> &str {
        self.text.text()
    }

    /// Current text with markup
    pub fn wrapped(&self) -> String {
        self.text.render()
    }

    /// The token exactly as it was handed to the constructor
    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn operations(&self) -> &[WordOperation] {
        &self.operations
    }

    pub fn markers(&self) -> &[WordMarker] {
        &self.markers
    }

    /// Record an operation; returns false if it was already recorded
    pub fn add_operation(&mut self, operation: WordOperation) -> bool {
        if self.operations.contains(&operation) {
            return false;
        }
        self.operations.push(operation);
        true
    }

    /// Record a marker; returns false if it was already recorded
    pub fn add_marker(&mut self, marker: WordMarker) -> bool {
        if self.markers.contains(&marker) {
            return false;
        }
        self.markers.push(marker);
        true
    }

    pub fn head(&self) -> String {
        let (head, _, _) = dissect(self.unwrapped());
        head.iter().collect()
    }

    pub fn body(&self) -> String {
        let (_, body, _) = dissect(self.unwrapped());
        body.iter().collect()
    }

    pub fn tail(&self) -> String {
        let (_, _, tail) = dissect(self.unwrapped());
        tail.iter().collect()
    }

    /// Tail contains `?` or `!`
    pub fn tail_has_emotional_punctuation(&self) -> bool {
        self.tail().chars().any(|ch| EMOTIONAL_PUNCTUATION.contains(&ch))
    }

    /// Tail contains a period
    pub fn is_sentence_end(&self) -> bool {
        self.tail().contains('.')
    }

    /// Tail contains any of `: ? … !`
    pub fn might_be_sentence_end(&self) -> bool {
        self.tail().chars().any(|ch| SOFT_SENTENCE_ENDS.contains(&ch))
    }

    /// Head contains a speech marker
    pub fn might_be_sentence_start(&self) -> bool {
        self.head().chars().any(|ch| SPEECH_MARKERS.contains(&ch))
    }

    /// Every letter of the body is lowercase; an empty body qualifies
    pub fn has_all_lowercase_body(&self) -> bool {
        self.body()
            .chars()
            .filter(|ch| ch.is_alphabetic())
            .all(char::is_lowercase)
    }

    /// Insert a period unless the word already has one
    pub fn insert_period(&mut self) {
        if self.insert_sentence_stabilizer('.') {
            self.add_operation(WordOperation::InsertedSentenceEnd);
        }
    }

    /// Insert a comma unless the word already has one
    pub fn insert_comma(&mut self) {
        if self.insert_sentence_stabilizer(',') {
            self.add_operation(WordOperation::InsertedComma);
        }
    }

    /// Insert `stabilizer` after trailing emotional punctuation, before a closing
    /// speech marker, or at the very end; returns whether anything was inserted
    fn insert_sentence_stabilizer(&mut self, stabilizer: char) -> bool {
        let chars: Vec<char> = self.unwrapped().chars().collect();

        if chars.contains(&stabilizer) {
            return false;
        }

        let mut position = chars.len();
        for (index, ch) in chars.iter().enumerate().rev() {
            if ch.is_alphabetic() {
                break;
            }
            if EMOTIONAL_PUNCTUATION.contains(ch) {
                position = index + 1;
                break;
            }
            if SPEECH_MARKERS.contains(ch) {
                position = index;
                break;
            }
        }

        trace!(word = %self.original, %stabilizer, position, "inserting sentence stabilizer");
        self.text.insert_char(stabilizer, position, InsertMode::ForceTagShift);
        true
    }
}

impl TextUnit for Word {
    fn collect_names(&self) -> NameSet {
        NameSet::new()
    }

    fn normalize(&mut self, _names: &NameSet) {
        self.text.to_lowercase();
        self.add_operation(WordOperation::Normalized);
    }

    fn render(&self) -> String {
        self.wrapped()
    }
}

/// Split a word into head, body and tail. The body is empty when head and tail overlap.
fn dissect(text: &str) -> (Vec<char>, Vec<char>, Vec<char>) {
    let chars: Vec<char> = text.chars().collect();
    let head_len = head_len(&chars);
    let tail_len = tail_len(&chars);

    let head = chars[..head_len].to_vec();
    let tail = chars[chars.len() - tail_len..].to_vec();
    let body = if head_len + tail_len > chars.len() {
        Vec::new()
    } else {
        chars[head_len..chars.len() - tail_len].to_vec()
    };

    (head, body, tail)
}

fn head_len(chars: &[char]) -> usize {
    chars
        .iter()
        .take_while(|ch| HEAD_DELIMITERS.contains(*ch))
        .count()
}

fn tail_len(chars: &[char]) -> usize {
    chars
        .iter()
        .rev()
        .take_while(|ch| TAIL_DELIMITERS.contains(*ch))
        .count()
}

/// Rewrite British single curly quotes into international double quotes.
///
/// Only substitutes chars, so the result always has the same length as `text`.
/// A closing `’` right after an `s` is read as a possessive apostrophe.
pub fn convert_uk_speech(text: &str) -> String {
    let mut chars: Vec<char> = text.chars().collect();
    let (head, body, tail) = dissect(text);

    let is_name_case = body.first().is_some_and(|ch| ch.is_uppercase());
    let has_open_single = head.contains(&OPEN_SINGLE_CURLY);

    let tail_start = chars.len() - tail.len();
    let quote_index = tail.iter().position(|&ch| ch == CLOSE_SINGLE_CURLY);

    let is_possessive = quote_index.is_some_and(|quote| {
        let absolute = tail_start + quote;
        absolute > 0 && chars[absolute - 1] == 's'
    });
    let is_at_sentence_end = quote_index
        .is_some_and(|quote| tail[..quote].iter().any(|ch| CLAUSE_STOPS.contains(ch)));

    let head_replacement = if is_possessive || is_at_sentence_end || is_name_case {
        OPEN_DOUBLE_CURLY
    } else {
        '"'
    };
    let tail_replacement = if is_possessive {
        None
    } else if is_at_sentence_end {
        Some(CLOSE_DOUBLE_CURLY)
    } else if has_open_single {
        // The opening quote decides; a stray closing quote is left alone
        None
    } else {
        Some('"')
    };

    if has_open_single {
        for ch in chars.iter_mut().take(head.len()) {
            if *ch == OPEN_SINGLE_CURLY {
                *ch = head_replacement;
            }
        }
    }

    if let (Some(quote), Some(replacement)) = (quote_index, tail_replacement) {
        chars[tail_start + quote] = replacement;
    }

    chars.into_iter().collect()
}
