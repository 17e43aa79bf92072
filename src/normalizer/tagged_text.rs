// WHY: word-level text edits must never see inline markup, yet every <i>/<b> tag
// has to come back out at the same spot once the edits are done

use super::error::NormalizerError;

/// How an insertion behaves when it lands exactly on a tag boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsertMode {
    /// Shift the tag right; the inserted char renders before the tag
    #[default]
    ForceTagShift,
    /// Keep the tag in place; the inserted char renders after the tag
    AvoidTagShift,
}

/// Markup extracted from the text, anchored between two plain-text characters
#[derive(Debug, Clone, PartialEq, Eq)]
struct Tag {
    markup: String,
    /// Char offset into the tag-free text
    offset: usize,
}

/// Plain text with its inline tags lifted out and tracked by position.
///
/// ```
/// use prose_normalizer::normalizer::{InsertMode, TaggedText};
///
/// let mut text = TaggedText::new("<i>Martin</i>’s");
/// assert_eq!(text.text(), "Martin’s");
///
/// text.insert_char('!', 8, InsertMode::ForceTagShift);
/// assert_eq!(text.render(), "<i>Martin</i>’s!");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedText {
    text: String,
    /// Kept in encounter order
    tags: Vec<Tag>,
}

impl TaggedText {
    /// Extract every `<...>` span from `raw`.
    ///
    /// A `>` with no open `<` before it is ordinary text, as is a `<` that never closes.
    pub fn new(raw: &str) -> Self {
        let mut chars: Vec<char> = raw.chars().collect();
        let mut tags = Vec::new();

        let mut index = 0;
        let mut open: Option<usize> = None;
        while index < chars.len() {
            match chars[index] {
                '<' if open.is_none() => {
                    open = Some(index);
                }
                '>' => {
                    if let Some(start) = open.take() {
                        let markup: String = chars.drain(start..=index).collect();
                        tags.push(Tag { markup, offset: start });
                        // Rescan from the start of the now shorter text
                        index = 0;
                        continue;
                    }
                }
                _ => {}
            }
            index += 1;
        }

        Self {
            text: chars.into_iter().collect(),
            tags,
        }
    }

    /// The tag-free text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length of the tag-free text in chars
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Number of extracted tags
    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }

    /// The text with every tag put back at its recorded offset
    pub fn render(&self) -> String {
        self.wrap(&self.text)
    }

    /// Put this text's tags onto `other`, which must have the same char count as [`Self::text`]
    pub fn impress_tags_onto(&self, other: &str) -> Result<String, NormalizerError> {
        let expected = self.char_len();
        let actual = other.chars().count();
        if expected != actual {
            return Err(NormalizerError::LengthMismatch { expected, actual });
        }

        Ok(self.wrap(other))
    }

    /// Insert `ch` at char `index`; out-of-range indices are ignored
    pub fn insert_char(&mut self, ch: char, index: usize, mode: InsertMode) {
        if index > self.char_len() {
            return;
        }

        let byte_index = byte_offset(&self.text, index);
        self.text.insert(byte_index, ch);

        for tag in &mut self.tags {
            if tag.offset > index || (tag.offset == index && mode == InsertMode::ForceTagShift) {
                tag.offset += 1;
            }
        }
    }

    /// Insert `insert` one char at a time starting at `index`
    pub fn insert_str(&mut self, insert: &str, index: usize, mode: InsertMode) {
        for (position, ch) in insert.chars().enumerate() {
            self.insert_char(ch, index + position, mode);
        }
    }

    /// Lower-case the text in place.
    ///
    /// Chars whose lowercase form expands to several chars are left as they are
    /// so tag offsets stay valid.
    pub fn to_lowercase(&mut self) {
        self.text = self
            .text
            .chars()
            .map(|ch| {
                let mut lower = ch.to_lowercase();
                match (lower.next(), lower.next()) {
                    (Some(single), None) => single,
                    _ => ch,
                }
            })
            .collect();
    }

    fn wrap(&self, text: &str) -> String {
        let mut wrapped = text.to_string();

        // WHY: last-encountered first; a tag never sits left of one inserted after it
        for tag in self.tags.iter().rev() {
            let byte_index = byte_offset(&wrapped, tag.offset);
            wrapped.insert_str(byte_index, &tag.markup);
        }

        wrapped
    }
}

impl std::fmt::Display for TaggedText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

/// Byte position of the `char_index`-th char, or the end of the string
pub(crate) fn byte_offset(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}
