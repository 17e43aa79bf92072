use std::collections::HashSet;

/// Probable proper nouns, compared against word bodies
pub type NameSet = HashSet<String>;

/// Capabilities shared by every level of the text tree (word, line, paragraph, document)
pub trait TextUnit {
    /// Names this unit (and everything below it) detected
    fn collect_names(&self) -> NameSet;

    /// Normalize in place, leaving words whose body is in `names` cased as they are
    fn normalize(&mut self, names: &NameSet);

    /// The unit as text, with inline markup
    fn render(&self) -> String;
}
