// Pseudo-markdown splits with known normalized Markdown
// WHY: Golden-file testing requires deterministic input/output pairs for validation

#![allow(dead_code)]

/// Narrative split: names found mid-line, British speech marks, italics, ellipsis
pub const NARRATIVE_SPLIT: &str = "Holmes sat by the fire.
He looked at Watson and smiled.

‘Where is Lestrade,’ asked Watson.

The <i>fog</i> was thick...";

/// Expected Markdown for NARRATIVE_SPLIT
/// WHY: the first word of a line can never be detected as a name, so `Holmes` is lowercased
pub const NARRATIVE_EXPECTED: &str = "holmes sat by the fire.
he looked at Watson and smiled.

“where is Lestrade,” asked Watson.

the *fog* was thick…";

pub const NARRATIVE_NAMES: &[&str] = &["Lestrade", "Watson"];

/// Exclamations and questions that need a stabilizer
pub const EXCLAMATION_SPLIT: &str = "“Stop!” said Holmes.
“Run!” Holmes cried. We ran.
Is it safe? I doubt it.";

/// Expected Markdown for EXCLAMATION_SPLIT
/// WHY: a comma goes in before a speech tag, a period where a new sentence starts
pub const EXCLAMATION_EXPECTED: &str = "“stop!,” said Holmes.
“run!.” Holmes cried. we ran.
is it safe?. i doubt it.";

/// A split with nothing but blank lines
pub const BLANK_SPLIT: &str = "\n\n   \n\n";

/// Bold text, an em dash and a closing tag that drifted across a space
pub const MARKUP_SPLIT: &str = "<b>Interlude</b>\n\nIt was <i>very </i>late\u{2014}too late.";

pub const MARKUP_EXPECTED: &str = "**interlude**\n\nit was *very* late -- too late.";

/// Config that teaches the normalizer a new speech verb
pub const CRIED_CONFIG: &str = r#"speech_verbs = ["said", "asked", "cried"]"#;

/// Same input as the second line of EXCLAMATION_SPLIT, normalized with CRIED_CONFIG
pub const CRIED_SPLIT: &str = "“Run!” Holmes cried.";

pub const CRIED_EXPECTED: &str = "“run!,” holmes cried.";
