// WHY: text normalization core shared by the CLI, the tests and the benches
// Builds a document -> paragraph -> line -> word tree over pseudo-markdown and normalizes it in two passes

pub mod document;
pub mod error;
pub mod fragment;
pub mod line;
pub mod tagged_text;
pub mod unit;
pub mod word;

// Re-export core types
pub use document::{extend_names, Document};
pub use error::NormalizerError;
pub use fragment::Fragment;
pub use line::{default_speech_verbs, Line, DEFAULT_SPEECH_VERBS};
pub use tagged_text::{InsertMode, TaggedText};
pub use unit::{NameSet, TextUnit};
pub use word::{convert_uk_speech, Word, WordMarker, WordOperation, WordOption};
