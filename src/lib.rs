pub mod config;
pub mod discovery;
pub mod normalizer;
pub mod output;
pub mod pipeline;
pub mod reader;

// Re-export main types for convenient access
pub use normalizer::{
    Document, Fragment, InsertMode, Line, NameSet, NormalizerError, TaggedText, TextUnit, Word,
};

pub use config::{NormalizerConfig, Replacement};

pub use pipeline::{render_debug_html, NormalizedDocument, Normalizer, SplitSource};

// Re-export output utilities used by the CLI and tests
pub use output::{
    generate_debug_path, generate_output_path, write_debug_documents,
    write_documents, DocumentStats, RunStats,
};
