// Tests for the public API as an external crate would use it
// WHY: the re-exports in lib.rs are the supported surface

use prose_normalizer::{
    generate_debug_path, generate_output_path, Document, InsertMode, Line,
    NameSet, Normalizer, SplitSource, TaggedText, TextUnit, Word,
};
use std::path::Path;
use tempfile::TempDir;

struct ChapterSource {
    chapters: Vec<&'static str>,
}

impl SplitSource for ChapterSource {
    fn extract_pseudo_markdown_splits(&self) -> anyhow::Result<Vec<String>> {
        Ok(self.chapters.iter().map(|chapter| chapter.to_string()).collect())
    }
}

#[test]
fn test_custom_split_source() {
    let source = ChapterSource {
        chapters: vec!["The end.", "<i>Fin</i>"],
    };

    let documents = Normalizer::default().normalize_source(&source).unwrap();

    let contents: Vec<_> = documents.iter().map(|document| document.content.as_str()).collect();
    assert_eq!(contents, vec!["the end.", "*fin*"]);
}

#[test]
fn test_output_path_helpers() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");

    let path = generate_output_path(temp_dir.path(), 42);
    assert!(path.to_string_lossy().ends_with("split_0042.md"));
    assert_eq!(generate_debug_path(Path::new("out"), 1), Path::new("out/split_0001.html"));

    assert!(path.starts_with(temp_dir.path()));
}

#[test]
fn test_tagged_text_through_public_api() {
    let mut text = TaggedText::new("<i>Hi</i>");
    text.insert_char('!', 2, InsertMode::ForceTagShift);
    assert_eq!(text.render(), "<i>Hi!</i>");

    text.insert_char('?', 3, InsertMode::AvoidTagShift);
    assert_eq!(text.render(), "<i>Hi!</i>?");
}

#[test]
fn test_units_compose() {
    let word = Word::new("<b>Bold!</b>").unwrap();
    assert_eq!(word.body(), "Bold");

    let line = Line::parse("Ask Ada about it.").unwrap();
    let names: NameSet = line.collect_names();
    assert!(names.contains("Ada"));

    let mut document = Document::parse("Ask Ada about it.\n\nAda laughed.").unwrap();
    let detected = document.run_normalization_pass();
    assert_eq!(detected.len(), 1);
    assert_eq!(document.render(), "ask Ada about it.\n\nAda laughed.");
}
