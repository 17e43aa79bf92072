// Integration test utilities and common code
// WHY: Centralized utilities avoid duplication across integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test fixture with an input directory of split files and an output directory
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub root_path: PathBuf,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl TestFixture {
    /// Create a new test fixture with temporary directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root_path = temp_dir.path().to_path_buf();
        let input_dir = root_path.join("splits");
        let output_dir = root_path.join("markdown");

        fs::create_dir_all(&input_dir).expect("Failed to create input directory");

        Self {
            temp_dir,
            root_path,
            input_dir,
            output_dir,
        }
    }

    /// Create a pseudo-markdown split file under the input directory
    pub fn create_split_file<P: AsRef<Path>>(&self, relative_path: P, content: &str) -> PathBuf {
        self.create_split_bytes(relative_path, content.as_bytes())
    }

    /// Create a split file with arbitrary bytes
    pub fn create_split_bytes<P: AsRef<Path>>(&self, relative_path: P, content: &[u8]) -> PathBuf {
        let file_path = self.input_dir.join(relative_path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }

        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    /// Write a normalizer config file into the fixture root
    pub fn create_config(&self, content: &str) -> PathBuf {
        let config_path = self.root_path.join("normalizer.toml");
        fs::write(&config_path, content).expect("Failed to write config file");
        config_path
    }

    pub fn stats_path(&self) -> PathBuf {
        self.root_path.join("run_stats.json")
    }

    /// Read the Markdown written for the split at `index`
    pub fn read_output(&self, index: usize) -> Result<String, std::io::Error> {
        fs::read_to_string(self.output_dir.join(format!("split_{index:04}.md")))
    }

    /// Names of every file in the output directory, sorted
    pub fn output_files(&self) -> Vec<String> {
        let mut names: Vec<String> = match fs::read_dir(&self.output_dir) {
            Ok(entries) => entries
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.file_name().to_string_lossy().into_owned())
                .collect(),
            Err(_) => Vec::new(),
        };
        names.sort();
        names
    }
}

/// Compare two strings line by line, providing detailed diff on mismatch
pub fn assert_golden_file(actual: &str, expected: &str, context: &str) {
    let actual_lines: Vec<&str> = actual.lines().collect();
    let expected_lines: Vec<&str> = expected.lines().collect();

    if actual_lines.len() != expected_lines.len() {
        panic!(
            "{}: Line count mismatch. Expected {} lines, got {} lines\nActual:\n{}",
            context,
            expected_lines.len(),
            actual_lines.len(),
            actual
        );
    }

    for (i, (actual_line, expected_line)) in actual_lines.iter().zip(expected_lines.iter()).enumerate() {
        if actual_line != expected_line {
            panic!(
                "{}: Line {} mismatch\nExpected: {}\nActual:   {}",
                context,
                i + 1,
                expected_line,
                actual_line
            );
        }
    }
}
