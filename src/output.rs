// WHY: file naming and writing for normalized splits and the run summary
// Shared by the CLI and the integration tests so both agree on the layout

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info};

use crate::pipeline::{render_debug_html, NormalizedDocument};

/// Markdown output path for the split at `index`
pub fn generate_output_path(dest_dir: &Path, index: usize) -> PathBuf {
    dest_dir.join(format!("split_{index:04}.md"))
}

/// HTML preview path for the split at `index`
pub fn generate_debug_path(dest_dir: &Path, index: usize) -> PathBuf {
    dest_dir.join(format!("split_{index:04}.html"))
}

/// Write `content` to `path`, always ending with a newline
///
/// # Example
/// ```no_run
/// # async fn demo() -> anyhow::Result<()> {
/// use prose_normalizer::output::write_text_file;
/// write_text_file(std::path::Path::new("out/split_0000.md"), "he left.").await?;
/// # Ok(())
/// # }
/// ```
pub async fn write_text_file(path: &Path, content: &str) -> Result<()> {
    let file = tokio::fs::File::create(path)
        .await
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    writer.write_all(content.as_bytes()).await?;
    if !content.ends_with('\n') {
        writer.write_all(b"\n").await?;
    }

    writer.flush().await?;
    Ok(())
}

/// Write each document's Markdown to `dest_dir`, creating it if needed
pub async fn write_documents(dest_dir: &Path, documents: &[NormalizedDocument]) -> Result<Vec<PathBuf>> {
    tokio::fs::create_dir_all(dest_dir)
        .await
        .with_context(|| format!("Failed to create output directory {}", dest_dir.display()))?;

    let mut written = Vec::with_capacity(documents.len());
    for document in documents {
        let path = generate_output_path(dest_dir, document.index);
        write_text_file(&path, &document.content).await?;
        debug!("Wrote {}", path.display());
        written.push(path);
    }

    info!("Wrote {} documents to {}", written.len(), dest_dir.display());
    Ok(written)
}

/// Write an HTML preview of each document next to its Markdown
pub async fn write_debug_documents(dest_dir: &Path, documents: &[NormalizedDocument]) -> Result<Vec<PathBuf>> {
    tokio::fs::create_dir_all(dest_dir).await?;

    let mut written = Vec::with_capacity(documents.len());
    for document in documents {
        let path = generate_debug_path(dest_dir, document.index);
        write_text_file(&path, &render_debug_html(&document.content)).await?;
        written.push(path);
    }

    Ok(written)
}

/// Per-split processing statistics
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DocumentStats {
    /// Source file of the split
    pub source: String,
    /// Position of the split in the run, if it was read
    pub index: Option<usize>,
    pub chars_in: u64,
    pub chars_out: u64,
    /// Number of distinct names detected
    pub names_detected: u64,
    pub processing_time_ms: u64,
    /// Processing status (success, failed)
    pub status: String,
    /// Error message if processing failed
    pub error: Option<String>,
}

impl DocumentStats {
    pub fn success(source: &Path, document: &NormalizedDocument) -> Self {
        Self {
            source: source.display().to_string(),
            index: Some(document.index),
            chars_in: document.chars_in,
            chars_out: document.chars_out,
            names_detected: document.names.len() as u64,
            processing_time_ms: document.processing_time_ms,
            status: "success".to_string(),
            error: None,
        }
    }

    pub fn failed(source: &Path, index: Option<usize>, error: String) -> Self {
        Self {
            source: source.display().to_string(),
            index,
            chars_in: 0,
            chars_out: 0,
            names_detected: 0,
            processing_time_ms: 0,
            status: "failed".to_string(),
            error: Some(error),
        }
    }
}

/// Summary of a whole run, written as JSON
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RunStats {
    pub total_processing_time_ms: u64,
    pub documents_processed: u64,
    pub documents_failed: u64,
    pub total_chars_in: u64,
    pub total_chars_out: u64,
    /// Sum of names detected per split
    pub total_names: u64,
    pub documents: Vec<DocumentStats>,
}

impl RunStats {
    pub fn new(documents: Vec<DocumentStats>, total_processing_time_ms: u64) -> Self {
        let documents_failed = documents.iter().filter(|stats| stats.error.is_some()).count() as u64;

        Self {
            total_processing_time_ms,
            documents_processed: documents.len() as u64 - documents_failed,
            documents_failed,
            total_chars_in: documents.iter().map(|stats| stats.chars_in).sum(),
            total_chars_out: documents.iter().map(|stats| stats.chars_out).sum(),
            total_names: documents.iter().map(|stats| stats.names_detected).sum(),
            documents,
        }
    }

    pub async fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        write_text_file(path, &json)
            .await
            .with_context(|| format!("Failed to write run stats to {}", path.display()))
    }
}
