use anyhow::Result;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncReadExt, BufReader};
use tracing::{debug, info, warn};

use crate::pipeline::SplitSource;

/// Configuration for split reading behavior
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Whether to fail fast on first error or continue processing
    pub fail_fast: bool,
    /// Buffer size for async reading (default: 8KB)
    pub buffer_size: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            fail_fast: false,
            buffer_size: 8192,
        }
    }
}

/// Statistics for a single split read
#[derive(Debug, Clone)]
pub struct ReadStats {
    pub file_path: String,
    pub chars_read: u64,
    pub bytes_read: u64,
    pub duration_ms: u64,
    pub read_error: Option<String>,
}

/// Splits read from disk, in the order they were given
///
/// `paths[i]` is the file `splits[i]` came from. Files that failed to read are
/// left out of both.
#[derive(Debug, Clone, Default)]
pub struct LoadedSplits {
    pub paths: Vec<PathBuf>,
    pub splits: Vec<String>,
}

impl LoadedSplits {
    pub fn len(&self) -> usize {
        self.splits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.splits.is_empty()
    }
}

impl SplitSource for LoadedSplits {
    fn extract_pseudo_markdown_splits(&self) -> Result<Vec<String>> {
        Ok(self.splits.clone())
    }
}

/// Async reader that loads whole split files
pub struct AsyncFileReader {
    config: ReaderConfig,
}

impl AsyncFileReader {
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Read one split file with buffered async I/O
    ///
    /// Line endings are normalized to `\n` so paragraph breaks survive files
    /// written on Windows. Returns `None` content when the read failed and
    /// `fail_fast` is off.
    pub async fn read_split<P: AsRef<Path>>(
        &self,
        file_path: P,
    ) -> Result<(Option<String>, ReadStats)> {
        let path = file_path.as_ref();
        let start_time = std::time::Instant::now();

        debug!("Starting async read of split: {}", path.display());

        let file = match File::open(path).await {
            Ok(file) => file,
            Err(e) => {
                let error_msg = format!("Failed to open split {}: {}", path.display(), e);
                return self.failed(path, error_msg, start_time);
            }
        };

        let mut reader = BufReader::with_capacity(self.config.buffer_size, file);
        let mut raw = String::new();

        let bytes_read = match reader.read_to_string(&mut raw).await {
            Ok(bytes) => bytes as u64,
            Err(e) => {
                let error_msg = format!("UTF-8 decoding error in {}: {}", path.display(), e);
                return self.failed(path, error_msg, start_time);
            }
        };

        let content = if raw.contains('\r') {
            raw.replace("\r\n", "\n")
        } else {
            raw
        };

        let stats = ReadStats {
            file_path: path.display().to_string(),
            chars_read: content.chars().count() as u64,
            bytes_read,
            duration_ms: start_time.elapsed().as_millis() as u64,
            read_error: None,
        };

        info!(
            "Successfully read {}: {} chars, {} bytes in {}ms",
            path.display(),
            stats.chars_read,
            stats.bytes_read,
            stats.duration_ms
        );

        Ok((Some(content), stats))
    }

    fn failed(
        &self,
        path: &Path,
        error_msg: String,
        start_time: std::time::Instant,
    ) -> Result<(Option<String>, ReadStats)> {
        warn!("{}", error_msg);

        if self.config.fail_fast {
            return Err(anyhow::anyhow!(error_msg));
        }

        let stats = ReadStats {
            file_path: path.display().to_string(),
            chars_read: 0,
            bytes_read: 0,
            duration_ms: start_time.elapsed().as_millis() as u64,
            read_error: Some(error_msg),
        };
        Ok((None, stats))
    }

    /// Read every split in `file_paths`, in order
    ///
    /// Sequential so memory stays bounded by the largest split and errors are
    /// reported per file.
    pub async fn read_splits_batch<P: AsRef<Path>>(
        &self,
        file_paths: &[P],
    ) -> Result<(LoadedSplits, Vec<ReadStats>)> {
        info!("Starting batch read of {} splits", file_paths.len());

        let mut loaded = LoadedSplits::default();
        let mut all_stats = Vec::with_capacity(file_paths.len());

        for file_path in file_paths {
            let (content, stats) = self.read_split(file_path).await?;

            if let Some(content) = content {
                loaded.paths.push(file_path.as_ref().to_path_buf());
                loaded.splits.push(content);
            }
            all_stats.push(stats);
        }

        info!(
            "Completed batch read: {} of {} splits loaded",
            loaded.len(),
            file_paths.len()
        );
        Ok((loaded, all_stats))
    }
}

/// Read a single split with the default configuration
pub async fn read_split_async<P: AsRef<Path>>(file_path: P) -> Result<String> {
    let reader = AsyncFileReader::new(ReaderConfig { fail_fast: true, ..Default::default() });
    let (content, _stats) = reader.read_split(file_path).await?;
    Ok(content.unwrap_or_default())
}
