use anyhow::Result;
use futures::stream::{Stream, StreamExt};
use glob::glob;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

/// Default pattern for split files written by the e-book extractor
pub const DEFAULT_SPLIT_PATTERN: &str = "*.txt";

/// Configuration for split file discovery
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Whether to fail fast on first error or continue processing
    pub fail_fast: bool,
    /// Glob pattern relative to the root directory
    pub pattern: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            fail_fast: false,
            pattern: DEFAULT_SPLIT_PATTERN.to_string(),
        }
    }
}

/// Result of split file validation
#[derive(Debug, Clone)]
pub struct FileValidation {
    pub path: PathBuf,
    pub error: Option<String>,
}

/// Discovers split files matching `config.pattern` under the given root directory.
///
/// # Arguments
/// * `root_dir` - Directory the pattern is resolved against
/// * `config` - Discovery configuration (pattern, fail_fast behavior)
///
/// # Returns
/// Stream of `FileValidation` results containing file paths and validation status
pub fn discover_split_files(
    root_dir: impl AsRef<Path>,
    config: DiscoveryConfig,
) -> impl Stream<Item = Result<FileValidation>> {
    let root_path = root_dir.as_ref().to_path_buf();

    futures::stream::unfold(
        DiscoveryState::new(root_path, config),
        |mut state| async move {
            state.next_file().await.map(|result| (result, state))
        }
    )
}

/// Internal state for file discovery iteration
struct DiscoveryState {
    root_dir: PathBuf,
    config: DiscoveryConfig,
    glob_iter: Option<glob::Paths>,
    finished: bool,
}

impl DiscoveryState {
    fn new(root_dir: PathBuf, config: DiscoveryConfig) -> Self {
        Self {
            root_dir,
            config,
            glob_iter: None,
            finished: false,
        }
    }

    async fn next_file(&mut self) -> Option<Result<FileValidation>> {
        if self.finished {
            return None;
        }

        // Initialize glob iterator on first call
        if self.glob_iter.is_none() {
            let pattern = format!("{}/{}", self.root_dir.display(), self.config.pattern);
            debug!("Starting split discovery with pattern: {}", pattern);

            match glob(&pattern) {
                Ok(paths) => {
                    self.glob_iter = Some(paths);
                    info!("Split discovery initialized for root: {}", self.root_dir.display());
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(anyhow::anyhow!("Failed to create glob pattern: {}", e)));
                }
            }
        }

        loop {
            let glob_iter = self.glob_iter.as_mut()?;

            match glob_iter.next() {
                Some(Ok(path)) => {
                    debug!("Found split file: {}", path.display());
                    return Some(self.validate_file(path).await);
                }
                Some(Err(e)) => {
                    let error_msg = format!("Glob iteration error: {e}");
                    warn!("{}", error_msg);

                    if self.config.fail_fast {
                        return Some(Err(anyhow::anyhow!(error_msg)));
                    }
                    // Continue to next file on non-fatal glob errors
                }
                None => {
                    self.finished = true;
                    info!("Split discovery completed");
                    return None;
                }
            }
        }
    }

    async fn validate_file(&self, path: PathBuf) -> Result<FileValidation> {
        match fs::metadata(&path).await {
            Ok(metadata) if metadata.is_file() => Ok(FileValidation { path, error: None }),
            Ok(_) => {
                let error = format!("Path is not a file: {}", path.display());
                warn!("{}", error);
                Ok(FileValidation {
                    path,
                    error: Some(error),
                })
            }
            Err(e) => {
                let error = format!("Cannot access file {}: {}", path.display(), e);
                warn!("{}", error);

                if self.config.fail_fast {
                    Err(anyhow::anyhow!(error))
                } else {
                    Ok(FileValidation {
                        path,
                        error: Some(error),
                    })
                }
            }
        }
    }
}

/// Collect all discovered split files, sorted by path so split order is stable
pub async fn collect_split_files(
    root_dir: impl AsRef<Path>,
    config: DiscoveryConfig,
) -> Result<Vec<FileValidation>> {
    let fail_fast = config.fail_fast;
    let mut files = Vec::new();
    let mut stream = Box::pin(discover_split_files(root_dir, config));

    while let Some(result) = stream.next().await {
        match result {
            Ok(validation) => files.push(validation),
            Err(e) => {
                if fail_fast {
                    return Err(e);
                }
                warn!("Discovery error (continuing): {}", e);
            }
        }
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}

/// Paths of the valid split files under `root_dir`, in order
pub async fn find_split_files(root_dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let files = collect_split_files(root_dir, DiscoveryConfig::default()).await?;

    Ok(files
        .into_iter()
        .filter(|file| file.error.is_none())
        .map(|file| file.path)
        .collect())
}
