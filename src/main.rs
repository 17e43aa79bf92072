use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

use prose_normalizer::discovery::{self, DiscoveryConfig};
use prose_normalizer::output::{self, DocumentStats, RunStats};
use prose_normalizer::reader::{AsyncFileReader, ReaderConfig};
use prose_normalizer::{Normalizer, NormalizerConfig};

#[derive(Parser, Debug)]
#[command(name = "prose-normalizer")]
#[command(about = "Normalize pseudo-markdown e-book splits into Markdown")]
#[command(version)]
struct Args {
    /// Directory containing pseudo-markdown split files
    input_dir: PathBuf,

    /// Directory to write normalized Markdown into
    output_dir: PathBuf,

    /// TOML file with replacements and speech verbs
    #[arg(long)]
    config: Option<PathBuf>,

    /// Glob pattern for split files, relative to the input directory
    #[arg(long, default_value = discovery::DEFAULT_SPLIT_PATTERN)]
    pattern: String,

    /// Abort on first error
    #[arg(long)]
    fail_fast: bool,

    /// Also write an HTML preview of every document
    #[arg(long)]
    debug_html: bool,

    /// Suppress console progress bars
    #[arg(long)]
    no_progress: bool,

    /// Stats output file path
    #[arg(long, default_value = "run_stats.json")]
    stats_out: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    // WHY: structured JSON logging keeps batch runs greppable
    tracing_subscriber::fmt()
        .with_target(false)
        .json()
        .init();

    let args = Args::parse();
    let run_start = Instant::now();

    info!("Starting prose-normalizer");
    info!(?args, "Parsed CLI arguments");

    if !args.input_dir.exists() {
        anyhow::bail!("Input directory does not exist: {}", args.input_dir.display());
    }

    if !args.input_dir.is_dir() {
        anyhow::bail!("Input path is not a directory: {}", args.input_dir.display());
    }

    let config = match &args.config {
        Some(path) => NormalizerConfig::load(path)?,
        None => NormalizerConfig::default(),
    };
    let normalizer = Normalizer::new(config);

    // Discover split files
    let discovery_config = DiscoveryConfig {
        fail_fast: args.fail_fast,
        pattern: args.pattern.clone(),
    };

    info!("Starting split discovery in: {}", args.input_dir.display());
    let discovered = discovery::collect_split_files(&args.input_dir, discovery_config).await?;

    let valid_paths: Vec<_> = discovered
        .iter()
        .filter(|file| file.error.is_none())
        .map(|file| file.path.clone())
        .collect();

    let mut document_stats: Vec<DocumentStats> = Vec::new();
    for file in &discovered {
        if let Some(ref error) = file.error {
            if args.fail_fast {
                anyhow::bail!("{}", error);
            }
            warn!("Skipping {}: {}", file.path.display(), error);
            document_stats.push(DocumentStats::failed(&file.path, None, error.clone()));
        }
    }

    println!("prose-normalizer v{}", env!("CARGO_PKG_VERSION"));
    println!("Found {} files matching pattern {}", discovered.len(), args.pattern);

    // Read splits
    let reader = AsyncFileReader::new(ReaderConfig {
        fail_fast: args.fail_fast,
        ..Default::default()
    });
    let (loaded, read_stats) = reader.read_splits_batch(&valid_paths).await?;

    document_stats.extend(read_stats.iter().filter_map(|stats| {
        stats.read_error.as_ref().map(|error| {
            DocumentStats::failed(Path::new(&stats.file_path), None, error.clone())
        })
    }));

    // Normalize
    let progress = if args.no_progress {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(loaded.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{spinner} [{elapsed_precise}] {bar:40} {pos}/{len} {msg}")?
        );
        bar
    };

    let mut documents = Vec::with_capacity(loaded.len());
    let results = normalizer.normalize_each(&loaded)?;
    for (index, (path, result)) in loaded.paths.iter().zip(results).enumerate() {
        progress.set_message(path.display().to_string());

        match result {
            Ok(document) => {
                document_stats.push(DocumentStats::success(path, &document));
                documents.push(document);
            }
            Err(e) => {
                if args.fail_fast {
                    progress.abandon();
                    return Err(e);
                }
                warn!("Failed to normalize {}: {:#}", path.display(), e);
                document_stats.push(DocumentStats::failed(path, Some(index), format!("{e:#}")));
            }
        }

        progress.inc(1);
    }
    progress.finish_with_message("done");

    // Write outputs
    output::write_documents(&args.output_dir, &documents).await?;
    if args.debug_html {
        output::write_debug_documents(&args.output_dir, &documents).await?;
    }

    let run_stats = RunStats::new(document_stats, run_start.elapsed().as_millis() as u64);
    run_stats.write(&args.stats_out).await?;

    println!("Normalization complete:");
    println!("  Documents written: {}", run_stats.documents_processed);
    if run_stats.documents_failed > 0 {
        println!("  Failed: {}", run_stats.documents_failed);
    }
    println!("  Names detected: {}", run_stats.total_names);
    println!("  Stats written to {}", args.stats_out.display());

    info!(
        "Run completed: {} written, {} failed in {}ms",
        run_stats.documents_processed, run_stats.documents_failed, run_stats.total_processing_time_ms
    );

    Ok(())
}
