//! LessonClip operator binary.
//!
//! A thin shell around the pipeline API: parse flags, set up the
//! dual-destination log, then either dispatch one subcommand or drop
//! into the interactive menu.

mod menu;

use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use lclip_media::SilenceProfile;
use lclip_pipeline::{Pipeline, PipelineConfig};

#[derive(Parser)]
#[command(name = "lclip", version, about = "Lesson audio processing pipeline")]
struct Cli {
    /// Working directory holding the raw recordings.
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// Root of the published content tree.
    #[arg(long)]
    publish_root: Option<PathBuf>,

    /// Content category subfolder inside each published lesson.
    #[arg(long)]
    category: Option<String>,

    /// Minimum silence gap for segmentation (milliseconds).
    #[arg(long)]
    split_min_silence_ms: Option<u64>,

    /// Silence threshold for segmentation (dBFS).
    #[arg(long)]
    split_threshold_dbfs: Option<f64>,

    /// Minimum silence gap for trimming (milliseconds).
    #[arg(long)]
    trim_min_silence_ms: Option<u64>,

    /// Silence threshold for trimming (dBFS).
    #[arg(long)]
    trim_threshold_dbfs: Option<f64>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run all pipeline stages.
    Run,
    /// Decode and segment the raw recordings only.
    Segment,
    /// Delete prompt tones and alternate takes.
    Filter,
    /// Group surviving takes into lesson folders.
    Group,
    /// Trim silence and encode lesson clips to MP3.
    Encode,
    /// Copy encoded clips into the published content tree.
    Publish,
    /// Print silence-detection diagnostics for one waveform.
    Inspect {
        /// Waveform file to analyze.
        file: PathBuf,
    },
}

fn build_config(cli: &Cli) -> PipelineConfig {
    let mut segmentation = SilenceProfile::recommended_segmentation();
    if let Some(ms) = cli.split_min_silence_ms {
        segmentation = segmentation.with_min_silence_ms(ms);
    }
    if let Some(dbfs) = cli.split_threshold_dbfs {
        segmentation = segmentation.with_threshold_dbfs(dbfs);
    }

    let mut trim = SilenceProfile::trimming();
    if let Some(ms) = cli.trim_min_silence_ms {
        trim = trim.with_min_silence_ms(ms);
    }
    if let Some(dbfs) = cli.trim_threshold_dbfs {
        trim = trim.with_threshold_dbfs(dbfs);
    }

    let mut config = PipelineConfig::new(&cli.dir)
        .with_segmentation(segmentation)
        .with_trim(trim);
    if let Some(root) = &cli.publish_root {
        config = config.with_publish_root(root);
    }
    if let Some(category) = &cli.category {
        config = config.with_category(category.clone());
    }
    config
}

/// Console plus a timestamped file under `<dir>/log/`.
fn init_logging(dir: &PathBuf) -> anyhow::Result<PathBuf> {
    let log_dir = dir.join("log");
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("creating log directory {}", log_dir.display()))?;

    let timestamp = chrono::Local::now().format("%Y_%m_%d_%H_%M_%S");
    let log_path = log_dir.join(format!("audio_pipeline_{timestamp}.log"));
    let log_file = File::create(&log_path)
        .with_context(|| format!("creating log file {}", log_path.display()))?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_ansi(true)
                .with_target(false)
                .with_file(false)
                .with_line_number(false),
        )
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(Arc::new(log_file)),
        )
        .with(env_filter)
        .init();

    Ok(log_path)
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_path = match init_logging(&cli.dir) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("failed to set up logging: {e:#}");
            std::process::exit(1);
        }
    };
    info!(log = %log_path.display(), "lesson audio pipeline starting");

    // Print a short message instead of a backtrace on Ctrl-C
    tokio::spawn(async {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\ninterrupted");
            std::process::exit(130);
        }
    });

    let config = build_config(&cli);
    let pipeline = Pipeline::new(config);

    let result = match cli.command {
        Some(Command::Run) => pipeline.run_all().await.map(|_| ()),
        Some(Command::Segment) => pipeline.run_segmentation().await.map(|_| ()),
        Some(Command::Filter) => pipeline.run_filter().await.map(|_| ()),
        Some(Command::Group) => pipeline.run_group().await.map(|_| ()),
        Some(Command::Encode) => pipeline.run_encode().await.map(|_| ()),
        Some(Command::Publish) => pipeline.run_publish().await.map(|_| ()),
        Some(Command::Inspect { file }) => menu::inspect(&pipeline, &file).await,
        None => {
            menu::interactive(pipeline).await;
            return;
        }
    };

    if let Err(e) = result {
        error!("run failed: {e}");
        eprintln!("run failed: {e}");
        std::process::exit(1);
    }
}
