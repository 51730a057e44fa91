//! Silence trimming and MP3 encoding of grouped lesson clips.

use std::path::Path;

use tracing::{debug, error, info, warn};

use lclip_media::{trim_silence, AudioClip};
use lclip_models::RunStats;

use crate::config::PipelineConfig;
use crate::error::PipelineResult;
use crate::stages::{file_names, lesson_dir_names};

/// Trim residual silence from every grouped `<n>.wav` and encode it to
/// `<n>.mp3` at the distribution bitrate, beside the source.
///
/// Trimming fails open: a clip with no detectable non-silent range is
/// encoded untrimmed. Per-file failures are logged and skipped.
pub async fn trim_and_encode(config: &PipelineConfig, stats: &mut RunStats) -> PipelineResult<()> {
    let lessons = lesson_dir_names(&config.source_dir).await?;
    if lessons.is_empty() {
        warn!("no lesson folders to encode");
        return Ok(());
    }

    let mut total = 0usize;
    let mut work: Vec<(String, Vec<String>)> = Vec::new();
    for lesson in &lessons {
        let dir = config.source_dir.join(lesson);
        let clips: Vec<String> = file_names(&dir)
            .await?
            .into_iter()
            .filter(|n| n.to_lowercase().ends_with(".wav"))
            .collect();
        total += clips.len();
        work.push((lesson.clone(), clips));
    }

    info!(
        lessons = lessons.len(),
        clips = total,
        min_silence_ms = config.trim.min_silence_ms,
        silence_thresh_dbfs = config.trim.silence_thresh_dbfs,
        "trimming and encoding lesson clips"
    );

    for (lesson, clips) in work {
        if clips.is_empty() {
            continue;
        }
        info!(lesson = %lesson, clips = clips.len(), "encoding lesson");

        for name in clips {
            let path = config.source_dir.join(&lesson).join(&name);
            match encode_one(config, &path).await {
                Ok(()) => {
                    stats.converted_files += 1;
                    info!(clip = %path.display(), "trimmed and encoded");
                }
                Err(e) => error!(clip = %path.display(), "encode failed: {e}"),
            }
        }
    }

    info!(converted = stats.converted_files, "encoding finished");

    Ok(())
}

async fn encode_one(config: &PipelineConfig, path: &Path) -> PipelineResult<()> {
    let clip = AudioClip::load(path).await?;
    let trimmed = trim_silence(&clip, &config.trim);

    if trimmed.duration_ms() < clip.duration_ms() {
        debug!(
            clip = %path.display(),
            before_ms = clip.duration_ms(),
            after_ms = trimmed.duration_ms(),
            "trimmed silence"
        );
    }

    let temp = tempfile::Builder::new()
        .prefix("lclip-trim-")
        .suffix(".wav")
        .tempfile()?;
    trimmed.save(temp.path()).await?;

    let dst = path.with_extension("mp3");
    lclip_media::encode_mp3(temp.path(), &dst).await?;

    Ok(())
}
