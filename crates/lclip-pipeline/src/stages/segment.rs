//! Silence segmentation: one waveform → numbered take clips.

use std::path::Path;

use tracing::{error, info, warn};

use lclip_media::{detect_nonsilent, AudioClip};
use lclip_models::{RecordingPrefix, RunStats};

use crate::config::PipelineConfig;
use crate::error::PipelineResult;
use crate::stages::file_names;

/// Peak level below which a recording is suspiciously quiet.
const LOW_PEAK_WARN_DBFS: f64 = -50.0;

/// Cut every raw recording into takes at silence gaps, exporting each
/// non-silent range as `<prefix>_<index>.wav` (1-based, scan order).
///
/// Waveforms are preferred; when no `_original.wav` exists at all, the
/// compressed sources are decoded through a temporary waveform. A file
/// with no detectable segments is skipped with a warning. Per-file
/// failures are logged and do not stop the scan.
pub async fn segment(config: &PipelineConfig, stats: &mut RunStats) -> PipelineResult<()> {
    let names = file_names(&config.source_dir).await?;

    let mut sources: Vec<(RecordingPrefix, String, bool)> = names
        .iter()
        .filter_map(|n| lclip_models::parse_original_wav(n).map(|p| (p, n.clone(), false)))
        .collect();

    if sources.is_empty() {
        // Fall back to the compressed recordings directly
        sources = names
            .iter()
            .filter_map(|n| lclip_models::parse_raw_mp3(n).map(|p| (p, n.clone(), true)))
            .collect();
    }

    if sources.is_empty() {
        warn!("no raw recordings to segment (expected NN-NN.mp3 or NN-NN_original.wav)");
        return Ok(());
    }

    info!(
        count = sources.len(),
        min_silence_ms = config.segmentation.min_silence_ms,
        silence_thresh_dbfs = config.segmentation.silence_thresh_dbfs,
        "segmenting recordings"
    );

    for (prefix, name, compressed) in &sources {
        let path = config.source_dir.join(name);
        if let Err(e) = segment_one(config, prefix, &path, *compressed, stats).await {
            error!(file = %name, "segmentation failed: {e}");
        }
    }

    info!(
        exported = stats.converted_files,
        "segmentation finished"
    );

    Ok(())
}

async fn segment_one(
    config: &PipelineConfig,
    prefix: &RecordingPrefix,
    path: &Path,
    compressed: bool,
    stats: &mut RunStats,
) -> PipelineResult<()> {
    let clip = if compressed {
        // hound reads WAV only; route compressed input through a temp file
        let temp = tempfile::Builder::new()
            .prefix("lclip-decode-")
            .suffix(".wav")
            .tempfile()?;
        lclip_media::decode_to_wav(path, temp.path()).await?;
        AudioClip::load(temp.path()).await?
    } else {
        AudioClip::load(path).await?
    };

    info!(
        file = %path.display(),
        duration_ms = clip.duration_ms(),
        channels = clip.channels(),
        sample_rate = clip.sample_rate(),
        bits = clip.bits_per_sample(),
        "loaded recording"
    );

    let peak = clip.peak_dbfs();
    let rms = clip.rms_dbfs();
    info!(
        peak_dbfs = format!("{peak:.1}"),
        rms_dbfs = format!("{rms:.1}"),
        "recording levels"
    );
    if peak < LOW_PEAK_WARN_DBFS {
        warn!(
            file = %path.display(),
            peak_dbfs = format!("{peak:.1}"),
            "recording is very quiet, the silence threshold may need adjusting"
        );
    }

    let ranges = detect_nonsilent(&clip, &config.segmentation);
    if ranges.is_empty() {
        warn!(file = %path.display(), "no non-silent segments detected, skipping");
        return Ok(());
    }

    info!(file = %path.display(), segments = ranges.len(), "detected segments");

    for (i, range) in ranges.iter().enumerate() {
        let index = i + 1;
        let take = clip.slice_ms(range.start_ms, range.end_ms);
        let out = config.source_dir.join(format!("{prefix}_{index}.wav"));
        take.save(&out).await?;
        stats.converted_files += 1;
        info!(
            clip = %out.display(),
            duration_ms = range.duration_ms(),
            "exported segment {index}"
        );
    }

    Ok(())
}
