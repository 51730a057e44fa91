//! Waveform diagnostics for tuning silence parameters.
//!
//! Recordings arrive with wildly different noise floors, and a threshold
//! that cleanly segments one session detects nothing in the next. The
//! report here sweeps a clip across candidate thresholds so an operator
//! can pick a working pair before committing to a full run.

use std::path::Path;

use crate::error::MediaResult;
use crate::silence::{detect_nonsilent, SilenceProfile};
use crate::wave::AudioClip;

/// Candidate thresholds probed by the sweep, loudest first.
pub const SWEEP_THRESHOLDS_DBFS: [f64; 5] = [-20.0, -30.0, -40.0, -50.0, -60.0];

/// Segment counts detected at one candidate threshold.
#[derive(Debug, Clone)]
pub struct ThresholdSweepEntry {
    pub threshold_dbfs: f64,
    pub segments: usize,
    pub total_nonsilent_ms: u64,
}

/// Everything worth knowing about a waveform before segmenting it.
#[derive(Debug, Clone)]
pub struct WaveformReport {
    pub duration_ms: u64,
    pub channels: u16,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    pub peak_dbfs: f64,
    pub rms_dbfs: f64,
    pub sweep: Vec<ThresholdSweepEntry>,
}

impl WaveformReport {
    /// Whether the clip looks like it contains no usable audio at all:
    /// even the most permissive sweep threshold finds nothing.
    pub fn is_effectively_silent(&self) -> bool {
        self.sweep
            .iter()
            .all(|entry| entry.segments == 0)
    }

    /// Whether the recording level is suspiciously low.
    pub fn is_very_quiet(&self) -> bool {
        self.peak_dbfs < -60.0
    }
}

/// Analyze a waveform file.
pub async fn analyze_waveform(
    path: impl AsRef<Path>,
    min_silence_ms: u64,
) -> MediaResult<WaveformReport> {
    let clip = AudioClip::load(path).await?;
    Ok(report_for(&clip, min_silence_ms))
}

/// Build a report for an in-memory clip.
pub fn report_for(clip: &AudioClip, min_silence_ms: u64) -> WaveformReport {
    let sweep = SWEEP_THRESHOLDS_DBFS
        .iter()
        .map(|&threshold_dbfs| {
            let profile = SilenceProfile {
                min_silence_ms,
                silence_thresh_dbfs: threshold_dbfs,
            };
            let ranges = detect_nonsilent(clip, &profile);
            ThresholdSweepEntry {
                threshold_dbfs,
                segments: ranges.len(),
                total_nonsilent_ms: ranges.iter().map(|r| r.duration_ms()).sum(),
            }
        })
        .collect();

    WaveformReport {
        duration_ms: clip.duration_ms(),
        channels: clip.channels(),
        sample_rate: clip.sample_rate(),
        bits_per_sample: clip.bits_per_sample(),
        peak_dbfs: clip.peak_dbfs(),
        rms_dbfs: clip.rms_dbfs(),
        sweep,
    }
}
