//! Amplitude-threshold silence detection.
//!
//! A clip is scanned as a 1 ms RMS envelope; any run of milliseconds at or
//! below the threshold lasting at least the configured minimum is a silence
//! gap, and the complementary runs are the non-silent ranges. This mirrors
//! how the source recordings were produced: spoken takes separated by long
//! deliberate pauses, over a noise floor that varies per session.

use serde::{Deserialize, Serialize};

use crate::wave::AudioClip;

/// Silence detection parameter pair.
///
/// Segmentation and trimming use two independently configured profiles;
/// conflating them is a classic mistake, so each stage owns a named value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SilenceProfile {
    /// Minimum gap duration (milliseconds) before a quiet run counts as
    /// silence.
    pub min_silence_ms: u64,

    /// Amplitude floor (dBFS) at or below which audio is classified as
    /// silence.
    ///
    /// - −20: fairly loud content only
    /// - −40: light speech, the usual trim setting
    /// - −50: very quiet speech, tolerant of background noise
    /// - −60: close to the digital noise floor
    pub silence_thresh_dbfs: f64,
}

impl SilenceProfile {
    /// Default profile for cutting a narrated recording into takes.
    pub fn segmentation() -> Self {
        Self {
            min_silence_ms: 1000,
            silence_thresh_dbfs: -50.0,
        }
    }

    /// Recommended segmentation operating point for typical session noise
    /// floors.
    pub fn recommended_segmentation() -> Self {
        Self {
            min_silence_ms: 1500,
            silence_thresh_dbfs: -35.0,
        }
    }

    /// Default profile for trimming residual lead-in/lead-out silence.
    pub fn trimming() -> Self {
        Self {
            min_silence_ms: 500,
            silence_thresh_dbfs: -40.0,
        }
    }

    /// Builder-style setter for the minimum silence duration.
    pub fn with_min_silence_ms(mut self, ms: u64) -> Self {
        self.min_silence_ms = ms.max(1);
        self
    }

    /// Builder-style setter for the silence threshold.
    pub fn with_threshold_dbfs(mut self, dbfs: f64) -> Self {
        self.silence_thresh_dbfs = dbfs.clamp(-96.0, 0.0);
        self
    }
}

/// A non-silent time range `[start_ms, end_ms)` inside a clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NonsilentRange {
    pub start_ms: u64,
    pub end_ms: u64,
}

impl NonsilentRange {
    pub fn duration_ms(&self) -> u64 {
        self.end_ms.saturating_sub(self.start_ms)
    }
}

/// Detect the non-silent ranges of a clip under the given profile.
///
/// Ranges are returned in scan order. A fully silent clip yields no
/// ranges; a clip too short to contain a qualifying gap yields one range
/// covering the whole clip.
pub fn detect_nonsilent(clip: &AudioClip, profile: &SilenceProfile) -> Vec<NonsilentRange> {
    let total_ms = clip.duration_ms();
    if total_ms == 0 {
        return Vec::new();
    }

    // 1 ms envelope classification
    let silent: Vec<bool> = (0..total_ms)
        .map(|ms| clip.window_rms_dbfs(ms, ms + 1) <= profile.silence_thresh_dbfs)
        .collect();

    // Qualifying silence gaps
    let mut gaps: Vec<(u64, u64)> = Vec::new();
    let mut run_start: Option<u64> = None;
    for ms in 0..total_ms {
        match (silent[ms as usize], run_start) {
            (true, None) => run_start = Some(ms),
            (false, Some(start)) => {
                if ms - start >= profile.min_silence_ms {
                    gaps.push((start, ms));
                }
                run_start = None;
            }
            _ => {}
        }
    }
    if let Some(start) = run_start {
        if total_ms - start >= profile.min_silence_ms {
            gaps.push((start, total_ms));
        }
    }

    // Complement of the gaps over [0, total_ms)
    let mut ranges = Vec::new();
    let mut cursor = 0u64;
    for (gap_start, gap_end) in gaps {
        if gap_start > cursor {
            ranges.push(NonsilentRange {
                start_ms: cursor,
                end_ms: gap_start,
            });
        }
        cursor = gap_end;
    }
    if cursor < total_ms {
        ranges.push(NonsilentRange {
            start_ms: cursor,
            end_ms: total_ms,
        });
    }

    ranges
}

/// Strip leading and trailing silence from a clip.
///
/// When no non-silent range is detected the clip is returned unchanged:
/// trimming is a refinement, never a reason to drop content.
pub fn trim_silence(clip: &AudioClip, profile: &SilenceProfile) -> AudioClip {
    let ranges = detect_nonsilent(clip, profile);
    match (ranges.first(), ranges.last()) {
        (Some(first), Some(last)) => clip.slice_ms(first.start_ms, last.end_ms),
        _ => clip.clone(),
    }
}
