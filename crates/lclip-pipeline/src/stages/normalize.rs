//! Format normalization: compressed sources → canonical waveforms.

use std::collections::HashSet;

use tracing::{error, info};

use crate::config::PipelineConfig;
use crate::error::PipelineResult;
use crate::stages::file_names;

/// Decode every `NN-NN.mp3` without an `NN-NN_original.wav` counterpart
/// to a 16-bit 44.1 kHz waveform beside it.
///
/// Idempotent: recordings that already have a waveform are skipped.
/// Individual decode failures are logged and do not abort the remaining
/// conversions. Returns `Ok(true)` only if every attempted conversion
/// succeeded; callers treat partial success as a warning and proceed to
/// segmentation on whatever waveforms exist.
pub async fn normalize(config: &PipelineConfig) -> PipelineResult<bool> {
    let names = file_names(&config.source_dir).await?;

    let existing: HashSet<String> = names
        .iter()
        .filter_map(|n| lclip_models::parse_original_wav(n))
        .map(|p| p.to_string())
        .collect();

    let to_convert: Vec<_> = names
        .iter()
        .filter_map(|n| lclip_models::parse_raw_mp3(n))
        .filter(|p| !existing.contains(&p.to_string()))
        .collect();

    if to_convert.is_empty() {
        info!("all recordings already have waveforms, nothing to convert");
        return Ok(true);
    }

    info!(count = to_convert.len(), "decoding recordings to waveforms");

    let mut converted = 0usize;
    for prefix in &to_convert {
        let src = config.source_dir.join(prefix.mp3_name());
        let dst = config.source_dir.join(prefix.original_wav_name());

        match lclip_media::decode_to_wav(&src, &dst).await {
            Ok(()) => {
                info!(file = %src.display(), "decoded to waveform");
                converted += 1;
            }
            Err(e) => {
                error!(file = %src.display(), "decode failed: {e}");
            }
        }
    }

    info!(
        converted,
        attempted = to_convert.len(),
        "waveform conversion finished"
    );

    Ok(converted == to_convert.len())
}
