//! Compressed ↔ waveform transcoding through FFmpeg.

use std::path::Path;

use crate::command::FfmpegCommand;
use crate::error::MediaResult;

/// Sample rate of canonical analysis waveforms.
pub const WAVEFORM_SAMPLE_RATE: u32 = 44_100;

/// Bitrate of distribution MP3 clips.
pub const DISTRIBUTION_BITRATE: &str = "192k";

/// Decode a compressed recording to a 16-bit 44.1 kHz WAV.
pub async fn decode_to_wav(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> MediaResult<()> {
    FfmpegCommand::new(src, dst)
        .audio_codec("pcm_s16le")
        .sample_rate(WAVEFORM_SAMPLE_RATE)
        .run()
        .await
}

/// Encode a WAV clip to MP3 at the distribution bitrate.
pub async fn encode_mp3(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> MediaResult<()> {
    FfmpegCommand::new(src, dst)
        .audio_codec("libmp3lame")
        .audio_bitrate(DISTRIBUTION_BITRATE)
        .run()
        .await
}
