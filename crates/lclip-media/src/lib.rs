//! WAV analysis and FFmpeg CLI wrapper for lesson audio processing.
//!
//! This crate provides:
//! - WAV clip loading, slicing and export (`wave`)
//! - Amplitude-threshold silence detection and trimming (`silence`)
//! - Type-safe FFmpeg command building for decode/encode (`command`,
//!   `transcode`)
//! - Threshold-sweep diagnostics for parameter tuning (`analyze`)

pub mod analyze;
pub mod command;
pub mod error;
pub mod silence;
pub mod transcode;
pub mod wave;

pub use analyze::{analyze_waveform, WaveformReport};
pub use command::{check_ffmpeg, FfmpegCommand};
pub use error::{MediaError, MediaResult};
pub use silence::{detect_nonsilent, trim_silence, NonsilentRange, SilenceProfile};
pub use transcode::{decode_to_wav, encode_mp3, DISTRIBUTION_BITRATE, WAVEFORM_SAMPLE_RATE};
pub use wave::AudioClip;
