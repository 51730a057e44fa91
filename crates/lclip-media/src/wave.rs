//! In-memory WAV clips.
//!
//! Clips are loaded fully into memory as interleaved 16-bit PCM; lesson
//! recordings are minutes long at most, so whole-file buffers are fine.
//! Amplitudes are reported in dBFS (decibels relative to full scale,
//! where 0 dBFS is the maximum 16-bit amplitude).

use std::io::Cursor;
use std::path::Path;

use crate::error::{MediaError, MediaResult};

/// Full scale for 16-bit PCM.
const FULL_SCALE: f64 = 32768.0;

/// An interleaved 16-bit PCM audio clip.
#[derive(Debug, Clone)]
pub struct AudioClip {
    samples: Vec<i16>,
    channels: u16,
    sample_rate: u32,
}

impl AudioClip {
    /// Build a clip from raw interleaved samples.
    pub fn from_samples(samples: Vec<i16>, channels: u16, sample_rate: u32) -> Self {
        Self {
            samples,
            channels,
            sample_rate,
        }
    }

    /// Load a WAV file.
    ///
    /// Only integer PCM readable as 16-bit is accepted; the normalizer
    /// guarantees that shape for everything the pipeline touches.
    pub async fn load(path: impl AsRef<Path>) -> MediaResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(MediaError::FileNotFound(path.to_path_buf()));
        }

        let bytes = tokio::fs::read(path).await?;
        let mut reader = hound::WavReader::new(Cursor::new(bytes))?;
        let spec = reader.spec();

        if spec.sample_format != hound::SampleFormat::Int {
            return Err(MediaError::UnsupportedFormat(format!(
                "{}: float WAV not supported",
                path.display()
            )));
        }

        let samples = reader
            .samples::<i16>()
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            samples,
            channels: spec.channels,
            sample_rate: spec.sample_rate,
        })
    }

    /// Write the clip as 16-bit PCM WAV.
    pub async fn save(&self, path: impl AsRef<Path>) -> MediaResult<()> {
        let spec = hound::WavSpec {
            channels: self.channels,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec)?;
            for &s in &self.samples {
                writer.write_sample(s)?;
            }
            writer.finalize()?;
        }

        tokio::fs::write(path, cursor.into_inner()).await?;
        Ok(())
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Bit depth of the in-memory representation.
    pub fn bits_per_sample(&self) -> u16 {
        16
    }

    /// Number of sample frames (one sample per channel).
    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            0
        } else {
            self.samples.len() / self.channels as usize
        }
    }

    /// Clip duration in whole milliseconds.
    pub fn duration_ms(&self) -> u64 {
        if self.sample_rate == 0 {
            0
        } else {
            self.frames() as u64 * 1000 / self.sample_rate as u64
        }
    }

    /// Copy out the `[start_ms, end_ms)` range as a new clip.
    ///
    /// Bounds are clamped to the clip; an inverted range yields an empty
    /// clip.
    pub fn slice_ms(&self, start_ms: u64, end_ms: u64) -> AudioClip {
        let start = self
            .frame_at_ms(start_ms)
            .saturating_mul(self.channels as usize);
        let end = self
            .frame_at_ms(end_ms)
            .saturating_mul(self.channels as usize);

        let samples = if start >= end {
            Vec::new()
        } else {
            self.samples[start..end].to_vec()
        };

        AudioClip {
            samples,
            channels: self.channels,
            sample_rate: self.sample_rate,
        }
    }

    /// Peak amplitude in dBFS.
    pub fn peak_dbfs(&self) -> f64 {
        let peak = self
            .samples
            .iter()
            .map(|&s| (s as i32).unsigned_abs())
            .max()
            .unwrap_or(0);
        amplitude_to_dbfs(peak as f64 / FULL_SCALE)
    }

    /// RMS amplitude of the whole clip in dBFS.
    pub fn rms_dbfs(&self) -> f64 {
        self.window_rms_dbfs(0, self.duration_ms())
    }

    /// RMS amplitude of the `[start_ms, end_ms)` window in dBFS.
    ///
    /// An empty or out-of-range window reads as silence (−∞).
    pub fn window_rms_dbfs(&self, start_ms: u64, end_ms: u64) -> f64 {
        let start = self
            .frame_at_ms(start_ms)
            .saturating_mul(self.channels as usize);
        let end = self
            .frame_at_ms(end_ms)
            .saturating_mul(self.channels as usize);

        if start >= end {
            return f64::NEG_INFINITY;
        }

        let window = &self.samples[start..end];
        let sum_squares: f64 = window.iter().map(|&s| (s as f64) * (s as f64)).sum();
        let rms = (sum_squares / window.len() as f64).sqrt();
        amplitude_to_dbfs(rms / FULL_SCALE)
    }

    fn frame_at_ms(&self, ms: u64) -> usize {
        let frame = ms * self.sample_rate as u64 / 1000;
        (frame as usize).min(self.frames())
    }
}

/// Convert a normalized amplitude (1.0 = full scale) to dBFS.
pub fn amplitude_to_dbfs(amplitude: f64) -> f64 {
    if !amplitude.is_finite() || amplitude <= 0.0 {
        f64::NEG_INFINITY
    } else {
        20.0 * amplitude.log10()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tone(frames: usize, amplitude: i16) -> Vec<i16> {
        vec![amplitude; frames]
    }

    #[test]
    fn duration_and_frames() {
        let clip = AudioClip::from_samples(tone(8000, 100), 1, 8000);
        assert_eq!(clip.frames(), 8000);
        assert_eq!(clip.duration_ms(), 1000);

        let stereo = AudioClip::from_samples(tone(8000, 100), 2, 8000);
        assert_eq!(stereo.frames(), 4000);
        assert_eq!(stereo.duration_ms(), 500);
    }

    #[test]
    fn slice_ms_bounds() {
        let clip = AudioClip::from_samples((0..8000).map(|i| i as i16).collect(), 1, 8000);

        let mid = clip.slice_ms(250, 500);
        assert_eq!(mid.frames(), 2000);
        assert_eq!(mid.samples()[0], 2000);

        // Clamped past the end
        let tail = clip.slice_ms(900, 5000);
        assert_eq!(tail.frames(), 800);

        // Inverted range is empty
        assert_eq!(clip.slice_ms(500, 250).frames(), 0);
    }

    #[test]
    fn dbfs_of_silence_is_negative_infinity() {
        let clip = AudioClip::from_samples(vec![0; 1000], 1, 8000);
        assert_eq!(clip.peak_dbfs(), f64::NEG_INFINITY);
        assert_eq!(clip.rms_dbfs(), f64::NEG_INFINITY);
    }

    #[test]
    fn dbfs_of_full_scale_is_zero() {
        let clip = AudioClip::from_samples(vec![i16::MIN; 1000], 1, 8000);
        // |i16::MIN| equals full scale exactly
        assert!(clip.peak_dbfs().abs() < 0.01);
    }

    #[test]
    fn dbfs_halving_loses_six_db() {
        let loud = AudioClip::from_samples(tone(1000, 16384), 1, 8000);
        let quiet = AudioClip::from_samples(tone(1000, 8192), 1, 8000);
        let diff = loud.rms_dbfs() - quiet.rms_dbfs();
        assert!((diff - 6.02).abs() < 0.1);
    }

    #[test]
    fn window_rms_tracks_content() {
        // 0..500ms silence, 500..1000ms tone
        let mut samples = vec![0i16; 4000];
        samples.extend(tone(4000, 10000));
        let clip = AudioClip::from_samples(samples, 1, 8000);

        assert_eq!(clip.window_rms_dbfs(0, 500), f64::NEG_INFINITY);
        assert!(clip.window_rms_dbfs(500, 1000) > -15.0);
        assert_eq!(clip.window_rms_dbfs(1000, 1000), f64::NEG_INFINITY);
    }

    #[tokio::test]
    async fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.wav");

        let clip = AudioClip::from_samples(vec![0, 100, -100, i16::MAX], 2, 44100);
        clip.save(&path).await.unwrap();

        let loaded = AudioClip::load(&path).await.unwrap();
        assert_eq!(loaded.samples(), clip.samples());
        assert_eq!(loaded.channels(), 2);
        assert_eq!(loaded.sample_rate(), 44100);
    }

    #[tokio::test]
    async fn load_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = AudioClip::load(dir.path().join("nope.wav")).await;
        assert!(matches!(result, Err(MediaError::FileNotFound(_))));
    }

    #[tokio::test]
    async fn load_garbage_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.wav");
        tokio::fs::write(&path, b"definitely not a wav").await.unwrap();
        assert!(matches!(AudioClip::load(&path).await, Err(MediaError::Wav(_))));
    }
}
