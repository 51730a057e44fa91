//! Filename grammar shared by all pipeline stages.
//!
//! Stages hand work to each other through the filesystem, so these patterns
//! are the contract between them:
//!
//! - raw compressed recording: `NN-NN.mp3`
//! - raw waveform: `NN-NN_original.wav`
//! - segmented take: `<prefix>_<index>.wav`
//! - lesson folder: exactly two ASCII digits

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

fn raw_mp3_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d\d)-(\d\d)\.mp3$").unwrap())
}

fn original_wav_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d\d)-(\d\d)_original\.wav$").unwrap())
}

fn take_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(.+?)_(\d+)\.wav$").unwrap())
}

fn lesson_take_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d\d)-(\d\d)_(\d+)\.wav$").unwrap())
}

/// Two-part lesson/section identifier embedded in a raw recording's
/// filename, e.g. `07-03`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordingPrefix {
    lesson: String,
    section: String,
}

impl RecordingPrefix {
    /// Two-digit lesson component, e.g. `"07"`.
    pub fn lesson(&self) -> &str {
        &self.lesson
    }

    /// Two-digit section component, e.g. `"03"`.
    pub fn section(&self) -> &str {
        &self.section
    }

    /// Lesson number without the leading zero.
    pub fn lesson_number(&self) -> u32 {
        // Both digits validated at parse time
        self.lesson.parse().unwrap_or(0)
    }

    /// Filename of the compressed source for this prefix.
    pub fn mp3_name(&self) -> String {
        format!("{self}.mp3")
    }

    /// Filename of the canonical waveform for this prefix.
    pub fn original_wav_name(&self) -> String {
        format!("{self}_original.wav")
    }
}

impl fmt::Display for RecordingPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.lesson, self.section)
    }
}

/// A segmented take parsed from `<prefix>_<index>.wav`.
///
/// The prefix here is the raw capture group; it is not required to be a
/// valid [`RecordingPrefix`] (the take filter groups by whatever string
/// precedes the final `_<index>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TakeName {
    pub prefix: String,
    pub index: u32,
}

/// A take whose prefix carries the full lesson/section identifier,
/// parsed from `NN-NN_<index>.wav`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonTake {
    pub prefix: RecordingPrefix,
    pub index: u32,
}

/// Parse a raw compressed recording filename (`NN-NN.mp3`).
pub fn parse_raw_mp3(name: &str) -> Option<RecordingPrefix> {
    let caps = raw_mp3_re().captures(name)?;
    Some(RecordingPrefix {
        lesson: caps[1].to_string(),
        section: caps[2].to_string(),
    })
}

/// Parse a raw waveform filename (`NN-NN_original.wav`).
pub fn parse_original_wav(name: &str) -> Option<RecordingPrefix> {
    let caps = original_wav_re().captures(name)?;
    Some(RecordingPrefix {
        lesson: caps[1].to_string(),
        section: caps[2].to_string(),
    })
}

/// Parse a segmented take filename (`<prefix>_<index>.wav`).
///
/// `NN-NN_original.wav` does not match: the trailing component must be
/// all digits.
pub fn parse_take(name: &str) -> Option<TakeName> {
    let caps = take_re().captures(name)?;
    let index = caps[2].parse().ok()?;
    Some(TakeName {
        prefix: caps[1].to_string(),
        index,
    })
}

/// Parse a take filename with a full lesson/section prefix
/// (`NN-NN_<index>.wav`).
pub fn parse_lesson_take(name: &str) -> Option<LessonTake> {
    let caps = lesson_take_re().captures(name)?;
    let index = caps[3].parse().ok()?;
    Some(LessonTake {
        prefix: RecordingPrefix {
            lesson: caps[1].to_string(),
            section: caps[2].to_string(),
        },
        index,
    })
}

/// Whether a directory name is a lesson folder: exactly two ASCII digits.
pub fn is_lesson_dir_name(name: &str) -> bool {
    name.len() == 2 && name.bytes().all(|b| b.is_ascii_digit())
}
