//! Pipeline configuration.

use std::path::{Path, PathBuf};

use lclip_media::SilenceProfile;
use lclip_models::TakeFilterPolicy;

/// Configuration for one pipeline run.
///
/// Segmentation and trimming carry two independent silence profiles;
/// see [`SilenceProfile`] for why they must not be conflated.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Working directory holding raw recordings and intermediate clips.
    pub source_dir: PathBuf,
    /// Root of the published content tree. Must exist for the publish
    /// stage to run; the stage is skipped otherwise.
    pub publish_root: PathBuf,
    /// Content category subfolder inside each published lesson.
    pub category: String,
    /// Silence parameters for cutting recordings into takes.
    pub segmentation: SilenceProfile,
    /// Silence parameters for trimming lead-in/lead-out before encoding.
    pub trim: SilenceProfile,
    /// Positional keep/discard rules for segmented takes.
    pub take_policy: TakeFilterPolicy,
}

impl PipelineConfig {
    /// Configuration rooted at `source_dir` with the default profiles
    /// and a `published/` tree beside the recordings.
    pub fn new(source_dir: impl AsRef<Path>) -> Self {
        let source_dir = source_dir.as_ref().to_path_buf();
        let publish_root = source_dir.join("published");
        Self {
            source_dir,
            publish_root,
            category: "words".to_string(),
            segmentation: SilenceProfile::segmentation(),
            trim: SilenceProfile::trimming(),
            take_policy: TakeFilterPolicy::standard(),
        }
    }

    /// Builder-style setter for the publish root.
    pub fn with_publish_root(mut self, root: impl AsRef<Path>) -> Self {
        self.publish_root = root.as_ref().to_path_buf();
        self
    }

    /// Builder-style setter for the published content category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Builder-style setter for the segmentation profile.
    pub fn with_segmentation(mut self, profile: SilenceProfile) -> Self {
        self.segmentation = profile;
        self
    }

    /// Builder-style setter for the trim profile.
    pub fn with_trim(mut self, profile: SilenceProfile) -> Self {
        self.trim = profile;
        self
    }
}
