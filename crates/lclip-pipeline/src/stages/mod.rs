//! The six pipeline stages.
//!
//! Every stage scans the filesystem state left by its predecessor, takes
//! per-file failures on the chin (log and continue) and returns early with
//! a warning when it has nothing to do.

mod encode;
mod filter;
mod group;
mod normalize;
mod publish;
mod segment;

pub use encode::trim_and_encode;
pub use filter::filter_takes;
pub use group::group_lessons;
pub use normalize::normalize;
pub use publish::publish;
pub use segment::segment;

use std::path::Path;

use crate::error::PipelineResult;

/// File names (not directories) in `dir`, sorted for deterministic scans.
pub(crate) async fn file_names(dir: &Path) -> PipelineResult<Vec<String>> {
    let mut names = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        if entry.file_type().await?.is_file() {
            names.push(entry.file_name().to_string_lossy().to_string());
        }
    }
    names.sort();
    Ok(names)
}

/// Two-digit lesson directory names in `dir`, sorted.
///
/// The two-ASCII-digit shape is the lesson folder naming invariant;
/// anything else in the working directory is ignored.
pub(crate) async fn lesson_dir_names(dir: &Path) -> PipelineResult<Vec<String>> {
    let mut names = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name().to_string_lossy().to_string();
        if entry.file_type().await?.is_dir() && lclip_models::is_lesson_dir_name(&name) {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}
