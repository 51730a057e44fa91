//! Publishing: encoded clips → the published content tree.

use tracing::{debug, info, warn};

use lclip_models::RunStats;

use crate::config::PipelineConfig;
use crate::error::PipelineResult;
use crate::stages::{file_names, lesson_dir_names};

/// Copy every encoded clip into
/// `<publish-root>/lesson<N>/<category>/`, keyed by lesson number.
///
/// The publish root must already exist; when it doesn't the stage is
/// skipped with a warning and the working-tree artifacts remain usable.
pub async fn publish(config: &PipelineConfig, stats: &mut RunStats) -> PipelineResult<()> {
    if !tokio::fs::try_exists(&config.publish_root).await? {
        warn!(
            root = %config.publish_root.display(),
            "publish root does not exist, skipping publish stage"
        );
        return Ok(());
    }

    let lessons = lesson_dir_names(&config.source_dir).await?;
    if lessons.is_empty() {
        warn!("no lesson folders to publish");
        return Ok(());
    }

    for lesson in lessons {
        // Two validated digits; strip the leading zero for the tree name
        let lesson_number: u32 = lesson.parse().unwrap_or(0);
        let target = config
            .publish_root
            .join(format!("lesson{lesson_number}"))
            .join(&config.category);
        tokio::fs::create_dir_all(&target).await?;

        let dir = config.source_dir.join(&lesson);
        let clips: Vec<String> = file_names(&dir)
            .await?
            .into_iter()
            .filter(|n| n.to_lowercase().ends_with(".mp3"))
            .collect();

        info!(lesson = %lesson, clips = clips.len(), target = %target.display(), "publishing lesson");

        for name in clips {
            let src = dir.join(&name);
            let dst = target.join(&name);
            tokio::fs::copy(&src, &dst).await?;
            stats.copied_files += 1;
            debug!(from = %src.display(), to = %dst.display(), "published clip");
        }
    }

    info!(copied = stats.copied_files, "publishing finished");

    Ok(())
}
