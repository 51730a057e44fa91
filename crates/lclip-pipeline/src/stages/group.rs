//! Lesson grouping: surviving takes → numbered per-lesson sequences.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use lclip_models::{LessonTake, RunStats};

use crate::config::PipelineConfig;
use crate::error::PipelineResult;
use crate::stages::file_names;

/// Group surviving takes by lesson number and copy each group, sorted by
/// (full prefix, index), into `<lesson>/<n>.wav` with n starting at 1.
///
/// Sources are copied, not moved, so the flat takes remain for audit.
/// A destination that already exists is skipped, which makes re-running
/// the stage on a complete directory a no-op.
pub async fn group_lessons(config: &PipelineConfig, stats: &mut RunStats) -> PipelineResult<()> {
    let names = file_names(&config.source_dir).await?;
    let wav_names: Vec<&String> = names.iter().filter(|n| n.ends_with(".wav")).collect();

    if wav_names.is_empty() {
        warn!("no clips to group into lessons");
        return Ok(());
    }

    info!(count = wav_names.len(), "grouping clips by lesson");

    let mut groups: HashMap<String, Vec<(LessonTake, String)>> = HashMap::new();
    for name in wav_names {
        let Some(take) = lclip_models::parse_lesson_take(name) else {
            warn!(file = %name, "name does not match the lesson take pattern, skipping");
            continue;
        };
        groups
            .entry(take.prefix.lesson().to_string())
            .or_default()
            .push((take, name.clone()));
    }

    let mut lessons: Vec<_> = groups.keys().cloned().collect();
    lessons.sort();

    for lesson in lessons {
        let mut members = groups.remove(&lesson).unwrap_or_default();
        members.sort_by_key(|(take, _)| (take.prefix.clone(), take.index));

        let lesson_dir = config.source_dir.join(&lesson);
        tokio::fs::create_dir_all(&lesson_dir).await?;
        info!(lesson = %lesson, clips = members.len(), "building lesson folder");

        for (n, (_, name)) in members.iter().enumerate() {
            let src = config.source_dir.join(name);
            let dst = lesson_dir.join(format!("{}.wav", n + 1));

            if tokio::fs::try_exists(&dst).await? {
                debug!(clip = %dst.display(), "already grouped, skipping");
                continue;
            }

            tokio::fs::copy(&src, &dst).await?;
            stats.renamed_files += 1;
            debug!(from = %name, to = %dst.display(), "copied into lesson folder");
        }
    }

    info!(renamed = stats.renamed_files, "lesson grouping finished");

    Ok(())
}
