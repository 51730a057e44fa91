//! Take filtering: drop prompt tones, then every other take.

use std::collections::HashMap;

use tracing::{debug, error, info, warn};

use lclip_models::RunStats;

use crate::config::PipelineConfig;
use crate::error::PipelineResult;
use crate::stages::file_names;

/// Apply the positional keep/discard policy to all segmented takes.
///
/// Step A deletes the prompt-tone indices for every prefix. Step B sorts
/// each prefix group by index and deletes the odd 0-based ranks. Files
/// whose names don't match the take pattern are logged and left alone.
pub async fn filter_takes(config: &PipelineConfig, stats: &mut RunStats) -> PipelineResult<()> {
    let names = file_names(&config.source_dir).await?;
    let wav_names: Vec<&String> = names.iter().filter(|n| n.ends_with(".wav")).collect();

    if wav_names.is_empty() {
        warn!("no take clips to filter");
        return Ok(());
    }

    info!(count = wav_names.len(), "filtering takes");

    let policy = &config.take_policy;
    let mut groups: HashMap<String, Vec<(u32, String)>> = HashMap::new();

    for name in wav_names {
        let Some(take) = lclip_models::parse_take(name) else {
            warn!(file = %name, "name does not match the take pattern, leaving untouched");
            continue;
        };

        if policy.is_prompt_tone(take.index) {
            let path = config.source_dir.join(name);
            match tokio::fs::remove_file(&path).await {
                Ok(()) => {
                    stats.deleted_files += 1;
                    info!(file = %name, "deleted prompt tone");
                }
                Err(e) => error!(file = %name, "failed to delete prompt tone: {e}"),
            }
            continue;
        }

        groups
            .entry(take.prefix)
            .or_default()
            .push((take.index, name.clone()));
    }

    let mut prefixes: Vec<_> = groups.keys().cloned().collect();
    prefixes.sort();

    for prefix in prefixes {
        let mut takes = groups.remove(&prefix).unwrap_or_default();
        takes.sort_by_key(|(index, _)| *index);
        info!(prefix = %prefix, takes = takes.len(), "filtering prefix group");

        for (rank, (_, name)) in takes.iter().enumerate() {
            if policy.keeps_rank(rank) {
                stats.kept_files += 1;
                debug!(file = %name, "kept take");
            } else {
                let path = config.source_dir.join(name);
                match tokio::fs::remove_file(&path).await {
                    Ok(()) => {
                        stats.deleted_files += 1;
                        info!(file = %name, "deleted alternate take");
                    }
                    Err(e) => error!(file = %name, "failed to delete alternate take: {e}"),
                }
            }
        }
    }

    info!(
        deleted = stats.deleted_files,
        kept = stats.kept_files,
        "take filtering finished"
    );

    Ok(())
}
