//! Pipeline orchestration.

use std::time::{Duration, Instant};

use tracing::{info, warn};

use lclip_models::RunStats;

use crate::config::PipelineConfig;
use crate::error::PipelineResult;
use crate::stages;

/// Outcome of a pipeline run: the counters plus wall-clock duration.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub stats: RunStats,
    pub elapsed: Duration,
}

/// Facade over the six stages.
///
/// Stages run strictly in order, one file at a time, and every entry
/// point builds a fresh [`RunStats`] so repeated runs never share
/// counter state.
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut PipelineConfig {
        &mut self.config
    }

    /// Run all six stages in order.
    pub async fn run_all(&self) -> PipelineResult<RunReport> {
        info!("starting full pipeline run");
        let started = Instant::now();
        let mut stats = RunStats::default();

        self.normalize_then_segment(&mut stats).await?;
        stages::filter_takes(&self.config, &mut stats).await?;
        stages::group_lessons(&self.config, &mut stats).await?;
        stages::trim_and_encode(&self.config, &mut stats).await?;
        stages::publish(&self.config, &mut stats).await?;

        Ok(self.finish(stats, started))
    }

    /// Run only normalization and segmentation.
    pub async fn run_segmentation(&self) -> PipelineResult<RunReport> {
        info!("starting segmentation run");
        let started = Instant::now();
        let mut stats = RunStats::default();

        self.normalize_then_segment(&mut stats).await?;

        Ok(self.finish(stats, started))
    }

    /// Run only the take filter.
    pub async fn run_filter(&self) -> PipelineResult<RunReport> {
        let started = Instant::now();
        let mut stats = RunStats::default();
        stages::filter_takes(&self.config, &mut stats).await?;
        Ok(self.finish(stats, started))
    }

    /// Run only the lesson grouper.
    pub async fn run_group(&self) -> PipelineResult<RunReport> {
        let started = Instant::now();
        let mut stats = RunStats::default();
        stages::group_lessons(&self.config, &mut stats).await?;
        Ok(self.finish(stats, started))
    }

    /// Run only the trimmer/encoder.
    pub async fn run_encode(&self) -> PipelineResult<RunReport> {
        let started = Instant::now();
        let mut stats = RunStats::default();
        stages::trim_and_encode(&self.config, &mut stats).await?;
        Ok(self.finish(stats, started))
    }

    /// Run only the publisher.
    pub async fn run_publish(&self) -> PipelineResult<RunReport> {
        let started = Instant::now();
        let mut stats = RunStats::default();
        stages::publish(&self.config, &mut stats).await?;
        Ok(self.finish(stats, started))
    }

    async fn normalize_then_segment(&self, stats: &mut RunStats) -> PipelineResult<()> {
        let all_converted = stages::normalize(&self.config).await?;
        if !all_converted {
            warn!("some recordings failed to decode, segmenting whatever waveforms exist");
        }
        stages::segment(&self.config, stats).await
    }

    fn finish(&self, stats: RunStats, started: Instant) -> RunReport {
        let report = RunReport {
            stats,
            elapsed: started.elapsed(),
        };
        log_summary(&report);
        report
    }
}

fn log_summary(report: &RunReport) {
    let s = &report.stats;
    info!("run statistics:");
    info!("  deleted files:   {}", s.deleted_files);
    info!("  kept files:      {}", s.kept_files);
    info!("  moved files:     {}", s.moved_files);
    info!("  renamed files:   {}", s.renamed_files);
    info!("  converted files: {}", s.converted_files);
    info!("  copied files:    {}", s.copied_files);
    info!("  total duration:  {:.2?}", report.elapsed);
}
