//! Interactive operator menu.
//!
//! Mirrors how the studio actually drives the pipeline: usually one
//! full run, sometimes a single stage after fixing the inputs, and
//! occasionally a parameter tweak when a session's noise floor differs.

use std::io::{self, Write};
use std::path::Path;

use lclip_media::SilenceProfile;
use lclip_pipeline::{Pipeline, PipelineResult, RunReport};

/// Run the interactive menu until the operator exits.
pub async fn interactive(mut pipeline: Pipeline) {
    println!("============================================");
    println!(" LessonClip audio pipeline");
    println!("============================================");
    println!(" Splits narrated recordings at silence gaps,");
    println!(" filters prompt tones and alternate takes,");
    println!(" renumbers per lesson, trims and encodes.");

    loop {
        let seg = pipeline.config().segmentation;
        let trim = pipeline.config().trim;
        println!("--------------------------------------------");
        println!("1. run all stages");
        println!("2. segmentation only (decode + split)");
        println!("3. advanced: run a single stage");
        println!(
            "4. set segmentation parameters (now: {} ms, {} dBFS)",
            seg.min_silence_ms, seg.silence_thresh_dbfs
        );
        println!(
            "5. set trim parameters (now: {} ms, {} dBFS)",
            trim.min_silence_ms, trim.silence_thresh_dbfs
        );
        println!("6. inspect a waveform");
        println!("0. exit");

        let Some(choice) = prompt("choose an option (0-6): ") else {
            break;
        };

        match choice.as_str() {
            "1" => report_outcome(pipeline.run_all().await),
            "2" => report_outcome(pipeline.run_segmentation().await),
            "3" => advanced(&pipeline).await,
            "4" => adjust_segmentation(&mut pipeline),
            "5" => adjust_trim(&mut pipeline),
            "6" => {
                let Some(name) = prompt("waveform file name: ") else {
                    continue;
                };
                let path = pipeline.config().source_dir.join(name);
                if let Err(e) = inspect(&pipeline, &path).await {
                    println!("inspect failed: {e}");
                }
            }
            "0" => break,
            _ => println!("invalid choice"),
        }
    }

    println!("exiting");
}

async fn advanced(pipeline: &Pipeline) {
    println!("--------------------------------------------");
    println!("1. filter takes (delete prompt tones + alternates)");
    println!("2. group takes into lesson folders");
    println!("3. trim silence and encode to MP3");
    println!("4. publish encoded clips");
    println!("0. back");

    let Some(choice) = prompt("choose a stage (0-4): ") else {
        return;
    };

    match choice.as_str() {
        "1" => report_outcome(pipeline.run_filter().await),
        "2" => report_outcome(pipeline.run_group().await),
        "3" => report_outcome(pipeline.run_encode().await),
        "4" => report_outcome(pipeline.run_publish().await),
        "0" => {}
        _ => println!("invalid choice"),
    }
}

fn adjust_segmentation(pipeline: &mut Pipeline) {
    let current = pipeline.config().segmentation;
    if let Some(profile) = adjust_profile("segmentation", current, "1500", "-35") {
        pipeline.config_mut().segmentation = profile;
    }
}

fn adjust_trim(pipeline: &mut Pipeline) {
    let current = pipeline.config().trim;
    if let Some(profile) = adjust_profile("trim", current, "500", "-40") {
        pipeline.config_mut().trim = profile;
    }
}

fn adjust_profile(
    label: &str,
    current: SilenceProfile,
    default_ms: &str,
    default_dbfs: &str,
) -> Option<SilenceProfile> {
    println!("current {label} parameters:");
    println!("  minimum silence: {} ms", current.min_silence_ms);
    println!("  threshold:       {} dBFS", current.silence_thresh_dbfs);
    println!("  (recommended: {default_ms} ms, {default_dbfs} dBFS)");

    let min_silence_ms = match prompt_with_default("minimum silence (ms)", default_ms)?
        .parse::<u64>()
    {
        Ok(ms) => ms,
        Err(_) => {
            println!("not a number, parameters unchanged");
            return None;
        }
    };

    let threshold_dbfs = match prompt_with_default("silence threshold (dBFS)", default_dbfs)?
        .parse::<f64>()
    {
        Ok(dbfs) => dbfs,
        Err(_) => {
            println!("not a number, parameters unchanged");
            return None;
        }
    };

    let profile = current
        .with_min_silence_ms(min_silence_ms)
        .with_threshold_dbfs(threshold_dbfs);
    println!(
        "{label} parameters set to {} ms, {} dBFS",
        profile.min_silence_ms, profile.silence_thresh_dbfs
    );
    Some(profile)
}

/// Print the silence-detection diagnostics for one waveform.
pub async fn inspect(pipeline: &Pipeline, path: &Path) -> PipelineResult<()> {
    let min_silence_ms = pipeline.config().segmentation.min_silence_ms;
    let report = lclip_media::analyze_waveform(path, min_silence_ms).await?;

    println!("--------------------------------------------");
    println!("waveform: {}", path.display());
    println!(
        "  length:      {} ms ({:.1} s)",
        report.duration_ms,
        report.duration_ms as f64 / 1000.0
    );
    println!("  channels:    {}", report.channels);
    println!("  sample rate: {} Hz", report.sample_rate);
    println!("  bit depth:   {} bit", report.bits_per_sample);
    println!("  peak:        {:.1} dBFS", report.peak_dbfs);
    println!("  rms:         {:.1} dBFS", report.rms_dbfs);
    println!("segments by threshold (minimum silence {min_silence_ms} ms):");
    for entry in &report.sweep {
        println!(
            "  {:>6.0} dBFS: {} segments, {} ms non-silent",
            entry.threshold_dbfs, entry.segments, entry.total_nonsilent_ms
        );
    }

    if report.is_very_quiet() {
        println!("warning: extremely low level; the recording may be damaged or near-empty");
    } else if report.is_effectively_silent() {
        println!("warning: no segments at any threshold; likely a pure-silence file");
    }

    Ok(())
}

fn report_outcome(result: PipelineResult<RunReport>) {
    match result {
        Ok(report) => println!(
            "done in {:.2?} ({} converted, {} deleted, {} kept, {} renamed, {} copied)",
            report.elapsed,
            report.stats.converted_files,
            report.stats.deleted_files,
            report.stats.kept_files,
            report.stats.renamed_files,
            report.stats.copied_files
        ),
        Err(e) => println!("run failed: {e}"),
    }
}

fn prompt(message: &str) -> Option<String> {
    print!("{message}");
    io::stdout().flush().ok()?;

    let mut line = String::new();
    match io::stdin().read_line(&mut line) {
        Ok(0) => None, // EOF
        Ok(_) => Some(line.trim().to_string()),
        Err(_) => None,
    }
}

fn prompt_with_default(message: &str, default: &str) -> Option<String> {
    let value = prompt(&format!("{message} [{default}]: "))?;
    if value.is_empty() {
        Some(default.to_string())
    } else {
        Some(value)
    }
}
