//! Stage behavior over real temp working directories.
//!
//! None of these tests shell out: inputs are authored as WAV files (or
//! plain bytes where a stage never opens the audio), so the pipeline paths
//! exercised here never spawn FFmpeg.

use std::collections::BTreeSet;
use std::path::Path;

use lclip_media::{AudioClip, SilenceProfile};
use lclip_pipeline::{stages, Pipeline, PipelineConfig};
use tempfile::TempDir;

const RATE: u32 = 8000;

fn ms_to_frames(ms: u64) -> usize {
    (ms * RATE as u64 / 1000) as usize
}

/// Mono clip from (duration_ms, amplitude) spans.
fn clip_from_spans(spans: &[(u64, i16)]) -> AudioClip {
    let mut samples = Vec::new();
    for &(ms, amp) in spans {
        samples.extend(std::iter::repeat(amp).take(ms_to_frames(ms)));
    }
    AudioClip::from_samples(samples, 1, RATE)
}

fn test_config(dir: &Path) -> PipelineConfig {
    PipelineConfig::new(dir)
        .with_segmentation(SilenceProfile::segmentation().with_threshold_dbfs(-40.0))
}

fn dir_entries(dir: &Path) -> BTreeSet<String> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect()
}

#[tokio::test]
async fn segmenter_exports_one_clip_per_detected_range() {
    let dir = TempDir::new().unwrap();
    let recording = clip_from_spans(&[(600, 8000), (1200, 0), (600, 8000)]);
    recording
        .save(dir.path().join("03-01_original.wav"))
        .await
        .unwrap();

    let pipeline = Pipeline::new(test_config(dir.path()));
    let report = pipeline.run_segmentation().await.unwrap();

    assert_eq!(report.stats.converted_files, 2);
    let first = AudioClip::load(dir.path().join("03-01_1.wav")).await.unwrap();
    let second = AudioClip::load(dir.path().join("03-01_2.wav")).await.unwrap();
    assert_eq!(first.duration_ms(), 600);
    assert_eq!(second.duration_ms(), 600);
    assert!(!dir.path().join("03-01_3.wav").exists());
}

#[tokio::test]
async fn segmenter_emits_nothing_for_silent_recordings() {
    let dir = TempDir::new().unwrap();
    clip_from_spans(&[(3000, 0)])
        .save(dir.path().join("04-02_original.wav"))
        .await
        .unwrap();

    let before = dir_entries(dir.path());
    let pipeline = Pipeline::new(test_config(dir.path()));
    let report = pipeline.run_segmentation().await.unwrap();

    assert_eq!(report.stats.converted_files, 0);
    assert_eq!(dir_entries(dir.path()), before);
}

#[tokio::test]
async fn normalizer_skips_recordings_with_existing_waveforms() {
    let dir = TempDir::new().unwrap();
    // Garbage mp3 beside a real waveform: nothing should be decoded
    std::fs::write(dir.path().join("05-01.mp3"), b"not really mp3").unwrap();
    clip_from_spans(&[(500, 0)])
        .save(dir.path().join("05-01_original.wav"))
        .await
        .unwrap();

    let before = dir_entries(dir.path());
    let config = test_config(dir.path());
    let all_converted = stages::normalize(&config).await.unwrap();

    assert!(all_converted);
    assert_eq!(dir_entries(dir.path()), before);
}

#[tokio::test]
async fn prompt_tones_and_alternate_takes_are_deleted() {
    let dir = TempDir::new().unwrap();
    for i in 0..5 {
        std::fs::write(dir.path().join(format!("03-01_{i}.wav")), [i as u8]).unwrap();
    }
    // The canonical waveform doesn't match the take pattern and stays
    clip_from_spans(&[(100, 0)])
        .save(dir.path().join("03-01_original.wav"))
        .await
        .unwrap();

    let pipeline = Pipeline::new(test_config(dir.path()));
    let report = pipeline.run_filter().await.unwrap();

    assert_eq!(report.stats.deleted_files, 4);
    assert_eq!(report.stats.kept_files, 1);
    assert!(dir.path().join("03-01_3.wav").exists());
    for i in [0u32, 1, 2, 4] {
        assert!(!dir.path().join(format!("03-01_{i}.wav")).exists());
    }
    assert!(dir.path().join("03-01_original.wav").exists());
}

#[tokio::test]
async fn take_filter_keeps_ceil_half_of_each_group() {
    let dir = TempDir::new().unwrap();
    // Two groups past the prompt tones: 6 takes for 02-01, 3 for 02-02
    for i in 3..9 {
        std::fs::write(dir.path().join(format!("02-01_{i}.wav")), b"x").unwrap();
    }
    for i in 3..6 {
        std::fs::write(dir.path().join(format!("02-02_{i}.wav")), b"x").unwrap();
    }

    let pipeline = Pipeline::new(test_config(dir.path()));
    let report = pipeline.run_filter().await.unwrap();

    // 02-01: ranks 0,2,4 -> indices 3,5,7; 02-02: ranks 0,2 -> indices 3,5
    assert_eq!(report.stats.kept_files, 5);
    assert_eq!(report.stats.deleted_files, 4);
    for name in ["02-01_3.wav", "02-01_5.wav", "02-01_7.wav", "02-02_3.wav", "02-02_5.wav"] {
        assert!(dir.path().join(name).exists(), "{name} should survive");
    }
    for name in ["02-01_4.wav", "02-01_6.wav", "02-01_8.wav", "02-02_4.wav"] {
        assert!(!dir.path().join(name).exists(), "{name} should be deleted");
    }
}

#[tokio::test]
async fn grouper_renumbers_in_prefix_then_index_order() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("05-02_3.wav"), b"third").unwrap();
    std::fs::write(dir.path().join("05-01_5.wav"), b"second").unwrap();
    std::fs::write(dir.path().join("05-01_3.wav"), b"first").unwrap();
    std::fs::write(dir.path().join("07-01_3.wav"), b"other lesson").unwrap();

    let pipeline = Pipeline::new(test_config(dir.path()));
    let report = pipeline.run_group().await.unwrap();

    assert_eq!(report.stats.renamed_files, 4);
    assert_eq!(std::fs::read(dir.path().join("05/1.wav")).unwrap(), b"first");
    assert_eq!(std::fs::read(dir.path().join("05/2.wav")).unwrap(), b"second");
    assert_eq!(std::fs::read(dir.path().join("05/3.wav")).unwrap(), b"third");
    assert!(!dir.path().join("05/4.wav").exists());
    assert_eq!(
        std::fs::read(dir.path().join("07/1.wav")).unwrap(),
        b"other lesson"
    );
    // Sources are copied, not moved
    assert!(dir.path().join("05-01_3.wav").exists());
}

#[tokio::test]
async fn grouper_rerun_is_a_no_op() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("05-01_3.wav"), b"a").unwrap();
    std::fs::write(dir.path().join("05-01_5.wav"), b"b").unwrap();

    let pipeline = Pipeline::new(test_config(dir.path()));
    let first = pipeline.run_group().await.unwrap();
    assert_eq!(first.stats.renamed_files, 2);

    let second = pipeline.run_group().await.unwrap();
    assert_eq!(second.stats.renamed_files, 0);
    assert_eq!(std::fs::read(dir.path().join("05/1.wav")).unwrap(), b"a");
    assert_eq!(std::fs::read(dir.path().join("05/2.wav")).unwrap(), b"b");
}

#[tokio::test]
async fn filtered_takes_flow_into_lesson_folders() {
    let dir = TempDir::new().unwrap();
    for i in 0..5 {
        std::fs::write(dir.path().join(format!("03-01_{i}.wav")), [i as u8]).unwrap();
    }

    let pipeline = Pipeline::new(test_config(dir.path()));
    pipeline.run_filter().await.unwrap();
    let report = pipeline.run_group().await.unwrap();

    // Only 03-01_3.wav survived filtering
    assert_eq!(report.stats.renamed_files, 1);
    assert_eq!(std::fs::read(dir.path().join("03/1.wav")).unwrap(), [3u8]);
}

#[tokio::test]
async fn empty_directory_run_completes_with_zero_stats() {
    let dir = TempDir::new().unwrap();
    let pipeline = Pipeline::new(test_config(dir.path()));

    let report = pipeline.run_all().await.unwrap();

    assert!(report.stats.is_empty());
    assert!(dir_entries(dir.path()).is_empty());
}

#[tokio::test]
async fn publisher_skips_when_root_is_missing() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("05")).unwrap();
    std::fs::write(dir.path().join("05/1.mp3"), b"encoded").unwrap();

    let pipeline = Pipeline::new(test_config(dir.path()));
    let report = pipeline.run_publish().await.unwrap();

    assert_eq!(report.stats.copied_files, 0);
}

#[tokio::test]
async fn publisher_copies_into_lesson_category_tree() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("05")).unwrap();
    std::fs::write(dir.path().join("05/1.mp3"), b"one").unwrap();
    std::fs::write(dir.path().join("05/2.mp3"), b"two").unwrap();
    // Unencoded leftovers are not published
    std::fs::write(dir.path().join("05/1.wav"), b"raw").unwrap();
    std::fs::create_dir(dir.path().join("published")).unwrap();

    let pipeline = Pipeline::new(test_config(dir.path()));
    let report = pipeline.run_publish().await.unwrap();

    assert_eq!(report.stats.copied_files, 2);
    let target = dir.path().join("published/lesson5/words");
    assert_eq!(std::fs::read(target.join("1.mp3")).unwrap(), b"one");
    assert_eq!(std::fs::read(target.join("2.mp3")).unwrap(), b"two");
    assert!(!target.join("1.wav").exists());
}

#[tokio::test]
async fn non_lesson_directories_are_ignored() {
    let dir = TempDir::new().unwrap();
    for name in ["5", "005", "log", "ab"] {
        std::fs::create_dir(dir.path().join(name)).unwrap();
        std::fs::write(dir.path().join(name).join("1.mp3"), b"x").unwrap();
    }
    std::fs::create_dir(dir.path().join("published")).unwrap();

    let pipeline = Pipeline::new(test_config(dir.path()));
    let report = pipeline.run_publish().await.unwrap();

    assert_eq!(report.stats.copied_files, 0);
}
