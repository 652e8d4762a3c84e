/*!
 * Controller pipeline tests using mock collaborators.
 *
 * These go through the controller with subtitle-file inputs, which exercises
 * output-path handling, skip policy, and the translation filter without
 * needing ffmpeg or whisper on the test machine.
 */

use anyhow::Result;
use std::sync::Arc;
use subdub::app_config::Config;
use subdub::app_controller::{Controller, FileOutcome, PipelineMode};
use subdub::srt::TranscriptSegment;
use subdub::transcribe::mock::MockTranscriber;
use subdub::translate::mock::MockTranslator;
use subdub::translate::passthrough::TranslationFallback;
use subdub::tts::MockSynthesizer;
use crate::common;

fn mock_controller(config: Config, translator: MockTranslator) -> Controller {
    Controller::with_collaborators(
        config,
        Arc::new(MockTranscriber::empty()),
        Arc::new(translator),
        Arc::new(MockSynthesizer::working()),
    )
}

/// Test the subtitle pipeline on an existing SRT input
#[tokio::test]
async fn test_process_file_withSrtInput_shouldWriteTranslatedSrt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let source = common::create_test_subtitle(&temp_dir.path().to_path_buf(), "movie.srt")?;

    let controller = mock_controller(Config::default(), MockTranslator::working());
    let outcome = controller
        .process_file(&source, PipelineMode::Subtitles, false)
        .await?;

    assert_eq!(outcome, FileOutcome::Processed);
    let translated = temp_dir.path().join("movie.ar.srt");
    let content = std::fs::read_to_string(&translated)?;
    assert!(content.contains("[ar] This is a test subtitle."));
    assert!(content.contains("00:00:01,000 --> 00:00:04,000"));
    Ok(())
}

/// Test that existing outputs are skipped without the force flag
#[tokio::test]
async fn test_process_file_withExistingOutput_shouldSkipUnlessForced() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let source = common::create_test_subtitle(&temp_dir.path().to_path_buf(), "movie.srt")?;

    let controller = mock_controller(Config::default(), MockTranslator::working());
    controller.process_file(&source, PipelineMode::Subtitles, false).await?;

    let outcome = controller
        .process_file(&source, PipelineMode::Subtitles, false)
        .await?;
    assert_eq!(outcome, FileOutcome::SkippedExisting);

    let forced = controller
        .process_file(&source, PipelineMode::Subtitles, true)
        .await?;
    assert_eq!(forced, FileOutcome::Processed);
    Ok(())
}

/// Test that the abort fallback surfaces translation failures to the caller
#[tokio::test]
async fn test_process_file_withFailingTranslatorAndAbort_shouldError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let source = common::create_test_subtitle(&temp_dir.path().to_path_buf(), "movie.srt")?;

    let controller = mock_controller(Config::default(), MockTranslator::failing());
    let result = controller
        .process_file(&source, PipelineMode::Subtitles, false)
        .await;

    assert!(result.is_err());
    assert!(!temp_dir.path().join("movie.ar.srt").exists());
    Ok(())
}

/// Test that the keep-original fallback still completes the file
#[tokio::test]
async fn test_process_file_withFailingTranslatorAndKeepOriginal_shouldComplete() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let source = common::create_test_subtitle(&temp_dir.path().to_path_buf(), "movie.srt")?;

    let mut config = Config::default();
    config.translation.fallback = TranslationFallback::KeepOriginal;

    let controller = mock_controller(config, MockTranslator::failing());
    let outcome = controller
        .process_file(&source, PipelineMode::Subtitles, false)
        .await?;

    assert_eq!(outcome, FileOutcome::Processed);
    let content = std::fs::read_to_string(temp_dir.path().join("movie.ar.srt"))?;
    assert!(content.contains("This is a test subtitle."));
    Ok(())
}

/// Test that dub mode hands the flattened translated transcript to the synthesizer
#[tokio::test]
async fn test_process_file_withDubMode_shouldSynthesizeFlattenedTranscript() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let source = common::create_test_file(&temp_dir.path().to_path_buf(), "movie.mp4", "fake video")?;

    let segments = vec![
        TranscriptSegment::new(0.0, 1.5, "Hello"),
        TranscriptSegment::new(1.5, 3.0, "World"),
    ];
    let synthesizer = Arc::new(MockSynthesizer::working());
    let controller = Controller::with_collaborators(
        Config::default(),
        Arc::new(MockTranscriber::with_segments(segments)),
        Arc::new(MockTranslator::working()),
        synthesizer.clone(),
    );

    // Muxing needs a real video stream, so the pipeline errors after synthesis
    let result = controller.process_file(&source, PipelineMode::Dub, false).await;
    assert!(result.is_err());

    assert_eq!(synthesizer.call_count(), 1);
    assert_eq!(synthesizer.last_text(), "[ar] Hello [ar] World");
    assert!(temp_dir.path().join("movie.en.srt").exists());
    assert!(temp_dir.path().join("movie.ar.srt").exists());
    Ok(())
}

/// Test that dub mode skips synthesis when no translated text came back
#[tokio::test]
async fn test_process_file_withEmptyTranslationsInDubMode_shouldSkipSynthesis() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let source = common::create_test_file(&temp_dir.path().to_path_buf(), "movie.mp4", "fake video")?;

    let segments = vec![TranscriptSegment::new(0.0, 1.5, "Hello")];
    let synthesizer = Arc::new(MockSynthesizer::working());
    let controller = Controller::with_collaborators(
        Config::default(),
        Arc::new(MockTranscriber::with_segments(segments)),
        Arc::new(MockTranslator::empty()),
        synthesizer.clone(),
    );

    let outcome = controller.process_file(&source, PipelineMode::Dub, false).await?;

    assert_eq!(outcome, FileOutcome::Processed);
    assert_eq!(synthesizer.call_count(), 0);
    assert!(!temp_dir.path().join("movie.dubbed.mp4").exists());
    Ok(())
}

/// Test that dub mode rejects subtitle inputs, which carry no video to mux onto
#[tokio::test]
async fn test_process_file_withSrtInputInDubMode_shouldReject() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let source = common::create_test_subtitle(&temp_dir.path().to_path_buf(), "movie.srt")?;

    let synthesizer = Arc::new(MockSynthesizer::working());
    let controller = Controller::with_collaborators(
        Config::default(),
        Arc::new(MockTranscriber::empty()),
        Arc::new(MockTranslator::working()),
        synthesizer.clone(),
    );

    let result = controller.process_file(&source, PipelineMode::Dub, false).await;

    assert!(result.is_err());
    assert_eq!(synthesizer.call_count(), 0);
    assert!(!temp_dir.path().join("movie.dubbed.mp4").exists());
    Ok(())
}

/// Test folder runs over directories with no videos
#[tokio::test]
async fn test_run_folder_withNoVideos_shouldReturnEmptySummary() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(&temp_dir.path().to_path_buf(), "notes.txt", "hi")?;

    let controller = mock_controller(Config::default(), MockTranslator::working());
    let summary = controller
        .run_folder(temp_dir.path(), PipelineMode::Subtitles, false)
        .await?;

    assert_eq!(summary.processed, 0);
    assert_eq!(summary.failed, 0);
    Ok(())
}

/// Test that a missing input path is an error
#[tokio::test]
async fn test_run_withMissingPath_shouldError() {
    let controller = mock_controller(Config::default(), MockTranslator::working());
    let result = controller
        .run("/no/such/path".into(), PipelineMode::Subtitles, false)
        .await;
    assert!(result.is_err());
}
