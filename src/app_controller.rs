use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::language_utils;
use crate::media;
use crate::srt;
use crate::transcribe::Transcriber;
use crate::transcribe::whisper_cli::WhisperCli;
use crate::translate::Translator;
use crate::translate::google::GoogleTranslate;
use crate::translate::passthrough::translate_srt_file;
use crate::tts::{HttpSynthesizer, SpeechSynthesizer};

// @module: Application controller for the batch pipeline

/// Which pipeline to run per file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineMode {
    /// Transcribe and translate: source SRT + translated SRT
    Subtitles,
    /// Full dubbing: subtitles plus synthesized audio muxed over the video
    Dub,
}

/// How one file ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// All outputs written
    Processed,
    /// Output already existed and overwrite was not forced
    SkippedExisting,
    /// Transcription produced no segments; no outputs written
    NothingTranscribed,
}

/// Counters for a folder run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    /// Files fully processed
    pub processed: usize,
    /// Files skipped (existing output or empty transcript)
    pub skipped: usize,
    /// Files that failed with an error
    pub failed: usize,
}

/// Main application controller for the transcription/translation/dubbing pipeline
///
/// Owns the collaborator handles. They are constructed once (either from the
/// config or injected for tests) and reused for every file of the batch.
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Speech recognition handle, one per batch run
    transcriber: Arc<dyn Transcriber>,
    // @field: Translation client
    translator: Arc<dyn Translator>,
    // @field: Speech synthesis client (dub mode)
    synthesizer: Arc<dyn SpeechSynthesizer>,
}

impl Controller {
    // @method: Create a controller with real collaborators built from the config
    pub fn with_config(config: Config) -> Result<Self> {
        let source = language_utils::normalize_to_part1(&config.source_language)?;
        let target = language_utils::normalize_to_part1(&config.target_language)?;

        let transcriber = Arc::new(WhisperCli::new(
            config.transcription.binary.clone(),
            config.transcription.model.clone(),
            source.clone(),
            config.transcription.timeout_secs,
        ));

        let translator = Arc::new(GoogleTranslate::new(
            config.translation.endpoint.clone(),
            source,
            target,
            config.translation.timeout_secs,
        )?);

        let synthesizer = Arc::new(HttpSynthesizer::new(
            config.synthesis.endpoint.clone(),
            config.synthesis.timeout_secs,
        )?);

        Ok(Self {
            config,
            transcriber,
            translator,
            synthesizer,
        })
    }

    /// Create a controller with injected collaborators - used by tests
    pub fn with_collaborators(
        config: Config,
        transcriber: Arc<dyn Transcriber>,
        translator: Arc<dyn Translator>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
    ) -> Self {
        Self {
            config,
            transcriber,
            translator,
            synthesizer,
        }
    }

    /// Run the pipeline on a file or every video file under a directory
    pub async fn run(&self, input_path: PathBuf, mode: PipelineMode, force_overwrite: bool) -> Result<()> {
        if input_path.is_file() {
            self.process_file(&input_path, mode, force_overwrite).await?;
            Ok(())
        } else if input_path.is_dir() {
            let summary = self.run_folder(&input_path, mode, force_overwrite).await?;
            info!(
                "Batch done: {} processed, {} skipped, {} failed",
                summary.processed, summary.skipped, summary.failed
            );
            Ok(())
        } else {
            Err(anyhow::anyhow!("Input path does not exist: {:?}", input_path))
        }
    }

    /// Process every video file under a directory
    ///
    /// A single file's failure is logged and the batch continues; the core
    /// components themselves never swallow errors.
    pub async fn run_folder(
        &self,
        input_dir: &Path,
        mode: PipelineMode,
        force_overwrite: bool,
    ) -> Result<BatchSummary> {
        let video_files = FileManager::find_video_files(input_dir)?;

        if video_files.is_empty() {
            warn!("No video files found in {:?}", input_dir);
            return Ok(BatchSummary::default());
        }

        let progress_bar = ProgressBar::new(video_files.len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style);

        let mut summary = BatchSummary::default();
        for video in &video_files {
            progress_bar.set_message(
                video.file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default(),
            );

            match self.process_file(video, mode, force_overwrite).await {
                Ok(FileOutcome::Processed) => summary.processed += 1,
                Ok(_) => summary.skipped += 1,
                Err(e) => {
                    error!("Failed to process {:?}: {:#}", video, e);
                    summary.failed += 1;
                }
            }
            progress_bar.inc(1);
        }
        progress_bar.finish_and_clear();

        Ok(summary)
    }

    /// Run the pipeline for a single input file
    pub async fn process_file(
        &self,
        input_file: &Path,
        mode: PipelineMode,
        force_overwrite: bool,
    ) -> Result<FileOutcome> {
        let start_time = std::time::Instant::now();

        if !input_file.exists() {
            return Err(anyhow::anyhow!("Input file does not exist: {:?}", input_file));
        }

        // Dubbing muxes onto the input video; a bare subtitle file has nothing to mux onto
        if mode == PipelineMode::Dub && FileManager::is_subtitle_file(input_file) {
            return Err(anyhow::anyhow!(
                "Dubbing requires a video input, got a subtitle file: {:?}",
                input_file
            ));
        }

        let target = language_utils::normalize_to_part1(&self.config.target_language)?;
        let translated_srt = FileManager::sibling_with_tag(input_file, &target, "srt");
        let dubbed_video = FileManager::sibling_with_tag(input_file, "dubbed", "mp4");

        let final_output = match mode {
            PipelineMode::Subtitles => &translated_srt,
            PipelineMode::Dub => &dubbed_video,
        };
        if final_output.exists() && !force_overwrite {
            warn!("Skipping {:?}, output already exists (use -f to force overwrite)", input_file);
            return Ok(FileOutcome::SkippedExisting);
        }

        // A subtitle file skips transcription entirely
        let source_srt = if FileManager::is_subtitle_file(input_file) {
            info!("Detected subtitle file, skipping transcription");
            input_file.to_path_buf()
        } else {
            match self.transcribe_to_srt(input_file).await? {
                Some(path) => path,
                None => {
                    info!("Nothing transcribed from {:?}, skipping", input_file);
                    return Ok(FileOutcome::NothingTranscribed);
                }
            }
        };

        // Translate the SRT line by line, structural lines untouched
        let outcome = translate_srt_file(
            &source_srt,
            &translated_srt,
            self.translator.as_ref(),
            self.config.translation.fallback,
        )
        .await?;

        if outcome.failed_lines > 0 {
            warn!(
                "{} line(s) left untranslated in {:?}",
                outcome.failed_lines, translated_srt
            );
        }
        info!("Wrote {:?} ({} lines translated)", translated_srt, outcome.translated_lines);

        if mode == PipelineMode::Dub {
            if outcome.flattened_text.trim().is_empty() {
                warn!("No translated text to synthesize, skipping dubbing for {:?}", input_file);
            } else {
                self.dub_video(input_file, &outcome.flattened_text, &target, &dubbed_video)
                    .await?;
                info!("Wrote {:?}", dubbed_video);
            }
        }

        info!(
            "Processed {:?} in {}",
            input_file,
            Self::format_duration(start_time.elapsed())
        );
        Ok(FileOutcome::Processed)
    }

    /// Transcribe the input media and write the source-language SRT
    ///
    /// Returns the SRT path, or None when transcription yields no segments
    /// (in which case no file is written).
    async fn transcribe_to_srt(&self, input_file: &Path) -> Result<Option<PathBuf>> {
        let segments = self
            .transcriber
            .transcribe(input_file)
            .await
            .with_context(|| format!("Transcription failed for {:?}", input_file))?;

        if segments.is_empty() {
            return Ok(None);
        }

        let source = language_utils::normalize_to_part1(&self.config.source_language)?;
        let source_srt = FileManager::sibling_with_tag(input_file, &source, "srt");
        srt::write_srt(&segments, &source_srt)?;
        info!("Wrote {:?} ({} cues)", source_srt, segments.len());

        Ok(Some(source_srt))
    }

    /// Synthesize the translated transcript and mux it over the video
    async fn dub_video(
        &self,
        input_file: &Path,
        flattened_text: &str,
        target_language: &str,
        output_video: &Path,
    ) -> Result<()> {
        let work_dir = tempfile::tempdir().context("Failed to create temp directory")?;
        let dubbed_audio = work_dir.path().join("dubbed.wav");

        self.synthesizer
            .synthesize(flattened_text, target_language, &dubbed_audio)
            .await
            .with_context(|| format!("Speech synthesis failed for {:?}", input_file))?;

        media::mux_dubbed_audio(input_file, dubbed_audio.as_path(), output_video)
            .await
            .with_context(|| format!("Muxing failed for {:?}", input_file))?;

        Ok(())
    }

    /// Format a duration as mm:ss for log output
    fn format_duration(duration: std::time::Duration) -> String {
        let total_secs = duration.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}
