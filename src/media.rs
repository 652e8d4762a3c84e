use log::{debug, error};
use serde_json::Value;
use std::path::Path;
use std::time::Duration;
use tokio::process::Command;

use crate::errors::MediaError;

// @module: ffmpeg/ffprobe wrappers for audio extraction and dubbing

// @const: Timeout for ffmpeg invocations
const FFMPEG_TIMEOUT_SECS: u64 = 300;

// @const: Timeout for ffprobe invocations
const FFPROBE_TIMEOUT_SECS: u64 = 60;

/// Extract the audio track of a video into a WAV file (pcm_s16le)
pub async fn extract_audio<P: AsRef<Path>>(video_path: P, audio_path: P) -> Result<(), MediaError> {
    let video_path = video_path.as_ref();
    let audio_path = audio_path.as_ref();

    if !video_path.exists() {
        return Err(MediaError::MissingInput(video_path.to_path_buf()));
    }

    let args = [
        "-y",
        "-i", video_path.to_str().unwrap_or_default(),
        "-vn",
        "-acodec", "pcm_s16le",
        audio_path.to_str().unwrap_or_default(),
    ];

    run_ffmpeg(&args).await
}

/// Mux dubbed audio over a video, producing a new video file
///
/// The original audio track is dropped and the dubbed audio takes its place.
/// When the dubbed audio is shorter than the video it is looped; either way
/// the output stops at the video's end. Video is re-encoded with libx264 and
/// audio with aac, matching what players expect from an mp4.
pub async fn mux_dubbed_audio<P: AsRef<Path>>(
    video_path: P,
    audio_path: P,
    output_path: P,
) -> Result<(), MediaError> {
    let video_path = video_path.as_ref();
    let audio_path = audio_path.as_ref();
    let output_path = output_path.as_ref();

    if !video_path.exists() {
        return Err(MediaError::MissingInput(video_path.to_path_buf()));
    }
    if !audio_path.exists() {
        return Err(MediaError::MissingInput(audio_path.to_path_buf()));
    }

    let video_duration = probe_duration(video_path).await?;
    let audio_duration = probe_duration(audio_path).await?;
    debug!(
        "Muxing {:.1}s of dubbed audio over {:.1}s of video",
        audio_duration, video_duration
    );

    let mut args: Vec<&str> = vec!["-y", "-i", video_path.to_str().unwrap_or_default()];
    if audio_duration < video_duration {
        // Loop the dubbed audio until it covers the whole video
        args.extend(["-stream_loop", "-1"]);
    }
    args.extend([
        "-i", audio_path.to_str().unwrap_or_default(),
        "-map", "0:v",
        "-map", "1:a",
        "-c:v", "libx264",
        "-c:a", "aac",
        "-shortest",
        output_path.to_str().unwrap_or_default(),
    ]);

    run_ffmpeg(&args).await
}

/// Probe a media file's duration in seconds via ffprobe
pub async fn probe_duration<P: AsRef<Path>>(path: P) -> Result<f64, MediaError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MediaError::MissingInput(path.to_path_buf()));
    }

    let ffprobe_future = Command::new("ffprobe")
        .args([
            "-v", "quiet",
            "-print_format", "json",
            "-show_entries", "format=duration",
            path.to_str().unwrap_or_default(),
        ])
        .output();

    let timeout_duration = Duration::from_secs(FFPROBE_TIMEOUT_SECS);
    let output = tokio::select! {
        result = ffprobe_future => {
            result.map_err(|e| MediaError::FfprobeFailed(
                format!("Failed to execute ffprobe command: {}", e)
            ))?
        },
        _ = tokio::time::sleep(timeout_duration) => {
            return Err(MediaError::Timeout(FFPROBE_TIMEOUT_SECS));
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(MediaError::FfprobeFailed(stderr.trim().to_string()));
    }

    let json: Value = serde_json::from_slice(&output.stdout)
        .map_err(|e| MediaError::FfprobeFailed(format!("Bad ffprobe JSON: {}", e)))?;

    json.get("format")
        .and_then(|f| f.get("duration"))
        .and_then(|d| d.as_str())
        .and_then(|d| d.parse::<f64>().ok())
        .ok_or_else(|| MediaError::FfprobeFailed("No duration in ffprobe output".to_string()))
}

/// Run an ffmpeg invocation under the standard timeout
async fn run_ffmpeg(args: &[&str]) -> Result<(), MediaError> {
    let ffmpeg_future = Command::new("ffmpeg").args(args).output();

    let timeout_duration = Duration::from_secs(FFMPEG_TIMEOUT_SECS);
    let result = tokio::select! {
        result = ffmpeg_future => {
            result.map_err(|e| MediaError::FfmpegFailed(
                format!("Failed to execute ffmpeg command: {}", e)
            ))?
        },
        _ = tokio::time::sleep(timeout_duration) => {
            return Err(MediaError::Timeout(FFMPEG_TIMEOUT_SECS));
        }
    };

    if !result.status.success() {
        let stderr = String::from_utf8_lossy(&result.stderr);
        let filtered = filter_ffmpeg_stderr(&stderr);
        error!("ffmpeg failed: {}", filtered);
        return Err(MediaError::FfmpegFailed(filtered));
    }

    Ok(())
}

/// Filter ffmpeg stderr to only show meaningful error lines, stripping the
/// version banner, build configuration, and stream metadata noise.
pub fn filter_ffmpeg_stderr(stderr: &str) -> String {
    let dominated_prefixes = [
        "ffmpeg version",
        "  built with",
        "  configuration:",
        "  lib",
        "Input #",
        "  Metadata:",
        "  Duration:",
        "  Stream #",
        "      Metadata:",
        "Output #",
        "Stream mapping:",
        "Press [q]",
    ];

    let meaningful: Vec<&str> = stderr
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return false;
            }
            !dominated_prefixes.iter().any(|p| line.starts_with(p))
        })
        .collect();

    if meaningful.is_empty() {
        "unknown ffmpeg error (stderr was empty after filtering)".to_string()
    } else {
        meaningful.join("\n")
    }
}
