/*!
 * Tests for SRT encoding, timecode formatting and line classification
 */

use anyhow::Result;
use regex::Regex;
use subdub::srt::{LineKind, TranscriptSegment, classify_line, encode_segments, format_srt_time, write_srt};
use crate::common;

/// Test the zero timestamp
#[test]
fn test_format_srt_time_withZero_shouldBeAllZeros() {
    assert_eq!(format_srt_time(0.0), "00:00:00,000");
}

/// Test a timestamp with hours, minutes, seconds and millis
#[test]
fn test_format_srt_time_withMixedUnits_shouldSplitCorrectly() {
    assert_eq!(format_srt_time(3661.25), "01:01:01,250");
    assert_eq!(format_srt_time(2.5), "00:00:02,500");
    assert_eq!(format_srt_time(59.0), "00:00:59,000");
    assert_eq!(format_srt_time(3600.0), "01:00:00,000");
}

/// Test that every unit truncates instead of rounding
#[test]
fn test_format_srt_time_withNearestMillisecond_shouldTruncateNotRound() {
    // 1.9995s is 999ms, never rounded up to 1,000
    assert_eq!(format_srt_time(1.9995), "00:00:01,999");
}

/// Test that the formatter is total over a sweep of values
#[test]
fn test_format_srt_time_withArbitraryValues_shouldMatchPattern() {
    let pattern = Regex::new(r"^\d{2,}:\d{2}:\d{2},\d{3}$").unwrap();
    for t in [0.0, 0.001, 1.5, 59.999, 61.0, 3599.5, 3600.0, 86399.0, 123456.789] {
        let formatted = format_srt_time(t);
        assert!(pattern.is_match(&formatted), "bad format for {}: {}", t, formatted);
    }
}

/// Test the hour-field policy for durations of 100 hours and more
#[test]
fn test_format_srt_time_withHugeHours_shouldWidenHourField() {
    // 100 hours
    assert_eq!(format_srt_time(360_000.0), "100:00:00,000");
    // 123 hours and change
    assert_eq!(format_srt_time(123.0 * 3600.0 + 45.5), "123:00:45,500");
}

/// Test encoding a single segment into a cue block
#[test]
fn test_encode_segments_withSingleSegment_shouldEmitFourLineCue() {
    let segments = vec![TranscriptSegment::new(0.0, 2.5, "Hello")];
    let document = encode_segments(&segments);
    assert_eq!(document, "1\n00:00:00,000 --> 00:00:02,500\nHello\n\n");
}

/// Test that cue indices are exactly 1..N in order
#[test]
fn test_encode_segments_withManySegments_shouldNumberSequentially() {
    let segments: Vec<TranscriptSegment> = (0..5)
        .map(|i| TranscriptSegment::new(i as f64, i as f64 + 0.5, format!("line {}", i)))
        .collect();
    let document = encode_segments(&segments);

    let indices: Vec<&str> = document
        .split("\n\n")
        .filter(|block| !block.is_empty())
        .map(|block| block.lines().next().unwrap())
        .collect();
    assert_eq!(indices, vec!["1", "2", "3", "4", "5"]);
}

/// Test that segment text is emitted verbatim, not trimmed
#[test]
fn test_encode_segments_withPaddedText_shouldKeepTextVerbatim() {
    let segments = vec![TranscriptSegment::new(0.0, 1.0, " padded ")];
    let document = encode_segments(&segments);
    assert!(document.contains("\n padded \n"));
}

/// Test encoding an empty sequence
#[test]
fn test_encode_segments_withNoSegments_shouldProduceEmptyDocument() {
    assert_eq!(encode_segments(&[]), "");
}

/// Test writing segments out to a file
#[test]
fn test_write_srt_withSegments_shouldPersistDocument() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("out.srt");

    let segments = vec![
        TranscriptSegment::new(0.0, 2.5, "Hello"),
        TranscriptSegment::new(3.0, 4.0, "World"),
    ];
    write_srt(&segments, &path)?;

    let content = std::fs::read_to_string(&path)?;
    assert_eq!(
        content,
        "1\n00:00:00,000 --> 00:00:02,500\nHello\n\n2\n00:00:03,000 --> 00:00:04,000\nWorld\n\n"
    );
    Ok(())
}

/// Test the encoder's policy for an empty sequence: zero cues, empty file
#[test]
fn test_write_srt_withNoSegments_shouldWriteEmptyFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("empty.srt");

    write_srt(&[], &path)?;

    assert_eq!(std::fs::read_to_string(&path)?, "");
    Ok(())
}

/// Test the four line classes on representative inputs
#[test]
fn test_classify_line_withRepresentativeLines_shouldCoverAllClasses() {
    assert_eq!(classify_line("42"), LineKind::Index);
    assert_eq!(classify_line("00:00:01,000 --> 00:00:02,000"), LineKind::Timing);
    assert_eq!(classify_line(""), LineKind::Blank);
    assert_eq!(classify_line("Hello world"), LineKind::Text);
}

/// Test that an all-whitespace line is blank, not text
#[test]
fn test_classify_line_withWhitespaceOnly_shouldBeBlank() {
    assert_eq!(classify_line("   "), LineKind::Blank);
    assert_eq!(classify_line("\t"), LineKind::Blank);
    assert_eq!(classify_line("\r\n"), LineKind::Blank);
}

/// Test tolerance of trailing line endings on every class
#[test]
fn test_classify_line_withTrailingNewlines_shouldIgnoreThem() {
    assert_eq!(classify_line("7\n"), LineKind::Index);
    assert_eq!(classify_line("7\r\n"), LineKind::Index);
    assert_eq!(classify_line("00:00:01,000 --> 00:00:02,000\r\n"), LineKind::Timing);
    assert_eq!(classify_line("Hello\n"), LineKind::Text);
}

/// Test edge cases: the classifier is total and deterministic
#[test]
fn test_classify_line_withEdgeCases_shouldBeTotalAndIdempotent() {
    let lines = ["-->", "12a", " 007 ", "00:00", "٤٢", "1 2"];
    let expected = [
        LineKind::Timing,
        LineKind::Text,
        LineKind::Index,
        LineKind::Text,
        LineKind::Text, // non-ASCII digits are not index material
        LineKind::Text,
    ];
    for (line, want) in lines.iter().zip(expected) {
        assert_eq!(classify_line(line), want, "line: {:?}", line);
        // Classifying twice yields the same class
        assert_eq!(classify_line(line), classify_line(line));
    }
}

/// Test segment validation rules
#[test]
fn test_new_validated_withBadSegments_shouldReject() {
    assert!(TranscriptSegment::new_validated(2.0, 1.0, "x".to_string()).is_err());
    assert!(TranscriptSegment::new_validated(-1.0, 1.0, "x".to_string()).is_err());
    assert!(TranscriptSegment::new_validated(0.0, 1.0, "   ".to_string()).is_err());
    assert!(TranscriptSegment::new_validated(0.0, 0.0, "x".to_string()).is_ok());
}
