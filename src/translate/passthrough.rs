use std::fs;
use std::path::Path;
use anyhow::{Context, Result, anyhow};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::srt::{LineKind, classify_line};
use crate::translate::Translator;

// @module: Line-by-line SRT translation with structural passthrough

/// What to do when a single line fails to translate
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TranslationFallback {
    /// Fail the whole document on the first failed line; nothing is written
    #[default]
    Abort,
    /// Copy the untranslated line through and keep going
    KeepOriginal,
}

/// Result of translating one SRT file
#[derive(Debug)]
pub struct TranslatedSrt {
    /// Number of text lines successfully translated
    pub translated_lines: usize,
    /// Number of structural lines (index, timing, blank) copied verbatim
    pub passthrough_lines: usize,
    /// Number of text lines left untranslated under `KeepOriginal`
    pub failed_lines: usize,
    /// All translated text lines joined with single spaces, in file order;
    /// consumed by speech synthesis in dubbing mode
    pub flattened_text: String,
}

/// Translate an SRT file line by line, writing the result to a new file.
///
/// Each line is classified independently: `Index`, `Timing` and `Blank` lines
/// are copied byte-identical (their original line ending included), while
/// `Text` lines are replaced by the translation of their trimmed content,
/// `\n`-terminated. The source file is never mutated.
///
/// The output is accumulated in memory and written once at the end, so under
/// the `Abort` policy a mid-document failure leaves no partial file behind.
pub async fn translate_srt_file<P1, P2>(
    source: P1,
    destination: P2,
    translator: &dyn Translator,
    fallback: TranslationFallback,
) -> Result<TranslatedSrt>
where
    P1: AsRef<Path>,
    P2: AsRef<Path>,
{
    let source = source.as_ref();
    let destination = destination.as_ref();

    let content = fs::read_to_string(source)
        .with_context(|| format!("Failed to read subtitle file: {}", source.display()))?;

    let mut output = String::with_capacity(content.len());
    let mut flattened: Vec<String> = Vec::new();
    let mut translated_lines = 0;
    let mut passthrough_lines = 0;
    let mut failed_lines = 0;
    let mut line_number = 0;

    for line in content.split_inclusive('\n') {
        line_number += 1;
        match classify_line(line) {
            LineKind::Index | LineKind::Timing | LineKind::Blank => {
                output.push_str(line);
                passthrough_lines += 1;
            }
            LineKind::Text => {
                let trimmed = line.trim();
                match translator.translate_line(trimmed).await {
                    Ok(translated) => {
                        flattened.push(translated.clone());
                        output.push_str(&translated);
                        output.push('\n');
                        translated_lines += 1;
                    }
                    Err(e) => match fallback {
                        TranslationFallback::Abort => {
                            return Err(anyhow!(
                                "Translation failed at line {} of {}: {}",
                                line_number,
                                source.display(),
                                e
                            ));
                        }
                        TranslationFallback::KeepOriginal => {
                            warn!("Line {} left untranslated: {}", line_number, e);
                            output.push_str(trimmed);
                            output.push('\n');
                            failed_lines += 1;
                        }
                    },
                }
            }
        }
    }

    fs::write(destination, &output)
        .with_context(|| format!("Failed to write subtitle file: {}", destination.display()))?;

    debug!(
        "Translated {} line(s), passed through {}, {} failed",
        translated_lines, passthrough_lines, failed_lines
    );

    Ok(TranslatedSrt {
        translated_lines,
        passthrough_lines,
        failed_lines,
        flattened_text: flattened.join(" "),
    })
}
