use crate::config::ConversionConfig;
use crate::{Result, TranscriptError};
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// One timestamp line and the caption text taken after it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleBlock {
    /// Trimmed timestamp line, e.g. `00:00:01,000 --> 00:00:04,000`
    pub time_range: String,
    /// Following lines joined by a space, trimmed
    pub speaker_text: String,
}

impl fmt::Display for SubtitleBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.time_range, self.speaker_text)
    }
}

/// Converts SRT content into one transcript line per timestamp
///
/// Caption lines are taken by position: the `caption_lines` lines right after a
/// timestamp, whatever they contain. Blank separators, cue numbers and even the
/// next timestamp can end up in `speaker_text` when a cue is short.
#[derive(Debug, Clone)]
pub struct SrtTranscriber {
    timestamp_marker: String,
    caption_lines: usize,
}

impl Default for SrtTranscriber {
    fn default() -> Self {
        Self::new(&ConversionConfig::default())
    }
}

impl SrtTranscriber {
    pub fn new(config: &ConversionConfig) -> Self {
        Self {
            timestamp_marker: config.timestamp_marker.clone(),
            caption_lines: config.caption_lines,
        }
    }

    /// Extract every block in source order
    pub fn parse_blocks(&self, content: &str) -> Vec<SubtitleBlock> {
        let lines = split_lines(content);

        lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.contains(self.timestamp_marker.as_str()))
            .map(|(i, line)| {
                let start = (i + 1).min(lines.len());
                let end = (start + self.caption_lines).min(lines.len());
                SubtitleBlock {
                    time_range: line.trim().to_string(),
                    speaker_text: lines[start..end].join(" ").trim().to_string(),
                }
            })
            .collect()
    }

    /// Render blocks as transcript text, newline-terminated
    pub fn render(&self, content: &str) -> String {
        let mut transcript = String::new();
        for block in self.parse_blocks(content) {
            transcript.push_str(&block.to_string());
            transcript.push('\n');
        }
        transcript
    }

    /// Read `input` and write its transcript to `output`, returning the block count.
    /// The output file is only created once the input has been read and decoded.
    pub fn transcribe_file(&self, input: &Path, output: &Path) -> Result<usize> {
        let content = std::fs::read_to_string(input).map_err(|source| TranscriptError::ReadInput {
            path: input.to_path_buf(),
            source,
        })?;

        let blocks = self.parse_blocks(&content);
        debug!("Parsed {} blocks from {}", blocks.len(), input.display());

        let write_err = |source: std::io::Error| TranscriptError::WriteOutput {
            path: output.to_path_buf(),
            source,
        };

        let file = File::create(output).map_err(write_err)?;
        let mut writer = BufWriter::new(file);
        for block in &blocks {
            writeln!(writer, "{}", block).map_err(write_err)?;
        }
        writer.flush().map_err(write_err)?;

        Ok(blocks.len())
    }
}

/// Split on `\r\n`, `\r` or `\n`. A trailing terminator does not start an extra line.
fn split_lines(content: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = content;

    while !rest.is_empty() {
        match rest.find(|c: char| c == '\r' || c == '\n') {
            Some(pos) => {
                lines.push(&rest[..pos]);
                let terminator = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[pos + terminator..];
            }
            None => {
                lines.push(rest);
                break;
            }
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = "1\n00:00:01,000 --> 00:00:04,000\nHello there\nGeneral Kenobi\n\n2\n00:00:05,000 --> 00:00:07,500\nSecond cue\nsecond line\n";

    #[test]
    fn test_block_display() {
        let block = SubtitleBlock {
            time_range: "00:00:01,000 --> 00:00:02,000".to_string(),
            speaker_text: "Hi".to_string(),
        };
        assert_eq!(block.to_string(), "[00:00:01,000 --> 00:00:02,000] Hi");
    }

    #[test]
    fn test_two_caption_lines_joined() {
        let blocks = SrtTranscriber::default().parse_blocks(SAMPLE);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].time_range, "00:00:01,000 --> 00:00:04,000");
        assert_eq!(blocks[0].speaker_text, "Hello there General Kenobi");
        assert_eq!(blocks[1].speaker_text, "Second cue second line");
    }

    #[test]
    fn test_render_format() {
        let transcript = SrtTranscriber::default().render(SAMPLE);
        assert_eq!(
            transcript,
            "[00:00:01,000 --> 00:00:04,000] Hello there General Kenobi\n\
             [00:00:05,000 --> 00:00:07,500] Second cue second line\n"
        );
    }

    #[test]
    fn test_single_line_caption_takes_blank_separator() {
        let content = "1\n00:00:01,000 --> 00:00:02,000\nOnly line\n\n2\n00:00:03,000 --> 00:00:04,000\nNext\n";
        let blocks = SrtTranscriber::default().parse_blocks(content);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].speaker_text, "Only line");
    }

    #[test]
    fn test_positional_capture_crosses_cue_boundary() {
        let content = "00:00:01,000 --> 00:00:02,000\n\n2\n00:00:03,000 --> 00:00:04,000\nText\n";
        let blocks = SrtTranscriber::default().parse_blocks(content);
        assert_eq!(blocks[0].speaker_text, "2");
    }

    #[test]
    fn test_end_of_file_truncation() {
        let transcriber = SrtTranscriber::default();

        let one_line = transcriber.parse_blocks("00:00:01,000 --> 00:00:02,000\nLast words");
        assert_eq!(one_line[0].speaker_text, "Last words");

        let none = transcriber.parse_blocks("1\n00:00:01,000 --> 00:00:02,000\n");
        assert_eq!(none.len(), 1);
        assert_eq!(none[0].speaker_text, "");
        assert_eq!(none[0].to_string(), "[00:00:01,000 --> 00:00:02,000] ");
    }

    #[test]
    fn test_crlf_and_padding_trimmed() {
        let content = "1\r\n  00:00:01,000 --> 00:00:02,000  \r\n  padded \r\nline\r\n";
        let blocks = SrtTranscriber::default().parse_blocks(content);
        assert_eq!(blocks[0].time_range, "00:00:01,000 --> 00:00:02,000");
        assert_eq!(blocks[0].speaker_text, "padded  line");
    }

    #[test]
    fn test_carriage_return_line_endings() {
        let content = "1\r00:00:01,000 --> 00:00:02,000\rA\rB\r\r2\r00:00:03,000 --> 00:00:04,000\rC\r";
        let blocks = SrtTranscriber::default().parse_blocks(content);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].time_range, "00:00:01,000 --> 00:00:02,000");
        assert_eq!(blocks[0].speaker_text, "A B");
        assert_eq!(blocks[1].time_range, "00:00:03,000 --> 00:00:04,000");
        assert_eq!(blocks[1].speaker_text, "C");
    }

    #[test]
    fn test_split_lines_mixed_terminators() {
        assert_eq!(split_lines("a\r\nb\rc\nd"), vec!["a", "b", "c", "d"]);
        assert_eq!(split_lines("a\n\nb\n"), vec!["a", "", "b"]);
        assert_eq!(split_lines("a\r\r\n"), vec!["a", ""]);
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn test_no_markers() {
        let transcriber = SrtTranscriber::default();
        assert!(transcriber.parse_blocks("just\nsome text\n").is_empty());
        assert_eq!(transcriber.render(""), "");
    }

    #[test]
    fn test_custom_caption_lines() {
        let config = ConversionConfig {
            caption_lines: 1,
            ..ConversionConfig::default()
        };
        let blocks = SrtTranscriber::new(&config).parse_blocks(SAMPLE);
        assert_eq!(blocks[0].speaker_text, "Hello there");
    }

    #[test]
    fn test_transcribe_file() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("movie.srt");
        let output = temp_dir.path().join("movie.txt");
        std::fs::write(&input, SAMPLE).unwrap();

        let count = SrtTranscriber::default().transcribe_file(&input, &output).unwrap();
        assert_eq!(count, 2);

        let written = std::fs::read_to_string(&output).unwrap();
        assert_eq!(written.lines().count(), 2);
        assert!(written.lines().all(|line| line.starts_with('[')));
    }

    #[test]
    fn test_invalid_utf8_leaves_no_output() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("broken.srt");
        let output = temp_dir.path().join("broken.txt");
        std::fs::write(&input, [0xff, 0xfe, 0x00, 0x2d, 0x2d, 0x3e]).unwrap();

        let result = SrtTranscriber::default().transcribe_file(&input, &output);
        assert!(matches!(result, Err(TranscriptError::ReadInput { .. })));
        assert!(!output.exists());
    }

    #[test]
    fn test_unwritable_output() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("movie.srt");
        std::fs::write(&input, SAMPLE).unwrap();
        let output = temp_dir.path().join("missing").join("movie.txt");

        let result = SrtTranscriber::default().transcribe_file(&input, &output);
        assert!(matches!(result, Err(TranscriptError::WriteOutput { .. })));
    }
}
