//! Dataset-specific cleanup of raw HIPE-2022 files before segmentation.
//!
//! The rewrite is a pure text-to-text transform:
//! - the header line is kept and followed by a blank line
//! - empty-token artifact lines (starting with `" \t"`) are dropped
//! - all other lines are trimmed and have the long s folded to `s`
//! - a `-DOCSTART- O` marker and a blank line are inserted in front of each
//!   document separator line (when enabled)
//! - a blank line follows every line containing the end-of-sentence marker

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::config::{
    CHAR_SUBSTITUTIONS, DEFAULT_DOCUMENT_SEPARATOR, DEFAULT_EOS_MARKER, DOCSTART_LINE,
    EMPTY_TOKEN_PREFIX,
};
use crate::error::Result;

/// Options for the preprocessing pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreprocessOptions {
    /// Substring marking the last token of a sentence.
    pub eos_marker: String,

    /// Line prefix that opens a new document in the raw file.
    pub document_separator: String,

    /// Whether to insert document-start markers at separators.
    pub add_document_separator: bool,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self {
            eos_marker: DEFAULT_EOS_MARKER.to_string(),
            document_separator: DEFAULT_DOCUMENT_SEPARATOR.to_string(),
            add_document_separator: true,
        }
    }
}

/// Counters reported by a preprocessing pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreprocessStats {
    /// Lines read from the input.
    pub lines_in: usize,

    /// Lines written, including inserted blank and marker lines.
    pub lines_out: usize,

    /// Empty-token lines removed.
    pub dropped: usize,

    /// Document-start markers inserted.
    pub documents: usize,

    /// Sentence breaks inserted after end-of-sentence markers.
    pub sentences: usize,
}

/// Fold characters the downstream models have never seen.
fn substitute_chars(line: &str) -> String {
    CHAR_SUBSTITUTIONS
        .iter()
        .fold(line.to_string(), |acc, (from, to)| acc.replace(from, to))
}

/// Rewrite raw lines into the form the segmenter consumes.
///
/// # Examples
/// ```
/// use hipe2022_converter::preprocess::{preprocess_lines, PreprocessOptions};
///
/// let raw = ["TOKEN\tNE-COARSE-LIT", "# hipe2022:document_id = d1", "Ajax\tB-work\tEndOfSentence"];
/// let (lines, _) = preprocess_lines(raw, &PreprocessOptions::default());
/// assert_eq!(
///     lines,
///     ["TOKEN\tNE-COARSE-LIT", "", "-DOCSTART- O", "", "# hipe2022:document_id = d1", "Ajax\tB-work\tEndOfSentence", ""]
/// );
/// ```
pub fn preprocess_lines<I, S>(lines: I, options: &PreprocessOptions) -> (Vec<String>, PreprocessStats)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = Vec::new();
    let mut stats = PreprocessStats::default();
    let mut lines = lines.into_iter();

    if let Some(header) = lines.next() {
        stats.lines_in += 1;
        out.push(header.as_ref().to_string());
        // The header is followed by a blank line so it forms its own block
        out.push(String::new());
    }

    for raw in lines {
        let raw = raw.as_ref();
        stats.lines_in += 1;

        if raw.starts_with(EMPTY_TOKEN_PREFIX) {
            stats.dropped += 1;
            continue;
        }

        let line = substitute_chars(raw.trim());

        if options.add_document_separator && line.starts_with(&options.document_separator) {
            out.push(DOCSTART_LINE.to_string());
            out.push(String::new());
            stats.documents += 1;
        }

        let ends_sentence = line.contains(&options.eos_marker);
        out.push(line);

        if ends_sentence {
            out.push(String::new());
            stats.sentences += 1;
        }
    }

    stats.lines_out = out.len();
    (out, stats)
}

/// Preprocess `input` into `output`.
pub fn preprocess_file(
    input: &Path,
    output: &Path,
    options: &PreprocessOptions,
) -> Result<PreprocessStats> {
    let content = fs::read_to_string(input)?;
    let (lines, stats) = preprocess_lines(content.lines(), options);

    let mut writer = BufWriter::new(File::create(output)?);
    for line in &lines {
        writeln!(writer, "{line}")?;
    }
    writer.flush()?;

    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        lines_in = stats.lines_in,
        lines_out = stats.lines_out,
        documents = stats.documents,
        "Preprocessing finished"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn options(add_document_separator: bool) -> PreprocessOptions {
        PreprocessOptions {
            add_document_separator,
            ..PreprocessOptions::default()
        }
    }

    #[test]
    fn test_header_kept_with_blank_line() {
        let (lines, stats) = preprocess_lines(["TOKEN\tNE-COARSE-LIT\tMISC"], &options(true));
        assert_eq!(lines, vec!["TOKEN\tNE-COARSE-LIT\tMISC", ""]);
        assert_eq!(stats.lines_in, 1);
        assert_eq!(stats.lines_out, 2);
    }

    #[test]
    fn test_empty_token_lines_dropped() {
        let raw = ["HEADER", " \tO\tO", "Ajax\tO  "];
        let (lines, stats) = preprocess_lines(raw, &options(true));
        assert_eq!(lines, vec!["HEADER", "", "Ajax\tO"]);
        assert_eq!(stats.dropped, 1);
    }

    #[test]
    fn test_lines_trimmed() {
        let (lines, _) = preprocess_lines(["HEADER", "  Ajax\tO \t "], &options(true));
        assert_eq!(lines[2], "Ajax\tO");
    }

    #[test]
    fn test_long_s_replaced() {
        let (lines, _) = preprocess_lines(["HEADER", "Geſchichte\tO", "Å¿o\tO"], &options(true));
        assert_eq!(lines[2], "Geschichte\tO");
        assert_eq!(lines[3], "so\tO");
    }

    #[test]
    fn test_document_separator_inserted() {
        let raw = ["HEADER", "# hipe2022:document_id = d1", "# hipe2022:date = 1842"];
        let (lines, stats) = preprocess_lines(raw, &options(true));
        assert_eq!(
            lines,
            vec![
                "HEADER",
                "",
                "-DOCSTART- O",
                "",
                "# hipe2022:document_id = d1",
                "# hipe2022:date = 1842",
            ]
        );
        assert_eq!(stats.documents, 1);
    }

    #[test]
    fn test_document_separator_disabled() {
        let raw = ["HEADER", "# hipe2022:document_id = d1"];
        let (lines, stats) = preprocess_lines(raw, &options(false));
        assert_eq!(lines, vec!["HEADER", "", "# hipe2022:document_id = d1"]);
        assert_eq!(stats.documents, 0);
    }

    #[test]
    fn test_blank_line_after_end_of_sentence() {
        let raw = ["HEADER", "Ajax\tO\t_\tEndOfSentence", "Next\tO"];
        let (lines, stats) = preprocess_lines(raw, &options(true));
        assert_eq!(
            lines,
            vec!["HEADER", "", "Ajax\tO\t_\tEndOfSentence", "", "Next\tO"]
        );
        assert_eq!(stats.sentences, 1);
    }

    #[test]
    fn test_custom_markers() {
        let opts = PreprocessOptions {
            eos_marker: "EOS".to_string(),
            document_separator: "#doc".to_string(),
            add_document_separator: true,
        };
        let raw = ["HEADER", "#doc 1", "x\tO\tEOS"];
        let (lines, _) = preprocess_lines(raw, &opts);
        assert_eq!(
            lines,
            vec!["HEADER", "", "-DOCSTART- O", "", "#doc 1", "x\tO\tEOS", ""]
        );
    }

    #[test]
    fn test_empty_input() {
        let (lines, stats) = preprocess_lines(Vec::<String>::new(), &options(true));
        assert!(lines.is_empty());
        assert_eq!(stats, PreprocessStats::default());
    }

    #[test]
    fn test_preprocess_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("raw.tsv");
        let output = dir.path().join("train.txt");
        fs::write(&input, "HEADER\n# hipe2022:document_id = d1\nA\tO\tEndOfSentence\n").unwrap();

        let stats = preprocess_file(&input, &output, &PreprocessOptions::default()).unwrap();
        assert_eq!(stats.documents, 1);

        let written = fs::read_to_string(&output).unwrap();
        assert_eq!(
            written,
            "HEADER\n\n-DOCSTART- O\n\n# hipe2022:document_id = d1\nA\tO\tEndOfSentence\n\n"
        );
    }

    #[test]
    fn test_preprocess_file_missing_input() {
        let dir = tempdir().unwrap();
        let result = preprocess_file(
            &dir.path().join("missing.tsv"),
            &dir.path().join("out.txt"),
            &PreprocessOptions::default(),
        );
        assert!(matches!(result, Err(crate::error::ConverterError::Io(_))));
    }
}
