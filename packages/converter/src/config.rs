//! Configuration constants and validation functions for the converter.

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::error::{ConverterError, Result};
use crate::types::Split;

/// Line prefix marking the start of a new document.
pub const DOCSTART_MARKER: &str = "-DOCSTART-";

/// Marker line written by the preprocessor in front of each document.
pub const DOCSTART_LINE: &str = "-DOCSTART- O";

/// Prefix of the column header line in HIPE-2022 TSV files.
pub const HEADER_PREFIX: &str = "TOKEN\tNE-COARSE-LIT";

/// Prefix of metadata comment lines (`# hipe2022:...`).
pub const COMMENT_PREFIX: &str = "# ";

/// Minimum number of whitespace-separated fields on a data line.
pub const MIN_FIELDS: usize = 10;

/// Token count above which a training document is sealed at the next
/// sentence boundary.
pub const DEFAULT_CLIP_THRESHOLD: usize = 800;

/// Token in the MISC column that ends a sentence.
pub const DEFAULT_EOS_MARKER: &str = "EndOfSentence";

/// Comment line that opens a document in raw HIPE-2022 files.
pub const DEFAULT_DOCUMENT_SEPARATOR: &str = "# hipe2022:document_id";

/// Prefix for exported JSON file names.
pub const DEFAULT_OUTPUT_PREFIX: &str = "hipe2022";

/// Raw lines starting with this are empty-token artifacts.
pub const EMPTY_TOKEN_PREFIX: &str = " \t";

/// Character substitutions applied by the preprocessor.
///
/// The models were never trained on Fraktur, so the long s is folded to a
/// plain s. The second entry is the same character after a latin-1 misread.
pub const CHAR_SUBSTITUTIONS: &[(&str, &str)] = &[("\u{017F}", "s"), ("Å¿", "s")];

/// BIO tag pattern: `O`, `B-TYPE` or `I-TYPE`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static BIO_TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[OIB](-[A-Za-z0-9_]+)?$").expect("valid regex"));

/// How tags with an unexpected shape are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TagPolicy {
    /// Unknown prefixes are ignored like an `I` without an open span.
    #[default]
    Lenient,

    /// Every tag must match the BIO tag pattern.
    Strict,
}

/// Settings for one conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionConfig {
    /// Token count that triggers clipping in the training split.
    pub clip_threshold: usize,

    /// Handling of malformed tags.
    pub tag_policy: TagPolicy,

    /// Splits to process, in order.
    pub splits: Vec<Split>,

    /// Prefix for output file names.
    pub output_prefix: String,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            clip_threshold: DEFAULT_CLIP_THRESHOLD,
            tag_policy: TagPolicy::default(),
            splits: Split::ALL.to_vec(),
            output_prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
        }
    }
}

/// Check whether a tag has the `O` / `B-TYPE` / `I-TYPE` shape.
///
/// # Examples
/// ```
/// use hipe2022_converter::config::is_valid_tag;
///
/// assert!(is_valid_tag("B-pers"));
/// assert!(is_valid_tag("O"));
/// assert!(!is_valid_tag("X-pers"));
/// ```
#[must_use]
pub fn is_valid_tag(tag: &str) -> bool {
    BIO_TAG_PATTERN.is_match(tag)
}

/// Validate a BIO tag.
///
/// # Returns
/// * `Ok(())` if the tag matches the BIO pattern
/// * `Err(ConverterError::UnknownTag)` otherwise
pub fn validate_tag(tag: &str, split: Split, line_number: usize) -> Result<()> {
    if is_valid_tag(tag) {
        Ok(())
    } else {
        Err(ConverterError::UnknownTag {
            split,
            line_number,
            tag: tag.to_string(),
        })
    }
}

/// Input file of a split: `<base>/<split>.txt`.
#[must_use]
pub fn input_path(base: &Path, split: Split) -> PathBuf {
    base.join(format!("{split}.txt"))
}

/// Output file of a split: `<base>/<prefix>_<split>.json`.
#[must_use]
pub fn split_output_path(base: &Path, prefix: &str, split: Split) -> PathBuf {
    base.join(format!("{prefix}_{split}.json"))
}

/// Output file of the type registry: `<base>/<prefix>_types.json`.
#[must_use]
pub fn types_output_path(base: &Path, prefix: &str) -> PathBuf {
    base.join(format!("{prefix}_types.json"))
}
