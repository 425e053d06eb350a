//! Error types for the converter.
//!
//! Every error is fatal for the run: the converter is a one-shot batch job
//! and structural problems in the input must not turn into corrupt spans.

use thiserror::Error;

use crate::types::Split;

/// Main error type for the converter library.
#[derive(Debug, Error)]
pub enum ConverterError {
    /// A data line carried fewer whitespace-separated fields than required.
    #[error("Malformed line {line_number} in {split} split: expected at least {expected} fields, found {fields}: '{line}'")]
    MalformedLine {
        split: Split,
        line_number: usize,
        fields: usize,
        expected: usize,
        line: String,
    },

    /// A BIO tag failed validation under the strict tag policy.
    #[error("Unknown BIO tag '{tag}' on line {line_number} in {split} split")]
    UnknownTag {
        split: Split,
        line_number: usize,
        tag: String,
    },

    /// Unrecognised split name.
    #[error("Invalid split name: '{0}'. Expected one of train, dev, test")]
    InvalidSplit(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for converter operations.
pub type Result<T> = std::result::Result<T, ConverterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_line_display() {
        let err = ConverterError::MalformedLine {
            split: Split::Train,
            line_number: 12,
            fields: 3,
            expected: 10,
            line: "Ajax B-pers O".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed line 12 in train split: expected at least 10 fields, found 3: 'Ajax B-pers O'"
        );
    }

    #[test]
    fn test_unknown_tag_display() {
        let err = ConverterError::UnknownTag {
            split: Split::Dev,
            line_number: 4,
            tag: "X-pers".to_string(),
        };
        assert!(err.to_string().contains("X-pers"));
        assert!(err.to_string().contains("dev split"));
    }

    #[test]
    fn test_invalid_split_display() {
        let err = ConverterError::InvalidSplit("validation".to_string());
        assert!(err.to_string().contains("validation"));
        assert!(err.to_string().contains("train, dev, test"));
    }
}
