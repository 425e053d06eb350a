//! Core data types for the converter.
//!
//! These types describe the JSON records handed to downstream
//! span-extraction training: documents made of tokens plus half-open
//! entity spans over those tokens.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConverterError;

/// Dataset split of the corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    /// Training data; the only split that is clipped.
    Train,

    /// Development data.
    Dev,

    /// Held-out test data.
    Test,
}

impl Split {
    /// Processing order used when no explicit selection is given.
    pub const ALL: [Split; 3] = [Split::Dev, Split::Test, Split::Train];

    /// Get the split name as used in file names.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Train => "train",
            Self::Dev => "dev",
            Self::Test => "test",
        }
    }

    /// Whether long documents in this split get clipped.
    #[must_use]
    pub fn is_train(&self) -> bool {
        matches!(self, Self::Train)
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Split {
    type Err = ConverterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "train" => Ok(Self::Train),
            "dev" => Ok(Self::Dev),
            "test" => Ok(Self::Test),
            _ => Err(ConverterError::InvalidSplit(s.to_string())),
        }
    }
}

/// An entity mention as a half-open token interval `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Entity type label (the suffix of a `B-` tag).
    #[serde(rename = "type")]
    pub entity_type: String,

    /// Index of the first token of the mention.
    pub start: usize,

    /// Index one past the last token of the mention.
    pub end: usize,
}

impl Entity {
    /// Create a new entity span.
    #[must_use]
    pub fn new(entity_type: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            entity_type: entity_type.into(),
            start,
            end,
        }
    }

    /// Number of tokens covered by the span.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span covers no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A document record in the exported JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Tokens the model copies spans from.
    pub tokens: Vec<String>,

    /// Model input tokens. Equal to `tokens` until prompts get added.
    pub extended: Vec<String>,

    /// Entity spans, ordered by `start`.
    pub entities: Vec<Entity>,
}

impl Document {
    /// Create a new empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tokens collected so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether no token has been collected yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Append a token and return its index.
    pub fn push_token(&mut self, token: impl Into<String>) -> usize {
        self.tokens.push(token.into());
        self.tokens.len() - 1
    }

    /// Finalize the document for emission: `extended` becomes a copy of `tokens`.
    #[must_use]
    pub fn seal(mut self) -> Self {
        self.extended = self.tokens.clone();
        self
    }
}

/// Per-split statistics gathered while segmenting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitSummary {
    /// The split these numbers describe.
    pub split: Split,

    /// Documents emitted.
    pub documents: usize,

    /// Entity spans emitted across all documents.
    pub entities: usize,

    /// Longest `extended` sequence, if any document was emitted.
    pub max_length: Option<usize>,

    /// Documents sealed early by the clipping policy.
    pub clipped: usize,

    /// Spans still open when their document was sealed.
    pub dropped_spans: usize,
}

impl SplitSummary {
    /// Build a summary from sealed documents and segmenter counters.
    #[must_use]
    pub fn from_documents(
        split: Split,
        documents: &[Document],
        clipped: usize,
        dropped_spans: usize,
    ) -> Self {
        Self {
            split,
            documents: documents.len(),
            entities: documents.iter().map(|d| d.entities.len()).sum(),
            max_length: documents.iter().map(|d| d.extended.len()).max(),
            clipped,
            dropped_spans,
        }
    }
}
