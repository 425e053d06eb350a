//! Clipping policies for overlong documents.

use crate::config::DEFAULT_CLIP_THRESHOLD;
use crate::types::{Document, Split};

/// Trait for deciding where an in-progress document is force-split.
///
/// Consulted only at sentence boundaries.
pub trait ClipPolicy {
    /// Determine if `document` should be sealed at this boundary.
    fn should_clip(&self, split: Split, document: &Document) -> bool;
}

/// Clip training documents once they exceed a token threshold.
///
/// This is the default policy: dev and test documents are never clipped so
/// evaluation sees the natural document boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainSplitClip {
    threshold: usize,
}

impl TrainSplitClip {
    #[must_use]
    pub fn new(threshold: usize) -> Self {
        Self { threshold }
    }

    #[must_use]
    pub fn threshold(&self) -> usize {
        self.threshold
    }
}

impl Default for TrainSplitClip {
    fn default() -> Self {
        Self::new(DEFAULT_CLIP_THRESHOLD)
    }
}

impl ClipPolicy for TrainSplitClip {
    fn should_clip(&self, split: Split, document: &Document) -> bool {
        split.is_train() && document.len() > self.threshold
    }
}

/// Never clip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoClip;

impl ClipPolicy for NoClip {
    fn should_clip(&self, _split: Split, _document: &Document) -> bool {
        false
    }
}
