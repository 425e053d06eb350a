//! Conversion service that ties segmentation and export together.

use std::fs;
use std::path::{Path, PathBuf};

use crate::clipping::TrainSplitClip;
use crate::config::{input_path, ConversionConfig};
use crate::error::Result;
use crate::export::{save_split, save_types};
use crate::registry::TypeRegistry;
use crate::segmenter::{segment_with, Segmentation};
use crate::types::{Document, Split, SplitSummary};

/// Segmented splits and the shared type registry, before export.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    /// Documents and statistics per split, in processing order.
    pub splits: Vec<(Split, Segmentation)>,

    /// Types seen across all splits.
    pub registry: TypeRegistry,
}

impl Corpus {
    /// Documents of one split, if it was processed.
    #[must_use]
    pub fn documents(&self, split: Split) -> Option<&[Document]> {
        self.splits
            .iter()
            .find(|(s, _)| *s == split)
            .map(|(_, seg)| seg.documents.as_slice())
    }

    /// Per-split statistics in processing order.
    pub fn summaries(&self) -> impl Iterator<Item = &SplitSummary> {
        self.splits.iter().map(|(_, seg)| &seg.summary)
    }
}

/// Outcome of a full conversion run.
#[derive(Debug, Clone)]
pub struct ConversionReport {
    /// Per-split statistics in processing order.
    pub summaries: Vec<SplitSummary>,

    /// Number of distinct entity types.
    pub types: usize,

    /// Files written, splits first and the types file last.
    pub outputs: Vec<PathBuf>,
}

/// Segment one split's text into documents, registering its types.
pub fn convert_split(
    text: &str,
    split: Split,
    registry: &mut TypeRegistry,
    config: &ConversionConfig,
) -> Result<Segmentation> {
    let segmentation = segment_with(
        text.lines(),
        split,
        registry,
        TrainSplitClip::new(config.clip_threshold),
        config.tag_policy,
    )?;

    let summary = &segmentation.summary;
    tracing::info!(
        split = %split,
        documents = summary.documents,
        entities = summary.entities,
        max_length = summary.max_length.unwrap_or(0),
        clipped = summary.clipped,
        "Segmented split"
    );
    if summary.dropped_spans > 0 {
        tracing::debug!(
            split = %split,
            dropped = summary.dropped_spans,
            "Spans dropped at document boundaries"
        );
    }

    Ok(segmentation)
}

/// Read and segment every configured split under `base`.
///
/// Nothing is written; a malformed split aborts before any output exists.
pub fn load_corpus(base: &Path, config: &ConversionConfig) -> Result<Corpus> {
    let mut corpus = Corpus::default();

    for &split in &config.splits {
        let path = input_path(base, split);
        tracing::info!(path = %path.display(), "Processing split");
        let text = fs::read_to_string(&path)?;
        let segmentation = convert_split(&text, split, &mut corpus.registry, config)?;
        corpus.splits.push((split, segmentation));
    }

    Ok(corpus)
}

/// Write every split of `corpus` and the type registry under `base`.
pub fn save_corpus(corpus: &Corpus, base: &Path, prefix: &str) -> Result<Vec<PathBuf>> {
    let mut outputs = Vec::with_capacity(corpus.splits.len() + 1);
    for (split, segmentation) in &corpus.splits {
        outputs.push(save_split(base, prefix, *split, &segmentation.documents)?);
    }
    outputs.push(save_types(base, prefix, &corpus.registry)?);
    Ok(outputs)
}

/// Convert the corpus under `base` to JSON.
///
/// Reads `<base>/<split>.txt` for each configured split and writes
/// `<base>/<prefix>_<split>.json` plus `<base>/<prefix>_types.json`.
pub fn convert_corpus(base: &Path, config: &ConversionConfig) -> Result<ConversionReport> {
    tracing::info!(base = %base.display(), "Converting corpus to JSON");

    let corpus = load_corpus(base, config)?;
    let outputs = save_corpus(&corpus, base, &config.output_prefix)?;

    Ok(ConversionReport {
        summaries: corpus.summaries().cloned().collect(),
        types: corpus.registry.len(),
        outputs,
    })
}
