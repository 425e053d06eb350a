//! Line-by-line segmentation of a BIO-tagged token stream into documents.
//!
//! The segmenter walks one split's lines, collecting tokens into the
//! in-progress document and closing entity spans with the state machine in
//! [`crate::bio`]. Documents are sealed at document-start markers, at clip
//! points chosen by a [`ClipPolicy`], and at the end of the stream.

use crate::bio::{step, BioTag, SpanState};
use crate::clipping::{ClipPolicy, TrainSplitClip};
use crate::config::{
    validate_tag, TagPolicy, COMMENT_PREFIX, DOCSTART_MARKER, HEADER_PREFIX, MIN_FIELDS,
};
use crate::error::{ConverterError, Result};
use crate::registry::TypeRegistry;
use crate::types::{Document, Split, SplitSummary};

/// Classification of a single trimmed input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Column header or `# ` comment; ignored.
    Header,

    /// `-DOCSTART-` marker.
    DocumentStart,

    /// Sentence boundary.
    Blank,

    /// Token line with annotation columns.
    Data(&'a str),
}

/// Classify a line. Leading and trailing whitespace is ignored.
#[must_use]
pub fn classify(line: &str) -> LineKind<'_> {
    let line = line.trim();
    if line.starts_with(HEADER_PREFIX) || line.starts_with(COMMENT_PREFIX) {
        LineKind::Header
    } else if line.starts_with(DOCSTART_MARKER) {
        LineKind::DocumentStart
    } else if line.is_empty() {
        LineKind::Blank
    } else {
        LineKind::Data(line)
    }
}

/// Documents of one split together with their statistics.
#[derive(Debug, Clone)]
pub struct Segmentation {
    pub documents: Vec<Document>,
    pub summary: SplitSummary,
}

/// Stateful interpreter for one split's line stream.
///
/// The type registry is borrowed so that several splits can feed the same
/// accumulator one after another.
pub struct Segmenter<'r, P: ClipPolicy> {
    split: Split,
    registry: &'r mut TypeRegistry,
    policy: P,
    tag_policy: TagPolicy,
    documents: Vec<Document>,
    current: Option<Document>,
    state: SpanState,
    clipped: usize,
    dropped_spans: usize,
}

impl<'r, P: ClipPolicy> Segmenter<'r, P> {
    /// Create a new segmenter for `split`.
    #[must_use]
    pub fn new(split: Split, registry: &'r mut TypeRegistry, policy: P) -> Self {
        Self {
            split,
            registry,
            policy,
            tag_policy: TagPolicy::default(),
            documents: Vec::new(),
            current: None,
            state: SpanState::NoOpenSpan,
            clipped: 0,
            dropped_spans: 0,
        }
    }

    /// Set how malformed tags are handled.
    #[must_use]
    pub fn with_tag_policy(mut self, tag_policy: TagPolicy) -> Self {
        self.tag_policy = tag_policy;
        self
    }

    /// Feed one line. `line_number` is 1-based and only used in errors.
    pub fn feed(&mut self, line_number: usize, line: &str) -> Result<()> {
        match classify(line) {
            LineKind::Header => Ok(()),
            LineKind::DocumentStart => {
                self.start_document();
                Ok(())
            }
            LineKind::Blank => {
                self.sentence_boundary();
                Ok(())
            }
            LineKind::Data(data) => self.process_data(line_number, data),
        }
    }

    /// Seal the last open document and return everything collected.
    #[must_use]
    pub fn finish(mut self) -> Segmentation {
        self.seal_current();
        let summary = SplitSummary::from_documents(
            self.split,
            &self.documents,
            self.clipped,
            self.dropped_spans,
        );
        Segmentation {
            documents: self.documents,
            summary,
        }
    }

    fn start_document(&mut self) {
        self.seal_current();
        self.current = Some(Document::new());
    }

    fn sentence_boundary(&mut self) {
        let clip = self
            .current
            .as_ref()
            .is_some_and(|doc| self.policy.should_clip(self.split, doc));
        if clip {
            tracing::debug!(
                split = %self.split,
                tokens = self.current.as_ref().map_or(0, Document::len),
                "Clipping long document at sentence boundary"
            );
            self.clipped += 1;
            self.start_document();
        }
    }

    fn process_data(&mut self, line_number: usize, line: &str) -> Result<()> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < MIN_FIELDS {
            return Err(ConverterError::MalformedLine {
                split: self.split,
                line_number,
                fields: fields.len(),
                expected: MIN_FIELDS,
                line: line.to_string(),
            });
        }

        let (token, raw_tag) = (fields[0], fields[1]);
        if self.tag_policy == TagPolicy::Strict {
            validate_tag(raw_tag, self.split, line_number)?;
        }

        let tag = BioTag::parse(raw_tag);
        match tag {
            BioTag::Begin(label) => self.registry.register(label),
            BioTag::Unknown(other) => tracing::debug!(
                split = %self.split,
                line_number,
                tag = %other,
                "Ignoring tag with unknown prefix"
            ),
            BioTag::Outside | BioTag::Inside(_) => {}
        }

        let document = self.current.get_or_insert_with(|| {
            tracing::debug!(line_number, "Data before first document marker, opening document");
            Document::new()
        });
        let index = document.push_token(token);

        let (next, closed) = step(std::mem::take(&mut self.state), tag, index);
        if let Some(entity) = closed {
            document.entities.push(entity);
        }
        self.state = next;
        Ok(())
    }

    fn seal_current(&mut self) {
        if let SpanState::OpenSpan { start, entity_type } = std::mem::take(&mut self.state) {
            tracing::debug!(
                split = %self.split,
                start,
                entity_type = %entity_type,
                "Dropping span still open at end of document"
            );
            self.dropped_spans += 1;
        }
        if let Some(document) = self.current.take() {
            self.documents.push(document.seal());
        }
    }
}

/// Segment one split with the default train-only clipping and lenient tags.
pub fn segment<I, S>(lines: I, split: Split, registry: &mut TypeRegistry) -> Result<Vec<Document>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    segment_with(lines, split, registry, TrainSplitClip::default(), TagPolicy::Lenient)
        .map(|s| s.documents)
}

/// Segment one split with an explicit clipping policy and tag policy.
pub fn segment_with<I, S, P>(
    lines: I,
    split: Split,
    registry: &mut TypeRegistry,
    policy: P,
    tag_policy: TagPolicy,
) -> Result<Segmentation>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    P: ClipPolicy,
{
    let mut segmenter = Segmenter::new(split, registry, policy).with_tag_policy(tag_policy);
    for (i, line) in lines.into_iter().enumerate() {
        segmenter.feed(i + 1, line.as_ref())?;
    }
    Ok(segmenter.finish())
}
