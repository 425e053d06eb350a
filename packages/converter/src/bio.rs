//! BIO tag parsing and the span state machine.
//!
//! A span opens on `B-TYPE`, survives any number of `I` tags and closes on
//! the next `O` or `B`. The closing token is never part of the span.

use crate::types::Entity;

/// A parsed BIO tag.
///
/// Only the first character decides the prefix; the label is whatever
/// follows the first two characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BioTag<'a> {
    /// Outside any entity.
    Outside,

    /// First token of an entity of the given type.
    Begin(&'a str),

    /// Continuation token.
    Inside(&'a str),

    /// Anything not starting with `B`, `I` or `O`.
    Unknown(&'a str),
}

impl<'a> BioTag<'a> {
    /// Parse a tag such as `B-pers`, `I-loc` or `O`.
    #[must_use]
    pub fn parse(tag: &'a str) -> Self {
        match tag.chars().next() {
            Some('O') => Self::Outside,
            Some('B') => Self::Begin(label_of(tag)),
            Some('I') => Self::Inside(label_of(tag)),
            _ => Self::Unknown(tag),
        }
    }
}

/// Strip the prefix character and its separator.
fn label_of(tag: &str) -> &str {
    tag.char_indices().nth(2).map_or("", |(i, _)| &tag[i..])
}

/// Pending-span state carried from one token to the next.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SpanState {
    #[default]
    NoOpenSpan,
    OpenSpan { start: usize, entity_type: String },
}

impl SpanState {
    /// Whether a span is waiting to be closed.
    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self, Self::OpenSpan { .. })
    }

    /// Close the pending span at `end`, if any.
    fn close(self, end: usize) -> Option<Entity> {
        match self {
            Self::NoOpenSpan => None,
            Self::OpenSpan { start, entity_type } => Some(Entity {
                entity_type,
                start,
                end,
            }),
        }
    }
}

/// Advance the state machine by one token.
///
/// `index` is the position of the token carrying `tag`. Returns the next
/// state and the entity closed by this step, if any.
///
/// # Examples
/// ```
/// use hipe2022_converter::bio::{step, BioTag, SpanState};
///
/// let (state, closed) = step(SpanState::NoOpenSpan, BioTag::parse("B-pers"), 0);
/// assert!(closed.is_none());
/// let (state, closed) = step(state, BioTag::parse("O"), 1);
/// assert_eq!(state, SpanState::NoOpenSpan);
/// assert_eq!(closed.map(|e| (e.start, e.end)), Some((0, 1)));
/// ```
#[must_use]
pub fn step(state: SpanState, tag: BioTag<'_>, index: usize) -> (SpanState, Option<Entity>) {
    match tag {
        BioTag::Inside(_) | BioTag::Unknown(_) => (state, None),
        BioTag::Outside => (SpanState::NoOpenSpan, state.close(index)),
        BioTag::Begin(label) => {
            let closed = state.close(index);
            let next = SpanState::OpenSpan {
                start: index,
                entity_type: label.to_string(),
            };
            (next, closed)
        }
    }
}
