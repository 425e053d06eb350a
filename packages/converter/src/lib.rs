//! HIPE-2022 converter - Turn BIO-tagged NER corpora into span-annotated JSON.
//!
//! This crate reads HIPE-2022 style TSV files (one token per line, blank
//! lines between sentences, `-DOCSTART-` lines between documents) and writes
//! one JSON array of documents per split plus a registry of entity types.
//!
//! # Example
//!
//! ```
//! use hipe2022_converter::{segment, Split, TypeRegistry};
//!
//! let lines = [
//!     "-DOCSTART- O",
//!     "Ajax\tB-work\tO\tO\tO\tO\tO\t_\t_\t_",
//!     "by\tO\tO\tO\tO\tO\tO\t_\t_\t_",
//! ];
//! let mut registry = TypeRegistry::new();
//! let documents = segment(lines, Split::Dev, &mut registry).unwrap();
//!
//! assert_eq!(documents[0].tokens, ["Ajax", "by"]);
//! assert_eq!(documents[0].entities[0].entity_type, "work");
//! assert!(registry.contains("work"));
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Constants, validation and run settings
//! - [`types`]: Core data types (Document, Entity, Split)
//! - [`error`]: Error types and Result alias
//! - [`registry`]: Entity type registry shared across splits
//! - [`bio`]: BIO tag parsing and the span state machine
//! - [`clipping`]: Policies for splitting overlong documents
//! - [`segmenter`]: Line stream to document segmentation
//! - [`preprocess`]: Dataset-specific cleanup of raw files
//! - [`export`]: JSON output
//! - [`converter`]: Main conversion service
//! - [`cli`]: Command-line interface

pub mod bio;
pub mod cli;
pub mod clipping;
pub mod config;
pub mod converter;
pub mod error;
pub mod export;
pub mod preprocess;
pub mod registry;
pub mod segmenter;
pub mod types;

// Re-export main functions
pub use converter::convert_corpus;
pub use preprocess::{preprocess_file, preprocess_lines, PreprocessOptions};
pub use segmenter::{segment, segment_with, Segmenter};

// Re-export commonly used items
pub use config::{ConversionConfig, TagPolicy};
pub use error::{ConverterError, Result};
pub use registry::TypeRegistry;
pub use types::{Document, Entity, Split, SplitSummary};
