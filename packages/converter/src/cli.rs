//! Command-line interface for the converter.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{
    ConversionConfig, TagPolicy, DEFAULT_CLIP_THRESHOLD, DEFAULT_DOCUMENT_SEPARATOR,
    DEFAULT_EOS_MARKER, DEFAULT_OUTPUT_PREFIX,
};
use crate::converter::{load_corpus, save_corpus};
use crate::error::{ConverterError, Result};
use crate::preprocess::{preprocess_file, PreprocessOptions};
use crate::types::Split;

/// HIPE-2022 converter - Turn BIO-tagged NER corpora into span-annotated JSON.
#[derive(Parser)]
#[command(name = "hipe2022-converter")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clean up a raw HIPE-2022 TSV file before conversion.
    Preprocess {
        /// Raw input file
        input: PathBuf,

        /// Where to write the rewritten file (e.g., ajmc/en/train.txt)
        output: PathBuf,

        /// Substring marking the end of a sentence
        #[arg(long, default_value = DEFAULT_EOS_MARKER)]
        eos_marker: String,

        /// Line prefix that starts a new document
        #[arg(long, default_value = DEFAULT_DOCUMENT_SEPARATOR)]
        document_separator: String,

        /// Do not insert -DOCSTART- markers at document separators
        #[arg(long)]
        no_document_separator: bool,
    },

    /// Convert <split>.txt files in a folder to JSON.
    Convert {
        /// Folder holding train.txt, dev.txt and test.txt
        base: PathBuf,

        /// Split to convert; repeat for several (default: dev, test, train)
        #[arg(short, long = "split")]
        splits: Vec<Split>,

        /// Token count above which training documents are clipped
        #[arg(long, default_value_t = DEFAULT_CLIP_THRESHOLD)]
        clip_threshold: usize,

        /// Reject tags that are not O, B-TYPE or I-TYPE
        #[arg(long)]
        strict_tags: bool,

        /// Prefix for output file names
        #[arg(long, default_value = DEFAULT_OUTPUT_PREFIX)]
        prefix: String,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Preprocess {
            input,
            output,
            eos_marker,
            document_separator,
            no_document_separator,
        } => {
            let options = PreprocessOptions {
                eos_marker,
                document_separator,
                add_document_separator: !no_document_separator,
            };
            preprocess_command(&input, &output, &options)
        }
        Commands::Convert {
            base,
            splits,
            clip_threshold,
            strict_tags,
            prefix,
        } => {
            let config = ConversionConfig {
                clip_threshold,
                tag_policy: if strict_tags {
                    TagPolicy::Strict
                } else {
                    TagPolicy::Lenient
                },
                splits: if splits.is_empty() {
                    Split::ALL.to_vec()
                } else {
                    splits
                },
                output_prefix: prefix,
            };
            convert_command(&base, &config)
        }
    }
}

/// Execute the preprocess command.
fn preprocess_command(input: &Path, output: &Path, options: &PreprocessOptions) -> Result<()> {
    let stats = preprocess_file(input, output, options)?;

    println!(
        "{} {} -> {}",
        style("Preprocessed").bold(),
        style(input.display()).cyan(),
        style(output.display()).green()
    );
    println!("  Lines: {} -> {}", stats.lines_in, stats.lines_out);
    println!("  Documents: {}", stats.documents);
    if stats.dropped > 0 {
        println!("  Dropped: {}", style(stats.dropped).yellow().bold());
    }

    Ok(())
}

/// Execute the convert command.
fn convert_command(base: &Path, config: &ConversionConfig) -> Result<()> {
    // Validate base directory before reading anything
    if !base.exists() {
        return Err(ConverterError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Base directory does not exist: {}", base.display()),
        )));
    }
    if !base.is_dir() {
        return Err(ConverterError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("Base path is not a directory: {}", base.display()),
        )));
    }

    println!(
        "{} {}",
        style("Converting").bold(),
        style(base.display()).cyan()
    );
    println!();

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message("Segmenting splits...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let corpus = match load_corpus(base, config) {
        Ok(corpus) => corpus,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.set_message("Saving JSON...");

    let outputs = match save_corpus(&corpus, base, &config.output_prefix) {
        Ok(outputs) => outputs,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.finish_and_clear();

    for summary in corpus.summaries() {
        println!("  {}", style(summary.split).green().bold());
        println!("    Documents: {}", summary.documents);
        println!("    Entities: {}", summary.entities);
        println!("    Max length: {}", summary.max_length.unwrap_or(0));
        if summary.clipped > 0 {
            println!("    Clipped: {}", style(summary.clipped).yellow());
        }
        if summary.dropped_spans > 0 {
            println!("    Dropped spans: {}", style(summary.dropped_spans).yellow());
        }
    }
    println!("  Types: {}", corpus.registry.len());

    println!();
    println!("{}", style("Saved:").green().bold());
    for path in outputs {
        println!("  {}", path.display());
    }

    Ok(())
}
