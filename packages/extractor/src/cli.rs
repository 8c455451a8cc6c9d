//! Command-line interfaces for the extractor and the title shortener.

use std::path::{Path, PathBuf};

use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{ExtractionPolicy, SpeakerPlacement};
use crate::error::{ExtractorError, Result};
use crate::extractor::{extract_protocol, extract_protocol_with_titles};
use crate::output::{output_path_for, save_records, shorten_file};

/// Extract individual speeches from a Bundestag plenary protocol.
#[derive(Parser)]
#[command(name = "plenar-extractor")]
#[command(version, about, long_about = None)]
pub struct ExtractArgs {
    /// Plenary protocol XML file
    pub input: PathBuf,

    /// Output file (default: input path with .json extension)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also fill in shortened titles
    #[arg(long)]
    pub shorten_titles: bool,

    /// Where speaker annotations go in the speech text (default: from environment, else inline)
    #[arg(long, value_enum)]
    pub speaker_placement: Option<SpeakerPlacement>,

    /// Fail on speeches missing from the table of contents and on duplicate speech ids
    #[arg(long)]
    pub strict: bool,
}

impl ExtractArgs {
    /// Environment policy with command-line overrides applied.
    pub fn policy(&self) -> Result<ExtractionPolicy> {
        let mut policy = ExtractionPolicy::from_env()?;
        if let Some(placement) = self.speaker_placement {
            policy = policy.with_speaker_placement(placement);
        }
        if self.strict {
            policy = policy.strict();
        }
        Ok(policy)
    }
}

/// Add shortened titles to a previously extracted speech collection.
#[derive(Parser)]
#[command(name = "plenar-shorten-titles")]
#[command(version, about, long_about = None)]
pub struct ShortenArgs {
    /// JSON file written by plenar-extractor
    pub input: PathBuf,
}

/// Run the extractor CLI.
pub fn run_extract() -> Result<()> {
    let args = ExtractArgs::parse();
    extract_command(&args)
}

/// Run the title shortener CLI.
pub fn run_shorten() -> Result<()> {
    let args = ShortenArgs::parse();
    shorten_command(&args.input)
}

fn spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Execute the extraction command.
fn extract_command(args: &ExtractArgs) -> Result<()> {
    let policy = args.policy()?;
    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| output_path_for(&args.input));

    println!(
        "{} {}",
        style("Opening").bold(),
        style(args.input.display()).cyan()
    );

    let pb = spinner();
    pb.set_message("Reading protocol...");

    let xml = match std::fs::read_to_string(&args.input) {
        Ok(xml) => xml,
        Err(e) => {
            pb.finish_and_clear();
            return Err(ExtractorError::Io(e));
        }
    };

    pb.set_message("Extracting speeches...");
    let result = if args.shorten_titles {
        extract_protocol_with_titles(&xml, &policy)
    } else {
        extract_protocol(&xml, &policy)
    };
    let extraction = match result {
        Ok(extraction) => extraction,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.set_message("Saving JSON...");
    if let Err(e) = save_records(&output_path, &extraction.records) {
        pb.finish_and_clear();
        return Err(e);
    }
    pb.finish_and_clear();

    let summary = &extraction.summary;
    println!("  Date: {}", style(&summary.date).green());
    println!("  Agenda groups: {}", summary.groups);
    println!("  Speeches: {}", extraction.records.len());
    if summary.placeholders > 0 {
        println!(
            "  Untitled speeches: {}",
            style(summary.placeholders).yellow().bold()
        );
    }
    if summary.overwritten > 0 {
        println!(
            "  Duplicate speech ids: {}",
            style(summary.overwritten).yellow().bold()
        );
    }
    println!();
    println!(
        "{} {}",
        style("Saved to:").green().bold(),
        output_path.display()
    );

    Ok(())
}

/// Execute the title shortening command.
///
/// An already shortened file is reported and left alone without failing.
fn shorten_command(path: &Path) -> Result<()> {
    match shorten_file(path) {
        Ok(count) => {
            println!(
                "{} {} titles in {}",
                style("Shortened").green().bold(),
                count,
                path.display()
            );
            Ok(())
        }
        Err(ExtractorError::TitlesAlreadyShortened { .. }) => {
            println!("{}", style("titles already shortened").yellow());
            Ok(())
        }
        Err(e) => Err(e),
    }
}
