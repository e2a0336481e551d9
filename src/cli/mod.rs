//! Command-line interface for quotecheck.
//!
//! Provides commands for checking the quotes in a draft against a
//! transcript and supporting sources, managing stored projects and
//! inspecting the resolved configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::core::InputLimits;
use crate::domain::{CandidateSource, SourceKind, VerificationResult};
use crate::verify::Verifier;

pub mod project;

/// quotecheck - Verify quotes in a draft against their sources
#[derive(Parser, Debug)]
#[command(name = "quotecheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check every quote in a draft file
    Check {
        /// Draft file (Markdown or plain text)
        #[arg(short, long)]
        draft: PathBuf,

        /// Interview transcript file (checked first)
        #[arg(short, long)]
        transcript: Option<PathBuf>,

        /// Supporting source file, checked in the order given (repeatable)
        #[arg(short, long = "source")]
        sources: Vec<PathBuf>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,

        /// Exit with status 1 if any quote is not found
        #[arg(long)]
        strict: bool,
    },

    /// Manage editorial projects
    Project {
        #[command(subcommand)]
        command: project::ProjectCommands,
    },

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Check {
                draft,
                transcript,
                sources,
                json,
                strict,
            } => check_files(&draft, transcript.as_deref(), &sources, json, strict).await,
            Commands::Project { command } => project::execute(command).await,
            Commands::Config => show_config(),
        }
    }
}

/// Read a text file, enforcing the configured input limits
pub(crate) async fn read_input(path: &Path, limits: &InputLimits) -> Result<String> {
    limits.validate_path(path)?;

    let metadata = tokio::fs::metadata(path)
        .await
        .with_context(|| format!("Failed to stat input file: {}", path.display()))?;
    limits.validate_size(metadata.len())?;

    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;

    limits.validate_input(&content, None)?;
    Ok(content)
}

/// Display name for a source loaded from a file
pub(crate) fn file_display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Check a draft file against transcript and source files
async fn check_files(
    draft_path: &Path,
    transcript_path: Option<&Path>,
    source_paths: &[PathBuf],
    json: bool,
    strict: bool,
) -> Result<()> {
    let cfg = crate::config::config()?;
    let limits = &cfg.limits;

    let draft = read_input(draft_path, limits).await?;
    let transcript = match transcript_path {
        Some(path) => read_input(path, limits).await?,
        None => String::new(),
    };

    let mut sources = Vec::with_capacity(source_paths.len());
    for (i, path) in source_paths.iter().enumerate() {
        let content = read_input(path, limits).await?;
        sources.push(CandidateSource::new(
            format!("source-{}", i + 1),
            file_display_name(path),
            content,
            SourceKind::Text,
        ));
    }

    let results = Verifier::new(cfg.verification).verify(&draft, &transcript, &sources);

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print_results(&results);
    }

    if strict && results.iter().any(|r| !r.matched) {
        std::process::exit(1);
    }

    Ok(())
}

/// Print verification results for a terminal
pub(crate) fn print_results(results: &[VerificationResult]) {
    if results.is_empty() {
        println!("No quotes found in draft.");
        return;
    }

    for result in results {
        println!("Quote {}: \"{}\"", result.ordinal_position + 1, result.quote_text);
        if result.matched {
            let note = if result.is_approximate() {
                " (approximate context)"
            } else {
                ""
            };
            println!("  ✓ Found in {}{}", result.source_name, note);
            println!("    ...{}...", result.context_excerpt);
        } else {
            println!("  ✗ Quote not found in any sources");
        }
        println!();
    }

    let matched = results.iter().filter(|r| r.matched).count();
    println!("Summary:");
    println!("  Quotes checked: {}", results.len());
    println!("  Verified:       {}", matched);
    println!("  Not found:      {}", results.len() - matched);
}

/// Show the resolved configuration
fn show_config() -> Result<()> {
    let cfg = crate::config::config()?;

    println!("quotecheck configuration");
    println!();
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Paths:");
    println!("  Home:     {}", cfg.home.display());
    println!("  Projects: {}", cfg.home.join("projects.json").display());
    println!("  Events:   {}", cfg.home.join("events.jsonl").display());
    println!();
    println!("Verification:");
    println!("  Min quote chars: {}", cfg.verification.min_quote_chars);
    println!("  Context words:   {}", cfg.verification.context_words);
    println!("  Context chars:   {}", cfg.verification.context_chars);
    println!();
    println!("Input limits:");
    println!("  Max input size: {} bytes", cfg.limits.max_input_bytes);
    println!("  Denylist:       {}", cfg.limits.denylist_patterns.join(", "));

    Ok(())
}
