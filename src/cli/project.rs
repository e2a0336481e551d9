//! Project CLI subcommands.
//!
//! Provides commands to:
//! - create, list, show and remove projects
//! - replace a project's transcript or draft from a file
//! - add and remove supporting sources
//! - set the story direction and edit key points
//! - snapshot the draft as a named version
//! - check quotes and export the article data

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Subcommand, ValueEnum};

use crate::core::ProjectStore;
use crate::domain::{
    CandidateSource, DirectionPreset, KeyPointMove, Project, SourceKind, StoryDirection,
    StoryLength, Tone,
};
use crate::report::{self, ExportReport};
use crate::verify::Verifier;

use super::{file_display_name, print_results, read_input};

/// Project-related subcommands
#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// Create a new project
    New {
        /// Project title
        #[arg(long)]
        title: Option<String>,

        /// Transcript file to start from
        #[arg(long)]
        transcript: Option<PathBuf>,
    },

    /// List projects, newest first
    List {
        /// Maximum number of projects to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show a project
    Show {
        /// Project ID (or unique prefix)
        id: String,
    },

    /// Delete a project
    Remove {
        /// Project ID (or unique prefix)
        id: String,
    },

    /// Replace the transcript from a file
    Transcript {
        /// Project ID (or unique prefix)
        id: String,
        /// Transcript file
        file: PathBuf,
    },

    /// Replace the draft from a file
    Draft {
        /// Project ID (or unique prefix)
        id: String,
        /// Draft file
        file: PathBuf,
    },

    /// Add a supporting source from a file
    AddSource {
        /// Project ID (or unique prefix)
        id: String,

        /// File with the source text
        file: PathBuf,

        /// Display name (defaults to the file name)
        #[arg(long)]
        name: Option<String>,

        /// Kind of source
        #[arg(short, long, value_enum, default_value = "text")]
        kind: SourceArg,

        /// Original URL of the source
        #[arg(long)]
        url: Option<String>,
    },

    /// Remove a supporting source
    RemoveSource {
        /// Project ID (or unique prefix)
        id: String,
        /// Source ID
        source_id: String,
    },

    /// Set the story direction (unset fields keep their value)
    Direction {
        /// Project ID (or unique prefix)
        id: String,

        /// Start from a preset
        #[arg(long, value_enum)]
        preset: Option<PresetArg>,

        /// Writing tone
        #[arg(long, value_enum)]
        tone: Option<ToneArg>,

        /// Target length
        #[arg(long, value_enum)]
        length: Option<LengthArg>,

        /// Angle or focus for the story
        #[arg(long)]
        angle: Option<String>,
    },

    /// Edit the project's key points
    KeyPoint {
        #[command(subcommand)]
        command: KeyPointCommands,
    },

    /// Save the current draft as a named version
    Version {
        /// Project ID (or unique prefix)
        id: String,
        /// Version label
        label: String,
    },

    /// Check the draft's quotes and store the results
    Check {
        /// Project ID (or unique prefix)
        id: String,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export the draft or the article data
    Export {
        /// Project ID (or unique prefix)
        id: String,

        /// Export format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,

        /// Output file (prints to stdout if not provided)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Key point subcommands
#[derive(Subcommand, Debug)]
pub enum KeyPointCommands {
    /// Append a key point
    Add {
        /// Project ID (or unique prefix)
        id: String,
        /// Key point text
        text: String,
        /// Where the point came from
        #[arg(long)]
        source: Option<String>,
    },

    /// Replace a key point's text
    Edit {
        /// Project ID (or unique prefix)
        id: String,
        /// Key point ID
        key_point_id: String,
        /// New text
        text: String,
    },

    /// Move a key point one place up or down
    Move {
        /// Project ID (or unique prefix)
        id: String,
        /// Key point ID
        key_point_id: String,
        /// Direction to move
        #[arg(value_enum)]
        direction: MoveArg,
    },

    /// Remove a key point
    Remove {
        /// Project ID (or unique prefix)
        id: String,
        /// Key point ID
        key_point_id: String,
    },
}

/// Direction presets for CLI (maps to DirectionPreset)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PresetArg {
    FounderStory,
    TechnicalDeepDive,
    PressRelease,
    UserImpact,
}

impl From<PresetArg> for DirectionPreset {
    fn from(preset: PresetArg) -> Self {
        match preset {
            PresetArg::FounderStory => DirectionPreset::FounderStory,
            PresetArg::TechnicalDeepDive => DirectionPreset::TechnicalDeepDive,
            PresetArg::PressRelease => DirectionPreset::PressRelease,
            PresetArg::UserImpact => DirectionPreset::UserImpact,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ToneArg {
    Neutral,
    Storytelling,
    PressRelease,
}

impl From<ToneArg> for Tone {
    fn from(tone: ToneArg) -> Self {
        match tone {
            ToneArg::Neutral => Tone::Neutral,
            ToneArg::Storytelling => Tone::Storytelling,
            ToneArg::PressRelease => Tone::PressRelease,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LengthArg {
    /// 300-500 words
    Short,
    /// 500-800 words
    Medium,
    /// 800-1200 words
    Long,
}

impl From<LengthArg> for StoryLength {
    fn from(length: LengthArg) -> Self {
        match length {
            LengthArg::Short => StoryLength::Short,
            LengthArg::Medium => StoryLength::Medium,
            LengthArg::Long => StoryLength::Long,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MoveArg {
    Up,
    Down,
}

impl From<MoveArg> for KeyPointMove {
    fn from(direction: MoveArg) -> Self {
        match direction {
            MoveArg::Up => KeyPointMove::Up,
            MoveArg::Down => KeyPointMove::Down,
        }
    }
}

/// Apply CLI overrides on top of `current` (or a preset, when given)
fn merge_direction(
    current: &StoryDirection,
    preset: Option<PresetArg>,
    tone: Option<ToneArg>,
    length: Option<LengthArg>,
    angle: Option<String>,
) -> StoryDirection {
    let mut direction = match preset {
        Some(preset) => StoryDirection::preset(preset.into()),
        None => current.clone(),
    };
    if let Some(tone) = tone {
        direction.tone = tone.into();
    }
    if let Some(length) = length {
        direction.length = length.into();
    }
    if let Some(angle) = angle {
        direction.angle = angle;
    }
    direction
}

/// Source kind for CLI (maps to SourceKind)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SourceArg {
    /// Text extracted from a PDF
    Pdf,

    /// Text fetched from a web page
    Url,

    /// Plain text
    Text,
}

impl From<SourceArg> for SourceKind {
    fn from(kind: SourceArg) -> Self {
        match kind {
            SourceArg::Pdf => SourceKind::Pdf,
            SourceArg::Url => SourceKind::Url,
            SourceArg::Text => SourceKind::Text,
        }
    }
}

/// Export formats
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// Article data with quote mapping
    Json,

    /// The draft as Markdown
    Markdown,
}

/// Execute a project subcommand
pub async fn execute(command: ProjectCommands) -> Result<()> {
    let cfg = crate::config::config()?;
    let store = ProjectStore::open_default()?;

    match command {
        ProjectCommands::New { title, transcript } => {
            let transcript = match transcript {
                Some(path) => Some(read_input(&path, &cfg.limits).await?),
                None => None,
            };
            let project = store.create(title, transcript).await?;
            println!("Created project {} ({})", project.id, project.title);
        }
        ProjectCommands::List { limit } => {
            list_projects(&store, limit).await?;
        }
        ProjectCommands::Show { id } => {
            let project = store.get(&id).await?;
            display_project(&project);
        }
        ProjectCommands::Remove { id } => {
            let removed = store.remove(&id).await?;
            println!("Removed project {} ({})", removed.id, removed.title);
        }
        ProjectCommands::Transcript { id, file } => {
            let transcript = read_input(&file, &cfg.limits).await?;
            let project = store.set_transcript(&id, transcript).await?;
            println!(
                "Transcript updated for {} ({} chars)",
                project.id,
                project.transcript.chars().count()
            );
        }
        ProjectCommands::Draft { id, file } => {
            let draft = read_input(&file, &cfg.limits).await?;
            let project = store.set_draft(&id, draft).await?;
            println!(
                "Draft updated for {} ({} words)",
                project.id,
                project.draft_text.split_whitespace().count()
            );
        }
        ProjectCommands::AddSource {
            id,
            file,
            name,
            kind,
            url,
        } => {
            let content = read_input(&file, &cfg.limits).await?;
            let name = name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| file_display_name(&file));
            let mut source = CandidateSource::new(String::new(), name, content, kind.into());
            if let Some(url) = url {
                source = source.with_url(url);
            }
            let source = store.add_source(&id, source).await?;
            println!("Added source {} ({})", source.id, source.display_name);
        }
        ProjectCommands::RemoveSource { id, source_id } => {
            let source = store.remove_source(&id, &source_id).await?;
            println!("Removed source {} ({})", source.id, source.display_name);
        }
        ProjectCommands::Direction {
            id,
            preset,
            tone,
            length,
            angle,
        } => {
            let current = store.get(&id).await?;
            let direction = merge_direction(&current.direction, preset, tone, length, angle);
            let project = store.set_direction(&id, direction).await?;
            println!(
                "Direction for {}: {:?} / {:?}",
                project.id, project.direction.tone, project.direction.length
            );
        }
        ProjectCommands::KeyPoint { command } => {
            key_point(&store, command).await?;
        }
        ProjectCommands::Version { id, label } => {
            let version = store.add_version(&id, &label).await?;
            println!("Saved version {} ({})", version.id, version.label);
        }
        ProjectCommands::Check { id, json } => {
            let verifier = Verifier::new(cfg.verification);
            let project = store.check_quotes(&id, &verifier).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&project.quote_matches)?);
            } else {
                print_results(&project.quote_matches);
            }
        }
        ProjectCommands::Export { id, format, output } => {
            let project = store.get(&id).await?;
            let content = match format {
                ExportFormat::Json => {
                    let export = ExportReport::build_now(&project)?;
                    serde_json::to_string_pretty(&export)?
                }
                ExportFormat::Markdown => report::markdown(&project)?,
            };

            match output {
                Some(path) => {
                    tokio::fs::write(&path, content)
                        .await
                        .with_context(|| format!("Failed to write export: {}", path.display()))?;
                    println!("Exported to {}", path.display());
                }
                None => println!("{}", content),
            }
        }
    }

    Ok(())
}

/// Execute a key point subcommand
async fn key_point(store: &ProjectStore, command: KeyPointCommands) -> Result<()> {
    match command {
        KeyPointCommands::Add { id, text, source } => {
            let key_point = store.add_key_point(&id, text, source).await?;
            println!("Added key point {} (#{})", key_point.id, key_point.order + 1);
        }
        KeyPointCommands::Edit {
            id,
            key_point_id,
            text,
        } => {
            let key_point = store.edit_key_point(&id, &key_point_id, text).await?;
            println!("Updated key point {}", key_point.id);
        }
        KeyPointCommands::Move {
            id,
            key_point_id,
            direction,
        } => {
            let project = store
                .move_key_point(&id, &key_point_id, direction.into())
                .await?;
            print_key_points(&project);
        }
        KeyPointCommands::Remove { id, key_point_id } => {
            let removed = store.remove_key_point(&id, &key_point_id).await?;
            println!("Removed key point {}", removed.id);
        }
    }
    Ok(())
}

fn print_key_points(project: &Project) {
    for key_point in &project.key_points {
        println!("  {:>2}. [{}] {}", key_point.order + 1, key_point.id, key_point.text);
    }
}

/// List stored projects
async fn list_projects(store: &ProjectStore, limit: usize) -> Result<()> {
    let projects = store.list().await?;

    if projects.is_empty() {
        println!("No projects yet. Use 'quotecheck project new' to create one.");
        return Ok(());
    }

    println!("{:<38} {:<20} {:<40}", "ID", "UPDATED", "TITLE");
    println!("{}", "-".repeat(98));

    for project in projects.iter().take(limit) {
        let title: String = if project.title.chars().count() > 37 {
            format!("{}...", project.title.chars().take(37).collect::<String>())
        } else {
            project.title.clone()
        };
        println!(
            "{:<38} {:<20} {:<40}",
            project.id.to_string(),
            project.updated_at.format("%Y-%m-%d %H:%M").to_string(),
            title
        );
    }

    println!("\nTotal: {} projects", projects.len());

    Ok(())
}

/// Print project details
fn display_project(project: &Project) {
    println!("Project ID: {}", project.id);
    println!("Title:      {}", project.title);
    println!("Created:    {}", project.created_at);
    println!("Updated:    {}", project.updated_at);
    println!();
    println!("Transcript: {} chars", project.transcript.chars().count());
    println!("Draft:      {} words", project.draft_text.split_whitespace().count());
    println!("Key points: {}", project.key_points.len());
    print_key_points(project);
    println!(
        "Direction:  {:?} / {:?}{}",
        project.direction.tone,
        project.direction.length,
        if project.direction.angle.is_empty() {
            String::new()
        } else {
            format!(" / {}", project.direction.angle)
        }
    );

    println!();
    println!("Sources:");
    if project.sources.is_empty() {
        println!("  (none)");
    }
    for source in &project.sources {
        println!(
            "  {:<12} {:<6} {} ({} chars)",
            source.id,
            source.kind.to_string(),
            source.display_name,
            source.content.chars().count()
        );
    }

    println!();
    if project.quote_matches.is_empty() {
        println!("Quotes: not checked yet");
    } else {
        println!(
            "Quotes: {} checked, {} verified",
            project.quote_matches.len(),
            project.matched_quote_count()
        );
    }

    if !project.versions.is_empty() {
        println!();
        println!("Versions:");
        for version in &project.versions {
            println!(
                "  {}  {}",
                version.created_at.format("%Y-%m-%d %H:%M"),
                version.label
            );
        }
    }
}
