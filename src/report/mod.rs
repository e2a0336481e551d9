//! Export payloads for a project.
//!
//! The JSON report lists every quote with its verification status alongside
//! per-paragraph provenance hints and workflow flags. Keys are camelCase so
//! the payload drops straight into the editorial front end.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::ProjectError;
use crate::domain::{
    CandidateSource, ContextPrecision, KeyPoint, Project, SourceKind, StoryDirection,
    VerificationResult,
};

/// Report format version
pub const EXPORT_VERSION: &str = "1.0.0";

/// Characters of each paragraph kept in the provenance excerpt
const PARAGRAPH_EXCERPT_CHARS: usize = 100;

/// Keywords must be longer than this to link a paragraph to a source
const MIN_KEYWORD_CHARS: usize = 3;

/// Full article data export
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportReport {
    pub metadata: ExportMetadata,
    pub project: ProjectSummary,
    pub provenance: Provenance,
    pub workflow: Workflow,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    pub export_date: DateTime<Utc>,
    pub word_count: usize,
    pub key_points_count: usize,
    pub sources_count: usize,
    pub paragraphs_count: usize,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub direction: StoryDirection,
    pub key_points: Vec<KeyPoint>,
    pub sources: Vec<SourceSummary>,
}

/// A source without its content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceSummary {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: SourceKind,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Lets consumers detect that a source changed after export
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_sha256: Option<String>,
}

impl SourceSummary {
    fn from_source(source: &CandidateSource, with_digest: bool) -> Self {
        Self {
            id: source.id.clone(),
            kind: source.kind,
            name: source.display_name.clone(),
            url: source.url.clone(),
            content_sha256: with_digest.then(|| source.content_sha256()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provenance {
    pub paragraphs: Vec<ParagraphProvenance>,
    pub quote_mapping: Vec<QuoteMapping>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphProvenance {
    /// 1-based
    pub paragraph_number: usize,
    pub content: String,
    pub word_count: usize,
    pub sources: Vec<SourceSummary>,
}

/// How much to trust a quote's attribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    /// Found, with word-aligned context
    High,
    /// Found, but the context is a character window
    Approximate,
    /// Not found in any source
    None,
}

impl From<&VerificationResult> for Confidence {
    fn from(result: &VerificationResult) -> Self {
        match (result.matched, result.context_precision) {
            (true, Some(ContextPrecision::WordAligned)) => Confidence::High,
            (true, _) => Confidence::Approximate,
            (false, _) => Confidence::None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteMapping {
    /// 1-based
    pub quote_id: usize,
    pub quote: String,
    pub source_id: String,
    pub source_name: String,
    pub verified: bool,
    pub context: String,
    pub confidence: Confidence,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    pub transcript_length: usize,
    pub key_points_extracted: bool,
    pub draft_generated: bool,
    pub quotes_checked: bool,
    pub sources_attached: bool,
}

/// Non-blank paragraphs separated by blank lines
fn paragraphs(text: &str) -> Vec<&str> {
    text.split("\n\n").filter(|p| !p.trim().is_empty()).collect()
}

fn excerpt(paragraph: &str) -> String {
    let head: String = paragraph.chars().take(PARAGRAPH_EXCERPT_CHARS).collect();
    format!("{}...", head)
}

/// Sources sharing at least one keyword with the paragraph
fn paragraph_sources(paragraph: &str, sources: &[(String, &CandidateSource)]) -> Vec<SourceSummary> {
    let keywords: Vec<String> = paragraph
        .to_lowercase()
        .split_whitespace()
        .filter(|w| w.chars().count() > MIN_KEYWORD_CHARS)
        .map(str::to_string)
        .collect();

    sources
        .iter()
        .filter(|(content, _)| keywords.iter().any(|k| content.contains(k.as_str())))
        .map(|(_, source)| SourceSummary::from_source(source, false))
        .collect()
}

impl ExportReport {
    /// Build the export for a project. Refuses a blank draft.
    pub fn build(project: &Project, exported_at: DateTime<Utc>) -> Result<Self, ProjectError> {
        if project.draft_text.trim().is_empty() {
            return Err(ProjectError::EmptyDraft);
        }

        let paras = paragraphs(&project.draft_text);
        let lowered: Vec<(String, &CandidateSource)> = project
            .sources
            .iter()
            .map(|s| (s.content.to_lowercase(), s))
            .collect();

        let paragraphs = paras
            .iter()
            .enumerate()
            .map(|(i, p)| ParagraphProvenance {
                paragraph_number: i + 1,
                content: excerpt(p),
                word_count: p.split_whitespace().count(),
                sources: paragraph_sources(p, &lowered),
            })
            .collect();

        let quote_mapping = project
            .quote_matches
            .iter()
            .enumerate()
            .map(|(i, m)| QuoteMapping {
                quote_id: i + 1,
                quote: m.quote_text.clone(),
                source_id: m.source_id.clone(),
                source_name: m.source_name.clone(),
                verified: m.matched,
                context: m.context_excerpt.clone(),
                confidence: Confidence::from(m),
            })
            .collect();

        Ok(Self {
            metadata: ExportMetadata {
                export_date: exported_at,
                word_count: project.draft_text.split_whitespace().count(),
                key_points_count: project.key_points.len(),
                sources_count: project.sources.len(),
                paragraphs_count: paras.len(),
                version: EXPORT_VERSION.to_string(),
            },
            project: ProjectSummary {
                direction: project.direction.clone(),
                key_points: project.key_points.clone(),
                sources: project
                    .sources
                    .iter()
                    .map(|s| SourceSummary::from_source(s, true))
                    .collect(),
            },
            provenance: Provenance {
                paragraphs,
                quote_mapping,
            },
            workflow: Workflow {
                transcript_length: project.transcript.chars().count(),
                key_points_extracted: !project.key_points.is_empty(),
                draft_generated: !project.draft_text.is_empty(),
                quotes_checked: !project.quote_matches.is_empty(),
                sources_attached: !project.sources.is_empty(),
            },
        })
    }

    /// Build the export stamped with the current time
    pub fn build_now(project: &Project) -> Result<Self, ProjectError> {
        Self::build(project, Utc::now())
    }
}

/// The draft as a Markdown document. Refuses a blank draft.
pub fn markdown(project: &Project) -> Result<String, ProjectError> {
    if project.draft_text.trim().is_empty() {
        return Err(ProjectError::EmptyDraft);
    }
    Ok(project.draft_text.clone())
}
