//! Candidate sources that quotes are verified against.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Reserved id of the interview transcript candidate
pub const TRANSCRIPT_SOURCE_ID: &str = "transcript";

/// Display name of the interview transcript candidate
pub const TRANSCRIPT_SOURCE_NAME: &str = "Interview Transcript";

/// Where a candidate source came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// The interview transcript
    Transcript,

    /// Text extracted from a PDF
    Pdf,

    /// Text fetched from a web page
    Url,

    /// Plain text supplied directly
    Text,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Transcript => write!(f, "transcript"),
            SourceKind::Pdf => write!(f, "pdf"),
            SourceKind::Url => write!(f, "url"),
            SourceKind::Text => write!(f, "text"),
        }
    }
}

impl std::str::FromStr for SourceKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "transcript" => Ok(SourceKind::Transcript),
            "pdf" => Ok(SourceKind::Pdf),
            "url" | "web" => Ok(SourceKind::Url),
            "text" | "txt" => Ok(SourceKind::Text),
            _ => anyhow::bail!("Unknown source kind: {}", s),
        }
    }
}

/// A named text that quotes are checked against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSource {
    /// Unique identifier
    pub id: String,

    /// Human-readable name shown next to verified quotes
    pub display_name: String,

    /// Full text content
    pub content: String,

    /// Origin of the content
    pub kind: SourceKind,

    /// Original location for URL sources
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl CandidateSource {
    /// Create a new candidate source
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        content: impl Into<String>,
        kind: SourceKind,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            content: content.into(),
            kind,
            url: None,
        }
    }

    /// The reserved interview transcript candidate
    pub fn transcript(content: impl Into<String>) -> Self {
        Self::new(
            TRANSCRIPT_SOURCE_ID,
            TRANSCRIPT_SOURCE_NAME,
            content,
            SourceKind::Transcript,
        )
    }

    /// Attach the original URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Whether this is the reserved transcript candidate
    pub fn is_transcript(&self) -> bool {
        self.id == TRANSCRIPT_SOURCE_ID
    }

    /// SHA256 of the content, hex encoded with prefix
    pub fn content_sha256(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.content.as_bytes());
        format!("sha256:{}", hex::encode(hasher.finalize()))
    }
}
