//! Editorial projects.
//!
//! A project bundles everything the verification workflow touches: the
//! interview transcript, supporting sources, the draft and the results of the
//! last quote check. Drafts can be snapshotted into a bounded version history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::source::CandidateSource;
use super::verification::VerificationResult;

/// Maximum number of draft versions kept per project
pub const MAX_VERSIONS: usize = 10;

/// Default title for new projects
pub const DEFAULT_TITLE: &str = "Untitled Project";

/// Writing tone requested for the draft
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tone {
    #[default]
    Neutral,
    Storytelling,
    PressRelease,
}

/// Target draft length
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoryLength {
    Short,
    #[default]
    Medium,
    Long,
}

/// Editorial direction for the draft
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryDirection {
    pub tone: Tone,
    pub length: StoryLength,
    #[serde(default)]
    pub angle: String,
}

impl StoryDirection {
    /// Named starting points for common story types
    pub fn preset(preset: DirectionPreset) -> Self {
        let (tone, length, angle) = match preset {
            DirectionPreset::FounderStory => (
                Tone::Storytelling,
                StoryLength::Medium,
                "Focus on the personal journey, challenges overcome, and the human side of innovation. Emphasize the founder's vision and determination.",
            ),
            DirectionPreset::TechnicalDeepDive => (
                Tone::Neutral,
                StoryLength::Long,
                "Emphasize technical architecture, implementation details, and engineering challenges. Focus on the technical innovation and its implications.",
            ),
            DirectionPreset::PressRelease => (
                Tone::PressRelease,
                StoryLength::Short,
                "Highlight key achievements, market impact, and future plans. Use formal language suitable for media distribution.",
            ),
            DirectionPreset::UserImpact => (
                Tone::Storytelling,
                StoryLength::Medium,
                "Focus on how the innovation affects end users, real-world applications, and the broader impact on people's lives.",
            ),
        };
        Self {
            tone,
            length,
            angle: angle.to_string(),
        }
    }
}

/// Preset story directions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionPreset {
    FounderStory,
    TechnicalDeepDive,
    PressRelease,
    UserImpact,
}

/// Direction to move a key point in the list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPointMove {
    Up,
    Down,
}

/// A key point pulled out of the transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPoint {
    pub id: String,
    pub text: String,
    pub order: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Snapshot of a draft at a point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftVersion {
    pub id: Uuid,
    pub label: String,
    pub created_at: DateTime<Utc>,
    pub draft_text: String,
    #[serde(default)]
    pub key_points: Vec<KeyPoint>,
    #[serde(default)]
    pub direction: StoryDirection,
}

/// An editorial project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Unique project identifier
    pub id: Uuid,

    /// Human-readable title
    pub title: String,

    /// Interview transcript, always checked first
    #[serde(default)]
    pub transcript: String,

    /// Supporting sources in priority order
    #[serde(default)]
    pub sources: Vec<CandidateSource>,

    #[serde(default)]
    pub key_points: Vec<KeyPoint>,

    #[serde(default)]
    pub direction: StoryDirection,

    #[serde(default)]
    pub draft_text: String,

    /// Results of the most recent quote check
    #[serde(default)]
    pub quote_matches: Vec<VerificationResult>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Draft snapshots, newest first
    #[serde(default)]
    pub versions: Vec<DraftVersion>,
}

impl Project {
    /// Create a new empty project
    pub fn new(title: Option<String>) -> Self {
        let now = Utc::now();
        let title = title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());

        Self {
            id: Uuid::new_v4(),
            title,
            transcript: String::new(),
            sources: Vec::new(),
            key_points: Vec::new(),
            direction: StoryDirection::default(),
            draft_text: String::new(),
            quote_matches: Vec::new(),
            created_at: now,
            updated_at: now,
            versions: Vec::new(),
        }
    }

    /// Set the transcript
    pub fn with_transcript(mut self, transcript: impl Into<String>) -> Self {
        self.transcript = transcript.into();
        self
    }

    /// Snapshot the current draft, keeping the newest `MAX_VERSIONS`
    pub fn push_version(&mut self, label: impl Into<String>) -> &DraftVersion {
        let version = DraftVersion {
            id: Uuid::new_v4(),
            label: label.into(),
            created_at: Utc::now(),
            draft_text: self.draft_text.clone(),
            key_points: self.key_points.clone(),
            direction: self.direction.clone(),
        };
        self.versions.insert(0, version);
        self.versions.truncate(MAX_VERSIONS);
        self.updated_at = Utc::now();
        &self.versions[0]
    }

    /// Next free id for a supporting source
    pub fn next_source_id(&self) -> String {
        let mut n = self.sources.len() + 1;
        loop {
            let id = format!("source-{}", n);
            if !self.sources.iter().any(|s| s.id == id) {
                return id;
            }
            n += 1;
        }
    }

    /// Append a key point at the end of the list
    pub fn add_key_point(&mut self, text: impl Into<String>, source: Option<String>) -> &KeyPoint {
        let mut n = self.key_points.len() + 1;
        let id = loop {
            let id = format!("kp-{}", n);
            if !self.key_points.iter().any(|k| k.id == id) {
                break id;
            }
            n += 1;
        };

        self.key_points.push(KeyPoint {
            id,
            text: text.into(),
            order: self.key_points.len() as u32,
            source,
        });
        &self.key_points[self.key_points.len() - 1]
    }

    /// Replace the text of a key point. `None` if no key point has `id`.
    pub fn edit_key_point(&mut self, id: &str, text: impl Into<String>) -> Option<&KeyPoint> {
        let key_point = self.key_points.iter_mut().find(|k| k.id == id)?;
        key_point.text = text.into();
        Some(key_point)
    }

    /// Swap a key point with its neighbour. Moving past either end is a no-op.
    pub fn move_key_point(&mut self, id: &str, direction: KeyPointMove) -> Option<usize> {
        let current = self.key_points.iter().position(|k| k.id == id)?;
        let target = match direction {
            KeyPointMove::Up => current.checked_sub(1),
            KeyPointMove::Down => Some(current + 1).filter(|&i| i < self.key_points.len()),
        };

        if let Some(target) = target {
            self.key_points.swap(current, target);
            self.renumber_key_points();
            return Some(target);
        }
        Some(current)
    }

    /// Remove a key point and close the gap in `order`
    pub fn remove_key_point(&mut self, id: &str) -> Option<KeyPoint> {
        let pos = self.key_points.iter().position(|k| k.id == id)?;
        let removed = self.key_points.remove(pos);
        self.renumber_key_points();
        Some(removed)
    }

    fn renumber_key_points(&mut self) {
        for (i, key_point) in self.key_points.iter_mut().enumerate() {
            key_point.order = i as u32;
        }
    }

    /// Number of quotes in the last check that matched a source
    pub fn matched_quote_count(&self) -> usize {
        self.quote_matches.iter().filter(|m| m.matched).count()
    }
}
