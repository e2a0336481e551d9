//! JSON-backed project store.
//!
//! All projects live in a single `projects.json` array (newest first). Every
//! mutation is a read-modify-write of the whole file under an exclusive lock
//! on `projects.lock`, written to a temporary file and renamed into place.
//! Lifecycle events go to the audit log in the same directory.
//!
//! ```text
//! ~/.quotecheck/
//! ├── projects.json   # All projects
//! ├── projects.lock   # Writer lock
//! └── events.jsonl    # Audit log
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use fs2::FileExt;
use thiserror::Error;
use tokio::fs;
use tracing::{debug, info};

use crate::domain::{
    CandidateSource, DraftVersion, KeyPoint, KeyPointMove, Project, StoryDirection,
    VerificationResult,
};
use crate::verify::Verifier;

use super::audit::{AuditEvent, AuditLog};

/// Project lookup and editing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectError {
    #[error("Project not found: {0}")]
    NotFound(String),

    #[error("Project id '{prefix}' is ambiguous ({count} projects match)")]
    AmbiguousId { prefix: String, count: usize },

    #[error("Source not found in project: {0}")]
    SourceNotFound(String),

    #[error("Key point not found in project: {0}")]
    KeyPointNotFound(String),

    #[error("Project draft is empty")]
    EmptyDraft,
}

/// File-based project store
#[derive(Debug, Clone)]
pub struct ProjectStore {
    projects_path: PathBuf,
    lock_path: PathBuf,
    audit: AuditLog,
}

impl ProjectStore {
    /// Store rooted at `dir` (created on first write)
    pub fn new(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            projects_path: dir.join("projects.json"),
            lock_path: dir.join("projects.lock"),
            audit: AuditLog::new(dir.join("events.jsonl")),
        }
    }

    /// Store in the configured quotecheck home
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(crate::config::quotecheck_home()?))
    }

    /// Path to projects.json
    pub fn projects_path(&self) -> &Path {
        &self.projects_path
    }

    /// The audit log for this store
    pub fn audit(&self) -> &AuditLog {
        &self.audit
    }

    /// Load all projects
    pub async fn list(&self) -> Result<Vec<Project>> {
        if !self.projects_path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.projects_path)
            .await
            .with_context(|| format!("Failed to read projects: {}", self.projects_path.display()))?;

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content).with_context(|| {
            format!(
                "Failed to parse projects JSON: {}",
                self.projects_path.display()
            )
        })
    }

    /// Take the writer lock. Released when the returned file is dropped.
    async fn lock(&self) -> Result<std::fs::File> {
        if let Some(parent) = self.lock_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&self.lock_path)
            .with_context(|| format!("Failed to open lock file: {}", self.lock_path.display()))?;

        // Blocking wait stays off the async workers
        tokio::task::spawn_blocking(move || -> Result<std::fs::File> {
            file.lock_exclusive()
                .context("Failed to acquire file lock on projects.lock")?;
            Ok(file)
        })
        .await
        .context("Lock task failed")?
    }

    /// Write all projects
    async fn save_all(&self, projects: &[Project]) -> Result<()> {
        if let Some(parent) = self.projects_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(projects)?;
        let tmp_path = self.projects_path.with_extension("json.tmp");

        fs::write(&tmp_path, content)
            .await
            .with_context(|| format!("Failed to write projects: {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &self.projects_path)
            .await
            .with_context(|| {
                format!(
                    "Failed to replace projects file: {}",
                    self.projects_path.display()
                )
            })?;

        debug!(count = projects.len(), "Saved projects");
        Ok(())
    }

    /// Create a project and put it at the front of the list
    pub async fn create(&self, title: Option<String>, transcript: Option<String>) -> Result<Project> {
        let _lock = self.lock().await?;
        let mut projects = self.list().await?;
        let project = Project::new(title).with_transcript(transcript.unwrap_or_default());

        projects.insert(0, project.clone());
        self.save_all(&projects).await?;

        self.audit.append(AuditEvent::ProjectCreated {
            project_id: project.id,
            title: project.title.clone(),
        })?;
        info!(project_id = %project.id, "Created project");

        Ok(project)
    }

    /// Get a project by full id or unique id prefix
    pub async fn get(&self, id: &str) -> Result<Project> {
        let projects = self.list().await?;
        let idx = find_index(&projects, id)?;
        Ok(projects[idx].clone())
    }

    /// Replace a stored project, bumping its `updated_at`
    pub async fn update(&self, project: &Project) -> Result<Project> {
        let id = project.id.to_string();
        self.modify(&id, |stored| {
            *stored = project.clone();
            Ok(())
        })
        .await
        .map(|(updated, ())| updated)
    }

    /// Remove a project
    pub async fn remove(&self, id: &str) -> Result<Project> {
        let _lock = self.lock().await?;
        let mut projects = self.list().await?;
        let idx = find_index(&projects, id)?;
        let removed = projects.remove(idx);
        self.save_all(&projects).await?;

        self.audit.append(AuditEvent::ProjectRemoved {
            project_id: removed.id,
        })?;
        info!(project_id = %removed.id, "Removed project");

        Ok(removed)
    }

    /// Apply `edit` to one project and persist it
    async fn modify<T, F>(&self, id: &str, edit: F) -> Result<(Project, T)>
    where
        F: FnOnce(&mut Project) -> Result<T>,
    {
        let _lock = self.lock().await?;
        let mut projects = self.list().await?;
        let idx = find_index(&projects, id)?;

        let project = &mut projects[idx];
        let out = edit(project)?;
        project.updated_at = Utc::now();
        let updated = project.clone();

        self.save_all(&projects).await?;
        Ok((updated, out))
    }

    /// Replace the transcript
    pub async fn set_transcript(&self, id: &str, transcript: String) -> Result<Project> {
        self.modify(id, |p| {
            p.transcript = transcript;
            Ok(())
        })
        .await
        .map(|(p, ())| p)
    }

    /// Replace the draft text
    pub async fn set_draft(&self, id: &str, draft: String) -> Result<Project> {
        self.modify(id, |p| {
            p.draft_text = draft;
            Ok(())
        })
        .await
        .map(|(p, ())| p)
    }

    /// Append a supporting source, assigning an id when the given one is
    /// blank or already taken. A blank display name becomes the id.
    pub async fn add_source(&self, id: &str, mut source: CandidateSource) -> Result<CandidateSource> {
        self.modify(id, |p| {
            if source.id.trim().is_empty()
                || source.is_transcript()
                || p.sources.iter().any(|s| s.id == source.id)
            {
                source.id = p.next_source_id();
            }
            if source.display_name.trim().is_empty() {
                source.display_name = source.id.clone();
            }
            p.sources.push(source.clone());
            Ok(source)
        })
        .await
        .map(|(_, source)| source)
    }

    /// Remove a supporting source by id
    pub async fn remove_source(&self, id: &str, source_id: &str) -> Result<CandidateSource> {
        self.modify(id, |p| {
            let pos = p
                .sources
                .iter()
                .position(|s| s.id == source_id)
                .ok_or_else(|| ProjectError::SourceNotFound(source_id.to_string()))?;
            Ok(p.sources.remove(pos))
        })
        .await
        .map(|(_, source)| source)
    }

    /// Replace the story direction
    pub async fn set_direction(&self, id: &str, direction: StoryDirection) -> Result<Project> {
        self.modify(id, |p| {
            p.direction = direction;
            Ok(())
        })
        .await
        .map(|(p, ())| p)
    }

    /// Append a key point
    pub async fn add_key_point(
        &self,
        id: &str,
        text: String,
        source: Option<String>,
    ) -> Result<KeyPoint> {
        self.modify(id, |p| Ok(p.add_key_point(text, source).clone()))
            .await
            .map(|(_, key_point)| key_point)
    }

    /// Replace a key point's text
    pub async fn edit_key_point(&self, id: &str, key_point_id: &str, text: String) -> Result<KeyPoint> {
        self.modify(id, |p| {
            p.edit_key_point(key_point_id, text)
                .cloned()
                .ok_or_else(|| ProjectError::KeyPointNotFound(key_point_id.to_string()).into())
        })
        .await
        .map(|(_, key_point)| key_point)
    }

    /// Move a key point one place up or down, renumbering `order`
    pub async fn move_key_point(
        &self,
        id: &str,
        key_point_id: &str,
        direction: KeyPointMove,
    ) -> Result<Project> {
        self.modify(id, |p| {
            p.move_key_point(key_point_id, direction)
                .ok_or_else(|| ProjectError::KeyPointNotFound(key_point_id.to_string()))?;
            Ok(())
        })
        .await
        .map(|(p, ())| p)
    }

    /// Remove a key point, renumbering the rest
    pub async fn remove_key_point(&self, id: &str, key_point_id: &str) -> Result<KeyPoint> {
        self.modify(id, |p| {
            p.remove_key_point(key_point_id)
                .ok_or_else(|| ProjectError::KeyPointNotFound(key_point_id.to_string()).into())
        })
        .await
        .map(|(_, key_point)| key_point)
    }

    /// Snapshot the current draft as a named version
    pub async fn add_version(&self, id: &str, label: &str) -> Result<DraftVersion> {
        let (project, version) = self
            .modify(id, |p| Ok(p.push_version(label).clone()))
            .await?;

        self.audit.append(AuditEvent::VersionSaved {
            project_id: project.id,
            version_id: version.id,
            label: version.label.clone(),
        })?;

        Ok(version)
    }

    /// Store the results of a quote check on the project
    pub async fn record_verification(
        &self,
        id: &str,
        results: Vec<VerificationResult>,
    ) -> Result<Project> {
        let quote_count = results.len();
        let matched_count = results.iter().filter(|r| r.matched).count();
        let approximate_count = results.iter().filter(|r| r.is_approximate()).count();

        let (project, ()) = self
            .modify(id, |p| {
                p.quote_matches = results;
                Ok(())
            })
            .await?;

        self.audit.append(AuditEvent::QuotesChecked {
            project_id: project.id,
            quote_count,
            matched_count,
            approximate_count,
        })?;

        Ok(project)
    }

    /// Verify the project's draft and store the results
    pub async fn check_quotes(&self, id: &str, verifier: &Verifier) -> Result<Project> {
        let project = self.get(id).await?;
        if project.draft_text.trim().is_empty() {
            return Err(ProjectError::EmptyDraft.into());
        }

        let results = verifier.verify(&project.draft_text, &project.transcript, &project.sources);
        self.record_verification(&project.id.to_string(), results).await
    }
}

/// Resolve a full id or unique prefix to an index
fn find_index(projects: &[Project], id: &str) -> Result<usize, ProjectError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ProjectError::NotFound(id.to_string()));
    }

    let matches: Vec<usize> = projects
        .iter()
        .enumerate()
        .filter(|(_, p)| p.id.to_string().starts_with(id))
        .map(|(i, _)| i)
        .collect();

    match matches.as_slice() {
        [] => Err(ProjectError::NotFound(id.to_string())),
        [idx] => Ok(*idx),
        _ => Err(ProjectError::AmbiguousId {
            prefix: id.to_string(),
            count: matches.len(),
        }),
    }
}
