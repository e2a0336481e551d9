//! Append-only audit log of project activity.
//!
//! Events are stored as newline-delimited JSON (JSONL), one object per line
//! with an RFC 3339 `ts` field and a `type` tag. Appends take an exclusive
//! file lock so concurrent CLI invocations never interleave lines.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Project activity recorded in events.jsonl
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AuditEvent {
    ProjectCreated {
        project_id: Uuid,
        title: String,
    },
    ProjectRemoved {
        project_id: Uuid,
    },
    VersionSaved {
        project_id: Uuid,
        version_id: Uuid,
        label: String,
    },
    /// A quote check ran against a project's draft
    QuotesChecked {
        project_id: Uuid,
        quote_count: usize,
        matched_count: usize,
        approximate_count: usize,
    },
}

/// A logged event with its timestamp
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub ts: DateTime<Utc>,
    #[serde(flatten)]
    pub event: AuditEvent,
}

/// JSONL audit log
#[derive(Debug, Clone)]
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    /// Open (without creating) the log at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path to the events file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append an event with the current timestamp
    pub fn append(&self, event: AuditEvent) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open events file: {}", self.path.display()))?;

        file.lock_exclusive()
            .context("Failed to acquire file lock on events.jsonl")?;

        let entry = AuditEntry {
            ts: Utc::now(),
            event,
        };
        let json = serde_json::to_string(&entry).context("Failed to serialize event")?;

        writeln!(file, "{}", json).context("Failed to write event")?;
        file.flush().context("Failed to flush event")?;

        // Lock is released when file is dropped
        Ok(())
    }

    /// Replay all events in order
    pub fn replay(&self) -> Result<Vec<AuditEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open events file: {}", self.path.display()))?;

        let mut entries = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let entry: AuditEntry = serde_json::from_str(&line)
                .with_context(|| format!("Failed to parse event line: {}", line))?;
            entries.push(entry);
        }

        Ok(entries)
    }
}
