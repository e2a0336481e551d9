//! Input limits for loading drafts, transcripts and sources from disk.
//!
//! Guards the engine against:
//! - Oversized inputs
//! - Files that look like secrets (denylist glob patterns)

use std::path::Path;

use glob::Pattern;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Limits applied to every text loaded for verification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputLimits {
    /// Maximum size of a single input in bytes (default: 10MB)
    #[serde(default = "default_max_input_bytes")]
    pub max_input_bytes: u64,

    /// Glob patterns to reject (files matching these won't be read)
    #[serde(default = "default_denylist")]
    pub denylist_patterns: Vec<String>,
}

fn default_max_input_bytes() -> u64 {
    10 * 1024 * 1024
} // 10MB

fn default_denylist() -> Vec<String> {
    vec![
        "**/.env*".to_string(),
        "**/secrets*".to_string(),
        "**/*credential*".to_string(),
        "**/*.pem".to_string(),
        "**/*.key".to_string(),
    ]
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            max_input_bytes: default_max_input_bytes(),
            denylist_patterns: default_denylist(),
        }
    }
}

impl InputLimits {
    /// Check if an input path matches any denylist pattern
    pub fn is_denylisted(&self, path: &str) -> bool {
        self.denylist_patterns
            .iter()
            .filter_map(|p| Pattern::new(p).ok())
            .any(|pattern| pattern.matches(path))
    }

    /// Check a path before reading it
    pub fn validate_path(&self, path: &Path) -> Result<(), LimitViolation> {
        let path_str = path.to_string_lossy();
        if self.is_denylisted(&path_str) {
            return Err(LimitViolation::DenylistMatch {
                path: path_str.to_string(),
            });
        }
        Ok(())
    }

    /// Check a size in bytes against `max_input_bytes`
    pub fn validate_size(&self, size: u64) -> Result<(), LimitViolation> {
        if size > self.max_input_bytes {
            return Err(LimitViolation::MaxInputBytes {
                actual: size,
                limit: self.max_input_bytes,
            });
        }
        Ok(())
    }

    /// Validate input against size limits and denylist
    pub fn validate_input(&self, input: &str, source_path: Option<&Path>) -> Result<(), LimitViolation> {
        self.validate_size(input.len() as u64)?;

        if let Some(path) = source_path {
            self.validate_path(path)?;
        }

        Ok(())
    }
}

/// Input limit violations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LimitViolation {
    #[error("Maximum input bytes exceeded: {actual} > {limit}")]
    MaxInputBytes { actual: u64, limit: u64 },

    #[error("Path matches denylist pattern: {path}")]
    DenylistMatch { path: String },
}
