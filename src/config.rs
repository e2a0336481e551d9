//! Configuration for quotecheck.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (QUOTECHECK_HOME)
//! 2. Config file (.quotecheck/config.yaml)
//! 3. Defaults (~/.quotecheck, engine defaults)
//!
//! Config file discovery:
//! - Searches current directory and parents for .quotecheck/config.yaml
//! - `paths.home` is relative to the .quotecheck/ directory

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::core::InputLimits;
use crate::verify::VerifierSettings;

/// Environment variable overriding the home directory
pub const HOME_ENV: &str = "QUOTECHECK_HOME";

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub verification: Option<VerifierSettings>,
    #[serde(default)]
    pub limits: Option<InputLimits>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// Store directory (relative to the .quotecheck/ directory)
    pub home: Option<String>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Directory holding projects.json and events.jsonl
    pub home: PathBuf,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
    /// Engine tunables
    pub verification: VerifierSettings,
    /// Limits for loading inputs from disk
    pub limits: InputLimits,
}

/// Find config file by searching `start` and its parents
fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let config_path = current.join(".quotecheck").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to `base`
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Load configuration, searching for a config file from `start`
fn load_config_from(start: &Path, env_home: Option<PathBuf>) -> Result<ResolvedConfig> {
    let config_file = find_config_file(start);
    let parsed = match config_file {
        Some(ref path) => Some(load_config_file(path)?),
        None => None,
    };

    let home = match (env_home, &parsed, &config_file) {
        (Some(home), _, _) => home,
        (None, Some(ConfigFile { paths: PathsConfig { home: Some(home) }, .. }), Some(path)) => {
            let config_dir = path.parent().unwrap_or(Path::new("."));
            resolve_path(config_dir, home)
        }
        _ => default_home()?,
    };

    let (verification, limits) = match parsed {
        Some(config) => (
            config.verification.unwrap_or_default(),
            config.limits.unwrap_or_default(),
        ),
        None => (VerifierSettings::default(), InputLimits::default()),
    };

    Ok(ResolvedConfig {
        home,
        config_file,
        verification,
        limits,
    })
}

fn default_home() -> Result<PathBuf> {
    Ok(dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(".quotecheck"))
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    let env_home = std::env::var(HOME_ENV).ok().map(PathBuf::from);
    load_config_from(&cwd, env_home)
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| format!("{:#}", e)));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Get the quotecheck home directory (project store).
pub fn quotecheck_home() -> Result<PathBuf> {
    Ok(config()?.home.clone())
}
