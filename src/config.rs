// Configuration for pdf2txt: defaults, TOML file, env and CLI overrides
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// What the batch does after a document fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Log the failure and convert the remaining documents
    #[default]
    Continue,
    /// Stop at the first failed document
    Abort,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory scanned for documents
    pub source_dir: PathBuf,
    /// Directory receiving one `.txt` per document
    pub dest_dir: PathBuf,
    pub on_error: ErrorPolicy,
    /// File extension (without the dot) that marks a document
    pub extension: String,
    /// Worker threads; 1 keeps processing strictly sequential
    pub jobs: usize,
    pub recursive: bool,
    pub create_dest_dir: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("."),
            dest_dir: PathBuf::from("."),
            on_error: ErrorPolicy::default(),
            extension: "pdf".to_string(),
            jobs: 1,
            recursive: false,
            create_dest_dir: false,
        }
    }
}

impl Config {
    pub fn new(source_dir: impl Into<PathBuf>, dest_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            dest_dir: dest_dir.into(),
            ..Self::default()
        }
    }

    pub fn with_policy(mut self, on_error: ErrorPolicy) -> Self {
        self.on_error = on_error;
        self
    }

    pub fn from_toml_str(path: &Path, content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(path, &content)
    }

    /// Load the file named explicitly, else the per-user default if present,
    /// else built-in defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load(path),
            None => match default_config_path() {
                Some(path) if path.is_file() => {
                    tracing::debug!(path = %path.display(), "using default config file");
                    Self::load(&path)
                }
                _ => Ok(Self::default()),
            },
        }
    }

    /// Check invariants and canonicalize the extension (`.PDF` -> `PDF`).
    pub fn validate(mut self) -> Result<Self, ConfigError> {
        if self.jobs == 0 {
            return Err(ConfigError::Invalid("jobs must be at least 1".into()));
        }
        let ext = self.extension.trim().trim_start_matches('.');
        if ext.is_empty() {
            return Err(ConfigError::Invalid("extension must not be empty".into()));
        }
        self.extension = ext.to_string();
        Ok(self)
    }
}

/// `<config dir>/pdf2txt/config.toml`. `PDF2TXT_CONFIG` is resolved by the CLI
/// and arrives here as the explicit path.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("pdf2txt").join("config.toml"))
}
