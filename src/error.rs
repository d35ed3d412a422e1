// Error types for pdf2txt
use std::io;
use std::path::{Path, PathBuf};

/// Failure converting a single document, or preparing the batch around it.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("PDF error in {}{}: {source}", .path.display(), page_suffix(.page))]
    Parse {
        path: PathBuf,
        page: Option<u32>,
        #[source]
        source: lopdf::Error,
    },

    #[error("IO error: failed to {action} {}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        action: &'static str,
        #[source]
        source: io::Error,
    },
}

fn page_suffix(page: &Option<u32>) -> String {
    match page {
        Some(n) => format!(" (page {})", n),
        None => String::new(),
    }
}

impl ExtractError {
    pub fn parse(path: &Path, source: lopdf::Error) -> Self {
        Self::Parse { path: path.to_path_buf(), page: None, source }
    }

    pub fn page(path: &Path, page: u32, source: lopdf::Error) -> Self {
        Self::Parse { path: path.to_path_buf(), page: Some(page), source }
    }

    pub fn fs(path: &Path, action: &'static str, source: io::Error) -> Self {
        Self::Filesystem { path: path.to_path_buf(), action, source }
    }

    /// Short tag used in reports: `parse` or `filesystem`.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Parse { .. } => "parse",
            Self::Filesystem { .. } => "filesystem",
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Parse { path, .. } | Self::Filesystem { path, .. } => path,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid TOML in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}
