use std::{path::PathBuf, process::ExitStatus};

use thiserror::Error;

/// Central error type for the stem-splitter-cli crate.
#[derive(Debug, Error)]
pub enum StemError {
    // Generic fallback (wraps anyhow)
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Resolve stage
    #[error("Failed to download {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Local file not found: {}", path.display())]
    NotFound { path: PathBuf },

    // Separate stage
    #[error("Separation tool failed ({status}): {stderr}")]
    Separation { status: String, stderr: String },

    #[error("Could not launch separation tool `{program}`: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    // Locate stage
    #[error("Output directory not found: {}", dir.display())]
    OutputNotFound { dir: PathBuf },

    #[error("No {role} file found in {}", dir.display())]
    IncompleteOutput { dir: PathBuf, role: &'static str },

    // Materialize stage
    #[error("Error renaming {} -> {}: {source}", from.display(), to.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error copying {} -> {}: {source}", from.display(), to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not clean up {}: {source}", path.display())]
    Cleanup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No stems were generated")]
    NoArtifacts,
}

impl StemError {
    pub(crate) fn separation(status: ExitStatus, stderr: &[u8]) -> Self {
        StemError::Separation {
            status: status.to_string(),
            stderr: String::from_utf8_lossy(stderr).trim().to_string(),
        }
    }
}

impl From<reqwest::Error> for StemError {
    fn from(e: reqwest::Error) -> Self {
        StemError::Anyhow(e.into())
    }
}

pub type Result<T> = std::result::Result<T, StemError>;
