use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

use crate::error::Result;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Separation granularity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Mode {
    /// Six instrument stems from `htdemucs_6s`.
    #[value(name = "multi")]
    MultiStem,
    /// Vocals plus everything else from `htdemucs`.
    #[value(name = "two")]
    TwoStem,
}

impl Mode {
    pub fn model_name(self) -> &'static str {
        match self {
            Mode::MultiStem => "htdemucs_6s",
            Mode::TwoStem => "htdemucs",
        }
    }

    /// Directory (relative to the working directory) the external tool writes into.
    pub fn output_root_name(self) -> &'static str {
        match self {
            Mode::MultiStem => "stem_outputs",
            Mode::TwoStem => "temp_separation",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::MultiStem => "multi-stem",
            Mode::TwoStem => "two-stem",
        })
    }
}

/// What the user asked us to separate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputReference {
    Url(String),
    Path(PathBuf),
}

impl InputReference {
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            InputReference::Url(raw.to_string())
        } else {
            InputReference::Path(PathBuf::from(raw))
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, InputReference::Url(_))
    }
}

impl fmt::Display for InputReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputReference::Url(u) => f.write_str(u),
            InputReference::Path(p) => write!(f, "{}", p.display()),
        }
    }
}

/// Local audio file handed to the separation tool.
#[derive(Debug)]
pub struct StagingArtifact {
    pub path: PathBuf,
    pub origin: StagingOrigin,
}

#[derive(Debug)]
pub enum StagingOrigin {
    /// Supplied by the user; never deleted.
    Local,
    /// Fetched for this run into its own staging directory.
    Downloaded(TempDir),
}

impl StagingArtifact {
    pub fn local(path: PathBuf) -> Self {
        Self {
            path,
            origin: StagingOrigin::Local,
        }
    }

    pub fn downloaded(path: PathBuf, dir: TempDir) -> Self {
        Self {
            path,
            origin: StagingOrigin::Downloaded(dir),
        }
    }

    pub fn is_downloaded(&self) -> bool {
        matches!(self.origin, StagingOrigin::Downloaded(_))
    }

    /// File name without extension; names the tool's per-input output directory.
    pub fn base_name(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "output".into())
    }
}

/// One finalized output file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultArtifact {
    pub path: PathBuf,
    pub size_bytes: u64,
}

impl ResultArtifact {
    pub fn inspect(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let size_bytes = fs::metadata(&path)?.len();
        Ok(Self { path, size_bytes })
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn directory(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    pub fn size_mb(&self) -> f64 {
        self.size_bytes as f64 / BYTES_PER_MB
    }
}
