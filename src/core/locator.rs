use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, error};

use crate::{
    error::{Result, StemError},
    types::Mode,
};

const FINALIZED_STAMP_LEN: usize = 14;

/// Files the separation tool produced for one input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExternalOutputSet {
    Stems {
        dir: PathBuf,
        files: Vec<PathBuf>,
    },
    VocalSplit {
        /// Whole output root used for this run; removed once results are copied out.
        root: PathBuf,
        vocals: PathBuf,
        instrumentals: PathBuf,
    },
}

/// Where and how the external tool names its outputs.
#[derive(Clone, Debug)]
pub struct OutputLayout {
    pub audio_extensions: Vec<String>,
    pub vocals_marker: String,
    pub instrumentals_marker: String,
    /// Leave `<name>_<YYYYmmddHHMMSS>.<ext>` files from earlier runs alone.
    pub skip_finalized: bool,
}

impl Default for OutputLayout {
    fn default() -> Self {
        Self {
            audio_extensions: vec!["wav".into(), "mp3".into()],
            vocals_marker: "vocals".into(),
            instrumentals_marker: "no_vocals".into(),
            skip_finalized: true,
        }
    }
}

impl OutputLayout {
    pub fn expected_dir(&self, output_root: &Path, model_name: &str, base_name: &str) -> PathBuf {
        output_root.join(model_name).join(base_name)
    }

    pub fn locate(
        &self,
        output_root: &Path,
        model_name: &str,
        base_name: &str,
        mode: Mode,
    ) -> Result<ExternalOutputSet> {
        let dir = self.expected_dir(output_root, model_name, base_name);
        if !dir.is_dir() {
            error!(dir = %dir.display(), "output directory not found");
            return Err(StemError::OutputNotFound { dir });
        }

        let files = self.audio_files(&dir)?;
        debug!(dir = %dir.display(), count = files.len(), "found audio files");

        match mode {
            Mode::MultiStem => Ok(ExternalOutputSet::Stems { dir, files }),
            Mode::TwoStem => {
                let (vocals, instrumentals) = self.split_roles(&files);
                let vocals = vocals.ok_or_else(|| StemError::IncompleteOutput {
                    dir: dir.clone(),
                    role: "vocals",
                })?;
                let instrumentals = instrumentals.ok_or_else(|| StemError::IncompleteOutput {
                    dir: dir.clone(),
                    role: "instrumentals",
                })?;
                Ok(ExternalOutputSet::VocalSplit {
                    root: output_root.to_path_buf(),
                    vocals,
                    instrumentals,
                })
            }
        }
    }

    fn audio_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && self.is_audio(&path) && !self.is_finalized(&path) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    fn is_audio(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| {
                self.audio_extensions
                    .iter()
                    .any(|a| a.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }

    fn is_finalized(&self, path: &Path) -> bool {
        if !self.skip_finalized {
            return false;
        }
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy())
            .unwrap_or_default();
        match stem.rsplit_once('_') {
            Some((name, stamp)) => {
                !name.is_empty()
                    && stamp.len() == FINALIZED_STAMP_LEN
                    && stamp.bytes().all(|b| b.is_ascii_digit())
            }
            None => false,
        }
    }

    fn split_roles(&self, files: &[PathBuf]) -> (Option<PathBuf>, Option<PathBuf>) {
        let mut vocals = None;
        let mut instrumentals = None;
        for path in files {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy())
                .unwrap_or_default();
            if name.contains(self.instrumentals_marker.as_str()) {
                instrumentals.get_or_insert_with(|| path.clone());
            } else if name.contains(self.vocals_marker.as_str()) {
                vocals.get_or_insert_with(|| path.clone());
            }
        }
        (vocals, instrumentals)
    }
}
