use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local};
use tracing::{error, info, warn};

use crate::{
    core::locator::ExternalOutputSet,
    error::{Result, StemError},
    types::ResultArtifact,
};

pub const ONLY_VOCALS: &str = "only_vocals.mp3";
pub const ONLY_INSTRUMENTALS: &str = "only_instrumentals.mp3";

const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Renames each stem in place to `<name>_<YYYYmmddHHMMSS>.<ext>`.
pub struct TimestampedRename {
    stamp: String,
}

impl TimestampedRename {
    pub fn now() -> Self {
        Self::at(Local::now())
    }

    pub fn at(time: DateTime<Local>) -> Self {
        Self {
            stamp: time.format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    pub fn target(&self, path: &Path) -> PathBuf {
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file_name = match path.extension() {
            Some(ext) => format!("{name}_{}.{}", self.stamp, ext.to_string_lossy()),
            None => format!("{name}_{}", self.stamp),
        };
        path.with_file_name(file_name)
    }

    /// A failed rename keeps the original path; the other stems still go through.
    pub fn apply(&self, files: &[PathBuf]) -> Vec<ResultArtifact> {
        let mut artifacts = Vec::with_capacity(files.len());
        for from in files {
            let path = self.rename_one(from);
            match ResultArtifact::inspect(&path) {
                Ok(a) => artifacts.push(a),
                Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable stem"),
            }
        }
        artifacts
    }

    fn rename_one(&self, from: &Path) -> PathBuf {
        let to = self.target(from);
        match fs::rename(from, &to) {
            Ok(()) => {
                info!(from = %from.display(), to = %to.display(), "renamed");
                to
            }
            Err(source) => {
                let err = StemError::Rename {
                    from: from.to_path_buf(),
                    to,
                    source,
                };
                error!(error = %err, "keeping original name");
                from.to_path_buf()
            }
        }
    }
}

/// Copies the vocal split to fixed names in `dest_dir`, replacing earlier
/// results, then removes the run's output root.
pub struct FixedOverwrite {
    dest_dir: PathBuf,
}

impl FixedOverwrite {
    pub fn new(dest_dir: impl Into<PathBuf>) -> Self {
        Self {
            dest_dir: dest_dir.into(),
        }
    }

    pub fn apply(
        &self,
        vocals: &Path,
        instrumentals: &Path,
        root: &Path,
    ) -> Result<Vec<ResultArtifact>> {
        let vocals_out = copy_to(vocals, &self.dest_dir.join(ONLY_VOCALS))?;
        let instrumentals_out = copy_to(instrumentals, &self.dest_dir.join(ONLY_INSTRUMENTALS))?;

        match fs::remove_dir_all(root) {
            Ok(()) => info!(dir = %root.display(), "removed temporary output"),
            Err(source) => {
                let err = StemError::Cleanup {
                    path: root.to_path_buf(),
                    source,
                };
                warn!(error = %err, "temporary output left behind");
            }
        }

        Ok(vec![
            ResultArtifact::inspect(vocals_out)?,
            ResultArtifact::inspect(instrumentals_out)?,
        ])
    }
}

fn copy_to(src: &Path, dst: &Path) -> Result<PathBuf> {
    fs::copy(src, dst).map_err(|source| StemError::Copy {
        from: src.to_path_buf(),
        to: dst.to_path_buf(),
        source,
    })?;
    info!(from = %src.display(), to = %dst.display(), "copied");
    Ok(dst.to_path_buf())
}

/// Finalize a located output set with the naming policy its mode uses.
pub fn materialize(set: &ExternalOutputSet, work_dir: &Path) -> Result<Vec<ResultArtifact>> {
    match set {
        ExternalOutputSet::Stems { files, .. } => Ok(TimestampedRename::now().apply(files)),
        ExternalOutputSet::VocalSplit {
            root,
            vocals,
            instrumentals,
        } => FixedOverwrite::new(work_dir).apply(vocals, instrumentals, root),
    }
}
