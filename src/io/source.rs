use std::path::{Path, PathBuf};

use reqwest::Url;
use tempfile::Builder;
use tracing::{error, info};

use crate::{
    config::SplitterConfig,
    error::{Result, StemError},
    io::net::{download_to, http_client},
    types::{InputReference, StagingArtifact},
};

pub const DEFAULT_DOWNLOAD_NAME: &str = "downloaded_audio.mp3";

/// Turn a user reference into a local file the separation tool can read.
///
/// Local paths are returned unchanged when they exist. URLs are streamed into
/// a fresh `.stem-download-*` directory under the working directory, keeping
/// the file name from the URL path.
pub fn resolve(reference: &InputReference, cfg: &SplitterConfig) -> Result<StagingArtifact> {
    match reference {
        InputReference::Path(path) => resolve_local(path),
        InputReference::Url(url) => fetch(url, cfg).map_err(|e| {
            error!(url = %url, error = %e, "error downloading audio");
            match e {
                StemError::Anyhow(source) => StemError::Download {
                    url: url.clone(),
                    source,
                },
                other => StemError::Download {
                    url: url.clone(),
                    source: other.into(),
                },
            }
        }),
    }
}

fn resolve_local(path: &Path) -> Result<StagingArtifact> {
    if path.exists() {
        Ok(StagingArtifact::local(path.to_path_buf()))
    } else {
        error!(path = %path.display(), "local file not found");
        Err(StemError::NotFound {
            path: path.to_path_buf(),
        })
    }
}

fn fetch(url: &str, cfg: &SplitterConfig) -> Result<StagingArtifact> {
    info!(url, "downloading audio");

    let name = download_file_name(url);
    let dir = Builder::new()
        .prefix(".stem-download-")
        .tempdir_in(&cfg.work_dir)?;
    let dest = dir.path().join(&name);

    let client = http_client(cfg)?;
    let bytes = download_to(&client, url, &dest)?;

    info!(path = %dest.display(), bytes, "downloaded");
    Ok(StagingArtifact::downloaded(dest, dir))
}

/// Last path segment of the URL, or [`DEFAULT_DOWNLOAD_NAME`] when it has no
/// usable name or no extension.
pub fn download_file_name(url: &str) -> PathBuf {
    let segment = Url::parse(url).ok().and_then(|u| {
        u.path_segments()
            .and_then(|mut s| s.next_back().map(str::to_owned))
    });

    match segment {
        Some(name) if !name.is_empty() && name.contains('.') => PathBuf::from(name),
        _ => PathBuf::from(DEFAULT_DOWNLOAD_NAME),
    }
}
