use std::fs;

use tracing::{info, warn};

use crate::{
    error::StemError,
    types::{StagingArtifact, StagingOrigin},
};

/// Delete the staged input if this run downloaded it. Failures only warn.
pub fn cleanup(staging: StagingArtifact) {
    let StagingOrigin::Downloaded(dir) = staging.origin else {
        return;
    };

    if staging.path.exists() {
        match fs::remove_file(&staging.path) {
            Ok(()) => info!(path = %staging.path.display(), "cleaned up downloaded file"),
            Err(source) => {
                let err = StemError::Cleanup {
                    path: staging.path.clone(),
                    source,
                };
                warn!(error = %err, "could not clean up file");
            }
        }
    }

    let dir_path = dir.path().to_path_buf();
    if let Err(source) = dir.close() {
        let err = StemError::Cleanup {
            path: dir_path,
            source,
        };
        warn!(error = %err, "could not remove staging directory");
    }
}
