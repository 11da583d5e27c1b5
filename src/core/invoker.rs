use std::{
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use tracing::{debug, error, info};

use crate::{
    error::{Result, StemError},
    types::Mode,
};

/// Something that splits `input` into stems below `output_root`.
///
/// Implementations must follow the Demucs layout:
/// `<output_root>/<model>/<input base name>/<stem>.<ext>`.
pub trait Separator {
    fn separate(&self, input: &Path, mode: Mode, output_root: &Path) -> Result<()>;
}

impl<T: Separator + ?Sized> Separator for &T {
    fn separate(&self, input: &Path, mode: Mode, output_root: &Path) -> Result<()> {
        (**self).separate(input, mode, output_root)
    }
}

/// Runs the `demucs` command line tool and waits for it to exit.
pub struct DemucsCommand {
    program: PathBuf,
}

impl DemucsCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn args(input: &Path, mode: Mode, output_root: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-o".into(),
            output_root.into(),
            "-n".into(),
            mode.model_name().into(),
        ];
        if mode == Mode::TwoStem {
            args.push("--two-stems=vocals".into());
        }
        args.push("--mp3".into());
        args.push(input.into());
        args
    }
}

impl Separator for DemucsCommand {
    fn separate(&self, input: &Path, mode: Mode, output_root: &Path) -> Result<()> {
        if !output_root.exists() {
            info!(dir = %output_root.display(), "creating output directory");
        }
        fs::create_dir_all(output_root)?;

        let args = Self::args(input, mode, output_root);
        info!(
            program = %self.program.display(),
            args = ?args,
            "running separation"
        );

        // No timeout: blocks until the tool exits.
        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|source| StemError::Launch {
                program: self.program.display().to_string(),
                source,
            })?;

        if !output.status.success() {
            let err = StemError::separation(output.status, &output.stderr);
            error!(error = %err, "separation failed");
            return Err(err);
        }

        info!("separation completed");
        debug!(stdout = %String::from_utf8_lossy(&output.stdout), "separation output");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strs(args: &[OsString]) -> Vec<String> {
        args.iter().map(|a| a.to_string_lossy().into_owned()).collect()
    }

    #[test]
    fn multi_stem_args_select_six_stem_model() {
        let args = DemucsCommand::args(Path::new("song.mp3"), Mode::MultiStem, Path::new("out"));
        assert_eq!(
            strs(&args),
            ["-o", "out", "-n", "htdemucs_6s", "--mp3", "song.mp3"]
        );
    }

    #[test]
    fn two_stem_args_request_vocals_split() {
        let args = DemucsCommand::args(Path::new("song.mp3"), Mode::TwoStem, Path::new("tmp"));
        assert_eq!(
            strs(&args),
            [
                "-o",
                "tmp",
                "-n",
                "htdemucs",
                "--two-stems=vocals",
                "--mp3",
                "song.mp3"
            ]
        );
    }

    #[test]
    fn missing_program_is_a_launch_error() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = DemucsCommand::new(dir.path().join("no-such-demucs"));
        let err = cmd
            .separate(Path::new("song.mp3"), Mode::MultiStem, &dir.path().join("out"))
            .unwrap_err();
        assert!(matches!(err, StemError::Launch { .. }), "got {err:?}");
        assert!(dir.path().join("out").is_dir());
    }
}
