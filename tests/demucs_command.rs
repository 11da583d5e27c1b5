#![cfg(unix)]

use std::{
    fs,
    os::unix::fs::PermissionsExt,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use stem_splitter_cli::{
    DemucsCommand, InputReference, Mode, Pipeline, Separator, SplitterConfig, StemError,
};

mod common;

/// Shell stand-in for demucs: records its argv and writes the layout demucs would.
const FAKE_DEMUCS: &str = r#"#!/bin/sh
printf '%s\n' "$@" > "$(dirname "$0")/args.txt"
out="$2"
model="$4"
for last; do :; done
base=$(basename "$last")
base="${base%.*}"
mkdir -p "$out/$model/$base"
case "$*" in
  *--two-stems=vocals*) stems="vocals no_vocals" ;;
  *) stems="bass drums guitar other piano vocals" ;;
esac
for s in $stems; do
  printf '%s' "$s" > "$out/$model/$base/$s.mp3"
done
echo "separated $base"
"#;

const FAILING_DEMUCS: &str = "#!/bin/sh\necho 'CUDA out of memory' >&2\nexit 3\n";

fn install(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("demucs");
    fs::write(&path, body).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn recorded_args(bin_dir: &Path) -> Vec<String> {
    fs::read_to_string(bin_dir.join("args.txt"))
        .unwrap()
        .lines()
        .map(str::to_owned)
        .collect()
}

#[test]
fn passes_fixed_argument_contract() {
    let bin = tempdir().unwrap();
    let work = tempdir().unwrap();
    let program = install(bin.path(), FAKE_DEMUCS);
    let song = common::song(work.path(), "song.wav");
    let root = work.path().join("stem_outputs");

    DemucsCommand::new(&program)
        .separate(&song, Mode::MultiStem, &root)
        .unwrap();

    assert_eq!(
        recorded_args(bin.path()),
        [
            "-o".to_string(),
            root.display().to_string(),
            "-n".into(),
            "htdemucs_6s".into(),
            "--mp3".into(),
            song.display().to_string(),
        ]
    );
    assert_eq!(common::dir_names(&root.join("htdemucs_6s/song")).len(), 6);
}

#[test]
fn nonzero_exit_carries_stderr() {
    let bin = tempdir().unwrap();
    let work = tempdir().unwrap();
    let program = install(bin.path(), FAILING_DEMUCS);
    let song = common::song(work.path(), "song.wav");

    let err = DemucsCommand::new(&program)
        .separate(&song, Mode::TwoStem, &work.path().join("temp_separation"))
        .unwrap_err();

    match err {
        StemError::Separation { stderr, status } => {
            assert_eq!(stderr, "CUDA out of memory");
            assert!(status.contains('3'), "{status}");
        }
        other => panic!("expected Separation, got {other:?}"),
    }
}

#[test]
fn two_stem_end_to_end_with_external_tool() {
    let bin = tempdir().unwrap();
    let work = tempdir().unwrap();
    let program = install(bin.path(), FAKE_DEMUCS);
    let song = common::song(work.path(), "clip.wav");

    let cfg = SplitterConfig::default()
        .with_work_dir(work.path())
        .with_demucs_program(&program);
    let artifacts = Pipeline::from_config(cfg)
        .run(&InputReference::Path(song), Mode::TwoStem, &mut Vec::new())
        .unwrap();

    assert_eq!(artifacts.len(), 2);
    assert!(recorded_args(bin.path()).contains(&"--two-stems=vocals".to_string()));
    assert_eq!(
        common::dir_names(work.path()),
        ["clip.wav", "only_instrumentals.mp3", "only_vocals.mp3"]
    );
}
