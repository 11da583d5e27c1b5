#![allow(dead_code)]

use std::{
    cell::Cell,
    fs,
    path::{Path, PathBuf},
};

use stem_splitter_cli::{Mode, Result, Separator, StemError};

pub const SIX_STEMS: [&str; 6] = ["bass", "drums", "guitar", "other", "piano", "vocals"];

/// Writes a short stereo WAV so result sizes are real.
pub fn write_wav(path: &Path, frames: usize) {
    let spec = hound::WavSpec {
        channels: 2,
        sample_rate: 44_100,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut w = hound::WavWriter::create(path, spec).unwrap();
    for i in 0..frames {
        let s = ((i % 100) as i16 - 50) * 100;
        w.write_sample(s).unwrap();
        w.write_sample(-s).unwrap();
    }
    w.finalize().unwrap();
}

/// Stands in for demucs: lays out `<root>/<model>/<base>/<stem>.mp3`.
pub struct FakeSeparator {
    stems: Vec<&'static str>,
    fail: bool,
    calls: Cell<usize>,
}

impl FakeSeparator {
    pub fn producing(stems: &[&'static str]) -> Self {
        Self {
            stems: stems.to_vec(),
            fail: false,
            calls: Cell::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            stems: Vec::new(),
            fail: true,
            calls: Cell::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl Separator for FakeSeparator {
    fn separate(&self, input: &Path, mode: Mode, output_root: &Path) -> Result<()> {
        self.calls.set(self.calls.get() + 1);
        assert!(input.is_file(), "input must be staged: {}", input.display());
        if self.fail {
            return Err(StemError::Separation {
                status: "exit status: 1".into(),
                stderr: "model exploded".into(),
            });
        }
        let base = input.file_stem().unwrap();
        let dir = output_root.join(mode.model_name()).join(base);
        fs::create_dir_all(&dir)?;
        for stem in &self.stems {
            fs::write(dir.join(format!("{stem}.mp3")), format!("{stem} audio"))?;
        }
        Ok(())
    }
}

pub fn dir_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

pub fn song(dir: &Path, name: &str) -> PathBuf {
    let p = dir.join(name);
    write_wav(&p, 4410);
    p
}
