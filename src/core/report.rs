use std::io::{self, Write};

use crate::types::ResultArtifact;

/// Print the run summary: count, one line per file with its size, and the
/// directory holding the first artifact.
pub fn report<W: Write>(artifacts: &[ResultArtifact], out: &mut W) -> io::Result<()> {
    let Some(first) = artifacts.first() else {
        writeln!(out, "No stems were generated")?;
        return Ok(());
    };

    writeln!(out)?;
    writeln!(
        out,
        "Stem separation complete! Generated {} files:",
        artifacts.len()
    )?;
    writeln!(out, "{}", "-".repeat(60))?;

    for (i, a) in artifacts.iter().enumerate() {
        writeln!(out, "{:2}. {} ({:.2} MB)", i + 1, a.file_name(), a.size_mb())?;
    }

    writeln!(out)?;
    writeln!(out, "All files saved in: {}", first.directory().display())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn render(artifacts: &[ResultArtifact]) -> String {
        let mut buf = Vec::new();
        report(artifacts, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn empty_result_prints_only_the_failure_line() {
        assert_eq!(render(&[]), "No stems were generated\n");
    }

    #[test]
    fn lists_each_artifact_with_size() {
        let artifacts = vec![
            ResultArtifact {
                path: PathBuf::from("out/song/drums_1.mp3"),
                size_bytes: 1024 * 1024,
            },
            ResultArtifact {
                path: PathBuf::from("out/song/bass_1.mp3"),
                size_bytes: 5 * 1024 * 1024 / 4,
            },
        ];
        let text = render(&artifacts);
        assert!(text.contains("Generated 2 files"));
        assert!(text.contains(" 1. drums_1.mp3 (1.00 MB)"));
        assert!(text.contains(" 2. bass_1.mp3 (1.25 MB)"));
        assert!(text.ends_with("All files saved in: out/song\n"));
    }
}
