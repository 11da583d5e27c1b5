use std::{fmt, path::PathBuf, time::Duration};

pub const DEMUCS_BIN_ENV: &str = "STEM_SPLITTER_DEMUCS_BIN";
pub const WORK_DIR_ENV: &str = "STEM_SPLITTER_WORK_DIR";
pub const LOG_FORMAT_ENV: &str = "STEM_SPLITTER_LOG_FORMAT";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    #[default]
    Human,
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogFormat::Human => "human",
            LogFormat::Json => "json",
        })
    }
}

/// Settings shared by every stage of a run.
#[derive(Clone, Debug)]
pub struct SplitterConfig {
    /// Downloads, output roots and fixed-name results live here.
    pub work_dir: PathBuf,
    /// Program used to run the separation.
    pub demucs_program: PathBuf,
    pub log_format: LogFormat,
    pub connect_timeout: Duration,
    pub download_timeout: Duration,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from("."),
            demucs_program: PathBuf::from("demucs"),
            log_format: LogFormat::Human,
            connect_timeout: Duration::from_secs(10),
            download_timeout: Duration::from_secs(60 * 60),
        }
    }
}

impl SplitterConfig {
    pub fn with_work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir = dir.into();
        self
    }

    pub fn with_demucs_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.demucs_program = program.into();
        self
    }

    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.log_format = format;
        self
    }
}
