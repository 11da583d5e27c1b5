use clap::Parser;
use std::{
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};
use stem_splitter_cli::{
    config::{LogFormat, DEMUCS_BIN_ENV, LOG_FORMAT_ENV, WORK_DIR_ENV},
    logging, InputReference, Mode, Pipeline, ResultArtifact, SplitterConfig, StemError,
};
use tracing::error;

#[derive(Parser, Debug)]
#[command(name = "stem-splitter")]
#[command(about = "Split an audio file or URL into stems with Demucs", long_about = None)]
#[command(version)]
#[command(after_help = "Examples:\n  stem-splitter song.mp3\n  stem-splitter https://example.com/song.mp3")]
struct Cli {
    /// Audio file path or http(s) URL
    input: String,

    #[arg(short, long, value_enum, default_value = "multi")]
    mode: Mode,

    /// Demucs executable
    #[arg(long, env = DEMUCS_BIN_ENV, default_value = "demucs")]
    demucs: PathBuf,

    /// Directory for downloads and results
    #[arg(long, env = WORK_DIR_ENV, default_value = ".")]
    work_dir: PathBuf,

    #[arg(long, value_enum, env = LOG_FORMAT_ENV, default_value = "human")]
    log_format: LogFormat,
}

impl Cli {
    fn config(&self) -> SplitterConfig {
        SplitterConfig::default()
            .with_work_dir(&self.work_dir)
            .with_demucs_program(&self.demucs)
            .with_log_format(self.log_format)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let cfg = cli.config();

    if let Err(e) = logging::init_logging(&cfg) {
        eprintln!("failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    println!("🎵 Stem Separation Tool");
    println!("{}", "=".repeat(40));

    let reference = InputReference::parse(&cli.input);
    let pipeline = Pipeline::from_config(cfg);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = pipeline.run(&reference, cli.mode, &mut out);
    out.flush().ok();

    ExitCode::from(exit_status(&result))
}

fn exit_status(result: &Result<Vec<ResultArtifact>, StemError>) -> u8 {
    match result {
        Ok(_) => 0,
        // The summary already said so.
        Err(StemError::NoArtifacts) => 1,
        Err(e @ (StemError::NotFound { .. } | StemError::Download { .. })) => {
            error!(error = ?e, "could not resolve input");
            eprintln!("❌ Failed to get audio file: {e}");
            1
        }
        Err(e) => {
            error!(error = ?e, "stem separation failed");
            eprintln!("❌ Error: {e}");
            1
        }
    }
}
