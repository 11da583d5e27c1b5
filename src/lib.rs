//! # stem-splitter-cli
//!
//! Drives the Demucs command line tool to split an audio file (local path
//! or URL) into stems, then moves the results to stable names and reports
//! what was produced.

pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod logging;
pub mod pipeline;
pub mod types;

pub use crate::{
    config::SplitterConfig,
    core::{
        invoker::{DemucsCommand, Separator},
        locator::{ExternalOutputSet, OutputLayout},
        materializer::{materialize, FixedOverwrite, TimestampedRename},
    },
    error::{Result, StemError},
    io::source::resolve,
    pipeline::{Pipeline, RunState},
    types::{InputReference, Mode, ResultArtifact, StagingArtifact},
};
