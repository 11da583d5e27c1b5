use std::{fmt, io::Write};

use tracing::{debug, error, info, info_span, Span};

use crate::{
    config::SplitterConfig,
    core::{
        cleanup::cleanup,
        invoker::{DemucsCommand, Separator},
        locator::OutputLayout,
        materializer::materialize,
        report::report,
    },
    error::{Result, StemError},
    io::source::resolve,
    types::{InputReference, Mode, ResultArtifact, StagingArtifact},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Resolving,
    Separating,
    Locating,
    Materializing,
    Reporting,
    CleaningUp,
    Done,
    Failed,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// One separation run: resolve, separate, locate, materialize, report, clean up.
///
/// The pipeline owns the run's tracing span; every stage logs inside it.
pub struct Pipeline<S = DemucsCommand> {
    cfg: SplitterConfig,
    separator: S,
    layout: OutputLayout,
    span: Span,
}

impl Pipeline<DemucsCommand> {
    pub fn from_config(cfg: SplitterConfig) -> Self {
        let separator = DemucsCommand::new(cfg.demucs_program.clone());
        Self::new(cfg, separator)
    }
}

impl<S: Separator> Pipeline<S> {
    pub fn new(cfg: SplitterConfig, separator: S) -> Self {
        let span = info_span!("run", work_dir = %cfg.work_dir.display());
        Self {
            cfg,
            separator,
            layout: OutputLayout::default(),
            span,
        }
    }

    pub fn with_layout(mut self, layout: OutputLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn config(&self) -> &SplitterConfig {
        &self.cfg
    }

    /// Run once for `reference`, writing the summary to `out`.
    ///
    /// A downloaded input is removed whether or not the later stages succeed.
    /// A run that yields no artifacts fails with [`StemError::NoArtifacts`].
    pub fn run<W: Write>(
        &self,
        reference: &InputReference,
        mode: Mode,
        out: &mut W,
    ) -> Result<Vec<ResultArtifact>> {
        let _guard = self.span.enter();
        info!(input = %reference, %mode, "starting stem separation");
        transition(RunState::Idle, RunState::Resolving);

        let staging = match resolve(reference, &self.cfg) {
            Ok(s) => s,
            Err(e) => {
                transition(RunState::Resolving, RunState::Failed);
                return Err(e);
            }
        };

        let result = self
            .process(&staging, mode)
            .and_then(|artifacts| {
                transition(RunState::Materializing, RunState::Reporting);
                report(&artifacts, out)?;
                Ok(artifacts)
            });

        match &result {
            Ok(_) => transition(RunState::Reporting, RunState::CleaningUp),
            Err(e) => {
                error!(error = %e, "run failed");
                transition(RunState::Failed, RunState::CleaningUp);
            }
        }
        cleanup(staging);

        let artifacts = result?;
        if artifacts.is_empty() {
            return Err(StemError::NoArtifacts);
        }
        transition(RunState::CleaningUp, RunState::Done);
        info!(count = artifacts.len(), "generated stem files");
        Ok(artifacts)
    }

    fn process(&self, staging: &StagingArtifact, mode: Mode) -> Result<Vec<ResultArtifact>> {
        let output_root = self.cfg.work_dir.join(mode.output_root_name());

        transition(RunState::Resolving, RunState::Separating);
        info!(input = %staging.path.display(), "separating");
        self.separator.separate(&staging.path, mode, &output_root)?;

        transition(RunState::Separating, RunState::Locating);
        let set = self
            .layout
            .locate(&output_root, mode.model_name(), &staging.base_name(), mode)?;

        transition(RunState::Locating, RunState::Materializing);
        materialize(&set, &self.cfg.work_dir)
    }
}

fn transition(from: RunState, to: RunState) {
    debug!(%from, %to, "state");
}
