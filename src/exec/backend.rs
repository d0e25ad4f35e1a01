// src/exec/backend.rs

//! Pluggable stage executor abstraction.
//!
//! The engine talks to a `StageExecutor` instead of spawning processes
//! directly. This makes it easy to swap in a fake executor in tests while
//! keeping the production implementation in [`stage_runner`].
//!
//! [`stage_runner`]: super::stage_runner

use std::future::Future;
use std::path::Path;
use std::pin::Pin;

use crate::adapter::Stage;
use crate::errors::Result;
use crate::exec::ExecutionOutcome;
use crate::exec::stage_runner::run_stage;

/// Trait abstracting how a single stage is executed.
///
/// Production code uses [`ProcessExecutor`]; tests can provide their own
/// implementation that doesn't spawn real processes.
pub trait StageExecutor: Send + Sync {
    fn execute<'a>(
        &'a self,
        stage: &'a Stage,
        working_dir: &'a Path,
        stdin_lines: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Result<ExecutionOutcome>> + Send + 'a>>;
}

/// Real executor: spawns the stage as an OS process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExecutor;

impl StageExecutor for ProcessExecutor {
    fn execute<'a>(
        &'a self,
        stage: &'a Stage,
        working_dir: &'a Path,
        stdin_lines: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Result<ExecutionOutcome>> + Send + 'a>> {
        Box::pin(run_stage(stage, working_dir, stdin_lines))
    }
}
