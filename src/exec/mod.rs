// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for actually running stage commands, using
//! `tokio::process::Command`, and handing back an [`ExecutionOutcome`] per
//! stage.
//!
//! - [`stage_runner`] runs one stage with concurrent stdin feeding and
//!   stdout/stderr draining under a deadline.
//! - [`backend`] provides the `StageExecutor` trait and the concrete
//!   `ProcessExecutor` the engine uses in production, and which tests can
//!   replace with a fake implementation.

pub mod backend;
pub mod stage_runner;

pub use backend::{ProcessExecutor, StageExecutor};
pub use stage_runner::run_stage;

/// What one stage run produced. Never mutated after creation.
///
/// When `timed_out` is set, both buffers are empty: partial output of a
/// killed stage is discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOutcome {
    /// Exit code, or `-1` when the process was terminated by a signal.
    pub exit_code: i32,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub timed_out: bool,
}

impl ExecutionOutcome {
    pub fn timed_out() -> Self {
        Self {
            exit_code: -1,
            stdout: Vec::new(),
            stderr: Vec::new(),
            timed_out: true,
        }
    }

    /// Stage success policy.
    ///
    /// Exit code 0 is required. With `fail_on_stderr`, any error-stream
    /// output also fails the stage.
    pub fn succeeded(&self, fail_on_stderr: bool) -> bool {
        !self.timed_out && self.exit_code == 0 && !(fail_on_stderr && !self.stderr.is_empty())
    }

    pub fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}
