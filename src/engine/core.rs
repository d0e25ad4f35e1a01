// src/engine/core.rs

//! Pure classification core.
//!
//! Turns stage outcomes into verdicts and the terminal [`ExecutionResult`].
//! No Tokio, no processes, no filesystem: everything here is deterministic
//! and unit tested directly.

use crate::adapter::Stage;
use crate::exec::ExecutionOutcome;
use crate::submission::{ExecutionResult, ResultStatus};
use crate::types::{StageKind, format_duration};

/// Generic message returned for environment failures. Details are logged.
pub const INTERNAL_ERROR_MESSAGE: &str = "internal error";

/// What to do after a stage finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageVerdict {
    /// Stage succeeded; run the next one (or finish if it was the last).
    Passed,
    /// Stage failed; this is the terminal result.
    Failed(ExecutionResult),
}

/// Strips host-specific workspace details from failure diagnostics.
///
/// The workspace directory prefix is removed and the workspace identifier is
/// replaced by `main`, so diagnostics neither leak host paths nor differ
/// between two runs of the same submission.
#[derive(Debug, Clone)]
pub struct Redactor {
    dir_prefix: String,
    workspace_id: String,
}

impl Redactor {
    pub fn new(workspace_dir: &str, workspace_id: &str) -> Self {
        Self {
            dir_prefix: format!("{}/", workspace_dir.trim_end_matches('/')),
            workspace_id: workspace_id.to_string(),
        }
    }

    /// A redactor that leaves text untouched.
    pub fn none() -> Self {
        Self {
            dir_prefix: String::new(),
            workspace_id: String::new(),
        }
    }

    pub fn apply(&self, text: &str) -> String {
        let mut out = text.to_string();
        if self.dir_prefix.len() > 1 {
            out = out.replace(&self.dir_prefix, "");
        }
        if !self.workspace_id.is_empty() {
            out = out.replace(&self.workspace_id, "main");
        }
        out
    }
}

/// Classify one stage outcome.
pub fn classify_stage(
    stage: &Stage,
    outcome: &ExecutionOutcome,
    redactor: &Redactor,
) -> StageVerdict {
    if outcome.timed_out {
        return StageVerdict::Failed(ExecutionResult::failure(
            ResultStatus::Timeout,
            format!("execution timed out after {}", format_duration(stage.timeout)),
        ));
    }

    if outcome.succeeded(stage.fail_on_stderr) {
        return StageVerdict::Passed;
    }

    let result = match stage.kind {
        // Compiler diagnostics may land on either stream.
        StageKind::Compile => {
            let mut text = outcome.stdout_lossy();
            text.push_str(&outcome.stderr_lossy());
            ExecutionResult::failure(
                ResultStatus::CompileError,
                non_empty_or_exit_code(redactor.apply(&text), outcome.exit_code),
            )
        }
        StageKind::Run => ExecutionResult::failure(
            ResultStatus::RuntimeError,
            non_empty_or_exit_code(redactor.apply(&outcome.stderr_lossy()), outcome.exit_code),
        ),
    };

    StageVerdict::Failed(result)
}

/// Result once every stage passed: the final stage's standard output,
/// exactly as the program wrote it.
pub fn success_result(last: &ExecutionOutcome) -> ExecutionResult {
    ExecutionResult::success(last.stdout_lossy())
}

pub fn unsupported_result(message: impl Into<String>) -> ExecutionResult {
    ExecutionResult::failure(ResultStatus::UnsupportedLanguage, message)
}

pub fn internal_result() -> ExecutionResult {
    ExecutionResult::failure(ResultStatus::InternalError, INTERNAL_ERROR_MESSAGE)
}

fn non_empty_or_exit_code(text: String, exit_code: i32) -> String {
    if text.trim().is_empty() {
        format!("process exited with code {exit_code}")
    } else {
        text
    }
}
