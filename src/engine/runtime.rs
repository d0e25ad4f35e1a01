// src/engine/runtime.rs

use std::fmt;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::adapter::{AdapterRegistry, LanguageAdapter};
use crate::config::EngineConfig;
use crate::errors::{ExeczoneError, Result};
use crate::exec::{ExecutionOutcome, ProcessExecutor, StageExecutor};
use crate::submission::{ExecutionResult, Submission};
use crate::types::StageKind;
use crate::workspace::{Workspace, WorkspaceManager};

use super::core::{
    Redactor, StageVerdict, classify_stage, internal_result, success_result, unsupported_result,
};

/// Drives one submission at a time through its stages.
///
/// `Engine` holds no per-submission state, so a single instance can serve
/// any number of concurrent `execute` calls; each call owns its workspace.
pub struct Engine<E: StageExecutor = ProcessExecutor> {
    registry: AdapterRegistry,
    workspaces: WorkspaceManager,
    executor: E,
}

impl<E: StageExecutor> fmt::Debug for Engine<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("registry", &self.registry)
            .field("workspaces", &self.workspaces)
            .finish_non_exhaustive()
    }
}

impl Engine<ProcessExecutor> {
    /// Production engine: built-in languages, real processes.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            AdapterRegistry::with_builtins(config),
            WorkspaceManager::new(config.execution_root.clone()),
            ProcessExecutor,
        )
    }
}

impl<E: StageExecutor> Engine<E> {
    pub fn new(registry: AdapterRegistry, workspaces: WorkspaceManager, executor: E) -> Self {
        Self {
            registry,
            workspaces,
            executor,
        }
    }

    pub fn registry(&self) -> &AdapterRegistry {
        &self.registry
    }

    pub fn workspaces(&self) -> &WorkspaceManager {
        &self.workspaces
    }

    /// Execute a submission and classify the result.
    ///
    /// Never fails: every error is converted into a terminal result here.
    /// The workspace is released before returning on every path.
    pub async fn execute(&self, submission: &Submission) -> ExecutionResult {
        let language = submission.language();

        let adapter = match self.registry.resolve(language) {
            Ok(adapter) => adapter,
            Err(e) => {
                info!(%language, "rejected submission for unsupported language");
                return unsupported_result(e.to_string());
            }
        };

        let mut workspace = match self
            .workspaces
            .allocate(submission.source_code(), adapter.as_ref())
        {
            Ok(ws) => ws,
            Err(e) => {
                error!(%language, error = %e, "workspace allocation failed");
                return internal_result();
            }
        };

        let result = match self.drive(&workspace, adapter, submission).await {
            Ok(result) => result,
            Err(e) => {
                error!(
                    %language,
                    workspace = %workspace.id(),
                    error = %e,
                    "internal error while executing submission"
                );
                internal_result()
            }
        };

        if let Err(e) = workspace.release() {
            // The guard retries on drop.
            warn!(workspace = %workspace.id(), error = %e, "failed to release workspace");
        }

        info!(%language, status = ?result.status, "submission finished");
        result
    }

    /// Run every stage in order, stopping at the first failure.
    async fn drive(
        &self,
        workspace: &Workspace,
        adapter: Arc<dyn LanguageAdapter>,
        submission: &Submission,
    ) -> Result<ExecutionResult> {
        let stages = adapter.stages(&workspace.source_file_name());
        if stages.is_empty() {
            return Err(ExeczoneError::ConfigError(format!(
                "adapter for {} produced no stages",
                submission.language()
            )));
        }

        let dir = std::path::absolute(workspace.dir())?;
        let redactor = Redactor::new(&dir.to_string_lossy(), workspace.id());

        let mut last: Option<ExecutionOutcome> = None;
        for stage in &stages {
            // Only the program itself reads the caller's input.
            let stdin: &[String] = match stage.kind {
                StageKind::Compile => &[],
                StageKind::Run => submission.stdin_lines(),
            };

            debug!(
                workspace = %workspace.id(),
                stage = %stage.kind,
                "running stage"
            );
            let outcome = self.executor.execute(stage, &dir, stdin).await?;

            match classify_stage(stage, &outcome, &redactor) {
                StageVerdict::Passed => last = Some(outcome),
                StageVerdict::Failed(result) => {
                    debug!(
                        workspace = %workspace.id(),
                        stage = %stage.kind,
                        status = ?result.status,
                        "stage failed; skipping remaining stages"
                    );
                    return Ok(result);
                }
            }
        }

        let last = last.ok_or_else(|| ExeczoneError::Stream("no stage outcome recorded".into()))?;
        Ok(success_result(&last))
    }
}
