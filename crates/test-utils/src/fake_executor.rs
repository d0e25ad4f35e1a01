use std::collections::VecDeque;
use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use execzone::adapter::Stage;
use execzone::errors::{ExeczoneError, Result};
use execzone::exec::{ExecutionOutcome, StageExecutor};
use execzone::types::StageKind;

/// One stage the fake executor was asked to run.
#[derive(Debug, Clone)]
pub struct RecordedStage {
    pub kind: StageKind,
    pub command: String,
    pub stdin_lines: Vec<String>,
    /// Whether the working directory existed when the stage ran.
    pub dir_existed: bool,
}

/// Scripted reply for one stage.
pub enum FakeReply {
    Outcome(ExecutionOutcome),
    /// Fails as if the toolchain binary were missing.
    Error(String),
}

/// A fake executor that:
/// - records every stage it was asked to run
/// - replies with scripted outcomes, in order; once the script runs out,
///   every further stage succeeds with empty output.
#[derive(Clone, Default)]
pub struct FakeStageExecutor {
    replies: Arc<Mutex<VecDeque<FakeReply>>>,
    recorded: Arc<Mutex<Vec<RecordedStage>>>,
}

impl FakeStageExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, reply: FakeReply) -> Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn exits(self, exit_code: i32, stdout: &str, stderr: &str) -> Self {
        self.reply(FakeReply::Outcome(ExecutionOutcome {
            exit_code,
            stdout: stdout.as_bytes().to_vec(),
            stderr: stderr.as_bytes().to_vec(),
            timed_out: false,
        }))
    }

    pub fn times_out(self) -> Self {
        self.reply(FakeReply::Outcome(ExecutionOutcome::timed_out()))
    }

    pub fn fails(self, message: &str) -> Self {
        self.reply(FakeReply::Error(message.to_string()))
    }

    /// Stages run so far, in order.
    pub fn recorded(&self) -> Vec<RecordedStage> {
        self.recorded.lock().unwrap().clone()
    }

    pub fn kinds(&self) -> Vec<StageKind> {
        self.recorded().iter().map(|r| r.kind).collect()
    }
}

impl StageExecutor for FakeStageExecutor {
    fn execute<'a>(
        &'a self,
        stage: &'a Stage,
        working_dir: &'a Path,
        stdin_lines: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Result<ExecutionOutcome>> + Send + 'a>> {
        Box::pin(async move {
            self.recorded.lock().unwrap().push(RecordedStage {
                kind: stage.kind,
                command: stage.display_command(),
                stdin_lines: stdin_lines.to_vec(),
                dir_existed: working_dir.is_dir(),
            });

            let reply = self.replies.lock().unwrap().pop_front();
            match reply {
                Some(FakeReply::Outcome(outcome)) => Ok(outcome),
                Some(FakeReply::Error(msg)) => Err(ExeczoneError::Stream(msg)),
                None => Ok(ExecutionOutcome {
                    exit_code: 0,
                    stdout: Vec::new(),
                    stderr: Vec::new(),
                    timed_out: false,
                }),
            }
        })
    }
}
