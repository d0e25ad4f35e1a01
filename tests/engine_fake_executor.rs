// tests/engine_fake_executor.rs

mod common;
use crate::common::builders::{SettingsBuilder, SubmissionBuilder, shell_registry};
use crate::common::fake_executor::FakeStageExecutor;
use crate::common::{init_tracing, root_is_empty};

use std::error::Error;
use tempfile::TempDir;

use execzone::engine::{Engine, INTERNAL_ERROR_MESSAGE};
use execzone::submission::ResultStatus;
use execzone::types::{Language, StageKind};
use execzone::workspace::WorkspaceManager;

type TestResult = Result<(), Box<dyn Error>>;

fn engine(tmp: &TempDir, fake: &FakeStageExecutor) -> Engine<FakeStageExecutor> {
    let settings = SettingsBuilder::new().build();
    Engine::new(
        shell_registry(&settings),
        WorkspaceManager::new(tmp.path().join("zone")),
        fake.clone(),
    )
}

#[tokio::test]
async fn compile_failure_never_runs_the_program() -> TestResult {
    init_tracing();
    let tmp = TempDir::new()?;
    let fake = FakeStageExecutor::new().exits(1, "", "expected ';' before '}'");

    let submission = SubmissionBuilder::new(Language::C).source("int main(){}").build();
    let result = engine(&tmp, &fake).execute(&submission).await;

    assert_eq!(result.status, ResultStatus::CompileError);
    assert_eq!(result.error_message, "expected ';' before '}'");
    assert!(result.output.is_empty());
    assert_eq!(fake.kinds(), vec![StageKind::Compile]);
    assert!(root_is_empty(&tmp.path().join("zone")));
    Ok(())
}

#[tokio::test]
async fn only_the_run_stage_receives_input_lines() -> TestResult {
    init_tracing();
    let tmp = TempDir::new()?;
    let fake = FakeStageExecutor::new()
        .exits(0, "", "")
        .exits(0, "3\n", "");

    let submission = SubmissionBuilder::new(Language::C)
        .source("add")
        .stdin_line("1")
        .stdin_line("2")
        .build();
    let result = engine(&tmp, &fake).execute(&submission).await;

    assert_eq!(result.status, ResultStatus::Success);
    assert_eq!(result.output, "3\n");

    let recorded = fake.recorded();
    assert_eq!(recorded.len(), 2);
    assert_eq!(recorded[0].kind, StageKind::Compile);
    assert!(recorded[0].stdin_lines.is_empty());
    assert_eq!(recorded[1].kind, StageKind::Run);
    assert_eq!(recorded[1].stdin_lines, vec!["1", "2"]);
    assert!(recorded.iter().all(|r| r.dir_existed));
    assert!(root_is_empty(&tmp.path().join("zone")));
    Ok(())
}

#[tokio::test]
async fn stages_resolve_against_the_workspace_source_file() -> TestResult {
    let tmp = TempDir::new()?;
    let fake = FakeStageExecutor::new();

    let submission = SubmissionBuilder::new(Language::Python).source("echo hi").build();
    engine(&tmp, &fake).execute(&submission).await;

    let recorded = fake.recorded();
    assert_eq!(recorded.len(), 1);
    let cmd = &recorded[0].command;
    assert!(cmd.starts_with("sh ws"), "unexpected command: {cmd}");
    assert!(cmd.ends_with(".sh"), "unexpected command: {cmd}");
    Ok(())
}

#[tokio::test]
async fn run_timeout_is_reported_as_timeout() -> TestResult {
    init_tracing();
    let tmp = TempDir::new()?;
    let fake = FakeStageExecutor::new().exits(0, "", "").times_out();

    let submission = SubmissionBuilder::new(Language::C).source("loop").build();
    let result = engine(&tmp, &fake).execute(&submission).await;

    assert_eq!(result.status, ResultStatus::Timeout);
    assert_eq!(result.error_message, "execution timed out after 5s");
    assert!(result.output.is_empty());
    assert!(root_is_empty(&tmp.path().join("zone")));
    Ok(())
}

#[tokio::test]
async fn compile_timeout_is_also_a_timeout() -> TestResult {
    let tmp = TempDir::new()?;
    let fake = FakeStageExecutor::new().times_out();

    let submission = SubmissionBuilder::new(Language::C).source("template hell").build();
    let result = engine(&tmp, &fake).execute(&submission).await;

    assert_eq!(result.status, ResultStatus::Timeout);
    assert_eq!(fake.kinds(), vec![StageKind::Compile]);
    Ok(())
}

#[tokio::test]
async fn runtime_error_carries_stderr_not_stdout() -> TestResult {
    let tmp = TempDir::new()?;
    let fake = FakeStageExecutor::new().exits(1, "partial output", "Traceback: boom");

    let submission = SubmissionBuilder::new(Language::Python).source("raise").build();
    let result = engine(&tmp, &fake).execute(&submission).await;

    assert_eq!(result.status, ResultStatus::RuntimeError);
    assert_eq!(result.error_message, "Traceback: boom");
    assert!(result.output.is_empty());
    Ok(())
}

#[tokio::test]
async fn lenient_language_ignores_stderr_on_success() -> TestResult {
    let tmp = TempDir::new()?;
    let settings = SettingsBuilder::new().fail_on_stderr(false).build();
    let fake = FakeStageExecutor::new().exits(0, "ok\n", "deprecation warning");
    let engine = Engine::new(
        shell_registry(&settings),
        WorkspaceManager::new(tmp.path().join("zone")),
        fake.clone(),
    );

    let submission = SubmissionBuilder::new(Language::Python).source("warn").build();
    let result = engine.execute(&submission).await;

    assert_eq!(result.status, ResultStatus::Success);
    assert_eq!(result.output, "ok\n");
    Ok(())
}

#[tokio::test]
async fn unsupported_language_creates_no_workspace() -> TestResult {
    let tmp = TempDir::new()?;
    let fake = FakeStageExecutor::new();

    let submission = SubmissionBuilder::new(Language::Go).source("package main").build();
    let result = engine(&tmp, &fake).execute(&submission).await;

    assert_eq!(result.status, ResultStatus::UnsupportedLanguage);
    assert!(result.error_message.contains("go"));
    assert!(fake.recorded().is_empty());
    assert!(!tmp.path().join("zone").exists());
    Ok(())
}

#[tokio::test]
async fn executor_failure_is_internal_and_still_cleans_up() -> TestResult {
    init_tracing();
    let tmp = TempDir::new()?;
    let fake = FakeStageExecutor::new().fails("toolchain vanished");

    let submission = SubmissionBuilder::new(Language::C).source("x").build();
    let result = engine(&tmp, &fake).execute(&submission).await;

    assert_eq!(result.status, ResultStatus::InternalError);
    assert_eq!(result.error_message, INTERNAL_ERROR_MESSAGE);
    assert!(!result.error_message.contains("vanished"));
    assert!(root_is_empty(&tmp.path().join("zone")));
    Ok(())
}

#[tokio::test]
async fn unwritable_execution_root_is_internal_error() -> TestResult {
    let tmp = TempDir::new()?;
    let blocker = tmp.path().join("not-a-dir");
    std::fs::write(&blocker, "file")?;

    let settings = SettingsBuilder::new().build();
    let fake = FakeStageExecutor::new();
    let engine = Engine::new(
        shell_registry(&settings),
        WorkspaceManager::new(blocker.join("zone")),
        fake.clone(),
    );

    let submission = SubmissionBuilder::new(Language::Python).source("echo").build();
    let result = engine.execute(&submission).await;

    assert_eq!(result.status, ResultStatus::InternalError);
    assert!(fake.recorded().is_empty());
    Ok(())
}

#[tokio::test]
async fn payload_shape_matches_status() -> TestResult {
    let tmp = TempDir::new()?;
    let fake = FakeStageExecutor::new().exits(0, "42\n", "");

    let submission = SubmissionBuilder::new(Language::Python).source("echo 42").build();
    let result = engine(&tmp, &fake).execute(&submission).await;
    let json = serde_json::to_value(result.to_payload())?;

    assert_eq!(json["success"], true);
    assert_eq!(json["output"], "42\n");
    assert!(json.get("error").is_none());
    assert!(json["timestamp"].is_string());

    Ok(())
}
