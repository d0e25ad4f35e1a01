// src/lib.rs

pub mod adapter;
pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod submission;
pub mod types;
pub mod workspace;

use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{EngineConfig, load_or_default};
use crate::engine::Engine;
use crate::engine::core::unsupported_result;
use crate::submission::{ExecutionResult, Submission};
use crate::types::Language;

pub use crate::adapter::{AdapterRegistry, LanguageAdapter, Stage, TemplateAdapter};
pub use crate::exec::{ExecutionOutcome, ProcessExecutor, StageExecutor};
pub use crate::submission::{ResultPayload, ResultStatus};
pub use crate::workspace::{Workspace, WorkspaceManager};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - adapter registry / workspace manager / process executor
/// - reading the submission from files or stdin
/// - printing the JSON result
///
/// Returns whether the submission succeeded.
pub async fn run(args: CliArgs) -> Result<bool> {
    let mut cfg = load_or_default(args.config.as_deref().map(Path::new))
        .context("loading configuration")?;
    if let Some(root) = &args.execution_root {
        cfg = cfg.with_execution_root(root);
    }

    let engine = Engine::from_config(&cfg);

    if args.list_languages {
        print_languages(&engine, &cfg);
        return Ok(true);
    }

    let tag = args.language.as_deref().unwrap_or_default();
    let language: Language = match tag.parse() {
        Ok(lang) => lang,
        Err(msg) => {
            let result = unsupported_result(msg);
            print_result(&result)?;
            return Ok(false);
        }
    };

    if args.dry_run {
        print_dry_run(&engine, language);
        return Ok(true);
    }

    if let Some(max_age) = cfg.stale_workspace_age {
        let removed = engine.workspaces().sweep_stale(max_age)?;
        if removed > 0 {
            info!(removed, "swept stale workspaces");
        }
    }

    let source = read_source(&args.source)?;
    let stdin_lines = match &args.stdin_file {
        Some(path) => read_lines(path)?,
        None => args.stdin_lines.clone(),
    };

    let submission = Submission::new(language, source, stdin_lines);
    let result = engine.execute(&submission).await;
    print_result(&result)?;

    Ok(result.is_success())
}

fn read_source(path: &str) -> Result<String> {
    if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading source from stdin")?;
        return Ok(buf);
    }
    fs::read_to_string(path).with_context(|| format!("reading source file {path}"))
}

fn read_lines(path: &str) -> Result<Vec<String>> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("reading stdin file {path}"))?;
    Ok(contents.lines().map(str::to_string).collect())
}

fn print_result(result: &ExecutionResult) -> Result<()> {
    let json = serde_json::to_string_pretty(&result.to_payload())?;
    println!("{json}");
    Ok(())
}

/// Print every enabled language with its extension and stage kinds.
fn print_languages<E: StageExecutor>(engine: &Engine<E>, cfg: &EngineConfig) {
    for language in engine.registry().languages() {
        let Ok(adapter) = engine.registry().resolve(language) else {
            continue;
        };
        let kinds: Vec<String> = adapter
            .stages(&format!("main.{}", adapter.extension()))
            .iter()
            .map(|s| s.kind.to_string())
            .collect();
        let settings = cfg.settings_for(language);
        println!(
            "{:<12} .{:<5} {:<12} run timeout {:?}",
            language.tag(),
            adapter.extension(),
            kinds.join("+"),
            settings.run_timeout
        );
    }
}

/// Print the stages a submission in `language` would go through.
fn print_dry_run<E: StageExecutor>(engine: &Engine<E>, language: Language) {
    println!("execzone dry-run ({language})");

    let adapter = match engine.registry().resolve(language) {
        Ok(adapter) => adapter,
        Err(e) => {
            println!("  {e}");
            return;
        }
    };

    let stem = adapter.source_stem("<id>");
    let source = format!("{stem}.{}", adapter.extension());
    println!("  source file: <execution_root>/<id>/{source}");

    for (i, stage) in adapter.stages(&source).iter().enumerate() {
        println!("  {}. [{}] {}", i + 1, stage.kind, stage.display_command());
        println!(
            "       timeout: {:?}, fail_on_stderr: {}",
            stage.timeout, stage.fail_on_stderr
        );
    }

    debug!("dry-run complete (no execution)");
}
