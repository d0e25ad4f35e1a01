// src/exec/stage_runner.rs

//! Runs a single stage as an external process.
//!
//! The child is started as the leader of its own process group. While it
//! runs, three activities are driven concurrently and joined before the stage
//! counts as finished:
//! - feeding `stdin_lines` (each followed by `\n`) and then closing stdin,
//! - draining stdout into a buffer,
//! - draining stderr into a separate buffer.
//!
//! Waiting for exit before draining would deadlock as soon as the child fills
//! a pipe buffer, so exit and drains are awaited together. Exit is observed
//! without reaping, so the group can still be signalled afterwards. If the
//! stage deadline fires first, the joined future is dropped (which closes our
//! pipe ends) and the whole process group is killed.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use nix::errno::Errno;
use nix::sys::signal::{Signal, killpg};
use nix::sys::wait::{Id, WaitPidFlag, WaitStatus, waitid};
use nix::unistd::Pid;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::{ChildStdin, Command};
use tokio::signal::unix::{SignalKind, signal};
use tracing::{debug, info, warn};

use crate::adapter::Stage;
use crate::errors::{ExeczoneError, Result};
use crate::exec::ExecutionOutcome;
use crate::types::format_duration;

/// Run `stage` in `working_dir`, feeding it `stdin_lines`.
///
/// Returns `Err` only for environment failures (missing toolchain, spawn or
/// stream errors). A non-zero exit or a timeout is a normal outcome.
pub async fn run_stage(
    stage: &Stage,
    working_dir: &Path,
    stdin_lines: &[String],
) -> Result<ExecutionOutcome> {
    let program = resolve_program(&stage.command, working_dir)?;

    info!(
        stage = %stage.kind,
        cmd = %stage.display_command(),
        timeout = %format_duration(stage.timeout),
        "starting stage process"
    );

    // Registered before spawn so the child's SIGCHLD cannot be missed.
    let mut sigchld = signal(SignalKind::child())?;

    let mut cmd = Command::new(&program);
    cmd.args(&stage.args)
        .current_dir(working_dir)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .process_group(0);

    let mut child = cmd.spawn().map_err(|source| ExeczoneError::Spawn {
        command: stage.command.clone(),
        source,
    })?;

    let pid = child
        .id()
        .map(|id| Pid::from_raw(id as i32))
        .ok_or_else(|| ExeczoneError::Stream("child has no pid".to_string()))?;
    let stdin = child
        .stdin
        .take()
        .ok_or_else(|| ExeczoneError::Stream("child stdin was not captured".to_string()))?;
    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| ExeczoneError::Stream("child stdout was not captured".to_string()))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| ExeczoneError::Stream("child stderr was not captured".to_string()))?;

    let joined = async {
        tokio::join!(
            feed_stdin(stdin, stdin_lines),
            drain(stdout),
            drain(stderr),
            exited(pid, &mut sigchld),
        )
    };

    let finished = tokio::time::timeout(stage.timeout, joined).await;

    match finished {
        Ok((_, stdout, stderr, leader)) => {
            leader?;

            // Descendants that closed their streams may still be alive. The
            // unreaped leader keeps the group id from being reused.
            if let Err(e) = kill_group(pid) {
                debug!(pgid = %pid, error = %e, "could not signal stage group after exit");
            }
            let status = child.wait().await?;

            let stdout = stdout
                .map_err(|e| ExeczoneError::Stream(format!("reading stdout: {e}")))?;
            let stderr = stderr
                .map_err(|e| ExeczoneError::Stream(format!("reading stderr: {e}")))?;

            let exit_code = status.code().unwrap_or(-1);
            info!(
                stage = %stage.kind,
                exit_code,
                stdout_bytes = stdout.len(),
                stderr_bytes = stderr.len(),
                "stage process exited"
            );

            Ok(ExecutionOutcome {
                exit_code,
                stdout,
                stderr,
                timed_out: false,
            })
        }
        Err(_) => {
            warn!(
                stage = %stage.kind,
                timeout = %format_duration(stage.timeout),
                "stage deadline elapsed; killing process group"
            );

            if let Err(e) = kill_group(pid) {
                warn!(pgid = %pid, error = %e, "failed to kill process group");
            }
            if let Err(e) = child.kill().await {
                debug!(error = %e, "child already gone after group kill");
            }

            Ok(ExecutionOutcome::timed_out())
        }
    }
}

/// Resolve the program to spawn.
///
/// Bare names are looked up on `PATH`; a missing binary is an environment
/// defect, not a fault of the submission. Paths are taken relative to the
/// workspace directory.
fn resolve_program(command: &str, working_dir: &Path) -> Result<PathBuf> {
    if command.contains(std::path::MAIN_SEPARATOR) {
        let joined = working_dir.join(command);
        return Ok(std::path::absolute(&joined).unwrap_or(joined));
    }

    which::which(command).map_err(|source| ExeczoneError::ToolchainMissing {
        command: command.to_string(),
        source,
    })
}

async fn feed_stdin(mut stdin: ChildStdin, lines: &[String]) {
    let result = async {
        for line in lines {
            stdin.write_all(line.as_bytes()).await?;
            stdin.write_all(b"\n").await?;
        }
        stdin.flush().await
    }
    .await;

    // A child that exits without reading all of its input is not an error.
    if let Err(e) = result {
        debug!(error = %e, "stopped writing stdin early");
    }
    // Dropping `stdin` closes the pipe and signals end-of-input.
}

async fn drain<R: AsyncRead + Unpin>(mut reader: R) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf).await?;
    Ok(buf)
}

/// Resolve once `pid` has exited, without reaping it.
///
/// The zombie stays until `Child::wait` collects it. SIGCHLD is shared by
/// every child of this process, so each wakeup rechecks this pid.
async fn exited(pid: Pid, sigchld: &mut tokio::signal::unix::Signal) -> Result<()> {
    let flags = WaitPidFlag::WEXITED | WaitPidFlag::WNOWAIT | WaitPidFlag::WNOHANG;
    loop {
        match waitid(Id::Pid(pid), flags) {
            Ok(WaitStatus::StillAlive) => {}
            Ok(_) => return Ok(()),
            Err(Errno::EINTR) => continue,
            Err(e) => {
                return Err(ExeczoneError::Stream(format!("waiting for pid {pid}: {e}")));
            }
        }
        tokio::select! {
            _ = sigchld.recv() => {}
            _ = tokio::time::sleep(EXIT_POLL_INTERVAL) => {}
        }
    }
}

/// Fallback recheck in case a SIGCHLD wakeup is coalesced away.
const EXIT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// SIGKILL every process in the group led by `pid`. An empty group is fine.
fn kill_group(pid: Pid) -> nix::Result<()> {
    match killpg(pid, Signal::SIGKILL) {
        Err(Errno::ESRCH) => Ok(()),
        other => other,
    }
}
