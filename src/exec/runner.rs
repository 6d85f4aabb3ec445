//! Subprocess execution with a per-call working directory and a bounded wait.

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// How a bounded subprocess run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecStatus {
    /// The process exited on its own with this code.
    Exited(i32),
    /// The process was terminated by a signal (Unix only).
    Signaled,
    /// The timeout expired and the process was killed.
    TimedOut,
}

/// Outcome of one subprocess run. `output` is combined stdout + stderr.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecReport {
    pub status: ExecStatus,
    pub output: String,
}

impl ExecReport {
    pub fn success(&self) -> bool {
        matches!(self.status, ExecStatus::Exited(0))
    }
}

/// Something that can run a command line to completion.
///
/// A nonzero exit is data, not an error: `Err` is reserved for the OS
/// refusing to spawn at all, which callers treat as fatal.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    async fn run<'a>(
        &self,
        argv: &'a [String],
        working_dir: Option<&'a Path>,
        timeout: Duration,
    ) -> Result<ExecReport>;
}

/// Runs commands via tokio. The working directory is passed to the spawn
/// call, so the process-wide current directory is never touched and no
/// serialization lock is needed.
pub struct TokioProcessRunner;

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    #[tracing::instrument(skip(self))]
    async fn run<'a>(
        &self,
        argv: &'a [String],
        working_dir: Option<&'a Path>,
        timeout: Duration,
    ) -> Result<ExecReport> {
        let (program, args) = argv
            .split_first()
            .context("Cannot run an empty command line")?;

        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = working_dir {
            command.current_dir(dir);
        }

        debug!(
            "Running {} in {:?} with timeout {:?}",
            shell_join(argv),
            working_dir,
            timeout
        );

        let child = command
            .spawn()
            .with_context(|| format!("Failed to spawn {}", shell_join(argv)))?;

        // Dropping the wait future on timeout kills the child via
        // kill_on_drop.
        match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(outcome) => {
                let outcome = outcome
                    .with_context(|| format!("Failed to collect output of {}", shell_join(argv)))?;

                let mut output = String::from_utf8_lossy(&outcome.stdout).into_owned();
                output.push_str(&String::from_utf8_lossy(&outcome.stderr));

                let status = match outcome.status.code() {
                    Some(code) => ExecStatus::Exited(code),
                    None => ExecStatus::Signaled,
                };
                Ok(ExecReport { status, output })
            }
            Err(_) => {
                debug!("{} timed out after {:?}", shell_join(argv), timeout);
                Ok(ExecReport {
                    status: ExecStatus::TimedOut,
                    output: String::new(),
                })
            }
        }
    }
}

/// Render an argv as a single deterministic command line, quoting each
/// token that is not shell-safe. Used for error messages and logs only;
/// nothing is ever passed through a shell.
pub fn shell_join(argv: &[String]) -> String {
    argv.iter()
        .map(|token| shell_quote(token))
        .collect::<Vec<_>>()
        .join(" ")
}

fn shell_quote(token: &str) -> String {
    let safe = !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_=/.:@%+,".contains(c));

    if safe {
        token.to_string()
    } else {
        format!("'{}'", token.replace('\'', r"'\''"))
    }
}
