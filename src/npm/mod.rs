//! The npm client: builds command lines, resolves the npm executable, and
//! maps subprocess outcomes to typed failures.

use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use crate::exec::{shell_join, ExecStatus, ExecutableLocator, ProcessRunner};

/// Name of the program resolved on the search path.
pub const NPM_PROGRAM: &str = "npm";

/// Applied when a package does not override the subprocess timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Failures an npm operation can surface.
#[derive(Debug)]
pub enum NpmError {
    /// The npm executable could not be resolved on the search path.
    NpmNotFound,
    /// npm was invoked but did not exit cleanly. `command` is the exact
    /// quoted command line that was attempted; `code` is `None` when the
    /// process was killed by a signal or by the timeout.
    CommandFailed {
        command: String,
        code: Option<i32>,
    },
}

impl std::fmt::Display for NpmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NpmError::NpmNotFound => {
                write!(f, "The npm executable could not be found.")
            }
            NpmError::CommandFailed {
                command,
                code: Some(code),
            } => {
                write!(f, "Execution of {} failed with exit code {}.", command, code)
            }
            NpmError::CommandFailed { command, code: None } => {
                write!(f, "Execution of {} failed.", command)
            }
        }
    }
}

impl std::error::Error for NpmError {}

/// Something that can perform npm operations for a project directory.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NpmClient: Send + Sync {
    /// True iff the npm executable can be resolved right now.
    fn is_available(&self) -> bool;

    /// `npm install` (plus `--production` when `dev_mode` is false) in
    /// `path`, or in the current directory when `path` is `None`.
    async fn install<'a>(
        &self,
        path: Option<&'a Path>,
        dev_mode: bool,
        timeout: Option<Duration>,
    ) -> Result<()>;

    /// `npm update` in `path`, or in the current directory.
    async fn update<'a>(&self, path: Option<&'a Path>, timeout: Option<Duration>) -> Result<()>;
}

/// Runs the real npm binary through a [`ProcessRunner`].
///
/// The resolved npm path is memoized for the lifetime of the client; a
/// failed lookup is retried on the next call, since `PATH` can change
/// between calls.
pub struct CommandNpmClient<L: ExecutableLocator, R: ProcessRunner> {
    locator: L,
    runner: R,
    npm_path: OnceLock<PathBuf>,
}

impl<L: ExecutableLocator, R: ProcessRunner> CommandNpmClient<L, R> {
    pub fn new(locator: L, runner: R) -> Self {
        CommandNpmClient {
            locator,
            runner,
            npm_path: OnceLock::new(),
        }
    }

    fn npm_path(&self) -> Result<&Path, NpmError> {
        if let Some(path) = self.npm_path.get() {
            return Ok(path);
        }
        match self.locator.locate(NPM_PROGRAM) {
            Some(path) => {
                debug!("Resolved npm at {:?}", path);
                Ok(self.npm_path.get_or_init(|| path))
            }
            None => Err(NpmError::NpmNotFound),
        }
    }

    async fn run_npm(
        &self,
        argv: Vec<String>,
        working_dir: Option<&Path>,
        timeout: Option<Duration>,
    ) -> Result<()> {
        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);

        // Spawn failures propagate unchanged; they are environment errors,
        // not npm failures.
        let report = self.runner.run(&argv, working_dir, timeout).await?;
        if !report.output.is_empty() {
            print!("{}", report.output);
        }

        match report.status {
            ExecStatus::Exited(0) => Ok(()),
            ExecStatus::Exited(code) => Err(NpmError::CommandFailed {
                command: shell_join(&argv),
                code: Some(code),
            }
            .into()),
            ExecStatus::Signaled | ExecStatus::TimedOut => Err(NpmError::CommandFailed {
                command: shell_join(&argv),
                code: None,
            }
            .into()),
        }
    }
}

#[async_trait]
impl<L: ExecutableLocator, R: ProcessRunner> NpmClient for CommandNpmClient<L, R> {
    fn is_available(&self) -> bool {
        self.npm_path().is_ok()
    }

    #[tracing::instrument(skip(self))]
    async fn install<'a>(
        &self,
        path: Option<&'a Path>,
        dev_mode: bool,
        timeout: Option<Duration>,
    ) -> Result<()> {
        let npm = self.npm_path()?;
        let mut argv = vec![npm.display().to_string(), "install".to_string()];
        if !dev_mode {
            argv.push("--production".to_string());
        }
        self.run_npm(argv, path, timeout).await
    }

    #[tracing::instrument(skip(self))]
    async fn update<'a>(&self, path: Option<&'a Path>, timeout: Option<Duration>) -> Result<()> {
        let npm = self.npm_path()?;
        let argv = vec![npm.display().to_string(), "update".to_string()];
        self.run_npm(argv, path, timeout).await
    }
}
