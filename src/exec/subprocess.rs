//! Subprocess execution for deployment steps
//!
//! Commands run one at a time with inherited stdio. Output is never captured;
//! only the exit status and the elapsed time come back to the caller.

use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use crate::utils::tools::resolve_program;

/// A fully described external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Program name or path, looked up on PATH before spawning
    pub program: String,

    /// Arguments passed verbatim
    pub args: Vec<OsString>,

    /// Working directory, or the caller's when unset
    pub cwd: Option<PathBuf>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Render the command line for display
    pub fn display(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            let arg = arg.to_string_lossy();
            line.push(' ');
            if arg.contains(' ') {
                line.push('"');
                line.push_str(&arg);
                line.push('"');
            } else {
                line.push_str(&arg);
            }
        }
        line
    }
}

/// Result of a subprocess execution
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Whether the command succeeded (exit code 0)
    pub success: bool,

    /// Process exit code, -1 when terminated by a signal
    pub exit_code: i32,

    /// Execution duration
    pub duration: Duration,
}

impl CommandResult {
    /// Create a CommandResult from an exit status
    pub fn from_status(status: ExitStatus, duration: Duration) -> Self {
        Self {
            success: status.success(),
            exit_code: status.code().unwrap_or(-1),
            duration,
        }
    }

    /// A successful result that took no time, used when nothing was spawned
    pub fn skipped() -> Self {
        Self {
            success: true,
            exit_code: 0,
            duration: Duration::ZERO,
        }
    }
}

/// Something that can execute a [`CommandSpec`] to completion
///
/// `Err` means the process could not be started at all. A process that ran
/// and exited non-zero is an `Ok` with `success == false`.
pub trait CommandRunner {
    fn run(&mut self, spec: &CommandSpec) -> Result<CommandResult>;
}

/// Runs commands on the host, blocking until each exits
#[derive(Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, spec: &CommandSpec) -> Result<CommandResult> {
        let program = resolve_program(&spec.program);
        let start = Instant::now();

        let mut cmd = Command::new(&program);
        cmd.args(&spec.args);
        if let Some(cwd) = &spec.cwd {
            cmd.current_dir(cwd);
        }
        cmd.stdin(Stdio::inherit());
        cmd.stdout(Stdio::inherit());
        cmd.stderr(Stdio::inherit());

        let status = cmd
            .status()
            .with_context(|| format!("Failed to execute {}", program.display()))?;

        Ok(CommandResult::from_status(status, start.elapsed()))
    }
}

/// Prints commands instead of running them
#[derive(Debug, Default)]
pub struct DryRunRunner;

impl CommandRunner for DryRunRunner {
    fn run(&mut self, spec: &CommandSpec) -> Result<CommandResult> {
        match &spec.cwd {
            Some(cwd) => println!("  [DRY RUN] Would run: {} (in {})", spec.display(), cwd.display()),
            None => println!("  [DRY RUN] Would run: {}", spec.display()),
        }
        Ok(CommandResult::skipped())
    }
}
