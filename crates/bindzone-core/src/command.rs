//! External BIND tooling: zone/config checkers and the reload command.
//!
//! The editor only needs to know whether a command exited with status zero.
//! Output goes straight to the operator's terminal.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use crate::error::{Result, ZoneError};

/// Default time allowed for an external command.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(60);

/// A program and its arguments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Executable name or path
    pub program: String,
    /// Arguments
    #[serde(default)]
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Command with no arguments
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append an argument
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Parse a whitespace-separated command line (`rndc reload`)
    pub fn parse(command_line: &str) -> Result<Self> {
        let mut parts = command_line.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| ZoneError::Config("empty command".to_string()))?;
        Ok(Self {
            program: program.to_string(),
            args: parts.map(str::to_string).collect(),
        })
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// How an external command ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandStatus {
    /// Exit code, `None` when killed by a signal
    pub code: Option<i32>,
}

impl CommandStatus {
    /// Returns true on a zero exit code
    #[must_use]
    pub const fn success(&self) -> bool {
        matches!(self.code, Some(0))
    }

    /// Fail with [`ZoneError::ExternalCommandFailed`] unless the command succeeded
    pub fn check(self, command: &CommandSpec) -> Result<()> {
        if self.success() {
            return Ok(());
        }
        Err(ZoneError::ExternalCommandFailed {
            command: command.to_string(),
            reason: self.code.map_or_else(
                || "terminated by signal".to_string(),
                |code| format!("exit status {code}"),
            ),
        })
    }
}

/// Runs external commands
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `command` to completion.
    ///
    /// A command that cannot be started is an error; a command that runs
    /// and exits non-zero is reported through the returned status.
    async fn run(&self, command: &CommandSpec) -> Result<CommandStatus>;
}

/// Runs commands as child processes with inherited stdio
#[derive(Debug, Clone)]
pub struct SystemRunner {
    timeout: Duration,
}

impl SystemRunner {
    /// Runner that gives up on commands after `timeout`
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new(DEFAULT_COMMAND_TIMEOUT)
    }
}

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, command: &CommandSpec) -> Result<CommandStatus> {
        debug!(command = %command, "running external command");

        let failed = |reason: String| ZoneError::ExternalCommandFailed {
            command: command.to_string(),
            reason,
        };

        let mut child = tokio::process::Command::new(&command.program)
            .args(&command.args)
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| failed(format!("could not start: {e}")))?;

        let status = tokio::time::timeout(self.timeout, child.wait())
            .await
            .map_err(|_| failed(format!("timed out after {}s", self.timeout.as_secs())))?
            .map_err(|e| failed(e.to_string()))?;

        Ok(CommandStatus {
            code: status.code(),
        })
    }
}

/// The BIND utilities the editor calls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toolchain {
    /// Zone checker, called with `<zone> <file>` appended
    pub checkzone: CommandSpec,
    /// Configuration checker, called as is
    pub checkconf: CommandSpec,
    /// Service reload
    pub reload: CommandSpec,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self {
            checkzone: CommandSpec::new("named-checkzone"),
            checkconf: CommandSpec::new("named-checkconf"),
            reload: CommandSpec::new("rndc").arg("reload"),
        }
    }
}

impl Toolchain {
    /// Zone check invocation for one zone
    #[must_use]
    pub fn checkzone_for(&self, zone: &str, file: &Path) -> CommandSpec {
        self.checkzone
            .clone()
            .arg(zone)
            .arg(file.display().to_string())
    }
}
