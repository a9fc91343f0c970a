// SPDX-FileCopyrightText: 2024 Foundation Devices, Inc. <hello@foundation.xyz>
// SPDX-License-Identifier: GPL-3.0-or-later

//! Spawning of the external tools.
//!
//! Everything that leaves the process goes through [`CommandRunner`], so the
//! build flow can be exercised without `west` or a probe attached.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{Error, Result};

/// Exit code reported when a tool was terminated by a signal.
const KILLED_EXIT_CODE: i32 = -1;

/// A fully described invocation of an external tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: String,
    pub args: Vec<OsString>,
    pub current_dir: Option<PathBuf>,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

pub trait CommandRunner {
    /// Run with inherited stdio and return the exit code.
    fn status(&mut self, command: &ToolCommand) -> std::io::Result<i32>;

    /// Run with stdout captured and return the exit code with the captured text.
    fn output(&mut self, command: &ToolCommand) -> std::io::Result<(i32, String)>;
}

/// Runs tools as child processes of the builder.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl SystemRunner {
    fn command(command: &ToolCommand) -> Command {
        tracing::debug!("Running `{command}`");
        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args);
        if let Some(dir) = &command.current_dir {
            cmd.current_dir(dir);
        }
        cmd
    }
}

impl CommandRunner for SystemRunner {
    fn status(&mut self, command: &ToolCommand) -> std::io::Result<i32> {
        let status = Self::command(command).status()?;
        Ok(status.code().unwrap_or(KILLED_EXIT_CODE))
    }

    fn output(&mut self, command: &ToolCommand) -> std::io::Result<(i32, String)> {
        let output = Self::command(command).stderr(Stdio::inherit()).output()?;
        Ok((
            output.status.code().unwrap_or(KILLED_EXIT_CODE),
            String::from_utf8_lossy(&output.stdout).into_owned(),
        ))
    }
}

/// Run `command` and fail unless it exits with code 0.
pub fn run(runner: &mut impl CommandRunner, command: &ToolCommand) -> Result<()> {
    let code = runner.status(command).map_err(|source| Error::Spawn {
        command: command.to_string(),
        source,
    })?;
    check(command, code)
}

/// Run `command`, fail unless it exits with code 0, and return its stdout.
pub fn capture(runner: &mut impl CommandRunner, command: &ToolCommand) -> Result<String> {
    let (code, stdout) = runner.output(command).map_err(|source| Error::Spawn {
        command: command.to_string(),
        source,
    })?;
    check(command, code)?;
    Ok(stdout)
}

fn check(command: &ToolCommand, code: i32) -> Result<()> {
    if code != 0 {
        return Err(Error::Tool {
            command: command.to_string(),
            code,
        });
    }
    Ok(())
}
