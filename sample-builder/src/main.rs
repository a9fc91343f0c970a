// SPDX-FileCopyrightText: 2024 Foundation Devices, Inc. <hello@foundation.xyz>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::ffi::OsString;
use std::io::Write;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::cli::{Cli, Commands};
use crate::config::{BuildConf, Config, Tools};
use crate::error::{Error, Result};
use crate::runner::{CommandRunner, SystemRunner};
use crate::sample::Sample;

mod artifacts;
mod cli;
mod config;
mod error;
mod orchestrate;
mod probe;
mod runner;
mod sample;

#[cfg(test)]
mod tests;

fn main() -> std::process::ExitCode {
    main_args(
        std::env::args_os(),
        &mut SystemRunner,
        &mut std::io::stdout(),
        &mut std::io::stderr(),
    )
    .into()
}

fn main_args<I, T>(
    args: I,
    runner: &mut impl CommandRunner,
    mut stdout: impl Write,
    mut stderr: impl Write,
) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) => {
            // Clap already does the "error: {}" formatting, help and version go to stdout.
            let rendered = e.render().ansi().to_string();
            let out: &mut dyn Write = if e.use_stderr() { &mut stderr } else { &mut stdout };
            write!(out, "{rendered}").expect("write error to stderr");
            return ExitCode(e.exit_code().clamp(0, 255) as u8);
        }
    };

    init_tracing(cli.verbose);

    match run(cli, runner, &mut stdout) {
        Ok(()) => ExitCode(0),
        Err(e) => {
            writeln!(stderr, "{} {e}", "error:".bold().red()).expect("write error to stderr");
            ExitCode(1)
        }
    }
}

fn default_log_level(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

/// A non-empty `RUST_LOG` wins over the level picked by `--verbose`.
fn log_directives(verbose: bool, rust_log: Option<&str>) -> &str {
    match rust_log {
        Some(directives) if !directives.trim().is_empty() => directives,
        _ => default_log_level(verbose),
    }
}

fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    EnvFilter::try_new(log_directives(verbose, rust_log))
        .unwrap_or_else(|_| EnvFilter::new(default_log_level(verbose)))
}

fn init_tracing(verbose: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = log_filter(verbose, rust_log.as_deref());

    // Tests drive main_args repeatedly, only the first subscriber sticks.
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .try_init();
}

fn run(cli: Cli, runner: &mut impl CommandRunner, mut stdout: impl Write) -> Result<()> {
    let config = cli
        .config
        .as_deref()
        .map(Config::load)
        .transpose()?
        .unwrap_or_default();
    let tools = Tools::resolve(&config, |key| std::env::var(key).ok());
    let samples_dir = config::samples_dir(&config);

    match cli.command {
        Commands::BroadcastSource { build, core } => {
            let sample = Sample::broadcast_source(&samples_dir, core);
            orchestrate::build_sample(runner, &tools, &sample, BuildConf::from(&build), &mut stdout)
        }
        Commands::IsoAttack { build, dongle } => {
            let sample = Sample::iso_attack(&samples_dir, cli::variant(dongle));
            orchestrate::build_sample(runner, &tools, &sample, BuildConf::from(&build), &mut stdout)
        }
        Commands::Probe => {
            for snr in probe::find_snr(runner, &tools)? {
                writeln!(stdout, "{snr}").map_err(Error::Stdout)?;
            }
            Ok(())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ExitCode(u8);

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        code.0.into()
    }
}
