// SPDX-FileCopyrightText: 2024 Foundation Devices, Inc. <hello@foundation.xyz>
// SPDX-License-Identifier: GPL-3.0-or-later

//! Lists debugger serial numbers through `nrfjprog --ids`.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::Tools;
use crate::error::Result;
use crate::runner::{self, CommandRunner, ToolCommand};

// The pattern is a literal, so compiling it cannot fail at runtime.
static DIGIT_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[0-9]+").expect("digit run pattern is valid"));

pub fn list_command(tools: &Tools) -> ToolCommand {
    ToolCommand::new(&tools.nrfjprog).arg("--ids")
}

/// Every maximal digit run of `text`, in order of appearance.
pub fn parse_snrs(text: &str) -> Vec<u64> {
    DIGIT_RUNS
        .find_iter(text)
        .filter_map(|run| match run.as_str().parse() {
            Ok(snr) => Some(snr),
            Err(_) => {
                tracing::warn!("Ignoring serial number out of range: {}", run.as_str());
                None
            }
        })
        .collect()
}

/// Serial numbers of the debuggers attached to this machine. An empty list is not an error.
pub fn find_snr(runner: &mut impl CommandRunner, tools: &Tools) -> Result<Vec<u64>> {
    let stdout = runner::capture(runner, &list_command(tools))?;
    let snrs = parse_snrs(&stdout);
    if snrs.is_empty() {
        tracing::warn!("No programmer/debugger connected to PC");
    }
    Ok(snrs)
}
