// SPDX-FileCopyrightText: 2024 Foundation Devices, Inc. <hello@foundation.xyz>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::artifacts;
use crate::config::{BuildConf, Tools};
use crate::error::{Error, Result};
use crate::probe;
use crate::runner::{self, CommandRunner};
use crate::sample::{Sample, Target};

/// Clean, build, flash and collect every target of `sample`, stopping at the first failure.
///
/// Image reports of collected binaries are written to `stdout`.
pub fn build_sample(
    runner: &mut impl CommandRunner,
    tools: &Tools,
    sample: &Sample,
    conf: BuildConf,
    stdout: &mut impl Write,
) -> Result<()> {
    let snrs = probe::find_snr(runner, tools)?;
    if snrs.is_empty() {
        tracing::warn!("No snrs connected");
    } else {
        tracing::info!("Connected snrs: {snrs:?}");
    }

    if sample.targets.is_empty() {
        tracing::warn!("No target selected in {}, nothing to build", sample.dir.display());
    }

    for target in &sample.targets {
        build_target(runner, tools, sample, target, conf, stdout)?;
    }

    if conf.binaries {
        artifacts::bundle(&sample.bin_dir(), &sample.archive, consts::ARCHIVE_NAME)?;
    }
    Ok(())
}

fn build_target(
    runner: &mut impl CommandRunner,
    tools: &Tools,
    sample: &Sample,
    target: &Target,
    conf: BuildConf,
    stdout: &mut impl Write,
) -> Result<()> {
    if conf.pristine {
        remove_build_dir(&target.build_dir)?;
    }

    tracing::info!("Building {} core for {}...", target.name, target.board);
    runner::run(runner, &target.build_command(tools, &sample.dir))?;

    if conf.program {
        tracing::info!("Flashing {} core...", target.name);
        runner::run(runner, &target.flash_command(tools, &sample.dir))?;
    }

    if conf.binaries {
        artifacts::collect(target, &sample.bin_dir(), stdout)?;
    }
    Ok(())
}

fn remove_build_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    tracing::info!("Removing build folder {}...", path.display());
    fs::remove_dir_all(path).map_err(|source| Error::RemoveBuildDir {
        path: path.to_path_buf(),
        source,
    })
}
