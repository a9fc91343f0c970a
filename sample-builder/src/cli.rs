// SPDX-FileCopyrightText: 2024 Foundation Devices, Inc. <hello@foundation.xyz>
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::BuildConf;
use crate::sample::{Core, Variant};

#[derive(Parser)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
    /// Log every spawned command
    #[arg(short, long, global = true)]
    pub verbose: bool,
    /// TOML file overriding the tool locations and the samples folder
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build and program the nRF5340 broadcast audio source
    BroadcastSource {
        #[command(flatten)]
        build: BuildArgs,
        /// Select which cores to include in build
        #[arg(short, long, value_enum)]
        core: Option<Core>,
    },

    /// Build and program the nRF52840 ISO attack sample
    IsoAttack {
        #[command(flatten)]
        build: BuildArgs,
        /// Use nRF52840 Dongle instead of DK
        #[arg(long)]
        dongle: bool,
    },

    /// List serial numbers of the connected debuggers
    Probe,
}

#[derive(Args)]
pub struct BuildArgs {
    /// Program and reboot the board after building
    #[arg(short, long)]
    pub program: bool,
    /// Build cleanly
    #[arg(long)]
    pub pristine: bool,
    /// Copy the compiled binaries into the bin folder
    #[arg(short, long)]
    pub binaries: bool,
}

impl From<&BuildArgs> for BuildConf {
    fn from(args: &BuildArgs) -> Self {
        BuildConf {
            pristine: args.pristine,
            program: args.program,
            binaries: args.binaries,
        }
    }
}

pub fn variant(dongle: bool) -> Variant {
    if dongle {
        Variant::Dongle
    } else {
        Variant::Dk
    }
}
