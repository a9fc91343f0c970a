// SPDX-FileCopyrightText: 2024 Foundation Devices, Inc. <hello@foundation.xyz>
// SPDX-License-Identifier: GPL-3.0-or-later

//! The samples this builder knows about and the west targets they expand to.

use std::path::{Path, PathBuf};

use consts::{broadcast_source, iso_attack};

use crate::config::Tools;
use crate::runner::ToolCommand;

/// Which cores of the nRF5340 to build for the broadcast source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Core {
    App,
    #[value(alias = "net")]
    Network,
    Both,
}

impl Core {
    fn includes_app(self) -> bool {
        matches!(self, Core::App | Core::Both)
    }

    fn includes_net(self) -> bool {
        matches!(self, Core::Network | Core::Both)
    }
}

/// Board flavour for the ISO attack sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Variant {
    #[default]
    Dk,
    Dongle,
}

impl Variant {
    pub fn board(self) -> &'static str {
        match self {
            Variant::Dk => iso_attack::DK_BOARD,
            Variant::Dongle => iso_attack::DONGLE_BOARD,
        }
    }
}

/// One firmware image built by a single `west build`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Short label used in logs.
    pub name: &'static str,
    pub board: &'static str,
    pub build_dir: PathBuf,
    /// Application sources when they are not the sample folder itself.
    pub source_dir: Option<PathBuf>,
    /// Extra Kconfig fragment passed through to CMake.
    pub overlay: Option<&'static str>,
    /// File name of the collected image inside the `bin` folder.
    pub artifact: &'static str,
}

impl Target {
    pub fn build_command(&self, tools: &Tools, sample_dir: &Path) -> ToolCommand {
        let mut cmd = ToolCommand::new(&tools.west).arg("build");
        if let Some(source_dir) = &self.source_dir {
            cmd = cmd.arg(source_dir);
        }
        cmd = cmd
            .args(["-b", self.board, "--build-dir"])
            .arg(&self.build_dir)
            .current_dir(sample_dir);
        if let Some(overlay) = self.overlay {
            cmd = cmd.args(["--".to_string(), format!("-DOVERLAY_CONFIG={overlay}")]);
        }
        cmd
    }

    pub fn flash_command(&self, tools: &Tools, sample_dir: &Path) -> ToolCommand {
        ToolCommand::new(&tools.west)
            .args(["flash", "--build-dir"])
            .arg(&self.build_dir)
            .current_dir(sample_dir)
    }

    /// Image left behind by a successful build.
    pub fn image(&self) -> PathBuf {
        self.build_dir.join(consts::ZEPHYR_HEX)
    }
}

/// A sample folder together with the targets selected on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub dir: PathBuf,
    pub targets: Vec<Target>,
    /// Images bundled into `source.zip` once all of them have been collected.
    pub archive: Vec<&'static str>,
}

impl Sample {
    pub fn bin_dir(&self) -> PathBuf {
        self.dir.join(consts::BIN_DIR)
    }

    /// nRF5340 broadcast audio source. Without a core selection nothing is built.
    pub fn broadcast_source(samples_dir: &Path, core: Option<Core>) -> Self {
        let dir = samples_dir.join(broadcast_source::SAMPLE);
        let mut targets = Vec::new();
        if let Some(core) = core {
            if core.includes_app() {
                targets.push(Target {
                    name: "app",
                    board: broadcast_source::APP_BOARD,
                    build_dir: dir.join(broadcast_source::APP_BUILD_DIR),
                    source_dir: None,
                    overlay: None,
                    artifact: broadcast_source::APP_ARTIFACT,
                });
            }
            if core.includes_net() {
                targets.push(Target {
                    name: "net",
                    board: broadcast_source::NET_BOARD,
                    build_dir: dir.join(broadcast_source::NET_BUILD_DIR),
                    source_dir: Some(dir.join(broadcast_source::NET_SOURCE_DIR)),
                    overlay: Some(broadcast_source::NET_OVERLAY),
                    artifact: broadcast_source::NET_ARTIFACT,
                });
            }
        }
        Self {
            dir,
            targets,
            archive: vec![broadcast_source::APP_ARTIFACT, broadcast_source::NET_ARTIFACT],
        }
    }

    /// nRF52840 ISO attacker ("mallory").
    pub fn iso_attack(samples_dir: &Path, variant: Variant) -> Self {
        let dir = samples_dir.join(iso_attack::SAMPLE);
        let target = Target {
            name: "mallory",
            board: variant.board(),
            build_dir: dir.join(iso_attack::BUILD_DIR),
            source_dir: None,
            overlay: None,
            artifact: iso_attack::ARTIFACT,
        };
        Self {
            dir,
            targets: vec![target],
            archive: Vec::new(),
        }
    }
}
