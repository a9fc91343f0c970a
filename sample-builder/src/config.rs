// SPDX-FileCopyrightText: 2024 Foundation Devices, Inc. <hello@foundation.xyz>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::{Path, PathBuf};

/// Optional settings file passed with `--config`.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub west: Option<String>,
    pub nrfjprog: Option<String>,
    /// Folder holding the sample folders. Relative paths are taken from the config file location.
    pub samples_dir: Option<PathBuf>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, Error> {
        let config = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Config = toml::from_str(&config)?;
        if let Some(samples_dir) = config.samples_dir.take() {
            let base = path.parent().unwrap_or(Path::new(""));
            config.samples_dir = Some(base.join(samples_dir));
        }
        Ok(config)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config file format error in TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// External executables driven by the builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tools {
    pub west: String,
    pub nrfjprog: String,
}

impl Tools {
    /// Config file values win over `WEST`/`NRFJPROG` from the environment, which win over the defaults.
    pub fn resolve(config: &Config, env: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            west: config
                .west
                .clone()
                .or_else(|| env("WEST"))
                .unwrap_or_else(|| consts::WEST.to_string()),
            nrfjprog: config
                .nrfjprog
                .clone()
                .or_else(|| env("NRFJPROG"))
                .unwrap_or_else(|| consts::NRFJPROG.to_string()),
        }
    }
}

pub fn project_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir.parent().unwrap_or(manifest_dir).to_path_buf()
}

pub fn samples_dir(config: &Config) -> PathBuf {
    config
        .samples_dir
        .clone()
        .unwrap_or_else(|| project_root().join(consts::SAMPLES_DIR))
}

/// What to do with each selected target. Built once from the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildConf {
    /// Remove the build directory before building.
    pub pristine: bool,
    /// Flash the image after building.
    pub program: bool,
    /// Copy the image into the sample's `bin` folder.
    pub binaries: bool,
}
