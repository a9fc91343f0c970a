// SPDX-FileCopyrightText: 2024 Foundation Devices, Inc. <hello@foundation.xyz>
// SPDX-License-Identifier: GPL-3.0-or-later

#![no_std]

/// Folder holding the sample folders, relative to the workspace root.
pub const SAMPLES_DIR: &str = "samples/bluetooth";

/// Folder inside a sample where collected images and archives are written.
pub const BIN_DIR: &str = "bin";

/// Image produced by a Zephyr build, relative to its build directory.
pub const ZEPHYR_HEX: &str = "zephyr/zephyr.hex";

/// Name of the archive bundling the collected images of a multi-core sample.
pub const ARCHIVE_NAME: &str = "source.zip";

/// Default build and flash tool.
pub const WEST: &str = "west";

/// Default probe enumeration tool.
pub const NRFJPROG: &str = "nrfjprog";

/// Broadcast audio source, running on both cores of the nRF5340 Audio DK.
pub mod broadcast_source {
    /// Sample folder name.
    pub const SAMPLE: &str = "broadcast_audio_source";

    /// Application core board.
    pub const APP_BOARD: &str = "nrf5340_audio_dk_nrf5340_cpuapp";
    /// Network core board.
    pub const NET_BOARD: &str = "nrf5340_audio_dk_nrf5340_cpunet";

    pub const APP_BUILD_DIR: &str = "build_app";
    pub const NET_BUILD_DIR: &str = "build_net";

    /// The network core runs the HCI RPMsg controller, built from a sibling sample.
    pub const NET_SOURCE_DIR: &str = "../hci_rpmsg";
    /// Kconfig overlay enabling the split link layer with broadcast isochronous streams.
    pub const NET_OVERLAY: &str = "nrf5340_cpunet_bis-bt_ll_sw_split.conf";

    pub const APP_ARTIFACT: &str = "app.hex";
    pub const NET_ARTIFACT: &str = "net.hex";
}

/// ISO attack sample, running on an nRF52840 DK or Dongle.
pub mod iso_attack {
    /// Sample folder name.
    pub const SAMPLE: &str = "iso_attack";

    pub const DK_BOARD: &str = "nrf52840dk_nrf52840";
    pub const DONGLE_BOARD: &str = "nrf52840dongle_nrf52840";

    pub const BUILD_DIR: &str = "build";

    pub const ARTIFACT: &str = "mallory.hex";
}
