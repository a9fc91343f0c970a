// SPDX-FileCopyrightText: 2024 Foundation Devices, Inc. <hello@foundation.xyz>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::CompressionMethod;

use crate::error::{Error, Result};
use crate::sample::Target;

/// Copy the image of `target` into `bin_dir`, creating the folder if needed, and report its size on `stdout`.
pub fn collect(target: &Target, bin_dir: &Path, stdout: &mut impl Write) -> Result<PathBuf> {
    fs::create_dir_all(bin_dir).map_err(|source| Error::CreateBinDir {
        path: bin_dir.to_path_buf(),
        source,
    })?;
    let from = target.image();
    let to = bin_dir.join(target.artifact);
    fs::copy(&from, &to).map_err(|source| Error::CopyArtifact {
        from: from.clone(),
        to: to.clone(),
        source,
    })?;
    tracing::info!("Copied {} image to {}", target.name, to.display());
    print_image_size(&to, stdout).map_err(Error::Stdout)?;
    Ok(to)
}

/// Data span of an Intel HEX image. `end` is exclusive and may lie just past the 32-bit space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSize {
    pub bytes: u64,
    pub start: u64,
    pub end: u64,
}

pub fn image_size(hex: &str) -> std::result::Result<Option<ImageSize>, ihex::ReaderError> {
    let mut upper_address = 0u64;
    let mut size: Option<ImageSize> = None;
    for record in ihex::Reader::new(hex) {
        match record? {
            ihex::Record::ExtendedSegmentAddress(addr) => upper_address = u64::from(addr) << 4,
            ihex::Record::ExtendedLinearAddress(addr) => upper_address = u64::from(addr) << 16,
            ihex::Record::Data { offset, value } => {
                let start = upper_address + u64::from(offset);
                let end = start + value.len() as u64;
                size = Some(match size {
                    None => ImageSize {
                        bytes: value.len() as u64,
                        start,
                        end,
                    },
                    Some(size) => ImageSize {
                        bytes: size.bytes + value.len() as u64,
                        start: size.start.min(start),
                        end: size.end.max(end),
                    },
                });
            }
            ihex::Record::StartSegmentAddress { .. }
            | ihex::Record::StartLinearAddress(_)
            | ihex::Record::EndOfFile => {}
        }
    }
    Ok(size)
}

fn print_image_size(path: &Path, stdout: &mut impl Write) -> std::io::Result<()> {
    let hex = match fs::read_to_string(path) {
        Ok(hex) => hex,
        Err(e) => {
            tracing::warn!("Could not read image {}: {e}", path.display());
            return Ok(());
        }
    };
    match image_size(&hex) {
        Ok(Some(size)) => {
            writeln!(stdout, "{} size:", path.display())?;
            writeln!(stdout, "   Bytes: {} bytes", size.bytes)?;
            writeln!(stdout, "   KiB: {:.2} KiB", size.bytes as f64 / 1024.0)?;
            writeln!(stdout, "   Range: {:#010x}..{:#010x}", size.start, size.end)?;
        }
        Ok(None) => tracing::warn!("Image {} holds no data", path.display()),
        Err(e) => tracing::warn!("Could not parse image {}: {e}", path.display()),
    }
    Ok(())
}

/// Zip `members` of `bin_dir` into `archive_name`, but only when every member is present.
pub fn bundle(bin_dir: &Path, members: &[&str], archive_name: &str) -> Result<Option<PathBuf>> {
    if members.is_empty() || !members.iter().all(|m| bin_dir.join(m).is_file()) {
        return Ok(None);
    }
    let path = bin_dir.join(archive_name);
    write_archive(&path, bin_dir, members).map_err(|source| Error::Archive {
        path: path.clone(),
        source,
    })?;
    tracing::info!("Bundled {} into {}", members.join(", "), path.display());
    Ok(Some(path))
}

fn write_archive(path: &Path, bin_dir: &Path, members: &[&str]) -> zip::result::ZipResult<()> {
    let file = fs::File::create(path)?;
    let mut archive = zip::ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for member in members {
        archive.start_file(*member, options)?;
        archive.write_all(&fs::read(bin_dir.join(member))?)?;
    }
    archive.finish()?;
    Ok(())
}
