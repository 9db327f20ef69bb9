// SPDX-FileCopyrightText: 2023 Rivos Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Offline enrollment: replays DICE and RIoT Core over a compiled firmware
//! image to obtain the Alias certificate a device will present.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{ensure, Context};
use log::info;

use crate::boot;
use crate::registration::RegistrationId;
use crate::riot::{RiotConfig, X509Provider};
use crate::uds::{StaticUdsStore, UniqueDeviceSecret};

pub mod input;
pub mod map;

pub use map::{LinkerMap, MapFileImage};

/// `<project>.bin` and `<project>.map`, checked to exist.
pub fn input_files(project: &Path) -> anyhow::Result<(PathBuf, PathBuf)> {
    let with_suffix = |suffix: &str| {
        let mut path = OsString::from(project.as_os_str());
        path.push(suffix);
        PathBuf::from(path)
    };
    let (bin, map) = (with_suffix(".bin"), with_suffix(".map"));

    for path in [&bin, &map] {
        ensure!(path.is_file(), "unable to open file {}", path.display());
    }

    Ok((bin, map))
}

/// Everything one enrollment run needs.
pub struct EnrollmentRequest {
    /// Project path without extension.
    pub project: PathBuf,
    pub uds: UniqueDeviceSecret,
    pub registration_id: RegistrationId,
    /// Where `<registration id>.pem` is written.
    pub out_dir: PathBuf,
    pub config: RiotConfig,
}

/// Runs the enrollment and returns the path of the written certificate.
///
/// The certificate file is only created once every step has succeeded.
pub fn enroll(request: EnrollmentRequest) -> anyhow::Result<PathBuf> {
    let EnrollmentRequest {
        project,
        uds,
        registration_id,
        out_dir,
        config,
    } = request;

    let (bin, map) = input_files(&project)?;
    let image = MapFileImage::load(&bin, &map)?;

    let identity = boot::start(&StaticUdsStore::new(uds), &image, &registration_id, &config)
        .context("DICE/RIoT derivation failed")?;

    let path = out_dir.join(format!("{}.pem", identity.common_name()));
    fs::write(&path, identity.certificate())
        .with_context(|| format!("unable to write {}", path.display()))?;
    info!("Alias certificate written to {}", path.display());

    Ok(path)
}
