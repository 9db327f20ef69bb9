// SPDX-FileCopyrightText: 2023 Rivos Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Registration ids name a device in the provisioning service and become
//! the common name of its Alias certificate.

use core::fmt::{self, Write};

use arrayvec::ArrayString;
use log::error;

use crate::{Error, Result};

/// Longest registration id accepted from a caller.
pub const REGISTRATION_ID_MAX_LENGTH: usize = 128;

/// Longest registration id generated from the device MAC and firmware version.
pub const AUTO_GEN_REGISTRATION_ID_MAX_LENGTH: usize = 32;

/// MAC address length, in hex digits.
pub const MAC_ADDRESS_LENGTH: usize = 12;

/// A validated registration id: 1 to 128 characters out of `[a-z0-9-]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistrationId(ArrayString<REGISTRATION_ID_MAX_LENGTH>);

impl RegistrationId {
    /// Validates a caller supplied registration id.
    ///
    /// Invalid ids are rejected, never truncated or rewritten.
    pub fn parse(id: &str) -> Result<Self> {
        if id.is_empty() {
            error!("registration id is empty");
            return Err(Error::EmptyRegistrationId);
        }

        let len = id.chars().count();
        if len > REGISTRATION_ID_MAX_LENGTH {
            error!(
                "registration id exceeds maximum length {}",
                REGISTRATION_ID_MAX_LENGTH
            );
            return Err(Error::RegistrationIdTooLong {
                len,
                max: REGISTRATION_ID_MAX_LENGTH,
            });
        }

        if let Some((position, found)) = id
            .chars()
            .enumerate()
            .find(|(_, c)| !matches!(c, 'a'..='z' | '0'..='9' | '-'))
        {
            error!("registration id only supports lowercase alphanumerics and hyphens");
            return Err(Error::InvalidRegistrationIdChar { position, found });
        }

        ArrayString::from(id)
            .map(RegistrationId)
            .map_err(|_| Error::RegistrationIdTooLong {
                len,
                max: REGISTRATION_ID_MAX_LENGTH,
            })
    }

    /// Generates `az-<mac>v<firmware version>` with every '.' turned into 'v'.
    pub fn from_device(mac: &MacAddress, version: &FirmwareVersion) -> Result<Self> {
        let mut id = ArrayString::<REGISTRATION_ID_MAX_LENGTH>::new();
        write!(id, "az-{}v", mac.as_str()).map_err(|_| Error::InvalidMacAddress)?;
        for c in version.as_str().chars() {
            id.try_push(if c == '.' { 'v' } else { c })
                .map_err(|_| Error::InvalidFirmwareVersion)?;
        }

        if id.len() > AUTO_GEN_REGISTRATION_ID_MAX_LENGTH {
            error!(
                "generated registration id exceeds {} characters",
                AUTO_GEN_REGISTRATION_ID_MAX_LENGTH
            );
            return Err(Error::RegistrationIdTooLong {
                len: id.len(),
                max: AUTO_GEN_REGISTRATION_ID_MAX_LENGTH,
            });
        }

        Self::parse(&id)
    }

    /// Uses `supplied` unless it is absent or empty, in which case the id is
    /// generated from the device MAC address and firmware version.
    pub fn resolve(supplied: Option<&str>, mac: &str, firmware_version: &str) -> Result<Self> {
        match supplied {
            Some(id) if !id.is_empty() => Self::parse(id),
            _ => Self::from_device(
                &MacAddress::parse(mac)?,
                &FirmwareVersion::parse(firmware_version)?,
            ),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A device MAC address as 12 lowercase hex digits, without separators.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MacAddress(ArrayString<MAC_ADDRESS_LENGTH>);

impl MacAddress {
    /// Accepts `aabbccddeeff` or `aa:bb:cc:dd:ee:ff`, in either case.
    pub fn parse(mac: &str) -> Result<Self> {
        let mut value = ArrayString::<MAC_ADDRESS_LENGTH>::new();
        for c in mac.chars().filter(|c| *c != ':') {
            if !c.is_ascii_hexdigit() {
                return Err(Error::InvalidMacAddress);
            }
            value
                .try_push(c.to_ascii_lowercase())
                .map_err(|_| Error::InvalidMacAddress)?;
        }

        if value.len() != MAC_ADDRESS_LENGTH {
            return Err(Error::InvalidMacAddress);
        }

        Ok(MacAddress(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A firmware version in `num.num.num` form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FirmwareVersion(ArrayString<AUTO_GEN_REGISTRATION_ID_MAX_LENGTH>);

impl FirmwareVersion {
    pub fn parse(version: &str) -> Result<Self> {
        let mut parts = 0;
        for part in version.split('.') {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(Error::InvalidFirmwareVersion);
            }
            parts += 1;
        }

        if parts != 3 {
            return Err(Error::InvalidFirmwareVersion);
        }

        ArrayString::from(version)
            .map(FirmwareVersion)
            .map_err(|_| Error::InvalidFirmwareVersion)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
