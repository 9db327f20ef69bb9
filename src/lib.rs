// Copyright (c) 2022 by Rivos Inc.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! DICE measured boot and RIoT device identity for the MXChip DevKit family.
//!
//! The DICE layer measures the RIoT Core image and mixes it with the Unique
//! Device Secret into a Compound Device Identifier. RIoT then derives the
//! DeviceID and Alias key pairs and issues the PEM credentials handed to the
//! provisioning client.
#![cfg_attr(not(any(feature = "std", test)), no_std)]

use core::fmt;

/// Length of every digest (SHA-256) handled by this crate.
pub const DIGEST_LENGTH: usize = 32;

/// Length of the Unique Device Secret.
pub const UDS_LENGTH: usize = 32;

/// DICE/RIoT errors
#[derive(Debug)]
pub enum Error {
    /// The Unique Device Secret tag does not match `DICE_UDS_TAG`.
    UdsNotProvisioned(u32),

    /// The RIoT Core image is below the measurement floor.
    CoreImageTooSmall(usize),

    /// The CDI handed to RIoT does not have the digest length.
    InvalidCdi(usize),

    /// Empty registration id.
    EmptyRegistrationId,

    /// Registration id longer than the allowed maximum.
    RegistrationIdTooLong { len: usize, max: usize },

    /// Registration id contains a character outside `[a-z0-9-]`.
    InvalidRegistrationIdChar { position: usize, found: char },

    /// MAC address is not 12 hex digits.
    InvalidMacAddress,

    /// Firmware version is not `num.num.num`.
    InvalidFirmwareVersion,

    /// Failed to expand the extracted key
    InvalidExpansion(hkdf::InvalidLength),

    /// No valid P-256 scalar could be derived from the seed.
    KeyDerivationExhausted,

    /// DER encoding failure, including buffer overflow.
    InvalidDer(der::Error),

    /// Signing failure.
    Signature(signature::Error),

    /// PEM encoding failure.
    Pem(pem_rfc7468::Error),

    /// The PEM output does not fit its fixed-size buffer.
    PemTooLarge { needed: usize, max: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UdsNotProvisioned(tag) => {
                write!(f, "unique device secret not provisioned (tag {:#010x})", tag)
            }
            Error::CoreImageTooSmall(len) => write!(f, "RIoT Core image too small ({} bytes)", len),
            Error::InvalidCdi(len) => write!(f, "invalid CDI length {}", len),
            Error::EmptyRegistrationId => write!(f, "registration id is empty"),
            Error::RegistrationIdTooLong { len, max } => write!(
                f,
                "registration id is {} characters long, maximum is {}",
                len, max
            ),
            Error::InvalidRegistrationIdChar { position, found } => write!(
                f,
                "registration id character {} ({:?}) is not lowercase alphanumeric or '-'",
                position + 1,
                found
            ),
            Error::InvalidMacAddress => write!(f, "MAC address must be 12 hex digits"),
            Error::InvalidFirmwareVersion => {
                write!(f, "firmware version must be in num.num.num format")
            }
            Error::InvalidExpansion(err) => write!(f, "key expansion failed: {}", err),
            Error::KeyDerivationExhausted => write!(f, "no valid ECC key could be derived"),
            Error::InvalidDer(err) => write!(f, "DER error: {}", err),
            Error::Signature(err) => write!(f, "signature error: {}", err),
            Error::Pem(err) => write!(f, "PEM error: {}", err),
            Error::PemTooLarge { needed, max } => {
                write!(f, "PEM output needs {} bytes, buffer holds {}", needed, max)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl From<der::Error> for Error {
    fn from(err: der::Error) -> Error {
        Error::InvalidDer(err)
    }
}

impl From<signature::Error> for Error {
    fn from(err: signature::Error) -> Error {
        Error::Signature(err)
    }
}

/// Custom DICE result.
pub type Result<T> = core::result::Result<T, Error>;

/// DICE entry chaining the UDS store, DiceCore and RiotCore.
pub mod boot;

/// The DICE Compound Device Identifier (CDI) module
pub mod cdi;

/// DiceCore: RIoT Core measurement and CDI derivation.
pub mod dice;

/// RIoT Core and firmware image providers.
pub mod image;

/// Registration id validation and generation.
pub mod registration;

/// RIoT Core: DeviceID and Alias identities.
pub mod riot;

/// Unique Device Secret.
pub mod uds;

/// X.509 structures issued by RIoT.
pub mod x509;

/// Host-side device enrollment.
#[cfg(feature = "std")]
pub mod enrollment;

// Key Derivation Function module
mod kdf;

pub use kdf::derive_key_pair;
