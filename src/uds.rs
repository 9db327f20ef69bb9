// SPDX-FileCopyrightText: 2023 Rivos Inc.
//
// SPDX-License-Identifier: Apache-2.0

use crate::{Error, Result, UDS_LENGTH};

use log::error;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Tag marking a provisioned Unique Device Secret.
pub const DICE_UDS_TAG: u32 = 0x0053_4455;

/// The Unique Device Secret, as laid out in protected storage.
pub struct UniqueDeviceSecret {
    tag: u32,
    bytes: [u8; UDS_LENGTH],
}

impl Zeroize for UniqueDeviceSecret {
    fn zeroize(&mut self) {
        self.tag.zeroize();
        self.bytes.zeroize();
    }
}

impl ZeroizeOnDrop for UniqueDeviceSecret {}

impl Drop for UniqueDeviceSecret {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl UniqueDeviceSecret {
    /// Builds a UDS record from its raw storage fields.
    pub fn new(tag: u32, bytes: [u8; UDS_LENGTH]) -> Self {
        UniqueDeviceSecret { tag, bytes }
    }

    /// Builds a correctly tagged UDS record.
    pub fn provisioned(bytes: [u8; UDS_LENGTH]) -> Self {
        Self::new(DICE_UDS_TAG, bytes)
    }

    /// The storage tag.
    pub fn tag(&self) -> u32 {
        self.tag
    }

    /// Checks that the secret was actually provisioned.
    pub fn validate(&self) -> Result<()> {
        if self.tag != DICE_UDS_TAG {
            error!("UDS tag {:#010x} does not match the provisioning tag", self.tag);
            return Err(Error::UdsNotProvisioned(self.tag));
        }

        Ok(())
    }

    pub(crate) fn as_bytes(&self) -> &[u8; UDS_LENGTH] {
        &self.bytes
    }
}

/// Protected storage holding the Unique Device Secret.
///
/// Implementations may read a firmware-protected flash page, a secure
/// element slot or an EEPROM zone. A missing secret is reported through the
/// tag of the returned record.
pub trait UdsStore {
    /// Loads the UDS record.
    fn load(&self) -> Result<UniqueDeviceSecret>;
}

/// A UDS store backed by memory, used by the host tool and tests.
pub struct StaticUdsStore {
    uds: UniqueDeviceSecret,
}

impl StaticUdsStore {
    pub fn new(uds: UniqueDeviceSecret) -> Self {
        StaticUdsStore { uds }
    }
}

impl UdsStore for StaticUdsStore {
    fn load(&self) -> Result<UniqueDeviceSecret> {
        Ok(UniqueDeviceSecret::new(self.uds.tag, self.uds.bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provisioned_uds_validates() {
        let uds = UniqueDeviceSecret::provisioned([0x5a; UDS_LENGTH]);
        assert!(uds.validate().is_ok());
        assert_eq!(uds.tag(), DICE_UDS_TAG);
    }

    #[test]
    fn wrong_tag_is_rejected() {
        let uds = UniqueDeviceSecret::new(0x4449_5041, [0u8; UDS_LENGTH]);
        assert!(matches!(
            uds.validate(),
            Err(Error::UdsNotProvisioned(0x4449_5041))
        ));
    }

    #[test]
    fn zeroize_clears_record() {
        let mut uds = UniqueDeviceSecret::provisioned([0xff; UDS_LENGTH]);
        uds.zeroize();
        assert_eq!(uds.tag(), 0);
        assert_eq!(uds.as_bytes(), &[0u8; UDS_LENGTH]);
    }

    #[test]
    fn static_store_returns_copy() {
        let store = StaticUdsStore::new(UniqueDeviceSecret::provisioned([7u8; UDS_LENGTH]));
        let uds = store.load().unwrap();
        assert_eq!(uds.as_bytes(), &[7u8; UDS_LENGTH]);
        assert!(uds.validate().is_ok());
    }
}
