// SPDX-FileCopyrightText: 2023 Rivos Inc.
//
// SPDX-License-Identifier: Apache-2.0
use crate::{Error, Result, DIGEST_LENGTH};

use zeroize::{Zeroize, ZeroizeOnDrop};

/// The key identifier length.
/// Key identifiers are a fixed length derivation of a public key, used for
/// the authority and subject key identifier extensions.
pub const CDI_ID_LEN: usize = 20;

/// The DICE Compound Device Identifier (CDI).
///
/// Lives in volatile memory only and is wiped when dropped.
pub struct Cdi([u8; DIGEST_LENGTH]);

impl Zeroize for Cdi {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl ZeroizeOnDrop for Cdi {}

impl Drop for Cdi {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl Cdi {
    pub(crate) fn new(bytes: [u8; DIGEST_LENGTH]) -> Self {
        Cdi(bytes)
    }

    /// Builds a CDI from a buffer handed over by the DICE layer.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let cdi = bytes
            .try_into()
            .map_err(|_| Error::InvalidCdi(bytes.len()))?;
        Ok(Cdi(cdi))
    }

    /// Raw CDI bytes.
    pub fn as_bytes(&self) -> &[u8; DIGEST_LENGTH] {
        &self.0
    }
}

/// Firmware identity: the digest of the RIoT Firmware image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fwid(pub [u8; DIGEST_LENGTH]);

impl Fwid {
    pub fn as_bytes(&self) -> &[u8; DIGEST_LENGTH] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cdi_from_short_slice() {
        assert!(matches!(Cdi::from_slice(&[0u8; 16]), Err(Error::InvalidCdi(16))));
    }

    #[test]
    fn cdi_zeroize() {
        let mut cdi = Cdi::from_slice(&[0xa5; DIGEST_LENGTH]).unwrap();
        cdi.zeroize();
        assert_eq!(cdi.as_bytes(), &[0u8; DIGEST_LENGTH]);
    }
}
