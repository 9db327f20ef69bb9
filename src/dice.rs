// SPDX-FileCopyrightText: 2023 Rivos Inc.
//
// SPDX-License-Identifier: Apache-2.0

use core::mem::size_of;

use digest::Digest;
use log::{debug, error};
use sha2::Sha256;
use zeroize::Zeroize;

use crate::{cdi::Cdi, uds::UniqueDeviceSecret, Error, Result, DIGEST_LENGTH};

/// Smallest RIoT Core image DICE agrees to measure.
pub const MIN_MEASURED_LEN: usize = 2 * size_of::<u32>();

/// Measures a code region.
pub fn measure(data: &[u8]) -> Result<[u8; DIGEST_LENGTH]> {
    let mut digest = [0u8; DIGEST_LENGTH];
    measure_into(&mut Sha256::new(), data, &mut digest)?;
    Ok(digest)
}

fn measure_into(hasher: &mut Sha256, data: &[u8], digest: &mut [u8; DIGEST_LENGTH]) -> Result<()> {
    if data.len() < MIN_MEASURED_LEN {
        error!("refusing to measure a {} byte image", data.len());
        return Err(Error::CoreImageTooSmall(data.len()));
    }

    hasher.update(data);
    hasher.finalize_into_reset(digest.into());

    Ok(())
}

/// DiceCore working state.
///
/// Holds every transient value of a CDI derivation so that nothing lives
/// in module statics. Both digests are wiped and the hash context is
/// replaced by a fresh one before `compute_cdi` returns.
#[derive(Default)]
pub struct DiceContext {
    uds_digest: [u8; DIGEST_LENGTH],
    core_digest: [u8; DIGEST_LENGTH],
    hasher: Sha256,
}

impl Zeroize for DiceContext {
    fn zeroize(&mut self) {
        self.uds_digest.zeroize();
        self.core_digest.zeroize();
        // Overwrites the block buffer along with the chaining state.
        self.hasher = Sha256::new();
    }
}

impl Drop for DiceContext {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl DiceContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives the CDI from the UDS and the RIoT Core image.
    ///
    /// `CDI = SHA256(SHA256(UDS) || SHA256(riot_core))`. The UDS is never
    /// hashed together with the code directly.
    pub fn compute_cdi(&mut self, riot_core: &[u8], uds: &UniqueDeviceSecret) -> Result<Cdi> {
        let result = self.derive(riot_core, uds);
        self.zeroize();
        result
    }

    fn derive(&mut self, riot_core: &[u8], uds: &UniqueDeviceSecret) -> Result<Cdi> {
        measure_into(&mut self.hasher, riot_core, &mut self.core_digest)?;
        debug!("measured {} bytes of RIoT Core", riot_core.len());

        uds.validate()?;

        // Don't use the UDS directly.
        self.hasher.update(uds.as_bytes());
        self.hasher.finalize_into_reset((&mut self.uds_digest).into());

        let mut cdi = [0u8; DIGEST_LENGTH];
        self.hasher.update(self.uds_digest);
        self.hasher.update(self.core_digest);
        self.hasher.finalize_into_reset((&mut cdi).into());

        Ok(Cdi::new(cdi))
    }

    /// Whether every transient buffer is cleared.
    pub fn is_clear(&self) -> bool {
        self.uds_digest.iter().chain(self.core_digest.iter()).all(|b| *b == 0)
    }
}
