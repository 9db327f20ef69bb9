// SPDX-FileCopyrightText: 2023 Rivos Inc.
//
// SPDX-License-Identifier: Apache-2.0

use hkdf::Hkdf;
use p256::ecdsa::SigningKey;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::{cdi::CDI_ID_LEN, Error, Result};

// From the OpenDice implementation.
pub(crate) const ID_SALT: [u8; 64] = [
    0xDB, 0xDB, 0xAE, 0xBC, 0x80, 0x20, 0xDA, 0x9F, 0xF0, 0xDD, 0x5A, 0x24, 0xC8, 0x3A, 0xA5, 0xA5,
    0x42, 0x86, 0xDF, 0xC2, 0x63, 0x03, 0x1E, 0x32, 0x9B, 0x4D, 0xA1, 0x48, 0x43, 0x06, 0x59, 0xFE,
    0x62, 0xCD, 0xB5, 0xB7, 0xE1, 0xE0, 0x0F, 0xC6, 0x80, 0x30, 0x67, 0x11, 0xEB, 0x44, 0x4A, 0xF7,
    0x72, 0x09, 0x35, 0x94, 0x96, 0xFC, 0xFF, 0x1D, 0xB9, 0x52, 0x0B, 0xA5, 0x1C, 0x7B, 0x29, 0xEA,
];

// From the OpenDice implementation
pub(crate) const ASYM_SALT: [u8; 64] = [
    0x63, 0xB6, 0xA0, 0x4D, 0x2C, 0x07, 0x7F, 0xC1, 0x0F, 0x63, 0x9F, 0x21, 0xDA, 0x79, 0x38, 0x44,
    0x35, 0x6C, 0xC2, 0xB0, 0xB4, 0x41, 0xB3, 0xA7, 0x71, 0x24, 0x03, 0x5C, 0x03, 0xF8, 0xE1, 0xBE,
    0x60, 0x35, 0xD3, 0x1F, 0x28, 0x28, 0x21, 0xA7, 0x45, 0x0A, 0x02, 0x22, 0x2A, 0xB1, 0xB3, 0xCF,
    0xF1, 0x67, 0x9B, 0x05, 0xAB, 0x1C, 0xA5, 0xD1, 0xAF, 0xFB, 0x78, 0x9C, 0xCD, 0x2B, 0x0B, 0x3B,
];

/// Certificate serial number length.
pub(crate) const SERIAL_NUMBER_LEN: usize = 8;

// Each attempt has a ~2^-32 chance of landing outside [1, n).
const MAX_KEY_DERIVATION_ATTEMPTS: u32 = 8;

// HKDF-SHA256 derivation function
pub(crate) fn kdf(
    input_key_material: &[u8],
    salt: &[u8],
    info: &[&[u8]],
    output_key_material: &mut [u8],
) -> Result<()> {
    // First extract a pseudorandom key from the IKM.
    let kdf = Hkdf::<Sha256>::new(Some(salt), input_key_material);

    // Now expand the pseudorandom key into the OKM.
    kdf.expand_multi_info(info, output_key_material)
        .map_err(Error::InvalidExpansion)
}

/// Derives a P-256 key pair from a seed digest and a label.
///
/// The derivation is deterministic: the same seed and label always give the
/// same key pair, which is how RIoT re-creates its identities on every boot
/// without persisting private keys.
pub fn derive_key_pair(seed: &[u8], label: &[u8]) -> Result<SigningKey> {
    let mut scalar = Zeroizing::new([0u8; 32]);

    for counter in 0..MAX_KEY_DERIVATION_ATTEMPTS {
        kdf(
            seed,
            &ASYM_SALT,
            &[label, &counter.to_be_bytes()],
            &mut scalar[..],
        )?;

        // Rejects zero and scalars not below the group order.
        if let Ok(key) = SigningKey::from_slice(&scalar[..]) {
            return Ok(key);
        }
    }

    Err(Error::KeyDerivationExhausted)
}

// Extract and expand a key identifier from a SEC1 encoded public key.
pub(crate) fn derive_key_id(public_key: &[u8]) -> Result<[u8; CDI_ID_LEN]> {
    let mut key_id = [0u8; CDI_ID_LEN];
    kdf(public_key, &ID_SALT, &[b"Key_ID"], &mut key_id)?;
    Ok(key_id)
}

// Positive, non-zero serial number bound to the subject public key.
pub(crate) fn derive_serial_number(public_key: &[u8]) -> Result<[u8; SERIAL_NUMBER_LEN]> {
    let mut serial = [0u8; SERIAL_NUMBER_LEN];
    kdf(public_key, &ID_SALT, &[b"SerialNumber"], &mut serial)?;
    serial[0] &= 0x7f;
    serial[0] |= 0x01;
    Ok(serial)
}
