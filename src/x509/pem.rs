// SPDX-FileCopyrightText: 2023 Rivos Inc.
//
// SPDX-License-Identifier: Apache-2.0

use core::fmt;

use log::error;
use pem_rfc7468::LineEnding;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::x509::DER_MAX_PEM;
use crate::{Error, Result};

pub const PUBLIC_KEY_LABEL: &str = "PUBLIC KEY";
pub const EC_PRIVATE_KEY_LABEL: &str = "EC PRIVATE KEY";
pub const CERTIFICATE_LABEL: &str = "CERTIFICATE";
pub const CERTIFICATE_REQUEST_LABEL: &str = "CERTIFICATE REQUEST";

/// A PEM object in a fixed-size buffer.
///
/// Lines end in LF. The buffer is wiped on drop, since the Alias private key
/// travels in one of these.
pub struct Pem {
    label: &'static str,
    buf: [u8; DER_MAX_PEM],
    len: usize,
}

impl Pem {
    /// Armors `der` under `label`.
    ///
    /// Fails with `PemTooLarge` instead of truncating.
    pub fn encode(label: &'static str, der: &[u8]) -> Result<Self> {
        let needed =
            pem_rfc7468::encapsulated_len(label, LineEnding::LF, der.len()).map_err(Error::Pem)?;
        if needed > DER_MAX_PEM {
            error!("{} PEM needs {} bytes", label, needed);
            return Err(Error::PemTooLarge {
                needed,
                max: DER_MAX_PEM,
            });
        }

        let mut pem = Pem {
            label,
            buf: [0u8; DER_MAX_PEM],
            len: 0,
        };
        pem.len = pem_rfc7468::encode(label, LineEnding::LF, der, &mut pem.buf)
            .map_err(Error::Pem)?
            .len();

        Ok(pem)
    }

    /// Decodes the PEM back to DER into `buf`.
    pub fn to_der<'b>(&self, buf: &'b mut [u8]) -> Result<&'b [u8]> {
        let (_, der) = pem_rfc7468::decode(self.as_bytes(), buf).map_err(Error::Pem)?;
        Ok(der)
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    pub fn as_str(&self) -> &str {
        // Only ASCII is ever written to the buffer.
        core::str::from_utf8(self.as_bytes()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Zeroize for Pem {
    fn zeroize(&mut self) {
        self.buf.zeroize();
        self.len.zeroize();
    }
}

impl ZeroizeOnDrop for Pem {}

impl Drop for Pem {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl fmt::Debug for Pem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pem")
            .field("label", &self.label)
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn armor_and_decode() {
        let der = [0x30, 0x03, 0x02, 0x01, 0x01];
        let pem = Pem::encode(CERTIFICATE_LABEL, &der).unwrap();

        assert_eq!(
            pem.as_str(),
            "-----BEGIN CERTIFICATE-----\nMAMCAQE=\n-----END CERTIFICATE-----\n"
        );
        assert_eq!(pem.label(), CERTIFICATE_LABEL);

        let mut buf = [0u8; 16];
        assert_eq!(pem.to_der(&mut buf).unwrap(), &der[..]);
    }

    #[test]
    fn oversized_output_is_rejected() {
        let der = [0u8; DER_MAX_PEM];
        assert!(matches!(
            Pem::encode(CERTIFICATE_LABEL, &der),
            Err(Error::PemTooLarge { max: DER_MAX_PEM, .. })
        ));
    }

    #[test]
    fn fits_at_capacity() {
        // Large enough for a full RIoT certificate.
        let der = [0x5au8; 1062];
        let pem = Pem::encode(CERTIFICATE_LABEL, &der).unwrap();
        assert!(pem.len() <= DER_MAX_PEM);
        assert!(pem.as_str().ends_with("-----END CERTIFICATE-----\n"));
    }
}
