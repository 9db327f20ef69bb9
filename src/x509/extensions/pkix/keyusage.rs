// Copyright (c) 2021 The RustCrypto Project Developers
// SPDX-FileCopyrightText: 2023 Rivos Inc.
//
// SPDX-License-Identifier: Apache-2.0

use const_oid::{AssociatedOid, ObjectIdentifier};
use der::asn1::SequenceOf;
use flagset::{flags, FlagSet};

/// Encoded length of a keyUsage value.
pub const KEY_USAGE_EXTENSION_LEN: usize = 4;

/// Encoded length of an extKeyUsage value with a single purpose.
pub const EXT_KEY_USAGE_EXTENSION_LEN: usize = 12;

/// id-kp-clientAuth
pub const CLIENT_AUTH_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.6.1.5.5.7.3.2");

flags! {
    /// Key usage flags as defined in [RFC 5280 Section 4.2.1.3].
    ///
    /// ```text
    /// KeyUsage ::= BIT STRING {
    ///      digitalSignature        (0),
    ///      nonRepudiation          (1),  -- recent editions of X.509 have
    ///                                    -- renamed this bit to contentCommitment
    ///      keyEncipherment         (2),
    ///      dataEncipherment        (3),
    ///      keyAgreement            (4),
    ///      keyCertSign             (5),
    ///      cRLSign                 (6),
    ///      encipherOnly            (7),
    ///      decipherOnly            (8)
    /// }
    /// ```
    ///
    /// [RFC 5280 Section 4.2.1.3]: https://datatracker.ietf.org/doc/html/rfc5280#section-4.2.1.3
    #[allow(missing_docs)]
    pub enum KeyUsageFlags: u16 {
        DigitalSignature = 1 << 0,
        NonRepudiation = 1 << 1,
        KeyEncipherment = 1 << 2,
        DataEncipherment = 1 << 3,
        KeyAgreement = 1 << 4,
        KeyCertSign = 1 << 5,
        CRLSign = 1 << 6,
        EncipherOnly = 1 << 7,
        DecipherOnly = 1 << 8,
    }
}

/// KeyUsage as defined in [RFC 5280 Section 4.2.1.3].
///
/// [RFC 5280 Section 4.2.1.3]: https://datatracker.ietf.org/doc/html/rfc5280#section-4.2.1.3
pub type KeyUsage = FlagSet<KeyUsageFlags>;

/// Marker carrying the keyUsage OID for the `extension!` macro.
pub struct KeyUsageExtension;

impl AssociatedOid for KeyUsageExtension {
    const OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.15");
}

/// ExtKeyUsageSyntax as defined in [RFC 5280 Section 4.2.1.12].
///
/// ```text
/// ExtKeyUsageSyntax ::= SEQUENCE SIZE (1..MAX) OF KeyPurposeId
/// ```
///
/// [RFC 5280 Section 4.2.1.12]: https://datatracker.ietf.org/doc/html/rfc5280#section-4.2.1.12
pub type ExtendedKeyUsage = SequenceOf<ObjectIdentifier, 1>;

/// Marker carrying the extKeyUsage OID for the `extension!` macro.
pub struct ExtendedKeyUsageExtension;

impl AssociatedOid for ExtendedKeyUsageExtension {
    const OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.37");
}

#[cfg(test)]
mod tests {
    use super::*;
    use der::Encode;

    #[test]
    fn digital_signature_bit() {
        let usage: KeyUsage = KeyUsageFlags::DigitalSignature.into();
        let mut buf = [0u8; KEY_USAGE_EXTENSION_LEN];
        let der = usage.encode_to_slice(&mut buf).unwrap();

        assert_eq!(der, &[0x03, 0x02, 0x07, 0x80][..]);
    }

    #[test]
    fn key_cert_sign_bit() {
        let usage: KeyUsage = KeyUsageFlags::KeyCertSign.into();
        let mut buf = [0u8; KEY_USAGE_EXTENSION_LEN];
        let der = usage.encode_to_slice(&mut buf).unwrap();

        assert_eq!(der, &[0x03, 0x02, 0x02, 0x04][..]);
    }

    #[test]
    fn client_auth_purpose() {
        let mut usage = ExtendedKeyUsage::new();
        usage.add(CLIENT_AUTH_OID).unwrap();
        let mut buf = [0u8; EXT_KEY_USAGE_EXTENSION_LEN];
        let der = usage.encode_to_slice(&mut buf).unwrap();

        assert_eq!(
            der,
            &[0x30, 0x0a, 0x06, 0x08, 0x2b, 0x06, 0x01, 0x05, 0x05, 0x07, 0x03, 0x02][..]
        );
    }
}
