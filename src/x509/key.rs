// SPDX-FileCopyrightText: 2023 Rivos Inc.
//
// SPDX-License-Identifier: Apache-2.0

use const_oid::db::rfc5912::{ID_EC_PUBLIC_KEY, SECP_256_R_1};
use der::asn1::{AnyRef, BitStringRef, ObjectIdentifier, OctetStringRef};
use der::{Encode, Sequence};
use p256::ecdsa::SigningKey;
use p256::EncodedPoint;
use spki::{AlgorithmIdentifierRef, SubjectPublicKeyInfoRef};
use zeroize::Zeroizing;

use crate::Result;

/// Encoded length of a P-256 SubjectPublicKeyInfo.
pub const P256_SPKI_LEN: usize = 91;

/// Encoded length of a P-256 SEC1 private key with its public key.
pub const P256_EC_PRIVATE_KEY_LEN: usize = 121;

const EC_PRIVATE_KEY_VERSION: u8 = 1;

/// id-ecPublicKey on the prime256v1 curve.
pub fn p256_algorithm() -> AlgorithmIdentifierRef<'static> {
    AlgorithmIdentifierRef {
        oid: ID_EC_PUBLIC_KEY,
        parameters: Some(AnyRef::from(&SECP_256_R_1)),
    }
}

/// SubjectPublicKeyInfo for an uncompressed P-256 point.
pub fn public_key_info(point: &EncodedPoint) -> Result<SubjectPublicKeyInfoRef<'_>> {
    Ok(SubjectPublicKeyInfoRef {
        algorithm: p256_algorithm(),
        subject_public_key: BitStringRef::from_bytes(point.as_bytes())?,
    })
}

/// SEC1 `ECPrivateKey` as defined in [RFC 5915 Section 3].
///
/// ```text
/// ECPrivateKey ::= SEQUENCE {
///   version        INTEGER { ecPrivkeyVer1(1) } (ecPrivkeyVer1),
///   privateKey     OCTET STRING,
///   parameters [0] ECParameters {{ NamedCurve }} OPTIONAL,
///   publicKey  [1] BIT STRING OPTIONAL
/// }
/// ```
///
/// Holds borrowed secret material and does not implement `Debug`.
///
/// [RFC 5915 Section 3]: https://datatracker.ietf.org/doc/html/rfc5915#section-3
#[derive(Clone, Sequence)]
#[allow(missing_docs)]
pub struct EcPrivateKey<'a> {
    pub version: u8,

    pub private_key: OctetStringRef<'a>,

    #[asn1(context_specific = "0", tag_mode = "EXPLICIT", optional = "true")]
    pub parameters: Option<ObjectIdentifier>,

    #[asn1(context_specific = "1", tag_mode = "EXPLICIT", optional = "true")]
    pub public_key: Option<BitStringRef<'a>>,
}

/// Encodes a signing key as a SEC1 `ECPrivateKey` into `buf`.
///
/// The caller owns `buf` and is expected to wipe it.
pub fn encode_private_key<'b>(key: &SigningKey, buf: &'b mut [u8]) -> Result<&'b [u8]> {
    let scalar = Zeroizing::new(<[u8; 32]>::from(key.to_bytes()));
    let point = key.verifying_key().to_encoded_point(false);

    let private_key = EcPrivateKey {
        version: EC_PRIVATE_KEY_VERSION,
        private_key: OctetStringRef::new(&scalar[..])?,
        parameters: Some(SECP_256_R_1),
        public_key: Some(BitStringRef::from_bytes(point.as_bytes())?),
    };

    Ok(private_key.encode_to_slice(buf)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive_key_pair;
    use der::Decode;

    #[test]
    fn spki_encoding_length() {
        let key = derive_key_pair(&[7u8; 32], b"Identity").unwrap();
        let point = key.verifying_key().to_encoded_point(false);
        let spki = public_key_info(&point).unwrap();
        let mut buf = [0u8; 128];
        let der = spki.encode_to_slice(&mut buf).unwrap();

        assert_eq!(der.len(), P256_SPKI_LEN);
        let decoded = SubjectPublicKeyInfoRef::from_der(der).unwrap();
        assert_eq!(decoded.algorithm.oid, ID_EC_PUBLIC_KEY);
        assert_eq!(decoded.subject_public_key.raw_bytes(), point.as_bytes());
    }

    #[test]
    fn private_key_round_trip() {
        let key = derive_key_pair(&[7u8; 32], b"Alias").unwrap();
        let mut buf = [0u8; 256];
        let der = encode_private_key(&key, &mut buf).unwrap();

        assert_eq!(der.len(), P256_EC_PRIVATE_KEY_LEN);
        let decoded = EcPrivateKey::from_der(der).unwrap();
        assert_eq!(decoded.version, 1);
        assert_eq!(decoded.parameters, Some(SECP_256_R_1));
        assert_eq!(
            SigningKey::from_slice(decoded.private_key.as_bytes()).unwrap(),
            key
        );
    }
}
