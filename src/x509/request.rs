// Copyright (c) 2021 The RustCrypto Project Developers
// SPDX-FileCopyrightText: 2023 Rivos Inc.
//
// SPDX-License-Identifier: Apache-2.0

use der::asn1::{AnyRef, BitStringRef, ObjectIdentifier, SetOf};
use der::{Decode, Encode, Enumerated, Sequence, ValueOrd};
use p256::ecdsa::{DerSignature, VerifyingKey};
use signature::{Keypair, Signer, Verifier};
use spki::{AlgorithmIdentifierRef, SubjectPublicKeyInfoRef};

use crate::x509::{key::public_key_info, name::Name, name::NameFields};
use crate::x509::{DER_MAX_TBS, ECDSA_SHA256_ALGORITHM};
use crate::{Error, Result};

/// Maximum number of CSR attributes. RIoT requests carry none.
pub const MAX_CSR_ATTRIBUTES: usize = 1;

/// Version identifier for certification request information.
///
/// (RFC 2986 designates `0` as the only valid version)
#[derive(Clone, Debug, Copy, PartialEq, Eq, Enumerated)]
#[asn1(type = "INTEGER")]
#[repr(u8)]
pub enum Version {
    /// Denotes PKCS#8 v1
    V1 = 0,
}

/// X.501 `Attribute` as defined in [RFC 5280 Appendix A.1].
///
/// ```text
/// Attribute ::= SEQUENCE {
///     type     AttributeType,
///     values   SET OF AttributeValue
/// }
/// ```
///
/// [RFC 5280 Appendix A.1]: https://datatracker.ietf.org/doc/html/rfc5280#appendix-A.1
#[derive(Clone, Debug, PartialEq, Eq, Sequence, ValueOrd)]
#[allow(missing_docs)]
pub struct Attribute<'a> {
    pub oid: ObjectIdentifier,
    pub values: SetOf<AnyRef<'a>, 1>,
}

/// CSR attributes.
pub type Attributes<'a> = SetOf<Attribute<'a>, MAX_CSR_ATTRIBUTES>;

/// PKCS#10 `CertificationRequestInfo` as defined in [RFC 2986 Section 4].
///
/// ```text
/// CertificationRequestInfo ::= SEQUENCE {
///     version       INTEGER { v1(0) } (v1,...),
///     subject       Name,
///     subjectPKInfo SubjectPublicKeyInfo{{ PKInfoAlgorithms }},
///     attributes    [0] Attributes{{ CRIAttributes }}
/// }
/// ```
///
/// [RFC 2986 Section 4]: https://datatracker.ietf.org/doc/html/rfc2986#section-4
#[derive(Clone, Debug, PartialEq, Eq, Sequence)]
pub struct CertReqInfo<'a> {
    /// Certification request version.
    pub version: Version,

    /// Subject name.
    pub subject: Name<'a>,

    /// Subject public key info.
    pub public_key: SubjectPublicKeyInfoRef<'a>,

    /// Request attributes.
    #[asn1(context_specific = "0", tag_mode = "IMPLICIT")]
    pub attributes: Attributes<'a>,
}

impl<'a> TryFrom<&'a [u8]> for CertReqInfo<'a> {
    type Error = der::Error;

    fn try_from(bytes: &'a [u8]) -> core::result::Result<Self, Self::Error> {
        Self::from_der(bytes)
    }
}

/// PKCS#10 `CertificationRequest` as defined in [RFC 2986 Section 4].
///
/// ```text
/// CertificationRequest ::= SEQUENCE {
///     certificationRequestInfo CertificationRequestInfo,
///     signatureAlgorithm AlgorithmIdentifier{{ SignatureAlgorithms }},
///     signature          BIT STRING
/// }
/// ```
///
/// [RFC 2986 Section 4]: https://datatracker.ietf.org/doc/html/rfc2986#section-4
#[derive(Clone, Debug, PartialEq, Eq, Sequence)]
pub struct CertReq<'a> {
    /// Certification request information.
    pub info: CertReqInfo<'a>,

    /// Signature algorithm identifier.
    pub algorithm: AlgorithmIdentifierRef<'a>,

    /// Signature.
    pub signature: BitStringRef<'a>,
}

impl<'a> TryFrom<&'a [u8]> for CertReq<'a> {
    type Error = der::Error;

    fn try_from(bytes: &'a [u8]) -> core::result::Result<Self, Self::Error> {
        Self::from_der(bytes)
    }
}

impl CertReq<'_> {
    /// Build a CSR for the signer's own public key.
    ///
    /// # Parameters
    ///
    /// @signer: The key pair the request is for.
    /// @subject: The requested subject name.
    /// @csr_buf: Buffer to hold the request DER.
    pub fn from_key_pair<'b, S>(
        signer: &S,
        subject: &NameFields<'_>,
        csr_buf: &'b mut [u8],
    ) -> Result<&'b [u8]>
    where
        S: Signer<DerSignature> + Keypair<VerifyingKey = VerifyingKey>,
    {
        let point = signer.verifying_key().to_encoded_point(false);
        let info = CertReqInfo {
            version: Version::V1,
            subject: subject.to_name()?,
            public_key: public_key_info(&point)?,
            attributes: Attributes::new(),
        };

        let mut info_bytes_buffer = [0u8; DER_MAX_TBS];
        let info_bytes = info.encode_to_slice(&mut info_bytes_buffer)?;
        let signature = signer.try_sign(info_bytes)?;

        let request = CertReq {
            info,
            algorithm: ECDSA_SHA256_ALGORITHM,
            signature: BitStringRef::from_bytes(signature.as_bytes())?,
        };

        Ok(request.encode_to_slice(csr_buf)?)
    }

    /// Verifies a CSR signature against its own public key.
    pub fn verify(&self) -> Result<()> {
        if self.algorithm != ECDSA_SHA256_ALGORITHM {
            return Err(Error::Signature(signature::Error::new()));
        }

        let key = VerifyingKey::from_sec1_bytes(self.info.public_key.subject_public_key.raw_bytes())?;
        let signature = DerSignature::try_from(self.signature.raw_bytes())?;

        let mut info_bytes_buffer = [0u8; DER_MAX_TBS];
        let info_bytes = self.info.encode_to_slice(&mut info_bytes_buffer)?;

        Ok(key.verify(info_bytes, &signature)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive_key_pair;

    #[test]
    fn csr_self_verifies() {
        let key = derive_key_pair(&[9u8; 32], b"Identity").unwrap();
        let subject = NameFields::new("devkitdice", "DEVKIT_TEST", "US");
        let mut buf = [0u8; 512];
        let der = CertReq::from_key_pair(&key, &subject, &mut buf).unwrap();

        let request = CertReq::try_from(der).unwrap();
        request.verify().unwrap();
        assert_eq!(request.info.version, Version::V1);
        assert_eq!(request.info.subject, subject.to_name().unwrap());
        assert!(request.info.attributes.is_empty());
    }

    #[test]
    fn tampered_csr_fails_verification() {
        let key = derive_key_pair(&[9u8; 32], b"Identity").unwrap();
        let subject = NameFields::new("devkitdice", "DEVKIT_TEST", "US");
        let mut buf = [0u8; 512];
        let der = CertReq::from_key_pair(&key, &subject, &mut buf).unwrap();

        let mut request = CertReq::try_from(der).unwrap();
        let other = NameFields::new("otherdice", "DEVKIT_TEST", "US");
        request.info.subject = other.to_name().unwrap();
        assert!(request.verify().is_err());
    }
}
