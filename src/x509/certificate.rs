// Copyright (c) 2021 The RustCrypto Project Developers
// Copyright (c) 2022 by Rivos Inc.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

use der::asn1::{BitStringRef, OctetStringRef, UintRef};
use der::{Encode, Enumerated, Sequence};
use p256::ecdsa::{DerSignature, VerifyingKey};
use signature::{Keypair, Signer};
use spki::{AlgorithmIdentifierRef, SubjectPublicKeyInfoRef};

use crate::{
    cdi::Fwid,
    kdf::{derive_key_id, derive_serial_number},
    x509::{
        extensions::{
            extension,
            pkix::{
                basicconstraints::BASIC_CONSTRAINTS_EXTENSION_LEN,
                keyid::{AUTH_KEY_ID_EXTENSION_LEN, SUBJECT_KEY_ID_EXTENSION_LEN},
                keyusage::{
                    ExtendedKeyUsageExtension, KeyUsageExtension, CLIENT_AUTH_OID,
                    EXT_KEY_USAGE_EXTENSION_LEN, KEY_USAGE_EXTENSION_LEN,
                },
                name::SUBJECT_ALT_NAME_EXTENSION_LEN,
                AuthorityKeyIdentifier, BasicConstraints, ExtendedKeyUsage, KeyUsage,
                KeyUsageFlags, OtherName, SubjectAltName, SubjectKeyIdentifier,
            },
            riot::{CompositeDeviceId, COMPOSITE_DEVICE_ID_LEN, RIOT_OID},
            Extensions,
        },
        key::public_key_info,
        name::{Name, NameFields},
        time::Validity,
        DER_MAX_TBS, ECDSA_SHA256_ALGORITHM,
    },
    Result,
};

/// Certificate `Version` as defined in [RFC 5280 Section 4.1].
///
/// ```text
/// Version  ::=  INTEGER  {  v1(0), v2(1), v3(2)  }
/// ```
///
/// [RFC 5280 Section 4.1]: https://datatracker.ietf.org/doc/html/rfc5280#section-4.1
#[derive(Clone, Debug, Copy, PartialEq, Eq, Enumerated)]
#[asn1(type = "INTEGER")]
#[repr(u8)]
pub enum Version {
    /// Version 1 (default)
    V1 = 0,

    /// Version 2
    V2 = 1,

    /// Version 3
    V3 = 2,
}

impl Default for Version {
    fn default() -> Self {
        Self::V1
    }
}

/// X.509 `TbsCertificate` as defined in [RFC 5280 Section 4.1]
///
/// ```text
/// TBSCertificate  ::=  SEQUENCE  {
///     version         [0]  EXPLICIT Version DEFAULT v1,
///     serialNumber         CertificateSerialNumber,
///     signature            AlgorithmIdentifier,
///     issuer               Name,
///     validity             Validity,
///     subject              Name,
///     subjectPublicKeyInfo SubjectPublicKeyInfo,
///     issuerUniqueID  [1]  IMPLICIT UniqueIdentifier OPTIONAL,
///     subjectUniqueID [2]  IMPLICIT UniqueIdentifier OPTIONAL,
///     extensions      [3]  Extensions OPTIONAL
/// }
/// ```
///
/// [RFC 5280 Section 4.1]: https://datatracker.ietf.org/doc/html/rfc5280#section-4.1
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
#[allow(missing_docs)]
pub struct TbsCertificate<'a> {
    #[asn1(context_specific = "0", default = "Default::default")]
    pub version: Version,

    pub serial_number: UintRef<'a>,
    pub signature: AlgorithmIdentifierRef<'a>,
    pub issuer: Name<'a>,
    pub validity: Validity,
    pub subject: Name<'a>,
    pub subject_public_key_info: SubjectPublicKeyInfoRef<'a>,

    #[asn1(context_specific = "1", tag_mode = "IMPLICIT", optional = "true")]
    pub issuer_unique_id: Option<BitStringRef<'a>>,

    #[asn1(context_specific = "2", tag_mode = "IMPLICIT", optional = "true")]
    pub subject_unique_id: Option<BitStringRef<'a>>,

    #[asn1(context_specific = "3", tag_mode = "EXPLICIT", optional = "true")]
    pub extensions: Option<Extensions<'a>>,
}

/// X.509 certificates are defined in [RFC 5280 Section 4.1].
///
/// ```text
/// Certificate  ::=  SEQUENCE  {
///     tbsCertificate       TBSCertificate,
///     signatureAlgorithm   AlgorithmIdentifier,
///     signature            BIT STRING
/// }
/// ```
///
/// [RFC 5280 Section 4.1]: https://datatracker.ietf.org/doc/html/rfc5280#section-4.1
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
#[allow(missing_docs)]
pub struct Certificate<'a> {
    pub tbs_certificate: TbsCertificate<'a>,
    pub signature_algorithm: AlgorithmIdentifierRef<'a>,
    pub signature: BitStringRef<'a>,
}

/// Names and validity of a certificate to issue.
#[derive(Clone, Copy, Debug)]
pub struct CertProfile<'n> {
    pub issuer: NameFields<'n>,
    pub subject: NameFields<'n>,
    pub validity: Validity,
}

impl Certificate<'_> {
    /// Build the Alias certificate, signed by the DeviceID key.
    ///
    /// # Parameters
    ///
    /// @signer: The DeviceID key pair.
    /// @alias_key: The Alias public key.
    /// @fwid: The measurement of the firmware the Alias key belongs to.
    /// @profile: Issuer and subject names, validity.
    /// @certificate_buf: Buffer to hold the certificate DER.
    pub fn alias<'b, S>(
        signer: &S,
        alias_key: &VerifyingKey,
        fwid: &Fwid,
        profile: &CertProfile<'_>,
        certificate_buf: &'b mut [u8],
    ) -> Result<&'b [u8]>
    where
        S: Signer<DerSignature> + Keypair<VerifyingKey = VerifyingKey>,
    {
        let issuer_point = signer.verifying_key().to_encoded_point(false);
        let subject_point = alias_key.to_encoded_point(false);
        let authority_key_id = derive_key_id(issuer_point.as_bytes())?;
        let serial_number = derive_serial_number(subject_point.as_bytes())?;

        let mut extensions = Extensions::new();

        // The Alias key only signs TLS client handshakes.
        let key_usage: KeyUsage = KeyUsageFlags::DigitalSignature.into();
        let mut key_usage_buffer = [0u8; KEY_USAGE_EXTENSION_LEN];
        extensions.add(extension!(
            key_usage,
            KeyUsageExtension,
            key_usage_buffer,
            true
        ))?;

        let mut ext_key_usage = ExtendedKeyUsage::new();
        ext_key_usage.add(CLIENT_AUTH_OID)?;
        let mut ext_key_usage_buffer = [0u8; EXT_KEY_USAGE_EXTENSION_LEN];
        extensions.add(extension!(
            ext_key_usage,
            ExtendedKeyUsageExtension,
            ext_key_usage_buffer,
            true
        ))?;

        let auth_key_id = AuthorityKeyIdentifier {
            key_identifier: Some(OctetStringRef::new(&authority_key_id)?),
        };
        let mut auth_key_id_buffer = [0u8; AUTH_KEY_ID_EXTENSION_LEN];
        extensions.add(extension!(
            auth_key_id,
            AuthorityKeyIdentifier<'_>,
            auth_key_id_buffer,
            false
        ))?;

        // The composite device id binds the Alias key to the DeviceID and the FWID.
        let composite = CompositeDeviceId::new(public_key_info(&issuer_point)?, fwid)?;
        let mut composite_buffer = [0u8; COMPOSITE_DEVICE_ID_LEN];
        let composite_bytes = composite.encode_to_slice(&mut composite_buffer)?;
        let subject_alt_name = SubjectAltName {
            other_name: OtherName::from_der_value(RIOT_OID, composite_bytes)?,
        };
        let mut subject_alt_name_buffer = [0u8; SUBJECT_ALT_NAME_EXTENSION_LEN];
        extensions.add(extension!(
            subject_alt_name,
            SubjectAltName<'_>,
            subject_alt_name_buffer,
            true
        ))?;

        Self::from_raw_parts(
            &serial_number,
            profile.issuer.to_name()?,
            profile.subject.to_name()?,
            profile.validity,
            public_key_info(&subject_point)?,
            extensions,
            signer,
            certificate_buf,
        )
    }

    /// Build the self-signed DeviceID certificate.
    ///
    /// The DeviceID is a CA for the Alias certificate only.
    pub fn device_id<'b, S>(
        signer: &S,
        profile: &CertProfile<'_>,
        certificate_buf: &'b mut [u8],
    ) -> Result<&'b [u8]>
    where
        S: Signer<DerSignature> + Keypair<VerifyingKey = VerifyingKey>,
    {
        let point = signer.verifying_key().to_encoded_point(false);
        let key_id = derive_key_id(point.as_bytes())?;
        let serial_number = derive_serial_number(point.as_bytes())?;

        let mut extensions = Extensions::new();

        let basic_constraints = BasicConstraints {
            ca: true,
            path_len_constraint: Some(1),
        };
        let mut basic_constraints_buffer = [0u8; BASIC_CONSTRAINTS_EXTENSION_LEN];
        extensions.add(extension!(
            basic_constraints,
            BasicConstraints,
            basic_constraints_buffer,
            true
        ))?;

        let key_usage: KeyUsage = KeyUsageFlags::KeyCertSign.into();
        let mut key_usage_buffer = [0u8; KEY_USAGE_EXTENSION_LEN];
        extensions.add(extension!(
            key_usage,
            KeyUsageExtension,
            key_usage_buffer,
            true
        ))?;

        let subject_key_id = OctetStringRef::new(&key_id)?;
        let mut subject_key_id_buffer = [0u8; SUBJECT_KEY_ID_EXTENSION_LEN];
        extensions.add(extension!(
            subject_key_id,
            SubjectKeyIdentifier,
            subject_key_id_buffer,
            false
        ))?;

        let auth_key_id = AuthorityKeyIdentifier {
            key_identifier: Some(OctetStringRef::new(&key_id)?),
        };
        let mut auth_key_id_buffer = [0u8; AUTH_KEY_ID_EXTENSION_LEN];
        extensions.add(extension!(
            auth_key_id,
            AuthorityKeyIdentifier<'_>,
            auth_key_id_buffer,
            false
        ))?;

        Self::from_raw_parts(
            &serial_number,
            profile.issuer.to_name()?,
            profile.subject.to_name()?,
            profile.validity,
            public_key_info(&point)?,
            extensions,
            signer,
            certificate_buf,
        )
    }

    /// Build a certificate from raw parts.
    ///
    /// # Parameters
    ///
    /// @serial_number_bytes: Certificate Serial Number.
    /// @issuer: Certificate Issuer.
    /// @subject: Certificate Subject.
    /// @validity: Certificate validity period.
    /// @subject_public_key_info: Subject Public Key Info.
    /// @extensions: Certificate extensions.
    /// @signer: A `Signer` trait for signing the certificate.
    /// @certificate_buf: Buffer to hold the certificate DER.
    #[allow(clippy::too_many_arguments)]
    pub fn from_raw_parts<'c, 'b, S: Signer<DerSignature>>(
        serial_number_bytes: &'c [u8],
        issuer: Name<'c>,
        subject: Name<'c>,
        validity: Validity,
        subject_public_key_info: SubjectPublicKeyInfoRef<'c>,
        extensions: Extensions<'c>,
        signer: &S,
        certificate_buf: &'b mut [u8],
    ) -> Result<&'b [u8]> {
        let tbs_certificate = TbsCertificate {
            version: Version::V3,
            serial_number: UintRef::new(serial_number_bytes)?,
            signature: ECDSA_SHA256_ALGORITHM,
            issuer,
            validity,
            subject,
            subject_public_key_info,
            issuer_unique_id: None,
            subject_unique_id: None,
            extensions: Some(extensions),
        };

        // We can now sign the TBS and generate the actual certificate.
        let mut tbs_bytes_buffer = [0u8; DER_MAX_TBS];
        let tbs_bytes = tbs_certificate.encode_to_slice(&mut tbs_bytes_buffer)?;
        let signature = signer.try_sign(tbs_bytes)?;

        let certificate = Certificate {
            tbs_certificate,
            signature_algorithm: ECDSA_SHA256_ALGORITHM,
            signature: BitStringRef::from_bytes(signature.as_bytes())?,
        };

        Ok(certificate.encode_to_slice(certificate_buf)?)
    }
}
