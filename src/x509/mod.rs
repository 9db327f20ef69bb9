// SPDX-FileCopyrightText: 2023 Rivos Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! The X.509 subset RIoT needs: names, validity, the RIoT extension
//! profile, certificates, PKCS#10 requests, SEC1 keys and PEM armoring.

use der::asn1::ObjectIdentifier;
use spki::AlgorithmIdentifierRef;

/// X.509 certificate and its builders.
pub mod certificate;

/// Certificate extensions.
pub mod extensions;

/// Public and private key encodings.
pub mod key;

/// X.501 names.
pub mod name;

/// PEM output buffers.
pub mod pem;

/// PKCS#10 certification requests.
pub mod request;

/// Certificate validity.
pub mod time;

/// Maximum number of ATVs in an RDN.
pub const MAX_CERT_ATV: usize = 1;

/// Maximum number of RDNs in a name: CN, O and C.
pub const MAX_CERT_RDN: usize = 3;

/// Maximum number of extensions in a certificate.
pub const MAX_CERT_EXTENSIONS: usize = 5;

/// Capacity of a to-be-signed structure.
pub const DER_MAX_TBS: usize = 1024;

/// Capacity of a PEM object, DER plus armor.
pub const DER_MAX_PEM: usize = 1536;

/// ecdsa-with-SHA256, with absent parameters.
pub const ECDSA_SHA256_ALGORITHM: AlgorithmIdentifierRef<'static> = AlgorithmIdentifierRef {
    oid: const_oid::db::rfc5912::ECDSA_WITH_SHA_256,
    parameters: None,
};

/// id-sha256, the FWID hash algorithm.
pub const SHA256_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.1");
