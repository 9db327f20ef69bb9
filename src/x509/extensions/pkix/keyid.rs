// Copyright (c) 2021 The RustCrypto Project Developers
// SPDX-FileCopyrightText: 2023 Rivos Inc.
//
// SPDX-License-Identifier: Apache-2.0

use const_oid::{AssociatedOid, ObjectIdentifier};
use der::asn1::OctetStringRef;
use der::Sequence;

use crate::cdi::CDI_ID_LEN;

/// Encoded length of an authorityKeyIdentifier value.
pub const AUTH_KEY_ID_EXTENSION_LEN: usize = CDI_ID_LEN + 4;

/// Encoded length of a subjectKeyIdentifier value.
pub const SUBJECT_KEY_ID_EXTENSION_LEN: usize = CDI_ID_LEN + 2;

/// AuthorityKeyIdentifier as defined in [RFC 5280 Section 4.2.1.1].
///
/// RIoT only sets the key identifier.
///
/// ```text
/// AuthorityKeyIdentifier ::= SEQUENCE {
///     keyIdentifier             [0] KeyIdentifier           OPTIONAL,
///     authorityCertIssuer       [1] GeneralNames            OPTIONAL,
///     authorityCertSerialNumber [2] CertificateSerialNumber OPTIONAL
/// }
///
/// KeyIdentifier ::= OCTET STRING
/// ```
///
/// [RFC 5280 Section 4.2.1.1]: https://datatracker.ietf.org/doc/html/rfc5280#section-4.2.1.1
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
#[allow(missing_docs)]
pub struct AuthorityKeyIdentifier<'a> {
    #[asn1(context_specific = "0", tag_mode = "IMPLICIT", optional = "true")]
    pub key_identifier: Option<OctetStringRef<'a>>,
}

impl AssociatedOid for AuthorityKeyIdentifier<'_> {
    const OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.35");
}

/// SubjectKeyIdentifier as defined in [RFC 5280 Section 4.2.1.2].
///
/// ```text
/// SubjectKeyIdentifier ::= KeyIdentifier
/// ```
///
/// The value is a plain `OctetStringRef`; this type only carries the OID.
///
/// [RFC 5280 Section 4.2.1.2]: https://datatracker.ietf.org/doc/html/rfc5280#section-4.2.1.2
pub struct SubjectKeyIdentifier;

impl AssociatedOid for SubjectKeyIdentifier {
    const OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.14");
}
