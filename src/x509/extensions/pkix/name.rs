// Copyright (c) 2021 The RustCrypto Project Developers
// SPDX-FileCopyrightText: 2023 Rivos Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! PKIX Name types

mod other;

pub use other::OtherName;

use const_oid::{AssociatedOid, ObjectIdentifier};
use der::Sequence;

/// SubjectAltName as defined in [RFC 5280 Section 4.2.1.6], restricted to
/// the single `otherName` RIoT emits.
///
/// ```text
/// SubjectAltName ::= GeneralNames
/// GeneralNames ::= SEQUENCE SIZE (1..MAX) OF GeneralName
/// GeneralName ::= CHOICE {
///     otherName                       [0]     OtherName,
///     ...
/// }
/// ```
///
/// [RFC 5280 Section 4.2.1.6]: https://datatracker.ietf.org/doc/html/rfc5280#section-4.2.1.6
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
#[allow(missing_docs)]
pub struct SubjectAltName<'a> {
    #[asn1(context_specific = "0", tag_mode = "IMPLICIT", constructed = "true")]
    pub other_name: OtherName<'a>,
}

impl AssociatedOid for SubjectAltName<'_> {
    const OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.17");
}

/// Encoded length bound of a subjectAltName holding a composite device id.
pub const SUBJECT_ALT_NAME_EXTENSION_LEN: usize = 192;
