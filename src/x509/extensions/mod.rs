// Copyright (c) 2021 The RustCrypto Project Developers
// SPDX-FileCopyrightText: 2023 Rivos Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Certificate extensions

use der::asn1::{ObjectIdentifier, OctetStringRef, SequenceOf};
use der::Sequence;

use crate::x509::MAX_CERT_EXTENSIONS;

/// PKIX extensions.
pub mod pkix;

/// The RIoT composite device identity.
pub mod riot;

/// Extension as defined in [RFC 5280 Section 4.1.2.9].
///
/// ```text
/// Extension  ::=  SEQUENCE  {
///      extnID      OBJECT IDENTIFIER,
///      critical    BOOLEAN DEFAULT FALSE,
///      extnValue   OCTET STRING
///                  -- contains the DER encoding of an ASN.1 value
///                  -- corresponding to the extension type identified
///                  -- by extnID
/// }
/// ```
///
/// [RFC 5280 Section 4.1.2.9]: https://datatracker.ietf.org/doc/html/rfc5280#section-4.1.2.9
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
#[allow(missing_docs)]
pub struct Extension<'a> {
    pub extn_id: ObjectIdentifier,

    #[asn1(default = "Default::default")]
    pub critical: bool,

    pub extn_value: OctetStringRef<'a>,
}

/// Extensions as defined in [RFC 5280 Section 4.1.2.9].
///
/// ```text
/// Extensions  ::=  SEQUENCE SIZE (1..MAX) OF Extension
/// ```
pub type Extensions<'a> = SequenceOf<Extension<'a>, MAX_CERT_EXTENSIONS>;

/// Encodes an extension value into `$extension_buffer` and wraps it.
///
/// The value type provides the extension OID through `AssociatedOid`.
macro_rules! extension {
    ($extension_def:expr, $extension_type:ty, $extension_buffer:expr, $critical:expr) => {{
        let extension_bytes = $extension_def.encode_to_slice(&mut $extension_buffer)?;
        $crate::x509::extensions::Extension {
            extn_id: <$extension_type as const_oid::AssociatedOid>::OID,
            critical: $critical,
            extn_value: der::asn1::OctetStringRef::new(extension_bytes)?,
        }
    }};
}

pub(crate) use extension;
