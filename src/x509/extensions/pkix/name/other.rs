// Copyright (c) 2021 The RustCrypto Project Developers
// SPDX-FileCopyrightText: 2023 Rivos Inc.
//
// SPDX-License-Identifier: Apache-2.0

use der::{asn1::ObjectIdentifier, AnyRef, Decode, Sequence};

use crate::Result;

/// OtherName as defined in [RFC 5280 Section 4.2.1.6].
///
/// ```text
/// OtherName ::= SEQUENCE {
///     type-id    OBJECT IDENTIFIER,
///     value      [0] EXPLICIT ANY DEFINED BY type-id
/// }
/// ```
///
/// [RFC 5280 Section 4.2.1.6]: https://datatracker.ietf.org/doc/html/rfc5280#section-4.2.1.6
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
#[allow(missing_docs)]
pub struct OtherName<'a> {
    pub type_id: ObjectIdentifier,

    #[asn1(context_specific = "0", tag_mode = "EXPLICIT")]
    pub value: AnyRef<'a>,
}

impl<'a> OtherName<'a> {
    /// Wraps an already encoded value.
    pub fn from_der_value(type_id: ObjectIdentifier, value: &'a [u8]) -> Result<Self> {
        Ok(OtherName {
            type_id,
            value: AnyRef::from_der(value)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use der::Encode;

    #[test]
    fn value_is_explicitly_tagged() {
        // INTEGER 1
        let value = [0x02, 0x01, 0x01];
        let name =
            OtherName::from_der_value(ObjectIdentifier::new_unwrap("1.2.3"), &value).unwrap();
        let mut buf = [0u8; 32];
        let der = name.encode_to_slice(&mut buf).unwrap();

        assert_eq!(
            der,
            &[0x30, 0x09, 0x06, 0x02, 0x2a, 0x03, 0xa0, 0x03, 0x02, 0x01, 0x01][..]
        );
    }
}
