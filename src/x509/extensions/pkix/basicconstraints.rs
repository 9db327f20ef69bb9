// Copyright (c) 2021 The RustCrypto Project Developers
// SPDX-FileCopyrightText: 2023 Rivos Inc.
//
// SPDX-License-Identifier: Apache-2.0

use const_oid::{AssociatedOid, ObjectIdentifier};
use der::Sequence;

/// Encoded length of a CA basicConstraints value with a path length.
pub const BASIC_CONSTRAINTS_EXTENSION_LEN: usize = 8;

/// BasicConstraints as defined in [RFC 5280 Section 4.2.1.9].
///
/// ```text
/// BasicConstraints ::= SEQUENCE {
///     cA                      BOOLEAN DEFAULT FALSE,
///     pathLenConstraint       INTEGER (0..MAX) OPTIONAL
/// }
/// ```
///
/// [RFC 5280 Section 4.2.1.9]: https://datatracker.ietf.org/doc/html/rfc5280#section-4.2.1.9
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
#[allow(missing_docs)]
pub struct BasicConstraints {
    #[asn1(default = "Default::default")]
    pub ca: bool,
    pub path_len_constraint: Option<u8>,
}

impl AssociatedOid for BasicConstraints {
    const OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.29.19");
}

#[cfg(test)]
mod tests {
    use super::*;
    use der::Encode;

    #[test]
    fn ca_with_path_length() {
        let constraints = BasicConstraints {
            ca: true,
            path_len_constraint: Some(1),
        };
        let mut buf = [0u8; BASIC_CONSTRAINTS_EXTENSION_LEN];
        let der = constraints.encode_to_slice(&mut buf).unwrap();

        assert_eq!(der, &[0x30, 0x06, 0x01, 0x01, 0xff, 0x02, 0x01, 0x01][..]);
    }
}
