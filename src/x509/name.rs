// Copyright (c) 2021 The RustCrypto Project Developers
// SPDX-FileCopyrightText: 2023 Rivos Inc.
//
// SPDX-License-Identifier: Apache-2.0

use der::asn1::{AnyRef, ObjectIdentifier, SequenceOf, SetOf};
use der::{Sequence, Tag, ValueOrd};

use crate::x509::{MAX_CERT_ATV, MAX_CERT_RDN};
use crate::Result;

/// id-at-commonName
pub const COMMON_NAME_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.3");

/// id-at-countryName
pub const COUNTRY_NAME_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.6");

/// id-at-organizationName
pub const ORGANIZATION_NAME_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.10");

/// X.501 `AttributeTypeAndValue` as defined in [RFC 5280 Appendix A.1].
///
/// ```text
/// AttributeTypeAndValue ::= SEQUENCE {
///   type             AttributeType,
///   value            AttributeValue
/// }
/// ```
///
/// [RFC 5280 Appendix A.1]: https://datatracker.ietf.org/doc/html/rfc5280#appendix-A.1
#[derive(Copy, Clone, Debug, Eq, PartialEq, Sequence, ValueOrd)]
#[allow(missing_docs)]
pub struct AttributeTypeAndValue<'a> {
    pub oid: ObjectIdentifier,
    pub value: AnyRef<'a>,
}

/// X.501 `RelativeDistinguishedName`, one ATV per RDN.
pub type RelativeDistinguishedName<'a> = SetOf<AttributeTypeAndValue<'a>, MAX_CERT_ATV>;

/// X.501 `Name`, as an `RDNSequence`.
pub type Name<'a> = SequenceOf<RelativeDistinguishedName<'a>, MAX_CERT_RDN>;

/// The three attributes RIoT puts in its subject and issuer names.
///
/// The common name and organization are encoded as UTF8String, the country
/// as PrintableString.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct NameFields<'a> {
    pub common: &'a str,
    pub organization: &'a str,
    pub country: &'a str,
}

impl<'a> NameFields<'a> {
    pub const fn new(common: &'a str, organization: &'a str, country: &'a str) -> Self {
        NameFields {
            common,
            organization,
            country,
        }
    }

    /// Same organization and country, another common name.
    pub fn with_common<'b>(&self, common: &'b str) -> NameFields<'b>
    where
        'a: 'b,
    {
        NameFields {
            common,
            organization: self.organization,
            country: self.country,
        }
    }

    /// Builds the `CN, O, C` RDN sequence.
    pub fn to_name(&self) -> Result<Name<'a>> {
        let mut name = Name::new();
        for (oid, tag, value) in [
            (COMMON_NAME_OID, Tag::Utf8String, self.common),
            (ORGANIZATION_NAME_OID, Tag::Utf8String, self.organization),
            (COUNTRY_NAME_OID, Tag::PrintableString, self.country),
        ] {
            let atv = AttributeTypeAndValue {
                oid,
                value: AnyRef::new(tag, value.as_bytes())?,
            };
            let mut rdn = RelativeDistinguishedName::new();
            rdn.insert(atv)?;
            name.add(rdn)?;
        }

        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use der::{Decode, Encode, Tagged};

    #[test]
    fn name_rdn_order_and_string_types() {
        let fields = NameFields::new("devkitdice", "DEVKIT_TEST", "US");
        let mut buf = [0u8; 128];
        let der = fields.to_name().unwrap().encode_to_slice(&mut buf).unwrap();
        let name = Name::from_der(der).unwrap();

        let atvs: Vec<_> = name
            .iter()
            .map(|rdn| *rdn.iter().next().unwrap())
            .collect();
        assert_eq!(atvs.len(), 3);
        assert_eq!(atvs[0].oid, COMMON_NAME_OID);
        assert_eq!(atvs[0].value.tag(), Tag::Utf8String);
        assert_eq!(atvs[0].value.value(), b"devkitdice");
        assert_eq!(atvs[1].oid, ORGANIZATION_NAME_OID);
        assert_eq!(atvs[1].value.value(), b"DEVKIT_TEST");
        assert_eq!(atvs[2].oid, COUNTRY_NAME_OID);
        assert_eq!(atvs[2].value.tag(), Tag::PrintableString);
        assert_eq!(atvs[2].value.value(), b"US");
    }

    #[test]
    fn with_common_keeps_organization() {
        let device = NameFields::new("devkitdice", "DEVKIT_TEST", "US");
        let alias = device.with_common("test-device-01");

        assert_eq!(alias.common, "test-device-01");
        assert_eq!(alias.organization, "DEVKIT_TEST");
        assert_eq!(alias.country, "US");
    }
}
