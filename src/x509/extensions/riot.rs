// SPDX-FileCopyrightText: 2023 Rivos Inc.
//
// SPDX-License-Identifier: Apache-2.0

use der::asn1::{ObjectIdentifier, OctetStringRef};
use der::Sequence;
use spki::SubjectPublicKeyInfoRef;

use crate::cdi::Fwid;
use crate::x509::SHA256_OID;
use crate::Result;

/// OtherName type id of the RIoT composite device identity.
pub const RIOT_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.6.1.4.1.311.89.3.1");

/// Version carried in every composite device id.
pub const COMPOSITE_DEVICE_ID_VERSION: u8 = 1;

/// Encoded length of a P-256 composite device id.
pub const COMPOSITE_DEVICE_ID_LEN: usize = 144;

/// Firmware measurement.
///
/// ```text
/// FWID ::= SEQUENCE {
///     hashAlg     OBJECT IDENTIFIER,
///     fwid        OCTET STRING
/// }
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
#[allow(missing_docs)]
pub struct FirmwareId<'a> {
    pub hash_alg: ObjectIdentifier,
    pub fwid: OctetStringRef<'a>,
}

/// The identity an Alias certificate binds its key to: the DeviceID public
/// key and the measurement of the firmware it runs.
///
/// ```text
/// CompositeDeviceID ::= SEQUENCE {
///     version     INTEGER (1),
///     deviceId    SubjectPublicKeyInfo,
///     fwid        FWID
/// }
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
#[allow(missing_docs)]
pub struct CompositeDeviceId<'a> {
    pub version: u8,
    pub device_id: SubjectPublicKeyInfoRef<'a>,
    pub fwid: FirmwareId<'a>,
}

impl<'a> CompositeDeviceId<'a> {
    pub fn new(device_id: SubjectPublicKeyInfoRef<'a>, fwid: &'a Fwid) -> Result<Self> {
        Ok(CompositeDeviceId {
            version: COMPOSITE_DEVICE_ID_VERSION,
            device_id,
            fwid: FirmwareId {
                hash_alg: SHA256_OID,
                fwid: OctetStringRef::new(fwid.as_bytes())?,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive_key_pair;
    use crate::x509::key::public_key_info;
    use der::{Decode, Encode};

    #[test]
    fn composite_device_id_layout() {
        let key = derive_key_pair(&[3u8; 32], b"Identity").unwrap();
        let point = key.verifying_key().to_encoded_point(false);
        let fwid = Fwid([0xbb; 32]);
        let composite =
            CompositeDeviceId::new(public_key_info(&point).unwrap(), &fwid).unwrap();

        let mut buf = [0u8; 256];
        let der = composite.encode_to_slice(&mut buf).unwrap();
        assert_eq!(der.len(), COMPOSITE_DEVICE_ID_LEN);

        let decoded = CompositeDeviceId::from_der(der).unwrap();
        assert_eq!(decoded.version, 1);
        assert_eq!(decoded.fwid.hash_alg, SHA256_OID);
        assert_eq!(decoded.fwid.fwid.as_bytes(), &[0xbb; 32][..]);
        assert_eq!(
            decoded.device_id.subject_public_key.raw_bytes(),
            point.as_bytes()
        );
    }
}
