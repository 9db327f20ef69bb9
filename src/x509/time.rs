// Copyright (c) 2021 The RustCrypto Project Developers
// SPDX-FileCopyrightText: 2023 Rivos Inc.
//
// SPDX-License-Identifier: Apache-2.0

use core::time::Duration;

use der::asn1::UtcTime;
use der::Sequence;

use crate::Result;

/// 2017-01-01 00:00:00 UTC
pub const DEVKIT_NOT_BEFORE: u64 = 1_483_228_800;

/// 2037-01-01 00:00:00 UTC
pub const DEVKIT_NOT_AFTER: u64 = 2_114_380_800;

/// Validity period in Unix seconds, as kept in configuration.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ValidityPeriod {
    pub not_before: u64,
    pub not_after: u64,
}

impl Default for ValidityPeriod {
    fn default() -> Self {
        ValidityPeriod {
            not_before: DEVKIT_NOT_BEFORE,
            not_after: DEVKIT_NOT_AFTER,
        }
    }
}

impl ValidityPeriod {
    pub fn to_validity(&self) -> Result<Validity> {
        Ok(Validity {
            not_before: UtcTime::from_unix_duration(Duration::from_secs(self.not_before))?,
            not_after: UtcTime::from_unix_duration(Duration::from_secs(self.not_after))?,
        })
    }
}

/// X.509 `Validity` as defined in [RFC 5280 Section 4.1.2.5].
///
/// Both bounds are encoded as UTCTime, which covers 1950 to 2049.
///
/// ```text
/// Validity ::= SEQUENCE {
///     notBefore      Time,
///     notAfter       Time
/// }
/// ```
///
/// [RFC 5280 Section 4.1.2.5]: https://datatracker.ietf.org/doc/html/rfc5280#section-4.1.2.5
#[derive(Copy, Clone, Debug, Eq, PartialEq, Sequence)]
#[allow(missing_docs)]
pub struct Validity {
    pub not_before: UtcTime,
    pub not_after: UtcTime,
}
