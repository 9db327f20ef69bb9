// SPDX-FileCopyrightText: 2023 Rivos Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! PKIX X.509 Certificate Extensions (RFC 5280)

pub mod basicconstraints;
pub mod keyid;
pub mod keyusage;
pub mod name;

pub use basicconstraints::BasicConstraints;
pub use keyid::{AuthorityKeyIdentifier, SubjectKeyIdentifier};
pub use keyusage::{ExtendedKeyUsage, KeyUsage, KeyUsageFlags};
pub use name::{OtherName, SubjectAltName};
