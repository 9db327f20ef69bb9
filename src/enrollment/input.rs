// SPDX-FileCopyrightText: 2023 Rivos Inc.
//
// SPDX-License-Identifier: Apache-2.0

use std::io::{BufRead, Write};

use anyhow::{bail, Context};
use log::error;
use zeroize::Zeroizing;

use crate::registration::RegistrationId;
use crate::uds::UniqueDeviceSecret;
use crate::UDS_LENGTH;

/// Length of the UDS as typed by the user.
pub const UDS_HEX_LENGTH: usize = 2 * UDS_LENGTH;

/// Parses the 64 hex digit UDS.
///
/// Every offending character is reported, not only the first one.
pub fn parse_uds(text: &str) -> anyhow::Result<UniqueDeviceSecret> {
    if text.is_empty() {
        bail!("UDS can not be empty");
    }

    let len = text.chars().count();
    if len != UDS_HEX_LENGTH {
        bail!(
            "UDS must be {} hex characters but the input is {} characters long",
            UDS_HEX_LENGTH,
            len
        );
    }

    let mut bad_chars = 0;
    for (position, c) in text.chars().enumerate() {
        if !c.is_ascii_hexdigit() {
            error!("UDS character {} ({:?}) is not a hex digit", position + 1, c);
            bad_chars += 1;
        }
    }
    if bad_chars > 0 {
        bail!("UDS contains {} non hex characters", bad_chars);
    }

    let mut bytes = Zeroizing::new([0u8; UDS_LENGTH]);
    hex::decode_to_slice(text, &mut bytes[..]).context("invalid UDS hex string")?;

    Ok(UniqueDeviceSecret::provisioned(*bytes))
}

/// Line based prompts on a reader and writer pair.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    /// Prints `text` and reads one answer. Only the first word is kept.
    pub fn ask(&mut self, text: &str) -> anyhow::Result<String> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = Zeroizing::new(String::new());
        self.input
            .read_line(&mut line)
            .context("unable to read from standard input")?;

        Ok(line.split_whitespace().next().unwrap_or_default().to_string())
    }

    /// Returns `value`, or asks for it.
    pub fn value_or_ask(&mut self, value: Option<String>, text: &str) -> anyhow::Result<String> {
        match value {
            Some(value) => Ok(value),
            None => self.ask(text),
        }
    }

    /// Picks the registration id.
    ///
    /// An explicit id wins. Without one, and without MAC or firmware version
    /// on the command line, the user is asked for an id first; an empty
    /// answer falls back to generating it from the MAC and firmware version.
    pub fn registration_id(
        &mut self,
        registration_id: Option<String>,
        mac: Option<String>,
        firmware_version: Option<String>,
    ) -> anyhow::Result<RegistrationId> {
        let supplied = match registration_id {
            Some(id) => id,
            None if mac.is_some() || firmware_version.is_some() => String::new(),
            None => self.ask(
                "Input your preferred registration id as set in DPS.ino \
                 (empty to generate one): ",
            )?,
        };

        if !supplied.is_empty() {
            return RegistrationId::parse(&supplied).context("invalid registration id");
        }

        let mac = self.value_or_ask(mac, "Input the MAC address of your DevKit: ")?;
        let firmware_version =
            self.value_or_ask(firmware_version, "Input the firmware version of your DevKit: ")?;

        RegistrationId::resolve(None, &mac, &firmware_version)
            .context("unable to generate a registration id")
    }
}
