// SPDX-FileCopyrightText: 2023 Rivos Inc.
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, ensure, Context};
use log::debug;

use crate::image::ImageProvider;

pub const RIOT_CORE_START: &str = "__start_riot_core";
pub const RIOT_CORE_STOP: &str = "__stop_riot_core";
pub const RIOT_FW_START: &str = "__start_riot_fw";
pub const RIOT_FW_STOP: &str = "__stop_riot_fw";

// Flash region row of the "Memory Configuration" table.
const FLASH_REGION: &str = "FLASH";

fn parse_hex(token: &str) -> Option<u64> {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))?;
    u64::from_str_radix(digits, 16).ok()
}

/// The parts of a GNU ld map file the enrollment tool needs.
#[derive(Debug, Default)]
pub struct LinkerMap {
    flash_origin: Option<u64>,
    symbols: BTreeMap<String, u64>,
}

impl LinkerMap {
    /// Collects the FLASH origin and every `<address> <symbol> = ...`
    /// assignment. A symbol assigned twice keeps its last address.
    pub fn parse(text: &str) -> Self {
        let mut map = LinkerMap::default();

        for line in text.lines() {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            match tokens.as_slice() {
                [FLASH_REGION, origin, ..] if map.flash_origin.is_none() => {
                    map.flash_origin = parse_hex(origin);
                }
                [address, symbol, "=", ..] => {
                    if let Some(address) = parse_hex(address) {
                        map.symbols.insert(symbol.to_string(), address);
                    }
                }
                _ => {}
            }
        }

        map
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("unable to read map file {}", path.display()))?;
        Ok(Self::parse(&text))
    }

    /// Load address of the FLASH region, which is file offset 0 of the binary.
    pub fn flash_origin(&self) -> anyhow::Result<u64> {
        self.flash_origin
            .ok_or_else(|| anyhow!("no FLASH region in the map Memory Configuration"))
    }

    pub fn symbol(&self, name: &str) -> anyhow::Result<u64> {
        self.symbols
            .get(name)
            .copied()
            .ok_or_else(|| anyhow!("symbol {} not found in the map file", name))
    }
}

// Byte range of the binary between two load addresses.
fn section<'a>(
    binary: &'a [u8],
    flash_origin: u64,
    start: u64,
    stop: u64,
    name: &str,
) -> anyhow::Result<&'a [u8]> {
    ensure!(
        start <= stop,
        "{} ends at {:#x}, before its start {:#x}",
        name,
        stop,
        start
    );

    let offset = |address: u64| {
        address
            .checked_sub(flash_origin)
            .and_then(|offset| usize::try_from(offset).ok())
            .ok_or_else(|| {
                anyhow!(
                    "{} address {:#x} is below the flash origin {:#x}",
                    name,
                    address,
                    flash_origin
                )
            })
    };
    let (begin, end) = (offset(start)?, offset(stop)?);

    binary.get(begin..end).ok_or_else(|| {
        anyhow!(
            "{} spans file offsets {:#x}..{:#x}, past the {} byte binary",
            name,
            begin,
            end,
            binary.len()
        )
    })
}

/// RIoT Core and RIoT Firmware images cut out of a compiled binary.
#[derive(Debug)]
pub struct MapFileImage {
    core: Vec<u8>,
    firmware: Vec<u8>,
}

impl MapFileImage {
    pub fn from_parts(binary: &[u8], map: &LinkerMap) -> anyhow::Result<Self> {
        let core_start = map.symbol(RIOT_CORE_START)?;
        let core_stop = map.symbol(RIOT_CORE_STOP)?;
        let fw_start = map.symbol(RIOT_FW_START)?;
        let fw_stop = map.symbol(RIOT_FW_STOP)?;
        let flash_origin = map.flash_origin()?;

        let core = section(binary, flash_origin, core_start, core_stop, "RIoT Core")?;
        let firmware = section(binary, flash_origin, fw_start, fw_stop, "RIoT Firmware")?;
        debug!(
            "RIoT Core {} bytes at {:#x}, RIoT Firmware {} bytes at {:#x}",
            core.len(),
            core_start,
            firmware.len(),
            fw_start
        );

        Ok(MapFileImage {
            core: core.to_vec(),
            firmware: firmware.to_vec(),
        })
    }

    pub fn load(bin_path: &Path, map_path: &Path) -> anyhow::Result<Self> {
        let map = LinkerMap::from_file(map_path)?;
        let binary = fs::read(bin_path)
            .with_context(|| format!("unable to read binary file {}", bin_path.display()))?;

        Self::from_parts(&binary, &map)
            .with_context(|| format!("invalid RIoT layout in {}", map_path.display()))
    }
}

impl ImageProvider for MapFileImage {
    fn core_image(&self) -> &[u8] {
        &self.core
    }

    fn firmware_image(&self) -> &[u8] {
        &self.firmware
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAP: &str = "\
Memory Configuration

Name             Origin             Length             Attributes
FLASH            0x08000000         0x00100000         xr
RAM              0x20000000         0x00040000         xrw
*default*        0x00000000         0xffffffff

Linker script and memory map

 .riot_core     0x08000010       0x40
                0x08000010                __start_riot_core = .
 *(.riot_core*)
                0x08000050                __stop_riot_core = .
 .riot_fw       0x08000050       0x80
                0x08000050                __start_riot_fw = .
                0x080000d0                __stop_riot_fw = .
";

    fn binary() -> Vec<u8> {
        let mut binary = vec![0u8; 0x100];
        binary[0x10..0x50].fill(0xaa);
        binary[0x50..0xd0].fill(0xbb);
        binary
    }

    #[test]
    fn parses_flash_origin_and_symbols() {
        let map = LinkerMap::parse(MAP);

        assert_eq!(map.flash_origin().unwrap(), 0x0800_0000);
        assert_eq!(map.symbol(RIOT_CORE_START).unwrap(), 0x0800_0010);
        assert_eq!(map.symbol(RIOT_CORE_STOP).unwrap(), 0x0800_0050);
        assert_eq!(map.symbol(RIOT_FW_START).unwrap(), 0x0800_0050);
        assert_eq!(map.symbol(RIOT_FW_STOP).unwrap(), 0x0800_00d0);
    }

    #[test]
    fn extracts_images() {
        let image = MapFileImage::from_parts(&binary(), &LinkerMap::parse(MAP)).unwrap();

        assert_eq!(image.core_image(), &[0xaa; 0x40][..]);
        assert_eq!(image.firmware_image(), &[0xbb; 0x80][..]);
    }

    #[test]
    fn missing_symbol_is_named() {
        let text = MAP.replace("__stop_riot_fw", "__end_of_text");
        let err = MapFileImage::from_parts(&binary(), &LinkerMap::parse(&text)).unwrap_err();

        assert!(err.to_string().contains(RIOT_FW_STOP));
    }

    #[test]
    fn missing_flash_region() {
        let text = MAP.replace("FLASH ", "ROM ");
        assert!(LinkerMap::parse(&text).flash_origin().is_err());
    }

    #[test]
    fn section_past_end_of_binary() {
        let err = MapFileImage::from_parts(&binary()[..0x60], &LinkerMap::parse(MAP)).unwrap_err();
        assert!(err.to_string().contains("RIoT Firmware"));
    }

    #[test]
    fn section_below_flash_origin() {
        let text = MAP.replace(
            "0x08000010                __start_riot_core",
            "0x07ff0000                __start_riot_core",
        );
        assert!(MapFileImage::from_parts(&binary(), &LinkerMap::parse(&text)).is_err());
    }
}
