// SPDX-FileCopyrightText: 2023 Rivos Inc.
//
// SPDX-License-Identifier: Apache-2.0

/// Source of the two measured byte ranges.
///
/// DICE measures the RIoT Core image, RIoT measures the RIoT Firmware
/// image. Both are opaque bytes: nothing here parses their content.
pub trait ImageProvider {
    /// The RIoT Core (invariant code) image.
    fn core_image(&self) -> &[u8];

    /// The RIoT Firmware (mutable code) image.
    fn firmware_image(&self) -> &[u8];
}

/// Images held in borrowed buffers.
#[derive(Clone, Copy, Debug)]
pub struct StaticImage<'a> {
    core: &'a [u8],
    firmware: &'a [u8],
}

impl<'a> StaticImage<'a> {
    pub fn new(core: &'a [u8], firmware: &'a [u8]) -> Self {
        StaticImage { core, firmware }
    }
}

impl ImageProvider for StaticImage<'_> {
    fn core_image(&self) -> &[u8] {
        self.core
    }

    fn firmware_image(&self) -> &[u8] {
        self.firmware
    }
}

#[cfg(all(target_arch = "arm", target_os = "none"))]
pub use self::linker::LinkerImage;

#[cfg(all(target_arch = "arm", target_os = "none"))]
mod linker {
    use super::ImageProvider;

    extern "C" {
        static __start_riot_core: u8;
        static __stop_riot_core: u8;
        static __start_riot_fw: u8;
        static __stop_riot_fw: u8;
    }

    /// Images delimited by the `.riot_core` and `.riot_fw` linker sections.
    pub struct LinkerImage;

    fn section(start: *const u8, stop: *const u8) -> &'static [u8] {
        let len = (stop as usize).saturating_sub(start as usize);
        // SAFETY: the linker script places both symbols around a contiguous
        // flash section that is never written while the image runs.
        unsafe { core::slice::from_raw_parts(start, len) }
    }

    impl ImageProvider for LinkerImage {
        fn core_image(&self) -> &[u8] {
            // SAFETY: only the addresses of the symbols are taken.
            unsafe {
                section(
                    core::ptr::addr_of!(__start_riot_core),
                    core::ptr::addr_of!(__stop_riot_core),
                )
            }
        }

        fn firmware_image(&self) -> &[u8] {
            // SAFETY: only the addresses of the symbols are taken.
            unsafe {
                section(
                    core::ptr::addr_of!(__start_riot_fw),
                    core::ptr::addr_of!(__stop_riot_fw),
                )
            }
        }
    }
}
