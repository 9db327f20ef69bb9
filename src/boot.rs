// SPDX-FileCopyrightText: 2023 Rivos Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Boot flow: DICE runs first, hands the CDI to RIoT Core, and RIoT issues
//! the credentials the provisioning client runs with.

use log::{error, info};

use crate::{
    dice::DiceContext,
    image::ImageProvider,
    registration::RegistrationId,
    riot::{derive_identity, RiotConfig, RiotIdentity},
    uds::UdsStore,
    Result,
};

/// Runs DICE then RIoT Core.
///
/// RIoT Core is only reached with a CDI derived from a provisioned UDS. The
/// UDS and the CDI are wiped before this returns.
pub fn start<S: UdsStore, I: ImageProvider>(
    store: &S,
    image: &I,
    registration_id: &RegistrationId,
    config: &RiotConfig,
) -> Result<RiotIdentity> {
    let cdi = {
        let uds = store.load()?;
        uds.validate()?;
        DiceContext::new().compute_cdi(image.core_image(), &uds)?
    };
    info!("DICE measured boot complete");

    derive_identity(&cdi, registration_id, image, config)
}

/// Same as [`start`], but parks the core on failure.
///
/// A device that cannot prove its identity must not go on to run the
/// firmware.
pub fn start_or_halt<S: UdsStore, I: ImageProvider>(
    store: &S,
    image: &I,
    registration_id: &RegistrationId,
    config: &RiotConfig,
) -> RiotIdentity {
    match start(store, image, registration_id, config) {
        Ok(identity) => identity,
        Err(err) => {
            error!("DICE boot failed: {}", err);
            loop {
                core::hint::spin_loop();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::riot::X509Provider;
    use crate::uds::{StaticUdsStore, UniqueDeviceSecret, DICE_UDS_TAG};
    use crate::Error;
    use core::cell::Cell;

    // Counts how often RIoT Core asks for the firmware image.
    struct CountingImage {
        firmware_reads: Cell<usize>,
    }

    impl ImageProvider for CountingImage {
        fn core_image(&self) -> &[u8] {
            &[0xaa; 64]
        }

        fn firmware_image(&self) -> &[u8] {
            self.firmware_reads.set(self.firmware_reads.get() + 1);
            &[0xbb; 128]
        }
    }

    fn image() -> CountingImage {
        CountingImage {
            firmware_reads: Cell::new(0),
        }
    }

    #[test]
    fn boot_produces_identity() {
        let store = StaticUdsStore::new(UniqueDeviceSecret::provisioned([0u8; 32]));
        let image = image();
        let registration_id = RegistrationId::parse("test-device-01").unwrap();

        let identity = start(&store, &image, &registration_id, &RiotConfig::default()).unwrap();
        assert_eq!(identity.common_name(), "test-device-01");
        assert_eq!(image.firmware_reads.get(), 1);
    }

    #[test]
    fn unprovisioned_uds_never_reaches_riot() {
        let store = StaticUdsStore::new(UniqueDeviceSecret::new(DICE_UDS_TAG + 1, [0u8; 32]));
        let image = image();
        let registration_id = RegistrationId::parse("test-device-01").unwrap();

        assert!(matches!(
            start(&store, &image, &registration_id, &RiotConfig::default()),
            Err(Error::UdsNotProvisioned(_))
        ));
        assert_eq!(image.firmware_reads.get(), 0);
    }

    #[test]
    fn undersized_core_never_reaches_riot() {
        struct TinyCore;

        impl ImageProvider for TinyCore {
            fn core_image(&self) -> &[u8] {
                &[0u8; 4]
            }

            fn firmware_image(&self) -> &[u8] {
                panic!("RIoT Core must not run");
            }
        }

        let store = StaticUdsStore::new(UniqueDeviceSecret::provisioned([0u8; 32]));
        let registration_id = RegistrationId::parse("test-device-01").unwrap();
        assert!(matches!(
            start(&store, &TinyCore, &registration_id, &RiotConfig::default()),
            Err(Error::CoreImageTooSmall(4))
        ));
    }
}
