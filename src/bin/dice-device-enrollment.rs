// SPDX-FileCopyrightText: 2023 Rivos Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Generates the DICE enrollment certificate of a DevKit firmware build.

use std::io;
use std::path::PathBuf;

use anyhow::ensure;
use clap::Parser;
use zeroize::Zeroizing;

use dice_riot::enrollment::{enroll, input, input_files, EnrollmentRequest};
use dice_riot::riot::{DeviceCertKind, RiotConfig};

#[derive(Parser, Debug)]
#[command(about = "Generates the DICE enrollment certificate of a DevKit firmware build")]
struct Args {
    /// Firmware project name; `<project>.bin` and `<project>.map` are read.
    #[arg(long)]
    project: Option<PathBuf>,

    /// Unique Device Secret, as 64 hex digits.
    #[arg(long)]
    uds: Option<String>,

    /// Registration id. Generated from the MAC address and firmware version
    /// when absent.
    #[arg(long)]
    registration_id: Option<String>,

    /// DevKit MAC address, 12 hex digits.
    #[arg(long)]
    mac: Option<String>,

    /// DevKit firmware version, as num.num.num.
    #[arg(long)]
    firmware_version: Option<String>,

    /// Output directory of `<registration id>.pem`.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Emit a certificate request for the DeviceID instead of a self-signed
    /// certificate.
    #[arg(long)]
    csr: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let stdin = io::stdin();
    let mut prompter = input::Prompter::new(stdin.lock(), io::stdout());

    let project = match args.project {
        Some(project) => project,
        None => PathBuf::from(prompter.ask("Input the project name of your firmware build: ")?),
    };
    ensure!(
        !project.as_os_str().is_empty(),
        "project name can not be empty"
    );
    input_files(&project)?;

    let uds_text = Zeroizing::new(prompter.value_or_ask(
        args.uds,
        "Input the UDS you saved into the security chip of your DevKit: ",
    )?);
    let uds = input::parse_uds(&uds_text)?;

    let registration_id =
        prompter.registration_id(args.registration_id, args.mac, args.firmware_version)?;

    let config = RiotConfig {
        device_cert: if args.csr {
            DeviceCertKind::Csr
        } else {
            DeviceCertKind::default()
        },
        ..RiotConfig::default()
    };

    let path = enroll(EnrollmentRequest {
        project,
        uds,
        registration_id,
        out_dir: args.out_dir,
        config,
    })?;
    println!("{}", path.display());

    Ok(())
}
