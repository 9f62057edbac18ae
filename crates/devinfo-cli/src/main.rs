// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// devinfo — command-line host for the device info provider.
//
// Entry point. Initialises logging, wires the platform bridge into the
// provider, runs one action and prints the JSON result on stdout.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::mpsc;

use clap::Parser;
use devinfo_bridge::platform_bridge;
use devinfo_bridge::traits::PlatformBridge;
use devinfo_core::ProviderConfig;
use devinfo_core::error::Result;
use devinfo_plugin::DeviceInfoProvider;

/// Exit status for an action name the provider does not handle.
const EXIT_NOT_HANDLED: u8 = 2;

#[derive(Parser)]
#[command(name = "devinfo")]
#[command(author, version, about = "Report device information", long_about = None)]
struct Cli {
    /// Action to run (getDeviceInfo, getPermission)
    #[arg(default_value = "getDeviceInfo")]
    action: String,

    /// JSON file with provider configuration overrides
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pretty-print the JSON result
    #[arg(long)]
    pretty: bool,

    /// Increase verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "devinfo failed");
            eprintln!("devinfo: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let config = match &cli.config {
        Some(path) => ProviderConfig::from_file(path)?,
        None => ProviderConfig::default(),
    };

    let bridge = platform_bridge();
    tracing::info!(platform = bridge.platform_name(), "devinfo starting");
    let mut provider = DeviceInfoProvider::new(bridge, config)?;

    let (tx, rx) = mpsc::channel();
    if !provider.execute(&cli.action, tx) {
        eprintln!("devinfo: action `{}` not handled", cli.action);
        return Ok(ExitCode::from(EXIT_NOT_HANDLED));
    }

    // A gated request stays parked until the host answers the permission
    // prompt, which never happens without a UI.
    let Ok(result) = rx.try_recv() else {
        eprintln!("devinfo: request is waiting on a permission prompt");
        return Ok(ExitCode::FAILURE);
    };

    let json = result.to_json()?;
    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&json)?
    } else {
        serde_json::to_string(&json)?
    };
    println!("{rendered}");

    Ok(if result.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
