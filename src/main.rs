//! ntfs-recover - NTFS metadata recovery engine
//!
//! Enumerates MFT records on a raw volume or image and exports deleted
//! file content by record number.

use anyhow::{Context, Result};
use clap::Parser;
use ntfs_recover::application::dto::ScanOptions;
use ntfs_recover::application::{ExportRecordUseCase, ScanMftUseCase};
use ntfs_recover::domain::repositories::BlockDeviceReader;
use ntfs_recover::infrastructure::block_device::MmapBlockDevice;
use ntfs_recover::infrastructure::file_systems::ntfs::decode_boot_sector;
use ntfs_recover::presentation::cli::{Cli, Commands, ProgressReporter};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    match cli.command {
        Commands::ScanMft {
            image,
            filter,
            name_contains,
            deleted_only,
            threshold,
        } => run_scan_mft(&image, filter, name_contains, deleted_only, threshold, cli.verbose),

        Commands::Export { image, record, out } => run_export(&image, record, &out),
    }
}

fn init_logging(cli: &Cli) {
    let level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_scan_mft(
    image: &str,
    filter: Option<String>,
    name_contains: Option<String>,
    deleted_only: bool,
    threshold: u32,
    verbose: bool,
) -> Result<()> {
    let device = MmapBlockDevice::open(image)
        .with_context(|| format!("failed to open {image}"))?;
    let geometry = decode_boot_sector(&device.read_at(0, 512)?)
        .context("failed to decode boot sector")?;

    let mut options = ScanOptions::new().with_bad_run_threshold(threshold);
    if let Some(f) = filter {
        options = options.with_path_filter(f);
    }
    if let Some(n) = name_contains {
        options = options.with_name_contains(n);
    }
    options = options.with_deleted_only(deleted_only);

    let progress = verbose.then(ProgressReporter::for_scan_mft);
    let callback = progress.as_ref().map(|p| p.scan_callback());

    let summaries = ScanMftUseCase::new().execute(&device, geometry, &options, callback);

    if let Some(p) = &progress {
        p.finish(&format!("{} records matched", summaries.len()));
    }

    let json = serde_json::to_string_pretty(&summaries)?;
    println!("{json}");

    Ok(())
}

fn run_export(image: &str, record: u64, out: &std::path::Path) -> Result<()> {
    let device = MmapBlockDevice::open(image)
        .with_context(|| format!("failed to open {image}"))?;
    let geometry = decode_boot_sector(&device.read_at(0, 512)?)
        .context("failed to decode boot sector")?;

    let written = ExportRecordUseCase::new().execute(&device, geometry, record, out)?;
    eprintln!("wrote {written} bytes to {}", out.display());

    Ok(())
}
