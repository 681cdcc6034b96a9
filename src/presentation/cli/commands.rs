//! CLI commands using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// ntfs-recover - NTFS metadata recovery engine
///
/// Enumerates MFT records on a raw volume or image and exports deleted
/// file content by record number.
#[derive(Parser)]
#[command(name = "ntfs-recover")]
#[command(version = "0.1.0")]
#[command(about = "Recover deleted NTFS file metadata and content", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan $MFT and print record summaries as a JSON array
    ScanMft {
        /// Path to the volume or image file
        #[arg(long)]
        image: String,

        /// Case-insensitive substring match against the reconstructed path
        #[arg(long)]
        filter: Option<String>,

        /// Case-insensitive substring match against the file name alone
        #[arg(long = "name-contains")]
        name_contains: Option<String>,

        /// Restrict to deleted records only
        #[arg(long)]
        deleted_only: bool,

        /// Consecutive bad-record threshold before the scan gives up
        #[arg(long, default_value = "1024")]
        threshold: u32,
    },

    /// Export one MFT record's $DATA stream to a file
    Export {
        /// Path to the volume or image file
        #[arg(long)]
        image: String,

        /// MFT record number to export
        #[arg(long)]
        record: u64,

        /// Output file path
        #[arg(long = "out")]
        out: PathBuf,
    },
}
