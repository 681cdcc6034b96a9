//! Per-record summary produced by the metadata scanner.

use serde::Serialize;

/// Allocation state of an MFT record, as reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    Live,
    Deleted,
}

/// The listing entry the scanner emits for one MFT record.
#[derive(Debug, Clone, Serialize)]
pub struct RecordSummary {
    pub record: u64,
    pub name: String,
    /// Reconstructed `/`-joined path, when the parent chain could be
    /// walked to a known ancestor within the depth limit.
    pub path: Option<String>,
    pub is_dir: bool,
    pub status: RecordStatus,
    pub size: u64,
    /// Low 48 bits of `base_file_reference`, when this record is an
    /// extension of another (non-zero) record. Extension records are
    /// listed as-is rather than merged into their base.
    pub base_ref: Option<u64>,
}
