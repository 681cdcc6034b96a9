//! NTFS decoder error taxonomy
//!
//! Record-level errors (`TornRecord`, `BadSignature`, `MalformedAttribute`)
//! are recovered locally by the iterator and never bubble up as a failed
//! scan; they exist as typed values so callers that want the detail (a
//! forensic log, a test assertion) can get it without string matching.

use super::BlockDeviceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NtfsError {
    #[error("I/O failure: {0}")]
    IoFailure(#[from] BlockDeviceError),

    #[error("read beyond end of image: offset {offset} + length {length} > size {size}")]
    OutOfBounds {
        offset: u64,
        length: usize,
        size: u64,
    },

    #[error("bad boot sector: {reason}")]
    BadBootSector { reason: String },

    #[error("torn record at offset {offset}: sector trailer did not match the update sequence number")]
    TornRecord { offset: u64 },

    #[error("record at offset {offset} does not begin with the FILE signature")]
    BadSignature { offset: u64 },

    #[error("malformed attribute at record-relative offset {offset} in record {record_num}")]
    MalformedAttribute { record_num: u64, offset: usize },

    #[error("record {record_num} has no $DATA attribute")]
    NoData { record_num: u64 },

    #[error("record {record_num} is non-resident but its runlist decoded to no extents")]
    NoRuns { record_num: u64 },

    #[error("record {record_num} not found while scanning the MFT")]
    RecordNotFound { record_num: u64 },
}
