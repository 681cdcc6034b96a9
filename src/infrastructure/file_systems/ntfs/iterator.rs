//! Sequential MFT record iterator
//!
//! Streams fixed-size records out of `$MFT` one at a time. A record that
//! fails to decode (torn, bad signature, unreadable) is logged and
//! skipped rather than treated as a scan failure; only a long run of
//! consecutive failures ends the scan early, since that's the signature
//! of having walked off the end of a valid MFT into unrelated data.

use super::record::decode_record;
use crate::domain::entities::{BootGeometry, MftRecord};
use crate::domain::repositories::BlockDeviceReader;

/// Consecutive decode failures tolerated before the iterator gives up.
pub const DEFAULT_BAD_RUN_THRESHOLD: u32 = 1024;

/// Hard cap on records visited, independent of device size. Guards
/// against a corrupt boot sector reporting an MFT record size of zero
/// or a bogus run length producing an effectively unbounded scan.
const MAX_RECORDS_CAP: u64 = 2_000_000;

pub struct MftIterator<'a, R: BlockDeviceReader> {
    device: &'a R,
    geometry: BootGeometry,
    record_size: u64,
    mft_offset: u64,
    next_index: u64,
    max_records: u64,
    consecutive_bad: u32,
    bad_threshold: u32,
}

impl<'a, R: BlockDeviceReader> MftIterator<'a, R> {
    pub fn new(device: &'a R, geometry: BootGeometry) -> Self {
        let record_size = geometry.mft_record_size().max(1);
        let mft_offset = geometry.mft_offset();
        let available = device.size().saturating_sub(mft_offset);
        let max_records = (available / record_size).min(MAX_RECORDS_CAP);

        Self {
            device,
            geometry,
            record_size,
            mft_offset,
            next_index: 0,
            max_records,
            consecutive_bad: 0,
            bad_threshold: DEFAULT_BAD_RUN_THRESHOLD,
        }
    }

    pub fn with_bad_run_threshold(mut self, threshold: u32) -> Self {
        self.bad_threshold = threshold;
        self
    }
}

impl<'a, R: BlockDeviceReader> Iterator for MftIterator<'a, R> {
    type Item = MftRecord;

    fn next(&mut self) -> Option<MftRecord> {
        while self.next_index < self.max_records {
            let idx = self.next_index;
            self.next_index += 1;
            let offset = self.mft_offset + idx * self.record_size;

            let mut buf = match self.device.read_at(offset, self.record_size as usize) {
                Ok(buf) => buf,
                Err(e) => {
                    tracing::debug!(idx, offset, error = %e, "stopping MFT scan: read failed");
                    return None;
                }
            };

            match decode_record(&mut buf, self.geometry.bytes_per_sector, offset, idx) {
                Ok(record) => {
                    self.consecutive_bad = 0;
                    return Some(record);
                }
                Err(e) => {
                    tracing::trace!(idx, offset, error = %e, "skipping unreadable MFT record");
                    self.consecutive_bad += 1;
                    if self.consecutive_bad > self.bad_threshold {
                        tracing::warn!(
                            idx,
                            threshold = self.bad_threshold,
                            "stopping MFT scan: too many consecutive bad records"
                        );
                        return None;
                    }
                }
            }
        }
        None
    }
}
