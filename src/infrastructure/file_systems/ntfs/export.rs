//! Export engine
//!
//! Writes a single MFT record's `$DATA` stream out to a sink: the
//! resident value verbatim, or the non-resident runlist read back from
//! the device run by run. Sparse runs are zero-filled rather than
//! skipped, and the final output is clipped to the attribute's real size
//! since the last cluster of a run is usually only partially used.

use super::iterator::MftIterator;
use crate::domain::entities::BootGeometry;
use crate::domain::repositories::{BlockDeviceReader, NtfsError};
use std::io::Write;

/// Real extents are read back from the device in chunks this large, to
/// bound peak memory on a run spanning a very large file.
const CHUNK_SIZE: usize = 4 * 1024 * 1024;

/// Locates `record_num` by scanning the MFT and writes its `$DATA`
/// stream to `out`. Returns the number of bytes written.
pub fn export_record<R: BlockDeviceReader, W: Write>(
    device: &R,
    geometry: BootGeometry,
    record_num: u64,
    out: &mut W,
) -> Result<u64, NtfsError> {
    let record = MftIterator::new(device, geometry)
        .find(|r| r.record_num == record_num)
        .ok_or(NtfsError::RecordNotFound { record_num })?;

    let data = record.data.ok_or(NtfsError::NoData { record_num })?;

    if let Some(resident) = &data.resident_data {
        out.write_all(resident)
            .map_err(|e| io_error(record_num, e))?;
        return Ok(resident.len() as u64);
    }

    if data.runs.is_empty() {
        return Err(NtfsError::NoRuns { record_num });
    }

    let cluster_size = geometry.cluster_size();
    let limit = data.data_size;
    let mut written: u64 = 0;

    for run in &data.runs {
        if limit.is_some_and(|l| written >= l) {
            break;
        }

        let mut run_remaining = run.length * cluster_size;
        if let Some(l) = limit {
            run_remaining = run_remaining.min(l - written);
        }

        if run.is_hole() {
            write_zeros(out, run_remaining).map_err(|e| io_error(record_num, e))?;
            written += run_remaining;
            continue;
        }

        let mut device_offset = geometry.lcn_to_offset(run.lcn as u64);
        while run_remaining > 0 {
            let chunk_len = (run_remaining as usize).min(CHUNK_SIZE);
            let chunk = device.read_at(device_offset, chunk_len)?;
            out.write_all(&chunk).map_err(|e| io_error(record_num, e))?;
            let advanced = chunk.len() as u64;
            device_offset += advanced;
            written += advanced;
            run_remaining -= advanced;
            if advanced == 0 {
                break;
            }
        }
    }

    Ok(written)
}

fn write_zeros<W: Write>(out: &mut W, mut remaining: u64) -> std::io::Result<()> {
    const ZEROS: [u8; 64 * 1024] = [0u8; 64 * 1024];
    while remaining > 0 {
        let chunk = (remaining as usize).min(ZEROS.len());
        out.write_all(&ZEROS[..chunk])?;
        remaining -= chunk as u64;
    }
    Ok(())
}

fn io_error(record_num: u64, e: std::io::Error) -> NtfsError {
    NtfsError::IoFailure(crate::domain::repositories::BlockDeviceError::IoError(e))
}
