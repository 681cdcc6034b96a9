//! Export record use case
//!
//! Locates one MFT record and writes its `$DATA` stream to an output
//! file, delegating the byte-level work to the infrastructure export
//! engine.

use crate::domain::entities::BootGeometry;
use crate::domain::repositories::{BlockDeviceError, BlockDeviceReader, NtfsError};
use crate::infrastructure::file_systems::ntfs;
use std::io::{BufWriter, Write};
use std::path::Path;

pub struct ExportRecordUseCase;

impl ExportRecordUseCase {
    pub fn new() -> Self {
        Self
    }

    pub fn execute<R: BlockDeviceReader>(
        &self,
        device: &R,
        geometry: BootGeometry,
        record_num: u64,
        output_path: &Path,
    ) -> Result<u64, NtfsError> {
        tracing::info!(record_num, path = device.path(), "exporting record");

        let file = std::fs::File::create(output_path)
            .map_err(|e| NtfsError::IoFailure(BlockDeviceError::IoError(e)))?;
        let mut writer = BufWriter::new(file);

        let written = ntfs::export_record(device, geometry, record_num, &mut writer)?;

        writer
            .flush()
            .map_err(|e| NtfsError::IoFailure(BlockDeviceError::IoError(e)))?;

        tracing::info!(
            record_num,
            bytes = written,
            out = %output_path.display(),
            "export complete"
        );

        Ok(written)
    }
}

impl Default for ExportRecordUseCase {
    fn default() -> Self {
        Self::new()
    }
}
