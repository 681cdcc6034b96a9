//! File-backed block device implementation
//!
//! Provides raw read access to disk images and `/dev/*` raw devices via
//! standard file I/O. This is the portable fallback; `MmapBlockDevice` is
//! preferred when the backing store supports mapping and the access
//! pattern is read-heavy and sequential, which is the common case when
//! streaming the MFT.

use crate::domain::repositories::{BlockDeviceError, BlockDeviceReader, DeviceInfo};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

pub struct FileBlockDevice {
    file: Mutex<File>,
    path: String,
    size: u64,
    block_size: u32,
}

impl FileBlockDevice {
    fn detect_block_size(path: &Path) -> u32 {
        if path.starts_with("/dev/") {
            4096
        } else {
            512
        }
    }

    /// Gets the device/file size. Regular files report their length
    /// directly; raw devices don't, so fall back to seeking to the end
    /// (a full implementation would use a platform ioctl instead).
    fn get_size(file: &File, path: &Path) -> Result<u64, BlockDeviceError> {
        let metadata = file.metadata().map_err(BlockDeviceError::IoError)?;

        if metadata.is_file() {
            Ok(metadata.len())
        } else {
            let mut f = file.try_clone().map_err(BlockDeviceError::IoError)?;
            let size = f
                .seek(SeekFrom::End(0))
                .map_err(BlockDeviceError::IoError)?;
            f.seek(SeekFrom::Start(0))
                .map_err(BlockDeviceError::IoError)?;

            if size == 0 {
                Err(BlockDeviceError::Other(format!(
                    "could not determine size of {}",
                    path.display()
                )))
            } else {
                Ok(size)
            }
        }
    }
}

impl BlockDeviceReader for FileBlockDevice {
    fn open(path: &str) -> Result<Self, BlockDeviceError> {
        let path_obj = Path::new(path);

        if !path_obj.exists() {
            return Err(BlockDeviceError::DeviceNotFound(path.to_string()));
        }

        let file = OpenOptions::new().read(true).open(path_obj).map_err(|e| {
            if e.kind() == std::io::ErrorKind::PermissionDenied {
                BlockDeviceError::PermissionDenied(format!("{} - try running with elevated privileges", path))
            } else {
                BlockDeviceError::IoError(e)
            }
        })?;

        let size = Self::get_size(&file, path_obj)?;
        let block_size = Self::detect_block_size(path_obj);

        tracing::debug!(path, size, block_size, "opened file block device");

        Ok(Self {
            file: Mutex::new(file),
            path: path.to_string(),
            size,
            block_size,
        })
    }

    fn device_info(&self) -> Result<DeviceInfo, BlockDeviceError> {
        Ok(DeviceInfo {
            path: self.path.clone(),
            size: self.size,
            block_size: self.block_size,
            read_only: true,
            model: None,
            serial: None,
        })
    }

    fn read_at(&self, offset: u64, length: usize) -> Result<Vec<u8>, BlockDeviceError> {
        if offset >= self.size {
            return Err(BlockDeviceError::InvalidOffset {
                offset,
                device_size: self.size,
            });
        }

        let mut file = self.file.lock();

        file.seek(SeekFrom::Start(offset))
            .map_err(BlockDeviceError::IoError)?;

        let available = (self.size - offset) as usize;
        let to_read = length.min(available);

        let mut buffer = vec![0u8; to_read];
        file.read_exact(&mut buffer).map_err(|e| {
            if e.kind() == std::io::ErrorKind::UnexpectedEof {
                BlockDeviceError::ReadError {
                    offset,
                    message: "unexpected end of device".to_string(),
                }
            } else {
                BlockDeviceError::IoError(e)
            }
        })?;

        Ok(buffer)
    }

    fn read_chunks<F>(
        &self,
        start_offset: u64,
        chunk_size: usize,
        mut callback: F,
    ) -> Result<u64, BlockDeviceError>
    where
        F: FnMut(u64, &[u8]) -> bool,
    {
        let mut offset = start_offset;
        let mut total_read = 0u64;

        while offset < self.size {
            let data = self.read_at(offset, chunk_size)?;
            let bytes_read = data.len() as u64;

            if bytes_read == 0 {
                break;
            }

            if !callback(offset, &data) {
                break;
            }

            total_read += bytes_read;
            offset += bytes_read;
        }

        Ok(total_read)
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn size(&self) -> u64 {
        self.size
    }
}

unsafe impl Send for FileBlockDevice {}
unsafe impl Sync for FileBlockDevice {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn open_nonexistent_fails() {
        assert!(FileBlockDevice::open("/nonexistent/path/to/image.dd").is_err());
    }

    #[test]
    fn read_at_returns_requested_bytes() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"hello world").unwrap();
        file.flush().unwrap();

        let device = FileBlockDevice::open(file.path().to_str().unwrap()).unwrap();
        assert_eq!(device.read_at(6, 5).unwrap(), b"world");
    }

    #[test]
    fn read_at_past_size_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"short").unwrap();
        file.flush().unwrap();

        let device = FileBlockDevice::open(file.path().to_str().unwrap()).unwrap();
        assert!(device.read_at(100, 10).is_err());
    }
}
