//! Repository traits (interfaces)
//!
//! These traits define the contracts for external dependencies.
//! They follow the Dependency Inversion Principle (DIP) from SOLID.

mod block_device;
mod ntfs_errors;

pub use block_device::{BlockDeviceError, BlockDeviceReader, DeviceInfo};
pub use ntfs_errors::NtfsError;
