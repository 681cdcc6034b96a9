//! ntfs-recover - NTFS metadata recovery engine
//!
//! Enumerates MFT records and exports deleted file content from a raw
//! volume or image.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use application::*;
pub use domain::entities::*;
pub use domain::repositories::*;
