//! Domain entities
//!
//! Core business objects that represent the fundamental concepts
//! in the NTFS metadata recovery domain.

mod boot_geometry;
mod mft_record;
mod record_summary;

pub use boot_geometry::BootGeometry;
pub use mft_record::{DataAttr, DataRun, FileNameAttr, FileNameNamespace, MftRecord};
pub use record_summary::{RecordStatus, RecordSummary};
