//! NTFS metadata decoder
//!
//! Parses the boot sector, streams `$MFT` records, and exports a
//! record's `$DATA` stream back out. Each concern lives in its own
//! module: [`boot_sector`] for the BPB, [`fixup`] for the Update
//! Sequence Array, [`attributes`] and [`runlist`] for attribute and
//! mapping-pairs decoding, [`record`] for a single MFT entry, and
//! [`iterator`]/[`export`] for the two operations built on top.

pub mod attributes;
pub mod boot_sector;
pub mod export;
pub mod fixup;
pub mod iterator;
pub mod record;
pub mod runlist;

pub use boot_sector::decode_boot_sector;
pub use export::export_record;
pub use iterator::{MftIterator, DEFAULT_BAD_RUN_THRESHOLD};
pub use record::decode_record;
