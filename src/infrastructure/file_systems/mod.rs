//! File system decoders

pub mod ntfs;
