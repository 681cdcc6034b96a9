//! Attribute walker and `$FILE_NAME` / `$DATA` decoders
//!
//! Attributes are packed back-to-back after a record's header, each one
//! self-describing its own length. The walker below stops as soon as it
//! sees the `0xFFFFFFFF` end marker or anything that doesn't fit the
//! remaining buffer, since a truncated attribute list means the rest of
//! the record can't be trusted either.

use super::runlist::decode_mapping_pairs;
use crate::domain::entities::{DataAttr, FileNameAttr, FileNameNamespace};

pub const ATTR_TYPE_FILE_NAME: u32 = 0x30;
pub const ATTR_TYPE_DATA: u32 = 0x80;
const ATTR_LIST_END: u32 = 0xFFFF_FFFF;

/// Walks the attribute list starting at `first_attr_offset`, returning
/// each attribute's type code alongside its raw byte slice (header and
/// value together).
pub fn walk_attributes(buf: &[u8], first_attr_offset: usize) -> Vec<(u32, &[u8])> {
    let mut attrs = Vec::new();
    let mut offset = first_attr_offset;

    while offset + 8 <= buf.len() {
        let atype = u32::from_le_bytes(buf[offset..offset + 4].try_into().unwrap());
        if atype == ATTR_LIST_END {
            break;
        }
        let alen = u32::from_le_bytes(buf[offset + 4..offset + 8].try_into().unwrap()) as usize;
        if alen == 0 || offset + alen > buf.len() {
            tracing::trace!(offset, alen, "attribute walk stopped: malformed length");
            break;
        }
        attrs.push((atype, &buf[offset..offset + alen]));
        offset += alen;
    }

    attrs
}

/// Decodes a resident `$FILE_NAME` (0x30) attribute value.
///
/// Non-resident `$FILE_NAME` attributes don't occur on disk and are
/// treated as malformed.
pub fn decode_file_name(attr: &[u8]) -> Option<FileNameAttr> {
    if attr.len() < 24 {
        return None;
    }
    let non_resident = attr[8] != 0;
    if non_resident {
        return None;
    }

    let value_len = u32::from_le_bytes(attr[16..20].try_into().ok()?) as usize;
    let value_off = u16::from_le_bytes(attr[20..22].try_into().ok()?) as usize;
    let value = attr.get(value_off..value_off.checked_add(value_len)?)?;

    if value.len() < 66 {
        return None;
    }

    let parent_ref = u64::from_le_bytes(value[0..8].try_into().ok()?) & 0x0000_FFFF_FFFF_FFFF;
    let flags = u32::from_le_bytes(value[56..60].try_into().ok()?);
    let name_len = value[64] as usize;
    let namespace = FileNameNamespace::from_raw(value[65]);

    let name_bytes = value.get(66..66 + name_len * 2)?;
    let utf16: Vec<u16> = name_bytes
        .chunks_exact(2)
        .map(|c| u16::from_le_bytes([c[0], c[1]]))
        .collect();
    let name = String::from_utf16_lossy(&utf16);

    Some(FileNameAttr {
        parent_ref,
        name,
        flags,
        namespace,
    })
}

/// Decodes a `$DATA` (0x80) attribute value, resident or non-resident.
pub fn decode_data(attr: &[u8]) -> Option<DataAttr> {
    if attr.len() < 9 {
        return None;
    }
    let non_resident = attr[8] != 0;

    if !non_resident {
        let value_len = u32::from_le_bytes(attr[16..20].try_into().ok()?) as usize;
        let value_off = u16::from_le_bytes(attr[20..22].try_into().ok()?) as usize;
        let value = attr.get(value_off..value_off.checked_add(value_len)?)?;
        return Some(DataAttr {
            non_resident: false,
            resident_data: Some(value.to_vec()),
            runs: Vec::new(),
            data_size: None,
        });
    }

    if attr.len() < 64 {
        return None;
    }
    let mapping_off = u16::from_le_bytes(attr[32..34].try_into().ok()?) as usize;
    let data_size = u64::from_le_bytes(attr[48..56].try_into().ok()?);
    let mp = attr.get(mapping_off..)?;
    let runs = decode_mapping_pairs(mp);

    Some(DataAttr {
        non_resident: true,
        resident_data: None,
        runs,
        data_size: Some(data_size),
    })
}
