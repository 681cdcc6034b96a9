//! Single MFT record decoder
//!
//! Combines fixup, the record header, and the attribute walker into one
//! [`MftRecord`]. This is the unit of work the iterator retries
//! record-by-record when the stream is corrupt.

use super::attributes::{decode_data, decode_file_name, walk_attributes, ATTR_TYPE_DATA, ATTR_TYPE_FILE_NAME};
use super::fixup::{apply_fixup, FixupRejection};
use crate::domain::entities::MftRecord;
use crate::domain::repositories::NtfsError;

const MIN_RECORD_LEN: usize = 48;

/// Decodes one fixed-size MFT record read from `record_offset` on the
/// device. `raw` is mutated in place by the fixup pass.
pub fn decode_record(
    raw: &mut [u8],
    sector_size: u16,
    record_offset: u64,
    record_num: u64,
) -> Result<MftRecord, NtfsError> {
    if raw.len() < MIN_RECORD_LEN {
        return Err(NtfsError::TornRecord {
            offset: record_offset,
        });
    }

    apply_fixup(raw, sector_size).map_err(|rejection| match rejection {
        FixupRejection::BadSignature => NtfsError::BadSignature {
            offset: record_offset,
        },
        FixupRejection::Torn => NtfsError::TornRecord {
            offset: record_offset,
        },
    })?;

    let first_attr_offset = u16::from_le_bytes(raw[20..22].try_into().unwrap()) as usize;
    let flags = u16::from_le_bytes(raw[22..24].try_into().unwrap());
    let in_use = flags & 0x0001 != 0;
    let is_dir = flags & 0x0002 != 0;

    let raw_base_ref = u64::from_le_bytes(raw[32..40].try_into().unwrap());
    let base_ref = if raw_base_ref != 0 {
        Some(raw_base_ref & 0x0000_FFFF_FFFF_FFFF)
    } else {
        None
    };

    let mut file_name = None;
    let mut data = None;

    for (atype, abuf) in walk_attributes(raw, first_attr_offset) {
        match atype {
            ATTR_TYPE_FILE_NAME => {
                if let Some(candidate) = decode_file_name(abuf) {
                    file_name = match file_name {
                        None => Some(candidate),
                        Some(current) => {
                            if current.should_prefer(&candidate) {
                                Some(candidate)
                            } else {
                                Some(current)
                            }
                        }
                    };
                } else {
                    tracing::trace!(record_num, "malformed $FILE_NAME attribute, skipping");
                }
            }
            ATTR_TYPE_DATA if data.is_none() => {
                data = decode_data(abuf);
                if data.is_none() {
                    tracing::trace!(record_num, "malformed $DATA attribute, skipping");
                }
            }
            _ => {}
        }
    }

    Ok(MftRecord {
        record_num,
        in_use,
        is_dir,
        base_ref,
        file_name,
        data,
    })
}
