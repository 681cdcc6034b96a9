//! Update Sequence Array fixup
//!
//! Every on-disk sector of a FILE record has its last two bytes stolen by
//! the Update Sequence Array (USA) so a single multi-sector write can be
//! detected as torn. [`apply_fixup`] reverses the substitution in place and
//! verifies the USA sentinel matched each sector trailer on the way.

use byteorder::{LittleEndian, ByteOrder};

const FILE_SIGNATURE: [u8; 4] = *b"FILE";

/// Why a record was rejected during fixup. Both are recoverable: the
/// caller skips the record and moves on to the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixupRejection {
    /// Missing "FILE" signature, or a USA offset/count that doesn't fit
    /// the buffer.
    BadSignature,
    /// The USA sentinel didn't match a sector trailer: a sector was
    /// overwritten by a later, unrelated write (a torn, mid-update record).
    Torn,
}

/// Applies the Update Sequence Array fixup to `buf` in place.
///
/// `buf` must be exactly one MFT record (or index buffer) in length;
/// `sector_size` is the device's bytes-per-sector from the boot sector.
pub fn apply_fixup(buf: &mut [u8], sector_size: u16) -> Result<(), FixupRejection> {
    if buf.len() < 8 || buf[0..4] != FILE_SIGNATURE {
        return Err(FixupRejection::BadSignature);
    }

    let usa_offset = LittleEndian::read_u16(&buf[4..6]) as usize;
    let usa_count = LittleEndian::read_u16(&buf[6..8]) as usize;

    if usa_offset == 0 || usa_count == 0 || usa_count < 1 {
        return Err(FixupRejection::BadSignature);
    }
    if usa_offset + usa_count * 2 > buf.len() {
        return Err(FixupRejection::BadSignature);
    }

    let usn = [buf[usa_offset], buf[usa_offset + 1]];
    let sector_size = sector_size as usize;
    if sector_size < 2 {
        return Err(FixupRejection::BadSignature);
    }

    let replacements = usa_count - 1;
    for i in 0..replacements {
        let trailer_off = (i + 1) * sector_size - 2;
        if trailer_off + 2 > buf.len() {
            return Err(FixupRejection::BadSignature);
        }
        if buf[trailer_off..trailer_off + 2] != usn {
            return Err(FixupRejection::Torn);
        }
        let entry_off = usa_offset + 2 + 2 * i;
        buf[trailer_off] = buf[entry_off];
        buf[trailer_off + 1] = buf[entry_off + 1];
    }

    Ok(())
}
