//! Boot sector decoder
//!
//! Parses the NTFS BIOS Parameter Block into a [`BootGeometry`]. This is
//! the first read performed against any volume or image.

use crate::domain::entities::BootGeometry;
use crate::domain::repositories::NtfsError;
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Cursor, Seek, SeekFrom};

const MIN_BOOT_SECTOR_LEN: usize = 90;
const OEM_ID_OFFSET: u64 = 3;
const OEM_ID: &[u8] = b"NTFS    ";

/// Decodes a raw boot sector buffer (at least the first 90 bytes of the
/// volume) into a [`BootGeometry`].
///
/// The OEM ID is logged rather than rejected when it doesn't match
/// `"NTFS    "`: some boot sector backups and test fixtures carry a
/// different (or zeroed) ID while the BPB layout itself is still valid.
pub fn decode_boot_sector(buf: &[u8]) -> Result<BootGeometry, NtfsError> {
    if buf.len() < MIN_BOOT_SECTOR_LEN {
        return Err(NtfsError::BadBootSector {
            reason: format!("boot sector too small: {} bytes", buf.len()),
        });
    }

    if buf[OEM_ID_OFFSET as usize..OEM_ID_OFFSET as usize + OEM_ID.len()] != *OEM_ID {
        tracing::warn!("boot sector OEM ID does not read \"NTFS    \"; continuing");
    }

    let mut cursor = Cursor::new(buf);

    cursor
        .seek(SeekFrom::Start(11))
        .map_err(|e| bad_boot_sector(e.to_string()))?;
    let bytes_per_sector = cursor.read_u16::<LittleEndian>().map_err(eof)?;
    let sectors_per_cluster_raw = cursor.read_u8().map_err(eof)?;

    if bytes_per_sector == 0 {
        return Err(NtfsError::BadBootSector {
            reason: "bytes_per_sector is zero".into(),
        });
    }

    cursor
        .seek(SeekFrom::Start(40))
        .map_err(|e| bad_boot_sector(e.to_string()))?;
    let total_sectors = cursor.read_u64::<LittleEndian>().map_err(eof)?;
    let mft_lcn = cursor.read_u64::<LittleEndian>().map_err(eof)?;
    let mftmirr_lcn = cursor.read_u64::<LittleEndian>().map_err(eof)?;
    let clusters_per_mft_record = cursor.read_i8().map_err(eof)?;

    cursor
        .seek(SeekFrom::Start(68))
        .map_err(|e| bad_boot_sector(e.to_string()))?;
    let clusters_per_index_buffer = cursor.read_i8().map_err(eof)?;

    let sectors_per_cluster = BootGeometry::decode_sectors_per_cluster(sectors_per_cluster_raw);
    if sectors_per_cluster == 0 {
        return Err(NtfsError::BadBootSector {
            reason: "sectors_per_cluster decoded to zero".into(),
        });
    }

    Ok(BootGeometry {
        bytes_per_sector,
        sectors_per_cluster,
        total_sectors,
        mft_lcn,
        mftmirr_lcn,
        clusters_per_mft_record,
        clusters_per_index_buffer,
    })
}

fn bad_boot_sector(reason: String) -> NtfsError {
    NtfsError::BadBootSector { reason }
}

fn eof(e: std::io::Error) -> NtfsError {
    NtfsError::BadBootSector {
        reason: format!("truncated boot sector: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_boot_sector(sectors_per_cluster: u8) -> Vec<u8> {
        let mut bs = vec![0u8; 512];
        bs[0..3].copy_from_slice(&[0xEB, 0x52, 0x90]);
        bs[3..11].copy_from_slice(b"NTFS    ");
        bs[11..13].copy_from_slice(&512u16.to_le_bytes());
        bs[13] = sectors_per_cluster;
        bs[40..48].copy_from_slice(&1_000_000u64.to_le_bytes());
        bs[48..56].copy_from_slice(&4u64.to_le_bytes());
        bs[56..64].copy_from_slice(&500_000u64.to_le_bytes());
        bs[64] = 0xF6; // -10 signed -> 1024 byte records
        bs[68] = 0x01; // 1 cluster per index buffer
        bs
    }

    #[test]
    fn decodes_a_well_formed_boot_sector() {
        let bs = sample_boot_sector(8);
        let geo = decode_boot_sector(&bs).unwrap();
        assert_eq!(geo.bytes_per_sector, 512);
        assert_eq!(geo.sectors_per_cluster, 8);
        assert_eq!(geo.cluster_size(), 4096);
        assert_eq!(geo.mft_record_size(), 1024);
        assert_eq!(geo.mft_lcn, 4);
    }

    #[test]
    fn rejects_a_truncated_buffer() {
        let bs = vec![0u8; 40];
        assert!(decode_boot_sector(&bs).is_err());
    }

    #[test]
    fn rejects_zero_bytes_per_sector() {
        let mut bs = sample_boot_sector(8);
        bs[11..13].copy_from_slice(&0u16.to_le_bytes());
        assert!(decode_boot_sector(&bs).is_err());
    }
}
