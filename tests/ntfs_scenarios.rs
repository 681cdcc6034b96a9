//! End-to-end scenarios over synthesized minimal NTFS images
//!
//! These build just enough of a boot sector + MFT to exercise the
//! decoder pipeline; they are not a full NTFS driver fixture.

use byteorder::{ByteOrder, LittleEndian};
use ntfs_recover::application::dto::ScanOptions;
use ntfs_recover::application::{ExportRecordUseCase, ScanMftUseCase};
use ntfs_recover::domain::entities::{BootGeometry, RecordStatus};
use ntfs_recover::domain::repositories::BlockDeviceReader;
use ntfs_recover::infrastructure::block_device::FileBlockDevice;
use ntfs_recover::infrastructure::file_systems::ntfs::decode_boot_sector;
use std::io::Write;
use tempfile::NamedTempFile;

const SECTOR_SIZE: usize = 512;

fn boot_sector(mft_lcn: u64, sectors_per_cluster: u8, clusters_per_mft_record: i8) -> Vec<u8> {
    let mut bs = vec![0u8; 512];
    bs[3..11].copy_from_slice(b"NTFS    ");
    LittleEndian::write_u16(&mut bs[11..13], SECTOR_SIZE as u16);
    bs[13] = sectors_per_cluster;
    LittleEndian::write_u64(&mut bs[40..48], 10_000_000);
    LittleEndian::write_u64(&mut bs[48..56], mft_lcn);
    LittleEndian::write_u64(&mut bs[56..64], 0);
    bs[64] = clusters_per_mft_record as u8;
    bs[68] = 1;
    bs
}

/// Builds one fixed-size MFT record with an optional resident or
/// non-resident $DATA attribute, a single $FILE_NAME, and a correctly
/// applied Update Sequence Array.
struct RecordBuilder {
    buf: Vec<u8>,
    sectors: usize,
    cursor: usize,
}

impl RecordBuilder {
    fn new(record_len: usize, in_use: bool, is_dir: bool) -> Self {
        let mut buf = vec![0u8; record_len];
        buf[0..4].copy_from_slice(b"FILE");
        let sectors = record_len / SECTOR_SIZE;
        let usa_offset = 48usize;
        let usa_count = sectors + 1;
        LittleEndian::write_u16(&mut buf[4..6], usa_offset as u16);
        LittleEndian::write_u16(&mut buf[6..8], usa_count as u16);
        let mut flags = 0u16;
        if in_use {
            flags |= 0x0001;
        }
        if is_dir {
            flags |= 0x0002;
        }
        LittleEndian::write_u16(&mut buf[22..24], flags);
        let cursor = usa_offset + 2 + 2 * sectors;
        LittleEndian::write_u16(&mut buf[20..22], cursor as u16);
        Self { buf, sectors, cursor }
    }

    fn file_name(&mut self, parent_ref: u64, name: &str) {
        let value_len = 66 + name.len() * 2;
        let header_len = 24;
        let alen = header_len + value_len;
        let off = self.cursor;
        self.buf[off..off + 4].copy_from_slice(&0x30u32.to_le_bytes());
        self.buf[off + 4..off + 8].copy_from_slice(&(alen as u32).to_le_bytes());
        self.buf[off + 16..off + 20].copy_from_slice(&(value_len as u32).to_le_bytes());
        self.buf[off + 20..off + 22].copy_from_slice(&(header_len as u16).to_le_bytes());
        let v = off + header_len;
        self.buf[v..v + 8].copy_from_slice(&parent_ref.to_le_bytes());
        self.buf[v + 64] = name.encode_utf16().count() as u8;
        self.buf[v + 65] = 1;
        for (i, c) in name.encode_utf16().enumerate() {
            self.buf[v + 66 + i * 2..v + 66 + i * 2 + 2].copy_from_slice(&c.to_le_bytes());
        }
        self.cursor += alen;
    }

    fn resident_data(&mut self, data: &[u8]) {
        let header_len = 24;
        let alen = header_len + data.len();
        let off = self.cursor;
        self.buf[off..off + 4].copy_from_slice(&0x80u32.to_le_bytes());
        self.buf[off + 4..off + 8].copy_from_slice(&(alen as u32).to_le_bytes());
        self.buf[off + 8] = 0;
        self.buf[off + 16..off + 20].copy_from_slice(&(data.len() as u32).to_le_bytes());
        self.buf[off + 20..off + 22].copy_from_slice(&(header_len as u16).to_le_bytes());
        self.buf[off + header_len..off + alen].copy_from_slice(data);
        self.cursor += alen;
    }

    fn non_resident_data(&mut self, mapping_pairs: &[u8], data_size: u64) {
        let header_len = 64;
        let alen = header_len + mapping_pairs.len();
        let off = self.cursor;
        self.buf[off..off + 4].copy_from_slice(&0x80u32.to_le_bytes());
        self.buf[off + 4..off + 8].copy_from_slice(&(alen as u32).to_le_bytes());
        self.buf[off + 8] = 1;
        self.buf[off + 32..off + 34].copy_from_slice(&(header_len as u16).to_le_bytes());
        self.buf[off + 48..off + 56].copy_from_slice(&data_size.to_le_bytes());
        self.buf[off + header_len..off + alen].copy_from_slice(mapping_pairs);
        self.cursor += alen;
    }

    fn finish(mut self) -> Vec<u8> {
        let end = self.cursor;
        self.buf[end..end + 4].copy_from_slice(&0xFFFF_FFFFu32.to_le_bytes());

        let usa_offset = 48usize;
        let usn = 0x77EEu16;
        LittleEndian::write_u16(&mut self.buf[usa_offset..usa_offset + 2], usn);
        for i in 0..self.sectors {
            let trailer_off = (i + 1) * SECTOR_SIZE - 2;
            LittleEndian::write_u16(&mut self.buf[trailer_off..trailer_off + 2], usn);
        }
        self.buf
    }
}

fn geometry_4k_clusters() -> BootGeometry {
    decode_boot_sector(&boot_sector(0, 8, -10)).unwrap()
}

#[test]
fn scenario_a_resident_small_file() {
    let geo = geometry_4k_clusters();
    let rec_len = geo.mft_record_size() as usize;

    let mut rb = RecordBuilder::new(rec_len, false, false);
    rb.file_name(5, "hello.txt");
    rb.resident_data(b"hi\n");
    let raw = rb.finish();

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&raw).unwrap();
    file.flush().unwrap();

    let device = FileBlockDevice::open(file.path().to_str().unwrap()).unwrap();

    let summaries = ScanMftUseCase::new().execute(&device, geo, &ScanOptions::new(), None);
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].name, "hello.txt");
    assert_eq!(summaries[0].status, RecordStatus::Live);
    assert_eq!(summaries[0].size, 3);

    let mut out = Vec::new();
    let n = ntfs_recover::infrastructure::file_systems::ntfs::export_record(&device, geo, 0, &mut out)
        .unwrap();
    assert_eq!(n, 3);
    assert_eq!(out, vec![0x68, 0x69, 0x0A]);
}

#[test]
fn scenario_b_deleted_nonresident_two_cluster_run() {
    let geo = geometry_4k_clusters();
    let cluster = geo.cluster_size();
    let rec_len = geo.mft_record_size() as usize;

    // mapping pair: header 0x12 (len_len=2, off_len=1), length=2, lcn=100
    let mp = [0x12, 0x02, 0x00, 100u8, 0x00];
    let mut rb = RecordBuilder::new(rec_len, false, false);
    rb.file_name(5, "deleted.bin");
    rb.non_resident_data(&mp, 5000);
    let raw = rb.finish();

    let device_size = geo.lcn_to_offset(110) as usize;
    let mut image = vec![0u8; device_size];
    image[0..raw.len()].copy_from_slice(&raw);
    let run_off = geo.lcn_to_offset(100) as usize;
    for (i, b) in image[run_off..run_off + 2 * cluster as usize].iter_mut().enumerate() {
        *b = (i % 256) as u8;
    }

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&image).unwrap();
    file.flush().unwrap();
    let device = FileBlockDevice::open(file.path().to_str().unwrap()).unwrap();

    let summaries = ScanMftUseCase::new().execute(&device, geo, &ScanOptions::new(), None);
    assert_eq!(summaries[0].status, RecordStatus::Deleted);
    assert_eq!(summaries[0].size, 5000);

    let mut out = Vec::new();
    let n = ntfs_recover::infrastructure::file_systems::ntfs::export_record(&device, geo, 0, &mut out)
        .unwrap();
    assert_eq!(n, 5000);
    assert_eq!(out.len(), 5000);
    assert_eq!(out[..], image[run_off..run_off + 5000]);
}

#[test]
fn scenario_c_torn_record_is_skipped_but_counted() {
    let geo = geometry_4k_clusters();
    let rec_len = geo.mft_record_size() as usize;

    let mut good = RecordBuilder::new(rec_len, false, false);
    good.file_name(5, "hello.txt");
    good.resident_data(b"hi\n");
    let mut raw = good.finish();
    // corrupt sector 1's trailer after fixup was applied to the buffer,
    // so the live fixup pass sees a mismatched USN.
    raw[510] = raw[510].wrapping_add(1);

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&raw).unwrap();
    file.flush().unwrap();
    let device = FileBlockDevice::open(file.path().to_str().unwrap()).unwrap();

    let summaries = ScanMftUseCase::new().execute(&device, geo, &ScanOptions::new(), None);
    assert!(summaries.is_empty());
}

#[test]
fn export_missing_record_is_reported() {
    let geo = geometry_4k_clusters();
    let rec_len = geo.mft_record_size() as usize;
    let mut rb = RecordBuilder::new(rec_len, false, false);
    rb.file_name(5, "a.txt");
    rb.resident_data(b"x");
    let raw = rb.finish();

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&raw).unwrap();
    file.flush().unwrap();
    let device = FileBlockDevice::open(file.path().to_str().unwrap()).unwrap();

    let out_file = NamedTempFile::new().unwrap();
    let err = ExportRecordUseCase::new()
        .execute(&device, geo, 9, out_file.path())
        .unwrap_err();
    assert!(err.to_string().contains("not found"));
}
