#![no_main]
use libfuzzer_sys::fuzz_target;
use ntfs_recover::infrastructure::file_systems::ntfs::decode_boot_sector;

fuzz_target!(|data: &[u8]| {
    let _ = decode_boot_sector(data);
});
