#![no_main]
use libfuzzer_sys::fuzz_target;
use ntfs_recover::infrastructure::file_systems::ntfs::runlist::decode_mapping_pairs;

fuzz_target!(|data: &[u8]| {
    let _ = decode_mapping_pairs(data);
});
