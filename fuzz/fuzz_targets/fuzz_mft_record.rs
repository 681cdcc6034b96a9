#![no_main]
use libfuzzer_sys::fuzz_target;
use ntfs_recover::infrastructure::file_systems::ntfs::decode_record;

fuzz_target!(|data: &[u8]| {
    let mut buf = data.to_vec();
    let _ = decode_record(&mut buf, 512, 0, 0);
});
