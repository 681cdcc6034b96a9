//! Scan MFT use case
//!
//! Orchestrates a full pass over `$MFT`: first a pass to index every
//! record's parent/name link (needed for path reconstruction even for
//! directories that are still live), then a filtered pass that produces
//! the per-record summaries callers see.

use crate::application::dto::ScanOptions;
use crate::domain::entities::{BootGeometry, RecordStatus, RecordSummary};
use crate::domain::repositories::BlockDeviceReader;
use crate::domain::services::PathResolver;
use crate::infrastructure::file_systems::ntfs::MftIterator;

/// Progress callback invoked with the number of records examined so far.
pub type ProgressCallback = Box<dyn Fn(u64) + Send + Sync>;

pub struct ScanMftUseCase;

impl ScanMftUseCase {
    pub fn new() -> Self {
        Self
    }

    pub fn execute<R: BlockDeviceReader>(
        &self,
        device: &R,
        geometry: BootGeometry,
        options: &ScanOptions,
        progress_callback: Option<ProgressCallback>,
    ) -> Vec<RecordSummary> {
        let scan_span = tracing::info_span!("scan", image_path = device.path());
        let _enter = scan_span.enter();

        let mut resolver = PathResolver::new();
        for record in iterator(device, geometry, options) {
            if let Some(fna) = &record.file_name {
                resolver.insert(record.record_num, fna.parent_ref, fna.name.clone());
            }
        }

        let name_filter = options.name_contains.as_ref().map(|s| s.to_lowercase());
        let path_filter = options.path_filter.as_ref().map(|s| s.to_lowercase());

        let mut examined = 0u64;
        let mut live = 0u64;
        let mut deleted = 0u64;
        let mut summaries = Vec::new();

        for record in iterator(device, geometry, options) {
            examined += 1;
            if let Some(cb) = &progress_callback {
                cb(examined);
            }

            if options.deleted_only && record.in_use {
                continue;
            }
            let Some(file_name) = &record.file_name else {
                continue;
            };

            if let Some(needle) = &name_filter {
                if !file_name.name.to_lowercase().contains(needle.as_str()) {
                    continue;
                }
            }

            let path = resolver.resolve(record.record_num);
            if let Some(needle) = &path_filter {
                let haystack = path.as_deref().unwrap_or(&file_name.name).to_lowercase();
                if !haystack.contains(needle.as_str()) {
                    continue;
                }
            }

            if record.in_use {
                live += 1;
            } else {
                deleted += 1;
            }

            summaries.push(RecordSummary {
                record: record.record_num,
                name: file_name.name.clone(),
                path,
                is_dir: record.is_dir,
                status: if record.in_use {
                    RecordStatus::Live
                } else {
                    RecordStatus::Deleted
                },
                size: record.data.as_ref().map(|d| d.size()).unwrap_or(0),
                base_ref: record.base_ref,
            });
        }

        tracing::info!(
            records_examined = examined,
            live,
            deleted,
            "scan complete"
        );

        summaries
    }
}

impl Default for ScanMftUseCase {
    fn default() -> Self {
        Self::new()
    }
}

fn iterator<'a, R: BlockDeviceReader>(
    device: &'a R,
    geometry: BootGeometry,
    options: &ScanOptions,
) -> MftIterator<'a, R> {
    MftIterator::new(device, geometry).with_bad_run_threshold(options.bad_run_threshold)
}
