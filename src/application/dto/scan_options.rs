//! Scan options DTO

/// Options accepted by [`crate::application::ScanMftUseCase`].
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Restrict results to records whose `in_use` bit is clear.
    pub deleted_only: bool,
    /// Case-insensitive substring match against the reconstructed path.
    pub path_filter: Option<String>,
    /// Case-insensitive substring match against the file name alone.
    pub name_contains: Option<String>,
    /// Consecutive-bad-record threshold passed to the iterator.
    pub bad_run_threshold: u32,
}

impl ScanOptions {
    pub fn new() -> Self {
        Self {
            bad_run_threshold: crate::infrastructure::file_systems::ntfs::DEFAULT_BAD_RUN_THRESHOLD,
            ..Default::default()
        }
    }

    pub fn with_deleted_only(mut self, deleted_only: bool) -> Self {
        self.deleted_only = deleted_only;
        self
    }

    pub fn with_path_filter(mut self, filter: impl Into<String>) -> Self {
        self.path_filter = Some(filter.into());
        self
    }

    pub fn with_name_contains(mut self, needle: impl Into<String>) -> Self {
        self.name_contains = Some(needle.into());
        self
    }

    pub fn with_bad_run_threshold(mut self, threshold: u32) -> Self {
        self.bad_run_threshold = threshold;
        self
    }
}
