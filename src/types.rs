use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub size: u64,
}

/// Running totals for a deletion session. Only successful removals count.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DeletionOutcome {
    pub deleted_count: usize,
    pub bytes_freed: u64,
}

impl DeletionOutcome {
    pub fn record(&mut self, entry: &FileEntry) {
        self.deleted_count += 1;
        self.bytes_freed += entry.size;
    }
}
