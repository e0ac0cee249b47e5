use std::io::Cursor;

use zip::ZipArchive;

use super::Inspector;
use crate::metadata::{ArchiveDescriptor, ArchiveEntry, FileDescriptor, FileSummary};
use crate::upload::Upload;
use crate::validator::ValidationError;

/// Lists the central directory of a ZIP archive without extracting it.
pub struct ArchiveInspector;

impl Inspector for ArchiveInspector {
    type Decoded = Vec<ArchiveEntry>;

    fn decode(&self, upload: &Upload) -> Result<Vec<ArchiveEntry>, ValidationError> {
        let mut archive = ZipArchive::new(Cursor::new(upload.data.as_ref()))
            .map_err(|e| ValidationError::CorruptArchive(e.to_string()))?;

        let mut entries = Vec::with_capacity(archive.len());
        for index in 0..archive.len() {
            let entry = archive
                .by_index_raw(index)
                .map_err(|e| ValidationError::CorruptArchive(e.to_string()))?;
            entries.push(ArchiveEntry::new(
                entry.name(),
                entry.size(),
                entry.compressed_size(),
            ));
        }

        tracing::debug!(
            filename = %upload.filename,
            entries = entries.len(),
            "Read ZIP central directory"
        );
        Ok(entries)
    }

    fn summarize(&self, upload: &Upload, entries: Vec<ArchiveEntry>) -> FileDescriptor {
        FileDescriptor::Archive(ArchiveDescriptor {
            summary: FileSummary::of(upload),
            total_files: entries.len(),
            files: entries,
        })
    }
}
