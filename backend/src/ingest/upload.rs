//! Temporary on-disk copy of an uploaded file.

use log::{debug, warn};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use tempfile::{Builder, NamedTempFile};

const TEMP_PREFIX: &str = "upload-";
const TEMP_SUFFIX: &str = ".csv";

/// An uploaded file spooled to the upload directory.
///
/// The file is removed by [`TempUpload::release`] or, on any other exit path
/// (early return, error, panic), when the value is dropped.
pub struct TempUpload {
    file: NamedTempFile,
    original_name: String,
    written: u64,
}

impl TempUpload {
    /// Creates an empty, uniquely named file inside `dir`.
    pub fn create_in(dir: &Path, original_name: impl Into<String>) -> io::Result<Self> {
        let file = Builder::new()
            .prefix(TEMP_PREFIX)
            .suffix(TEMP_SUFFIX)
            .tempfile_in(dir)?;
        Ok(Self {
            file,
            original_name: original_name.into(),
            written: 0,
        })
    }

    pub fn write_chunk(&mut self, chunk: &[u8]) -> io::Result<()> {
        self.file.write_all(chunk)?;
        self.written += chunk.len() as u64;
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }

    /// Bytes written so far.
    pub fn len(&self) -> u64 {
        self.written
    }

    pub fn is_empty(&self) -> bool {
        self.written == 0
    }

    /// The client-side file name, used as the batch label.
    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// A fresh read handle positioned at the start of the file.
    pub fn open_reader(&self) -> io::Result<File> {
        self.file.reopen()
    }

    /// Deletes the file now and reports whether that worked.
    pub fn release(self) -> io::Result<()> {
        self.file.close()
    }
}

/// Removes spooled uploads left behind by a previous process.
pub fn purge_stale(dir: &Path) -> io::Result<usize> {
    let mut removed = 0;
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with(TEMP_PREFIX) && name.ends_with(TEMP_SUFFIX) {
            match std::fs::remove_file(entry.path()) {
                Ok(()) => removed += 1,
                Err(e) => warn!("Could not remove stale upload {}: {}", name, e),
            }
        }
    }
    if removed > 0 {
        debug!("Removed {} stale upload(s) from {}", removed, dir.display());
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn entries(dir: &Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[test]
    fn written_bytes_can_be_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let mut upload = TempUpload::create_in(dir.path(), "people.csv").unwrap();
        upload.write_chunk(b"name,age,city\n").unwrap();
        upload.write_chunk(b"Ana,30,Lima\n").unwrap();
        upload.flush().unwrap();

        let mut contents = String::new();
        upload
            .open_reader()
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();

        assert_eq!(contents, "name,age,city\nAna,30,Lima\n");
        assert_eq!(upload.len(), 26);
        assert_eq!(upload.original_name(), "people.csv");
    }

    #[test]
    fn release_removes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let upload = TempUpload::create_in(dir.path(), "people.csv").unwrap();
        assert_eq!(entries(dir.path()), 1);

        upload.release().unwrap();
        assert_eq!(entries(dir.path()), 0);
    }

    #[test]
    fn drop_removes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut upload = TempUpload::create_in(dir.path(), "people.csv").unwrap();
            upload.write_chunk(b"partial").unwrap();
        }
        assert_eq!(entries(dir.path()), 0);
    }

    #[test]
    fn purge_only_touches_spooled_uploads() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("upload-abc.csv"), b"x").unwrap();
        std::fs::write(dir.path().join("keep.txt"), b"x").unwrap();

        assert_eq!(purge_stale(dir.path()).unwrap(), 1);
        assert_eq!(entries(dir.path()), 1);
    }
}
