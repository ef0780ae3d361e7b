//! Size-rotated line writer for trace output.
//!
//! When the active file grows past the size limit it is shifted to `<name>.1`,
//! older backups move up one slot, and anything past the retention count is
//! removed.

use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_BACKUP_FILES: usize = 3;

pub struct RotatingWriter {
    file_path: PathBuf,
    max_size: u64,
    max_backups: usize,
    /// Opened on first write.
    file: Mutex<Option<File>>,
}

impl RotatingWriter {
    pub const fn new(file_path: PathBuf) -> Self {
        Self::with_limits(file_path, MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES)
    }

    pub const fn with_limits(file_path: PathBuf, max_size: u64, max_backups: usize) -> Self {
        Self {
            file_path,
            max_size,
            max_backups,
            file: Mutex::new(None),
        }
    }

    /// Appends `line` plus a newline, rotating first if the file is full.
    pub fn write_line(&self, line: &str) -> std::io::Result<()> {
        let mut guard = self.file.lock();

        if fs::metadata(&self.file_path).is_ok_and(|m| m.len() >= self.max_size) {
            *guard = None;
            self.rotate()?;
        }

        if guard.is_none() {
            *guard = Some(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&self.file_path)?,
            );
        }

        let file = guard
            .as_mut()
            .ok_or_else(|| std::io::Error::other("trace file unavailable"))?;

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn rotate(&self) -> std::io::Result<()> {
        if self.max_backups == 0 {
            return fs::remove_file(&self.file_path);
        }

        let oldest = self.backup_path(self.max_backups);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }

        for slot in (1..self.max_backups).rev() {
            let from = self.backup_path(slot);
            if from.exists() {
                fs::rename(&from, self.backup_path(slot + 1))?;
            }
        }

        fs::rename(&self.file_path, self.backup_path(1))
    }

    fn backup_path(&self, slot: usize) -> PathBuf {
        let mut name = self
            .file_path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(format!(".{slot}"));
        self.file_path.with_file_name(name)
    }
}

impl std::fmt::Debug for RotatingWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingWriter")
            .field("file_path", &self.file_path)
            .field("max_size", &self.max_size)
            .field("max_backups", &self.max_backups)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("traces.jsonl");
        let writer = RotatingWriter::new(path.clone());

        writer.write_line("{\"a\":1}").unwrap();
        writer.write_line("{\"b\":2}").unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "{\"a\":1}\n{\"b\":2}\n");
    }

    #[test]
    fn rotates_and_keeps_bounded_backups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("traces.jsonl");
        let writer = RotatingWriter::with_limits(path.clone(), 8, 2);

        for i in 0..5 {
            writer.write_line(&format!("line-{i}-padded")).unwrap();
        }

        assert_eq!(fs::read_to_string(&path).unwrap(), "line-4-padded\n");
        assert_eq!(fs::read_to_string(dir.path().join("traces.jsonl.1")).unwrap(), "line-3-padded\n");
        assert_eq!(fs::read_to_string(dir.path().join("traces.jsonl.2")).unwrap(), "line-2-padded\n");
        assert!(!dir.path().join("traces.jsonl.3").exists());
    }
}
