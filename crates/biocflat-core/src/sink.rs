//! Text output sink with atomic tmp→rename

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Buffered text writer that only exposes the target file once finalized.
///
/// Content goes to `<name>.tmp` next to the target. `finalize` flushes and
/// renames it over the target; dropping an unfinalized sink removes the tmp
/// file, so a failed write never leaves a partial output behind.
pub struct TextSink {
    writer: Option<BufWriter<File>>,
    tmp_path: PathBuf,
    final_path: PathBuf,
    bytes_written: u64,
}

impl std::fmt::Debug for TextSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextSink")
            .field("final_path", &self.final_path)
            .field("bytes_written", &self.bytes_written)
            .finish_non_exhaustive()
    }
}

impl TextSink {
    /// Open a sink for `path`. The parent directory must already exist.
    pub fn new(path: &Path) -> io::Result<Self> {
        let filename = path.file_name().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("output path has no file name: {}", path.display()),
            )
        })?;
        let mut tmp_name = filename.to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = path.with_file_name(tmp_name);

        // Clean up stale tmp file
        if tmp_path.exists() {
            fs::remove_file(&tmp_path)?;
        }

        let file = File::create(&tmp_path)?;
        Ok(Self {
            writer: Some(BufWriter::new(file)),
            tmp_path,
            final_path: path.to_path_buf(),
            bytes_written: 0,
        })
    }

    pub fn write_str(&mut self, s: &str) -> io::Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| io::Error::other("sink already finalized"))?;
        writer.write_all(s.as_bytes())?;
        self.bytes_written += s.len() as u64;
        Ok(())
    }

    /// Flush and atomically rename tmp → final. Returns bytes written.
    pub fn finalize(mut self) -> io::Result<u64> {
        match self.commit() {
            Ok(()) => Ok(self.bytes_written),
            Err(e) => {
                let _ = fs::remove_file(&self.tmp_path);
                Err(e)
            }
        }
    }

    fn commit(&mut self) -> io::Result<()> {
        if let Some(writer) = self.writer.take() {
            let file = writer.into_inner().map_err(|e| e.into_error())?;
            file.sync_all()?;
        }
        fs::rename(&self.tmp_path, &self.final_path)
    }
}

impl Drop for TextSink {
    fn drop(&mut self) {
        if self.writer.take().is_some() && self.tmp_path.exists() {
            if let Err(e) = fs::remove_file(&self.tmp_path) {
                log::warn!("Failed to remove {}: {}", self.tmp_path.display(), e);
            }
        }
    }
}

/// Replace `path` with `contents` in one all-or-nothing write.
pub fn write_atomic(path: &Path, contents: &str) -> io::Result<u64> {
    let mut sink = TextSink::new(path)?;
    sink.write_str(contents)?;
    sink.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_atomic_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");

        let n = write_atomic(&path, "1/a\n2/b").unwrap();

        assert_eq!(n, 7);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "1/a\n2/b");
        assert!(!dir.path().join("out.txt.tmp").exists());
    }

    #[test]
    fn write_atomic_overwrites_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");
        std::fs::write(&path, "old content that is longer").unwrap();

        write_atomic(&path, "new").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn write_atomic_empty_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.txt");

        assert_eq!(write_atomic(&path, "").unwrap(), 0);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn missing_parent_dir_fails_without_output() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope").join("out.txt");

        assert!(write_atomic(&path, "x").is_err());
        assert!(!path.exists());
    }

    #[test]
    fn dropped_sink_removes_tmp() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");
        {
            let mut sink = TextSink::new(&path).unwrap();
            sink.write_str("partial").unwrap();
        }
        assert!(!path.exists());
        assert!(!dir.path().join("out.txt.tmp").exists());
    }

    #[test]
    fn stale_tmp_is_replaced() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");
        std::fs::write(dir.path().join("out.txt.tmp"), "stale").unwrap();

        write_atomic(&path, "fresh").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "fresh");
        assert!(!dir.path().join("out.txt.tmp").exists());
    }
}
