use crate::domain::ports::LogSink;
use crate::utils::error::{IngestError, Result};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Append-only plaintext file. Opened once and held for the process
/// lifetime; never truncated.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileSink {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        tracing::debug!("Opened log target {}", path.display());

        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogSink for FileSink {
    fn append(&self, entries: &[String]) -> Result<()> {
        let mut buffer = String::new();
        for entry in entries {
            buffer.push_str(entry);
            buffer.push('\n');
        }

        // One write per call keeps a request's entries contiguous.
        let mut file = self.file.lock().map_err(|_| IngestError::IoError(
            std::io::Error::other(format!("log target {} lock poisoned", self.path.display())),
        ))?;
        file.write_all(buffer.as_bytes())?;
        file.flush()?;
        Ok(())
    }
}
