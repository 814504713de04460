use crate::domain::ports::LogSink;
use crate::utils::error::{IngestError, Result};
use std::sync::{Arc, Mutex};

/// In-memory log target. Clones share the same buffer, so a test can keep
/// one handle and give another to the service.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    entries: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, newline-terminated as a file would hold it.
    pub fn contents(&self) -> String {
        self.entries
            .lock()
            .map(|entries| entries.iter().map(|e| format!("{}\n", e)).collect())
            .unwrap_or_default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().map(|e| e.is_empty()).unwrap_or(true)
    }
}

impl LogSink for MemorySink {
    fn append(&self, entries: &[String]) -> Result<()> {
        let mut buffer = self.entries.lock().map_err(|_| {
            IngestError::IoError(std::io::Error::other("memory sink lock poisoned"))
        })?;
        buffer.extend_from_slice(entries);
        Ok(())
    }
}
