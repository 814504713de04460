use crate::utils::error::Result;

/// An append-only text target. Every entry is written followed by a newline,
/// and all entries of one call land together.
pub trait LogSink: Send + Sync {
    fn append(&self, entries: &[String]) -> Result<()>;

    fn append_line(&self, line: &str) -> Result<()> {
        self.append(&[line.to_string()])
    }
}

