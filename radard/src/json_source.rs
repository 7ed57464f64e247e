//! Newline-delimited JSON reader for offline replay of cycle snapshots.
//!
//! Stands in for the real radar interface + message bus (external
//! collaborators, not specified here) so the binary is runnable against
//! recorded or synthetic input without a live bus connection.

use std::io::BufRead;

use anyhow::{Context, Result};
use radar_env::CycleSnapshot;

pub struct JsonLinesMessageSource<R> {
    reader: R,
    line: String,
}

impl<R: BufRead> JsonLinesMessageSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
        }
    }

    /// Reads and parses the next line, or `None` at end of input.
    pub fn next_snapshot(&mut self) -> Result<Option<CycleSnapshot>> {
        self.line.clear();
        let bytes_read = self
            .reader
            .read_line(&mut self.line)
            .context("reading cycle snapshot input")?;
        if bytes_read == 0 {
            return Ok(None);
        }
        let trimmed = self.line.trim();
        if trimmed.is_empty() {
            return self.next_snapshot();
        }
        let snapshot = serde_json::from_str(trimmed).context("parsing cycle snapshot JSON")?;
        Ok(Some(snapshot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_none() {
        let mut src = JsonLinesMessageSource::new(std::io::Cursor::new(""));
        assert!(src.next_snapshot().unwrap().is_none());
    }
}
