//! Sequential line numbering for checksummed transmission

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use gcodecrc_parser::CommandFrame;
use tracing::debug;

use crate::line::append_checksum;

/// Line number generator for a numbered transmission
///
/// Clones share the same counter, so one numberer can feed a sender from
/// several threads.
#[derive(Debug, Clone)]
pub struct LineNumberer {
    next: Arc<AtomicI64>,
    start: i64,
}

impl LineNumberer {
    /// Create a numberer starting at line 1
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Create a numberer starting at `start`; 0 is treated as 1
    pub fn starting_at(start: u32) -> Self {
        let start = i64::from(start.max(1));
        Self {
            next: Arc::new(AtomicI64::new(start)),
            start,
        }
    }

    /// Get the next line number
    pub fn next_number(&self) -> i64 {
        self.next.fetch_add(1, Ordering::SeqCst)
    }

    /// Line number the next frame will receive
    pub fn current(&self) -> i64 {
        self.next.load(Ordering::SeqCst)
    }

    /// Assign the next line number to a frame and render it with its checksum
    pub fn number(&self, frame: CommandFrame) -> String {
        let frame = frame.with_line_number(self.next_number());
        append_checksum(frame.to_text())
    }

    /// Rewind the counter and return the `M110` command announcing it.
    ///
    /// The command itself is sent without line number or checksum.
    pub fn reset_line(&self) -> String {
        self.next.store(self.start, Ordering::SeqCst);
        debug!(start = self.start, "line numbering reset");
        format!("M110 N{}", self.start - 1)
    }
}

impl Default for LineNumberer {
    fn default() -> Self {
        Self::new()
    }
}
