//! Bounded display console.
//!
//! Append-only line log backing the text display. Capacity is fixed; the
//! oldest line is evicted once the bound is exceeded.

use std::collections::VecDeque;

/// Maximum number of retained lines.
pub const LINE_LIMIT: usize = 100;

/// Append-only, capacity-bounded line log.
///
/// # Invariants
///
/// - `len() <= LINE_LIMIT` after every append
/// - retained lines keep their insertion order
#[derive(Debug, Clone, Default)]
pub struct Console {
    lines: VecDeque<String>,
}

impl Console {
    /// Create an empty console.
    #[must_use]
    pub fn new() -> Self {
        Self { lines: VecDeque::new() }
    }

    /// Append a line, evicting from the head once over capacity.
    pub fn append(&mut self, line: impl Into<String>) {
        self.lines.push_back(line.into());
        while self.lines.len() > LINE_LIMIT {
            self.lines.pop_front();
        }
    }

    /// Number of retained lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the console holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Retained lines in insertion order.
    pub fn lines(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }
}
