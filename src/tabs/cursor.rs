use crate::error::{Result, TabsError};

/// Wrapping position over a fixed number of tab triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabCursor {
    len: usize,
    index: usize,
}

impl TabCursor {
    /// Create a cursor over `len` triggers starting at `index`
    pub fn new(len: usize, index: usize) -> Result<Self> {
        if index >= len {
            return Err(TabsError::IndexOutOfRange { index, len });
        }
        Ok(Self { len, index })
    }

    /// Get the current index
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Move forward, wrapping past the last trigger to the first
    pub fn next(&mut self) -> usize {
        self.index = (self.index + 1) % self.len;
        self.index
    }

    /// Move backward, wrapping before the first trigger to the last
    pub fn previous(&mut self) -> usize {
        self.index = if self.index == 0 {
            self.len - 1
        } else {
            self.index - 1
        };
        self.index
    }

    pub fn first(&mut self) -> usize {
        self.index = 0;
        self.index
    }

    pub fn last(&mut self) -> usize {
        self.index = self.len - 1;
        self.index
    }

    pub fn jump_to(&mut self, index: usize) -> Result<usize> {
        if index >= self.len {
            return Err(TabsError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        self.index = index;
        Ok(self.index)
    }
}
