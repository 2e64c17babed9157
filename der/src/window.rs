//! A read-only cursor over a borrowed byte buffer.

use crate::error::{Error, Result};

/// Bounds-checked view into a byte buffer.
///
/// Every slice handed out by a window borrows from the same backing
/// storage as the window itself, so decoding never copies payload octets.
#[derive(Debug, Clone, Copy)]
pub struct Window<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Window<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Reads one octet and advances past it.
    pub fn read_byte(&mut self) -> Result<u8> {
        let b = *self.data.get(self.offset).ok_or(Error::EarlyEof)?;
        self.offset += 1;
        Ok(b)
    }

    /// Returns the next `n` octets and advances past them.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        if n > self.remaining().len() {
            return Err(Error::EarlyEof);
        }
        let bytes = &self.data[self.offset..self.offset + n];
        self.offset += n;
        Ok(bytes)
    }

    /// Current cursor position, relative to the start of this window.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Octets between the cursor and the end of the window.
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.offset..]
    }

    pub fn is_exhausted(&self) -> bool {
        self.offset == self.data.len()
    }

    pub fn seek(&mut self, offset: usize) -> Result<()> {
        if offset > self.data.len() {
            return Err(Error::InvalidOffset);
        }
        self.offset = offset;
        Ok(())
    }

    /// Creates a new window over `[begin, end)` of this window's data.
    ///
    /// The new window starts with its cursor at zero and is independent of
    /// this window's cursor.
    pub fn slice(&self, begin: usize, end: usize) -> Result<Window<'a>> {
        if begin > end || end > self.data.len() {
            return Err(Error::InvalidSlice);
        }
        Ok(Window::new(&self.data[begin..end]))
    }
}
