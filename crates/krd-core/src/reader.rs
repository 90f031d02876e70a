//! Offset-addressed byte access to a room bank
//!
//! The bank layout is made of fixed offsets, so every higher-level decoder
//! seeks to an absolute position and then reads single bytes forward.

use std::io::{Cursor, ErrorKind, Read};

use byteorder::{BigEndian, ReadBytesExt};

use crate::error::{ConvertError, Result};

/// Sequential reader over an in-memory bank image
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    cursor: Cursor<&'a [u8]>,
}

impl<'a> ByteReader<'a> {
    /// Create a reader positioned at offset 0
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(data),
        }
    }

    /// Total size of the underlying buffer
    pub fn len(&self) -> usize {
        self.cursor.get_ref().len()
    }

    /// Whether the underlying buffer is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current absolute offset
    pub fn position(&self) -> u64 {
        self.cursor.position()
    }

    /// Move to an absolute offset. Seeking past the end is allowed; the
    /// next read then fails.
    pub fn seek(&mut self, offset: u64) {
        self.cursor.set_position(offset);
    }

    /// Read one byte and advance
    pub fn read_byte(&mut self) -> Result<u8> {
        let offset = self.cursor.position();
        self.cursor.read_u8().map_err(|e| match e.kind() {
            ErrorKind::UnexpectedEof => ConvertError::ShortRead { offset },
            _ => ConvertError::Io(e),
        })
    }

    /// Read exactly `N` bytes and advance
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let offset = self.cursor.position();
        let mut buf = [0u8; N];
        self.cursor.read_exact(&mut buf).map_err(|e| match e.kind() {
            ErrorKind::UnexpectedEof => ConvertError::ShortRead { offset },
            _ => ConvertError::Io(e),
        })?;
        Ok(buf)
    }

    /// Read a big-endian `u16` and advance
    pub fn read_u16_be(&mut self) -> Result<u16> {
        let offset = self.cursor.position();
        self.cursor.read_u16::<BigEndian>().map_err(|e| match e.kind() {
            ErrorKind::UnexpectedEof => ConvertError::ShortRead { offset },
            _ => ConvertError::Io(e),
        })
    }
}
