//! Room bank header and room addressing
//!
//! A bank starts with a 20-byte block describing the embedded section,
//! followed by five room-class count bytes. Rooms follow at a fixed stride.
//! The raw counts for classes A, B and C overlap: the stored value for B
//! includes C, and the stored value for A includes both.
//!
//! A bank set (`AmBs`) is a tag and a big-endian bank count followed by the
//! banks themselves; only the first bank of a set is decoded.

use std::fmt;

use log::{debug, warn};
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::config::ConvertConfig;
use crate::error::{ConvertError, Result};
use crate::reader::ByteReader;

/// Size of the leading section block
pub const LEADING_BLOCK_LEN: u64 = 20;

/// Offset of the first room record (leading block plus five count bytes)
pub const FIRST_ROOM_OFFSET: u64 = LEADING_BLOCK_LEN + 5;

/// Byte stride between consecutive room records
pub const ROOM_STRIDE: u64 = 1080;

/// Tag of a file holding exactly one bank
pub const SINGLE_BANK_TAG: [u8; 4] = *b"AmBk";

/// Tag of a file holding a set of banks
pub const MULTI_BANK_TAG: [u8; 4] = *b"AmBs";

/// Size of the bank set header (tag and bank count)
pub const MULTI_BANK_HEADER_LEN: u64 = 6;

/// Room class letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter)]
pub enum RoomClass {
    A,
    B,
    C,
    X,
    Z,
}

/// Number of rooms in each class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BankHeader {
    /// Offset of the decoded bank inside the file
    pub offset: u64,
    pub na: usize,
    pub nb: usize,
    pub nc: usize,
    pub nx: usize,
    pub nz: usize,
}

impl BankHeader {
    /// Derive the class counts from the raw header bytes
    pub fn from_raw(na: u8, nb: u8, nc: u8, nx: u8, nz: u8) -> Result<Self> {
        let class_b = nb.checked_sub(nc).ok_or_else(|| bad_counts(na, nb, nc))?;
        let class_a = class_b
            .checked_add(nc)
            .and_then(|bc| na.checked_sub(bc))
            .ok_or_else(|| bad_counts(na, nb, nc))?;

        Ok(Self {
            offset: 0,
            na: class_a as usize,
            nb: class_b as usize,
            nc: nc as usize,
            nx: nx as usize,
            nz: nz as usize,
        })
    }

    /// Read the header from the start of a bank image
    pub fn read(reader: &mut ByteReader<'_>, config: &ConvertConfig) -> Result<Self> {
        reader.seek(0);
        let mut offset = 0;
        let mut tag = reader.read_array::<4>()?;
        if tag == MULTI_BANK_TAG {
            if config.reject_multi_bank {
                return Err(ConvertError::UnsupportedMultiBank);
            }
            let banks = reader.read_u16_be()?;
            warn!("input holds {} banks; only the first one is decoded", banks);
            offset = MULTI_BANK_HEADER_LEN;
            tag = reader.read_array::<4>()?;
        }
        if tag != SINGLE_BANK_TAG {
            warn!("unrecognised bank tag {:02x?}, assuming a single bank", tag);
        }

        reader.seek(offset + LEADING_BLOCK_LEN);
        let na = reader.read_byte()?;
        let nb = reader.read_byte()?;
        let nc = reader.read_byte()?;
        let nx = reader.read_byte()?;
        let nz = reader.read_byte()?;
        debug!("raw counts a={} b={} c={} x={} z={}", na, nb, nc, nx, nz);

        Ok(Self {
            offset,
            ..Self::from_raw(na, nb, nc, nx, nz)?
        })
    }

    /// Number of rooms in a class
    pub fn count(&self, class: RoomClass) -> usize {
        match class {
            RoomClass::A => self.na,
            RoomClass::B => self.nb,
            RoomClass::C => self.nc,
            RoomClass::X => self.nx,
            RoomClass::Z => self.nz,
        }
    }

    /// Total number of rooms in the bank
    pub fn room_count(&self) -> usize {
        self.na + self.nb + self.nc + self.nx + self.nz
    }

    /// Find the class and class-relative number of a room by its bank index.
    ///
    /// Rooms are stored in the order C, B, A, X, Z.
    pub fn locate(&self, index: usize) -> Option<RoomId> {
        let mut start = 0;
        for class in STORAGE_ORDER {
            let count = self.count(class);
            if index < start + count {
                return Some(RoomId {
                    bank_offset: self.offset,
                    index,
                    class,
                    number: index + 1 - start,
                });
            }
            start += count;
        }
        None
    }

    /// Iterate over every room in storage order
    pub fn rooms(&self) -> impl Iterator<Item = RoomId> + '_ {
        (0..self.room_count()).filter_map(|index| self.locate(index))
    }

    /// Counts per class, in letter order
    pub fn class_counts(&self) -> Vec<(RoomClass, usize)> {
        RoomClass::iter().map(|c| (c, self.count(c))).collect()
    }
}

const STORAGE_ORDER: [RoomClass; 5] = [
    RoomClass::C,
    RoomClass::B,
    RoomClass::A,
    RoomClass::X,
    RoomClass::Z,
];

fn bad_counts(na: u8, nb: u8, nc: u8) -> ConvertError {
    ConvertError::BadCounts { na, nb, nc }
}

/// Address of one room inside the bank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoomId {
    /// Offset of the bank holding the room
    pub bank_offset: u64,
    /// Zero-based index in storage order
    pub index: usize,
    pub class: RoomClass,
    /// One-based number within the class
    pub number: usize,
}

impl RoomId {
    /// Absolute offset of this room's record
    pub fn base_offset(&self) -> u64 {
        self.bank_offset + self.index as u64 * ROOM_STRIDE + FIRST_ROOM_OFFSET
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.class, self.number)
    }
}
