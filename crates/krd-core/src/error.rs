//! Conversion errors
//!
//! Every inconsistency found in a room bank aborts the whole conversion.
//! Variants carry enough context (offsets, room labels, coordinates and raw
//! codes) to locate the offending data in the input file.

use thiserror::Error;

/// Errors raised while decoding a room bank or writing its segments
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("File too short: could not read byte at offset {offset}")]
    ShortRead { offset: u64 },

    #[error("Inconsistent room counts in bank header (raw a={na} b={nb} c={nc})")]
    BadCounts { na: u8, nb: u8, nc: u8 },

    #[error("Input contains several banks; only single-bank files are supported")]
    UnsupportedMultiBank,

    #[error("Room {room}: sub-room box {x},{y} {width}x{height} extends past the grid")]
    BoxOutOfBounds {
        room: String,
        x: u8,
        y: u8,
        width: u8,
        height: u8,
    },

    #[error("Rooms error in {room}: more than 2 rooms at {x},{y}")]
    RoomsOverlap { room: String, x: usize, y: usize },

    #[error("Bad trap in {room} at {x},{y}: major={major} minor={minor}")]
    BadTrap {
        room: String,
        x: u8,
        y: u8,
        major: u8,
        minor: u8,
    },

    #[error("Trap {index} in {room} links to missing trap {link}")]
    DanglingTrapLink { room: String, index: usize, link: u8 },

    #[error("Trap {index} in {room} at {x},{y} has no effect")]
    EmptyEffectList {
        room: String,
        index: usize,
        x: u8,
        y: u8,
    },

    #[error("Switch {switch} in {segment} at {x},{y} refers to missing trap")]
    MissingSwitchTrap {
        segment: String,
        switch: u8,
        x: usize,
        y: usize,
    },

    #[error("Bad tile in {segment} at {x},{y}: {tile}")]
    BadTile {
        segment: String,
        x: usize,
        y: usize,
        tile: u8,
    },

    #[error("Non wall tile on border in {segment} at {x},{y}: {tile}")]
    NonWallBorder {
        segment: String,
        x: usize,
        y: usize,
        tile: u8,
    },

    #[error("Unexpected tile in {segment} at {x},{y}: found {found}, expected {expected}")]
    UnexpectedFixupTile {
        segment: String,
        x: usize,
        y: usize,
        found: u8,
        expected: u8,
    },
}

/// Result alias used throughout the converter
pub type Result<T> = std::result::Result<T, ConvertError>;
