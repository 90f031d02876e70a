//! krd-core: Knights room bank conversion
//!
//! Decodes the room bank of the original game (KRD) and writes the same
//! rooms as room-definition text for the current engine.
//!
//! The pipeline runs in one pass: bank header, then for each room its box
//! and trap tables, then each of its four rotations as a segment (grid
//! decoding, unreachable door removal, text output).

pub mod bank;
pub mod config;
pub mod emit;
pub mod error;
pub mod pipeline;
pub mod reader;
pub mod room;
pub mod segment;
pub mod tile;
pub mod trap;

pub use bank::{BankHeader, RoomClass, RoomId};
pub use config::ConvertConfig;
pub use emit::RoomWriter;
pub use error::{ConvertError, Result};
pub use pipeline::{ConversionSummary, convert_bytes, convert_file};
pub use reader::ByteReader;
pub use room::{RoomTable, SubRoomBox};
pub use segment::{RoomCategory, Segment, SegmentName, TileGrid};
pub use trap::{Direction, Effect, EffectKind, EffectList, TrapRecord};
