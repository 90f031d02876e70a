//! Special room categories
//!
//! Only rooms of classes X and Z carry a category. The category depends on
//! the rotation as well as the class.

use strum::Display;

use crate::bank::{RoomClass, RoomId};

/// Category of a segment that the dungeon generator places specially
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum RoomCategory {
    GuardedExit,
    LicheTomb,
    GnomeRoom,
    SpecialPentagram,
}

impl RoomCategory {
    /// Category of a room class at a rotation (0..=3)
    pub fn of(class: RoomClass, rotation: u8) -> Option<Self> {
        match (class, rotation) {
            (RoomClass::A | RoomClass::B | RoomClass::C, _) => None,
            (RoomClass::X, 0 | 1) => Some(RoomCategory::GuardedExit),
            (RoomClass::X, _) => None,
            (RoomClass::Z, 0) => Some(RoomCategory::GuardedExit),
            (RoomClass::Z, 1) => Some(RoomCategory::LicheTomb),
            (RoomClass::Z, 2) => Some(RoomCategory::GnomeRoom),
            (RoomClass::Z, _) => Some(RoomCategory::SpecialPentagram),
        }
    }

    /// Tile placed on a large horizontal table in this category
    pub fn table_tile(&self) -> Option<u8> {
        match self {
            RoomCategory::GnomeRoom => Some(crate::tile::TABLE_WITH_BOOK),
            RoomCategory::LicheTomb => Some(crate::tile::TABLE_WITH_NECRONOMICON),
            _ => None,
        }
    }
}

/// Guarded exit Z09 rotation 1 has two entry points, which the engine
/// cannot handle in a guarded exit, so it is never emitted.
pub fn is_excluded(room: &RoomId, rotation: u8) -> bool {
    room.class == RoomClass::Z && room.number == 9 && rotation == 0
}
