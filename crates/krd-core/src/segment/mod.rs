//! Segments: one room at one rotation
//!
//! Contains grid decoding, room categories and the unreachable door pass.

mod category;
mod closure;
mod grid;

pub use category::{RoomCategory, is_excluded};
pub use closure::{close_unreachable_doors, is_closed};
pub use grid::{CellFixup, GridContext, SwitchCell, TileGrid, decode_grid};

use std::fmt;

use crate::bank::{RoomClass, RoomId};
use crate::error::{ConvertError, Result};
use crate::reader::ByteReader;
use crate::room::{GRID_SIZE, RoomTable};
use crate::tile;
use crate::trap::EffectList;

/// Rotations stored per room
pub const ROTATIONS: u8 = 4;

/// Width and height of the playable area
pub const INTERIOR_SIZE: usize = GRID_SIZE - 2;

/// A switch and the effects it fires
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Switch {
    pub x: usize,
    pub y: usize,
    pub number: u8,
    pub effects: EffectList,
}

/// Name of a segment, e.g. `Z03.1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SegmentName {
    pub room: RoomId,
    pub rotation: u8,
}

impl fmt::Display for SegmentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{:02}.{}",
            self.room.class,
            self.room.number,
            self.rotation + 1
        )
    }
}

/// A decoded, repaired segment ready for output
#[derive(Debug, Clone)]
pub struct Segment<'a> {
    pub name: SegmentName,
    pub room: &'a RoomTable,
    pub category: Option<RoomCategory>,
    pub grid: TileGrid,
    pub switches: Vec<Switch>,
}

impl<'a> Segment<'a> {
    /// Decode one rotation of a room and run the closure pass on it
    pub fn decode(reader: &mut ByteReader<'_>, room: &'a RoomTable, rotation: u8) -> Result<Self> {
        let name = SegmentName {
            room: room.id,
            rotation,
        };
        let label = name.to_string();
        let category = RoomCategory::of(room.id.class, rotation);

        let ctx = GridContext {
            segment: &label,
            base_offset: room.id.base_offset(),
            rotation,
            category,
            fixup: fixup_for(&room.id, rotation),
        };
        let (mut grid, cells) = decode_grid(reader, &ctx)?;
        close_unreachable_doors(&mut grid);

        let switches = cells
            .into_iter()
            .map(|cell| -> Result<Switch> {
                let effects = room.switch_effects(cell.number).ok_or_else(|| {
                    ConvertError::MissingSwitchTrap {
                        segment: label.clone(),
                        switch: cell.number,
                        x: cell.x,
                        y: cell.y,
                    }
                })?;
                Ok(Switch {
                    x: cell.x,
                    y: cell.y,
                    number: cell.number,
                    effects: effects.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name,
            room,
            category,
            grid,
            switches,
        })
    }

    /// Tile written for an interior cell. Doors acted on by a switch
    /// become their trap-locked variant.
    pub fn output_tile(&self, x: usize, y: usize) -> u8 {
        let t = self.grid.get(x, y);
        if tile::is_door(t) && self.switches.iter().any(|s| s.effects.targets(x, y)) {
            t + tile::TRAPLOCK_OFFSET
        } else {
            t
        }
    }

    /// Interior rows as written to the output
    pub fn output_rows(&self) -> Vec<Vec<u8>> {
        (1..=INTERIOR_SIZE)
            .map(|y| (1..=INTERIOR_SIZE).map(|x| self.output_tile(x, y)).collect())
            .collect()
    }
}

/// Cell corrections for known bad room data.
///
/// Z03 rotation 1 has a dead zombie where stairs belong; without the
/// stairs the generator would cut a door into the guarded exit.
pub fn fixup_for(room: &RoomId, rotation: u8) -> Option<CellFixup> {
    if room.class == RoomClass::Z && room.number == 3 && rotation == 0 {
        Some(CellFixup {
            x: 12,
            y: 10,
            expected: tile::DEAD_ZOMBIE,
            replacement: tile::STAIRS_TOP,
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(class: RoomClass, number: usize) -> RoomId {
        RoomId {
            bank_offset: 0,
            index: 0,
            class,
            number,
        }
    }

    #[test]
    fn test_segment_name() {
        let name = SegmentName {
            room: room(RoomClass::Z, 3),
            rotation: 0,
        };
        assert_eq!(name.to_string(), "Z03.1");
        let name = SegmentName {
            room: room(RoomClass::A, 12),
            rotation: 3,
        };
        assert_eq!(name.to_string(), "A12.4");
    }

    #[test]
    fn test_fixup_only_for_z3_first_rotation() {
        assert!(fixup_for(&room(RoomClass::Z, 3), 0).is_some());
        assert!(fixup_for(&room(RoomClass::Z, 3), 1).is_none());
        assert!(fixup_for(&room(RoomClass::X, 3), 0).is_none());
        assert!(fixup_for(&room(RoomClass::Z, 4), 0).is_none());
    }
}
