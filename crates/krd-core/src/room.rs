//! Per-room tables: sub-room boxes and traps
//!
//! A room record is 1080 bytes: four 14x14 tile grids (one per rotation),
//! a fifth grid-sized block, then the sub-room box table and the trap table.

use std::fmt;


use crate::bank::RoomId;
use crate::error::{ConvertError, Result};
use crate::reader::ByteReader;
use crate::trap::{EffectList, MAX_TRAPS, TRAP_RECORD_LEN, TrapRecord, resolve_traps};

/// Width and height of a raw room grid
pub const GRID_SIZE: usize = 14;

/// Bytes in one raw grid
pub const GRID_BYTES: u64 = (GRID_SIZE * GRID_SIZE) as u64;

/// Room-relative offset of the sub-room box count
pub const BOX_COUNT_OFFSET: u64 = GRID_BYTES * 5;

/// Room-relative offset of the first sub-room box
pub const BOX_TABLE_OFFSET: u64 = BOX_COUNT_OFFSET + 4;

/// Room-relative offset of the trap table
pub const TRAP_TABLE_OFFSET: u64 = BOX_COUNT_OFFSET + 52;

/// Maximum number of box interiors allowed to cover one cell
pub const MAX_BOX_OVERLAP: u8 = 2;

/// A rectangle marking a physical sub-area of a room
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubRoomBox {
    pub x: u8,
    pub y: u8,
    pub width: u8,
    pub height: u8,
}

impl SubRoomBox {
    pub fn new(x: u8, y: u8, width: u8, height: u8) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether `(cx, cy)` is one of the four corner cells
    pub fn is_corner(&self, cx: usize, cy: usize) -> bool {
        let (x, y) = (self.x as usize, self.y as usize);
        let right = (x + self.width as usize).saturating_sub(1);
        let bottom = (y + self.height as usize).saturating_sub(1);
        (cx == x || cx == right) && (cy == y || cy == bottom)
    }

    /// Cells covered by the box, corners excluded
    pub fn counted_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let (x, y) = (self.x as usize, self.y as usize);
        (x..x + self.width as usize)
            .flat_map(move |cx| (y..y + self.height as usize).map(move |cy| (cx, cy)))
            .filter(move |&(cx, cy)| !self.is_corner(cx, cy))
    }
}

impl fmt::Display for SubRoomBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}, {}]", self.x, self.y, self.width, self.height)
    }
}

/// Check that no cell is covered by more than two boxes
pub fn validate_boxes(room: &str, boxes: &[SubRoomBox]) -> Result<()> {
    let mut coverage = [[0u8; GRID_SIZE]; GRID_SIZE];
    for b in boxes {
        for (cx, cy) in b.counted_cells() {
            if cx >= GRID_SIZE || cy >= GRID_SIZE {
                return Err(ConvertError::BoxOutOfBounds {
                    room: room.to_string(),
                    x: b.x,
                    y: b.y,
                    width: b.width,
                    height: b.height,
                });
            }
            coverage[cx][cy] += 1;
            if coverage[cx][cy] > MAX_BOX_OVERLAP {
                return Err(ConvertError::RoomsOverlap {
                    room: room.to_string(),
                    x: cx,
                    y: cy,
                });
            }
        }
    }
    Ok(())
}

/// Decoded tables of one room, shared by its four rotations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomTable {
    pub id: RoomId,
    pub boxes: Vec<SubRoomBox>,
    pub traps: Vec<TrapRecord>,
    /// Resolved effect list of each trap, same indices as `traps`
    pub effects: Vec<EffectList>,
}

impl RoomTable {
    /// Decode the box and trap tables of a room
    pub fn read(reader: &mut ByteReader<'_>, id: RoomId) -> Result<Self> {
        let base = id.base_offset();
        let label = id.to_string();

        reader.seek(base + BOX_COUNT_OFFSET);
        let box_count = reader.read_byte()?;
        reader.seek(base + BOX_TABLE_OFFSET);
        let mut boxes = Vec::with_capacity(box_count as usize);
        for _ in 0..box_count {
            let [x, y, width, height] = reader.read_array::<4>()?;
            boxes.push(SubRoomBox::new(x, y, width, height));
        }
        validate_boxes(&label, &boxes)?;

        let traps = read_traps(reader, base)?;
        let effects = resolve_traps(&label, &traps)?;

        Ok(Self {
            id,
            boxes,
            traps,
            effects,
        })
    }

    /// Effect list fired by a switch with the given 1-based number
    pub fn switch_effects(&self, switch: u8) -> Option<&EffectList> {
        (switch as usize)
            .checked_sub(1)
            .and_then(|i| self.effects.get(i))
    }

    /// Box list in the bracketed form used by the output
    pub fn boxes_literal(&self) -> String {
        let items: Vec<String> = self.boxes.iter().map(ToString::to_string).collect();
        format!("[{}]", items.join(", "))
    }
}

/// Read trap records until a zero major code or a full table
fn read_traps(reader: &mut ByteReader<'_>, base: u64) -> Result<Vec<TrapRecord>> {
    let mut traps = Vec::with_capacity(MAX_TRAPS);
    while traps.len() < MAX_TRAPS {
        reader.seek(base + TRAP_TABLE_OFFSET + traps.len() as u64 * TRAP_RECORD_LEN);
        let record = TrapRecord::from_bytes(reader.read_array::<6>()?);
        if record.major == 0 {
            break;
        }
        traps.push(record);
    }
    Ok(traps)
}
