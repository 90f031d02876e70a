//! Raw tile grid decoding
//!
//! Each rotation of a room is a 14x14 grid of raw codes stored row by row.
//! The outer ring must be wall; the 12x12 interior is what the engine sees.


use crate::error::{ConvertError, Result};
use crate::reader::ByteReader;
use crate::room::{GRID_BYTES, GRID_SIZE};
use crate::segment::category::RoomCategory;
use crate::tile::{self, RawTile};

/// A decoded 14x14 grid, border included
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGrid {
    rows: [[u8; GRID_SIZE]; GRID_SIZE],
}

impl Default for TileGrid {
    fn default() -> Self {
        Self::filled(tile::WALL)
    }
}

impl TileGrid {
    /// Grid with every cell set to `tile`
    pub fn filled(tile: u8) -> Self {
        Self {
            rows: [[tile; GRID_SIZE]; GRID_SIZE],
        }
    }

    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.rows[y][x]
    }

    pub fn set(&mut self, x: usize, y: usize, tile: u8) {
        self.rows[y][x] = tile;
    }

    /// Whether `(x, y)` lies on the outer ring
    pub fn is_border(x: usize, y: usize) -> bool {
        x == 0 || y == 0 || x == GRID_SIZE - 1 || y == GRID_SIZE - 1
    }

    /// Interior cells in row-major order
    pub fn interior() -> impl Iterator<Item = (usize, usize)> {
        (1..GRID_SIZE - 1).flat_map(|y| (1..GRID_SIZE - 1).map(move |x| (x, y)))
    }
}

/// A cell holding a numbered switch, pressure plate or pentagram
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchCell {
    pub x: usize,
    pub y: usize,
    /// 1-based trap number fired by this switch
    pub number: u8,
}

/// Fix-up applied to one cell of one segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellFixup {
    pub x: usize,
    pub y: usize,
    pub expected: u8,
    pub replacement: u8,
}

/// Where a grid comes from and how to interpret it
#[derive(Debug, Clone, Copy)]
pub struct GridContext<'a> {
    /// Segment name used in diagnostics
    pub segment: &'a str,
    pub base_offset: u64,
    pub rotation: u8,
    pub category: Option<RoomCategory>,
    pub fixup: Option<CellFixup>,
}

/// Read and decode one rotation's grid.
///
/// Returns the grid and the switch cells in the order they were found.
pub fn decode_grid(
    reader: &mut ByteReader<'_>,
    ctx: &GridContext<'_>,
) -> Result<(TileGrid, Vec<SwitchCell>)> {
    reader.seek(ctx.base_offset + ctx.rotation as u64 * GRID_BYTES);

    let mut grid = TileGrid::default();
    let mut switches = Vec::new();
    for y in 0..GRID_SIZE {
        for x in 0..GRID_SIZE {
            let raw = tile::decode_raw(reader.read_byte()?);
            let tile = decode_cell(ctx, x, y, raw)?;
            grid.set(x, y, tile);
            if raw.switch != 0 {
                switches.push(SwitchCell {
                    x,
                    y,
                    number: raw.switch,
                });
            }
        }
    }
    Ok((grid, switches))
}

/// Final tile number of one cell
fn decode_cell(ctx: &GridContext<'_>, x: usize, y: usize, raw: RawTile) -> Result<u8> {
    let mut t = raw.tile;

    if tile::is_pentagram(t) && ctx.category == Some(RoomCategory::SpecialPentagram) {
        t = tile::SPECIAL_PENTAGRAM;
    }

    if let Some(fix) = ctx.fixup.filter(|f| f.x == x && f.y == y) {
        if t != fix.expected {
            return Err(ConvertError::UnexpectedFixupTile {
                segment: ctx.segment.to_string(),
                x,
                y,
                found: t,
                expected: fix.expected,
            });
        }
        t = fix.replacement;
    }

    if !tile::is_valid(t) {
        return Err(ConvertError::BadTile {
            segment: ctx.segment.to_string(),
            x,
            y,
            tile: t,
        });
    }

    if TileGrid::is_border(x, y) {
        if t != tile::WALL {
            return Err(ConvertError::NonWallBorder {
                segment: ctx.segment.to_string(),
                x,
                y,
                tile: t,
            });
        }
    } else if t == tile::TABLE_HORIZ {
        if let Some(book) = ctx.category.and_then(|c| c.table_tile()) {
            t = book;
        }
    }
    Ok(t)
}
