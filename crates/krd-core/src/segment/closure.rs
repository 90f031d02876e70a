//! Removal of unreachable iron doors
//!
//! An iron door boxed in on all sides by walls, pillars, other iron doors or
//! the grid border can never be reached. Left alone, the dungeon generator
//! would treat it as an opening, so it is turned into a wall.

use crate::segment::grid::TileGrid;
use crate::tile;

/// Whether a cell counts as closed for the closure pass
pub fn is_closed(grid: &TileGrid, x: usize, y: usize) -> bool {
    if TileGrid::is_border(x, y) {
        return true;
    }
    matches!(
        grid.get(x, y),
        tile::IRON_DOOR_HORIZ | tile::IRON_DOOR_VERT | tile::WALL | tile::PILLAR
    )
}

/// Turn every interior cell whose whole 3x3 neighborhood is closed into a
/// wall. Runs once; a wall is itself closed, so the result is stable.
pub fn close_unreachable_doors(grid: &mut TileGrid) {
    for (x, y) in TileGrid::interior() {
        let enclosed = (y - 1..=y + 1)
            .all(|ny| (x - 1..=x + 1).all(|nx| is_closed(grid, nx, ny)));
        if enclosed {
            grid.set(x, y, tile::WALL);
        }
    }
}
