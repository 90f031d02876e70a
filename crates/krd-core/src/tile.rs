//! Tile numbering
//!
//! Tile numbers follow the original Amiga game, with a few additions at the
//! top of the range (special pentagram and the trap-locked doors). Raw room
//! data also uses codes above the tile range to attach a switch number to a
//! switch, pressure plate or pentagram.


/// Lowest valid tile number
pub const TILE_MIN: u8 = 1;

/// Highest valid tile number
pub const TILE_MAX: u8 = 91;

pub const LIVE_PENTAGRAM: u8 = 1;
pub const WALL: u8 = 2;
/// Pillar; also the closed state of a crystal ball
pub const PILLAR: u8 = 3;
pub const WOOD_DOOR_HORIZ: u8 = 7;
pub const IRON_DOOR_HORIZ: u8 = 9;
pub const IRON_DOOR_VERT: u8 = 10;
pub const SWITCH_UP: u8 = 18;
pub const SWITCH_DOWN: u8 = 19;
pub const TABLE_HORIZ: u8 = 43;
pub const TABLE_WITH_BOOK: u8 = 50;
pub const TABLE_WITH_NECRONOMICON: u8 = 51;
pub const DEAD_ZOMBIE: u8 = 59;
pub const PRESSURE_PLATE: u8 = 67;
pub const DEAD_PENTAGRAM: u8 = 76;
pub const STAIRS_TOP: u8 = 81;
pub const SPECIAL_PENTAGRAM: u8 = 86;

/// Added to a door tile when a switch acts on it
pub const TRAPLOCK_OFFSET: u8 = 80;

/// A raw grid code split into a tile and a switch number (0 for none)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawTile {
    pub tile: u8,
    pub switch: u8,
}

/// Split a raw grid code.
///
/// Codes 160..=199 encode a switch, pressure plate or pentagram together
/// with a switch number; 169 is a live pentagram. Every other code is a
/// plain tile number and is passed through unchecked.
pub fn decode_raw(code: u8) -> RawTile {
    let (tile, switch) = match code {
        191..=199 => (SWITCH_DOWN, code - 190),
        181..=189 => (SWITCH_UP, code - 180),
        170..=179 => (PRESSURE_PLATE, code - 170),
        160..=168 => (DEAD_PENTAGRAM, code - 160),
        169 => (LIVE_PENTAGRAM, 0),
        _ => (code, 0),
    };
    RawTile { tile, switch }
}

pub fn is_valid(tile: u8) -> bool {
    (TILE_MIN..=TILE_MAX).contains(&tile)
}

/// Wooden or iron door, horizontal or vertical
pub fn is_door(tile: u8) -> bool {
    (WOOD_DOOR_HORIZ..=IRON_DOOR_VERT).contains(&tile)
}

pub fn is_pentagram(tile: u8) -> bool {
    tile == LIVE_PENTAGRAM || tile == DEAD_PENTAGRAM
}

/// Engine-side definition of each tile number, starting at 1
pub const TILE_DEFINITIONS: [&str; 90] = [
    "t_live_pentagram",
    "t_wall_normal",
    "t_wall_pillar",
    "t_wall_skull_east",
    "t_wall_skull_west",
    "t_wall_cage",
    "[t_door_horiz, t_hdoor_background]",
    "[t_door_vert, t_vdoor_background]",
    "[t_iron_door_horiz, t_hdoor_background]",
    "[t_iron_door_vert, t_vdoor_background]",
    "t_home_south",
    "t_home_west",
    "t_home_north",
    "t_home_east",
    "t_crystal_ball",
    "t_gate_horiz",
    "t_gate_vert",
    "t_switch_up",
    "t_switch_down",
    "0",
    "0",
    "0",
    "t_haystack",
    "t_barrel",
    "t_chest_north",
    "t_chest_east",
    "t_chest_south",
    "t_chest_west",
    "0",
    "0",
    "0",
    "t_small_skull",
    "0",
    "0",
    "0",
    "0",
    "0",
    "0",
    "t_table_small",
    "t_table_north",
    "t_table_vert",
    "t_table_south",
    "t_large_table_horiz",
    "t_chair_south",
    "t_chair_north",
    "0",
    "t_open_pit_vert",
    "t_open_pit_wooden",
    "t_open_pit_normal",
    "[t_large_table_horiz, 0, i_basic_book]",
    "[t_large_table_horiz, 0, i_necronomicon]",
    "0",
    "0",
    "t_broken_wood_1",
    "t_broken_wood_2",
    "t_broken_wood_3",
    "t_broken_wood_4",
    "t_broken_wood_5",
    "[t_dead_zombie, t_floor1]",
    "0",
    "0",
    "0",
    "0",
    "t_open_gate_horiz",
    "t_open_gate_vert",
    "t_floor1 & {editor_label=\"-\"}",
    "t_floorpp",
    "t_floor2",
    "t_floor3",
    "t_floor4",
    "t_floor5",
    "[t_floor6, t_floor1]",
    "t_floor7",
    "t_floor8",
    "t_floor9",
    "t_dead_pentagram",
    "t_floor10",
    "t_closed_pit_vert",
    "t_closed_pit_wooden",
    "t_closed_pit_normal",
    "t_stairs_top",
    "t_stairs_south",
    "t_stairs_west",
    "t_stairs_north",
    "t_stairs_east",
    "t_special_pentagram",
    "[t_door_horiz_locked, t_hdoor_background]",
    "[t_door_vert_locked, t_vdoor_background]",
    "[t_iron_door_horiz_locked, t_hdoor_background]",
    "[t_iron_door_vert_locked, t_vdoor_background]",
];
