//! Trap records and their resolution into switch effects
//!
//! Each room stores up to eight trap records. A record names a tile
//! position and a pair of raw codes describing what happens to that tile
//! when the trap fires. Records may link to up to two other records of the
//! same room (1-based, 0 for none); the linked records fire together with
//! the first one.

use strum::Display;

use crate::error::{ConvertError, Result};

/// Capacity of a room's trap table
pub const MAX_TRAPS: usize = 8;

/// Size of one trap record in bytes
pub const TRAP_RECORD_LEN: u64 = 6;

/// Facing of a bolt trap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];
}

/// What a trap does to its target tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    /// Fire a bolt in a direction
    Shoot(Direction),
    /// Teleport whoever stands on the tile
    Teleport,
    /// Flip a door, gate, pit or crystal ball
    Toggle,
    /// Flip a pentagram without a sound
    ToggleSilent,
    Open,
    Close,
    /// Valid trap with no visible effect
    None,
}

impl EffectKind {
    /// Keyword used by the room-definition format
    pub fn keyword(&self) -> &'static str {
        match self {
            EffectKind::Shoot(_) => "shoot",
            EffectKind::Teleport => "teleport_actor",
            EffectKind::Toggle => "toggle",
            EffectKind::ToggleSilent => "toggle_no_sound",
            EffectKind::Open => "open",
            EffectKind::Close => "close",
            EffectKind::None => "none",
        }
    }
}

/// An effect bound to the tile it acts on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Effect {
    pub x: u8,
    pub y: u8,
    pub kind: EffectKind,
}

impl Effect {
    /// Render as a token with the position relative to `(origin_x, origin_y)`
    pub fn token(&self, origin_x: usize, origin_y: usize) -> String {
        let dx = self.x as i64 - origin_x as i64;
        let dy = self.y as i64 - origin_y as i64;
        match self.kind {
            EffectKind::Shoot(dir) => format!("shoot({},{},'{}',i_bolt_trap)", dx, dy, dir),
            kind => format!("{}({},{})", kind.keyword(), dx, dy),
        }
    }
}

/// Map a pair of raw trap codes to an effect kind.
///
/// Returns `None` when the pair is not a known trap.
pub fn classify_codes(major: u8, minor: u8) -> Option<EffectKind> {
    if (201..=204).contains(&major) {
        return Some(EffectKind::Shoot(Direction::ALL[(major - 201) as usize]));
    }
    if major == 220 {
        return Some(EffectKind::Teleport);
    }

    let lo = major.min(minor);
    let hi = major.max(minor);
    let (lo16, hi16) = (lo as u16, hi as u16);

    let kind = if ((7..=10).contains(&lo) && hi16 == lo16 + 43)
        || (lo, hi) == (16, 64)
        || (lo, hi) == (17, 65)
        || ((lo == 47 || lo == 49) && hi16 == lo16 + 31)
    {
        // door or pit pair
        EffectKind::Toggle
    } else if ((50..=53).contains(&hi) || hi == 64 || hi == 65) && lo == hi {
        EffectKind::Open
    } else if (hi == 78 || hi == 80) && lo == hi {
        EffectKind::Close
    } else if (hi == 47 || hi == 49) && lo == hi {
        EffectKind::Open
    } else if (lo, hi) == (76, 169) {
        EffectKind::ToggleSilent
    } else if (lo, hi) == (3, 15) {
        // crystal ball
        EffectKind::Toggle
    } else if lo == 15 && hi == 15 {
        EffectKind::Open
    } else if lo == 3 && hi == 3 {
        EffectKind::Close
    } else if lo == 2 && hi == 2 {
        EffectKind::None
    } else {
        return None;
    };
    Some(kind)
}

/// Classify a trap at a position; `None` for an unknown code pair
pub fn classify(x: u8, y: u8, major: u8, minor: u8) -> Option<Effect> {
    classify_codes(major, minor).map(|kind| Effect { x, y, kind })
}

/// One raw trap table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrapRecord {
    pub x: u8,
    pub y: u8,
    pub major: u8,
    pub minor: u8,
    /// First linked record, 1-based, 0 when absent
    pub ad1: u8,
    /// Second linked record, 1-based, 0 when absent
    pub ad2: u8,
}

impl TrapRecord {
    pub fn from_bytes(bytes: [u8; 6]) -> Self {
        let [x, y, major, minor, ad1, ad2] = bytes;
        Self {
            x,
            y,
            major,
            minor,
            ad1,
            ad2,
        }
    }

    /// Linked record indices, zero-based
    pub fn links(&self) -> impl Iterator<Item = u8> {
        [self.ad1, self.ad2].into_iter().filter(|&ad| ad > 0)
    }
}

/// Effects fired together by one switch
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EffectList(Vec<Effect>);

impl EffectList {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether any effect acts on the tile at `(x, y)`
    pub fn targets(&self, x: usize, y: usize) -> bool {
        self.0
            .iter()
            .any(|e| e.x as usize == x && e.y as usize == y)
    }

    /// Space-separated tokens relative to the switch at `(origin_x, origin_y)`
    pub fn render(&self, origin_x: usize, origin_y: usize) -> String {
        self.0
            .iter()
            .map(|e| e.token(origin_x, origin_y))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Resolve the effect list fired by every record of a room's trap table.
///
/// The list for record `i` is its own effect followed by the effects of
/// its linked records. Links are followed one level only. `None` effects
/// are dropped, and a record whose list ends up empty is an error.
pub fn resolve_traps(room: &str, records: &[TrapRecord]) -> Result<Vec<EffectList>> {
    let classified = records
        .iter()
        .map(|r| {
            classify(r.x, r.y, r.major, r.minor).ok_or_else(|| ConvertError::BadTrap {
                room: room.to_string(),
                x: r.x,
                y: r.y,
                major: r.major,
                minor: r.minor,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut lists = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let mut effects = vec![classified[index]];
        for link in record.links() {
            let target = classified.get(link as usize - 1).ok_or_else(|| {
                ConvertError::DanglingTrapLink {
                    room: room.to_string(),
                    index,
                    link,
                }
            })?;
            effects.push(*target);
        }
        effects.retain(|e| e.kind != EffectKind::None);

        if effects.is_empty() {
            return Err(ConvertError::EmptyEffectList {
                room: room.to_string(),
                index,
                x: record.x,
                y: record.y,
            });
        }
        lists.push(EffectList(effects));
    }
    Ok(lists)
}
