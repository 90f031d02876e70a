//! Room-definition text output
//!
//! The output is a single `knights_rooms` table: a tile table mapping tile
//! numbers to engine tiles, then one block per segment.

use std::io::Write;

use crate::config::ConvertConfig;
use crate::error::Result;
use crate::segment::{INTERIOR_SIZE, RoomCategory, Segment};
use crate::tile::TILE_DEFINITIONS;

/// Writes segments in the room-definition format
pub struct RoomWriter<'c, W: Write> {
    out: W,
    config: &'c ConvertConfig,
    segments: usize,
}

impl<'c, W: Write> RoomWriter<'c, W> {
    /// Create a writer and emit the preamble
    pub fn new(mut out: W, config: &'c ConvertConfig) -> Result<Self> {
        write_preamble(&mut out, config)?;
        Ok(Self {
            out,
            config,
            segments: 0,
        })
    }

    /// Emit one segment block
    pub fn write_segment(&mut self, segment: &Segment<'_>) -> Result<()> {
        write_segment(&mut self.out, segment, self.config)?;
        self.segments += 1;
        Ok(())
    }

    /// Number of segments written so far
    pub fn segments_written(&self) -> usize {
        self.segments
    }

    /// Emit the trailer, flush, and hand back the underlying writer
    pub fn finish(mut self) -> Result<W> {
        write_trailer(&mut self.out)?;
        self.out.flush()?;
        Ok(self.out)
    }
}

/// Header comment, include line and tile table
pub fn write_preamble<W: Write>(out: &mut W, config: &ConvertConfig) -> Result<()> {
    writeln!(out, "# Room data, imported from KRD.")?;
    writeln!(out, "# This file was automatically generated by kconvert.")?;
    writeln!(out)?;
    writeln!(out, "include \"{}\"", config.tiles_include)?;
    writeln!(out)?;
    writeln!(out, "knights_rooms = {{")?;
    writeln!(out)?;
    writeln!(out, "    tiles = [")?;
    writeln!(out)?;

    let last = TILE_DEFINITIONS.len() - 1;
    for (i, def) in TILE_DEFINITIONS.iter().enumerate() {
        let entry = if i == last {
            format!("{},", def)
        } else {
            def.to_string()
        };
        writeln!(out, "        {:<19} # {}", entry, i + 1)?;
    }

    writeln!(out, "    ]")?;
    writeln!(out)?;
    writeln!(out, "    segments = [")?;
    writeln!(out)?;
    Ok(())
}

/// One `{ ... }` block for a segment
pub fn write_segment<W: Write>(
    out: &mut W,
    segment: &Segment<'_>,
    config: &ConvertConfig,
) -> Result<()> {
    writeln!(out, "{{")?;
    writeln!(out, " width  = {}", INTERIOR_SIZE)?;
    writeln!(out, " height = {}", INTERIOR_SIZE)?;
    if let Some(category) = segment.category {
        writeln!(out, " category = \"{}\"", category)?;
        if category == RoomCategory::GuardedExit {
            writeln!(out, " bat_placement_tile = {}", config.bat_placement_tile)?;
        }
    }
    writeln!(out, " name = \"{}\"", segment.name)?;

    writeln!(out, " data = [")?;
    for row in segment.output_rows() {
        for t in row {
            write!(out, "{} ", t)?;
        }
        writeln!(out)?;
    }
    writeln!(out, " ]")?;

    if !segment.switches.is_empty() {
        writeln!(out, " switches = [")?;
        for switch in &segment.switches {
            writeln!(
                out,
                "   [{} {} \"{}\"]",
                switch.x - 1,
                switch.y - 1,
                switch.effects.render(switch.x, switch.y)
            )?;
        }
        writeln!(out, " ]")?;
    }

    writeln!(out, " rooms = {}", segment.room.boxes_literal())?;
    writeln!(out, "}}")?;
    writeln!(out)?;
    Ok(())
}

/// Closing brackets of the segment list and the outer table
pub fn write_trailer<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "]  # close 'segments'")?;
    writeln!(out, "}}  # close 'knights_rooms'")?;
    Ok(())
}
