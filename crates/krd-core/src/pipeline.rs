//! Conversion driver
//!
//! Decodes every room of a bank and writes each of its rotations as a
//! segment. Any inconsistency aborts the run; `convert_file` only creates
//! the output file once the whole bank has converted.

use std::fs;
use std::io::Write;
use std::path::Path;

use log::{debug, info};

use crate::bank::{BankHeader, RoomClass};
use crate::config::ConvertConfig;
use crate::emit::RoomWriter;
use crate::error::Result;
use crate::reader::ByteReader;
use crate::room::RoomTable;
use crate::segment::{ROTATIONS, Segment, SegmentName, is_excluded};

/// Outcome of a conversion run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
    pub header: BankHeader,
    pub rooms: usize,
    pub segments: usize,
    /// Segments deliberately left out of the output
    pub skipped: Vec<String>,
}

impl ConversionSummary {
    pub fn class_counts(&self) -> Vec<(RoomClass, usize)> {
        self.header.class_counts()
    }
}

/// Convert an in-memory bank image, writing the text to `out`
pub fn convert_bytes<W: Write>(
    data: &[u8],
    config: &ConvertConfig,
    out: W,
) -> Result<ConversionSummary> {
    let mut reader = ByteReader::new(data);
    let header = BankHeader::read(&mut reader, config)?;
    debug!(
        "bank holds {} rooms ({} bytes)",
        header.room_count(),
        reader.len()
    );

    let mut writer = RoomWriter::new(out, config)?;
    let mut skipped = Vec::new();

    for id in header.rooms() {
        debug!("room {}", id);
        let room = RoomTable::read(&mut reader, id)?;

        for rotation in 0..ROTATIONS {
            if is_excluded(&id, rotation) {
                let name = SegmentName { room: id, rotation };
                debug!("skipping segment {}", name);
                skipped.push(name.to_string());
                continue;
            }
            let segment = Segment::decode(&mut reader, &room, rotation)?;
            writer.write_segment(&segment)?;
        }
    }

    let segments = writer.segments_written();
    writer.finish()?;
    Ok(ConversionSummary {
        header,
        rooms: header.room_count(),
        segments,
        skipped,
    })
}

/// Convert the bank at `input` into a text file at `output`
pub fn convert_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &ConvertConfig,
) -> Result<ConversionSummary> {
    let data = fs::read(input.as_ref())?;
    let mut text = Vec::new();
    let summary = convert_bytes(&data, config, &mut text)?;
    fs::write(output.as_ref(), text)?;

    info!(
        "wrote {} rooms * {} rotations to {}",
        summary.rooms,
        ROTATIONS,
        output.as_ref().display()
    );
    Ok(summary)
}
