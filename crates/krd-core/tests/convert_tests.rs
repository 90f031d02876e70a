//! End-to-end conversion of synthetic room banks

use krd_core::{ConvertConfig, ConvertError, convert_bytes};

const FLOOR: u8 = 66;
const ROOM_LEN: usize = 1080;

/// One room record: four rotations, box table and trap table
struct RoomData {
    bytes: Vec<u8>,
    boxes: usize,
    traps: usize,
}

impl RoomData {
    fn new() -> Self {
        let mut bytes = vec![0u8; ROOM_LEN];
        for rot in 0..4 {
            for y in 0..14 {
                for x in 0..14 {
                    let border = x == 0 || y == 0 || x == 13 || y == 13;
                    bytes[rot * 196 + y * 14 + x] = if border { 2 } else { FLOOR };
                }
            }
        }
        Self {
            bytes,
            boxes: 0,
            traps: 0,
        }
    }

    fn tile(mut self, rot: usize, x: usize, y: usize, code: u8) -> Self {
        self.bytes[rot * 196 + y * 14 + x] = code;
        self
    }

    fn tile_all(mut self, x: usize, y: usize, code: u8) -> Self {
        for rot in 0..4 {
            self = self.tile(rot, x, y, code);
        }
        self
    }

    fn sub_room(mut self, b: [u8; 4]) -> Self {
        let at = 984 + self.boxes * 4;
        self.bytes[at..at + 4].copy_from_slice(&b);
        self.boxes += 1;
        self.bytes[980] = self.boxes as u8;
        self
    }

    fn trap(mut self, record: [u8; 6]) -> Self {
        let at = 1032 + self.traps * 6;
        self.bytes[at..at + 6].copy_from_slice(&record);
        self.traps += 1;
        self
    }
}

/// Raw header counts plus rooms in storage order (C, B, A, X, Z)
fn bank(counts: [u8; 5], rooms: Vec<RoomData>) -> Vec<u8> {
    let mut data = vec![0u8; 20];
    data[..4].copy_from_slice(b"AmBk");
    data.extend_from_slice(&counts);
    for room in rooms {
        data.extend_from_slice(&room.bytes);
    }
    data
}

fn convert_with(
    data: &[u8],
    config: &ConvertConfig,
) -> Result<(krd_core::ConversionSummary, String), ConvertError> {
    let mut out = Vec::new();
    let summary = convert_bytes(data, config, &mut out)?;
    Ok((summary, String::from_utf8(out).expect("utf-8 output")))
}

fn convert(data: &[u8]) -> Result<(krd_core::ConversionSummary, String), ConvertError> {
    convert_with(data, &ConvertConfig::default())
}

/// The twelve data rows of the named segment
fn data_rows(text: &str, name: &str) -> Vec<Vec<u8>> {
    let marker = format!(" name = \"{}\"", name);
    let start = text.find(&marker).expect("segment present");
    text[start..]
        .lines()
        .skip(2)
        .take(12)
        .map(|l| l.split_whitespace().map(|t| t.parse().unwrap()).collect())
        .collect()
}

fn z_rooms(n: usize) -> Vec<RoomData> {
    (1..=n)
        .map(|i| {
            let room = RoomData::new();
            if i == 3 {
                room.tile(0, 12, 10, 59)
            } else {
                room
            }
        })
        .collect()
}

#[test]
fn test_single_room_four_segments() {
    let data = bank([1, 0, 0, 0, 0], vec![RoomData::new().sub_room([0, 0, 14, 14])]);
    let (summary, text) = convert(&data).unwrap();

    assert_eq!(summary.rooms, 1);
    assert_eq!(summary.segments, 4);
    for rot in 1..=4 {
        assert!(text.contains(&format!(" name = \"A01.{}\"", rot)));
    }
    assert_eq!(text.matches(" rooms = [[0, 0, 14, 14]]").count(), 4);
    assert!(!text.contains("category"));

    let rows = data_rows(&text, "A01.1");
    assert_eq!(rows.len(), 12);
    assert!(rows.iter().all(|r| r.len() == 12 && r.iter().all(|&t| t == FLOOR)));
}

#[test]
fn test_class_bucketing() {
    // raw counts a=10 b=5 c=3: three C rooms, two B rooms, five A rooms
    let rooms = (0..10).map(|_| RoomData::new()).collect();
    let (summary, text) = convert(&bank([10, 5, 3, 0, 0], rooms)).unwrap();

    assert_eq!(summary.header.nc, 3);
    assert_eq!(summary.header.nb, 2);
    assert_eq!(summary.header.na, 5);
    assert!(text.contains("name = \"C03.4\""));
    assert!(text.contains("name = \"B02.1\""));
    assert!(text.contains("name = \"A05.2\""));
    assert!(!text.contains("name = \"A06.1\""));
    // storage index 7 is the third A room
    let a3 = text.find("name = \"A03.1\"").unwrap();
    let b2 = text.find("name = \"B02.4\"").unwrap();
    assert!(b2 < a3);
}

#[test]
fn test_guarded_exit_exclusion_and_fixup() {
    let (summary, text) = convert(&bank([0, 0, 0, 0, 9], z_rooms(9))).unwrap();

    assert_eq!(summary.segments, 35);
    assert_eq!(summary.skipped, vec!["Z09.1".to_string()]);
    assert!(!text.contains("name = \"Z09.1\""));
    assert!(text.contains("name = \"Z09.2\""));

    let rows = data_rows(&text, "Z03.1");
    assert_eq!(rows[9][11], 81);
    assert_eq!(text.matches("bat_placement_tile = 73").count(), 8);
}

#[test]
fn test_excluded_segment_is_never_decoded() {
    let mut rooms = z_rooms(9);
    // rotation 0 of Z09 would fail on every check it reached
    rooms[8] = RoomData::new()
        .tile(0, 0, 5, FLOOR)
        .tile(0, 4, 4, 0)
        .tile(0, 3, 3, 191);
    let (summary, text) = convert(&bank([0, 0, 0, 0, 9], rooms)).unwrap();

    assert_eq!(summary.segments, 35);
    assert_eq!(summary.skipped, vec!["Z09.1".to_string()]);
    assert!(!text.contains("name = \"Z09.1\""));
    assert!(text.contains("name = \"Z09.4\""));
}

#[test]
fn test_fixup_precondition() {
    let mut rooms = z_rooms(3);
    rooms[2] = RoomData::new();
    let err = convert(&bank([0, 0, 0, 0, 3], rooms)).unwrap_err();
    assert!(matches!(
        err,
        ConvertError::UnexpectedFixupTile {
            x: 12,
            y: 10,
            found: 66,
            expected: 59,
            ..
        }
    ));
}

#[test]
fn test_categories_and_books() {
    let room = RoomData::new().tile_all(6, 6, 43).tile(3, 2, 2, 169);
    let (_, text) = convert(&bank([0, 0, 0, 0, 1], vec![room])).unwrap();

    assert!(text.contains("category = \"guarded_exit\"\n bat_placement_tile = 73\n name = \"Z01.1\""));
    assert!(text.contains("category = \"liche_tomb\"\n name = \"Z01.2\""));
    assert!(text.contains("category = \"gnome_room\"\n name = \"Z01.3\""));
    assert!(text.contains("category = \"special_pentagram\"\n name = \"Z01.4\""));

    assert_eq!(data_rows(&text, "Z01.1")[5][5], 43);
    assert_eq!(data_rows(&text, "Z01.2")[5][5], 51);
    assert_eq!(data_rows(&text, "Z01.3")[5][5], 50);
    assert_eq!(data_rows(&text, "Z01.4")[5][5], 43);
    assert_eq!(data_rows(&text, "Z01.4")[1][1], 86);
}

#[test]
fn test_switch_opens_door() {
    let room = RoomData::new()
        .tile(0, 3, 3, 191)
        .tile(0, 5, 3, 7)
        .tile(0, 8, 8, 9)
        .trap([5, 3, 7, 50, 2, 0])
        .trap([8, 8, 201, 0, 0, 0]);
    let (_, text) = convert(&bank([1, 0, 0, 0, 0], vec![room])).unwrap();

    let rows = data_rows(&text, "A01.1");
    assert_eq!(rows[2][2], 19);
    assert_eq!(rows[2][4], 87);
    assert_eq!(rows[7][7], 89);
    assert!(text.contains(
        " switches = [\n   [2 2 \"toggle(2,0) shoot(5,5,'north',i_bolt_trap)\"]\n ]\n"
    ));

    // the doors only exist in the first rotation
    assert!(!data_rows(&text, "A01.2").iter().flatten().any(|&t| t > 80));
}

#[test]
fn test_enclosed_iron_doors_become_walls() {
    let mut room = RoomData::new();
    for y in 1..=3 {
        for x in 1..=3 {
            room = room.tile(0, x, y, 10);
        }
    }
    let (_, text) = convert(&bank([1, 0, 0, 0, 0], vec![room])).unwrap();
    let rows = data_rows(&text, "A01.1");
    // (1,1) and (2,1) touch only border and doors
    assert_eq!(rows[0][0], 2);
    assert_eq!(rows[0][1], 2);
    assert_eq!(rows[1][1], 2);
    // (3,3) touches floor
    assert_eq!(rows[2][2], 10);
}

#[test]
fn test_switch_without_trap() {
    let room = RoomData::new().tile(1, 4, 4, 183);
    let err = convert(&bank([1, 0, 0, 0, 0], vec![room])).unwrap_err();
    assert!(matches!(
        err,
        ConvertError::MissingSwitchTrap { switch: 3, x: 4, y: 4, .. }
    ));
}

#[test]
fn test_bad_trap_aborts() {
    let room = RoomData::new().trap([4, 7, 12, 99, 0, 0]);
    let err = convert(&bank([1, 0, 0, 0, 0], vec![room])).unwrap_err();
    assert!(matches!(
        err,
        ConvertError::BadTrap { x: 4, y: 7, major: 12, minor: 99, .. }
    ));
}

#[test]
fn test_trap_without_effect_aborts() {
    let room = RoomData::new().trap([4, 7, 2, 2, 0, 0]);
    let err = convert(&bank([1, 0, 0, 0, 0], vec![room])).unwrap_err();
    assert!(matches!(err, ConvertError::EmptyEffectList { index: 0, .. }));
}

#[test]
fn test_overlapping_rooms_abort() {
    let room = RoomData::new()
        .sub_room([0, 0, 14, 14])
        .sub_room([0, 0, 14, 14])
        .sub_room([2, 2, 5, 5]);
    let err = convert(&bank([1, 0, 0, 0, 0], vec![room])).unwrap_err();
    assert!(matches!(err, ConvertError::RoomsOverlap { .. }));
}

#[test]
fn test_non_wall_border_aborts() {
    let room = RoomData::new().tile(2, 0, 5, FLOOR);
    let err = convert(&bank([1, 0, 0, 0, 0], vec![room])).unwrap_err();
    assert!(matches!(
        err,
        ConvertError::NonWallBorder { x: 0, y: 5, .. }
    ));
}

#[test]
fn test_truncated_bank() {
    let mut data = bank([2, 0, 0, 0, 0], vec![RoomData::new()]);
    data.truncate(data.len() + 500 - ROOM_LEN);
    let err = convert(&data).unwrap_err();
    assert!(matches!(err, ConvertError::ShortRead { .. }));
}

#[test]
fn test_bank_set_first_bank_decoded() {
    let single = bank([1, 0, 0, 0, 0], vec![RoomData::new().sub_room([0, 0, 14, 14])]);
    let mut set = b"AmBs\x00\x01".to_vec();
    set.extend_from_slice(&single);

    assert!(matches!(
        convert(&set),
        Err(ConvertError::UnsupportedMultiBank)
    ));

    let lenient = ConvertConfig {
        reject_multi_bank: false,
        ..ConvertConfig::default()
    };
    let (summary, text) = convert_with(&set, &lenient).unwrap();
    let (_, expected) = convert(&single).unwrap();
    assert_eq!(summary.rooms, 1);
    assert_eq!(summary.segments, 4);
    assert_eq!(text, expected);
}

#[test]
fn test_convert_file() {
    let dir = std::env::temp_dir();
    let input = dir.join("krd_core_convert_file_test.krd");
    let output = dir.join("krd_core_convert_file_test.txt");
    std::fs::write(&input, bank([1, 0, 0, 0, 0], vec![RoomData::new()])).unwrap();

    let summary = krd_core::convert_file(&input, &output, &ConvertConfig::default()).unwrap();
    assert_eq!(summary.segments, 4);
    let text = std::fs::read_to_string(&output).unwrap();
    assert!(text.starts_with("# Room data, imported from KRD."));

    std::fs::remove_file(&input).ok();
    std::fs::remove_file(&output).ok();
}

#[test]
fn test_failed_conversion_writes_nothing() {
    let dir = std::env::temp_dir();
    let input = dir.join("krd_core_failed_conversion_test.krd");
    let output = dir.join("krd_core_failed_conversion_test.txt");
    std::fs::remove_file(&output).ok();

    // the second room breaks after the first one has converted
    let rooms = vec![RoomData::new(), RoomData::new().tile(0, 0, 5, FLOOR)];
    std::fs::write(&input, bank([2, 0, 0, 0, 0], rooms)).unwrap();

    let err = krd_core::convert_file(&input, &output, &ConvertConfig::default()).unwrap_err();
    assert!(matches!(err, ConvertError::NonWallBorder { x: 0, y: 5, .. }));
    assert!(!output.exists());

    std::fs::remove_file(&input).ok();
}
