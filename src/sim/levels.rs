//! Built-in level catalog
//!
//! Levels are assembled from a handful of terrain helpers. Rows count upward
//! from the ground; the playfield is 16 rows tall.

use super::level::TileObject;

/// Rows between the ground line and the top of the playfield
const ROWS: i32 = 16;

const BLOCK: u8 = 1;
const SPIKE: u8 = 2;
const SHIP: u8 = 3;
const CUBE: u8 = 4;
const BALL: u8 = 5;
const UFO: u8 = 6;
const WAVE: u8 = 7;
const ROBOT: u8 = 8;

/// Display metadata for a built-in level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelInfo {
    pub name: &'static str,
    /// Background clear color (linear RGBA)
    pub background: [f32; 4],
}

const fn rgb(r: u8, g: u8, b: u8) -> [f32; 4] {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

/// Built-in levels, in menu order
pub const LEVELS: [LevelInfo; 10] = [
    LevelInfo {
        name: "Stereo Madness",
        background: rgb(0x3b, 0x5d, 0xdb),
    },
    LevelInfo {
        name: "Back on Track",
        background: rgb(0xd0, 0x42, 0xda),
    },
    LevelInfo {
        name: "Polargeist",
        background: rgb(0x2e, 0xcc, 0x71),
    },
    LevelInfo {
        name: "Dry Out",
        background: rgb(0xc0, 0x39, 0x2b),
    },
    LevelInfo {
        name: "Base After Base",
        background: rgb(0x34, 0x49, 0x5e),
    },
    LevelInfo {
        name: "Can't Let Go",
        background: rgb(0x8e, 0x44, 0xad),
    },
    LevelInfo {
        name: "Jumper",
        background: rgb(0x34, 0x98, 0xdb),
    },
    LevelInfo {
        name: "Time Machine",
        background: rgb(0xe6, 0x7e, 0x22),
    },
    LevelInfo {
        name: "Cycles",
        background: rgb(0x1a, 0xbc, 0x9c),
    },
    LevelInfo {
        name: "xStep",
        background: rgb(0xf1, 0xc4, 0x0f),
    },
];

/// Background for the menu and unknown levels
pub const DEFAULT_BACKGROUND: [f32; 4] = rgb(0x00, 0x11, 0x33);

pub fn level_count() -> usize {
    LEVELS.len()
}

pub fn level_info(index: usize) -> Option<&'static LevelInfo> {
    LEVELS.get(index)
}

fn t(x: i32, y: i32, kind: u8) -> TileObject {
    TileObject::new(x, y, kind)
}

/// Floor and ceiling walls with a spike lining each face
fn tunnel(start: i32, length: i32, floor_h: i32, ceil_h: i32) -> Vec<TileObject> {
    let mut tiles = Vec::new();
    for i in 0..length {
        let x = start + i;
        tiles.extend((0..floor_h).map(|y| t(x, y, BLOCK)));
        tiles.extend((ceil_h..ROWS).map(|y| t(x, y, BLOCK)));
        tiles.push(t(x, floor_h, SPIKE));
        tiles.push(t(x, ceil_h - 1, SPIKE));
    }
    tiles
}

/// Floating ledge with spikes above and below
fn platform(x: i32, y: i32, width: i32) -> Vec<TileObject> {
    let mut tiles = Vec::new();
    for i in 0..width {
        tiles.push(t(x + i, y, BLOCK));
        tiles.push(t(x + i, y + 1, SPIKE));
        tiles.push(t(x + i, y - 1, SPIKE));
    }
    tiles
}

/// Corridor of `gap` rows starting at `y_level`
fn wave_path(start: i32, length: i32, y_level: i32, gap: i32) -> Vec<TileObject> {
    let mut tiles = Vec::new();
    for i in 0..length {
        let x = start + i;
        tiles.extend((0..y_level).map(|y| t(x, y, BLOCK)));
        tiles.extend((y_level + gap..ROWS).map(|y| t(x, y, BLOCK)));
    }
    tiles
}

fn pillar(x: i32, height: i32) -> Vec<TileObject> {
    (0..height).map(|y| t(x, y, BLOCK)).collect()
}

/// Two-row gap between pillars; the lower pillar is capped with a spike
fn ufo_gate(x: i32, gap_level: i32) -> Vec<TileObject> {
    let mut tiles: Vec<TileObject> = (0..=gap_level).map(|y| t(x, y, BLOCK)).collect();
    tiles.push(t(x, gap_level + 1, SPIKE));
    tiles.extend((gap_level + 4..ROWS).map(|y| t(x, y, BLOCK)));
    tiles
}

/// Authored tiles for a built-in level
pub fn level_tiles(index: usize) -> Option<Vec<TileObject>> {
    let parts: Vec<Vec<TileObject>> = match index {
        0 => vec![
            vec![t(10, 0, BLOCK), t(20, 1, BLOCK), t(25, 2, BLOCK)],
            vec![t(35, 0, SPIKE), t(45, 0, SPIKE)],
            vec![t(60, 0, BLOCK), t(65, 1, SPIKE)],
            vec![t(80, 0, SPIKE), t(81, 0, SPIKE), t(82, 0, SPIKE)],
            vec![t(100, 3, SHIP)],
            tunnel(110, 20, 1, 12),
            vec![t(170, 3, CUBE)],
            vec![t(180, 0, BLOCK), t(185, 1, SPIKE), t(190, 2, BLOCK)],
            vec![t(210, 0, SPIKE), t(211, 0, SPIKE)],
        ],
        1 => vec![
            vec![t(10, 0, BLOCK), t(15, 1, BLOCK), t(20, 2, BLOCK)],
            vec![t(30, 0, SPIKE), t(32, 0, SPIKE)],
            vec![t(45, 4, BLOCK), t(55, 2, BLOCK), t(65, 0, BLOCK)],
            vec![t(80, 0, SPIKE), t(81, 0, SPIKE), t(82, 0, SPIKE)],
            vec![t(100, 4, SHIP)],
            tunnel(105, 10, 2, 11),
            tunnel(120, 10, 3, 10),
            vec![t(150, 0, CUBE)],
            vec![t(160, 0, BLOCK), t(170, 1, BLOCK), t(180, 2, SPIKE)],
        ],
        2 => vec![
            vec![t(10, 0, SPIKE), t(12, 0, SPIKE)],
            vec![t(20, 1, BLOCK), t(25, 3, BLOCK), t(30, 2, SPIKE)],
            vec![t(50, 4, BALL)],
            platform(60, 3, 3),
            platform(70, 6, 3),
            platform(80, 3, 3),
            vec![t(100, 5, SHIP)],
            tunnel(105, 30, 2, 10),
            vec![t(190, 0, CUBE)],
            vec![t(200, 0, SPIKE), t(201, 0, SPIKE)],
        ],
        3 => vec![
            vec![t(10, 0, BLOCK), t(15, 0, SPIKE)],
            vec![t(40, 0, BALL)],
            vec![t(50, 0, BLOCK), t(55, 0, SPIKE)],
            vec![t(65, 6, BLOCK), t(70, 6, BLOCK), t(75, 0, SPIKE)],
            vec![t(90, 0, UFO)],
            ufo_gate(100, 2),
            ufo_gate(115, 5),
            ufo_gate(130, 3),
            ufo_gate(145, 6),
            vec![t(160, 0, CUBE)],
            vec![t(170, 0, SPIKE)],
        ],
        4 => vec![
            vec![t(10, 0, BLOCK), t(10, 1, BLOCK)],
            vec![t(30, 0, SPIKE), t(32, 0, SPIKE)],
            vec![t(70, 4, SHIP)],
            tunnel(75, 10, 2, 9),
            tunnel(90, 10, 5, 12),
            tunnel(105, 10, 2, 9),
            vec![t(140, 0, CUBE)],
            vec![t(150, 0, BLOCK), t(160, 2, BLOCK)],
        ],
        5 => vec![
            vec![t(10, 0, BLOCK), t(15, 2, BLOCK), t(20, 4, BLOCK)],
            vec![t(50, 0, BALL)],
            platform(60, 4, 3),
            platform(75, 7, 3),
            platform(90, 4, 3),
            vec![t(120, 0, CUBE)],
            vec![t(130, 2, BLOCK), t(140, 3, BLOCK), t(150, 4, BLOCK)],
            vec![t(165, 4, SPIKE), t(175, 2, BLOCK)],
        ],
        6 => vec![
            vec![t(10, 0, ROBOT)],
            pillar(20, 2),
            pillar(35, 3),
            pillar(50, 4),
            vec![t(60, 0, SPIKE), t(62, 0, SPIKE)],
            vec![t(80, 4, SHIP)],
            tunnel(85, 30, 3, 9),
            vec![t(150, 0, CUBE)],
            vec![t(160, 0, BLOCK), t(170, 2, BLOCK)],
        ],
        7 => vec![
            vec![t(10, 0, BLOCK), t(20, 0, SPIKE)],
            vec![t(40, 0, BALL)],
            platform(50, 4, 2),
            platform(60, 4, 2),
            platform(70, 4, 2),
            vec![t(100, 0, ROBOT)],
            pillar(110, 3),
            pillar(125, 4),
            pillar(140, 5),
            vec![t(160, 0, CUBE)],
        ],
        8 => vec![
            vec![t(10, 0, BALL)],
            vec![t(20, 0, BLOCK), t(30, 7, BLOCK)],
            vec![t(40, 1, SPIKE), t(50, 6, SPIKE)],
            vec![t(70, 4, UFO)],
            ufo_gate(80, 2),
            ufo_gate(90, 4),
            ufo_gate(100, 2),
            ufo_gate(110, 5),
            ufo_gate(120, 3),
            vec![t(140, 3, SHIP)],
            tunnel(145, 30, 4, 10),
            vec![t(190, 0, CUBE)],
        ],
        9 => vec![
            vec![t(10, 0, BLOCK), t(15, 1, BLOCK)],
            vec![t(30, 0, UFO)],
            ufo_gate(40, 2),
            ufo_gate(50, 2),
            ufo_gate(60, 5),
            ufo_gate(70, 5),
            ufo_gate(80, 2),
            vec![t(100, 4, WAVE)],
            wave_path(105, 10, 3, 5),
            wave_path(115, 10, 5, 5),
            wave_path(125, 10, 2, 5),
            wave_path(135, 15, 4, 4),
            vec![t(160, 0, ROBOT)],
            pillar(170, 3),
            pillar(185, 5),
            vec![t(210, 3, SHIP)],
            tunnel(215, 20, 3, 9),
        ],
        _ => return None,
    };

    Some(parts.concat())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::load_tiles;

    #[test]
    fn test_every_level_loads() {
        for index in 0..level_count() {
            let tiles = level_tiles(index).unwrap();
            let level = load_tiles(&tiles).unwrap();
            assert!(!level.objects.is_empty(), "level {index} is empty");
            assert!(level.length > 0.0);
        }
        assert!(level_tiles(level_count()).is_none());
    }

    #[test]
    fn test_ufo_gate_leaves_two_row_gap() {
        let gate = ufo_gate(100, 2);
        let rows: Vec<i32> = gate.iter().map(|o| o.y).collect();
        assert!(!rows.contains(&4));
        assert!(!rows.contains(&5));
        assert!(gate.contains(&TileObject::new(100, 3, SPIKE)));
        assert!(gate.contains(&TileObject::new(100, 6, BLOCK)));
    }

    #[test]
    fn test_tunnel_lines_both_faces_with_spikes() {
        let tiles = tunnel(0, 1, 1, 12);
        assert!(tiles.contains(&TileObject::new(0, 1, SPIKE)));
        assert!(tiles.contains(&TileObject::new(0, 11, SPIKE)));
        // floor (1) + ceiling (12..16) + two spikes
        assert_eq!(tiles.len(), 1 + 4 + 2);
    }

    #[test]
    fn test_first_level_ends_after_final_spikes() {
        let level = load_tiles(&level_tiles(0).unwrap()).unwrap();
        assert_eq!(level.length, 211.0 * 40.0 + 500.0);
    }
}
