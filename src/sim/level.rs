//! Level loading
//!
//! Levels are authored on a tile grid: `x` is the tile column, `y` the tile
//! row counted upward from the ground line, and `t` the kind code (1-8).
//! Loading converts them into world-space collision geometry.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::state::{GeometryObject, ObjectKind};
use crate::consts::*;

/// One authored tile record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileObject {
    pub x: i32,
    pub y: i32,
    pub t: u8,
}

impl TileObject {
    pub const fn new(x: i32, y: i32, t: u8) -> Self {
        Self { x, y, t }
    }
}

/// Errors from parsing authored level data
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("malformed level data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("object #{index} has unknown kind code {code}")]
    UnknownKind { index: usize, code: u8 },
}

/// Geometry ready for simulation
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedLevel {
    pub objects: Vec<GeometryObject>,
    /// Scroll distance at which the level is complete
    pub length: f32,
}

/// Convert one tile record into world geometry
pub fn tile_to_object(kind: ObjectKind, tile: &TileObject) -> GeometryObject {
    let x = tile.x as f32 * BLOCK_SIZE;
    match kind {
        // Portals span the whole playfield so they can't be dodged
        ObjectKind::Portal(_) => GeometryObject {
            pos: Vec2::new(x, 0.0),
            size: Vec2::new(BLOCK_SIZE, GROUND),
            kind,
        },
        ObjectKind::Block | ObjectKind::Spike => GeometryObject {
            pos: Vec2::new(x, GROUND - tile.y as f32 * BLOCK_SIZE - BLOCK_SIZE),
            size: Vec2::splat(BLOCK_SIZE),
            kind,
        },
    }
}

/// Level length: the last authored object's x plus a run-out margin
pub fn level_length(objects: &[GeometryObject]) -> f32 {
    objects
        .last()
        .map(|o| o.pos.x + LEVEL_END_MARGIN)
        .unwrap_or(DEFAULT_LEVEL_LENGTH)
}

/// Load authored tiles, preserving their order
pub fn load_tiles(tiles: &[TileObject]) -> Result<LoadedLevel, LevelError> {
    let objects = tiles
        .iter()
        .enumerate()
        .map(|(index, tile)| {
            ObjectKind::from_code(tile.t)
                .map(|kind| tile_to_object(kind, tile))
                .ok_or(LevelError::UnknownKind {
                    index,
                    code: tile.t,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let length = level_length(&objects);
    Ok(LoadedLevel { objects, length })
}

/// Parse a JSON array of `{x, y, t}` records
pub fn parse_level_json(json: &str) -> Result<LoadedLevel, LevelError> {
    let tiles: Vec<TileObject> = serde_json::from_str(json)?;
    load_tiles(&tiles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Portal;

    #[test]
    fn test_block_world_position() {
        let level = load_tiles(&[TileObject::new(10, 0, 1), TileObject::new(20, 2, 2)]).unwrap();
        let block = level.objects[0];
        assert_eq!(block.kind, ObjectKind::Block);
        assert_eq!(block.pos, Vec2::new(400.0, GROUND - BLOCK_SIZE));
        assert_eq!(block.size, Vec2::new(40.0, 40.0));

        let spike = level.objects[1];
        assert_eq!(spike.kind, ObjectKind::Spike);
        assert_eq!(spike.pos, Vec2::new(800.0, GROUND - 3.0 * BLOCK_SIZE));
    }

    #[test]
    fn test_portal_spans_playfield() {
        let level = load_tiles(&[TileObject::new(100, 3, 3)]).unwrap();
        let portal = level.objects[0];
        assert_eq!(portal.kind, ObjectKind::Portal(Portal::Ship));
        assert_eq!(portal.pos.y, 0.0);
        assert_eq!(portal.size.y, GROUND);
        assert_eq!(portal.size.x, BLOCK_SIZE);
    }

    #[test]
    fn test_level_length_uses_last_authored_object() {
        // Authored order wins even when an earlier object sits further right
        let level = load_tiles(&[TileObject::new(50, 0, 1), TileObject::new(30, 0, 2)]).unwrap();
        assert_eq!(level.length, 30.0 * BLOCK_SIZE + LEVEL_END_MARGIN);
    }

    #[test]
    fn test_empty_level_falls_back_to_default_length() {
        let level = load_tiles(&[]).unwrap();
        assert!(level.objects.is_empty());
        assert_eq!(level.length, DEFAULT_LEVEL_LENGTH);
    }

    #[test]
    fn test_parse_json() {
        let level = parse_level_json(r#"[{"x": 10, "y": 0, "t": 1}, {"x": 12, "y": 0, "t": 6}]"#)
            .unwrap();
        assert_eq!(level.objects.len(), 2);
        assert_eq!(level.objects[1].kind, ObjectKind::Portal(Portal::Ufo));
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let err = parse_level_json(r#"[{"x": 1, "y": 0, "t": 1}, {"x": 2, "y": 0, "t": 9}]"#)
            .unwrap_err();
        assert!(matches!(err, LevelError::UnknownKind { index: 1, code: 9 }));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = parse_level_json("[{\"x\": 1}]").unwrap_err();
        assert!(matches!(err, LevelError::Parse(_)));
    }
}
