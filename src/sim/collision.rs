//! Collision detection and response against level geometry
//!
//! The tricky part is telling a legitimate landing on top of a block apart
//! from running into its side: both overlap on the same tick. The test uses
//! the player's position before this tick's integration and the direction of
//! travel, with a fixed tolerance window on the block face.

use super::state::{GameEvent, Gravity, GeometryObject, Mode, ModeKind, ObjectKind, Player};
use crate::consts::*;
use crate::snap_to_quarter_turn;

/// Axis-aligned rectangle in world space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Rect {
    /// Strict overlap: touching edges don't count
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.right > other.left
            && self.left < other.right
            && self.bottom > other.top
            && self.top < other.bottom
    }

    pub fn of_object(obj: &GeometryObject) -> Self {
        Self {
            left: obj.pos.x,
            right: obj.pos.x + obj.size.x,
            top: obj.pos.y,
            bottom: obj.pos.y + obj.size.y,
        }
    }
}

/// Player hitbox in world space, inset from the sprite on every side
pub fn player_hitbox(player: &Player, camera_x: f32) -> Rect {
    let left = camera_x + player.x;
    Rect {
        left: left + HITBOX_INSET,
        right: left + player.size - HITBOX_INSET,
        top: player.y + HITBOX_INSET,
        bottom: player.y + player.size - HITBOX_INSET,
    }
}

/// Whether an object is inside the candidate window around the camera.
///
/// Anything the hitbox can reach lies strictly inside this window, so the
/// window only saves work.
#[inline]
pub fn in_window(obj: &GeometryObject, camera_x: f32) -> bool {
    obj.pos.x > camera_x + COLLISION_WINDOW_MIN && obj.pos.x < camera_x + COLLISION_WINDOW_MAX
}

/// How a block contact was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockContact {
    /// Came down on top (or up onto the underside when inverted)
    Landed,
    /// Rose into the underside under normal gravity
    CeilingBump,
    /// Side hit, corner clip or wave contact
    Crash,
}

/// Result of resolving every overlap for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionOutcome {
    Clear,
    Crashed,
}

/// Resolve an overlapping block against the player
pub fn resolve_block(player: &mut Player, block: &GeometryObject) -> BlockContact {
    if player.mode.kind() == ModeKind::Wave {
        return BlockContact::Crash;
    }

    let prev_y = player.y - player.vel_y;

    match player.gravity {
        Gravity::Normal => {
            if prev_y + player.size <= block.top() + LANDING_TOLERANCE && player.vel_y >= 0.0 {
                player.y = block.top() - player.size;
                player.vel_y = 0.0;
                player.on_ground = true;
                if matches!(player.mode, Mode::Cube | Mode::Robot { .. }) {
                    player.rotation = snap_to_quarter_turn(player.rotation);
                }
                BlockContact::Landed
            } else if prev_y >= block.bottom() - LANDING_TOLERANCE && player.vel_y < 0.0 {
                player.y = block.bottom();
                player.vel_y = 0.0;
                BlockContact::CeilingBump
            } else {
                BlockContact::Crash
            }
        }
        Gravity::Inverted => {
            if prev_y >= block.bottom() - LANDING_TOLERANCE && player.vel_y <= 0.0 {
                player.y = block.bottom();
                player.vel_y = 0.0;
                player.on_ground = true;
                BlockContact::Landed
            } else {
                BlockContact::Crash
            }
        }
    }
}

/// Switch mode from a portal. Gravity always returns to normal; the mode
/// (and its transient state) is only replaced when the kind differs.
pub fn enter_portal(player: &mut Player, target: ModeKind) -> bool {
    player.gravity = Gravity::Normal;
    if player.mode.kind() == target {
        return false;
    }
    player.mode = Mode::from(target);
    true
}

/// Resolve every overlapping object for this tick, in authored order.
///
/// The hitbox is taken once, before any snapping. Resolution stops at the
/// first fatal contact.
pub fn resolve_collisions(
    player: &mut Player,
    objects: &[GeometryObject],
    camera_x: f32,
    events: &mut Vec<GameEvent>,
) -> CollisionOutcome {
    let hitbox = player_hitbox(player, camera_x);

    for obj in objects.iter().filter(|o| in_window(o, camera_x)) {
        if !hitbox.overlaps(&Rect::of_object(obj)) {
            continue;
        }

        match obj.kind {
            ObjectKind::Spike => return CollisionOutcome::Crashed,
            ObjectKind::Portal(portal) => {
                let target = portal.target();
                if enter_portal(player, target) {
                    log::debug!("Portal at x={} -> {}", obj.pos.x, target.name());
                    events.push(GameEvent::ModeChanged(target));
                }
            }
            ObjectKind::Block => {
                if resolve_block(player, obj) == BlockContact::Crash {
                    return CollisionOutcome::Crashed;
                }
            }
        }
    }

    CollisionOutcome::Clear
}
