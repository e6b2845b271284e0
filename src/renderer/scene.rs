//! Scene building
//!
//! Turns a read-only view of the game state into a triangle list. Kept free
//! of GPU types so it can be tested natively.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{GameState, Gravity, GeometryObject, ModeKind, ObjectKind, player_hitbox};

/// Objects this far outside the screen are skipped
const CULL_MARGIN: f32 = 50.0;

/// Whether an object at world x is on or near the screen
fn visible(obj: &GeometryObject, camera_x: f32) -> bool {
    let draw_x = obj.pos.x - camera_x;
    draw_x > -CULL_MARGIN && draw_x < VIEW_WIDTH + CULL_MARGIN
}

fn ground(out: &mut Vec<Vertex>) {
    shapes::rect(
        out,
        Vec2::new(0.0, GROUND),
        Vec2::new(VIEW_WIDTH, VIEW_HEIGHT - GROUND),
        colors::GROUND,
    );
    shapes::rect(
        out,
        Vec2::new(0.0, GROUND - 1.0),
        Vec2::new(VIEW_WIDTH, 2.0),
        colors::GROUND_LINE,
    );
}

fn object(out: &mut Vec<Vertex>, obj: &GeometryObject, camera_x: f32, gravity: Gravity) {
    let min = Vec2::new(obj.pos.x - camera_x, obj.pos.y);
    let size = obj.size;
    match obj.kind {
        ObjectKind::Block => {
            shapes::rect(out, min, size, colors::BLOCK_FILL);
            shapes::rect_outline(out, min, size, 2.0, colors::BLOCK_EDGE);
        }
        ObjectKind::Spike => {
            // Spikes point away from whichever surface the player falls toward
            let (base_y, tip_y) = match gravity {
                Gravity::Normal => (min.y + size.y, min.y),
                Gravity::Inverted => (min.y, min.y + size.y),
            };
            shapes::triangle(
                out,
                Vec2::new(min.x, base_y),
                Vec2::new(min.x + size.x / 2.0, tip_y),
                Vec2::new(min.x + size.x, base_y),
                colors::SPIKE,
            );
        }
        ObjectKind::Portal(portal) => {
            shapes::rect(out, min, size, colors::portal(portal));
        }
    }
}

fn player(out: &mut Vec<Vertex>, state: &GameState) {
    let p = &state.player;
    let center = Vec2::new(p.x + p.size / 2.0, p.y + p.size / 2.0);
    let kind = p.mode.kind();
    let body = if kind == ModeKind::Ship {
        colors::PLAYER_SHIP
    } else {
        colors::PLAYER
    };

    if kind == ModeKind::Wave {
        let h = p.size / 2.0;
        shapes::rotated_polygon(
            out,
            center,
            &[Vec2::new(-h, -h), Vec2::new(h, 0.0), Vec2::new(-h, h)],
            p.rotation,
            body,
        );
        return;
    }

    shapes::rotated_square(out, center, p.size, p.rotation, body);
    // Inner frame and eye
    for band in inner_frame(p.size / 2.0 - 5.0, 2.0) {
        shapes::rotated_polygon(out, center, &band, p.rotation, colors::PLAYER_DETAIL);
    }
    shapes::rotated_polygon(
        out,
        center,
        &[
            Vec2::new(5.0, -5.0),
            Vec2::new(10.0, -5.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(5.0, 0.0),
        ],
        p.rotation,
        colors::PLAYER_DETAIL,
    );
}

/// Four bands of a square frame in local coordinates, `width` thick inside
/// the square of half-size `half`
fn inner_frame(half: f32, width: f32) -> [[Vec2; 4]; 4] {
    let inner = half - width;
    let band = |x0: f32, y0: f32, x1: f32, y1: f32| {
        [
            Vec2::new(x0, y0),
            Vec2::new(x1, y0),
            Vec2::new(x1, y1),
            Vec2::new(x0, y1),
        ]
    };
    [
        band(-half, -half, half, -inner),
        band(-half, inner, half, half),
        band(-half, -inner, -inner, inner),
        band(inner, -inner, half, inner),
    ]
}

fn particles(out: &mut Vec<Vertex>, state: &GameState) {
    for particle in &state.particles {
        let alpha = particle.life.clamp(0.0, 1.0);
        shapes::circle(
            out,
            particle.pos,
            particle.size / 2.0,
            colors::with_alpha(colors::PARTICLE, alpha),
            6,
        );
    }
}

fn hitboxes(out: &mut Vec<Vertex>, state: &GameState) {
    let hb = player_hitbox(&state.player, state.camera_x);
    shapes::rect_outline(
        out,
        Vec2::new(hb.left - state.camera_x, hb.top),
        Vec2::new(hb.right - hb.left, hb.bottom - hb.top),
        1.0,
        colors::HITBOX,
    );
}

/// Build the full frame
pub fn build_scene(state: &GameState, settings: &Settings) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(1024);

    ground(&mut out);

    for obj in state.objects.iter().filter(|o| visible(o, state.camera_x)) {
        object(&mut out, obj, state.camera_x, state.player.gravity);
    }

    if !state.player.dead {
        player(&mut out, state);
        if settings.show_hitboxes {
            hitboxes(&mut out, state);
        }
    }

    if settings.effective_particles() {
        particles(&mut out, state);
    }

    if state.flash > 0.0 && settings.effective_crash_flash() {
        shapes::rect(
            &mut out,
            Vec2::ZERO,
            Vec2::new(VIEW_WIDTH, VIEW_HEIGHT),
            colors::CRASH_FLASH,
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Mode, TileObject, load_tiles};

    fn state_with(tiles: &[TileObject]) -> GameState {
        let mut state = GameState::new();
        state.start(0, load_tiles(tiles).unwrap());
        state
    }

    fn vertices_with_color(vertices: &[Vertex], color: [f32; 4]) -> Vec<Vertex> {
        vertices.iter().copied().filter(|v| v.color == color).collect()
    }

    #[test]
    fn test_spike_flips_with_gravity() {
        let mut state = state_with(&[TileObject::new(10, 0, 2)]);
        let settings = Settings::default();

        let spike = vertices_with_color(&build_scene(&state, &settings), colors::SPIKE);
        assert_eq!(spike.len(), 3);
        // Tip at the top of the tile
        assert_eq!(spike[1].position, [420.0, 530.0]);

        state.player.gravity = Gravity::Inverted;
        let spike = vertices_with_color(&build_scene(&state, &settings), colors::SPIKE);
        assert_eq!(spike[1].position, [420.0, 570.0]);
    }

    #[test]
    fn test_offscreen_objects_culled() {
        let state = state_with(&[TileObject::new(100, 0, 2)]);
        let scene = build_scene(&state, &Settings::default());
        assert!(vertices_with_color(&scene, colors::SPIKE).is_empty());
    }

    #[test]
    fn test_wave_drawn_as_dart() {
        let mut state = state_with(&[]);
        state.player.mode = Mode::Wave;
        let scene = build_scene(&state, &Settings::default());
        assert_eq!(vertices_with_color(&scene, colors::PLAYER).len(), 3);

        state.player.mode = Mode::Cube;
        let scene = build_scene(&state, &Settings::default());
        assert_eq!(vertices_with_color(&scene, colors::PLAYER).len(), 6);
    }

    #[test]
    fn test_dead_player_hidden_and_flash_drawn() {
        let mut state = state_with(&[]);
        state.crash();
        let settings = Settings::default();
        let scene = build_scene(&state, &settings);
        assert!(vertices_with_color(&scene, colors::PLAYER).is_empty());
        assert_eq!(vertices_with_color(&scene, colors::CRASH_FLASH).len(), 6);

        let calm = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        let scene = build_scene(&state, &calm);
        assert!(vertices_with_color(&scene, colors::CRASH_FLASH).is_empty());
        assert!(scene.len() < build_scene(&state, &settings).len());
    }

    #[test]
    fn test_hitbox_overlay_optional() {
        let state = state_with(&[]);
        let plain = build_scene(&state, &Settings::default());
        assert!(vertices_with_color(&plain, colors::HITBOX).is_empty());

        let debug = Settings {
            show_hitboxes: true,
            ..Default::default()
        };
        let scene = build_scene(&state, &debug);
        let hitbox = vertices_with_color(&scene, colors::HITBOX);
        assert_eq!(hitbox.len(), 24);
        // Inset by 8 on each side of the 30px sprite at x=200
        assert!(hitbox.iter().all(|v| (208.0..=222.0).contains(&v.position[0])));
    }
}
