//! Per-mode acceleration rules
//!
//! Each mode owns one rule that updates vertical velocity, grounding and
//! rotation for a single tick. Clamping and integration happen afterwards in
//! the tick.

use super::state::{Mode, Player};
use crate::consts::*;
use crate::input::InputSignals;
use crate::snap_to_quarter_turn;

/// Apply the active mode's rule to the player
pub fn apply_mode_rule(player: &mut Player, input: &mut InputSignals) {
    let scale = player.gravity_scale();
    let gravity = GRAVITY * scale;

    match player.mode {
        Mode::Cube => {
            player.vel_y += gravity;
            if player.on_ground && input.held {
                player.vel_y = JUMP_FORCE * scale;
                player.on_ground = false;
            }
            if player.on_ground {
                player.rotation = snap_to_quarter_turn(player.rotation);
            } else {
                player.rotation += SPIN_RATE * scale;
            }
        }

        Mode::Ship => {
            player.vel_y += if input.held { SHIP_LIFT } else { SHIP_GRAVITY };
            player.rotation = player.vel_y * SHIP_TILT;
        }

        Mode::Ball => {
            player.vel_y += gravity;
            if player.on_ground && input.jump_edge {
                input.take_jump_edge();
                player.gravity = player.gravity.flipped();
                player.vel_y = BALL_FLIP_IMPULSE * player.gravity_scale();
                player.on_ground = false;
            }
            player.rotation += SPIN_RATE * player.gravity_scale();
        }

        Mode::Ufo => {
            player.vel_y += gravity;
            // Flaps work in mid-air; holding does nothing
            if input.take_jump_edge() {
                player.vel_y = UFO_JUMP;
            }
        }

        Mode::Wave => {
            player.vel_y = if input.held { -WAVE_SPEED } else { WAVE_SPEED };
            player.rotation = player.vel_y * WAVE_TILT;
        }

        Mode::Robot { boost_ticks } => {
            player.vel_y += gravity;
            let boost_ticks = if player.on_ground && input.held {
                player.vel_y = ROBOT_JUMP;
                player.on_ground = false;
                ROBOT_BOOST_TICKS
            } else if input.held && boost_ticks > 0 {
                player.vel_y -= ROBOT_BOOST;
                boost_ticks - 1
            } else if input.held {
                boost_ticks
            } else {
                0
            };
            player.mode = Mode::Robot { boost_ticks };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Gravity;

    fn held() -> InputSignals {
        InputSignals {
            held: true,
            jump_edge: false,
        }
    }

    fn pressed() -> InputSignals {
        InputSignals {
            held: true,
            jump_edge: true,
        }
    }

    #[test]
    fn test_cube_jumps_when_grounded_and_held() {
        let mut player = Player::spawned();
        apply_mode_rule(&mut player, &mut held());
        assert_eq!(player.vel_y, JUMP_FORCE);
        assert!(!player.on_ground);
        // Airborne spin starts on the same tick
        assert_eq!(player.rotation, SPIN_RATE);
    }

    #[test]
    fn test_cube_snaps_rotation_on_ground() {
        let mut player = Player::spawned();
        player.rotation = 95.0;
        apply_mode_rule(&mut player, &mut InputSignals::default());
        assert_eq!(player.rotation, 90.0);
        assert_eq!(player.vel_y, GRAVITY);
    }

    #[test]
    fn test_ship_lifts_and_falls() {
        let mut player = Player::spawned();
        player.mode = Mode::Ship;
        apply_mode_rule(&mut player, &mut held());
        assert_eq!(player.vel_y, SHIP_LIFT);
        assert_eq!(player.rotation, SHIP_LIFT * SHIP_TILT);

        let mut player = Player::spawned();
        player.mode = Mode::Ship;
        apply_mode_rule(&mut player, &mut InputSignals::default());
        assert_eq!(player.vel_y, SHIP_GRAVITY);
    }

    #[test]
    fn test_ball_flips_gravity_on_edge() {
        let mut player = Player::spawned();
        player.mode = Mode::Ball;
        let mut input = pressed();
        apply_mode_rule(&mut player, &mut input);
        assert_eq!(player.gravity, Gravity::Inverted);
        assert_eq!(player.vel_y, -BALL_FLIP_IMPULSE);
        assert!(!player.on_ground);
        assert!(!input.jump_edge, "edge must be consumed");
        assert!(input.held);
    }

    #[test]
    fn test_ball_ignores_hold_without_edge() {
        let mut player = Player::spawned();
        player.mode = Mode::Ball;
        apply_mode_rule(&mut player, &mut held());
        assert_eq!(player.gravity, Gravity::Normal);
    }

    #[test]
    fn test_ball_keeps_edge_while_airborne() {
        let mut player = Player::spawned();
        player.mode = Mode::Ball;
        player.on_ground = false;
        let mut input = pressed();
        apply_mode_rule(&mut player, &mut input);
        assert_eq!(player.gravity, Gravity::Normal);
        assert!(input.jump_edge);
    }

    #[test]
    fn test_ufo_flaps_once_per_press() {
        let mut player = Player::spawned();
        player.mode = Mode::Ufo;
        player.on_ground = false;
        let mut input = pressed();
        apply_mode_rule(&mut player, &mut input);
        assert_eq!(player.vel_y, UFO_JUMP);

        // Still held, no new edge: gravity only
        apply_mode_rule(&mut player, &mut input);
        assert_eq!(player.vel_y, UFO_JUMP + GRAVITY);
    }

    #[test]
    fn test_wave_moves_diagonally() {
        let mut player = Player::spawned();
        player.mode = Mode::Wave;
        player.vel_y = 3.0;
        apply_mode_rule(&mut player, &mut held());
        assert_eq!(player.vel_y, -WAVE_SPEED);
        apply_mode_rule(&mut player, &mut InputSignals::default());
        assert_eq!(player.vel_y, WAVE_SPEED);
        assert_eq!(player.rotation, WAVE_SPEED * WAVE_TILT);
    }

    #[test]
    fn test_robot_jump_starts_boost() {
        let mut player = Player::spawned();
        player.mode = Mode::from(crate::sim::state::ModeKind::Robot);
        apply_mode_rule(&mut player, &mut held());
        assert_eq!(player.vel_y, ROBOT_JUMP);
        assert_eq!(
            player.mode,
            Mode::Robot {
                boost_ticks: ROBOT_BOOST_TICKS
            }
        );
    }

    #[test]
    fn test_robot_release_clears_boost() {
        let mut player = Player::spawned();
        player.on_ground = false;
        player.mode = Mode::Robot { boost_ticks: 9 };
        apply_mode_rule(&mut player, &mut InputSignals::default());
        assert_eq!(player.mode, Mode::Robot { boost_ticks: 0 });
        assert_eq!(player.vel_y, GRAVITY);
    }
}
