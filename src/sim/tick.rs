//! Fixed timestep simulation tick
//!
//! Advances the run by exactly one step. Every tick fully completes
//! (integration, boundary check, collision resolution) before returning.

use super::collision::{CollisionOutcome, resolve_collisions};
use super::movement::apply_mode_rule;
use super::state::{GameEvent, GameState, Gravity, RunPhase};
use crate::consts::*;
use crate::input::InputSignals;

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing ran (menu, or the player is dead)
    Idle,
    /// Advanced normally
    Advanced,
    /// The player died this tick
    Crashed,
    /// The camera passed the end of the level; run returned to the menu
    Completed,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &mut InputSignals) -> TickOutcome {
    if state.player.dead || state.phase != RunPhase::Playing {
        return TickOutcome::Idle;
    }

    state.camera_x += SPEED;

    let player = &mut state.player;
    apply_mode_rule(player, input);

    player.vel_y = player.vel_y.clamp(-TERMINAL_VEL, TERMINAL_VEL);
    player.y += player.vel_y;

    // Flew off the top or fell through the floor with nothing underneath
    if player.y < -BOUNDARY_TOLERANCE || player.y > GROUND + BOUNDARY_TOLERANCE {
        state.crash();
        return TickOutcome::Crashed;
    }

    player.on_ground = false;
    if player.mode.kind().is_ground_bound() {
        match player.gravity {
            Gravity::Normal if player.bottom() >= GROUND => {
                player.y = GROUND - player.size;
                player.vel_y = 0.0;
                player.on_ground = true;
            }
            Gravity::Inverted if player.y <= 0.0 => {
                player.y = 0.0;
                player.vel_y = 0.0;
                player.on_ground = true;
            }
            _ => {}
        }
    }

    let outcome = resolve_collisions(
        &mut state.player,
        &state.objects,
        state.camera_x,
        &mut state.events,
    );
    if outcome == CollisionOutcome::Crashed {
        state.crash();
        return TickOutcome::Crashed;
    }

    if state.camera_x > state.level_length {
        state.phase = RunPhase::Menu;
        state.events.push(GameEvent::LevelComplete {
            level_index: state.level_index,
            attempts: state.attempts,
        });
        log::info!(
            "Level {} complete after {} attempts",
            state.level_index + 1,
            state.attempts
        );
        return TickOutcome::Completed;
    }

    TickOutcome::Advanced
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::{TileObject, load_tiles};
    use crate::sim::state::{Mode, ModeKind};
    use proptest::prelude::*;

    fn playing(tiles: &[TileObject]) -> GameState {
        let mut state = GameState::new();
        state.start(0, load_tiles(tiles).unwrap());
        state
    }

    #[test]
    fn test_idle_in_menu_and_when_dead() {
        let mut state = GameState::new();
        let mut input = InputSignals::default();
        assert_eq!(tick(&mut state, &mut input), TickOutcome::Idle);
        assert_eq!(state.camera_x, 0.0);

        let mut state = playing(&[]);
        state.crash();
        assert_eq!(tick(&mut state, &mut input), TickOutcome::Idle);
        assert_eq!(state.camera_x, 0.0);
    }

    #[test]
    fn test_cube_rests_on_ground() {
        let mut state = playing(&[]);
        let mut input = InputSignals::default();
        for _ in 0..10 {
            assert_eq!(tick(&mut state, &mut input), TickOutcome::Advanced);
        }
        assert!(state.player.on_ground);
        assert_eq!(state.player.vel_y, 0.0);
        assert_eq!(state.player.bottom(), GROUND);
        assert!((state.camera_x - 10.0 * SPEED).abs() < 1e-3);
    }

    #[test]
    fn test_cube_jump_arc_returns_to_ground() {
        let mut state = playing(&[]);
        let mut input = InputSignals::default();
        input.press();
        tick(&mut state, &mut input);
        assert!(!state.player.on_ground);
        assert!(state.player.y < GROUND - PLAYER_SIZE);
        input.release();

        let mut landed = false;
        for _ in 0..60 {
            tick(&mut state, &mut input);
            if state.player.on_ground {
                landed = true;
                break;
            }
        }
        assert!(landed);
        assert_eq!(state.player.bottom(), GROUND);

        // Spin snaps to a quarter turn on the next grounded tick
        tick(&mut state, &mut input);
        assert_eq!(state.player.rotation % 90.0, 0.0);
    }

    #[test]
    fn test_ship_dies_below_floor() {
        let mut state = playing(&[]);
        state.player.mode = Mode::Ship;
        let mut input = InputSignals::default();
        let mut crashed = false;
        for _ in 0..120 {
            if tick(&mut state, &mut input) == TickOutcome::Crashed {
                crashed = true;
                break;
            }
        }
        assert!(crashed);
        assert!(state.player.dead);
        assert_eq!(state.attempts, 2);
    }

    #[test]
    fn test_ship_dies_above_ceiling() {
        let mut state = playing(&[]);
        state.player.mode = Mode::Ship;
        let mut input = InputSignals::default();
        input.press();
        let mut outcome = TickOutcome::Advanced;
        for _ in 0..300 {
            outcome = tick(&mut state, &mut input);
            if outcome != TickOutcome::Advanced {
                break;
            }
        }
        assert_eq!(outcome, TickOutcome::Crashed);
        assert!(state.player.y < -BOUNDARY_TOLERANCE);
    }

    #[test]
    fn test_landing_on_block_from_above_survives() {
        // Floating block one row up
        let mut state = playing(&[TileObject::new(12, 1, 1)]);
        let block_top = GROUND - 2.0 * BLOCK_SIZE;
        let mut input = InputSignals::default();
        let mut landed = false;
        for i in 0..80 {
            // Timed so the cube comes down onto the block's top face
            if i == 16 {
                input.press();
            } else {
                input.release();
            }
            let outcome = tick(&mut state, &mut input);
            assert_ne!(outcome, TickOutcome::Crashed, "tick {i}");
            if state.player.on_ground && state.player.bottom() == block_top {
                landed = true;
                assert_eq!(state.player.vel_y, 0.0);
            }
        }
        assert!(landed);
    }

    #[test]
    fn test_running_into_block_side_crashes() {
        let mut state = playing(&[TileObject::new(8, 0, 1)]);
        let mut input = InputSignals::default();
        let mut outcome = TickOutcome::Advanced;
        for _ in 0..60 {
            outcome = tick(&mut state, &mut input);
            if outcome != TickOutcome::Advanced {
                break;
            }
        }
        assert_eq!(outcome, TickOutcome::Crashed);
        assert_eq!(state.attempts, 2);
    }

    #[test]
    fn test_wave_touching_block_crashes_exactly_once() {
        let mut state = playing(&[TileObject::new(6, 0, 1)]);
        state.player.mode = Mode::Wave;
        let mut input = InputSignals::default();
        input.press();
        let mut crashes = 0;
        for _ in 0..120 {
            if tick(&mut state, &mut input) == TickOutcome::Crashed {
                crashes += 1;
            }
        }
        assert_eq!(crashes, 1);
        assert_eq!(state.attempts, 2);
        let crash_events = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::Crashed { .. }))
            .count();
        assert_eq!(crash_events, 1);
    }

    #[test]
    fn test_portal_switches_mode_mid_run() {
        let mut state = playing(&[TileObject::new(6, 3, 3)]);
        let mut input = InputSignals::default();
        for _ in 0..3 {
            tick(&mut state, &mut input);
        }
        assert_eq!(state.player.mode, Mode::Ship);
        assert!(!state.player.dead);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::ModeChanged(ModeKind::Ship)]
        );
    }

    #[test]
    fn test_robot_boost_runs_fifteen_ticks() {
        let mut state = playing(&[]);
        state.player.mode = Mode::Robot { boost_ticks: 0 };
        let mut input = InputSignals::default();
        input.press();

        tick(&mut state, &mut input);
        assert_eq!(state.player.vel_y, ROBOT_JUMP);
        assert_eq!(
            state.player.mode,
            Mode::Robot {
                boost_ticks: ROBOT_BOOST_TICKS
            }
        );

        for n in 1..=ROBOT_BOOST_TICKS {
            let before = state.player.vel_y;
            tick(&mut state, &mut input);
            let expected = (before + GRAVITY - ROBOT_BOOST).clamp(-TERMINAL_VEL, TERMINAL_VEL);
            assert!((state.player.vel_y - expected).abs() < 1e-5, "boost {n}");
            assert_eq!(
                state.player.mode,
                Mode::Robot {
                    boost_ticks: ROBOT_BOOST_TICKS - n
                }
            );
        }

        // Timer spent: gravity only even though still held
        let before = state.player.vel_y;
        tick(&mut state, &mut input);
        assert!((state.player.vel_y - (before + GRAVITY)).abs() < 1e-5);
    }

    #[test]
    fn test_ball_flips_to_ceiling() {
        let mut state = playing(&[]);
        state.player.mode = Mode::Ball;
        let mut input = InputSignals::default();
        input.press();
        tick(&mut state, &mut input);
        assert_eq!(state.player.gravity, Gravity::Inverted);
        assert!(state.player.vel_y < 0.0);
        assert!(!input.jump_edge);
    }

    #[test]
    fn test_camera_past_level_end_completes_without_death() {
        let mut state = playing(&[]);
        state.level_length = 3.0 * SPEED - 1.0;
        let mut input = InputSignals::default();
        assert_eq!(tick(&mut state, &mut input), TickOutcome::Advanced);
        assert_eq!(tick(&mut state, &mut input), TickOutcome::Advanced);
        assert_eq!(tick(&mut state, &mut input), TickOutcome::Completed);
        assert_eq!(state.phase, RunPhase::Menu);
        assert!(!state.player.dead);
        assert_eq!(state.attempts, 1);
        assert_eq!(state.progress(), 1.0);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::LevelComplete {
                level_index: 0,
                attempts: 1
            }]
        );
        assert_eq!(tick(&mut state, &mut input), TickOutcome::Idle);
    }

    fn any_mode() -> impl Strategy<Value = Mode> {
        prop_oneof![
            Just(Mode::Cube),
            Just(Mode::Ship),
            Just(Mode::Ball),
            Just(Mode::Ufo),
            Just(Mode::Wave),
            (0..=ROBOT_BOOST_TICKS).prop_map(|boost_ticks| Mode::Robot { boost_ticks }),
        ]
    }

    proptest! {
        #[test]
        fn velocity_never_exceeds_terminal(
            mode in any_mode(),
            vel in -40.0f32..40.0,
            y in 0.0f32..GROUND - PLAYER_SIZE,
            on_ground in any::<bool>(),
            inverted in any::<bool>(),
            presses in prop::collection::vec(any::<bool>(), 1..60),
        ) {
            let mut state = playing(&[]);
            state.player.mode = mode;
            state.player.vel_y = vel;
            state.player.y = y;
            state.player.on_ground = on_ground;
            if inverted {
                state.player.gravity = Gravity::Inverted;
            }
            let mut input = InputSignals::default();
            for press in presses {
                if press { input.press() } else { input.release() }
                tick(&mut state, &mut input);
                prop_assert!(state.player.vel_y.abs() <= TERMINAL_VEL);
            }
        }

        #[test]
        fn grounded_means_flush_and_still(
            mode in any_mode(),
            presses in prop::collection::vec(any::<bool>(), 1..120),
        ) {
            let mut state = playing(&[TileObject::new(9, 1, 1), TileObject::new(14, 2, 1)]);
            state.player.mode = mode;
            let tops = [GROUND, GROUND - 2.0 * BLOCK_SIZE, GROUND - 3.0 * BLOCK_SIZE];
            let undersides = [0.0, GROUND - BLOCK_SIZE, GROUND - 2.0 * BLOCK_SIZE];
            let mut input = InputSignals::default();
            for press in presses {
                if press { input.press() } else { input.release() }
                if tick(&mut state, &mut input) != TickOutcome::Advanced {
                    break;
                }
                let p = &state.player;
                if p.on_ground {
                    prop_assert_eq!(p.vel_y, 0.0);
                    let flush = match p.gravity {
                        Gravity::Normal => tops.contains(&p.bottom()),
                        Gravity::Inverted => undersides.contains(&p.y),
                    };
                    prop_assert!(flush, "y={} gravity={:?}", p.y, p.gravity);
                }
            }
        }
    }
}
