//! Tile Dash - A side-scrolling rhythm platformer
//!
//! Core modules:
//! - `sim`: Fixed-timestep simulation (physics, collisions, death/respawn)
//! - `session`: Run lifecycle, loop driving and deferred respawn
//! - `input`: Held / jump-edge input signals
//! - `renderer`: WebGPU rendering pipeline (read-only view of the sim)
//! - `settings`, `records`: Persisted preferences and per-level bests

pub mod input;
pub mod records;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use input::InputSignals;
pub use records::LevelRecords;
pub use session::{Hud, Session, SessionError};
pub use settings::Settings;

/// Game configuration constants
///
/// Units are pixels and ticks; velocities are pixels per tick.
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Longest wall-clock frame fed to the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Playfield size in pixels
    pub const VIEW_WIDTH: f32 = 1280.0;
    pub const VIEW_HEIGHT: f32 = 640.0;
    /// Ground line (y grows downward from the top of the playfield)
    pub const GROUND: f32 = 570.0;
    /// Tile size for level geometry
    pub const BLOCK_SIZE: f32 = 40.0;

    /// Player sprite
    pub const PLAYER_X: f32 = 200.0;
    pub const PLAYER_SIZE: f32 = 30.0;
    /// Hitbox inset on each side (forgiving collision)
    pub const HITBOX_INSET: f32 = 8.0;

    /// Horizontal scroll per tick
    pub const SPEED: f32 = 6.5;
    pub const GRAVITY: f32 = 0.65;
    pub const TERMINAL_VEL: f32 = 12.0;

    pub const JUMP_FORCE: f32 = -10.5;
    pub const SHIP_LIFT: f32 = -0.35;
    pub const SHIP_GRAVITY: f32 = 0.25;
    pub const UFO_JUMP: f32 = -9.0;
    pub const BALL_FLIP_IMPULSE: f32 = 2.0;
    pub const WAVE_SPEED: f32 = 7.0;
    /// Robot jump is deliberately lower than the cube's
    pub const ROBOT_JUMP: f32 = -6.5;
    pub const ROBOT_BOOST: f32 = 0.5;
    pub const ROBOT_BOOST_TICKS: u32 = 15;

    /// Degrees per airborne tick for cube/ball spin
    pub const SPIN_RATE: f32 = 5.0;
    pub const SHIP_TILT: f32 = 2.5;
    pub const WAVE_TILT: f32 = 5.0;

    /// How far past the block face the previous position may be and still
    /// count as a landing or ceiling bump
    pub const LANDING_TOLERANCE: f32 = 15.0;
    /// How far outside the playfield the player may drift before dying
    pub const BOUNDARY_TOLERANCE: f32 = 10.0;

    /// Collision candidate window relative to the camera
    pub const COLLISION_WINDOW_MIN: f32 = 100.0;
    pub const COLLISION_WINDOW_MAX: f32 = 500.0;

    /// Extra scroll distance after the last authored object
    pub const LEVEL_END_MARGIN: f32 = 500.0;
    /// Level length used when a level has no objects
    pub const DEFAULT_LEVEL_LENGTH: f32 = 2000.0;

    /// Delay between a crash and the respawn (milliseconds)
    pub const RESPAWN_DELAY_MS: f64 = 600.0;
    /// Duration of the crash flash overlay (seconds)
    pub const CRASH_FLASH_SECS: f32 = 0.1;
}

/// Snap an angle in degrees to the nearest quarter turn (halves round up)
#[inline]
pub fn snap_to_quarter_turn(degrees: f32) -> f32 {
    (degrees / 90.0 + 0.5).floor() * 90.0
}
