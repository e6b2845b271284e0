//! Fixed-timestep simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Fixed timestep only
//! - State passed explicitly (no globals)
//! - No rendering or platform dependencies

pub mod collision;
pub mod driver;
pub mod effects;
pub mod level;
pub mod levels;
pub mod movement;
pub mod state;
pub mod tick;

pub use collision::{BlockContact, CollisionOutcome, Rect, player_hitbox, resolve_collisions};
pub use driver::{FrameSteps, LoopDriver};
pub use effects::{Particle, update_effects};
pub use level::{LevelError, LoadedLevel, TileObject, load_tiles, parse_level_json};
pub use levels::{LevelInfo, level_count, level_info, level_tiles};
pub use state::{
    GameEvent, GameState, GeometryObject, Gravity, Mode, ModeKind, ObjectKind, Player, Portal,
    RunPhase,
};
pub use tick::{TickOutcome, tick};
