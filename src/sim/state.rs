//! Game state and core simulation types
//!
//! `GameState` is the single simulation context: the physics tick, the
//! collision resolver and the renderer all receive it explicitly.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::effects::{self, Particle};
use super::level::LoadedLevel;
use crate::consts::*;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunPhase {
    /// Level select; nothing ticks
    #[default]
    Menu,
    /// Active gameplay
    Playing,
}

/// Movement archetype without its transient data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModeKind {
    Cube,
    Ship,
    Ball,
    Ufo,
    Wave,
    Robot,
}

impl ModeKind {
    /// Display name shown on the HUD
    pub fn name(self) -> &'static str {
        match self {
            ModeKind::Cube => "CUBE",
            ModeKind::Ship => "SHIP",
            ModeKind::Ball => "BALL",
            ModeKind::Ufo => "UFO",
            ModeKind::Wave => "WAVE",
            ModeKind::Robot => "ROBOT",
        }
    }

    /// Modes that stand on the ground line (or the ceiling when inverted).
    /// Ship and wave fly freely and die if they leave the playfield.
    pub fn is_ground_bound(self) -> bool {
        !matches!(self, ModeKind::Ship | ModeKind::Wave)
    }
}

/// Active movement mode, carrying any per-mode transient state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    Cube,
    Ship,
    Ball,
    Ufo,
    Wave,
    /// Robot jump boost ticks remaining
    Robot { boost_ticks: u32 },
}

impl Mode {
    pub fn kind(&self) -> ModeKind {
        match self {
            Mode::Cube => ModeKind::Cube,
            Mode::Ship => ModeKind::Ship,
            Mode::Ball => ModeKind::Ball,
            Mode::Ufo => ModeKind::Ufo,
            Mode::Wave => ModeKind::Wave,
            Mode::Robot { .. } => ModeKind::Robot,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind().name()
    }
}

impl From<ModeKind> for Mode {
    /// Fresh mode value with cleared transient state
    fn from(kind: ModeKind) -> Self {
        match kind {
            ModeKind::Cube => Mode::Cube,
            ModeKind::Ship => Mode::Ship,
            ModeKind::Ball => Mode::Ball,
            ModeKind::Ufo => Mode::Ufo,
            ModeKind::Wave => Mode::Wave,
            ModeKind::Robot => Mode::Robot { boost_ticks: 0 },
        }
    }
}

/// Gravity direction. Only ball mode ever flips it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Gravity {
    /// Falls toward the ground line
    #[default]
    Normal,
    /// Falls toward the ceiling
    Inverted,
}

impl Gravity {
    /// Signed multiplier applied to gravity and jump impulses
    #[inline]
    pub fn scale(self) -> f32 {
        match self {
            Gravity::Normal => 1.0,
            Gravity::Inverted => -1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Gravity::Normal => Gravity::Inverted,
            Gravity::Inverted => Gravity::Normal,
        }
    }
}

/// The player entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Screen-space x (fixed; the camera scrolls instead)
    pub x: f32,
    /// Top edge, measured downward from the top of the playfield
    pub y: f32,
    /// Side length of the square sprite
    pub size: f32,
    /// Vertical velocity (pixels per tick, positive = down)
    pub vel_y: f32,
    pub mode: Mode,
    /// Visual rotation in degrees
    pub rotation: f32,
    pub on_ground: bool,
    pub gravity: Gravity,
    pub dead: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self::spawned()
    }
}

impl Player {
    /// A player standing on the ground at the level start
    pub fn spawned() -> Self {
        Self {
            x: PLAYER_X,
            y: GROUND - PLAYER_SIZE,
            size: PLAYER_SIZE,
            vel_y: 0.0,
            mode: Mode::Cube,
            rotation: 0.0,
            on_ground: true,
            gravity: Gravity::Normal,
            dead: false,
        }
    }

    /// Signed gravity multiplier (always exactly +1 or -1)
    #[inline]
    pub fn gravity_scale(&self) -> f32 {
        self.gravity.scale()
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.size
    }

    /// Stop any robot jump boost in progress
    pub fn cancel_boost(&mut self) {
        if let Mode::Robot { boost_ticks } = &mut self.mode {
            *boost_ticks = 0;
        }
    }
}

/// Mode a portal switches the player into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Portal {
    Ship,
    Cube,
    Ball,
    Ufo,
    Wave,
    Robot,
}

impl Portal {
    pub fn target(self) -> ModeKind {
        match self {
            Portal::Ship => ModeKind::Ship,
            Portal::Cube => ModeKind::Cube,
            Portal::Ball => ModeKind::Ball,
            Portal::Ufo => ModeKind::Ufo,
            Portal::Wave => ModeKind::Wave,
            Portal::Robot => ModeKind::Robot,
        }
    }
}

/// Level geometry kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
    Block,
    Spike,
    Portal(Portal),
}

impl ObjectKind {
    /// Decode an authored kind code (1-8)
    pub fn from_code(code: u8) -> Option<Self> {
        let kind = match code {
            1 => ObjectKind::Block,
            2 => ObjectKind::Spike,
            3 => ObjectKind::Portal(Portal::Ship),
            4 => ObjectKind::Portal(Portal::Cube),
            5 => ObjectKind::Portal(Portal::Ball),
            6 => ObjectKind::Portal(Portal::Ufo),
            7 => ObjectKind::Portal(Portal::Wave),
            8 => ObjectKind::Portal(Portal::Robot),
            _ => return None,
        };
        Some(kind)
    }

    /// Authored kind code (inverse of `from_code`)
    pub fn code(self) -> u8 {
        match self {
            ObjectKind::Block => 1,
            ObjectKind::Spike => 2,
            ObjectKind::Portal(Portal::Ship) => 3,
            ObjectKind::Portal(Portal::Cube) => 4,
            ObjectKind::Portal(Portal::Ball) => 5,
            ObjectKind::Portal(Portal::Ufo) => 6,
            ObjectKind::Portal(Portal::Wave) => 7,
            ObjectKind::Portal(Portal::Robot) => 8,
        }
    }
}

/// A piece of static level geometry in world space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometryObject {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: ObjectKind,
}

impl GeometryObject {
    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// Things that happened during a tick, drained by the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A portal switched the player into a different mode
    ModeChanged(ModeKind),
    /// The player died; `attempt` is the new attempt number
    Crashed { attempt: u32 },
    /// The camera scrolled past the end of the level
    LevelComplete { level_index: usize, attempts: u32 },
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: RunPhase,
    /// Index of the loaded level
    pub level_index: usize,
    /// Static level geometry, in authored order
    pub objects: Vec<GeometryObject>,
    /// Scroll distance at which the level is complete
    pub level_length: f32,
    /// Horizontal scroll offset (world x of the screen's left edge)
    pub camera_x: f32,
    /// Attempt counter (1 on a fresh start, +1 per crash)
    pub attempts: u32,
    pub player: Player,
    /// Pending events for the host
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Crash burst particles (visual only)
    #[serde(skip)]
    pub particles: Vec<Particle>,
    /// Crash flash time remaining in seconds (visual only)
    #[serde(skip)]
    pub flash: f32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Empty state sitting in the menu
    pub fn new() -> Self {
        Self {
            phase: RunPhase::Menu,
            level_index: 0,
            objects: Vec::new(),
            level_length: DEFAULT_LEVEL_LENGTH,
            camera_x: 0.0,
            attempts: 1,
            player: Player::spawned(),
            events: Vec::new(),
            particles: Vec::new(),
            flash: 0.0,
        }
    }

    /// Install a level and start playing it from attempt 1
    pub fn start(&mut self, level_index: usize, level: LoadedLevel) {
        self.level_index = level_index;
        self.objects = level.objects;
        self.level_length = level.length;
        self.attempts = 1;
        self.events.clear();
        self.particles.clear();
        self.respawn();
        self.phase = RunPhase::Playing;
    }

    /// Put the player back at the level start
    pub fn respawn(&mut self) {
        self.player = Player::spawned();
        self.camera_x = 0.0;
        self.flash = 0.0;
    }

    /// Kill the player. Returns false if already dead.
    pub fn crash(&mut self) -> bool {
        if self.player.dead {
            return false;
        }
        self.player.dead = true;
        self.attempts += 1;
        self.events.push(GameEvent::Crashed {
            attempt: self.attempts,
        });
        self.flash = CRASH_FLASH_SECS;

        let center = Vec2::new(
            self.player.x + self.player.size / 2.0,
            self.player.y + self.player.size / 2.0,
        );
        let seed = ((self.level_index as u64) << 32) | u64::from(self.attempts);
        effects::spawn_crash_burst(&mut self.particles, center, seed);

        log::debug!(
            "Crash at camera {:.1} in {} mode (attempt {})",
            self.camera_x,
            self.player.mode.name(),
            self.attempts
        );
        true
    }

    /// Fraction of the level scrolled past, in [0, 1]
    pub fn progress(&self) -> f32 {
        if self.level_length <= 0.0 {
            return 1.0;
        }
        (self.camera_x / self.level_length).clamp(0.0, 1.0)
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
