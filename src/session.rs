//! Run lifecycle
//!
//! A `Session` owns everything that outlives a single tick: the loop
//! driver, the input signals, the deferred respawn, and persisted records.
//! The host calls `frame` once per animation frame with a millisecond
//! timestamp and forwards device input to `press` / `release`.

use thiserror::Error;

use crate::consts::RESPAWN_DELAY_MS;
use crate::input::InputSignals;
use crate::records::LevelRecords;
use crate::settings::Settings;
use crate::sim::{
    GameEvent, GameState, LevelError, LoadedLevel, LoopDriver, RunPhase, level_info, level_tiles,
    load_tiles, tick, update_effects,
};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no level with index {0}")]
    UnknownLevel(usize),
    #[error(transparent)]
    Level(#[from] LevelError),
}

/// A respawn waiting for its time to come
#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingRespawn {
    due_ms: f64,
    /// Run generation that scheduled it
    generation: u64,
}

/// What the HUD shows this frame
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    pub attempts: u32,
    /// Whole percent of the level scrolled past (0-100)
    pub progress_percent: u32,
    pub mode: &'static str,
    /// Crash flash overlay should be visible
    pub flash: bool,
    pub level_name: &'static str,
}

pub struct Session {
    pub state: GameState,
    pub settings: Settings,
    pub records: LevelRecords,
    driver: LoopDriver,
    input: InputSignals,
    pending_respawn: Option<PendingRespawn>,
    /// Bumped on every start/exit so stale respawns can be recognised
    generation: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Settings::default(), LevelRecords::new())
    }
}

impl Session {
    pub fn new(settings: Settings, records: LevelRecords) -> Self {
        Self {
            state: GameState::new(),
            settings,
            records,
            driver: LoopDriver::new(),
            input: InputSignals::default(),
            pending_respawn: None,
            generation: 0,
        }
    }

    /// Session with persisted settings and records
    pub fn load() -> Self {
        Self::new(Settings::load(), LevelRecords::load())
    }

    /// Start one of the built-in levels from attempt 1
    pub fn start_run(&mut self, level_index: usize) -> Result<(), SessionError> {
        let tiles = level_tiles(level_index).ok_or(SessionError::UnknownLevel(level_index))?;
        let level = load_tiles(&tiles)?;
        self.start_loaded(level_index, level);
        Ok(())
    }

    /// Start an already loaded level (custom or built-in)
    pub fn start_loaded(&mut self, level_index: usize, level: LoadedLevel) {
        self.cancel_pending();
        self.driver.reset();
        self.input.release();
        self.state.start(level_index, level);

        log::info!(
            "Starting level {} ({} objects, length {:.0})",
            level_index + 1,
            self.state.objects.len(),
            self.state.level_length
        );
    }

    /// Leave the current run and go back to the menu
    pub fn exit_run(&mut self) {
        // A death was already counted when it happened
        if self.state.phase == RunPhase::Playing && !self.state.player.dead {
            self.records
                .record_attempt(self.state.level_index, self.state.progress());
            self.records.save();
        }
        self.state.phase = RunPhase::Menu;
        self.cancel_pending();
        self.driver.reset();
        self.input.release();
    }

    fn cancel_pending(&mut self) {
        self.pending_respawn = None;
        self.generation += 1;
    }

    /// Primary action pressed. Ignored outside of a run.
    pub fn press(&mut self) {
        if self.state.phase == RunPhase::Playing {
            self.input.press();
        }
    }

    /// Primary action released; also stops any robot boost in progress
    pub fn release(&mut self) {
        self.input.release();
        self.state.player.cancel_boost();
    }

    /// Run everything due at `now_ms`. Returns false once there is nothing
    /// left to animate and the host can stop requesting frames.
    pub fn frame(&mut self, now_ms: f64) -> bool {
        if let Some(pending) = self.pending_respawn {
            if pending.generation != self.generation {
                self.pending_respawn = None;
            } else if now_ms >= pending.due_ms {
                self.pending_respawn = None;
                if self.state.phase == RunPhase::Playing {
                    self.state.respawn();
                }
            }
        }

        let steps = self.driver.advance(now_ms);
        for _ in 0..steps.steps {
            tick(&mut self.state, &mut self.input);
        }

        for event in self.state.drain_events() {
            self.handle_event(event, now_ms);
        }

        update_effects(&mut self.state, steps.dt);

        self.state.phase == RunPhase::Playing
    }

    fn handle_event(&mut self, event: GameEvent, now_ms: f64) {
        match event {
            GameEvent::ModeChanged(kind) => {
                log::debug!("Mode changed to {}", kind.name());
            }
            GameEvent::Crashed { attempt } => {
                self.pending_respawn = Some(PendingRespawn {
                    due_ms: now_ms + RESPAWN_DELAY_MS,
                    generation: self.generation,
                });
                if self
                    .records
                    .record_attempt(self.state.level_index, self.state.progress())
                {
                    log::info!(
                        "New best on level {}: {}%",
                        self.state.level_index + 1,
                        self.records.best_percent(self.state.level_index)
                    );
                }
                // The tab may close before the run ends
                self.records.save();
                log::debug!("Respawning for attempt {} in {}ms", attempt, RESPAWN_DELAY_MS);
            }
            GameEvent::LevelComplete {
                level_index,
                attempts,
            } => {
                if self.records.record_completion(level_index) {
                    log::info!("First clear of level {} in {} attempts", level_index + 1, attempts);
                }
                self.records.save();
                self.cancel_pending();
                self.driver.reset();
                self.input.release();
            }
        }
    }

    /// Respawn still waiting to fire
    pub fn respawn_pending(&self) -> bool {
        self.pending_respawn.is_some()
    }

    pub fn is_playing(&self) -> bool {
        self.state.phase == RunPhase::Playing
    }

    pub fn hud(&self) -> Hud {
        Hud {
            attempts: self.state.attempts,
            progress_percent: (self.state.progress() * 100.0).floor() as u32,
            mode: self.state.player.mode.name(),
            flash: self.state.flash > 0.0 && self.settings.effective_crash_flash(),
            level_name: level_info(self.state.level_index)
                .map(|info| info.name)
                .unwrap_or("Custom"),
        }
    }
}
