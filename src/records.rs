//! Per-level bests
//!
//! Persisted to LocalStorage, tracks best progress and total attempts for
//! every level.

use serde::{Deserialize, Serialize};

/// Best result for a single level
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelRecord {
    /// Furthest progress reached (0-100)
    pub best_percent: u32,
    /// Attempts across all runs
    pub total_attempts: u64,
    /// Reached the end at least once
    pub completed: bool,
}

/// Records for every level, indexed by level
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LevelRecords {
    pub levels: Vec<LevelRecord>,
    /// Number of `save` calls
    #[cfg(test)]
    #[serde(skip)]
    pub saves: std::cell::Cell<u32>,
}

impl LevelRecords {
    /// LocalStorage key (used only in wasm32)
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    const STORAGE_KEY: &'static str = "tile_dash_records";

    pub fn new() -> Self {
        Self::default()
    }

    /// Record for a level, if any attempt was ever made
    pub fn get(&self, level: usize) -> Option<&LevelRecord> {
        self.levels.get(level)
    }

    /// Best progress percent for a level (0 if never played)
    pub fn best_percent(&self, level: usize) -> u32 {
        self.get(level).map(|r| r.best_percent).unwrap_or(0)
    }

    fn entry(&mut self, level: usize) -> &mut LevelRecord {
        if self.levels.len() <= level {
            self.levels.resize_with(level + 1, LevelRecord::default);
        }
        &mut self.levels[level]
    }

    /// Record a finished attempt (crash). Returns true on a new best.
    pub fn record_attempt(&mut self, level: usize, progress: f32) -> bool {
        let percent = (progress.clamp(0.0, 1.0) * 100.0).floor() as u32;
        let record = self.entry(level);
        record.total_attempts += 1;
        if percent > record.best_percent {
            record.best_percent = percent;
            true
        } else {
            false
        }
    }

    /// Record reaching the end of a level. Returns true the first time.
    pub fn record_completion(&mut self, level: usize) -> bool {
        let record = self.entry(level);
        record.total_attempts += 1;
        record.best_percent = 100;
        !std::mem::replace(&mut record.completed, true)
    }

    /// Load records from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str::<LevelRecords>(&json) {
                    Ok(records) => {
                        log::info!("Loaded records for {} levels", records.levels.len());
                        return records;
                    }
                    Err(e) => log::warn!("Discarding corrupt level records: {}", e),
                }
            }
        }

        log::info!("No level records found, starting fresh");
        Self::new()
    }

    /// Save records to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                    log::warn!("Failed to save level records");
                }
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
        #[cfg(test)]
        self.saves.set(self.saves.get() + 1);
    }
}
