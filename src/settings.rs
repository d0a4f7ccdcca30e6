//! Simulation settings
//!
//! Loaded from a JSON file when present, otherwise defaults. Everything is
//! validated up front so the tick loop never has to.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_ARENA_SIDE, MAX_TRACKER_STAT};
use crate::error::{ConfigError, StoreError};
use crate::sim::{Arena, Difficulty, EnemyKind, Mode};

/// One spawn channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelConfig {
    pub kind: EnemyKind,
    /// Starting spawn chance (odds are `1 / chance` per tick)
    pub chance: u32,
    /// Truncated-score period of difficulty steps; `None` never changes
    #[serde(default)]
    pub threshold: Option<u32>,
}

impl ChannelConfig {
    const fn new(kind: EnemyKind, chance: u32, threshold: Option<u32>) -> Self {
        Self {
            kind,
            chance,
            threshold,
        }
    }
}

/// Channel table for one game mode, in spawn order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ruleset {
    pub channels: Vec<ChannelConfig>,
}

impl Ruleset {
    /// Regular play. Sine has no threshold and keeps its starting chance.
    pub fn standard() -> Self {
        Self {
            channels: vec![
                ChannelConfig::new(EnemyKind::Basic, 40, Some(8)),
                ChannelConfig::new(EnemyKind::Speedy, 80, Some(14)),
                ChannelConfig::new(EnemyKind::Leaper, 120, Some(23)),
                ChannelConfig::new(EnemyKind::Sine, 160, None),
                ChannelConfig::new(EnemyKind::Helix, 180, Some(37)),
                ChannelConfig::new(EnemyKind::Exploder, 240, Some(50)),
            ],
        }
    }

    /// Secret mode: common enemies all but vanish, exploders and trackers
    /// take over
    pub fn secret() -> Self {
        Self {
            channels: vec![
                ChannelConfig::new(EnemyKind::Basic, 10_000, Some(8)),
                ChannelConfig::new(EnemyKind::Speedy, 11_500, Some(14)),
                ChannelConfig::new(EnemyKind::Leaper, 13_000, Some(23)),
                ChannelConfig::new(EnemyKind::Sine, 17_000, None),
                ChannelConfig::new(EnemyKind::Helix, 20_000, Some(37)),
                ChannelConfig::new(EnemyKind::Exploder, 15, Some(10)),
                ChannelConfig::new(EnemyKind::Tracker, 15, None),
            ],
        }
    }
}

/// Inclusive range of the tracker "stat" roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatRange {
    pub min: u32,
    pub max: u32,
}

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub arena: Arena,
    /// Simulation steps per second
    pub tick_rate: u32,
    /// Ticks per whole score point
    pub ticks_per_point: u32,
    /// Floor for every spawn chance
    pub min_chance: u32,
    /// Moves an exploder travels before detonating; also the afterglow length
    pub explode_time: u32,
    pub tracker_stat: StatRange,
    pub standard: Ruleset,
    pub secret: Ruleset,
    pub leaderboard_path: PathBuf,
    pub secret_leaderboard_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena: Arena::default(),
            tick_rate: crate::consts::TICK_RATE,
            ticks_per_point: 10,
            min_chance: 5,
            explode_time: 10,
            tracker_stat: StatRange { min: 2, max: 10 },
            standard: Ruleset::standard(),
            secret: Ruleset::secret(),
            leaderboard_path: PathBuf::from("leaderboard.json"),
            secret_leaderboard_path: PathBuf::from("secret_leaderboard.json"),
        }
    }
}

impl Settings {
    /// Check every parameter that would otherwise fault or stall the loop
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Arena {
            width,
            height,
            hud_rows,
        } = self.arena;
        if width < 1 || hud_rows < 1 || height <= hud_rows {
            return Err(ConfigError::InvalidGrid {
                width,
                height,
                hud_rows,
            });
        }
        if width > MAX_ARENA_SIDE || height > MAX_ARENA_SIDE {
            return Err(ConfigError::GridTooLarge {
                width,
                height,
                limit: MAX_ARENA_SIDE,
            });
        }
        if self.tick_rate == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        if self.ticks_per_point == 0 {
            return Err(ConfigError::ZeroTicksPerPoint);
        }
        if self.explode_time == 0 {
            return Err(ConfigError::ZeroExplodeTime);
        }
        let StatRange { min, max } = self.tracker_stat;
        if min > max {
            return Err(ConfigError::InvalidStatRange { min, max });
        }
        if max > MAX_TRACKER_STAT {
            return Err(ConfigError::TrackerStatTooLarge {
                max,
                limit: MAX_TRACKER_STAT,
            });
        }
        Difficulty::new(&self.standard, self.min_chance)?;
        Difficulty::new(&self.secret, self.min_chance)?;
        Ok(())
    }

    pub fn ruleset(&self, mode: Mode) -> &Ruleset {
        match mode {
            Mode::Standard => &self.standard,
            Mode::Secret => &self.secret,
        }
    }

    pub fn leaderboard_path(&self, mode: Mode) -> &Path {
        match mode {
            Mode::Standard => &self.leaderboard_path,
            Mode::Secret => &self.secret_leaderboard_path,
        }
    }

    /// Read and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
        let settings: Settings = serde_json::from_str(&json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Like [`Settings::load`], falling back to defaults on any problem
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::warn!("Ignoring settings at {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|e| StoreError::io(path, e))?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
