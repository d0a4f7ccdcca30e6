//! Error types
//!
//! Configuration problems are rejected when the simulation is built. The
//! tick loop itself has no failure path.

use std::path::PathBuf;

use thiserror::Error;

use crate::sim::EnemyKind;

/// Invalid simulation parameters
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("spawn chance for {kind:?} must be at least 1")]
    ZeroChance { kind: EnemyKind },

    #[error("spawn chance {chance} for {kind:?} is below the minimum of {min}")]
    ChanceBelowMinimum { kind: EnemyKind, chance: u32, min: u32 },

    #[error("minimum spawn chance must be at least 1")]
    ZeroMinimumChance,

    #[error("difficulty threshold for {kind:?} must be at least 1")]
    ZeroThreshold { kind: EnemyKind },

    #[error("channel {kind:?} is listed more than once")]
    DuplicateChannel { kind: EnemyKind },

    #[error("tracker max moves must be at least 1")]
    ZeroMaxMoves,

    #[error("tracker delay must be at least 1")]
    ZeroTrackDelay,

    #[error("exploder fuse length must be at least 1")]
    ZeroExplodeTime,

    #[error("tracker stat range {min}..={max} is empty")]
    InvalidStatRange { min: u32, max: u32 },

    #[error("tracker stat {max} exceeds the limit of {limit}")]
    TrackerStatTooLarge { max: u32, limit: u32 },

    #[error("grid {width}x{height} cannot fit a {hud_rows}-row HUD band")]
    InvalidGrid { width: i32, height: i32, hud_rows: i32 },

    #[error("grid {width}x{height} exceeds the limit of {limit} cells per side")]
    GridTooLarge { width: i32, height: i32, limit: i32 },

    #[error("tick rate must be at least 1 Hz")]
    ZeroTickRate,

    #[error("ticks per point must be at least 1")]
    ZeroTicksPerPoint,
}

/// Failures while reading or writing settings and leaderboards
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid settings: {0}")]
    Config(#[from] ConfigError),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
