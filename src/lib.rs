//! Fire Up! - a grid dodging game's enemy simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (enemies, spawning, difficulty, ticks)
//! - `runner`: Fixed timestep scheduler and render/score collaborators
//! - `highscores`: Per-mode top-3 leaderboards
//! - `settings`: Data-driven game balance

pub mod error;
pub mod highscores;
pub mod runner;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, StoreError};
pub use highscores::{HighScores, Leaderboards};
pub use runner::{RenderSink, Runner, ScoreSink};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Default simulation rate in Hz
    pub const TICK_RATE: u32 = 30;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta the scheduler will account for, in seconds
    pub const MAX_FRAME_DT: f32 = 0.25;
    /// Largest arena width or height accepted by settings
    pub const MAX_ARENA_SIDE: i32 = 4096;
    /// Largest tracker stat; leaves room for the `+4` move bonus
    pub const MAX_TRACKER_STAT: u32 = u32::MAX - 4;
}
