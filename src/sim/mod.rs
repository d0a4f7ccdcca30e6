//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Injected random source only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod engine;
pub mod enemy;
pub mod grid;
pub mod motion;
pub mod rng;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{collides, first_collision};
pub use difficulty::{Difficulty, SpawnChannel};
pub use engine::Simulation;
pub use enemy::{Behavior, Blueprint, Enemy, EnemyKind, Footprint, Rgb, Sprite};
pub use grid::{Arena, Bounds, Direction};
pub use rng::{RandomSource, SeededRandom, SequenceRandom};
pub use spawner::Spawner;
pub use state::{Mode, Phase, Player, SimulationState};
pub use tick::{TickInput, TickResult, tick};
