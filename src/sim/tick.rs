//! Fixed timestep simulation tick
//!
//! One call is one scheduled step of the game: spawn, collide, then cull,
//! move and draw every live enemy, then difficulty and score.

use serde::{Deserialize, Serialize};

use super::collision::first_collision;
use super::enemy::Sprite;
use super::grid::Direction;
use super::rng::RandomSource;
use super::spawner::Spawner;
use super::state::{Phase, SimulationState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Player step applied before anything else moves
    pub player_move: Option<Direction>,
    /// Pause toggle
    pub toggle_pause: bool,
}

/// What one tick produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickResult {
    /// The player was hit; the run is over
    pub collided: bool,
    /// Display snapshot of every surviving enemy, in list order
    pub sprites: Vec<Sprite>,
    pub score: f64,
    pub phase: Phase,
    /// Enemies created this tick
    pub spawned: usize,
}

impl TickResult {
    fn idle(state: &SimulationState) -> Self {
        Self {
            collided: false,
            sprites: Vec::new(),
            score: state.score(),
            phase: state.phase,
            spawned: 0,
        }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick<R: RandomSource>(
    state: &mut SimulationState,
    spawner: &mut Spawner<R>,
    input: &TickInput,
) -> TickResult {
    if input.toggle_pause {
        state.toggle_pause();
    }

    // Don't tick if paused or game over
    if state.phase != Phase::Running {
        return TickResult::idle(state);
    }

    if let Some(direction) = input.player_move {
        let arena = state.arena;
        state.player.step(direction, &arena);
    }

    let spawned = spawner.populate(state);

    // Collisions use the footprints enemies had when last drawn
    if let Some(enemy) = first_collision(&state.enemies, state.player.pos) {
        log::info!(
            "Player hit by {:?} #{} at {}, final score {}",
            enemy.kind,
            enemy.id,
            state.player.pos,
            state.final_score()
        );
        state.phase = Phase::GameOver;
        return TickResult {
            collided: true,
            spawned,
            ..TickResult::idle(state)
        };
    }

    let target = state.player.pos;
    let mut sprites = Vec::with_capacity(state.enemies.len());
    state.enemies.retain_mut(|enemy| {
        if enemy.is_expired() {
            return false;
        }
        enemy.set_target(target);
        enemy.advance();
        sprites.push(enemy.present());
        true
    });

    state.difficulty.adjust(state.truncated_score());
    state.score_ticks += 1;

    TickResult {
        collided: false,
        sprites,
        score: state.score(),
        phase: state.phase,
        spawned,
    }
}
