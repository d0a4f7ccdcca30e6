//! Simulation state
//!
//! Everything a run mutates lives in `SimulationState`: the player, live
//! enemies, spawn chances, score, and the run phase. Rebuilding it is a full
//! reset.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::difficulty::Difficulty;
use super::enemy::Enemy;
use super::grid::{Arena, Direction};

/// Run phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Running,
    Paused,
    /// Terminal until reset
    GameOver,
}

/// Which ruleset and leaderboard are in use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    Standard,
    /// Tracker channel enabled, common enemies suppressed
    Secret,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Mode::Standard => Mode::Secret,
            Mode::Secret => Mode::Standard,
        }
    }
}

/// The player token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub pos: IVec2,
}

impl Player {
    pub fn spawn(arena: &Arena) -> Self {
        Self { pos: arena.center() }
    }

    /// Move one cell if the destination is playable
    pub fn step(&mut self, direction: Direction, arena: &Arena) -> bool {
        let next = self.pos + direction.unit();
        if arena.is_playable(next) {
            self.pos = next;
            true
        } else {
            false
        }
    }
}

/// Complete state of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub arena: Arena,
    pub mode: Mode,
    pub phase: Phase,
    pub player: Player,
    /// Live enemies in spawn order
    pub enemies: Vec<Enemy>,
    pub difficulty: Difficulty,
    /// Running ticks elapsed; the score in fixed point
    pub score_ticks: u64,
    /// Non-zero; `Settings::validate` rejects zero
    pub ticks_per_point: u32,
    next_id: u32,
}

impl SimulationState {
    pub fn new(arena: Arena, mode: Mode, difficulty: Difficulty, ticks_per_point: u32) -> Self {
        debug_assert!(ticks_per_point > 0, "ticks_per_point must be validated");
        Self {
            arena,
            mode,
            phase: Phase::Running,
            player: Player::spawn(&arena),
            enemies: Vec::new(),
            difficulty,
            score_ticks: 0,
            ticks_per_point,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Score as shown on the HUD
    pub fn score(&self) -> f64 {
        self.score_ticks as f64 / f64::from(self.ticks_per_point)
    }

    /// Whole points, used for difficulty thresholds
    pub fn truncated_score(&self) -> u64 {
        self.score_ticks / u64::from(self.ticks_per_point)
    }

    /// Score as recorded on the leaderboard
    pub fn final_score(&self) -> u64 {
        self.score().round_ties_even() as u64
    }

    /// Running <-> Paused. Game over is unaffected.
    pub fn toggle_pause(&mut self) -> Phase {
        self.phase = match self.phase {
            Phase::Running => Phase::Paused,
            Phase::Paused => Phase::Running,
            Phase::GameOver => Phase::GameOver,
        };
        self.phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    fn fresh() -> SimulationState {
        let settings = Settings::default();
        let difficulty = Difficulty::new(&settings.standard, settings.min_chance).unwrap();
        SimulationState::new(settings.arena, Mode::Standard, difficulty, settings.ticks_per_point)
    }

    #[test]
    fn test_player_starts_centered() {
        assert_eq!(fresh().player.pos, IVec2::new(10, 10));
    }

    #[test]
    fn test_player_cannot_enter_hud_or_leave_grid() {
        let arena = Arena::default();
        let mut player = Player {
            pos: IVec2::new(0, 2),
        };
        assert!(!player.step(Direction::Up, &arena));
        assert!(!player.step(Direction::Left, &arena));
        assert_eq!(player.pos, IVec2::new(0, 2));
        assert!(player.step(Direction::Down, &arena));
        assert_eq!(player.pos, IVec2::new(0, 3));

        let mut corner = Player {
            pos: IVec2::new(19, 19),
        };
        assert!(!corner.step(Direction::Right, &arena));
        assert!(!corner.step(Direction::Down, &arena));
    }

    #[test]
    fn test_score_fixed_point() {
        let mut state = fresh();
        state.score_ticks = 79;
        assert_eq!(state.truncated_score(), 7);
        assert!((state.score() - 7.9).abs() < 1e-9);
        assert_eq!(state.final_score(), 8);
        state.score_ticks = 25;
        // 2.5 ties to even
        assert_eq!(state.final_score(), 2);
    }

    #[test]
    fn test_pause_toggle_ignores_game_over() {
        let mut state = fresh();
        assert_eq!(state.toggle_pause(), Phase::Paused);
        assert_eq!(state.toggle_pause(), Phase::Running);
        state.phase = Phase::GameOver;
        assert_eq!(state.toggle_pause(), Phase::GameOver);
    }

    #[test]
    fn test_entity_ids_increase() {
        let mut state = fresh();
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert!(b > a);
    }
}
