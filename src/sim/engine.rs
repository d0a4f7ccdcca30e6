//! Run-level facade over the tick function
//!
//! Owns the settings, both difficulty templates, the live state and the
//! spawner, so callers deal with one value per game.

use glam::IVec2;

use super::difficulty::Difficulty;
use super::grid::Direction;
use super::rng::RandomSource;
use super::spawner::Spawner;
use super::state::{Mode, Phase, SimulationState};
use super::tick::{TickInput, TickResult, tick};
use crate::error::ConfigError;
use crate::settings::Settings;

/// One game, across resets and mode switches
#[derive(Debug, Clone)]
pub struct Simulation<R: RandomSource> {
    settings: Settings,
    standard: Difficulty,
    secret: Difficulty,
    state: SimulationState,
    spawner: Spawner<R>,
}

impl<R: RandomSource> Simulation<R> {
    /// Validate `settings` and start a standard-mode run
    pub fn new(settings: Settings, rng: R) -> Result<Self, ConfigError> {
        settings.validate()?;
        let standard = Difficulty::new(&settings.standard, settings.min_chance)?;
        let secret = Difficulty::new(&settings.secret, settings.min_chance)?;
        let state = SimulationState::new(
            settings.arena,
            Mode::Standard,
            standard.clone(),
            settings.ticks_per_point,
        );
        let spawner = Spawner::new(rng, &settings);
        Ok(Self {
            settings,
            standard,
            secret,
            state,
            spawner,
        })
    }

    /// Run one scheduled step
    pub fn advance_tick(&mut self, player_move: Option<Direction>) -> TickResult {
        let input = TickInput {
            player_move,
            toggle_pause: false,
        };
        tick(&mut self.state, &mut self.spawner, &input)
    }

    /// Immediate player move from an input event. Only unit axis deltas are
    /// accepted, and only while running.
    pub fn move_player(&mut self, dx: i32, dy: i32) -> bool {
        if self.state.phase != Phase::Running {
            return false;
        }
        let Some(direction) = Direction::from_delta(IVec2::new(dx, dy)) else {
            return false;
        };
        let arena = self.state.arena;
        self.state.player.step(direction, &arena)
    }

    pub fn toggle_pause(&mut self) -> Phase {
        self.state.toggle_pause()
    }

    /// Fresh run in the current mode. The random source carries on.
    pub fn reset(&mut self) {
        let mode = self.state.mode;
        let difficulty = match mode {
            Mode::Standard => self.standard.clone(),
            Mode::Secret => self.secret.clone(),
        };
        self.state = SimulationState::new(
            self.settings.arena,
            mode,
            difficulty,
            self.settings.ticks_per_point,
        );
        log::info!("New {:?} run", mode);
    }

    /// Switch between standard and secret rulesets; always restarts the run
    pub fn unlock_secret_mode(&mut self) -> Mode {
        self.state.mode = self.state.mode.toggled();
        log::info!("Secret mode {}", if self.state.mode == Mode::Secret { "on" } else { "off" });
        self.reset();
        self.state.mode
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Direct state access for scripted scenarios
    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
