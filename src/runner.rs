//! Fixed timestep scheduler
//!
//! Turns wall-clock frame deltas into simulation ticks and hands each tick's
//! output to the render and score collaborators. At most one tick chain is
//! ever scheduled: pausing or a game over drops everything pending.

use glam::IVec2;

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS};
use crate::sim::{Direction, Mode, Phase, RandomSource, Simulation, Sprite, TickResult};

/// Receives one frame per simulation tick
pub trait RenderSink {
    fn begin_frame(&mut self, _score: f64, _mode: Mode) {}
    fn draw_player(&mut self, _cell: IVec2) {}
    fn draw(&mut self, sprite: &Sprite);
}

/// Records a finished run's score
pub trait ScoreSink {
    /// Returns the standings for `mode` after recording, highest first
    fn submit(&mut self, mode: Mode, score: u64) -> Vec<u64>;
}

/// Drives a [`Simulation`] at its configured tick rate
#[derive(Debug)]
pub struct Runner<R: RandomSource> {
    sim: Simulation<R>,
    step: f32,
    accumulator: f32,
    scheduled: bool,
    pending_move: Option<Direction>,
}

impl<R: RandomSource> Runner<R> {
    pub fn new(sim: Simulation<R>) -> Self {
        let step = 1.0 / sim.settings().tick_rate as f32;
        Self {
            sim,
            step,
            accumulator: 0.0,
            scheduled: false,
            pending_move: None,
        }
    }

    pub fn simulation(&self) -> &Simulation<R> {
        &self.sim
    }

    pub fn simulation_mut(&mut self) -> &mut Simulation<R> {
        &mut self.sim
    }

    /// Seconds per tick
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Whether a tick chain is currently live
    pub fn is_scheduled(&self) -> bool {
        self.scheduled
    }

    /// Queue a player step for the next tick. One-shot: the latest call wins.
    pub fn queue_move(&mut self, direction: Direction) {
        self.pending_move = Some(direction);
    }

    /// Perform exactly one tick and render it
    pub fn fire(&mut self, render: &mut impl RenderSink) -> TickResult {
        let result = self.sim.advance_tick(self.pending_move.take());
        if result.phase == Phase::Running {
            render.begin_frame(result.score, self.sim.mode());
            render.draw_player(self.sim.state().player.pos);
            for sprite in &result.sprites {
                render.draw(sprite);
            }
        }
        result
    }

    /// Advance by `dt` seconds of wall-clock time.
    ///
    /// Returns the standings when the run ended during this update.
    pub fn update(
        &mut self,
        dt: f32,
        render: &mut impl RenderSink,
        scores: &mut impl ScoreSink,
    ) -> Option<Vec<u64>> {
        if self.sim.phase() != Phase::Running {
            self.cancel();
            return None;
        }

        self.scheduled = true;
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < MAX_SUBSTEPS {
            let result = self.fire(render);
            self.accumulator -= self.step;
            substeps += 1;

            if result.collided {
                // Nothing else fires this update
                self.cancel();
                let score = self.sim.state().final_score();
                return Some(scores.submit(self.sim.mode(), score));
            }
        }
        None
    }

    /// Running <-> Paused. Pausing drops the tick chain.
    pub fn toggle_pause(&mut self) -> Phase {
        let phase = self.sim.toggle_pause();
        if phase != Phase::Running {
            self.cancel();
        }
        phase
    }

    /// Start a new run in the current mode
    pub fn restart(&mut self) {
        self.sim.reset();
        self.cancel();
    }

    /// Switch rulesets; starts a new run
    pub fn unlock_secret_mode(&mut self) -> Mode {
        let mode = self.sim.unlock_secret_mode();
        self.cancel();
        mode
    }

    fn cancel(&mut self) {
        self.accumulator = 0.0;
        self.scheduled = false;
        self.pending_move = None;
    }
}
