//! Probabilistic enemy spawning
//!
//! Every channel rolls once per tick: a uniform draw in `1..=chance` spawns
//! an enemy only when it lands exactly on `chance`. Channels are independent,
//! so several enemies can appear on the same tick.

use glam::IVec2;

use super::enemy::{Blueprint, Enemy, EnemyKind};
use super::grid::Direction;
use super::rng::RandomSource;
use super::state::SimulationState;
use crate::settings::{Settings, StatRange};

/// Spawns enemies using an injected random source
#[derive(Debug, Clone)]
pub struct Spawner<R: RandomSource> {
    rng: R,
    explode_time: u32,
    tracker_stat: StatRange,
}

impl<R: RandomSource> Spawner<R> {
    pub fn new(rng: R, settings: &Settings) -> Self {
        Self {
            rng,
            explode_time: settings.explode_time,
            tracker_stat: settings.tracker_stat,
        }
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }

    /// Exact-match roll: true with probability `1 / chance`
    pub fn roll(&mut self, chance: u32) -> bool {
        chance != 0 && self.rng.draw(1, chance) == chance
    }

    /// Roll every channel once and append whatever spawns.
    /// Returns the number of new enemies.
    pub fn populate(&mut self, state: &mut SimulationState) -> usize {
        let arena = state.arena;
        let player = state.player.pos;
        let rolls: Vec<(EnemyKind, u32)> = state
            .difficulty
            .channels()
            .iter()
            .map(|c| (c.kind, c.chance))
            .collect();

        let mut spawned = 0;
        for (kind, chance) in rolls {
            if !self.roll(chance) {
                continue;
            }

            let direction = self.rng.pick(&Direction::ALL);
            let (low, high) = arena.lane_range(direction);
            let lane = self.rng.draw(low as u32, high as u32) as i32;
            let blueprint = self.blueprint(kind, player);
            let id = state.next_entity_id();

            match Enemy::spawn(id, blueprint, direction, lane, &arena) {
                Ok(enemy) => {
                    log::debug!(
                        "spawned {:?} #{} heading {:?} at {}",
                        kind,
                        id,
                        direction,
                        enemy.pos
                    );
                    state.enemies.push(enemy);
                    spawned += 1;
                }
                Err(err) => log::warn!("skipped {:?} spawn: {}", kind, err),
            }
        }
        spawned
    }

    /// Draw the per-spawn extras for `kind`
    fn blueprint(&mut self, kind: EnemyKind, player: IVec2) -> Blueprint {
        match kind {
            EnemyKind::Basic => Blueprint::Basic,
            EnemyKind::Speedy => Blueprint::Speedy,
            EnemyKind::Leaper => Blueprint::Leaper,
            EnemyKind::Helix => Blueprint::Helix {
                flipped: self.rng.coin(),
            },
            EnemyKind::Sine => Blueprint::Sine {
                flipped: self.rng.coin(),
            },
            EnemyKind::Exploder => Blueprint::Exploder {
                explode_time: self.explode_time,
            },
            EnemyKind::Tracker => {
                let stat = self.rng.draw(self.tracker_stat.min, self.tracker_stat.max);
                Blueprint::Tracker {
                    track_delay: (stat / 2).max(2),
                    max_moves: stat + 4,
                    target: player,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::difficulty::Difficulty;
    use crate::sim::rng::SequenceRandom;
    use crate::sim::state::Mode;

    fn state_for(settings: &Settings, mode: Mode) -> SimulationState {
        let difficulty = Difficulty::new(settings.ruleset(mode), settings.min_chance).unwrap();
        SimulationState::new(settings.arena, mode, difficulty, settings.ticks_per_point)
    }

    #[test]
    fn test_roll_is_exact_match() {
        let settings = Settings::default();
        let mut spawner = Spawner::new(SequenceRandom::new(vec![39, 40, 41]), &settings);
        assert!(!spawner.roll(40));
        assert!(spawner.roll(40));
        // 41 clamps to 40; anything at the top of the range hits
        assert!(spawner.roll(40));
        assert!(!spawner.roll(0));
    }

    #[test]
    fn test_every_channel_can_fire_on_one_tick() {
        let settings = Settings::default();
        let mut state = state_for(&settings, Mode::Standard);
        let mut spawner = Spawner::new(SequenceRandom::repeat(u32::MAX), &settings);

        assert_eq!(spawner.populate(&mut state), 6);
        let kinds: Vec<EnemyKind> = state.enemies.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            [
                EnemyKind::Basic,
                EnemyKind::Speedy,
                EnemyKind::Leaper,
                EnemyKind::Sine,
                EnemyKind::Helix,
                EnemyKind::Exploder
            ]
        );
        // Top of every draw: heading Right from the left edge, bottom lane
        for enemy in &state.enemies {
            assert_eq!(enemy.direction, Direction::Right);
            assert_eq!(enemy.pos, IVec2::new(-1, 20));
        }
        let ids: Vec<u32> = state.enemies.iter().map(|e| e.id).collect();
        assert_eq!(ids, [1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_low_draws_never_spawn() {
        let settings = Settings::default();
        let mut state = state_for(&settings, Mode::Secret);
        let mut spawner = Spawner::new(SequenceRandom::repeat(0), &settings);
        for _ in 0..100 {
            assert_eq!(spawner.populate(&mut state), 0);
        }
        assert!(state.enemies.is_empty());
        // One draw per channel per tick
        assert_eq!(spawner.rng().draws(), 700);
    }

    #[test]
    fn test_tracker_stats_and_target() {
        let settings = Settings::default();
        let mut state = state_for(&settings, Mode::Secret);
        state.player.pos = IVec2::new(4, 12);
        let mut spawner = Spawner::new(SequenceRandom::repeat(0), &settings);

        for (stat, delay, moves) in [(2, 2, 6), (5, 2, 9), (7, 3, 11), (10, 5, 14)] {
            spawner.rng = SequenceRandom::repeat(stat);
            match spawner.blueprint(EnemyKind::Tracker, state.player.pos) {
                Blueprint::Tracker {
                    track_delay,
                    max_moves,
                    target,
                } => {
                    assert_eq!(track_delay, delay);
                    assert_eq!(max_moves, moves);
                    assert_eq!(target, IVec2::new(4, 12));
                }
                other => panic!("unexpected blueprint {other:?}"),
            }
        }
    }

    #[test]
    fn test_secret_mode_spawns_trackers() {
        let settings = Settings::default();
        let mut state = state_for(&settings, Mode::Secret);
        let mut spawner = Spawner::new(SequenceRandom::repeat(u32::MAX), &settings);
        assert_eq!(spawner.populate(&mut state), 7);
        let tracker = state.enemies.last().unwrap();
        assert_eq!(tracker.kind, EnemyKind::Tracker);
        assert_eq!(tracker.pursuit().unwrap().target, state.player.pos);
    }
}
