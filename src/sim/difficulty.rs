//! Score-driven difficulty
//!
//! Each spawn channel may carry a score threshold. Every time the truncated
//! score lands on a multiple of it the channel's chance drops by one, but
//! only once per landing: a latch holds until the score moves off the
//! multiple again.

use serde::{Deserialize, Serialize};

use super::enemy::EnemyKind;
use crate::error::ConfigError;
use crate::settings::Ruleset;

/// Spawn state of one enemy kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnChannel {
    pub kind: EnemyKind,
    /// Upper bound of the exact-match draw; spawn odds are `1 / chance`
    pub chance: u32,
    pub threshold: Option<u32>,
    latched: bool,
}

impl SpawnChannel {
    pub fn latched(&self) -> bool {
        self.latched
    }
}

/// Per-run spawn chances and their hysteresis latches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Difficulty {
    channels: Vec<SpawnChannel>,
    min_chance: u32,
}

impl Difficulty {
    /// Build from a ruleset, rejecting zero chances and thresholds
    pub fn new(ruleset: &Ruleset, min_chance: u32) -> Result<Self, ConfigError> {
        if min_chance == 0 {
            return Err(ConfigError::ZeroMinimumChance);
        }

        let mut channels: Vec<SpawnChannel> = Vec::with_capacity(ruleset.channels.len());
        for config in &ruleset.channels {
            let kind = config.kind;
            if channels.iter().any(|c| c.kind == kind) {
                return Err(ConfigError::DuplicateChannel { kind });
            }
            if config.chance == 0 {
                return Err(ConfigError::ZeroChance { kind });
            }
            if config.chance < min_chance {
                return Err(ConfigError::ChanceBelowMinimum {
                    kind,
                    chance: config.chance,
                    min: min_chance,
                });
            }
            if config.threshold == Some(0) {
                return Err(ConfigError::ZeroThreshold { kind });
            }
            channels.push(SpawnChannel {
                kind,
                chance: config.chance,
                threshold: config.threshold,
                latched: false,
            });
        }

        Ok(Self {
            channels,
            min_chance,
        })
    }

    pub fn channels(&self) -> &[SpawnChannel] {
        &self.channels
    }

    /// Current chance for `kind`, or `None` if the channel is disabled
    pub fn chance(&self, kind: EnemyKind) -> Option<u32> {
        self.channels
            .iter()
            .find(|c| c.kind == kind)
            .map(|c| c.chance)
    }

    /// Apply the threshold rule for the truncated `score`.
    /// Returns how many channels got harder.
    pub fn adjust(&mut self, score: u64) -> usize {
        let mut raised = 0;
        for channel in &mut self.channels {
            let Some(threshold) = channel.threshold else {
                continue;
            };
            if score % u64::from(threshold) == 0 {
                if !channel.latched {
                    let before = channel.chance;
                    channel.chance = channel.chance.saturating_sub(1).max(self.min_chance);
                    channel.latched = true;
                    if channel.chance != before {
                        log::debug!(
                            "{:?} spawn chance 1/{} -> 1/{} at score {}",
                            channel.kind,
                            before,
                            channel.chance,
                            score
                        );
                        raised += 1;
                    }
                }
            } else {
                channel.latched = false;
            }
        }
        raised
    }
}
