//! Enemy data model
//!
//! One `Enemy` struct carries the fields every variant shares (direction,
//! primary cell, movement gauge, exit bounds); the variant-specific state
//! lives in the [`Behavior`] payload. Motion rules are in `motion.rs`.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::grid::{Arena, Bounds, Direction};
use crate::error::ConfigError;

/// Enemy variant tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyKind {
    Basic,
    Speedy,
    Leaper,
    Helix,
    Sine,
    Exploder,
    /// Secret-mode pursuer
    Tracker,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 7] = [
        EnemyKind::Basic,
        EnemyKind::Speedy,
        EnemyKind::Leaper,
        EnemyKind::Helix,
        EnemyKind::Sine,
        EnemyKind::Exploder,
        EnemyKind::Tracker,
    ];

    /// Gauge value at which the enemy steps; period is `threshold + 1` ticks
    pub fn move_threshold(self) -> u32 {
        match self {
            EnemyKind::Basic => 3,
            EnemyKind::Speedy => 1,
            EnemyKind::Leaper => 2,
            EnemyKind::Helix | EnemyKind::Sine => 4,
            EnemyKind::Exploder => 3,
            EnemyKind::Tracker => 4,
        }
    }

    pub fn base_color(self) -> Rgb {
        match self {
            EnemyKind::Basic => Rgb::new(0xff, 0xff, 0xff),
            EnemyKind::Speedy => Rgb::new(0xf1, 0xbb, 0xb0),
            EnemyKind::Leaper => Rgb::new(0xf1, 0xde, 0xb0),
            EnemyKind::Helix => Rgb::new(0xfe, 0xfb, 0x7f),
            EnemyKind::Sine => Rgb::new(0xff, 0x00, 0x5a),
            EnemyKind::Exploder => FUSE_PALETTE[0],
            EnemyKind::Tracker => Rgb::new(0x00, 0xff, 0x00),
        }
    }
}

/// Maximum perpendicular offset of a Helix pair
pub const HELIX_MAX_OFFSET: i32 = 1;
/// Maximum perpendicular offset of a Sine pair
pub const SINE_MAX_OFFSET: i32 = 2;
/// Offset change per oscillator step
pub const OFFSET_STEP: f32 = 0.5;

/// Exploder colours while the fuse burns, indexed by `4 * gauge / explode_time`
pub const FUSE_PALETTE: [Rgb; 5] = [
    Rgb::new(0xff, 0x00, 0x00),
    Rgb::new(0xff, 0xbb, 0x00),
    Rgb::new(0xfc, 0xff, 0x00),
    Rgb::new(0x3d, 0xff, 0x00),
    Rgb::new(0x00, 0xff, 0xcc),
];
/// Exploder colour after detonation
pub const BLAST_COLOR: Rgb = Rgb::new(0xff, 0x88, 0x52);

/// 24-bit colour hint for the render sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb`
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Cells an enemy occupies for collision and drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Footprint {
    Cell(IVec2),
    Pair([IVec2; 2]),
    /// Square block of Chebyshev radius `radius` around `center`
    Blast { center: IVec2, radius: i32 },
}

/// What the render sink receives for one enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub id: u32,
    pub kind: EnemyKind,
    pub footprint: Footprint,
    pub color: Rgb,
    /// Size multiplier for the drawn cell (1.0 = exactly one cell)
    pub scale: f32,
}

/// Which dual-point pattern an oscillator draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Wave {
    /// Both points share the phase-selected perpendicular
    Helix,
    /// Points use opposite perpendiculars
    Sine,
}

/// Dual-point oscillator state (Helix, Sine)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Oscillator {
    pub wave: Wave,
    /// Second cell of the pair; the first is `Enemy::pos`
    pub partner: IVec2,
    pub offset: f32,
    /// +1.0 or -1.0
    pub offset_direction: f32,
    pub max_offset: i32,
    /// Quadrant counter, wraps mod 4
    pub phase: u8,
}

/// Exploder fuse
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fuse {
    /// Moves made so far, saturating at `explode_time`
    pub gauge: u32,
    pub explode_time: u32,
    pub exploded: bool,
    /// Display calls since detonation
    pub afterglow: u32,
}

/// Tracker pursuit state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pursuit {
    pub target: IVec2,
    /// Gate steps taken, pursuit or not
    pub phase: u32,
    pub track_delay: u32,
    pub moves_made: u32,
    pub max_moves: u32,
    /// Set once the tracker is strictly inside the grid
    pub entered: bool,
}

/// Variant payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Behavior {
    /// Basic, Speedy, Leaper: `stride` cells per step along the direction
    Straight { stride: i32 },
    Oscillating(Oscillator),
    Exploding(Fuse),
    Tracking(Pursuit),
}

/// Recipe for a new enemy, including the per-spawn random extras
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blueprint {
    Basic,
    Speedy,
    Leaper,
    /// `flipped` mirrors the partner's starting side
    Helix { flipped: bool },
    Sine { flipped: bool },
    Exploder { explode_time: u32 },
    Tracker {
        track_delay: u32,
        max_moves: u32,
        target: IVec2,
    },
}

impl Blueprint {
    pub fn kind(&self) -> EnemyKind {
        match self {
            Blueprint::Basic => EnemyKind::Basic,
            Blueprint::Speedy => EnemyKind::Speedy,
            Blueprint::Leaper => EnemyKind::Leaper,
            Blueprint::Helix { .. } => EnemyKind::Helix,
            Blueprint::Sine { .. } => EnemyKind::Sine,
            Blueprint::Exploder { .. } => EnemyKind::Exploder,
            Blueprint::Tracker { .. } => EnemyKind::Tracker,
        }
    }
}

/// A live enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub direction: Direction,
    /// Primary cell
    pub pos: IVec2,
    pub move_gauge: u32,
    pub move_threshold: u32,
    pub bounds: Bounds,
    pub behavior: Behavior,
}

impl Enemy {
    /// Build an enemy at an explicit cell
    pub fn new(
        id: u32,
        blueprint: Blueprint,
        direction: Direction,
        pos: IVec2,
        arena: &Arena,
    ) -> Result<Self, ConfigError> {
        let kind = blueprint.kind();
        let mut bounds = arena.edge_bounds();

        let behavior = match blueprint {
            Blueprint::Basic | Blueprint::Speedy => Behavior::Straight { stride: 1 },
            Blueprint::Leaper => Behavior::Straight { stride: 2 },
            Blueprint::Helix { flipped } => {
                Behavior::Oscillating(Oscillator::new(Wave::Helix, direction, pos, flipped))
            }
            Blueprint::Sine { flipped } => {
                Behavior::Oscillating(Oscillator::new(Wave::Sine, direction, pos, flipped))
            }
            Blueprint::Exploder { explode_time } => {
                if explode_time == 0 {
                    return Err(ConfigError::ZeroExplodeTime);
                }
                Behavior::Exploding(Fuse {
                    gauge: 0,
                    explode_time,
                    exploded: false,
                    afterglow: 0,
                })
            }
            Blueprint::Tracker {
                track_delay,
                max_moves,
                target,
            } => {
                if max_moves == 0 {
                    return Err(ConfigError::ZeroMaxMoves);
                }
                if track_delay == 0 {
                    return Err(ConfigError::ZeroTrackDelay);
                }
                bounds = arena.inner_bounds();
                Behavior::Tracking(Pursuit {
                    target,
                    phase: 0,
                    track_delay,
                    moves_made: 0,
                    max_moves,
                    entered: bounds.contains(pos),
                })
            }
        };

        Ok(Self {
            id,
            kind,
            direction,
            pos,
            move_gauge: 0,
            move_threshold: kind.move_threshold(),
            bounds,
            behavior,
        })
    }

    /// Build an enemy on its entry cell for `direction`, `lane` being the
    /// coordinate across the travel axis
    pub fn spawn(
        id: u32,
        blueprint: Blueprint,
        direction: Direction,
        lane: i32,
        arena: &Arena,
    ) -> Result<Self, ConfigError> {
        Self::new(id, blueprint, direction, arena.entry_cell(direction, lane), arena)
    }

    pub fn oscillator(&self) -> Option<&Oscillator> {
        match &self.behavior {
            Behavior::Oscillating(osc) => Some(osc),
            _ => None,
        }
    }

    pub fn fuse(&self) -> Option<&Fuse> {
        match &self.behavior {
            Behavior::Exploding(fuse) => Some(fuse),
            _ => None,
        }
    }

    pub fn pursuit(&self) -> Option<&Pursuit> {
        match &self.behavior {
            Behavior::Tracking(pursuit) => Some(pursuit),
            _ => None,
        }
    }
}

impl Oscillator {
    fn new(wave: Wave, direction: Direction, pos: IVec2, flipped: bool) -> Self {
        let max_offset = match wave {
            Wave::Helix => HELIX_MAX_OFFSET,
            Wave::Sine => SINE_MAX_OFFSET,
        };
        let sign = if flipped { -1 } else { 1 };
        Self {
            wave,
            partner: pos + direction.perpendiculars()[0] * (sign * max_offset),
            offset: 0.0,
            offset_direction: 1.0,
            max_offset,
            phase: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds_match_variant_speeds() {
        assert_eq!(EnemyKind::Basic.move_threshold(), 3);
        assert_eq!(EnemyKind::Speedy.move_threshold(), 1);
        assert_eq!(EnemyKind::Leaper.move_threshold(), 2);
        assert_eq!(EnemyKind::Exploder.move_threshold(), 3);
    }

    #[test]
    fn test_zero_max_moves_rejected() {
        let arena = Arena::default();
        let err = Enemy::spawn(
            1,
            Blueprint::Tracker {
                track_delay: 2,
                max_moves: 0,
                target: IVec2::new(10, 10),
            },
            Direction::Down,
            5,
            &arena,
        )
        .unwrap_err();
        assert_eq!(err, ConfigError::ZeroMaxMoves);
    }

    #[test]
    fn test_zero_track_delay_and_fuse_rejected() {
        let arena = Arena::default();
        let tracker = Blueprint::Tracker {
            track_delay: 0,
            max_moves: 5,
            target: IVec2::ZERO,
        };
        assert_eq!(
            Enemy::spawn(1, tracker, Direction::Up, 3, &arena),
            Err(ConfigError::ZeroTrackDelay)
        );
        assert_eq!(
            Enemy::spawn(1, Blueprint::Exploder { explode_time: 0 }, Direction::Up, 3, &arena),
            Err(ConfigError::ZeroExplodeTime)
        );
    }

    #[test]
    fn test_oscillator_partner_starts_one_amplitude_away() {
        let arena = Arena::default();
        let helix = Enemy::spawn(1, Blueprint::Helix { flipped: false }, Direction::Left, 8, &arena)
            .unwrap();
        let osc = helix.oscillator().unwrap();
        assert_eq!(helix.pos, IVec2::new(21, 8));
        assert_eq!(osc.partner, IVec2::new(21, 7));

        let sine = Enemy::spawn(2, Blueprint::Sine { flipped: true }, Direction::Up, 4, &arena)
            .unwrap();
        assert_eq!(sine.oscillator().unwrap().partner, IVec2::new(2, 21));
    }

    #[test]
    fn test_tracker_uses_inner_bounds() {
        let arena = Arena::default();
        let tracker = Enemy::spawn(
            1,
            Blueprint::Tracker {
                track_delay: 2,
                max_moves: 6,
                target: IVec2::new(10, 10),
            },
            Direction::Right,
            10,
            &arena,
        )
        .unwrap();
        assert_eq!(tracker.bounds, arena.inner_bounds());
        assert!(!tracker.pursuit().unwrap().entered);
    }

    #[test]
    fn test_rgb_hex() {
        assert_eq!(BLAST_COLOR.to_hex(), "#ff8852");
        assert_eq!(EnemyKind::Sine.base_color().to_hex(), "#ff005a");
    }
}
