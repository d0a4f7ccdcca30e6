//! Enemy vs player collision
//!
//! Collisions are checked against the footprint an enemy had when it was
//! last drawn, before anything moves this tick.

use glam::IVec2;

use super::enemy::{Enemy, Footprint};
use super::grid::chebyshev;

impl Footprint {
    /// Whether `cell` is covered
    pub fn contains(&self, cell: IVec2) -> bool {
        match *self {
            Footprint::Cell(c) => c == cell,
            Footprint::Pair([a, b]) => a == cell || b == cell,
            Footprint::Blast { center, radius } => chebyshev(center, cell) <= radius,
        }
    }
}

/// Check whether an enemy currently covers the player's cell
#[inline]
pub fn collides(enemy: &Enemy, player: IVec2) -> bool {
    enemy.footprint().contains(player)
}

/// First enemy (in list order) covering the player's cell
pub fn first_collision(enemies: &[Enemy], player: IVec2) -> Option<&Enemy> {
    enemies.iter().find(|enemy| collides(enemy, player))
}
