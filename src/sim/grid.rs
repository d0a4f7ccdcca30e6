//! Grid geometry: directions, the arena rectangle, and exit bounds
//!
//! Cells are integer `IVec2`s with y growing downward. The top `hud_rows`
//! rows belong to the score band and are never playable.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

/// Travel direction of an enemy, or a player move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step on the grid
    pub fn unit(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    /// The two perpendicular unit vectors used by dual-point enemies.
    ///
    /// The order matters: oscillators index into this pair.
    pub fn perpendiculars(self) -> [IVec2; 2] {
        match self {
            Direction::Up => [IVec2::new(1, 0), IVec2::new(-1, 0)],
            Direction::Down => [IVec2::new(-1, 0), IVec2::new(1, 0)],
            Direction::Left => [IVec2::new(0, -1), IVec2::new(0, 1)],
            Direction::Right => [IVec2::new(0, 1), IVec2::new(0, -1)],
        }
    }

    /// Inverse of [`Direction::unit`]; anything but an axis-aligned unit
    /// vector is rejected.
    pub fn from_delta(delta: IVec2) -> Option<Self> {
        match (delta.x, delta.y) {
            (0, -1) => Some(Direction::Up),
            (0, 1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Exit box for an enemy. Crossing the edge on the travel side retires it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub up: i32,
    pub down: i32,
    pub left: i32,
    pub right: i32,
}

impl Bounds {
    /// True once `cell` has reached the edge it is travelling toward,
    /// with `margin` extra cells of slack.
    pub fn passed(&self, cell: IVec2, direction: Direction, margin: i32) -> bool {
        match direction {
            Direction::Up => cell.y <= self.up - margin,
            Direction::Down => cell.y >= self.down + margin,
            Direction::Left => cell.x <= self.left - margin,
            Direction::Right => cell.x >= self.right + margin,
        }
    }

    /// Strictly inside on every side
    pub fn contains(&self, cell: IVec2) -> bool {
        cell.x > self.left && cell.x < self.right && cell.y > self.up && cell.y < self.down
    }
}

/// The playing field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arena {
    pub width: i32,
    pub height: i32,
    pub hud_rows: i32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
            hud_rows: 2,
        }
    }
}

impl Arena {
    pub fn new(width: i32, height: i32, hud_rows: i32) -> Self {
        Self {
            width,
            height,
            hud_rows,
        }
    }

    /// Player start cell
    pub fn center(&self) -> IVec2 {
        IVec2::new(self.width / 2, self.height / 2)
    }

    /// Cells the player may occupy
    pub fn is_playable(&self, cell: IVec2) -> bool {
        (0..self.width).contains(&cell.x) && (self.hud_rows..self.height).contains(&cell.y)
    }

    /// Bounds one cell beyond the field, used by every travelling enemy
    pub fn edge_bounds(&self) -> Bounds {
        Bounds {
            up: self.hud_rows - 1,
            down: self.height + 1,
            left: -1,
            right: self.width + 1,
        }
    }

    /// The grid itself, used by enemies that roam freely
    pub fn inner_bounds(&self) -> Bounds {
        Bounds {
            up: 0,
            down: self.height,
            left: 0,
            right: self.width,
        }
    }

    /// Inclusive range of the lane coordinate for an enemy entering in
    /// `direction` (x for vertical travel, y for horizontal)
    pub fn lane_range(&self, direction: Direction) -> (i32, i32) {
        match direction {
            Direction::Up | Direction::Down => (0, self.width),
            Direction::Left | Direction::Right => (self.hud_rows, self.height),
        }
    }

    /// Spawn cell: one step outside the field on the side opposite travel
    pub fn entry_cell(&self, direction: Direction, lane: i32) -> IVec2 {
        let edges = self.edge_bounds();
        match direction {
            Direction::Up => IVec2::new(lane, edges.down),
            Direction::Down => IVec2::new(lane, edges.up),
            Direction::Left => IVec2::new(edges.right, lane),
            Direction::Right => IVec2::new(edges.left, lane),
        }
    }
}

/// Snap a continuous point to the nearest cell, ties to even
#[inline]
pub fn round_cell(point: Vec2) -> IVec2 {
    IVec2::new(
        point.x.round_ties_even() as i32,
        point.y.round_ties_even() as i32,
    )
}

/// Chebyshev (king-move) distance between two cells
#[inline]
pub fn chebyshev(a: IVec2, b: IVec2) -> i32 {
    let d = (a - b).abs();
    d.x.max(d.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_cell_ties_to_even() {
        assert_eq!(round_cell(Vec2::new(2.5, 3.5)), IVec2::new(2, 4));
        assert_eq!(round_cell(Vec2::new(-0.5, -1.5)), IVec2::new(0, -2));
        assert_eq!(round_cell(Vec2::new(0.49, 0.51)), IVec2::new(0, 1));
    }

    #[test]
    fn test_entry_cells_sit_one_step_outside() {
        let arena = Arena::default();
        assert_eq!(arena.entry_cell(Direction::Left, 7), IVec2::new(21, 7));
        assert_eq!(arena.entry_cell(Direction::Right, 7), IVec2::new(-1, 7));
        assert_eq!(arena.entry_cell(Direction::Up, 3), IVec2::new(3, 21));
        // Downward entries start in the last HUD row
        assert_eq!(arena.entry_cell(Direction::Down, 3), IVec2::new(3, 1));
    }

    #[test]
    fn test_entry_cells_are_not_yet_expired() {
        let arena = Arena::default();
        let edges = arena.edge_bounds();
        for direction in Direction::ALL {
            let (lo, _) = arena.lane_range(direction);
            let cell = arena.entry_cell(direction, lo);
            assert!(!arena.is_playable(cell));
            assert!(!edges.passed(cell, direction, 0));
            assert!(!edges.passed(cell + direction.unit(), direction, 0));
        }
    }

    #[test]
    fn test_playable_excludes_hud() {
        let arena = Arena::default();
        assert!(arena.is_playable(IVec2::new(0, 2)));
        assert!(arena.is_playable(IVec2::new(19, 19)));
        assert!(!arena.is_playable(IVec2::new(5, 1)));
        assert!(!arena.is_playable(IVec2::new(20, 10)));
        assert!(!arena.is_playable(IVec2::new(-1, 10)));
    }

    #[test]
    fn test_from_delta_rejects_diagonals() {
        assert_eq!(Direction::from_delta(IVec2::new(1, 0)), Some(Direction::Right));
        assert_eq!(Direction::from_delta(IVec2::new(1, 1)), None);
        assert_eq!(Direction::from_delta(IVec2::new(0, 2)), None);
        assert_eq!(Direction::from_delta(IVec2::ZERO), None);
    }

    #[test]
    fn test_perpendiculars_are_opposite_and_orthogonal() {
        for direction in Direction::ALL {
            let [a, b] = direction.perpendiculars();
            assert_eq!(a, -b);
            assert_eq!(a.dot(direction.unit()), 0);
        }
    }
}
