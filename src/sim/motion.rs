//! Per-variant movement and lifecycle rules
//!
//! Every enemy advances through the same gauge gate: the gauge counts up
//! each tick and the enemy takes one step on the tick it equals the
//! threshold, resetting to zero. What a "step" means depends on the
//! [`Behavior`] payload.

use glam::IVec2;

use super::enemy::{
    BLAST_COLOR, Behavior, Enemy, FUSE_PALETTE, Footprint, Fuse, OFFSET_STEP, Oscillator, Pursuit,
    Rgb, Sprite, Wave,
};
use super::grid::{Bounds, Direction, round_cell};

impl Enemy {
    /// Advance one tick. Returns true if the gate opened this tick.
    pub fn advance(&mut self) -> bool {
        if self.move_gauge != self.move_threshold {
            self.move_gauge += 1;
            return false;
        }
        self.move_gauge = 0;

        let direction = self.direction;
        match &mut self.behavior {
            Behavior::Straight { stride } => {
                self.pos += direction.unit() * *stride;
            }
            Behavior::Oscillating(osc) => {
                self.pos = osc.step(self.pos, direction);
            }
            Behavior::Exploding(fuse) => {
                if !fuse.exploded {
                    self.pos += direction.unit();
                    fuse.burn();
                }
            }
            Behavior::Tracking(pursuit) => {
                self.pos = pursuit.step(self.pos, &self.bounds);
            }
        }
        true
    }

    /// Refresh the pursuit target. No effect on non-trackers.
    pub fn set_target(&mut self, target: IVec2) {
        if let Behavior::Tracking(pursuit) = &mut self.behavior {
            pursuit.target = target;
        }
    }

    /// Cells this enemy currently occupies
    pub fn footprint(&self) -> Footprint {
        match &self.behavior {
            Behavior::Oscillating(osc) => Footprint::Pair([self.pos, osc.partner]),
            Behavior::Exploding(fuse) if fuse.exploded => Footprint::Blast {
                center: self.pos,
                radius: 1,
            },
            _ => Footprint::Cell(self.pos),
        }
    }

    /// True once the enemy has left its bounds or run out of life
    pub fn is_expired(&self) -> bool {
        match &self.behavior {
            Behavior::Straight { .. } => self.bounds.passed(self.pos, self.direction, 0),
            Behavior::Oscillating(osc) => {
                self.bounds.passed(self.pos, self.direction, osc.max_offset)
                    && self.bounds.passed(osc.partner, self.direction, osc.max_offset)
            }
            Behavior::Exploding(fuse) => {
                if fuse.exploded {
                    fuse.afterglow >= fuse.explode_time
                } else {
                    self.bounds.passed(self.pos, self.direction, 0)
                }
            }
            Behavior::Tracking(pursuit) => {
                pursuit.moves_made >= pursuit.max_moves
                    || (pursuit.entered && !self.bounds.contains(self.pos))
            }
        }
    }

    /// Display call: snapshot for the render sink.
    ///
    /// A detonated exploder counts its afterglow here, so this must be called
    /// exactly once per rendered frame.
    pub fn present(&mut self) -> Sprite {
        let footprint = self.footprint();
        let (color, scale) = match &mut self.behavior {
            Behavior::Exploding(fuse) => {
                if fuse.exploded {
                    fuse.afterglow += 1;
                    (BLAST_COLOR, 1.0)
                } else {
                    (fuse.color(), 1.0)
                }
            }
            Behavior::Tracking(pursuit) => (pursuit.color(), pursuit.pulse()),
            _ => (self.kind.base_color(), 1.0),
        };
        Sprite {
            id: self.id,
            kind: self.kind,
            footprint,
            color,
            scale,
        }
    }
}

impl Footprint {
    /// Every covered cell, for drawing
    pub fn cells(&self) -> Vec<IVec2> {
        match *self {
            Footprint::Cell(c) => vec![c],
            Footprint::Pair([a, b]) if a == b => vec![a],
            Footprint::Pair([a, b]) => vec![a, b],
            Footprint::Blast { center, radius } => {
                let mut cells = Vec::with_capacity(((2 * radius + 1) * (2 * radius + 1)) as usize);
                for dy in -radius..=radius {
                    for dx in -radius..=radius {
                        cells.push(center + IVec2::new(dx, dy));
                    }
                }
                cells
            }
        }
    }
}

impl Oscillator {
    /// One oscillator step from `pos`. Returns the new primary cell and
    /// updates the partner.
    fn step(&mut self, pos: IVec2, direction: Direction) -> IVec2 {
        let [perp_a, perp_b] = direction.perpendiculars();
        let (first, second) = match self.wave {
            Wave::Helix => {
                let perp = if self.phase / 2 == 0 { perp_a } else { perp_b };
                (perp, perp)
            }
            Wave::Sine => (perp_a, perp_b),
        };

        let anchor = (pos + direction.unit()).as_vec2();
        let lead = round_cell(anchor + first.as_vec2() * self.offset);
        self.partner = round_cell(anchor + second.as_vec2() * self.offset);

        self.offset += self.offset_direction * OFFSET_STEP;
        let max = self.max_offset as f32;
        let turned = match self.wave {
            Wave::Helix => self.offset.abs() > max,
            Wave::Sine => self.offset.abs() >= max,
        };
        if turned {
            self.offset_direction = -self.offset_direction;
            self.phase = (self.phase + 1) % 4;
            self.offset = self.offset.clamp(-max, max);
        }

        lead
    }
}

impl Fuse {
    fn burn(&mut self) {
        if self.gauge < self.explode_time {
            self.gauge += 1;
        }
        if self.gauge == self.explode_time {
            self.exploded = true;
        }
    }

    /// Charging colour; walks the palette as the fuse burns
    pub fn color(&self) -> Rgb {
        let index = (4 * u64::from(self.gauge) / u64::from(self.explode_time)) as usize;
        FUSE_PALETTE[index.min(FUSE_PALETTE.len() - 1)]
    }
}

impl Pursuit {
    fn step(&mut self, pos: IVec2, bounds: &Bounds) -> IVec2 {
        let mut next = pos;
        if self.phase % self.track_delay == 0 && self.moves_made < self.max_moves {
            next += (self.target - pos).signum();
            self.moves_made += 1;
        }
        self.phase += 1;
        if bounds.contains(next) {
            self.entered = true;
        }
        next
    }

    /// Green at spawn, red when out of moves
    pub fn color(&self) -> Rgb {
        let life = 1.0 - self.moves_made as f32 / self.max_moves as f32;
        let red = (255.0 * (1.0 - life)) as u8;
        let green = (255.0 * life) as u8;
        Rgb::new(red, green, 0)
    }

    /// Drawn size multiplier
    pub fn pulse(&self) -> f32 {
        1.0 + 0.6 * (self.phase as f32 * 0.1).sin().abs()
    }
}
