use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::action::Direction;
use super::grid::{GridSize, Position};

/// Hazards on the lawn. A tombstone never moves; a zombie shambles
/// continuously and bounces off the grid edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstacleKind {
    Tombstone,
    Zombie,
}

/// A live obstacle.
///
/// Position is kept as sub-cell floats so a zombie moves smoothly between
/// frames; collision always works on the truncated [`Obstacle::cell`]. The
/// float coordinates stay within `[0, width - 1]` x `[0, height - 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    x: f32,
    y: f32,
    pub direction: Direction,
}

impl Obstacle {
    pub fn tombstone(position: Position) -> Self {
        Self {
            kind: ObstacleKind::Tombstone,
            x: position.x as f32,
            y: position.y as f32,
            direction: Direction::Down,
        }
    }

    pub fn zombie(position: Position, direction: Direction) -> Self {
        Self {
            kind: ObstacleKind::Zombie,
            x: position.x as f32,
            y: position.y as f32,
            direction,
        }
    }

    /// The grid cell this obstacle currently occupies
    pub fn cell(&self) -> Position {
        Position::new(self.x.floor() as i32, self.y.floor() as i32)
    }

    /// Advance continuous motion by `dt` seconds. Tombstones ignore this.
    ///
    /// On reaching an edge the position clamps to the boundary and the
    /// travel axis reflects; independently there is a small `turn_chance`
    /// per second of wandering off in a random direction.
    pub fn update(
        &mut self,
        dt: f32,
        grid: GridSize,
        speed: f32,
        turn_chance: f32,
        rng: &mut StdRng,
    ) {
        if self.kind != ObstacleKind::Zombie {
            return;
        }

        let (dx, dy) = self.direction.delta();
        self.x += dx as f32 * speed * dt;
        self.y += dy as f32 * speed * dt;

        let max_x = (grid.width - 1) as f32;
        let max_y = (grid.height - 1) as f32;
        let mut bounced = false;
        if self.x < 0.0 || self.x > max_x {
            self.x = self.x.clamp(0.0, max_x);
            bounced = true;
        }
        if self.y < 0.0 || self.y > max_y {
            self.y = self.y.clamp(0.0, max_y);
            bounced = true;
        }
        if bounced {
            self.direction = self.direction.opposite();
        } else if rng.gen::<f32>() < turn_chance * dt {
            self.direction = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
        }
    }
}
