use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::action::Direction;
use super::grid::{GridSize, Position};

/// Timed status effect attached to the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityKind {
    Shield,
    SpeedBoost,
}

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalReason {
    SelfCollision,
    ObstacleCollision,
}

/// The player snake: ordered body, buffered steering, growth counter and
/// timed abilities.
///
/// Ability durations are stored as remaining move ticks in a kind-keyed map;
/// granting an ability that is already active resets its timer rather than
/// stacking.
#[derive(Debug, Clone)]
pub struct Snake {
    /// Body cells, head at index 0
    body: Vec<Position>,
    direction: Direction,
    pending_direction: Direction,
    growth_pending: u32,
    abilities: HashMap<AbilityKind, u32>,
    speed_multiplier: f32,
}

impl Snake {
    /// Create a snake with its head at `start`, trailing `length - 1` body
    /// cells opposite to `direction`.
    pub fn new(grid: GridSize, start: Position, direction: Direction, length: usize) -> Self {
        let mut body = vec![grid.wrap(start)];
        for i in 1..length.max(1) {
            let prev = body[i - 1];
            body.push(grid.step(prev, direction.opposite()));
        }

        Self {
            body,
            direction,
            pending_direction: direction,
            growth_pending: 0,
            abilities: HashMap::new(),
            speed_multiplier: 1.0,
        }
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn body(&self) -> &[Position] {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Buffer a steering command for the next move tick.
    ///
    /// A 180-degree reversal of the current travel direction is silently
    /// dropped; it would always kill any snake longer than one cell.
    pub fn set_direction(&mut self, direction: Direction) {
        if !self.direction.is_opposite(direction) {
            self.pending_direction = direction;
        }
    }

    /// Withhold `amount` tail removals on future moves
    pub fn grow(&mut self, amount: u32) {
        self.growth_pending += amount;
    }

    pub fn growth_pending(&self) -> u32 {
        self.growth_pending
    }

    /// Grant an ability for `duration` move ticks, last write wins.
    ///
    /// `speed_multiplier` is only consulted for [`AbilityKind::SpeedBoost`].
    pub fn add_ability(&mut self, kind: AbilityKind, duration: u32, speed_multiplier: f32) {
        self.abilities.insert(kind, duration.max(1));
        if kind == AbilityKind::SpeedBoost {
            self.speed_multiplier = speed_multiplier;
        }
    }

    pub fn ability_remaining(&self, kind: AbilityKind) -> Option<u32> {
        self.abilities.get(&kind).copied()
    }

    /// Shield implies invulnerability to both self- and obstacle-collision
    pub fn is_shielded(&self) -> bool {
        self.abilities.contains_key(&AbilityKind::Shield)
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    /// Seconds between moves once the speed boost is factored in
    pub fn effective_move_interval(&self, base_interval: f32) -> f32 {
        base_interval / self.speed_multiplier
    }

    /// Advance one cell in the committed direction.
    ///
    /// Returns `Some(SelfCollision)` and leaves the body untouched when the
    /// new head would land on an existing body cell (tail included) without
    /// an active shield. Ability timers tick down once per call; an expired
    /// speed boost resets the multiplier.
    pub fn advance(&mut self, grid: GridSize) -> Option<TerminalReason> {
        self.direction = self.pending_direction;
        let new_head = grid.step(self.head(), self.direction);

        if self.body[1..].contains(&new_head) && !self.is_shielded() {
            return Some(TerminalReason::SelfCollision);
        }

        self.body.insert(0, new_head);
        if self.growth_pending > 0 {
            self.growth_pending -= 1;
        } else {
            self.body.pop();
        }

        self.tick_abilities();
        None
    }

    fn tick_abilities(&mut self) {
        let mut expired = Vec::new();
        for (kind, remaining) in self.abilities.iter_mut() {
            *remaining = remaining.saturating_sub(1);
            if *remaining == 0 {
                expired.push(*kind);
            }
        }
        for kind in expired {
            self.abilities.remove(&kind);
            if kind == AbilityKind::SpeedBoost {
                self.speed_multiplier = 1.0;
            }
        }
    }
}
