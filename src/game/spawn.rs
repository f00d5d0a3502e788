use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::action::Direction;
use super::config::GameConfig;
use super::food::{Food, FoodKind};
use super::grid::{GridSize, Position};
use super::obstacle::{Obstacle, ObstacleKind};

/// Places food and obstacles on free cells.
///
/// Placement is best effort: a bounded number of uniform cell draws per
/// request, with `None` meaning "try again a later tick". Holds the round's
/// RNG so a seeded round replays identically.
pub struct Spawner {
    rng: StdRng,
    last_obstacle_spawn: f32,
}

impl Spawner {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            last_obstacle_spawn: 0.0,
        }
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Weighted draw of a food kind plus a free cell.
    ///
    /// Returns `None` when the retry budget is exhausted; the round loop
    /// retries on a later tick rather than treating this as an error.
    pub fn spawn_food(
        &mut self,
        config: &GameConfig,
        occupied: &HashSet<Position>,
    ) -> Option<Food> {
        let kind = self.draw_food_kind(config);
        let position = self.free_cell(config.grid, occupied, config.spawn_attempts, None)?;
        Some(Food { kind, position })
    }

    /// Attempt one obstacle spawn, gated on grace period, live cap, per-spawn
    /// cooldown and the difficulty's probability roll.
    pub fn try_spawn_obstacle(
        &mut self,
        config: &GameConfig,
        elapsed: f32,
        live_obstacles: usize,
        occupied: &HashSet<Position>,
    ) -> Option<Obstacle> {
        if elapsed < config.obstacle_grace_period {
            return None;
        }
        if live_obstacles >= config.max_obstacles {
            return None;
        }
        if elapsed - self.last_obstacle_spawn < config.obstacle_cooldown {
            return None;
        }
        if self.rng.gen::<f32>() >= config.difficulty.obstacle_frequency() {
            return None;
        }

        let exclusion = (config.grid.center(), config.center_exclusion_radius);
        let position = match self.free_cell(
            config.grid,
            occupied,
            config.spawn_attempts,
            Some(exclusion),
        ) {
            Some(position) => position,
            None => {
                debug!("obstacle placement deferred, no free cell found");
                return None;
            }
        };

        self.last_obstacle_spawn = elapsed;
        let obstacle = match self.draw_obstacle_kind(config) {
            ObstacleKind::Zombie => Obstacle::zombie(position, self.random_direction()),
            ObstacleKind::Tombstone => Obstacle::tombstone(position),
        };
        Some(obstacle)
    }

    pub fn random_direction(&mut self) -> Direction {
        Direction::ALL[self.rng.gen_range(0..Direction::ALL.len())]
    }

    /// Cumulative-weight scan against a uniform draw in `[0, total)`
    fn draw_food_kind(&mut self, config: &GameConfig) -> FoodKind {
        let table = &config.food_table;
        let total = table.total_weight();
        if total == 0 || table.entries().is_empty() {
            return FoodKind::Sun;
        }

        let mut roll = self.rng.gen_range(0..total);
        for (kind, spec) in table.entries() {
            if roll < spec.weight {
                return *kind;
            }
            roll -= spec.weight;
        }
        // only reachable when the table ends in zero-weight entries
        table.entries().last().map(|(kind, _)| *kind).unwrap()
    }

    fn draw_obstacle_kind(&mut self, config: &GameConfig) -> ObstacleKind {
        let total = config.zombie_weight + config.tombstone_weight;
        if total == 0 {
            return ObstacleKind::Tombstone;
        }
        if self.rng.gen_range(0..total) < config.zombie_weight {
            ObstacleKind::Zombie
        } else {
            ObstacleKind::Tombstone
        }
    }

    fn free_cell(
        &mut self,
        grid: GridSize,
        occupied: &HashSet<Position>,
        attempts: u32,
        exclusion: Option<(Position, i32)>,
    ) -> Option<Position> {
        for _ in 0..attempts {
            let pos = Position::new(
                self.rng.gen_range(0..grid.width),
                self.rng.gen_range(0..grid.height),
            );
            if occupied.contains(&pos) {
                continue;
            }
            if let Some((center, radius)) = exclusion {
                if grid.manhattan(pos, center) < radius {
                    continue;
                }
            }
            return Some(pos);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::game::config::Difficulty;

    fn config() -> GameConfig {
        GameConfig::small()
    }

    #[test]
    fn food_avoids_occupied_cells() {
        let mut spawner = Spawner::new(Some(1));
        let config = config();
        let mut occupied = HashSet::new();
        // everything but one column blocked
        for x in 0..config.grid.width {
            for y in 0..config.grid.height {
                if x != 4 {
                    occupied.insert(Position::new(x, y));
                }
            }
        }
        for _ in 0..50 {
            if let Some(food) = spawner.spawn_food(&config, &occupied) {
                assert_eq!(food.position.x, 4);
            }
        }
    }

    #[test]
    fn full_grid_defers_instead_of_crashing() {
        // Scenario: every cell of a 2x2 grid occupied
        let mut spawner = Spawner::new(Some(2));
        let mut config = GameConfig::new(2, 2);
        config.spawn_attempts = 10;
        let occupied: HashSet<Position> = (0..2)
            .flat_map(|x| (0..2).map(move |y| Position::new(x, y)))
            .collect();
        assert!(spawner.spawn_food(&config, &occupied).is_none());
    }

    #[test]
    fn weighted_draw_tracks_configured_weights() {
        let mut spawner = Spawner::new(Some(3));
        let config = config();
        let total = config.food_table.total_weight() as f64;

        let mut counts: HashMap<FoodKind, u32> = HashMap::new();
        let draws = 20_000;
        for _ in 0..draws {
            *counts.entry(spawner.draw_food_kind(&config)).or_default() += 1;
        }

        for (kind, spec) in config.food_table.entries() {
            let expected = spec.weight as f64 / total;
            let observed = counts.get(kind).copied().unwrap_or(0) as f64 / draws as f64;
            assert!(
                (observed - expected).abs() < 0.02,
                "{}: observed {observed:.3}, expected {expected:.3}",
                kind.name()
            );
        }
    }

    #[test]
    fn no_obstacle_before_grace_period() {
        let mut spawner = Spawner::new(Some(4));
        let config = config();
        let occupied = HashSet::new();
        for _ in 0..1000 {
            assert!(spawner
                .try_spawn_obstacle(&config, 2.9, 0, &occupied)
                .is_none());
        }
    }

    #[test]
    fn obstacle_cap_is_respected() {
        let mut spawner = Spawner::new(Some(5));
        let config = config();
        let occupied = HashSet::new();
        for _ in 0..1000 {
            assert!(spawner
                .try_spawn_obstacle(&config, 100.0, config.max_obstacles, &occupied)
                .is_none());
        }
    }

    #[test]
    fn obstacle_spawns_honor_the_cooldown() {
        let mut spawner = Spawner::new(Some(6));
        let mut config = config();
        // make the roll always pass so only the cooldown gates
        config.difficulty = Difficulty::Hard;
        let occupied = HashSet::new();

        let mut elapsed = config.obstacle_grace_period;
        let mut first = None;
        while first.is_none() && elapsed < 1000.0 {
            elapsed += 0.1;
            first = spawner
                .try_spawn_obstacle(&config, elapsed, 0, &occupied)
                .map(|_| elapsed);
        }
        let first = first.expect("an obstacle should eventually spawn");

        // immediately after a spawn the cooldown blocks everything
        for i in 1..=10 {
            let t = first + i as f32 * (config.obstacle_cooldown / 20.0);
            assert!(spawner.try_spawn_obstacle(&config, t, 1, &occupied).is_none());
        }
    }

    #[test]
    fn obstacles_keep_out_of_the_center() {
        let mut spawner = Spawner::new(Some(7));
        let config = config();
        let occupied = HashSet::new();
        let center = config.grid.center();

        let mut spawned = 0;
        let mut elapsed = 0.0;
        while spawned < 20 && elapsed < 100_000.0 {
            elapsed += 0.1;
            if let Some(obstacle) = spawner.try_spawn_obstacle(&config, elapsed, 0, &occupied) {
                spawned += 1;
                assert!(
                    config.grid.manhattan(obstacle.cell(), center)
                        >= config.center_exclusion_radius
                );
            }
        }
        assert_eq!(spawned, 20);
    }
}
