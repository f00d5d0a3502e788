use std::collections::HashSet;

use tracing::{debug, info};

use crate::audio::{SoundEvent, SoundSink};

use super::action::Direction;
use super::config::GameConfig;
use super::food::Food;
use super::grid::Position;
use super::obstacle::{Obstacle, ObstacleKind};
use super::snake::{Snake, TerminalReason};
use super::spawn::Spawner;

/// Round lifecycle. `GameOver` is terminal; a fresh [`Round`] starts the
/// next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    Running,
    Paused,
    GameOver(TerminalReason),
}

/// One round of play.
///
/// Sole owner of the snake, the food and obstacle lists, the score and the
/// timing accumulators; the renderer only ever sees `&Round`. Driven by
/// [`Round::update`] with wall-clock frame deltas, it advances the snake on
/// a fixed move interval (shortened while a speed boost is active) while
/// zombies move continuously every frame.
pub struct Round {
    config: GameConfig,
    spawner: Spawner,
    snake: Snake,
    foods: Vec<Food>,
    obstacles: Vec<Obstacle>,
    score: u32,
    elapsed: f32,
    phase: RoundPhase,
    move_timer: f32,
    food_cooldown: f32,
}

impl Round {
    pub fn new(config: GameConfig, seed: Option<u64>) -> Self {
        let snake = Snake::new(
            config.grid,
            config.grid.center(),
            Direction::Right,
            config.initial_snake_length,
        );

        let mut round = Self {
            spawner: Spawner::new(seed),
            snake,
            foods: Vec::new(),
            obstacles: Vec::new(),
            score: 0,
            elapsed: 0.0,
            phase: RoundPhase::Running,
            move_timer: 0.0,
            food_cooldown: 0.0,
            config,
        };
        round.replenish_food();
        round
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == RoundPhase::Running
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, RoundPhase::GameOver(_))
    }

    /// Buffer a steering command; dropped while paused or after game over
    pub fn set_direction(&mut self, direction: Direction) {
        if self.is_running() {
            self.snake.set_direction(direction);
        }
    }

    /// Flip Running <-> Paused. No simulation advances while paused.
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            RoundPhase::Running => RoundPhase::Paused,
            RoundPhase::Paused => RoundPhase::Running,
            over => over,
        };
    }

    /// Advance the round by one frame of `dt` seconds
    pub fn update(&mut self, dt: f32, sounds: &dyn SoundSink) {
        if !self.is_running() {
            return;
        }

        self.elapsed += dt;

        // zombies shamble every frame, not just on move ticks
        for obstacle in &mut self.obstacles {
            obstacle.update(
                dt,
                self.config.grid,
                self.config.zombie_speed,
                self.config.zombie_turn_chance,
                self.spawner.rng(),
            );
        }

        self.move_timer += dt;
        let interval = self
            .snake
            .effective_move_interval(self.config.base_move_interval());
        if self.move_timer >= interval {
            self.move_timer = 0.0;
            if self.move_tick(sounds) {
                return;
            }
        }

        self.food_cooldown -= dt;
        if self.foods.len() < self.config.min_food && self.food_cooldown <= 0.0 {
            self.food_cooldown = self.config.food_spawn_cooldown;
            self.replenish_food();
        }

        let occupied = self.occupied_cells();
        if let Some(obstacle) =
            self.spawner
                .try_spawn_obstacle(&self.config, self.elapsed, self.obstacles.len(), &occupied)
        {
            if obstacle.kind == ObstacleKind::Zombie {
                sounds.play(SoundEvent::ZombieGroan);
            }
            self.obstacles.push(obstacle);
        }
    }

    /// One snake move plus collision resolution. Returns true when the round
    /// ended this tick.
    ///
    /// Food is applied before the obstacle check on purpose: a walnut eaten
    /// this tick must shield the snake from an obstacle on the same cell.
    fn move_tick(&mut self, sounds: &dyn SoundSink) -> bool {
        if let Some(reason) = self.snake.advance(self.config.grid) {
            self.finish(reason, sounds);
            return true;
        }

        let head = self.snake.head();

        // read pass first, then mutate the food list
        let eaten = self.foods.iter().position(|food| food.position == head);
        if let Some(index) = eaten {
            let food = self.foods.remove(index);
            let spec = self.config.food_table.spec(food.kind);
            self.score += spec.score;
            self.snake.grow(1);

            match spec.effect {
                Some(grant) => {
                    self.snake
                        .add_ability(grant.ability, grant.duration, self.config.speed_multiplier);
                    sounds.play(SoundEvent::AbilityActivated);
                }
                None => sounds.play(SoundEvent::EatFood),
            }

            let occupied = self.occupied_cells();
            match self.spawner.spawn_food(&self.config, &occupied) {
                Some(replacement) => self.foods.push(replacement),
                None => debug!("food replacement deferred, no free cell found"),
            }
        }

        if !self.snake.is_shielded()
            && self.obstacles.iter().any(|obstacle| obstacle.cell() == head)
        {
            self.finish(TerminalReason::ObstacleCollision, sounds);
            return true;
        }

        false
    }

    fn finish(&mut self, reason: TerminalReason, sounds: &dyn SoundSink) {
        info!(?reason, score = self.score, "round over");
        self.phase = RoundPhase::GameOver(reason);
        sounds.play(SoundEvent::GameOver);
    }

    fn replenish_food(&mut self) {
        while self.foods.len() < self.config.min_food {
            let occupied = self.occupied_cells();
            match self.spawner.spawn_food(&self.config, &occupied) {
                Some(food) => self.foods.push(food),
                None => {
                    debug!("food replenish deferred, no free cell found");
                    break;
                }
            }
        }
    }

    fn occupied_cells(&self) -> HashSet<Position> {
        self.snake
            .body()
            .iter()
            .copied()
            .chain(self.foods.iter().map(|food| food.position))
            .chain(self.obstacles.iter().map(|obstacle| obstacle.cell()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::NullSink;
    use crate::game::food::FoodKind;
    use crate::game::snake::AbilityKind;

    fn round() -> Round {
        Round::new(GameConfig::small(), Some(42))
    }

    /// Run exactly one move tick
    fn tick(round: &mut Round) {
        let interval = round
            .snake
            .effective_move_interval(round.config.base_move_interval());
        round.update(interval, &NullSink);
    }

    #[test]
    fn new_round_starts_centered_and_stocked() {
        let round = round();
        assert_eq!(round.phase(), RoundPhase::Running);
        assert_eq!(round.snake().head(), round.config().grid.center());
        assert_eq!(round.foods().len(), round.config().min_food);
        assert!(round.obstacles().is_empty());
        assert_eq!(round.score(), 0);
    }

    #[test]
    fn food_never_spawns_on_the_snake() {
        let round = round();
        for food in round.foods() {
            assert!(!round.snake().occupies(food.position));
        }
    }

    #[test]
    fn pause_freezes_the_simulation() {
        let mut round = round();
        let head = round.snake().head();
        round.toggle_pause();
        assert_eq!(round.phase(), RoundPhase::Paused);
        for _ in 0..50 {
            round.update(0.5, &NullSink);
        }
        assert_eq!(round.snake().head(), head);
        assert_eq!(round.elapsed(), 0.0);
        round.toggle_pause();
        assert_eq!(round.phase(), RoundPhase::Running);
    }

    #[test]
    fn snake_moves_one_cell_per_move_interval() {
        let mut round = round();
        let start = round.snake().head();
        tick(&mut round);
        let grid = round.config().grid;
        assert_eq!(
            round.snake().head(),
            grid.step(start, round.snake().direction())
        );
    }

    #[test]
    fn sub_interval_updates_do_not_move_the_snake() {
        let mut round = round();
        let start = round.snake().head();
        round.update(round.config().base_move_interval() * 0.4, &NullSink);
        assert_eq!(round.snake().head(), start);
    }

    #[test]
    fn eating_food_scores_grows_and_respawns() {
        let mut round = round();
        let grid = round.config().grid;
        let next = grid.step(round.snake().head(), round.snake().direction());

        // plant a sun one cell ahead
        round.foods.clear();
        round.foods.push(Food {
            kind: FoodKind::Sun,
            position: next,
        });
        let len_before = round.snake().len();

        tick(&mut round);

        let sun_score = round.config().food_table.spec(FoodKind::Sun).score;
        assert_eq!(round.score(), sun_score);
        assert_eq!(round.snake().growth_pending(), 1);
        tick(&mut round);
        assert_eq!(round.snake().len(), len_before + 1);
        // the eaten sun was replaced immediately
        assert!(!round.foods().is_empty());
    }

    #[test]
    fn walnut_shield_covers_the_same_tick_obstacle() {
        // Scenario: walnut at tick T, tombstone cell entered at tick T+1
        let mut round = round();
        let grid = round.config().grid;
        let head = round.snake().head();
        let walnut_cell = grid.step(head, Direction::Right);
        let tombstone_cell = grid.step(walnut_cell, Direction::Right);

        round.foods.clear();
        round.foods.push(Food {
            kind: FoodKind::Walnut,
            position: walnut_cell,
        });
        round.obstacles.push(Obstacle::tombstone(tombstone_cell));

        tick(&mut round); // T: eats the walnut, shield 100
        assert!(round.is_running());
        assert_eq!(
            round.snake().ability_remaining(AbilityKind::Shield),
            Some(100)
        );

        tick(&mut round); // T+1: steps onto the tombstone, shielded
        assert!(round.is_running());
        assert_eq!(
            round.snake().ability_remaining(AbilityKind::Shield),
            Some(99)
        );
    }

    #[test]
    fn unshielded_obstacle_contact_ends_the_round() {
        let mut round = round();
        let grid = round.config().grid;
        let next = grid.step(round.snake().head(), round.snake().direction());
        round.foods.clear();
        round.obstacles.push(Obstacle::tombstone(next));

        tick(&mut round);
        assert_eq!(
            round.phase(),
            RoundPhase::GameOver(TerminalReason::ObstacleCollision)
        );
    }

    #[test]
    fn game_over_is_terminal() {
        let mut round = round();
        let grid = round.config().grid;
        let next = grid.step(round.snake().head(), round.snake().direction());
        round.foods.clear();
        round.obstacles.push(Obstacle::tombstone(next));
        tick(&mut round);
        assert!(round.is_over());

        let head = round.snake().head();
        round.toggle_pause(); // must not resurrect the round
        round.update(10.0, &NullSink);
        assert!(round.is_over());
        assert_eq!(round.snake().head(), head);
    }

    #[test]
    fn peashooter_speeds_up_the_move_interval() {
        let mut round = round();
        let grid = round.config().grid;
        let next = grid.step(round.snake().head(), round.snake().direction());
        round.foods.clear();
        round.foods.push(Food {
            kind: FoodKind::Peashooter,
            position: next,
        });

        tick(&mut round);
        let base = round.config().base_move_interval();
        let boosted = round.snake().effective_move_interval(base);
        assert!(boosted < base);
        assert!((base / boosted - round.config().speed_multiplier).abs() < 1e-6);

        // the shorter interval now fires a move the base interval would not
        let before = round.snake().head();
        round.update(boosted, &NullSink);
        assert_ne!(round.snake().head(), before);
    }

    #[test]
    fn score_never_decreases_while_alive() {
        let mut round = round();
        let mut last_score = 0;
        for step in 0..400 {
            tick(&mut round);
            if round.is_over() {
                break;
            }
            assert!(round.score() >= last_score, "step {step}");
            last_score = round.score();
        }
    }

    #[test]
    fn food_stock_is_replenished_over_time() {
        let mut round = round();
        round.foods.clear();
        // replenish path waits out the cooldown, then refills to the minimum
        let mut waited = 0.0;
        while round.foods.len() < round.config().min_food && waited < 10.0 {
            round.update(0.05, &NullSink);
            waited += 0.05;
        }
        assert_eq!(round.foods().len(), round.config().min_food);
    }

    #[test]
    fn obstacles_respect_the_grace_period_and_cap() {
        let mut round = round();
        // sit below the grace period
        for _ in 0..25 {
            round.update(0.1, &NullSink);
            if round.is_over() {
                return; // self-steering snake may die early on a tiny grid
            }
            assert!(round.obstacles().is_empty());
        }
    }

    #[test]
    fn seeded_rounds_are_reproducible() {
        let a = Round::new(GameConfig::small(), Some(9));
        let b = Round::new(GameConfig::small(), Some(9));
        let cells_a: Vec<_> = a.foods().iter().map(|f| (f.kind, f.position)).collect();
        let cells_b: Vec<_> = b.foods().iter().map(|f| (f.kind, f.position)).collect();
        assert_eq!(cells_a, cells_b);
    }
}
