use std::path::Path;

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::food::{AbilityGrant, FoodKind};
use super::grid::GridSize;
use super::snake::AbilityKind;

/// Harder settings mean a faster snake and more frequent obstacles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Base snake speed in moves per second
    pub fn moves_per_sec(&self) -> f32 {
        match self {
            Difficulty::Easy => 8.0,
            Difficulty::Medium => 10.0,
            Difficulty::Hard => 12.0,
        }
    }

    /// Per-frame probability of an obstacle spawn attempt passing its roll
    pub fn obstacle_frequency(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.01,
            Difficulty::Medium => 0.02,
            Difficulty::Hard => 0.03,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

/// Per-kind food data: spawn weight, score and optional ability grant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FoodSpec {
    pub weight: u32,
    pub score: u32,
    #[serde(default)]
    pub effect: Option<AbilityGrant>,
}

impl FoodSpec {
    /// Score-only entry used when a kind is missing from a user table
    pub fn neutral() -> Self {
        Self {
            weight: 0,
            score: 10,
            effect: None,
        }
    }
}

/// Weighted food-kind table driving spawn draws and effect application.
///
/// Kept as an ordered list so the cumulative-weight scan is deterministic
/// for a given seed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodTable {
    entries: Vec<(FoodKind, FoodSpec)>,
}

impl FoodTable {
    pub fn new(entries: Vec<(FoodKind, FoodSpec)>) -> Self {
        Self { entries }
    }

    /// The classic lawn menu: mostly suns, the occasional shield walnut and
    /// speed-boost peashooter.
    pub fn pvz_default() -> Self {
        Self::new(vec![
            (
                FoodKind::Sun,
                FoodSpec {
                    weight: 70,
                    score: 10,
                    effect: None,
                },
            ),
            (
                FoodKind::Sunflower,
                FoodSpec {
                    weight: 20,
                    score: 20,
                    effect: None,
                },
            ),
            (
                FoodKind::Walnut,
                FoodSpec {
                    weight: 10,
                    score: 5,
                    effect: Some(AbilityGrant {
                        ability: AbilityKind::Shield,
                        duration: 100,
                    }),
                },
            ),
            (
                FoodKind::Peashooter,
                FoodSpec {
                    weight: 10,
                    score: 15,
                    effect: Some(AbilityGrant {
                        ability: AbilityKind::SpeedBoost,
                        duration: 150,
                    }),
                },
            ),
        ])
    }

    pub fn entries(&self) -> &[(FoodKind, FoodSpec)] {
        &self.entries
    }

    pub fn total_weight(&self) -> u32 {
        self.entries.iter().map(|(_, spec)| spec.weight).sum()
    }

    /// Look up a kind, falling back to a neutral score-only entry when a
    /// user-supplied table leaves it out.
    pub fn spec(&self, kind: FoodKind) -> FoodSpec {
        match self.entries.iter().find(|(k, _)| *k == kind) {
            Some((_, spec)) => *spec,
            None => {
                warn!(kind = kind.name(), "food kind missing from table, using neutral spec");
                FoodSpec::neutral()
            }
        }
    }
}

/// Every tunable the simulation reads. Read-only to the core; the round
/// loop takes a clone at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub grid: GridSize,
    pub difficulty: Difficulty,
    pub initial_snake_length: usize,
    /// Minimum live food maintained by the round loop
    pub min_food: usize,
    /// Seconds between replenish attempts when food is below the minimum
    pub food_spawn_cooldown: f32,
    /// Cell draws per spawn before giving up for this tick
    pub spawn_attempts: u32,
    /// Seconds before the first obstacle may appear
    pub obstacle_grace_period: f32,
    /// Minimum seconds between obstacle spawns
    pub obstacle_cooldown: f32,
    pub max_obstacles: usize,
    pub zombie_weight: u32,
    pub tombstone_weight: u32,
    /// Zombie walk speed in cells per second
    pub zombie_speed: f32,
    /// Chance per second of a zombie wandering off in a new direction
    pub zombie_turn_chance: f32,
    /// Obstacles never spawn within this wrap-aware manhattan distance of
    /// the grid center, where the snake starts
    pub center_exclusion_radius: i32,
    /// Move-interval divisor while a speed boost is active
    pub speed_multiplier: f32,
    pub food_table: FoodTable,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            // 800x600 window at 30px cells
            grid: GridSize::new(26, 20),
            difficulty: Difficulty::Medium,
            initial_snake_length: 1,
            min_food: 3,
            food_spawn_cooldown: 0.5,
            spawn_attempts: 10,
            obstacle_grace_period: 3.0,
            obstacle_cooldown: 3.0,
            max_obstacles: 5,
            zombie_weight: 30,
            tombstone_weight: 70,
            zombie_speed: 0.5,
            zombie_turn_chance: 0.1,
            center_exclusion_radius: 3,
            speed_multiplier: 1.5,
            food_table: FoodTable::pvz_default(),
        }
    }
}

impl GameConfig {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            grid: GridSize::new(width, height),
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Seconds between snake moves before any speed boost
    pub fn base_move_interval(&self) -> f32 {
        1.0 / self.difficulty.moves_per_sec()
    }

    /// The wrap arithmetic needs at least two cells on each axis
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.grid.width >= 2 && self.grid.height >= 2,
            "grid must be at least 2x2, got {}x{}",
            self.grid.width,
            self.grid.height
        );
        Ok(())
    }

    /// Load a JSON override of the defaults
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&raw)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid config file {}", path.display()))?;
        Ok(config)
    }
}
