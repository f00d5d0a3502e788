use serde::{Deserialize, Serialize};

use super::grid::Position;
use super::snake::AbilityKind;

/// The plant (or sun) a food item is drawn as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodKind {
    Sun,
    Sunflower,
    Walnut,
    Peashooter,
}

impl FoodKind {
    pub const ALL: [FoodKind; 4] = [
        FoodKind::Sun,
        FoodKind::Sunflower,
        FoodKind::Walnut,
        FoodKind::Peashooter,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FoodKind::Sun => "sun",
            FoodKind::Sunflower => "sunflower",
            FoodKind::Walnut => "walnut",
            FoodKind::Peashooter => "peashooter",
        }
    }
}

/// Ability granted when a food is eaten
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AbilityGrant {
    pub ability: AbilityKind,
    /// Move ticks the ability stays active
    pub duration: u32,
}

/// A live food item on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub kind: FoodKind,
    pub position: Position,
}
