//! Core simulation for the PvZ-flavored snake game
//!
//! Everything in here is free of terminal, audio and asset concerns: the
//! grid model, the snake controller, the food/obstacle spawner and the
//! round loop that ties them together. The render and app layers only
//! ever read from these types.

pub mod action;
pub mod config;
pub mod food;
pub mod grid;
pub mod obstacle;
pub mod round;
pub mod snake;
pub mod spawn;

// Re-export commonly used types
pub use action::Direction;
pub use config::{Difficulty, FoodSpec, FoodTable, GameConfig};
pub use food::{AbilityGrant, Food, FoodKind};
pub use grid::{GridSize, Position};
pub use obstacle::{Obstacle, ObstacleKind};
pub use round::{Round, RoundPhase};
pub use snake::{AbilityKind, Snake, TerminalReason};
pub use spawn::Spawner;
