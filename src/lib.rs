//! PvZ Snake - a Plants vs. Zombies themed snake game for the terminal
//!
//! This library provides:
//! - Core simulation: grid, snake, spawner and round loop (game module)
//! - Symbolic sound events behind a sink trait (audio module)
//! - Keyboard mapping (input module)
//! - TUI rendering with ratatui (render module)
//! - Scene machine and the interactive application loop (scene, app modules)

pub mod app;
pub mod audio;
pub mod game;
pub mod input;
pub mod metrics;
pub mod render;
pub mod scene;
