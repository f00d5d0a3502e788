//! Enum-keyed scene machine: menu, round in progress, round finished.
//!
//! Transition payloads are typed (the game-over scene carries its final
//! score) rather than smuggled through string-keyed lookups.

/// Which screen the application is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scene {
    Menu,
    Playing,
    GameOver { score: u32 },
}

impl Scene {
    pub fn is_playing(&self) -> bool {
        matches!(self, Scene::Playing)
    }
}
