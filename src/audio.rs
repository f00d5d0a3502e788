//! Symbolic sound events and the sink capability the simulation calls into.
//!
//! The round loop fires events by name only; whether anything actually plays
//! is the embedding application's business. A sink with no mapping for an
//! event simply drops it, so audio can never block or corrupt a round.

use tracing::debug;

/// Everything the game can ask to hear
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEvent {
    EatFood,
    GameOver,
    AbilityActivated,
    MenuClick,
    ZombieGroan,
}

impl SoundEvent {
    /// Stable asset-facing name
    pub fn name(&self) -> &'static str {
        match self {
            SoundEvent::EatFood => "eat_food",
            SoundEvent::GameOver => "game_over",
            SoundEvent::AbilityActivated => "ability_activated",
            SoundEvent::MenuClick => "menu_click",
            SoundEvent::ZombieGroan => "zombie_groan",
        }
    }
}

/// Fire-and-forget playback capability injected into the round loop
pub trait SoundSink {
    fn play(&self, event: SoundEvent);
}

/// Sink that drops every event
pub struct NullSink;

impl SoundSink for NullSink {
    fn play(&self, _event: SoundEvent) {}
}

/// Sink that traces event names, useful with `--log-file`
pub struct DebugSink;

impl SoundSink for DebugSink {
    fn play(&self, event: SoundEvent) {
        debug!(sound = event.name(), "play");
    }
}
