//! Storage key catalogue. Each key holds one independent JSON value.

pub const TUTORIAL_SEEN: &str = "arcana_tutorial_seen";
pub const SAVED_DECK: &str = "arcana_deck";
pub const PREFERENCES: &str = "arcana_preferences";
pub const AUDIO_ENABLED: &str = "arcana_audio_enabled";

pub const ALL: [&str; 4] = [TUTORIAL_SEEN, SAVED_DECK, PREFERENCES, AUDIO_ENABLED];
