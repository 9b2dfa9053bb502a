//! Game settings and preferences
//!
//! Persisted as one JSON blob next to the high score.

use serde::{Deserialize, Serialize};

use crate::persistence::{ScalarStore, StoreError};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Input ===
    /// Clicking/tapping the play area jumps (space always does)
    pub click_to_jump: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Audio ===
    /// Sound effects on/off
    pub sound: bool,
    /// Master volume (0.0 - 1.0)
    pub volume: f32,

    // === Demo ===
    /// Let the autopilot play behind the title screen
    pub demo_when_idle: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            click_to_jump: true,
            show_fps: false,
            sound: true,
            volume: 0.8,
            demo_when_idle: false,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "geometryJumperSettings";

    /// Volume actually applied (zero when muted)
    pub fn effective_volume(&self) -> f32 {
        if self.sound {
            self.volume.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Load settings, falling back to defaults on any problem
    pub fn load(store: &impl ScalarStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring unreadable settings: {e}");
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Could not read settings: {e}");
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &mut impl ScalarStore) -> Result<(), StoreError> {
        let json = serde_json::to_string(self)?;
        store.set(Self::STORAGE_KEY, &json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_defaults_when_missing_or_broken() {
        assert_eq!(Settings::load(&MemoryStore::new()), Settings::default());
        let store = MemoryStore::with(Settings::STORAGE_KEY, "{oops");
        assert_eq!(Settings::load(&store), Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        let settings = Settings {
            show_fps: true,
            volume: 0.25,
            ..Default::default()
        };
        settings.save(&mut store).unwrap();
        assert_eq!(Settings::load(&store), settings);
    }

    #[test]
    fn test_partial_json_keeps_other_defaults() {
        let store = MemoryStore::with(Settings::STORAGE_KEY, r#"{ "sound": false }"#);
        let settings = Settings::load(&store);
        assert!(!settings.sound);
        assert!(settings.click_to_jump);
        assert_eq!(settings.effective_volume(), 0.0);
    }
}
