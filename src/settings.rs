//! Game settings and preferences
//!
//! Persisted separately from high scores.

use serde::{Deserialize, Serialize};

use crate::persistence::{Storage, StorageError};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Accessibility ===
    /// Reduced motion (track dashes stop scrolling)
    pub reduced_motion: bool,
    /// High contrast mode (brighter warnings and lane lines)
    pub high_contrast: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            // HUD
            show_fps: false,

            // Accessibility
            reduced_motion: false,
            high_contrast: false,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "space-race-settings";

    /// Effective track scrolling (respects reduced_motion)
    pub fn effective_track_scroll(&self) -> bool {
        !self.reduced_motion
    }

    /// Load settings, defaults if absent or unreadable
    pub fn load(storage: &dyn Storage) -> Self {
        if let Some(json) = storage.get(Self::STORAGE_KEY) {
            match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring unreadable settings: {e}"),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings
    pub fn save(&self, storage: &mut dyn Storage) -> Result<(), StorageError> {
        let json = serde_json::to_string(self)?;
        storage.set(Self::STORAGE_KEY, &json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;

    #[test]
    fn test_save_then_load() {
        let mut storage = MemoryStorage::new();
        let settings = Settings {
            show_fps: true,
            reduced_motion: true,
            high_contrast: false,
        };
        settings.save(&mut storage).unwrap();

        let loaded = Settings::load(&storage);
        assert_eq!(loaded, settings);
        assert!(!loaded.effective_track_scroll());
    }

    #[test]
    fn test_missing_fields_default() {
        let storage = MemoryStorage::with_value(Settings::STORAGE_KEY, r#"{"show_fps": true}"#);
        let loaded = Settings::load(&storage);
        assert!(loaded.show_fps);
        assert!(!loaded.reduced_motion);
    }

    #[test]
    fn test_corrupt_is_default() {
        let storage = MemoryStorage::with_value(Settings::STORAGE_KEY, "[1, 2");
        assert_eq!(Settings::load(&storage), Settings::default());
    }
}
