//! Player settings and preferences
//!
//! Persisted in LocalStorage on the web build.

use serde::{Deserialize, Serialize};

use crate::persistence::record::normalize_name;

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Name attached to submitted best runs (blank means anonymous)
    pub player_name: String,
    /// Draw the best-run ghost
    pub show_ghost: bool,
    /// Endpoint for reading and submitting the best run
    pub api_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player_name: String::new(),
            show_ghost: true,
            api_url: "/api/highscore".to_string(),
        }
    }
}

impl Settings {
    /// Name as it will be stored: trimmed, defaulted, and capped
    pub fn display_name(&self) -> String {
        normalize_name(Some(&self.player_name))
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "ghost_runner_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native: defaults, with the player name taken from `GHOST_RUNNER_NAME`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let mut settings = Self::default();
        if let Ok(name) = std::env::var("GHOST_RUNNER_NAME") {
            settings.player_name = name;
        }
        settings
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        let mut settings = Settings::default();
        assert_eq!(settings.display_name(), "anon");
        settings.player_name = "  grace  ".into();
        assert_eq!(settings.display_name(), "grace");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "player_name": "ada" }"#).unwrap();
        assert_eq!(settings.player_name, "ada");
        assert!(settings.show_ghost);
        assert_eq!(settings.api_url, "/api/highscore");
    }
}
