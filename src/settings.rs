//! Input bindings and preferences
//!
//! Persisted in LocalStorage on the web build.

use serde::{Deserialize, Serialize};

/// Actions a key press maps to. A key may trigger both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyAction {
    pub jump: bool,
    pub restart: bool,
}

impl KeyAction {
    pub fn is_none(&self) -> bool {
        !self.jump && !self.restart
    }
}

/// Player settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// `KeyboardEvent.code` values that trigger a jump
    pub jump_keys: Vec<String>,
    /// `KeyboardEvent.code` values that restart after game over
    pub restart_keys: Vec<String>,
    /// Tapping the play-field jumps
    pub touch_jump: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            jump_keys: vec!["Space".to_string(), "ArrowUp".to_string()],
            restart_keys: vec!["Space".to_string()],
            touch_jump: true,
        }
    }
}

impl Settings {
    /// Resolve a key code to its bound actions
    pub fn action_for_key(&self, code: &str) -> KeyAction {
        KeyAction {
            jump: self.jump_keys.iter().any(|k| k == code),
            restart: self.restart_keys.iter().any(|k| k == code),
        }
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "dino_run_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring corrupt settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
