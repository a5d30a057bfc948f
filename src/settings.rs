//! Game settings and tunables
//!
//! Persisted in LocalStorage on the web; native builds use defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Which terrain the player rides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GameVariant {
    /// Terrain follows the EEG trace
    #[default]
    Brainwave,
    /// Flat ground with block obstacles
    ObstacleCourse,
}

impl GameVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameVariant::Brainwave => "Brainwave",
            GameVariant::ObstacleCourse => "Obstacle course",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "brainwave" | "eeg" | "wave" => Some(GameVariant::Brainwave),
            "obstacles" | "obstacle" | "course" => Some(GameVariant::ObstacleCourse),
            _ => None,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub variant: GameVariant,

    // === Terrain ===
    /// Signal seconds per wall-clock second
    pub scroll_speed: f64,
    /// Moving-average half window in samples
    pub smooth_window: usize,
    /// Signal samples per horizontal pixel
    pub horizontal_step: f64,
    /// Amplitude boost applied after mapping to [0, 1]
    pub amp_scale: f32,

    // === Frame driver ===
    /// Longest frame delta fed to the simulation; `None` passes it through
    pub max_frame_dt: Option<f32>,

    // === Data ===
    pub signal_url: String,
    pub stages_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            variant: GameVariant::Brainwave,

            scroll_speed: SCROLL_SPEED,
            smooth_window: SMOOTH_WINDOW,
            horizontal_step: HORIZONTAL_SAMPLE_STEP,
            amp_scale: AMP_SCALE,

            max_frame_dt: Some(MAX_FRAME_DT),

            signal_url: "brainwave_runner_data.json".to_string(),
            stages_url: "brainwave_stages.json".to_string(),
        }
    }
}

impl Settings {
    /// Clamp a raw frame delta to `[0, max_frame_dt]`
    pub fn clamp_dt(&self, dt: f32) -> f32 {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        match self.max_frame_dt {
            Some(max) => dt.min(max),
            None => dt,
        }
    }

    /// LocalStorage key
    pub const STORAGE_KEY: &'static str = "brain_surfing_settings";

    /// JSON form stored under `STORAGE_KEY`
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse a stored entry; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
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
            match self.to_json() {
                Ok(json) => {
                    if storage.set_item(Self::STORAGE_KEY, &json).is_ok() {
                        log::info!("Settings saved");
                    } else {
                        log::warn!("LocalStorage rejected settings");
                    }
                }
                Err(e) => log::warn!("Failed to serialize settings: {}", e),
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
