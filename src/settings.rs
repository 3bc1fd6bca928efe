//! User preferences for the sliders and toggles
//!
//! Persisted in LocalStorage. Walls and score are session-only and never
//! stored here.

use serde::{Deserialize, Serialize};

/// Bounds of a slider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderRange {
    pub min: f32,
    pub max: f32,
}

impl SliderRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Clamp a value into the range (non-finite values fall back to `default`)
    pub fn clamp(&self, value: f32, default: f32) -> f32 {
        if value.is_finite() {
            value.clamp(self.min, self.max)
        } else {
            default
        }
    }
}

/// Speed slider bounds
pub const SPEED_RANGE: SliderRange = SliderRange::new(0.1, 5.0);
/// Size slider bounds
pub const SIZE_RANGE: SliderRange = SliderRange::new(0.5, 3.0);

/// User preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Velocity scale applied each tick
    pub speed_multiplier: f32,
    /// Radius scale applied to every ball
    pub size_multiplier: f32,
    /// Start with gravity on
    pub gravity: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            speed_multiplier: 1.0,
            size_multiplier: 1.0,
            gravity: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "bouncefield_settings";

    /// Clamp slider values into their ranges
    pub fn sanitized(mut self) -> Self {
        self.speed_multiplier = SPEED_RANGE.clamp(self.speed_multiplier, 1.0);
        self.size_multiplier = SIZE_RANGE.clamp(self.size_multiplier, 1.0);
        self
    }

    /// Parse settings from JSON, clamping out-of-range values
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Settings>(json).map(Settings::sanitized)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
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
                    Err(e) => log::warn!("Discarding stored settings: {}", e),
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
                    let _ = storage.set_item(Self::STORAGE_KEY, &json);
                    log::debug!("Settings saved");
                }
                Err(e) => log::warn!("Could not serialize settings: {}", e),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_round_trip_keeps_values() {
        let settings = Settings {
            speed_multiplier: 2.5,
            size_multiplier: 1.5,
            gravity: true,
        };
        let json = settings.to_json().expect("serializes");
        assert_eq!(Settings::from_json(&json).expect("parses"), settings);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings = Settings::from_json(r#"{"gravity":true}"#).expect("parses");
        assert!(settings.gravity);
        assert_eq!(settings.speed_multiplier, 1.0);
        assert_eq!(settings.size_multiplier, 1.0);
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let settings =
            Settings::from_json(r#"{"speed_multiplier":99.0,"size_multiplier":0.0}"#).expect("parses");
        assert_eq!(settings.speed_multiplier, SPEED_RANGE.max);
        assert_eq!(settings.size_multiplier, SIZE_RANGE.min);
    }

    #[test]
    fn test_garbage_is_an_error() {
        assert!(Settings::from_json("not json").is_err());
    }

    #[test]
    fn test_slider_clamp_non_finite() {
        assert_eq!(SPEED_RANGE.clamp(f32::NAN, 1.0), 1.0);
    }
}
