use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use osk_types::Color;
use serde::{Deserialize, Serialize};

use crate::error::KeyboardError;

const CONFIG_FILE: &str = "keyboard.json";

/// Timing parameters of the input resolution engine, in seconds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TimingConfig {
    /// Minimum real time between two release/alternate firings of the same key.
    pub key_cooldown: f32,
    /// Continuous press time after which a key fires its alternate action.
    pub alt_charge: f32,
    /// Length of the highlight fade after a key is touched.
    pub highlight_duration: f32,
    /// Two shift touches closer than this engage caps lock.
    pub double_tap_window: f32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            key_cooldown: 0.15,
            alt_charge: 0.7,
            highlight_duration: 0.33,
            double_tap_window: 0.3,
        }
    }
}

/// Grid parameters of the layout engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    /// Keyboard height as a fraction of the viewport height.
    pub height_fraction: f32,
    /// Number of key cells across the viewport width.
    pub columns: u32,
    /// Number of key rows.
    pub rows: u32,
    /// Padding of keys as a fraction of the cell width.
    pub key_padding: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            height_fraction: 0.4,
            columns: 12,
            rows: 4,
            key_padding: 0.05,
        }
    }
}

/// Colors used by the presentation layer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Palette {
    pub background: Color,
    /// Resting key color.
    pub key: Color,
    /// Highlight of a freshly touched key; shift keys in shift mode.
    pub touched: Color,
    /// Highlight of a key whose alternate fired; shift keys in caps lock.
    pub alternated: Color,
    pub text: Color,
    pub alt_text: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::from_rgb8(50, 50, 50),
            key: Color::from_rgb8(105, 105, 105),
            touched: Color::from_rgb8(70, 130, 180),
            alternated: Color::from_rgb8(30, 144, 255),
            text: Color::from_rgb8(211, 211, 211),
            alt_text: Color::from_rgb8(211, 211, 211),
        }
    }
}

/// Complete keyboard configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct KeyboardConfig {
    pub timing: TimingConfig,
    pub layout: LayoutConfig,
    pub palette: Palette,
}

impl KeyboardConfig {
    /// Loads config from the default config file.
    /// Returns default config if file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(CONFIG_FILE)
    }

    /// Loads config from a specified path.
    /// Returns default config if file doesn't exist.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read keyboard config: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse keyboard config: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Saves config to the default config file.
    pub fn save(&self) -> Result<()> {
        self.save_to(CONFIG_FILE)
    }

    /// Saves config to a specified path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Reject values the engine or the layout cannot work with.
    pub fn validate(&self) -> Result<(), KeyboardError> {
        let timing = &self.timing;
        non_negative("key_cooldown", timing.key_cooldown)?;
        non_negative("alt_charge", timing.alt_charge)?;
        non_negative("double_tap_window", timing.double_tap_window)?;
        if !(timing.highlight_duration > 0.0) {
            return Err(KeyboardError::InvalidConfig {
                field: "highlight_duration",
                value: timing.highlight_duration,
            });
        }

        let layout = &self.layout;
        if !(layout.height_fraction > 0.0 && layout.height_fraction <= 1.0) {
            return Err(KeyboardError::InvalidConfig {
                field: "height_fraction",
                value: layout.height_fraction,
            });
        }
        if layout.columns == 0 {
            return Err(KeyboardError::InvalidConfig {
                field: "columns",
                value: 0.0,
            });
        }
        if layout.rows == 0 {
            return Err(KeyboardError::InvalidConfig {
                field: "rows",
                value: 0.0,
            });
        }
        if !(layout.key_padding >= 0.0 && layout.key_padding < 0.5) {
            return Err(KeyboardError::InvalidConfig {
                field: "key_padding",
                value: layout.key_padding,
            });
        }
        Ok(())
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), KeyboardError> {
    // NaN fails this comparison too.
    if value >= 0.0 {
        Ok(())
    } else {
        Err(KeyboardError::InvalidConfig { field, value })
    }
}
