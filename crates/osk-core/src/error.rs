use osk_types::KeyCode;
use thiserror::Error;

/// Configuration errors, reported when a keyboard is constructed.
#[derive(Debug, Error, PartialEq)]
pub enum KeyboardError {
    #[error("Key table is empty")]
    EmptyTable,

    #[error("Duplicate key index {index}")]
    DuplicateIndex { index: u32 },

    #[error("Duplicate primary action {action} (key index {index})")]
    DuplicateAction { action: KeyCode, index: u32 },

    #[error("Key {index} repeats while held but also has an alternate action")]
    RepeatWithAlternate { index: u32 },

    #[error("Key {index} has invalid geometry: {reason}")]
    InvalidGeometry { index: u32, reason: &'static str },

    #[error("Invalid configuration value for {field}: {value}")]
    InvalidConfig { field: &'static str, value: f32 },
}
