//! On-screen touch keyboard core.
//!
//! This crate provides:
//! - [`Keyboard`]: the per-frame facade the host drives
//! - [`InputEngine`]: touch-to-key resolution, repeat, long press and shift logic
//! - [`KeyTable`]: validated key definitions, including the default QWERTY table
//! - [`layout`]: resolution agnostic key placement
//! - [`Presenter`]: drawing through a host [`KeyboardRenderer`]
//! - [`KeyboardConfig`]: timing, layout and color settings with JSON load/save

pub mod config;
pub mod engine;
pub mod error;
pub mod key;
pub mod keyboard;
pub mod layout;
pub mod mode;
pub mod pointer;
pub mod present;
pub mod shared;

pub use config::{KeyboardConfig, LayoutConfig, Palette, TimingConfig};
pub use engine::{InputEngine, KeyboardState, Resolution};
pub use error::KeyboardError;
pub use key::{HighlightColor, KeyDefinition, KeyRuntimeState, KeyTable};
pub use keyboard::{KeyView, Keyboard};
pub use layout::{KeyGeometry, KeyboardLayout};
pub use mode::KeyboardMode;
pub use pointer::{PointerSource, ScriptedPointers, collect_samples};
pub use present::{CommandRecorder, DrawCommand, KeyboardRenderer, Presenter};
pub use shared::SharedKeyboard;
