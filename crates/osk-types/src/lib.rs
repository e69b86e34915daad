//! Value types shared by the on-screen keyboard crates.
//!
//! - [`Point`], [`Rect`], [`Viewport`]: screen-space geometry (pixels, Y-down)
//! - [`Color`]: RGBA color with linear interpolation
//! - [`KeyCode`]: host-independent key identity
//! - [`TimeProvider`], [`FrameClock`], [`FrameTime`]: frame timing

mod color;
mod geometry;
mod key_code;
mod time;

pub use color::Color;
pub use geometry::{Point, Rect, Viewport};
pub use key_code::KeyCode;
pub use time::{FrameClock, FrameTime, MockTimeProvider, SystemTimeProvider, TimeProvider};
