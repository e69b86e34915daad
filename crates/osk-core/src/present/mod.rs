//! Drawing the keyboard through a host-provided renderer.
//!
//! The host implements [`KeyboardRenderer`] on top of its graphics stack;
//! [`Presenter`] turns the keyboard's read-only views into fill and text
//! calls. A font that fails to load only disables text.

mod recorder;

use anyhow::Result;
use log::warn;
use osk_types::{Color, Point, Rect};

use crate::keyboard::Keyboard;

pub use recorder::{CommandRecorder, DrawCommand};

/// Main label size as a fraction of the cell height.
const LABEL_SIZE: f32 = 0.5;
/// Alternate label size as a fraction of the cell height.
const ALT_LABEL_SIZE: f32 = 0.25;

/// Abstraction over the host's 2D drawing backend.
/// Implementations: host renderers (production), CommandRecorder (testing).
pub trait KeyboardRenderer {
    /// Load the display font. It must contain the arrow glyphs used by the
    /// default labels (U+21E6..U+21F3).
    fn load_font(&mut self) -> Result<()>;

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<()>;

    /// Draw `text` with its top-left corner at `position`, `size` pixels high.
    fn draw_text(&mut self, text: &str, position: Point, size: f32, color: Color) -> Result<()>;
}

/// Draws a [`Keyboard`] each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Presenter {
    text_enabled: bool,
}

impl Presenter {
    /// Prepare drawing resources. A font load failure is logged and leaves
    /// the presenter drawing key boxes only.
    pub fn new<R: KeyboardRenderer>(renderer: &mut R) -> Self {
        let text_enabled = match renderer.load_font() {
            Ok(()) => true,
            Err(e) => {
                warn!("Unable to load keyboard font, labels disabled: {:#}", e);
                false
            }
        };
        Self { text_enabled }
    }

    pub fn text_enabled(&self) -> bool {
        self.text_enabled
    }

    /// Draw the keyboard. Hidden keyboards draw nothing.
    pub fn draw<R: KeyboardRenderer>(&self, keyboard: &Keyboard, renderer: &mut R) -> Result<()> {
        if !keyboard.is_visible() {
            return Ok(());
        }

        let palette = &keyboard.config().palette;
        let cell_height = keyboard.layout().cell_height;
        renderer.fill_rect(keyboard.keyboard_rect(), palette.background)?;

        for view in keyboard.key_views() {
            renderer.fill_rect(view.draw_box, view.background)?;
            if !self.text_enabled {
                continue;
            }

            let size = LABEL_SIZE * cell_height * view.font_scale();
            if !view.label.is_empty() {
                renderer.draw_text(view.label, view.draw_box.point_at(0.1, 0.2), size, palette.text)?;
            }
            if let Some(alt) = view.alt_label() {
                let size = ALT_LABEL_SIZE * cell_height * view.font_scale();
                renderer.draw_text(alt, view.draw_box.point_at(0.8, 0.05), size, palette.alt_text)?;
            }
        }
        Ok(())
    }
}
