use anyhow::{Result, anyhow};
use osk_types::{Color, Point, Rect};

use super::KeyboardRenderer;

/// One call made on a [`CommandRecorder`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        color: Color,
    },
    Text {
        text: String,
        position: Point,
        size: f32,
        color: Color,
    },
}

/// Renderer that keeps every draw call in order instead of drawing.
#[derive(Debug, Default)]
pub struct CommandRecorder {
    commands: Vec<DrawCommand>,
    font_missing: bool,
    font_loaded: bool,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A recorder whose font fails to load.
    pub fn without_font() -> Self {
        Self {
            font_missing: true,
            ..Self::default()
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }
}

impl KeyboardRenderer for CommandRecorder {
    fn load_font(&mut self) -> Result<()> {
        if self.font_missing {
            return Err(anyhow!("font resource not found"));
        }
        self.font_loaded = true;
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<()> {
        self.commands.push(DrawCommand::FillRect { rect, color });
        Ok(())
    }

    fn draw_text(&mut self, text: &str, position: Point, size: f32, color: Color) -> Result<()> {
        if !self.font_loaded {
            return Err(anyhow!("draw_text called without a font"));
        }
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            position,
            size,
            color,
        });
        Ok(())
    }
}
