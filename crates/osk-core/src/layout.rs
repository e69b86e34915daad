//! Resolution agnostic key placement.
//!
//! The keyboard spans the full viewport width and a fixed fraction of its
//! height, anchored to the bottom edge. Keys flow left to right over a grid
//! of equally sized cells and wrap to the next row once the cursor has no
//! room for another cell.

use osk_types::{Rect, Viewport};

use crate::config::LayoutConfig;
use crate::key::KeyDefinition;

/// Rectangles of a single key.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct KeyGeometry {
    /// Touch-sensitive area.
    pub bounding_box: Rect,
    /// Visible area: the bounding box minus padding.
    pub draw_box: Rect,
}

/// Result of laying out a key table on a viewport.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KeyboardLayout {
    /// Area covered by the keyboard background.
    pub keyboard: Rect,
    pub cell_width: f32,
    pub cell_height: f32,
    /// One entry per key, in table order.
    pub keys: Vec<KeyGeometry>,
}

/// Compute the rectangles of every key for the given viewport.
pub fn compute(viewport: Viewport, keys: &[KeyDefinition], config: &LayoutConfig) -> KeyboardLayout {
    let width = viewport.width as f32;
    let height = viewport.height as f32;
    let keyboard_height = height * config.height_fraction;
    let cell_width = width / config.columns.max(1) as f32;
    let cell_height = keyboard_height / config.rows.max(1) as f32;
    let padding = cell_width * config.key_padding;

    let top = height - keyboard_height;
    let mut x = 0.0f32;
    let mut y = top;

    let geometry = keys
        .iter()
        .map(|key| {
            let offset = key.offset_units * cell_width;
            let bounding_box = Rect::new(x + offset, y, key.width_units * cell_width, cell_height);

            x += bounding_box.width + offset;
            if x + cell_width > width {
                x = 0.0;
                y += cell_height;
            }

            KeyGeometry {
                bounding_box,
                draw_box: bounding_box.inset(padding),
            }
        })
        .collect();

    KeyboardLayout {
        keyboard: Rect::new(0.0, top, width, keyboard_height),
        cell_width,
        cell_height,
        keys: geometry,
    }
}
