use log::debug;
use osk_types::{Color, FrameTime, KeyCode, Point, Rect, Viewport};

use crate::config::KeyboardConfig;
use crate::engine::{InputEngine, KeyboardState};
use crate::error::KeyboardError;
use crate::key::{HighlightColor, KeyDefinition, KeyRuntimeState, KeyTable};
use crate::layout::{self, KeyboardLayout};
use crate::mode::KeyboardMode;

/// Resolution agnostic on-screen touch keyboard.
///
/// Owns the key table, the per-key runtime state, the input engine and the
/// current layout. The host calls [`Keyboard::update`] once per frame, reads
/// [`Keyboard::key_state`], and forwards surface size changes to
/// [`Keyboard::on_resize`].
#[derive(Debug, Clone)]
pub struct Keyboard {
    table: KeyTable,
    states: Vec<KeyRuntimeState>,
    engine: InputEngine,
    config: KeyboardConfig,
    viewport: Viewport,
    layout: KeyboardLayout,
    visible: bool,
}

impl Keyboard {
    /// Create a keyboard for `table` laid out on `viewport`.
    pub fn new(
        table: KeyTable,
        config: KeyboardConfig,
        viewport: Viewport,
    ) -> Result<Self, KeyboardError> {
        config.validate()?;
        let states = vec![KeyRuntimeState::new(); table.len()];
        let mut keyboard = Self {
            table,
            states,
            engine: InputEngine::new(config.timing),
            config,
            viewport,
            layout: KeyboardLayout::default(),
            visible: true,
        };
        keyboard.relayout();
        Ok(keyboard)
    }

    /// A QWERTY keyboard with the given configuration.
    pub fn qwerty(config: KeyboardConfig, viewport: Viewport) -> Result<Self, KeyboardError> {
        Self::new(KeyTable::qwerty(), config, viewport)
    }

    /// Process one frame of pointer input. `samples` holds every active touch
    /// point, plus the mouse position while its primary button is down.
    pub fn update(&mut self, time: FrameTime, samples: &[Point]) {
        if !self.visible {
            self.engine.clear_output();
            return;
        }
        let resolution = self
            .engine
            .resolve(time, samples, self.table.keys(), &mut self.states);
        if resolution.dismiss {
            debug!("Keyboard dismissed");
            self.hide();
        }
    }

    /// Keys down for the last frame. Valid until the next [`Keyboard::update`].
    pub fn key_state(&self) -> &KeyboardState {
        self.engine.output()
    }

    /// Recompute key rectangles for a new surface size.
    pub fn on_resize(&mut self, width: u32, height: u32) {
        self.viewport = Viewport::new(width, height);
        self.relayout();
    }

    fn relayout(&mut self) {
        self.layout = layout::compute(self.viewport, self.table.keys(), &self.config.layout);
        for (state, geometry) in self.states.iter_mut().zip(&self.layout.keys) {
            state.bounding_box = geometry.bounding_box;
            state.draw_box = geometry.draw_box;
        }
        debug!(
            "Keyboard laid out for {}x{} (cell {}x{})",
            self.viewport.width, self.viewport.height, self.layout.cell_width, self.layout.cell_height
        );
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    /// Collapse the keyboard. Presses in progress are dropped; the mode is kept.
    pub fn hide(&mut self) {
        self.visible = false;
        for state in &mut self.states {
            state.release_all();
        }
    }

    pub fn mode(&self) -> KeyboardMode {
        self.engine.mode()
    }

    pub fn config(&self) -> &KeyboardConfig {
        &self.config
    }

    pub fn table(&self) -> &KeyTable {
        &self.table
    }

    pub fn layout(&self) -> &KeyboardLayout {
        &self.layout
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Runtime state of the key whose primary action is `code`.
    pub fn key_runtime(&self, code: KeyCode) -> Option<&KeyRuntimeState> {
        self.table.position_of(code).map(|pos| &self.states[pos])
    }

    /// Read-only view of every key for drawing, in table order.
    pub fn key_views(&self) -> impl Iterator<Item = KeyView<'_>> {
        let mode = self.mode();
        let timing = &self.config.timing;
        let palette = &self.config.palette;
        self.table
            .keys()
            .iter()
            .zip(&self.states)
            .map(move |(definition, state)| {
                let active = match state.highlight {
                    HighlightColor::Touched => palette.touched,
                    HighlightColor::Alternated => palette.alternated,
                };
                let mut background = palette.key;
                if state.highlight_remaining > 0.0 {
                    background = palette
                        .key
                        .lerp(active, state.highlight_remaining / timing.highlight_duration);
                }
                if definition.is_shift() {
                    match mode {
                        KeyboardMode::Shift => background = palette.touched,
                        KeyboardMode::CapsLock => background = palette.alternated,
                        KeyboardMode::Default => {}
                    }
                }

                KeyView {
                    definition,
                    draw_box: state.draw_box,
                    background,
                    label: definition.label(mode.is_shifted()),
                }
            })
    }

    /// Area covered by the keyboard background.
    pub fn keyboard_rect(&self) -> Rect {
        self.layout.keyboard
    }
}

/// What the presentation layer needs to draw one key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyView<'a> {
    pub definition: &'a KeyDefinition,
    pub draw_box: Rect,
    pub background: Color,
    /// Main label for the current mode.
    pub label: &'a str,
}

impl KeyView<'_> {
    /// Label of the alternate action, if the key shows one.
    pub fn alt_label(&self) -> Option<&str> {
        let label = self.definition.label_alt.as_str();
        (!label.is_empty()).then_some(label)
    }

    pub fn font_scale(&self) -> f32 {
        self.definition.font_scale
    }
}
