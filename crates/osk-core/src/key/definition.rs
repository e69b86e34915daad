use osk_types::KeyCode;

/// Static description of a single on-screen key.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyDefinition {
    /// Stable identity, unique within a table.
    pub index: u32,
    /// Key code fired on a normal tap.
    pub primary: KeyCode,
    /// Key code fired after a long press, if any.
    pub alternate: Option<KeyCode>,
    /// Label shown in the default mode.
    pub label_lower: String,
    /// Label shown in shift and caps lock modes.
    pub label_upper: String,
    /// Small label describing the alternate action.
    pub label_alt: String,
    /// Key span in cell widths.
    pub width_units: f32,
    /// Horizontal gap before the key in cell widths.
    pub offset_units: f32,
    pub font_scale: f32,
    /// Fire every frame while held. Only valid without an alternate action.
    pub repeats_while_held: bool,
    /// Firing this key collapses the keyboard.
    pub dismisses: bool,
}

impl KeyDefinition {
    /// A one-cell key with the given labels and no alternate action.
    pub fn new(
        index: u32,
        primary: KeyCode,
        label_lower: impl Into<String>,
        label_upper: impl Into<String>,
    ) -> Self {
        Self {
            index,
            primary,
            alternate: None,
            label_lower: label_lower.into(),
            label_upper: label_upper.into(),
            label_alt: String::new(),
            width_units: 1.0,
            offset_units: 0.0,
            font_scale: 1.0,
            repeats_while_held: false,
            dismisses: false,
        }
    }

    /// Set the long-press action and its label.
    pub fn with_alternate(mut self, key: KeyCode, label: impl Into<String>) -> Self {
        self.alternate = Some(key);
        self.label_alt = label.into();
        self
    }

    pub fn with_width(mut self, units: f32) -> Self {
        self.width_units = units;
        self
    }

    pub fn with_offset(mut self, units: f32) -> Self {
        self.offset_units = units;
        self
    }

    pub fn with_font_scale(mut self, scale: f32) -> Self {
        self.font_scale = scale;
        self
    }

    pub fn repeating(mut self) -> Self {
        self.repeats_while_held = true;
        self
    }

    pub fn dismissing(mut self) -> Self {
        self.dismisses = true;
        self
    }

    pub fn is_shift(&self) -> bool {
        self.primary.is_shift()
    }

    /// Label for the current case.
    pub fn label(&self, upper: bool) -> &str {
        if upper {
            &self.label_upper
        } else {
            &self.label_lower
        }
    }
}
