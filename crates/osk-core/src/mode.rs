/// Case mode of the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyboardMode {
    #[default]
    Default,
    /// One-shot: consumed by the next non-shift keystroke.
    Shift,
    /// Sticky until a shift key is touched again.
    CapsLock,
}

impl KeyboardMode {
    /// Mode after a shift key is touched. `since_last_shift` is the time in
    /// seconds since the previous shift touch, `None` if there was none.
    pub fn on_shift_touch(self, since_last_shift: Option<f64>, double_tap_window: f32) -> Self {
        match self {
            KeyboardMode::Default => KeyboardMode::Shift,
            KeyboardMode::Shift => match since_last_shift {
                Some(delta) if delta < double_tap_window as f64 => KeyboardMode::CapsLock,
                _ => KeyboardMode::Default,
            },
            KeyboardMode::CapsLock => KeyboardMode::Default,
        }
    }

    /// Whether labels are shown in upper case and shift is reported held.
    pub fn is_shifted(self) -> bool {
        self != KeyboardMode::Default
    }
}
