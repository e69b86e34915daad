use osk_types::Rect;

/// Which color a key's highlight fades from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HighlightColor {
    #[default]
    Touched,
    Alternated,
}

/// Per-key state mutated every frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KeyRuntimeState {
    /// A pointer sample of the current frame lies inside the key.
    pub pressed: bool,
    /// A press began on an earlier frame and has not been released.
    pub held: bool,
    /// Seconds of continuous pressing; zero while the key is up.
    pub pressed_duration: f32,
    /// The alternate action fired during the current press.
    pub alternate_fired: bool,
    /// Remaining highlight fade time in seconds.
    pub highlight_remaining: f32,
    pub highlight: HighlightColor,
    /// Touch-sensitive area. Written by the layout engine only.
    pub bounding_box: Rect,
    /// Visible area. Written by the layout engine only.
    pub draw_box: Rect,
}

impl KeyRuntimeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a press is in progress (pressed on an earlier frame and not
    /// yet released).
    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Mark the key as touched by a sample of this frame.
    /// Returns true when this starts a new continuous press.
    pub fn touch(&mut self, highlight_duration: f32) -> bool {
        if self.pressed {
            return false;
        }
        self.pressed = true;
        if !self.held {
            self.highlight_remaining = highlight_duration;
            self.highlight = HighlightColor::Touched;
            return true;
        }
        false
    }

    /// End-of-frame bookkeeping: advance or reset the press timer, clear the
    /// sample flag and fade the highlight. Negative or non-finite deltas count
    /// as zero.
    pub fn end_frame(&mut self, dt: f32) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        if self.pressed {
            self.pressed_duration += dt;
        } else {
            self.pressed_duration = 0.0;
            self.alternate_fired = false;
        }
        self.held = self.pressed;
        self.pressed = false;
        self.highlight_remaining = (self.highlight_remaining - dt).max(0.0);
    }

    /// Forget any press in progress. Geometry is kept.
    pub fn release_all(&mut self) {
        self.pressed = false;
        self.held = false;
        self.pressed_duration = 0.0;
        self.alternate_fired = false;
        self.highlight_remaining = 0.0;
        self.highlight = HighlightColor::Touched;
    }
}
