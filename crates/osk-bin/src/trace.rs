//! Recorded pointer traces and their replay through a keyboard.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use osk_core::{Keyboard, collect_samples};
use osk_types::{FrameTime, KeyCode, Point, Viewport};
use serde::{Deserialize, Serialize};

/// Frame length used when a frame does not specify one (60fps).
const DEFAULT_DT: f32 = 1.0 / 60.0;

/// A recorded input session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trace {
    /// Initial surface size; the command line may override it.
    #[serde(default)]
    pub viewport: Option<Viewport>,
    pub frames: Vec<TraceFrame>,
}

/// Pointer input of one frame.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TraceFrame {
    /// Seconds since the previous frame.
    #[serde(default = "default_dt")]
    pub dt: f32,
    /// Active touch points.
    #[serde(default)]
    pub touches: Vec<Point>,
    /// Mouse position while the primary button is down.
    #[serde(default)]
    pub mouse: Option<Point>,
    /// Touch the center of these keys, wherever the layout put them.
    #[serde(default)]
    pub keys: Vec<KeyCode>,
    /// Surface resize delivered before this frame.
    #[serde(default)]
    pub resize: Option<Viewport>,
    /// Re-open the keyboard before this frame.
    #[serde(default)]
    pub show: bool,
}

fn default_dt() -> f32 {
    DEFAULT_DT
}

impl Trace {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read trace: {}", path.display()))?;
        let trace: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse trace: {}", path.display()))?;
        trace.validate()?;
        Ok(trace)
    }

    /// Frame deltas must be finite and not negative.
    pub fn validate(&self) -> Result<()> {
        for (frame, input) in self.frames.iter().enumerate() {
            if !(input.dt.is_finite() && input.dt >= 0.0) {
                bail!("Frame {}: invalid dt {}", frame, input.dt);
            }
        }
        Ok(())
    }
}

/// What the keyboard reported for one frame.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FrameReport {
    pub frame: usize,
    pub time: f64,
    pub keys: Vec<KeyCode>,
    pub mode: String,
    pub visible: bool,
}

/// Feed every frame of `trace` to `keyboard`.
pub fn replay(keyboard: &mut Keyboard, trace: &Trace) -> Result<Vec<FrameReport>> {
    let mut time = FrameTime::default();
    let mut reports = Vec::with_capacity(trace.frames.len());

    for (frame, input) in trace.frames.iter().enumerate() {
        if let Some(viewport) = input.resize {
            keyboard.on_resize(viewport.width, viewport.height);
        }
        if input.show {
            keyboard.show();
        }

        let mut touches = input.touches.clone();
        for &code in &input.keys {
            let state = keyboard
                .key_runtime(code)
                .ok_or_else(|| anyhow!("Frame {}: no key for {}", frame, code))?;
            touches.push(state.bounding_box.point_at(0.5, 0.5));
        }
        let samples = collect_samples(&touches, input.mouse);

        time = time.advance(input.dt);
        keyboard.update(time, &samples);

        reports.push(FrameReport {
            frame,
            time: time.total,
            keys: keyboard.key_state().iter().collect(),
            mode: format!("{:?}", keyboard.mode()),
            visible: keyboard.is_visible(),
        });
    }

    Ok(reports)
}
