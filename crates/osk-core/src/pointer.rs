use std::collections::VecDeque;

use osk_types::Point;

/// Abstraction over pointer input sources.
/// Implementations: host touch/mouse adapters (production), ScriptedPointers (testing).
pub trait PointerSource {
    /// Positions of every active pointer for the current frame.
    fn poll_samples(&mut self) -> Vec<Point>;
}

/// Collect the samples of one frame: all touch points, plus the mouse
/// position while its primary button is held.
pub fn collect_samples(touches: &[Point], mouse: Option<Point>) -> Vec<Point> {
    let mut samples = Vec::with_capacity(touches.len() + 1);
    samples.extend_from_slice(touches);
    samples.extend(mouse);
    samples
}

/// Replays a fixed list of per-frame samples, then reports no pointers.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPointers {
    frames: VecDeque<Vec<Point>>,
}

impl ScriptedPointers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a frame with the given pointers.
    pub fn frame(mut self, samples: &[Point]) -> Self {
        self.frames.push_back(samples.to_vec());
        self
    }

    /// Append `count` frames holding `point`.
    pub fn hold(mut self, point: Point, count: usize) -> Self {
        for _ in 0..count {
            self.frames.push_back(vec![point]);
        }
        self
    }

    /// Append `count` frames without pointers.
    pub fn idle(mut self, count: usize) -> Self {
        for _ in 0..count {
            self.frames.push_back(Vec::new());
        }
        self
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl PointerSource for ScriptedPointers {
    fn poll_samples(&mut self) -> Vec<Point> {
        self.frames.pop_front().unwrap_or_default()
    }
}
