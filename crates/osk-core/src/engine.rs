//! Per-frame touch-to-key resolution.
//!
//! Each frame the engine samples the pointer positions against the key
//! boxes, decides which keys fire, advances the press timers and applies
//! the shift/caps lock rules. The keys that fired are collected in a
//! [`KeyboardState`] which is rebuilt from scratch every frame.

use log::{debug, trace};
use osk_types::{FrameTime, KeyCode, Point};

use crate::config::TimingConfig;
use crate::key::{HighlightColor, KeyDefinition, KeyRuntimeState};
use crate::mode::KeyboardMode;

/// Keys reported down for one frame, in firing order, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyboardState {
    keys: Vec<KeyCode>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `key` unless it is already present.
    pub fn insert(&mut self, key: KeyCode) {
        if !self.keys.contains(&key) {
            self.keys.push(key);
        }
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys.contains(&key)
    }

    pub fn keys(&self) -> &[KeyCode] {
        &self.keys
    }

    pub fn iter(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.keys.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Most recent firing, used for the cooldown check.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Firing {
    index: u32,
    at: f64,
}

/// Result of resolving one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Resolution {
    /// A dismissing key fired its primary action.
    pub dismiss: bool,
}

/// The input resolution state machine.
#[derive(Debug, Clone)]
pub struct InputEngine {
    timing: TimingConfig,
    mode: KeyboardMode,
    last_fired: Option<Firing>,
    last_shift_touch: Option<f64>,
    output: KeyboardState,
}

impl InputEngine {
    pub fn new(timing: TimingConfig) -> Self {
        Self {
            timing,
            mode: KeyboardMode::Default,
            last_fired: None,
            last_shift_touch: None,
            output: KeyboardState::new(),
        }
    }

    pub fn mode(&self) -> KeyboardMode {
        self.mode
    }

    /// Keys fired by the last resolved frame.
    pub fn output(&self) -> &KeyboardState {
        &self.output
    }

    pub fn clear_output(&mut self) {
        self.output.clear();
    }

    /// Resolve one frame.
    ///
    /// `keys` and `states` are parallel slices: `states[i]` belongs to
    /// `keys[i]`. `samples` holds every active pointer position of the frame.
    pub fn resolve(
        &mut self,
        time: FrameTime,
        samples: &[Point],
        keys: &[KeyDefinition],
        states: &mut [KeyRuntimeState],
    ) -> Resolution {
        debug_assert_eq!(keys.len(), states.len());
        self.output.clear();
        let now = time.total;

        for &point in samples {
            for (key, state) in keys.iter().zip(states.iter_mut()) {
                if !state.bounding_box.contains(point) {
                    continue;
                }
                if state.touch(self.timing.highlight_duration) && key.is_shift() {
                    self.toggle_shift(now);
                }
            }
        }

        let mut resolution = Resolution::default();
        for (key, state) in keys.iter().zip(states.iter_mut()) {
            if let Some(code) = self.fire(key, state, now) {
                trace!("Key {} fired {}", key.index, code);
                self.output.insert(code);
                if key.dismisses && code == key.primary {
                    resolution.dismiss = true;
                }
            }
        }

        for state in states.iter_mut() {
            state.end_frame(time.delta);
        }

        self.apply_mode();
        resolution
    }

    /// Firing rule for a single key. Returns the key code to report, if any.
    fn fire(&mut self, key: &KeyDefinition, state: &mut KeyRuntimeState, now: f64) -> Option<KeyCode> {
        // Held repeat keys fire every frame; only the frame rate limits them.
        if key.alternate.is_none() && key.repeats_while_held && state.pressed {
            self.record(key.index, now);
            return Some(key.primary);
        }

        let released = !state.pressed && state.is_held();
        let charged = key.alternate.is_some() && state.pressed_duration > self.timing.alt_charge;
        if !(released || charged) || state.alternate_fired {
            return None;
        }
        if self.is_cooling_down(key.index, now) {
            return None;
        }

        self.record(key.index, now);
        match key.alternate {
            Some(alternate) if charged => {
                state.alternate_fired = true;
                state.highlight = HighlightColor::Alternated;
                Some(alternate)
            }
            _ => Some(key.primary),
        }
    }

    fn is_cooling_down(&self, index: u32, now: f64) -> bool {
        match self.last_fired {
            Some(last) => last.index == index && now - last.at < self.timing.key_cooldown as f64,
            None => false,
        }
    }

    fn record(&mut self, index: u32, now: f64) {
        self.last_fired = Some(Firing { index, at: now });
    }

    fn toggle_shift(&mut self, now: f64) {
        let since = self.last_shift_touch.map(|at| now - at);
        let next = self.mode.on_shift_touch(since, self.timing.double_tap_window);
        debug!("Keyboard mode {:?} -> {:?}", self.mode, next);
        self.mode = next;
        self.last_shift_touch = Some(now);
    }

    /// Shift is consumed by the first keystroke that is not itself a shift
    /// tap. While shifted, the host sees shift held.
    fn apply_mode(&mut self) {
        if !self.mode.is_shifted() {
            return;
        }
        if self.mode == KeyboardMode::Shift
            && !self.output.is_empty()
            && !self.output.iter().any(KeyCode::is_shift)
        {
            debug!("Keyboard mode {:?} -> {:?}", self.mode, KeyboardMode::Default);
            self.mode = KeyboardMode::Default;
        }
        self.output.insert(KeyCode::LeftShift);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use osk_types::Rect;

    const DT: f32 = 0.05;

    /// Five keys in a row, 100px wide: `a`, `q` (alternate `1`), backspace, shift, close.
    struct Rig {
        engine: InputEngine,
        keys: Vec<KeyDefinition>,
        states: Vec<KeyRuntimeState>,
        time: FrameTime,
    }

    impl Rig {
        fn new() -> Self {
            let keys = vec![
                KeyDefinition::new(0, KeyCode::A, "a", "A"),
                KeyDefinition::new(1, KeyCode::Q, "q", "Q").with_alternate(KeyCode::D1, "1"),
                KeyDefinition::new(2, KeyCode::Back, "<-", "<-").repeating(),
                KeyDefinition::new(3, KeyCode::LeftShift, "shift", "shift"),
                KeyDefinition::new(4, KeyCode::Escape, "close", "close").dismissing(),
            ];
            let states = (0..keys.len())
                .map(|i| KeyRuntimeState {
                    bounding_box: Rect::new(i as f32 * 100.0, 0.0, 100.0, 100.0),
                    ..KeyRuntimeState::default()
                })
                .collect();
            Self {
                engine: InputEngine::new(TimingConfig::default()),
                keys,
                states,
                time: FrameTime::default(),
            }
        }

        fn center(pos: usize) -> Point {
            Point::new(pos as f32 * 100.0 + 50.0, 50.0)
        }

        fn frame(&mut self, touching: &[usize]) -> Vec<KeyCode> {
            self.frame_dt(DT, touching)
        }

        fn frame_dt(&mut self, dt: f32, touching: &[usize]) -> Vec<KeyCode> {
            self.time = self.time.advance(dt);
            let samples: Vec<Point> = touching.iter().map(|&p| Self::center(p)).collect();
            self.engine
                .resolve(self.time, &samples, &self.keys, &mut self.states);
            self.engine.output().keys().to_vec()
        }
    }

    #[test]
    fn test_no_samples_no_output() {
        let mut rig = Rig::new();
        for _ in 0..10 {
            assert!(rig.frame(&[]).is_empty());
        }
    }

    #[test]
    fn test_sample_outside_keys_ignored() {
        let mut rig = Rig::new();
        rig.time = rig.time.advance(DT);
        rig.engine.resolve(
            rig.time,
            &[Point::new(50.0, 500.0)],
            &rig.keys,
            &mut rig.states,
        );
        assert!(rig.engine.output().is_empty());
        assert!(rig.states.iter().all(|s| !s.is_held()));
    }

    #[test]
    fn test_tap_fires_on_release() {
        let mut rig = Rig::new();
        assert!(rig.frame(&[0]).is_empty());
        assert!(rig.frame(&[0]).is_empty());
        assert_eq!(rig.frame(&[]), vec![KeyCode::A]);
        assert!(rig.frame(&[]).is_empty());
    }

    #[test]
    fn test_first_touch_sets_highlight() {
        let mut rig = Rig::new();
        rig.frame(&[0]);
        let state = &rig.states[0];
        assert!((state.highlight_remaining - (0.33 - DT)).abs() < 1e-6);
        assert_eq!(state.highlight, HighlightColor::Touched);
        assert!((state.pressed_duration - DT).abs() < 1e-6);
    }

    #[test]
    fn test_two_pointers_on_one_key_count_once() {
        let mut rig = Rig::new();
        rig.time = rig.time.advance(DT);
        let samples = [Point::new(10.0, 10.0), Point::new(90.0, 90.0)];
        rig.engine
            .resolve(rig.time, &samples, &rig.keys, &mut rig.states);
        assert!((rig.states[0].pressed_duration - DT).abs() < 1e-6);
        assert_eq!(rig.frame(&[]), vec![KeyCode::A]);
    }

    #[test]
    fn test_overlapping_boxes_both_hit() {
        let mut rig = Rig::new();
        rig.states[1].bounding_box = Rect::new(50.0, 0.0, 100.0, 100.0);
        rig.frame(&[0]);
        let out = rig.frame(&[]);
        assert_eq!(out, vec![KeyCode::A, KeyCode::Q]);
    }

    #[test]
    fn test_repeat_fires_every_frame() {
        let mut rig = Rig::new();
        for _ in 0..5 {
            assert_eq!(rig.frame(&[2]), vec![KeyCode::Back]);
        }
        // Release comes within the cooldown of the last repeat.
        assert!(rig.frame(&[]).is_empty());
    }

    #[test]
    fn test_alternate_fires_once_after_charge() {
        let mut rig = Rig::new();
        let mut fired = Vec::new();
        for _ in 0..30 {
            fired.extend(rig.frame(&[1]));
        }
        assert_eq!(fired, vec![KeyCode::D1]);
        assert_eq!(rig.states[1].highlight, HighlightColor::Alternated);
        assert!(rig.states[1].alternate_fired);

        assert!(rig.frame(&[]).is_empty());
        assert!(!rig.states[1].alternate_fired);
    }

    #[test]
    fn test_alternate_key_short_tap_fires_primary() {
        let mut rig = Rig::new();
        for _ in 0..5 {
            assert!(rig.frame(&[1]).is_empty());
        }
        assert_eq!(rig.frame(&[]), vec![KeyCode::Q]);
    }

    #[test]
    fn test_cooldown_suppresses_quick_second_tap() {
        let mut rig = Rig::new();
        rig.frame(&[0]);
        assert_eq!(rig.frame(&[]), vec![KeyCode::A]);
        rig.frame(&[0]);
        // 0.1s after the first firing.
        assert!(rig.frame(&[]).is_empty());
    }

    #[test]
    fn test_cooldown_expires() {
        let mut rig = Rig::new();
        rig.frame(&[0]);
        assert_eq!(rig.frame(&[]), vec![KeyCode::A]);
        rig.frame_dt(0.2, &[0]);
        assert_eq!(rig.frame(&[]), vec![KeyCode::A]);
    }

    #[test]
    fn test_cooldown_is_per_key() {
        let mut rig = Rig::new();
        rig.frame(&[0]);
        assert_eq!(rig.frame(&[]), vec![KeyCode::A]);
        rig.frame(&[1]);
        assert_eq!(rig.frame(&[]), vec![KeyCode::Q]);
    }

    #[test]
    fn test_cooldown_only_remembers_last_key() {
        let mut rig = Rig::new();
        let dt = 0.02;
        rig.frame_dt(dt, &[0]);
        assert_eq!(rig.frame_dt(dt, &[]), vec![KeyCode::A]);
        rig.frame_dt(dt, &[1]);
        assert_eq!(rig.frame_dt(dt, &[]), vec![KeyCode::Q]);
        rig.frame_dt(dt, &[0]);
        // 0.08s after the first A, but Q fired in between.
        assert_eq!(rig.frame_dt(dt, &[]), vec![KeyCode::A]);
    }

    #[test]
    fn test_simultaneous_releases_keep_table_order() {
        let mut rig = Rig::new();
        rig.frame(&[1, 0]);
        assert_eq!(rig.frame(&[]), vec![KeyCode::A, KeyCode::Q]);
    }

    #[test]
    fn test_shift_is_one_shot() {
        let mut rig = Rig::new();
        rig.frame(&[3]);
        assert_eq!(rig.engine.mode(), KeyboardMode::Shift);
        assert_eq!(rig.frame(&[]), vec![KeyCode::LeftShift]);
        assert_eq!(rig.engine.mode(), KeyboardMode::Shift);

        // Idle frames keep shift held.
        assert_eq!(rig.frame_dt(0.5, &[]), vec![KeyCode::LeftShift]);

        rig.frame(&[0]);
        assert_eq!(rig.frame(&[]), vec![KeyCode::A, KeyCode::LeftShift]);
        assert_eq!(rig.engine.mode(), KeyboardMode::Default);
        assert!(rig.frame(&[]).is_empty());
    }

    #[test]
    fn test_shift_double_tap_locks_caps() {
        let mut rig = Rig::new();
        rig.frame(&[3]);
        rig.frame(&[]);
        rig.frame(&[3]);
        assert_eq!(rig.engine.mode(), KeyboardMode::CapsLock);
        rig.frame(&[]);

        rig.frame(&[0]);
        assert_eq!(rig.frame(&[]), vec![KeyCode::A, KeyCode::LeftShift]);
        assert_eq!(rig.engine.mode(), KeyboardMode::CapsLock);

        rig.frame(&[3]);
        assert_eq!(rig.engine.mode(), KeyboardMode::Default);
    }

    #[test]
    fn test_shift_slow_second_tap_returns_to_default() {
        let mut rig = Rig::new();
        rig.frame(&[3]);
        rig.frame(&[]);
        rig.frame_dt(0.5, &[]);
        rig.frame(&[3]);
        assert_eq!(rig.engine.mode(), KeyboardMode::Default);
    }

    #[test]
    fn test_held_shift_toggles_once() {
        let mut rig = Rig::new();
        for _ in 0..10 {
            rig.frame(&[3]);
        }
        assert_eq!(rig.engine.mode(), KeyboardMode::Shift);
    }

    #[test]
    fn test_dismiss_key_reports_dismissal() {
        let mut rig = Rig::new();
        rig.time = rig.time.advance(DT);
        let touch = [Rig::center(4)];
        let first = rig.engine.resolve(rig.time, &touch, &rig.keys, &mut rig.states);
        assert!(!first.dismiss);

        rig.time = rig.time.advance(DT);
        let release = rig.engine.resolve(rig.time, &[], &rig.keys, &mut rig.states);
        assert!(release.dismiss);
        assert!(rig.engine.output().is_key_down(KeyCode::Escape));
    }

    #[test]
    fn test_keyboard_state_dedup() {
        let mut state = KeyboardState::new();
        state.insert(KeyCode::A);
        state.insert(KeyCode::LeftShift);
        state.insert(KeyCode::A);
        assert_eq!(state.keys(), &[KeyCode::A, KeyCode::LeftShift]);
        assert!(state.is_key_down(KeyCode::LeftShift));
        assert!(!state.is_key_down(KeyCode::B));
        state.clear();
        assert!(state.is_empty());
    }
}
