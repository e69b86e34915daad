use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use osk_types::{FrameTime, Point};

use crate::engine::KeyboardState;
use crate::keyboard::Keyboard;

/// Keyboard handle for hosts that deliver resize notifications on another
/// thread. Every call takes an exclusive lock, so layout recomputation never
/// interleaves with a frame update or a draw.
#[derive(Debug, Clone)]
pub struct SharedKeyboard {
    inner: Arc<Mutex<Keyboard>>,
}

impl SharedKeyboard {
    pub fn new(keyboard: Keyboard) -> Self {
        Self {
            inner: Arc::new(Mutex::new(keyboard)),
        }
    }

    /// Lock the keyboard for a sequence of calls, e.g. update then draw.
    /// A poisoned lock is recovered: the keyboard is consistent between calls.
    pub fn lock(&self) -> MutexGuard<'_, Keyboard> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn update(&self, time: FrameTime, samples: &[Point]) -> KeyboardState {
        let mut keyboard = self.lock();
        keyboard.update(time, samples);
        keyboard.key_state().clone()
    }

    pub fn on_resize(&self, width: u32, height: u32) {
        self.lock().on_resize(width, height);
    }
}
