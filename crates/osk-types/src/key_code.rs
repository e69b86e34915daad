use std::fmt;

use serde::{Deserialize, Serialize};

/// Key identity reported to the host.
///
/// Deliberately independent of any windowing or input library so hosts can
/// map it onto whatever key enum they use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum KeyCode {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    D0,
    D1,
    D2,
    D3,
    D4,
    D5,
    D6,
    D7,
    D8,
    D9,
    Back,
    Enter,
    LeftShift,
    RightShift,
    Space,
    Escape,
}

impl KeyCode {
    /// Whether this key toggles the keyboard's shift mode.
    pub fn is_shift(self) -> bool {
        matches!(self, KeyCode::LeftShift | KeyCode::RightShift)
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
