//! Layout invariants under viewport changes.

use osk_core::layout::{self, KeyboardLayout};
use osk_core::{Keyboard, KeyboardConfig, KeyTable, LayoutConfig};
use osk_types::{KeyCode, Rect, Viewport};
use proptest::prelude::*;

fn qwerty(width: u32, height: u32) -> KeyboardLayout {
    layout::compute(
        Viewport::new(width, height),
        KeyTable::qwerty().keys(),
        &LayoutConfig::default(),
    )
}

fn assert_scaled(small: Rect, large: Rect, factor: f32) {
    let close = |a: f32, b: f32| (a * factor - b).abs() <= 1e-3 * b.abs().max(1.0);
    assert!(
        close(small.x, large.x)
            && close(small.y, large.y)
            && close(small.width, large.width)
            && close(small.height, large.height),
        "{:?} * {} != {:?}",
        small,
        factor,
        large
    );
}

/// Doubling the viewport doubles every key rectangle.
#[test]
fn test_resize_doubles_rectangles() {
    let mut keyboard = Keyboard::qwerty(KeyboardConfig::default(), Viewport::new(800, 480)).unwrap();
    let before: Vec<_> = KeyTable::qwerty()
        .keys()
        .iter()
        .map(|k| *keyboard.key_runtime(k.primary).unwrap())
        .collect();

    keyboard.on_resize(1600, 960);

    for (key, old) in KeyTable::qwerty().keys().iter().zip(&before) {
        let new = keyboard.key_runtime(key.primary).unwrap();
        assert_scaled(old.bounding_box, new.bounding_box, 2.0);
        assert_scaled(old.draw_box, new.draw_box, 2.0);
    }
}

/// Resizing to the same dimensions twice yields identical rectangles.
#[test]
fn test_resize_is_idempotent() {
    let mut keyboard = Keyboard::qwerty(KeyboardConfig::default(), Viewport::new(800, 480)).unwrap();
    keyboard.on_resize(1024, 600);
    let first = keyboard.layout().clone();
    keyboard.on_resize(1024, 600);
    assert_eq!(keyboard.layout(), &first);

    let q = keyboard.key_runtime(KeyCode::Q).unwrap();
    assert_eq!(q.bounding_box, first.keys[0].bounding_box);
}

/// The keyboard occupies the bottom 40% of the viewport in four rows.
#[test]
fn test_keyboard_rows_fill_bottom() {
    let layout = qwerty(800, 480);
    let rows: std::collections::BTreeSet<i64> = layout
        .keys
        .iter()
        .map(|k| k.bounding_box.y.round() as i64)
        .collect();
    assert_eq!(rows.into_iter().collect::<Vec<_>>(), vec![288, 336, 384, 432]);
    let bottom = layout
        .keys
        .iter()
        .map(|k| k.bounding_box.bottom())
        .fold(0.0f32, f32::max);
    assert!((bottom - 480.0).abs() < 1e-3);
}

proptest! {
    /// Relative key positions are invariant under uniform scaling.
    #[test]
    fn layout_scales_uniformly(width in 120u32..2000, height in 120u32..2000, shift in 1u32..3) {
        let factor = (1u32 << shift) as f32;
        let small = qwerty(width, height);
        let large = qwerty(width << shift, height << shift);
        for (a, b) in small.keys.iter().zip(&large.keys) {
            assert_scaled(a.bounding_box, b.bounding_box, factor);
        }
    }

    /// Every key stays inside the keyboard area.
    #[test]
    fn keys_stay_inside_keyboard(width in 120u32..4000, height in 120u32..4000) {
        let layout = qwerty(width, height);
        let area = layout.keyboard;
        for key in &layout.keys {
            let b = key.bounding_box;
            prop_assert!(b.x >= -1e-3 && b.right() <= area.right() + 1e-2);
            prop_assert!(b.y >= area.y - 1e-3 && b.bottom() <= area.bottom() + 1e-2);
            prop_assert!(key.draw_box.width >= 0.0 && key.draw_box.height >= 0.0);
        }
    }
}
