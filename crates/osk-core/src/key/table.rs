use std::collections::HashSet;

use osk_types::KeyCode;

use crate::error::KeyboardError;
use crate::key::definition::KeyDefinition;

/// Validated, read-only set of key definitions in layout order.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyTable {
    keys: Vec<KeyDefinition>,
}

impl KeyTable {
    /// Validate `keys` and build the table. Keys are laid out in the given order.
    pub fn new(keys: Vec<KeyDefinition>) -> Result<Self, KeyboardError> {
        if keys.is_empty() {
            return Err(KeyboardError::EmptyTable);
        }

        let mut indices = HashSet::with_capacity(keys.len());
        let mut actions = HashSet::with_capacity(keys.len());
        for key in &keys {
            if !indices.insert(key.index) {
                return Err(KeyboardError::DuplicateIndex { index: key.index });
            }
            if !actions.insert(key.primary) {
                return Err(KeyboardError::DuplicateAction {
                    action: key.primary,
                    index: key.index,
                });
            }
            if key.repeats_while_held && key.alternate.is_some() {
                return Err(KeyboardError::RepeatWithAlternate { index: key.index });
            }
            check_geometry(key)?;
        }

        Ok(Self { keys })
    }

    /// The QWERTY layout: letters with digit alternates on the top row,
    /// backspace, return, both shifts, space and a close key.
    pub fn qwerty() -> Self {
        let mut keys = Vec::with_capacity(32);
        let mut next = 0u32..;
        let mut index = || next.next().unwrap_or_default();

        // Row 1
        for (code, (digit, label)) in TOP_ROW.into_iter().zip(DIGITS) {
            keys.push(letter(index(), code).with_alternate(digit, label));
        }
        keys.push(
            KeyDefinition::new(index(), KeyCode::Back, "⇦Backspace", "⇦Backspace")
                .with_width(2.0)
                .with_font_scale(0.67)
                .repeating(),
        );

        // Row 2
        for (n, code) in HOME_ROW.into_iter().enumerate() {
            let key = letter(index(), code);
            keys.push(if n == 0 { key.with_offset(0.5) } else { key });
        }
        keys.push(
            KeyDefinition::new(index(), KeyCode::Enter, "Return", "Return")
                .with_width(2.0)
                .with_font_scale(0.67),
        );

        // Row 3
        keys.push(
            KeyDefinition::new(index(), KeyCode::LeftShift, "⇧Shift", "⇧Shift")
                .with_font_scale(0.67),
        );
        for code in BOTTOM_ROW {
            keys.push(letter(index(), code));
        }
        keys.push(
            KeyDefinition::new(index(), KeyCode::RightShift, "⇧Shift", "⇧Shift")
                .with_offset(2.5)
                .with_width(1.5)
                .with_font_scale(0.67),
        );

        // Row 4
        keys.push(
            KeyDefinition::new(index(), KeyCode::Space, "", "")
                .with_offset(3.0)
                .with_width(5.0),
        );
        keys.push(
            KeyDefinition::new(index(), KeyCode::Escape, "Close ⇩", "Close ⇩")
                .with_offset(3.0)
                .with_font_scale(0.75)
                .dismissing(),
        );

        Self { keys }
    }

    pub fn keys(&self) -> &[KeyDefinition] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Position of the key whose primary action is `code`.
    pub fn position_of(&self, code: KeyCode) -> Option<usize> {
        self.keys.iter().position(|k| k.primary == code)
    }

    pub fn get(&self, code: KeyCode) -> Option<&KeyDefinition> {
        self.position_of(code).map(|pos| &self.keys[pos])
    }
}

fn check_geometry(key: &KeyDefinition) -> Result<(), KeyboardError> {
    let reason = if !(key.width_units >= 1.0) {
        "width must be at least one cell"
    } else if !(key.offset_units >= 0.0) {
        "offset must not be negative"
    } else if !(key.font_scale > 0.0) {
        "font scale must be positive"
    } else {
        return Ok(());
    };
    Err(KeyboardError::InvalidGeometry {
        index: key.index,
        reason,
    })
}

const TOP_ROW: [KeyCode; 10] = [
    KeyCode::Q,
    KeyCode::W,
    KeyCode::E,
    KeyCode::R,
    KeyCode::T,
    KeyCode::Y,
    KeyCode::U,
    KeyCode::I,
    KeyCode::O,
    KeyCode::P,
];

const DIGITS: [(KeyCode, &str); 10] = [
    (KeyCode::D1, "1"),
    (KeyCode::D2, "2"),
    (KeyCode::D3, "3"),
    (KeyCode::D4, "4"),
    (KeyCode::D5, "5"),
    (KeyCode::D6, "6"),
    (KeyCode::D7, "7"),
    (KeyCode::D8, "8"),
    (KeyCode::D9, "9"),
    (KeyCode::D0, "0"),
];

const HOME_ROW: [KeyCode; 9] = [
    KeyCode::A,
    KeyCode::S,
    KeyCode::D,
    KeyCode::F,
    KeyCode::G,
    KeyCode::H,
    KeyCode::J,
    KeyCode::K,
    KeyCode::L,
];

const BOTTOM_ROW: [KeyCode; 7] = [
    KeyCode::Z,
    KeyCode::X,
    KeyCode::C,
    KeyCode::V,
    KeyCode::B,
    KeyCode::N,
    KeyCode::M,
];

/// Letter key labelled with its lower and upper case letter.
fn letter(index: u32, code: KeyCode) -> KeyDefinition {
    let upper = code.to_string();
    KeyDefinition::new(index, code, upper.to_lowercase(), upper)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qwerty_is_valid() {
        let table = KeyTable::qwerty();
        assert_eq!(table.len(), 32);
        assert_eq!(KeyTable::new(table.keys().to_vec()), Ok(table));
    }

    #[test]
    fn test_qwerty_indices_are_sequential() {
        let table = KeyTable::qwerty();
        for (pos, key) in table.keys().iter().enumerate() {
            assert_eq!(key.index as usize, pos);
        }
    }

    #[test]
    fn test_qwerty_top_row_alternates() {
        let table = KeyTable::qwerty();
        let q = table.get(KeyCode::Q).unwrap();
        assert_eq!(q.alternate, Some(KeyCode::D1));
        assert_eq!(q.label_alt, "1");
        let p = table.get(KeyCode::P).unwrap();
        assert_eq!(p.alternate, Some(KeyCode::D0));
        assert_eq!(p.label_alt, "0");
        assert_eq!(table.get(KeyCode::A).unwrap().alternate, None);
    }

    #[test]
    fn test_qwerty_letter_labels() {
        let table = KeyTable::qwerty();
        let q = table.get(KeyCode::Q).unwrap();
        assert_eq!((q.label_lower.as_str(), q.label_upper.as_str()), ("q", "Q"));
        let m = table.get(KeyCode::M).unwrap();
        assert_eq!((m.label_lower.as_str(), m.label_upper.as_str()), ("m", "M"));
        assert_eq!(table.get(KeyCode::A).unwrap().offset_units, 0.5);
        assert_eq!(table.get(KeyCode::S).unwrap().offset_units, 0.0);

        let spaces = table.keys().iter().filter(|k| k.primary == KeyCode::Space).count();
        assert_eq!(spaces, 1);
    }

    #[test]
    fn test_qwerty_special_keys() {
        let table = KeyTable::qwerty();
        let back = table.get(KeyCode::Back).unwrap();
        assert!(back.repeats_while_held);
        assert_eq!(back.width_units, 2.0);

        let space = table.get(KeyCode::Space).unwrap();
        assert!(space.label_lower.is_empty());
        assert_eq!(space.width_units, 5.0);

        assert!(table.get(KeyCode::Escape).unwrap().dismisses);
        assert_eq!(table.get(KeyCode::RightShift).unwrap().offset_units, 2.5);
    }

    #[test]
    fn test_empty_table_rejected() {
        assert_eq!(KeyTable::new(Vec::new()), Err(KeyboardError::EmptyTable));
    }

    #[test]
    fn test_duplicate_index_rejected() {
        let keys = vec![
            KeyDefinition::new(21, KeyCode::LeftShift, "⇧", "⇧"),
            KeyDefinition::new(21, KeyCode::Z, "z", "Z"),
        ];
        assert_eq!(
            KeyTable::new(keys),
            Err(KeyboardError::DuplicateIndex { index: 21 })
        );
    }

    #[test]
    fn test_duplicate_action_rejected() {
        let keys = vec![
            KeyDefinition::new(0, KeyCode::A, "a", "A"),
            KeyDefinition::new(1, KeyCode::A, "a", "A"),
        ];
        assert_eq!(
            KeyTable::new(keys),
            Err(KeyboardError::DuplicateAction {
                action: KeyCode::A,
                index: 1
            })
        );
    }

    #[test]
    fn test_repeat_with_alternate_rejected() {
        let keys = vec![
            KeyDefinition::new(0, KeyCode::Back, "<", "<")
                .with_alternate(KeyCode::Escape, "esc")
                .repeating(),
        ];
        assert_eq!(
            KeyTable::new(keys),
            Err(KeyboardError::RepeatWithAlternate { index: 0 })
        );
    }

    #[test]
    fn test_invalid_geometry_rejected() {
        let narrow = vec![KeyDefinition::new(0, KeyCode::A, "a", "A").with_width(0.5)];
        assert!(matches!(
            KeyTable::new(narrow),
            Err(KeyboardError::InvalidGeometry { index: 0, .. })
        ));

        let negative = vec![KeyDefinition::new(4, KeyCode::A, "a", "A").with_offset(-1.0)];
        assert!(matches!(
            KeyTable::new(negative),
            Err(KeyboardError::InvalidGeometry { index: 4, .. })
        ));

        let no_font = vec![KeyDefinition::new(2, KeyCode::A, "a", "A").with_font_scale(0.0)];
        assert!(matches!(
            KeyTable::new(no_font),
            Err(KeyboardError::InvalidGeometry { index: 2, .. })
        ));
    }

    #[test]
    fn test_lookup() {
        let table = KeyTable::qwerty();
        assert_eq!(table.position_of(KeyCode::Q), Some(0));
        assert_eq!(table.get(KeyCode::D1), None);
    }
}
