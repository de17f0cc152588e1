//! Immutable id-to-code translation tables.
//!
//! Everything here is fixed data: the raw key-name alphabet clients may
//! address directly, and the per-mode tables that turn logical gamepad ids
//! into device controls. Tables are built once and never per event.

use crate::event::{AxisId, ButtonId, DpadDirection, Mode};
use evdev::{AbsoluteAxisType, Key};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Every raw key/button name a client may send, with its device code.
/// Names not in this table are rejected; there is no dynamic lookup.
///
/// `BTN_A..BTN_Y` are the pad-button spellings remote clients use; they
/// carry the same codes the kernel aliases onto BTN_SOUTH/EAST/NORTH/WEST.
pub const KEY_TABLE: &[(&str, Key)] = &[
    ("KEY_A", Key::KEY_A),
    ("KEY_B", Key::KEY_B),
    ("KEY_C", Key::KEY_C),
    ("KEY_D", Key::KEY_D),
    ("KEY_E", Key::KEY_E),
    ("KEY_F", Key::KEY_F),
    ("KEY_G", Key::KEY_G),
    ("KEY_H", Key::KEY_H),
    ("KEY_I", Key::KEY_I),
    ("KEY_J", Key::KEY_J),
    ("KEY_K", Key::KEY_K),
    ("KEY_L", Key::KEY_L),
    ("KEY_M", Key::KEY_M),
    ("KEY_N", Key::KEY_N),
    ("KEY_O", Key::KEY_O),
    ("KEY_P", Key::KEY_P),
    ("KEY_Q", Key::KEY_Q),
    ("KEY_R", Key::KEY_R),
    ("KEY_S", Key::KEY_S),
    ("KEY_T", Key::KEY_T),
    ("KEY_U", Key::KEY_U),
    ("KEY_V", Key::KEY_V),
    ("KEY_W", Key::KEY_W),
    ("KEY_X", Key::KEY_X),
    ("KEY_Y", Key::KEY_Y),
    ("KEY_Z", Key::KEY_Z),
    ("KEY_1", Key::KEY_1),
    ("KEY_2", Key::KEY_2),
    ("KEY_3", Key::KEY_3),
    ("KEY_4", Key::KEY_4),
    ("KEY_5", Key::KEY_5),
    ("KEY_6", Key::KEY_6),
    ("KEY_7", Key::KEY_7),
    ("KEY_8", Key::KEY_8),
    ("KEY_9", Key::KEY_9),
    ("KEY_0", Key::KEY_0),
    ("KEY_F1", Key::KEY_F1),
    ("KEY_F2", Key::KEY_F2),
    ("KEY_F3", Key::KEY_F3),
    ("KEY_F4", Key::KEY_F4),
    ("KEY_F5", Key::KEY_F5),
    ("KEY_F6", Key::KEY_F6),
    ("KEY_F7", Key::KEY_F7),
    ("KEY_F8", Key::KEY_F8),
    ("KEY_F9", Key::KEY_F9),
    ("KEY_F10", Key::KEY_F10),
    ("KEY_F11", Key::KEY_F11),
    ("KEY_F12", Key::KEY_F12),
    ("KEY_SPACE", Key::KEY_SPACE),
    ("KEY_ENTER", Key::KEY_ENTER),
    ("KEY_BACKSPACE", Key::KEY_BACKSPACE),
    ("KEY_TAB", Key::KEY_TAB),
    ("KEY_ESC", Key::KEY_ESC),
    ("KEY_LEFTSHIFT", Key::KEY_LEFTSHIFT),
    ("KEY_RIGHTSHIFT", Key::KEY_RIGHTSHIFT),
    ("KEY_LEFTCTRL", Key::KEY_LEFTCTRL),
    ("KEY_RIGHTCTRL", Key::KEY_RIGHTCTRL),
    ("KEY_LEFTALT", Key::KEY_LEFTALT),
    ("KEY_RIGHTALT", Key::KEY_RIGHTALT),
    ("KEY_UP", Key::KEY_UP),
    ("KEY_DOWN", Key::KEY_DOWN),
    ("KEY_LEFT", Key::KEY_LEFT),
    ("KEY_RIGHT", Key::KEY_RIGHT),
    ("KEY_CAPSLOCK", Key::KEY_CAPSLOCK),
    ("KEY_NUMLOCK", Key::KEY_NUMLOCK),
    ("KEY_SCROLLLOCK", Key::KEY_SCROLLLOCK),
    ("KEY_HOME", Key::KEY_HOME),
    ("KEY_END", Key::KEY_END),
    ("KEY_PAGEUP", Key::KEY_PAGEUP),
    ("KEY_PAGEDOWN", Key::KEY_PAGEDOWN),
    ("KEY_INSERT", Key::KEY_INSERT),
    ("KEY_DELETE", Key::KEY_DELETE),
    ("KEY_COMMA", Key::KEY_COMMA),
    ("KEY_DOT", Key::KEY_DOT),
    ("KEY_SLASH", Key::KEY_SLASH),
    ("KEY_SEMICOLON", Key::KEY_SEMICOLON),
    ("KEY_APOSTROPHE", Key::KEY_APOSTROPHE),
    ("KEY_LEFTBRACE", Key::KEY_LEFTBRACE),
    ("KEY_RIGHTBRACE", Key::KEY_RIGHTBRACE),
    ("KEY_BACKSLASH", Key::KEY_BACKSLASH),
    ("KEY_MINUS", Key::KEY_MINUS),
    ("KEY_EQUAL", Key::KEY_EQUAL),
    ("KEY_GRAVE", Key::KEY_GRAVE),
    ("BTN_A", Key::BTN_SOUTH),
    ("BTN_B", Key::BTN_EAST),
    ("BTN_X", Key::BTN_NORTH),
    ("BTN_Y", Key::BTN_WEST),
    ("BTN_TL", Key::BTN_TL),
    ("BTN_TR", Key::BTN_TR),
    ("BTN_SELECT", Key::BTN_SELECT),
    ("BTN_START", Key::BTN_START),
    ("BTN_MODE", Key::BTN_MODE),
    ("BTN_THUMBL", Key::BTN_THUMBL),
    ("BTN_THUMBR", Key::BTN_THUMBR),
    ("BTN_LEFT", Key::BTN_LEFT),
    ("BTN_RIGHT", Key::BTN_RIGHT),
];

/// Resolve a raw key name against the fixed alphabet.
pub fn key_by_name(name: &str) -> Option<Key> {
    static LOOKUP: OnceLock<HashMap<&'static str, Key>> = OnceLock::new();
    LOOKUP
        .get_or_init(|| KEY_TABLE.iter().copied().collect())
        .get(name)
        .copied()
}

/// GAMEPAD mode: logical button id to pad button. `L2`/`R2` and the dpad
/// ids are not buttons in this mode and return `None`.
pub fn gamepad_button(id: ButtonId) -> Option<Key> {
    match id {
        ButtonId::A => Some(Key::BTN_SOUTH),
        ButtonId::B => Some(Key::BTN_EAST),
        ButtonId::X => Some(Key::BTN_NORTH),
        ButtonId::Y => Some(Key::BTN_WEST),
        ButtonId::L1 => Some(Key::BTN_TL),
        ButtonId::R1 => Some(Key::BTN_TR),
        ButtonId::L3 => Some(Key::BTN_THUMBL),
        ButtonId::R3 => Some(Key::BTN_THUMBR),
        ButtonId::Start => Some(Key::BTN_START),
        ButtonId::Select => Some(Key::BTN_SELECT),
        ButtonId::Mode => Some(Key::BTN_MODE),
        _ => None,
    }
}

/// GAMEPAD mode: digital trigger ids mapped onto their absolute axis.
pub fn trigger_axis(id: ButtonId) -> Option<AbsoluteAxisType> {
    match id {
        ButtonId::L2 => Some(AbsoluteAxisType::ABS_Z),
        ButtonId::R2 => Some(AbsoluteAxisType::ABS_RZ),
        _ => None,
    }
}

/// Keyboard modes: the secondary action table shared by WASD and ARROW.
/// Ids without an entry (`L3`, `R3`, `MODE`) deliberately map to nothing.
pub fn action_key(id: ButtonId) -> Option<Key> {
    match id {
        ButtonId::A => Some(Key::KEY_SPACE),
        ButtonId::B => Some(Key::KEY_LEFTSHIFT),
        ButtonId::X => Some(Key::KEY_E),
        ButtonId::Y => Some(Key::KEY_R),
        ButtonId::L1 => Some(Key::KEY_1),
        ButtonId::R1 => Some(Key::KEY_2),
        ButtonId::L2 => Some(Key::KEY_Q),
        ButtonId::R2 => Some(Key::KEY_F),
        ButtonId::Start => Some(Key::KEY_ESC),
        ButtonId::Select => Some(Key::KEY_TAB),
        _ => None,
    }
}

/// Keyboard modes: directional key for dpad presses.
pub fn movement_key(mode: Mode, dir: DpadDirection) -> Option<Key> {
    match mode {
        Mode::Gamepad => None,
        Mode::Wasd => Some(match dir {
            DpadDirection::Up => Key::KEY_W,
            DpadDirection::Down => Key::KEY_S,
            DpadDirection::Left => Key::KEY_A,
            DpadDirection::Right => Key::KEY_D,
        }),
        Mode::Arrow => Some(match dir {
            DpadDirection::Up => Key::KEY_UP,
            DpadDirection::Down => Key::KEY_DOWN,
            DpadDirection::Left => Key::KEY_LEFT,
            DpadDirection::Right => Key::KEY_RIGHT,
        }),
    }
}

/// Keyboard modes: (negative, positive) key pair for a digitized axis.
/// Only the primary stick digitizes; everything else returns `None`.
pub fn axis_keys(mode: Mode, axis: AxisId) -> Option<(Key, Key)> {
    match (mode, axis) {
        (Mode::Wasd, AxisId::Lx) => Some((Key::KEY_A, Key::KEY_D)),
        (Mode::Wasd, AxisId::Ly) => Some((Key::KEY_W, Key::KEY_S)),
        (Mode::Arrow, AxisId::Lx) => Some((Key::KEY_LEFT, Key::KEY_RIGHT)),
        (Mode::Arrow, AxisId::Ly) => Some((Key::KEY_UP, Key::KEY_DOWN)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_names_resolve_against_the_fixed_alphabet() {
        assert_eq!(key_by_name("KEY_A"), Some(Key::KEY_A));
        assert_eq!(key_by_name("KEY_PAGEDOWN"), Some(Key::KEY_PAGEDOWN));
        assert_eq!(key_by_name("BTN_A"), Some(Key::BTN_SOUTH));
        assert_eq!(key_by_name("BTN_RIGHT"), Some(Key::BTN_RIGHT));
        assert_eq!(key_by_name("FOO"), None);
        assert_eq!(key_by_name("key_a"), None);
    }

    #[test]
    fn key_table_has_no_duplicate_names() {
        let mut names: Vec<&str> = KEY_TABLE.iter().map(|(n, _)| *n).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), KEY_TABLE.len());
    }

    #[test]
    fn gamepad_table_covers_buttons_but_not_triggers_or_dpad() {
        assert_eq!(gamepad_button(ButtonId::A), Some(Key::BTN_SOUTH));
        assert_eq!(gamepad_button(ButtonId::Mode), Some(Key::BTN_MODE));
        assert_eq!(gamepad_button(ButtonId::L2), None);
        assert_eq!(gamepad_button(ButtonId::DpadUp), None);
        assert_eq!(trigger_axis(ButtonId::L2), Some(AbsoluteAxisType::ABS_Z));
        assert_eq!(trigger_axis(ButtonId::R2), Some(AbsoluteAxisType::ABS_RZ));
        assert_eq!(trigger_axis(ButtonId::A), None);
    }

    #[test]
    fn action_table_is_shared_and_partial() {
        assert_eq!(action_key(ButtonId::A), Some(Key::KEY_SPACE));
        assert_eq!(action_key(ButtonId::L2), Some(Key::KEY_Q));
        assert_eq!(action_key(ButtonId::Select), Some(Key::KEY_TAB));
        assert_eq!(action_key(ButtonId::L3), None);
        assert_eq!(action_key(ButtonId::Mode), None);
    }

    #[test]
    fn movement_keys_follow_the_mode() {
        assert_eq!(
            movement_key(Mode::Wasd, DpadDirection::Up),
            Some(Key::KEY_W)
        );
        assert_eq!(
            movement_key(Mode::Arrow, DpadDirection::Up),
            Some(Key::KEY_UP)
        );
        assert_eq!(movement_key(Mode::Gamepad, DpadDirection::Up), None);
    }

    #[test]
    fn only_the_primary_stick_digitizes() {
        assert_eq!(
            axis_keys(Mode::Wasd, AxisId::Lx),
            Some((Key::KEY_A, Key::KEY_D))
        );
        assert_eq!(
            axis_keys(Mode::Arrow, AxisId::Ly),
            Some((Key::KEY_UP, Key::KEY_DOWN))
        );
        assert_eq!(axis_keys(Mode::Gamepad, AxisId::Lx), None);
        assert_eq!(axis_keys(Mode::Wasd, AxisId::Rx), None);
    }
}
