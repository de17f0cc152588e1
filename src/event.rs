use serde::Deserialize;
use std::collections::BTreeMap;

/// Active input-mapping mode. Selects which translation table button and
/// axis events go through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mode {
    /// Pass sticks/buttons through as gamepad controls.
    Gamepad,
    /// Digitize the left stick onto W/A/S/D, buttons onto keyboard keys.
    Wasd,
    /// Digitize the left stick onto the arrow keys, buttons onto keyboard keys.
    Arrow,
}

/// Logical gamepad button id as sent by clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ButtonId {
    A,
    B,
    X,
    Y,
    L1,
    R1,
    L2,
    R2,
    L3,
    R3,
    Start,
    Select,
    Mode,
    DpadUp,
    DpadDown,
    DpadLeft,
    DpadRight,
}

impl ButtonId {
    /// Directional component for `DPAD_*` ids, `None` for everything else.
    pub fn dpad_direction(self) -> Option<DpadDirection> {
        match self {
            ButtonId::DpadUp => Some(DpadDirection::Up),
            ButtonId::DpadDown => Some(DpadDirection::Down),
            ButtonId::DpadLeft => Some(DpadDirection::Left),
            ButtonId::DpadRight => Some(DpadDirection::Right),
            _ => None,
        }
    }
}

/// Logical stick axis id. `Ord` so batched updates apply in a stable order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AxisId {
    Lx,
    Ly,
    Rx,
    Ry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DpadDirection {
    Up,
    Down,
    Left,
    Right,
}

/// One parsed event record from a client.
///
/// The wire format is a JSON object tagged by `type`, e.g.
/// `{"type":"axis","id":"LX","val":200}`. Missing numeric fields read as 0,
/// which is what older clients rely on when they omit a neutral value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// Relative pointer delta.
    MouseMove {
        #[serde(default)]
        x: i32,
        #[serde(default)]
        y: i32,
    },
    /// Gyro-driven pointer delta. Same handling as `mouse_move` on purpose;
    /// clients pick whichever source they have.
    Gyro {
        #[serde(default)]
        x: i32,
        #[serde(default)]
        y: i32,
    },
    /// Raw key/button passthrough by name, bypassing mode translation.
    Key {
        key: String,
        #[serde(default)]
        val: i32,
    },
    /// Pointer button. Any id other than `RIGHT` means the left button.
    MouseBtn {
        #[serde(default)]
        id: String,
        #[serde(default)]
        val: i32,
    },
    /// Mode-translated gamepad button.
    Btn {
        id: ButtonId,
        #[serde(default)]
        val: i32,
    },
    /// Single stick-axis sample, 0..=255.
    Axis {
        id: AxisId,
        #[serde(default)]
        val: i32,
    },
    /// Batched multi-axis samples, published as one device update.
    Axes {
        #[serde(default)]
        axes: BTreeMap<AxisId, i32>,
    },
    /// Switch the active mapping mode.
    Mode { mode: Mode },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> InputEvent {
        serde_json::from_str(json).expect("event should decode")
    }

    #[test]
    fn decodes_mouse_move_and_gyro() {
        assert_eq!(
            parse(r#"{"type":"mouse_move","x":5,"y":-3}"#),
            InputEvent::MouseMove { x: 5, y: -3 }
        );
        assert_eq!(
            parse(r#"{"type":"gyro","x":-2,"y":7}"#),
            InputEvent::Gyro { x: -2, y: 7 }
        );
    }

    #[test]
    fn missing_numeric_fields_default_to_zero() {
        assert_eq!(
            parse(r#"{"type":"mouse_move"}"#),
            InputEvent::MouseMove { x: 0, y: 0 }
        );
        assert_eq!(
            parse(r#"{"type":"key","key":"KEY_A"}"#),
            InputEvent::Key {
                key: "KEY_A".into(),
                val: 0
            }
        );
    }

    #[test]
    fn decodes_buttons_and_axes() {
        assert_eq!(
            parse(r#"{"type":"btn","id":"DPAD_UP","val":1}"#),
            InputEvent::Btn {
                id: ButtonId::DpadUp,
                val: 1
            }
        );
        assert_eq!(
            parse(r#"{"type":"axis","id":"LX","val":200}"#),
            InputEvent::Axis {
                id: AxisId::Lx,
                val: 200
            }
        );
        let ev = parse(r#"{"type":"axes","axes":{"LX":128,"LY":40}}"#);
        match ev {
            InputEvent::Axes { axes } => {
                assert_eq!(axes.get(&AxisId::Lx), Some(&128));
                assert_eq!(axes.get(&AxisId::Ly), Some(&40));
            }
            other => panic!("expected axes event, got {:?}", other),
        }
    }

    #[test]
    fn decodes_mode_change() {
        assert_eq!(
            parse(r#"{"type":"mode","mode":"WASD"}"#),
            InputEvent::Mode { mode: Mode::Wasd }
        );
        assert_eq!(
            parse(r#"{"type":"mode","mode":"GAMEPAD"}"#),
            InputEvent::Mode { mode: Mode::Gamepad }
        );
    }

    #[test]
    fn unknown_kind_is_a_decode_error() {
        assert!(serde_json::from_str::<InputEvent>(r#"{"type":"rumble","val":1}"#).is_err());
        assert!(serde_json::from_str::<InputEvent>(r#"{"val":1}"#).is_err());
    }

    #[test]
    fn unknown_button_or_axis_id_is_a_decode_error() {
        assert!(serde_json::from_str::<InputEvent>(r#"{"type":"btn","id":"C4","val":1}"#).is_err());
        assert!(serde_json::from_str::<InputEvent>(r#"{"type":"axis","id":"LZ","val":9}"#).is_err());
    }

    #[test]
    fn dpad_direction_only_for_dpad_ids() {
        assert_eq!(
            ButtonId::DpadLeft.dpad_direction(),
            Some(DpadDirection::Left)
        );
        assert_eq!(ButtonId::A.dpad_direction(), None);
        assert_eq!(ButtonId::Mode.dpad_direction(), None);
    }
}
