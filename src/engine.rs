//! The translation engine: routes client events into device emissions.
//!
//! One `Engine` owns the active mode, the set of keys its digitizer is
//! holding down, and the dpad flags. It is driven strictly one event at a
//! time; every emission for an event completes before the next event is
//! routed.

use crate::device::{ControlCode, DeviceEmitter, DeviceError};
use crate::event::{AxisId, ButtonId, DpadDirection, InputEvent, Mode};
use crate::mapping;
use evdev::{AbsoluteAxisType, Key, RelativeAxisType};
use std::collections::HashSet;

/// Samples below this enter the negative key's zone.
const LOW_THRESHOLD: i32 = 64;
/// Samples above this enter the positive key's zone.
const HIGH_THRESHOLD: i32 = 192;

/// Full-scale trigger value for digital L2/R2 presses.
const TRIGGER_MAX: i32 = 255;

/// Map a 0..=255 stick sample onto the device's signed axis range.
/// Deliberately unclamped; out-of-domain samples produce out-of-range output.
fn scale_axis(value: i32) -> i32 {
    (value - 128) * 256
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyTransition {
    Press,
    Release,
}

/// Two-state latch for one digitized key: `held` is the current state,
/// `in_zone` the trigger. Returns the edge to emit, if any. A sample in a
/// zone the key is already latched for emits nothing.
fn key_transition(in_zone: bool, held: bool) -> Option<KeyTransition> {
    match (in_zone, held) {
        (true, false) => Some(KeyTransition::Press),
        (false, true) => Some(KeyTransition::Release),
        _ => None,
    }
}

/// Four independent directional flags, folded into two signed hat axes.
#[derive(Debug, Default)]
struct DpadState {
    up: i32,
    down: i32,
    left: i32,
    right: i32,
}

impl DpadState {
    fn set(&mut self, dir: DpadDirection, pressed: bool) {
        let flag = if pressed { 1 } else { 0 };
        match dir {
            DpadDirection::Up => self.up = flag,
            DpadDirection::Down => self.down = flag,
            DpadDirection::Left => self.left = flag,
            DpadDirection::Right => self.right = flag,
        }
    }

    // Opposing flags cancel to 0.
    fn hat_x(&self) -> i32 {
        self.right - self.left
    }

    fn hat_y(&self) -> i32 {
        self.down - self.up
    }
}

pub struct Engine<D> {
    device: D,
    mode: Mode,
    /// Keys the digitizer has pressed and not yet released. Nothing else
    /// writes to this set; raw passthrough and button presses are the
    /// client's responsibility to pair up.
    pressed: HashSet<Key>,
    dpad: DpadState,
}

impl<D: DeviceEmitter> Engine<D> {
    pub fn new(device: D) -> Self {
        Self {
            device,
            mode: Mode::Gamepad,
            pressed: HashSet::new(),
            dpad: DpadState::default(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Dispatch one event record. Emitter failures surface immediately;
    /// emissions already issued for this event are not rolled back.
    pub fn route(&mut self, event: &InputEvent) -> Result<(), DeviceError> {
        match event {
            InputEvent::MouseMove { x, y } | InputEvent::Gyro { x, y } => {
                self.device
                    .emit(ControlCode::Rel(RelativeAxisType::REL_X), *x, true)?;
                self.device
                    .emit(ControlCode::Rel(RelativeAxisType::REL_Y), *y, true)
            }
            InputEvent::Key { key, val } => match mapping::key_by_name(key) {
                Some(code) => self.device.emit(ControlCode::Key(code), *val, true),
                None => {
                    log::warn!("dropping unrecognized key name {:?}", key);
                    Ok(())
                }
            },
            InputEvent::MouseBtn { id, val } => {
                let btn = if id == "RIGHT" {
                    Key::BTN_RIGHT
                } else {
                    Key::BTN_LEFT
                };
                self.device.emit(ControlCode::Key(btn), *val, true)
            }
            InputEvent::Btn { id, val } => self.handle_button(*id, *val),
            InputEvent::Axis { id, val } => self.apply_axis(*id, *val, true),
            InputEvent::Axes { axes } => {
                for (id, val) in axes {
                    self.apply_axis(*id, *val, false)?;
                }
                self.device.flush()
            }
            InputEvent::Mode { mode } => self.set_mode(*mode),
        }
    }

    /// Switch the mapping mode. Runs the drain even when `mode` equals the
    /// current mode; a key latched by the previous digitizer state must
    /// never survive a switch, and callers may rely on that over idempotence.
    pub fn set_mode(&mut self, mode: Mode) -> Result<(), DeviceError> {
        let held: Vec<Key> = self.pressed.iter().copied().collect();
        for key in held {
            self.device.emit(ControlCode::Key(key), 0, true)?;
        }
        self.pressed.clear();
        if self.mode != mode {
            log::debug!("input mode {:?} -> {:?}", self.mode, mode);
        }
        self.mode = mode;
        Ok(())
    }

    /// Return every control this engine may have left active to neutral:
    /// latched keys released, dpad/hat centered, sticks centered, triggers
    /// zeroed, published as one update. The transport calls this when a
    /// client goes away mid-gesture.
    pub fn release_all(&mut self) -> Result<(), DeviceError> {
        let held: Vec<Key> = self.pressed.iter().copied().collect();
        for key in held {
            self.device.emit(ControlCode::Key(key), 0, false)?;
        }
        self.pressed.clear();
        self.dpad = DpadState::default();
        for axis in [
            AbsoluteAxisType::ABS_HAT0X,
            AbsoluteAxisType::ABS_HAT0Y,
            AbsoluteAxisType::ABS_X,
            AbsoluteAxisType::ABS_Y,
            AbsoluteAxisType::ABS_RX,
            AbsoluteAxisType::ABS_RY,
            AbsoluteAxisType::ABS_Z,
            AbsoluteAxisType::ABS_RZ,
        ] {
            self.device.emit(ControlCode::Abs(axis), 0, false)?;
        }
        self.device.flush()
    }

    fn handle_button(&mut self, id: ButtonId, val: i32) -> Result<(), DeviceError> {
        match self.mode {
            Mode::Gamepad => {
                if let Some(dir) = id.dpad_direction() {
                    return self.compose_dpad(dir, val != 0);
                }
                if let Some(btn) = mapping::gamepad_button(id) {
                    return self.device.emit(ControlCode::Key(btn), val, true);
                }
                if let Some(axis) = mapping::trigger_axis(id) {
                    let level = if val != 0 { TRIGGER_MAX } else { 0 };
                    return self.device.emit(ControlCode::Abs(axis), level, true);
                }
                Ok(())
            }
            mode => {
                let key = match id.dpad_direction() {
                    Some(dir) => mapping::movement_key(mode, dir),
                    None => mapping::action_key(id),
                };
                match key {
                    Some(key) => self.device.emit(ControlCode::Key(key), val, true),
                    // No entry in this mode's table.
                    None => Ok(()),
                }
            }
        }
    }

    /// Re-emit both hat axes on every directional update, changed or not.
    fn compose_dpad(&mut self, dir: DpadDirection, pressed: bool) -> Result<(), DeviceError> {
        self.dpad.set(dir, pressed);
        self.device.emit(
            ControlCode::Abs(AbsoluteAxisType::ABS_HAT0X),
            self.dpad.hat_x(),
            true,
        )?;
        self.device.emit(
            ControlCode::Abs(AbsoluteAxisType::ABS_HAT0Y),
            self.dpad.hat_y(),
            true,
        )
    }

    /// Shared per-axis routine for single and batched samples. `sync`
    /// applies to the analog paths only; digitized key edges always
    /// publish immediately.
    fn apply_axis(&mut self, id: AxisId, val: i32, sync: bool) -> Result<(), DeviceError> {
        match (self.mode, id) {
            (Mode::Gamepad, AxisId::Lx) => {
                self.device
                    .emit(ControlCode::Abs(AbsoluteAxisType::ABS_X), scale_axis(val), sync)
            }
            (Mode::Gamepad, AxisId::Ly) => {
                self.device
                    .emit(ControlCode::Abs(AbsoluteAxisType::ABS_Y), scale_axis(val), sync)
            }
            // The secondary stick has no digital meaning; it scales through
            // in every mode.
            (_, AxisId::Rx) => {
                self.device
                    .emit(ControlCode::Abs(AbsoluteAxisType::ABS_RX), scale_axis(val), sync)
            }
            (_, AxisId::Ry) => {
                self.device
                    .emit(ControlCode::Abs(AbsoluteAxisType::ABS_RY), scale_axis(val), sync)
            }
            (_, AxisId::Lx) | (_, AxisId::Ly) => self.digitize(id, val),
        }
    }

    /// Three zones, one latch per directional key, evaluated independently
    /// on every sample.
    fn digitize(&mut self, id: AxisId, val: i32) -> Result<(), DeviceError> {
        let Some((neg, pos)) = mapping::axis_keys(self.mode, id) else {
            return Ok(());
        };
        self.latch(neg, val < LOW_THRESHOLD)?;
        self.latch(pos, val > HIGH_THRESHOLD)
    }

    fn latch(&mut self, key: Key, in_zone: bool) -> Result<(), DeviceError> {
        match key_transition(in_zone, self.pressed.contains(&key)) {
            Some(KeyTransition::Press) => {
                self.device.emit(ControlCode::Key(key), 1, true)?;
                self.pressed.insert(key);
                Ok(())
            }
            Some(KeyTransition::Release) => {
                self.device.emit(ControlCode::Key(key), 0, true)?;
                self.pressed.remove(&key);
                Ok(())
            }
            None => Ok(()),
        }
    }
}
