use crate::device::{ControlCode, DeviceEmitter, DeviceError};
use crate::mapping;
use evdev::uinput::{VirtualDevice, VirtualDeviceBuilder};
use evdev::{
    AbsInfo, AbsoluteAxisType, AttributeSet, BusType, EventType, InputId, Key, RelativeAxisType,
    UinputAbsSetup,
};

const STICK_MIN: i32 = -32768;
const STICK_MAX: i32 = 32767;
const TRIGGER_MAX: i32 = 255;

// Advertised as an Xbox 360 pad so games and mapping layers recognize the
// button/axis layout without configuration.
const VENDOR_MICROSOFT: u16 = 0x045e;
const PRODUCT_XBOX360_PAD: u16 = 0x028e;

/// uinput-backed device: a gamepad, a keyboard, and a pointer behind one
/// node. The full capability set is declared up front; it never changes
/// after construction.
pub struct VirtualHid {
    device: VirtualDevice,
    pending: Vec<evdev::InputEvent>,
}

impl VirtualHid {
    pub fn new(name: &str) -> Result<Self, DeviceError> {
        let device = Self::build(name).map_err(DeviceError::DeviceUnavailable)?;
        log::info!("Created virtual device \"{}\"", name);
        Ok(Self {
            device,
            pending: Vec::new(),
        })
    }

    fn build(name: &str) -> std::io::Result<VirtualDevice> {
        let abs = |axis: AbsoluteAxisType, min: i32, max: i32| -> UinputAbsSetup {
            UinputAbsSetup::new(axis, AbsInfo::new(0, min, max, 0, 0, 0))
        };

        // Every key a client can reach, raw or through a mode table.
        let mut keys = AttributeSet::<Key>::new();
        for (_, key) in mapping::KEY_TABLE {
            keys.insert(*key);
        }

        let mut rel = AttributeSet::<RelativeAxisType>::new();
        rel.insert(RelativeAxisType::REL_X);
        rel.insert(RelativeAxisType::REL_Y);

        VirtualDeviceBuilder::new()?
            .name(name)
            .input_id(InputId::new(
                BusType::BUS_USB,
                VENDOR_MICROSOFT,
                PRODUCT_XBOX360_PAD,
                1,
            ))
            .with_keys(&keys)?
            .with_relative_axes(&rel)?
            .with_absolute_axis(&abs(AbsoluteAxisType::ABS_X, STICK_MIN, STICK_MAX))?
            .with_absolute_axis(&abs(AbsoluteAxisType::ABS_Y, STICK_MIN, STICK_MAX))?
            .with_absolute_axis(&abs(AbsoluteAxisType::ABS_RX, STICK_MIN, STICK_MAX))?
            .with_absolute_axis(&abs(AbsoluteAxisType::ABS_RY, STICK_MIN, STICK_MAX))?
            .with_absolute_axis(&abs(AbsoluteAxisType::ABS_Z, 0, TRIGGER_MAX))?
            .with_absolute_axis(&abs(AbsoluteAxisType::ABS_RZ, 0, TRIGGER_MAX))?
            .with_absolute_axis(&abs(AbsoluteAxisType::ABS_HAT0X, -1, 1))?
            .with_absolute_axis(&abs(AbsoluteAxisType::ABS_HAT0Y, -1, 1))?
            .build()
    }
}

fn control_event(code: ControlCode, value: i32) -> evdev::InputEvent {
    let (event_type, code) = match code {
        ControlCode::Key(key) => (EventType::KEY, key.code()),
        ControlCode::Abs(axis) => (EventType::ABSOLUTE, axis.0),
        ControlCode::Rel(axis) => (EventType::RELATIVE, axis.0),
    };
    evdev::InputEvent::new_now(event_type, code, value)
}

impl DeviceEmitter for VirtualHid {
    fn emit(&mut self, code: ControlCode, value: i32, sync: bool) -> Result<(), DeviceError> {
        self.pending.push(control_event(code, value));
        if sync {
            self.flush()
        } else {
            Ok(())
        }
    }

    fn flush(&mut self) -> Result<(), DeviceError> {
        self.pending
            .push(evdev::InputEvent::new_now(EventType::SYNCHRONIZATION, 0, 0));
        let result = self.device.emit(&self.pending).map_err(DeviceError::Emit);
        self.pending.clear();
        result
    }
}
