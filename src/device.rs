use evdev::{AbsoluteAxisType, Key, RelativeAxisType};
use thiserror::Error;

/// One addressable control on the virtual device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCode {
    /// A key or button (EV_KEY).
    Key(Key),
    /// An absolute axis (EV_ABS): sticks, triggers, hat.
    Abs(AbsoluteAxisType),
    /// A relative axis (EV_REL): pointer deltas.
    Rel(RelativeAxisType),
}

#[derive(Debug, Error)]
pub enum DeviceError {
    /// The uinput node could not be acquired at construction time
    /// (missing module, no permission).
    #[error("virtual input device unavailable: {0}")]
    DeviceUnavailable(#[source] std::io::Error),

    /// Writing an event batch to the device failed.
    #[error("device emit failed: {0}")]
    Emit(#[source] std::io::Error),
}

/// Sink for translated control-state changes.
///
/// `emit` with `sync` publishes the change (plus anything buffered before
/// it) to the host immediately; without `sync` the change sits in the
/// device buffer until [`flush`](DeviceEmitter::flush), which publishes
/// everything as one atomic host-visible update.
pub trait DeviceEmitter {
    fn emit(&mut self, code: ControlCode, value: i32, sync: bool) -> Result<(), DeviceError>;

    fn flush(&mut self) -> Result<(), DeviceError>;
}
