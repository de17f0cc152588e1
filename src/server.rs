//! Reference transport: newline-delimited JSON events over TCP.
//!
//! One client at a time drives the shared engine, so events are serialized
//! by construction. Framing is deliberately minimal; anything that can
//! deliver one JSON record per line can act as a client.

use crate::device::DeviceEmitter;
use crate::engine::Engine;
use crate::event::InputEvent;
use std::io::{BufRead, BufReader};
use std::net::TcpListener;
use std::sync::atomic::{AtomicBool, Ordering};

pub struct Server<D> {
    listener: TcpListener,
    engine: Engine<D>,
}

impl<D: DeviceEmitter> Server<D> {
    pub fn bind(addr: &str, engine: Engine<D>) -> std::io::Result<Self> {
        let listener = TcpListener::bind(addr)?;
        log::info!("Listening on {}", addr);
        Ok(Self { listener, engine })
    }

    /// Accept clients until `quit` is set. Blocking accept/read calls are
    /// interrupted by the signal handlers; on EINTR we re-check the flag.
    pub fn run(&mut self, quit: &AtomicBool) {
        loop {
            if quit.load(Ordering::Relaxed) {
                break;
            }

            let (stream, peer) = match self.listener.accept() {
                Ok(conn) => conn,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    log::error!("Accept failed: {}", e);
                    std::thread::sleep(std::time::Duration::from_millis(100));
                    continue;
                }
            };

            log::info!("Client connected: {}", peer);
            run_session(BufReader::new(stream), &mut self.engine, quit);
            log::info!("Client disconnected: {}", peer);

            // A client that vanished mid-gesture must not leave keys held
            // or axes deflected.
            if let Err(e) = self.engine.release_all() {
                log::error!("Failed to neutralize device state: {}", e);
            }
        }

        // Neutral on the way out, same as on disconnect.
        let _ = self.engine.release_all();
    }
}

/// Decode and route one line at a time until EOF, a connection error, or
/// shutdown. Undecodable records are skipped; emitter failures abort only
/// the current event.
fn run_session<R: BufRead, D: DeviceEmitter>(
    mut reader: R,
    engine: &mut Engine<D>,
    quit: &AtomicBool,
) {
    let mut line = String::new();
    loop {
        if quit.load(Ordering::Relaxed) {
            break;
        }

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => {
                log::warn!("Connection error: {}", e);
                break;
            }
        }

        let record = line.trim();
        if record.is_empty() {
            continue;
        }

        let event: InputEvent = match serde_json::from_str(record) {
            Ok(ev) => ev,
            Err(e) => {
                log::debug!("Ignoring undecodable event record: {}", e);
                continue;
            }
        };

        if let Err(e) = engine.route(&event) {
            log::error!(
                "Device emit failed in {:?} mode for {:?}: {}",
                engine.mode(),
                event,
                e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{ControlCode, DeviceError};
    use std::cell::RefCell;
    use std::io::Cursor;
    use std::rc::Rc;

    /// Records emissions into a handle the test keeps a clone of.
    #[derive(Default, Clone)]
    struct SharedEmitter {
        emits: Rc<RefCell<Vec<(ControlCode, i32)>>>,
    }

    impl DeviceEmitter for SharedEmitter {
        fn emit(&mut self, code: ControlCode, value: i32, _sync: bool) -> Result<(), DeviceError> {
            self.emits.borrow_mut().push((code, value));
            Ok(())
        }

        fn flush(&mut self) -> Result<(), DeviceError> {
            Ok(())
        }
    }

    #[test]
    fn session_routes_lines_and_skips_garbage() {
        let input = concat!(
            "{\"type\":\"mouse_move\",\"x\":1,\"y\":2}\n",
            "not json at all\n",
            "{\"type\":\"rumble\",\"val\":1}\n",
            "\n",
            "{\"type\":\"key\",\"key\":\"KEY_A\",\"val\":1}\n",
        );
        let emitter = SharedEmitter::default();
        let emits = Rc::clone(&emitter.emits);
        let mut engine = Engine::new(emitter);
        let quit = AtomicBool::new(false);
        run_session(Cursor::new(input), &mut engine, &quit);

        // Two pointer deltas plus one key press survive; the rest is dropped.
        use evdev::{Key, RelativeAxisType};
        assert_eq!(
            *emits.borrow(),
            vec![
                (ControlCode::Rel(RelativeAxisType::REL_X), 1),
                (ControlCode::Rel(RelativeAxisType::REL_Y), 2),
                (ControlCode::Key(Key::KEY_A), 1),
            ]
        );
    }

    #[test]
    fn session_stops_at_eof_and_leaves_engine_usable() {
        let input = "{\"type\":\"mode\",\"mode\":\"WASD\"}\n";
        let mut engine = Engine::new(SharedEmitter::default());
        let quit = AtomicBool::new(false);
        run_session(Cursor::new(input), &mut engine, &quit);
        assert_eq!(engine.mode(), crate::event::Mode::Wasd);
    }

    #[test]
    fn quit_flag_ends_the_session_immediately() {
        let input = "{\"type\":\"mode\",\"mode\":\"WASD\"}\n";
        let mut engine = Engine::new(SharedEmitter::default());
        let quit = AtomicBool::new(true);
        run_session(Cursor::new(input), &mut engine, &quit);
        assert_eq!(engine.mode(), crate::event::Mode::Gamepad);
    }
}
