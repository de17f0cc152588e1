use clap::Parser;

/// Linux virtual gamepad/keyboard bridge for remote clients (evdev/uinput).
/// Replays JSON input events from the network on a virtual input device.
#[derive(Parser, Debug)]
#[command(name = "netpad")]
pub struct Config {
    /// Address to listen on
    #[arg(short, long, default_value = "0.0.0.0")]
    pub bind: String,

    /// TCP port to listen on
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    /// Name advertised by the virtual input device
    #[arg(long, default_value = "Microsoft X-Box 360 pad")]
    pub device_name: String,
}
