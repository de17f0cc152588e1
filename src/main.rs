mod config;
mod device;
mod engine;
mod event;
mod mapping;
mod server;
mod virtual_hid;

use clap::Parser;
use config::Config;
use engine::Engine;
use server::Server;
use std::sync::atomic::{AtomicBool, Ordering};
use virtual_hid::VirtualHid;

static QUIT: AtomicBool = AtomicBool::new(false);

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let config = Config::parse();

    println!("netpad - remote virtual gamepad bridge");
    println!("  Listen:  {}:{}", config.bind, config.port);
    println!("  Device:  {}", config.device_name);
    println!();

    signal_setup();

    let hid = match VirtualHid::new(&config.device_name) {
        Ok(hid) => hid,
        Err(e) => {
            log::error!("Failed to create virtual device: {}", e);
            log::error!("Do you have /dev/uinput access? Try: sudo modprobe uinput");
            log::error!("For permanent access, install a udev rule making /dev/uinput writable by your user");
            std::process::exit(1);
        }
    };

    let addr = format!("{}:{}", config.bind, config.port);
    let mut server = match Server::bind(&addr, Engine::new(hid)) {
        Ok(server) => server,
        Err(e) => {
            log::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    println!("Send events as one JSON object per line, e.g.");
    println!("  {{\"type\":\"btn\",\"id\":\"A\",\"val\":1}}");
    println!("Stop with Ctrl-C.");
    println!();

    server.run(&QUIT);

    log::info!("Shutting down...");
}

fn signal_setup() {
    unsafe {
        libc::signal(libc::SIGINT, signal_handler as libc::sighandler_t);
        libc::signal(libc::SIGTERM, signal_handler as libc::sighandler_t);
    }
}

extern "C" fn signal_handler(_sig: libc::c_int) {
    QUIT.store(true, Ordering::Relaxed);
}
