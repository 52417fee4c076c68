// =============================================================================
// MiniCon — Debug Log Output
// =============================================================================
//
// Log records never go to the console UART: the user's serial line carries
// only the echo. Everything `log::*!` produces, in any crate, is formatted
// by `klog` and handed to `write_debug`, which owns the second UART.
//
// The port is a global behind a spin Mutex because the panic handler must
// reach it without a reference to anything. `try_lock` keeps a panic raised
// while a record is half written from deadlocking; that output is lost.
// =============================================================================

use core::fmt::{self, Write};

use khal::{Ports, Serial};
use spin::Mutex;

use crate::config;

static DEBUG_SERIAL: Mutex<Serial<Ports>> = Mutex::new(Serial::new(Ports, config::DEBUG_PORT));

/// Bring up the debug UART and install the logger.
pub fn init() {
    DEBUG_SERIAL.lock().init();
    klog::init(write_debug, config::LOG_LEVEL);
}

fn write_debug(args: fmt::Arguments<'_>) {
    if let Some(mut serial) = DEBUG_SERIAL.try_lock() {
        let _ = serial.write_fmt(args);
    }
}
