// =============================================================================
// MiniCon — Build-time Configuration
// =============================================================================
//
// Which UART does what, and how chatty the debug log is. Console appearance
// (prompt, banners, colours) is `kconsole::ConsoleConfig`.
// =============================================================================

use khal::serial::{COM1, COM2};
use log::LevelFilter;

/// UART the user types on.
pub const CONSOLE_PORT: u16 = COM1;

/// UART receiving log records and panic reports.
pub const DEBUG_PORT: u16 = COM2;

pub const LOG_LEVEL: LevelFilter = if cfg!(feature = "trace-keys") {
    LevelFilter::Trace
} else {
    LevelFilter::Info
};
