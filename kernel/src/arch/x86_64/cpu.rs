// =============================================================================
// MiniCon — CPU Utilities (x86_64)
// =============================================================================

use x86_64::instructions::{hlt, interrupts};

/// Halts the CPU in an unrecoverable state.
///
/// Disables interrupts and then halts. Used for fatal boot errors and
/// panics. This function never returns.
pub fn halt_forever() -> ! {
    interrupts::disable();
    loop {
        hlt();
    }
}
