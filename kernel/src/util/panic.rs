// =============================================================================
// MiniCon — Panic Handler
// =============================================================================
//
// A panic is fatal. Print what we know on the debug port and stop the CPU;
// the console UART is left alone so the user sees nothing but a frozen
// prompt.
// =============================================================================

use crate::arch::cpu;
use core::panic::PanicInfo;

#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    klog::println!();
    klog::println!("==========================================================");
    klog::println!("  PANIC — MiniCon");
    klog::println!("==========================================================");

    if let Some(location) = info.location() {
        klog::println!("  Location: {}:{}", location.file(), location.line());
    } else {
        klog::println!("  Location: <unknown>");
    }
    klog::println!("  Message: {}", info.message());

    klog::println!("==========================================================");
    klog::println!("  System halted. Reboot required.");
    klog::println!("==========================================================");

    cpu::halt_forever()
}
