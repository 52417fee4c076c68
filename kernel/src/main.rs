// =============================================================================
// MiniCon — Kernel Entry Point
// =============================================================================
//
// Limine loads us in 64-bit long mode with paging on, the kernel in the
// higher half and all low physical memory reachable through the HHDM. It
// then jumps to `kmain()` with interrupts disabled.
//
// Boot is three steps:
//   1. Debug UART (COM2) + logger, so anything after this can complain
//   2. Boot protocol checks, locate the VGA text buffer
//   3. Build the console on COM1 + VGA + CRTC and run it forever
//
// There is no scheduler, no heap and no interrupt handling: the console loop
// busy-waits on the UART and is the only thing this machine ever does.
//
// Host builds (`cargo build` without `--target x86_64-unknown-none`) compile
// a stub `main` instead, so the workspace still builds and tests on a dev
// machine.
// =============================================================================

#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

#[cfg(target_os = "none")]
mod arch;
#[cfg(target_os = "none")]
mod config;
#[cfg(target_os = "none")]
mod util;

#[cfg(target_os = "none")]
use arch::{boot, cpu};

/// The kernel's main entry point, jumped to by Limine.
#[cfg(target_os = "none")]
#[unsafe(no_mangle)]
extern "C" fn kmain() -> ! {
    use core::ptr::NonNull;

    use kconsole::Console;
    use kdisplay::{Cell, TextGrid, VGA_TEXT_PHYS};
    use khal::{HardwareCursor, Ports, Serial};

    util::logger::init();
    log::info!("MiniCon v{}", env!("CARGO_PKG_VERSION"));

    if !boot::base_revision_supported() {
        log::error!("boot: Limine base revision not supported");
        cpu::halt_forever();
    }

    let Some(hhdm_offset) = boot::hhdm_offset() else {
        log::error!("boot: no HHDM response, cannot reach the VGA buffer");
        cpu::halt_forever();
    };
    log::info!("boot: HHDM offset {:#018x}", hhdm_offset);

    let vga = (hhdm_offset + VGA_TEXT_PHYS) as *mut Cell;
    let Some(vga) = NonNull::new(vga) else {
        log::error!("boot: VGA text buffer maps to null");
        cpu::halt_forever();
    };
    // SAFETY: the HHDM maps the 4000-byte text buffer at 0xB8000 and nothing
    // else in this kernel touches it.
    let screen = unsafe { TextGrid::from_raw(vga) };

    let mut console = Console::new(
        Serial::new(Ports, config::CONSOLE_PORT),
        screen,
        HardwareCursor::new(Ports),
    );
    console.start();
    console.run()
}

#[cfg(not(target_os = "none"))]
fn main() {
    eprintln!("minicon-kernel only runs on bare metal; build it with --target x86_64-unknown-none");
}
