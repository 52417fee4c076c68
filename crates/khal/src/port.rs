//! x86 port I/O primitives.
//!
//! Provides `inb` and `outb` wrappers for x86 port-mapped I/O
//! using inline assembly, plus the [`PortIo`] seam the drivers use.

/// Byte-wide access to an I/O address space.
///
/// Every call is an observable side effect; implementations must not cache,
/// merge or reorder accesses.
pub trait PortIo {
    /// Read one byte from `port`.
    fn read_u8(&mut self, port: u16) -> u8;

    /// Write `value` to `port`.
    fn write_u8(&mut self, port: u16, value: u8);
}

impl<P: PortIo + ?Sized> PortIo for &mut P {
    fn read_u8(&mut self, port: u16) -> u8 {
        (**self).read_u8(port)
    }

    fn write_u8(&mut self, port: u16, value: u8) {
        (**self).write_u8(port, value)
    }
}

/// The CPU's own I/O address space.
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
#[derive(Debug, Default, Clone, Copy)]
pub struct Ports;

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
impl PortIo for Ports {
    #[inline]
    fn read_u8(&mut self, port: u16) -> u8 {
        // SAFETY: drivers only address the fixed UART and CRTC registers.
        unsafe { inb(port) }
    }

    #[inline]
    fn write_u8(&mut self, port: u16, value: u8) {
        // SAFETY: see `read_u8`.
        unsafe { outb(port, value) }
    }
}

/// Write a byte to an x86 I/O port.
///
/// # Safety
///
/// Writing to an arbitrary I/O port can have side effects on hardware.
/// The caller must ensure the port and value are valid.
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
#[inline]
pub unsafe fn outb(port: u16, value: u8) {
    unsafe {
        core::arch::asm!(
            "out dx, al",
            in("dx") port,
            in("al") value,
            options(nomem, nostack, preserves_flags)
        );
    }
}

/// Read a byte from an x86 I/O port.
///
/// # Safety
///
/// Reading from an arbitrary I/O port can have side effects on hardware.
/// The caller must ensure the port is valid.
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
#[inline]
pub unsafe fn inb(port: u16) -> u8 {
    let value: u8;
    unsafe {
        core::arch::asm!(
            "in al, dx",
            in("dx") port,
            out("al") value,
            options(nomem, nostack, preserves_flags)
        );
    }
    value
}
