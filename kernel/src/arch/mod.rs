// =============================================================================
// MiniCon — Architecture Abstraction
// =============================================================================
//
// Re-exports the current architecture's boot and CPU glue. Only x86_64 is
// supported: the console depends on legacy PC hardware (16550 UART at
// 0x3F8, VGA text buffer at 0xB8000, CRTC at 0x3D4).
// =============================================================================

#[cfg(target_arch = "x86_64")]
pub mod x86_64;

#[cfg(target_arch = "x86_64")]
pub use x86_64::*;
