// =============================================================================
// MiniCon — x86_64 Support
// =============================================================================
//
//   boot.rs — Limine request/response handling
//   cpu.rs  — halting the CPU
//
// Port I/O itself lives in the `khal` crate so drivers can be tested on the
// host against a mock port space.
// =============================================================================

pub mod boot;
pub mod cpu;
