// =============================================================================
// MiniCon — Kernel Utilities
// =============================================================================
//
//   logger.rs — debug UART sink for the `klog` backend
//   panic.rs  — panic handler (report on the debug port, then halt)
// =============================================================================

pub mod logger;
pub mod panic;
