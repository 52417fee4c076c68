//! Hardware Abstraction Layer.
//!
//! Everything that touches an x86 I/O port lives here. Drivers are generic
//! over [`PortIo`] so the same code runs against real ports on the target and
//! against [`mock::MockPorts`] in host tests.
#![cfg_attr(not(test), no_std)]

pub mod cursor;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod port;
pub mod serial;

pub use cursor::HardwareCursor;
pub use port::PortIo;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub use port::Ports;
pub use serial::Serial;
