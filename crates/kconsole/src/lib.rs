//! Serial echo console.
//!
//! Bytes arrive from a UART, pass through [`KeyDecoder`] and drive the
//! [`Console`] line editor, which echoes to the serial line, draws on the
//! text grid and keeps a fixed-size [`History`] of entered lines.
#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod console;
pub mod history;
pub mod keys;

pub use config::ConsoleConfig;
pub use console::{Console, Session};
pub use history::{History, Line};
pub use keys::{DecoderState, Key, KeyDecoder};
