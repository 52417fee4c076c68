//! In-memory port model for host tests.
//!
//! Records every port write and emulates just enough of a 16550 UART at one
//! base address (status flags, receive queue, DLAB and loopback) for the
//! drivers above it to run unchanged.

extern crate alloc;

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::port::PortIo;
use crate::serial::{LineControl, LineStatus, ModemControl};

/// Value read from a port nothing answers on (floating bus).
const OPEN_BUS: u8 = 0xFF;

#[derive(Debug, Default)]
pub struct MockPorts {
    uart: Option<u16>,
    rx: VecDeque<u8>,
    rx_delay: usize,
    tx_busy: usize,
    tx: Vec<u8>,
    writes: Vec<(u16, u8)>,
    line_control: u8,
    modem_control: u8,
    status_polls: usize,
}

impl MockPorts {
    /// A port space with a UART answering at `base`.
    pub fn with_uart(base: u16) -> Self {
        Self {
            uart: Some(base),
            ..Self::default()
        }
    }

    /// Queue bytes for the UART receiver.
    pub fn push_rx(&mut self, bytes: &[u8]) {
        self.rx.extend(bytes.iter().copied());
    }

    /// Report "no data" for the next `polls` status reads.
    pub fn delay_rx(&mut self, polls: usize) {
        self.rx_delay = polls;
    }

    /// Report the transmitter as busy for the next `polls` status reads.
    pub fn delay_tx(&mut self, polls: usize) {
        self.tx_busy = polls;
    }

    /// Bytes the UART put on the wire, in order.
    pub fn transmitted(&self) -> &[u8] {
        &self.tx
    }

    pub fn clear_transmitted(&mut self) {
        self.tx.clear();
    }

    /// Every `(port, value)` write, in order.
    pub fn writes(&self) -> &[(u16, u8)] {
        &self.writes
    }

    pub fn last_write(&self, port: u16) -> Option<u8> {
        self.writes
            .iter()
            .rev()
            .find(|(p, _)| *p == port)
            .map(|&(_, value)| value)
    }

    /// Number of Line Status Register reads so far.
    pub fn status_polls(&self) -> usize {
        self.status_polls
    }

    fn uart_offset(&self, port: u16) -> Option<u16> {
        let base = self.uart?;
        port.checked_sub(base).filter(|offset| *offset < 8)
    }

    fn dlab(&self) -> bool {
        LineControl::from_bits_retain(self.line_control).contains(LineControl::DLAB)
    }

    fn loopback(&self) -> bool {
        ModemControl::from_bits_retain(self.modem_control).contains(ModemControl::LOOPBACK)
    }
}

impl PortIo for MockPorts {
    fn read_u8(&mut self, port: u16) -> u8 {
        match self.uart_offset(port) {
            Some(0) if !self.dlab() => self.rx.pop_front().unwrap_or(0),
            Some(5) => {
                self.status_polls += 1;
                let mut status = LineStatus::empty();
                if self.tx_busy > 0 {
                    self.tx_busy -= 1;
                } else {
                    status |= LineStatus::THR_EMPTY | LineStatus::TX_IDLE;
                }
                if self.rx_delay > 0 {
                    self.rx_delay -= 1;
                } else if !self.rx.is_empty() {
                    status |= LineStatus::DATA_READY;
                }
                status.bits()
            }
            Some(_) => 0,
            None => OPEN_BUS,
        }
    }

    fn write_u8(&mut self, port: u16, value: u8) {
        self.writes.push((port, value));
        match self.uart_offset(port) {
            Some(0) if self.dlab() => {}
            Some(0) if self.loopback() => self.rx.push_back(value),
            Some(0) => self.tx.push(value),
            Some(3) => self.line_control = value,
            Some(4) => self.modem_control = value,
            _ => {}
        }
    }
}
