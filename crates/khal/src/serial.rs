//! Serial port (16550 UART) driver.
//!
//! Polled only: interrupts stay disabled and every transfer busy-waits on the
//! Line Status Register. There are no timeouts; a dead line blocks forever.

use bitflags::bitflags;
use core::fmt;

use crate::port::PortIo;

/// COM1 base port address
pub const COM1: u16 = 0x3F8;
/// COM2 base port address
pub const COM2: u16 = 0x2F8;

/// Register offsets from the base port.
const DATA_REG: u16 = 0; // TX/RX data, divisor low when DLAB=1
const INT_ENABLE_REG: u16 = 1; // interrupt enable, divisor high when DLAB=1
const FIFO_CTRL_REG: u16 = 2;
const LINE_CTRL_REG: u16 = 3;
const MODEM_CTRL_REG: u16 = 4;
const LINE_STATUS_REG: u16 = 5;

/// Divisor for 115200 baud (base clock 1.8432 MHz / 16).
const BAUD_DIVISOR: u16 = 1;

/// Byte pushed through the loopback path by [`Serial::self_test`].
const SELF_TEST_BYTE: u8 = 0xAE;

bitflags! {
    /// Line Status Register (+5).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct LineStatus: u8 {
        const DATA_READY = 1 << 0;
        const OVERRUN_ERROR = 1 << 1;
        const PARITY_ERROR = 1 << 2;
        const FRAMING_ERROR = 1 << 3;
        const BREAK = 1 << 4;
        /// Transmit Holding Register empty.
        const THR_EMPTY = 1 << 5;
        const TX_IDLE = 1 << 6;
        const FIFO_ERROR = 1 << 7;
    }

    /// Line Control Register (+3).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct LineControl: u8 {
        const WORD_LEN_8 = 0b11;
        const TWO_STOP_BITS = 1 << 2;
        const PARITY_ENABLE = 1 << 3;
        /// Divisor Latch Access Bit.
        const DLAB = 1 << 7;
    }

    /// FIFO Control Register (+2).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FifoControl: u8 {
        const ENABLE = 1 << 0;
        const CLEAR_RX = 1 << 1;
        const CLEAR_TX = 1 << 2;
        const TRIGGER_14 = 0b11 << 6;
    }

    /// Modem Control Register (+4).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ModemControl: u8 {
        const DTR = 1 << 0;
        const RTS = 1 << 1;
        const OUT1 = 1 << 2;
        const OUT2 = 1 << 3;
        const LOOPBACK = 1 << 4;
    }
}

/// A 16550 UART at a fixed base port.
pub struct Serial<P> {
    io: P,
    base: u16,
}

impl<P: PortIo> Serial<P> {
    /// Bind a driver to `base`. Does not touch the hardware; call
    /// [`Serial::init`] first.
    pub const fn new(io: P, base: u16) -> Self {
        Self { io, base }
    }

    pub fn base(&self) -> u16 {
        self.base
    }

    /// Underlying port access, mostly for inspecting a mock in tests.
    pub fn io(&self) -> &P {
        &self.io
    }

    pub fn io_mut(&mut self) -> &mut P {
        &mut self.io
    }

    /// Initialize the serial port (115200 baud, 8N1, FIFOs on, no IRQs).
    pub fn init(&mut self) {
        // Disable all interrupts
        self.write_reg(INT_ENABLE_REG, 0x00);

        // Enable DLAB (set baud rate divisor)
        self.write_reg(LINE_CTRL_REG, LineControl::DLAB.bits());
        let [lo, hi] = BAUD_DIVISOR.to_le_bytes();
        self.write_reg(DATA_REG, lo);
        self.write_reg(INT_ENABLE_REG, hi);

        // 8 bits, no parity, one stop bit (clears DLAB)
        self.write_reg(LINE_CTRL_REG, LineControl::WORD_LEN_8.bits());

        // Enable FIFO, clear them, with 14-byte threshold
        let fifo = FifoControl::ENABLE
            | FifoControl::CLEAR_RX
            | FifoControl::CLEAR_TX
            | FifoControl::TRIGGER_14;
        self.write_reg(FIFO_CTRL_REG, fifo.bits());

        self.write_reg(MODEM_CTRL_REG, Self::normal_modem().bits());

        log::trace!("serial {:#x}: initialized at 115200 8N1", self.base);
    }

    /// Loopback self-test.
    ///
    /// Routes the transmitter back into the receiver, sends one byte and
    /// checks it comes back, then restores normal modem control. Returns
    /// `false` when no working UART answers at this base.
    pub fn self_test(&mut self) -> bool {
        let loopback = ModemControl::RTS
            | ModemControl::OUT1
            | ModemControl::OUT2
            | ModemControl::LOOPBACK;
        self.write_reg(MODEM_CTRL_REG, loopback.bits());
        self.write_reg(DATA_REG, SELF_TEST_BYTE);
        let echoed = self.read_reg(DATA_REG);
        self.write_reg(MODEM_CTRL_REG, Self::normal_modem().bits());
        echoed == SELF_TEST_BYTE
    }

    fn normal_modem() -> ModemControl {
        ModemControl::DTR | ModemControl::RTS | ModemControl::OUT2
    }

    pub fn line_status(&mut self) -> LineStatus {
        LineStatus::from_bits_retain(self.read_reg(LINE_STATUS_REG))
    }

    /// Block until a byte arrives, then return it.
    pub fn read_byte(&mut self) -> u8 {
        loop {
            if let Some(byte) = self.try_read_byte() {
                return byte;
            }
            core::hint::spin_loop();
        }
    }

    /// Return a received byte if one is waiting.
    pub fn try_read_byte(&mut self) -> Option<u8> {
        if self.line_status().contains(LineStatus::DATA_READY) {
            Some(self.read_reg(DATA_REG))
        } else {
            None
        }
    }

    /// Block until the transmit holding register is free, then send `byte`.
    pub fn write_byte(&mut self, byte: u8) {
        while !self.line_status().contains(LineStatus::THR_EMPTY) {
            core::hint::spin_loop();
        }
        self.write_reg(DATA_REG, byte);
    }

    /// Send `bytes` in order, stopping at the first NUL.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes.iter().take_while(|&&b| b != 0) {
            self.write_byte(byte);
        }
    }

    fn read_reg(&mut self, offset: u16) -> u8 {
        self.io.read_u8(self.base + offset)
    }

    fn write_reg(&mut self, offset: u16, value: u8) {
        self.io.write_u8(self.base + offset, value);
    }
}

impl<P: PortIo> fmt::Write for Serial<P> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for byte in s.bytes() {
            if byte == b'\n' {
                self.write_byte(b'\r');
            }
            self.write_byte(byte);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockPorts;
    use core::fmt::Write;

    #[test]
    fn init_programs_115200_8n1_with_fifo() {
        let mut serial = Serial::new(MockPorts::with_uart(COM1), COM1);
        serial.init();

        assert_eq!(
            serial.io().writes(),
            &[
                (COM1 + 1, 0x00),
                (COM1 + 3, 0x80),
                (COM1, 0x01),
                (COM1 + 1, 0x00),
                (COM1 + 3, 0x03),
                (COM1 + 2, 0xC7),
                (COM1 + 4, 0x0B),
            ]
        );
    }

    #[test]
    fn read_byte_waits_for_data_ready() {
        let mut ports = MockPorts::with_uart(COM1);
        ports.delay_rx(3);
        ports.push_rx(b"x");
        let mut serial = Serial::new(ports, COM1);

        assert_eq!(serial.read_byte(), b'x');
        assert!(serial.io().status_polls() >= 4);
        assert_eq!(serial.try_read_byte(), None);
    }

    #[test]
    fn write_byte_waits_for_thr_empty() {
        let mut ports = MockPorts::with_uart(COM1);
        ports.delay_tx(3);
        let mut serial = Serial::new(ports, COM1);

        serial.write_byte(b'z');
        // Three busy polls, one ready poll, then the data register write.
        assert_eq!(serial.io().status_polls(), 4);
        assert_eq!(serial.io().writes(), &[(COM1, b'z')]);
        assert_eq!(serial.io().transmitted(), b"z");
    }

    #[test]
    fn write_bytes_stops_at_nul() {
        let mut serial = Serial::new(MockPorts::with_uart(COM2), COM2);
        serial.write_bytes(b"ok\0ignored");
        assert_eq!(serial.io().transmitted(), b"ok");
    }

    #[test]
    fn fmt_write_translates_newlines() {
        let mut serial = Serial::new(MockPorts::with_uart(COM2), COM2);
        write!(serial, "a\nb").unwrap();
        assert_eq!(serial.io().transmitted(), b"a\r\nb");
    }

    #[test]
    fn self_test_passes_on_working_loopback() {
        let mut serial = Serial::new(MockPorts::with_uart(COM1), COM1);
        serial.init();
        assert!(serial.self_test());
        assert_eq!(serial.io().last_write(COM1 + 4), Some(0x0B));
        // The loopback byte must not leak onto the wire.
        assert!(serial.io().transmitted().is_empty());
    }

    #[test]
    fn self_test_fails_without_uart() {
        let mut serial = Serial::new(MockPorts::default(), COM1);
        assert!(!serial.self_test());
    }
}
