//! VGA CRT controller cursor.
//!
//! The blinking text-mode cursor is positioned through the CRTC
//! index/data register pair, independently of where characters are written
//! into the frame buffer.

use crate::port::PortIo;

/// CRTC index register.
const CRTC_INDEX: u16 = 0x3D4;
/// CRTC data register.
const CRTC_DATA: u16 = 0x3D5;

/// Cursor Location High / Low register indices.
const CURSOR_LOCATION_HIGH: u8 = 0x0E;
const CURSOR_LOCATION_LOW: u8 = 0x0F;

/// Text mode columns, used to linearize (row, column).
const COLUMNS: u16 = 80;

pub struct HardwareCursor<P> {
    io: P,
}

impl<P: PortIo> HardwareCursor<P> {
    pub const fn new(io: P) -> Self {
        Self { io }
    }

    pub fn io(&self) -> &P {
        &self.io
    }

    /// Move the visible cursor to (`row`, `column`).
    ///
    /// Not bounds checked: the linear position is truncated to 16 bits, so
    /// out-of-range input lands somewhere wrong on screen but is harmless.
    pub fn set(&mut self, row: usize, column: usize) {
        let position = (row as u16)
            .wrapping_mul(COLUMNS)
            .wrapping_add(column as u16);
        let [low, high] = position.to_le_bytes();

        self.io.write_u8(CRTC_INDEX, CURSOR_LOCATION_LOW);
        self.io.write_u8(CRTC_DATA, low);
        self.io.write_u8(CRTC_INDEX, CURSOR_LOCATION_HIGH);
        self.io.write_u8(CRTC_DATA, high);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockPorts;

    #[test]
    fn writes_low_then_high_byte() {
        let mut cursor = HardwareCursor::new(MockPorts::default());
        cursor.set(24, 79);

        // 24 * 80 + 79 = 1999 = 0x07CF
        assert_eq!(
            cursor.io().writes(),
            &[(0x3D4, 0x0F), (0x3D5, 0xCF), (0x3D4, 0x0E), (0x3D5, 0x07)]
        );
    }

    #[test]
    fn out_of_range_position_wraps() {
        let mut cursor = HardwareCursor::new(MockPorts::default());
        cursor.set(820, 0);

        // 820 * 80 = 65600 wraps to 64
        assert_eq!(cursor.io().last_write(0x3D5), Some(0x00));
        assert_eq!(cursor.io().writes()[1], (0x3D5, 64));
    }
}
