//! VGA text-mode display.
//!
//! An 80x25 grid of (character, attribute) cells, addressed linearly by
//! cell index (`row * WIDTH + column`, two bytes per cell). All accesses are
//! volatile so they reach the frame buffer in program order.
#![cfg_attr(not(test), no_std)]

use core::marker::PhantomData;
use core::ptr::NonNull;

/// Columns per row.
pub const WIDTH: usize = 80;
/// Visible rows.
pub const HEIGHT: usize = 25;
/// Cells in the whole grid.
pub const CELLS: usize = WIDTH * HEIGHT;

/// Physical address of the colour text frame buffer.
pub const VGA_TEXT_PHYS: u64 = 0xB8000;

/// The 16 VGA text colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    Blue = 1,
    Green = 2,
    Cyan = 3,
    Red = 4,
    Magenta = 5,
    Brown = 6,
    LightGray = 7,
    DarkGray = 8,
    LightBlue = 9,
    LightGreen = 10,
    LightCyan = 11,
    LightRed = 12,
    Pink = 13,
    Yellow = 14,
    White = 15,
}

/// Attribute byte: background colour in the high nibble, foreground in the
/// low nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct Attribute(u8);

impl Attribute {
    pub const fn new(foreground: Color, background: Color) -> Self {
        Self(((background as u8) << 4) | foreground as u8)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Light gray on black, what firmware leaves behind.
    pub const DEFAULT: Attribute = Attribute::new(Color::LightGray, Color::Black);

    /// Light green on green (0x2A), used for everything the console draws.
    pub const CONSOLE: Attribute = Attribute::new(Color::LightGreen, Color::Green);
}

/// One character cell as laid out in the frame buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct Cell {
    pub ascii: u8,
    pub attribute: Attribute,
}

impl Cell {
    pub const BLANK: Cell = Cell::new(b' ', Attribute::DEFAULT);

    pub const fn new(ascii: u8, attribute: Attribute) -> Self {
        Self { ascii, attribute }
    }
}

/// Cell index of column 0 of `row`.
pub const fn row_origin(row: usize) -> usize {
    row * WIDTH
}

/// Writer over a text grid.
///
/// Indices past the end of the grid are ignored on write and read back as
/// `None`, so a stray cursor cannot scribble outside the frame buffer.
pub struct TextGrid<'a> {
    base: NonNull<Cell>,
    _buffer: PhantomData<&'a mut [Cell; CELLS]>,
}

impl TextGrid<'static> {
    /// Wrap a memory-mapped frame buffer.
    ///
    /// # Safety
    ///
    /// `base` must point to `CELLS` cells of mapped text-mode memory that
    /// nothing else writes for the rest of the program.
    pub unsafe fn from_raw(base: NonNull<Cell>) -> Self {
        Self {
            base,
            _buffer: PhantomData,
        }
    }
}

impl<'a> TextGrid<'a> {
    /// Wrap an ordinary cell array (off-screen rendering, tests).
    pub fn new(buffer: &'a mut [Cell; CELLS]) -> Self {
        Self {
            base: NonNull::from(buffer).cast(),
            _buffer: PhantomData,
        }
    }

    pub fn read(&self, index: usize) -> Option<Cell> {
        if index >= CELLS {
            return None;
        }
        // SAFETY: index is in bounds of the CELLS-long buffer.
        Some(unsafe { self.base.as_ptr().add(index).read_volatile() })
    }

    /// Characters of `row`, without attributes.
    pub fn row_bytes(&self, row: usize) -> [u8; WIDTH] {
        let mut bytes = [b' '; WIDTH];
        let origin = row_origin(row);
        for (column, byte) in bytes.iter_mut().enumerate() {
            if let Some(cell) = self.read(origin + column) {
                *byte = cell.ascii;
            }
        }
        bytes
    }

    fn store(&mut self, index: usize, cell: Cell) {
        if index < CELLS {
            // SAFETY: index is in bounds of the CELLS-long buffer.
            unsafe { self.base.as_ptr().add(index).write_volatile(cell) }
        }
    }

    fn load(&self, index: usize) -> Cell {
        self.read(index).unwrap_or(Cell::BLANK)
    }

    /// Write one character at `cursor` and return the next cell index.
    pub fn write_cell(&mut self, attribute: Attribute, ascii: u8, cursor: usize) -> usize {
        self.store(cursor, Cell::new(ascii, attribute));
        cursor + 1
    }

    /// Write `text` from `cursor` up to the first NUL; returns the cell after
    /// the last one written.
    pub fn write_text(&mut self, attribute: Attribute, text: &[u8], cursor: usize) -> usize {
        text.iter()
            .take_while(|&&b| b != 0)
            .fold(cursor, |at, &ascii| self.write_cell(attribute, ascii, at))
    }

    /// Remove the cell just left of `cursor`, which sits at `column` of its
    /// row, by shifting the rest of the row one cell left. The last cell of
    /// the row is blanked.
    pub fn erase_last_cell(&mut self, cursor: usize, column: usize) {
        let Some(target) = cursor.checked_sub(1) else {
            return;
        };
        let Some(origin) = target.checked_sub(column) else {
            return;
        };
        let last = origin + WIDTH - 1;
        if last >= CELLS {
            return;
        }

        for index in target..last {
            let next = self.load(index + 1);
            self.store(index, next);
        }
        self.store(last, Cell::BLANK);
    }

    /// Move every row up by one and blank the bottom row.
    pub fn scroll_up(&mut self) {
        for index in 0..row_origin(HEIGHT - 1) {
            let below = self.load(index + WIDTH);
            self.store(index, below);
        }
        for index in row_origin(HEIGHT - 1)..CELLS {
            self.store(index, Cell::BLANK);
        }
    }

    /// Fill the whole grid with spaces in `attribute`.
    pub fn clear(&mut self, attribute: Attribute) {
        for index in 0..CELLS {
            self.store(index, Cell::new(b' ', attribute));
        }
    }
}
