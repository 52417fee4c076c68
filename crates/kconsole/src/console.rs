//! The line editor.
//!
//! [`Console`] owns the devices and all editing state. The main loop only
//! calls [`Console::start`] once and then [`Console::run`], which never
//! returns: it blocks on the UART for a byte, decodes it and applies it.
//!
//! Screen layout: every edit row starts with the prompt in column 0, the
//! line text follows from column [`PROMPT_WIDTH`]. The display cursor is
//! always `row_origin(current_row) + PROMPT_WIDTH + line_length`.

use kdisplay::{Attribute, TextGrid, row_origin};
use khal::{HardwareCursor, PortIo, Serial};

use crate::config::{ConsoleConfig, LAST_ROW, LINE_CAPACITY, PROMPT_WIDTH};
use crate::history::{History, Line};
use crate::keys::{DecoderState, Key, KeyDecoder};

/// Editing position of the active line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    /// Cell index where the next character will be drawn.
    pub display_cursor: usize,
    /// Row of the active line, `0..=LAST_ROW`.
    pub current_row: usize,
    /// Characters left of the cursor.
    pub line_length: usize,
    /// Length of the active line's content; right-arrow stops here.
    pub max_line_length: usize,
}

pub struct Console<'a, S, C> {
    serial: Serial<S>,
    screen: TextGrid<'a>,
    cursor: HardwareCursor<C>,
    config: ConsoleConfig,
    session: Session,
    line: Line,
    history: History,
    keys: KeyDecoder,
}

impl<'a, S: PortIo, C: PortIo> Console<'a, S, C> {
    pub fn new(serial: Serial<S>, screen: TextGrid<'a>, cursor: HardwareCursor<C>) -> Self {
        Self::with_config(serial, screen, cursor, ConsoleConfig::DEFAULT)
    }

    pub fn with_config(
        serial: Serial<S>,
        screen: TextGrid<'a>,
        cursor: HardwareCursor<C>,
        config: ConsoleConfig,
    ) -> Self {
        Self {
            serial,
            screen,
            cursor,
            config,
            session: Session::default(),
            line: Line::EMPTY,
            history: History::new(),
            keys: KeyDecoder::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The line being edited.
    pub fn line(&self) -> &Line {
        &self.line
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn screen(&self) -> &TextGrid<'a> {
        &self.screen
    }

    pub fn serial(&self) -> &Serial<S> {
        &self.serial
    }

    pub fn cursor(&self) -> &HardwareCursor<C> {
        &self.cursor
    }

    pub fn decoder_state(&self) -> DecoderState {
        self.keys.state()
    }

    /// Bring up the UART, greet on both outputs and draw the first prompt.
    pub fn start(&mut self) {
        let attribute = self.config.attribute;

        self.screen.clear(Attribute::DEFAULT);
        self.screen.write_text(attribute, self.config.screen_banner, 0);

        self.serial.init();
        if !self.serial.self_test() {
            log::warn!(
                "console: UART at {:#x} failed loopback self-test",
                self.serial.base()
            );
        }
        self.serial.write_bytes(self.config.serial_banner);
        self.serial.write_byte(self.config.prompt);

        // The first prompt shares row 0 with the banner and covers its
        // first character.
        self.session = Session::default();
        self.session.display_cursor =
            self.screen.write_cell(attribute, self.config.prompt, row_origin(0));
        self.place_cursor();

        log::info!("console: ready on serial {:#x}", self.serial.base());
    }

    /// Serve the serial line forever.
    pub fn run(&mut self) -> ! {
        loop {
            let byte = self.serial.read_byte();
            self.feed(byte);
        }
    }

    /// Apply one input byte.
    pub fn feed(&mut self, byte: u8) {
        if let Some(key) = self.keys.feed(byte) {
            self.handle(key);
        }
    }

    pub fn handle(&mut self, key: Key) {
        log::trace!("console: {:?}", key);
        match key {
            Key::Enter => self.enter(),
            Key::Backspace => self.backspace(),
            Key::Left => self.move_left(),
            Key::Right => self.move_right(),
            Key::Up => {
                if let Some(line) = self.history.older(&self.line) {
                    self.show(line);
                }
            }
            Key::Down => {
                if let Some(line) = self.history.newer() {
                    self.show(line);
                }
            }
            Key::Char(byte) => self.insert(byte),
            Key::Other(byte) => log::trace!("console: ignoring control byte {:#04x}", byte),
        }
    }

    fn insert(&mut self, byte: u8) {
        let session = &mut self.session;
        if session.line_length >= LINE_CAPACITY {
            log::trace!("console: line full, dropped {:#04x}", byte);
            return;
        }

        self.serial.write_byte(byte);
        session.display_cursor =
            self.screen
                .write_cell(self.config.attribute, byte, session.display_cursor);
        self.line.set(session.line_length, byte);
        session.line_length += 1;
        session.max_line_length = session.max_line_length.max(session.line_length);
        self.place_cursor();
    }

    fn backspace(&mut self) {
        let session = &mut self.session;
        if session.line_length == 0 {
            return;
        }

        let column = PROMPT_WIDTH + session.line_length - 1;
        self.screen.erase_last_cell(session.display_cursor, column);
        session.display_cursor -= 1;
        session.line_length -= 1;
        self.line.remove(session.line_length);
        self.place_cursor();
    }

    fn move_left(&mut self) {
        if self.session.line_length > 0 {
            self.session.display_cursor -= 1;
            self.session.line_length -= 1;
            self.place_cursor();
        }
    }

    fn move_right(&mut self) {
        if self.session.line_length < self.session.max_line_length {
            self.session.display_cursor += 1;
            self.session.line_length += 1;
            self.place_cursor();
        }
    }

    fn enter(&mut self) {
        let prompt = self.config.prompt;
        self.serial.write_bytes(b"\r\n");
        self.serial.write_byte(prompt);

        self.history.commit(&self.line);
        log::debug!(
            "console: committed {:?} ({} in history)",
            self.line,
            self.history.total_recorded()
        );

        let session = &mut self.session;
        if session.current_row < LAST_ROW {
            session.current_row += 1;
        } else {
            self.screen.scroll_up();
        }
        session.display_cursor = self.screen.write_cell(
            self.config.attribute,
            prompt,
            row_origin(session.current_row),
        );
        session.line_length = 0;
        session.max_line_length = 0;
        self.line.clear();
        self.place_cursor();
    }

    /// Replace the active line with `line` (a recalled entry or the draft).
    fn show(&mut self, line: Line) {
        let attribute = self.config.attribute;
        let start = row_origin(self.session.current_row) + PROMPT_WIDTH;
        let end = self.screen.write_text(attribute, line.as_bytes(), start);

        // Blank whatever the previous content left past the new end, the
        // same way backspace blanks a vacated cell.
        let stale_end = start + self.line.len();
        for index in end..stale_end {
            self.screen.write_cell(Attribute::DEFAULT, b' ', index);
        }

        self.session.display_cursor = end;
        self.session.line_length = line.len();
        self.session.max_line_length = line.len();
        self.line = line;
        self.place_cursor();
    }

    /// Put the blinking cursor after the last typed character; on a full
    /// line it stays on the last column.
    fn place_cursor(&mut self) {
        let column = (self.session.line_length + PROMPT_WIDTH).min(LINE_CAPACITY);
        self.cursor.set(self.session.current_row, column);
    }
}
