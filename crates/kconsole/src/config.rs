//! Console geometry and appearance.

use kdisplay::{Attribute, HEIGHT, WIDTH};

/// Columns taken by the prompt at the start of every edit row.
pub const PROMPT_WIDTH: usize = 1;

/// Longest line the editor accepts (the rest of the row after the prompt).
pub const LINE_CAPACITY: usize = WIDTH - PROMPT_WIDTH;

/// Number of committed lines kept for recall.
pub const HISTORY_CAPACITY: usize = 50;

/// Bottom row of the grid; Enter on this row scrolls.
pub const LAST_ROW: usize = HEIGHT - 1;

/// What the console draws and sends, independent of geometry.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleConfig {
    /// Attribute for every cell the editor writes.
    pub attribute: Attribute,
    /// Prompt character, echoed after each Enter and drawn at column 0.
    pub prompt: u8,
    /// Greeting written at the top-left of the screen on start.
    pub screen_banner: &'static [u8],
    /// Greeting sent over serial on start, before the first prompt.
    pub serial_banner: &'static [u8],
}

impl ConsoleConfig {
    pub const DEFAULT: ConsoleConfig = ConsoleConfig {
        attribute: Attribute::CONSOLE,
        prompt: b'>',
        screen_banner: b"Console greetings!",
        serial_banner: b"\n\rHello!\n\r\nThis is a simple echo console... please type something.\n\r",
    };
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
