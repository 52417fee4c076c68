//! Input byte decoding.
//!
//! Terminals send arrow keys as `ESC [ A`..`ESC [ D`. [`KeyDecoder`] folds
//! those three-byte sequences into single [`Key`]s and passes every other
//! byte through, one byte at a time, with no I/O of its own.

/// Carriage return, sent by Enter.
const CR: u8 = 13;
/// Escape, first byte of a cursor-key sequence.
const ESC: u8 = 27;
/// Backspace as sent by some terminals.
const BS: u8 = 8;
/// Delete, what most terminals send for the Backspace key.
const DEL: u8 = 127;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Backspace,
    Up,
    Down,
    Left,
    Right,
    /// A printable ASCII byte (0x20..=0x7E).
    Char(u8),
    /// Any other control byte; the editor ignores these.
    Other(u8),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DecoderState {
    #[default]
    Idle,
    SawEsc,
    SawEscBracket,
}

#[derive(Debug, Default)]
pub struct KeyDecoder {
    state: DecoderState,
}

impl KeyDecoder {
    pub const fn new() -> Self {
        Self {
            state: DecoderState::Idle,
        }
    }

    pub fn state(&self) -> DecoderState {
        self.state
    }

    /// Consume one byte. Returns `None` while inside an escape sequence and
    /// for sequences that do not name a cursor key.
    pub fn feed(&mut self, byte: u8) -> Option<Key> {
        match self.state {
            DecoderState::Idle => match byte {
                CR => Some(Key::Enter),
                ESC => {
                    self.state = DecoderState::SawEsc;
                    None
                }
                DEL | BS => Some(Key::Backspace),
                0x20..=0x7E => Some(Key::Char(byte)),
                _ => Some(Key::Other(byte)),
            },
            DecoderState::SawEsc => {
                if byte == b'[' {
                    self.state = DecoderState::SawEscBracket;
                } else {
                    log::trace!("keys: ESC followed by {:#04x}, sequence dropped", byte);
                    self.state = DecoderState::Idle;
                }
                None
            }
            DecoderState::SawEscBracket => {
                self.state = DecoderState::Idle;
                match byte {
                    b'A' => Some(Key::Up),
                    b'B' => Some(Key::Down),
                    b'C' => Some(Key::Right),
                    b'D' => Some(Key::Left),
                    _ => {
                        log::trace!("keys: unsupported CSI final {:#04x}", byte);
                        None
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(bytes: &[u8]) -> Vec<Key> {
        let mut decoder = KeyDecoder::new();
        bytes.iter().filter_map(|&b| decoder.feed(b)).collect()
    }

    #[test]
    fn plain_bytes() {
        assert_eq!(
            decode(b"a Z~\r"),
            vec![
                Key::Char(b'a'),
                Key::Char(b' '),
                Key::Char(b'Z'),
                Key::Char(b'~'),
                Key::Enter
            ]
        );
        assert_eq!(decode(&[127, 8, 1, b'\n']), vec![
            Key::Backspace,
            Key::Backspace,
            Key::Other(1),
            Key::Other(b'\n'),
        ]);
    }

    #[test]
    fn arrow_sequences() {
        assert_eq!(
            decode(b"\x1b[A\x1b[B\x1b[C\x1b[D"),
            vec![Key::Up, Key::Down, Key::Right, Key::Left]
        );
    }

    #[test]
    fn state_walks_through_sequence() {
        let mut decoder = KeyDecoder::new();
        assert_eq!(decoder.feed(ESC), None);
        assert_eq!(decoder.state(), DecoderState::SawEsc);
        assert_eq!(decoder.feed(b'['), None);
        assert_eq!(decoder.state(), DecoderState::SawEscBracket);
        assert_eq!(decoder.feed(b'D'), Some(Key::Left));
        assert_eq!(decoder.state(), DecoderState::Idle);
    }

    #[test]
    fn non_bracket_aborts_and_is_consumed() {
        // The byte after a lone ESC is swallowed, even a CR.
        assert_eq!(decode(b"\x1bxa"), vec![Key::Char(b'a')]);
        assert_eq!(decode(b"\x1b\rb"), vec![Key::Char(b'b')]);
        assert_eq!(decode(b"\x1b\x1b[A"), vec![Key::Char(b'['), Key::Char(b'A')]);
    }

    #[test]
    fn unknown_final_is_discarded() {
        assert_eq!(decode(b"\x1b[Hq"), vec![Key::Char(b'q')]);
        assert_eq!(decode(b"\x1b[1~"), vec![Key::Char(b'~')]);
    }
}
