//! Line buffer and the ring of committed lines.

use core::fmt;

use crate::config::{HISTORY_CAPACITY, LINE_CAPACITY};

/// A fixed-capacity line of ASCII bytes.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Line {
    bytes: [u8; LINE_CAPACITY],
    len: usize,
}

impl Line {
    pub const EMPTY: Line = Line {
        bytes: [b' '; LINE_CAPACITY],
        len: 0,
    };

    /// Build a line from `bytes`, keeping at most `LINE_CAPACITY` of them.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut line = Self::EMPTY;
        let len = bytes.len().min(LINE_CAPACITY);
        line.bytes[..len].copy_from_slice(&bytes[..len]);
        line.len = len;
        line
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn clear(&mut self) {
        *self = Self::EMPTY;
    }

    /// Overwrite the byte at `index`, or extend the line to end there. A
    /// gap between the old end and `index` is filled with spaces. Returns
    /// `false` if `index` is past the capacity.
    pub fn set(&mut self, index: usize, byte: u8) -> bool {
        if index >= LINE_CAPACITY {
            return false;
        }
        if index > self.len {
            self.bytes[self.len..index].fill(b' ');
        }
        self.bytes[index] = byte;
        self.len = self.len.max(index + 1);
        true
    }

    /// Remove the byte at `index`, shifting the tail left and blanking the
    /// slot it vacates.
    pub fn remove(&mut self, index: usize) {
        if index >= self.len {
            return;
        }
        self.bytes.copy_within(index + 1..self.len, index);
        self.len -= 1;
        self.bytes[self.len] = b' ';
    }
}

impl Default for Line {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl fmt::Debug for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line(\"{}\")", self.as_bytes().escape_ascii())
    }
}

/// Committed lines, oldest evicted first once `HISTORY_CAPACITY` is reached.
///
/// `cursor` is the entry being viewed during recall; it equals
/// `total_recorded` while the user is on the line being typed (the draft).
pub struct History {
    entries: [Line; HISTORY_CAPACITY],
    oldest: usize,
    total_recorded: usize,
    cursor: usize,
    draft: Line,
}

impl History {
    pub const fn new() -> Self {
        Self {
            entries: [Line::EMPTY; HISTORY_CAPACITY],
            oldest: 0,
            total_recorded: 0,
            cursor: 0,
            draft: Line::EMPTY,
        }
    }

    pub fn total_recorded(&self) -> usize {
        self.total_recorded
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Entry `index`, counting from the oldest retained line.
    pub fn get(&self, index: usize) -> Option<&Line> {
        (index < self.total_recorded)
            .then(|| &self.entries[(self.oldest + index) % HISTORY_CAPACITY])
    }

    /// Retained lines, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Line> + '_ {
        (0..self.total_recorded).filter_map(move |index| self.get(index))
    }

    /// Append `line` as the newest entry and return to the draft position.
    pub fn commit(&mut self, line: &Line) {
        if self.total_recorded < HISTORY_CAPACITY {
            let slot = (self.oldest + self.total_recorded) % HISTORY_CAPACITY;
            self.entries[slot] = *line;
            self.total_recorded += 1;
        } else {
            log::debug!("history: full, evicting {:?}", self.entries[self.oldest]);
            self.entries[self.oldest] = *line;
            self.oldest = (self.oldest + 1) % HISTORY_CAPACITY;
        }
        self.cursor = self.total_recorded;
        self.draft.clear();
    }

    /// Step back one entry. `current` is the line on screen; it is kept as
    /// the draft when browsing starts from it.
    pub fn older(&mut self, current: &Line) -> Option<Line> {
        if self.cursor == 0 {
            return None;
        }
        if self.cursor == self.total_recorded {
            self.draft = *current;
        }
        self.cursor -= 1;
        self.get(self.cursor).copied()
    }

    /// Step forward one entry; past the newest entry this yields the draft.
    pub fn newer(&mut self) -> Option<Line> {
        if self.cursor >= self.total_recorded {
            return None;
        }
        self.cursor += 1;
        if self.cursor == self.total_recorded {
            Some(self.draft)
        } else {
            self.get(self.cursor).copied()
        }
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_overwrite_and_append() {
        let mut line = Line::from_bytes(b"abc");
        assert!(line.set(1, b'X'));
        assert!(line.set(3, b'd'));
        assert_eq!(line.as_bytes(), b"aXcd");
    }

    #[test]
    fn line_set_past_end_pads_with_spaces() {
        let mut line = Line::from_bytes(b"abcd");
        line.remove(3);
        assert!(line.set(4, b'z'));
        assert_eq!(line.as_bytes(), b"abc z");
    }

    #[test]
    fn line_remove_shifts_tail() {
        let mut line = Line::from_bytes(b"abcd");
        line.remove(1);
        assert_eq!(line.as_bytes(), b"acd");
        line.remove(7);
        assert_eq!(line.len(), 3);
    }

    #[test]
    fn line_is_capped() {
        let long = [b'q'; LINE_CAPACITY + 10];
        let mut line = Line::from_bytes(&long);
        assert_eq!(line.len(), LINE_CAPACITY);
        assert!(!line.set(LINE_CAPACITY, b'!'));
    }

    #[test]
    fn browse_back_and_forth() {
        let mut history = History::new();
        history.commit(&Line::from_bytes(b"one"));
        history.commit(&Line::from_bytes(b"two"));
        assert_eq!(history.cursor(), 2);

        let draft = Line::from_bytes(b"dr");
        assert_eq!(history.older(&draft).unwrap().as_bytes(), b"two");
        assert_eq!(history.older(&Line::EMPTY).unwrap().as_bytes(), b"one");
        assert_eq!(history.older(&Line::EMPTY), None);
        assert_eq!(history.newer().unwrap().as_bytes(), b"two");
        assert_eq!(history.newer().unwrap().as_bytes(), b"dr");
        assert_eq!(history.newer(), None);
        assert_eq!(history.cursor(), history.total_recorded());
    }

    #[test]
    fn evicts_oldest_when_full() {
        let mut history = History::new();
        for n in 0..=HISTORY_CAPACITY {
            let text = format!("line {n}");
            history.commit(&Line::from_bytes(text.as_bytes()));
        }

        assert_eq!(history.total_recorded(), HISTORY_CAPACITY);
        assert_eq!(history.get(0).unwrap().as_bytes(), b"line 1");
        assert_eq!(history.get(HISTORY_CAPACITY - 1).unwrap().as_bytes(), b"line 50");
        assert_eq!(history.get(HISTORY_CAPACITY), None);
        assert!(history.iter().all(|line| line.as_bytes() != b"line 0"));
        assert_eq!(history.iter().count(), HISTORY_CAPACITY);
    }
}
