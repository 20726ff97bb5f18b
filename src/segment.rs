/// Typing outcome recorded for a single target character
#[derive(Clone, Debug, Copy, PartialEq, Eq, Default)]
pub enum Verdict {
    #[default]
    Pending,
    Correct,
    Incorrect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub char: char,
    pub verdict: Verdict,
}

impl Cell {
    fn new(char: char) -> Self {
        Self {
            char,
            verdict: Verdict::Pending,
        }
    }

    fn is_separator(&self) -> bool {
        self.char.is_whitespace()
    }
}

/// One segment of target text and the learner's progress through it.
///
/// Cells before the cursor carry a final verdict. The cell under the cursor
/// is either pending or marked incorrect by a failed keystroke; everything
/// after it is pending.
#[derive(Clone, Debug)]
pub struct TextSession {
    cells: Vec<Cell>,
    cursor: usize,
}

impl TextSession {
    pub fn new(text: &str) -> Self {
        Self {
            cells: text.chars().map(Cell::new).collect(),
            cursor: 0,
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The character the learner has to type next, `None` once exhausted
    pub fn current_char(&self) -> Option<char> {
        self.cells.get(self.cursor).map(|c| c.char)
    }

    pub fn is_complete(&self) -> bool {
        self.cursor >= self.cells.len()
    }

    /// Compare `c` against the cell under the cursor. Only a match advances.
    ///
    /// Typing into an exhausted segment changes nothing and yields `Pending`.
    pub fn type_char(&mut self, c: char) -> Verdict {
        let Some(cell) = self.cells.get_mut(self.cursor) else {
            return Verdict::Pending;
        };

        if cell.char == c {
            cell.verdict = Verdict::Correct;
            self.cursor += 1;
        } else {
            cell.verdict = Verdict::Incorrect;
        }
        cell.verdict
    }

    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }

        self.clear_cursor_mark();
        self.cursor -= 1;
        self.cells[self.cursor].verdict = Verdict::Pending;
        true
    }

    /// Rewind to the start of the current word, or of the previous word when
    /// already sitting on a word start. Returns how many cells were reset.
    pub fn delete_previous_word(&mut self) -> usize {
        let mut start = self.cursor;
        while start > 0 && self.cells[start - 1].is_separator() {
            start -= 1;
        }
        while start > 0 && !self.cells[start - 1].is_separator() {
            start -= 1;
        }

        self.clear_cursor_mark();
        for cell in &mut self.cells[start..self.cursor] {
            cell.verdict = Verdict::Pending;
        }

        let reset = self.cursor - start;
        self.cursor = start;
        reset
    }

    /// Abandon the rest of the current word: its untyped cells become
    /// incorrect and the separator after it is consumed as typed.
    /// Returns how many cells were marked incorrect.
    pub fn skip_to_next_word(&mut self) -> usize {
        let mut skipped = 0;
        while let Some(cell) = self.cells.get_mut(self.cursor) {
            if cell.is_separator() {
                cell.verdict = Verdict::Correct;
                self.cursor += 1;
                break;
            }
            cell.verdict = Verdict::Incorrect;
            self.cursor += 1;
            skipped += 1;
        }
        skipped
    }

    /// Nothing of the current word has been typed yet
    pub fn at_word_start(&self) -> bool {
        self.cursor == 0 || self.cells[self.cursor - 1].is_separator()
    }

    /// Reset every cell to pending and rewind to the start
    pub fn restart(&mut self) {
        for cell in &mut self.cells {
            cell.verdict = Verdict::Pending;
        }
        self.cursor = 0;
    }

    fn clear_cursor_mark(&mut self) {
        if let Some(cell) = self.cells.get_mut(self.cursor) {
            cell.verdict = Verdict::Pending;
        }
    }
}
