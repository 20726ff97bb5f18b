use crate::segment::{TextSession, Verdict};

/// What a single printable keystroke did to the active segment
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Keystroke {
    Typed(Verdict),
    /// Space pressed mid-word with skipping enabled; carries the number of
    /// cells marked incorrect.
    Skipped(usize),
    /// Space pressed before any of the word was typed; nothing happens
    Ignored,
}

impl Keystroke {
    pub fn is_correct(&self) -> bool {
        matches!(self, Keystroke::Typed(Verdict::Correct))
    }

    /// Whether the keystroke should be scored at all
    pub fn counts(&self) -> bool {
        !matches!(self, Keystroke::Typed(Verdict::Pending) | Keystroke::Ignored)
    }
}

/// Space typed while the cursor is on a word character
fn space_on_word(session: &TextSession, c: char) -> bool {
    c == ' ' && matches!(session.current_char(), Some(target) if !target.is_whitespace())
}

pub fn write_literal(session: &mut TextSession, c: char) -> Keystroke {
    Keystroke::Typed(session.type_char(c))
}

pub fn write_skipping(session: &mut TextSession, c: char) -> Keystroke {
    if !space_on_word(session, c) {
        return write_literal(session, c);
    }
    if session.at_word_start() {
        return Keystroke::Ignored;
    }
    Keystroke::Skipped(session.skip_to_next_word())
}

pub fn apply_write(session: &mut TextSession, c: char, skip_word: bool) -> Keystroke {
    if skip_word {
        write_skipping(session, c)
    } else {
        write_literal(session, c)
    }
}
