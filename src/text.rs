mod words;

use itertools::Itertools;
use rand::seq::SliceRandom;
use thiserror::Error;
use unicode_width::UnicodeWidthStr;

pub use words::WORDS;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TextError {
    #[error("input contains no text to practice")]
    Empty,
}

/// Where the practice text of each run comes from
#[derive(Debug, Clone)]
pub enum TextSource {
    /// Fresh random words for every run
    Random { words: usize, wrap: usize },
    /// Fixed segments supplied by the user, repeated every run
    Supplied(Vec<String>),
}

impl TextSource {
    pub fn segments(&self) -> Vec<String> {
        match self {
            TextSource::Random { words, wrap } => vec![random_text(*words, *wrap)],
            TextSource::Supplied(segments) => segments.clone(),
        }
    }
}

/// Greedily wrap whitespace-separated words at `width` columns.
/// A width of 0 disables wrapping.
pub fn word_wrap(s: &str, width: usize) -> String {
    let mut out = String::with_capacity(s.len());
    let mut line_width = 0;

    for word in s.split_whitespace() {
        let w = word.width();
        if line_width > 0 {
            if width > 0 && line_width + 1 + w > width {
                out.push('\n');
                line_width = 0;
            } else {
                out.push(' ');
                line_width += 1;
            }
        }
        out.push_str(word);
        line_width += w;
    }

    out
}

/// Wrap and mark each line break with a trailing space so words stay separated
fn reflow(s: &str, width: usize) -> String {
    word_wrap(s, width).replace('\n', " \n")
}

pub fn random_text(n: usize, wrap: usize) -> String {
    let mut rng = rand::thread_rng();
    let words = (0..n).filter_map(|_| WORDS.choose(&mut rng)).join(" ");
    reflow(&words, wrap)
}

/// Split piped input into segments, one per paragraph.
///
/// In raw mode the whole input is a single segment and is not reflowed.
pub fn segments_from_input(input: &str, raw: bool, wrap: usize) -> Result<Vec<String>, TextError> {
    if raw {
        if input.trim().is_empty() {
            return Err(TextError::Empty);
        }
        return Ok(vec![input.to_string()]);
    }

    let mut segments = vec![];
    for (blank, mut lines) in &input.lines().chunk_by(|l| l.is_empty()) {
        if !blank {
            segments.push(reflow(&lines.join(" "), wrap));
        }
    }

    if segments.is_empty() {
        return Err(TextError::Empty);
    }
    Ok(segments)
}
