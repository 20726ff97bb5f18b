use std::io;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::runtime::{InputEvent, KeySource, Runner, Step, Ticker};
use crate::segment::{Cell, TextSession};
use crate::typing_policy::{apply_write, Keystroke};

/// Elapsed time reported for a finished run is never below one clock tick
pub const MIN_ELAPSED: Duration = Duration::from_nanos(1);

/// Abstract key events the engine understands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
    DeleteWord,
    Restart,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ExitReason {
    Natural,
    Timeout,
    Quit,
}

impl ExitReason {
    /// Natural completion and timeouts both produce results for the caller
    pub fn has_results(&self) -> bool {
        !matches!(self, ExitReason::Quit)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    Running,
    SegmentComplete,
    Finished(ExitReason),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunTotals {
    pub nerrs: u64,
    pub ncorrect: u64,
}

impl RunTotals {
    pub fn record(&mut self, keystroke: Keystroke) {
        if !keystroke.counts() {
            return;
        }
        if keystroke.is_correct() {
            self.ncorrect += 1;
        } else {
            self.nerrs += 1;
        }
    }

    pub fn keystrokes(&self) -> u64 {
        self.nerrs + self.ncorrect
    }
}

/// What a finished run hands back to its caller
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunOutcome {
    pub totals: RunTotals,
    pub elapsed: Duration,
    pub reason: ExitReason,
}

/// Fixed for the lifetime of an engine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    pub skip_word: bool,
    pub timeout: Option<Duration>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            skip_word: true,
            timeout: None,
        }
    }
}

/// Snapshot of everything a renderer needs to draw the current state
#[derive(Clone, Copy, Debug)]
pub struct EngineView<'a> {
    pub cells: &'a [Cell],
    pub cursor: usize,
    pub segment: usize,
    pub segment_count: usize,
    pub totals: RunTotals,
    pub remaining: Option<Duration>,
    pub finished: bool,
}

pub trait Renderer {
    fn draw(&mut self, view: &EngineView<'_>) -> io::Result<()>;
}

/// Drives a run across one or more segments of target text
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    segments: Vec<TextSession>,
    current: usize,
    totals: RunTotals,
    state: EngineState,
    started_at: Option<Instant>,
    deadline: Option<Instant>,
    elapsed: Duration,
}

impl Engine {
    pub fn new<I, S>(segments: I, config: EngineConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let segments: Vec<TextSession> = segments
            .into_iter()
            .map(|s| TextSession::new(s.as_ref()))
            .collect();

        let mut engine = Self {
            config,
            segments,
            current: 0,
            totals: RunTotals::default(),
            state: EngineState::Running,
            started_at: None,
            deadline: None,
            elapsed: Duration::ZERO,
        };
        engine.settle(Instant::now());
        engine
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn totals(&self) -> RunTotals {
        self.totals
    }

    pub fn current_segment(&self) -> usize {
        self.current
    }

    pub fn segment(&self) -> Option<&TextSession> {
        self.segments.get(self.current)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn has_finished(&self) -> bool {
        matches!(self.state, EngineState::Finished(_))
    }

    pub fn outcome(&self) -> Option<RunOutcome> {
        match self.state {
            EngineState::Finished(reason) => Some(RunOutcome {
                totals: self.totals,
                elapsed: self.elapsed,
                reason,
            }),
            _ => None,
        }
    }

    pub fn view(&self, now: Instant) -> EngineView<'_> {
        let (cells, cursor) = self
            .segment()
            .map(|s| (s.cells(), s.cursor()))
            .unwrap_or_default();

        let remaining = if self.has_finished() {
            None
        } else {
            match self.deadline {
                Some(at) => Some(at.saturating_duration_since(now)),
                None => self.config.timeout,
            }
        };

        EngineView {
            cells,
            cursor,
            segment: self.current,
            segment_count: self.segments.len(),
            totals: self.totals,
            remaining,
            finished: self.has_finished(),
        }
    }

    pub fn handle_key(&mut self, key: Key, now: Instant) {
        if self.has_finished() {
            return;
        }

        match key {
            Key::Char(c) => {
                if self.started_at.is_none() {
                    self.start(now);
                }
                let skip_word = self.config.skip_word;
                if let Some(segment) = self.segments.get_mut(self.current) {
                    let keystroke = apply_write(segment, c, skip_word);
                    self.totals.record(keystroke);
                }
                self.settle(now);
            }
            Key::Backspace => {
                if let Some(segment) = self.segments.get_mut(self.current) {
                    segment.backspace();
                }
            }
            Key::DeleteWord => {
                if let Some(segment) = self.segments.get_mut(self.current) {
                    segment.delete_previous_word();
                }
            }
            Key::Restart => self.restart(),
            Key::Quit => self.finish(ExitReason::Quit, now),
        }
    }

    /// Called when the deadline has passed. Partial progress is kept.
    pub fn expire(&mut self, now: Instant) {
        if self.has_finished() || self.deadline.is_none() {
            return;
        }
        self.finish(ExitReason::Timeout, now);
    }

    /// Draw, wait for a key or the deadline, apply it, until the run finishes
    pub fn run<E, T, R>(
        &mut self,
        runner: &Runner<E, T>,
        renderer: &mut R,
    ) -> io::Result<RunOutcome>
    where
        E: KeySource,
        T: Ticker,
        R: Renderer,
    {
        loop {
            renderer.draw(&self.view(Instant::now()))?;

            if let Some(outcome) = self.outcome() {
                return Ok(outcome);
            }

            match runner.wait(self.deadline) {
                Step::Event(InputEvent::Key(key)) => self.handle_key(key, Instant::now()),
                Step::Event(InputEvent::Resize) | Step::Tick => {}
                Step::Expired => self.expire(Instant::now()),
                Step::Closed => {
                    debug!("key source closed");
                    self.handle_key(Key::Quit, Instant::now());
                }
            }
        }
    }

    fn start(&mut self, now: Instant) {
        self.started_at = Some(now);
        self.deadline = self.config.timeout.map(|t| now + t);
        debug!(timeout = ?self.config.timeout, "attempt started");
    }

    /// Move past completed segments, finishing the run after the last one
    fn settle(&mut self, now: Instant) {
        while self.state == EngineState::Running {
            match self.segments.get(self.current) {
                Some(segment) if !segment.is_complete() => return,
                _ => self.state = EngineState::SegmentComplete,
            }

            if self.current + 1 < self.segments.len() {
                self.current += 1;
                self.state = EngineState::Running;
                debug!(segment = self.current, "advanced to next segment");
            } else {
                self.finish(ExitReason::Natural, now);
            }
        }
    }

    fn restart(&mut self) {
        if self.started_at.is_some() {
            info!(
                nerrs = self.totals.nerrs,
                ncorrect = self.totals.ncorrect,
                "attempt abandoned"
            );
        }

        for segment in &mut self.segments {
            segment.restart();
        }
        self.current = 0;
        self.totals = RunTotals::default();
        self.state = EngineState::Running;
        self.started_at = None;
        self.deadline = None;
        self.elapsed = Duration::ZERO;

        self.settle(Instant::now());
    }

    fn finish(&mut self, reason: ExitReason, now: Instant) {
        self.elapsed = self
            .started_at
            .map(|at| now.saturating_duration_since(at))
            .unwrap_or_default()
            .max(MIN_ELAPSED);
        self.deadline = None;
        self.state = EngineState::Finished(reason);

        info!(
            %reason,
            nerrs = self.totals.nerrs,
            ncorrect = self.totals.ncorrect,
            elapsed_ms = self.elapsed.as_millis() as u64,
            "run finished"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::Verdict;
    use assert_matches::assert_matches;

    fn type_str(engine: &mut Engine, s: &str, now: Instant) {
        for c in s.chars() {
            engine.handle_key(Key::Char(c), now);
        }
    }

    #[test]
    fn test_engine_new() {
        let engine = Engine::new(["hello world"], EngineConfig::default());

        assert_eq!(engine.state(), EngineState::Running);
        assert_eq!(engine.totals(), RunTotals::default());
        assert_eq!(engine.current_segment(), 0);
        assert!(!engine.has_started());
        assert!(!engine.has_finished());
        assert_eq!(engine.deadline(), None);
    }

    #[test]
    fn test_correct_char_counts() {
        let mut engine = Engine::new(["test"], EngineConfig::default());

        engine.handle_key(Key::Char('t'), Instant::now());

        assert_eq!(engine.totals().ncorrect, 1);
        assert_eq!(engine.totals().nerrs, 0);
        assert_eq!(engine.segment().unwrap().cursor(), 1);
        assert!(engine.has_started());
    }

    #[test]
    fn test_incorrect_char_counts() {
        let mut engine = Engine::new(["test"], EngineConfig::default());

        engine.handle_key(Key::Char('x'), Instant::now());

        assert_eq!(engine.totals().nerrs, 1);
        assert_eq!(engine.totals().ncorrect, 0);
        assert_eq!(engine.segment().unwrap().cursor(), 0);
    }

    #[test]
    fn test_backspace_keeps_totals() {
        let mut engine = Engine::new(["test"], EngineConfig::default());
        let now = Instant::now();
        type_str(&mut engine, "tx", now);

        engine.handle_key(Key::Backspace, now);
        engine.handle_key(Key::DeleteWord, now);

        assert_eq!(engine.totals(), RunTotals { nerrs: 1, ncorrect: 1 });
        assert_eq!(engine.segment().unwrap().cursor(), 0);
    }

    #[test]
    fn test_skip_counts_one_error() {
        let mut engine = Engine::new(["abc def"], EngineConfig::default());
        let now = Instant::now();

        type_str(&mut engine, "a ", now);

        assert_eq!(engine.totals(), RunTotals { nerrs: 1, ncorrect: 1 });
        assert_eq!(engine.segment().unwrap().current_char(), Some('d'));
    }

    #[test]
    fn test_tab_in_raw_text_can_be_typed() {
        let segments = crate::text::segments_from_input("a\tb", true, 80).unwrap();
        let mut engine = Engine::new(&segments, EngineConfig::default());
        let now = Instant::now();

        engine.handle_key(Key::Char('a'), now);
        engine.handle_key(Key::Char(' '), now);
        assert_eq!(engine.segment().unwrap().current_char(), Some('\t'));

        type_str(&mut engine, "\tb", now);

        let outcome = engine.outcome().unwrap();
        assert_eq!(outcome.reason, ExitReason::Natural);
        assert_eq!(outcome.totals, RunTotals { nerrs: 1, ncorrect: 3 });
    }

    #[test]
    fn test_second_space_keeps_next_word() {
        let mut engine = Engine::new(["ab cd ef"], EngineConfig::default());
        let now = Instant::now();

        type_str(&mut engine, "ab  cd", now);

        assert_eq!(engine.segment().unwrap().cursor(), 5);
        assert_eq!(engine.totals(), RunTotals { nerrs: 0, ncorrect: 5 });
    }

    #[test]
    fn test_natural_finish() {
        let mut engine = Engine::new(["hi"], EngineConfig::default());
        let start = Instant::now();

        engine.handle_key(Key::Char('h'), start);
        engine.handle_key(Key::Char('i'), start + Duration::from_secs(2));

        let outcome = engine.outcome().unwrap();
        assert_eq!(outcome.reason, ExitReason::Natural);
        assert_eq!(outcome.totals, RunTotals { nerrs: 0, ncorrect: 2 });
        assert_eq!(outcome.elapsed, Duration::from_secs(2));
    }

    #[test]
    fn test_segments_advance_and_totals_persist() {
        let mut engine = Engine::new(["abcdefghij", "klmnopqr"], EngineConfig::default());
        let now = Instant::now();

        engine.handle_key(Key::Char('x'), now);
        type_str(&mut engine, "abcdefghij", now);

        assert_eq!(engine.state(), EngineState::Running);
        assert_eq!(engine.current_segment(), 1);
        let segment = engine.segment().unwrap();
        assert_eq!(segment.len(), 8);
        assert_eq!(segment.cursor(), 0);
        assert!(segment.cells().iter().all(|c| c.verdict == Verdict::Pending));
        assert_eq!(engine.totals(), RunTotals { nerrs: 1, ncorrect: 10 });

        type_str(&mut engine, "klmnopqr", now);
        assert_matches!(
            engine.outcome(),
            Some(RunOutcome {
                reason: ExitReason::Natural,
                totals: RunTotals { nerrs: 1, ncorrect: 18 },
                ..
            })
        );
    }

    #[test]
    fn test_empty_segments_are_skipped() {
        let mut engine = Engine::new(["", "ab", ""], EngineConfig::default());

        assert_eq!(engine.current_segment(), 1);
        type_str(&mut engine, "ab", Instant::now());

        assert_eq!(engine.state(), EngineState::Finished(ExitReason::Natural));
    }

    #[test]
    fn test_all_empty_finishes_with_floor_elapsed() {
        let engine = Engine::new([""], EngineConfig::default());

        let outcome = engine.outcome().unwrap();
        assert_eq!(outcome.reason, ExitReason::Natural);
        assert_eq!(outcome.totals, RunTotals::default());
        assert_eq!(outcome.elapsed, MIN_ELAPSED);
    }

    #[test]
    fn test_quit_before_typing() {
        let mut engine = Engine::new(["hello"], EngineConfig::default());

        engine.handle_key(Key::Quit, Instant::now());

        let outcome = engine.outcome().unwrap();
        assert_eq!(outcome.reason, ExitReason::Quit);
        assert!(!outcome.reason.has_results());
        assert!(outcome.elapsed >= MIN_ELAPSED);
    }

    #[test]
    fn test_keys_after_finish_are_ignored() {
        let mut engine = Engine::new(["a"], EngineConfig::default());
        let now = Instant::now();
        engine.handle_key(Key::Char('a'), now);

        engine.handle_key(Key::Char('b'), now);
        engine.handle_key(Key::Restart, now);

        assert_eq!(engine.state(), EngineState::Finished(ExitReason::Natural));
        assert_eq!(engine.totals().keystrokes(), 1);
    }

    #[test]
    fn test_restart_before_typing_is_noop() {
        let mut engine = Engine::new(["hello"], EngineConfig::default());

        engine.handle_key(Key::Restart, Instant::now());

        assert_eq!(engine.totals(), RunTotals::default());
        assert_eq!(engine.state(), EngineState::Running);
        assert!(!engine.has_started());
    }

    #[test]
    fn test_restart_discards_attempt() {
        let config = EngineConfig {
            skip_word: true,
            timeout: Some(Duration::from_secs(30)),
        };
        let mut engine = Engine::new(["ab", "cd"], config);
        let now = Instant::now();
        type_str(&mut engine, "abx", now);
        assert_eq!(engine.current_segment(), 1);

        engine.handle_key(Key::Restart, now);

        assert_eq!(engine.totals(), RunTotals::default());
        assert_eq!(engine.current_segment(), 0);
        assert_eq!(engine.segment().unwrap().cursor(), 0);
        assert!(!engine.has_started());
        assert_eq!(engine.deadline(), None);
        assert!(engine.outcome().is_none());
    }

    #[test]
    fn test_timer_armed_on_first_keystroke() {
        let config = EngineConfig {
            skip_word: true,
            timeout: Some(Duration::from_secs(10)),
        };
        let mut engine = Engine::new(["hello"], config);
        let now = Instant::now();
        assert_eq!(engine.view(now).remaining, Some(Duration::from_secs(10)));

        engine.handle_key(Key::Char('h'), now);

        assert_eq!(engine.deadline(), Some(now + Duration::from_secs(10)));
        assert_eq!(
            engine.view(now + Duration::from_secs(4)).remaining,
            Some(Duration::from_secs(6))
        );
    }

    #[test]
    fn test_timeout_reports_partial_totals() {
        let config = EngineConfig {
            skip_word: true,
            timeout: Some(Duration::from_secs(5)),
        };
        let mut engine = Engine::new(["hello world"], config);
        let start = Instant::now();
        type_str(&mut engine, "hex", start);

        engine.expire(start + Duration::from_secs(5));

        let outcome = engine.outcome().unwrap();
        assert_eq!(outcome.reason, ExitReason::Timeout);
        assert!(outcome.reason.has_results());
        assert_eq!(outcome.totals, RunTotals { nerrs: 1, ncorrect: 2 });
        assert_eq!(outcome.elapsed, Duration::from_secs(5));
        assert_eq!(engine.deadline(), None);
    }

    #[test]
    fn test_expire_without_timer_is_ignored() {
        let mut engine = Engine::new(["hello"], EngineConfig::default());
        let now = Instant::now();
        engine.handle_key(Key::Char('h'), now);

        engine.expire(now);

        assert_eq!(engine.state(), EngineState::Running);
    }

    #[test]
    fn test_view_reflects_segment() {
        let mut engine = Engine::new(["ab", "c"], EngineConfig::default());
        let now = Instant::now();
        engine.handle_key(Key::Char('a'), now);

        let view = engine.view(now);
        assert_eq!(view.cursor, 1);
        assert_eq!(view.cells.len(), 2);
        assert_eq!(view.segment, 0);
        assert_eq!(view.segment_count, 2);
        assert_eq!(view.remaining, None);
        assert!(!view.finished);
    }
}
