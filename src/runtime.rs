use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{debug, warn};

use crate::engine::Key;

/// Interval at which a blocked wait wakes up so the countdown can be redrawn
pub const TICK_RATE_MS: u64 = 250;

/// Immutable values produced by the input reader
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Key(Key),
    Resize,
}

/// Source of input events (keyboard, resize)
pub trait KeySource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<InputEvent, RecvTimeoutError>;
}

/// Translate a physical key press into an engine key, if it means anything
pub fn map_key(key: KeyEvent) -> Option<Key> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Esc => Some(Key::Restart),
        KeyCode::Char('c') if ctrl => Some(Key::Quit),
        // Most terminals deliver ctrl+backspace as ^H or ^W
        KeyCode::Char('h') | KeyCode::Char('w') if ctrl => Some(Key::DeleteWord),
        KeyCode::Backspace if ctrl || alt => Some(Key::DeleteWord),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Enter => Some(Key::Char('\n')),
        KeyCode::Tab => Some(Key::Char('\t')),
        KeyCode::Char(_) if ctrl || alt => None,
        KeyCode::Char(c) => Some(Key::Char(c)),
        _ => None,
    }
}

/// Production key source: a reader thread blocked on crossterm events
pub struct CrosstermKeySource {
    rx: Receiver<InputEvent>,
}

impl CrosstermKeySource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let evt = match event::read() {
                Ok(CtEvent::Key(key)) => map_key(key).map(InputEvent::Key),
                Ok(CtEvent::Resize(_, _)) => Some(InputEvent::Resize),
                Ok(_) => None,
                Err(err) => {
                    warn!(%err, "input reader stopped");
                    break;
                }
            };

            if let Some(evt) = evt {
                if tx.send(evt).is_err() {
                    break;
                }
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermKeySource {
    fn default() -> Self {
        Self::new()
    }
}

impl KeySource for CrosstermKeySource {
    fn recv_timeout(&self, timeout: Duration) -> Result<InputEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Key source fed from a channel, for headless drivers and tests
pub struct ChannelKeySource {
    rx: Receiver<InputEvent>,
}

impl ChannelKeySource {
    pub fn new(rx: Receiver<InputEvent>) -> Self {
        Self { rx }
    }
}

impl KeySource for ChannelKeySource {
    fn recv_timeout(&self, timeout: Duration) -> Result<InputEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Default for FixedTicker {
    fn default() -> Self {
        Self::new(Duration::from_millis(TICK_RATE_MS))
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Result of waiting on the key source and an optional deadline at once
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Event(InputEvent),
    /// The deadline has passed; no key was read after it
    Expired,
    Tick,
    /// The reader is gone and no more keys will arrive
    Closed,
}

pub struct Runner<E: KeySource, T: Ticker> {
    source: E,
    ticker: T,
}

impl<E: KeySource, T: Ticker> Runner<E, T> {
    pub fn new(source: E, ticker: T) -> Self {
        Self { source, ticker }
    }

    /// Block until the next key, the deadline or the next redraw tick,
    /// whichever comes first.
    pub fn wait(&self, deadline: Option<Instant>) -> Step {
        let interval = self.ticker.interval();
        let now = Instant::now();

        let (timeout, expires) = match deadline {
            Some(at) if at <= now => return Step::Expired,
            Some(at) if at - now <= interval => (at - now, true),
            _ => (interval, false),
        };

        match self.source.recv_timeout(timeout) {
            Ok(ev) => Step::Event(ev),
            Err(RecvTimeoutError::Timeout) if expires => {
                debug!("deadline reached while waiting for input");
                Step::Expired
            }
            Err(RecvTimeoutError::Timeout) => Step::Tick,
            Err(RecvTimeoutError::Disconnected) => Step::Closed,
        }
    }
}
