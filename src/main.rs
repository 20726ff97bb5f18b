use std::{
    io::{self, stdin, Read, Stdout},
    time::Duration,
};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::{info, warn};

use tt::{
    app_dirs::AppDirs,
    config::{ConfigStore, FileConfigStore},
    engine::{Engine, EngineConfig, ExitReason, Key},
    logging,
    runtime::{CrosstermKeySource, FixedTicker, InputEvent, KeySource, Runner, Step, Ticker},
    stats::{HistoryLog, ResultLog, RunStats},
    text::{segments_from_input, TextSource},
    theme::{Theme, THEME_NAMES},
    ui::TerminalRenderer,
};

/// terminal typing trainer reporting wpm, cpm and accuracy
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "By default tt creates a test consisting of 50 random words. Arbitrary text can also be piped \
directly into the program to create a custom test; each paragraph of the input is treated as a segment of the test.\n\n\
Keybindings:\n  <esc>            restarts the test\n  <C-c>            terminates tt\n  <C-backspace>    deletes the previous word"
)]
pub struct Cli {
    /// number of random words which constitute the test
    #[clap(short = 'n', long = "words", default_value_t = 50)]
    number_of_words: usize,

    /// wrap the input text at the given number of columns (ignored with --raw)
    #[clap(short = 'w', long = "wrap", default_value_t = 80)]
    wrap: usize,

    /// terminate the test after the given number of seconds
    #[clap(short = 't', long = "timeout")]
    number_of_secs: Option<u64>,

    /// disable word skipping when space is pressed
    #[clap(long)]
    noskip: bool,

    /// print the results to stdout on exit as <wpm>,<cpm>,<accuracy>
    #[clap(long)]
    csv: bool,

    /// don't reflow piped text or split it into paragraphs
    #[clap(long)]
    raw: bool,

    /// exit after a single run (useful for scripts)
    #[clap(short = 'o', long = "oneshot")]
    oneshot: bool,

    /// theme to use (overrides the config file)
    #[clap(long)]
    theme: Option<String>,

    /// print a list of available values and exit
    #[clap(long, value_enum)]
    list: Option<ListKind>,
}

#[derive(Debug, Copy, Clone, PartialEq, ValueEnum)]
pub enum ListKind {
    Themes,
}

impl Cli {
    fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            skip_word: !self.noskip,
            timeout: self.number_of_secs.map(Duration::from_secs),
        }
    }

    fn random_source(&self) -> TextSource {
        TextSource::Random {
            words: self.number_of_words,
            wrap: self.wrap,
        }
    }
}

/// Owns the terminal while the TUI runs and restores it on every exit path
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.list == Some(ListKind::Themes) {
        for name in THEME_NAMES {
            println!("{name}");
        }
        return Ok(());
    }

    let _log_guard = AppDirs::state_dir().and_then(|dir| logging::init_file_logging(&dir).ok());

    let config = FileConfigStore::new().load();
    let theme = match config.resolve_theme(cli.theme.as_deref()) {
        Ok(theme) => theme,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    let source = if stdin().is_tty() {
        cli.random_source()
    } else {
        let mut input = String::new();
        stdin()
            .read_to_string(&mut input)
            .context("reading text from stdin")?;
        TextSource::Supplied(segments_from_input(&input, cli.raw, cli.wrap)?)
    };

    let results = run_app(&cli, &source, &theme)?;

    if cli.csv {
        results
            .write_csv(io::stdout())
            .context("writing results")?;
    }

    Ok(())
}

fn run_app(cli: &Cli, source: &TextSource, theme: &Theme) -> anyhow::Result<ResultLog> {
    let mut guard = TerminalGuard::new().context("initializing terminal")?;
    let mut renderer = TerminalRenderer::new(&mut guard.terminal, theme);
    let runner = Runner::new(CrosstermKeySource::new(), FixedTicker::default());
    let history = AppDirs::history_path().map(HistoryLog::with_path);
    let mut results = ResultLog::new();

    info!(config = ?cli.engine_config(), "starting");

    loop {
        let mut engine = Engine::new(source.segments(), cli.engine_config());
        let outcome = engine.run(&runner, &mut renderer)?;

        if !outcome.reason.has_results() {
            break;
        }

        let stats = RunStats::from_outcome(&outcome);
        results.push(stats);
        if let Some(history) = &history {
            if let Err(err) = history.append(&stats, &outcome) {
                warn!(
                    %err,
                    path = %history.path().display(),
                    "could not record run in history"
                );
            }
        }

        if cli.oneshot {
            break;
        }
        if !show_report(&runner, &mut renderer, &stats, outcome.reason)? {
            break;
        }
    }

    Ok(results)
}

/// Show the report until the learner asks for a new run (true) or quits (false)
fn show_report<E, T, B>(
    runner: &Runner<E, T>,
    renderer: &mut TerminalRenderer<'_, B>,
    stats: &RunStats,
    reason: ExitReason,
) -> io::Result<bool>
where
    E: KeySource,
    T: Ticker,
    B: Backend,
{
    renderer.draw_report(stats, reason)?;

    loop {
        match runner.wait(None) {
            Step::Event(InputEvent::Key(Key::Restart)) => return Ok(true),
            Step::Event(InputEvent::Key(Key::Quit)) | Step::Closed => return Ok(false),
            Step::Event(InputEvent::Resize) => renderer.draw_report(stats, reason)?,
            Step::Event(InputEvent::Key(_)) | Step::Tick | Step::Expired => {}
        }
    }
}
