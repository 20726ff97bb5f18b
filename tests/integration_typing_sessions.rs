use std::time::{Duration, Instant};

use tt::engine::{Engine, EngineConfig, ExitReason, Key, RunTotals};
use tt::segment::Verdict;
use tt::stats::{ResultLog, RunStats};
use tt::text::segments_from_input;

/// End-to-end sessions: piped text, engine, and derived statistics

fn type_str(engine: &mut Engine, s: &str, now: Instant) {
    for c in s.chars() {
        engine.handle_key(Key::Char(c), now);
    }
}

#[test]
fn piped_paragraphs_become_segments() {
    let segments = segments_from_input("the quick fox\n\njumps over\n", false, 80).unwrap();
    let mut engine = Engine::new(&segments, EngineConfig::default());
    let start = Instant::now();

    type_str(&mut engine, "the quick fox", start);
    assert_eq!(engine.current_segment(), 1);

    type_str(&mut engine, "jumps over", start + Duration::from_secs(6));

    let outcome = engine.outcome().unwrap();
    assert_eq!(outcome.reason, ExitReason::Natural);
    assert_eq!(outcome.totals, RunTotals { nerrs: 0, ncorrect: 23 });

    let stats = RunStats::from_outcome(&outcome);
    assert_eq!(stats.cpm, 230);
    assert_eq!(stats.wpm, 46);
    assert_eq!(stats.accuracy, 100.0);
}

#[test]
fn wrapped_lines_are_typed_with_enter() {
    let segments = segments_from_input("aa bb", false, 3).unwrap();
    assert_eq!(segments, vec!["aa \nbb"]);
    let mut engine = Engine::new(&segments, EngineConfig::default());

    type_str(&mut engine, "aa \nbb", Instant::now());

    assert_eq!(engine.outcome().unwrap().totals.nerrs, 0);
}

#[test]
fn skipping_words_marks_them_wrong() {
    let mut engine = Engine::new(["one two three"], EngineConfig::default());
    let now = Instant::now();

    type_str(&mut engine, "o two ", now);

    let segment = engine.segment().unwrap();
    assert_eq!(segment.current_char(), Some('t'));
    assert_eq!(segment.cursor(), 8);
    assert_eq!(segment.cells()[1].verdict, Verdict::Incorrect);
    assert_eq!(segment.cells()[2].verdict, Verdict::Incorrect);
    assert_eq!(segment.cells()[3].verdict, Verdict::Correct);
    assert_eq!(engine.totals(), RunTotals { nerrs: 1, ncorrect: 5 });
}

#[test]
fn ninety_percent_accuracy() {
    // 45 correct keystrokes and 5 wrong ones
    let text = "a".repeat(45);
    let mut engine = Engine::new([text.as_str()], EngineConfig::default());
    let start = Instant::now();

    type_str(&mut engine, "bbbbb", start);
    type_str(&mut engine, &text, start + Duration::from_secs(30));

    let stats = RunStats::from_outcome(&engine.outcome().unwrap());
    assert_eq!(stats.accuracy, 90.0);
    assert_eq!(stats.cpm, 90);
    assert_eq!(stats.wpm, 18);
}

#[test]
fn timeout_results_are_logged() {
    let config = EngineConfig {
        skip_word: true,
        timeout: Some(Duration::from_secs(1)),
    };
    let mut engine = Engine::new(["hello"], config);
    let start = Instant::now();
    type_str(&mut engine, "hel", start);

    engine.expire(start + Duration::from_secs(1));

    let mut log = ResultLog::new();
    let outcome = engine.outcome().unwrap();
    assert!(outcome.reason.has_results());
    log.push(RunStats::from_outcome(&outcome));

    let mut out = Vec::new();
    log.write_csv(&mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "36,180,100.00\n");
}
