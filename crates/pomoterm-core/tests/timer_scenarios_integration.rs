//! Integration tests for full Pomodoro sets.
//!
//! Drives the engine through whole focus/break sequences the way the
//! terminal front end does: commands and one tick per second.

use pomoterm_core::{
    Cycle, Event, HintVerbosity, Phase, PhaseCycle, ProgressPolicy, TimerEngine, TimerStatus,
};

fn tick_n(engine: &mut TimerEngine, n: u64) -> Vec<Event> {
    (0..n)
        .filter_map(|_| engine.tick().and_then(|t| t.finished))
        .collect()
}

fn at(engine: &TimerEngine) -> (Phase, u8) {
    (engine.state().phase(), engine.state().cycle().get())
}

#[test]
fn test_focus_runs_to_finish_then_advances_to_break() {
    let mut engine = TimerEngine::new(ProgressPolicy::default());
    engine.start();

    let finishes = tick_n(&mut engine, 1500);
    assert_eq!(finishes.len(), 1);
    assert_eq!(finishes[0].finished_phase(), Some(Phase::Focus));
    assert_eq!(engine.progress(), 1.0);
    assert_eq!(engine.snapshot().subtitle(), "done");

    engine.advance();
    let s = engine.state();
    assert_eq!(s.phase(), Phase::Break);
    assert_eq!(s.cycle(), Cycle::FIRST);
    assert_eq!(s.elapsed_secs(), 0);
    assert!(!s.is_finished());
    assert_eq!(s.status(), TimerStatus::Running);
}

#[test]
fn test_full_set_walks_cycles_and_long_break() {
    let mut engine = TimerEngine::default();
    let mut seen = vec![at(&engine)];
    for _ in 0..8 {
        engine.advance();
        seen.push(at(&engine));
    }

    assert_eq!(
        seen,
        vec![
            (Phase::Focus, 1),
            (Phase::Break, 1),
            (Phase::Focus, 2),
            (Phase::Break, 2),
            (Phase::Focus, 3),
            (Phase::Break, 3),
            (Phase::Focus, 4),
            (Phase::LongBreak, 4),
            (Phase::Focus, 1),
        ]
    );
}

#[test]
fn test_pause_suppresses_accumulation_until_resumed() {
    let mut engine = TimerEngine::default();
    engine.start();
    tick_n(&mut engine, 10);
    engine.toggle_pause();
    tick_n(&mut engine, 100);
    assert_eq!(engine.state().elapsed_secs(), 10);
    assert_eq!(engine.snapshot().subtitle(), "paused");

    engine.toggle_pause();
    tick_n(&mut engine, 5);
    assert_eq!(engine.state().elapsed_secs(), 15);
}

#[test]
fn test_progress_never_looks_empty_or_full_too_early() {
    let mut engine = TimerEngine::default();
    engine.start();

    let first = engine.tick().unwrap();
    assert!(first.progress >= ProgressPolicy::default().min_start());
    assert!(1.0 / 1500.0 < ProgressPolicy::default().min_start());

    tick_n(&mut engine, 1497);
    let penultimate = engine.tick().unwrap();
    assert_eq!(engine.state().elapsed_secs(), 1499);
    assert!(penultimate.progress <= 0.95);
    assert!(penultimate.finished.is_none());

    let last = engine.tick().unwrap();
    assert_eq!(last.progress, 1.0);
    assert!(last.finished.is_some());
}

#[test]
fn test_finish_rearms_after_reset() {
    let mut engine = TimerEngine::default();
    engine.advance();
    engine.start();
    assert_eq!(tick_n(&mut engine, 400).len(), 1);

    engine.reset();
    assert_eq!(at(&engine), (Phase::Break, 1));
    assert_eq!(engine.state().status(), TimerStatus::Stopped);
    assert!(engine.tick().is_none());

    engine.start();
    assert_eq!(tick_n(&mut engine, 300).len(), 1);
}

#[test]
fn test_hard_reset_from_long_break() {
    let mut engine = TimerEngine::default();
    for _ in 0..7 {
        engine.advance();
    }
    assert_eq!(at(&engine), (Phase::LongBreak, 4));
    engine.start();
    tick_n(&mut engine, 60);
    engine.toggle_hint_verbosity();

    assert!(matches!(engine.hard_reset(), Event::TimerHardReset { .. }));
    assert_eq!(engine.state().phase_cycle(), PhaseCycle::default());
    assert_eq!(engine.state().elapsed_secs(), 0);
    assert_eq!(engine.state().status(), TimerStatus::Stopped);
    assert_eq!(engine.state().hint(), HintVerbosity::Minimal);
}

#[test]
fn test_uncapped_policy_shows_true_ratio_near_end() {
    let mut engine = TimerEngine::new(ProgressPolicy::default().uncapped());
    engine.advance();
    engine.start();
    tick_n(&mut engine, 299);
    assert!((engine.progress() - 299.0 / 300.0).abs() < 1e-9);
}

#[test]
fn test_snapshot_serializes_for_renderers() {
    let mut engine = TimerEngine::default();
    engine.start();
    tick_n(&mut engine, 750);

    let json = serde_json::to_value(engine.snapshot_event()).unwrap();
    assert_eq!(json["type"], "state_snapshot");
    assert_eq!(json["phase"], "focus");
    assert_eq!(json["status"], "running");
    assert_eq!(json["elapsed_secs"], 750);
    assert_eq!(json["remaining_secs"], 750);
    assert_eq!(json["progress"], 0.5);
    assert_eq!(json["spinner"], "hamburger");
}
