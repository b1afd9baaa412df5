//! Property tests for timer engine invariants under arbitrary command
//! sequences.

use pomoterm_core::{Phase, ProgressPolicy, TimerEngine, MAX_CYCLE};
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Op {
    Start,
    TogglePause,
    Reset,
    HardReset,
    Advance,
    ToggleHint,
    Ticks(u16),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Start),
        Just(Op::TogglePause),
        Just(Op::Reset),
        Just(Op::HardReset),
        Just(Op::Advance),
        Just(Op::ToggleHint),
        (1u16..2000).prop_map(Op::Ticks),
    ]
}

fn check_invariants(engine: &TimerEngine) -> Result<(), TestCaseError> {
    let s = engine.state();
    let target = s.phase().target_secs();
    prop_assert!(s.elapsed_secs() <= target);
    prop_assert_eq!(s.is_finished(), s.elapsed_secs() == target);
    prop_assert!(!s.is_paused() || s.is_running());
    prop_assert!((1..=MAX_CYCLE).contains(&s.cycle().get()));

    let p = engine.progress();
    prop_assert!((0.0..=1.0).contains(&p));
    if s.is_finished() {
        prop_assert_eq!(p, 1.0);
    } else if s.elapsed_secs() > 0 {
        prop_assert!(p >= engine.policy().min_start());
        if let Some(max) = engine.policy().max_before_finish() {
            prop_assert!(p <= max);
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn invariants_hold_for_any_command_sequence(ops in prop::collection::vec(op(), 0..60)) {
        let mut engine = TimerEngine::new(ProgressPolicy::default());
        check_invariants(&engine)?;

        for op in ops {
            match op {
                Op::Start => { engine.start(); }
                Op::TogglePause => { engine.toggle_pause(); }
                Op::Reset => { engine.reset(); }
                Op::HardReset => { engine.hard_reset(); }
                Op::Advance => { engine.advance(); }
                Op::ToggleHint => { engine.toggle_hint_verbosity(); }
                Op::Ticks(n) => {
                    let before = (engine.state().phase_cycle(), engine.state().elapsed_secs());
                    let mut finishes = 0;
                    for _ in 0..n {
                        let prev = engine.state().elapsed_secs();
                        if let Some(tick) = engine.tick() {
                            prop_assert!(engine.state().elapsed_secs() >= prev);
                            if tick.finished.is_some() {
                                finishes += 1;
                            }
                        }
                    }
                    // Ticks never move between phases and finish at most once.
                    prop_assert_eq!(engine.state().phase_cycle(), before.0);
                    prop_assert!(finishes <= 1);
                    if finishes == 1 {
                        prop_assert!(before.1 < engine.state().phase().target_secs());
                    }
                }
            }
            check_invariants(&engine)?;
        }
    }

    #[test]
    fn advance_keeps_run_flag_and_clears_pause(ticks in 0u16..400, pause in any::<bool>(), started in any::<bool>()) {
        let mut engine = TimerEngine::default();
        if started {
            engine.start();
            for _ in 0..ticks { engine.tick(); }
            if pause { engine.toggle_pause(); }
        }
        engine.advance();
        let s = engine.state();
        prop_assert_eq!(s.phase(), Phase::Break);
        prop_assert_eq!(s.elapsed_secs(), 0);
        prop_assert!(!s.is_finished());
        prop_assert!(!s.is_paused());
        prop_assert_eq!(s.is_running(), started);
    }
}
