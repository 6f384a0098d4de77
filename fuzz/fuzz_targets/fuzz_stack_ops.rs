#![no_main]

//! Random stack mutations interleaved with completion signals, checked
//! against the presenter invariants after every step.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use modalkit_core::{ClosePolicy, OpenOptions, StackConfig, StackController};
use modalkit_present::{AnimatedPresenter, CompletionSignal, ImmediatePresenter, Presenter};

#[derive(Debug, Arbitrary)]
enum Op {
    Open(u8),
    Replace(u8),
    Close(u8),
    CloseAll,
    /// Fire the signal of the current pass.
    Complete,
    /// Fire a signal captured earlier, possibly stale.
    FireOld(u8),
}

#[derive(Debug, Arbitrary)]
struct Input {
    clamp: bool,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    let policy = if input.clamp {
        ClosePolicy::Clamp
    } else {
        ClosePolicy::CollapseSingle
    };
    let stack: StackController<u8, ()> =
        StackController::with_config(StackConfig::new().close_policy(policy));
    let immediate = ImmediatePresenter::new(&stack);
    let animated = AnimatedPresenter::new(&stack);
    let mut captured: Vec<CompletionSignal> = Vec::new();

    for op in input.ops.iter().take(256) {
        match op {
            Op::Open(c) => {
                stack.open(*c, None);
            }
            Op::Replace(c) => {
                stack.open_with(*c, None, OpenOptions::new().replace(true));
            }
            Op::Close(n) => stack.close_n(usize::from(*n)),
            Op::CloseAll => stack.close_all(),
            Op::Complete => {
                if let Some(signal) = animated.completion_signal() {
                    signal.fire();
                }
            }
            Op::FireOld(i) => {
                if !captured.is_empty() {
                    captured[usize::from(*i) % captured.len()].fire();
                }
            }
        }

        let now = immediate.render_pass();
        assert_eq!(now.len(), stack.len());
        assert_eq!(now.active_count(), usize::from(!stack.is_empty()));

        let lagging = animated.render_pass();
        assert!(lagging.active_count() <= 1);
        assert_eq!(lagging.backdrop(), !stack.is_empty());
        if let Some(active) = lagging.active() {
            assert_eq!(active.depth() + 1, lagging.len());
        }
        if let Some(signal) = lagging.completion_signal() {
            captured.push(signal.clone());
        }
    }

    // Bounded settling always converges once signals are honoured.
    for _ in 0..4 {
        match animated.completion_signal() {
            Some(signal) => {
                signal.fire();
            }
            None => break,
        }
    }
    assert!(animated.is_settled());
    assert!(animated.displayed().same_entries(&stack.snapshot()));
});
