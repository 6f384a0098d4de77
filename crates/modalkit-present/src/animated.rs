#![forbid(unsafe_code)]

//! Lagging presenter for overlays with exit transitions.
//!
//! The [`AnimatedPresenter`] keeps a *displayed* stack that trails the
//! authoritative one. When the stack changes, the overlay currently on top is
//! told to hide but stays in the displayed stack, so it can play its exit
//! against its real content. Only when its [`CompletionSignal`] fires does the
//! displayed stack jump to whatever the authoritative stack is at that
//! moment.
//!
//! # Phases
//!
//! ```text
//!            adopt                 signal (same entries)
//!   Idle ──────────────▶ Entering ───────────────────────▶ Shown
//!    ▲                      │                                │
//!    │ signal, stack empty  │ stack changed                  │ stack changed
//!    │                      ▼                                │
//!    └───────────────── Exiting ◀────────────────────────────┘
//!                           │ signal, stack non-empty
//!                           └──────────────▶ Entering
//! ```
//!
//! # Invariants
//!
//! 1. At most one overlay is open in any render pass, and only the top one.
//! 2. At most one transition is pending; it belongs to the top overlay and
//!    carries a fresh generation number.
//! 3. Stack changes during `Exiting` are coalesced: the displayed stack
//!    jumps straight to the latest stack when the exit completes.
//! 4. The displayed stack only changes on adoption from `Idle` or on an
//!    accepted completion signal.
//!
//! # Failure Modes
//!
//! - Stray or stale signals (wrong generation, nothing pending) are ignored.
//! - Signals fired after the presenter is dropped are ignored.
//! - A signal that is never fired stalls the displayed stack;
//!   [`AnimatedPresenter::is_settled`] stays `false`.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use modalkit_core::{StackController, StackSnapshot, Subscription, TransitionHook};

use crate::pass::{Overlay, RenderPass, TransitionTarget};
use crate::presenter::Presenter;
use crate::signal::{CompletionSignal, TransitionSink};

/// Reconciliation phase of an [`AnimatedPresenter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LagPhase {
    /// Nothing displayed, nothing pending.
    #[default]
    Idle,
    /// Top overlay is animating in.
    Entering { generation: u64 },
    /// Displayed stack matches the authoritative one and is at rest.
    Shown,
    /// Top overlay is animating out; the displayed stack is stale.
    Exiting { generation: u64 },
}

impl LagPhase {
    /// Target visual state of the top displayed overlay.
    #[must_use]
    pub fn target(self) -> TransitionTarget {
        match self {
            Self::Entering { .. } | Self::Shown => TransitionTarget::Visible,
            Self::Idle | Self::Exiting { .. } => TransitionTarget::Hidden,
        }
    }

    /// Generation of the pending transition, if any.
    #[must_use]
    pub fn pending(self) -> Option<u64> {
        match self {
            Self::Entering { generation } | Self::Exiting { generation } => Some(generation),
            Self::Idle | Self::Shown => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_settled(self) -> bool {
        self.pending().is_none()
    }
}

struct LagState<C, P> {
    displayed: StackSnapshot<C, P>,
    phase: LagPhase,
    seen_version: u64,
    last_generation: u64,
    coalesced: usize,
}

impl<C, P> LagState<C, P> {
    fn new(initial: StackSnapshot<C, P>) -> Self {
        let mut state = Self {
            seen_version: initial.version(),
            displayed: StackSnapshot::empty(),
            phase: LagPhase::Idle,
            last_generation: 0,
            coalesced: 0,
        };
        if !initial.is_empty() {
            let generation = state.next_generation();
            state.displayed = initial;
            state.phase = LagPhase::Entering { generation };
        }
        state
    }

    fn next_generation(&mut self) -> u64 {
        self.last_generation += 1;
        self.last_generation
    }
}

struct LagCore<C, P> {
    stack: StackController<C, P>,
    state: RefCell<LagState<C, P>>,
}

impl<C: 'static, P: 'static> LagCore<C, P> {
    fn on_stack_changed(&self, latest: &StackSnapshot<C, P>) {
        let mut state = self.state.borrow_mut();
        if latest.version() <= state.seen_version {
            return;
        }
        state.seen_version = latest.version();

        let phase = state.phase;
        match phase {
            LagPhase::Idle => {
                if latest.is_empty() {
                    return;
                }
                // Nothing on screen to animate away from.
                let generation = state.next_generation();
                state.displayed = latest.clone();
                state.phase = LagPhase::Entering { generation };
                tracing::debug!(
                    len = latest.len(),
                    version = latest.version(),
                    generation,
                    "adopted stack from idle"
                );
            }
            LagPhase::Exiting { generation } => {
                state.coalesced += 1;
                tracing::trace!(
                    version = latest.version(),
                    generation,
                    coalesced = state.coalesced,
                    "stack change coalesced into pending exit"
                );
            }
            LagPhase::Entering { .. } | LagPhase::Shown => {
                let generation = state.next_generation();
                state.phase = LagPhase::Exiting { generation };
                state.coalesced = 0;
                tracing::debug!(
                    displayed = state.displayed.len(),
                    latest = latest.len(),
                    generation,
                    "exit started"
                );
            }
        }
    }
}

impl<C: 'static, P: 'static> TransitionSink for LagCore<C, P> {
    fn complete(&self, generation: u64) -> bool {
        let latest = self.stack.snapshot();
        let mut state = self.state.borrow_mut();

        let phase = state.phase;
        if phase.pending() != Some(generation) {
            tracing::trace!(generation, phase = ?phase, "ignoring stray completion signal");
            return false;
        }

        state.seen_version = state.seen_version.max(latest.version());
        let next = match phase {
            LagPhase::Entering { .. } if !latest.same_entries(&state.displayed) => {
                // Stack moved without us hearing about it; exit before swapping.
                LagPhase::Exiting {
                    generation: state.next_generation(),
                }
            }
            LagPhase::Entering { .. } => LagPhase::Shown,
            _ if latest.is_empty() => {
                state.displayed = latest;
                LagPhase::Idle
            }
            _ => {
                state.displayed = latest;
                LagPhase::Entering {
                    generation: state.next_generation(),
                }
            }
        };
        state.phase = next;
        state.coalesced = 0;

        tracing::debug!(
            generation,
            from = ?phase,
            to = ?state.phase,
            displayed = state.displayed.len(),
            "transition completed"
        );
        true
    }
}

/// Presenter that defers removals until exit transitions complete.
///
/// Construct it from the controller it should follow; it subscribes to the
/// stack and unsubscribes when dropped.
pub struct AnimatedPresenter<C, P> {
    core: Rc<LagCore<C, P>>,
    _subscription: Subscription,
}

impl<C: 'static, P: 'static> AnimatedPresenter<C, P> {
    /// Follow `stack`. A non-empty stack is adopted immediately and its top
    /// overlay starts entering.
    #[must_use]
    pub fn new(stack: &StackController<C, P>) -> Self {
        let core = Rc::new(LagCore {
            stack: stack.clone(),
            state: RefCell::new(LagState::new(stack.snapshot())),
        });
        let weak = Rc::downgrade(&core);
        let subscription = stack.subscribe(move |snapshot| {
            if let Some(core) = weak.upgrade() {
                core.on_stack_changed(snapshot);
            }
        });
        Self {
            core,
            _subscription: subscription,
        }
    }

    /// The lagging copy of the stack that is actually rendered.
    #[must_use]
    pub fn displayed(&self) -> StackSnapshot<C, P> {
        self.core.state.borrow().displayed.clone()
    }

    #[must_use]
    pub fn phase(&self) -> LagPhase {
        self.core.state.borrow().phase
    }

    #[must_use]
    pub fn target(&self) -> TransitionTarget {
        self.phase().target()
    }

    /// Stack changes absorbed by the exit currently in flight.
    #[must_use]
    pub fn coalesced_changes(&self) -> usize {
        self.core.state.borrow().coalesced
    }

    /// Signal for the pending transition, if any.
    #[must_use]
    pub fn completion_signal(&self) -> Option<CompletionSignal> {
        let state = self.core.state.borrow();
        let generation = state.phase.pending()?;
        let hook = state
            .displayed
            .active()
            .and_then(|d| d.on_transition_complete().cloned());
        Some(self.signal(generation, hook))
    }

    fn signal(&self, generation: u64, hook: Option<TransitionHook>) -> CompletionSignal {
        let weak: Weak<LagCore<C, P>> = Rc::downgrade(&self.core);
        CompletionSignal::new(weak, generation, hook)
    }
}

impl<C: 'static, P: 'static> Presenter<C, P> for AnimatedPresenter<C, P> {
    fn name(&self) -> &'static str {
        "animated"
    }

    fn render_pass(&self) -> RenderPass<C, P> {
        let state = self.core.state.borrow();
        let target = state.phase.target();
        let pending = state.phase.pending();
        let displayed = &state.displayed;

        let overlays = displayed
            .iter()
            .enumerate()
            .map(|(depth, d)| {
                let is_top = displayed.is_active(depth);
                let signal = if is_top {
                    pending.map(|generation| {
                        self.signal(generation, d.on_transition_complete().cloned())
                    })
                } else {
                    None
                };
                Overlay::new(Rc::clone(d), depth, is_top && target.is_visible(), signal)
            })
            .collect();

        RenderPass::new(overlays, !self.core.stack.is_empty(), target)
    }

    fn is_settled(&self) -> bool {
        self.phase().is_settled()
    }
}

impl<C, P> fmt::Debug for AnimatedPresenter<C, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.core.state.borrow();
        f.debug_struct("AnimatedPresenter")
            .field("displayed", &state.displayed)
            .field("phase", &state.phase)
            .field("coalesced", &state.coalesced)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    type Stack = StackController<&'static str, ()>;

    fn names(snapshot: &StackSnapshot<&'static str, ()>) -> Vec<&'static str> {
        snapshot.iter().map(|d| *d.component()).collect()
    }

    fn fire(presenter: &AnimatedPresenter<&'static str, ()>) -> bool {
        presenter
            .completion_signal()
            .is_some_and(|signal| signal.fire())
    }

    #[test]
    fn starts_idle_on_empty_stack() {
        let stack = Stack::new();
        let presenter = AnimatedPresenter::new(&stack);
        assert_eq!(presenter.phase(), LagPhase::Idle);
        assert!(presenter.displayed().is_empty());
        assert!(presenter.is_settled());
        assert!(presenter.completion_signal().is_none());
    }

    #[test]
    fn first_open_is_adopted_immediately() {
        let stack = Stack::new();
        let presenter = AnimatedPresenter::new(&stack);
        stack.open("a", None);
        assert_eq!(names(&presenter.displayed()), ["a"]);
        assert_eq!(presenter.target(), TransitionTarget::Visible);
        assert!(matches!(presenter.phase(), LagPhase::Entering { .. }));
    }

    #[test]
    fn entering_completion_settles() {
        let stack = Stack::new();
        let presenter = AnimatedPresenter::new(&stack);
        stack.open("a", None);
        assert!(fire(&presenter));
        assert_eq!(presenter.phase(), LagPhase::Shown);
        assert!(presenter.is_settled());
    }

    #[test]
    fn close_keeps_entry_displayed_until_signal() {
        let stack = Stack::new();
        let presenter = AnimatedPresenter::new(&stack);
        stack.open("a", None);
        fire(&presenter);
        stack.close();

        assert_eq!(names(&presenter.displayed()), ["a"]);
        assert_eq!(presenter.target(), TransitionTarget::Hidden);
        let pass = presenter.render_pass();
        assert_eq!(pass.active_count(), 0);
        assert!(!pass.backdrop());

        assert!(fire(&presenter));
        assert!(presenter.displayed().is_empty());
        assert_eq!(presenter.phase(), LagPhase::Idle);
    }

    #[test]
    fn open_on_top_exits_current_first() {
        let stack = Stack::new();
        let presenter = AnimatedPresenter::new(&stack);
        stack.open("a", None);
        fire(&presenter);
        stack.open("b", None);

        assert_eq!(names(&presenter.displayed()), ["a"]);
        assert!(matches!(presenter.phase(), LagPhase::Exiting { .. }));

        assert!(fire(&presenter));
        assert_eq!(names(&presenter.displayed()), ["a", "b"]);
        let pass = presenter.render_pass();
        assert_eq!(pass.active().map(|o| *o.component()), Some("b"));
    }

    #[test]
    fn changes_during_exit_are_coalesced() {
        let stack = Stack::new();
        let presenter = AnimatedPresenter::new(&stack);
        stack.open("a", None);
        stack.close();
        stack.open("b", None);
        stack.open("c", None);
        assert_eq!(presenter.coalesced_changes(), 2);

        assert!(fire(&presenter));
        assert_eq!(names(&presenter.displayed()), ["b", "c"]);
        assert_eq!(presenter.coalesced_changes(), 0);
    }

    #[test]
    fn stale_signal_is_ignored() {
        let stack = Stack::new();
        let presenter = AnimatedPresenter::new(&stack);
        stack.open("a", None);
        let entering = presenter.completion_signal().unwrap();
        stack.close();
        assert!(!entering.fire());
        assert_eq!(names(&presenter.displayed()), ["a"]);
    }

    #[test]
    fn signal_without_pending_transition_is_ignored() {
        let stack = Stack::new();
        let presenter = AnimatedPresenter::new(&stack);
        stack.open("a", None);
        let signal = presenter.completion_signal().unwrap();
        assert!(signal.fire());
        assert!(!signal.fire());
        assert_eq!(presenter.phase(), LagPhase::Shown);
    }

    #[test]
    fn non_empty_stack_is_adopted_at_construction() {
        let stack = Stack::new();
        stack.open("a", None);
        stack.open("b", None);
        let presenter = AnimatedPresenter::new(&stack);
        assert_eq!(names(&presenter.displayed()), ["a", "b"]);
        assert!(matches!(presenter.phase(), LagPhase::Entering { .. }));
    }

    #[test]
    fn dropping_presenter_unsubscribes() {
        let stack = Stack::new();
        let presenter = AnimatedPresenter::new(&stack);
        assert_eq!(stack.subscriber_count(), 1);
        drop(presenter);
        assert_eq!(stack.subscriber_count(), 0);
    }

    #[test]
    fn lower_overlays_never_get_signals() {
        let stack = Stack::new();
        let presenter = AnimatedPresenter::new(&stack);
        stack.open("a", None);
        fire(&presenter);
        stack.open("b", None);
        fire(&presenter);
        let pass = presenter.render_pass();
        assert!(pass.overlays()[0].completion_signal().is_none());
        assert!(pass.overlays()[1].completion_signal().is_some());
    }

    #[derive(Debug, Clone, Copy)]
    enum Step {
        Open,
        Replace,
        Close(usize),
        CloseAll,
        Fire,
        FireStale,
    }

    fn step() -> impl Strategy<Value = Step> {
        prop_oneof![
            3 => Just(Step::Open),
            1 => Just(Step::Replace),
            2 => (0usize..3).prop_map(Step::Close),
            1 => Just(Step::CloseAll),
            3 => Just(Step::Fire),
            1 => Just(Step::FireStale),
        ]
    }

    proptest! {
        #[test]
        fn every_pass_has_one_open_top_and_one_signal_at_most(
            steps in prop::collection::vec(step(), 0..48),
        ) {
            let stack = Stack::new();
            let presenter = AnimatedPresenter::new(&stack);
            let mut old_signals: Vec<CompletionSignal> = Vec::new();

            for step in steps {
                match step {
                    Step::Open => {
                        stack.open("x", None);
                    }
                    Step::Replace => {
                        stack.replace("y", None);
                    }
                    Step::Close(amount) => stack.close_n(amount),
                    Step::CloseAll => stack.close_all(),
                    Step::Fire => {
                        fire(&presenter);
                    }
                    Step::FireStale => {
                        if let Some(signal) = old_signals.first() {
                            signal.fire();
                        }
                    }
                }

                let pass = presenter.render_pass();
                prop_assert!(pass.active_count() <= 1);
                let signalled = pass
                    .overlays()
                    .iter()
                    .filter(|o| o.completion_signal().is_some())
                    .count();
                prop_assert!(signalled <= 1);
                if let Some(active) = pass.active() {
                    prop_assert_eq!(active.depth() + 1, pass.len());
                }
                prop_assert_eq!(pass.backdrop(), !stack.is_empty());
                if let Some(signal) = pass.completion_signal() {
                    old_signals.push(signal.clone());
                }
            }

            for _ in 0..4 {
                if !fire(&presenter) {
                    break;
                }
            }
            prop_assert!(presenter.is_settled());
            prop_assert_eq!(names(&presenter.displayed()), names(&stack.snapshot()));
        }
    }
}
