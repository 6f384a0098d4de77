#![forbid(unsafe_code)]

//! Proptest strategies and a reference model of stack length.

use modalkit_core::ClosePolicy;
use proptest::prelude::*;

const NAMES: [&str; 4] = ["A", "B", "C", "D"];

/// One step of a generated scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Open(&'static str),
    Replace(&'static str),
    Close(usize),
    CloseAll,
    /// Fire the pending completion signal.
    Complete,
}

fn name() -> impl Strategy<Value = &'static str> {
    prop::sample::select(NAMES.to_vec())
}

/// Stack mutations only.
pub fn mutation() -> impl Strategy<Value = Action> {
    prop_oneof![
        3 => name().prop_map(Action::Open),
        1 => name().prop_map(Action::Replace),
        2 => (0usize..4).prop_map(Action::Close),
        1 => Just(Action::CloseAll),
    ]
}

/// Mutations interleaved with completion signals.
pub fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        4 => mutation(),
        2 => Just(Action::Complete),
    ]
}

pub fn mutations(max_len: usize) -> impl Strategy<Value = Vec<Action>> {
    prop::collection::vec(mutation(), 0..max_len)
}

pub fn actions(max_len: usize) -> impl Strategy<Value = Vec<Action>> {
    prop::collection::vec(action(), 0..max_len)
}

/// Independent model of the documented length transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModelStack {
    pub len: usize,
    pub policy: ClosePolicy,
}

impl ModelStack {
    #[must_use]
    pub fn new(policy: ClosePolicy) -> Self {
        Self { len: 0, policy }
    }

    pub fn apply(&mut self, action: &Action) {
        self.len = match (action, self.policy) {
            (Action::Open(_), _) => self.len + 1,
            (Action::Replace(_), _) if self.len == 0 => 1,
            (Action::Replace(_), _) => self.len,
            (Action::Close(_), ClosePolicy::CollapseSingle) if self.len == 1 => 0,
            (Action::Close(amount), _) => self.len.saturating_sub(*amount),
            (Action::CloseAll, _) => 0,
            (Action::Complete, _) => self.len,
        };
    }
}
