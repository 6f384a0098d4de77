#![forbid(unsafe_code)]

//! Length-level state machine of the stack.
//!
//! State machine: `Empty` → `Showing(1)` → `Showing(n)` → ... → `Empty`.
//! There is no terminal state; the machine is reused for the life of the
//! controller.

use crate::config::ClosePolicy;

/// Stack state as seen by transition logic: only the length matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StackPhase {
    /// Nothing open.
    #[default]
    Empty,
    /// `n >= 1` modals open, the last one active.
    Showing(usize),
}

/// A mutation request against the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackOp {
    /// Append one entry, optionally dropping the current tail first.
    Open { replace: bool },
    /// Drop `amount` entries from the tail.
    Close(usize),
    /// Drop everything.
    CloseAll,
}

impl StackPhase {
    /// Phase for a stack of the given length.
    #[inline]
    #[must_use]
    pub fn from_len(len: usize) -> Self {
        if len == 0 { Self::Empty } else { Self::Showing(len) }
    }

    #[inline]
    #[must_use]
    pub fn len(self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Showing(n) => n,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Apply one operation to the phase.
    #[must_use]
    pub fn after(self, op: StackOp, policy: ClosePolicy) -> Self {
        let len = self.len();
        let next = match op {
            StackOp::Open { replace: true } => len.saturating_sub(1) + 1,
            StackOp::Open { replace: false } => len + 1,
            StackOp::Close(amount) => policy.retained_len(len, amount),
            StackOp::CloseAll => 0,
        };
        Self::from_len(next)
    }
}
