#![forbid(unsafe_code)]

//! Completion signals handed to rendered content.

use std::fmt;
use std::rc::Weak;

use modalkit_core::TransitionHook;

/// Receiver of completion signals (implemented by lagging presenters).
pub(crate) trait TransitionSink {
    /// Returns whether the signal advanced the presenter.
    fn complete(&self, generation: u64) -> bool;
}

/// "My transition finished" callback for the topmost displayed overlay.
///
/// Each signal is bound to one transition by its generation number. Firing
/// a signal for a transition that is no longer pending is ignored, and so is
/// firing after the presenter was dropped. The caller's own hook from
/// [`OpenOptions::on_transition_complete`](modalkit_core::OpenOptions) runs
/// after the presenter has been advanced, on every fire.
#[derive(Clone)]
pub struct CompletionSignal {
    sink: Weak<dyn TransitionSink>,
    generation: u64,
    chained: Option<TransitionHook>,
}

impl CompletionSignal {
    pub(crate) fn new(
        sink: Weak<dyn TransitionSink>,
        generation: u64,
        chained: Option<TransitionHook>,
    ) -> Self {
        Self {
            sink,
            generation,
            chained,
        }
    }

    /// Transition this signal belongs to.
    #[inline]
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Report the transition as finished.
    ///
    /// Returns `true` if the presenter accepted it (it was the pending
    /// transition), `false` for stray or stale signals.
    pub fn fire(&self) -> bool {
        let accepted = self
            .sink
            .upgrade()
            .is_some_and(|sink| sink.complete(self.generation));
        if let Some(hook) = &self.chained {
            hook();
        }
        accepted
    }
}

impl fmt::Debug for CompletionSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionSignal")
            .field("generation", &self.generation)
            .field("live", &(self.sink.strong_count() > 0))
            .field("chained", &self.chained.is_some())
            .finish()
    }
}
