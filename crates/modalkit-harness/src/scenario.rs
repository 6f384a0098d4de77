#![forbid(unsafe_code)]

//! Scripted driver for stack + host interaction.
//!
//! # Example
//!
//! ```
//! use modalkit_harness::Scenario;
//!
//! let mut s = Scenario::animated();
//! s.open("A");
//! s.close();
//! assert_eq!(s.render().names(), ["A"]); // still exiting
//! assert!(s.complete());
//! assert!(s.render().names().is_empty());
//! ```

use std::collections::HashMap;

use modalkit_core::{ModalId, OpenOptions, StackConfig, StackController};
use modalkit_present::{
    AnimatedPresenter, ContentRenderer, ImmediatePresenter, ModalHost, WithBackdrop,
};

use crate::fixtures::{DialogProps, Modal, RecordingSurface, scripted};
use crate::strategy::Action;

/// A stack, a host drawing into [`RecordingSurface`]s, and every frame drawn.
pub struct Scenario {
    stack: StackController<Modal, DialogProps>,
    host: ModalHost<Modal, DialogProps, RecordingSurface>,
    names: HashMap<ModalId, &'static str>,
    earlier: Vec<RecordingSurface>,
    latest: Option<RecordingSurface>,
}

impl Scenario {
    #[must_use]
    pub fn immediate() -> Self {
        Self::with_config(StackConfig::default(), false)
    }

    #[must_use]
    pub fn animated() -> Self {
        Self::with_config(StackConfig::default(), true)
    }

    #[must_use]
    pub fn with_config(config: StackConfig, animated: bool) -> Self {
        let stack = StackController::with_config(config);
        let renderer = WithBackdrop::new(ContentRenderer, |surface: &mut RecordingSurface| {
            surface.backdrop = true;
        });
        let host = if animated {
            ModalHost::with_parts(&stack, AnimatedPresenter::new(&stack), renderer)
        } else {
            ModalHost::with_parts(&stack, ImmediatePresenter::new(&stack), renderer)
        };
        Self {
            stack,
            host,
            names: HashMap::new(),
            earlier: Vec::new(),
            latest: None,
        }
    }

    #[must_use]
    pub fn stack(&self) -> &StackController<Modal, DialogProps> {
        &self.stack
    }

    #[must_use]
    pub fn host(&self) -> &ModalHost<Modal, DialogProps, RecordingSurface> {
        &self.host
    }

    // --- Actions ---

    pub fn open(&mut self, name: &'static str) -> ModalId {
        self.open_with(name, None, OpenOptions::default())
    }

    pub fn open_titled(&mut self, name: &'static str, title: &str) -> ModalId {
        self.open_with(name, Some(DialogProps::titled(title)), OpenOptions::default())
    }

    pub fn replace(&mut self, name: &'static str) -> ModalId {
        self.open_with(name, None, OpenOptions::new().replace(true))
    }

    pub fn open_with(
        &mut self,
        name: &'static str,
        props: Option<DialogProps>,
        options: OpenOptions,
    ) -> ModalId {
        let id = self.stack.open_with(scripted(name), props, options);
        self.names.insert(id, name);
        id
    }

    pub fn close(&mut self) {
        self.stack.close();
    }

    pub fn close_n(&mut self, amount: usize) {
        self.stack.close_n(amount);
    }

    pub fn close_all(&mut self) {
        self.stack.close_all();
    }

    /// Apply a generated action. `Complete` fires the pending signal, if any.
    pub fn apply(&mut self, action: &Action) {
        match action {
            Action::Open(name) => {
                self.open(*name);
            }
            Action::Replace(name) => {
                self.replace(*name);
            }
            Action::Close(amount) => self.close_n(*amount),
            Action::CloseAll => self.close_all(),
            Action::Complete => {
                self.complete();
            }
        }
    }

    // --- Frames ---

    /// Draw one frame and return it.
    pub fn render(&mut self) -> &RecordingSurface {
        let mut surface = RecordingSurface::default();
        self.host.render(&mut surface);
        if let Some(previous) = self.latest.take() {
            self.earlier.push(previous);
        }
        self.latest.insert(surface)
    }

    /// Draw a frame and fire the completion signal it handed out, as content
    /// would once its transition finishes. Returns whether it was accepted.
    pub fn complete(&mut self) -> bool {
        let signal = self.render().signals.last().cloned();
        signal.is_some_and(|s| s.fire())
    }

    /// Fire signals until the presenter settles or `max_steps` is reached.
    /// Returns the number of accepted signals.
    pub fn settle(&mut self, max_steps: usize) -> usize {
        let mut accepted = 0;
        for _ in 0..max_steps {
            if self.host.is_settled() || !self.complete() {
                break;
            }
            accepted += 1;
        }
        accepted
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.host.is_settled()
    }

    /// Every frame drawn so far.
    #[must_use]
    pub fn frames(&self) -> impl Iterator<Item = &RecordingSurface> {
        self.earlier.iter().chain(self.latest.as_ref())
    }

    /// Names on the authoritative stack, bottom to top.
    #[must_use]
    pub fn stack_names(&self) -> Vec<&'static str> {
        self.stack
            .snapshot()
            .iter()
            .map(|d| self.names.get(&d.id()).copied().unwrap_or("?"))
            .collect()
    }
}
