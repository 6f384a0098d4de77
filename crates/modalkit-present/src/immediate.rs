#![forbid(unsafe_code)]

//! Presenter without transitions: the render pass mirrors the stack.

use std::fmt;
use std::rc::Rc;

use modalkit_core::StackController;

use crate::pass::{Overlay, RenderPass, TransitionTarget};
use crate::presenter::Presenter;

/// Renders one overlay per stack entry with only the tail open.
///
/// A pure function of the latest snapshot. No completion signals are
/// handed out because nothing animates.
pub struct ImmediatePresenter<C, P> {
    stack: StackController<C, P>,
}

impl<C: 'static, P: 'static> ImmediatePresenter<C, P> {
    #[must_use]
    pub fn new(stack: &StackController<C, P>) -> Self {
        Self {
            stack: stack.clone(),
        }
    }
}

impl<C: 'static, P: 'static> Presenter<C, P> for ImmediatePresenter<C, P> {
    fn name(&self) -> &'static str {
        "immediate"
    }

    fn render_pass(&self) -> RenderPass<C, P> {
        let snapshot = self.stack.snapshot();
        let overlays = snapshot
            .iter()
            .enumerate()
            .map(|(depth, d)| Overlay::new(Rc::clone(d), depth, snapshot.is_active(depth), None))
            .collect();
        let target = if snapshot.is_empty() {
            TransitionTarget::Hidden
        } else {
            TransitionTarget::Visible
        };
        RenderPass::new(overlays, !snapshot.is_empty(), target)
    }
}

impl<C, P> fmt::Debug for ImmediatePresenter<C, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImmediatePresenter")
            .field("stack", &self.stack)
            .finish()
    }
}
