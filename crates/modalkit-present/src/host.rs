#![forbid(unsafe_code)]

//! A stack, a presenter and a renderer wired together.

use std::fmt;

use modalkit_core::StackController;

use crate::animated::AnimatedPresenter;
use crate::content::{ContentRenderer, ModalContent, RenderModals};
use crate::immediate::ImmediatePresenter;
use crate::pass::RenderPass;
use crate::presenter::Presenter;

/// The modal layer of an application view.
///
/// The host does not own the stack exclusively: callers (and modal content)
/// keep their own [`StackController`] clones to open and close modals, and
/// the host reads the latest state whenever it renders.
pub struct ModalHost<C, P, S: ?Sized> {
    stack: StackController<C, P>,
    presenter: Box<dyn Presenter<C, P>>,
    renderer: Box<dyn RenderModals<C, P, S>>,
}

impl<C, P, S> ModalHost<C, P, S>
where
    C: ModalContent<P, S> + 'static,
    P: 'static,
    S: ?Sized + 'static,
{
    /// Host without transitions, drawing each entry's content.
    #[must_use]
    pub fn new(stack: &StackController<C, P>) -> Self {
        Self::with_parts(stack, ImmediatePresenter::new(stack), ContentRenderer)
    }

    /// Host whose overlays animate out before being removed.
    #[must_use]
    pub fn animated(stack: &StackController<C, P>) -> Self {
        Self::with_parts(stack, AnimatedPresenter::new(stack), ContentRenderer)
    }
}

impl<C, P, S> ModalHost<C, P, S>
where
    C: 'static,
    P: 'static,
    S: ?Sized + 'static,
{
    pub fn with_parts(
        stack: &StackController<C, P>,
        presenter: impl Presenter<C, P> + 'static,
        renderer: impl RenderModals<C, P, S> + 'static,
    ) -> Self {
        Self {
            stack: stack.clone(),
            presenter: Box::new(presenter),
            renderer: Box::new(renderer),
        }
    }

    /// Replace the render function, keeping stack and presenter state.
    pub fn set_renderer(&mut self, renderer: impl RenderModals<C, P, S> + 'static) {
        self.renderer = Box::new(renderer);
    }

    #[must_use]
    pub fn stack(&self) -> &StackController<C, P> {
        &self.stack
    }

    #[must_use]
    pub fn presenter(&self) -> &dyn Presenter<C, P> {
        self.presenter.as_ref()
    }

    #[must_use]
    pub fn render_pass(&self) -> RenderPass<C, P> {
        self.presenter.render_pass()
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.presenter.is_settled()
    }

    /// Draw one frame of the modal layer and return the pass that was drawn.
    pub fn render(&mut self, surface: &mut S) -> RenderPass<C, P> {
        let pass = self.presenter.render_pass();
        let _span = tracing::debug_span!(
            "modal_render",
            presenter = self.presenter.name(),
            overlays = pass.len(),
            backdrop = pass.backdrop(),
        )
        .entered();
        debug_assert!(pass.active_count() <= 1);
        self.renderer.render_modals(&pass, surface);
        pass
    }
}

impl<C, P, S: ?Sized> fmt::Debug for ModalHost<C, P, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalHost")
            .field("stack", &self.stack)
            .field("presenter", &self.presenter.name())
            .finish_non_exhaustive()
    }
}
