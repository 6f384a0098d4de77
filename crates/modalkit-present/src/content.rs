#![forbid(unsafe_code)]

//! Renderable content and pluggable render functions.
//!
//! [`ModalContent`] is the capability a stack entry's component must provide
//! to be drawn by [`ContentRenderer`]. [`RenderModals`] is the embedding
//! boundary: swap it to change backdrop, z-ordering or transition technology
//! without touching the stack or the presenters. Any
//! `FnMut(&RenderPass, &mut S)` is a `RenderModals`.

use std::rc::Rc;

use crate::pass::{OverlayParams, RenderPass};

/// Content of one modal, drawn onto a surface of type `S`.
pub trait ModalContent<P, S: ?Sized> {
    /// Draw with the merged parameters for this frame.
    ///
    /// When `params.on_transition_complete` is present the content must
    /// fire it once after its open or close transition finishes.
    fn render(&self, params: OverlayParams<'_, P>, surface: &mut S);
}

impl<P, S: ?Sized, T: ModalContent<P, S> + ?Sized> ModalContent<P, S> for Rc<T> {
    fn render(&self, params: OverlayParams<'_, P>, surface: &mut S) {
        (**self).render(params, surface);
    }
}

impl<P, S: ?Sized, T: ModalContent<P, S> + ?Sized> ModalContent<P, S> for Box<T> {
    fn render(&self, params: OverlayParams<'_, P>, surface: &mut S) {
        (**self).render(params, surface);
    }
}

/// Adapts a closure into [`ModalContent`].
#[derive(Debug, Clone, Copy)]
pub struct FnModal<F>(pub F);

impl<P, S: ?Sized, F> ModalContent<P, S> for FnModal<F>
where
    F: Fn(OverlayParams<'_, P>, &mut S),
{
    fn render(&self, params: OverlayParams<'_, P>, surface: &mut S) {
        (self.0)(params, surface);
    }
}

/// Draws a whole render pass.
pub trait RenderModals<C, P, S: ?Sized> {
    fn render_modals(&mut self, pass: &RenderPass<C, P>, surface: &mut S);
}

impl<C, P, S: ?Sized, F> RenderModals<C, P, S> for F
where
    F: FnMut(&RenderPass<C, P>, &mut S),
{
    fn render_modals(&mut self, pass: &RenderPass<C, P>, surface: &mut S) {
        self(pass, surface);
    }
}

/// Default renderer: invokes every overlay's content bottom to top.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentRenderer;

impl<C, P, S> RenderModals<C, P, S> for ContentRenderer
where
    C: ModalContent<P, S>,
    S: ?Sized,
{
    fn render_modals(&mut self, pass: &RenderPass<C, P>, surface: &mut S) {
        for overlay in pass.overlays() {
            overlay.component().render(overlay.params(), surface);
        }
    }
}

/// Draws a backdrop before delegating, whenever the pass asks for one.
#[derive(Debug, Clone)]
pub struct WithBackdrop<R, B> {
    inner: R,
    backdrop: B,
}

impl<R, B> WithBackdrop<R, B> {
    pub fn new(inner: R, backdrop: B) -> Self {
        Self { inner, backdrop }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<C, P, S, R, B> RenderModals<C, P, S> for WithBackdrop<R, B>
where
    S: ?Sized,
    R: RenderModals<C, P, S>,
    B: FnMut(&mut S),
{
    fn render_modals(&mut self, pass: &RenderPass<C, P>, surface: &mut S) {
        if pass.backdrop() {
            (self.backdrop)(surface);
        }
        self.inner.render_modals(pass, surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::immediate::ImmediatePresenter;
    use crate::presenter::Presenter;
    use modalkit_core::StackController;

    type Content = Rc<dyn ModalContent<String, Vec<String>>>;

    fn labelled(label: &'static str) -> Content {
        Rc::new(FnModal(move |params: OverlayParams<'_, String>, out: &mut Vec<String>| {
            let title = params.props.map(String::as_str).unwrap_or("-");
            out.push(format!("{label}:{title}:{}", params.open));
        }))
    }

    #[test]
    fn content_renderer_draws_bottom_to_top_with_merged_params() {
        let stack: StackController<Content, String> = StackController::new();
        stack.open(labelled("x"), Some("Hi".into()));
        stack.open(labelled("y"), None);

        let pass = ImmediatePresenter::new(&stack).render_pass();
        let mut out = Vec::new();
        ContentRenderer.render_modals(&pass, &mut out);
        assert_eq!(out, ["x:Hi:false", "y:-:true"]);
    }

    #[test]
    fn closures_are_render_functions() {
        let stack: StackController<Content, String> = StackController::new();
        stack.open(labelled("x"), None);
        let pass = ImmediatePresenter::new(&stack).render_pass();

        let mut count = 0usize;
        let mut render = |pass: &RenderPass<Content, String>, _out: &mut Vec<String>| {
            count += pass.len();
        };
        render.render_modals(&pass, &mut Vec::new());
        assert_eq!(count, 1);
    }

    #[test]
    fn backdrop_drawn_only_when_requested() {
        let stack: StackController<Content, String> = StackController::new();
        let presenter = ImmediatePresenter::new(&stack);
        let mut renderer = WithBackdrop::new(ContentRenderer, |out: &mut Vec<String>| {
            out.push("backdrop".into());
        });

        let mut out = Vec::new();
        renderer.render_modals(&presenter.render_pass(), &mut out);
        assert!(out.is_empty());

        stack.open(labelled("x"), None);
        renderer.render_modals(&presenter.render_pass(), &mut out);
        assert_eq!(out, ["backdrop", "x:-:true"]);
    }
}
