#![forbid(unsafe_code)]

//! Render passes: what a presenter wants on screen right now.

use std::fmt;
use std::rc::Rc;

use modalkit_core::{ModalDescriptor, ModalId};

use crate::signal::CompletionSignal;

/// Visual state the topmost displayed overlay should be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionTarget {
    /// Open and fully visible.
    Visible,
    /// Closed (playing or finished its exit).
    #[default]
    Hidden,
}

impl TransitionTarget {
    #[inline]
    #[must_use]
    pub fn is_visible(self) -> bool {
        matches!(self, Self::Visible)
    }
}

/// Parameters handed to a modal's content when it renders.
///
/// This is the merged parameter set: the presenter's `open` flag and
/// completion signal alongside the caller's untouched props.
pub struct OverlayParams<'a, P> {
    pub id: ModalId,
    /// Whether this overlay is the active, fully visible one.
    pub open: bool,
    pub props: Option<&'a P>,
    /// Present only on the topmost overlay while a transition is pending.
    pub on_transition_complete: Option<&'a CompletionSignal>,
}

impl<P> Clone for OverlayParams<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for OverlayParams<'_, P> {}

impl<P: fmt::Debug> fmt::Debug for OverlayParams<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayParams")
            .field("id", &self.id)
            .field("open", &self.open)
            .field("props", &self.props)
            .field("on_transition_complete", &self.on_transition_complete)
            .finish()
    }
}

/// One overlay in a render pass.
pub struct Overlay<C, P> {
    descriptor: Rc<ModalDescriptor<C, P>>,
    depth: usize,
    open: bool,
    signal: Option<CompletionSignal>,
}

impl<C, P> Overlay<C, P> {
    pub(crate) fn new(
        descriptor: Rc<ModalDescriptor<C, P>>,
        depth: usize,
        open: bool,
        signal: Option<CompletionSignal>,
    ) -> Self {
        Self {
            descriptor,
            depth,
            open,
            signal,
        }
    }

    #[must_use]
    pub fn descriptor(&self) -> &Rc<ModalDescriptor<C, P>> {
        &self.descriptor
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> ModalId {
        self.descriptor.id()
    }

    #[inline]
    #[must_use]
    pub fn component(&self) -> &C {
        self.descriptor.component()
    }

    /// Position in the pass, 0 = bottommost.
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn completion_signal(&self) -> Option<&CompletionSignal> {
        self.signal.as_ref()
    }

    /// Parameters to pass to this overlay's content.
    #[must_use]
    pub fn params(&self) -> OverlayParams<'_, P> {
        OverlayParams {
            id: self.descriptor.id(),
            open: self.open,
            props: self.descriptor.props(),
            on_transition_complete: self.signal.as_ref(),
        }
    }
}

impl<C, P> Clone for Overlay<C, P> {
    fn clone(&self) -> Self {
        Self {
            descriptor: Rc::clone(&self.descriptor),
            depth: self.depth,
            open: self.open,
            signal: self.signal.clone(),
        }
    }
}

impl<C, P> fmt::Debug for Overlay<C, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Overlay")
            .field("id", &self.id())
            .field("depth", &self.depth)
            .field("open", &self.open)
            .field("signal", &self.signal)
            .finish()
    }
}

/// Everything needed to draw the modal layer for one frame.
pub struct RenderPass<C, P> {
    overlays: Vec<Overlay<C, P>>,
    backdrop: bool,
    target: TransitionTarget,
}

impl<C, P> RenderPass<C, P> {
    pub(crate) fn new(
        overlays: Vec<Overlay<C, P>>,
        backdrop: bool,
        target: TransitionTarget,
    ) -> Self {
        Self {
            overlays,
            backdrop,
            target,
        }
    }

    /// Overlays bottom to top.
    #[must_use]
    pub fn overlays(&self) -> &[Overlay<C, P>] {
        &self.overlays
    }

    /// Whether a backdrop should be drawn under the overlays.
    ///
    /// Follows the authoritative stack, so the backdrop starts fading as soon
    /// as the last modal is closed, while that modal is still exiting.
    #[inline]
    #[must_use]
    pub fn backdrop(&self) -> bool {
        self.backdrop
    }

    #[inline]
    #[must_use]
    pub fn target(&self) -> TransitionTarget {
        self.target
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    /// Number of overlays marked open. Never more than one.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.overlays.iter().filter(|o| o.open).count()
    }

    #[must_use]
    pub fn active(&self) -> Option<&Overlay<C, P>> {
        self.overlays.iter().find(|o| o.open)
    }

    #[must_use]
    pub fn top(&self) -> Option<&Overlay<C, P>> {
        self.overlays.last()
    }

    /// The pending completion signal, if any (always on the top overlay).
    #[must_use]
    pub fn completion_signal(&self) -> Option<&CompletionSignal> {
        self.top().and_then(Overlay::completion_signal)
    }

    #[must_use]
    pub fn ids(&self) -> Vec<ModalId> {
        self.overlays.iter().map(Overlay::id).collect()
    }
}

impl<C, P> fmt::Debug for RenderPass<C, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderPass")
            .field("overlays", &self.overlays)
            .field("backdrop", &self.backdrop)
            .field("target", &self.target)
            .finish()
    }
}
