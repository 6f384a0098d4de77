#![forbid(unsafe_code)]

//! Modal descriptors and their stable identities.

use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global counter for unique modal IDs.
static MODAL_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Stable identity of one requested overlay.
///
/// IDs are minted when a modal is opened and never reused, so they stay
/// valid as a reconciliation key even though stack positions shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModalId(u64);

impl ModalId {
    pub(crate) fn next() -> Self {
        Self(MODAL_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    #[inline]
    pub const fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ModalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "modal#{}", self.0)
    }
}

/// Caller-supplied hook run after a transition of this modal completes.
pub type TransitionHook = Rc<dyn Fn()>;

/// One requested overlay: an opaque renderable plus its configuration.
///
/// The controller never inspects `component` or `props`; they are handed
/// through to the presentation layer unchanged.
pub struct ModalDescriptor<C, P> {
    id: ModalId,
    component: C,
    props: Option<P>,
    on_transition_complete: Option<TransitionHook>,
}

impl<C, P> ModalDescriptor<C, P> {
    pub(crate) fn new(
        component: C,
        props: Option<P>,
        on_transition_complete: Option<TransitionHook>,
    ) -> Self {
        Self {
            id: ModalId::next(),
            component,
            props,
            on_transition_complete,
        }
    }

    #[inline]
    pub fn id(&self) -> ModalId {
        self.id
    }

    /// The renderable handle.
    #[inline]
    pub fn component(&self) -> &C {
        &self.component
    }

    /// Props passed at open time, `None` when opened without props.
    #[inline]
    pub fn props(&self) -> Option<&P> {
        self.props.as_ref()
    }

    /// The caller's completion hook, chained after presenter signals.
    pub fn on_transition_complete(&self) -> Option<&TransitionHook> {
        self.on_transition_complete.as_ref()
    }
}

impl<C: fmt::Debug, P: fmt::Debug> fmt::Debug for ModalDescriptor<C, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalDescriptor")
            .field("id", &self.id)
            .field("component", &self.component)
            .field("props", &self.props)
            .field("has_hook", &self.on_transition_complete.is_some())
            .finish()
    }
}
