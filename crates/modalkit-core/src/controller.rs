#![forbid(unsafe_code)]

//! The authoritative modal stack.
//!
//! [`StackController`] is a cheaply clonable handle over shared,
//! single-threaded state (`Rc<RefCell<..>>`). Clones address the same stack;
//! separately constructed controllers are independent stacks. Hand a clone to
//! whatever needs to open or close modals (including modal content itself)
//! instead of reaching for a global.
//!
//! # Invariants
//!
//! 1. Mutations only touch the tail (append, truncate, or both for replace).
//! 2. Every mutation that changes the stack publishes a new snapshot with a
//!    version exactly one higher. Mutations that change nothing publish
//!    nothing.
//! 3. Subscribers are notified in registration order, after the internal
//!    borrow is released, and always receive the latest snapshot at the time
//!    of delivery. A subscriber that mutates re-entrantly may cause later
//!    subscribers to see the same snapshot twice; compare versions.
//! 4. No operation panics or errors for any argument.
//!
//! # Example
//!
//! ```
//! use modalkit_core::{OpenOptions, StackController};
//!
//! let stack: StackController<&str, &str> = StackController::new();
//! stack.open("ModalX", Some("Hi"));
//! assert_eq!(stack.active().map(|d| *d.component()), Some("ModalX"));
//!
//! stack.open_with("ModalY", None, OpenOptions::new().replace(true));
//! assert_eq!(stack.len(), 1);
//!
//! stack.close_all();
//! assert!(stack.is_empty());
//! ```

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::config::StackConfig;
use crate::descriptor::{ModalDescriptor, ModalId, TransitionHook};
use crate::phase::{StackOp, StackPhase};
use crate::snapshot::StackSnapshot;

type Callback<C, P> = dyn Fn(&StackSnapshot<C, P>);

/// Options for [`StackController::open_with`].
#[derive(Clone, Default)]
pub struct OpenOptions {
    /// Drop the current tail before appending.
    pub replace: bool,
    /// Hook chained after the presenter's completion signal.
    pub on_transition_complete: Option<TransitionHook>,
}

impl OpenOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn replace(mut self, replace: bool) -> Self {
        self.replace = replace;
        self
    }

    #[must_use]
    pub fn on_transition_complete(mut self, hook: impl Fn() + 'static) -> Self {
        self.on_transition_complete = Some(Rc::new(hook));
        self
    }
}

impl fmt::Debug for OpenOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenOptions")
            .field("replace", &self.replace)
            .field("has_hook", &self.on_transition_complete.is_some())
            .finish()
    }
}

/// RAII guard for a stack subscription. Dropping it unsubscribes.
#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct Subscription {
    _callback: Box<dyn Any>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

struct Inner<C, P> {
    snapshot: StackSnapshot<C, P>,
    config: StackConfig,
    subscribers: Vec<Weak<Callback<C, P>>>,
}

/// Owner of the authoritative modal stack.
pub struct StackController<C, P> {
    inner: Rc<RefCell<Inner<C, P>>>,
}

impl<C, P> Clone for StackController<C, P> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<C: 'static, P: 'static> Default for StackController<C, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: 'static, P: 'static> StackController<C, P> {
    /// Create an empty stack with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(StackConfig::default())
    }

    #[must_use]
    pub fn with_config(config: StackConfig) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                snapshot: StackSnapshot::empty(),
                config,
                subscribers: Vec::new(),
            })),
        }
    }

    // --- Mutations ---

    /// Push a modal on top of the stack.
    pub fn open(&self, component: C, props: Option<P>) -> ModalId {
        self.open_with(component, props, OpenOptions::default())
    }

    /// Swap the topmost modal for a new one (plain open on an empty stack).
    pub fn replace(&self, component: C, props: Option<P>) -> ModalId {
        self.open_with(component, props, OpenOptions::new().replace(true))
    }

    /// Push a modal with explicit options.
    pub fn open_with(&self, component: C, props: Option<P>, options: OpenOptions) -> ModalId {
        let OpenOptions {
            replace,
            on_transition_complete,
        } = options;
        let descriptor = Rc::new(ModalDescriptor::new(
            component,
            props,
            on_transition_complete,
        ));
        let id = descriptor.id();
        self.commit(StackOp::Open { replace }, move |entries| {
            if replace {
                entries.pop();
            }
            entries.push(descriptor);
        });
        id
    }

    /// Close the active modal.
    pub fn close(&self) {
        self.close_n(1);
    }

    /// Close `amount` modals from the top, per the configured
    /// [`ClosePolicy`](crate::ClosePolicy). Never goes below zero.
    pub fn close_n(&self, amount: usize) {
        let policy = self.inner.borrow().config.close_policy;
        self.commit(StackOp::Close(amount), move |entries| {
            let keep = policy.retained_len(entries.len(), amount);
            entries.truncate(keep);
        });
    }

    /// Close everything. Idempotent.
    pub fn close_all(&self) {
        self.commit(StackOp::CloseAll, Vec::clear);
    }

    // --- Queries ---

    /// The current snapshot. Later mutations never alter it.
    #[must_use]
    pub fn snapshot(&self) -> StackSnapshot<C, P> {
        self.inner.borrow().snapshot.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().snapshot.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().snapshot.is_empty()
    }

    #[must_use]
    pub fn phase(&self) -> StackPhase {
        StackPhase::from_len(self.len())
    }

    /// The active (topmost) descriptor.
    #[must_use]
    pub fn active(&self) -> Option<Rc<ModalDescriptor<C, P>>> {
        self.inner.borrow().snapshot.active().cloned()
    }

    /// Monotonic change counter; bumps once per effective mutation.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().snapshot.version()
    }

    #[must_use]
    pub fn config(&self) -> StackConfig {
        self.inner.borrow().config
    }

    /// Whether both handles address the same stack.
    #[must_use]
    pub fn same_stack(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    // --- Subscriptions ---

    /// Observe every published snapshot.
    pub fn subscribe(&self, callback: impl Fn(&StackSnapshot<C, P>) + 'static) -> Subscription {
        let callback: Rc<Callback<C, P>> = Rc::new(callback);
        let mut inner = self.inner.borrow_mut();
        inner.subscribers.retain(|w| w.strong_count() > 0);
        inner.subscribers.push(Rc::downgrade(&callback));
        drop(inner);
        Subscription {
            _callback: Box::new(callback),
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .borrow()
            .subscribers
            .iter()
            .filter(|w| w.strong_count() > 0)
            .count()
    }

    fn commit(&self, op: StackOp, edit: impl FnOnce(&mut Vec<Rc<ModalDescriptor<C, P>>>)) {
        let _span = tracing::debug_span!("modal_stack_commit", op = ?op).entered();

        {
            let mut inner = self.inner.borrow_mut();
            let before = inner.snapshot.len();
            let mut entries = inner.snapshot.entries().to_vec();
            edit(&mut entries);
            let after = entries.len();

            debug_assert_eq!(
                StackPhase::from_len(before)
                    .after(op, inner.config.close_policy)
                    .len(),
                after
            );

            if after == before && !matches!(op, StackOp::Open { .. }) {
                tracing::trace!(len = before, "stack unchanged");
                return;
            }

            let version = inner.snapshot.version() + 1;
            inner.snapshot = StackSnapshot::from_entries(entries, version);
            tracing::debug!(before, after, version, "stack updated");
        }

        self.notify();
    }

    fn notify(&self) {
        let callbacks: Vec<Rc<Callback<C, P>>> = {
            let mut inner = self.inner.borrow_mut();
            inner.subscribers.retain(|w| w.strong_count() > 0);
            inner.subscribers.iter().filter_map(Weak::upgrade).collect()
        };
        for callback in callbacks {
            let snapshot = self.snapshot();
            callback(&snapshot);
        }
    }
}

impl<C, P> fmt::Debug for StackController<C, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("StackController")
            .field("snapshot", &inner.snapshot)
            .field("config", &inner.config)
            .finish_non_exhaustive()
    }
}
