#![forbid(unsafe_code)]

//! Immutable views of the modal stack.
//!
//! A [`StackSnapshot`] is produced by every mutation of a
//! [`StackController`](crate::StackController). Cloning is an `Rc` bump;
//! entries are shared between consecutive snapshots, so a descriptor keeps
//! its pointer identity for as long as it stays on the stack.

use std::fmt;
use std::rc::Rc;

use crate::descriptor::{ModalDescriptor, ModalId};

/// An ordered, immutable stack of modal descriptors (bottom to top).
pub struct StackSnapshot<C, P> {
    entries: Rc<[Rc<ModalDescriptor<C, P>>]>,
    version: u64,
}

impl<C, P> Clone for StackSnapshot<C, P> {
    fn clone(&self) -> Self {
        Self {
            entries: Rc::clone(&self.entries),
            version: self.version,
        }
    }
}

impl<C, P> Default for StackSnapshot<C, P> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<C, P> StackSnapshot<C, P> {
    /// The empty stack at version 0.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: Rc::from(Vec::new()),
            version: 0,
        }
    }

    pub(crate) fn from_entries(entries: Vec<Rc<ModalDescriptor<C, P>>>, version: u64) -> Self {
        Self {
            entries: Rc::from(entries),
            version,
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Controller version that produced this snapshot.
    #[inline]
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// The topmost (active) entry.
    #[must_use]
    pub fn active(&self) -> Option<&Rc<ModalDescriptor<C, P>>> {
        self.entries.last()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Rc<ModalDescriptor<C, P>>> {
        self.entries.get(index)
    }

    /// Whether `index` is the tail of a non-empty stack.
    #[inline]
    #[must_use]
    pub fn is_active(&self, index: usize) -> bool {
        index + 1 == self.entries.len()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Rc<ModalDescriptor<C, P>>> {
        self.entries.iter()
    }

    #[must_use]
    pub fn entries(&self) -> &[Rc<ModalDescriptor<C, P>>] {
        &self.entries
    }

    #[must_use]
    pub fn ids(&self) -> Vec<ModalId> {
        self.entries.iter().map(|d| d.id()).collect()
    }

    /// Whether both snapshots hold the same descriptors in the same order.
    ///
    /// Compares identities, not versions: a snapshot that went through
    /// `open` + `close` back to the same entries compares equal.
    #[must_use]
    pub fn same_entries(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.entries, &other.entries)
            || (self.entries.len() == other.entries.len()
                && self
                    .entries
                    .iter()
                    .zip(other.entries.iter())
                    .all(|(a, b)| Rc::ptr_eq(a, b)))
    }
}

impl<C, P> fmt::Debug for StackSnapshot<C, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StackSnapshot")
            .field("version", &self.version)
            .field("ids", &self.ids())
            .finish()
    }
}
