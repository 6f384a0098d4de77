#![forbid(unsafe_code)]

//! Authoritative modal stack for modalkit.
//!
//! The [`StackController`] owns an ordered stack of [`ModalDescriptor`]s
//! layered over an application view. Index 0 is the bottommost overlay and
//! the last entry is the single active one. Every mutation publishes a new
//! immutable [`StackSnapshot`]; presenters in `modalkit-present` subscribe to
//! those snapshots and decide what is actually drawn.
//!
//! # Invariants
//!
//! 1. Only the tail entry is active.
//! 2. Mutations only append to or truncate from the tail.
//! 3. `len() == 0` is the sole meaning of "nothing open".
//! 4. A snapshot handed out is never mutated afterwards.
//!
//! # Failure Modes
//!
//! None at runtime: every operation accepts any input and clamps. The only
//! fallible entry point is [`StackConfig`] parsing under the
//! `policy-config` feature.

pub mod config;
pub mod controller;
pub mod descriptor;
pub mod phase;
pub mod snapshot;

pub use config::{ClosePolicy, ConfigError, StackConfig};
pub use controller::{OpenOptions, StackController, Subscription};
pub use descriptor::{ModalDescriptor, ModalId, TransitionHook};
pub use phase::{StackOp, StackPhase};
pub use snapshot::StackSnapshot;
