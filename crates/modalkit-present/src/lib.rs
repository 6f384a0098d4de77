#![forbid(unsafe_code)]

//! Presentation layer for modalkit stacks.
//!
//! A [`Presenter`] reads the authoritative stack owned by a
//! [`StackController`](modalkit_core::StackController) and produces a
//! [`RenderPass`]: the overlays that should actually be on screen, which one
//! is open, and whether a backdrop is shown. A [`RenderModals`]
//! implementation then draws that pass onto a surface.
//!
//! - [`ImmediatePresenter`]: renders the stack as-is. Use it when overlays
//!   simply vanish.
//! - [`AnimatedPresenter`]: keeps a lagging copy of the stack so a dismissed
//!   overlay can play its exit transition before its content disappears.
//!
//! [`ModalHost`] bundles a controller, a presenter and a renderer.
//!
//! # Liveness
//!
//! Content rendered by the animated presenter must fire the
//! [`CompletionSignal`] it is handed once per transition it plays. A signal
//! that is never fired stalls the displayed stack; this is a contract on the
//! content and is not recovered from.

pub mod animated;
pub mod content;
pub mod host;
pub mod immediate;
pub mod pass;
pub mod presenter;
pub mod signal;

pub use animated::{AnimatedPresenter, LagPhase};
pub use content::{ContentRenderer, FnModal, ModalContent, RenderModals, WithBackdrop};
pub use host::ModalHost;
pub use immediate::ImmediatePresenter;
pub use pass::{Overlay, OverlayParams, RenderPass, TransitionTarget};
pub use presenter::Presenter;
pub use signal::CompletionSignal;
