#![forbid(unsafe_code)]

//! Stacked modal dialogs.
//!
//! `modalkit` re-exports the stack controller from `modalkit-core` and the
//! presenters from `modalkit-present`. Most applications only need the
//! [`prelude`].
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//!
//! use modalkit::prelude::*;
//!
//! type Content = Rc<dyn ModalContent<String, Vec<String>>>;
//!
//! fn dialog(name: &'static str) -> Content {
//!     Rc::new(FnModal(move |params: OverlayParams<'_, String>, out: &mut Vec<String>| {
//!         let title = params.props.map(String::as_str).unwrap_or("untitled");
//!         out.push(format!("{name} {title} open={}", params.open));
//!     }))
//! }
//!
//! let stack: StackController<Content, String> = StackController::new();
//! let mut host: ModalHost<Content, String, Vec<String>> = ModalHost::new(&stack);
//!
//! stack.open(dialog("confirm"), Some("Delete?".into()));
//! stack.open(dialog("details"), None);
//!
//! let mut frame: Vec<String> = Vec::new();
//! host.render(&mut frame);
//! assert_eq!(frame, ["confirm Delete? open=false", "details untitled open=true"]);
//!
//! stack.close_all();
//! frame.clear();
//! host.render(&mut frame);
//! assert!(frame.is_empty());
//! ```

pub use modalkit_core as core;
pub use modalkit_present as present;

pub use modalkit_core::{
    ClosePolicy, ConfigError, ModalDescriptor, ModalId, OpenOptions, StackConfig, StackController,
    StackPhase, StackSnapshot, Subscription,
};
pub use modalkit_present::{
    AnimatedPresenter, CompletionSignal, ContentRenderer, FnModal, ImmediatePresenter, LagPhase,
    ModalContent, ModalHost, Overlay, OverlayParams, Presenter, RenderModals, RenderPass,
    TransitionTarget, WithBackdrop,
};

/// Everything needed to open modals and render them.
pub mod prelude {
    pub use modalkit_core::{ModalId, OpenOptions, StackController, StackSnapshot};
    pub use modalkit_present::{
        AnimatedPresenter, CompletionSignal, FnModal, ImmediatePresenter, ModalContent, ModalHost,
        OverlayParams, Presenter, RenderModals, RenderPass,
    };
}
