#![forbid(unsafe_code)]

//! Recording surface and scripted modal content.

use std::rc::Rc;

use modalkit_core::ModalId;
use modalkit_present::{CompletionSignal, ModalContent, OverlayParams};

/// Props of the dialogs used throughout the tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogProps {
    pub title: String,
    pub message: String,
}

impl Default for DialogProps {
    fn default() -> Self {
        Self {
            title: "Hello".into(),
            message: "I'm modal #1".into(),
        }
    }
}

impl DialogProps {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// What one overlay looked like in a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayRecord {
    pub id: ModalId,
    pub name: &'static str,
    pub open: bool,
    pub title: Option<String>,
    pub message: Option<String>,
    pub signalled: bool,
}

/// A frame of the modal layer, as drawn by scripted content.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub backdrop: bool,
    pub overlays: Vec<OverlayRecord>,
    /// Completion signals handed to content in this frame, in draw order.
    pub signals: Vec<CompletionSignal>,
}

impl RecordingSurface {
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.overlays.iter().map(|o| o.name).collect()
    }

    #[must_use]
    pub fn open_count(&self) -> usize {
        self.overlays.iter().filter(|o| o.open).count()
    }

    #[must_use]
    pub fn open_name(&self) -> Option<&'static str> {
        self.overlays.iter().find(|o| o.open).map(|o| o.name)
    }
}

/// Modal content that records itself instead of drawing.
#[derive(Debug, Clone, Copy)]
pub struct ScriptedModal {
    name: &'static str,
}

impl ScriptedModal {
    #[must_use]
    pub fn named(name: &'static str) -> Self {
        Self { name }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl ModalContent<DialogProps, RecordingSurface> for ScriptedModal {
    fn render(&self, params: OverlayParams<'_, DialogProps>, surface: &mut RecordingSurface) {
        surface.overlays.push(OverlayRecord {
            id: params.id,
            name: self.name,
            open: params.open,
            title: params.props.map(|p| p.title.clone()),
            message: params.props.map(|p| p.message.clone()),
            signalled: params.on_transition_complete.is_some(),
        });
        if let Some(signal) = params.on_transition_complete {
            surface.signals.push(signal.clone());
        }
    }
}

/// Component handle type used by the harness stacks.
pub type Modal = Rc<dyn ModalContent<DialogProps, RecordingSurface>>;

#[must_use]
pub fn scripted(name: &'static str) -> Modal {
    Rc::new(ScriptedModal::named(name))
}
