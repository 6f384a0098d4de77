#![forbid(unsafe_code)]

//! Test harness for modalkit.
//!
//! - [`fixtures`]: a recording surface and scripted modal content that
//!   captures the parameters it was rendered with and the completion
//!   signals it was handed.
//! - [`scenario`]: a driver pairing a stack with a host, so tests read as a
//!   sequence of user actions, frames and finished transitions.
//! - [`strategy`]: proptest strategies over action sequences plus a
//!   reference model of stack length.
//! - [`logging`]: test logging setup and in-memory event capture.
//!
//! Run `RUST_LOG=modalkit_present=trace cargo test -p modalkit-harness` to
//! see reconciliation decisions.

pub mod fixtures;
pub mod logging;
pub mod scenario;
pub mod strategy;

pub use fixtures::{DialogProps, Modal, OverlayRecord, RecordingSurface, ScriptedModal, scripted};
pub use logging::{capture_events, init_test_logging};
pub use scenario::Scenario;
pub use strategy::{Action, ModelStack};
