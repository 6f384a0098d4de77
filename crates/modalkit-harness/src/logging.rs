#![forbid(unsafe_code)]

//! Logging for tests.

use std::fmt;
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::{EnvFilter, Registry};

/// Install a test-friendly fmt subscriber filtered by `RUST_LOG`.
///
/// Safe to call from every test; only the first call installs.
pub fn init_test_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

#[derive(Clone, Default)]
struct CaptureLayer {
    messages: Arc<Mutex<Vec<String>>>,
}

struct MessageVisitor<'a>(&'a mut Option<String>);

impl Visit for MessageVisitor<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            *self.0 = Some(format!("{value:?}"));
        }
    }
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut message = None;
        event.record(&mut MessageVisitor(&mut message));
        if let (Some(message), Ok(mut messages)) = (message, self.messages.lock()) {
            messages.push(message);
        }
    }
}

/// Run `f` with a capturing subscriber and return the event messages it
/// emitted, at every level.
pub fn capture_events(f: impl FnOnce()) -> Vec<String> {
    let layer = CaptureLayer::default();
    let messages = Arc::clone(&layer.messages);
    let subscriber = Registry::default().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    messages.lock().map(|m| m.clone()).unwrap_or_default()
}
