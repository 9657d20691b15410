//! Test utilities for runconf tests

#![allow(dead_code)]

use std::fmt;
use std::sync::{Arc, Mutex};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::Registry;

/// A warning emitted on the diagnostic channel
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Warning {
    pub operation: String,
    pub message: String,
}

impl Warning {
    pub fn mentions(&self, needle: &str) -> bool {
        self.message.contains(needle)
    }
}

struct WarningVisitor<'a>(&'a mut Warning);

impl Visit for WarningVisitor<'_> {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "operation" => self.0.operation = value.to_string(),
            "message" => self.0.message = value.to_string(),
            _ => {},
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        match field.name() {
            "operation" => self.0.operation = format!("{:?}", value),
            "message" => self.0.message = format!("{:?}", value),
            _ => {},
        }
    }
}

/// Layer that records WARN events
#[derive(Clone, Default)]
struct WarningCapture {
    warnings: Arc<Mutex<Vec<Warning>>>,
}

impl<S: Subscriber> Layer<S> for WarningCapture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() != Level::WARN {
            return;
        }
        let mut warning = Warning::default();
        event.record(&mut WarningVisitor(&mut warning));
        if let Ok(mut warnings) = self.warnings.lock() {
            warnings.push(warning);
        }
    }
}

/// Run `f` and collect the warnings it emits on this thread
pub fn capture_warnings<T>(f: impl FnOnce() -> T) -> (T, Vec<Warning>) {
    let capture = WarningCapture::default();
    let subscriber = Registry::default().with(capture.clone());
    let value = tracing::subscriber::with_default(subscriber, f);
    let warnings = capture
        .warnings
        .lock()
        .map(|w| w.clone())
        .unwrap_or_default();
    (value, warnings)
}
