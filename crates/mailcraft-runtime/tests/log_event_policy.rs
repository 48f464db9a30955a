#![forbid(unsafe_code)]

//! Log event policy tests.
//!
//! Verify that editor operations emit the events hosts rely on:
//! - Ignored drops and malformed payloads warn under `mailcraft.drag`.
//! - Applied drops log at DEBUG, never WARN.
//! - History pushes trace under `mailcraft.history` with a depth field.
//! - Every event emitted by the crates uses a `mailcraft.*` target.
//!
//! Run:
//!   cargo test -p mailcraft-runtime --test log_event_policy

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing_subscriber::layer::SubscriberExt;

use mailcraft_core::{BlockKind, DragPayload, DropZone};
use mailcraft_runtime::{CancellationSource, EditorConfig, EditorSession};

// ============================================================================
// Test Infrastructure
// ============================================================================

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    target: String,
    fields: HashMap<String, String>,
}

impl CapturedEvent {
    fn message(&self) -> &str {
        self.fields.get("message").map_or("", String::as_str)
    }
}

/// Layer that records every event.
#[derive(Clone, Default)]
struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl EventCapture {
    fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().unwrap().clone()
    }

    fn at(&self, level: tracing::Level, target: &str) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.level == level && e.target == target)
            .collect()
    }
}

struct FieldVisitor(HashMap<String, String>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{value:?}"));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.insert(field.name().to_string(), value.to_string());
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for EventCapture {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(HashMap::new());
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
            fields: visitor.0,
        });
    }
}

/// Run `f` with a capturing subscriber installed on this thread.
fn capture(f: impl FnOnce()) -> EventCapture {
    let layer = EventCapture::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    tracing::subscriber::with_default(subscriber, f);
    layer
}

fn session() -> EditorSession {
    EditorSession::new(EditorConfig::default())
}

// ============================================================================
// Drag events
// ============================================================================

#[test]
fn ignored_drop_warns_with_reason() {
    let log = capture(|| {
        let mut s = session();
        s.drag_start(DragPayload::existing("missing"));
        s.drag_to_index(DropZone::Root, 0);
        s.drop().unwrap();
    });
    let warnings = log.at(tracing::Level::WARN, "mailcraft.drag");
    assert_eq!(warnings.len(), 1, "{warnings:?}");
    assert_eq!(warnings[0].message(), "drop ignored");
    assert!(warnings[0].fields["reason"].contains("missing"));
}

#[test]
fn malformed_payload_warns() {
    let log = capture(|| {
        let mut s = session();
        assert!(s.drag_start_raw("{not json").is_none());
        assert!(s.drag_start_raw("   ").is_none());
    });
    let warnings = log.at(tracing::Level::WARN, "mailcraft.drag");
    assert_eq!(warnings.len(), 2, "{warnings:?}");
    assert!(warnings.iter().any(|e| e.message() == "malformed drag payload"));
    assert!(warnings.iter().any(|e| e.message() == "missing drag payload"));
}

#[test]
fn applied_drop_does_not_warn() {
    let log = capture(|| {
        let mut s = session();
        s.drag_start(DragPayload::palette_for(BlockKind::Text));
        s.drag_over(DropZone::Root, 0.0, &[]);
        s.drop().unwrap();
    });
    assert!(log.at(tracing::Level::WARN, "mailcraft.drag").is_empty());
    assert!(
        log.at(tracing::Level::DEBUG, "mailcraft.drag")
            .iter()
            .any(|e| e.message() == "drop applied")
    );
}

#[test]
fn failed_palette_drop_warns() {
    let log = capture(|| {
        let mut s = session();
        s.drag_start_raw(r#"{"source":"palette","type":"countdown"}"#);
        assert!(s.drop().is_err());
    });
    let warnings = log.at(tracing::Level::WARN, "mailcraft.drag");
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].message(), "drop failed");
    assert!(warnings[0].fields["error"].contains("countdown"));
}

// ============================================================================
// History and session events
// ============================================================================

#[test]
fn history_push_traces_depth() {
    let log = capture(|| {
        let mut s = session();
        s.set_subject("Launch");
        s.set_subject("Launch");
    });
    let traces = log.at(tracing::Level::TRACE, "mailcraft.history");
    let pushed: Vec<_> = traces
        .iter()
        .filter(|e| e.message() == "snapshot pushed")
        .collect();
    assert_eq!(pushed.len(), 1);
    assert_eq!(pushed[0].fields["undo_depth"], "1");
    assert!(
        traces
            .iter()
            .any(|e| e.message() == "push skipped: unchanged snapshot")
    );
}

#[test]
fn session_logs_block_lifecycle() {
    let log = capture(|| {
        let mut s = session();
        let id = s.add_block("spacer").unwrap();
        s.remove_block(&id);
    });
    let messages: Vec<String> = log
        .at(tracing::Level::DEBUG, "mailcraft.session")
        .iter()
        .map(|e| e.message().to_string())
        .collect();
    assert_eq!(messages, vec!["block added", "block removed"]);
}

#[test]
fn every_event_uses_a_mailcraft_target() {
    let log = capture(|| {
        let mut s = session();
        let id = s.add_block("text").unwrap();
        s.add_block("columns").unwrap();
        s.duplicate_block(&id);
        s.drag_start(DragPayload::existing(id));
        s.drag_to_index(DropZone::Root, 3);
        s.drop().unwrap();
        s.undo();
        s.redo();
        s.cancel_drag();
        CancellationSource::new().cancel();
    });
    let events = log.events();
    assert!(!events.is_empty());
    for event in &events {
        assert!(
            event.target.starts_with("mailcraft."),
            "unexpected target {}",
            event.target
        );
    }
}
