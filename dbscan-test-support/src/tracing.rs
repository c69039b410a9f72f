//! Recording layer utilities for capturing spans and events in tests.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id, Record};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;

/// Layer installed during tests to capture closed spans and emitted events.
///
/// Clones share the same storage, so a test keeps one handle while the
/// subscriber owns another.
#[derive(Clone, Default)]
pub struct RecordingLayer {
    spans: Arc<Mutex<Vec<SpanRecord>>>,
    events: Arc<Mutex<Vec<EventRecord>>>,
}

impl RecordingLayer {
    /// Returns a snapshot of the closed spans in completion order.
    ///
    /// # Examples
    /// ```
    /// use dbscan_test_support::tracing::RecordingLayer;
    ///
    /// let layer = RecordingLayer::default();
    /// assert!(layer.spans().is_empty());
    /// ```
    #[must_use]
    pub fn spans(&self) -> Vec<SpanRecord> {
        lock(&self.spans).clone()
    }

    /// Returns a snapshot of the emitted events in emission order.
    ///
    /// # Examples
    /// ```
    /// use dbscan_test_support::tracing::RecordingLayer;
    ///
    /// let layer = RecordingLayer::default();
    /// assert!(layer.events().is_empty());
    /// ```
    #[must_use]
    pub fn events(&self) -> Vec<EventRecord> {
        lock(&self.events).clone()
    }

    /// Returns the first closed span called `name`.
    #[must_use]
    pub fn span_named(&self, name: &str) -> Option<SpanRecord> {
        lock(&self.spans)
            .iter()
            .find(|span| span.name == name)
            .cloned()
    }

    /// Returns the first event whose `message` field equals `message`.
    #[must_use]
    pub fn event_with_message(&self, message: &str) -> Option<EventRecord> {
        lock(&self.events)
            .iter()
            .find(|event| event.message() == Some(message))
            .cloned()
    }
}

// A panicking test may poison the lock; later snapshots still see the data.
fn lock<T>(records: &Mutex<T>) -> MutexGuard<'_, T> {
    records.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Snapshot of a closed span and the fields recorded against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanRecord {
    /// Span name captured from the tracing metadata.
    pub name: String,
    /// Fields recorded at creation or later through `Span::record`.
    pub fields: HashMap<String, String>,
}

impl SpanRecord {
    /// Returns the rendered value of `field`, if it was recorded.
    #[must_use]
    pub fn field(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }
}

/// Snapshot of an emitted event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    /// Level the event was emitted at.
    pub level: Level,
    /// Event target string extracted from the metadata.
    pub target: String,
    /// Structured fields, including `message`.
    pub fields: HashMap<String, String>,
}

impl EventRecord {
    /// Returns the event's formatted message.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.field("message")
    }

    /// Returns the rendered value of `field`, if present.
    #[must_use]
    pub fn field(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }
}

struct SpanData {
    name: String,
    fields: HashMap<String, String>,
}

impl<S> Layer<S> for RecordingLayer
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut fields = HashMap::new();
        attrs.record(&mut FieldRecorder(&mut fields));
        span.extensions_mut().insert(SpanData {
            name: attrs.metadata().name().to_owned(),
            fields,
        });
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        if let Some(data) = span.extensions_mut().get_mut::<SpanData>() {
            values.record(&mut FieldRecorder(&mut data.fields));
        }
    }

    fn on_close(&self, id: Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(&id) else {
            return;
        };
        let Some(data) = span.extensions_mut().remove::<SpanData>() else {
            return;
        };
        lock(&self.spans).push(SpanRecord {
            name: data.name,
            fields: data.fields,
        });
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = HashMap::new();
        event.record(&mut FieldRecorder(&mut fields));
        lock(&self.events).push(EventRecord {
            level: *event.metadata().level(),
            target: event.metadata().target().to_owned(),
            fields,
        });
    }
}

struct FieldRecorder<'a>(&'a mut HashMap<String, String>);

impl FieldRecorder<'_> {
    fn insert(&mut self, field: &Field, value: String) {
        self.0.insert(field.name().to_owned(), value);
    }
}

impl Visit for FieldRecorder<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.insert(field, format!("{value:?}"));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert(field, value.to_owned());
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.insert(field, value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, value.to_string());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field, value.to_string());
    }
}
