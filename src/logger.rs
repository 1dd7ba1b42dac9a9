use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

/// Returns false if another global subscriber was already set.
pub fn init_stderr(level: Level) -> bool {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok()
}

#[derive(Debug, Clone)]
pub struct RecordedEvent {
    pub target: String,
    pub level: Level,
    pub fields: BTreeMap<String, String>,
}

impl RecordedEvent {
    fn new(event: &Event<'_>) -> Self {
        let meta = event.metadata();
        let mut fields = BTreeMap::new();
        event.record(&mut FieldVisitor(&mut fields));

        Self {
            target: meta.target().to_owned(),
            level: *meta.level(),
            fields,
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.fields.get("message").map(String::as_str)
    }
}

struct FieldVisitor<'a>(&'a mut BTreeMap<String, String>);

impl Visit for FieldVisitor<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        self.0.insert(field.name().to_string(), format!("{:?}", value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }
}

#[derive(Debug, Clone)]
pub enum Targets {
    All,
    Prefixed(Vec<String>),
}

#[derive(Debug, Clone)]
pub struct TraceRecorder {
    targets: Targets,
    level: Level,
    events: Arc<Mutex<Vec<RecordedEvent>>>,
}

impl Default for TraceRecorder {
    fn default() -> Self {
        Self {
            targets: Targets::All,
            level: Level::TRACE,
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl TraceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(self, level: Level) -> Self {
        Self { level, ..self }
    }

    pub fn with_targets(self, targets: Targets) -> Self {
        Self { targets, ..self }
    }

    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events.lock().clone()
    }

    pub fn with_message(&self, message: &str) -> Vec<RecordedEvent> {
        self.events
            .lock()
            .iter()
            .filter(|event| event.message() == Some(message))
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }

    fn accepts(&self, event: &RecordedEvent) -> bool {
        // Level ordering puts ERROR lowest
        if event.level > self.level {
            return false;
        }

        match &self.targets {
            Targets::All => true,
            Targets::Prefixed(prefixes) => prefixes
                .iter()
                .any(|prefix| event.target.starts_with(prefix.as_str())),
        }
    }
}

impl<S> Layer<S> for TraceRecorder
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let recorded = RecordedEvent::new(event);
        if self.accepts(&recorded) {
            self.events.lock().push(recorded);
        }
    }
}
