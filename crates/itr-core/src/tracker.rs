//! The interaction tracker: a per-name state machine over pending actions.
//!
//! Each action name moves `absent → pending → absent`. Starting opens (or
//! reopens) a record and emits `startAction`; ending closes it, emits either
//! `duration` or `endAction`, and drops the record. Ending a name that was
//! never started emits `endAction` from a transient record and stores nothing.
//!
//! Sink failures, whether returned errors or panics, are handed to the
//! [`Diagnostics`] channel and never reach the caller.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use serde_json::Value;

use crate::clock::{Clock, SystemClock};
use crate::config::TrackerConfig;
use crate::event_kind::EventKind;
use crate::payload::{EventPayload, normalize_options};
use crate::record::{ActionRecord, PendingAction, PendingActions};
use crate::sink::{Diagnostics, LogSink, SinkError, SinkFailure, TracingDiagnostics};
use crate::table::ActionTable;

/// Records start/end timestamps of named actions and reports them to a sink.
///
/// Construct one per application and pass it by reference to the code that
/// needs it. A disabled tracker ignores every call.
pub struct InteractionTracker {
    table: ActionTable,
    config: TrackerConfig,
    sink: Box<dyn LogSink>,
    clock: Box<dyn Clock>,
    diagnostics: Box<dyn Diagnostics>,
}

impl fmt::Debug for InteractionTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractionTracker")
            .field("config", &self.config)
            .field("pending", &self.table.len())
            .finish_non_exhaustive()
    }
}

impl InteractionTracker {
    /// Creates a tracker using the system clock and `tracing` diagnostics.
    pub fn new(sink: impl LogSink + 'static, config: TrackerConfig) -> Self {
        Self {
            table: ActionTable::default(),
            config,
            sink: Box::new(sink),
            clock: Box::new(SystemClock),
            diagnostics: Box::new(TracingDiagnostics),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: impl Diagnostics + 'static) -> Self {
        self.diagnostics = Box::new(diagnostics);
        self
    }

    pub const fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Opens `name`, or reopens it if already pending (last start wins).
    pub fn start_action(&mut self, name: &str, options: Option<Value>) {
        if !self.config.enabled {
            return;
        }
        let now = self.clock.now_ms();

        let record = self.table.entry(name);
        record.start = Some(now);
        record.start_options = options.unwrap_or_default();
        let payload = EventPayload::from_record(0, record);

        self.emit(name, EventKind::StartAction, &payload);
    }

    /// Closes `name` and reports it.
    ///
    /// A pending action with a start produces a `duration` event. Anything
    /// else produces an `endAction` event with `options` spread over the
    /// payload (non-object options arrive under `data`).
    pub fn end_action(&mut self, name: &str, options: Option<Value>) {
        if !self.config.enabled {
            return;
        }
        let now = self.clock.now_ms();
        let merged = normalize_options(options.as_ref());

        let Some(mut record) = self.table.remove(name) else {
            let payload = EventPayload::from_record(0, &ActionRecord::ended_at(now))
                .with_merged(merged);
            self.emit(name, EventKind::EndAction, &payload);
            return;
        };

        record.end = Some(now);
        record.end_options = options.unwrap_or_default();

        match record.duration() {
            Some(duration) => {
                let payload = EventPayload::from_record(duration, &record);
                self.emit(name, EventKind::Duration, &payload);
            }
            None => {
                let payload = EventPayload::from_record(0, &record).with_merged(merged);
                self.emit(name, EventKind::EndAction, &payload);
            }
        }
    }

    /// Snapshots pending actions.
    ///
    /// Returns `None` when disabled. With a name, a miss is
    /// [`PendingActions::Empty`] rather than `None`.
    pub fn get_pending_actions(&self, name: Option<&str>) -> Option<PendingActions> {
        if !self.config.enabled {
            return None;
        }
        let pending = match name {
            Some(name) => self.table.get(name).map_or(PendingActions::Empty, |record| {
                PendingActions::One(PendingAction {
                    action: name.to_string(),
                    record: record.clone(),
                })
            }),
            None => PendingActions::All(
                self.table
                    .iter()
                    .map(|(action, record)| PendingAction {
                        action: action.to_string(),
                        record: record.clone(),
                    })
                    .collect(),
            ),
        };
        Some(pending)
    }

    /// Drops the listed pending actions, or all of them. Unknown names are ignored.
    pub fn clear_actions(&mut self, names: Option<&[&str]>) {
        if !self.config.enabled {
            return;
        }
        match names {
            Some(names) => {
                for name in names {
                    self.table.remove(name);
                }
            }
            None => self.table.clear(),
        }
    }

    fn emit(&mut self, action: &str, kind: EventKind, payload: &EventPayload) {
        tracing::debug!(
            tracker = %self.config.name,
            action,
            %kind,
            duration = payload.duration,
            "emitting interaction event"
        );

        let sink = &mut self.sink;
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| sink.upload(action, kind, payload)))
            .unwrap_or_else(|panic| Err(SinkError::from_panic(&*panic)));

        if let Err(error) = outcome {
            self.diagnostics.sink_failed(&SinkFailure {
                tracker: &self.config.name,
                action,
                kind,
                error: &error,
            });
        }
    }
}
