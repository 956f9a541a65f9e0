//! Core logic for the interaction timing recorder.
//!
//! This crate contains:
//! - The tracker: a state machine over named, in-flight UI actions
//! - Event payloads and the option normalization applied to them
//! - The injected seams: log sink, diagnostics channel, clock

mod clock;
mod config;
pub mod event_kind;
mod payload;
mod record;
mod sink;
mod table;
mod tracker;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{DEFAULT_TRACKER_NAME, TrackerConfig};
pub use event_kind::EventKind;
pub use payload::{EventPayload, normalize_options};
pub use record::{ActionRecord, PendingAction, PendingActions};
pub use sink::{Diagnostics, LogSink, SinkError, SinkFailure, TracingDiagnostics, sink_fn};
pub use tracker::InteractionTracker;
