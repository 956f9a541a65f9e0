//! Injected collaborators: the log sink and the diagnostics channel.

use std::any::Any;

use thiserror::Error;

use crate::event_kind::EventKind;
use crate::payload::EventPayload;

/// Errors a sink may report.
///
/// These never reach callers of the tracker; they are handed to
/// [`Diagnostics`] instead.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The sink refused the event.
    #[error("sink rejected event: {message}")]
    Rejected { message: String },
    /// The sink's downstream transport failed.
    #[error("sink transport failed: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// The sink panicked while handling the event.
    #[error("sink panicked: {message}")]
    Panicked { message: String },
}

impl SinkError {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    pub(crate) fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(ToString::to_string)
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        Self::Panicked { message }
    }
}

/// Receives every event the tracker emits, synchronously.
pub trait LogSink {
    fn upload(
        &mut self,
        action: &str,
        kind: EventKind,
        payload: &EventPayload,
    ) -> Result<(), SinkError>;
}

impl<F> LogSink for F
where
    F: FnMut(&str, EventKind, &EventPayload) -> Result<(), SinkError>,
{
    fn upload(
        &mut self,
        action: &str,
        kind: EventKind,
        payload: &EventPayload,
    ) -> Result<(), SinkError> {
        self(action, kind, payload)
    }
}

/// Pins a closure to the [`LogSink`] signature so its argument types infer.
pub const fn sink_fn<F>(f: F) -> F
where
    F: FnMut(&str, EventKind, &EventPayload) -> Result<(), SinkError>,
{
    f
}

/// A sink failure as reported to [`Diagnostics`].
#[derive(Debug)]
pub struct SinkFailure<'a> {
    /// Configured name of the tracker that dispatched the event.
    pub tracker: &'a str,
    pub action: &'a str,
    pub kind: EventKind,
    pub error: &'a SinkError,
}

/// Operator-visible channel for failures the tracker swallows.
pub trait Diagnostics {
    fn sink_failed(&mut self, failure: &SinkFailure<'_>);
}

/// Reports sink failures through `tracing` at error level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn sink_failed(&mut self, failure: &SinkFailure<'_>) {
        tracing::error!(
            tracker = failure.tracker,
            action = failure.action,
            kind = %failure.kind,
            error = %failure.error,
            "failed to upload interaction event"
        );
    }
}
