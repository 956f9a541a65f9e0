//! Event kinds handed to the sink.

use serde::Serialize;
use std::fmt;

/// The kind of event handed to a [`LogSink`](crate::LogSink).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// An action was opened. Duration is always zero.
    StartAction,
    /// An action was closed without a known start. Duration is always zero.
    EndAction,
    /// An action was closed after a recorded start.
    Duration,
}

impl EventKind {
    /// Wire representation used by sinks.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::StartAction => "startAction",
            Self::EndAction => "endAction",
            Self::Duration => "duration",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for EventKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}
