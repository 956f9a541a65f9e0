//! Pending action records and the read-only snapshots handed out by queries.

use serde::ser::SerializeMap;
use serde::Serialize;
use serde_json::Value;

/// Timing state of one in-flight named action.
///
/// Timestamps are milliseconds since the Unix epoch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRecord {
    /// When the action was opened.
    pub start: Option<i64>,
    /// When the action was closed.
    pub end: Option<i64>,
    /// Caller payload captured by the most recent start.
    pub start_options: Value,
    /// Caller payload captured at end.
    pub end_options: Value,
}

impl ActionRecord {
    /// The transient record used when an unknown action is ended.
    ///
    /// Never stored in the table.
    #[must_use]
    pub fn ended_at(timestamp: i64) -> Self {
        Self {
            end: Some(timestamp),
            ..Self::default()
        }
    }

    /// Milliseconds between start and end, when both are known.
    ///
    /// Not clamped: a clock that went backwards yields a negative value.
    /// Differences beyond the `i64` range wrap rather than panic.
    #[must_use]
    pub const fn duration(&self) -> Option<i64> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some(end.wrapping_sub(start)),
            _ => None,
        }
    }
}

/// A pending action as reported by a query, tagged with its name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PendingAction {
    pub action: String,
    #[serde(flatten)]
    pub record: ActionRecord,
}

/// Result of [`InteractionTracker::get_pending_actions`](crate::InteractionTracker::get_pending_actions).
///
/// Serializes the way callers of the JavaScript-era API saw it: a single
/// object, an empty object for a name that is not pending, or an array.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingActions {
    /// The requested action is pending.
    One(PendingAction),
    /// The requested action is not pending.
    Empty,
    /// Every pending action, in table order.
    All(Vec<PendingAction>),
}

impl PendingActions {
    /// Returns the single pending action, if this is a hit on a named query.
    #[must_use]
    pub const fn as_one(&self) -> Option<&PendingAction> {
        match self {
            Self::One(pending) => Some(pending),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::One(_) => false,
            Self::Empty => true,
            Self::All(all) => all.is_empty(),
        }
    }
}

impl Serialize for PendingActions {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::One(pending) => pending.serialize(serializer),
            Self::Empty => serializer.serialize_map(Some(0))?.end(),
            Self::All(all) => all.serialize(serializer),
        }
    }
}
