//! Event payloads sent to the sink.

use serde::Serialize;
use serde::ser::SerializeMap;
use serde_json::{Map, Value};

use crate::record::ActionRecord;

/// Payload accompanying every sink event.
///
/// The typed fields hold the record as the tracker saw it. `merged` holds
/// caller options spread over the payload on `endAction` events; in the
/// serialized form (and through [`EventPayload::get`]) merged keys win over
/// the typed fields, so a caller passing `{"start": 1}` overrides `start`.
#[derive(Debug, Clone, PartialEq)]
pub struct EventPayload {
    /// Milliseconds between start and end; zero for start and end-only events.
    pub duration: i64,
    pub start: Option<i64>,
    pub end: Option<i64>,
    pub start_options: Value,
    pub end_options: Value,
    /// Normalized caller options spread over the payload.
    pub merged: Map<String, Value>,
}

impl EventPayload {
    pub(crate) fn from_record(duration: i64, record: &ActionRecord) -> Self {
        Self {
            duration,
            start: record.start,
            end: record.end,
            start_options: record.start_options.clone(),
            end_options: record.end_options.clone(),
            merged: Map::new(),
        }
    }

    pub(crate) fn with_merged(mut self, merged: Map<String, Value>) -> Self {
        self.merged = merged;
        self
    }

    fn base_entries(&self) -> [(&'static str, Value); 5] {
        [
            ("duration", Value::from(self.duration)),
            ("start", self.start.map_or(Value::Null, Value::from)),
            ("end", self.end.map_or(Value::Null, Value::from)),
            ("startOptions", self.start_options.clone()),
            ("endOptions", self.end_options.clone()),
        ]
    }

    /// Looks up a key in the serialized view of the payload.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        if let Some(value) = self.merged.get(key) {
            return Some(value.clone());
        }
        self.base_entries()
            .into_iter()
            .find_map(|(name, value)| (name == key).then_some(value))
    }

    /// The serialized view as a JSON value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut map: Map<String, Value> = self
            .base_entries()
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect();
        map.extend(self.merged.clone());
        Value::Object(map)
    }
}

impl Serialize for EventPayload {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let base = self.base_entries();
        let mut map = serializer.serialize_map(None)?;
        for (key, value) in &base {
            // Overridden keys keep their position, as with an object spread.
            match self.merged.get(*key) {
                Some(merged) => map.serialize_entry(key, merged)?,
                None => map.serialize_entry(key, value)?,
            }
        }
        for (key, value) in &self.merged {
            if !base.iter().any(|(name, _)| *name == key.as_str()) {
                map.serialize_entry(key, value)?;
            }
        }
        map.end()
    }
}

/// Normalizes end-action options into the keys merged over the payload.
///
/// A JSON object is merged as-is; any other value is wrapped under `data`.
/// Absent or `null` options merge nothing.
pub fn normalize_options(options: Option<&Value>) -> Map<String, Value> {
    match options {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(fields)) => fields.clone(),
        Some(other) => {
            let mut wrapped = Map::new();
            wrapped.insert("data".to_string(), other.clone());
            wrapped
        }
    }
}
