//! Replay command: drives a tracker from a JSONL script of operations.
//!
//! Each input line is one operation:
//!
//! ```text
//! {"op":"start","action":"submit","options":{"form":"signup"},"at":1000}
//! {"op":"end","action":"submit","at":1420}
//! {"op":"pending","action":"submit"}
//! {"op":"clear","actions":["a","b"]}
//! ```
//!
//! `at` pins the clock (epoch milliseconds) for that operation; without it
//! the wall clock is used. Every sink event is written as one JSON line, as
//! is the result of every `pending` query.

use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::rc::Rc;

use anyhow::{Context, Result};
use itr_core::{
    Clock, EventKind, EventPayload, InteractionTracker, ManualClock, PendingActions, SystemClock,
    TrackerConfig, sink_fn,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single scripted tracker operation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    Start {
        action: String,
        #[serde(default)]
        options: Option<Value>,
        #[serde(default)]
        at: Option<i64>,
    },
    End {
        action: String,
        #[serde(default)]
        options: Option<Value>,
        #[serde(default)]
        at: Option<i64>,
    },
    Pending {
        #[serde(default)]
        action: Option<String>,
    },
    Clear {
        #[serde(default)]
        actions: Option<Vec<String>>,
    },
}

/// One event as the sink received it.
#[derive(Debug, Clone, Serialize)]
struct EmittedEvent {
    action: String,
    kind: EventKind,
    payload: EventPayload,
}

#[derive(Debug, Serialize)]
struct PendingOutput {
    pending: Option<PendingActions>,
}

/// Counts reported after a replay.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplayStats {
    pub operations: usize,
    pub events: usize,
}

/// Runs the replay command, reading operations from `reader`.
pub fn run<R: BufRead, W: Write>(
    reader: R,
    writer: &mut W,
    config: TrackerConfig,
) -> Result<ReplayStats> {
    let emitted = Rc::new(RefCell::new(Vec::<EmittedEvent>::new()));
    let sink = {
        let emitted = Rc::clone(&emitted);
        sink_fn(move |action, kind, payload| {
            emitted.borrow_mut().push(EmittedEvent {
                action: action.to_string(),
                kind,
                payload: payload.clone(),
            });
            Ok(())
        })
    };
    let clock = ManualClock::default();
    let mut tracker = InteractionTracker::new(sink, config).with_clock(clock.clone());
    let mut stats = ReplayStats::default();

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.with_context(|| format!("failed to read line {line_no}"))?;
        if line.trim().is_empty() {
            continue;
        }
        let operation: Operation = serde_json::from_str(&line)
            .with_context(|| format!("invalid operation on line {line_no}"))?;

        if let Some(output) = apply(&mut tracker, &clock, operation) {
            writeln!(writer, "{}", serde_json::to_string(&output)?)?;
        }
        stats.operations += 1;

        for event in emitted.borrow_mut().drain(..) {
            writeln!(writer, "{}", serde_json::to_string(&event)?)?;
            stats.events += 1;
        }
    }

    tracing::debug!(
        operations = stats.operations,
        events = stats.events,
        "replay finished"
    );
    Ok(stats)
}

fn apply(
    tracker: &mut InteractionTracker,
    clock: &ManualClock,
    operation: Operation,
) -> Option<PendingOutput> {
    match operation {
        Operation::Start {
            action,
            options,
            at,
        } => {
            clock.set(at.unwrap_or_else(|| SystemClock.now_ms()));
            tracker.start_action(&action, options);
            None
        }
        Operation::End {
            action,
            options,
            at,
        } => {
            clock.set(at.unwrap_or_else(|| SystemClock.now_ms()));
            tracker.end_action(&action, options);
            None
        }
        Operation::Pending { action } => Some(PendingOutput {
            pending: tracker.get_pending_actions(action.as_deref()),
        }),
        Operation::Clear { actions } => {
            let names: Option<Vec<&str>> = actions
                .as_ref()
                .map(|actions| actions.iter().map(String::as_str).collect());
            tracker.clear_actions(names.as_deref());
            None
        }
    }
}
