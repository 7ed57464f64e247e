//! Deterministic test harness: plays a scripted sequence of cycle snapshots
//! through the orchestrator with no real clock or socket, standing in for
//! the teacher's DST simulator in scenario tests.

use std::collections::VecDeque;

use radar_env::{CycleSnapshot, MessageSource};

/// A `MessageSource` that replays a fixed, in-process script of snapshots.
///
/// Once exhausted, it keeps replaying the last snapshot (a steady-state
/// continuation) rather than panicking, so tests can call `update` more
/// times than snapshots were scripted.
pub struct ScriptedMessageSource {
    remaining: VecDeque<CycleSnapshot>,
    last: CycleSnapshot,
}

impl ScriptedMessageSource {
    pub fn new(script: Vec<CycleSnapshot>) -> Self {
        let last = script.last().cloned().unwrap_or_default();
        Self {
            remaining: script.into(),
            last,
        }
    }
}

impl MessageSource for ScriptedMessageSource {
    fn poll(&mut self) -> CycleSnapshot {
        match self.remaining.pop_front() {
            Some(snap) => {
                self.last = snap.clone();
                snap
            }
            None => self.last.clone(),
        }
    }
}
