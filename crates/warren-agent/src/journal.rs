//! Human-readable event log.
//!
//! Every event goes to `tracing` under the `warren::journal` target.  When
//! recording is switched on the event is also buffered, so a step driver can
//! drain it into its own sink (a console pane, a file, a test assertion).

use std::fmt;

use tracing::{debug, info};
use warren_core::{AgentId, SimTime};

use crate::process::AgentKind;

/// What happened.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum JournalKind {
    MoveToFood,
    BreedStart,
    Consumed,
    Died,
    Decayed,
    Spawned,
}

/// The agent an event originates from, e.g. `Rabbit #12`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AgentTag {
    pub kind: AgentKind,
    pub id:   AgentId,
}

impl fmt::Display for AgentTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {}", self.kind, self.id)
    }
}

/// One buffered log line.
#[derive(Clone, Debug, PartialEq)]
pub struct JournalEvent {
    pub time:    SimTime,
    pub agent:   Option<AgentTag>,
    pub kind:    JournalKind,
    pub message: String,
}

impl fmt::Display for JournalEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.agent {
            Some(tag) => write!(f, "{}: {}\t{}", self.time, tag, self.message),
            None => write!(f, "{}: \t{}", self.time, self.message),
        }
    }
}

/// Switchable event buffer.  Recording is off by default.
#[derive(Debug, Default)]
pub struct Journal {
    recording: bool,
    events:    Vec<JournalEvent>,
}

impl Journal {
    pub fn log_on(&mut self) {
        self.recording = true;
    }

    pub fn log_off(&mut self) {
        self.recording = false;
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Emit an event to `tracing`, and buffer it if recording.
    pub fn record(
        &mut self,
        time:    SimTime,
        agent:   Option<AgentTag>,
        kind:    JournalKind,
        message: String,
    ) {
        let tag = agent.map(|t| t.to_string()).unwrap_or_default();
        match kind {
            JournalKind::MoveToFood | JournalKind::BreedStart => {
                debug!(target: "warren::journal", %time, agent = %tag, ?kind, "{message}");
            }
            _ => {
                info!(target: "warren::journal", %time, agent = %tag, ?kind, "{message}");
            }
        }
        if self.recording {
            self.events.push(JournalEvent { time, agent, kind, message });
        }
    }

    /// Buffered events, oldest first.
    pub fn events(&self) -> &[JournalEvent] {
        &self.events
    }

    /// Take all buffered events.
    pub fn drain(&mut self) -> Vec<JournalEvent> {
        std::mem::take(&mut self.events)
    }
}
