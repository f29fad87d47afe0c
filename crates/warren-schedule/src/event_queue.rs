//! `EventQueue`: time-ordered queue of pending continuations.
//!
//! # Ordering
//!
//! Entries are keyed by due time in a `BTreeMap`; each key holds a FIFO
//! `VecDeque`, so continuations that fall due at the same instant resume in
//! the order they were scheduled.  That FIFO rule is what makes a process
//! spawned at time `T` run after everything already queued for `T`, but
//! before anything at `T + ε`.
//!
//! # Performance note
//!
//! Agents sleep for whole ticks, so the number of distinct keys is small
//! (a handful of tick boundaries plus fractional factory arrivals).  Removal
//! of a specific entry (used by interrupts) is linear in its bucket.

use std::collections::{BTreeMap, VecDeque};

use warren_core::{AgentId, SimTime};

/// How a sleeping process is woken.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Resume {
    /// The requested sleep elapsed normally.
    Timeout,
    /// Another process cut the sleep short.
    Interrupted,
}

/// One pending continuation: resume process `pid` with `resume`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Wake {
    pub pid:    AgentId,
    pub resume: Resume,
}

/// A priority queue mapping due times → continuations, FIFO within a time.
#[derive(Default, Debug)]
pub struct EventQueue {
    inner: BTreeMap<SimTime, VecDeque<Wake>>,
    /// Cached total entry count for O(1) `len()`.
    total: usize,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue `wake` at `time`, behind anything already due then.
    pub fn push(&mut self, time: SimTime, wake: Wake) {
        self.inner.entry(time).or_default().push_back(wake);
        self.total += 1;
    }

    /// The earliest time with at least one queued continuation.
    pub fn next_time(&self) -> Option<SimTime> {
        self.inner.keys().next().copied()
    }

    /// Remove and return the first continuation due at the earliest time,
    /// provided that time is `<= until`.
    pub fn pop_due(&mut self, until: SimTime) -> Option<(SimTime, Wake)> {
        let mut entry = self.inner.first_entry()?;
        let time = *entry.key();
        if time > until {
            return None;
        }
        let wake = entry.get_mut().pop_front()?;
        if entry.get().is_empty() {
            entry.remove();
        }
        self.total -= 1;
        Some((time, wake))
    }

    /// Remove the entry for `pid` queued at `time`.  Returns `false` if no
    /// such entry exists.
    pub fn remove(&mut self, time: SimTime, pid: AgentId) -> bool {
        let Some(bucket) = self.inner.get_mut(&time) else {
            return false;
        };
        let Some(pos) = bucket.iter().position(|w| w.pid == pid) else {
            return false;
        };
        bucket.remove(pos);
        if bucket.is_empty() {
            self.inner.remove(&time);
        }
        self.total -= 1;
        true
    }

    /// Total number of queued continuations.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of distinct due times currently queued.
    pub fn time_count(&self) -> usize {
        self.inner.len()
    }
}
