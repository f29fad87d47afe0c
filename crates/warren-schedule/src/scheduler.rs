//! `Scheduler`: the simulated clock plus the continuation queue.
//!
//! Every live process has at most one pending wake.  A process suspends by
//! asking for `schedule_after(pid, duration)` and terminates by asking for
//! nothing; the scheduler never resumes a process it holds no wake for.

use std::collections::HashMap;

use tracing::trace;
use warren_core::{AgentId, SimTime};

use crate::event_queue::{EventQueue, Resume, Wake};
use crate::{ScheduleError, ScheduleResult};

/// Cooperative discrete-event clock.
#[derive(Default, Debug)]
pub struct Scheduler {
    now:     SimTime,
    queue:   EventQueue,
    /// Due time of each process's single pending wake.
    pending: HashMap<AgentId, SimTime>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulated time.
    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Resume `pid` once the clock has advanced by `duration`.
    ///
    /// A zero duration queues the process behind everything already due at
    /// `now`.  Returns the due time.
    pub fn schedule_after(&mut self, pid: AgentId, duration: f64) -> ScheduleResult<SimTime> {
        if !(duration.is_finite() && duration >= 0.0) {
            return Err(ScheduleError::InvalidDuration { pid, duration });
        }
        self.schedule_at(pid, self.now.after(duration))
    }

    /// Resume `pid` at absolute time `at`, which must not be in the past.
    pub fn schedule_at(&mut self, pid: AgentId, at: SimTime) -> ScheduleResult<SimTime> {
        if at < self.now {
            return Err(ScheduleError::TimeTravel { pid, at, now: self.now });
        }
        if let Some(&due) = self.pending.get(&pid) {
            return Err(ScheduleError::AlreadyScheduled { pid, due });
        }
        trace!(%pid, %at, "schedule");
        self.queue.push(at, Wake { pid, resume: Resume::Timeout });
        self.pending.insert(pid, at);
        Ok(at)
    }

    /// Wake a sleeping process now, flagged [`Resume::Interrupted`].
    ///
    /// The pending timeout is cancelled.  Returns `false`, and does
    /// nothing, if `pid` has no pending wake.
    pub fn interrupt(&mut self, pid: AgentId) -> bool {
        let Some(due) = self.pending.get(&pid).copied() else {
            return false;
        };
        self.queue.remove(due, pid);
        trace!(%pid, now = %self.now, "interrupt");
        self.queue.push(self.now, Wake { pid, resume: Resume::Interrupted });
        self.pending.insert(pid, self.now);
        true
    }

    /// Drop `pid`'s pending wake, if any.  Returns whether one existed.
    pub fn cancel(&mut self, pid: AgentId) -> bool {
        match self.pending.remove(&pid) {
            Some(due) => self.queue.remove(due, pid),
            None => false,
        }
    }

    /// Pop the earliest continuation due at or before `until`, advancing
    /// `now` to its due time.
    pub fn pop_next(&mut self, until: SimTime) -> Option<Wake> {
        let (time, wake) = self.queue.pop_due(until)?;
        self.pending.remove(&wake.pid);
        self.now = time;
        trace!(pid = %wake.pid, now = %time, resume = ?wake.resume, "resume");
        Some(wake)
    }

    /// Move the clock forward to `to` without resuming anything.
    ///
    /// Fails if a continuation is due before `to` (it would be skipped) or
    /// if `to` is in the past.
    pub fn advance_to(&mut self, to: SimTime) -> ScheduleResult<()> {
        if to < self.now {
            return Err(ScheduleError::ClockRewind { to, now: self.now });
        }
        if let Some(next) = self.queue.next_time() {
            if next < to {
                return Err(ScheduleError::SkippedEvent { next, to });
            }
        }
        self.now = to;
        Ok(())
    }

    /// Due time of the next continuation, or `None` when quiescent.
    pub fn peek_time(&self) -> Option<SimTime> {
        self.queue.next_time()
    }

    /// `true` if `pid` is sleeping with a pending wake.
    pub fn is_pending(&self, pid: AgentId) -> bool {
        self.pending.contains_key(&pid)
    }

    /// Number of queued continuations.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// `true` when nothing is left to resume.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
