//! Unit tests for warren-schedule.

use warren_core::{AgentId, SimTime};

use crate::{EventQueue, Resume, ScheduleError, Scheduler, Wake};

fn t(minutes: f64) -> SimTime {
    SimTime::new(minutes).unwrap()
}

fn wake(pid: u64) -> Wake {
    Wake { pid: AgentId(pid), resume: Resume::Timeout }
}

// ── EventQueue ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod event_queue {
    use super::*;

    #[test]
    fn pops_in_time_order() {
        let mut q = EventQueue::new();
        q.push(t(3.0), wake(3));
        q.push(t(1.0), wake(1));
        q.push(t(2.0), wake(2));
        let order: Vec<u64> = std::iter::from_fn(|| q.pop_due(t(10.0)))
            .map(|(_, w)| w.pid.0)
            .collect();
        assert_eq!(order, vec![1, 2, 3]);
        assert!(q.is_empty());
    }

    #[test]
    fn fifo_within_same_time() {
        let mut q = EventQueue::new();
        for pid in [5, 2, 9, 1] {
            q.push(t(1.0), wake(pid));
        }
        let order: Vec<u64> = std::iter::from_fn(|| q.pop_due(t(1.0)))
            .map(|(_, w)| w.pid.0)
            .collect();
        assert_eq!(order, vec![5, 2, 9, 1]);
    }

    #[test]
    fn pop_respects_until() {
        let mut q = EventQueue::new();
        q.push(t(2.5), wake(1));
        assert!(q.pop_due(t(2.0)).is_none());
        assert_eq!(q.len(), 1);
        assert_eq!(q.pop_due(t(2.5)).map(|(time, _)| time), Some(t(2.5)));
    }

    #[test]
    fn remove_specific_entry() {
        let mut q = EventQueue::new();
        q.push(t(1.0), wake(1));
        q.push(t(1.0), wake(2));
        assert!(q.remove(t(1.0), AgentId(1)));
        assert!(!q.remove(t(1.0), AgentId(1)));
        assert_eq!(q.len(), 1);
        assert_eq!(q.time_count(), 1);
        assert!(q.remove(t(1.0), AgentId(2)));
        assert_eq!(q.time_count(), 0);
    }
}

// ── Scheduler ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scheduler {
    use super::*;

    #[test]
    fn pop_advances_clock_to_due_time() {
        let mut s = Scheduler::new();
        s.schedule_after(AgentId(0), 1.5).unwrap();
        assert_eq!(s.now(), SimTime::ZERO);
        let w = s.pop_next(t(10.0)).unwrap();
        assert_eq!(w, wake(0));
        assert_eq!(s.now(), t(1.5));
        assert!(s.is_empty());
    }

    #[test]
    fn never_advances_past_until() {
        let mut s = Scheduler::new();
        s.schedule_after(AgentId(0), 5.0).unwrap();
        assert!(s.pop_next(t(4.0)).is_none());
        assert_eq!(s.now(), SimTime::ZERO);
        s.advance_to(t(4.0)).unwrap();
        assert_eq!(s.now(), t(4.0));
    }

    #[test]
    fn advance_refuses_to_skip_events() {
        let mut s = Scheduler::new();
        s.schedule_after(AgentId(0), 1.0).unwrap();
        assert!(matches!(s.advance_to(t(2.0)), Err(ScheduleError::SkippedEvent { .. })));
    }

    #[test]
    fn zero_delay_runs_after_already_queued_same_time() {
        let mut s = Scheduler::new();
        s.schedule_after(AgentId(0), 1.0).unwrap();
        s.schedule_after(AgentId(1), 1.0).unwrap();
        assert_eq!(s.pop_next(t(1.0)).unwrap().pid, AgentId(0));
        // Process 0 spawns process 2 "now" (t = 1.0).
        s.schedule_after(AgentId(2), 0.0).unwrap();
        assert_eq!(s.pop_next(t(1.0)).unwrap().pid, AgentId(1));
        assert_eq!(s.pop_next(t(1.0)).unwrap().pid, AgentId(2));
        assert_eq!(s.now(), t(1.0));
    }

    #[test]
    fn invalid_durations_rejected() {
        let mut s = Scheduler::new();
        assert!(matches!(
            s.schedule_after(AgentId(0), -1.0),
            Err(ScheduleError::InvalidDuration { .. })
        ));
        assert!(s.schedule_after(AgentId(0), f64::NAN).is_err());
        assert!(s.schedule_after(AgentId(0), f64::INFINITY).is_err());
        assert!(s.is_empty());
    }

    #[test]
    fn one_pending_wake_per_process() {
        let mut s = Scheduler::new();
        s.schedule_after(AgentId(0), 1.0).unwrap();
        assert!(matches!(
            s.schedule_after(AgentId(0), 2.0),
            Err(ScheduleError::AlreadyScheduled { .. })
        ));
    }

    #[test]
    fn schedule_in_past_is_time_travel() {
        let mut s = Scheduler::new();
        s.advance_to(t(5.0)).unwrap();
        assert!(matches!(
            s.schedule_at(AgentId(0), t(4.0)),
            Err(ScheduleError::TimeTravel { .. })
        ));
    }

    #[test]
    fn interrupt_wakes_early_and_cancels_timeout() {
        let mut s = Scheduler::new();
        s.schedule_after(AgentId(0), 10.0).unwrap();
        s.schedule_after(AgentId(1), 1.0).unwrap();
        assert_eq!(s.pop_next(t(100.0)).unwrap().pid, AgentId(1));

        assert!(s.interrupt(AgentId(0)));
        let w = s.pop_next(t(100.0)).unwrap();
        assert_eq!(w, Wake { pid: AgentId(0), resume: Resume::Interrupted });
        assert_eq!(s.now(), t(1.0));
        // The original t = 10 timeout is gone.
        assert!(s.is_empty());
    }

    #[test]
    fn interrupt_of_idle_process_is_noop() {
        let mut s = Scheduler::new();
        assert!(!s.interrupt(AgentId(3)));
        assert!(s.is_empty());
    }

    #[test]
    fn cancel_removes_pending_wake() {
        let mut s = Scheduler::new();
        s.schedule_after(AgentId(0), 1.0).unwrap();
        assert!(s.is_pending(AgentId(0)));
        assert!(s.cancel(AgentId(0)));
        assert!(!s.is_pending(AgentId(0)));
        assert!(s.pop_next(t(5.0)).is_none());
        assert!(!s.cancel(AgentId(0)));
    }

    #[test]
    fn process_can_reschedule_after_resume() {
        let mut s = Scheduler::new();
        s.schedule_after(AgentId(0), 1.0).unwrap();
        s.pop_next(t(10.0)).unwrap();
        s.schedule_after(AgentId(0), 1.0).unwrap();
        s.pop_next(t(10.0)).unwrap();
        assert_eq!(s.now(), t(2.0));
    }
}
