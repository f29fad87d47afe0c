use thiserror::Error;
use warren_core::{AgentId, SimTime};

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("{pid} asked to sleep for invalid duration {duration}")]
    InvalidDuration { pid: AgentId, duration: f64 },

    #[error("{pid} asked to wake at {at}, before now ({now})")]
    TimeTravel { pid: AgentId, at: SimTime, now: SimTime },

    #[error("{pid} already has a wake pending at {due}")]
    AlreadyScheduled { pid: AgentId, due: SimTime },

    #[error("cannot rewind clock from {now} to {to}")]
    ClockRewind { to: SimTime, now: SimTime },

    #[error("advancing to {to} would skip a continuation due at {next}")]
    SkippedEvent { next: SimTime, to: SimTime },
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
