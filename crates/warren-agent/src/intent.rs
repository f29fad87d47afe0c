//! Intents: what a life-cycle step asks of the scheduler.

use warren_core::AgentId;

use crate::Process;

/// A request produced by a step function and applied by the simulation
/// loop after the step returns.
///
/// A step that returns no [`Intent::Sleep`] terminates its process.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Suspend the stepping process for this many simulated minutes.
    Sleep(f64),

    /// Register a new process.  The agent it drives is already in the world;
    /// its first wake comes `delay` minutes from now.
    Spawn {
        pid:     AgentId,
        process: Process,
        delay:   f64,
    },

    /// Wake `pid` early with an interruption signal, if it is sleeping.
    Interrupt(AgentId),
}
