//! Agent identity.
//!
//! Every agent (rabbits, food, factories, and the census collector) draws its
//! id from one monotonic counter owned by the world, so ids are never reused
//! within a run.  `AgentId` doubles as the scheduler's process handle: an
//! agent's life-cycle is addressed by the id of the agent that owns it.

use std::fmt;

/// Process-unique, monotonically assigned agent identifier, displayed `#12`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, serde::Serialize)]
pub struct AgentId(pub u64);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<AgentId> for u64 {
    #[inline(always)]
    fn from(id: AgentId) -> u64 {
        id.0
    }
}

// ── IdAllocator ───────────────────────────────────────────────────────────────

/// Hands out `AgentId`s in strictly increasing order, starting from 0.
#[derive(Debug, Default, Clone)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the next unused id.
    #[inline]
    pub fn allocate(&mut self) -> AgentId {
        let id = AgentId(self.next);
        self.next += 1;
        id
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> u64 {
        self.next
    }
}
