//! Seeker threads: an instruction pointer walking toward its own destination.

use crate::virtual_machine::graph::{NodeId, Value};

/// Thread identity. Allocated in increasing order and never reused.
pub type ThreadId = u64;

/// Outcome of advancing a thread by one step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThreadState {
    /// Moved one hop toward its destination.
    Running,
    /// No path to the destination right now; re-checked every step.
    Stalled,
    /// Reached its destination and left the thread set.
    Terminated,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Thread {
    pub(crate) id: ThreadId,
    pub(crate) current: NodeId,
    pub(crate) destination: NodeId,
    /// Values accumulated toward the next instruction, opcode first.
    pub(crate) stack: Vec<Value>,
    pub(crate) stalled: bool,
}

impl Thread {
    pub(crate) fn new(id: ThreadId, start: NodeId, destination: NodeId) -> Self {
        Self {
            id,
            current: start,
            destination,
            stack: Vec::new(),
            stalled: false,
        }
    }

    pub fn id(&self) -> ThreadId {
        self.id
    }

    pub fn current(&self) -> NodeId {
        self.current
    }

    pub fn destination(&self) -> NodeId {
        self.destination
    }

    pub fn stack(&self) -> &[Value] {
        &self.stack
    }

    pub fn is_stalled(&self) -> bool {
        self.stalled
    }

    pub fn has_arrived(&self) -> bool {
        self.current == self.destination
    }
}
