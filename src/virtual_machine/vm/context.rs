use crate::virtual_machine::graph::{Graph, NodeId};
use crate::virtual_machine::io::IoChannel;
use crate::virtual_machine::thread::{Thread, ThreadId};

/// Process-wide state every instruction observes and mutates.
///
/// Created when a program is loaded and kept for the lifetime of the VM, so a
/// paused run resumes against exactly the graph, IO position and thread ids it
/// left behind.
pub struct ExecContext {
    /// Node registry and adjacency.
    pub graph: Graph,
    /// Input consumed and output produced through the IO node.
    pub io: IoChannel,
    /// Set by `BREAKPOINT`, honored once the current step finishes.
    pub paused: bool,
    /// Threads created during the current step, joined to the thread set after it.
    pub(super) spawned: Vec<Thread>,
    next_thread_id: ThreadId,
}

impl ExecContext {
    pub fn new(graph: Graph, io: IoChannel) -> Self {
        Self {
            graph,
            io,
            paused: false,
            spawned: Vec::new(),
            next_thread_id: 0,
        }
    }

    /// Allocates a thread if both endpoints exist.
    pub(super) fn new_thread(&mut self, start: NodeId, destination: NodeId) -> Option<Thread> {
        if !self.graph.contains(start) || !self.graph.contains(destination) {
            return None;
        }
        let id = self.next_thread_id;
        self.next_thread_id += 1;
        Some(Thread::new(id, start, destination))
    }

    /// Queues a thread that becomes active on the next step.
    pub(super) fn spawn(&mut self, start: NodeId, destination: NodeId) -> Option<ThreadId> {
        let thread = self.new_thread(start, destination)?;
        let id = thread.id;
        self.spawned.push(thread);
        Some(id)
    }
}
