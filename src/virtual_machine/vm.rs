//! Thread scheduler.
//!
//! The VM advances every thread once per global step, in creation order,
//! against the live graph. Each thread first accumulates the value under it
//! (possibly executing an instruction), then either terminates at its
//! destination, stalls without a route, or moves one hop along a freshly
//! computed shortest route. Everything happens synchronously inside the step,
//! so an earlier thread's mutation is visible to later threads in the same step.

mod context;
mod engine;

use crate::trace;
use crate::virtual_machine::config::Config;
use crate::virtual_machine::errors::LoadWarning;
use crate::virtual_machine::graph::{Graph, NodeId};
use crate::virtual_machine::io::{IO_NODE, IoChannel};
use crate::virtual_machine::program::Program;
use crate::virtual_machine::router::find_route;
use crate::virtual_machine::thread::{Thread, ThreadId, ThreadState};
use context::ExecContext;

/// Destination of the thread created at load time.
pub const FIRST_DESTINATION: NodeId = 1;

/// Why [`VM::run`] returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// No thread is running any more.
    Halted,
    /// A `BREAKPOINT` paused the loop; calling [`VM::run`] again resumes it.
    Paused,
}

/// Seeker virtual machine.
pub struct VM {
    ctx: ExecContext,
    /// Active threads in creation order.
    threads: Vec<Thread>,
    config: Config,
    warnings: Vec<LoadWarning>,
}

impl VM {
    /// Creates a VM for `program`.
    ///
    /// The initial thread runs from the IO node to node 1 and only exists if
    /// both nodes are defined; otherwise the VM starts (and stays) idle.
    pub fn new(program: Program, config: Config, io: IoChannel) -> Self {
        let Program { graph, warnings } = program;
        let mut ctx = ExecContext::new(graph, io);
        let threads = ctx
            .new_thread(IO_NODE, FIRST_DESTINATION)
            .into_iter()
            .collect();

        Self {
            ctx,
            threads,
            config,
            warnings,
        }
    }

    /// Runs steps until no thread is running or a breakpoint pauses the loop.
    ///
    /// Clears the pause flag on entry, so calling it after [`RunOutcome::Paused`]
    /// resumes from the exact state the previous call left.
    pub fn run(&mut self) -> RunOutcome {
        self.ctx.paused = false;
        while self.step() {}

        if self.ctx.paused {
            if self.config.verbose {
                trace!("program paused");
            }
            RunOutcome::Paused
        } else {
            if self.config.verbose {
                trace!("program terminated, no active threads left");
            }
            RunOutcome::Halted
        }
    }

    /// Executes one global step and reports whether there is more work.
    ///
    /// Only threads present when the step starts take part; threads spawned
    /// during the step join the set afterwards.
    pub fn step(&mut self) -> bool {
        if self.ctx.paused || !self.has_running_threads() {
            return false;
        }

        let mut index = 0;
        let mut end = self.threads.len();
        while index < end {
            match self.advance(index) {
                ThreadState::Terminated => {
                    self.threads.remove(index);
                    end -= 1;
                }
                ThreadState::Running | ThreadState::Stalled => index += 1,
            }
        }
        self.threads.append(&mut self.ctx.spawned);

        self.has_running_threads() && !self.ctx.paused
    }

    /// Advances the thread at `index` by one step.
    fn advance(&mut self, index: usize) -> ThreadState {
        let Self {
            ctx,
            threads,
            config,
            ..
        } = self;
        let thread = &mut threads[index];

        if !thread.stalled {
            ctx.accumulate(thread, config);
        }

        if thread.has_arrived() {
            if config.verbose {
                trace!("thread {} is terminated", thread.id);
            }
            return ThreadState::Terminated;
        }

        let next_hop = find_route(&ctx.graph, thread.current, thread.destination)
            .and_then(|route| route.first().copied());
        match next_hop {
            Some(next) => {
                if config.verbose {
                    trace!("thread {} is moving to node {}", thread.id, next);
                }
                thread.stalled = false;
                thread.current = next;
                ThreadState::Running
            }
            None => {
                if config.verbose {
                    trace!("thread {} is stalled", thread.id);
                }
                thread.stalled = true;
                ThreadState::Stalled
            }
        }
    }

    /// Adds a thread between steps. Returns `None` unless both nodes exist.
    pub fn spawn_thread(&mut self, start: NodeId, destination: NodeId) -> Option<ThreadId> {
        let thread = self.ctx.new_thread(start, destination)?;
        let id = thread.id;
        self.threads.push(thread);
        Some(id)
    }

    pub fn has_running_threads(&self) -> bool {
        self.threads.iter().any(|thread| !thread.stalled)
    }

    pub fn is_paused(&self) -> bool {
        self.ctx.paused
    }

    pub fn threads(&self) -> &[Thread] {
        &self.threads
    }

    pub fn graph(&self) -> &Graph {
        &self.ctx.graph
    }

    pub fn io(&self) -> &IoChannel {
        &self.ctx.io
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Problems reported while loading the program.
    pub fn warnings(&self) -> &[LoadWarning] {
        &self.warnings
    }
}
