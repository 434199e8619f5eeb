//! Opcode execution.
//!
//! Handlers are methods on [`ExecContext`] taking the executing thread plus the
//! decoded arguments. Every handler treats a reference to a missing node as a
//! no-op, so a malformed program degrades to inertness instead of failing.

use super::context::ExecContext;
use crate::trace;
use crate::virtual_machine::config::Config;
use crate::virtual_machine::errors::DecodeError;
use crate::virtual_machine::graph::{NodeId, Value};
use crate::virtual_machine::io::IO_NODE;
use crate::virtual_machine::isa::{Opcode, decode};
use crate::virtual_machine::thread::Thread;

macro_rules! exec_opcode {
    (
        ctx = $ctx:ident,
        thread = $thread:ident,
        opcode = $opcode:ident,
        args = $args:ident,
        { $( $variant:ident => $handler:ident ( $( $arg:ident ),* ) ),* $(,)? }
    ) => {{
        match $opcode {
            $(
                Opcode::$variant => {
                    let [ $( $arg ),* ] = *$args else {
                        return;
                    };
                    $ctx.$handler($thread $( , $arg )*)
                }
            ),*
        }
    }};
}

impl ExecContext {
    /// Pushes the value under `thread` and runs the instruction it completes.
    ///
    /// A completed instruction and an unknown leading value both clear the
    /// stack; a known opcode still short of arguments keeps accumulating.
    pub(super) fn accumulate(&mut self, thread: &mut Thread, config: &Config) {
        let Some(value) = self.graph.value(thread.current) else {
            return;
        };
        thread.stack.push(value);

        match decode(&thread.stack, config.extended) {
            Ok(opcode) => {
                let stack = std::mem::take(&mut thread.stack);
                let args = &stack[1..];
                if config.verbose {
                    let rendered: Vec<String> = args.iter().map(Value::to_string).collect();
                    trace!(
                        "thread {} executing {}({})",
                        thread.id,
                        opcode,
                        rendered.join(" ")
                    );
                }
                self.execute(opcode, thread, args);
            }
            Err(DecodeError::Pending { .. }) => {}
            Err(err) => {
                if config.verbose {
                    trace!("thread {} discards stack {:?}: {}", thread.id, thread.stack, err);
                }
                thread.stack.clear();
            }
        }
    }

    /// Applies a decoded instruction. `args` must hold exactly `opcode.arity()` values.
    pub(super) fn execute(&mut self, opcode: Opcode, thread: &mut Thread, args: &[Value]) {
        exec_opcode! {
            ctx = self,
            thread = thread,
            opcode = opcode,
            args = args,
            {
                SetDestination => op_set_destination(node),
                SetConnection => op_set_connection(a, b, flag),
                ChangeNode => op_change_node(node, flag),
                Increment => op_increment(node),
                Decrement => op_decrement(node),
                Copy => op_copy(from, to),
                CreateThread => op_create_thread(start, destination),
                Breakpoint => op_breakpoint(),
            }
        }
    }

    fn op_set_destination(&mut self, thread: &mut Thread, node: NodeId) {
        if self.graph.contains(node) {
            thread.destination = node;
        }
    }

    fn op_set_connection(&mut self, _thread: &mut Thread, a: NodeId, b: NodeId, flag: Value) {
        if flag <= 0 {
            self.graph.disconnect(a, b);
        } else {
            self.graph.connect(a, b);
        }
    }

    // The IO node is deliberately not protected here.
    fn op_change_node(&mut self, _thread: &mut Thread, node: NodeId, flag: Value) {
        if flag <= 0 {
            self.graph.destroy(node);
        } else {
            self.graph.create(node);
        }
    }

    fn op_increment(&mut self, _thread: &mut Thread, node: NodeId) {
        self.graph.adjust_value(node, 1);
    }

    fn op_decrement(&mut self, _thread: &mut Thread, node: NodeId) {
        self.graph.adjust_value(node, -1);
    }

    /// Copies `from` into `to`. Reading the IO node consumes input, writing it
    /// produces output, so one copy can move an input byte straight to output.
    fn op_copy(&mut self, _thread: &mut Thread, from: NodeId, to: NodeId) {
        if !self.graph.contains(from) || !self.graph.contains(to) {
            return;
        }
        let value = if from == IO_NODE {
            self.io.read()
        } else {
            match self.graph.value(from) {
                Some(value) => value,
                None => return,
            }
        };
        if to == IO_NODE {
            self.io.write(value);
        } else {
            self.graph.set_value(to, value);
        }
    }

    fn op_create_thread(&mut self, _thread: &mut Thread, start: NodeId, destination: NodeId) {
        self.spawn(start, destination);
    }

    fn op_breakpoint(&mut self, _thread: &mut Thread) {
        self.paused = true;
    }
}
