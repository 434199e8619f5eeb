use crate::virtual_machine::graph::{NodeId, Value};
use crate::virtual_machine::isa::Opcode;
use seeker_derive::Error;

/// Failures outside the step loop: reading programs and input, writing output.
#[derive(Debug, Error)]
pub enum VMError {
    /// Program file could not be read.
    #[error("cannot read program {path}: {reason}")]
    ReadProgram { path: String, reason: String },
    /// Input file could not be read.
    #[error("cannot read input {path}: {reason}")]
    ReadInput { path: String, reason: String },
    /// Output file could not be written.
    #[error("cannot write output {path}: {reason}")]
    WriteOutput { path: String, reason: String },
}

/// Non-fatal problems found while loading program text.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LoadWarning {
    /// A connection whose endpoints were still undefined after the whole text was read.
    #[error("failed to connect nodes {from} and {to}")]
    UnresolvedConnection { from: NodeId, to: NodeId },
    /// A directive number that is not a valid 64-bit integer.
    #[error("malformed number {text:?}")]
    MalformedNumber { text: String },
}

/// Why a thread's stack did not form an instruction this step.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// Nothing has been accumulated.
    #[error("empty stack")]
    Empty,
    /// Leading value is not an enabled opcode.
    #[error("unknown opcode {0}")]
    UnknownOpcode(Value),
    /// Known opcode still waiting for arguments.
    #[error("{opcode} has {have} of {need} arguments")]
    Pending {
        opcode: Opcode,
        have: usize,
        need: usize,
    },
    /// More values than the opcode takes.
    #[error("{opcode} takes {need} arguments, got {have}")]
    TooManyArguments {
        opcode: Opcode,
        have: usize,
        need: usize,
    },
}
