//! Seeker virtual machine.
//!
//! Seeker programs are undirected graphs of integer-valued nodes. Control flow
//! is not sequential: each thread walks one hop per step along the shortest
//! route to its destination node, and the values it passes over form its
//! instructions.
//!
//! # Execution model
//!
//! - **Graph**: nodes keyed by integer ids, symmetric adjacency, mutable at run time
//! - **Threads**: each has a current node, a destination and a value stack;
//!   it terminates on arrival and stalls while no route exists
//! - **Instructions**: the first stacked value selects an opcode, the next
//!   `arity` values are its arguments
//! - **IO**: copying from node 0 reads an input byte, copying to it writes one
//! - **Steps**: all threads advance once per step in creation order; invalid
//!   references and unreachable destinations are inert, never errors
//!
//! # Modules
//!
//! - [`config`]: interpreter switches (verbose trace, extended opcodes)
//! - [`errors`]: load warnings, decode failures and file errors
//! - [`graph`]: node registry and adjacency
//! - [`io`]: input/output streams behind the IO node
//! - [`isa`]: opcode table and stack decoding
//! - [`program`]: program text loader
//! - [`router`]: shortest-hop route search
//! - [`thread`]: thread state
//! - [`vm`]: scheduler and opcode execution

pub mod config;
pub mod errors;
pub mod graph;
pub mod io;
pub mod isa;
pub mod program;
pub mod router;
pub mod thread;
pub mod vm;
