//! Seeker interpreter library.
//!
//! Seeker is an esoteric language whose control flow is shortest-path
//! navigation through a live, mutable graph.

pub mod utils;
pub mod virtual_machine;
