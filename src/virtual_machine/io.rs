//! Byte streams bound to the IO node.
//!
//! Copying *from* the IO node consumes one input byte, copying *to* it appends
//! one output byte. Neither direction blocks or fails.

use crate::virtual_machine::graph::{NodeId, Value};
use crate::warn;
use std::collections::VecDeque;
use std::io::Write;

/// Node id whose copies are redirected to the IO channel.
pub const IO_NODE: NodeId = 0;

/// Value read from the IO node once the input is exhausted.
pub const END_OF_INPUT: Value = -1;

/// Finite input source and append-only output sink.
#[derive(Default)]
pub struct IoChannel {
    input: VecDeque<u8>,
    output: Vec<u8>,
    /// Receives each output byte as soon as it is produced.
    echo: Option<Box<dyn Write>>,
}

impl IoChannel {
    pub fn new(input: impl Into<Vec<u8>>) -> Self {
        Self {
            input: VecDeque::from(input.into()),
            output: Vec::new(),
            echo: None,
        }
    }

    /// Mirrors every output byte to `sink` as it is written.
    pub fn with_echo(mut self, sink: impl Write + 'static) -> Self {
        self.echo = Some(Box::new(sink));
        self
    }

    /// Takes the next input byte, or [`END_OF_INPUT`].
    pub fn read(&mut self) -> Value {
        self.input
            .pop_front()
            .map_or(END_OF_INPUT, Value::from)
    }

    /// Appends `value mod 256` to the output.
    pub fn write(&mut self, value: Value) {
        let byte = value.rem_euclid(256) as u8;
        self.output.push(byte);

        let failure = match self.echo.as_mut() {
            Some(sink) => sink.write_all(&[byte]).and_then(|()| sink.flush()).err(),
            None => None,
        };
        if let Some(e) = failure {
            warn!("output echo failed, further output is only buffered: {e}");
            self.echo = None;
        }
    }

    pub fn output(&self) -> &[u8] {
        &self.output
    }

    pub fn remaining_input(&self) -> usize {
        self.input.len()
    }
}
