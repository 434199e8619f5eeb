//! End-to-end Seeker programs driven through the public API.

use seeker::virtual_machine::config::Config;
use seeker::virtual_machine::errors::LoadWarning;
use seeker::virtual_machine::io::IoChannel;
use seeker::virtual_machine::program::Program;
use seeker::virtual_machine::vm::{RunOutcome, VM};
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

fn run_program(source: &str, input: &[u8], config: Config) -> VM {
    let mut vm = VM::new(Program::parse(source), config, IoChannel::new(input.to_vec()));
    assert_eq!(vm.run(), RunOutcome::Halted);
    vm
}

#[derive(Clone, Default)]
struct Capture(Rc<RefCell<Vec<u8>>>);

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn minimal_program_produces_nothing() {
    let vm = run_program("0:6 1:0 0-1", b"", Config::default());
    assert!(vm.io().output().is_empty());
    assert!(vm.warnings().is_empty());
    assert!(vm.threads().is_empty());
}

/// Two `COPY data, IO` instructions laid out along the path 0-2-3-4-6-8-1.
const HI: &str = "
    0:6 2:5 3:0 4:6 6:7 8:0 1:0
    5:72 7:105
    0-2 2-3 3-4 4-6 6-8 8-1
";

#[test]
fn prints_hi() {
    let vm = run_program(HI, b"", Config::default());
    assert_eq!(vm.io().output(), b"Hi");
    // Data nodes are read, not consumed.
    assert_eq!(vm.graph().value(5), Some(72));
}

#[test]
fn output_is_echoed_as_it_is_produced() {
    let capture = Capture::default();
    let io = IoChannel::default().with_echo(capture.clone());
    let mut vm = VM::new(Program::parse(HI), Config::default(), io);
    assert!(vm.step());
    assert!(vm.step());
    assert!(vm.step());
    assert_eq!(capture.0.borrow().as_slice(), b"H");
    vm.run();
    assert_eq!(capture.0.borrow().as_slice(), b"Hi");
}

#[test]
fn copies_input_to_output_until_exhausted() {
    // Three `COPY IO, IO` instructions; the third reads past the end.
    let source = "0:6 2:0 3:0 4:6 5:0 6:0 7:6 8:0 9:0 1:0 \
                  0-2 2-3 3-4 4-5 5-6 6-7 7-8 8-9 9-1";
    let vm = run_program(source, b"ok", Config::default());
    assert_eq!(vm.io().output(), b"ok\xff");
    assert_eq!(vm.io().remaining_input(), 0);
}

#[test]
fn reads_input_into_a_node() {
    // COPY IO, 9 twice, then COPY 9, IO.
    let source = "0:6 2:0 3:9 4:6 5:0 6:9 7:6 8:9 10:0 1:0 9:0 \
                  0-2 2-3 3-4 4-5 5-6 6-7 7-8 8-10 10-1";
    let vm = run_program(source, b"AB", Config::default());
    assert_eq!(vm.graph().value(9), Some(66));
    assert_eq!(vm.io().output(), b"B");
}

#[test]
fn unresolved_connections_are_warnings_not_failures() {
    let vm = run_program("0:6 1:0 0-1 1-2 3-4", b"", Config::default());
    assert_eq!(
        vm.warnings(),
        &[
            LoadWarning::UnresolvedConnection { from: 1, to: 2 },
            LoadWarning::UnresolvedConnection { from: 3, to: 4 },
        ]
    );
}

#[test]
fn paused_program_resumes_where_it_stopped() {
    // BREAKPOINT on node 0, then INCREMENT 9 along the way to node 1.
    let source = "0:8 2:4 3:9 1:0 9:0 0-2 2-3 3-1";
    let mut vm = VM::new(
        Program::parse(source),
        Config::default().with_extended(true),
        IoChannel::default(),
    );

    assert_eq!(vm.run(), RunOutcome::Paused);
    assert_eq!(vm.threads().len(), 1);
    assert_eq!(vm.threads()[0].current(), 2);
    assert_eq!(vm.graph().value(9), Some(0));

    assert_eq!(vm.run(), RunOutcome::Halted);
    assert_eq!(vm.graph().value(9), Some(1));
}

#[test]
fn spawned_threads_share_the_graph() {
    // Thread 0 spawns thread 1 (3 -> 4), which increments node 0 on arrival.
    let source = "0:7 2:3 3:4 1:0 4:0 0-2 2-3 3-1 3-4";
    let vm = run_program(source, b"", Config::default().with_extended(true));
    assert_eq!(vm.graph().value(0), Some(8));
}
