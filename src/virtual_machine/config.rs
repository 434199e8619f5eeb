/// Interpreter switches, fixed for the lifetime of a [`VM`](super::vm::VM).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// Emit a trace line for every instruction, move, stall and termination.
    pub verbose: bool,
    /// Enable `CREATE_THREAD` (7) and `BREAKPOINT` (8).
    pub extended: bool,
}

impl Config {
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_extended(mut self, extended: bool) -> Self {
        self.extended = extended;
        self
    }
}
