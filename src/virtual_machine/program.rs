//! Seeker program text.
//!
//! A program is a list of directives separated by anything that is not a
//! digit, `:` or `-`:
//!
//! ```text
//! 0:6 1:0 0-1
//! ```
//!
//! - `id:value` defines node `id` (redefining keeps its connections)
//! - `a-b` connects two nodes; either may be defined later in the text
//!
//! A `:` or `-` that is not preceded by digits becomes part of the next
//! number, which is how negative values are written (`3:-5`). Connections
//! still unresolved after the whole text was read are reported as
//! [`LoadWarning`]s; loading never fails.

use crate::virtual_machine::errors::{LoadWarning, VMError};
use crate::virtual_machine::graph::{Graph, NodeId};
use crate::warn;
use std::fs;
use std::path::Path;

/// Directive operator between the two numbers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Operator {
    Define,
    Connect,
}

impl Operator {
    fn from_char(c: char) -> Option<Self> {
        match c {
            ':' => Some(Operator::Define),
            '-' => Some(Operator::Connect),
            _ => None,
        }
    }
}

/// Loaded program: the initial graph plus anything that went wrong reading it.
#[derive(Clone, Debug, Default)]
pub struct Program {
    pub graph: Graph,
    pub warnings: Vec<LoadWarning>,
}

/// Directive being scanned.
#[derive(Default)]
struct Scanner {
    left: Option<NodeId>,
    operator: Option<Operator>,
    digits: String,
}

impl Scanner {
    fn reset(&mut self) {
        self.left = None;
        self.operator = None;
        self.digits.clear();
    }

    /// Parses and clears the digit buffer.
    fn take_number(&mut self) -> Result<i64, LoadWarning> {
        let text = std::mem::take(&mut self.digits);
        text.parse()
            .map_err(|_| LoadWarning::MalformedNumber { text })
    }
}

impl Program {
    /// Reads a program from text. Problems become warnings on the result.
    pub fn parse(source: &str) -> Self {
        let mut program = Program::default();
        let mut unresolved: Vec<(NodeId, NodeId)> = Vec::new();
        let mut scanner = Scanner::default();

        // A trailing separator flushes the last directive.
        for c in source.chars().chain(std::iter::once(' ')) {
            if c.is_ascii_digit() {
                scanner.digits.push(c);
            } else if let Some(operator) = Operator::from_char(c) {
                if scanner.digits.is_empty() {
                    scanner.digits.push(c);
                    continue;
                }
                match scanner.take_number() {
                    Ok(left) => {
                        scanner.left = Some(left);
                        scanner.operator = Some(operator);
                    }
                    Err(warning) => {
                        program.warnings.push(warning);
                        scanner.reset();
                    }
                }
            } else if let (Some(left), Some(operator)) = (scanner.left, scanner.operator)
                && !scanner.digits.is_empty()
            {
                match scanner.take_number() {
                    Ok(right) => match operator {
                        Operator::Define => program.graph.define(left, right),
                        Operator::Connect => {
                            if program.graph.contains(left) && program.graph.contains(right) {
                                program.graph.connect(left, right);
                            } else {
                                unresolved.push((left, right));
                            }
                        }
                    },
                    Err(warning) => program.warnings.push(warning),
                }
                scanner.reset();
            }
        }

        for (from, to) in unresolved {
            if program.graph.contains(from) && program.graph.contains(to) {
                program.graph.connect(from, to);
            } else {
                program
                    .warnings
                    .push(LoadWarning::UnresolvedConnection { from, to });
            }
        }

        for warning in &program.warnings {
            warn!("{}", warning);
        }
        program
    }

    /// Reads and parses a program file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, VMError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| VMError::ReadProgram {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::parse(&source))
    }
}
