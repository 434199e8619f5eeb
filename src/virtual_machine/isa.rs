//! Instruction set.
//!
//! The [`for_each_opcode!`](crate::for_each_opcode) macro holds the canonical
//! opcode table and hands it to a callback macro, so the [`Opcode`] enum and the
//! engine's dispatch are generated from the same list.
//!
//! # Encoding
//!
//! There is no bytecode. A thread pushes the value of every node it visits onto
//! its stack; the first value selects the opcode and the following `arity`
//! values are its arguments. Extended opcodes only decode when the interpreter
//! runs in extended mode.

use crate::virtual_machine::errors::DecodeError;
use crate::virtual_machine::graph::Value;
use std::fmt::{self, Display};

/// Invokes a callback macro with the complete opcode table.
#[macro_export]
macro_rules! for_each_opcode {
    ($callback:ident) => {
        $callback! {
            /// SET_DESTINATION node ; retarget the executing thread
            SetDestination = 1, "SET_DESTINATION" => [node], base,
            /// SET_CONNECTION a, b, flag ; flag <= 0 disconnects a-b, otherwise connects
            SetConnection = 2, "SET_CONNECTION" => [a, b, flag], base,
            /// CHANGE_NODE node, flag ; flag <= 0 destroys node, otherwise creates it with value 0
            ChangeNode = 3, "CHANGE_NODE" => [node, flag], base,
            /// INCREMENT node ; node.value += 1
            Increment = 4, "INCREMENT" => [node], base,
            /// DECREMENT node ; node.value -= 1
            Decrement = 5, "DECREMENT" => [node], base,
            /// COPY from, to ; to.value = from.value, reading/writing IO through node 0
            Copy = 6, "COPY" => [from, to], base,
            /// CREATE_THREAD start, destination ; spawn a thread, active from the next step
            CreateThread = 7, "CREATE_THREAD" => [start, destination], extended,
            /// BREAKPOINT ; pause the run loop at the end of the current step
            Breakpoint = 8, "BREAKPOINT" => [], extended,
        }
    };
}

#[macro_export]
macro_rules! define_opcodes {
    (
        $(
            $(#[$doc:meta])*
            $name:ident = $number:literal, $mnemonic:literal => [ $( $arg:ident ),* ], $mode:ident
        ),* $(,)?
    ) => {
        #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
        pub enum Opcode {
            $(
                $(#[$doc])*
                $name = $number,
            )*
        }

        impl Opcode {
            /// Every opcode, base and extended, in table order.
            pub const ALL: &'static [Opcode] = &[ $( Opcode::$name ),* ];

            /// Looks up an opcode by number, ignoring whether it is enabled.
            pub const fn from_number(number: Value) -> Option<Self> {
                match number {
                    $( $number => Some(Opcode::$name), )*
                    _ => None,
                }
            }

            pub const fn number(&self) -> Value {
                *self as Value
            }

            pub const fn mnemonic(&self) -> &'static str {
                match self {
                    $( Opcode::$name => $mnemonic, )*
                }
            }

            /// Number of arguments following the opcode on the stack.
            pub const fn arity(&self) -> usize {
                match self {
                    $( Opcode::$name => 0 $( + define_opcodes!(@one $arg) )*, )*
                }
            }

            /// Whether the opcode needs extended mode.
            pub const fn is_extended(&self) -> bool {
                match self {
                    $( Opcode::$name => define_opcodes!(@extended $mode), )*
                }
            }
        }
    };

    (@one $arg:ident) => { 1 };
    (@extended base) => { false };
    (@extended extended) => { true };
}

for_each_opcode!(define_opcodes);

impl Opcode {
    /// Opcode numbers visible in the given mode.
    pub fn enabled(extended: bool) -> impl Iterator<Item = Opcode> {
        Self::ALL
            .iter()
            .copied()
            .filter(move |op| extended || !op.is_extended())
    }
}

impl Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Decodes a thread stack into the opcode it completes.
///
/// Succeeds only when the stack holds an enabled opcode followed by exactly its
/// arity in arguments.
pub fn decode(stack: &[Value], extended: bool) -> Result<Opcode, DecodeError> {
    let (&first, args) = stack.split_first().ok_or(DecodeError::Empty)?;
    let opcode = Opcode::from_number(first)
        .filter(|op| extended || !op.is_extended())
        .ok_or(DecodeError::UnknownOpcode(first))?;

    let (have, need) = (args.len(), opcode.arity());
    match have.cmp(&need) {
        std::cmp::Ordering::Equal => Ok(opcode),
        std::cmp::Ordering::Less => Err(DecodeError::Pending { opcode, have, need }),
        std::cmp::Ordering::Greater => Err(DecodeError::TooManyArguments { opcode, have, need }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_matches_instruction_set() {
        let arities: Vec<_> = Opcode::ALL
            .iter()
            .map(|op| (op.number(), op.arity(), op.is_extended()))
            .collect();
        assert_eq!(
            arities,
            vec![
                (1, 1, false),
                (2, 3, false),
                (3, 2, false),
                (4, 1, false),
                (5, 1, false),
                (6, 2, false),
                (7, 2, true),
                (8, 0, true),
            ]
        );
    }

    #[test]
    fn unknown_numbers_do_not_decode() {
        assert_eq!(decode(&[0], true), Err(DecodeError::UnknownOpcode(0)));
        assert_eq!(decode(&[9, 1], true), Err(DecodeError::UnknownOpcode(9)));
        assert_eq!(decode(&[-4, 1], true), Err(DecodeError::UnknownOpcode(-4)));
        assert_eq!(decode(&[], false), Err(DecodeError::Empty));
    }

    #[test]
    fn extended_opcodes_are_invisible_in_base_mode() {
        assert_eq!(decode(&[8], false), Err(DecodeError::UnknownOpcode(8)));
        assert_eq!(decode(&[7, 1, 2], false), Err(DecodeError::UnknownOpcode(7)));
        assert_eq!(decode(&[8], true), Ok(Opcode::Breakpoint));
        assert_eq!(decode(&[7, 1, 2], true), Ok(Opcode::CreateThread));
        assert_eq!(Opcode::enabled(false).count(), 6);
        assert_eq!(Opcode::enabled(true).count(), 8);
    }

    #[test]
    fn decode_requires_exact_arity() {
        assert_eq!(
            decode(&[6], false),
            Err(DecodeError::Pending {
                opcode: Opcode::Copy,
                have: 0,
                need: 2
            })
        );
        assert_eq!(decode(&[6, 0, 9], false), Ok(Opcode::Copy));
        assert_eq!(
            decode(&[4, 5, 5], false),
            Err(DecodeError::TooManyArguments {
                opcode: Opcode::Increment,
                have: 2,
                need: 1
            })
        );
    }

    #[test]
    fn decode_errors_render_mnemonics() {
        let err = decode(&[2, 1], false).unwrap_err();
        assert_eq!(err.to_string(), "SET_CONNECTION has 1 of 3 arguments");
    }
}
