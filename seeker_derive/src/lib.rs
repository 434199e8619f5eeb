//! Derive macros for the seeker interpreter.
//!
//! Provides `#[derive(Error)]`, which generates `Display` and
//! `std::error::Error` from `#[error("...")]` message attributes.

mod error;

use proc_macro::TokenStream;

/// Implements `Display` and `Error` for an enum or struct from its `#[error]` messages.
#[proc_macro_derive(Error, attributes(error))]
pub fn derive_error(input: TokenStream) -> TokenStream {
    error::derive_error(input)
}
