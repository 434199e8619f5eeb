//! `#[derive(Error)]` expansion.
//!
//! Every variant (or the struct itself) carries an `#[error("...")]` message.
//! Fields are bound as locals and passed to `write!` as named arguments, but
//! only the ones the message actually mentions:
//!
//! ```ignore
//! use seeker_derive::Error;
//!
//! #[derive(Debug, Error)]
//! pub enum LoadWarning {
//!     #[error("failed to connect nodes {from} and {to}")]
//!     UnresolvedConnection { from: i64, to: i64 },
//!
//!     #[error("malformed number {0:?}")]
//!     MalformedNumber(String),
//!
//!     #[error("empty program")]
//!     Empty,
//! }
//! ```
//!
//! Positional placeholders (`{0}`, `{1:?}`) refer to tuple fields.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{ToTokens, format_ident, quote};
use syn::{Attribute, Data, DeriveInput, Fields, Ident, LitStr, parse_macro_input};

pub fn derive_error(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let body = match &input.data {
        Data::Enum(data) => {
            let arms = data
                .variants
                .iter()
                .map(|variant| {
                    let message = message(&variant.attrs, &variant.ident)?;
                    let ident = &variant.ident;
                    let (pattern, message, args) = bind_fields(&variant.fields, message);
                    Ok(quote! { Self::#ident #pattern => write!(f, #message #(, #args)*), })
                })
                .collect::<syn::Result<Vec<_>>>()?;
            if arms.is_empty() {
                quote! { match *self {} }
            } else {
                quote! { match self { #(#arms)* } }
            }
        }
        Data::Struct(data) => {
            let message = message(&input.attrs, &input.ident)?;
            let (pattern, message, args) = bind_fields(&data.fields, message);
            quote! {
                let Self #pattern = self;
                write!(f, #message #(, #args)*)
            }
        }
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                input,
                "#[derive(Error)] supports enums and structs, not unions",
            ));
        }
    };

    Ok(quote! {
        impl #impl_generics ::std::fmt::Display for #name #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                #body
            }
        }

        impl #impl_generics ::std::error::Error for #name #ty_generics #where_clause {}
    })
}

/// Builds the destructuring pattern for `fields`, rewrites positional
/// placeholders in `message` to the bound names, and collects the `name = name`
/// arguments the message refers to.
fn bind_fields(fields: &Fields, message: LitStr) -> (TokenStream2, LitStr, Vec<TokenStream2>) {
    let (pattern, idents, message) = match fields {
        Fields::Unit => return (TokenStream2::new(), message, Vec::new()),
        Fields::Named(named) => {
            let idents: Vec<Ident> = named
                .named
                .iter()
                .filter_map(|field| field.ident.clone())
                .collect();
            (quote! { { #(#idents),* } }, idents, message)
        }
        Fields::Unnamed(unnamed) => {
            let count = unnamed.unnamed.len();
            let idents: Vec<Ident> = (0..count).map(|i| format_ident!("_{}", i)).collect();
            let rewritten = rename_positional(&message.value(), count);
            (
                quote! { ( #(#idents),* ) },
                idents,
                LitStr::new(&rewritten, message.span()),
            )
        }
    };

    let text = message.value();
    let args = idents
        .iter()
        .filter(|ident| mentions(&text, &ident.to_string()))
        .map(|ident| quote! { #ident = #ident })
        .collect();
    (pattern, message, args)
}

fn mentions(message: &str, name: &str) -> bool {
    message.contains(&format!("{{{name}}}")) || message.contains(&format!("{{{name}:"))
}

/// Rewrites `{0}` and `{0:...}` into `{_0}` and `{_0:...}`.
fn rename_positional(message: &str, count: usize) -> String {
    let mut out = message.to_string();
    for i in (0..count).rev() {
        out = out
            .replace(&format!("{{{i}}}"), &format!("{{_{i}}}"))
            .replace(&format!("{{{i}:"), &format!("{{_{i}:"));
    }
    out
}

fn message<T: ToTokens>(attrs: &[Attribute], target: &T) -> syn::Result<LitStr> {
    let attr = attrs
        .iter()
        .find(|attr| attr.path().is_ident("error"))
        .ok_or_else(|| {
            syn::Error::new_spanned(target, "missing #[error(\"...\")] message attribute")
        })?;
    attr.parse_args::<LitStr>().map_err(|_| {
        syn::Error::new_spanned(
            &attr.meta,
            "expected a string literal, e.g. #[error(\"unknown opcode {0}\")]",
        )
    })
}

#[cfg(test)]
mod tests {
    use super::{mentions, rename_positional};

    #[test]
    fn positional_placeholders_are_renamed() {
        assert_eq!(rename_positional("bad {0} and {1:?}", 2), "bad {_0} and {_1:?}");
    }

    #[test]
    fn named_placeholders_are_untouched() {
        assert_eq!(rename_positional("nodes {from} and {to}", 0), "nodes {from} and {to}");
    }

    #[test]
    fn only_referenced_fields_become_arguments() {
        assert!(mentions("cannot read {path}: {reason}", "path"));
        assert!(mentions("value {value:>4}", "value"));
        assert!(!mentions("cannot read {path}", "reason"));
    }
}
