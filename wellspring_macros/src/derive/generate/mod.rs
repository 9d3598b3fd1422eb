//! Code generation for the `Settings` derive.
//!
//! `shape` emits the static descriptor; `construct` emits the flavor's
//! `from_table` body. Both quote fully-qualified paths through the resolved
//! crate path so generated code is immune to local imports.

mod construct;
mod shape;


use proc_macro2::TokenStream;
use quote::quote;

use super::parse::ParsedInput;

/// Assembles the `impl Settings` block for the parsed input.
pub(crate) fn settings_impl(parsed: &ParsedInput, krate: &TokenStream) -> TokenStream {
    let ident = &parsed.ident;
    let shape_fn = shape::shape_fn(parsed, krate);
    let from_table_fn = construct::from_table_fn(parsed, krate);
    quote! {
        #[automatically_derived]
        impl #krate::Settings for #ident {
            #shape_fn
            #from_table_fn
        }
    }
}
