//! Expansion pipeline for the `Settings` derive.
//!
//! The pipeline is split in two: `parse` reduces the annotated struct to
//! attribute and field descriptions and rejects invalid input eagerly;
//! `generate` turns those descriptions into the shape descriptor and the
//! flavor's construction path.

mod crate_path;
mod generate;
mod parse;


use proc_macro2::TokenStream;
use syn::DeriveInput;

/// Expands `#[derive(Settings)]` for `input`.
pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let parsed = parse::parse_input(input)?;
    let krate = crate_path::resolve(parsed.struct_attrs.crate_path.as_ref());
    Ok(generate::settings_impl(&parsed, &krate))
}
