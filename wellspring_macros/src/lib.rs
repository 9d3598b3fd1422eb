//! Procedural macros for the `wellspring` settings framework.
//!
//! The [`Settings`] derive generates two things for a record type: the
//! static shape descriptor the resolution engine introspects, and the
//! `from_table` construction path selected by the struct-level
//! `#[setting(flavor = "...")]` attribute. Field-level `#[setting(...)]`
//! attributes attach value sources in priority order.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for `wellspring::Settings`.
///
/// Struct-level attributes:
/// - `#[setting(flavor = "plain" | "serde" | "serde_defaults" | "positional")]`
///   selects the construction strategy; the default is `serde`.
/// - `#[setting(crate = "alias")]` redirects generated paths when the
///   `wellspring` dependency is renamed.
///
/// Field-level attributes:
/// - `#[setting(env)]` / `#[setting(env("NAME", "FALLBACK"))]` reads
///   environment variables.
/// - `#[setting(secret)]` / `#[setting(secret("name", dir = "/path"))]`
///   reads mounted secret files.
/// - `#[setting(toml)]` / `#[setting(toml(key = "a.b", file = "app.toml"))]`
///   reads a TOML document.
/// - `#[setting(nested)]` recurses into a field whose type also derives
///   `Settings`.
/// - `#[setting(skip)]` excludes a field from resolution and fills it from
///   its default during construction.
/// - `#[setting(default)]` / `#[setting(default = expr)]` supplies the value
///   used when no source resolves the field.
#[proc_macro_derive(Settings, attributes(setting))]
pub fn derive_settings(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
