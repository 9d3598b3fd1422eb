//! Crate path resolution for dependency aliasing support.
//!
//! Converts the optional `#[setting(crate = "...")]` attribute value into a
//! `TokenStream` that replaces hardcoded `::wellspring::` paths in generated
//! code.

use proc_macro2::TokenStream;
use quote::quote;

/// Resolve the crate path from the parsed struct attribute.
///
/// Defaults to `::wellspring` when no override is present. When the user
/// specifies `#[setting(crate = "...")]`, the returned tokens reference
/// types through the aliased dependency name instead.
pub(crate) fn resolve(crate_path: Option<&syn::Path>) -> TokenStream {
    crate_path.map_or_else(|| quote! { ::wellspring }, |path| quote! { #path })
}

#[cfg(test)]
mod tests {
    //! Unit tests for crate path resolution with default and custom paths.
    #![expect(
        clippy::expect_used,
        reason = "tests panic to surface malformed derive input"
    )]

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::default(None, ":: wellspring")]
    #[case::custom(Some("my_alias"), "my_alias")]
    #[case::nested(Some("my_ns::wellspring"), "my_ns :: wellspring")]
    fn resolve_produces_expected_tokens(#[case] input: Option<&str>, #[case] expected: &str) {
        let parsed = input.map(|s| syn::parse_str::<syn::Path>(s).expect("valid path"));
        let tokens = resolve(parsed.as_ref());
        assert_eq!(tokens.to_string(), expected);
    }
}
