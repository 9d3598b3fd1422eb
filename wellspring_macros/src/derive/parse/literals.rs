//! Literal parsing helpers for derive attributes.

use syn::{Lit, LitStr};

/// Parses a string literal from an attribute value.
///
/// `key` names the attribute in the error when the literal has another
/// type.
pub(crate) fn lit_str(meta: &syn::meta::ParseNestedMeta, key: &str) -> syn::Result<LitStr> {
    let literal = meta.value()?.parse::<Lit>()?;
    let span = literal.span();
    match literal {
        Lit::Str(s) => Ok(s),
        _ => Err(syn::Error::new(span, format!("{key} must be a string"))),
    }
}
