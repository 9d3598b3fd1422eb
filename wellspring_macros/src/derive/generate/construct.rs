//! Construction path generation per record flavor.
//!
//! Every flavor produces a `from_table` method consuming the resolved
//! name-to-value table. The field-table flavors deserialize field by field
//! so one bad value names the offending field; the serde flavors hand the
//! whole table to the type's schema.

use proc_macro2::TokenStream;
use quote::quote;

use crate::derive::parse::{
    DefaultAttr, Flavor, ParsedField, ParsedInput, is_phantom_data, option_inner,
};

pub(crate) fn from_table_fn(parsed: &ParsedInput, krate: &TokenStream) -> TokenStream {
    match parsed.struct_attrs.flavor {
        Flavor::Plain => field_table_fn(parsed, krate, false),
        Flavor::Positional => field_table_fn(parsed, krate, true),
        Flavor::Serde => serde_fn(parsed, krate),
        Flavor::SerdeDefaults => serde_defaults_fn(parsed, krate),
    }
}

/// Per-field construction for the `plain` and `positional` flavors.
///
/// The positional variant additionally rejects keys left in the table once
/// every declared field has been removed.
fn field_table_fn(
    parsed: &ParsedInput,
    krate: &TokenStream,
    reject_leftovers: bool,
) -> TokenStream {
    let record = parsed.ident.to_string();
    let bindings: Vec<TokenStream> = parsed
        .fields
        .iter()
        .map(|field| field_binding(field, &record, krate))
        .collect();
    let idents: Vec<&syn::Ident> = parsed.fields.iter().map(|field| &field.ident).collect();
    let leftover_check = reject_leftovers.then(|| {
        quote! {
            if let ::core::option::Option::Some((key, _)) = table.into_iter().next() {
                return ::core::result::Result::Err(
                    #krate::ConstructError::unexpected_field(#record, key),
                );
            }
        }
    });
    quote! {
        fn from_table(
            mut table: #krate::toml::value::Table,
        ) -> ::core::result::Result<Self, #krate::ConstructError> {
            #( #bindings )*
            #leftover_check
            ::core::result::Result::Ok(Self { #( #idents ),* })
        }
    }
}

fn field_binding(field: &ParsedField, record: &str, krate: &TokenStream) -> TokenStream {
    let ident = &field.ident;
    let ty = &field.ty;
    let name = ident.to_string();
    if field.attrs.skip || is_phantom_data(&field.ty) {
        let fill = default_expr(field);
        return quote! { let #ident: #ty = #fill; };
    }
    let fallback = missing_fallback(field, record, krate);
    quote! {
        let #ident: #ty = match table.remove(#name) {
            ::core::option::Option::Some(value) => value
                .try_into()
                .map_err(|source| #krate::ConstructError::invalid_value(#record, #name, source))?,
            ::core::option::Option::None => #fallback,
        };
    }
}

/// The value used for fields excluded from resolution.
fn default_expr(field: &ParsedField) -> TokenStream {
    match &field.attrs.default {
        Some(DefaultAttr::Expr(expr)) => quote! { #expr },
        _ => quote! { ::core::default::Default::default() },
    }
}

/// The expression evaluated when no source resolved the field.
///
/// Optional fields without a declared default stay `None`; required fields
/// fail construction with a missing-field error.
fn missing_fallback(field: &ParsedField, record: &str, krate: &TokenStream) -> TokenStream {
    match &field.attrs.default {
        Some(DefaultAttr::Expr(expr)) => quote! { #expr },
        Some(DefaultAttr::Trait) => quote! { ::core::default::Default::default() },
        None => {
            if option_inner(&field.ty).is_some() {
                return quote! { ::core::option::Option::None };
            }
            let name = field.ident.to_string();
            quote! {
                return ::core::result::Result::Err(
                    #krate::ConstructError::missing_field(#record, #name),
                )
            }
        }
    }
}

/// Whole-record deserialization for the `serde` flavor.
fn serde_fn(parsed: &ParsedInput, krate: &TokenStream) -> TokenStream {
    let record = parsed.ident.to_string();
    quote! {
        fn from_table(
            table: #krate::toml::value::Table,
        ) -> ::core::result::Result<Self, #krate::ConstructError> {
            #krate::toml::Value::Table(table)
                .try_into()
                .map_err(|source| #krate::ConstructError::deserialize(#record, source))
        }
    }
}

/// Default-backfilled whole-record deserialization.
///
/// Declared defaults are serialized into the table for keys no source
/// resolved; the filled table then goes through serde as in the `serde`
/// flavor.
fn serde_defaults_fn(parsed: &ParsedInput, krate: &TokenStream) -> TokenStream {
    let record = parsed.ident.to_string();
    let backfills: Vec<TokenStream> = parsed
        .fields
        .iter()
        .filter_map(|field| backfill_tokens(field, &record, krate))
        .collect();
    quote! {
        fn from_table(
            mut table: #krate::toml::value::Table,
        ) -> ::core::result::Result<Self, #krate::ConstructError> {
            #( #backfills )*
            #krate::toml::Value::Table(table)
                .try_into()
                .map_err(|source| #krate::ConstructError::deserialize(#record, source))
        }
    }
}

fn backfill_tokens(field: &ParsedField, record: &str, krate: &TokenStream) -> Option<TokenStream> {
    if field.attrs.skip || is_phantom_data(&field.ty) {
        return None;
    }
    let name = field.ident.to_string();
    let ty = &field.ty;
    let value = match field.attrs.default.as_ref()? {
        DefaultAttr::Expr(expr) => quote! { #expr },
        DefaultAttr::Trait => quote! { <#ty as ::core::default::Default>::default() },
    };
    Some(quote! {
        if !table.contains_key(#name) {
            let value = #krate::toml::Value::try_from(#value)
                .map_err(|source| #krate::ConstructError::reserialize(#record, source))?;
            table.insert(::std::string::String::from(#name), value);
        }
    })
}
