//! Input parsing for the `Settings` derive macro.
//!
//! Gathers the struct identifier, fields, and attribute metadata in one
//! pass so macro expansion can fail fast with useful errors.

use syn::{Data, DeriveInput, Fields};

use super::{FieldAttrs, StructAttrs, parse_field_attrs, parse_struct_attrs};

/// Everything expansion needs, gathered from the user-provided struct.
#[derive(Debug)]
pub(crate) struct ParsedInput {
    pub ident: syn::Ident,
    pub struct_attrs: StructAttrs,
    pub fields: Vec<ParsedField>,
}

/// One named field with its parsed attribute metadata.
#[derive(Debug)]
pub(crate) struct ParsedField {
    pub ident: syn::Ident,
    pub ty: syn::Type,
    pub attrs: FieldAttrs,
}

/// Gathers information from the user-provided struct.
///
/// Only structs with named fields are accepted. Attribute conflicts are
/// rejected here rather than during generation so every error carries the
/// offending field's span.
pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<ParsedInput> {
    let ident = input.ident.clone();
    let struct_attrs = parse_struct_attrs(&input.attrs)?;
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "Settings requires named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &ident,
                "Settings can only be derived for structs",
            ));
        }
    };

    let mut fields = Vec::new();
    for field in named {
        let Some(field_ident) = field.ident.clone() else {
            return Err(syn::Error::new_spanned(
                field,
                "Settings requires named fields",
            ));
        };
        let attrs = parse_field_attrs(&field.attrs)?;
        if attrs.skip && (attrs.nested || !attrs.sources.is_empty()) {
            return Err(syn::Error::new_spanned(
                field,
                "skip cannot be combined with source or nested attributes",
            ));
        }
        fields.push(ParsedField {
            ident: field_ident,
            ty: field.ty.clone(),
            attrs,
        });
    }
    Ok(ParsedInput {
        ident,
        struct_attrs,
        fields,
    })
}
