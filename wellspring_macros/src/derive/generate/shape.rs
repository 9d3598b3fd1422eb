//! Shape descriptor generation.
//!
//! Emits the `shape` method: a `fields` function building the ordered
//! `FieldShape` list, a `construct` hook that rebuilds an instance and
//! reserializes it for nesting, and the `static` descriptor tying them
//! together.

use proc_macro2::TokenStream;
use quote::quote;

use crate::derive::parse::{
    Flavor, ParsedField, ParsedInput, ScalarClass, SourceAttr, is_phantom_data, option_inner,
    scalar_class,
};

pub(crate) fn shape_fn(parsed: &ParsedInput, krate: &TokenStream) -> TokenStream {
    let ident = &parsed.ident;
    let name = ident.to_string();
    let markers = markers_tokens(parsed.struct_attrs.flavor, krate);
    let field_shapes: Vec<TokenStream> = parsed
        .fields
        .iter()
        .map(|field| field_shape_tokens(field, krate))
        .collect();
    quote! {
        fn shape() -> &'static #krate::RecordShape {
            fn fields() -> ::std::vec::Vec<#krate::FieldShape> {
                ::std::vec![ #( #field_shapes ),* ]
            }
            fn construct(
                table: #krate::toml::value::Table,
            ) -> ::core::result::Result<#krate::toml::Value, #krate::ConstructError> {
                let instance = <#ident as #krate::Settings>::from_table(table)?;
                #krate::toml::Value::try_from(instance)
                    .map_err(|source| #krate::ConstructError::reserialize(#name, source))
            }
            static SHAPE: #krate::RecordShape = #krate::RecordShape {
                name: #name,
                markers: #markers,
                fields,
                construct,
            };
            &SHAPE
        }
    }
}

/// Capability markers encoding the flavor for runtime detection.
fn markers_tokens(flavor: Flavor, krate: &TokenStream) -> TokenStream {
    let (field_table, schema, positional) = match flavor {
        Flavor::Plain => (true, false, false),
        Flavor::Serde => (false, true, false),
        Flavor::SerdeDefaults => (true, true, false),
        Flavor::Positional => (true, false, true),
    };
    quote! {
        #krate::Markers {
            field_table: #field_table,
            schema: #schema,
            positional: #positional,
            builder: false,
        }
    }
}

fn field_shape_tokens(field: &ParsedField, krate: &TokenStream) -> TokenStream {
    let name = field.ident.to_string();
    let ty = type_spec_tokens(field, krate);
    let annotations = annotation_tokens(&field.attrs.sources, krate);
    quote! {
        #krate::FieldShape {
            name: #name,
            ty: #ty,
            annotations: #annotations,
        }
    }
}

/// Builds the `TypeSpec` for a field, stripping one `Option` wrapper.
fn type_spec_tokens(field: &ParsedField, krate: &TokenStream) -> TokenStream {
    if field.attrs.skip || is_phantom_data(&field.ty) {
        return quote! { #krate::TypeSpec::Marker };
    }
    option_inner(&field.ty).map_or_else(
        || inner_spec_tokens(field, &field.ty, krate),
        |inner| {
            let spec = inner_spec_tokens(field, inner, krate);
            quote! { #krate::TypeSpec::Optional(::std::boxed::Box::new(#spec)) }
        },
    )
}

fn inner_spec_tokens(field: &ParsedField, ty: &syn::Type, krate: &TokenStream) -> TokenStream {
    if field.attrs.nested {
        return quote! { #krate::TypeSpec::Record(<#ty as #krate::Settings>::shape) };
    }
    let variant = match scalar_class(ty) {
        ScalarClass::Boolean => quote! { Boolean },
        ScalarClass::Integer => quote! { Integer },
        ScalarClass::Float => quote! { Float },
        ScalarClass::String => quote! { String },
        ScalarClass::Other => quote! { Other },
    };
    quote! { #krate::TypeSpec::Scalar(#krate::ScalarKind::#variant) }
}

fn annotation_tokens(sources: &[SourceAttr], krate: &TokenStream) -> TokenStream {
    let entries: Vec<TokenStream> = sources
        .iter()
        .map(|source| source_tokens(source, krate))
        .collect();
    quote! { ::std::vec![ #( #entries ),* ] }
}

/// One `Source` value built through the runtime crate's consuming builders.
fn source_tokens(source: &SourceAttr, krate: &TokenStream) -> TokenStream {
    match source {
        SourceAttr::Env { names } => quote! {
            #krate::Source::Env(#krate::EnvSource::new() #( .name(#names) )*)
        },
        SourceAttr::Secret { names, dirs } => quote! {
            #krate::Source::Secret(
                #krate::SecretSource::new() #( .name(#names) )* #( .dir(#dirs) )*
            )
        },
        SourceAttr::Toml { key, file } => {
            let key_call = key.as_ref().map(|key| quote! { .key(#key) });
            let file_call = file.as_ref().map(|file| quote! { .file(#file) });
            quote! { #krate::Source::Toml(#krate::TomlSource::new() #key_call #file_call) }
        }
    }
}
