//! Parsing utilities for the `Settings` derive macro.
//!
//! Everything here reduces `#[setting(...)]` attributes to plain data the
//! generation layer consumes. Unknown keys are consumed without error so
//! callers keep compiling when new attributes appear; malformed values for
//! recognised keys fail eagerly with a spanned error.

use syn::meta::ParseNestedMeta;
use syn::parse::ParseStream;
use syn::{Attribute, Expr, LitStr, Token, parenthesized};

mod input;
mod literals;
mod type_utils;

pub(crate) use input::{ParsedField, ParsedInput, parse_input};
use literals::lit_str;
pub(crate) use type_utils::{ScalarClass, is_phantom_data, option_inner, scalar_class};

/// Record flavors the derive can generate construction paths for.
///
/// The builder flavor is deliberately absent: builder-pattern records
/// implement the runtime trait by hand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum Flavor {
    /// Field-by-field construction with per-field deserialization.
    Plain,
    /// Whole-record deserialization through serde.
    #[default]
    Serde,
    /// Whole-record deserialization after backfilling declared defaults.
    SerdeDefaults,
    /// Field-by-field construction that rejects undeclared keys.
    Positional,
}

impl Flavor {
    pub(crate) fn parse(s: &str, span: proc_macro2::Span) -> syn::Result<Self> {
        match s {
            "plain" => Ok(Self::Plain),
            "serde" => Ok(Self::Serde),
            "serde_defaults" => Ok(Self::SerdeDefaults),
            "positional" => Ok(Self::Positional),
            "builder" => Err(syn::Error::new(
                span,
                "the builder flavor is not derivable; implement `Settings` by hand",
            )),
            _ => Err(syn::Error::new(
                span,
                format!(
                    "unknown flavor '{s}'; expected one of \"plain\", \"serde\", \"serde_defaults\", or \"positional\""
                ),
            )),
        }
    }
}

/// Struct-level attributes recognised by `#[derive(Settings)]`.
#[derive(Debug, Default)]
pub(crate) struct StructAttrs {
    pub flavor: Flavor,
    /// Overrides the generated crate path for dependency aliasing.
    ///
    /// When set via `#[setting(crate = "my_alias")]`, generated code
    /// references types through `my_alias::` instead of `::wellspring::`.
    pub crate_path: Option<syn::Path>,
}

/// Field-level attributes recognised by `#[derive(Settings)]`.
///
/// - `env`/`secret`/`toml` append to `sources` in declaration order, which
///   is the resolution priority order.
/// - `nested` marks the field's type as a record to recurse into.
/// - `skip` excludes the field from resolution; construction fills it from
///   its default.
/// - `default` supplies the construction-time fallback.
#[derive(Debug, Default)]
pub(crate) struct FieldAttrs {
    pub sources: Vec<SourceAttr>,
    pub nested: bool,
    pub skip: bool,
    pub default: Option<DefaultAttr>,
}

/// The fallback declared by a `default` attribute.
#[derive(Debug)]
pub(crate) enum DefaultAttr {
    /// Bare `default`; uses the field type's `Default` impl.
    Trait,
    /// `default = expr`; uses the expression verbatim.
    Expr(Expr),
}

/// One parsed source annotation.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum SourceAttr {
    /// `env` or `env("NAME", ...)`.
    Env { names: Vec<String> },
    /// `secret` or `secret("name", dir = "/path")`.
    Secret { names: Vec<String>, dirs: Vec<String> },
    /// `toml` or `toml(key = "a.b", file = "app.toml")`.
    Toml {
        key: Option<String>,
        file: Option<String>,
    },
}

/// Iterate all `#[setting(...)]` attributes once and apply a callback.
fn parse_setting<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident("setting")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

/// Consumes an unrecognised key-value or list without recording it.
fn discard_unknown(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<proc_macro2::TokenStream>()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        parenthesized!(content in meta.input);
        content.parse::<proc_macro2::TokenStream>()?;
    }
    Ok(())
}

/// Extracts `#[setting(...)]` metadata applied to a struct.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs::default();
    parse_setting(attrs, |meta| {
        match meta.path.get_ident().map(ToString::to_string).as_deref() {
            Some("flavor") => {
                let s = lit_str(meta, "flavor")?;
                out.flavor = Flavor::parse(&s.value(), s.span())?;
                Ok(())
            }
            Some("crate") => {
                let s = lit_str(meta, "crate")?;
                let path: syn::Path =
                    syn::parse_str(&s.value()).map_err(|e| syn::Error::new(s.span(), e))?;
                out.crate_path = Some(path);
                Ok(())
            }
            _ => discard_unknown(meta),
        }
    })?;
    Ok(out)
}

/// Extracts `#[setting(...)]` metadata applied to a field.
pub(crate) fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    parse_setting(attrs, |meta| apply_field_attr(meta, &mut out))?;
    Ok(out)
}

fn apply_field_attr(meta: &ParseNestedMeta, out: &mut FieldAttrs) -> syn::Result<()> {
    let Some(ident) = meta.path.get_ident().map(ToString::to_string) else {
        return discard_unknown(meta);
    };
    match ident.as_str() {
        "env" => {
            out.sources.push(parse_env_attr(meta)?);
            Ok(())
        }
        "secret" => {
            out.sources.push(parse_secret_attr(meta)?);
            Ok(())
        }
        "toml" => {
            out.sources.push(parse_toml_attr(meta)?);
            Ok(())
        }
        "nested" => {
            out.nested = true;
            Ok(())
        }
        "skip" => {
            out.skip = true;
            Ok(())
        }
        "default" => {
            out.default = Some(parse_default_attr(meta)?);
            Ok(())
        }
        _ => discard_unknown(meta),
    }
}

/// Parses `env` or `env("NAME", ...)` into candidate variable names.
fn parse_env_attr(meta: &ParseNestedMeta) -> syn::Result<SourceAttr> {
    let mut names = Vec::new();
    if meta.input.peek(syn::token::Paren) {
        let content;
        parenthesized!(content in meta.input);
        let literals =
            syn::punctuated::Punctuated::<LitStr, Token![,]>::parse_terminated(&content)?;
        names.extend(literals.iter().map(LitStr::value));
    }
    Ok(SourceAttr::Env { names })
}

/// Parses `secret` or `secret("name", dir = "/path")`.
///
/// Bare string literals are candidate file names; `dir = "..."` entries add
/// search-directory overrides. Both may repeat and mix freely.
fn parse_secret_attr(meta: &ParseNestedMeta) -> syn::Result<SourceAttr> {
    let mut names = Vec::new();
    let mut dirs = Vec::new();
    if meta.input.peek(syn::token::Paren) {
        let content;
        parenthesized!(content in meta.input);
        parse_secret_entries(&content, &mut names, &mut dirs)?;
    }
    Ok(SourceAttr::Secret { names, dirs })
}

fn parse_secret_entries(
    content: ParseStream<'_>,
    names: &mut Vec<String>,
    dirs: &mut Vec<String>,
) -> syn::Result<()> {
    while !content.is_empty() {
        if content.peek(LitStr) {
            names.push(content.parse::<LitStr>()?.value());
        } else {
            let key: syn::Ident = content.parse()?;
            content.parse::<Token![=]>()?;
            let value: LitStr = content.parse()?;
            if key != "dir" {
                return Err(syn::Error::new(
                    key.span(),
                    format!("unknown secret option '{key}'; expected \"dir\""),
                ));
            }
            dirs.push(value.value());
        }
        if !content.is_empty() {
            content.parse::<Token![,]>()?;
        }
    }
    Ok(())
}

/// Parses `toml` or `toml(key = "a.b", file = "app.toml")`.
fn parse_toml_attr(meta: &ParseNestedMeta) -> syn::Result<SourceAttr> {
    let mut key = None;
    let mut file = None;
    if meta.input.peek(syn::token::Paren) {
        let content;
        parenthesized!(content in meta.input);
        parse_toml_entries(&content, &mut key, &mut file)?;
    }
    Ok(SourceAttr::Toml { key, file })
}

fn parse_toml_entries(
    content: ParseStream<'_>,
    key: &mut Option<String>,
    file: &mut Option<String>,
) -> syn::Result<()> {
    while !content.is_empty() {
        let ident: syn::Ident = content.parse()?;
        content.parse::<Token![=]>()?;
        let value: LitStr = content.parse()?;
        match ident.to_string().as_str() {
            "key" => *key = Some(value.value()),
            "file" => *file = Some(value.value()),
            _ => {
                return Err(syn::Error::new(
                    ident.span(),
                    format!("unknown toml option '{ident}'; expected \"key\" or \"file\""),
                ));
            }
        }
        if !content.is_empty() {
            content.parse::<Token![,]>()?;
        }
    }
    Ok(())
}

/// Parses `default` (use the `Default` impl) or `default = expr`.
fn parse_default_attr(meta: &ParseNestedMeta) -> syn::Result<DefaultAttr> {
    if meta.input.peek(Token![=]) {
        Ok(DefaultAttr::Expr(meta.value()?.parse()?))
    } else {
        Ok(DefaultAttr::Trait)
    }
}
