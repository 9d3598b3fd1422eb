//! Built-in value sources and their configuration surface.
//!
//! A [`Source`] is an immutable configuration value: a kind tag plus
//! candidate names and kind-specific options. The same type serves two
//! roles. Registered with a `Loader` it initialises the kind's shared state
//! for the call; attached to a field through the derive macro it directs
//! that field's lookups.

pub(crate) mod env;
pub(crate) mod secret;
pub(crate) mod toml_doc;

use std::fmt;

use toml::Value;

pub use env::EnvSource;
pub use secret::SecretSource;
pub use toml_doc::TomlSource;

use crate::context::Context;
use crate::error::LoadError;

/// Identifies one of the built-in source kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Environment-variable reader.
    Env,
    /// Mounted-secret-file reader.
    Secret,
    /// TOML document reader.
    Toml,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Env => "Env",
            Self::Secret => "Secret",
            Self::Toml => "Toml",
        })
    }
}

/// A configured source instance of any kind.
#[derive(Debug, Clone)]
pub enum Source {
    /// Environment-variable source configuration.
    Env(EnvSource),
    /// Secret-file source configuration.
    Secret(SecretSource),
    /// TOML document source configuration.
    Toml(TomlSource),
}

impl Source {
    /// The kind tag of this configuration.
    #[must_use]
    pub const fn kind(&self) -> SourceKind {
        match self {
            Self::Env(_) => SourceKind::Env,
            Self::Secret(_) => SourceKind::Secret,
            Self::Toml(_) => SourceKind::Toml,
        }
    }

    /// Resolves a value for the current field, or `None` when not found.
    ///
    /// # Errors
    ///
    /// Propagates configuration errors from the concrete source: missing
    /// names or files, unreadable or unparsable documents.
    pub(crate) fn load(&self, ctx: &mut Context<'_>) -> Result<Option<Value>, LoadError> {
        match self {
            Self::Env(source) => source.load(ctx),
            Self::Secret(source) => source.load(ctx),
            Self::Toml(source) => source.load(ctx),
        }
    }
}

impl From<EnvSource> for Source {
    fn from(source: EnvSource) -> Self {
        Self::Env(source)
    }
}

impl From<SecretSource> for Source {
    fn from(source: SecretSource) -> Self {
        Self::Secret(source)
    }
}

impl From<TomlSource> for Source {
    fn from(source: TomlSource) -> Self {
        Self::Toml(source)
    }
}

/// Resolves the candidate names for a lookup.
///
/// Declared names win. With none declared, name inference falls back to the
/// field's own name; otherwise the lookup is misconfigured.
pub(crate) fn candidate_names(
    declared: &[String],
    ctx: &Context<'_>,
    kind: SourceKind,
    option: &'static str,
) -> Result<Vec<String>, LoadError> {
    if !declared.is_empty() {
        return Ok(declared.to_vec());
    }
    if ctx.infer_names() {
        if let Some(field) = ctx.current() {
            return Ok(vec![field.to_owned()]);
        }
    }
    Err(LoadError::missing_name(kind, ctx.dotted(), option))
}
