//! Primary error enums for settings resolution and construction.

use std::path::PathBuf;

use thiserror::Error;

use crate::source::SourceKind;

/// Errors that can occur while resolving settings.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    /// A record type matches none of the supported flavors.
    #[error(
        "`{type_name}` matches no supported record flavor \
         (plain, serde, serde_defaults, positional, builder)"
    )]
    UnsupportedType {
        /// Name of the offending record type.
        type_name: &'static str,
    },

    /// A field's type is a union containing more than one record type.
    #[error("field '{field}' of `{record}` is a union of multiple record types: {members}")]
    AmbiguousUnion {
        /// Record type declaring the field.
        record: &'static str,
        /// Field whose union type is ambiguous.
        field: &'static str,
        /// Comma-separated names of the conflicting record members.
        members: String,
    },

    /// A source supplies no candidate name and name inference is disabled.
    #[error("{kind} instance for '{path}' supplies no {option} and name inference is disabled")]
    MissingName {
        /// Source kind that was queried.
        kind: SourceKind,
        /// Dotted path of the field being resolved.
        path: String,
        /// Name of the configuration option that was not supplied.
        option: &'static str,
    },

    /// A document source has no resolvable file reference.
    #[error("Toml instance for '{path}' supplies no file and no default file is configured")]
    MissingFile {
        /// Dotted path of the field being resolved.
        path: String,
    },

    /// A document file could not be read.
    #[error("failed to read '{path}': {source}")]
    Read {
        /// Path of the unreadable file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A document file is not valid TOML.
    #[error("failed to parse '{path}': {source}")]
    Parse {
        /// Path of the unparsable file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: Box<toml::de::Error>,
    },

    /// The record's native construction path rejected the resolved values.
    #[error("failed to construct settings: {source}")]
    Construction {
        /// The construction error, preserved unchanged.
        #[source]
        source: ConstructError,
        /// Rendered resolution history, present when history emission was
        /// enabled for the call.
        provenance: Option<String>,
    },
}

/// Errors raised by a record's construction path.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConstructError {
    /// A required field received no value.
    #[error("`{record}` is missing required field '{field}'")]
    MissingField {
        /// Record type under construction.
        record: &'static str,
        /// Name of the missing field.
        field: &'static str,
    },

    /// A field received a value its declared type rejects.
    #[error("invalid value for field '{field}' of `{record}`: {source}")]
    InvalidValue {
        /// Record type under construction.
        record: &'static str,
        /// Name of the rejecting field.
        field: &'static str,
        /// Underlying deserialization error.
        #[source]
        source: Box<toml::de::Error>,
    },

    /// A positional record received a value for an undeclared field.
    #[error("`{record}` does not accept field '{field}'")]
    UnexpectedField {
        /// Record type under construction.
        record: &'static str,
        /// Name of the undeclared field.
        field: String,
    },

    /// Whole-record deserialization failed.
    #[error("failed to deserialize `{record}`: {source}")]
    Deserialize {
        /// Record type under construction.
        record: &'static str,
        /// Underlying deserialization error.
        #[source]
        source: Box<toml::de::Error>,
    },

    /// A constructed record could not be serialized back into a value.
    #[error("failed to serialize `{record}`: {source}")]
    Reserialize {
        /// Record type that failed to serialize.
        record: &'static str,
        /// Underlying serialization error.
        #[source]
        source: Box<toml::ser::Error>,
    },

    /// A builder-flavored record's builder rejected the resolved values.
    #[error("builder for `{record}` failed: {message}")]
    Builder {
        /// Record type under construction.
        record: &'static str,
        /// Builder-reported failure description.
        message: String,
    },

    /// A raw value could not be coerced to the field's scalar type.
    #[error("cannot coerce '{value}' to {target}")]
    Coerce {
        /// The raw value as text.
        value: String,
        /// Description of the coercion target.
        target: &'static str,
    },
}
