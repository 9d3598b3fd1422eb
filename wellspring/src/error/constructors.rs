//! Constructor helpers for `LoadError` and `ConstructError`.

use std::path::PathBuf;

use crate::source::SourceKind;

use super::{ConstructError, LoadError};

impl LoadError {
    /// Construct a missing-name error for a source queried at `path`.
    ///
    /// # Examples
    ///
    /// ```
    /// use wellspring::{LoadError, SourceKind};
    /// let e = LoadError::missing_name(SourceKind::Env, "server.port", "env_var");
    /// assert!(matches!(e, LoadError::MissingName { .. }));
    /// ```
    #[must_use]
    pub fn missing_name(kind: SourceKind, path: impl Into<String>, option: &'static str) -> Self {
        Self::MissingName {
            kind,
            path: path.into(),
            option,
        }
    }

    /// Construct a missing-file error for a document source queried at `path`.
    #[must_use]
    pub fn missing_file(path: impl Into<String>) -> Self {
        Self::MissingFile { path: path.into() }
    }

    /// Construct a read error for the file at `path`.
    #[must_use]
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Construct a parse error for the file at `path`.
    #[must_use]
    pub fn parse(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source: Box::new(source),
        }
    }
}

impl ConstructError {
    /// Construct a missing-field error.
    #[must_use]
    pub const fn missing_field(record: &'static str, field: &'static str) -> Self {
        Self::MissingField { record, field }
    }

    /// Construct an invalid-value error from a deserialization failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use wellspring::ConstructError;
    /// let source = toml::Value::String("ten".into())
    ///     .try_into::<u16>()
    ///     .unwrap_err();
    /// let e = ConstructError::invalid_value("AppConfig", "port", source);
    /// assert!(matches!(e, ConstructError::InvalidValue { .. }));
    /// ```
    #[must_use]
    pub fn invalid_value(record: &'static str, field: &'static str, source: toml::de::Error) -> Self {
        Self::InvalidValue {
            record,
            field,
            source: Box::new(source),
        }
    }

    /// Construct an unexpected-field error for a positional record.
    #[must_use]
    pub fn unexpected_field(record: &'static str, field: impl Into<String>) -> Self {
        Self::UnexpectedField {
            record,
            field: field.into(),
        }
    }

    /// Construct a whole-record deserialization error.
    #[must_use]
    pub fn deserialize(record: &'static str, source: toml::de::Error) -> Self {
        Self::Deserialize {
            record,
            source: Box::new(source),
        }
    }

    /// Construct a reserialization error.
    #[must_use]
    pub fn reserialize(record: &'static str, source: toml::ser::Error) -> Self {
        Self::Reserialize {
            record,
            source: Box::new(source),
        }
    }

    /// Construct a builder failure from a builder-reported message.
    #[must_use]
    pub fn builder(record: &'static str, message: impl Into<String>) -> Self {
        Self::Builder {
            record,
            message: message.into(),
        }
    }

    /// Construct a scalar coercion error.
    #[must_use]
    pub fn coerce(value: impl Into<String>, target: &'static str) -> Self {
        Self::Coerce {
            value: value.into(),
            target,
        }
    }
}
