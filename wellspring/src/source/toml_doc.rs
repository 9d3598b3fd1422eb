//! TOML document source.
//!
//! A lookup needs a file reference, taken from the instance or the
//! registration's default, and a dotted key, explicit or inferred from the
//! field name. Documents are parsed once per call and cached by path. The
//! key walks nested tables segment by segment; a missing segment is "not
//! found", while a missing or unparsable file is a hard error.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::path::{Path, PathBuf};

use toml::Value;
use toml::value::Table;

use crate::context::Context;
use crate::error::LoadError;

use super::SourceKind;

/// Configuration for a TOML document lookup.
///
/// # Examples
///
/// ```
/// use wellspring::TomlSource;
///
/// let source = TomlSource::new().key("server.port").file("app.toml");
/// ```
#[derive(Debug, Clone, Default)]
pub struct TomlSource {
    key: Option<String>,
    file: Option<PathBuf>,
}

/// Default document path and parsed-document cache shared by every field in
/// one call.
pub(crate) struct TomlState {
    file: Option<PathBuf>,
    documents: BTreeMap<PathBuf, Table>,
}

impl TomlSource {
    /// Creates a configuration with no key and no file reference.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            key: None,
            file: None,
        }
    }

    /// Sets the dotted lookup key.
    #[must_use]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Sets the document this instance reads from.
    #[must_use]
    pub fn file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Creates a registration whose default document is `file`.
    ///
    /// Field-level instances without their own file reference read from
    /// this document.
    #[must_use]
    pub fn with_file(file: impl Into<PathBuf>) -> Self {
        Self {
            key: None,
            file: Some(file.into()),
        }
    }

    pub(crate) fn init_state(&self) -> TomlState {
        TomlState {
            file: self.file.clone(),
            documents: BTreeMap::new(),
        }
    }

    /// Looks up the dotted key in the referenced document.
    pub(crate) fn load(&self, ctx: &mut Context<'_>) -> Result<Option<Value>, LoadError> {
        let key = self.lookup_key(ctx)?;
        let path = self.document_path(ctx)?;
        let found = {
            let Some(state) = ctx.toml_state_mut() else {
                return Ok(None);
            };
            let document = state.document(&path)?;
            lookup(document, &key)
        };
        ctx.record(SourceKind::Toml, &key, found.as_ref());
        Ok(found)
    }

    /// The lookup key is the explicit key, or the field's own name when
    /// inference is enabled. The key is never delimiter-qualified.
    fn lookup_key(&self, ctx: &Context<'_>) -> Result<String, LoadError> {
        if let Some(key) = &self.key {
            return Ok(key.clone());
        }
        if ctx.infer_names() {
            if let Some(field) = ctx.current() {
                return Ok(field.to_owned());
            }
        }
        Err(LoadError::missing_name(
            SourceKind::Toml,
            ctx.dotted(),
            "key",
        ))
    }

    fn document_path(&self, ctx: &Context<'_>) -> Result<PathBuf, LoadError> {
        if let Some(file) = &self.file {
            return Ok(file.clone());
        }
        if let Some(file) = ctx.default_toml_file() {
            return Ok(file);
        }
        Err(LoadError::missing_file(ctx.dotted()))
    }
}

impl TomlState {
    /// Parses and caches the document at `path`, returning the cached table.
    fn document(&mut self, path: &Path) -> Result<&Table, LoadError> {
        match self.documents.entry(path.to_path_buf()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let data = std::fs::read_to_string(path)
                    .map_err(|source| LoadError::read(path, source))?;
                let table: Table =
                    toml::from_str(&data).map_err(|source| LoadError::parse(path, source))?;
                Ok(entry.insert(table))
            }
        }
    }

    pub(crate) fn default_file(&self) -> Option<PathBuf> {
        self.file.clone()
    }
}

/// Walks a dotted key through nested tables; any missing segment is `None`.
fn lookup(document: &Table, key: &str) -> Option<Value> {
    let mut segments = key.split('.');
    let first = segments.next()?;
    let mut current = document.get(first)?;
    for segment in segments {
        current = current.as_table()?.get(segment)?;
    }
    Some(current.clone())
}
