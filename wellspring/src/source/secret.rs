//! Mounted-secret-file source.
//!
//! Each candidate name is joined against an ordered list of search
//! directories. Field-level directory overrides take precedence over the
//! registration's directories, which in turn replace the conventional
//! default. File contents are memoized per path so a secret read for one
//! field is never re-read for another. A missing file is "not found", never
//! an error.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use toml::Value;

use crate::context::Context;
use crate::error::LoadError;

use super::{SourceKind, candidate_names};

/// Conventional directory for container secret mounts.
pub const DEFAULT_SECRET_DIR: &str = "/run/secrets";

/// Configuration for a secret-file lookup.
///
/// # Examples
///
/// ```
/// use wellspring::SecretSource;
///
/// let source = SecretSource::new().name("db_password").dir("/etc/secrets");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SecretSource {
    names: Vec<String>,
    dirs: Vec<PathBuf>,
}

/// Search directories and read-file cache shared by every field in one call.
pub(crate) struct SecretState {
    dirs: Vec<PathBuf>,
    files: BTreeMap<PathBuf, String>,
}

impl SecretSource {
    /// Creates a configuration with no candidate names and default
    /// directories.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            names: Vec::new(),
            dirs: Vec::new(),
        }
    }

    /// Adds a candidate file name, tried in declaration order.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.names.push(name.into());
        self
    }

    /// Adds a search directory, overriding the registration's directories
    /// for this instance.
    #[must_use]
    pub fn dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dirs.push(dir.into());
        self
    }

    /// Creates a registration searching `dirs` instead of the conventional
    /// default directory.
    #[must_use]
    pub fn with_dirs<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            names: Vec::new(),
            dirs: dirs.into_iter().map(Into::into).collect(),
        }
    }

    pub(crate) fn init_state(&self) -> SecretState {
        let dirs = if self.dirs.is_empty() {
            vec![PathBuf::from(DEFAULT_SECRET_DIR)]
        } else {
            self.dirs.clone()
        };
        SecretState {
            dirs,
            files: BTreeMap::new(),
        }
    }

    /// Reads the first existing file across the name and directory search
    /// order, names outer and directories inner.
    pub(crate) fn load(&self, ctx: &mut Context<'_>) -> Result<Option<Value>, LoadError> {
        let names = candidate_names(&self.names, ctx, SourceKind::Secret, "name")?;
        for name in names {
            let file_name = ctx.qualified_name(&name);
            let found = self.read_candidate(ctx, &file_name)?;
            let value = found.map(Value::String);
            ctx.record(SourceKind::Secret, &file_name, value.as_ref());
            if value.is_some() {
                return Ok(value);
            }
        }
        Ok(None)
    }

    fn read_candidate(
        &self,
        ctx: &mut Context<'_>,
        file_name: &str,
    ) -> Result<Option<String>, LoadError> {
        let Some(state) = ctx.secret_state_mut() else {
            return Ok(None);
        };
        let dirs = if self.dirs.is_empty() {
            state.dirs.clone()
        } else {
            self.dirs.clone()
        };
        for dir in dirs {
            let path = dir.join(file_name);
            if let Some(content) = state.files.get(&path) {
                return Ok(Some(content.clone()));
            }
            if !path.is_file() {
                continue;
            }
            let content = read_secret(&path)?;
            state.files.insert(path, content.clone());
            return Ok(Some(content));
        }
        Ok(None)
    }
}

fn read_secret(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| LoadError::read(path, source))
}
