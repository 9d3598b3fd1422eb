//! Environment-variable source.
//!
//! Candidate names are flattened through the context's delimiter policy and
//! upper-cased before lookup, so a nested field `server.port` under the
//! `__` delimiter reads `SERVER__PORT`. The environment is snapshotted once
//! per call during registration and every field resolves against that
//! snapshot.

use std::collections::BTreeMap;

use toml::Value;

use crate::context::Context;
use crate::error::LoadError;

use super::{SourceKind, candidate_names};

/// Configuration for an environment-variable lookup.
///
/// # Examples
///
/// ```
/// use wellspring::EnvSource;
///
/// let source = EnvSource::new().name("APP_PORT").name("PORT");
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
    names: Vec<String>,
    vars: Option<BTreeMap<String, String>>,
}

/// Environment snapshot shared by every field in one call.
pub(crate) struct EnvState {
    vars: BTreeMap<String, String>,
}

impl EnvSource {
    /// Creates a configuration with no candidate names.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            names: Vec::new(),
            vars: None,
        }
    }

    /// Adds a candidate variable name, tried in declaration order.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.names.push(name.into());
        self
    }

    /// Creates a registration whose snapshot is seeded from `vars` instead
    /// of the process environment.
    ///
    /// Intended for tests that must not depend on ambient variables.
    #[must_use]
    pub fn with_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            names: Vec::new(),
            vars: Some(
                vars.into_iter()
                    .map(|(key, value)| (key.into(), value.into()))
                    .collect(),
            ),
        }
    }

    pub(crate) fn init_state(&self) -> EnvState {
        let vars = self
            .vars
            .clone()
            .unwrap_or_else(|| std::env::vars().collect());
        EnvState { vars }
    }

    /// Looks up the first candidate with a value in the snapshot.
    pub(crate) fn load(&self, ctx: &mut Context<'_>) -> Result<Option<Value>, LoadError> {
        let names = candidate_names(&self.names, ctx, SourceKind::Env, "env_var")?;
        for name in names {
            let key = ctx.qualified_name(&name).to_ascii_uppercase();
            let found = ctx
                .env_state()
                .and_then(|state| state.vars.get(&key))
                .cloned();
            let value = found.map(Value::String);
            ctx.record(SourceKind::Env, &key, value.as_ref());
            if value.is_some() {
                return Ok(value);
            }
        }
        Ok(None)
    }
}
