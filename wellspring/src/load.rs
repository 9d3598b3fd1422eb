//! The top-level loading surface.
//!
//! A [`Loader`] wires default and extra sources, builds the root context,
//! runs the collector, and hands the resolved table to the target type's
//! construction path. On construction failure the resolution history, when
//! enabled, is rendered and emitted through a warning before the error is
//! returned.

use crate::Settings;
use crate::collect::collect;
use crate::context::{Context, Session};
use crate::error::LoadError;
use crate::source::{EnvSource, Source};

/// Join string used when delimiting is enabled without an explicit choice.
pub const DEFAULT_DELIMITER: &str = "_";

/// Builder configuring one resolution call.
///
/// # Examples
///
/// ```rust,no_run
/// use serde::{Deserialize, Serialize};
/// use wellspring::{Loader, Settings, TomlSource};
///
/// #[derive(Debug, Serialize, Deserialize, Settings)]
/// #[setting(flavor = "plain")]
/// struct AppConfig {
///     #[setting(env("APP_PORT"))]
///     #[setting(toml(key = "server.port"))]
///     port: u16,
/// }
///
/// # fn run() -> Result<(), wellspring::LoadError> {
/// let config: AppConfig = Loader::new()
///     .extra_source(TomlSource::with_file("app.toml"))
///     .load()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Loader {
    sources: Vec<Source>,
    extra: Vec<Source>,
    delimiter: Option<String>,
    infer_names: bool,
    emit_history: bool,
}

impl Default for Loader {
    fn default() -> Self {
        Self {
            sources: vec![Source::Env(EnvSource::new())],
            extra: Vec::new(),
            delimiter: None,
            infer_names: false,
            emit_history: false,
        }
    }
}

impl Loader {
    /// Creates a loader with the default source set.
    ///
    /// The default set contains only the environment source; secret and
    /// document sources touch the filesystem and require explicit
    /// registration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the default source set.
    #[must_use]
    pub fn sources<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Source>,
    {
        self.sources = sources.into_iter().map(Into::into).collect();
        self
    }

    /// Registers an additional source without replacing the default set.
    #[must_use]
    pub fn extra_source(mut self, source: impl Into<Source>) -> Self {
        self.extra.push(source.into());
        self
    }

    /// Enables nested-path flattening with the default `_` join string.
    #[must_use]
    pub fn delimited(self) -> Self {
        self.nested_delimiter(DEFAULT_DELIMITER)
    }

    /// Enables nested-path flattening with an explicit join string.
    #[must_use]
    pub fn nested_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = Some(delimiter.into());
        self
    }

    /// Sets whether sources without explicit names fall back to field names.
    #[must_use]
    pub const fn infer_names(mut self, infer: bool) -> Self {
        self.infer_names = infer;
        self
    }

    /// Sets whether resolution history is tracked and emitted on
    /// construction failure.
    #[must_use]
    pub const fn emit_history(mut self, emit: bool) -> Self {
        self.emit_history = emit;
        self
    }

    /// Resolves and constructs a `T`.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] for configuration errors surfaced during
    /// resolution and for construction failures. A construction failure
    /// preserves the native error as its source and, when history emission
    /// is enabled, carries the rendered resolution history.
    pub fn load<T: Settings>(&self) -> Result<T, LoadError> {
        let mut session = Session::new(self.emit_history);
        for source in self.sources.iter().chain(&self.extra) {
            session.register(source);
        }
        let table = {
            let mut ctx = Context::root(&mut session, self.delimiter.as_deref(), self.infer_names);
            collect(T::shape(), &mut ctx)?
        };
        match T::from_table(table) {
            Ok(instance) => Ok(instance),
            Err(source) => {
                let provenance = session.render_provenance();
                if let Some(history) = &provenance {
                    tracing::warn!(
                        record = T::shape().name,
                        history = %history,
                        "settings construction failed"
                    );
                }
                Err(LoadError::Construction { source, provenance })
            }
        }
    }
}

/// Resolves and constructs a `T` with the default loader.
///
/// # Errors
///
/// Returns a [`LoadError`] as described for [`Loader::load`].
pub fn load_settings<T: Settings>() -> Result<T, LoadError> {
    Loader::new().load()
}
